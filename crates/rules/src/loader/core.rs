//! Core [`RuleLoader`] struct: filesystem-backed rule loading with optional hot-reload.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{info, warn};

use crate::schema::{RuleDocument, RuleEnvelope};
use crate::validation::validate_document;

use super::error::{LoadResult, LoadStatus, Result, RuleError};
use super::ruleset::RuleSet;
use super::watcher::handle_fs_event;

/// Loaded documents keyed by `metadata.id`, plus the file each came from.
///
/// A rule id belongs to one file. Files rejected for reusing an id are kept
/// in `shadowed` and loaded once the owning file goes away.
#[derive(Debug, Default)]
pub(super) struct DocumentStore {
    pub(super) documents: HashMap<String, RuleDocument>,
    pub(super) sources: HashMap<PathBuf, String>,
    pub(super) shadowed: HashMap<PathBuf, String>,
}

impl DocumentStore {
    /// Insert a document, replacing whatever the same file held before.
    ///
    /// Fails when another file already provides the same rule id; the loaded
    /// documents are left unchanged.
    pub(super) fn upsert(&mut self, path: PathBuf, doc: RuleDocument) -> Result<String> {
        let rule_id = doc.metadata().id.clone();
        if let Some(owner) = self.owner_of(&rule_id, &path) {
            let message = format!(
                "duplicate rule id '{}': already loaded from {}",
                rule_id,
                owner.display()
            );
            self.shadowed.insert(path, rule_id);
            return Err(RuleError::Validation(message));
        }
        self.shadowed.remove(&path);
        if let Some(previous) = self.sources.insert(path, rule_id.clone()) {
            if previous != rule_id {
                self.release(&previous);
            }
        }
        self.documents.insert(rule_id.clone(), doc);
        Ok(rule_id)
    }

    /// Drop the document loaded from `path`, if any.
    pub(super) fn remove_path(&mut self, path: &Path) -> Option<String> {
        self.shadowed.remove(path);
        let rule_id = self.sources.remove(path)?;
        self.release(&rule_id);
        Some(rule_id)
    }

    /// File other than `path` that provides `rule_id`.
    fn owner_of(&self, rule_id: &str, path: &Path) -> Option<&Path> {
        self.sources
            .iter()
            .find(|(source, id)| id.as_str() == rule_id && source.as_path() != path)
            .map(|(source, _)| source.as_path())
    }

    /// Remove the document for `rule_id` once no file maps to it, then hand
    /// the id to a shadowed file if one is still on disk.
    fn release(&mut self, rule_id: &str) {
        if self.sources.values().any(|id| id == rule_id) {
            return;
        }
        self.documents.remove(rule_id);

        let mut candidates: Vec<PathBuf> = self
            .shadowed
            .iter()
            .filter(|(_, id)| id.as_str() == rule_id)
            .map(|(path, _)| path.clone())
            .collect();
        candidates.sort();
        for path in candidates {
            self.shadowed.remove(&path);
            let promoted = fs::read_to_string(&path)
                .map_err(RuleError::from)
                .and_then(|contents| parse_document(&contents))
                .and_then(|doc| self.upsert(path.clone(), doc));
            match promoted {
                Ok(id) => {
                    info!(rule_id = %id, path = %path.display(), "loaded previously shadowed rule");
                    return;
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to load shadowed rule");
                }
            }
        }
    }
}

/// Filesystem-backed rule loader with optional hot-reload.
///
/// Scans a directory (recursively) for `*.yml` / `*.yaml` files, deserializes
/// them into [`RuleDocument`] instances via two-pass deserialization, and
/// maintains an in-memory map keyed by rule ID.
///
/// Assessments never read the map directly: they take a [`RuleSet`]
/// snapshot via [`snapshot()`](Self::snapshot).
pub struct RuleLoader {
    /// Root directory containing rule YAML files.
    rules_dir: PathBuf,
    store: Arc<RwLock<DocumentStore>>,
    /// Active filesystem watcher (held to keep it alive).
    _watcher: Option<RecommendedWatcher>,
}

impl RuleLoader {
    /// Create a new loader for the given directory. Nothing is read until
    /// [`load_all`](Self::load_all).
    pub fn new(rules_dir: PathBuf) -> Self {
        // Watcher events carry absolute paths; keep source keys comparable.
        let rules_dir = rules_dir.canonicalize().unwrap_or(rules_dir);
        Self {
            rules_dir,
            store: Arc::new(RwLock::new(DocumentStore::default())),
            _watcher: None,
        }
    }

    /// Recursively scan the rules directory and load all YAML files.
    ///
    /// Dotfiles (filenames starting with `.`) and non-YAML files are skipped.
    /// Subdirectories are scanned recursively.
    /// Parse errors are reported per-file but do not abort the scan.
    pub fn load_all(&self) -> Result<Vec<LoadResult>> {
        if !self.rules_dir.is_dir() {
            return Err(RuleError::Validation(format!(
                "rules directory '{}' does not exist",
                self.rules_dir.display()
            )));
        }
        let mut results = Vec::new();
        self.scan_dir_recursive(&self.rules_dir, &mut results)?;
        Ok(results)
    }

    /// Recursively scan a directory for YAML rule files.
    fn scan_dir_recursive(&self, dir: &Path, results: &mut Vec<LoadResult>) -> Result<()> {
        let entries = match fs::read_dir(dir) {
            Ok(e) => e,
            Err(e) => {
                warn!(path = %dir.display(), error = %e, "failed to read directory");
                return Ok(());
            }
        };

        for entry in entries {
            let entry = entry?;
            let path = entry.path();

            // Skip dotfiles/dotdirs
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                if name.starts_with('.') {
                    if path.is_file() {
                        results.push(LoadResult {
                            path,
                            status: LoadStatus::Skipped {
                                reason: "dotfile".to_string(),
                            },
                        });
                    }
                    continue;
                }
            }

            if path.is_dir() {
                self.scan_dir_recursive(&path, results)?;
                continue;
            }

            if !is_yaml(&path) {
                results.push(LoadResult {
                    path,
                    status: LoadStatus::Skipped {
                        reason: "not a YAML file".to_string(),
                    },
                });
                continue;
            }

            let loaded = self.load_file(&path).and_then(|doc| {
                let kind = doc.kind();
                log_validation(&path, &doc);
                let rule_id = self
                    .store
                    .write()
                    .expect("rule store lock poisoned")
                    .upsert(path.clone(), doc)?;
                Ok((rule_id, kind))
            });
            match loaded {
                Ok((rule_id, kind)) => {
                    info!(rule_id = %rule_id, kind = %kind, path = %path.display(), "loaded rule");
                    results.push(LoadResult {
                        path,
                        status: LoadStatus::Loaded { rule_id },
                    });
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to load rule file");
                    results.push(LoadResult {
                        path,
                        status: LoadStatus::Failed {
                            error: e.to_string(),
                        },
                    });
                }
            }
        }

        Ok(())
    }

    /// Parse a single YAML file into a [`RuleDocument`] via two-pass deserialization.
    ///
    /// First pass: deserialize as [`RuleEnvelope`] to read the `kind` field.
    /// Second pass: reconstruct and deserialize into the kind-specific type.
    pub fn load_file(&self, path: &Path) -> Result<RuleDocument> {
        let contents = fs::read_to_string(path)?;
        parse_document(&contents)
    }

    /// Start a filesystem watcher with 500ms debounce.
    ///
    /// On file create/modify the rule is re-parsed and upserted.
    /// On file delete the rule is removed from the in-memory map.
    /// Parse errors are logged as warnings; the previous version is kept.
    pub fn watch(&mut self) -> Result<()> {
        let store = Arc::clone(&self.store);

        let mut watcher = notify::recommended_watcher(
            move |res: std::result::Result<notify::Event, notify::Error>| match res {
                Ok(event) => handle_fs_event(&event, &store),
                Err(e) => warn!(error = %e, "filesystem watcher error"),
            },
        )?;

        watcher.watch(&self.rules_dir, RecursiveMode::Recursive)?;

        let _ = watcher.configure(notify::Config::default().with_poll_interval(Duration::from_millis(500)));

        info!(path = %self.rules_dir.display(), "watching rules directory for changes (recursive)");
        self._watcher = Some(watcher);
        Ok(())
    }

    /// Get the rules directory path.
    pub fn rules_dir(&self) -> &Path {
        &self.rules_dir
    }

    /// Clone of every loaded document, keyed by rule ID.
    pub fn documents(&self) -> HashMap<String, RuleDocument> {
        self.store
            .read()
            .expect("rule store lock poisoned")
            .documents
            .clone()
    }

    /// Freeze the currently loaded rules into an immutable [`RuleSet`].
    pub fn snapshot(&self) -> Arc<RuleSet> {
        let guard = self.store.read().expect("rule store lock poisoned");
        Arc::new(RuleSet::from_documents(&guard.documents))
    }
}

pub(super) fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "yml" || e == "yaml")
        .unwrap_or(false)
}

/// Log advisory validation errors for a freshly parsed document. Returns
/// whether the document validated cleanly.
pub(super) fn log_validation(path: &Path, doc: &RuleDocument) -> bool {
    let validation = validate_document(doc);
    for error in &validation.errors {
        warn!(path = %path.display(), at = %error.path, "{}", error.message);
    }
    validation.valid
}

/// Two-pass parse of one YAML document.
pub(super) fn parse_document(contents: &str) -> Result<RuleDocument> {
    // First pass: extract envelope (kind + metadata).
    let envelope: RuleEnvelope = serde_yaml::from_str(contents)?;

    if envelope.metadata.id.is_empty() {
        return Err(RuleError::Validation(
            "rule metadata.id must not be empty".to_string(),
        ));
    }

    // Second pass: deserialize into kind-specific type.
    envelope.parse_full().map_err(|e| {
        RuleError::Validation(format!(
            "failed to parse rule '{}': {}",
            envelope.metadata.id, e
        ))
    })
}
