//! Filesystem event handler for the notify watcher (hot-reload).

use std::fs;
use std::sync::{Arc, RwLock};

use notify::event::{CreateKind, ModifyKind, RemoveKind};
use notify::{Event, EventKind};
use tracing::{info, warn};

use super::core::{is_yaml, log_validation, parse_document, DocumentStore};

/// Handle a single filesystem event from the notify watcher.
pub(super) fn handle_fs_event(event: &Event, store: &Arc<RwLock<DocumentStore>>) {
    for path in &event.paths {
        if !is_yaml(path) {
            continue;
        }

        // Skip dotfiles (editor swap files, temp writes)
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if name.starts_with('.') {
                continue;
            }
        }

        match &event.kind {
            EventKind::Create(CreateKind::File)
            | EventKind::Modify(ModifyKind::Data(_))
            | EventKind::Modify(ModifyKind::Name(_)) => {
                if !path.exists() {
                    // Rename away from this path.
                    remove_path(store, path);
                    continue;
                }
                match fs::read_to_string(path) {
                    Ok(contents) => match parse_document(&contents) {
                        Ok(doc) => {
                            let kind = doc.kind();
                            log_validation(path, &doc);
                            let upserted = store
                                .write()
                                .expect("rule store lock poisoned")
                                .upsert(path.clone(), doc);
                            match upserted {
                                Ok(rule_id) => {
                                    info!(rule_id = %rule_id, kind = %kind, path = %path.display(), "hot-reloaded rule");
                                }
                                Err(e) => {
                                    warn!(
                                        path = %path.display(),
                                        error = %e,
                                        "rejected rule during hot-reload, keeping previous version"
                                    );
                                }
                            }
                        }
                        Err(e) => {
                            warn!(
                                path = %path.display(),
                                error = %e,
                                "failed to parse rule during hot-reload, keeping previous version"
                            );
                        }
                    },
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "failed to read file during hot-reload");
                    }
                }
            }
            EventKind::Remove(RemoveKind::File) => remove_path(store, path),
            _ => {}
        }
    }
}

fn remove_path(store: &Arc<RwLock<DocumentStore>>, path: &std::path::Path) {
    let removed = store
        .write()
        .expect("rule store lock poisoned")
        .remove_path(path);
    if let Some(rule_id) = removed {
        info!(rule_id = %rule_id, path = %path.display(), "removed rule after file deletion");
    }
}
