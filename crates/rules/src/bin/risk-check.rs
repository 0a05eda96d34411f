//! risk-check: assess notice graphs against a rules directory.
//!
//! Loads every risk trigger and exemption policy under the rules directory,
//! reads one or more notice graph JSON files, and prints one JSON line per
//! notice with the assessment and the resulting publication decision.
//!
//! With `--validate`, prints the rule validation report instead and exits
//! non-zero when any rule has errors. With `--watch` (or
//! `LUMEN_WATCH_RULES=true`), keeps running and re-assesses the notices each
//! time the rule files change.

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::Parser;
use serde::Serialize;
use tracing::{info, warn};

use lumen_core::config::{load_dotenv, Config};
use lumen_core::NoticeGraph;
use lumen_rules::loader::LoadStatus;
use lumen_rules::validation::validate_documents;
use lumen_rules::{public_body, PublicationDecision, RiskAssessmentResult, RuleLoader, RuleSet};

// ── CLI ─────────────────────────────────────────────────────────────

/// Assess submitted notices against the configured risk triggers.
#[derive(Parser, Debug)]
#[command(name = "risk-check", version, about)]
struct Cli {
    /// Directory containing RiskTrigger / ExemptionPolicy YAML files.
    /// Defaults to LUMEN_RULES_DIR from the environment config.
    #[arg(long)]
    rules_dir: Option<PathBuf>,

    /// Notice graph JSON files to assess.
    #[arg(long = "notice", value_name = "FILE")]
    notices: Vec<PathBuf>,

    /// Pretty-print JSON output.
    #[arg(long)]
    pretty: bool,

    /// Validate the rules directory and print the report instead of assessing.
    #[arg(long)]
    validate: bool,

    /// Keep running and re-assess whenever the rule files change.
    #[arg(long)]
    watch: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    notice: String,
    decision: PublicationDecision,
    public_body: &'a str,
    #[serde(flatten)]
    result: &'a RiskAssessmentResult,
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}

// ── main ────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    load_dotenv();
    let cli = Cli::parse();
    let config = Config::from_env();
    config.log_summary();

    let watch = cli.watch || config.rules.watch;
    let rules_dir = cli.rules_dir.unwrap_or(config.rules.rules_dir);
    let mut loader = RuleLoader::new(rules_dir);
    let results = loader
        .load_all()
        .with_context(|| format!("loading rules from {}", loader.rules_dir().display()))?;

    let failed = results
        .iter()
        .filter(|r| matches!(r.status, LoadStatus::Failed { .. }))
        .count();
    if failed > 0 {
        warn!(failed, "some rule files could not be loaded");
    }

    if cli.validate {
        let validation = validate_documents(&loader.documents());
        print_json(&validation, cli.pretty)?;
        if !validation.valid || failed > 0 {
            bail!(
                "rule validation failed: {} error(s), {} unreadable file(s)",
                validation.errors.len(),
                failed
            );
        }
        return Ok(());
    }

    if cli.notices.is_empty() {
        bail!("no notices given; pass --notice <FILE> (or --validate)");
    }

    let graphs = cli
        .notices
        .iter()
        .map(|path| {
            NoticeGraph::from_path(path).with_context(|| format!("reading notice {}", path.display()))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut rules = loader.snapshot();
    report(&rules, &cli.notices, &graphs, cli.pretty)?;

    if !watch {
        return Ok(());
    }

    loader.watch()?;
    loop {
        thread::sleep(Duration::from_secs(1));
        let next = loader.snapshot();
        if *next != *rules {
            info!("rule set changed, re-assessing");
            rules = next;
            report(&rules, &cli.notices, &graphs, cli.pretty)?;
        }
    }
}

fn report(rules: &RuleSet, paths: &[PathBuf], graphs: &[NoticeGraph], pretty: bool) -> anyhow::Result<()> {
    info!(triggers = rules.triggers().len(), "rule set ready");

    let assessments = rules.assess_batch(graphs);
    for ((path, graph), result) in paths.iter().zip(graphs).zip(&assessments) {
        let decision = PublicationDecision::from(result);
        info!(notice = %path.display(), %decision, matched = result.matched_triggers.len(), "assessed notice");
        print_json(
            &Report {
                notice: path.display().to_string(),
                decision,
                public_body: public_body(&graph.notice, decision),
                result,
            },
            pretty,
        )?;
    }

    Ok(())
}
