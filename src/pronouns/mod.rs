//! # Divine Pronoun Passes
//!
//! Offline edits to the stored corpus. Never run by the server or reader.
//!
//! | Pass         | Effect                                                        |
//! |--------------|---------------------------------------------------------------|
//! | `capitalize` | he/him/his/himself → He/… in verses naming a divine referent  |
//! | `revert`     | He/Him/His/Himself → lowercase everywhere                     |
//! | `repair`     | lowercase in non-divine verses, then apply phrase overrides   |
//!
//! Typical session: `revert` for a clean baseline, `capitalize`, then
//! `repair`. Running `capitalize` or `revert` twice in a row is a no-op.
//!
//! Each run rewrites both corpus files in place unless `--dry-run` is given.

pub mod rewrite;
pub mod rules;
pub mod runner;

use clap::ValueEnum;
use log::info;

use crate::core::config::ResolvedConfig;
pub use rewrite::Rewriter;
pub use rules::RuleSet;
pub use runner::{FileOutcome, FileReport, PipelineError, run_pass};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Pass {
    Capitalize,
    Revert,
    Repair,
}

impl Pass {
    pub fn label(self) -> &'static str {
        match self {
            Pass::Capitalize => "capitalize",
            Pass::Revert => "revert",
            Pass::Repair => "repair",
        }
    }
}

/// Load rules (from the configured file or built-ins) and run `pass` over
/// both corpus files.
pub fn run(
    config: &ResolvedConfig,
    pass: Pass,
    dry_run: bool,
) -> Result<Vec<FileOutcome>, PipelineError> {
    let rules = match &config.rules_file {
        Some(path) => {
            info!("Loading pronoun rules from {}", path.display());
            RuleSet::load(path).map_err(PipelineError::Rules)?
        }
        None => RuleSet::default(),
    };
    let rewriter = Rewriter::new(&rules).map_err(PipelineError::Rules)?;
    info!("Running {} pass (dry_run={})", pass.label(), dry_run);
    run_pass(&rewriter, pass, &config.corpus_files(), dry_run)
}
