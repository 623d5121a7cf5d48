//! Rule matching and scoring
//!
//! Rules are validated once when configuration is loaded; matching never
//! fails. A file's score is the sum of the deltas of every rule it passes.

pub mod depth;
pub mod rule;

use anyhow::{Context, Result};

pub use depth::{DepthComparison, DepthFilter};
pub use rule::{DepthSpec, Rule, RuleConfig};

use crate::scanner::FileRecord;

/// Validate configured rules, naming the first invalid one (1-based)
pub fn compile(configs: &[RuleConfig]) -> Result<Vec<Rule>> {
    configs
        .iter()
        .enumerate()
        .map(|(index, config)| {
            Rule::try_from(config.clone())
                .with_context(|| format!("invalid config rule #{}", index + 1))
        })
        .collect()
}

/// Whether any rule filters on binary content
///
/// Content sniffing is skipped for the whole walk when this is false.
pub fn needs_binary_detection(rules: &[Rule]) -> bool {
    rules.iter().any(|rule| rule.binary.is_some())
}

/// Sum of the score deltas of every rule `file` passes
pub fn score(file: &FileRecord, rules: &[Rule]) -> i64 {
    rules
        .iter()
        .filter(|rule| rule.pass(file))
        .inspect(|rule| tracing::trace!("{} passed {}", file.path, rule))
        .map(|rule| rule.score)
        .sum()
}
