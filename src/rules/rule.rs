use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::depth::DepthFilter;
use crate::scanner::FileRecord;

/// Depth as written in configuration: a bare level or a comparison string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DepthSpec {
    Level(i64),
    Expression(String),
}

/// Rule as it appears in configuration files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<DepthSpec>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binary: Option<bool>,

    /// Score delta added to every matching file
    pub score: i64,
}

/// Validated scoring rule
///
/// Every configured filter must pass for the rule to match. A rule without
/// filters matches every file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub depth: Option<DepthFilter>,
    pub binary: Option<bool>,
    pub score: i64,
}

impl Rule {
    pub fn pass(&self, file: &FileRecord) -> bool {
        if let Some(prefix) = &self.prefix {
            if !file.path.starts_with(prefix.as_str()) {
                return false;
            }
        }

        if let Some(suffix) = &self.suffix {
            if !file.path.ends_with(suffix.as_str()) {
                return false;
            }
        }

        if let Some(depth) = &self.depth {
            if !depth.matches(file.depth()) {
                return false;
            }
        }

        if let Some(binary) = self.binary {
            if binary != file.binary {
                return false;
            }
        }

        true
    }
}

impl TryFrom<RuleConfig> for Rule {
    type Error = anyhow::Error;

    fn try_from(config: RuleConfig) -> Result<Self> {
        let depth = match config.depth {
            None => None,
            Some(DepthSpec::Level(level)) => {
                let value = usize::try_from(level)
                    .with_context(|| format!("invalid depth value {}", level))?;
                Some(DepthFilter::new(super::DepthComparison::Exact, value))
            }
            Some(DepthSpec::Expression(raw)) if raw.is_empty() => None,
            Some(DepthSpec::Expression(raw)) => Some(raw.parse()?),
        };

        Ok(Self {
            prefix: config.prefix.filter(|prefix| !prefix.is_empty()),
            suffix: config.suffix.filter(|suffix| !suffix.is_empty()),
            depth,
            binary: config.binary,
            score: config.score,
        })
    }
}

/// Parse an inline rule such as `"prefix: vendor/, score: -100"`
impl FromStr for Rule {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self> {
        let mut config = RuleConfig {
            prefix: None,
            suffix: None,
            depth: None,
            binary: None,
            score: 0,
        };
        let mut has_score = false;

        for part in raw.split(',') {
            let Some((key, value)) = part.split_once(':') else {
                bail!("invalid part of rule: expected key:value, but got: {}", part);
            };
            let value = value.trim();

            match key.trim() {
                "prefix" => config.prefix = Some(value.to_string()),
                "suffix" => config.suffix = Some(value.to_string()),
                "depth" => config.depth = Some(DepthSpec::Expression(value.to_string())),
                "binary" => {
                    config.binary = Some(
                        value
                            .parse()
                            .with_context(|| format!("invalid binary value {:?}", value))?,
                    );
                }
                "score" => {
                    config.score = value
                        .parse()
                        .with_context(|| format!("invalid score value {:?}", value))?;
                    has_score = true;
                }
                other => bail!("unknown rule field: {}", other),
            }
        }

        if !has_score {
            bail!("invalid rule {:?}: missing required field score", raw);
        }

        Rule::try_from(config).with_context(|| format!("invalid rule: {}", raw))
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(prefix) = &self.prefix {
            parts.push(format!("prefix: {}", prefix));
        }
        if let Some(suffix) = &self.suffix {
            parts.push(format!("suffix: {}", suffix));
        }
        if let Some(depth) = &self.depth {
            parts.push(format!("depth: {}", depth));
        }
        if let Some(binary) = self.binary {
            parts.push(format!("binary: {}", binary));
        }
        parts.push(format!("score: {}", self.score));

        write!(f, "[{}]", parts.join("; "))
    }
}
