use anyhow::{Context, Result, bail};
use std::fmt;
use std::str::FromStr;

/// How a file depth is compared against a rule's value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthComparison {
    Exact,
    LessThan,
    GreaterThan,
}

/// Depth constraint parsed from `"3"`, `"<3"` or `">3"`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthFilter {
    pub comparison: DepthComparison,
    pub value: usize,
}

impl DepthFilter {
    pub fn new(comparison: DepthComparison, value: usize) -> Self {
        Self { comparison, value }
    }

    pub fn matches(&self, depth: usize) -> bool {
        match self.comparison {
            DepthComparison::Exact => depth == self.value,
            DepthComparison::LessThan => depth < self.value,
            DepthComparison::GreaterThan => depth > self.value,
        }
    }
}

impl FromStr for DepthFilter {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self> {
        let (comparison, digits) = match raw.as_bytes().first() {
            Some(b'<') => (DepthComparison::LessThan, &raw[1..]),
            Some(b'>') => (DepthComparison::GreaterThan, &raw[1..]),
            _ => (DepthComparison::Exact, raw),
        };

        if digits.is_empty() {
            bail!("invalid depth value {:?}: expected a number", raw);
        }
        if !digits.bytes().all(|byte| byte.is_ascii_digit()) {
            bail!("invalid depth value {:?}: expected a non-negative integer", raw);
        }

        let value = digits
            .parse()
            .with_context(|| format!("invalid depth value {:?}", raw))?;

        Ok(Self { comparison, value })
    }
}

impl fmt::Display for DepthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.comparison {
            DepthComparison::Exact => write!(f, "{}", self.value),
            DepthComparison::LessThan => write!(f, "<{}", self.value),
            DepthComparison::GreaterThan => write!(f, ">{}", self.value),
        }
    }
}
