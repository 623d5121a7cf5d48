use serde::Serialize;

/// Command-line values layered over every configuration file
///
/// Only flags that were actually given are serialized, so absent flags never
/// mask file or environment settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_gitignore: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide_negative: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_dirs: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reverse: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_threads: Option<i64>,
}

/// `Some(true)` for a set switch, `None` otherwise
pub fn flag(set: bool) -> Option<bool> {
    set.then_some(true)
}
