use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::scanner::FileRecord;

/// File attribute a pre-sort key compares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Depth,
    Path,
    #[serde(alias = "mod_time", alias = "modified_time", alias = "mtime")]
    Modtime,
}

/// One key of the compound pre-sort comparator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PreSort {
    pub field: SortField,
    #[serde(default)]
    pub reverse: bool,
}

impl PreSort {
    pub fn new(field: SortField, reverse: bool) -> Self {
        Self { field, reverse }
    }

    /// Ascending comparison on this key's field, flipped when `reverse` is set
    pub fn compare(&self, a: &FileRecord, b: &FileRecord) -> Ordering {
        let ordering = match self.field {
            SortField::Depth => a.depth().cmp(&b.depth()),
            SortField::Path => a.path.cmp(&b.path),
            SortField::Modtime => a.modified.cmp(&b.modified),
        };

        if self.reverse { ordering.reverse() } else { ordering }
    }
}

/// Compare by each key in turn; the first key that differs decides
pub fn compare_keys(keys: &[PreSort], a: &FileRecord, b: &FileRecord) -> Ordering {
    keys.iter()
        .map(|key| key.compare(a, b))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Stable sort by the compound key list
pub fn apply_presort(files: &mut [FileRecord], keys: &[PreSort]) {
    if keys.is_empty() {
        return;
    }
    files.sort_by(|a, b| compare_keys(keys, a, b));
}
