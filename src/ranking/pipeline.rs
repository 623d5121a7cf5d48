use std::collections::HashMap;

use super::presort::{PreSort, apply_presort};
use crate::rules::{self, Rule};
use crate::scanner::FileRecord;

/// Group that collects files living directly in the walk root
pub const ROOT_GROUP: &str = ".";

/// Optional pipeline stages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RankOptions {
    pub hide_negative: bool,
    pub score_dirs: bool,
    pub reverse: bool,
}

/// Turns scan results into the final ordering
///
/// Stages run strictly in order: pre-sort, rule scoring, score sort,
/// negative trimming, directory aggregation (with a second score sort),
/// reversal. Every sort is stable, so the order established by one stage
/// breaks ties in the next.
pub struct Ranker<'a> {
    rules: &'a [Rule],
    presort: &'a [PreSort],
    options: RankOptions,
}

impl<'a> Ranker<'a> {
    pub fn new(rules: &'a [Rule], presort: &'a [PreSort], options: RankOptions) -> Self {
        Self {
            rules,
            presort,
            options,
        }
    }

    pub fn rank(&self, mut files: Vec<FileRecord>) -> Vec<FileRecord> {
        apply_presort(&mut files, self.presort);
        apply_rules(&mut files, self.rules);
        sort_by_score(&mut files);
        dump_scores("items with all scores", &files);

        if self.options.hide_negative {
            files = remove_negative(files);
        }

        if self.options.score_dirs {
            apply_score_dirs(&mut files);
            sort_by_score(&mut files);
        }

        if self.options.reverse {
            files.reverse();
        }

        dump_scores("resulting scores (possibly reversed)", &files);
        files
    }
}

/// Reset and recompute every file's score from the rule list
pub fn apply_rules(files: &mut [FileRecord], rules: &[Rule]) {
    for file in files.iter_mut() {
        file.score = rules::score(file, rules);
    }
}

/// Stable ascending sort by score
pub fn sort_by_score(files: &mut [FileRecord]) {
    files.sort_by_key(|file| file.score);
}

/// Drop everything up to and including the last negative-score file
///
/// On score-sorted input this removes exactly the negative files.
pub fn remove_negative(mut files: Vec<FileRecord>) -> Vec<FileRecord> {
    match files.iter().rposition(|file| file.score < 0) {
        Some(last) => files.split_off(last + 1),
        None => files,
    }
}

/// Top-level path segment including its trailing `/`, or [`ROOT_GROUP`]
pub fn top_level_group(path: &str) -> &str {
    match path.find('/') {
        Some(index) => &path[..=index],
        None => ROOT_GROUP,
    }
}

/// Add each top-level group's score total to every member of the group
pub fn apply_score_dirs(files: &mut [FileRecord]) {
    let mut totals: HashMap<&str, i64> = HashMap::new();
    for file in files.iter() {
        *totals.entry(top_level_group(&file.path)).or_default() += file.score;
    }

    let bonuses: Vec<i64> = files
        .iter()
        .map(|file| totals[top_level_group(&file.path)])
        .collect();

    for (file, bonus) in files.iter_mut().zip(bonuses) {
        file.score += bonus;
    }
}

fn dump_scores(title: &str, files: &[FileRecord]) {
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return;
    }

    tracing::debug!("{}", title);
    for file in files {
        tracing::debug!("{} {}", file.path, file.score);
    }
}
