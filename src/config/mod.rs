//! Configuration management for prols
//!
//! Settings are merged with figment from, lowest priority first: built-in
//! defaults, the global YAML file, a project `.prols.yml` in the walk root,
//! `PROLS_*` environment variables, and command-line overrides. Missing files
//! contribute nothing; malformed values and invalid rules are fatal.

mod overrides;

use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub use overrides::{ConfigOverrides, flag};

use crate::parallel::resolve_max_concurrency;
use crate::ranking::{PreSort, RankOptions};
use crate::rules::{self, Rule, RuleConfig};
use crate::scanner::{DEFAULT_IGNORE_DIRS, WalkOptions};

/// Project-local configuration file, looked up in the walk root only
pub const PROJECT_CONFIG: &str = ".prols.yml";

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "PROLS_";

/// Main configuration structure for prols
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProlsConfig {
    /// Directory names never descended into, at any depth
    pub ignore_dirs: Vec<String>,

    /// Skip paths matched by `.gitignore` in the walk root
    pub use_gitignore: bool,

    /// Drop files that end up with a negative score
    pub hide_negative: bool,

    /// Add each top-level directory's score total to its files
    pub score_dirs: bool,

    /// Emit the highest scores first
    pub reverse: bool,

    /// Concurrent directory scans; 0 uses every CPU core, negative disables workers
    pub max_threads: i64,

    /// Scoring rules, all of which are evaluated for every file
    pub rules: Vec<RuleConfig>,

    /// Ordering applied before scoring
    pub presort: Vec<PreSort>,
}

impl Default for ProlsConfig {
    fn default() -> Self {
        Self {
            ignore_dirs: DEFAULT_IGNORE_DIRS.iter().map(|dir| dir.to_string()).collect(),
            use_gitignore: false,
            hide_negative: false,
            score_dirs: false,
            reverse: false,
            max_threads: 0,
            rules: Vec::new(),
            presort: Vec::new(),
        }
    }
}

impl ProlsConfig {
    /// Load and merge every configuration layer
    pub fn load<T: Serialize>(global: &Path, root: &Path, cli_overrides: Option<T>) -> Result<Self> {
        tracing::trace!("loading configuration, global file {}", global.display());

        let project = root.join(PROJECT_CONFIG);

        let mut figment = Figment::new().merge(Serialized::defaults(ProlsConfig::default()));
        for file in [global, project.as_path()] {
            if file.is_file() {
                tracing::debug!("loading configuration file {}", file.display());
                figment = figment.merge(Yaml::file_exact(file));
            }
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX));

        if let Some(cli) = cli_overrides {
            figment = figment.merge(Serialized::defaults(cli));
        }

        let config: ProlsConfig = figment
            .extract()
            .context("unable to load configuration")?;

        Ok(config)
    }

    /// Default global configuration path, `~/.config/prols/prols.conf`
    pub fn default_global_path() -> PathBuf {
        match std::env::var_os("HOME") {
            Some(home) => PathBuf::from(home).join(".config/prols/prols.conf"),
            None => PathBuf::from("~/.config/prols/prols.conf"),
        }
    }

    /// Validate the configured rules
    pub fn compile_rules(&self) -> Result<Vec<Rule>> {
        rules::compile(&self.rules)
    }

    pub fn max_concurrency(&self) -> usize {
        resolve_max_concurrency(self.max_threads)
    }

    pub fn rank_options(&self) -> RankOptions {
        RankOptions {
            hide_negative: self.hide_negative,
            score_dirs: self.score_dirs,
            reverse: self.reverse,
        }
    }

    /// Walk settings for `root`; binary sniffing follows the given rules
    pub fn walk_options(&self, root: &Path, rules: &[Rule]) -> WalkOptions {
        WalkOptions {
            root: root.to_path_buf(),
            ignore_dirs: self.ignore_dirs.iter().cloned().collect::<HashSet<_>>(),
            use_gitignore: self.use_gitignore,
            detect_binary: rules::needs_binary_detection(rules),
            max_concurrency: self.max_concurrency(),
        }
    }
}
