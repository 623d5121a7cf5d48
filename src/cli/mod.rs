//! Command-line interface for prols
//!
//! Parses flags with clap, sets up logging, loads configuration and runs
//! walk → rank → emit over the current directory.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use std::path::{Path, PathBuf};

pub mod output;

use crate::config::{ConfigOverrides, ProlsConfig, flag};
use crate::ranking::Ranker;
use crate::rules::Rule;
use crate::scanner::{self, ROOT};

/// Flexible project-wide search tool based on rules and scores
#[derive(Parser, Debug)]
#[command(name = "prols", author, version, about, long_about = None)]
pub struct Cli {
    /// Use specified global prols file [default: ~/.config/prols/prols.conf]
    #[arg(short = 'c', long = "global", value_name = "PATH", env = "PROLS_GLOBAL")]
    pub global: Option<PathBuf>,

    /// Print debug messages
    #[arg(long)]
    pub debug: bool,

    /// Increase log verbosity (-vv traces every rule match)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Extra rule appended after configured ones, e.g. "suffix: .rs, score: 5"
    #[arg(short = 'r', long = "rule", value_name = "RULE")]
    pub rules: Vec<String>,

    /// Skip paths matched by .gitignore
    #[arg(long)]
    pub use_gitignore: bool,

    /// Hide files with a negative score
    #[arg(long)]
    pub hide_negative: bool,

    /// Add top-level directory score totals to their files
    #[arg(long)]
    pub score_dirs: bool,

    /// Print highest scores first
    #[arg(long)]
    pub reverse: bool,

    /// Maximum concurrent directory scans (0 = all CPU cores)
    #[arg(short = 'j', long, value_name = "N", allow_negative_numbers = true)]
    pub max_threads: Option<i64>,

    /// Print the merged configuration as YAML and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        setup_logging(self.debug, self.verbose);

        let root = Path::new(ROOT);
        let global = self
            .global
            .clone()
            .unwrap_or_else(ProlsConfig::default_global_path);

        let config = ProlsConfig::load(&global, root, Some(self.overrides()))?;

        if self.show_config {
            let yaml = serde_yml::to_string(&config).context("unable to serialize configuration")?;
            print!("{}", yaml);
            return Ok(());
        }

        let rules = self.rules(&config)?;

        let files = scanner::walk(&config.walk_options(root, &rules))
            .context("unable to walk directory")?;
        let files = Ranker::new(&rules, &config.presort, config.rank_options()).rank(files);

        output::emit(&files)
    }

    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            use_gitignore: flag(self.use_gitignore),
            hide_negative: flag(self.hide_negative),
            score_dirs: flag(self.score_dirs),
            reverse: flag(self.reverse),
            max_threads: self.max_threads,
        }
    }

    /// Configured rules followed by `--rule` ones
    fn rules(&self, config: &ProlsConfig) -> Result<Vec<Rule>> {
        let mut rules = config.compile_rules()?;
        for raw in &self.rules {
            rules.push(raw.parse()?);
        }
        Ok(rules)
    }
}

fn setup_logging(debug: bool, verbose: u8) {
    let level = verbose.saturating_add(u8::from(debug));

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match level {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("debug,ignore=warn,globset=warn"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    // A subscriber may already be installed when embedded; keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
