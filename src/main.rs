use anyhow::Result;
use clap::Parser;

use prols::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run()
}
