//! CLI for stamping out a new service module skeleton

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "generate-module",
    about = "Create the six-file skeleton for a new service module"
)]
struct Cli {
    /// Module path relative to the source root, e.g. api/users
    module: String,

    /// Source root the module tree lives under
    #[arg(short, long, default_value = "src")]
    root: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let created = scaffold::create_module(&cli.root, &cli.module)
        .with_context(|| format!("failed to scaffold module \"{}\"", cli.module))?;

    println!("Module \"{}\" created at {}", cli.module, created.path.display());
    for file in &created.files {
        println!("  {}", file.display());
    }

    Ok(())
}
