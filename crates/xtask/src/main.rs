mod build;
mod cli;
mod constants;
mod flash;
mod monitor;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Build { features, release } => {
            println!("Building firmware...");
            build::build_firmware(features.as_deref(), *release)?;
            println!("Build complete!");
        }
        Commands::Flash { features, release, port, force } => {
            flash::flash_firmware(
                features.as_deref(),
                *release,
                port.as_deref(),
                *force,
            )?;
        }
        Commands::Run { features, release, port } => {
            flash::flash_firmware(
                features.as_deref(),
                *release,
                port.as_deref(),
                false,
            )?;

            println!("Attaching monitor...");
            monitor::run(
                *release,
                port.as_deref(),
                Commands::uses_defmt(features.as_deref()),
            )?;
        }
        Commands::Monitor { release, port, defmt } => {
            monitor::run(*release, port.as_deref(), *defmt)?;
        }
    }

    Ok(())
}
