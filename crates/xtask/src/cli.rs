use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the firmware
    Build {
        /// Extra cargo features, e.g. `defmt`
        #[arg(long)]
        features: Option<String>,

        #[arg(long)]
        release: bool,
    },
    /// Build and flash the firmware
    Flash {
        #[arg(long)]
        features: Option<String>,

        #[arg(long)]
        release: bool,

        /// Serial port of the board; espflash probes if omitted
        #[arg(long)]
        port: Option<String>,

        /// Erase the whole flash first
        #[arg(long)]
        force: bool,
    },
    /// Build, flash and open the serial monitor
    Run {
        #[arg(long)]
        features: Option<String>,

        #[arg(long)]
        release: bool,

        #[arg(long)]
        port: Option<String>,
    },
    /// Open the serial monitor on a running board
    Monitor {
        #[arg(long)]
        release: bool,

        #[arg(long)]
        port: Option<String>,

        /// Decode `defmt` frames instead of plain text
        #[arg(long)]
        defmt: bool,
    },
}

impl Commands {
    /// Whether logs are `defmt` encoded, which `espflash monitor` has to be
    /// told about.
    pub fn uses_defmt(features: Option<&str>) -> bool {
        features.is_some_and(|f| {
            f.split([',', ' ']).any(|feature| feature.trim() == "defmt")
        })
    }
}
