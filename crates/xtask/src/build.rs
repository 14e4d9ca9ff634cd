use crate::constants::{APP_MANIFEST, TARGET};
use crate::cli::Commands;
use anyhow::{Context, Result};
use std::process::Command;

pub fn build_firmware(features: Option<&str>, release: bool) -> Result<()> {
    let mut cargo_build = Command::new("cargo");
    cargo_build
        .arg("build")
        .arg("--manifest-path")
        .arg(APP_MANIFEST)
        .arg("--target")
        .arg(TARGET);

    if release {
        cargo_build.arg("--release");
    }

    // `log` is the default backend; `defmt` replaces it.
    if Commands::uses_defmt(features) {
        cargo_build.arg("--no-default-features");
    }

    if let Some(features) = features {
        cargo_build.args(["--features", features]);
    }

    let status = cargo_build
        .status()
        .with_context(|| format!("Failed to build {}", APP_MANIFEST))?;

    if !status.success() {
        anyhow::bail!("Build failed for {}", APP_MANIFEST);
    }

    Ok(())
}
