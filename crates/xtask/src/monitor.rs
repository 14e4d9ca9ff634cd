use anyhow::{Context, Result};
use std::process::Command;

use crate::constants::{app_elf, CHIP};

/// Attaches `espflash monitor`, resolving backtraces and `defmt` frames
/// against the firmware ELF.
pub fn run(release: bool, port: Option<&str>, defmt: bool) -> Result<()> {
    let elf = app_elf(release);
    let mut cmd = Command::new("espflash");
    cmd.args(["monitor", "--chip", CHIP, "--elf", &elf]);
    if let Some(port) = port {
        cmd.args(["--port", port]);
    }
    if defmt {
        cmd.args(["--log-format", "defmt"]);
    }

    let status = cmd.status().context("Failed to start espflash monitor")?;

    if !status.success() {
        anyhow::bail!("espflash monitor failed");
    }

    Ok(())
}
