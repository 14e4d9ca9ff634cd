use anyhow::{Context, Result};
use std::process::Command;

use crate::constants::{app_elf, CHIP};

pub fn flash_firmware(
    features: Option<&str>,
    release: bool,
    port: Option<&str>,
    force: bool,
) -> Result<()> {
    // First build the firmware
    crate::build::build_firmware(features, release)?;

    let app_path = app_elf(release);

    if force {
        println!("Erasing flash...");
        let mut cmd = Command::new("espflash");
        cmd.args(["erase-flash", "--chip", CHIP]);
        if let Some(port) = port {
            cmd.args(["--port", port]);
        }
        let status = cmd.status().context("Failed to erase flash")?;
        if !status.success() {
            anyhow::bail!("Failed to erase flash");
        }
    }

    println!("Flashing {}...", app_path);
    let mut cmd = Command::new("espflash");
    cmd.args(["flash", "--chip", CHIP]);
    if let Some(port) = port {
        cmd.args(["--port", port]);
    }
    cmd.arg(&app_path);

    let status = cmd.status().context("Failed to flash application")?;
    if !status.success() {
        anyhow::bail!("Failed to flash application");
    }

    Ok(())
}
