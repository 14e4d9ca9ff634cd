//! Exports the capture configuration and build info to the firmware.
//!
//! Every `CANDUMP_*` key is taken from the environment first, then from the
//! repository `.env` file, then from the defaults below. Values are passed
//! through unparsed; the firmware validates them at startup.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

const KEYS: [(&str, &str); 6] = [
    ("CANDUMP_BITRATE", "500k"),
    ("CANDUMP_TX_GPIO", "5"),
    ("CANDUMP_RX_GPIO", "4"),
    ("CANDUMP_RX_LED", "n"),
    ("CANDUMP_RX_LED_GPIO", "8"),
    ("CANDUMP_RX_LED_POLARITY", "active-high"),
];

fn main() {
    println!("cargo:rustc-link-arg=-Tlinkall.x");
    if env::var("CARGO_FEATURE_DEFMT").is_ok() {
        println!("cargo:rustc-link-arg=-Tdefmt.x");
    }

    let mut dotenv = HashMap::new();
    if let Some(repo_root) = repo_root_from_manifest() {
        let env_path = repo_root.join(".env");
        if env_path.exists() {
            println!("cargo:rerun-if-changed={}", env_path.display());
            dotenv.extend(load_env_file(&env_path));
        }
    }

    for (key, default) in KEYS {
        println!("cargo:rerun-if-env-changed={key}");
        let value = env::var(key)
            .ok()
            .or_else(|| dotenv.get(key).cloned())
            .unwrap_or_else(|| default.to_string());
        println!("cargo:rustc-env={key}={value}");
    }

    // Build info
    let pkg_version = env!("CARGO_PKG_VERSION");
    let git_hash = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|hash| hash.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=COMMIT_HASH={git_hash}");
    println!("cargo:rustc-env=FW_VERSION={pkg_version}-{git_hash}");
}

fn repo_root_from_manifest() -> Option<PathBuf> {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").ok()?);
    manifest_dir.parent()?.parent().map(Path::to_path_buf)
}

/// Minimal `KEY=VALUE` reader. Blank lines and `#` comments are skipped and
/// matching surrounding quotes are stripped.
fn load_env_file(path: &Path) -> HashMap<String, String> {
    let mut map = HashMap::new();
    let Ok(contents) = fs::read_to_string(path) else {
        return map;
    };
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line);
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let value = value.trim();
        let value = value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .or_else(|| {
                value.strip_prefix('\'').and_then(|v| v.strip_suffix('\''))
            })
            .unwrap_or(value);
        map.insert(key.trim().to_string(), value.to_string());
    }
    map
}
