pub const TARGET: &str = "riscv32imc-unknown-none-elf";
pub const CHIP: &str = "esp32c3";
pub const APP_MANIFEST: &str = "crates/candump-app/Cargo.toml";
pub const APP_NAME: &str = "candump-app";

/// Path of the firmware ELF produced by [`crate::build::build_firmware`].
pub fn app_elf(release: bool) -> String {
    let profile = if release { "release" } else { "debug" };
    format!("target/{TARGET}/{profile}/{APP_NAME}")
}
