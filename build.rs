// serial-console - Build Script
//
// Forwards build-time configuration and the version string to the crate.

use std::process::Command;

fn main() {
    // ESP-IDF environment setup (MUST be first when targeting the device)
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("espidf") {
        embuild::espidf::sysenv::output();
    }

    // Get git version info
    let version = env!("CARGO_PKG_VERSION");
    let git_hash = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=GIT_HASH={}", git_hash);
    println!("cargo:rustc-env=VERSION_STRING=SerialConsole v{}-g{}", version, git_hash);

    // Buffer sizes, parsed by config::parse_size (empty means default)
    for key in ["CLI_OUTPUT_BUFFER_SIZE", "CLI_LINE_SIZE"] {
        let value = std::env::var(key).unwrap_or_default();
        println!("cargo:rustc-env={}={}", key, value.trim());
        println!("cargo:rerun-if-env-changed={}", key);
    }

    // Rebuild if git HEAD changes
    println!("cargo:rerun-if-changed=.git/HEAD");
}
