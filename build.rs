use std::{env, fs, path::PathBuf};

fn main() {
    // 1) Linker script, only when building firmware for the Pico 2 ARM core
    let target = env::var("TARGET").unwrap_or_default();
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));

    if target.starts_with("thumbv8m") {
        let memory_x = fs::read_to_string("memory.x").expect("Failed to read memory.x");
        fs::write(out_dir.join("memory.x"), memory_x).expect("Failed to write memory.x");
        println!("cargo:rustc-link-search={}", out_dir.display());
        println!("cargo:rustc-link-arg-bins=--nmagic");
        println!("cargo:rustc-link-arg-bins=-Tlink.x");
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }
    println!("cargo:rerun-if-changed=memory.x");

    // 2) Optional .env next to Cargo.toml
    let _ = dotenvy::from_filename(".env");

    // 3) Expose as compile-time constants, falling back to the bench defaults
    let wifi_ssid = env_or_default("WIFI_SSID", "Omax");
    let wifi_password = env_or_default("WIFI_PASSWORD", "12345678");
    let robot_name = env_or_default("ROBOT_NAME", "Robot00");

    println!("cargo:rustc-env=WIFI_SSID={wifi_ssid}");
    println!("cargo:rustc-env=WIFI_PASSWORD={wifi_password}");
    println!("cargo:rustc-env=ROBOT_NAME={robot_name}");

    println!("cargo:rerun-if-env-changed=WIFI_SSID");
    println!("cargo:rerun-if-env-changed=WIFI_PASSWORD");
    println!("cargo:rerun-if-env-changed=ROBOT_NAME");
    println!("cargo:rerun-if-changed=.env");
}

fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
