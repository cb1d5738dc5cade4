use std::{env, path::PathBuf};

// Forward .env entries (API_URL, API_KEY_BASE64) into the build so desktop
// binaries carry their configuration.
fn main() {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let env_path = PathBuf::from(&manifest_dir).join(".env");

    println!("cargo:rerun-if-changed={}", env_path.display());

    if !env_path.exists() {
        eprintln!("Note: no .env file at {}", env_path.display());
        return;
    }

    let entries = dotenvy::from_path_iter(&env_path).expect("Failed to read .env file");
    for entry in entries {
        let (key, value) = entry.expect("Failed to parse .env entry");
        println!("cargo:rustc-env={}={}", key, value);
    }
}
