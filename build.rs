use std::env;
use std::fs;
use std::path::Path;

// Forwards KEY=VALUE pairs from `.env` as compile-time env vars so that
// `option_env!` in config.rs and utils/constants.rs can see them.
fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.env");

    let env_file = Path::new(".env");
    let Ok(contents) = fs::read_to_string(env_file) else {
        println!("cargo:warning=No .env file found, using built-in portal defaults.");
        return;
    };

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            // Real environment wins over .env
            if env::var(key).is_err() {
                println!("cargo:rustc-env={}={}", key, value);
            }
        }
    }
}
