use std::env;
use std::fs;
use std::path::Path;

/// Keys read through `option_env!` in src/config.rs
const CONFIG_KEYS: [&str; 8] = [
    "API_BASE_URL_DEVELOPMENT",
    "API_BASE_URL_PRODUCTION",
    "ENVIRONMENT",
    "ENABLE_LOGGING",
    "SESSION_EXPIRED_REDIRECT_MS",
    "NOTICE_AUTO_CLOSE_MS",
    "TICKETS_PAGE_SIZE",
    "LOGIN_PATH",
];

fn main() {
    // Forward a local .env into compile-time env vars
    let env_file = Path::new(".env");

    if env_file.exists() {
        println!("cargo:rerun-if-changed=.env");

        if let Ok(contents) = fs::read_to_string(env_file) {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }

                if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim();
                    let value = value.trim().trim_matches('"');

                    if !CONFIG_KEYS.contains(&key) {
                        println!("cargo:warning=Unknown key {} in .env", key);
                        continue;
                    }
                    // Real environment wins over .env
                    if env::var(key).is_err() {
                        println!("cargo:rustc-env={}={}", key, value);
                    }
                }
            }
        }
    } else {
        println!("cargo:warning=No .env file found, using built-in defaults. Copy .env.example to .env to override.");
    }

    for key in CONFIG_KEYS {
        println!("cargo:rerun-if-env-changed={}", key);
    }
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.env.example");
}
