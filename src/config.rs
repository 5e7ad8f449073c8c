use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Serialize)]
pub struct Settings {
    /// Path to a Chromium-family `Bookmarks` file; `~` is expanded. When
    /// unset, the well-known profile locations are probed instead.
    pub bookmarks_path: Option<String>,
    /// EnvFilter directive for the diagnostic log, e.g. "randmark=debug".
    pub log_level: Option<String>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let blueprint_path = match std::env::var("CARGO_MANIFEST_DIR") {
            Ok(manifest_dir) => {
                let mut path = PathBuf::from(manifest_dir);
                path.push("randmark.toml");
                path
            }
            Err(_) => {
                // Fallback for release builds or when not using Cargo.
                // Assumes randmark.toml is in the current working directory.
                PathBuf::from("randmark.toml")
            }
        };

        let user_config_path = get_user_config_path();

        // If the user config doesn't exist, create it from the blueprint
        if !user_config_path.exists() {
            if let Ok(blueprint_content) = fs::read_to_string(&blueprint_path) {
                if let Some(parent) = user_config_path.parent() {
                    fs::create_dir_all(parent).expect("Could not create config directory");
                }
                fs::write(&user_config_path, blueprint_content)
                    .expect("Could not write user config file from blueprint");
            }
        }

        let s = Config::builder()
            // 1. Project defaults from the blueprint randmark.toml.
            .add_source(File::from(blueprint_path).required(false))
            // 2. The user's global config.
            .add_source(File::from(user_config_path).required(false))
            // 3. A local randmark.toml in the CWD as optional override.
            .add_source(File::with_name("randmark.toml").required(false))
            .build()?;

        s.try_deserialize()
    }

    /// The configured bookmarks file, tilde-expanded.
    pub fn bookmarks_file(&self) -> Option<PathBuf> {
        self.bookmarks_path
            .as_deref()
            .map(|p| PathBuf::from(shellexpand::tilde(p).into_owned()))
    }
}

pub fn get_user_config_path() -> PathBuf {
    let mut path = dirs::home_dir().expect("Failed to get home directory");
    path.push(".config");
    path.push("randmark");
    path.push("randmark.toml");
    path
}

/// Directory the diagnostic log file lands in, next to the config.
pub fn get_log_dir() -> PathBuf {
    let mut path = dirs::home_dir().expect("Failed to get home directory");
    path.push(".config");
    path.push("randmark");
    path
}
