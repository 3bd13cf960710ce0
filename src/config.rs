use lazy_static::lazy_static;
use log::warn;
use parking_lot::RwLock;
use std::env;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Result, SdpError};
use crate::writer::{WriteOptions, DEFAULT_INNER_ORDER, DEFAULT_OUTER_ORDER};

lazy_static! {
    static ref CONFIG: RwLock<Config> = RwLock::new(Config::new());
}

/// Writer tag orders for tools that want them configurable.
///
/// The library entry points never read this; callers opt in through
/// [`write_options`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Session-level line order
    pub outer_order: Vec<char>,
    /// Media-level line order
    pub inner_order: Vec<char>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            outer_order: DEFAULT_OUTER_ORDER.to_vec(),
            inner_order: DEFAULT_INNER_ORDER.to_vec(),
        }
    }
}

impl Config {
    fn new() -> Self {
        let mut config = Config::default();

        // Try loading from environment variables first
        if let Ok(raw) = env::var("SDPIO_OUTER_ORDER") {
            config.apply("outer_order", &raw);
        }
        if let Ok(raw) = env::var("SDPIO_INNER_ORDER") {
            config.apply("inner_order", &raw);
        }

        // Then try loading from config file
        let config_paths = ["./sdpio.toml", "./config.toml"];
        for path in &config_paths {
            if let Ok(mut file) = File::open(path) {
                let mut content = String::new();
                if file.read_to_string(&mut content).is_ok() {
                    config.apply_file(&content);
                    break;
                }
            }
        }

        config
    }

    fn apply_file(&mut self, content: &str) {
        for line in content.lines() {
            let Some((key, raw)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            if key == "outer_order" || key == "inner_order" {
                let raw = raw.trim().trim_matches('"').trim_matches('\'');
                self.apply(key, raw);
            }
        }
    }

    fn apply(&mut self, key: &str, raw: &str) {
        match parse_order(raw) {
            Ok(order) if key == "outer_order" => self.outer_order = order,
            Ok(order) => self.inner_order = order,
            Err(e) => warn!("ignoring {}: {}", key, e),
        }
    }

    /// Re-reads the environment and config file
    pub fn reload() {
        let new_config = Config::new();
        *CONFIG.write() = new_config;
    }
}

/// Parses a tag order such as `"vosiuepcbtrza"` or `"i, c, b, a"`.
///
/// # Errors
///
/// Returns `SdpError::Config` if the order is empty or has characters other
/// than lowercase tags, commas and spaces.
pub fn parse_order(raw: &str) -> Result<Vec<char>> {
    let mut order = Vec::new();
    for c in raw.chars().filter(|c| *c != ',' && *c != ' ') {
        if !c.is_ascii_lowercase() {
            return Err(SdpError::Config(format!("invalid tag {:?} in {:?}", c, raw)));
        }
        order.push(c);
    }
    if order.is_empty() {
        return Err(SdpError::Config("empty tag order".to_string()));
    }
    Ok(order)
}

/// Returns the current configuration
pub fn get_config() -> Config {
    CONFIG.read().clone()
}

/// Returns the configured tag orders as writer options
pub fn write_options() -> WriteOptions {
    let config = CONFIG.read();
    WriteOptions {
        outer_order: Some(config.outer_order.clone()),
        inner_order: Some(config.inner_order.clone()),
    }
}

/// Creates a default config template file if it doesn't exist
pub fn create_default_config_template<P: AsRef<Path>>(path: P) -> Result<()> {
    if !path.as_ref().exists() {
        let template = r#"# sdpio configuration

# Session-level line order used when writing
outer_order = "vosiuepcbtrza"

# Media-level line order used when writing
inner_order = "icba"
"#;
        std::fs::write(path, template)?;
    }
    Ok(())
}
