//! Configuration management

use crate::schedule::BlockSchedule;
use anyhow::Result;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,

    /// Shared site password; a successful login is traded for a token cookie.
    #[serde(default)]
    pub password: String,

    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// Directory holding the wasm client bundle, served under
    /// `/static/client`. Relative paths resolve against the working
    /// directory the server is started from.
    #[serde(default = "default_client_dir")]
    pub client_dir: PathBuf,

    /// When this file appears on disk the server removes it and shuts down.
    #[serde(default)]
    pub shutdown_file: Option<PathBuf>,

    /// Members allowed to post; synced into the store at startup.
    #[serde(default)]
    pub users: Vec<UserSeed>,
}

fn default_port() -> u16 {
    8080
}

fn default_client_dir() -> PathBuf {
    PathBuf::from("static/client")
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserSeed {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default = "default_frequency_hours")]
    pub frequency_hours: i64,
    #[serde(default = "default_release_offset_hours")]
    pub release_offset_hours: i64,
}

fn default_frequency_hours() -> i64 {
    24
}

fn default_release_offset_hours() -> i64 {
    8
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            frequency_hours: default_frequency_hours(),
            release_offset_hours: default_release_offset_hours(),
        }
    }
}

impl ScheduleConfig {
    pub fn to_schedule(&self) -> BlockSchedule {
        BlockSchedule::from_hours(self.frequency_hours, self.release_offset_hours)
    }
}

/// Get config directory (WALL_CONFIG_DIR or platform default)
pub fn get_config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("WALL_CONFIG_DIR") {
        return PathBuf::from(dir);
    }

    #[cfg(target_os = "macos")]
    {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join("Library/Application Support/the-wall");
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("the-wall");
        }
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(".config/the-wall");
        }
    }

    // Fallback to current directory
    PathBuf::from(".")
}

/// Get data directory (WALL_DATA_DIR or platform default)
pub fn get_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("WALL_DATA_DIR") {
        return PathBuf::from(dir);
    }

    #[cfg(target_os = "macos")]
    {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join("Library/Application Support/the-wall");
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
            return PathBuf::from(xdg).join("the-wall");
        }
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(".local/share/the-wall");
        }
    }

    // Fallback to ./data
    PathBuf::from("./data")
}

pub fn load_config() -> Result<Config> {
    let config_dir = get_config_dir();

    let mut builder = ::config::Config::builder()
        // Start with defaults
        .set_default("port", 8080)?
        // Load from config file if it exists
        .add_source(
            ::config::File::with_name(&config_dir.join("config").to_string_lossy()).required(false),
        )
        // Override with environment variables (WALL_PORT, WALL_SCHEDULE__FREQUENCY_HOURS, etc.)
        .add_source(
            ::config::Environment::with_prefix("WALL")
                .separator("__")
                .try_parsing(true),
        );

    // Support PORT env vars with explicit precedence: WALL_PORT > PORT > config > default
    if let Ok(port) = std::env::var("WALL_PORT") {
        if let Ok(port_num) = port.parse::<u16>() {
            builder = builder.set_override("port", port_num as i64)?;
        }
    } else if let Ok(port) = std::env::var("PORT") {
        // Legacy PORT fallback (Docker, process supervisors)
        if let Ok(port_num) = port.parse::<u16>() {
            builder = builder.set_override("port", port_num as i64)?;
        }
    }

    let config: Config = builder.build()?.try_deserialize()?;

    anyhow::ensure!(
        config.schedule.frequency_hours > 0,
        "schedule.frequency_hours must be positive (got {})",
        config.schedule.frequency_hours
    );
    anyhow::ensure!(
        config.schedule.release_offset_hours >= 0,
        "schedule.release_offset_hours must not be negative (got {})",
        config.schedule.release_offset_hours
    );

    Ok(config)
}
