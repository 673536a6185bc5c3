//! Configuration management
//!
//! The grabber keeps a flat channel list (`channel=<xmltv id>` per line) in a
//! per-user file. Everything else is given on the command line and gathered
//! into [`GrabberConfig`] once at startup.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDate};

use crate::error::{GrabError, Result};

pub const DEFAULT_DAYS: u32 = 1;
pub const DEFAULT_OFFSET: u32 = 0;
/// The feed does not go further than this many days ahead
pub const MAX_FETCH_DAYS: u32 = 11;

const CONFIG_DIR: &str = ".xmltv";
const CONFIG_FILE_NAME: &str = "tv_grab_fr_telerama.conf";
const CHANNEL_PREFIX: &str = "channel=";

/// Default configuration file, `~/.xmltv/tv_grab_fr_telerama.conf`
pub fn default_config_path() -> PathBuf {
    let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(CONFIG_DIR);
    path.push(CONFIG_FILE_NAME);
    path
}

/// Days to fetch, relative to today
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FetchWindow {
    pub days: u32,
    pub offset: u32,
}

impl Default for FetchWindow {
    fn default() -> Self {
        Self {
            days: DEFAULT_DAYS,
            offset: DEFAULT_OFFSET,
        }
    }
}

impl FetchWindow {
    /// Build a window, shortened so that `offset + days` stays within
    /// [`MAX_FETCH_DAYS`]. Zero or missing values fall back to the defaults.
    pub fn new(days: Option<u32>, offset: Option<u32>) -> Self {
        let offset = offset.filter(|o| *o > 0).unwrap_or(DEFAULT_OFFSET);
        let mut days = days.filter(|d| *d > 0).unwrap_or(DEFAULT_DAYS);
        if offset.saturating_add(days) > MAX_FETCH_DAYS {
            days = MAX_FETCH_DAYS.saturating_sub(offset);
        }
        Self { days, offset }
    }

    /// Dates covered by the window, starting at `today + offset`
    pub fn dates(&self, today: NaiveDate) -> Vec<NaiveDate> {
        (0..self.days)
            .map(|i| today + Duration::days(i64::from(self.offset) + i64::from(i)))
            .collect()
    }
}

/// Settings for one grabber invocation
#[derive(Debug, Clone)]
pub struct GrabberConfig {
    pub config_file: PathBuf,
    pub window: FetchWindow,
    /// None writes to standard output
    pub output: Option<PathBuf>,
}

impl Default for GrabberConfig {
    fn default() -> Self {
        Self {
            config_file: default_config_path(),
            window: FetchWindow::default(),
            output: None,
        }
    }
}

/// Read the configured channel ids
pub fn load_channels(path: &Path) -> Result<Vec<String>> {
    if !path.is_file() {
        return Err(GrabError::ConfigMissing(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .filter_map(|line| line.strip_prefix(CHANNEL_PREFIX))
        .map(str::to_string)
        .collect())
}

/// Write the channel list, creating the configuration directory if needed
pub fn save_channels(path: &Path, channels: &[String]) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }

    let mut content = String::new();
    for channel in channels {
        content.push_str(CHANNEL_PREFIX);
        content.push_str(channel);
        content.push('\n');
    }
    fs::write(path, content)?;
    Ok(())
}
