//! Télérama listings client

use std::time::Duration;

use chrono::NaiveDate;
use log::debug;

use crate::error::{GrabError, Result};
use crate::feed::decode_windows_1252;
use crate::guide::channel_id::to_native_id;

const BASE_URL: &str = "http://guidetv-iphone.telerama.fr/verytv/procedures/";
/// The server only answers clients that look like the iPhone application
pub const DEFAULT_USER_AGENT: &str = "Telerama/1.2 CFNetwork/459 Darwin/10.0.0d3";

/// Source of raw feed bodies, already decoded to UTF-8
pub trait ListingSource {
    /// Program records of one channel (XMLTV id) for one day
    fn fetch_programs(&self, channel_id: &str, date: NaiveDate) -> Result<String>;

    /// The channel list
    fn fetch_channels(&self) -> Result<String>;
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
    /// Overall request timeout in seconds
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 30,
            timeout_secs: 120,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// HTTP client for the listings server. Requests are made one at a time.
pub struct TeleramaClient {
    agent: ureq::Agent,
    base_url: String,
    user_agent: String,
}

impl TeleramaClient {
    pub fn new(config: &ClientConfig) -> Self {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .timeout_connect(Some(Duration::from_secs(config.connect_timeout_secs)))
            .max_idle_connections_per_host(1)
            .build()
            .new_agent();

        Self {
            agent,
            base_url: BASE_URL.to_string(),
            user_agent: config.user_agent.clone(),
        }
    }

    /// Point the client at another server (e.g. a local mirror)
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    fn programs_url(&self, channel_id: &str, date: NaiveDate) -> String {
        format!(
            "{}LitProgrammes1Chaine.php?date={}&chaine={}",
            self.base_url,
            date.format("%Y-%m-%d"),
            to_native_id(channel_id)
        )
    }

    fn channels_url(&self) -> String {
        format!("{}ListeChaines.php", self.base_url)
    }

    fn make_request(&self, url: &str) -> Result<String> {
        debug!("GET {}", url);

        let mut response = self
            .agent
            .get(url)
            .header("User-Agent", &self.user_agent)
            .call()
            .map_err(|e| GrabError::Http(format!("Request failed: {}", e)))?;

        if response.status() != 200 {
            return Err(GrabError::Http(format!("HTTP error: {}", response.status())));
        }

        let body = response
            .body_mut()
            .read_to_vec()
            .map_err(|e| GrabError::Http(format!("Read failed: {}", e)))?;

        Ok(decode_windows_1252(&body))
    }
}

impl ListingSource for TeleramaClient {
    fn fetch_programs(&self, channel_id: &str, date: NaiveDate) -> Result<String> {
        self.make_request(&self.programs_url(channel_id, date))
    }

    fn fetch_channels(&self) -> Result<String> {
        self.make_request(&self.channels_url())
    }
}
