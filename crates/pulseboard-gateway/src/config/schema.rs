use serde::Deserialize;
use pulseboard_core::error::{PulseError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub analytics: AnalyticsSection,
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(PulseError::UnsupportedVersion);
        }

        self.server.validate()?;
        self.analytics.validate()?;

        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            analytics: AnalyticsSection::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        if self.listen.parse::<std::net::SocketAddr>().is_err() {
            return Err(PulseError::BadRequest(format!(
                "server.listen must be a valid socket address, got {:?}",
                self.listen
            )));
        }
        if !(1024..=1_048_576).contains(&self.max_body_bytes) {
            return Err(PulseError::BadRequest(
                "server.max_body_bytes must be between 1024 and 1048576".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalyticsSection {
    /// How long a page view keeps a visitor in the real-time gauge.
    #[serde(default = "default_realtime_window_secs")]
    pub realtime_window_secs: u64,
}

impl Default for AnalyticsSection {
    fn default() -> Self {
        Self {
            realtime_window_secs: default_realtime_window_secs(),
        }
    }
}

impl AnalyticsSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=86_400).contains(&self.realtime_window_secs) {
            return Err(PulseError::BadRequest(
                "analytics.realtime_window_secs must be between 1 and 86400".into(),
            ));
        }
        Ok(())
    }

    pub fn realtime_window(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.realtime_window_secs)
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_max_body_bytes() -> usize {
    64 * 1024
}
fn default_realtime_window_secs() -> u64 {
    300
}
