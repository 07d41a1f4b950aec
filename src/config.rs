//! Configuration and CLI argument handling

use std::{path::PathBuf, time::Duration};
use clap::Parser;
use url::Url;

use crate::{channel::ReconnectPolicy, commands::Preset};

/// Background handling of the display, decided once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentationMode {
    Opaque,
    /// No background is painted, for capture overlays
    Transparent,
}

impl PresentationMode {
    /// Transparent if the query has `transparent=true` or `obs=true`
    pub fn from_query(url: &Url) -> Self {
        let enabled = url
            .query_pairs()
            .any(|(key, value)| (key == "transparent" || key == "obs") && value == "true");

        if enabled {
            PresentationMode::Transparent
        } else {
            PresentationMode::Opaque
        }
    }
}

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "countdown-ring")]
#[command(about = "Real-time countdown display for a remote timer")]
#[command(version = "1.0.0")]
pub struct Config {
    /// WebSocket endpoint of the timer peer
    #[arg(short, long, default_value = "ws://127.0.0.1:5000/timer")]
    pub url: String,

    /// Do not paint a background
    #[arg(long)]
    pub transparent: bool,

    /// Alias of --transparent for capture overlays
    #[arg(long)]
    pub obs: bool,

    /// Repaint rate in frames per second
    #[arg(long, default_value = "60", value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,

    /// First reconnect delay in milliseconds
    #[arg(long, default_value = "500")]
    pub reconnect_initial_ms: u64,

    /// Upper bound of the reconnect delay in milliseconds
    #[arg(long, default_value = "5000")]
    pub reconnect_max_ms: u64,

    /// Preset durations in minutes, selected with keys 1-9
    #[arg(
        long,
        value_delimiter = ',',
        default_values_t = [1u32, 3, 5, 10, 15, 30],
        value_parser = clap::value_parser!(u32).range(0..=99)
    )]
    pub presets: Vec<u32>,

    /// File receiving the log output
    #[arg(long, default_value = "countdown-ring.log")]
    pub log_file: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// The peer endpoint as a URL
    pub fn endpoint(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.url)
    }

    /// Flags win; otherwise the endpoint query decides
    pub fn presentation_mode(&self) -> PresentationMode {
        if self.transparent || self.obs {
            return PresentationMode::Transparent;
        }
        self.endpoint()
            .map(|url| PresentationMode::from_query(&url))
            .unwrap_or(PresentationMode::Opaque)
    }

    pub fn reconnect_policy(&self) -> ReconnectPolicy {
        ReconnectPolicy::new(
            Duration::from_millis(self.reconnect_initial_ms),
            Duration::from_millis(self.reconnect_max_ms),
        )
    }

    /// Presets in key order, at most nine
    pub fn presets(&self) -> Vec<Preset> {
        self.presets.iter().take(9).map(|m| Preset::minutes(*m)).collect()
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
