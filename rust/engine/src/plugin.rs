//! Plugin registration data and initialization

use std::fmt;

use keti::ClientConfig;
use log::{error, info};

use crate::KetiHton;

/// License the plugin is distributed under
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum License {
    Proprietary,
    Gpl,
    Bsd,
}

/// How far along the plugin is
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Maturity {
    Unknown,
    Experimental,
    Alpha,
    Beta,
    Gamma,
    Stable,
}

/// Static description the host shows for an installed plugin
#[derive(Clone, Copy, Debug)]
pub struct PluginInfo {
    pub name: &'static str,
    pub author: &'static str,
    pub description: &'static str,
    pub license: License,
    pub maturity: Maturity,
    pub version: &'static str,
}

impl PluginInfo {
    /// Version packed as `0xMMmm`, the way the host expects it
    pub fn packed_version(&self) -> u32 {
        let mut parts = self.version.split('.').map(|p| p.parse::<u32>().unwrap_or(0));
        let major = parts.next().unwrap_or(0);
        let minor = parts.next().unwrap_or(0);
        (major << 8) | (minor & 0xff)
    }
}

pub const KETI_PLUGIN: PluginInfo = PluginInfo {
    name: "KETI",
    author: "Brian Aker, MySQL AB",
    description: "Storage engine that forwards rows to a remote store",
    license: License::Gpl,
    maturity: Maturity::Experimental,
    version: "0.1",
};

/// Generic error emitted when the plugin cannot start
#[derive(Debug, Default)]
pub struct InitError;

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to initialize {}", KETI_PLUGIN.name)
    }
}

impl std::error::Error for InitError {}

/// Set up logging and build the handlerton from the `KETI_*` environment.
///
/// # Errors
///
/// Error if the environment holds an unusable configuration
pub fn init() -> Result<KetiHton, InitError> {
    init_common();

    let config = ClientConfig::from_env().map_err(|e| {
        error!("error reading configuration: {e}");
        InitError
    })?;

    info!(
        "loaded storage engine {} {}, remote store at {}",
        KETI_PLUGIN.name, KETI_PLUGIN.version, config.endpoint
    );
    Ok(KetiHton::new(config))
}

/// Things every entry point wants done once
fn init_common() {
    // The server or a previous plugin may already have installed a logger
    let _ = env_logger::Builder::from_default_env()
        .format_timestamp_micros()
        .try_init();
}
