//! Application Configuration
//!
//! Configuration for the policy application layer.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Policy application configuration
#[derive(Debug, Clone)]
pub struct PolicyConfig {
    /// Directory holding `clients.json` and `domains.json`
    pub data_dir: PathBuf,
    /// HTTP listen port
    pub listen_port: u16,
    /// How often the background sweep prunes expired leases
    pub lease_sweep_interval: Duration,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("config"),
            listen_port: 8080,
            lease_sweep_interval: Duration::from_secs(30),
        }
    }
}

impl PolicyConfig {
    /// Build config from the environment, falling back to defaults.
    ///
    /// * `GATEWARDEN_DATA_DIR` - data directory
    /// * `GATEWARDEN_PORT` - listen port
    /// * `GATEWARDEN_LEASE_SWEEP_SECS` - sweep interval in seconds
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let data_dir = env::var("GATEWARDEN_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let listen_port = env::var("GATEWARDEN_PORT")
            .ok()
            .and_then(|port| port.parse().ok())
            .unwrap_or(defaults.listen_port);

        let lease_sweep_interval = env::var("GATEWARDEN_LEASE_SWEEP_SECS")
            .ok()
            .and_then(|secs| secs.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.lease_sweep_interval);

        Self {
            data_dir,
            listen_port,
            lease_sweep_interval,
        }
    }

    /// Path of the clients store
    pub fn clients_json(&self) -> PathBuf {
        self.data_dir.join("clients.json")
    }

    /// Path of the domain lists store
    pub fn domains_json(&self) -> PathBuf {
        self.data_dir.join("domains.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = PolicyConfig::default();
        assert_eq!(config.clients_json(), PathBuf::from("config/clients.json"));
        assert_eq!(config.domains_json(), PathBuf::from("config/domains.json"));
    }

    #[test]
    fn test_custom_data_dir() {
        let config = PolicyConfig {
            data_dir: PathBuf::from("/opt/gatewarden/data"),
            ..Default::default()
        };
        assert_eq!(
            config.clients_json(),
            PathBuf::from("/opt/gatewarden/data/clients.json")
        );
    }
}
