//! `[serve]` section configuration.
//!
//! ```toml
//! [serve]
//! interface = "127.0.0.1"   # "0.0.0.0" to serve on the LAN
//! port = 5277               # First port tried; the next free one is used if taken
//! ```

use std::net::{IpAddr, Ipv4Addr};

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServeConfig {
    pub interface: IpAddr,
    pub port: u16,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            interface: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 5277,
        }
    }
}

impl ServeConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.port == 0 {
            diag.error_with_hint(
                FieldPath::new("serve.port"),
                "port 0 is not a fixed port",
                "pick a port such as 5277",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_lan_interface_and_port() {
        let config = test_parse_config("[serve]\ninterface = \"0.0.0.0\"\nport = 8080");
        assert!(config.serve.interface.is_unspecified());
        assert_eq!(config.serve.port, 8080);
    }

    #[test]
    fn test_defaults_to_localhost() {
        let serve = test_parse_config("").serve;
        assert!(serve.interface.is_loopback());
        assert_eq!(serve.port, 5277);
    }

    #[test]
    fn test_ipv6_loopback() {
        let config = test_parse_config("[serve]\ninterface = \"::1\"");
        assert!(matches!(config.serve.interface, IpAddr::V6(v6) if v6.is_loopback()));
    }

    #[test]
    fn test_port_zero_rejected() {
        let mut diag = ConfigDiagnostics::new();
        test_parse_config("[serve]\nport = 0").serve.validate(&mut diag);
        assert_eq!(diag.errors()[0].field.as_str(), "serve.port");
    }
}
