use std::fmt;
use std::net::SocketAddr;
use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use serde::Deserialize;

/// Which transport the binary serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Http,
    Tcp,
    Stdio,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Http => "http",
            Mode::Tcp => "tcp",
            Mode::Stdio => "stdio",
        })
    }
}

impl FromStr for Mode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "http" => Ok(Mode::Http),
            "tcp" => Ok(Mode::Tcp),
            "stdio" => Ok(Mode::Stdio),
            other => Err(anyhow::anyhow!(
                "invalid mode: {other}. Must be 'http', 'tcp' or 'stdio'"
            )),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub mode: Mode,
    pub host: String,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::Http,
            host: "0.0.0.0".into(),
            port: 8080,
        }
    }
}

impl Config {
    /// Environment variables only: MODE, HOST, PORT. Unparseable values fall
    /// back to the defaults.
    pub fn from_env() -> Self {
        Self::default().overlaid_from_env()
    }

    /// Optional TOML file (pointed at by CONFIG_FILE) overlaid by the
    /// environment.
    pub fn load() -> anyhow::Result<Self> {
        let base = match std::env::var("CONFIG_FILE") {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };
        Ok(base.overlaid_from_env())
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config file {}", path.display()))
    }

    fn overlaid_from_env(mut self) -> Self {
        if let Some(mode) = std::env::var("MODE").ok().and_then(|s| s.parse().ok()) {
            self.mode = mode;
        }
        if let Ok(host) = std::env::var("HOST") {
            if !host.is_empty() {
                self.host = host;
            }
        }
        if let Some(port) = std::env::var("PORT").ok().and_then(|s| s.parse().ok()) {
            self.port = port;
        }
        self
    }

    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    fn clear_env() {
        env::remove_var("MODE");
        env::remove_var("HOST");
        env::remove_var("PORT");
        env::remove_var("CONFIG_FILE");
    }

    #[test]
    #[serial]
    fn defaults_to_http_on_8080() {
        clear_env();
        let cfg = Config::from_env();
        assert_eq!(cfg.mode, Mode::Http);
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 8080);
    }

    #[test]
    #[serial]
    fn parses_env_overrides() {
        env::set_var("MODE", "tcp");
        env::set_var("HOST", "127.0.0.1");
        env::set_var("PORT", "8888");
        let cfg = Config::from_env();
        assert_eq!(cfg.mode, Mode::Tcp);
        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(cfg.port, 8888);
        clear_env();
    }

    #[test]
    #[serial]
    fn invalid_env_values_fall_back() {
        env::set_var("MODE", "carrier-pigeon");
        env::set_var("PORT", "not-a-port");
        let cfg = Config::from_env();
        assert_eq!(cfg.mode, Mode::Http);
        assert_eq!(cfg.port, 8080);
        clear_env();
    }

    #[test]
    #[serial]
    fn loads_toml_file_with_env_overlay() {
        let path = env::temp_dir().join("jsonrpc-dispatch-config-test.toml");
        std::fs::write(&path, "mode = \"stdio\"\nport = 9000\n").unwrap();

        env::set_var("CONFIG_FILE", &path);
        env::set_var("PORT", "9001");
        let cfg = Config::load().unwrap();
        assert_eq!(cfg.mode, Mode::Stdio);
        assert_eq!(cfg.port, 9001);

        clear_env();
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn mode_round_trips_through_strings() {
        for mode in [Mode::Http, Mode::Tcp, Mode::Stdio] {
            assert_eq!(mode.to_string().parse::<Mode>().unwrap(), mode);
        }
        assert!("smoke-signals".parse::<Mode>().is_err());
    }

    #[test]
    fn bind_addr_rejects_non_ip_hosts() {
        let cfg = Config {
            host: "not an ip".into(),
            ..Config::default()
        };
        assert!(cfg.bind_addr().is_err());
        assert!(Config::default().bind_addr().is_ok());
    }
}
