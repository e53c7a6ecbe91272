use crate::resolver::{DEFAULT_FORWARDED_FOR_HEADER, DEFAULT_REAL_IP_HEADER};
#[cfg(not(feature = "multi-thread"))]
use crate::unavailable::Unavailable;
use crate::uri_tools::EndpointTemplate;

use hyper::HeaderMap;
use serde::Deserialize;
use std::net::{IpAddr, Ipv6Addr, SocketAddr};
#[cfg(feature = "multi-thread")]
use std::num::NonZeroUsize;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "whereami.toml";
pub const PORT_VAR: &str = "PORT";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error(r#"{var} environment variable "{value}" is not a valid port number"#)]
    InvalidPortVar { var: &'static str, value: String },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "Config::default_host")]
    pub host: IpAddr,
    #[serde(default = "Config::default_port")]
    pub port: u16,
    #[serde(default)]
    pub threads: ConfigThreads,
    #[serde(default = "Config::default_log_level")]
    pub log_level: log::Level,
    #[serde(default = "Config::default_real_ip_header")]
    pub real_ip_header: String,
    #[serde(default = "Config::default_forwarded_for_header")]
    pub forwarded_for_header: String,
    #[serde(default)]
    pub provider: EndpointTemplate,
    #[serde(default = "Config::default_attribution")]
    pub attribution: String,
    #[serde(default, with = "http_serde::header_map")]
    pub response_headers: HeaderMap,
}

impl Config {
    /// Both IPv6 and IPv4 clients, the latter as IPv4-mapped addresses.
    fn default_host() -> IpAddr {
        IpAddr::V6(Ipv6Addr::UNSPECIFIED)
    }

    fn default_port() -> u16 {
        8080
    }

    fn default_log_level() -> log::Level {
        log::Level::Info
    }

    fn default_real_ip_header() -> String {
        DEFAULT_REAL_IP_HEADER.into()
    }

    fn default_forwarded_for_header() -> String {
        DEFAULT_FORWARDED_FOR_HEADER.into()
    }

    fn default_attribution() -> String {
        "Created by Quentin Laffont. https://qlaffont.com".into()
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Overrides the port with the value of the `PORT` environment variable.
    ///
    /// Unset and empty values keep the configured port.
    pub fn with_port_var(mut self, value: Option<&str>) -> Result<Self, ConfigError> {
        match value.map(str::trim) {
            None | Some("") => {}
            Some(value) => {
                self.port = value.parse().map_err(|_| ConfigError::InvalidPortVar {
                    var: PORT_VAR,
                    value: value.to_owned(),
                })?;
            }
        }
        Ok(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            threads: ConfigThreads::default(),
            log_level: Self::default_log_level(),
            real_ip_header: Self::default_real_ip_header(),
            forwarded_for_header: Self::default_forwarded_for_header(),
            provider: EndpointTemplate::default(),
            attribution: Self::default_attribution(),
            response_headers: HeaderMap::new(),
        }
    }
}

#[cfg(feature = "multi-thread")]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "ConfigThreadsDe")]
pub enum ConfigThreads {
    #[default]
    Cores,
    Custom(NonZeroUsize),
}

#[cfg(feature = "multi-thread")]
#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
enum ThreadsKeyword {
    Cores,
}

#[cfg(feature = "multi-thread")]
#[derive(Deserialize)]
#[serde(untagged)]
enum ConfigThreadsDe {
    Keyword(ThreadsKeyword),
    Number(NonZeroUsize),
}

#[cfg(feature = "multi-thread")]
impl From<ConfigThreadsDe> for ConfigThreads {
    fn from(value: ConfigThreadsDe) -> Self {
        match value {
            ConfigThreadsDe::Keyword(ThreadsKeyword::Cores) => Self::Cores,
            ConfigThreadsDe::Number(threads) => Self::Custom(threads),
        }
    }
}

#[cfg(not(feature = "multi-thread"))]
pub type ConfigThreads = Unavailable;

pub fn parse_config<P: AsRef<Path>>(path: P) -> anyhow::Result<Config> {
    let toml_string = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&toml_string)?;
    Ok(config)
}

/// Reads the config file, if any, and applies the `PORT` environment variable.
///
/// Without an explicit path [`DEFAULT_CONFIG_PATH`] is used when it exists.
pub fn load_config(path: Option<String>) -> anyhow::Result<Config> {
    let port_var = std::env::var(PORT_VAR).ok();
    load(path, Path::new(DEFAULT_CONFIG_PATH), port_var.as_deref())
}

fn load(
    path: Option<String>,
    default_path: &Path,
    port_var: Option<&str>,
) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => parse_config(path)?,
        None if default_path.exists() => parse_config(default_path)?,
        None => Config::default(),
    };
    Ok(config.with_port_var(port_var)?)
}
