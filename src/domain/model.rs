use crate::utils::error::{FetchError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use url::Url;

pub const DEFAULT_PORT: u16 = 80;

/// The (host, path, port) triple a fetcher targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    host: String,
    path: String,
    port: u16,
}

impl Locator {
    pub fn new(host: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            path: path.into(),
            port: DEFAULT_PORT,
        }
    }

    /// Builds a locator from an `http://` URL. Query and fragment are dropped.
    pub fn parse(url_str: &str) -> Result<Self> {
        let url = Url::parse(url_str)?;
        let host = url
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| FetchError::InvalidConfigValueError {
                field: "url".to_string(),
                value: url_str.to_string(),
                reason: "URL has no host".to_string(),
            })?;

        let path = match url.path() {
            "" => "/",
            p => p,
        };

        Ok(Self::new(host, path).with_port(url.port().unwrap_or(DEFAULT_PORT)))
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn set_port(&mut self, port: u16) {
        self.port = port;
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}{}", self.host, self.port, self.path)
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}{}", self.host, self.port, self.path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum FetcherKind {
    /// Hand-written HTTP/1.1 over a raw TCP socket.
    #[default]
    Socket,
    /// Managed HTTP connection.
    Connection,
}

impl fmt::Display for FetcherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetcherKind::Socket => f.write_str("socket"),
            FetcherKind::Connection => f.write_str("connection"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FetchReport {
    pub fetcher: FetcherKind,
    pub output_path: PathBuf,
    pub header_lines: Vec<String>,
    pub content_length: Option<u64>,
    pub body_lines: usize,
    pub body_bytes: u64,
}

impl FetchReport {
    pub fn new(fetcher: FetcherKind, output_path: PathBuf) -> Self {
        Self {
            fetcher,
            output_path,
            header_lines: Vec::new(),
            content_length: None,
            body_lines: 0,
            body_bytes: 0,
        }
    }

    pub(crate) fn record_body_line(&mut self, line: &[u8]) {
        self.body_lines += 1;
        self.body_bytes += line.len() as u64;
    }
}
