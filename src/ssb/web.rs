//! Repo browser
//!
//! `git ssb web` hands off to an external web server program.

use super::{SsbError, WebServer};
use crate::core::config::{Settings, APPNAME_ENV};
use crate::util::log_cmd;
use std::process::Command;
use thiserror::Error;
use tracing::info;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 7718;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WebAddrError {
    #[error("invalid port '{0}'")]
    InvalidPort(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebOptions {
    pub host: String,
    pub port: u16,
    /// Serve read-only
    pub public: bool,
}

impl WebOptions {
    /// Build options from an optional `host`, `:port` or `host:port` argument.
    pub fn parse(addr: Option<&str>, public: bool) -> Result<Self, WebAddrError> {
        let (host, port) = match addr.map(str::trim) {
            None | Some("") => (None, None),
            Some(addr) => match addr.rsplit_once(':') {
                Some((host, port)) => (Some(host), Some(port)),
                None => (Some(addr), None),
            },
        };

        let port = match port {
            None | Some("") => DEFAULT_PORT,
            Some(p) => p
                .parse()
                .map_err(|_| WebAddrError::InvalidPort(p.to_string()))?,
        };
        let host = host
            .filter(|h| !h.is_empty())
            .unwrap_or(DEFAULT_HOST)
            .to_string();

        Ok(Self { host, port, public })
    }
}

/// Web server run as a child process with inherited stdio.
#[derive(Debug, Clone)]
pub struct WebProcess {
    program: String,
    appname: String,
}

impl WebProcess {
    pub fn new(settings: &Settings) -> Self {
        Self {
            program: settings.web.clone(),
            appname: settings.appname.clone(),
        }
    }
}

impl WebServer for WebProcess {
    fn serve(&self, options: &WebOptions) -> Result<(), SsbError> {
        let path = which::which(&self.program)
            .map_err(|_| SsbError::NotInstalled(self.program.clone()))?;

        let mut cmd = Command::new(path);
        cmd.arg("--host")
            .arg(&options.host)
            .arg("--port")
            .arg(options.port.to_string())
            .env(APPNAME_ENV, &self.appname);
        if options.public {
            cmd.arg("--public");
        }
        log_cmd(&cmd);

        info!(host = %options.host, port = options.port, "starting web server");
        let status = cmd.status().map_err(|source| SsbError::Spawn {
            program: self.program.clone(),
            source,
        })?;
        if !status.success() {
            return Err(SsbError::Failed {
                program: self.program.clone(),
                message: status.to_string(),
            });
        }
        Ok(())
    }
}
