//! Runtime settings
//!
//! Each setting comes from an environment variable, then `git config`, then
//! a built-in default.

use crate::git::GitCli;

/// Application name used when nothing overrides it.
pub const DEFAULT_APPNAME: &str = "ssb";
/// Peer server program when nothing overrides it.
pub const DEFAULT_SBOT: &str = "ssb-server";
/// Web server program when nothing overrides it.
pub const DEFAULT_WEB: &str = "git-ssb-web";

/// Environment variable that selects the local identity/config.
pub const APPNAME_ENV: &str = "ssb_appname";
pub const SBOT_ENV: &str = "GIT_SSB_SBOT";
pub const WEB_ENV: &str = "GIT_SSB_WEB";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Which local peer identity and config directory to use (`~/.<appname>`)
    pub appname: String,
    /// Program used to talk to the local peer server
    pub sbot: String,
    /// Program that serves the repo browser
    pub web: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            appname: DEFAULT_APPNAME.to_string(),
            sbot: DEFAULT_SBOT.to_string(),
            web: DEFAULT_WEB.to_string(),
        }
    }
}

impl Settings {
    /// Load settings from the process environment and the local git config.
    pub fn load(git: &GitCli) -> Self {
        Self {
            appname: pick(
                std::env::var(APPNAME_ENV).ok(),
                || git.config_get("ssb.appname"),
                DEFAULT_APPNAME,
            ),
            sbot: pick(
                std::env::var(SBOT_ENV).ok(),
                || git.config_get("ssb.sbot"),
                DEFAULT_SBOT,
            ),
            web: pick(
                std::env::var(WEB_ENV).ok(),
                || git.config_get("ssb.web"),
                DEFAULT_WEB,
            ),
        }
    }
}

/// Env value if set (even empty), else a non-empty git config value, else the default.
///
/// `git` is only called when the env value is unset.
fn pick(
    env: Option<String>,
    git: impl FnOnce() -> Option<String>,
    default: &str,
) -> String {
    env.or_else(|| git().filter(|v| !v.is_empty()))
        .unwrap_or_else(|| default.to_string())
}
