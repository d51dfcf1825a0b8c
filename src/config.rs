// SPDX-License-Identifier: MIT
//
// Runtime configuration for the n-palette binary.
//
// Each setting comes from the first source that has it:
//
//   command-line flag  →  environment variable  →  built-in default
//
// Flags and their environment fallbacks are read by clap; this module fills
// in the defaults, expands `~`, and picks the log filter.

use std::path::PathBuf;

use dirs_next::{data_dir, home_dir};

/// Directory of the persisted palette history.
pub const DATA_DIR_ENV: &str = "N_PALETTE_DATA_DIR";

/// Directory that exports are written into.
pub const EXPORT_DIR_ENV: &str = "N_PALETTE_EXPORT_DIR";

/// Log filter for this binary (`tracing_subscriber::EnvFilter` syntax).
pub const LOG_ENV: &str = "N_PALETTE_LOG";

/// Generic log filter, used when [`LOG_ENV`] is unset.
pub const FALLBACK_LOG_ENV: &str = "RUST_LOG";

/// Filter applied when neither log variable is set.
pub const DEFAULT_LOG_FILTER: &str = "warn";

const APP_DIR: &str = "n-palette";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root of the file blob store.
    pub data_dir: PathBuf,
    /// Where `export` writes files.
    pub out_dir: PathBuf,
    pub log_filter: String,
}

impl Config {
    /// Resolve the configuration from already-parsed flags.
    ///
    /// `lookup` reads environment variables; it is a parameter so resolution
    /// can be tested without touching the process environment.
    pub fn resolve<F>(data_dir: Option<PathBuf>, out_dir: Option<PathBuf>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = data_dir.map_or_else(default_data_dir, expand_tilde);
        let out_dir = out_dir.map_or_else(|| PathBuf::from("."), expand_tilde);
        let log_filter = [LOG_ENV, FALLBACK_LOG_ENV]
            .into_iter()
            .filter_map(&lookup)
            .find(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Self {
            data_dir,
            out_dir,
            log_filter,
        }
    }

    /// Resolve against the real process environment.
    pub fn from_env(data_dir: Option<PathBuf>, out_dir: Option<PathBuf>) -> Self {
        Self::resolve(data_dir, out_dir, |key| std::env::var(key).ok())
    }
}

fn default_data_dir() -> PathBuf {
    data_dir().map_or_else(|| PathBuf::from(".n-palette"), |dir| dir.join(APP_DIR))
}

/// Replace a leading `~` with the home directory.
///
/// Paths that do not start with `~` are returned unchanged, as is `~` itself
/// when no home directory is known.
pub fn expand_tilde(path: PathBuf) -> PathBuf {
    let Some(text) = path.to_str() else {
        return path;
    };

    let rest = if text == "~" {
        ""
    } else if let Some(rest) = text.strip_prefix("~/").or_else(|| text.strip_prefix("~\\")) {
        rest
    } else {
        return path;
    };

    match home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn explicit_dirs_win() {
        let cfg = Config::resolve(Some("/tmp/data".into()), Some("/tmp/out".into()), env(&[]));
        assert_eq!(cfg.data_dir, PathBuf::from("/tmp/data"));
        assert_eq!(cfg.out_dir, PathBuf::from("/tmp/out"));
    }

    #[test]
    fn defaults() {
        let cfg = Config::resolve(None, None, env(&[]));
        assert!(cfg.data_dir.ends_with(APP_DIR) || cfg.data_dir == PathBuf::from(".n-palette"));
        assert_eq!(cfg.out_dir, PathBuf::from("."));
        assert_eq!(cfg.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn log_filter_precedence() {
        let both = env(&[(LOG_ENV, "debug"), (FALLBACK_LOG_ENV, "info")]);
        let cfg = Config::resolve(None, None, both);
        assert_eq!(cfg.log_filter, "debug");
        let cfg = Config::resolve(None, None, env(&[(FALLBACK_LOG_ENV, "info")]));
        assert_eq!(cfg.log_filter, "info");
        let cfg = Config::resolve(None, None, env(&[(LOG_ENV, "  "), (FALLBACK_LOG_ENV, "trace")]));
        assert_eq!(cfg.log_filter, "trace");
    }

    #[test]
    fn tilde_expansion() {
        let Some(home) = home_dir() else {
            return;
        };
        assert_eq!(expand_tilde("~".into()), home);
        assert_eq!(expand_tilde("~/palettes".into()), home.join("palettes"));
        assert_eq!(expand_tilde("/abs/~/x".into()), PathBuf::from("/abs/~/x"));
        assert_eq!(expand_tilde("~user/x".into()), PathBuf::from("~user/x"));
    }
}
