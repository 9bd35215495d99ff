//! User configuration: scroll timings, grid cell size, and persistence.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/gallery-scroll/config.toml` (default
//! `~/.config/gallery-scroll/config.toml`).

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::core::tracker::TrackerTimings;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: invalid value {value:?} for `{key}`")]
    Invalid {
        line: usize,
        key: String,
        value: String,
    },
    #[error("line {line}: unknown key `{key}`")]
    UnknownKey { line: usize, key: String },
}

// ───────────────────────────────────────── keys ──────────────

/// Every persisted setting, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Key {
    ScrollDuration,
    SettleDelay,
    AuditPeriod,
    AuditRelease,
    ResizeDebounce,
    CellWidth,
    CellHeight,
}

impl Key {
    const ALL: &[Key] = &[
        Key::ScrollDuration,
        Key::SettleDelay,
        Key::AuditPeriod,
        Key::AuditRelease,
        Key::ResizeDebounce,
        Key::CellWidth,
        Key::CellHeight,
    ];

    fn config_key(self) -> &'static str {
        match self {
            Key::ScrollDuration => "scroll_duration_ms",
            Key::SettleDelay => "settle_delay_ms",
            Key::AuditPeriod => "audit_period_ms",
            Key::AuditRelease => "audit_release_ms",
            Key::ResizeDebounce => "resize_debounce_ms",
            Key::CellWidth => "cell_width",
            Key::CellHeight => "cell_height",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.config_key() == s)
    }

    /// Accepted range; values outside it are clamped.
    fn range(self) -> (u64, u64) {
        match self {
            Key::ScrollDuration => (0, 2000),
            Key::SettleDelay | Key::AuditRelease => (50, 5000),
            Key::AuditPeriod => (50, 10_000),
            Key::ResizeDebounce => (0, 2000),
            Key::CellWidth => (8, 80),
            Key::CellHeight => (3, 20),
        }
    }
}

// ───────────────────────────────────────── config ────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub scroll_duration_ms: u64,
    pub settle_delay_ms: u64,
    pub audit_period_ms: u64,
    pub audit_release_ms: u64,
    pub resize_debounce_ms: u64,
    /// Grid cell width in terminal columns.
    pub cell_width: u16,
    /// Grid cell height in terminal rows.
    pub cell_height: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scroll_duration_ms: 200,
            settle_delay_ms: 300,
            audit_period_ms: 250,
            audit_release_ms: 200,
            resize_debounce_ms: 100,
            cell_width: 22,
            cell_height: 4,
        }
    }
}

impl AppConfig {
    /// Load config from disk, falling back to defaults.  Malformed lines are
    /// logged and skipped.
    pub fn load() -> Self {
        let path = config_path();
        let Ok(contents) = std::fs::read_to_string(&path) else {
            return Self::default();
        };
        let mut config = Self::default();
        for err in config.apply(&contents) {
            tracing::warn!("{}: {err}", path.display());
        }
        config
    }

    /// Strict load: the first malformed line is an error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::default();
        match config.apply(&contents).into_iter().next() {
            Some(err) => Err(err),
            None => Ok(config),
        }
    }

    /// Persist current config to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(path, self.serialise()).map_err(io_err)
    }

    /// Override the animation length, clamped like a file value.
    pub fn set_scroll_duration_ms(&mut self, ms: u64) {
        self.set(Key::ScrollDuration, ms);
    }

    /// Tracker delays described by this config.
    pub fn timings(&self) -> TrackerTimings {
        TrackerTimings {
            scroll_duration: Duration::from_millis(self.scroll_duration_ms),
            settle_delay: Duration::from_millis(self.settle_delay_ms),
            audit_period: Duration::from_millis(self.audit_period_ms),
            audit_release: Duration::from_millis(self.audit_release_ms),
            resize_debounce: Duration::from_millis(self.resize_debounce_ms),
        }
    }

    fn get(&self, key: Key) -> u64 {
        match key {
            Key::ScrollDuration => self.scroll_duration_ms,
            Key::SettleDelay => self.settle_delay_ms,
            Key::AuditPeriod => self.audit_period_ms,
            Key::AuditRelease => self.audit_release_ms,
            Key::ResizeDebounce => self.resize_debounce_ms,
            Key::CellWidth => u64::from(self.cell_width),
            Key::CellHeight => u64::from(self.cell_height),
        }
    }

    fn set(&mut self, key: Key, value: u64) {
        let (lo, hi) = key.range();
        let v = value.clamp(lo, hi);
        match key {
            Key::ScrollDuration => self.scroll_duration_ms = v,
            Key::SettleDelay => self.settle_delay_ms = v,
            Key::AuditPeriod => self.audit_period_ms = v,
            Key::AuditRelease => self.audit_release_ms = v,
            Key::ResizeDebounce => self.resize_debounce_ms = v,
            // Ranges keep these well inside u16.
            Key::CellWidth => self.cell_width = v as u16,
            Key::CellHeight => self.cell_height = v as u16,
        }
    }

    /// Apply every `key = value` line of `s`, returning the lines that could
    /// not be applied.
    fn apply(&mut self, s: &str) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        for (n, line) in s.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            let Some(k) = Key::from_config_key(key) else {
                errors.push(ConfigError::UnknownKey {
                    line: n + 1,
                    key: key.to_string(),
                });
                continue;
            };
            match value.parse::<u64>() {
                Ok(v) => self.set(k, v),
                Err(_) => errors.push(ConfigError::Invalid {
                    line: n + 1,
                    key: key.to_string(),
                    value: value.to_string(),
                }),
            }
        }
        errors
    }

    fn serialise(&self) -> String {
        let mut lines = vec![
            "# gallery-scroll configuration".to_string(),
            String::new(),
            "# Timings are in milliseconds; cell sizes in terminal cells.".to_string(),
            String::new(),
        ];
        for &key in Key::ALL {
            lines.push(format!("{} = {}", key.config_key(), self.get(key)));
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/gallery-scroll/config.toml`).
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("gallery-scroll").join("config.toml")
}
