//! Tape limit resolution: flags, then environment, then `bf.toml`, then defaults.
//!
//! The config file lives in the XDG config home (`~/.config/bf.toml` on all
//! platforms) unless `BF_CONFIG` names another path:
//!
//! ```toml
//! [tape]
//! small_cells = 100
//! max_cells = 30000
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use cross_xdg::BaseDirs;

use crate::error::ConfigError;
use crate::tape::TapeLimits;

pub const ENV_CONFIG: &str = "BF_CONFIG";
pub const ENV_SMALL_CELLS: &str = "BF_SMALL_CELLS";
pub const ENV_MAX_CELLS: &str = "BF_MAX_CELLS";

/// Partially specified tape limits from one configuration source.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LimitOverrides {
    pub small: Option<usize>,
    pub max: Option<usize>,
}

impl LimitOverrides {
    /// Fill unset values from `fallback`.
    pub fn or(self, fallback: LimitOverrides) -> LimitOverrides {
        LimitOverrides {
            small: self.small.or(fallback.small),
            max: self.max.or(fallback.max),
        }
    }

    /// Fill the rest with defaults and validate.
    pub fn into_limits(self) -> Result<TapeLimits, ConfigError> {
        let defaults = TapeLimits::default();
        TapeLimits::new(
            self.small.unwrap_or(defaults.small()),
            self.max.unwrap_or(defaults.max()),
        )
    }
}

/// Resolve the tape limits for a run. `flags` wins over everything else.
pub fn resolve_limits(flags: LimitOverrides) -> Result<TapeLimits, ConfigError> {
    let env = env_overrides(|key| std::env::var(key).ok());
    let file = file_overrides();
    let merged = flags.or(env).or(file);
    log::debug!("config: flags={flags:?} env={env:?} file={file:?}");
    merged.into_limits()
}

/// Limits read from `BF_SMALL_CELLS` / `BF_MAX_CELLS` through `lookup`.
pub fn env_overrides<F>(lookup: F) -> LimitOverrides
where
    F: Fn(&str) -> Option<String>,
{
    let read = |key: &str| {
        let raw = lookup(key)?;
        match raw.trim().parse::<usize>() {
            Ok(n) => Some(n),
            Err(_) => {
                log::warn!("ignoring {key}={raw:?}: not a cell count");
                None
            }
        }
    };
    LimitOverrides {
        small: read(ENV_SMALL_CELLS),
        max: read(ENV_MAX_CELLS),
    }
}

/// Location of `bf.toml`, if one can be determined.
pub fn config_path() -> Option<PathBuf> {
    if let Some(explicit) = std::env::var_os(ENV_CONFIG) {
        return Some(PathBuf::from(explicit));
    }

    // On Linux: resolves to /home/<user>/.config
    // On Windows: resolves to C:\Users\<user>\.config
    // On macOS: resolves to /Users/<user>/.config
    let base_dirs = BaseDirs::new().ok()?;
    let mut path = PathBuf::from(base_dirs.config_home());
    path.push("bf.toml");
    Some(path)
}

fn file_overrides() -> LimitOverrides {
    let Some(path) = config_path() else {
        return LimitOverrides::default();
    };
    match fs::read_to_string(&path) {
        Ok(content) => {
            log::debug!("config: reading {}", path.display());
            parse_tape_section(&content)
        }
        Err(_) => LimitOverrides::default(),
    }
}

/// Pick `small_cells` and `max_cells` out of the `[tape]` section.
///
/// Only the subset of TOML this file needs is understood: section headers,
/// `key = value` pairs, optional quotes and `#` comments.
pub fn parse_tape_section(content: &str) -> LimitOverrides {
    let mut in_tape = false;
    let mut map: HashMap<&str, &str> = HashMap::new();
    for line in content.lines() {
        let line = line.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with('[') && line.ends_with(']') {
            in_tape = line[1..line.len() - 1].trim() == "tape";
            continue;
        }
        if !in_tape {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            let value = value.trim();
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .unwrap_or(value);
            map.insert(key.trim(), value);
        }
    }

    let read = |key: &str| {
        let raw = map.get(key)?;
        match raw.replace('_', "").parse::<usize>() {
            Ok(n) => Some(n),
            Err(_) => {
                log::warn!("ignoring tape.{key} = {raw:?} in config: not a cell count");
                None
            }
        }
    };

    LimitOverrides {
        small: read("small_cells"),
        max: read("max_cells"),
    }
}
