//! Game tunables
//!
//! Defaults come from the constants in [`crate::types`]. [`GameConfig::from_env`]
//! overrides them from `FALLTER_*` environment variables; missing or
//! unparsable values fall back to the default.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{
    CLEAR_SETTLE_MS, COUNTDOWN_FROM, COUNTDOWN_GO_MS, COUNTDOWN_STEP_MS, MAX_QUEUE_LEN,
    QUEUE_LEN, TICK_MS,
};

/// Largest countdown start with an overlay pattern
pub const MAX_COUNTDOWN_FROM: u8 = 3;

/// Upper bound for any single interval, one minute
pub const MAX_INTERVAL_MS: u32 = 60_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Automatic descent interval
    pub tick_ms: u32,
    /// Delay between a word clear and gravity + next spawn
    pub settle_ms: u32,
    /// First countdown number; 0 skips the countdown
    pub countdown_from: u8,
    pub countdown_step_ms: u32,
    /// How long "GO" is shown
    pub countdown_go_ms: u32,
    /// Upcoming letters shown to the player
    pub queue_len: usize,
    pub seed: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_ms: TICK_MS,
            settle_ms: CLEAR_SETTLE_MS,
            countdown_from: COUNTDOWN_FROM,
            countdown_step_ms: COUNTDOWN_STEP_MS,
            countdown_go_ms: COUNTDOWN_GO_MS,
            queue_len: QUEUE_LEN,
            seed: 1,
        }
    }
}

impl GameConfig {
    /// Read overrides from the process environment.
    ///
    /// | Variable | Field |
    /// |----------|-------|
    /// | `FALLTER_TICK_MS` | `tick_ms` |
    /// | `FALLTER_SETTLE_MS` | `settle_ms` |
    /// | `FALLTER_COUNTDOWN` | `countdown_from` |
    /// | `FALLTER_QUEUE_LEN` | `queue_len` |
    /// | `FALLTER_SEED` | `seed` (clock-derived when unset) |
    pub fn from_env() -> Self {
        let mut config = Self::from_lookup(|key| std::env::var(key).ok());
        if std::env::var_os("FALLTER_SEED").is_none() {
            config.seed = clock_seed();
        }
        config
    }

    /// Same as [`GameConfig::from_env`] but reading from `lookup`, with the
    /// default seed kept when `FALLTER_SEED` is absent.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            tick_ms: parse_or(&lookup, "FALLTER_TICK_MS", defaults.tick_ms),
            settle_ms: parse_or(&lookup, "FALLTER_SETTLE_MS", defaults.settle_ms),
            countdown_from: parse_or(&lookup, "FALLTER_COUNTDOWN", defaults.countdown_from),
            queue_len: parse_or(&lookup, "FALLTER_QUEUE_LEN", defaults.queue_len),
            seed: parse_or(&lookup, "FALLTER_SEED", defaults.seed),
            ..defaults
        }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_tick_ms(mut self, tick_ms: u32) -> Self {
        self.tick_ms = tick_ms;
        self
    }

    pub fn with_settle_ms(mut self, settle_ms: u32) -> Self {
        self.settle_ms = settle_ms;
        self
    }

    /// 0 starts play as soon as the game starts
    pub fn with_countdown(mut self, countdown_from: u8) -> Self {
        self.countdown_from = countdown_from;
        self
    }

    pub fn with_queue_len(mut self, queue_len: usize) -> Self {
        self.queue_len = queue_len;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_ms == 0 || self.tick_ms > MAX_INTERVAL_MS {
            return Err(ConfigError::invalid(
                "tick_ms",
                format!("{} not in 1..={}", self.tick_ms, MAX_INTERVAL_MS),
            ));
        }
        if self.settle_ms > MAX_INTERVAL_MS {
            return Err(ConfigError::invalid(
                "settle_ms",
                format!("{} exceeds {}", self.settle_ms, MAX_INTERVAL_MS),
            ));
        }
        if self.countdown_from > MAX_COUNTDOWN_FROM {
            return Err(ConfigError::invalid(
                "countdown_from",
                format!("{} exceeds {}", self.countdown_from, MAX_COUNTDOWN_FROM),
            ));
        }
        if self.countdown_step_ms > MAX_INTERVAL_MS || self.countdown_go_ms > MAX_INTERVAL_MS {
            return Err(ConfigError::invalid(
                "countdown",
                format!("step and GO hold must not exceed {}ms", MAX_INTERVAL_MS),
            ));
        }
        if !(1..=MAX_QUEUE_LEN).contains(&self.queue_len) {
            return Err(ConfigError::invalid(
                "queue_len",
                format!("{} not in 1..={}", self.queue_len, MAX_QUEUE_LEN),
            ));
        }
        Ok(())
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                log::warn!("ignoring unparsable {}={:?}", key, raw);
                default
            }
        },
        None => default,
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
