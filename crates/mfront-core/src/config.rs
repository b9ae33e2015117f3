//! Solver configuration that downstream crates can serialize/deserialize.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Countdown fault window for the allocator (test/diagnostic builds).
///
/// A counter starts at `start` and is decremented on every allocation
/// request; requests that leave it within `lo..=hi` are refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaultWindowConfig {
    pub start: i64,
    pub lo: i64,
    pub hi: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Width of one numeric matrix entry in bytes (8 for real `f64`, 16 for complex).
    pub entry_bytes: usize,

    /// Optional hard cap on live allocator bytes. `None` defers to the system allocator.
    pub mem_cap_bytes: Option<usize>,

    /// Deterministic fault injection; `None` in production.
    pub fault_window: Option<FaultWindowConfig>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            entry_bytes: std::mem::size_of::<f64>(),
            mem_cap_bytes: None,
            fault_window: None,
        }
    }
}

impl SolverConfig {
    /// Create a config from environment variables, falling back to defaults
    /// for unset ones. Set but malformed values are errors.
    ///
    /// Environment variables:
    /// - `MFRONT_ENTRY_BYTES`: bytes per numeric entry
    /// - `MFRONT_MEM_CAP_BYTES`: allocator byte cap
    /// - `MFRONT_FAULT_WINDOW`: `start,lo,hi` countdown window
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut cfg = Self::default();

        if let Some(s) = lookup("MFRONT_ENTRY_BYTES") {
            cfg.entry_bytes = parse_var("MFRONT_ENTRY_BYTES", &s)?;
        }

        if let Some(s) = lookup("MFRONT_MEM_CAP_BYTES") {
            cfg.mem_cap_bytes = Some(parse_var("MFRONT_MEM_CAP_BYTES", &s)?);
        }

        if let Some(s) = lookup("MFRONT_FAULT_WINDOW") {
            cfg.fault_window = Some(parse_fault_window(&s).ok_or_else(|| {
                Error::Config(format!(
                    "MFRONT_FAULT_WINDOW must be 'start,lo,hi', got '{s}'"
                ))
            })?);
        }

        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(s: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.entry_bytes == 0 {
            return Err(Error::Config("entry_bytes must be positive".into()));
        }
        if let Some(w) = &self.fault_window {
            if w.lo > w.hi {
                return Err(Error::Config(format!(
                    "fault window lo ({}) exceeds hi ({})",
                    w.lo, w.hi
                )));
            }
        }
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, s: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    s.trim()
        .parse()
        .map_err(|e| Error::Config(format!("{key}='{s}': {e}")))
}

fn parse_fault_window(s: &str) -> Option<FaultWindowConfig> {
    let mut parts = s.split(',').map(|p| p.trim().parse::<i64>());
    let start = parts.next()?.ok()?;
    let lo = parts.next()?.ok()?;
    let hi = parts.next()?.ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(FaultWindowConfig { start, lo, hi })
}
