use crate::bail;
use crate::error::Error;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const FASTOPS_COMPILE_ENV: &str = "MINDEX_FASTOPS_COMPILE";
pub const FULL_TRACE_ENV: &str = "MINDEX_FULL_TRACE";

fn env_true(key: &str) -> Option<bool> {
    std::env::var(key).ok().map(|val| flag_value(&val))
}

fn flag_value(val: &str) -> bool {
    let trimmed = val.trim();
    !trimmed.is_empty() && !matches!(trimmed, "0" | "false" | "FALSE" | "False")
}

/// Runtime switches consulted when choosing a call-site kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Allow operator calls to use the specialised numeric call sites.
    pub fastops_compile: bool,
    /// Every call must go through the generic path so it can be traced.
    pub full_trace: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            fastops_compile: true,
            full_trace: false,
        }
    }
}

impl DispatchConfig {
    pub fn new(fastops_compile: bool, full_trace: bool) -> Self {
        Self {
            fastops_compile,
            full_trace,
        }
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            fastops_compile: env_true(FASTOPS_COMPILE_ENV).unwrap_or(defaults.fastops_compile),
            full_trace: env_true(FULL_TRACE_ENV).unwrap_or(defaults.full_trace),
        }
    }

    pub fn from_json(source: &str) -> Result<Self> {
        if source.trim().is_empty() {
            bail!("empty dispatch configuration");
        }
        serde_json::from_str(source).map_err(|err| Error::Config(err.to_string()))
    }

    pub fn fast_ops_active(&self) -> bool {
        self.fastops_compile && !self.full_trace
    }
}

/// Process-wide configuration, read from the environment on first use.
pub fn global() -> &'static DispatchConfig {
    static CONFIG: OnceLock<DispatchConfig> = OnceLock::new();
    CONFIG.get_or_init(DispatchConfig::from_env)
}
