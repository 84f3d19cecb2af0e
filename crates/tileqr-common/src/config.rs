//! Resolved scheduler configuration: `NUM_THREADS`, `ALPHA`, `BETA`,
//! `USE_PRIORITY_MAIN_QUEUE` from spec §6, plus two knobs the expanded spec
//! adds (`abort_on_breakdown`, `output_path`).
//!
//! Precedence, lowest to highest: compiled-in defaults < `tileqr.toml` <
//! CLI flags. The CLI layer is responsible for that merge; this type only
//! knows how to validate itself and how to deserialize from TOML.

use crate::error::ConfigError;
use std::path::Path;

#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct TileConfig {
    pub num_threads: usize,
    pub alpha: u32,
    pub beta: u32,
    pub use_priority_main_queue: bool,
    pub abort_on_breakdown: bool,
    pub output_path: Option<String>,
}

impl Default for TileConfig {
    fn default() -> Self {
        Self {
            num_threads: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            alpha: 64,
            beta: 256,
            use_priority_main_queue: true,
            abort_on_breakdown: false,
            output_path: None,
        }
    }
}

impl TileConfig {
    /// `K = BETA / ALPHA`: column tiles per panel row (spec §3).
    pub fn k(&self) -> u32 {
        self.beta / self.alpha
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.alpha == 0 {
            return Err(ConfigError::NonPositiveAlpha(self.alpha));
        }
        if self.beta == 0 {
            return Err(ConfigError::NonPositiveBeta(self.beta));
        }
        if self.beta % self.alpha != 0 {
            return Err(ConfigError::BetaNotMultipleOfAlpha {
                alpha: self.alpha,
                beta: self.beta,
            });
        }
        if self.num_threads == 0 {
            return Err(ConfigError::ZeroThreads(self.num_threads));
        }
        Ok(())
    }

    /// Load from a TOML file, falling back to `Default` for absent fields.
    /// Requires the `serde` feature.
    #[cfg(feature = "serde")]
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        TileConfig::default().validate().unwrap();
    }

    #[test]
    fn rejects_beta_not_multiple_of_alpha() {
        let cfg = TileConfig {
            alpha: 3,
            beta: 10,
            ..TileConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::BetaNotMultipleOfAlpha { .. })
        ));
    }

    #[test]
    fn rejects_zero_alpha() {
        let cfg = TileConfig {
            alpha: 0,
            ..TileConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::NonPositiveAlpha(0))));
    }
}
