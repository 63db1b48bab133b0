//! Demo configuration: alpha handling, lock options, and loop driver.
//!
//! Defaults come from the build (`alpha-opaque` feature). Hosts may override
//! them at runtime from the environment (native) or a JSON object (browser).

use crate::driver::LoopDriver;
use crate::error::DemoError;
use serde::Deserialize;
use std::str::FromStr;

// ─── Alpha mode ───────────────────────────────────────────────────────────

/// How the renderer fills the alpha channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlphaMode {
    /// Every pixel is written with alpha 255.
    Opaque,
    /// Alpha is `(i + j) % 255`; the presenting surface is expected to
    /// discard it, so the image must still look opaque.
    Test,
}

impl AlphaMode {
    /// The mode selected at build time.
    pub const fn from_build() -> Self {
        if cfg!(feature = "alpha-opaque") {
            Self::Opaque
        } else {
            Self::Test
        }
    }

    /// Alpha value for pixel row `i`, column `j`.
    pub const fn alpha_at(self, i: u32, j: u32) -> u8 {
        match self {
            Self::Opaque => 255,
            Self::Test => ((i + j) % 255) as u8,
        }
    }
}

impl Default for AlphaMode {
    fn default() -> Self {
        Self::from_build()
    }
}

impl FromStr for AlphaMode {
    type Err = DemoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "opaque" => Ok(Self::Opaque),
            "test" => Ok(Self::Test),
            other => Err(DemoError::InvalidConfig(format!(
                "unknown alpha mode '{other}' (expected 'opaque' or 'test')"
            ))),
        }
    }
}

// ─── Lock options ─────────────────────────────────────────────────────────

/// Behavior of a lockable surface whose front buffer lives outside process
/// memory (the browser canvas).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockOptions {
    /// Read the displayed pixels back into the buffer on lock.
    pub copy_on_lock: bool,
    /// Treat the buffer contents as undefined after lock (no read-back).
    pub discard_on_lock: bool,
    /// Present with per-pixel alpha ignored.
    pub opaque_front_buffer: bool,
}

impl Default for LockOptions {
    fn default() -> Self {
        Self {
            copy_on_lock: true,
            discard_on_lock: false,
            opaque_front_buffer: true,
        }
    }
}

impl LockOptions {
    /// Options matching an alpha mode. Opaque rendering overwrites every
    /// pixel with real alpha, so the read-back and the opaque front buffer
    /// are switched off.
    pub fn for_alpha(alpha: AlphaMode) -> Self {
        match alpha {
            AlphaMode::Opaque => Self {
                copy_on_lock: false,
                discard_on_lock: true,
                opaque_front_buffer: false,
            },
            AlphaMode::Test => Self::default(),
        }
    }

    /// Whether `lock` has to read the front buffer back.
    pub fn reads_back(&self) -> bool {
        self.copy_on_lock && !self.discard_on_lock
    }
}

// ─── Demo config ──────────────────────────────────────────────────────────

/// Full runtime configuration of a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub alpha: AlphaMode,
    pub driver: LoopDriver,
}

impl DemoConfig {
    /// Environment variable selecting the driver (`fixed` or `polling`).
    pub const DRIVER_VAR: &'static str = "KEYECHO_DRIVER";
    /// Environment variable selecting the alpha mode (`opaque` or `test`).
    pub const ALPHA_VAR: &'static str = "KEYECHO_ALPHA";

    /// Read overrides from the process environment.
    ///
    /// # Errors
    /// Returns `InvalidConfig` for unrecognized values.
    pub fn from_env() -> Result<Self, DemoError> {
        let driver = std::env::var(Self::DRIVER_VAR).ok();
        let alpha = std::env::var(Self::ALPHA_VAR).ok();
        Self::from_overrides(driver.as_deref(), alpha.as_deref())
    }

    /// Apply optional textual overrides on top of the defaults.
    pub fn from_overrides(driver: Option<&str>, alpha: Option<&str>) -> Result<Self, DemoError> {
        let mut config = Self::default();
        if let Some(driver) = driver {
            config.driver = driver.parse()?;
        }
        if let Some(alpha) = alpha {
            config.alpha = alpha.parse()?;
        }
        Ok(config)
    }

    pub fn lock_options(&self) -> LockOptions {
        LockOptions::for_alpha(self.alpha)
    }
}
