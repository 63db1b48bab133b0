//! Run-loop drivers.
//!
//! A driver only decides *when* `App::run_one_iteration` is called; every
//! driver produces the same output per iteration. Hosts without a blocking
//! loop (the browser) use [`LoopDriver::period`] to schedule their own timer.

use crate::app::App;
use crate::error::DemoError;
use crate::event::EventSource;
use crate::surface::Surface;
use serde::{Deserialize, Deserializer};
use std::io::Write;
use std::str::FromStr;
use std::time::{Duration, Instant};

const DEFAULT_HZ: u32 = 60;
const DEFAULT_DELAY_MS: u64 = 500;

fn default_hz() -> u32 {
    DEFAULT_HZ
}

fn default_delay_ms() -> u64 {
    DEFAULT_DELAY_MS
}

fn nonzero_hz<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    match u32::deserialize(deserializer)? {
        0 => Err(serde::de::Error::custom("hz must be at least 1")),
        hz => Ok(hz),
    }
}

/// Which loop calls the iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LoopDriver {
    /// Externally paced ticks at `hz`, one iteration per tick. A slow tick
    /// delays the following ones; no tick is skipped.
    FixedRate {
        #[serde(default = "default_hz", deserialize_with = "nonzero_hz")]
        hz: u32,
    },
    /// Plain loop sleeping `delay_ms` after every iteration.
    Polling {
        #[serde(default = "default_delay_ms")]
        delay_ms: u64,
    },
}

impl Default for LoopDriver {
    fn default() -> Self {
        Self::FixedRate { hz: DEFAULT_HZ }
    }
}

impl LoopDriver {
    /// Interval between two iterations. Parsed configs never carry `hz: 0`;
    /// a hand-built one is clamped to 1 Hz.
    pub fn period(&self) -> Duration {
        match *self {
            Self::FixedRate { hz } => Duration::from_secs(1) / hz.max(1),
            Self::Polling { delay_ms } => Duration::from_millis(delay_ms),
        }
    }
}

impl FromStr for LoopDriver {
    type Err = DemoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" | "fixed-rate" | "fixed_rate" => Ok(Self::FixedRate { hz: DEFAULT_HZ }),
            "polling" | "poll" => Ok(Self::Polling {
                delay_ms: DEFAULT_DELAY_MS,
            }),
            other => Err(DemoError::InvalidConfig(format!(
                "unknown driver '{other}' (expected 'fixed' or 'polling')"
            ))),
        }
    }
}

// ─── Ticker ───────────────────────────────────────────────────────────────

/// Computes how long to wait before the next iteration.
#[derive(Debug)]
pub struct Ticker {
    driver: LoopDriver,
    deadline: Instant,
}

impl Ticker {
    pub fn new(driver: LoopDriver, start: Instant) -> Self {
        Self {
            driver,
            deadline: start,
        }
    }

    /// Wait to apply after an iteration that finished at `now`.
    ///
    /// Fixed-rate deadlines advance by exactly one period from the previous
    /// deadline, so an overrun shortens the following waits instead of
    /// dropping ticks. Polling always waits the full delay.
    pub fn next_wait(&mut self, now: Instant) -> Duration {
        let period = self.driver.period();
        match self.driver {
            LoopDriver::FixedRate { .. } => {
                self.deadline += period;
                self.deadline.saturating_duration_since(now)
            }
            LoopDriver::Polling { .. } => period,
        }
    }
}

/// Run iterations until the app stops, sleeping between them with `sleep`.
/// Returns the number of iterations run.
pub fn run_blocking<S, E, W>(
    app: &mut App<S, E, W>,
    driver: LoopDriver,
    mut sleep: impl FnMut(Duration),
) -> Result<u64, DemoError>
where
    S: Surface,
    E: EventSource,
    W: Write,
{
    log::info!("running with {driver:?} (period {:?})", driver.period());
    let mut ticker = Ticker::new(driver, Instant::now());
    let mut iterations = 0;
    loop {
        iterations += 1;
        if !app.run_one_iteration()?.is_running() {
            break;
        }
        sleep(ticker.next_wait(Instant::now()));
    }
    log::info!("stopped after {iterations} iterations");
    Ok(iterations)
}
