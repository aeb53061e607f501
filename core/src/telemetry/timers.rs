// ## src/telemetry/timers.rs

//! telemetry/timers.rs
//! Wall-clock accounting for the engine's stages.
//!
//! One slot per `Stage`; a slot stays `None` until that stage first runs, so
//! "ran in zero time" and "never ran" stay distinguishable.

use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// One-time MAC key generation (block counter 0).
    Derive,
    /// Copying caller bytes into the message buffer.
    Buffer,
    /// Keystream over plaintext.
    Encrypt,
    /// Keystream over verified ciphertext.
    Decrypt,
    /// Tag computation on the seal path.
    Authenticate,
    /// Tag computation + comparison on the open path.
    Verify,
}

impl Stage {
    pub const ALL: [Stage; 6] = [
        Stage::Derive,
        Stage::Buffer,
        Stage::Encrypt,
        Stage::Decrypt,
        Stage::Authenticate,
        Stage::Verify,
    ];

    fn slot(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Stage::Derive => "derive",
            Stage::Buffer => "buffer",
            Stage::Encrypt => "encrypt",
            Stage::Decrypt => "decrypt",
            Stage::Authenticate => "authenticate",
            Stage::Verify => "verify",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accumulated duration per stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StageTimes {
    slots: [Option<Duration>; 6],
}

impl StageTimes {
    pub fn add(&mut self, stage: Stage, dur: Duration) {
        let slot = &mut self.slots[stage.slot()];
        *slot = Some(slot.unwrap_or_default() + dur);
    }

    /// Zero for a stage that never ran.
    pub fn get(&self, stage: Stage) -> Duration {
        self.slots[stage.slot()].unwrap_or_default()
    }

    pub fn get_us(&self, stage: Stage) -> f64 {
        self.get(stage).as_secs_f64() * 1e6
    }

    pub fn get_ns(&self, stage: Stage) -> u128 {
        self.get(stage).as_nanos()
    }

    pub fn recorded(&self, stage: Stage) -> bool {
        self.slots[stage.slot()].is_some()
    }

    pub fn total(&self) -> Duration {
        self.slots.iter().flatten().sum()
    }

    pub fn has_all(&self, expected: &[Stage]) -> bool {
        expected.iter().all(|&s| self.recorded(s))
    }

    /// Recorded stages in pipeline order.
    pub fn iter(&self) -> impl Iterator<Item = (Stage, Duration)> + '_ {
        Stage::ALL
            .into_iter()
            .filter_map(move |s| self.slots[s.slot()].map(|d| (s, d)))
    }
}

/// Engine lifetime clock plus per-stage totals.
#[derive(Clone, Debug)]
pub struct TelemetryTimer {
    started: Instant,
    lifetime: Option<Duration>,
    stage_times: StageTimes,
}

impl TelemetryTimer {
    pub fn new() -> Self {
        Self { started: Instant::now(), lifetime: None, stage_times: StageTimes::default() }
    }

    /// Freeze `elapsed()` at the current instant. Later calls keep the first value.
    pub fn finish(&mut self) {
        if self.lifetime.is_none() {
            self.lifetime = Some(self.started.elapsed());
        }
    }

    pub fn add_stage_time(&mut self, stage: Stage, dur: Duration) {
        self.stage_times.add(stage, dur);
    }

    /// Run `f` and charge its wall time to `stage`.
    pub fn time<T>(&mut self, stage: Stage, f: impl FnOnce() -> T) -> T {
        let t = Instant::now();
        let out = f();
        self.stage_times.add(stage, t.elapsed());
        out
    }

    pub fn stage_times(&self) -> &StageTimes {
        &self.stage_times
    }

    pub fn elapsed(&self) -> Duration {
        self.lifetime.unwrap_or_else(|| self.started.elapsed())
    }
}

impl Default for TelemetryTimer {
    fn default() -> Self {
        Self::new()
    }
}
