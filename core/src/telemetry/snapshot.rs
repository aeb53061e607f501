// ## src/telemetry/snapshot.rs

//! Immutable telemetry snapshot of one engine.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::telemetry::counters::TelemetryCounters;
use crate::telemetry::timers::{Stage, StageTimes, TelemetryTimer};

/// Counters, throughput, stage timings and elapsed lifetime at capture time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub messages_sealed: u64,
    pub messages_opened: u64,
    pub tag_failures: u64,
    pub resets: u64,
    pub bytes_plaintext: u64,
    pub bytes_ciphertext: u64,
    pub bytes_aad: u64,
    pub bytes_mac_input: u64,
    pub throughput_plaintext_bytes_per_sec: f64,
    pub elapsed: Duration,
    pub stage_times: StageTimes,
}

impl TelemetrySnapshot {
    pub fn from(counters: &TelemetryCounters, timer: &TelemetryTimer) -> Self {
        let elapsed = timer.elapsed();
        let throughput = per_second(counters.bytes_plaintext, elapsed);

        Self {
            messages_sealed: counters.messages_sealed,
            messages_opened: counters.messages_opened,
            tag_failures: counters.tag_failures,
            resets: counters.resets,
            bytes_plaintext: counters.bytes_plaintext,
            bytes_ciphertext: counters.bytes_ciphertext,
            bytes_aad: counters.bytes_aad,
            bytes_mac_input: counters.bytes_mac_input,
            throughput_plaintext_bytes_per_sec: throughput,
            elapsed,
            stage_times: timer.stage_times().clone(),
        }
    }

    pub fn total_stage_time(&self) -> Duration {
        self.stage_times.total()
    }

    pub fn has_all_stages(&self, expected: &[Stage]) -> bool {
        self.stage_times.has_all(expected)
    }

    /// Internal invariants:
    /// - a stream cipher never changes length: `bytes_ciphertext == bytes_plaintext`
    /// - every authenticated byte went through the MAC: `bytes_mac_input >= bytes_ciphertext + bytes_aad`
    /// - stage time never exceeds the engine lifetime
    pub fn sanity_check(&self) -> bool {
        self.bytes_ciphertext == self.bytes_plaintext
            && self.bytes_mac_input >= self.bytes_ciphertext + self.bytes_aad
            && self.total_stage_time() <= self.elapsed
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

fn per_second(bytes: u64, over: Duration) -> f64 {
    match over.as_secs_f64() {
        secs if secs > 0.0 => bytes as f64 / secs,
        _ => 0.0,
    }
}
