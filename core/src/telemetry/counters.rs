// ### `src/telemetry/counters.rs`

//! telemetry/counters.rs
//! Mutable counters collected by one engine instance.
//!
//! Summary: message outcomes and byte counts, converted into an immutable
//! TelemetrySnapshot on demand.
use bincode::{Decode, Encode};
use std::ops::AddAssign;

/// Deterministic counters collected across message cycles
#[derive(Default, Clone, Debug, Encode, Decode, PartialEq, Eq)]
pub struct TelemetryCounters {
    pub messages_sealed: u64,
    pub messages_opened: u64,
    pub tag_failures: u64,
    pub resets: u64,
    pub bytes_plaintext: u64,
    pub bytes_ciphertext: u64,
    pub bytes_aad: u64,
    pub bytes_mac_input: u64,
}

impl TelemetryCounters {
    /// Record one successful encrypt-and-authenticate finalize.
    ///
    /// - `pt_len`: plaintext bytes consumed
    /// - `aad_len`: unpadded associated data length
    /// - `mac_input_len`: padded MAC input length fed to the authenticator
    pub fn add_seal(&mut self, pt_len: usize, aad_len: usize, mac_input_len: usize) {
        self.messages_sealed += 1;
        self.bytes_plaintext += pt_len as u64;
        self.bytes_ciphertext += pt_len as u64;
        self.bytes_aad += aad_len as u64;
        self.bytes_mac_input += mac_input_len as u64;
    }

    /// Record one successful decrypt-and-verify finalize.
    pub fn add_open(&mut self, ct_len: usize, aad_len: usize, mac_input_len: usize) {
        self.messages_opened += 1;
        self.bytes_plaintext += ct_len as u64;
        self.bytes_ciphertext += ct_len as u64;
        self.bytes_aad += aad_len as u64;
        self.bytes_mac_input += mac_input_len as u64;
    }

    /// Record a failed tag comparison. Only the MAC input was processed.
    pub fn add_tag_failure(&mut self, mac_input_len: usize) {
        self.tag_failures += 1;
        self.bytes_mac_input += mac_input_len as u64;
    }

    pub fn add_reset(&mut self) {
        self.resets += 1;
    }

    /// Total finalized messages, either direction.
    pub fn messages_total(&self) -> u64 {
        self.messages_sealed + self.messages_opened
    }

    // Aggregate counters of independent engines (one per thread) without locks.
    pub fn merge(&mut self, other: &TelemetryCounters) {
        self.messages_sealed += other.messages_sealed;
        self.messages_opened += other.messages_opened;
        self.tag_failures += other.tag_failures;
        self.resets += other.resets;

        self.bytes_plaintext += other.bytes_plaintext;
        self.bytes_ciphertext += other.bytes_ciphertext;
        self.bytes_aad += other.bytes_aad;
        self.bytes_mac_input += other.bytes_mac_input;
    }
}

impl AddAssign for TelemetryCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}
