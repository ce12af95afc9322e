//! Core data types for the ctreuse monitor
//!
//! All records here are immutable values created during parsing and never
//! mutated afterwards. The identity fields keep the kernel's textual form
//! verbatim; the text itself is the identity, so nothing is re-parsed into
//! binary addresses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt;

/// Identity-relevant, time-invariant portion of one tracked connection.
///
/// Two values that are equal field-for-field denote the same logical
/// connection slot, no matter how many times the kernel recreates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnParams {
    pub net_proto_name: String,
    pub net_proto_code: String,
    pub transport_name: String,
    pub transport_code: String,
    pub state: String,
    pub from_ip: String,
    pub to_ip: String,
    pub from_port: String,
    pub to_port: String,
    pub dest_ip: String,
    pub reply_ip: String,
    pub dest_port: String,
    pub reply_port: String,
}

impl ConnParams {
    /// Canonical serialization used for fingerprinting.
    ///
    /// Field order and the separator are fixed; changing either changes
    /// every fingerprint across a restart.
    #[must_use]
    pub fn canonical(&self) -> String {
        [
            self.net_proto_name.as_str(),
            self.net_proto_code.as_str(),
            self.transport_name.as_str(),
            self.transport_code.as_str(),
            self.state.as_str(),
            self.from_ip.as_str(),
            self.to_ip.as_str(),
            self.from_port.as_str(),
            self.to_port.as_str(),
            self.dest_ip.as_str(),
            self.reply_ip.as_str(),
            self.dest_port.as_str(),
            self.reply_port.as_str(),
        ]
        .join("|")
    }

    /// Digest of the canonical form.
    #[inline]
    #[must_use]
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::of(self)
    }
}

/// One parsed, retained row of the conntrack table: identity plus the
/// remaining seconds until the kernel would evict the entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnEntry {
    pub params: ConnParams,
    pub expiry: u64,
}

impl ConnEntry {
    #[inline]
    #[must_use]
    pub fn new(params: ConnParams, expiry: u64) -> Self {
        Self { params, expiry }
    }
}

/// SHA-256 of a connection's canonical identity, excluding expiry.
///
/// The stable key across snapshots: equal `ConnParams` always hash equal,
/// differing ones collide with negligible probability.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    #[must_use]
    pub fn of(params: &ConnParams) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(params.canonical().as_bytes());
        Self(hasher.finalize().into())
    }

    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", self)
    }
}

/// One generation's complete set of parsed entries, keyed by fingerprint.
///
/// Built fresh on every sampling pass; the differ retains exactly one prior
/// generation and discards it once superseded.
#[derive(Debug, Default, Clone)]
pub struct Snapshot {
    entries: HashMap<Fingerprint, ConnEntry>,
}

impl Snapshot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, returning the displaced one when the kernel listed
    /// the same tuple twice within one dump (last writer wins).
    pub fn insert(&mut self, fingerprint: Fingerprint, entry: ConnEntry) -> Option<ConnEntry> {
        self.entries.insert(fingerprint, entry)
    }

    #[inline]
    #[must_use]
    pub fn get(&self, fingerprint: &Fingerprint) -> Option<&ConnEntry> {
        self.entries.get(fingerprint)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Fingerprint, &ConnEntry)> {
        self.entries.iter()
    }
}

/// A detected reuse: the same connection identity whose tracking timer
/// increased between two samples.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReuseEvent {
    pub timestamp: DateTime<Utc>,
    pub from_ip: String,
    pub from_port: String,
    pub to_ip: String,
    pub to_port: String,
    pub dest_ip: String,
    pub dest_port: String,
    pub old_expiry: u64,
    pub new_expiry: u64,
}

impl ReuseEvent {
    #[must_use]
    pub fn new(
        timestamp: DateTime<Utc>,
        params: &ConnParams,
        old_expiry: u64,
        new_expiry: u64,
    ) -> Self {
        Self {
            timestamp,
            from_ip: params.from_ip.clone(),
            from_port: params.from_port.clone(),
            to_ip: params.to_ip.clone(),
            to_port: params.to_port.clone(),
            dest_ip: params.dest_ip.clone(),
            dest_port: params.dest_port.clone(),
            old_expiry,
            new_expiry,
        }
    }
}
