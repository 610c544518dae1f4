//! Booking reference identifiers.
//!
//! References look like `RT482913K7Q`: a short prefix, a six digit segment
//! derived from the clock, and three random uppercase alphanumerics.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Modulus for the six digit time segment.
const SEGMENT_MODULUS: u64 = 1_000_000;

/// Length of the random suffix.
const SUFFIX_LEN: usize = 3;

const SUFFIX_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Human-readable booking reference, assigned once when a booking is paid for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(String);

impl BookingId {
    /// Wraps an existing reference (e.g. one read back from storage).
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the reference as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for BookingId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Generates booking references.
///
/// The time segment is the last six digits of a millisecond counter that
/// never repeats within one generator: if two calls land in the same
/// millisecond the second one borrows the next millisecond. Uniqueness
/// across processes is not guaranteed; the random suffix only makes a clash
/// unlikely.
#[derive(Debug)]
pub struct BookingIdGenerator {
    prefix: String,
    last_millis: AtomicU64,
}

impl BookingIdGenerator {
    /// Creates a generator that prefixes every reference with `prefix`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            last_millis: AtomicU64::new(0),
        }
    }

    /// Returns the configured prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Produces a fresh reference for the given instant.
    pub fn generate(&self, now: DateTime<Utc>) -> BookingId {
        let millis = self.next_millis(now.timestamp_millis().max(0) as u64);
        let suffix = random_suffix();

        BookingId(format!(
            "{}{:06}{}",
            self.prefix,
            millis % SEGMENT_MODULUS,
            suffix
        ))
    }

    fn next_millis(&self, wall_millis: u64) -> u64 {
        let mut previous = self.last_millis.load(Ordering::Relaxed);
        loop {
            let candidate = wall_millis.max(previous + 1);
            match self.last_millis.compare_exchange_weak(
                previous,
                candidate,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return candidate,
                Err(actual) => previous = actual,
            }
        }
    }
}

fn random_suffix() -> String {
    let mut rng = rand::thread_rng();
    (0..SUFFIX_LEN)
        .map(|_| SUFFIX_ALPHABET[rng.gen_range(0..SUFFIX_ALPHABET.len())] as char)
        .collect()
}
