//! Breakdowns: one coded occurrence observed by one observer.

use std::hash::{Hash, Hasher};

use serde::Serialize;

use crate::code::{Code, join_codes};
use crate::time::Interval;
use crate::types::{CoreError, ObserverId};

/// One coded occurrence with its tolerance-widened interval.
///
/// Equality is structural over codes and interval; the owner is ignored so
/// that the same occurrence reached from either observer compares equal.
#[derive(Debug, Clone, Serialize)]
pub struct Breakdown {
    codes: Vec<Code>,
    interval: Interval,
    owner: ObserverId,
}

impl Breakdown {
    /// Creates a breakdown. `codes` must not be empty.
    pub fn new(codes: Vec<Code>, interval: Interval, owner: ObserverId) -> Result<Self, CoreError> {
        if codes.is_empty() {
            return Err(CoreError::EmptyCodes);
        }
        Ok(Self {
            codes,
            interval,
            owner,
        })
    }

    /// Codes in the order they were written.
    pub fn codes(&self) -> &[Code] {
        &self.codes
    }

    pub const fn interval(&self) -> Interval {
        self.interval
    }

    pub const fn owner(&self) -> &ObserverId {
        &self.owner
    }

    /// The codes in `/`-delimited sheet form.
    pub fn code_label(&self) -> String {
        join_codes(&self.codes)
    }

    /// Whether either endpoint of `other` falls inside this interval.
    ///
    /// Only `other`'s endpoints are tested, so `a.overlaps_with(b)` and
    /// `b.overlaps_with(a)` can disagree: an interval strictly inside this
    /// one is found, but this one strictly inside `other` is not.
    pub fn overlaps_with(&self, other: &Self) -> bool {
        self.interval.contains(other.interval.start()) || self.interval.contains(other.interval.end())
    }

    /// A single-code copy sharing this breakdown's interval and owner.
    pub fn with_single_code(&self, code: Code) -> Self {
        Self {
            codes: vec![code],
            interval: self.interval,
            owner: self.owner.clone(),
        }
    }

    /// One single-code copy per code, in order.
    pub fn split_codes(&self) -> impl Iterator<Item = Self> + '_ {
        self.codes.iter().map(|&code| self.with_single_code(code))
    }
}

impl PartialEq for Breakdown {
    fn eq(&self, other: &Self) -> bool {
        self.codes == other.codes && self.interval == other.interval
    }
}

impl Eq for Breakdown {}

impl Hash for Breakdown {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.codes.hash(state);
        self.interval.hash(state);
    }
}
