//! Points: atomic single-code comparisons between two observers.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;

use crate::breakdown::Breakdown;
use crate::code::Code;
use crate::time::Interval;

/// How a point compares its two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Both sides carry the same code.
    Agreement,
    /// Both sides exist but carry different codes.
    Disagreement,
    /// Nothing from the other observer overlapped.
    SinglePoint,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Agreement => "agreement",
            Self::Disagreement => "disagreement",
            Self::SinglePoint => "single_point",
        };
        f.write_str(s)
    }
}

/// One side of a point: a single-code breakdown and the breakdown it was split from.
#[derive(Debug, Clone, Serialize)]
pub struct Side {
    unit: Breakdown,
    source: Breakdown,
}

impl Side {
    fn new(code: Code, source: &Breakdown) -> Self {
        Self {
            unit: source.with_single_code(code),
            source: source.clone(),
        }
    }

    /// The single-code breakdown being compared.
    pub const fn unit(&self) -> &Breakdown {
        &self.unit
    }

    /// The original breakdown as coded by the observer.
    pub const fn source(&self) -> &Breakdown {
        &self.source
    }

    /// The one code this side compares.
    pub fn code(&self) -> Code {
        self.unit.codes()[0]
    }

    fn sort_key(&self) -> (&[Code], Interval) {
        (self.unit.codes(), self.unit.interval())
    }
}

/// A comparison unit.
///
/// Equality treats the sides as an unordered pair: `Point(a, b) == Point(b, a)`.
/// Both equality and hashing go through a canonical ordering of the sides,
/// so points land in real hash buckets.
#[derive(Debug, Clone, Serialize)]
pub struct Point {
    a: Side,
    b: Option<Side>,
}

impl Point {
    pub const fn a(&self) -> &Side {
        &self.a
    }

    pub const fn b(&self) -> Option<&Side> {
        self.b.as_ref()
    }

    pub fn classification(&self) -> Classification {
        match &self.b {
            None => Classification::SinglePoint,
            Some(b) if self.a.unit.codes() == b.unit.codes() => Classification::Agreement,
            Some(_) => Classification::Disagreement,
        }
    }

    /// Sides in canonical order: the lesser unit first, an absent side last.
    fn canonical(&self) -> (&Breakdown, Option<&Breakdown>) {
        match &self.b {
            None => (&self.a.unit, None),
            Some(b) if b.sort_key() < self.a.sort_key() => {
                (&b.unit, Some(&self.a.unit))
            }
            Some(b) => (&self.a.unit, Some(&b.unit)),
        }
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

/// Splits a breakdown pair into single-code points.
///
/// With no counterpart, yields one single point per code of `first`.
/// Otherwise yields one point per element of `first.codes × second.codes`,
/// in row-major order.
pub fn expand_pair(first: &Breakdown, second: Option<&Breakdown>) -> Vec<Point> {
    match second {
        None => first
            .codes()
            .iter()
            .map(|&code| Point {
                a: Side::new(code, first),
                b: None,
            })
            .collect(),
        Some(second) => first
            .codes()
            .iter()
            .flat_map(|&a_code| {
                second.codes().iter().map(move |&b_code| Point {
                    a: Side::new(a_code, first),
                    b: Some(Side::new(b_code, second)),
                })
            })
            .collect(),
    }
}
