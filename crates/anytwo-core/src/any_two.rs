//! Pairwise matching and any-two agreement statistics.
//!
//! # Algorithm Summary
//!
//! For one pair of evaluations `X`, `Y`:
//!
//! 1. For every breakdown `s` of the source side, collect every target
//!    breakdown `t` with `s.overlaps_with(t)` and expand each `(s, t)` into
//!    single-code points.
//! 2. A source breakdown with no overlap becomes one single point per code,
//!    recorded under its owner.
//! 3. Run the pass `X → Y` and `Y → X`, then merge both into one set of points
//!    deduplicated by unordered-pair equality.
//!
//! The overlap test only looks at the other breakdown's endpoints, so each
//! direction can discover single points the other one misses.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::evaluation::Evaluation;
use crate::point::{Classification, Point, expand_pair};
use crate::types::ObserverId;

/// Points found by one directional pass.
#[derive(Debug, Clone, Default)]
pub struct DirectionalMatches {
    /// Every point in discovery order, single points included.
    pub points: Vec<Point>,
    /// Single points of source breakdowns with no overlap.
    pub single_points: Vec<Point>,
}

/// Matches every breakdown of `source` against every breakdown of `target`.
pub fn match_direction(source: &Evaluation, target: &Evaluation) -> DirectionalMatches {
    let mut out = DirectionalMatches::default();

    for s in source.events() {
        let mut matches: Vec<Point> = target
            .events()
            .iter()
            .filter(|t| s.overlaps_with(t))
            .flat_map(|t| expand_pair(s, Some(t)))
            .collect();

        if matches.is_empty() {
            matches = expand_pair(s, None);
            out.single_points.extend(matches.iter().cloned());
        }

        out.points.extend(matches);
    }

    out
}

/// The any-two result for one pair of evaluations.
#[derive(Debug, Clone)]
pub struct AnyTwo {
    first: ObserverId,
    second: ObserverId,
    points: Vec<Point>,
    single_points: BTreeMap<ObserverId, Vec<Point>>,
}

impl AnyTwo {
    /// Computes the result for one pair.
    ///
    /// Both directional passes run in parallel and are merged forward then
    /// backward, so point order is deterministic.
    pub fn compute(first: &Evaluation, second: &Evaluation) -> Self {
        let (forward, backward) = rayon::join(
            || match_direction(first, second),
            || match_direction(second, first),
        );

        let mut result = Self {
            first: first.name().clone(),
            second: second.name().clone(),
            points: Vec::new(),
            single_points: BTreeMap::new(),
        };
        result.single_points.insert(result.first.clone(), Vec::new());
        result.single_points.insert(result.second.clone(), Vec::new());

        let mut seen: HashSet<Point> = HashSet::new();
        for pass in [forward, backward] {
            for point in pass.single_points {
                let owner = point.a().unit().owner().clone();
                result.single_points.entry(owner).or_default().push(point);
            }
            for point in pass.points {
                if seen.insert(point.clone()) {
                    result.points.push(point);
                }
            }
        }

        tracing::debug!(
            first = %result.first,
            second = %result.second,
            points = result.points.len(),
            agreements = result.agreements(),
            "computed pair"
        );

        result
    }

    /// The pair's observer identities, in input order.
    pub const fn pair(&self) -> (&ObserverId, &ObserverId) {
        (&self.first, &self.second)
    }

    /// `"A vs B"`.
    pub fn label(&self) -> String {
        format!("{} vs {}", self.first, self.second)
    }

    /// Deduplicated points over both directions.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Single points per owner. Both observers are always present.
    pub const fn single_points_by_owner(&self) -> &BTreeMap<ObserverId, Vec<Point>> {
        &self.single_points
    }

    /// Single points recorded for one owner.
    pub fn single_points_for(&self, owner: &ObserverId) -> &[Point] {
        self.single_points
            .get(owner)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Points classified as agreements, in discovery order.
    pub fn agreement_points(&self) -> impl Iterator<Item = &Point> {
        self.points
            .iter()
            .filter(|p| p.classification() == Classification::Agreement)
    }

    fn count(&self, classification: Classification) -> usize {
        self.points
            .iter()
            .filter(|p| p.classification() == classification)
            .count()
    }

    pub fn agreements(&self) -> usize {
        self.count(Classification::Agreement)
    }

    pub fn disagreements(&self) -> usize {
        self.count(Classification::Disagreement)
    }

    /// Single points in the deduplicated set.
    pub fn single_point_count(&self) -> usize {
        self.count(Classification::SinglePoint)
    }

    pub fn total(&self) -> usize {
        self.points.len()
    }

    /// Agreements over total points, or `None` when the pair has no points.
    #[allow(clippy::cast_precision_loss)]
    pub fn any_two_ratio(&self) -> Option<f64> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        Some(self.agreements() as f64 / total as f64)
    }

    /// Flattens the statistics for reporting and export.
    pub fn summary(&self) -> PairSummary {
        PairSummary {
            pair: [self.first.to_string(), self.second.to_string()],
            any_two_ratio: self.any_two_ratio(),
            agreements: self.agreements(),
            disagreements: self.disagreements(),
            single_points: self.single_point_count(),
            single_points_by_owner: self
                .single_points
                .iter()
                .map(|(owner, points)| (owner.to_string(), points.len()))
                .collect(),
            total: self.total(),
        }
    }
}

/// Statistics for one pair, ready for reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairSummary {
    pub pair: [String; 2],
    /// `None` when the pair produced no points.
    pub any_two_ratio: Option<f64>,
    pub agreements: usize,
    pub disagreements: usize,
    pub single_points: usize,
    pub single_points_by_owner: BTreeMap<String, usize>,
    pub total: usize,
}

impl PairSummary {
    /// `"A vs B"`.
    pub fn label(&self) -> String {
        format!("{} vs {}", self.pair[0], self.pair[1])
    }
}
