//! Console formatting of pair summaries.

use std::fmt::Write;

use anytwo_core::PairSummary;

/// Formats a ratio as a percentage with one decimal, or `n/a`.
pub fn format_ratio(ratio: Option<f64>) -> String {
    ratio.map_or_else(|| "n/a".to_string(), |r| format!("{:.1}%", r * 100.0))
}

/// Formats one block per pair.
pub fn format_report(summaries: &[PairSummary]) -> String {
    let mut output = String::new();

    if summaries.is_empty() {
        output.push_str("No pairs to compare.\n");
        return output;
    }

    for (i, summary) in summaries.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        let _ = writeln!(output, "{}", summary.label());
        let _ = writeln!(
            output,
            "  any-two agreement: {}",
            format_ratio(summary.any_two_ratio)
        );
        let _ = writeln!(
            output,
            "  agreements: {}  disagreements: {}  single points: {}  total: {}",
            summary.agreements, summary.disagreements, summary.single_points, summary.total
        );

        let per_owner = summary
            .pair
            .iter()
            .map(|owner| {
                let count = summary
                    .single_points_by_owner
                    .get(owner)
                    .copied()
                    .unwrap_or(0);
                format!("{owner} {count}")
            })
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(output, "  unmatched by observer: {per_owner}");
    }

    output
}

/// Formats the summaries as pretty-printed JSON.
pub fn format_json(summaries: &[PairSummary]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(summaries)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use insta::assert_snapshot;

    fn summary(a: &str, b: &str, ratio: Option<f64>, counts: [usize; 4]) -> PairSummary {
        let [agreements, disagreements, single_a, single_b] = counts;
        PairSummary {
            pair: [a.to_string(), b.to_string()],
            any_two_ratio: ratio,
            agreements,
            disagreements,
            single_points: single_a + single_b,
            single_points_by_owner: BTreeMap::from([
                (a.to_string(), single_a),
                (b.to_string(), single_b),
            ]),
            total: agreements + disagreements + single_a + single_b,
        }
    }

    #[test]
    fn test_format_ratio() {
        assert_eq!(format_ratio(Some(1.0)), "100.0%");
        assert_eq!(format_ratio(Some(0.0)), "0.0%");
        assert_eq!(format_ratio(Some(2.0 / 3.0)), "66.7%");
        assert_eq!(format_ratio(None), "n/a");
    }

    #[test]
    fn test_format_report_empty() {
        assert_snapshot!(format_report(&[]), @"No pairs to compare.");
    }

    #[test]
    fn test_format_report_pairs() {
        let summaries = vec![
            summary("alice", "bob", Some(0.5), [2, 1, 1, 0]),
            summary("alice", "carol", None, [0, 0, 0, 0]),
        ];
        assert_snapshot!(format_report(&summaries), @r"
        alice vs bob
          any-two agreement: 50.0%
          agreements: 2  disagreements: 1  single points: 1  total: 4
          unmatched by observer: alice 1, bob 0

        alice vs carol
          any-two agreement: n/a
          agreements: 0  disagreements: 0  single points: 0  total: 0
          unmatched by observer: alice 0, carol 0
        ");
    }

    #[test]
    fn test_format_json_uses_null_for_missing_ratio() {
        let json = format_json(&[summary("a", "b", None, [0, 0, 0, 0])]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value[0]["any_two_ratio"].is_null());
        assert_eq!(value[0]["pair"][1], "b");
    }
}
