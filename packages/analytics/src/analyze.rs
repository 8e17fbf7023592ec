//! Radius filtering and severity aggregation.

use pothole_map_analytics_models::{AreaReport, AverageSeverity, SeverityCount};
use pothole_map_pothole_models::{GeoPoint, PotholeRecord, PotholeSeverity};
use pothole_map_spatial::distance;

/// Scores a raw severity label: `low`=1, `medium`=2, `high`=3 (any case),
/// anything else 0.
#[must_use]
pub fn severity_score(label: &str) -> u8 {
    PotholeSeverity::from_label(label).score()
}

/// Mean severity score of `records`, rounded to two decimals.
///
/// Unknown severities count as 0 and still contribute to the mean. An
/// empty slice yields [`AverageSeverity::NotApplicable`].
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn average_severity<'a>(records: impl IntoIterator<Item = &'a PotholeRecord>) -> AverageSeverity {
    let (count, total) = records
        .into_iter()
        .fold((0u64, 0u64), |(count, total), record| {
            (count + 1, total + u64::from(record.severity_score()))
        });

    if count == 0 {
        return AverageSeverity::NotApplicable;
    }

    AverageSeverity::Score(round_to_hundredths(total as f64 / count as f64))
}

/// Rounds to two decimals the way `Number.prototype.toFixed(2)` does:
/// the exact binary value is rounded, with exact ties going up. A mean
/// such as 107/40 is stored just below 2.675 and so becomes 2.67.
#[allow(clippy::cast_precision_loss)]
fn round_to_hundredths(value: f64) -> f64 {
    // Sixty places is enough to print any f64 in the score range exactly.
    let exact = format!("{:.60}", value.abs());
    let Some((whole, fraction)) = exact.split_once('.') else {
        return value;
    };
    let Ok(whole) = whole.parse::<u64>() else {
        return value;
    };

    let mut digits = fraction.bytes().map(|b| u64::from(b.saturating_sub(b'0')));
    let tenths = digits.next().unwrap_or(0);
    let hundredths = digits.next().unwrap_or(0);
    let round_up = digits.next().unwrap_or(0) >= 5;

    let cents = whole * 100 + tenths * 10 + hundredths + u64::from(round_up);
    (cents as f64 / 100.0).copysign(value)
}

/// Builds an [`AreaReport`] for the potholes strictly closer than
/// `radius_km` to `center`.
///
/// A pothole exactly `radius_km` away is excluded. A non-positive or NaN
/// radius matches nothing.
#[must_use]
pub fn analyze(center: GeoPoint, radius_km: f64, records: &[PotholeRecord]) -> AreaReport {
    let matched: Vec<&PotholeRecord> = records
        .iter()
        .filter(|record| distance(center, record.point) < radius_km)
        .collect();

    let by_severity = PotholeSeverity::all()
        .iter()
        .filter_map(|severity| {
            let count = matched.iter().filter(|r| r.severity == *severity).count() as u64;
            (count > 0).then_some(SeverityCount {
                severity: *severity,
                count,
            })
        })
        .collect();

    AreaReport {
        center,
        radius_km,
        matched_count: matched.len() as u64,
        average_severity: average_severity(matched.iter().copied()),
        by_severity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn record(lat: f64, lng: f64, severity: &str) -> PotholeRecord {
        let at = chrono::Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        PotholeRecord::new(GeoPoint::new(lat, lng), "pot.jpg", at, severity)
    }

    #[test]
    fn scores_labels_case_insensitively() {
        for label in ["LOW", "low", "Low"] {
            assert_eq!(severity_score(label), 1);
        }
        assert_eq!(severity_score("MEDIUM"), 2);
        assert_eq!(severity_score("high"), 3);
        assert_eq!(severity_score("unknown"), 0);
        assert_eq!(severity_score(""), 0);
        assert_eq!(severity_score("catastrophic"), 0);
    }

    #[test]
    fn includes_near_and_excludes_far() {
        let records = vec![record(0.0, 0.5, "high"), record(0.0, 5.0, "low")];
        let report = analyze(GeoPoint::new(0.0, 0.0), 100.0, &records);
        assert_eq!(report.matched_count, 1);
        assert_eq!(report.average_severity, AverageSeverity::Score(3.0));
        assert_eq!(report.average_severity.to_string(), "3.00");
        assert_eq!(
            report.by_severity,
            vec![SeverityCount {
                severity: PotholeSeverity::High,
                count: 1
            }]
        );
    }

    #[test]
    fn empty_records_are_not_applicable() {
        let report = analyze(GeoPoint::new(19.0, 72.0), 50.0, &[]);
        assert_eq!(report.matched_count, 0);
        assert_eq!(report.average_severity, AverageSeverity::NotApplicable);
        assert!(report.by_severity.is_empty());
    }

    #[test]
    fn nothing_in_range_is_not_applicable() {
        let records = vec![record(10.0, 10.0, "high")];
        let report = analyze(GeoPoint::new(0.0, 0.0), 1.0, &records);
        assert_eq!(report.matched_count, 0);
        assert_eq!(report.average_severity, AverageSeverity::NotApplicable);
    }

    #[test]
    fn boundary_is_excluded() {
        let center = GeoPoint::new(0.0, 0.0);
        let point = GeoPoint::new(0.0, 0.5);
        let exact = distance(center, point);
        let records = vec![record(0.0, 0.5, "high")];

        assert_eq!(analyze(center, exact, &records).matched_count, 0);
        assert_eq!(analyze(center, exact + 1e-9, &records).matched_count, 1);
    }

    #[test]
    fn unknown_severities_count_toward_average() {
        let records = vec![
            record(0.0, 0.0, "High"),
            record(0.0, 0.0, "bogus"),
            record(0.0, 0.0, ""),
        ];
        let report = analyze(GeoPoint::new(0.0, 0.0), 10.0, &records);
        assert_eq!(report.matched_count, 3);
        assert_eq!(report.average_severity, AverageSeverity::Score(1.0));
        assert_eq!(report.by_severity.len(), 2);
        assert_eq!(report.by_severity[0].severity, PotholeSeverity::Unknown);
        assert_eq!(report.by_severity[0].count, 2);
    }

    #[test]
    fn average_is_rounded_to_two_decimals() {
        let records = vec![
            record(0.0, 0.0, "low"),
            record(0.0, 0.0, "low"),
            record(0.0, 0.0, "medium"),
        ];
        // 4 / 3 = 1.333...
        assert_eq!(average_severity(&records), AverageSeverity::Score(1.33));

        let records = vec![
            record(0.0, 0.0, "high"),
            record(0.0, 0.0, "high"),
            record(0.0, 0.0, "medium"),
        ];
        // 8 / 3 = 2.666...
        assert_eq!(average_severity(&records), AverageSeverity::Score(2.67));
    }

    #[test]
    fn rounds_the_stored_mean_not_the_fraction() {
        // 35 high + 1 medium + 4 unscored = 107 / 40, stored as 2.67499...
        let mut records = vec![record(0.0, 0.0, "high"); 35];
        records.push(record(0.0, 0.0, "medium"));
        records.extend(vec![record(0.0, 0.0, ""); 4]);

        let report = analyze(GeoPoint::new(0.0, 0.0), 1.0, &records);
        assert_eq!(report.matched_count, 40);
        assert_eq!(report.average_severity, AverageSeverity::Score(2.67));
        assert_eq!(report.average_severity.to_string(), "2.67");
    }

    #[test]
    fn exact_ties_round_up() {
        // 17 / 8 = 2.125 exactly.
        let mut records = vec![record(0.0, 0.0, "high"); 5];
        records.push(record(0.0, 0.0, "medium"));
        records.extend(vec![record(0.0, 0.0, "other"); 2]);
        assert_eq!(average_severity(&records), AverageSeverity::Score(2.13));

        // 1 / 8 = 0.125 exactly.
        let mut records = vec![record(0.0, 0.0, "low")];
        records.extend(vec![record(0.0, 0.0, ""); 7]);
        assert_eq!(average_severity(&records), AverageSeverity::Score(0.13));
    }

    #[test]
    fn whole_scores_keep_their_value() {
        assert!((round_to_hundredths(3.0) - 3.0).abs() < f64::EPSILON);
        assert!(round_to_hundredths(0.0).abs() < f64::EPSILON);
        assert!((round_to_hundredths(1.999) - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn non_positive_radius_matches_nothing() {
        let records = vec![record(0.0, 0.0, "low")];
        assert_eq!(analyze(GeoPoint::new(0.0, 0.0), 0.0, &records).matched_count, 0);
        assert_eq!(
            analyze(GeoPoint::new(0.0, 0.0), f64::NAN, &records).matched_count,
            0
        );
    }

    fn any_record() -> impl Strategy<Value = PotholeRecord> {
        (
            -10.0f64..10.0,
            -10.0f64..10.0,
            prop::sample::select(vec!["low", "Medium", "HIGH", "", "other"]),
        )
            .prop_map(|(lat, lng, severity)| record(lat, lng, severity))
    }

    proptest! {
        #[test]
        fn larger_radius_never_removes_matches(
            records in prop::collection::vec(any_record(), 0..40),
            small in 0.0f64..1500.0,
            extra in 0.0f64..1500.0,
        ) {
            let center = GeoPoint::new(0.0, 0.0);
            let large = small + extra;
            let inside_small: Vec<bool> = records
                .iter()
                .map(|r| distance(center, r.point) < small)
                .collect();
            let inside_large: Vec<bool> = records
                .iter()
                .map(|r| distance(center, r.point) < large)
                .collect();

            for (s, l) in inside_small.iter().zip(&inside_large) {
                prop_assert!(!s || *l);
            }
            prop_assert!(
                analyze(center, small, &records).matched_count
                    <= analyze(center, large, &records).matched_count
            );
        }

        #[test]
        fn average_stays_in_score_range(records in prop::collection::vec(any_record(), 1..40)) {
            let score = average_severity(&records).score().unwrap();
            prop_assert!((0.0..=3.0).contains(&score));
        }
    }
}
