use std::collections::BTreeMap;

use crate::models::{AdmissionRecord, CollegeCode, InstitutionProfile, JoinedAdmission};

/// Most recent admission entries kept per institution
pub const HISTORY_WINDOW: usize = 3;

/// An institution with the recent history its admission probability is based on
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedCandidate {
    pub institution: InstitutionProfile,
    /// Newest first, at most [`HISTORY_WINDOW`] entries, all with a usable rank
    pub history: Vec<AdmissionRecord>,
    pub average_rank: f64,
}

/// Groups joined admission rows by institution and trims each group to its
/// most recent usable entries.
///
/// Rows without a finite minimum rank are discarded before trimming, and
/// institutions left with no usable row are dropped. Candidates come back in
/// ascending institution-code order.
pub fn aggregate(rows: Vec<JoinedAdmission>) -> Vec<AggregatedCandidate> {
    let mut groups: BTreeMap<CollegeCode, (InstitutionProfile, Vec<AdmissionRecord>)> =
        BTreeMap::new();

    for JoinedAdmission {
        institution,
        record,
    } in rows
    {
        let entry = groups
            .entry(institution.college_code)
            .or_insert_with(|| (institution, Vec::new()));
        if record.usable_rank().is_some() {
            entry.1.push(record);
        }
    }

    let group_count = groups.len();
    let candidates: Vec<AggregatedCandidate> = groups
        .into_values()
        .filter_map(|(institution, mut history)| {
            // Stable sort keeps the store's order among same-year rows
            history.sort_by(|a, b| b.year.cmp(&a.year));
            history.truncate(HISTORY_WINDOW);

            let ranks: Vec<f64> = history.iter().filter_map(|r| r.usable_rank()).collect();
            if ranks.is_empty() {
                return None;
            }
            let average_rank = ranks.iter().sum::<f64>() / ranks.len() as f64;

            Some(AggregatedCandidate {
                institution,
                history,
                average_rank,
            })
        })
        .collect();

    if candidates.len() < group_count {
        tracing::debug!(
            dropped = group_count - candidates.len(),
            "Institutions without usable rank history"
        );
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::recommendation::test_support::{institution, row};

    #[test]
    fn test_groups_rows_by_institution() {
        let rows = vec![
            row(&institution(10001, "北京"), 2020, Some(100.0)),
            row(&institution(10002, "上海"), 2020, Some(900.0)),
            row(&institution(10001, "北京"), 2019, Some(120.0)),
        ];

        let candidates = aggregate(rows);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].institution.college_code, 10001);
        assert_eq!(candidates[0].history.len(), 2);
        assert_eq!(candidates[0].average_rank, 110.0);
        assert_eq!(candidates[1].institution.college_code, 10002);
        assert_eq!(candidates[1].average_rank, 900.0);
    }

    #[test]
    fn test_keeps_three_most_recent_years() {
        let college = institution(10001, "北京");
        let rows = vec![
            row(&college, 2017, Some(1000.0)),
            row(&college, 2020, Some(100.0)),
            row(&college, 2018, Some(300.0)),
            row(&college, 2019, Some(200.0)),
        ];

        let candidates = aggregate(rows);
        let years: Vec<i32> = candidates[0].history.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2020, 2019, 2018]);
        assert_eq!(candidates[0].average_rank, 200.0);
    }

    #[test]
    fn test_unusable_ranks_do_not_take_window_slots() {
        let college = institution(10001, "北京");
        let rows = vec![
            row(&college, 2020, None),
            row(&college, 2019, Some(f64::NAN)),
            row(&college, 2018, Some(400.0)),
            row(&college, 2017, Some(600.0)),
        ];

        let candidates = aggregate(rows);
        assert_eq!(candidates[0].history.len(), 2);
        assert_eq!(candidates[0].history[0].year, 2018);
        assert_eq!(candidates[0].average_rank, 500.0);
    }

    #[test]
    fn test_institution_without_usable_history_is_dropped() {
        let rows = vec![
            row(&institution(10001, "北京"), 2020, None),
            row(&institution(10001, "北京"), 2019, Some(f64::INFINITY)),
            row(&institution(10002, "上海"), 2020, Some(800.0)),
        ];

        let candidates = aggregate(rows);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].institution.college_code, 10002);
    }

    #[test]
    fn test_empty_input_yields_no_candidates() {
        assert!(aggregate(Vec::new()).is_empty());
    }
}
