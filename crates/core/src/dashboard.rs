use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::types::Recruit;

/// View model handed to the dashboard renderer.
///
/// Carries the full record list (already ordered newest first by the
/// storage layer) plus the aggregates shown in the stat cards. Building it
/// mutates nothing: the dashboard path is read-only.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub recruits: Vec<Recruit>,
    pub total_count: usize,
    pub today_count: usize,
    pub is_empty: bool,
}

/// Computes the dashboard aggregates over the given records.
///
/// A record counts as "today" when its `created_at` falls on the same
/// calendar date as `now`, both converted to the configured display zone.
pub fn build_view(recruits: Vec<Recruit>, now: DateTime<Utc>, timezone: Tz) -> DashboardView {
    let today = now.with_timezone(&timezone).date_naive();
    let today_count = recruits
        .iter()
        .filter(|recruit| recruit.created_at.with_timezone(&timezone).date_naive() == today)
        .count();
    let total_count = recruits.len();

    DashboardView {
        is_empty: total_count == 0,
        total_count,
        today_count,
        recruits,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Asia::Shanghai;

    fn recruit(id: i64, created_at: &str) -> Recruit {
        Recruit {
            id,
            name: format!("applicant-{id}"),
            phone: "13800000000".to_string(),
            skills: "护理".to_string(),
            submit_time: "2024/05/01 18:30:00".to_string(),
            created_at: DateTime::parse_from_rfc3339(created_at)
                .expect("timestamp")
                .with_timezone(&Utc),
        }
    }

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
            .expect("fixed time")
            .with_timezone(&Utc)
    }

    #[test]
    fn empty_view_sets_flag_and_zero_counts() {
        let view = build_view(Vec::new(), now(), Shanghai);
        assert!(view.is_empty);
        assert_eq!(view.total_count, 0);
        assert_eq!(view.today_count, 0);
        assert!(view.recruits.is_empty());
    }

    #[test]
    fn counts_totals_and_todays_records() {
        let records = vec![
            recruit(3, "2024-05-01T11:00:00Z"),
            recruit(2, "2024-05-01T01:00:00Z"),
            recruit(1, "2024-04-28T10:00:00Z"),
        ];
        let view = build_view(records, now(), Shanghai);
        assert!(!view.is_empty);
        assert_eq!(view.total_count, 3);
        assert_eq!(view.today_count, 2);
    }

    #[test]
    fn today_is_evaluated_in_the_display_zone() {
        // 2024-04-30T22:00:00Z is already 2024-05-01 in Asia/Shanghai.
        let records = vec![recruit(1, "2024-04-30T22:00:00Z")];
        let view = build_view(records.clone(), now(), Shanghai);
        assert_eq!(view.today_count, 1);

        // The same instant is still 2024-04-30 in UTC.
        let view = build_view(records, now(), chrono_tz::UTC);
        assert_eq!(view.today_count, 0);
    }

    #[test]
    fn preserves_record_order() {
        let records = vec![
            recruit(3, "2024-05-01T11:00:00Z"),
            recruit(2, "2024-05-01T01:00:00Z"),
        ];
        let view = build_view(records, now(), Shanghai);
        let ids: Vec<i64> = view.recruits.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 2]);
    }
}
