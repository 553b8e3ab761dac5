use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use thiserror::Error;

use crate::types::{NormalizedSubmission, RawSubmission};

/// Separator used when joining skill tags into the single stored field.
pub const SKILL_SEPARATOR: &str = "、";

/// Reasons a submission is rejected before reaching storage.
///
/// The display strings are the exact user-facing messages returned by the
/// join endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RejectionReason {
    #[error("姓名不能为空")]
    NameRequired,
    #[error("请输入正确的11位手机号码")]
    InvalidPhone,
    #[error("请至少选择一个擅长领域")]
    SkillsRequired,
}

/// Validates an untrusted submission and produces a [`NormalizedSubmission`].
///
/// Checks run in a fixed order so the first failing field determines the
/// rejection message: name, then phone, then skills. `now` is only used for
/// the submit-time fallback, which keeps the function deterministic under
/// test with a pinned clock.
pub fn normalize(
    raw: RawSubmission,
    now: DateTime<Utc>,
    timezone: Tz,
) -> Result<NormalizedSubmission, RejectionReason> {
    let name = raw
        .name
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(RejectionReason::NameRequired)?;

    let phone = raw
        .phone
        .as_deref()
        .map(str::trim)
        .filter(|value| is_cn_mobile(value))
        .ok_or(RejectionReason::InvalidPhone)?;

    let skills = raw
        .skills
        .filter(|tags| !tags.is_empty())
        .ok_or(RejectionReason::SkillsRequired)?;

    let submit_time = match raw.submit_time.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => fallback_submit_time(now, timezone),
    };

    Ok(NormalizedSubmission {
        name: name.to_string(),
        phone: phone.to_string(),
        skills: skills.join(SKILL_SEPARATOR),
        submit_time,
    })
}

/// Checks the 11-digit CN mobile pattern: leading `1`, second digit `3`-`9`,
/// nine further digits.
fn is_cn_mobile(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 11
        && bytes[0] == b'1'
        && (b'3'..=b'9').contains(&bytes[1])
        && bytes[2..].iter().all(u8::is_ascii_digit)
}

/// Renders the server-side submit-time fallback in the configured display
/// zone.
fn fallback_submit_time(now: DateTime<Utc>, timezone: Tz) -> String {
    now.with_timezone(&timezone)
        .format("%Y/%m/%d %H:%M:%S")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Asia::Shanghai;

    fn fixed_now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-05-01T10:30:00Z")
            .expect("fixed time")
            .with_timezone(&Utc)
    }

    fn valid_raw() -> RawSubmission {
        RawSubmission {
            name: Some("张三".to_string()),
            phone: Some("13800000000".to_string()),
            skills: Some(vec!["护理".to_string(), "陪诊".to_string()]),
            submit_time: Some("2024/05/01 18:30:00".to_string()),
        }
    }

    #[test]
    fn accepts_valid_submission() {
        let normalized = normalize(valid_raw(), fixed_now(), Shanghai).expect("valid");
        assert_eq!(normalized.name, "张三");
        assert_eq!(normalized.phone, "13800000000");
        assert_eq!(normalized.skills, "护理、陪诊");
        assert_eq!(normalized.submit_time, "2024/05/01 18:30:00");
    }

    #[test]
    fn trims_name_and_phone() {
        let raw = RawSubmission {
            name: Some("  李四 \t".to_string()),
            phone: Some(" 13900000000 ".to_string()),
            ..valid_raw()
        };
        let normalized = normalize(raw, fixed_now(), Shanghai).expect("valid");
        assert_eq!(normalized.name, "李四");
        assert_eq!(normalized.phone, "13900000000");
    }

    #[test]
    fn rejects_missing_or_blank_name() {
        for name in [None, Some("".to_string()), Some("   ".to_string())] {
            let raw = RawSubmission {
                name,
                ..valid_raw()
            };
            let err = normalize(raw, fixed_now(), Shanghai).unwrap_err();
            assert_eq!(err, RejectionReason::NameRequired);
        }
    }

    #[test]
    fn rejects_malformed_phone_numbers() {
        let bad = [
            "12345678901", // second digit out of range
            "23800000000", // does not start with 1
            "1380000000",  // too short
            "138000000000", // too long
            "1380000000a", // non-digit
            "",
        ];
        for phone in bad {
            let raw = RawSubmission {
                phone: Some(phone.to_string()),
                ..valid_raw()
            };
            let err = normalize(raw, fixed_now(), Shanghai).unwrap_err();
            assert_eq!(err, RejectionReason::InvalidPhone, "phone: {phone:?}");
        }
    }

    #[test]
    fn rejects_missing_phone() {
        let raw = RawSubmission {
            phone: None,
            ..valid_raw()
        };
        let err = normalize(raw, fixed_now(), Shanghai).unwrap_err();
        assert_eq!(err, RejectionReason::InvalidPhone);
    }

    #[test]
    fn rejects_missing_or_empty_skills() {
        for skills in [None, Some(Vec::new())] {
            let raw = RawSubmission {
                skills,
                ..valid_raw()
            };
            let err = normalize(raw, fixed_now(), Shanghai).unwrap_err();
            assert_eq!(err, RejectionReason::SkillsRequired);
        }
    }

    #[test]
    fn name_check_wins_when_multiple_fields_invalid() {
        let raw = RawSubmission {
            name: Some(" ".to_string()),
            phone: Some("not-a-phone".to_string()),
            skills: Some(Vec::new()),
            submit_time: None,
        };
        let err = normalize(raw, fixed_now(), Shanghai).unwrap_err();
        assert_eq!(err, RejectionReason::NameRequired);
    }

    #[test]
    fn joins_skills_in_submission_order() {
        let raw = RawSubmission {
            skills: Some(vec![
                "陪诊".to_string(),
                "护理".to_string(),
                "家务".to_string(),
            ]),
            ..valid_raw()
        };
        let normalized = normalize(raw, fixed_now(), Shanghai).expect("valid");
        assert_eq!(normalized.skills, "陪诊、护理、家务");
    }

    #[test]
    fn falls_back_to_local_time_when_submit_time_absent() {
        for submit_time in [None, Some("".to_string()), Some("  ".to_string())] {
            let raw = RawSubmission {
                submit_time,
                ..valid_raw()
            };
            let normalized = normalize(raw, fixed_now(), Shanghai).expect("valid");
            // 10:30 UTC is 18:30 in Asia/Shanghai.
            assert_eq!(normalized.submit_time, "2024/05/01 18:30:00");
        }
    }
}
