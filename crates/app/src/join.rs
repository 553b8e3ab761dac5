use axum::{extract::State, http::StatusCode, Json};
use metrics::counter;
use serde::Serialize;
use tracing::{error, info};

use fs_intake_core::{normalize, RawSubmission};
use fs_intake_storage::NewRecruit;

use crate::router::AppState;

const SUCCESS_MESSAGE: &str = "提交成功";
/// Storage faults are logged with detail but never leak past this message.
const GENERIC_FAILURE_MESSAGE: &str = "服务器错误，请稍后重试";

/// Wire response for the join endpoint.
#[derive(Debug, Serialize)]
pub struct JoinResponse {
    pub success: bool,
    pub message: String,
}

impl JoinResponse {
    fn success() -> Self {
        Self {
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
        }
    }

    fn failure<S: Into<String>>(message: S) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Handles `POST /api/join`.
///
/// Validation rejections come back as HTTP 200 with the field-specific
/// message so the form can show it to the applicant; storage faults come
/// back as HTTP 500 with a generic message only. No partial writes: a
/// rejected submission never reaches the insert.
pub async fn handle(
    State(state): State<AppState>,
    Json(raw): Json<RawSubmission>,
) -> (StatusCode, Json<JoinResponse>) {
    let now = state.now();

    let submission = match normalize(raw, now, state.timezone()) {
        Ok(submission) => submission,
        Err(reason) => {
            counter!("intake_submissions_total", "outcome" => "rejected").increment(1);
            return (StatusCode::OK, Json(JoinResponse::failure(reason.to_string())));
        }
    };

    let insert = state
        .storage()
        .recruits()
        .insert(NewRecruit {
            name: &submission.name,
            phone: &submission.phone,
            skills: &submission.skills,
            submit_time: &submission.submit_time,
            created_at: now,
        })
        .await;

    match insert {
        Ok(id) => {
            info!(
                stage = "join",
                id,
                name = %submission.name,
                phone = %submission.phone,
                skills = %submission.skills,
                "new signup"
            );
            counter!("intake_submissions_total", "outcome" => "accepted").increment(1);
            (StatusCode::OK, Json(JoinResponse::success()))
        }
        Err(err) => {
            error!(stage = "join", error = %err, "failed to persist signup");
            counter!("intake_submissions_total", "outcome" => "error").increment(1);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(JoinResponse::failure(GENERIC_FAILURE_MESSAGE)),
            )
        }
    }
}
