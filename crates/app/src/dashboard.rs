use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use metrics::counter;
use tracing::error;

use fs_intake_core::{build_view, DashboardView, Recruit};

use crate::router::AppState;

/// Handles `GET /fs-admin-888`.
///
/// Read-only: loads every recruit newest first, computes the stat-card
/// aggregates, and renders the mobile admin page. Storage faults surface
/// as a plain 500 page with no internals.
pub async fn handle(State(state): State<AppState>) -> Response {
    let recruits = match state.storage().recruits().list_all_descending().await {
        Ok(rows) => rows,
        Err(err) => {
            error!(stage = "dashboard", error = %err, "failed to load recruits");
            counter!("dashboard_requests_total", "result" => "error").increment(1);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("<h1>服务器错误，请稍后重试</h1>".to_string()),
            )
                .into_response();
        }
    };

    let view = build_view(recruits, state.now(), state.timezone());
    counter!("dashboard_requests_total", "result" => "ok").increment(1);
    Html(render_page(&view)).into_response()
}

/// Renders the full dashboard document from the view model.
fn render_page(view: &DashboardView) -> String {
    let list = if view.is_empty {
        r#"<div class="empty">暂无报名数据</div>"#.to_string()
    } else {
        view.recruits.iter().map(render_card).collect::<String>()
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0, maximum-scale=1.0, user-scalable=no">
<title>福善家事 · 管理看板</title>
<style>
* {{ margin:0; padding:0; box-sizing:border-box; }}
body {{
  font-family: "PingFang SC","Microsoft YaHei","Helvetica Neue",Arial,sans-serif;
  background: #f0f7fc;
  min-height: 100vh;
  -webkit-font-smoothing: antialiased;
}}
.header {{
  background: linear-gradient(135deg, #0e4d6f 0%, #0a7ea8 50%, #00BFFF 100%);
  padding: 24px 20px 20px;
  color: #fff;
}}
.header h1 {{ font-size: 20px; font-weight: 700; margin-bottom: 4px; }}
.header p {{ font-size: 13px; opacity: 0.8; }}
.stats {{ display: flex; gap: 12px; padding: 16px 20px; }}
.stat-card {{
  flex: 1; background: #fff; border-radius: 12px; padding: 16px; text-align: center;
  box-shadow: 0 2px 12px rgba(14,77,111,0.06);
}}
.stat-num {{ font-size: 28px; font-weight: 800; color: #00BFFF; }}
.stat-label {{ font-size: 12px; color: #8aacbe; margin-top: 4px; }}
.list {{ padding: 0 20px 40px; }}
.card {{
  background:#fff;border-radius:12px;padding:16px;margin-bottom:12px;
  box-shadow:0 2px 12px rgba(14,77,111,0.06);
}}
.card-head {{ display:flex;justify-content:space-between;align-items:center;margin-bottom:8px; }}
.card-name {{ font-weight:700;color:#0e4d6f;font-size:16px; }}
.card-id {{ font-size:12px;color:#8aacbe; }}
.card-phone {{ font-size:14px;color:#2a4a5a;margin-bottom:6px; }}
.card-phone a {{ color:#00BFFF;text-decoration:none; }}
.card-skills {{ font-size:13px;color:#6a8fa5;margin-bottom:6px; }}
.card-time {{ font-size:12px;color:#a0b8c8; }}
.empty {{ text-align:center; padding:60px 20px; color:#a0b8c8; font-size:15px; }}
</style>
</head>
<body>
<div class="header">
<h1>福善家事 · 管理看板</h1>
<p>社区健康管家招募管理后台</p>
</div>
<div class="stats">
<div class="stat-card">
<div class="stat-num">{total}</div>
<div class="stat-label">总报名人数</div>
</div>
<div class="stat-card">
<div class="stat-num">{today}</div>
<div class="stat-label">今日新增</div>
</div>
</div>
<div class="list">
{list}
</div>
</body>
</html>
"#,
        total = view.total_count,
        today = view.today_count,
        list = list,
    )
}

fn render_card(recruit: &Recruit) -> String {
    let name = escape_html(&recruit.name);
    let phone = escape_html(&recruit.phone);
    let skills = escape_html(&recruit.skills);
    let submit_time = escape_html(&recruit.submit_time);

    format!(
        r#"<div class="card">
<div class="card-head">
<span class="card-name">{name}</span>
<span class="card-id">#{id}</span>
</div>
<div class="card-phone"><a href="tel:{phone}">{phone}</a></div>
<div class="card-skills">{skills}</div>
<div class="card-time">{submit_time}</div>
</div>
"#,
        id = recruit.id,
    )
}

/// Escapes user-supplied text for embedding in markup and attributes.
fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
