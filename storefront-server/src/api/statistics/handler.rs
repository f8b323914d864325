//! Statistics API Handlers

use axum::extract::{Query, State};
use serde::Deserialize;

use crate::core::ServerState;
use crate::identity::StaffAccess;
use crate::metrics::{DEFAULT_TOP_N, MetricsReport, build_report};
use crate::utils::time;
use crate::utils::{ApiResponse, AppError, AppResult, ok};

const MAX_TOP_N: usize = 50;

#[derive(Debug, Default, Deserialize)]
pub struct StatisticsQuery {
    pub top: Option<usize>,
    /// `YYYY-MM-DD`
    pub date: Option<String>,
}

pub async fn get_statistics(
    State(state): State<ServerState>,
    _staff: StaffAccess,
    Query(query): Query<StatisticsQuery>,
) -> AppResult<ApiResponse<MetricsReport>> {
    let tz = state.business_tz();
    let today = match query.date.as_deref() {
        Some(date) => {
            let date = time::parse_date(date)?;
            time::validate_not_future(date, tz)?;
            date
        }
        None => time::today(tz),
    };

    let top_n = query.top.unwrap_or(DEFAULT_TOP_N);
    if top_n == 0 || top_n > MAX_TOP_N {
        return Err(AppError::validation(format!("top must be between 1 and {}", MAX_TOP_N))
            .with_detail("field", "top"));
    }

    // Point-in-time read; concurrent writes land in the next report
    let snapshot = state.orders.snapshot()?;
    Ok(ok(build_report(&snapshot, today, tz, top_n)))
}
