use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use time::{util::days_in_year_month, Date, Month, OffsetDateTime};
use tracing::instrument;

use crate::{
    auth::AuthUser,
    error::{ApiError, FieldError},
    analytics::{
        dto::{CategorySummary, MonthlyQuery, MonthlySummary},
        repo,
    },
    state::AppState,
};

pub fn analytics_routes() -> Router<AppState> {
    Router::new()
        .route("/analytics/monthly", get(monthly_summary))
        .route("/analytics/category", get(category_summary))
}

/// First and last day of the given month, both inclusive.
fn month_range(year: i32, month: u8) -> Result<(Date, Date), ApiError> {
    let mut errors = Vec::new();
    if !(1970..=9999).contains(&year) {
        errors.push(FieldError::new("year", "must be between 1970 and 9999"));
    }
    let month = match Month::try_from(month) {
        Ok(m) => Some(m),
        Err(_) => {
            errors.push(FieldError::new("month", "must be between 1 and 12"));
            None
        }
    };
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }
    let month = month.unwrap();

    let start = Date::from_calendar_date(year, month, 1)
        .map_err(|_| ApiError::validation("year", "not a representable date"))?;
    let end = Date::from_calendar_date(year, month, days_in_year_month(year, month))
        .map_err(|_| ApiError::validation("year", "not a representable date"))?;
    Ok((start, end))
}

#[instrument(skip(state))]
pub async fn monthly_summary(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<MonthlyQuery>,
) -> Result<Json<MonthlySummary>, ApiError> {
    let today = OffsetDateTime::now_utc().date();
    let year = query.year.unwrap_or(today.year());
    let month = query.month.unwrap_or(u8::from(today.month()));
    let (start, end) = month_range(year, month)?;

    let total_this_month = repo::total_in_range(&state.db, auth.id, start, end).await?;
    let by_category = repo::by_category_in_range(&state.db, auth.id, start, end).await?;
    let trend = repo::trend_in_range(&state.db, auth.id, start, end).await?;

    Ok(Json(MonthlySummary {
        total_this_month,
        by_category,
        trend,
    }))
}

#[instrument(skip(state))]
pub async fn category_summary(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<CategorySummary>, ApiError> {
    let by_category = repo::by_category_all_time(&state.db, auth.id).await?;
    Ok(Json(CategorySummary { by_category }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn month_range_covers_whole_month() {
        let (start, end) = month_range(2024, 3).unwrap();
        assert_eq!(start, date!(2024 - 03 - 01));
        assert_eq!(end, date!(2024 - 03 - 31));
    }

    #[test]
    fn february_respects_leap_years() {
        let (_, end) = month_range(2024, 2).unwrap();
        assert_eq!(end, date!(2024 - 02 - 29));
        let (_, end) = month_range(2023, 2).unwrap();
        assert_eq!(end, date!(2023 - 02 - 28));
    }

    #[test]
    fn month_out_of_range_is_a_validation_error() {
        assert!(matches!(month_range(2024, 0), Err(ApiError::Validation(_))));
        assert!(matches!(month_range(2024, 13), Err(ApiError::Validation(_))));
    }

    #[test]
    fn year_out_of_range_is_a_validation_error() {
        assert!(month_range(1970, 5).is_ok());
        assert!(matches!(month_range(1969, 5), Err(ApiError::Validation(_))));
        assert!(matches!(month_range(10000, 5), Err(ApiError::Validation(_))));
    }

    #[test]
    fn monthly_summary_serializes_with_camel_case_keys() {
        let summary = MonthlySummary {
            total_this_month: rust_decimal::Decimal::ZERO,
            by_category: vec![],
            trend: vec![],
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.get("totalThisMonth").is_some());
        assert!(json.get("byCategory").is_some());
        assert!(json.get("trend").is_some());
    }
}
