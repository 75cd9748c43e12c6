use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use rust_decimal::Decimal;
use time::{macros::format_description, Date};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::AuthUser,
    error::{ApiError, FieldError},
    expenses::{
        dto::{
            CreateExpenseRequest, ExpenseListResponse, ListQuery, PaginationMeta,
            UpdateExpenseRequest,
        },
        filter::ExpenseFilter,
        repo::{self, Expense, ExpensePatch},
    },
    state::AppState,
};

const DEFAULT_PAGE_SIZE: i64 = 10;
const MAX_PAGE_SIZE: i64 = 100;

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/expenses", get(list_expenses))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/expenses", post(create_expense))
        .route("/expenses/:id", put(update_expense).delete(delete_expense))
}

fn parse_date(field: &'static str, value: &str) -> Result<Date, FieldError> {
    let format = format_description!("[year]-[month]-[day]");
    Date::parse(value, &format)
        .map_err(|_| FieldError::new(field, "must be a calendar date (YYYY-MM-DD)"))
}

fn total_pages(total: i64, page_size: i64) -> i64 {
    (total + page_size - 1) / page_size
}

/// Resolved and validated listing parameters.
#[derive(Debug)]
struct ListParams {
    page: i64,
    page_size: i64,
    offset: i64,
    filter: ExpenseFilter,
}

fn validate_list_query(query: &ListQuery) -> Result<ListParams, ApiError> {
    let mut errors = Vec::new();

    let page = query.page.unwrap_or(1);
    if page < 1 {
        errors.push(FieldError::new("page", "must be at least 1"));
    }
    let page_size = query.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
    if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
        errors.push(FieldError::new("pageSize", "must be between 1 and 100"));
    }

    // The SQL OFFSET is page-derived; a page near i64::MAX would overflow it.
    let offset = match page.checked_sub(1).and_then(|p| p.checked_mul(page_size)) {
        Some(offset) => offset,
        None => {
            errors.push(FieldError::new("page", "is out of range"));
            0
        }
    };

    let from = match &query.from {
        Some(v) => match parse_date("from", v) {
            Ok(d) => Some(d),
            Err(e) => {
                errors.push(e);
                None
            }
        },
        None => None,
    };
    let to = match &query.to {
        Some(v) => match parse_date("to", v) {
            Ok(d) => Some(d),
            Err(e) => {
                errors.push(e);
                None
            }
        },
        None => None,
    };

    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    Ok(ListParams {
        page,
        page_size,
        offset,
        filter: ExpenseFilter {
            from,
            to,
            search: query.search.clone(),
        },
    })
}

#[instrument(skip(state))]
pub async fn list_expenses(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<ExpenseListResponse>, ApiError> {
    let params = validate_list_query(&query)?;

    let data = repo::list(
        &state.db,
        auth.id,
        &params.filter,
        params.page_size,
        params.offset,
    )
    .await?;
    let total = repo::count(&state.db, auth.id, &params.filter).await?;

    Ok(Json(ExpenseListResponse {
        data,
        pagination: PaginationMeta {
            page: params.page,
            page_size: params.page_size,
            total,
            total_pages: total_pages(total, params.page_size),
        },
    }))
}

#[instrument(skip(state, payload))]
pub async fn create_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateExpenseRequest>,
) -> Result<(StatusCode, Json<Expense>), ApiError> {
    let mut errors = Vec::new();
    if payload.amount <= Decimal::ZERO {
        errors.push(FieldError::new("amount", "must be greater than 0"));
    }
    if payload.category.trim().is_empty() {
        errors.push(FieldError::new("category", "must not be empty"));
    }
    let date = match parse_date("date", &payload.date) {
        Ok(d) => Some(d),
        Err(e) => {
            errors.push(e);
            None
        }
    };
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }
    let date = date.unwrap();

    let expense = repo::create(
        &state.db,
        auth.id,
        payload.amount,
        payload.category.trim(),
        payload.description.as_deref().unwrap_or(""),
        date,
    )
    .await?;

    info!(user_id = %auth.id, expense_id = %expense.id, "expense created");
    Ok((StatusCode::CREATED, Json(expense)))
}

fn validate_patch(payload: &UpdateExpenseRequest) -> Result<ExpensePatch, ApiError> {
    let mut errors = Vec::new();

    if let Some(amount) = payload.amount {
        if amount <= Decimal::ZERO {
            errors.push(FieldError::new("amount", "must be greater than 0"));
        }
    }
    if let Some(category) = &payload.category {
        if category.trim().is_empty() {
            errors.push(FieldError::new("category", "must not be empty"));
        }
    }
    let date = match &payload.date {
        Some(v) => match parse_date("date", v) {
            Ok(d) => Some(d),
            Err(e) => {
                errors.push(e);
                None
            }
        },
        None => None,
    };

    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    Ok(ExpensePatch {
        amount: payload.amount,
        category: payload.category.as_ref().map(|c| c.trim().to_string()),
        description: payload.description.clone(),
        date,
    })
}

#[instrument(skip(state, payload))]
pub async fn update_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateExpenseRequest>,
) -> Result<Json<Expense>, ApiError> {
    let patch = validate_patch(&payload)?;

    // A foreign record and a missing one are indistinguishable to the caller.
    let expense = repo::update(&state.db, auth.id, id, &patch)
        .await?
        .ok_or(ApiError::NotFound("Expense not found"))?;

    info!(user_id = %auth.id, expense_id = %expense.id, "expense updated");
    Ok(Json(expense))
}

#[instrument(skip(state))]
pub async fn delete_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if !repo::delete(&state.db, auth.id, id).await? {
        return Err(ApiError::NotFound("Expense not found"));
    }
    info!(user_id = %auth.id, expense_id = %id, "expense deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(95, 10), 10);
    }

    #[test]
    fn parse_date_accepts_calendar_dates() {
        assert_eq!(parse_date("date", "2024-03-05").unwrap(), date!(2024 - 03 - 05));
    }

    #[test]
    fn parse_date_rejects_garbage_and_impossible_dates() {
        assert!(parse_date("date", "march 5th").is_err());
        assert!(parse_date("date", "2024-02-30").is_err());
        assert!(parse_date("date", "2024-13-01").is_err());
    }

    #[test]
    fn list_query_defaults_apply() {
        let params = validate_list_query(&ListQuery::default()).unwrap();
        assert_eq!(params.page, 1);
        assert_eq!(params.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(params.offset, 0);
        assert!(params.filter.from.is_none());
        assert!(params.filter.search.is_none());
    }

    #[test]
    fn list_query_rejects_out_of_range_paging() {
        let err = validate_list_query(&ListQuery {
            page: Some(0),
            page_size: Some(101),
            ..Default::default()
        })
        .unwrap_err();
        match err {
            ApiError::Validation(errors) => {
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[0].field, "page");
                assert_eq!(errors[1].field, "pageSize");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn list_query_computes_the_offset() {
        let params = validate_list_query(&ListQuery {
            page: Some(3),
            page_size: Some(25),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(params.offset, 50);
    }

    #[test]
    fn list_query_rejects_page_that_overflows_the_offset() {
        let err = validate_list_query(&ListQuery {
            page: Some(i64::MAX),
            ..Default::default()
        })
        .unwrap_err();
        match err {
            ApiError::Validation(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "page");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn list_query_parses_inclusive_range() {
        let params = validate_list_query(&ListQuery {
            from: Some("2024-03-01".into()),
            to: Some("2024-03-31".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(params.filter.from, Some(date!(2024 - 03 - 01)));
        assert_eq!(params.filter.to, Some(date!(2024 - 03 - 31)));
    }

    #[test]
    fn patch_with_no_fields_is_a_no_op_patch() {
        let patch = validate_patch(&UpdateExpenseRequest::default()).unwrap();
        assert!(patch.amount.is_none());
        assert!(patch.category.is_none());
        assert!(patch.description.is_none());
        assert!(patch.date.is_none());
    }

    #[test]
    fn patch_rejects_non_positive_amount() {
        let err = validate_patch(&UpdateExpenseRequest {
            amount: Some(Decimal::ZERO),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn patch_rejects_blank_category() {
        let err = validate_patch(&UpdateExpenseRequest {
            category: Some("   ".into()),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
