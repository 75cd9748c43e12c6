use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::expenses::repo::Expense;

/// Query parameters for the expense listing. Dates arrive as `YYYY-MM-DD`
/// strings and are parsed during validation so malformed input surfaces as a
/// field error rather than a deserialization failure.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateExpenseRequest {
    pub amount: Decimal,
    pub category: String,
    pub description: Option<String>,
    pub date: String,
}

/// Partial update: an absent field leaves the stored value unchanged. A field
/// cannot be explicitly cleared; `description` in particular can only be
/// replaced, never reset to empty through this endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateExpenseRequest {
    pub amount: Option<Decimal>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

#[derive(Debug, Serialize)]
pub struct ExpenseListResponse {
    pub data: Vec<Expense>,
    pub pagination: PaginationMeta,
}
