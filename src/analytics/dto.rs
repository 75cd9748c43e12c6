use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::Date;

#[derive(Debug, Default, Deserialize)]
pub struct MonthlyQuery {
    pub year: Option<i32>,
    pub month: Option<u8>,
}

/// Summed amount for one category.
#[derive(Debug, Serialize, FromRow)]
pub struct CategorySum {
    pub category: String,
    pub sum: Decimal,
}

/// Summed amount for one calendar date; the trend series is a list of these.
#[derive(Debug, Serialize, FromRow)]
pub struct TrendPoint {
    pub date: Date,
    pub sum: Decimal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub total_this_month: Decimal,
    pub by_category: Vec<CategorySum>,
    pub trend: Vec<TrendPoint>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub by_category: Vec<CategorySum>,
}
