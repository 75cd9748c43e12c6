use rust_decimal::Decimal;
use sqlx::PgPool;
use time::Date;
use uuid::Uuid;

use crate::analytics::dto::{CategorySum, TrendPoint};

/// Sum of all amounts in the inclusive date range; zero when nothing matches.
pub async fn total_in_range(
    db: &PgPool,
    user_id: Uuid,
    start: Date,
    end: Date,
) -> anyhow::Result<Decimal> {
    let total = sqlx::query_scalar::<_, Decimal>(
        r#"
        SELECT COALESCE(SUM(amount), 0)
        FROM expenses
        WHERE user_id = $1 AND date >= $2 AND date <= $3
        "#,
    )
    .bind(user_id)
    .bind(start)
    .bind(end)
    .fetch_one(db)
    .await?;
    Ok(total)
}

pub async fn by_category_in_range(
    db: &PgPool,
    user_id: Uuid,
    start: Date,
    end: Date,
) -> anyhow::Result<Vec<CategorySum>> {
    let rows = sqlx::query_as::<_, CategorySum>(
        r#"
        SELECT category, SUM(amount) AS sum
        FROM expenses
        WHERE user_id = $1 AND date >= $2 AND date <= $3
        GROUP BY category
        ORDER BY sum DESC
        "#,
    )
    .bind(user_id)
    .bind(start)
    .bind(end)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn trend_in_range(
    db: &PgPool,
    user_id: Uuid,
    start: Date,
    end: Date,
) -> anyhow::Result<Vec<TrendPoint>> {
    let rows = sqlx::query_as::<_, TrendPoint>(
        r#"
        SELECT date, SUM(amount) AS sum
        FROM expenses
        WHERE user_id = $1 AND date >= $2 AND date <= $3
        GROUP BY date
        ORDER BY date ASC
        "#,
    )
    .bind(user_id)
    .bind(start)
    .bind(end)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn by_category_all_time(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<CategorySum>> {
    let rows = sqlx::query_as::<_, CategorySum>(
        r#"
        SELECT category, SUM(amount) AS sum
        FROM expenses
        WHERE user_id = $1
        GROUP BY category
        ORDER BY sum DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}
