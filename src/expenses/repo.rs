use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, QueryBuilder};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::expenses::filter::{push_filters, ExpenseFilter};

/// Expense record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Expense {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub user_id: Uuid,
    pub amount: Decimal,
    pub category: String,
    pub description: String,
    pub date: Date,
    #[serde(skip_serializing)]
    pub created_at: OffsetDateTime,
}

/// Field set applied by an update; `None` leaves the column untouched.
#[derive(Debug, Default)]
pub struct ExpensePatch {
    pub amount: Option<Decimal>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub date: Option<Date>,
}

const COLUMNS: &str = "id, user_id, amount, category, description, date, created_at";

pub async fn list(
    db: &PgPool,
    user_id: Uuid,
    filter: &ExpenseFilter,
    limit: i64,
    offset: i64,
) -> anyhow::Result<Vec<Expense>> {
    let mut qb = QueryBuilder::new(format!("SELECT {} FROM expenses", COLUMNS));
    push_filters(&mut qb, user_id, filter);
    qb.push(" ORDER BY date DESC, created_at DESC LIMIT ");
    qb.push_bind(limit);
    qb.push(" OFFSET ");
    qb.push_bind(offset);

    let rows = qb.build_query_as::<Expense>().fetch_all(db).await?;
    Ok(rows)
}

pub async fn count(db: &PgPool, user_id: Uuid, filter: &ExpenseFilter) -> anyhow::Result<i64> {
    let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM expenses");
    push_filters(&mut qb, user_id, filter);
    let total = qb.build_query_scalar::<i64>().fetch_one(db).await?;
    Ok(total)
}

pub async fn create(
    db: &PgPool,
    user_id: Uuid,
    amount: Decimal,
    category: &str,
    description: &str,
    date: Date,
) -> anyhow::Result<Expense> {
    let expense = sqlx::query_as::<_, Expense>(
        r#"
        INSERT INTO expenses (user_id, amount, category, description, date)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, user_id, amount, category, description, date, created_at
        "#,
    )
    .bind(user_id)
    .bind(amount)
    .bind(category)
    .bind(description)
    .bind(date)
    .fetch_one(db)
    .await?;
    Ok(expense)
}

/// Applies a partial update scoped to the owner. Returns `None` when the row
/// does not exist or belongs to a different user; callers treat both the same.
pub async fn update(
    db: &PgPool,
    user_id: Uuid,
    id: Uuid,
    patch: &ExpensePatch,
) -> anyhow::Result<Option<Expense>> {
    let expense = sqlx::query_as::<_, Expense>(
        r#"
        UPDATE expenses SET
            amount = COALESCE($3, amount),
            category = COALESCE($4, category),
            description = COALESCE($5, description),
            date = COALESCE($6, date)
        WHERE id = $1 AND user_id = $2
        RETURNING id, user_id, amount, category, description, date, created_at
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(patch.amount)
    .bind(patch.category.as_deref())
    .bind(patch.description.as_deref())
    .bind(patch.date)
    .fetch_optional(db)
    .await?;
    Ok(expense)
}

/// Deletes an owned expense; `false` means nothing matched.
pub async fn delete(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM expenses
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(id)
    .bind(user_id)
    .execute(db)
    .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::prelude::FromPrimitive;
    use time::macros::date;

    #[test]
    fn expense_serialization_hides_owner_and_timestamps() {
        let expense = Expense {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            amount: Decimal::from_f64(50.0).unwrap(),
            category: "Food".into(),
            description: "groceries".into(),
            date: date!(2024 - 03 - 05),
            created_at: OffsetDateTime::UNIX_EPOCH,
        };
        let json = serde_json::to_value(&expense).unwrap();
        assert!(json.get("user_id").is_none());
        assert!(json.get("created_at").is_none());
        assert_eq!(json["category"], "Food");
        assert_eq!(json["date"], "2024-03-05");
        assert_eq!(json["amount"], 50.0);
    }
}
