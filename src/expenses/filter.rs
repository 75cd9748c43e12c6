use sqlx::{Postgres, QueryBuilder};
use time::Date;
use uuid::Uuid;

/// Declarative listing filter: each field is applied only when present.
#[derive(Debug, Default, Clone)]
pub struct ExpenseFilter {
    pub from: Option<Date>,
    pub to: Option<Date>,
    pub search: Option<String>,
}

/// Appends the owner scope and filter predicates to a query. Every listing and
/// count query goes through here so the two can never disagree, and so no
/// expense query can be written without a user_id scope.
pub fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, user_id: Uuid, filter: &ExpenseFilter) {
    qb.push(" WHERE user_id = ");
    qb.push_bind(user_id);

    if let Some(from) = filter.from {
        qb.push(" AND date >= ");
        qb.push_bind(from);
    }
    if let Some(to) = filter.to {
        qb.push(" AND date <= ");
        qb.push_bind(to);
    }
    if let Some(search) = &filter.search {
        if !search.is_empty() {
            let pattern = format!("%{}%", search);
            qb.push(" AND (description ILIKE ");
            qb.push_bind(pattern.clone());
            qb.push(" OR category ILIKE ");
            qb.push_bind(pattern);
            qb.push(")");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn sql_for(filter: &ExpenseFilter) -> String {
        let mut qb = QueryBuilder::new("SELECT * FROM expenses");
        push_filters(&mut qb, Uuid::new_v4(), filter);
        qb.sql().to_string()
    }

    #[test]
    fn empty_filter_only_scopes_by_owner() {
        let sql = sql_for(&ExpenseFilter::default());
        assert_eq!(sql, "SELECT * FROM expenses WHERE user_id = $1");
    }

    #[test]
    fn date_range_is_inclusive_on_both_ends() {
        let sql = sql_for(&ExpenseFilter {
            from: Some(date!(2024 - 03 - 01)),
            to: Some(date!(2024 - 03 - 31)),
            search: None,
        });
        assert!(sql.contains("date >= $2"));
        assert!(sql.contains("date <= $3"));
    }

    #[test]
    fn search_matches_description_or_category_case_insensitively() {
        let sql = sql_for(&ExpenseFilter {
            from: None,
            to: None,
            search: Some("food".into()),
        });
        assert!(sql.contains("description ILIKE $2"));
        assert!(sql.contains("OR category ILIKE $3"));
    }

    #[test]
    fn blank_search_is_ignored() {
        let sql = sql_for(&ExpenseFilter {
            from: None,
            to: None,
            search: Some(String::new()),
        });
        assert!(!sql.contains("ILIKE"));
    }

    #[test]
    fn from_only_range_omits_upper_bound() {
        let sql = sql_for(&ExpenseFilter {
            from: Some(date!(2024 - 01 - 01)),
            to: None,
            search: None,
        });
        assert!(sql.contains("date >= $2"));
        assert!(!sql.contains("date <="));
    }
}
