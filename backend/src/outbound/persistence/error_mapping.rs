//! Translation of pool and Diesel failures into [`RepositoryError`].
//!
//! Unique and foreign-key violations are recognised by constraint name so
//! callers see `conflict` and `not_found` instead of an opaque query failure.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::{debug, warn};

use super::pool::PoolError;
use crate::domain::ports::RepositoryError;

pub(super) fn map_pool_error(error: PoolError) -> RepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            RepositoryError::connection(message)
        }
    }
}

fn unique_violation(constraint: Option<&str>) -> RepositoryError {
    let message = match constraint {
        Some("products_slug_key") => "product slug already exists",
        Some("news_articles_slug_key") => "article slug already exists",
        Some("orders_idempotency_idx") => "idempotency key already used",
        Some("orders_order_number_key") => "order number already exists",
        Some("categories_slug_key") => "category slug already exists",
        _ => "record already exists",
    };
    RepositoryError::conflict(message)
}

fn foreign_key_violation(message: &str, constraint: Option<&str>) -> RepositoryError {
    let entity = match constraint {
        Some("products_category_id_fkey") => "category",
        Some("reviews_product_id_fkey") => "product",
        Some("order_items_order_id_fkey") => "order",
        Some("job_applications_job_id_fkey") => "job",
        _ => {
            warn!(
                message,
                constraint_name = ?constraint,
                "unrecognised foreign key violation"
            );
            return RepositoryError::query("foreign key violation");
        }
    };
    RepositoryError::not_found(entity)
}

pub(super) fn map_diesel_error(error: DieselError) -> RepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(%error, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => RepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => RepositoryError::query("database query error"),
        DieselError::DatabaseError(kind, info) => match kind {
            DatabaseErrorKind::UniqueViolation => unique_violation(info.constraint_name()),
            DatabaseErrorKind::ForeignKeyViolation => {
                foreign_key_violation(info.message(), info.constraint_name())
            }
            DatabaseErrorKind::ClosedConnection => {
                RepositoryError::connection("database connection error")
            }
            _ => RepositoryError::query("database error"),
        },
        _ => RepositoryError::query("database error"),
    }
}

/// A stored row that no longer satisfies the domain's invariants.
pub(super) fn corrupt_row(table: &'static str, error: &impl std::fmt::Display) -> RepositoryError {
    warn!(table, %error, "stored row failed domain validation");
    RepositoryError::query(format!("{table} row is invalid: {error}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_errors_are_connection_failures() {
        let error = map_pool_error(PoolError::checkout("timed out"));
        assert!(matches!(error, RepositoryError::Connection { .. }));
        assert!(error.to_string().contains("timed out"));
    }

    #[rstest]
    fn not_found_is_a_query_failure() {
        assert!(matches!(
            map_diesel_error(DieselError::NotFound),
            RepositoryError::Query { .. }
        ));
    }

    #[rstest]
    #[case(Some("products_slug_key"), "product slug already exists")]
    #[case(Some("orders_idempotency_idx"), "idempotency key already used")]
    #[case(None, "record already exists")]
    fn unique_violations_conflict(#[case] constraint: Option<&str>, #[case] message: &str) {
        assert_eq!(
            unique_violation(constraint),
            RepositoryError::conflict(message)
        );
    }

    #[rstest]
    #[case(Some("job_applications_job_id_fkey"), RepositoryError::not_found("job"))]
    #[case(Some("reviews_product_id_fkey"), RepositoryError::not_found("product"))]
    #[case(Some("mystery_fkey"), RepositoryError::query("foreign key violation"))]
    fn foreign_keys_name_the_missing_parent(
        #[case] constraint: Option<&str>,
        #[case] expected: RepositoryError,
    ) {
        assert_eq!(foreign_key_violation("violates", constraint), expected);
    }
}
