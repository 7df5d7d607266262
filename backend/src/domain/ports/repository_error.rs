//! Error type shared by every persistence port.

use super::define_port_error;
use crate::domain::Error;

define_port_error! {
    /// Errors raised by repository adapters.
    pub enum RepositoryError {
        /// The store could not be reached or a connection could not be
        /// checked out of the pool.
        Connection { message: String } => "repository connection failed: {message}",
        /// A query or mutation failed during execution.
        Query { message: String } => "repository query failed: {message}",
        /// The row addressed by a mutation does not exist.
        NotFound { entity: String } => "{entity} not found",
        /// A uniqueness or foreign-key constraint rejected the write.
        Conflict { message: String } => "repository conflict: {message}",
    }
}

impl From<RepositoryError> for Error {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::Connection { message } => {
                tracing::warn!(%message, "repository unavailable");
                Error::service_unavailable("storage is temporarily unavailable")
            }
            RepositoryError::Query { message } => Error::internal(message),
            RepositoryError::NotFound { entity } => Error::not_found(format!("{entity} not found")),
            RepositoryError::Conflict { message } => Error::conflict(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(RepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(RepositoryError::query("syntax"), ErrorCode::InternalError)]
    #[case(RepositoryError::not_found("order"), ErrorCode::NotFound)]
    #[case(RepositoryError::conflict("duplicate slug"), ErrorCode::Conflict)]
    fn maps_to_domain_codes(#[case] error: RepositoryError, #[case] expected: ErrorCode) {
        assert_eq!(Error::from(error).code(), expected);
    }

    #[rstest]
    fn not_found_names_entity() {
        let error = Error::from(RepositoryError::not_found("product"));
        assert_eq!(error.message(), "product not found");
    }
}
