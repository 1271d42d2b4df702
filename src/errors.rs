//! # Error Handling
//!
//! Every failure a search request can produce is either a caller-input
//! validation error (surfaced as a 400 before any query executes) or a
//! database error from the persistence layer (logged internally, surfaced
//! as a sanitized 500).
//!
//! Database error details are never sent to clients. They are logged via the
//! `tracing` crate when the error is converted into a response.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;
use std::fmt;

/// Errors produced while building or executing a search query.
///
/// All variants except [`SearchError::Database`] are detected synchronously
/// during filter/sort construction, before any query executes.
#[derive(Debug)]
pub enum SearchError {
    /// A filter field's root segment is absent from both the allowed-field
    /// and joined-field lists.
    FieldNotAllowed {
        /// The offending field path as supplied by the caller
        field: String,
    },

    /// An operator outside the fixed allowed set was supplied.
    InvalidOperator {
        /// The unrecognized operator token
        operator: String,
    },

    /// A value's shape does not match its operator's contract
    /// (e.g. a non-array for `in`, a non-string for `contains`).
    InvalidOperatorValue {
        /// The operator whose value was rejected
        operator: String,
        /// Human-readable description of the expected shape
        expected: &'static str,
    },

    /// The requested sort field is not eligible for sorting.
    InvalidSortField {
        /// The offending sort field
        field: String,
    },

    /// A dotted field path has an unsupported number of segments for its
    /// role (e.g. four segments, or three segments whose root is not a
    /// known relation).
    InvalidFieldPath {
        /// The offending field path
        path: String,
    },

    /// The filter expression itself is malformed (e.g. an empty logical
    /// group, or a JSON filter with the wrong shape).
    InvalidExpression {
        /// What was wrong with the expression
        reason: String,
    },

    /// An execution-time error from the persistence layer. Propagated
    /// unchanged from Sea-ORM; details are logged, not exposed.
    Database(DbErr),
}

impl SearchError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn user_message(&self) -> String {
        match self {
            Self::FieldNotAllowed { field } => {
                format!("Field {field} is not allowed for filtering")
            }
            Self::InvalidOperator { operator } => format!("Invalid operator: {operator}"),
            Self::InvalidOperatorValue { operator, expected } => {
                format!("Invalid value for {operator} operator. Expected {expected}.")
            }
            Self::InvalidSortField { field } => format!("Invalid sort field: {field}"),
            Self::InvalidFieldPath { path } => format!("Invalid field path: {path}"),
            Self::InvalidExpression { reason } => {
                format!("Invalid filter expression: {reason}")
            }
            Self::Database(_) => "A database error occurred".to_owned(),
        }
    }
}

/// Error body sent to clients (sanitized)
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        if let Self::Database(internal) = &self {
            tracing::error!(error = ?internal, "database error during search");
        }
        let status = self.status_code();
        (
            status,
            Json(ErrorResponse {
                error: self.user_message(),
            }),
        )
            .into_response()
    }
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Database(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbErr> for SearchError {
    fn from(err: DbErr) -> Self {
        Self::Database(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_are_bad_request() {
        let errors = vec![
            SearchError::FieldNotAllowed {
                field: "password".to_owned(),
            },
            SearchError::InvalidOperator {
                operator: "between".to_owned(),
            },
            SearchError::InvalidOperatorValue {
                operator: "in".to_owned(),
                expected: "an array of values",
            },
            SearchError::InvalidSortField {
                field: "secret".to_owned(),
            },
            SearchError::InvalidFieldPath {
                path: "a.b.c.d".to_owned(),
            },
            SearchError::InvalidExpression {
                reason: "empty group".to_owned(),
            },
        ];
        for err in errors {
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn database_errors_are_internal_and_sanitized() {
        let err = SearchError::from(DbErr::Custom("connection reset".to_owned()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.user_message(), "A database error occurred");
        assert!(!err.user_message().contains("connection reset"));
    }

    #[test]
    fn messages_name_the_offending_input() {
        let err = SearchError::FieldNotAllowed {
            field: "password".to_owned(),
        };
        assert_eq!(
            format!("{err}"),
            "Field password is not allowed for filtering"
        );

        let err = SearchError::InvalidSortField {
            field: "secret".to_owned(),
        };
        assert_eq!(format!("{err}"), "Invalid sort field: secret");
    }

    #[test]
    fn database_source_is_preserved() {
        let err = SearchError::from(DbErr::Custom("boom".to_owned()));
        assert!(std::error::Error::source(&err).is_some());
    }
}
