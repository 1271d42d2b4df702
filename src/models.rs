//! HTTP-facing DTOs: the query-parameter surface and the paginated
//! response envelope.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::errors::SearchError;
use crate::filter::expression::FilterExpression;
use crate::filter::pagination::{DEFAULT_LIMIT, DEFAULT_PAGE, Pagination};
use crate::filter::sort::{Sort, SortOrder};

/// Query parameters for filtering, pagination, and sorting resources.
///
/// # Filtering
/// The `filter` parameter uses a compact grammar:
/// `[or_|and_]{field}-{operator}-{value},...`
/// - Comparison: `age-gte-18`
/// - String patterns: `email-contains-example`
/// - Set membership (`|`-separated): `status-in-active|pending`
/// - Joined relations and JSON sub-paths via dots: `trips.days-gte-3`,
///   `profile.level-eq-gold`
///
/// # Pagination
/// `page` (1-based, default 1) and `limit` (default 10).
///
/// # Sorting
/// `sort_by` (default: the resource's primary key) and `sort_order`
/// (`ASC` or `DESC`, default `ASC`).
#[derive(Deserialize, IntoParams, ToSchema, Default)]
#[into_params(parameter_in = Query)]
pub struct SearchOptions {
    /// Filter expression in the compact grammar.
    ///
    /// Example: `and_age-gte-18,email-contains-example`
    #[param(example = "and_age-gte-18,email-contains-example")]
    pub filter: Option<String>,
    /// Page number (1-based).
    #[param(example = 1)]
    pub page: Option<u64>,
    /// Number of items per page.
    #[param(example = 10)]
    pub limit: Option<u64>,
    /// Sort field; supports the same dotted paths as filters.
    #[param(example = "age")]
    pub sort_by: Option<String>,
    /// Sort order (ASC or DESC).
    #[param(example = "ASC")]
    pub sort_order: Option<SortOrder>,
}

impl SearchOptions {
    /// Parse the filter string into an expression tree.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidOperator`] for unknown operator tokens.
    pub fn filter_expression(&self) -> Result<Option<FilterExpression>, SearchError> {
        match &self.filter {
            Some(raw) => FilterExpression::parse(raw),
            None => Ok(None),
        }
    }

    /// Pagination parameters, clamped to their lower bounds.
    #[must_use]
    pub fn pagination(&self) -> Pagination {
        Pagination::new(
            self.page.unwrap_or(DEFAULT_PAGE),
            self.limit.unwrap_or(DEFAULT_LIMIT),
        )
    }

    /// Sort parameters.
    #[must_use]
    pub fn sort(&self) -> Sort {
        Sort {
            sort_by: self.sort_by.clone(),
            sort_order: self.sort_order.unwrap_or_default(),
        }
    }
}

/// Metadata accompanying a page of search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchMeta {
    /// Rows matching the filter, ignoring pagination
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    /// `ceil(total / limit)`
    pub total_pages: u64,
    pub sort_by: String,
    pub sort_order: SortOrder,
}

/// A page of results plus its metadata.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SearchResponse<T> {
    pub contents: Vec<T>,
    pub meta: SearchMeta,
}
