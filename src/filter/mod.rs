//! # Filtering, Sorting & Pagination
//!
//! This module translates a compact textual filter grammar plus sort and
//! pagination parameters into a safe, fully parameterized Sea-ORM query
//! plan. Nothing here executes queries; the [`crate::traits`] orchestrator
//! composes the pieces against a live connection.
//!
//! ## Filter grammar
//!
//! ```text
//! [or_|and_]{field}-{operator}-{value},{field}-{operator}-{value},...
//! ```
//!
//! - No prefix means `and_`.
//! - `in`/`nin` values use `|` as the inner separator: `status-in-active|pending`
//! - Dotted fields address joined relations (`trips.days`) and JSON
//!   sub-paths (`profile.level`, `trips.stats.photos`), disambiguated by the
//!   caller-declared joined-relation list.
//!
//! ```rust,ignore
//! // GET /travels?filter=or_age-gt-18,name-contains-john
//! //   -> {or: [{age: {gt: 18}}, {name: {contains: "john"}}]}
//!
//! // GET /travels?filter=and_age-gte-18,email-contains-example
//! //   &page=2&limit=5&sort_by=age&sort_order=DESC
//! ```
//!
//! ## Allowed operators
//!
//! `eq, neq, gt, gte, lt, lte, in, nin, contains, not_contains,
//! starts_with, ends_with, json_contains, is, nis`
//!
//! Every referenced field is validated against the entity's allowed-field
//! and joined-field lists before any query executes; values are always
//! bound as query parameters, and `LIKE` values have `%`, `_` and `\`
//! escaped so they match literally.

pub mod conditions;
pub mod expression;
pub mod fields;
pub mod operators;
pub mod pagination;
pub mod sort;

// Re-export commonly used items
pub use conditions::{FieldContext, build_filter_condition};
pub use expression::{FilterCondition, FilterExpression, LogicalOperator};
pub use fields::{ParsedField, field_expression, join_alias, parse_field};
pub use operators::{
    CompareOp, FilterOperator, PatternOp, SetOp, TruthOp, apply_operator, escape_like,
};
pub use pagination::{DEFAULT_LIMIT, DEFAULT_PAGE, Pagination};
pub use sort::{Sort, SortOrder, SortPlan, resolve_sort};
