//! # searchcrate
//!
//! A generic filter, sort, and pagination engine for building search APIs
//! with Axum and Sea-ORM.
//!
//! A compact textual filter grammar
//! (`[or_|and_]{field}-{operator}-{value},...`) plus `page`/`limit` and
//! `sort_by`/`sort_order` query parameters are translated into a safe,
//! fully parameterized Sea-ORM query. Implement [`SearchableResource`] on a
//! model, declare which fields and one-hop relations are eligible, and the
//! provided `search` method does the rest:
//!
//! ```rust,ignore
//! use searchcrate::{SearchOptions, SearchableResource};
//!
//! async fn list_travels(
//!     State(db): State<DatabaseConnection>,
//!     Query(options): Query<SearchOptions>,
//! ) -> Result<Json<SearchResponse<Travel>>, SearchError> {
//!     let filter = options.filter_expression()?;
//!     let response =
//!         Travel::search(&db, filter.as_ref(), &options.pagination(), &options.sort()).await?;
//!     Ok(Json(response))
//! }
//! ```
//!
//! Every referenced field is validated against caller-declared allow-lists
//! before any query executes; all values are bound as query parameters.

pub mod errors;
pub mod filter;
pub mod models;
pub mod traits;

pub use errors::SearchError;
pub use filter::expression::{FilterCondition, FilterExpression, LogicalOperator};
pub use filter::operators::{CompareOp, FilterOperator, PatternOp, SetOp, TruthOp};
pub use filter::pagination::Pagination;
pub use filter::sort::{Sort, SortOrder};
pub use models::{SearchMeta, SearchOptions, SearchResponse};
pub use traits::{JoinedRelation, SearchableResource};
