//! Sort parameter resolution.
//!
//! A sort field goes through the same dotted-path resolution and allow-list
//! validation as filter fields. Sorting on a JSON sub-path emits a computed
//! select column (the extraction aliased by a deterministic name) so the
//! `ORDER BY` can reference the alias instead of a bare function call.

use sea_orm::Order;
use sea_orm::sea_query::{Alias, Expr, SimpleExpr};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use crate::errors::SearchError;
use crate::filter::conditions::FieldContext;
use crate::filter::fields::{ParsedField, field_expression, join_alias, parse_field};

/// Sort direction, `ASC` by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    #[must_use]
    pub const fn into_order(self) -> Order {
        match self {
            Self::Asc => Order::Asc,
            Self::Desc => Order::Desc,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Requested sort; a missing `sort_by` falls back to the resource's
/// default sort field (its primary key).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sort {
    pub sort_by: Option<String>,
    pub sort_order: SortOrder,
}

/// The resolved plan for one `ORDER BY` clause.
#[derive(Debug, Clone)]
pub struct SortPlan {
    /// The sort field as it will be reported in response metadata
    pub field: String,
    /// Relation that must be left-joined before ordering, if any
    pub relation: Option<String>,
    /// Computed select column (expression and alias) for JSON sub-paths
    pub select: Option<(SimpleExpr, String)>,
    /// The expression the `ORDER BY` clause references
    pub order_by: SimpleExpr,
    pub order: Order,
}

/// Resolve a sort request against the entity context.
///
/// # Errors
///
/// Returns [`SearchError::InvalidSortField`] when the field's root segment
/// is not in the allow-lists, or [`SearchError::InvalidFieldPath`] when the
/// dotted path itself is malformed.
pub fn resolve_sort(
    sort: &Sort,
    ctx: &FieldContext,
    default_field: &str,
) -> Result<SortPlan, SearchError> {
    let sort_by = sort.sort_by.as_deref().unwrap_or(default_field);
    let root = sort_by.split('.').next().unwrap_or("");
    if !ctx.permits(root) {
        return Err(SearchError::InvalidSortField {
            field: sort_by.to_owned(),
        });
    }

    let parsed = parse_field(sort_by, ctx.joined_fields)?;
    let order = sort.sort_order.into_order();

    let (relation, select, order_by) = match &parsed {
        ParsedField::Column { .. } => (None, None, field_expression(&parsed, ctx.entity)),
        ParsedField::JsonPath { field, json_path } => {
            let alias = format!("{}_{}_{}", ctx.entity, field, json_path);
            let extraction = field_expression(&parsed, ctx.entity);
            let order_by = Expr::col(Alias::new(&alias)).into();
            (None, Some((extraction, alias)), order_by)
        }
        ParsedField::Related { relation, .. } => (
            Some(relation.clone()),
            None,
            field_expression(&parsed, ctx.entity),
        ),
        ParsedField::RelatedJsonPath {
            relation,
            field,
            json_path,
        } => {
            let alias = format!("{relation}_{field}_{json_path}");
            let extraction = field_expression(&parsed, ctx.entity);
            let order_by = Expr::col(Alias::new(&alias)).into();
            (Some(relation.clone()), Some((extraction, alias)), order_by)
        }
    };

    Ok(SortPlan {
        field: sort_by.to_owned(),
        relation,
        select,
        order_by,
        order,
    })
}

/// Deterministic alias for the join a related sort requires.
#[must_use]
pub fn sort_join_alias(entity: &str, relation: &str) -> String {
    join_alias(entity, relation)
}
