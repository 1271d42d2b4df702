//! Recursive filter-tree evaluation.
//!
//! Walks a [`FilterExpression`] and produces one `sea_query` [`Condition`],
//! validating every referenced field against the caller's allow-lists
//! before any predicate is emitted. Each nested group becomes its own
//! bracketed predicate group, so operator precedence is always explicit.

use sea_orm::Condition;

use crate::errors::SearchError;
use crate::filter::expression::{FilterCondition, FilterExpression, LogicalOperator};
use crate::filter::fields::{field_expression, parse_field};
use crate::filter::operators::apply_operator;

/// The entity context a filter or sort is resolved against.
#[derive(Debug, Clone, Copy)]
pub struct FieldContext<'a> {
    /// Root alias used to qualify columns (the entity's table name)
    pub entity: &'a str,
    /// Fields directly owned by the root entity, eligible for filtering/sorting
    pub allowed_fields: &'a [&'a str],
    /// Dot-free relation names reachable via one-hop join
    pub joined_fields: &'a [&'a str],
}

impl FieldContext<'_> {
    pub(crate) fn permits(&self, root: &str) -> bool {
        self.allowed_fields.contains(&root) || self.joined_fields.contains(&root)
    }
}

/// Build the complete query condition for a filter expression.
///
/// # Errors
///
/// Returns the corresponding [`SearchError`] when a field is not in the
/// allow-lists, a field path is malformed, a value's shape does not match
/// its operator, or a logical group is empty. Errors are detected before
/// any query executes; a failed build leaves nothing partially applied.
pub fn build_filter_condition(
    filter: &FilterExpression,
    ctx: &FieldContext,
) -> Result<Condition, SearchError> {
    match filter {
        FilterExpression::Group { operator, children } => {
            if children.is_empty() {
                return Err(SearchError::InvalidExpression {
                    reason: "logical group requires at least one condition".to_owned(),
                });
            }
            let mut group = match operator {
                LogicalOperator::Or => Condition::any(),
                LogicalOperator::And | LogicalOperator::Not => Condition::all(),
            };
            for child in children {
                group = group.add(build_filter_condition(child, ctx)?);
            }
            Ok(if matches!(operator, LogicalOperator::Not) {
                group.not()
            } else {
                group
            })
        }
        FilterExpression::Condition(leaf) => build_leaf(leaf, ctx),
    }
}

fn build_leaf(leaf: &FilterCondition, ctx: &FieldContext) -> Result<Condition, SearchError> {
    let root = leaf.field.split('.').next().unwrap_or("");
    if !ctx.permits(root) {
        return Err(SearchError::FieldNotAllowed {
            field: leaf.field.clone(),
        });
    }
    let parsed = parse_field(&leaf.field, ctx.joined_fields)?;
    let predicate = apply_operator(field_expression(&parsed, ctx.entity), leaf.operator, &leaf.value)?;
    Ok(Condition::all().add(predicate))
}
