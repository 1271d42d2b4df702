//! Filter expression tree and the compact filter grammar.
//!
//! The wire form is `[or_|and_]{field}-{operator}-{value},...`: a flat list
//! of conditions combined under a single logical operator. The JSON envelope
//! form (`{"and": [...]}` / `{"field": {"op": value}}`) supports arbitrary
//! nesting and is accepted via [`FilterExpression::from_json`].
//!
//! ```text
//! or_age-gt-18,name-contains-john
//!   -> Group { Or, [age gt 18, name contains "john"] }
//!
//! status-in-active|pending
//!   -> Group { And, [status in ["active", "pending"]] }
//! ```

use serde_json::Value as JsonValue;

use crate::errors::SearchError;
use crate::filter::operators::FilterOperator;

/// Logical combinators for filter expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOperator {
    And,
    Or,
    Not,
}

impl LogicalOperator {
    fn parse(token: &str) -> Option<Self> {
        match token {
            "and" => Some(Self::And),
            "or" => Some(Self::Or),
            "not" => Some(Self::Not),
            _ => None,
        }
    }
}

/// A single field-operator-value constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCondition {
    /// Dotted field path (`field`, `relation.field` or `field.jsonPath`)
    pub field: String,
    pub operator: FilterOperator,
    /// Scalar for most operators, array for `in`/`nin`
    pub value: JsonValue,
}

/// A parsed filter: either a leaf condition or a logical combination of
/// nested expressions. Built fresh per request, never shared or mutated.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpression {
    Group {
        operator: LogicalOperator,
        children: Vec<FilterExpression>,
    },
    Condition(FilterCondition),
}

impl FilterExpression {
    /// Parse the compact grammar. Empty or blank input yields `Ok(None)`
    /// (no constraint).
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidOperator`] when a condition's operator
    /// token is not in the allowed set. Field validation happens later,
    /// against the entity's allow-lists.
    pub fn parse(input: &str) -> Result<Option<Self>, SearchError> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }
        let (operator, conditions) = if let Some(rest) = input.strip_prefix("or_") {
            (LogicalOperator::Or, rest)
        } else if let Some(rest) = input.strip_prefix("and_") {
            (LogicalOperator::And, rest)
        } else {
            (LogicalOperator::And, input)
        };
        let children = conditions
            .split(',')
            .map(parse_condition)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Some(Self::Group { operator, children }))
    }

    /// Parse the JSON envelope form.
    ///
    /// A logical key (`and`/`or`/`not`) maps to an array of nested
    /// expressions; any other object is a leaf whose keys are fields and
    /// whose values map operators to operand values. A leaf with several
    /// fields, or several operators under one field, flattens into an `And`
    /// group. An empty object yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidExpression`] for malformed shapes and
    /// [`SearchError::InvalidOperator`] for unknown operator tokens.
    pub fn from_json(value: &JsonValue) -> Result<Option<Self>, SearchError> {
        let JsonValue::Object(map) = value else {
            return Err(SearchError::InvalidExpression {
                reason: "filter must be a JSON object".to_owned(),
            });
        };
        let Some((key, entry)) = map.iter().next() else {
            return Ok(None);
        };

        if let Some(operator) = LogicalOperator::parse(key) {
            let JsonValue::Array(items) = entry else {
                return Err(SearchError::InvalidExpression {
                    reason: format!("logical operator {key} requires an array of conditions"),
                });
            };
            let mut children = Vec::with_capacity(items.len());
            for item in items {
                if let Some(child) = Self::from_json(item)? {
                    children.push(child);
                }
            }
            if children.is_empty() {
                return Err(SearchError::InvalidExpression {
                    reason: format!("logical operator {key} requires at least one condition"),
                });
            }
            return Ok(Some(Self::Group { operator, children }));
        }

        let mut leaves = Vec::new();
        for (field, operators) in map {
            let JsonValue::Object(entries) = operators else {
                return Err(SearchError::InvalidExpression {
                    reason: format!("field {field} requires an operator object"),
                });
            };
            for (token, operand) in entries {
                let operator = FilterOperator::parse(token)?;
                leaves.push(Self::Condition(FilterCondition {
                    field: field.clone(),
                    operator,
                    value: operand.clone(),
                }));
            }
        }
        if leaves.len() == 1 {
            return Ok(leaves.pop());
        }
        Ok(Some(Self::Group {
            operator: LogicalOperator::And,
            children: leaves,
        }))
    }
}

fn parse_condition(condition: &str) -> Result<FilterExpression, SearchError> {
    // Split on the first two hyphens only; the value may contain hyphens.
    let mut parts = condition.splitn(3, '-');
    let field = parts.next().unwrap_or_default();
    let operator = FilterOperator::parse(parts.next().unwrap_or_default())?;
    let raw_value = parts.next().unwrap_or_default();
    let value = if matches!(operator, FilterOperator::Set(_)) {
        JsonValue::Array(raw_value.split('|').map(coerce_scalar).collect())
    } else {
        coerce_scalar(raw_value)
    };
    Ok(FilterExpression::Condition(FilterCondition {
        field: field.to_owned(),
        operator,
        value,
    }))
}

/// Numeric-looking values always coerce to numbers. This is lossy on
/// purpose: a literal numeric string can never be matched as a string
/// through this grammar.
fn coerce_scalar(raw: &str) -> JsonValue {
    if let Ok(int) = raw.parse::<i64>() {
        return JsonValue::from(int);
    }
    if let Ok(float) = raw.parse::<f64>() {
        if float.is_finite() {
            if let Some(number) = serde_json::Number::from_f64(float) {
                return JsonValue::Number(number);
            }
        }
    }
    JsonValue::from(raw)
}
