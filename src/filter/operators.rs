//! Filter operators and predicate emission.
//!
//! Operators are a closed set, grouped by emission behavior so each group
//! only ever reaches its own emission path: comparisons bind a scalar,
//! set operators bind an array, pattern operators escape and wrap a string,
//! `json_contains` serializes its value, and `is`/`nis` handle the boolean
//! and null literals that must not be bound as parameters.
//!
//! Every user-supplied value is carried through `sea_query` as a bound
//! value, never interpolated into SQL text.

use sea_orm::Value;
use sea_orm::sea_query::{Alias, Expr, Func, LikeExpr, SimpleExpr};
use serde_json::Value as JsonValue;
use std::fmt;
use uuid::Uuid;

use crate::errors::SearchError;

/// Direct comparison operators (`=`, `!=`, `>`, `>=`, `<`, `<=`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
}

/// Set-membership operators (`IN`, `NOT IN`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOp {
    In,
    Nin,
}

/// String pattern operators (`LIKE` / `NOT LIKE` with wrapped patterns).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternOp {
    Contains,
    NotContains,
    StartsWith,
    EndsWith,
}

/// Boolean/null literal operators (`IS` / `IS NOT`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TruthOp {
    Is,
    Nis,
}

/// The closed set of operators accepted in filter conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    Compare(CompareOp),
    Set(SetOp),
    Pattern(PatternOp),
    JsonContains,
    Truth(TruthOp),
}

impl FilterOperator {
    /// Resolve an operator token from the filter grammar.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidOperator`] for any token outside the
    /// allowed set.
    pub fn parse(token: &str) -> Result<Self, SearchError> {
        let operator = match token {
            "eq" => Self::Compare(CompareOp::Eq),
            "neq" => Self::Compare(CompareOp::Neq),
            "gt" => Self::Compare(CompareOp::Gt),
            "gte" => Self::Compare(CompareOp::Gte),
            "lt" => Self::Compare(CompareOp::Lt),
            "lte" => Self::Compare(CompareOp::Lte),
            "in" => Self::Set(SetOp::In),
            "nin" => Self::Set(SetOp::Nin),
            "contains" => Self::Pattern(PatternOp::Contains),
            "not_contains" => Self::Pattern(PatternOp::NotContains),
            "starts_with" => Self::Pattern(PatternOp::StartsWith),
            "ends_with" => Self::Pattern(PatternOp::EndsWith),
            "json_contains" => Self::JsonContains,
            "is" => Self::Truth(TruthOp::Is),
            "nis" => Self::Truth(TruthOp::Nis),
            _ => {
                return Err(SearchError::InvalidOperator {
                    operator: token.to_owned(),
                });
            }
        };
        Ok(operator)
    }

    /// The grammar token for this operator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Compare(CompareOp::Eq) => "eq",
            Self::Compare(CompareOp::Neq) => "neq",
            Self::Compare(CompareOp::Gt) => "gt",
            Self::Compare(CompareOp::Gte) => "gte",
            Self::Compare(CompareOp::Lt) => "lt",
            Self::Compare(CompareOp::Lte) => "lte",
            Self::Set(SetOp::In) => "in",
            Self::Set(SetOp::Nin) => "nin",
            Self::Pattern(PatternOp::Contains) => "contains",
            Self::Pattern(PatternOp::NotContains) => "not_contains",
            Self::Pattern(PatternOp::StartsWith) => "starts_with",
            Self::Pattern(PatternOp::EndsWith) => "ends_with",
            Self::JsonContains => "json_contains",
            Self::Truth(TruthOp::Is) => "is",
            Self::Truth(TruthOp::Nis) => "nis",
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Emit exactly one predicate for a resolved field expression.
///
/// # Errors
///
/// Returns [`SearchError::InvalidOperatorValue`] when the value's shape
/// does not match the operator's contract.
pub fn apply_operator(
    field: SimpleExpr,
    operator: FilterOperator,
    value: &JsonValue,
) -> Result<SimpleExpr, SearchError> {
    match operator {
        FilterOperator::Compare(op) => compare(field, op, value),
        FilterOperator::Set(op) => set_membership(field, op, value),
        FilterOperator::Pattern(op) => pattern(field, op, value),
        FilterOperator::JsonContains => Ok(json_contains(field, value)),
        FilterOperator::Truth(op) => truth(field, op, value),
    }
}

fn compare(
    field: SimpleExpr,
    op: CompareOp,
    value: &JsonValue,
) -> Result<SimpleExpr, SearchError> {
    let bound = bind_value(value).ok_or_else(|| SearchError::InvalidOperatorValue {
        operator: FilterOperator::Compare(op).to_string(),
        expected: "a scalar value",
    })?;
    let column = Expr::expr(field);
    Ok(match op {
        CompareOp::Eq => column.eq(bound),
        CompareOp::Neq => column.ne(bound),
        CompareOp::Gt => column.gt(bound),
        CompareOp::Gte => column.gte(bound),
        CompareOp::Lt => column.lt(bound),
        CompareOp::Lte => column.lte(bound),
    })
}

fn set_membership(
    field: SimpleExpr,
    op: SetOp,
    value: &JsonValue,
) -> Result<SimpleExpr, SearchError> {
    let JsonValue::Array(items) = value else {
        return Err(SearchError::InvalidOperatorValue {
            operator: FilterOperator::Set(op).to_string(),
            expected: "an array of values",
        });
    };
    let mut values = Vec::with_capacity(items.len());
    for item in items {
        let bound = bind_value(item).ok_or_else(|| SearchError::InvalidOperatorValue {
            operator: FilterOperator::Set(op).to_string(),
            expected: "an array of scalar values",
        })?;
        values.push(bound);
    }
    let column = Expr::expr(field);
    Ok(match op {
        SetOp::In => column.is_in(values),
        SetOp::Nin => column.is_not_in(values),
    })
}

fn pattern(
    field: SimpleExpr,
    op: PatternOp,
    value: &JsonValue,
) -> Result<SimpleExpr, SearchError> {
    let JsonValue::String(text) = value else {
        return Err(SearchError::InvalidOperatorValue {
            operator: FilterOperator::Pattern(op).to_string(),
            expected: "a string value",
        });
    };
    let escaped = escape_like(text);
    let wrapped = match op {
        PatternOp::Contains | PatternOp::NotContains => format!("%{escaped}%"),
        PatternOp::StartsWith => format!("{escaped}%"),
        PatternOp::EndsWith => format!("%{escaped}"),
    };
    let like = LikeExpr::new(wrapped).escape('\\');
    let column = Expr::expr(field);
    Ok(match op {
        PatternOp::NotContains => column.not_like(like),
        _ => column.like(like),
    })
}

fn json_contains(field: SimpleExpr, value: &JsonValue) -> SimpleExpr {
    // Canonical JSON text form, bound as a value parameter.
    SimpleExpr::FunctionCall(
        Func::cust(Alias::new("JSON_CONTAINS"))
            .arg(field)
            .arg(Expr::val(value.to_string())),
    )
}

fn truth(field: SimpleExpr, op: TruthOp, value: &JsonValue) -> Result<SimpleExpr, SearchError> {
    let invalid = || SearchError::InvalidOperatorValue {
        operator: FilterOperator::Truth(op).to_string(),
        expected: "TRUE, FALSE or NULL",
    };
    let literal = match value {
        JsonValue::Bool(flag) => Some(*flag),
        JsonValue::Null => None,
        JsonValue::String(text) => match text.to_uppercase().as_str() {
            "TRUE" => Some(true),
            "FALSE" => Some(false),
            "NULL" => None,
            _ => return Err(invalid()),
        },
        _ => return Err(invalid()),
    };
    let column = Expr::expr(field);
    Ok(match (op, literal) {
        (TruthOp::Is, Some(flag)) => column.eq(flag),
        (TruthOp::Nis, Some(flag)) => column.ne(flag),
        (TruthOp::Is, None) => column.is_null(),
        (TruthOp::Nis, None) => column.is_not_null(),
    })
}

/// Escape SQL wildcard and escape characters so they match literally.
#[must_use]
pub fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Convert a filter value into a bound query value.
///
/// Strings that parse as UUIDs bind as UUIDs so that equality and set
/// filters work against UUID-typed columns. Arrays and objects have no
/// scalar binding and yield `None`.
pub(crate) fn bind_value(value: &JsonValue) -> Option<Value> {
    match value {
        JsonValue::Null => Some(Value::String(None)),
        JsonValue::Bool(flag) => Some(Value::from(*flag)),
        JsonValue::Number(number) => number
            .as_i64()
            .map(Value::from)
            .or_else(|| number.as_f64().map(Value::from)),
        JsonValue::String(text) => Some(match Uuid::parse_str(text) {
            Ok(id) => Value::from(id),
            Err(_) => Value::from(text.clone()),
        }),
        JsonValue::Array(_) | JsonValue::Object(_) => None,
    }
}
