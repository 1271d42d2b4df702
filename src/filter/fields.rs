//! Dotted field-path resolution.
//!
//! The same dotted syntax addresses plain columns, joined-relation columns
//! and JSON sub-keys. Resolution is driven entirely by the caller-supplied
//! joined-relation list; relation-ness is never inferred from naming.

use sea_orm::sea_query::{Alias, Expr, Func, SimpleExpr};

use crate::errors::SearchError;

/// A dotted field path resolved against the entity's columns, its joined
/// relations and JSON sub-paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedField {
    /// A column on the root entity
    Column { field: String },
    /// A JSON key inside a JSON-typed column on the root entity
    JsonPath { field: String, json_path: String },
    /// A column on a joined relation
    Related { relation: String, field: String },
    /// A JSON key inside a JSON-typed column on a joined relation
    RelatedJsonPath {
        relation: String,
        field: String,
        json_path: String,
    },
}

/// Resolve a dotted field path.
///
/// Rules, in order: one segment is a plain column; two segments whose root
/// is a known relation address that relation's column, otherwise the root
/// is treated as a JSON column and the second segment as a JSON key; three
/// segments require a known relation root and address a JSON key on the
/// relation's column.
///
/// # Errors
///
/// Returns [`SearchError::InvalidFieldPath`] for any other shape.
pub fn parse_field(path: &str, joined_fields: &[&str]) -> Result<ParsedField, SearchError> {
    let parts: Vec<&str> = path.split('.').collect();
    match parts.as_slice() {
        [field] => Ok(ParsedField::Column {
            field: (*field).to_owned(),
        }),
        [root, field] if joined_fields.contains(root) => Ok(ParsedField::Related {
            relation: (*root).to_owned(),
            field: (*field).to_owned(),
        }),
        [field, json_path] => Ok(ParsedField::JsonPath {
            field: (*field).to_owned(),
            json_path: (*json_path).to_owned(),
        }),
        [root, field, json_path] if joined_fields.contains(root) => {
            Ok(ParsedField::RelatedJsonPath {
                relation: (*root).to_owned(),
                field: (*field).to_owned(),
                json_path: (*json_path).to_owned(),
            })
        }
        _ => Err(SearchError::InvalidFieldPath {
            path: path.to_owned(),
        }),
    }
}

/// Build the fully qualified SQL expression for a resolved field.
///
/// Joined columns are addressed through the deterministic join alias
/// produced by [`join_alias`]; JSON sub-paths wrap the column in a
/// `JSON_EXTRACT` call with the path bound as a value.
#[must_use]
pub fn field_expression(parsed: &ParsedField, entity: &str) -> SimpleExpr {
    match parsed {
        ParsedField::Column { field } => qualified_col(entity, field),
        ParsedField::JsonPath { field, json_path } => {
            json_extract(qualified_col(entity, field), json_path)
        }
        ParsedField::Related { relation, field } => {
            qualified_col(&join_alias(entity, relation), field)
        }
        ParsedField::RelatedJsonPath {
            relation,
            field,
            json_path,
        } => json_extract(qualified_col(&join_alias(entity, relation), field), json_path),
    }
}

/// Deterministic alias for a one-hop left join.
#[must_use]
pub fn join_alias(entity: &str, relation: &str) -> String {
    format!("{entity}_{relation}")
}

fn qualified_col(table: &str, column: &str) -> SimpleExpr {
    Expr::col((Alias::new(table), Alias::new(column))).into()
}

fn json_extract(column: SimpleExpr, json_path: &str) -> SimpleExpr {
    SimpleExpr::FunctionCall(
        Func::cust(Alias::new("JSON_EXTRACT"))
            .arg(column)
            .arg(Expr::val(format!("$.{json_path}"))),
    )
}
