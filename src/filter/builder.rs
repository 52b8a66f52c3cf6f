//! Builds the default predicate the UI inserts when a user adds a condition or
//! switches a node to another field.
//!
//! The rule is simple: first operator of the first permitted family, holding
//! the field's empty default value. The caller decides the family order, so
//! the caller decides what "add condition" produces.

use crate::error::ConfigError;
use crate::filter::field::{FieldInfo, FieldKind};
use crate::filter::operator::{Operator, OperatorFamily};
use crate::filter::tree::FilterNode;
use crate::filter::value::ScalarValue;

/// Creates a new leaf predicate for `field`.
///
/// Never touches an existing tree. Splicing the result into a logical group's
/// children is the caller's job.
pub fn new_filter_node(
    field: &FieldInfo,
    permitted: &[OperatorFamily],
) -> Result<FilterNode, crate::Error> {
    let family = permitted.first().ok_or(ConfigError::NoPermittedOperator)?;
    let operator = family
        .operators()
        .first()
        .copied()
        .ok_or(ConfigError::NoPermittedOperator)?;

    let name = field.name.clone();

    let node = match operator {
        Operator::Nullable(op) => FilterNode::Nullable(op, name),
        Operator::In(op) => FilterNode::In(op, name, field.value_kind().empty_list()),
        Operator::Like(op) => FilterNode::Like(op, name, String::new()),
        Operator::Equal(op) => FilterNode::Equal(op, name, default_value(field)?),
        Operator::Cmp(op) => FilterNode::Cmp(op, name, default_value(field)?),
        Operator::Logical(_) => return Err(ConfigError::LogicalDefault.into()),
    };

    Ok(node)
}

/// What an equality or comparison predicate starts out holding. Enum fields
/// start on their first option so the value is immediately valid; scalar
/// fields start on the canonical empty value of their kind.
fn default_value(field: &FieldInfo) -> Result<ScalarValue, crate::Error> {
    match &field.kind {
        FieldKind::Scalar(kind) => Ok(kind.default_value()),
        FieldKind::Enum(options) => {
            let first = options
                .first()
                .ok_or_else(|| ConfigError::EmptyEnum(field.name.to_string()))?;

            Ok(ScalarValue::Str(first.key.clone()))
        }
    }
}
