//! Validation for trees coming back from storage.
//!
//! The converter and the classifiers trust their input, and nodes built by
//! this crate are correct by construction. Storage is the one place trees
//! enter from outside that guarantee: the schema may have changed since the
//! filter was saved, or someone may have edited the file by hand. So we check
//! exactly once, here, when a tree crosses the ingestion boundary, and nowhere
//! else.
//!
//! This is a shape check. Whether a stored enum key still exists, or whether
//! an age of -3 makes sense, is not our problem.

use crate::filter::field::{FieldInfo, FieldName};
use crate::filter::operator::OperatorFamily;
use crate::filter::tree::FilterNode;
use crate::filter::value::ValueKind;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use thiserror::Error;

/// Everything that can be wrong with a persisted tree. Each variant names the
/// offending field so the message is actionable without a debugger.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidFilter {
    #[error("unknown field \"{0}\"")]
    UnknownField(String),
    #[error("field name {0:?} is not a valid identifier")]
    BadFieldName(String),
    #[error("operation {family} is not allowed on field \"{field}\"")]
    OperationNotAllowed {
        field: String,
        family: OperatorFamily,
    },
    #[error("field \"{0}\" is not nullable")]
    NotNullable(String),
    #[error("field \"{field}\" holds {expected} values, found {found}")]
    KindMismatch {
        field: String,
        expected: ValueKind,
        found: ValueKind,
    },
}

/// Walks a storage-form tree and checks every predicate against the schema.
/// The first problem found aborts the walk.
pub fn check_tree(
    node: &FilterNode,
    fields: &HashMap<FieldName, FieldInfo>,
) -> Result<(), crate::Error> {
    match node {
        FilterNode::Logical(_, children) => children
            .iter()
            .try_for_each(|child| check_tree(child, fields)),
        FilterNode::Nullable(_, field) => {
            let info = lookup(field, fields)?;

            // Null checks are gated by the nullable flag, not by the
            // operation list. A non-nullable column can never be null, so
            // offering the operator would be lying to the user.
            if !info.nullable {
                return Err(InvalidFilter::NotNullable(field.to_string()).into());
            }

            Ok(())
        }
        FilterNode::Equal(_, field, value) => {
            let info = lookup(field, fields)?;
            check_operation(info, OperatorFamily::Equal)?;
            check_kind(info, value.kind())
        }
        FilterNode::Cmp(_, field, value) => {
            let info = lookup(field, fields)?;
            check_operation(info, OperatorFamily::Cmp)?;
            check_kind(info, value.kind())
        }
        FilterNode::In(_, field, values) => {
            let info = lookup(field, fields)?;
            check_operation(info, OperatorFamily::In)?;
            check_kind(info, values.kind())
        }
        FilterNode::Like(_, field, _) => {
            let info = lookup(field, fields)?;
            check_operation(info, OperatorFamily::Like)
        }
    }
}

fn lookup<'a>(
    field: &FieldName,
    fields: &'a HashMap<FieldName, FieldInfo>,
) -> Result<&'a FieldInfo, crate::Error> {
    static FIELD_NAME_REGEX: Lazy<Regex> =
        Lazy::new(|| Regex::new("^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

    if !FIELD_NAME_REGEX.is_match(&field.0) {
        return Err(InvalidFilter::BadFieldName(field.to_string()).into());
    }

    fields
        .get(field)
        .ok_or_else(|| InvalidFilter::UnknownField(field.to_string()).into())
}

fn check_operation(info: &FieldInfo, family: OperatorFamily) -> Result<(), crate::Error> {
    if info.allows(family) {
        Ok(())
    } else {
        Err(InvalidFilter::OperationNotAllowed {
            field: info.name.to_string(),
            family,
        }
        .into())
    }
}

fn check_kind(info: &FieldInfo, found: ValueKind) -> Result<(), crate::Error> {
    let expected = info.value_kind();

    if expected == found {
        Ok(())
    } else {
        Err(InvalidFilter::KindMismatch {
            field: info.name.to_string(),
            expected,
            found,
        }
        .into())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::ErrorKind;
    use crate::filter::field::{field_info_map, FieldKind};
    use crate::filter::operator::{CmpOp, EqualOp, InOp, LikeOp, LogicalOp, NullableOp};
    use crate::filter::value::{ListValue, ScalarValue};

    fn schema() -> HashMap<FieldName, FieldInfo> {
        field_info_map(vec![
            FieldInfo {
                name: "age".into(),
                text: "年龄".to_string(),
                kind: FieldKind::Scalar(ValueKind::Int),
                nullable: false,
                operation: vec![OperatorFamily::Equal, OperatorFamily::Cmp],
            },
            FieldInfo {
                name: "name".into(),
                text: "姓名".to_string(),
                kind: FieldKind::Scalar(ValueKind::Str),
                nullable: true,
                operation: vec![
                    OperatorFamily::Equal,
                    OperatorFamily::Like,
                    OperatorFamily::In,
                ],
            },
        ])
    }

    fn expect_invalid(tree: FilterNode) -> InvalidFilter {
        let error = check_tree(&tree, &schema()).unwrap_err();

        match error.into_inner() {
            ErrorKind::InvalidFilter(invalid) => invalid,
            other => panic!("expected a validation failure, got {:?}", other),
        }
    }

    #[test]
    fn a_well_formed_tree_passes() {
        let tree = FilterNode::Logical(
            LogicalOp::And,
            vec![
                FilterNode::Cmp(CmpOp::Gte, "age".into(), ScalarValue::Int(18)),
                FilterNode::Logical(
                    LogicalOp::Or,
                    vec![
                        FilterNode::Nullable(NullableOp::IsNull, "name".into()),
                        FilterNode::Like(LikeOp::Contains, "name".into(), "山".to_string()),
                        FilterNode::In(
                            InOp::In,
                            "name".into(),
                            ListValue::Str(vec!["a".to_string()]),
                        ),
                    ],
                ),
            ],
        );

        assert!(check_tree(&tree, &schema()).is_ok());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let invalid = expect_invalid(FilterNode::Equal(
            EqualOp::Eq,
            "salary".into(),
            ScalarValue::Int(1),
        ));

        assert_eq!(InvalidFilter::UnknownField("salary".to_string()), invalid);
    }

    #[test]
    fn mangled_field_names_are_rejected_before_lookup() {
        let invalid = expect_invalid(FilterNode::Equal(
            EqualOp::Eq,
            "age; drop table users".into(),
            ScalarValue::Int(1),
        ));

        assert!(matches!(invalid, InvalidFilter::BadFieldName(_)));
    }

    #[test]
    fn kind_mismatches_are_rejected() {
        let invalid = expect_invalid(FilterNode::Cmp(
            CmpOp::Gt,
            "age".into(),
            ScalarValue::Str("18".to_string()),
        ));

        assert_eq!(
            InvalidFilter::KindMismatch {
                field: "age".to_string(),
                expected: ValueKind::Int,
                found: ValueKind::Str,
            },
            invalid
        );
    }

    #[test]
    fn list_kinds_are_checked_too() {
        let invalid = expect_invalid(FilterNode::In(
            InOp::In,
            "name".into(),
            ListValue::Int(vec![1]),
        ));

        assert!(matches!(invalid, InvalidFilter::KindMismatch { .. }));
    }

    #[test]
    fn disallowed_operations_are_rejected() {
        let invalid = expect_invalid(FilterNode::Like(
            LikeOp::StartWith,
            "age".into(),
            "1".to_string(),
        ));

        assert_eq!(
            InvalidFilter::OperationNotAllowed {
                field: "age".to_string(),
                family: OperatorFamily::Like,
            },
            invalid
        );
    }

    #[test]
    fn null_checks_require_the_nullable_flag() {
        let invalid = expect_invalid(FilterNode::Nullable(NullableOp::IsNull, "age".into()));

        assert_eq!(InvalidFilter::NotNullable("age".to_string()), invalid);
    }

    #[test]
    fn problems_are_found_deep_in_the_tree() {
        let tree = FilterNode::Logical(
            LogicalOp::And,
            vec![
                FilterNode::Cmp(CmpOp::Lt, "age".into(), ScalarValue::Int(65)),
                FilterNode::Logical(
                    LogicalOp::Or,
                    vec![FilterNode::Equal(
                        EqualOp::Eq,
                        "salary".into(),
                        ScalarValue::Int(0),
                    )],
                ),
            ],
        );

        let error = check_tree(&tree, &schema()).unwrap_err();

        assert!(matches!(
            error.into_inner(),
            ErrorKind::InvalidFilter(InvalidFilter::UnknownField(field)) if field == "salary"
        ));
    }
}
