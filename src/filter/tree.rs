//! The two tree representations of a filter expression.
//!
//! [`FilterNode`] is the storage form. It is what gets persisted and what the
//! rest of the backend understands, so it stays as compact as possible. On the
//! wire a node is an array starting with its operator tag, for example:
//!
//! ```text
//! ["And", [["Eq", "age", {"type": "Int", "value": 5}], ["IsNull", "name"]]]
//! ```
//!
//! [`EditNode`] is the editable form the tree widget works with. Same shape,
//! except every child of a logical group is wrapped in a [`KeyedChild`] that
//! carries an id the widget can key rendering on. The ids are positional and
//! regenerated on every conversion from storage form. They mean nothing
//! outside one editing session, which is why `EditNode` deliberately has no
//! serde derives: the editable form must never end up in storage.
//!
//! Both conversions allocate fresh trees and never fail. Nodes are plain
//! values, so "mutating" a tree always means building a new one.

use crate::filter::field::FieldName;
use crate::filter::operator::{
    CmpOp, EqualOp, InOp, LikeOp, LogicalOp, NullableOp, Operator, OperatorFamily,
};
use crate::filter::value::{ListValue, ScalarValue};
use serde::{Deserialize, Serialize};

/// A filter expression in storage form: a logical group over child nodes, or
/// one predicate on one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterNode {
    Logical(LogicalOp, Vec<FilterNode>),
    Nullable(NullableOp, FieldName),
    Equal(EqualOp, FieldName, ScalarValue),
    Cmp(CmpOp, FieldName, ScalarValue),
    In(InOp, FieldName, ListValue),
    Like(LikeOp, FieldName, String),
}

/// A filter expression mid-edit. See the module docs for how this differs
/// from [`FilterNode`].
#[derive(Debug, Clone, PartialEq)]
pub enum EditNode {
    Logical(LogicalOp, Vec<KeyedChild>),
    Nullable(NullableOp, FieldName),
    Equal(EqualOp, FieldName, ScalarValue),
    Cmp(CmpOp, FieldName, ScalarValue),
    In(InOp, FieldName, ListValue),
    Like(LikeOp, FieldName, String),
}

/// One child of a logical group, plus the id the widget keys it by.
///
/// Ids are unique within their sibling group only. Reordering or deleting
/// siblings keeps the surviving ids stable for the rest of the session, which
/// is all the widget needs.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedChild {
    pub id: usize,
    pub node: EditNode,
}

impl From<FilterNode> for EditNode {
    fn from(node: FilterNode) -> Self {
        match node {
            FilterNode::Logical(op, children) => {
                let children = children
                    .into_iter()
                    .enumerate()
                    .map(|(id, child)| KeyedChild {
                        id,
                        node: child.into(),
                    })
                    .collect();

                EditNode::Logical(op, children)
            }
            FilterNode::Nullable(op, field) => EditNode::Nullable(op, field),
            FilterNode::Equal(op, field, value) => EditNode::Equal(op, field, value),
            FilterNode::Cmp(op, field, value) => EditNode::Cmp(op, field, value),
            FilterNode::In(op, field, values) => EditNode::In(op, field, values),
            FilterNode::Like(op, field, pattern) => EditNode::Like(op, field, pattern),
        }
    }
}

impl From<EditNode> for FilterNode {
    fn from(node: EditNode) -> Self {
        match node {
            EditNode::Logical(op, children) => {
                let children = children
                    .into_iter()
                    .map(|child| child.node.into())
                    .collect();

                FilterNode::Logical(op, children)
            }
            EditNode::Nullable(op, field) => FilterNode::Nullable(op, field),
            EditNode::Equal(op, field, value) => FilterNode::Equal(op, field, value),
            EditNode::Cmp(op, field, value) => FilterNode::Cmp(op, field, value),
            EditNode::In(op, field, values) => FilterNode::In(op, field, values),
            EditNode::Like(op, field, pattern) => FilterNode::Like(op, field, pattern),
        }
    }
}

impl FilterNode {
    pub fn operator(&self) -> Operator {
        match self {
            FilterNode::Logical(op, _) => Operator::Logical(*op),
            FilterNode::Nullable(op, _) => Operator::Nullable(*op),
            FilterNode::Equal(op, _, _) => Operator::Equal(*op),
            FilterNode::Cmp(op, _, _) => Operator::Cmp(*op),
            FilterNode::In(op, _, _) => Operator::In(*op),
            FilterNode::Like(op, _, _) => Operator::Like(*op),
        }
    }

    pub fn family(&self) -> OperatorFamily {
        self.operator().family()
    }

    pub fn is_logical(&self) -> bool {
        self.family() == OperatorFamily::Logical
    }

    pub fn is_nullable(&self) -> bool {
        self.family() == OperatorFamily::Nullable
    }

    /// Equality and ordering predicates both edit a single scalar, so the UI
    /// treats them as one family when picking a value editor.
    pub fn is_comparable(&self) -> bool {
        matches!(self.family(), OperatorFamily::Equal | OperatorFamily::Cmp)
    }

    pub fn is_in(&self) -> bool {
        self.family() == OperatorFamily::In
    }

    pub fn is_like(&self) -> bool {
        self.family() == OperatorFamily::Like
    }
}

impl EditNode {
    pub fn operator(&self) -> Operator {
        match self {
            EditNode::Logical(op, _) => Operator::Logical(*op),
            EditNode::Nullable(op, _) => Operator::Nullable(*op),
            EditNode::Equal(op, _, _) => Operator::Equal(*op),
            EditNode::Cmp(op, _, _) => Operator::Cmp(*op),
            EditNode::In(op, _, _) => Operator::In(*op),
            EditNode::Like(op, _, _) => Operator::Like(*op),
        }
    }

    pub fn family(&self) -> OperatorFamily {
        self.operator().family()
    }

    pub fn is_logical(&self) -> bool {
        self.family() == OperatorFamily::Logical
    }

    pub fn is_nullable(&self) -> bool {
        self.family() == OperatorFamily::Nullable
    }

    pub fn is_comparable(&self) -> bool {
        matches!(self.family(), OperatorFamily::Equal | OperatorFamily::Cmp)
    }

    pub fn is_in(&self) -> bool {
        self.family() == OperatorFamily::In
    }

    pub fn is_like(&self) -> bool {
        self.family() == OperatorFamily::Like
    }
}
