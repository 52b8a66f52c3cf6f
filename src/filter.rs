//! Structured filter expressions, the logical half of a SQL `WHERE` clause.
//!
//! A filter is a tree: AND/OR groups over predicates on typed fields. The
//! crate keeps two isomorphic representations of that tree and converts
//! between them losslessly. [`FilterNode`] is the compact storage form that
//! gets persisted; [`EditNode`] is the form a tree widget edits, with a
//! stable id on every group child so the widget can key rendering on
//! identity instead of array position.
//!
//! What this module does not do: turn trees into SQL text, or run them
//! against data. Both live on the other side of the storage boundary.

/// Builds default predicate nodes for freshly added conditions.
mod builder;

/// Validates trees at the storage ingestion boundary.
mod check;

/// Field descriptors, the schema side of the model.
mod field;

/// The operator families and their display labels.
mod operator;

/// The two tree forms and the conversions between them.
mod tree;

/// Kind-tagged scalar and list values.
mod value;

pub use builder::new_filter_node;
pub use check::{check_tree, InvalidFilter};
pub use field::{field_info_map, EnumOption, FieldInfo, FieldKind, FieldName};
pub use operator::{
    CmpOp, EqualOp, InOp, LikeOp, LogicalOp, NullableOp, Operator, OperatorFamily,
    DEFAULT_FAMILY_ORDER,
};
pub use tree::{EditNode, FilterNode, KeyedChild};
pub use value::{ListValue, ScalarValue, ValueKind};
