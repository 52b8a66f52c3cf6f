//! The operator registry.
//!
//! Every operator a filter node can carry belongs to exactly one family, and the
//! families never share a tag. A lot of the crate leans on that: classification
//! is a total function, and the synthesizer can pick "the first operator of the
//! first family" without ever checking for overlap. Keeping each family its own
//! enum (instead of one big operator soup) is what makes the guarantee free.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Combines child nodes, does not touch fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicalOp {
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NullableOp {
    IsNull,
    IsNotNull,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EqualOp {
    Eq,
    NotEq,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CmpOp {
    Gt,
    Gte,
    Lt,
    Lte,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InOp {
    In,
    NotIn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LikeOp {
    StartWith,
    Contains,
    EndWith,
}

/// Any operator, paired with the family it belongs to.
///
/// This is what the UI iterates over when rendering an operator dropdown, and
/// what the classifier reduces nodes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Logical(LogicalOp),
    Nullable(NullableOp),
    Equal(EqualOp),
    Cmp(CmpOp),
    In(InOp),
    Like(LikeOp),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperatorFamily {
    Logical,
    Nullable,
    Equal,
    Cmp,
    In,
    Like,
}

/// The order operator families are offered in when a field does not say
/// otherwise. Equality first, null checks and the fancier operators later.
pub const DEFAULT_FAMILY_ORDER: [OperatorFamily; 5] = [
    OperatorFamily::Equal,
    OperatorFamily::Cmp,
    OperatorFamily::Nullable,
    OperatorFamily::Like,
    OperatorFamily::In,
];

const LOGICAL_OPERATORS: [Operator; 2] = [
    Operator::Logical(LogicalOp::And),
    Operator::Logical(LogicalOp::Or),
];

const NULLABLE_OPERATORS: [Operator; 2] = [
    Operator::Nullable(NullableOp::IsNull),
    Operator::Nullable(NullableOp::IsNotNull),
];

const EQUAL_OPERATORS: [Operator; 2] = [
    Operator::Equal(EqualOp::Eq),
    Operator::Equal(EqualOp::NotEq),
];

const CMP_OPERATORS: [Operator; 4] = [
    Operator::Cmp(CmpOp::Gt),
    Operator::Cmp(CmpOp::Gte),
    Operator::Cmp(CmpOp::Lt),
    Operator::Cmp(CmpOp::Lte),
];

const IN_OPERATORS: [Operator; 2] = [Operator::In(InOp::In), Operator::In(InOp::NotIn)];

const LIKE_OPERATORS: [Operator; 3] = [
    Operator::Like(LikeOp::StartWith),
    Operator::Like(LikeOp::Contains),
    Operator::Like(LikeOp::EndWith),
];

impl Operator {
    pub fn family(self) -> OperatorFamily {
        match self {
            Operator::Logical(_) => OperatorFamily::Logical,
            Operator::Nullable(_) => OperatorFamily::Nullable,
            Operator::Equal(_) => OperatorFamily::Equal,
            Operator::Cmp(_) => OperatorFamily::Cmp,
            Operator::In(_) => OperatorFamily::In,
            Operator::Like(_) => OperatorFamily::Like,
        }
    }

    /// The text the UI shows for this operator.
    ///
    /// The product ships in Chinese, so most of these are Chinese. The equality
    /// and comparison operators read better as plain symbols.
    pub fn label(self) -> &'static str {
        match self {
            Operator::Logical(LogicalOp::And) => "并且",
            Operator::Logical(LogicalOp::Or) => "或者",
            Operator::Nullable(NullableOp::IsNull) => "空的",
            Operator::Nullable(NullableOp::IsNotNull) => "非空",
            Operator::Equal(EqualOp::Eq) => " = ",
            Operator::Equal(EqualOp::NotEq) => "≠",
            Operator::Cmp(CmpOp::Gt) => ">",
            Operator::Cmp(CmpOp::Gte) => "≥",
            Operator::Cmp(CmpOp::Lt) => "<",
            Operator::Cmp(CmpOp::Lte) => "≤",
            Operator::In(InOp::In) => "属于",
            Operator::In(InOp::NotIn) => "不属于",
            Operator::Like(LikeOp::StartWith) => "开始为",
            Operator::Like(LikeOp::Contains) => "包含",
            Operator::Like(LikeOp::EndWith) => "结束为",
        }
    }
}

impl OperatorFamily {
    /// Every operator in this family, in the order the UI offers them.
    /// The first entry doubles as the family's default operator.
    pub fn operators(self) -> &'static [Operator] {
        match self {
            OperatorFamily::Logical => &LOGICAL_OPERATORS,
            OperatorFamily::Nullable => &NULLABLE_OPERATORS,
            OperatorFamily::Equal => &EQUAL_OPERATORS,
            OperatorFamily::Cmp => &CMP_OPERATORS,
            OperatorFamily::In => &IN_OPERATORS,
            OperatorFamily::Like => &LIKE_OPERATORS,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            OperatorFamily::Logical => "Logical",
            OperatorFamily::Nullable => "Nullable",
            OperatorFamily::Equal => "Equal",
            OperatorFamily::Cmp => "Cmp",
            OperatorFamily::In => "In",
            OperatorFamily::Like => "Like",
        }
    }
}

impl Display for OperatorFamily {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
