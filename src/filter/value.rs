//! Tagged values. A value always knows its kind, both in memory and on the
//! wire, where it serializes as `{"type": "Int", "value": 5}`.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// The five scalar kinds a field or a value can have.
///
/// Dates travel as strings because the UI hands us whatever its date picker
/// produces. Unix timestamps are numeric seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueKind {
    Int,
    Num,
    Str,
    DateTime,
    UnixTimestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum ScalarValue {
    Int(i64),
    Num(f64),
    Str(String),
    DateTime(String),
    UnixTimestamp(u64),
}

/// A list of scalars of one kind. Only membership predicates carry these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum ListValue {
    Int(Vec<i64>),
    Num(Vec<f64>),
    Str(Vec<String>),
    DateTime(Vec<String>),
    UnixTimestamp(Vec<u64>),
}

impl ValueKind {
    /// The canonical empty value of this kind. This is what a freshly created
    /// predicate starts out with before the user types anything.
    pub fn default_value(self) -> ScalarValue {
        match self {
            ValueKind::Int => ScalarValue::Int(0),
            ValueKind::Num => ScalarValue::Num(0.0),
            ValueKind::Str => ScalarValue::Str(String::new()),
            ValueKind::DateTime => ScalarValue::DateTime(String::new()),
            ValueKind::UnixTimestamp => ScalarValue::UnixTimestamp(0),
        }
    }

    pub fn empty_list(self) -> ListValue {
        match self {
            ValueKind::Int => ListValue::Int(Vec::new()),
            ValueKind::Num => ListValue::Num(Vec::new()),
            ValueKind::Str => ListValue::Str(Vec::new()),
            ValueKind::DateTime => ListValue::DateTime(Vec::new()),
            ValueKind::UnixTimestamp => ListValue::UnixTimestamp(Vec::new()),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Int => "Int",
            ValueKind::Num => "Num",
            ValueKind::Str => "Str",
            ValueKind::DateTime => "DateTime",
            ValueKind::UnixTimestamp => "UnixTimestamp",
        }
    }
}

impl ScalarValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            ScalarValue::Int(_) => ValueKind::Int,
            ScalarValue::Num(_) => ValueKind::Num,
            ScalarValue::Str(_) => ValueKind::Str,
            ScalarValue::DateTime(_) => ValueKind::DateTime,
            ScalarValue::UnixTimestamp(_) => ValueKind::UnixTimestamp,
        }
    }
}

impl ListValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            ListValue::Int(_) => ValueKind::Int,
            ListValue::Num(_) => ValueKind::Num,
            ListValue::Str(_) => ValueKind::Str,
            ListValue::DateTime(_) => ValueKind::DateTime,
            ListValue::UnixTimestamp(_) => ValueKind::UnixTimestamp,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ListValue::Int(values) => values.len(),
            ListValue::Num(values) => values.len(),
            ListValue::Str(values) => values.len(),
            ListValue::DateTime(values) => values.len(),
            ListValue::UnixTimestamp(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
