//! Field descriptors. The schema collaborator hands us one of these per
//! filterable column; everything else in the crate treats them as read-only.

use crate::filter::operator::OperatorFamily;
use crate::filter::value::ValueKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldName(pub String);

/// One selectable option of an enum-typed field. `key` is what gets stored,
/// `text` is what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumOption {
    pub key: String,
    pub text: String,
}

/// A field is either one of the scalar kinds, or an enumeration of named
/// options. Enum fields are string-typed under the hood: what gets stored is
/// always an option key, never an index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldKind {
    Scalar(ValueKind),
    Enum(Vec<EnumOption>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldInfo {
    pub name: FieldName,
    /// Display text for the field picker.
    pub text: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(default)]
    pub nullable: bool,
    /// Which operator families this field offers, in the order the UI should
    /// list them. The first family provides the default operator for new
    /// predicates.
    pub operation: Vec<OperatorFamily>,
}

impl FieldInfo {
    /// The kind values for this field actually have. Enum fields store option
    /// keys, so they are strings no matter what the options describe.
    pub fn value_kind(&self) -> ValueKind {
        match &self.kind {
            FieldKind::Scalar(kind) => *kind,
            FieldKind::Enum(_) => ValueKind::Str,
        }
    }

    pub fn allows(&self, family: OperatorFamily) -> bool {
        self.operation.contains(&family)
    }
}

pub fn field_info_map(infos: Vec<FieldInfo>) -> HashMap<FieldName, FieldInfo> {
    infos
        .into_iter()
        .map(|info| (info.name.clone(), info))
        .collect()
}

impl<T: Into<String>> From<T> for FieldName {
    fn from(name: T) -> FieldName {
        FieldName(name.into())
    }
}

impl PartialEq<&str> for FieldName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Display for FieldName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn enum_fields_are_string_typed() {
        let status = FieldInfo {
            name: "status".into(),
            text: "状态".to_string(),
            kind: FieldKind::Enum(vec![
                EnumOption {
                    key: "Active".to_string(),
                    text: "启用".to_string(),
                },
                EnumOption {
                    key: "Disabled".to_string(),
                    text: "停用".to_string(),
                },
            ]),
            nullable: false,
            operation: vec![OperatorFamily::Equal],
        };

        assert_eq!(ValueKind::Str, status.value_kind());
    }

    #[test]
    fn scalar_field_from_json() {
        let json = r#"{
            "name": "age",
            "text": "年龄",
            "type": "Int",
            "operation": ["Equal", "Cmp"]
        }"#;

        let field: FieldInfo = serde_json::from_str(json).unwrap();

        assert_eq!(field.name, "age");
        assert_eq!(ValueKind::Int, field.value_kind());
        // nullable was not given, it defaults to off
        assert!(!field.nullable);
        assert!(field.allows(OperatorFamily::Cmp));
        assert!(!field.allows(OperatorFamily::Like));
    }

    #[test]
    fn enum_field_from_json() {
        let json = r#"{
            "name": "status",
            "text": "状态",
            "type": [{"key": "Active", "text": "启用"}],
            "nullable": true,
            "operation": ["Equal", "In"]
        }"#;

        let field: FieldInfo = serde_json::from_str(json).unwrap();

        assert!(matches!(&field.kind, FieldKind::Enum(options) if options.len() == 1));
        assert_eq!(ValueKind::Str, field.value_kind());
        assert!(field.nullable);
    }

    #[test]
    fn map_is_keyed_by_name() {
        let fields = vec![
            FieldInfo {
                name: "age".into(),
                text: "年龄".to_string(),
                kind: FieldKind::Scalar(ValueKind::Int),
                nullable: false,
                operation: vec![OperatorFamily::Cmp],
            },
            FieldInfo {
                name: "name".into(),
                text: "姓名".to_string(),
                kind: FieldKind::Scalar(ValueKind::Str),
                nullable: true,
                operation: vec![OperatorFamily::Equal, OperatorFamily::Like],
            },
        ];

        let map = field_info_map(fields);

        assert_eq!(2, map.len());
        assert_eq!("年龄", map[&FieldName::from("age")].text);
    }
}
