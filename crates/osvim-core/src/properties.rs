//! Property collections supplied by the caller and the filtered result
//!
//! A collection comes in one of two shapes. A *flat* collection maps a name
//! straight to its value. A *typed* collection maps a name to a record with
//! a `type` tag; records tagged `key` describe a key pair and may be
//! addressed through `<name>_public` / `<name>_private` parameters.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Type tag of a key pair record
pub const KEY_TYPE: &str = "key";

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyCollection {
    Flat(BTreeMap<String, Value>),
    Typed(BTreeMap<String, TypedProperty>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypedProperty {
    Key(KeyProperty),
    Value { kind: String, value: Option<Value> },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyProperty {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<Value>,
}

impl PropertyCollection {
    /// Decode a collection from a JSON document, detecting its shape.
    ///
    /// The collection is typed only when it is non-empty and every entry is
    /// an object carrying a string `type` tag.
    pub fn from_json(document: Value) -> Result<Self> {
        match document {
            Value::Object(entries) => Ok(Self::from_entries(entries)),
            Value::Null => Ok(Self::Flat(BTreeMap::new())),
            other => Err(Error::InvalidProperties(format!(
                "expected a JSON object, found {}",
                json_kind(&other)
            ))),
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Self::from_json(serde_json::from_str(text)?)
    }

    fn from_entries(entries: Map<String, Value>) -> Self {
        let typed = !entries.is_empty() && entries.values().all(|v| type_tag(v).is_some());

        if typed {
            Self::Typed(
                entries
                    .into_iter()
                    .filter_map(|(name, record)| {
                        TypedProperty::from_record(record).map(|p| (name, p))
                    })
                    .collect(),
            )
        } else {
            Self::Flat(entries.into_iter().collect())
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Flat(props) => props.len(),
            Self::Typed(props) => props.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, name: &str) -> bool {
        match self {
            Self::Flat(props) => props.contains_key(name),
            Self::Typed(props) => props.contains_key(name),
        }
    }
}

impl TypedProperty {
    fn from_record(record: Value) -> Option<Self> {
        let Value::Object(mut fields) = record else {
            return None;
        };
        let kind = match fields.remove("type")? {
            Value::String(kind) => kind,
            _ => return None,
        };

        if kind == KEY_TYPE {
            Some(Self::Key(KeyProperty {
                key_name: fields.remove("keyName"),
                public_key: fields.remove("publicKey"),
                private_key: fields.remove("privateKey"),
            }))
        } else {
            Some(Self::Value {
                kind,
                value: fields.remove("value"),
            })
        }
    }

    pub fn value(kind: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Value {
            kind: kind.into(),
            value: Some(value.into()),
        }
    }

    pub fn kind(&self) -> &str {
        match self {
            Self::Key(_) => KEY_TYPE,
            Self::Value { kind, .. } => kind,
        }
    }

    pub fn as_key(&self) -> Option<&KeyProperty> {
        match self {
            Self::Key(key) => Some(key),
            Self::Value { .. } => None,
        }
    }
}

impl KeyProperty {
    pub fn new(key_name: impl Into<String>) -> Self {
        Self {
            key_name: Some(Value::String(key_name.into())),
            ..Self::default()
        }
    }

    pub fn with_public_key(mut self, public_key: impl Into<String>) -> Self {
        self.public_key = Some(Value::String(public_key.into()));
        self
    }

    pub fn with_private_key(mut self, private_key: impl Into<String>) -> Self {
        self.private_key = Some(Value::String(private_key.into()));
        self
    }
}

/// Template parameters the caller's properties resolved to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UsedProperties(BTreeMap<String, Value>);

impl UsedProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.0.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn into_inner(self) -> BTreeMap<String, Value> {
        self.0
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for UsedProperties {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

fn type_tag(record: &Value) -> Option<&str> {
    record.as_object()?.get("type")?.as_str()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
