//! Extension schema metadata.
//!
//! Extensions are named attribute tables attached to network elements,
//! managed by the engine independently of core topology data. The engine
//! publishes a registry describing each extension type; the registry is
//! introspection only and is not enforced when reading or writing rows.

use serde::{Deserialize, Serialize};

/// Attribute value type, as declared by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeType {
    String,
    Int,
    Float,
    Bool,
}

/// One attribute of an extension type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSpec {
    pub name: String,
    pub kind: AttributeType,
}

impl AttributeSpec {
    pub fn new(name: impl Into<String>, kind: AttributeType) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Schema of one extension type: a human-readable description plus the
/// ordered attribute list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionSchema {
    pub name: String,
    pub description: String,
    pub attributes: Vec<AttributeSpec>,
}

impl ExtensionSchema {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        attributes: Vec<AttributeSpec>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            attributes,
        }
    }
}
