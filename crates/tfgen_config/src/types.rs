//! Variable type tags.
//!
//! A variable's declared type is decoded once, when configuration is loaded,
//! into the closed [`VarType`] variant. Formatting and template helpers match
//! on it exhaustively instead of inspecting type strings at render time.
//!
//! The three fixed object shapes live in a small schema registry keyed by a
//! short identifier ([`ObjectKind::id`]). A tag may name a shape either by its
//! full HCL signature or by `object:<id>`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Primitive type of a field in a fixed object shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Bool,
    String,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Bool => "bool",
            FieldType::String => "string",
        }
    }
}

/// Field set of a fixed object shape.
#[derive(Debug)]
pub struct ObjectSchema {
    /// Short stable identifier.
    pub id: &'static str,
    /// Fields in declaration order.
    pub fields: &'static [(&'static str, FieldType)],
}

const VM_AGENT_CONFIG: ObjectSchema = ObjectSchema {
    id: "vm_agent_config",
    fields: &[
        ("provision_vm_agent", FieldType::Bool),
        ("enable_automatic_upgrades", FieldType::Bool),
    ],
};

const IMAGE_REFERENCE: ObjectSchema = ObjectSchema {
    id: "image_reference",
    fields: &[
        ("publisher", FieldType::String),
        ("offer", FieldType::String),
        ("sku", FieldType::String),
        ("version", FieldType::String),
    ],
};

const OS_DISK: ObjectSchema = ObjectSchema {
    id: "os_disk",
    fields: &[
        ("name", FieldType::String),
        ("caching", FieldType::String),
        ("create_option", FieldType::String),
        ("managed_disk_type", FieldType::String),
    ],
};

/// One of the recognized fixed object shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    VmAgentConfig,
    ImageReference,
    OsDisk,
}

impl ObjectKind {
    pub const ALL: [ObjectKind; 3] = [
        ObjectKind::VmAgentConfig,
        ObjectKind::ImageReference,
        ObjectKind::OsDisk,
    ];

    pub fn schema(&self) -> &'static ObjectSchema {
        match self {
            ObjectKind::VmAgentConfig => &VM_AGENT_CONFIG,
            ObjectKind::ImageReference => &IMAGE_REFERENCE,
            ObjectKind::OsDisk => &OS_DISK,
        }
    }

    pub fn id(&self) -> &'static str {
        self.schema().id
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }

    /// Canonical HCL type signature, e.g.
    /// `object({ publisher = string, offer = string, sku = string, version = string })`.
    pub fn signature(&self) -> String {
        let fields = self
            .schema()
            .fields
            .iter()
            .map(|(name, ty)| format!("{} = {}", name, ty.as_str()))
            .collect::<Vec<_>>()
            .join(", ");
        format!("object({{ {} }})", fields)
    }

    /// Match a full HCL signature, ignoring whitespace.
    pub fn from_signature(signature: &str) -> Option<Self> {
        let wanted = strip_whitespace(signature);
        Self::ALL
            .into_iter()
            .find(|kind| strip_whitespace(&kind.signature()) == wanted)
    }
}

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Declared type of a variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VarType {
    Bool,
    Number,
    String,
    StringList,
    StringSet,
    StringMap,
    Object(ObjectKind),
    Tuple,
    /// Tag outside the recognized set; formatted leniently.
    Unknown(String),
}

impl VarType {
    /// Decode a type tag. Never fails: unrecognized tags become [`VarType::Unknown`].
    pub fn parse(tag: &str) -> Self {
        let trimmed = tag.trim();
        match trimmed {
            "bool" => VarType::Bool,
            "number" => VarType::Number,
            "string" => VarType::String,
            "list(string)" => VarType::StringList,
            "set(string)" => VarType::StringSet,
            "map(string)" => VarType::StringMap,
            "tuple" => VarType::Tuple,
            _ => {
                if let Some(kind) = trimmed
                    .strip_prefix("object:")
                    .and_then(|id| ObjectKind::from_id(id.trim()))
                {
                    return VarType::Object(kind);
                }
                if trimmed.starts_with("object(") {
                    if let Some(kind) = ObjectKind::from_signature(trimmed) {
                        return VarType::Object(kind);
                    }
                }
                VarType::Unknown(tag.to_string())
            }
        }
    }

    /// HCL type expression for this tag, as written in `variables.tf`.
    pub fn signature(&self) -> String {
        match self {
            VarType::Bool => "bool".to_string(),
            VarType::Number => "number".to_string(),
            VarType::String => "string".to_string(),
            VarType::StringList => "list(string)".to_string(),
            VarType::StringSet => "set(string)".to_string(),
            VarType::StringMap => "map(string)".to_string(),
            VarType::Object(kind) => kind.signature(),
            VarType::Tuple => "tuple".to_string(),
            VarType::Unknown(tag) => tag.clone(),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, VarType::Unknown(_))
    }
}

impl From<String> for VarType {
    fn from(tag: String) -> Self {
        VarType::parse(&tag)
    }
}

impl From<&str> for VarType {
    fn from(tag: &str) -> Self {
        VarType::parse(tag)
    }
}

impl From<VarType> for String {
    fn from(ty: VarType) -> Self {
        ty.signature()
    }
}

impl fmt::Display for VarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.signature())
    }
}
