//! Type-directed HCL literal formatting.
//!
//! [`format_value`] turns a loosely-typed JSON value into HCL literal text
//! according to a declared [`VarType`]. It never fails: a value whose shape
//! does not match its type degrades to an empty or default literal.

use serde_json::{Map, Value};

use tfgen_config::{ObjectKind, VarType, Variable};

/// Prefix marking a string as a reference expression rather than a literal.
pub const REFERENCE_PREFIX: &str = "var.";

/// Format `value` as an HCL literal for `ty`.
pub fn format_value(value: &Value, ty: &VarType) -> String {
    match ty {
        VarType::Bool | VarType::Number | VarType::Unknown(_) => scalar_text(value),
        VarType::String => match value.as_str() {
            Some(expr) if is_reference(expr) => expr.to_string(),
            _ => quote(&scalar_text(value)),
        },
        VarType::StringList => string_list(value),
        VarType::StringSet => format!("toset({})", string_list(value)),
        VarType::StringMap => string_map(value),
        VarType::Object(kind) => object(value, *kind),
        VarType::Tuple => tuple(value),
    }
}

/// Format `value` for a raw type tag.
pub fn format_typed(value: &Value, tag: &str) -> String {
    format_value(value, &VarType::parse(tag))
}

/// Format a variable's default using its declared type.
pub fn format_default(variable: &Variable) -> String {
    format_value(&variable.default, &variable.var_type)
}

fn is_reference(s: &str) -> bool {
    s.starts_with(REFERENCE_PREFIX)
}

/// Default stringification: strings raw, everything else as compact JSON.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn string_list(value: &Value) -> String {
    let items = match value.as_array() {
        Some(items) => items,
        None => return "[]".to_string(),
    };
    let quoted: Vec<String> = items.iter().map(|item| quote(&scalar_text(item))).collect();
    format!("[{}]", quoted.join(", "))
}

fn string_map(value: &Value) -> String {
    let entries = match value.as_object() {
        Some(entries) if !entries.is_empty() => entries,
        _ => return "{}".to_string(),
    };
    let pairs: Vec<String> = sorted(entries)
        .into_iter()
        .map(|(key, val)| format!("{} = {}", quote(key), quote(&scalar_text(val))))
        .collect();
    format!("{{ {} }}", pairs.join(", "))
}

fn object(value: &Value, kind: ObjectKind) -> String {
    if let Some(expr) = value.as_str().filter(|s| is_reference(s)) {
        return expr.to_string();
    }
    let fields = match value.as_object() {
        Some(fields) if !fields.is_empty() => fields,
        _ => return "{}".to_string(),
    };

    // Schema fields first, in declaration order, then anything extra.
    let schema = kind.schema();
    let mut pairs: Vec<String> = schema
        .fields
        .iter()
        .filter_map(|(name, _)| fields.get(*name).map(|val| field(name, val)))
        .collect();
    pairs.extend(
        sorted(fields)
            .into_iter()
            .filter(|(key, _)| !schema.fields.iter().any(|(name, _)| *name == key.as_str()))
            .map(|(key, val)| field(key, val)),
    );

    format!("{{ {} }}", pairs.join(", "))
}

fn field(key: &str, value: &Value) -> String {
    format!("{} = {}", key, item_literal(value))
}

fn tuple(value: &Value) -> String {
    match value.as_array() {
        Some(items) => {
            let items: Vec<String> = items.iter().map(item_literal).collect();
            format!("[{}]", items.join(", "))
        }
        None => "[]".to_string(),
    }
}

/// Strings quoted, other values as-is.
fn item_literal(value: &Value) -> String {
    match value {
        Value::String(s) => quote(s),
        other => scalar_text(other),
    }
}

fn sorted(entries: &Map<String, Value>) -> Vec<(&String, &Value)> {
    let mut pairs: Vec<_> = entries.iter().collect();
    pairs.sort_by(|a, b| a.0.cmp(b.0));
    pairs
}
