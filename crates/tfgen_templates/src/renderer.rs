//! Template rendering.
//!
//! Wraps a minijinja environment whose loader resolves `<group>/<name>`
//! through a [`TemplateSource`]. Undefined context keys are a render error.

use std::sync::Arc;

use minijinja::value::{Value, ValueKind, ViaDeserialize};
use minijinja::{Environment, ErrorKind, UndefinedBehavior};
use serde::Serialize;
use tracing::debug;

use tfgen_config::Variable;

use crate::error::{TemplateError, TemplateResult};
use crate::format;
use crate::source::{TemplateId, TemplateSource};

/// Renders templates from a [`TemplateSource`] with the HCL helper functions installed.
pub struct TemplateRenderer {
    env: Environment<'static>,
}

impl TemplateRenderer {
    /// Create a renderer over `source`.
    pub fn new(source: impl TemplateSource + 'static) -> Self {
        Self::from_shared(Arc::new(source))
    }

    pub fn from_shared(source: Arc<dyn TemplateSource>) -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);

        env.set_loader(move |name| {
            let id = match TemplateId::parse(name) {
                Some(id) => id,
                None => return Ok(None),
            };
            source
                .load(&id)
                .map_err(|e| minijinja::Error::new(ErrorKind::InvalidOperation, e.to_string()))
        });

        register_helpers(&mut env);
        Self { env }
    }

    /// Render the template `id` against `context`.
    pub fn render<S: Serialize>(&self, id: &TemplateId, context: S) -> TemplateResult<String> {
        let name = id.qualified();
        debug!("Rendering template {}", name);

        let template = self
            .env
            .get_template(&name)
            .map_err(|e| TemplateError::from_engine(&name, e))?;
        template
            .render(context)
            .map_err(|e| TemplateError::from_engine(&name, e))
    }

    /// Render ad-hoc template text with the same helpers.
    pub fn render_str<S: Serialize>(&self, name: &str, source: &str, context: S) -> TemplateResult<String> {
        self.env
            .render_named_str(name, source, context)
            .map_err(|e| TemplateError::from_engine(name, e))
    }
}

fn register_helpers(env: &mut Environment<'static>) {
    env.add_function("title", title);
    env.add_function("add", add);
    env.add_function("to_json", to_json);
    env.add_function("coalesce", coalesce);
    env.add_function("type_of", type_of);
    env.add_function("format_value", format_value);
    env.add_function("format_default", format_default);
}

/// Upper-case the first letter of each word, lower-case the rest.
///
/// Any character that is not alphanumeric or `_` ends a word.
fn title(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_alphanumeric() || c == '_' {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

fn add(a: i64, b: i64) -> Result<i64, minijinja::Error> {
    a.checked_add(b).ok_or_else(|| {
        minijinja::Error::new(
            ErrorKind::InvalidOperation,
            format!("add({}, {}) overflows", a, b),
        )
    })
}

fn to_json(value: Value) -> String {
    serde_json::to_string(&value).unwrap_or_else(|_| "null".to_string())
}

fn coalesce(a: Value, b: Value) -> Value {
    if a.is_none() || a.is_undefined() {
        b
    } else {
        a
    }
}

fn type_of(value: Value) -> String {
    let kind = match value.kind() {
        ValueKind::String => "string",
        ValueKind::Bool => "bool",
        ValueKind::Number => "number",
        ValueKind::Seq => "list",
        ValueKind::Map if is_string_map(&value) => "map(string)",
        ValueKind::Map => "map",
        _ => "any",
    };
    kind.to_string()
}

/// Non-empty map whose values are all strings.
fn is_string_map(value: &Value) -> bool {
    let keys = match value.try_iter() {
        Ok(keys) => keys,
        Err(_) => return false,
    };
    let mut any = false;
    for key in keys {
        match value.get_item(&key) {
            Ok(item) if item.kind() == ValueKind::String => any = true,
            _ => return false,
        }
    }
    any
}

fn format_value(value: ViaDeserialize<serde_json::Value>, tag: &str) -> String {
    format::format_typed(&value.0, tag)
}

fn format_default(variable: ViaDeserialize<Variable>) -> String {
    format::format_default(&variable.0)
}
