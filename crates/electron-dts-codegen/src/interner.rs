//! Structural interning of anonymous object shapes.
//!
//! Object-typed parameters, event arguments, return values and structure
//! properties are emitted as named interfaces. Two shapes with the same
//! canonical signature share one interface: the first occurrence picks the
//! name and the body, later ones only get a reference back.
//!
//! The canonical signature is the field list sorted by name, each field
//! contributing `(name, type, optionality)`; nested object fields contribute
//! their own signature rather than an interned name, so signatures do not
//! depend on interning order. Descriptions never participate.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use tracing::trace;

use crate::registry::TypeRegistry;
use crate::types::ParamDescriptor;

/// A named interface produced by interning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceDefinition {
    pub name: String,
    /// Body lines without indentation, each statement ending in `;`.
    pub lines: Vec<String>,
}

impl InterfaceDefinition {
    pub fn header(&self) -> String {
        format!("interface {} {{", self.name)
    }
}

/// Cache of interned shapes for one generation run.
#[derive(Debug, Default)]
pub struct InterfaceInterner {
    by_signature: HashMap<String, String>,
    definitions: IndexMap<String, Vec<String>>,
    /// Names owned by other declarations (module blocks, prelude types).
    reserved: HashSet<String>,
}

impl InterfaceInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep interned interfaces from taking any of `names`.
    pub fn reserve<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reserved.extend(names.into_iter().map(Into::into));
    }

    /// The interface already interned for `signature`, if any.
    pub fn lookup(&self, signature: &str) -> Option<&str> {
        self.by_signature.get(signature).map(String::as_str)
    }

    /// Pick a free name for a new shape and bind `signature` to it.
    ///
    /// The candidate is `seed + suffix`; when that is taken the `fallback`
    /// prefix is tried, and after that a numeric counter is appended to the
    /// first candidate. The name is claimed immediately so that nested
    /// shapes interned while rendering the body cannot take it.
    pub fn claim(&mut self, signature: String, seed: &str, fallback: &str, suffix: &str) -> String {
        let mut primary = format!("{seed}{suffix}");
        if primary.is_empty() {
            primary = "Anonymous".to_string();
        }

        let name = if !self.is_taken(&primary) {
            primary
        } else if !fallback.is_empty() && !self.is_taken(&format!("{fallback}{suffix}")) {
            format!("{fallback}{suffix}")
        } else {
            (2..)
                .map(|n| format!("{primary}{n}"))
                .find(|candidate| !self.is_taken(candidate))
                .unwrap_or_default()
        };

        trace!(name = %name, signature = %signature, "interned new object shape");
        self.by_signature.insert(signature, name.clone());
        self.definitions.insert(name.clone(), Vec::new());
        name
    }

    /// Store the body of a previously claimed name.
    pub fn define(&mut self, name: &str, lines: Vec<String>) {
        self.definitions.insert(name.to_string(), lines);
    }

    pub fn is_taken(&self, name: &str) -> bool {
        self.definitions.contains_key(name) || self.reserved.contains(name)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Interned interfaces in the order they were first claimed.
    pub fn into_definitions(self) -> Vec<InterfaceDefinition> {
        self.definitions
            .into_iter()
            .map(|(name, lines)| InterfaceDefinition { name, lines })
            .collect()
    }
}

/// Canonical structural signature of an object shape's fields.
pub fn shape_signature(registry: &TypeRegistry, fields: &[ParamDescriptor]) -> String {
    let mut entries: Vec<String> = fields
        .iter()
        .map(|field| field_signature(registry, field))
        .collect();
    entries.sort();
    format!("{{{}}}", entries.join(";"))
}

fn field_signature(registry: &TypeRegistry, field: &ParamDescriptor) -> String {
    let optional = if field.is_optional() { "?" } else { "" };
    format!("{}{}:{}", field.name, optional, type_signature(registry, field))
}

fn type_signature(registry: &TypeRegistry, value: &ParamDescriptor) -> String {
    let base = if !value.possible_values.is_empty() {
        value
            .possible_values
            .iter()
            .map(|v| format!("'{}'", v.value))
            .collect::<Vec<_>>()
            .join("|")
    } else if value.is_object_shape() {
        shape_signature(registry, &value.properties)
    } else if value.is_function() && (!value.parameters.is_empty() || value.returns.is_some()) {
        let params: Vec<String> = value
            .parameters
            .iter()
            .map(|p| field_signature(registry, p))
            .collect();
        let returns = value
            .returns
            .as_deref()
            .map(|r| type_signature(registry, r))
            .unwrap_or_else(|| "void".to_string());
        format!("({})=>{}", params.join(","), returns)
    } else {
        registry.map(&value.ty)
    };

    if value.collection {
        format!("{base}[]")
    } else {
        base
    }
}
