//! Type registry for mapping metadata type names to TypeScript types.
//!
//! The registry provides a data-driven way to teach the generator how to
//! spell the primitive names used by the API documentation. Built-in
//! mappings are registered automatically, and users can add custom ones.

use std::collections::HashMap;

use crate::types::{ParamDescriptor, TypeRef};

/// A registry of metadata type name -> TypeScript type associations.
///
/// Lookups are case-insensitive. Names without a mapping are emitted
/// unchanged, which is how references to other API declarations
/// (`BrowserWindow`, `Rectangle`, ...) pass through.
///
/// # Built-in mappings
///
/// | Metadata type | TypeScript type |
/// |---------------|-----------------|
/// | `String`, `URL` | `string` |
/// | `Number`, `Integer`, `Double`, `Float` | `number` |
/// | `Boolean` | `boolean` |
/// | `Object`, `Any` | `any` |
/// | `Array` | `any[]` |
/// | `Buffer` | `Buffer` |
/// | `Promise` | `Promise<any>` |
/// | `Function` | `Function` |
/// | `undefined` | `void` |
///
/// # Custom mappings
///
/// ```
/// use electron_dts_codegen::DeclarationGenerator;
///
/// let mut generator = DeclarationGenerator::new();
/// generator.register_type("Color", "string");
/// assert_eq!(generator.registry().map_name("color"), "string");
/// ```
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    mappings: HashMap<String, String>,
}

impl TypeRegistry {
    /// Create an empty registry with no mappings.
    pub fn new() -> Self {
        Self {
            mappings: HashMap::new(),
        }
    }

    /// Create a registry pre-populated with the built-in mappings.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register_builtins();
        registry
    }

    /// Register all built-in mappings.
    pub fn register_builtins(&mut self) {
        for name in ["string", "url"] {
            self.register(name, "string");
        }
        for name in ["number", "integer", "double", "float"] {
            self.register(name, "number");
        }
        self.register("boolean", "boolean");
        self.register("object", "any");
        self.register("any", "any");
        self.register("array", "any[]");
        self.register("buffer", "Buffer");
        self.register("promise", "Promise<any>");
        self.register("function", "Function");
        self.register("undefined", "void");
    }

    /// Register a mapping. If one already exists for this name, it is replaced.
    pub fn register(&mut self, name: impl AsRef<str>, ts_type: impl Into<String>) {
        self.mappings
            .insert(name.as_ref().to_lowercase(), ts_type.into());
    }

    /// Look up the TypeScript type registered for a metadata type name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.mappings.get(&name.to_lowercase()).map(String::as_str)
    }

    /// Check if a type name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.mappings.contains_key(&name.to_lowercase())
    }

    /// Remove a type mapping.
    pub fn unregister(&mut self, name: &str) -> Option<String> {
        self.mappings.remove(&name.to_lowercase())
    }

    /// Map a single type name, handling `T[]` suffixes.
    pub fn map_name(&self, name: &str) -> String {
        let name = name.trim();
        if let Some(element) = name.strip_suffix("[]") {
            return array_of(&self.map_name(element));
        }
        if name.is_empty() {
            return "any".to_string();
        }
        match self.get(name) {
            Some(mapped) => mapped.to_string(),
            None => name.to_string(),
        }
    }

    /// Map a type reference; unions become `A | B`.
    pub fn map(&self, ty: &TypeRef) -> String {
        match ty {
            TypeRef::Name(name) => self.map_name(name),
            TypeRef::Union(members) => members
                .iter()
                .map(|member| self.map(member))
                .collect::<Vec<_>>()
                .join(" | "),
        }
    }

    /// Map the declared type of a value, honoring its `collection` flag.
    pub fn map_param(&self, param: &ParamDescriptor) -> String {
        let mapped = self.map(&param.ty);
        if param.collection {
            array_of(&mapped)
        } else {
            mapped
        }
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

/// Spell an array of `element`, parenthesizing unions and function types.
pub(crate) fn array_of(element: &str) -> String {
    if element.contains(" | ") || element.contains("=>") {
        format!("({element})[]")
    } else {
        format!("{element}[]")
    }
}
