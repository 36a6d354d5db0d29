//! API metadata model consumed by the declaration generator.
//!
//! The shapes mirror the JSON produced by the Electron API documentation
//! parser. Every list is optional in the source data; absent and `null`
//! lists both deserialize to an empty `Vec`.

use serde::{Deserialize, Deserializer};

use crate::text::upper_first;

/// The declaration flavour of a module descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum ModuleKind {
    Class,
    #[default]
    Module,
    Structure,
}

/// The execution contexts a module is available in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct ProcessAvailability {
    #[serde(default)]
    pub main: bool,
    #[serde(default)]
    pub renderer: bool,
}

impl ProcessAvailability {
    pub fn new(main: bool, renderer: bool) -> Self {
        Self { main, renderer }
    }
}

/// A type reference as written in the metadata: either a single type name
/// (`"String"`, `"BrowserWindow[]"`) or a union of references.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TypeRef {
    Name(String),
    Union(Vec<TypeRef>),
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Name(name.into())
    }

    /// Case-insensitive check against a plain type name.
    pub fn is_named(&self, name: &str) -> bool {
        matches!(self, TypeRef::Name(n) if n.eq_ignore_ascii_case(name))
    }
}

impl Default for TypeRef {
    fn default() -> Self {
        TypeRef::Name("any".to_string())
    }
}

/// One allowed value of a string-enumerated parameter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PossibleValue {
    pub value: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// A typed value: a parameter, a property, an event argument or a return
/// value. Object-shaped values carry their fields in `properties`, function
/// values their signature in `parameters`/`returns`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamDescriptor {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub ty: TypeRef,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub required: Option<bool>,
    #[serde(default)]
    pub collection: bool,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub properties: Vec<ParamDescriptor>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub parameters: Vec<ParamDescriptor>,
    #[serde(default)]
    pub returns: Option<Box<ParamDescriptor>>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub possible_values: Vec<PossibleValue>,
}

impl ParamDescriptor {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: TypeRef::named(ty),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn with_properties(mut self, properties: Vec<ParamDescriptor>) -> Self {
        self.properties = properties;
        self
    }

    /// Whether this value may be omitted.
    ///
    /// An explicit `required` flag wins; otherwise the value is optional when
    /// its description mentions the word "optional".
    pub fn is_optional(&self) -> bool {
        if let Some(required) = self.required {
            return !required;
        }
        self.description
            .as_deref()
            .is_some_and(|d| d.to_ascii_lowercase().contains("optional"))
    }

    /// A plain `Object` that declares at least one field.
    pub fn is_object_shape(&self) -> bool {
        self.ty.is_named("Object") && !self.properties.is_empty()
    }

    pub fn is_function(&self) -> bool {
        self.ty.is_named("Function")
    }
}

/// A method, static method or instance method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodDescriptor {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub parameters: Vec<ParamDescriptor>,
    #[serde(default)]
    pub returns: Option<ParamDescriptor>,
}

impl MethodDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_parameters(mut self, parameters: Vec<ParamDescriptor>) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_returns(mut self, returns: ParamDescriptor) -> Self {
        self.returns = Some(returns);
        self
    }
}

/// A class constructor. It has no name of its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstructorDescriptor {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub parameters: Vec<ParamDescriptor>,
}

/// An event. Its `returns` are the arguments passed to listeners.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDescriptor {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub returns: Vec<ParamDescriptor>,
}

impl EventDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// One API surface unit: a module, a class or a structure.
///
/// Descriptors whose names are equal ignoring case describe the same
/// logical entity (typically the static and instance halves of a class).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDescriptor {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: ModuleKind,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub website_url: String,
    #[serde(default)]
    pub process: Option<ProcessAvailability>,
    #[serde(default)]
    pub constructor_method: Option<ConstructorDescriptor>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub static_methods: Vec<MethodDescriptor>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub methods: Vec<MethodDescriptor>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub instance_methods: Vec<MethodDescriptor>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub instance_properties: Vec<ParamDescriptor>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub properties: Vec<ParamDescriptor>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub events: Vec<EventDescriptor>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub instance_events: Vec<EventDescriptor>,
}

impl ModuleDescriptor {
    pub fn new(name: impl Into<String>, kind: ModuleKind) -> Self {
        Self {
            name: name.into(),
            kind,
            ..Self::default()
        }
    }

    pub fn with_process(mut self, main: bool, renderer: bool) -> Self {
        self.process = Some(ProcessAvailability::new(main, renderer));
        self
    }

    /// Case-insensitive identity key.
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }

    /// The name used for the emitted declaration.
    pub fn declaration_name(&self) -> String {
        upper_first(&self.name)
    }

    pub fn is_structure(&self) -> bool {
        self.kind == ModuleKind::Structure
    }
}

/// Member descriptors that can be ordered by name.
pub(crate) trait Named {
    fn name(&self) -> &str;
}

impl Named for MethodDescriptor {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for EventDescriptor {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for ParamDescriptor {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Borrow `items` sorted by name (byte-wise, so case-sensitive). The sort is
/// stable, so equal names keep their input order.
pub(crate) fn sorted_by_name<'a, T: Named>(items: impl IntoIterator<Item = &'a T>) -> Vec<&'a T>
where
    T: 'a,
{
    let mut sorted: Vec<&T> = items.into_iter().collect();
    sorted.sort_by(|a, b| a.name().cmp(b.name()));
    sorted
}

fn nullable_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
