//! Per-module declaration blocks.
//!
//! Every descriptor is folded into the block of its case-insensitive name.
//! The first descriptor to reach a block writes its header; all of them
//! append members. Within each member list the output is sorted by name so
//! regenerating from reordered metadata produces the same text.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{Error, Result};
use crate::signature::{MemberContext, SignatureSynthesizer, optional_marker};
use crate::text::wrap_comment;
use crate::types::{
    MethodDescriptor, ModuleDescriptor, ModuleKind, ParamDescriptor, sorted_by_name,
};

/// Modules that never emit events, so their declarations do not extend the
/// event emitter base.
pub const DEFAULT_NON_EMITTERS: &[&str] = &[
    "menuitem",
    "nativeimage",
    "shell",
    "browserview",
    "webrequest",
    "crashreporter",
    "dock",
    "commandline",
    "debugger",
];

/// Facts about the whole module list, computed once before either pass.
#[derive(Debug, Clone, Default)]
pub struct ApiIndex {
    /// Lowercased names that occur on more than one descriptor.
    repeated: HashSet<String>,
}

impl ApiIndex {
    pub fn new(modules: &[ModuleDescriptor]) -> Self {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for module in modules {
            *counts.entry(module.key()).or_default() += 1;
        }
        let repeated = counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(key, _)| key)
            .collect();
        Self { repeated }
    }

    /// Whether another descriptor shares this module's name.
    pub fn is_repeated(&self, module: &ModuleDescriptor) -> bool {
        self.repeated.contains(&module.key())
    }

    /// Declared as a `class`: either typed as one, or one half of a
    /// static/instance pair.
    pub fn is_class_like(&self, module: &ModuleDescriptor) -> bool {
        module.kind == ModuleKind::Class || self.is_repeated(module)
    }

    /// The `Module`-typed half of a static/instance pair; its methods and
    /// properties are emitted as `static` members of the shared class.
    pub fn is_static_half(&self, module: &ModuleDescriptor) -> bool {
        module.kind == ModuleKind::Module && self.is_repeated(module)
    }
}

/// Generation settings that shape module headers.
#[derive(Debug, Clone)]
pub struct EmitterSettings {
    /// Base interface for modules that emit events.
    pub emitter_base: String,
    /// Lowercased names of modules that do not emit events.
    pub non_emitters: HashSet<String>,
    /// Lowercased module name -> interface it extends instead of the
    /// emitter base.
    pub parents: HashMap<String, String>,
}

impl Default for EmitterSettings {
    fn default() -> Self {
        Self {
            emitter_base: "EventEmitter".to_string(),
            non_emitters: DEFAULT_NON_EMITTERS.iter().map(|s| s.to_string()).collect(),
            parents: HashMap::from([("remote".to_string(), "MainInterface".to_string())]),
        }
    }
}

impl EmitterSettings {
    /// The event emitter capability predicate.
    pub fn is_emitter(&self, module: &ModuleDescriptor) -> bool {
        !module.is_structure() && !self.non_emitters.contains(&module.key())
    }

    fn parent_of(&self, module: &ModuleDescriptor) -> &str {
        self.parents
            .get(&module.key())
            .map(String::as_str)
            .unwrap_or(&self.emitter_base)
    }
}

/// The accumulated declaration of one logical module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationBlock {
    name: String,
    lines: Vec<String>,
}

impl DeclarationBlock {
    /// Declared name (first-seen spelling, first letter uppercased).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The opening line followed by the body, without indentation or the
    /// closing brace.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn header(&self) -> &str {
        self.lines.first().map(String::as_str).unwrap_or_default()
    }

    pub fn body(&self) -> &[String] {
        self.lines.get(1..).unwrap_or_default()
    }
}

/// Blocks keyed by lowercased module name, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct DeclarationRegistry {
    blocks: IndexMap<String, DeclarationBlock>,
}

impl DeclarationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&DeclarationBlock> {
        self.blocks.get(&name.to_lowercase())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.blocks.contains_key(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DeclarationBlock> {
        self.blocks.values()
    }

    fn append(&mut self, module: &ModuleDescriptor, lines: Vec<String>) {
        self.blocks
            .entry(module.key())
            .or_insert_with(|| DeclarationBlock {
                name: module.declaration_name(),
                lines: Vec::new(),
            })
            .lines
            .extend(lines);
    }
}

/// Emits module descriptors into a [`DeclarationRegistry`].
pub struct ModuleEmitter<'a> {
    settings: &'a EmitterSettings,
    index: &'a ApiIndex,
    synth: SignatureSynthesizer<'a>,
}

impl<'a> ModuleEmitter<'a> {
    pub fn new(
        settings: &'a EmitterSettings,
        index: &'a ApiIndex,
        synth: SignatureSynthesizer<'a>,
    ) -> Self {
        Self {
            settings,
            index,
            synth,
        }
    }

    /// Fold one descriptor into its module's block.
    pub fn emit(&mut self, blocks: &mut DeclarationRegistry, module: &ModuleDescriptor) -> Result<()> {
        let mut lines = Vec::new();
        if !blocks.contains(&module.name) {
            self.push_header(&mut lines, module);
        } else {
            debug!(module = %module.name, "appending to existing declaration");
        }

        self.push_events(&mut lines, module)?;

        if let Some(constructor) = &module.constructor_method {
            let method = MethodDescriptor {
                name: "constructor".to_string(),
                description: constructor.description.clone(),
                parameters: constructor.parameters.clone(),
                returns: None,
            };
            let seed = format!("{}Constructor", module.name);
            let ctx = MemberContext::new(&module.name, &method.name).with_seed(&seed);
            self.add_method(&mut lines, ctx, &method, "")?;
        }

        for method in sorted_by_name(&module.static_methods) {
            self.add_method(
                &mut lines,
                MemberContext::new(&module.name, &method.name),
                method,
                "static ",
            )?;
        }

        let static_half = self.index.is_static_half(module);
        let static_prefix = if static_half { "static " } else { "" };
        for method in sorted_by_name(&module.methods) {
            self.add_method(
                &mut lines,
                MemberContext::new(&module.name, &method.name),
                method,
                static_prefix,
            )?;
        }

        for method in sorted_by_name(&module.instance_methods) {
            self.add_method(
                &mut lines,
                MemberContext::new(&module.name, &method.name),
                method,
                "",
            )?;
        }

        for property in sorted_by_name(&module.instance_properties) {
            check_named(module, property, "instance property")?;
            let ty = self
                .synth
                .value_type(MemberContext::new(&module.name, &property.name), property)?;
            lines.push(property_line("", property, &ty));
        }

        for property in sorted_by_name(&module.properties) {
            check_named(module, property, "property")?;
            let ty = if property.is_object_shape() {
                self.synth.interned(property, "", "")?
            } else {
                self.synth
                    .value_type(MemberContext::new(&module.name, &property.name), property)?
            };
            lines.push(property_line(static_prefix, property, &ty));
        }

        blocks.append(module, lines);
        Ok(())
    }

    fn push_header(&self, lines: &mut Vec<String>, module: &ModuleDescriptor) {
        let name = module.declaration_name();
        let header = if module.is_structure() {
            format!("type {name} = {{")
        } else {
            let keyword = if self.index.is_class_like(module) {
                "class"
            } else {
                "interface"
            };
            if self.settings.is_emitter(module) {
                format!("{keyword} {name} extends {} {{", self.settings.parent_of(module))
            } else {
                format!("{keyword} {name} {{")
            }
        };
        lines.push(header);
        lines.push(String::new());
        lines.push(format!("// Docs: {}", module.website_url));
        lines.push(String::new());
    }

    fn push_events(&mut self, lines: &mut Vec<String>, module: &ModuleDescriptor) -> Result<()> {
        let events = sorted_by_name(module.instance_events.iter().chain(&module.events));
        for event in events {
            if event.name.is_empty() {
                return Err(Error::MalformedMember {
                    module: module.name.clone(),
                    member: "event".to_string(),
                });
            }
            lines.extend(wrap_comment(event.description.as_deref()));
            let listener = self.synth.listener_signature(&module.name, event)?;
            lines.push(format!("on(event: '{}', listener: {listener}): this;", event.name));
        }
        Ok(())
    }

    /// Emit one method signature. Constructors carry no return annotation.
    fn add_method(
        &mut self,
        lines: &mut Vec<String>,
        ctx: MemberContext<'_>,
        method: &MethodDescriptor,
        prefix: &str,
    ) -> Result<()> {
        if method.name.is_empty() {
            return Err(Error::MalformedMember {
                module: ctx.module.to_string(),
                member: "method".to_string(),
            });
        }
        lines.extend(wrap_comment(method.description.as_deref()));
        let params = self.synth.parameter_list(ctx, &method.parameters)?;
        if method.name == "constructor" {
            lines.push(format!("{prefix}constructor({params});"));
        } else {
            let returns = self.synth.return_type(ctx, method)?;
            lines.push(format!("{prefix}{}({params}): {returns};", method.name));
        }
        Ok(())
    }
}

fn check_named(module: &ModuleDescriptor, property: &ParamDescriptor, what: &str) -> Result<()> {
    if property.name.is_empty() {
        return Err(Error::MalformedMember {
            module: module.name.clone(),
            member: what.to_string(),
        });
    }
    Ok(())
}

fn property_line(prefix: &str, property: &ParamDescriptor, ty: &str) -> String {
    format!("{prefix}{}{}: {ty};", property.name, optional_marker(property))
}
