//! Parameter lists, listener signatures and return types.

use crate::error::{Error, Result};
use crate::interner::{InterfaceInterner, shape_signature};
use crate::registry::{TypeRegistry, array_of};
use crate::text::{camel_case, paramify, upper_first, wrap_comment};
use crate::types::{EventDescriptor, MethodDescriptor, ParamDescriptor};

/// Methods that return the emitter itself so calls can be chained.
pub const CHAINABLE_METHODS: &[&str] = &["on", "once", "removeAllListeners", "removeListener"];

/// Width of `    on(event: '` plus `', listener: (`, used to align
/// continuation lines of multi-argument listeners under the first argument.
pub const LISTENER_INDENT: usize = 29;

/// Where a signature is being synthesized; drives interface naming.
#[derive(Debug, Clone, Copy)]
pub struct MemberContext<'m> {
    pub module: &'m str,
    pub member: &'m str,
    /// Explicit naming seed, used by constructors (`<Module>Constructor`).
    pub seed: Option<&'m str>,
}

impl<'m> MemberContext<'m> {
    pub fn new(module: &'m str, member: &'m str) -> Self {
        Self {
            module,
            member,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: &'m str) -> Self {
        self.seed = Some(seed);
        self
    }

    fn unnamed(&self, what: &str) -> Error {
        Error::MalformedMember {
            module: self.module.to_string(),
            member: format!("{what} of `{}`", self.member),
        }
    }
}

/// Builds TypeScript signatures, interning object shapes as it goes.
pub struct SignatureSynthesizer<'a> {
    registry: &'a TypeRegistry,
    interner: &'a mut InterfaceInterner,
}

impl<'a> SignatureSynthesizer<'a> {
    pub fn new(registry: &'a TypeRegistry, interner: &'a mut InterfaceInterner) -> Self {
        Self { registry, interner }
    }

    /// Render a method parameter list, without the surrounding parentheses.
    pub fn parameter_list(
        &mut self,
        ctx: MemberContext<'_>,
        params: &[ParamDescriptor],
    ) -> Result<String> {
        let rendered = params
            .iter()
            .map(|param| self.parameter(ctx, param))
            .collect::<Result<Vec<_>>>()?;
        Ok(rendered.join(", "))
    }

    fn parameter(&mut self, ctx: MemberContext<'_>, param: &ParamDescriptor) -> Result<String> {
        if param.name.is_empty() {
            return Err(ctx.unnamed("parameter"));
        }
        let ty = if param.is_object_shape() {
            let (seed, fallback) = if param.name == "options" {
                (
                    format!("{}{}", upper_first(ctx.module), upper_first(ctx.member)),
                    String::new(),
                )
            } else {
                (
                    ctx.seed.map(upper_first).unwrap_or_default(),
                    upper_first(ctx.member),
                )
            };
            self.interned(param, &seed, &fallback)?
        } else {
            self.value_type(ctx, param)?
        };
        Ok(format!("{}{}: {}", paramify(&param.name), optional_marker(param), ty))
    }

    /// The TypeScript type of a value that is not interned at this site:
    /// literal unions, inline function types and mapped type names.
    pub fn value_type(&mut self, ctx: MemberContext<'_>, value: &ParamDescriptor) -> Result<String> {
        if !value.possible_values.is_empty() {
            let literals = value
                .possible_values
                .iter()
                .map(|v| format!("'{}'", v.value))
                .collect::<Vec<_>>()
                .join(" | ");
            return Ok(if value.collection {
                array_of(&literals)
            } else {
                literals
            });
        }
        if value.is_function() && (!value.parameters.is_empty() || value.returns.is_some()) {
            let function = self.function_type(ctx, &value.parameters, value.returns.as_deref())?;
            return Ok(if value.collection {
                array_of(&function)
            } else {
                function
            });
        }
        Ok(self.registry.map_param(value))
    }

    /// `(<params>) => <returns>` for callback-typed values.
    pub fn function_type(
        &mut self,
        ctx: MemberContext<'_>,
        params: &[ParamDescriptor],
        returns: Option<&ParamDescriptor>,
    ) -> Result<String> {
        let params = self.parameter_list(ctx, params)?;
        let returns = match returns {
            Some(r) if r.is_object_shape() => self.interned(r, &upper_first(ctx.member), "")?,
            Some(r) => self.value_type(ctx, r)?,
            None => "void".to_string(),
        };
        Ok(format!("({params}) => {returns}"))
    }

    /// Return type of a method: `this` for the chainable emitter methods,
    /// `void` when nothing (or `undefined`) is returned, otherwise the
    /// declared type with object shapes interned under the method's name.
    pub fn return_type(&mut self, ctx: MemberContext<'_>, method: &MethodDescriptor) -> Result<String> {
        match &method.returns {
            Some(returns) if !returns.ty.is_named("undefined") => {
                if returns.is_object_shape() {
                    self.interned(returns, &upper_first(&method.name), "")
                } else {
                    self.value_type(ctx, returns)
                }
            }
            _ if CHAINABLE_METHODS.contains(&method.name.as_str()) => Ok("this".to_string()),
            _ => Ok("void".to_string()),
        }
    }

    /// The listener type for one `on(event, listener)` overload.
    ///
    /// Each argument is preceded by its doc comment; continuation lines are
    /// indented so arguments line up after `listener: (`.
    pub fn listener_signature(&mut self, module: &str, event: &EventDescriptor) -> Result<String> {
        if event.returns.is_empty() {
            return Ok("() => void".to_string());
        }

        let ctx = MemberContext::new(module, &event.name);
        let event_seed = upper_first(&camel_case(&event.name));
        let indent = " ".repeat(event.name.len() + LISTENER_INDENT);

        let mut args = Vec::with_capacity(event.returns.len());
        for arg in &event.returns {
            if arg.name.is_empty() {
                return Err(ctx.unnamed("listener argument"));
            }
            let mut rendered = String::new();
            for line in wrap_comment(arg.description.as_deref()) {
                rendered.push_str(&line);
                rendered.push('\n');
                rendered.push_str(&indent);
            }
            let ty = if arg.is_object_shape() {
                if arg.name == "params" {
                    self.interned(arg, &event_seed, "")?
                } else {
                    self.interned(arg, "", &event_seed)?
                }
            } else {
                self.value_type(ctx, arg)?
            };
            rendered.push_str(&format!("{}{}: {}", paramify(&arg.name), optional_marker(arg), ty));
            args.push(rendered);
        }

        Ok(format!("({}) => void", args.join(&format!(",\n{indent}"))))
    }

    /// Reference to the interface for an object-shaped value, interning it
    /// on first sight.
    pub fn interned(&mut self, shape: &ParamDescriptor, seed: &str, fallback: &str) -> Result<String> {
        let signature = shape_signature(self.registry, &shape.properties);
        let name = match self.interner.lookup(&signature) {
            Some(existing) => existing.to_string(),
            None => {
                let suffix = upper_first(&camel_case(&shape.name));
                let name = self.interner.claim(signature, seed, fallback, &suffix);
                let body = self.interface_body(&name, &shape.properties)?;
                self.interner.define(&name, body);
                name
            }
        };
        Ok(if shape.collection { array_of(&name) } else { name })
    }

    fn interface_body(&mut self, owner: &str, fields: &[ParamDescriptor]) -> Result<Vec<String>> {
        let ctx = MemberContext::new(owner, owner);
        let mut lines = Vec::new();
        for field in fields {
            if field.name.is_empty() {
                return Err(ctx.unnamed("property"));
            }
            lines.extend(wrap_comment(field.description.as_deref()));
            let ty = if field.is_object_shape() {
                self.interned(field, "", owner)?
            } else {
                self.value_type(ctx, field)?
            };
            lines.push(format!("{}{}: {};", field.name, optional_marker(field), ty));
        }
        Ok(lines)
    }
}

pub(crate) fn optional_marker(param: &ParamDescriptor) -> &'static str {
    if param.is_optional() { "?" } else { "" }
}
