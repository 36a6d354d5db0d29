//! TypeScript declaration generator for Electron API metadata.

use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::aggregate::{CompositeInterfaces, classify_modules};
use crate::declaration::{ApiIndex, DeclarationRegistry, EmitterSettings, ModuleEmitter};
use crate::error::{Error, Result};
use crate::interner::{InterfaceDefinition, InterfaceInterner};
use crate::registry::TypeRegistry;
use crate::signature::SignatureSynthesizer;
use crate::types::ModuleDescriptor;

/// Base declarations every generated file relies on.
const PRELUDE: &str = include_str!("prelude.d.ts");

/// Types declared by the prelude.
const PRELUDE_NAMES: [&str; 3] = ["EventEmitter", "Accelerator", "Event"];

/// Everything one generation run produces, before rendering.
#[derive(Debug, Clone)]
pub struct Declarations {
    /// One block per unique module name, in first-seen order.
    pub modules: DeclarationRegistry,
    /// Interfaces interned from anonymous object shapes.
    pub interfaces: Vec<InterfaceDefinition>,
    pub composites: CompositeInterfaces,
}

/// Generator that collects module descriptors and outputs TypeScript
/// declarations.
///
/// # Type registry
///
/// The generator includes a [`TypeRegistry`] that maps metadata type names
/// to TypeScript types. Built-in mappings are registered by default; adjust
/// them with [`register_type`](DeclarationGenerator::register_type) and
/// [`unregister_type`](DeclarationGenerator::unregister_type).
///
/// # Example
///
/// ```
/// use electron_dts_codegen::DeclarationGenerator;
///
/// let mut generator = DeclarationGenerator::new();
/// generator.add_api_str(r#"[
///     {
///         "name": "app",
///         "type": "Module",
///         "process": { "main": true, "renderer": false },
///         "events": [{ "name": "ready" }]
///     }
/// ]"#).unwrap();
///
/// let code = generator.generate().unwrap();
/// assert!(code.contains("    on(event: 'ready', listener: () => void): this;"));
/// assert!(code.contains("    app: Electron.App;"));
/// ```
#[derive(Debug)]
pub struct DeclarationGenerator {
    /// Module descriptors in input order.
    modules: Vec<ModuleDescriptor>,

    /// Custom header comment
    header: Option<String>,

    /// Namespace wrapping every declaration.
    namespace: String,

    /// Module specifier of the ambient `declare module` footer.
    module_specifier: String,

    /// Appended to each member line of the composite interfaces.
    terminator: String,

    include_prelude: bool,

    settings: EmitterSettings,

    /// Type registry for mapping metadata type names
    pub(crate) registry: TypeRegistry,
}

impl Default for DeclarationGenerator {
    fn default() -> Self {
        Self {
            modules: Vec::new(),
            header: None,
            namespace: "Electron".to_string(),
            module_specifier: "electron".to_string(),
            terminator: ";".to_string(),
            include_prelude: true,
            settings: EmitterSettings::default(),
            registry: TypeRegistry::with_builtins(),
        }
    }
}

impl DeclarationGenerator {
    /// Create a new generator with built-in type mappings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom header comment for the generated file.
    pub fn set_header(&mut self, header: impl Into<String>) -> &mut Self {
        self.header = Some(header.into());
        self
    }

    /// Set the namespace the declarations live in (default `Electron`).
    pub fn set_namespace(&mut self, namespace: impl Into<String>) -> &mut Self {
        self.namespace = namespace.into();
        self
    }

    /// Set the specifier of the ambient module declaration (default
    /// `electron`).
    pub fn set_module_specifier(&mut self, specifier: impl Into<String>) -> &mut Self {
        self.module_specifier = specifier.into();
        self
    }

    /// Set the statement terminator used by the composite interfaces
    /// (default `;`).
    pub fn set_terminator(&mut self, terminator: impl Into<String>) -> &mut Self {
        self.terminator = terminator.into();
        self
    }

    /// Include or omit the built-in `EventEmitter`, `Accelerator` and
    /// `Event` declarations.
    pub fn include_prelude(&mut self, enabled: bool) -> &mut Self {
        self.include_prelude = enabled;
        self
    }

    /// Mark a module as not emitting events.
    pub fn add_non_emitter(&mut self, module: &str) -> &mut Self {
        self.settings.non_emitters.insert(module.to_lowercase());
        self
    }

    /// Make an event-emitting module extend `parent` instead of the event
    /// emitter base.
    pub fn set_parent_interface(&mut self, module: &str, parent: impl Into<String>) -> &mut Self {
        self.settings
            .parents
            .insert(module.to_lowercase(), parent.into());
        self
    }

    /// Register a custom type name mapping.
    ///
    /// # Example
    ///
    /// ```
    /// use electron_dts_codegen::DeclarationGenerator;
    ///
    /// let mut generator = DeclarationGenerator::new();
    /// generator.register_type("Color", "string");
    /// ```
    pub fn register_type(&mut self, name: &str, ts_type: impl Into<String>) -> &mut Self {
        self.registry.register(name, ts_type);
        self
    }

    /// Remove a type mapping from the registry.
    ///
    /// This can be used to disable a built-in mapping.
    pub fn unregister_type(&mut self, name: &str) -> &mut Self {
        self.registry.unregister(name);
        self
    }

    /// Get a reference to the type registry.
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Append a module descriptor.
    pub fn add_module(&mut self, module: ModuleDescriptor) -> &mut Self {
        self.modules.push(module);
        self
    }

    /// Append module descriptors, keeping their order.
    pub fn add_modules(&mut self, modules: impl IntoIterator<Item = ModuleDescriptor>) -> &mut Self {
        self.modules.extend(modules);
        self
    }

    /// The module descriptors collected so far.
    pub fn modules(&self) -> &[ModuleDescriptor] {
        &self.modules
    }

    /// Run both passes over the collected modules.
    ///
    /// All state lives in this call, so repeated calls over the same
    /// modules produce identical results.
    pub fn build(&self) -> Result<Declarations> {
        if let Some(index) = self.modules.iter().position(|m| m.name.trim().is_empty()) {
            return Err(Error::MalformedModule { index });
        }

        let index = ApiIndex::new(&self.modules);

        let mut interner = InterfaceInterner::new();
        interner.reserve(self.modules.iter().map(ModuleDescriptor::declaration_name));
        interner.reserve(PRELUDE_NAMES);
        interner.reserve(CompositeInterfaces::NAMES);

        let mut modules = DeclarationRegistry::new();
        {
            let synth = SignatureSynthesizer::new(&self.registry, &mut interner);
            let mut emitter = ModuleEmitter::new(&self.settings, &index, synth);
            for module in &self.modules {
                emitter.emit(&mut modules, module)?;
            }
        }

        let composites = classify_modules(&self.modules, &index, &self.namespace);

        debug!(
            modules = modules.len(),
            interfaces = interner.len(),
            "built declarations"
        );

        Ok(Declarations {
            modules,
            interfaces: interner.into_definitions(),
            composites,
        })
    }

    /// Generate the declaration file as lines.
    pub fn generate_lines(&self) -> Result<Vec<String>> {
        let declarations = self.build()?;
        let mut out = Vec::new();

        out.push("/**".to_string());
        match &self.header {
            Some(header) => out.extend(header.lines().map(|l| format!(" * {l}").trim_end().to_string())),
            None => {
                out.push(" * Auto-generated by electron-dts-codegen".to_string());
                out.push(" * DO NOT EDIT MANUALLY".to_string());
            }
        }
        out.push(" */".to_string());
        out.push(String::new());

        out.push(format!("declare namespace {} {{", self.namespace));
        if self.include_prelude {
            out.extend(PRELUDE.lines().map(str::to_string));
            out.push(String::new());
        }

        for block in declarations.modules.iter() {
            push_block(&mut out, block.header(), block.body());
        }
        for interface in &declarations.interfaces {
            push_block(&mut out, &interface.header(), &interface.lines);
        }

        for composite in declarations.composites.iter() {
            let rendered = composite.render(&self.terminator);
            if let Some((header, rest)) = rendered.split_first() {
                // The closing brace is re-added by push_block.
                push_block(&mut out, header, &rest[..rest.len().saturating_sub(1)]);
            }
        }
        out.push("}".to_string());
        out.push(String::new());

        out.push(format!("declare module '{}' {{", self.module_specifier));
        out.push(format!("  const electron: {}.AllElectron;", self.namespace));
        out.push("  export = electron;".to_string());
        out.push("}".to_string());
        out.push(String::new());
        out.push("interface NodeRequireFunction {".to_string());
        out.push(format!(
            "  (moduleName: '{}'): {}.AllElectron;",
            self.module_specifier, self.namespace
        ));
        out.push("}".to_string());

        Ok(out)
    }

    /// Generate the declaration file as a string.
    pub fn generate(&self) -> Result<String> {
        let mut code = self.generate_lines()?.join("\n");
        code.push('\n');
        Ok(code)
    }

    /// Write the generated declarations to a file.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let code = self.generate()?;
        fs::write(path, code).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the generated declarations to a writer.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        let code = self.generate()?;
        writer.write_all(code.as_bytes())?;
        Ok(())
    }
}

/// Append a brace-delimited block inside the namespace: the header at two
/// spaces, body statements at four, then the closing brace and a blank line.
fn push_block(out: &mut Vec<String>, header: &str, body: &[String]) {
    out.push(format!("  {header}"));
    for line in body {
        if line.is_empty() {
            out.push(String::new());
        } else {
            out.push(format!("    {line}"));
        }
    }
    out.push("  }".to_string());
    out.push(String::new());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MethodDescriptor, ModuleKind, ParamDescriptor};

    const API: &str = r#"[
        {
            "name": "app",
            "type": "Module",
            "websiteUrl": "https://electronjs.org/docs/api/app",
            "process": { "main": true, "renderer": false },
            "events": [{ "name": "ready", "description": "Emitted when Electron has finished initializing." }],
            "methods": [
                { "name": "quit" },
                { "name": "getPath", "parameters": [
                    { "name": "name", "type": "String", "possibleValues": [{ "value": "home" }, { "value": "temp" }] }
                ], "returns": { "type": "String" } }
            ]
        },
        {
            "name": "BrowserWindow",
            "type": "Class",
            "websiteUrl": "https://electronjs.org/docs/api/browser-window",
            "process": { "main": true, "renderer": false },
            "constructorMethod": { "parameters": [
                { "name": "options", "type": "Object", "required": false, "properties": [
                    { "name": "width", "type": "Integer", "required": false },
                    { "name": "height", "type": "Integer", "required": false }
                ]}
            ]},
            "staticMethods": [{ "name": "getAllWindows", "returns": { "type": "BrowserWindow", "collection": true } }],
            "instanceMethods": [
                { "name": "setSize", "parameters": [
                    { "name": "size", "type": "Object", "properties": [
                        { "name": "width", "type": "Integer", "required": false },
                        { "name": "height", "type": "Integer", "required": false }
                    ]}
                ]}
            ]
        },
        {
            "name": "clipboard",
            "type": "Module",
            "process": { "main": true, "renderer": true },
            "methods": [{ "name": "readText", "returns": { "type": "String" } }]
        },
        {
            "name": "Rectangle",
            "type": "Structure",
            "properties": [
                { "name": "x", "type": "Number" },
                { "name": "y", "type": "Number" }
            ]
        }
    ]"#;

    fn generator() -> DeclarationGenerator {
        let mut generator = DeclarationGenerator::new();
        generator.add_api_str(API).unwrap();
        generator
    }

    #[test]
    fn test_generate_full_document() {
        let code = generator().generate().unwrap();
        assert!(code.starts_with("/**\n * Auto-generated by electron-dts-codegen\n"));
        assert!(code.contains("declare namespace Electron {\n"));
        assert!(code.contains("  class EventEmitter {"));
        assert!(code.contains("  interface App extends EventEmitter {\n\n    // Docs: https://electronjs.org/docs/api/app\n\n"));
        assert!(code.contains("    on(event: 'ready', listener: () => void): this;"));
        assert!(code.contains("    getPath(name: 'home' | 'temp'): string;"));
        assert!(code.contains("    quit(): void;"));
        assert!(code.contains("  class BrowserWindow extends EventEmitter {"));
        assert!(code.contains("    constructor(options?: BrowserWindowConstructorOptions);"));
        assert!(code.contains("    static getAllWindows(): BrowserWindow[];"));
        assert!(code.contains("  type Rectangle = {"));
        assert!(code.contains("    x: number;"));
        assert!(code.contains("declare module 'electron' {"));
        assert!(code.contains("  (moduleName: 'electron'): Electron.AllElectron;"));
        assert!(code.ends_with("}\n"));
    }

    #[test]
    fn test_identical_shapes_share_interface() {
        let code = generator().generate().unwrap();
        assert!(code.contains("    setSize(size: BrowserWindowConstructorOptions): void;"));
        assert_eq!(code.matches("  interface BrowserWindowConstructorOptions {").count(), 1);
        assert!(code.contains("    width?: number;"));
    }

    #[test]
    fn test_composites_follow_interfaces() {
        let lines = generator().generate_lines().unwrap();
        let position = |needle: &str| lines.iter().position(|l| l == needle).unwrap();

        let common = position("  interface CommonInterface {");
        let main = position("  interface MainInterface extends CommonInterface {");
        let renderer = position("  interface RendererInterface extends CommonInterface {");
        let all = position("  interface AllElectron {");
        let interned = position("  interface BrowserWindowConstructorOptions {");
        assert!(interned < common && common < main && main < renderer && renderer < all);

        assert_eq!(lines[common + 1], "    clipboard: Electron.Clipboard;");
        assert_eq!(lines[main + 1], "    app: Electron.App;");
        assert_eq!(lines[main + 2], "    BrowserWindow: typeof Electron.BrowserWindow;");
        assert_eq!(lines[renderer + 1], "  }");
        assert_eq!(
            &lines[all + 1..all + 4],
            &[
                "    app: Electron.App;",
                "    BrowserWindow: typeof Electron.BrowserWindow;",
                "    clipboard: Electron.Clipboard;"
            ]
        );
    }

    #[test]
    fn test_generation_is_idempotent() {
        let generator = generator();
        assert_eq!(generator.generate().unwrap(), generator.generate().unwrap());
    }

    #[test]
    fn test_one_block_per_module_name() {
        let mut generator = DeclarationGenerator::new();
        generator.add_modules([
            ModuleDescriptor::new("Foo", ModuleKind::Class)
                .with_process(true, false),
            ModuleDescriptor::new("foo", ModuleKind::Module)
                .with_process(true, false),
        ]);
        generator.modules[0].instance_methods = vec![MethodDescriptor::new("bar")];
        generator.modules[1].methods = vec![MethodDescriptor::new("bar")];

        let declarations = generator.build().unwrap();
        assert_eq!(declarations.modules.len(), 1);
        assert_eq!(declarations.composites.all.members(), &["Foo: typeof Electron.Foo"]);

        let code = generator.generate().unwrap();
        assert_eq!(code.matches("  class Foo extends EventEmitter {").count(), 1);
        assert!(code.contains("    bar(): void;\n    static bar(): void;\n"));
    }

    #[test]
    fn test_interned_names_avoid_module_names() {
        let mut generator = DeclarationGenerator::new();
        let mut module = ModuleDescriptor::new("screen", ModuleKind::Module).with_process(true, false);
        module.methods = vec![MethodDescriptor::new("setPoint").with_parameters(vec![
            ParamDescriptor::new("point", "Object")
                .with_properties(vec![ParamDescriptor::new("x", "Integer")]),
        ])];
        generator.add_module(module);
        generator.add_module(ModuleDescriptor::new("Point", ModuleKind::Structure));

        let code = generator.generate().unwrap();
        assert!(code.contains("    setPoint(point: SetPointPoint): void;"));
        assert!(code.contains("  type Point = {"));
    }

    #[test]
    fn test_custom_settings() {
        let mut generator = generator();
        generator
            .set_header("Type definitions for Electron\nProject: electron")
            .set_namespace("Api")
            .set_terminator(",")
            .include_prelude(false)
            .add_non_emitter("app")
            .register_type("String", "String");

        let code = generator.generate().unwrap();
        assert!(code.starts_with("/**\n * Type definitions for Electron\n * Project: electron\n */\n"));
        assert!(code.contains("declare namespace Api {"));
        assert!(!code.contains("class EventEmitter"));
        assert!(code.contains("  interface App {"));
        assert!(code.contains("    app: Api.App,"));
        assert!(code.contains("    readText(): String;"));
    }

    #[test]
    fn test_parent_interface_override() {
        let mut generator = DeclarationGenerator::new();
        generator
            .add_module(ModuleDescriptor::new("remote", ModuleKind::Module).with_process(false, true))
            .add_module(ModuleDescriptor::new("ipcMain", ModuleKind::Module).with_process(true, false))
            .set_parent_interface("ipcMain", "NodeJS.EventEmitter");

        let code = generator.generate().unwrap();
        assert!(code.contains("  interface Remote extends MainInterface {"));
        assert!(code.contains("  interface IpcMain extends NodeJS.EventEmitter {"));
    }

    #[test]
    fn test_nameless_module_is_fatal() {
        let mut generator = DeclarationGenerator::new();
        generator.add_module(ModuleDescriptor::new("app", ModuleKind::Module));
        generator.add_module(ModuleDescriptor::new(" ", ModuleKind::Module));
        assert!(matches!(
            generator.generate(),
            Err(Error::MalformedModule { index: 1 })
        ));
    }

    #[test]
    fn test_nameless_member_is_fatal() {
        let mut generator = DeclarationGenerator::new();
        let mut module = ModuleDescriptor::new("app", ModuleKind::Module);
        module.methods = vec![MethodDescriptor::new("")];
        generator.add_module(module);
        assert!(matches!(
            generator.generate(),
            Err(Error::MalformedMember { .. })
        ));
    }

    #[test]
    fn test_write_to() {
        let generator = generator();
        let mut buffer = Vec::new();
        generator.write_to(&mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), generator.generate().unwrap());
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("electron.d.ts");
        let generator = generator();
        generator.write_to_file(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), generator.generate().unwrap());
    }
}
