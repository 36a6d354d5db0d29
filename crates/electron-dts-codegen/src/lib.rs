//! # electron-dts-codegen
//!
//! TypeScript declaration generator for Electron API metadata. This crate
//! turns the JSON description of Electron's modules, classes and structures
//! into a single ambient `.d.ts` file.
//!
//! ## Features
//!
//! - One declaration block per module, with static and instance halves of
//!   a class merged into one `class`
//! - Typed `on(event, listener)` overloads for every event
//! - Anonymous object shapes interned into named interfaces, deduplicated
//!   by structure
//! - Composite interfaces grouping modules by the process they run in
//! - Extensible type registry for metadata type names
//!
//! ## Quick Start
//!
//! ```rust
//! use electron_dts_codegen::{DeclarationGenerator, ModuleDescriptor, ModuleKind};
//!
//! let mut generator = DeclarationGenerator::new();
//!
//! // Load metadata as JSON
//! generator.add_api_str(r#"[
//!     {
//!         "name": "clipboard",
//!         "type": "Module",
//!         "process": { "main": true, "renderer": true },
//!         "methods": [{ "name": "readText", "returns": { "type": "String" } }]
//!     }
//! ]"#).unwrap();
//!
//! // Or build descriptors directly
//! generator.add_module(ModuleDescriptor::new("Rectangle", ModuleKind::Structure));
//!
//! let code = generator.generate().unwrap();
//! assert!(code.contains("    readText(): string;"));
//! assert!(code.contains("    clipboard: Electron.Clipboard;"));
//! // Or write to file:
//! // generator.write_to_file("electron.d.ts").unwrap();
//! ```
//!
//! ### Customizing type names
//!
//! ```
//! use electron_dts_codegen::DeclarationGenerator;
//!
//! let mut generator = DeclarationGenerator::new();
//! generator
//!     .register_type("Color", "string")
//!     .add_non_emitter("screen")
//!     .set_header("Type definitions for Electron");
//! ```
//!
//! ## Type Mappings
//!
//! | Metadata Type | TypeScript Type |
//! |---------------|-----------------|
//! | `String`, `URL` | `string` |
//! | `Number`, `Integer`, `Double`, `Float` | `number` |
//! | `Boolean` | `boolean` |
//! | `Object` without properties, `Any` | `any` |
//! | `Object` with properties | named interface |
//! | `Array` | `any[]` |
//! | `Buffer` | `Buffer` |
//! | `Promise` | `Promise<any>` |
//! | `Function` | `Function`, or an inline function type |
//! | `undefined` | `void` |
//! | anything else | the name itself |

mod aggregate;
mod declaration;
mod error;
mod generator;
mod interner;
mod loader;
pub mod registry;
mod signature;
mod text;
mod types;

pub use aggregate::{CompositeInterface, CompositeInterfaces, classify_modules, module_key};
pub use declaration::{
    ApiIndex, DEFAULT_NON_EMITTERS, DeclarationBlock, DeclarationRegistry, EmitterSettings,
};
pub use error::{Error, Result};
pub use generator::{DeclarationGenerator, Declarations};
pub use interner::InterfaceDefinition;
pub use registry::TypeRegistry;
pub use types::{
    ConstructorDescriptor, EventDescriptor, MethodDescriptor, ModuleDescriptor, ModuleKind,
    ParamDescriptor, PossibleValue, ProcessAvailability, TypeRef,
};
