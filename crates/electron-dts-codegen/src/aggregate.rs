//! Composite interfaces grouping modules by execution context.
//!
//! Each contextual module becomes one member line in exactly one of the
//! common, main-only or renderer-only interfaces, plus the flat aggregate.
//! A module key is placed at most once: when several descriptors normalize
//! to the same key (a static/instance pair, or two distinct modules that
//! happen to alias), the first one wins.

use std::collections::HashSet;

use tracing::debug;

use crate::declaration::ApiIndex;
use crate::text::upper_first;
use crate::types::ModuleDescriptor;

/// One composite interface: a header, member lines and a closing brace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeInterface {
    header: String,
    members: Vec<String>,
}

impl CompositeInterface {
    fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            members: Vec::new(),
        }
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    /// Member lines without terminator.
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Header, members ending in `terminator`, closing brace.
    pub fn render(&self, terminator: &str) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.members.len() + 2);
        lines.push(self.header.clone());
        lines.extend(self.members.iter().map(|m| format!("{m}{terminator}")));
        lines.push("}".to_string());
        lines
    }
}

/// The four composite interfaces, in output order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeInterfaces {
    pub common: CompositeInterface,
    pub main: CompositeInterface,
    pub renderer: CompositeInterface,
    pub all: CompositeInterface,
}

impl CompositeInterfaces {
    /// Interface names these composites declare.
    pub const NAMES: [&'static str; 4] =
        ["CommonInterface", "MainInterface", "RendererInterface", "AllElectron"];

    fn new() -> Self {
        Self {
            common: CompositeInterface::new("interface CommonInterface {"),
            main: CompositeInterface::new("interface MainInterface extends CommonInterface {"),
            renderer: CompositeInterface::new(
                "interface RendererInterface extends CommonInterface {",
            ),
            all: CompositeInterface::new("interface AllElectron {"),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompositeInterface> {
        [&self.common, &self.main, &self.renderer, &self.all].into_iter()
    }
}

/// The property name a module is exposed under on the aggregate.
///
/// A few modules are conventionally exported with a lowercase-first
/// identifier regardless of how the metadata spells them.
pub fn module_key(name: &str) -> String {
    match name.to_lowercase().as_str() {
        "session" => "session".to_string(),
        "nativeimage" => "nativeImage".to_string(),
        "webcontents" => "webContents".to_string(),
        _ => name.to_string(),
    }
}

/// Classify every contextual module into the composite interfaces.
///
/// `namespace` qualifies the referenced declarations
/// (`app: Electron.App`).
pub fn classify_modules(
    modules: &[ModuleDescriptor],
    index: &ApiIndex,
    namespace: &str,
) -> CompositeInterfaces {
    let mut composites = CompositeInterfaces::new();
    let mut placed: HashSet<String> = HashSet::new();

    for module in modules {
        let Some(process) = module.process else {
            if !module.is_structure() {
                debug!(module = %module.name, "no process information, skipping classification");
            }
            continue;
        };
        if module.is_structure() {
            continue;
        }

        let key = module_key(&module.name);
        let target = match (process.main, process.renderer) {
            (true, true) => &mut composites.common,
            (true, false) => &mut composites.main,
            (false, true) => &mut composites.renderer,
            (false, false) => {
                debug!(module = %module.name, "available in no process, skipping classification");
                continue;
            }
        };

        if !placed.insert(key.to_lowercase()) {
            debug!(module = %module.name, key = %key, "module key already classified");
            continue;
        }

        let qualifier = if index.is_class_like(module) {
            "typeof "
        } else {
            ""
        };
        let line = format!("{key}: {qualifier}{namespace}.{}", upper_first(&module.name));
        target.members.push(line.clone());
        composites.all.members.push(line);
    }

    composites
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn classify(value: serde_json::Value) -> CompositeInterfaces {
        let modules: Vec<ModuleDescriptor> = serde_json::from_value(value).unwrap();
        let index = ApiIndex::new(&modules);
        classify_modules(&modules, &index, "Electron")
    }

    #[test]
    fn test_module_key() {
        assert_eq!(module_key("Session"), "session");
        assert_eq!(module_key("NativeImage"), "nativeImage");
        assert_eq!(module_key("WebContents"), "webContents");
        assert_eq!(module_key("BrowserWindow"), "BrowserWindow");
        assert_eq!(module_key("app"), "app");
    }

    #[test]
    fn test_routing_by_process() {
        let composites = classify(json!([
            { "name": "clipboard", "process": { "main": true, "renderer": true } },
            { "name": "app", "process": { "main": true, "renderer": false } },
            { "name": "ipcRenderer", "process": { "main": false, "renderer": true } }
        ]));
        assert_eq!(composites.common.members(), &["clipboard: Electron.Clipboard"]);
        assert_eq!(composites.main.members(), &["app: Electron.App"]);
        assert_eq!(composites.renderer.members(), &["ipcRenderer: Electron.IpcRenderer"]);
        assert_eq!(
            composites.all.members(),
            &[
                "clipboard: Electron.Clipboard",
                "app: Electron.App",
                "ipcRenderer: Electron.IpcRenderer"
            ]
        );
    }

    #[test]
    fn test_main_only_modules_keep_classification_order() {
        let composites = classify(json!([
            { "name": "dialog", "process": { "main": true, "renderer": false } },
            { "name": "app", "process": { "main": true, "renderer": false } }
        ]));
        assert_eq!(
            composites.main.members(),
            &["dialog: Electron.Dialog", "app: Electron.App"]
        );
        assert!(composites.common.members().is_empty());
        assert!(composites.renderer.members().is_empty());
    }

    #[test]
    fn test_classes_use_typeof() {
        let composites = classify(json!([
            { "name": "BrowserWindow", "type": "Class", "process": { "main": true, "renderer": false } },
            { "name": "session", "type": "Module", "process": { "main": true, "renderer": false } },
            { "name": "Session", "type": "Class", "process": { "main": true, "renderer": false } }
        ]));
        assert_eq!(
            composites.main.members(),
            &[
                "BrowserWindow: typeof Electron.BrowserWindow",
                "session: typeof Electron.Session"
            ]
        );
    }

    #[test]
    fn test_structures_and_contextless_modules_are_excluded() {
        let composites = classify(json!([
            { "name": "Rectangle", "type": "Structure" },
            { "name": "Point", "type": "Structure", "process": { "main": true, "renderer": true } },
            { "name": "orphan" },
            { "name": "nowhere", "process": { "main": false, "renderer": false } }
        ]));
        assert!(composites.iter().all(|c| c.members().is_empty()));
    }

    #[test]
    fn test_duplicate_key_first_wins() {
        // Two unrelated descriptors that both normalize to `webContents`:
        // the second is dropped from every composite. This aliasing is kept
        // deliberately even though it can hide a distinct module.
        let composites = classify(json!([
            { "name": "webContents", "process": { "main": true, "renderer": false } },
            { "name": "WEBCONTENTS", "process": { "main": false, "renderer": true } }
        ]));
        assert_eq!(
            composites.main.members(),
            &["webContents: typeof Electron.WebContents"]
        );
        assert!(composites.renderer.members().is_empty());
        assert_eq!(composites.all.members().len(), 1);
    }

    #[test]
    fn test_render_applies_terminator() {
        let composites = classify(json!([
            { "name": "app", "process": { "main": true, "renderer": false } }
        ]));
        assert_eq!(
            composites.main.render(";"),
            vec![
                "interface MainInterface extends CommonInterface {",
                "app: Electron.App;",
                "}"
            ]
        );
        assert_eq!(
            composites.common.render(";"),
            vec!["interface CommonInterface {", "}"]
        );
    }
}
