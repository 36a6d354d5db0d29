//! Loading API metadata from JSON.
//!
//! The metadata is either an array of module descriptors or a single
//! descriptor object. Directories are scanned recursively for `.json`
//! files, in file name order so the generated output does not depend on
//! directory listing order.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::DeclarationGenerator;
use crate::error::{Error, Result};
use crate::types::ModuleDescriptor;

fn parse_modules(source: &str, origin: &str) -> Result<Vec<ModuleDescriptor>> {
    let parse_error = |source| Error::Parse {
        origin: origin.to_string(),
        source,
    };
    let value: Value = serde_json::from_str(source).map_err(parse_error)?;
    let modules = match value {
        Value::Array(_) => serde_json::from_value(value).map_err(parse_error)?,
        other => vec![serde_json::from_value(other).map_err(parse_error)?],
    };
    Ok(modules)
}

impl DeclarationGenerator {
    /// Parse API metadata from a JSON string and append its modules.
    pub fn add_api_str(&mut self, source: &str) -> Result<&mut Self> {
        let modules = parse_modules(source, "<string>")?;
        debug!(count = modules.len(), "loaded modules from string");
        self.add_modules(modules);
        Ok(self)
    }

    /// Parse a single metadata file.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # fn main() -> electron_dts_codegen::Result<()> {
    /// use electron_dts_codegen::DeclarationGenerator;
    ///
    /// let mut generator = DeclarationGenerator::new();
    /// generator.add_api_file("electron-api.json")?;
    /// generator.write_to_file("electron.d.ts")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn add_api_file(&mut self, path: impl AsRef<Path>) -> Result<&mut Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let modules = parse_modules(&source, &path.display().to_string())?;
        debug!(path = %path.display(), count = modules.len(), "loaded modules");
        self.add_modules(modules);
        Ok(self)
    }

    /// Recursively scan a directory for `.json` metadata files.
    pub fn add_api_dir(&mut self, path: impl AsRef<Path>) -> Result<&mut Self> {
        for entry in WalkDir::new(path.as_ref()).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(error = %err, "skipping unreadable entry");
                    continue;
                }
            };
            let path = entry.path();
            if entry.file_type().is_file() && path.extension().is_some_and(|e| e == "json") {
                self.add_api_file(path)?;
            }
        }
        Ok(self)
    }
}
