//! `electron-dts`: render TypeScript declarations from Electron API metadata.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use electron_dts_codegen::DeclarationGenerator;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "electron-dts", version, about)]
struct Args {
    /// Metadata JSON file, or a directory scanned for `.json` files.
    input: PathBuf,

    /// Output file. Writes to stdout when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Namespace wrapping the declarations.
    #[arg(long, default_value = "Electron")]
    namespace: String,

    /// Header comment for the generated file.
    #[arg(long)]
    header: Option<String>,

    /// Omit the built-in EventEmitter, Accelerator and Event declarations.
    #[arg(long)]
    no_prelude: bool,

    /// Additional module that does not emit events (repeatable).
    #[arg(long = "non-emitter", value_name = "MODULE")]
    non_emitters: Vec<String>,

    /// Map a metadata type name to a TypeScript type, as NAME=TYPE (repeatable).
    #[arg(long = "map-type", value_name = "NAME=TYPE", value_parser = parse_mapping)]
    mappings: Vec<(String, String)>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_mapping(s: &str) -> Result<(String, String), String> {
    let (name, ts_type) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=TYPE, got '{s}'"))?;
    if name.is_empty() || ts_type.is_empty() {
        return Err(format!("expected NAME=TYPE, got '{s}'"));
    }
    Ok((name.to_string(), ts_type.to_string()))
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut generator = DeclarationGenerator::new();
    generator
        .set_namespace(&args.namespace)
        .include_prelude(!args.no_prelude);
    if let Some(header) = &args.header {
        generator.set_header(header);
    }
    for module in &args.non_emitters {
        generator.add_non_emitter(module);
    }
    for (name, ts_type) in &args.mappings {
        generator.register_type(name, ts_type);
    }

    if args.input.is_dir() {
        generator
            .add_api_dir(&args.input)
            .with_context(|| format!("loading metadata from {}", args.input.display()))?;
    } else {
        generator
            .add_api_file(&args.input)
            .with_context(|| format!("loading metadata from {}", args.input.display()))?;
    }
    info!(modules = generator.modules().len(), "metadata loaded");

    match &args.output {
        Some(path) => {
            generator
                .write_to_file(path)
                .with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "declarations written");
        }
        None => generator
            .write_to(io::stdout().lock())
            .context("writing declarations to stdout")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mapping() {
        assert_eq!(
            parse_mapping("Color=string").unwrap(),
            ("Color".to_string(), "string".to_string())
        );
        assert!(parse_mapping("Color").is_err());
        assert!(parse_mapping("=string").is_err());
    }

    #[test]
    fn test_args() {
        let args = Args::try_parse_from([
            "electron-dts",
            "api.json",
            "-o",
            "electron.d.ts",
            "--non-emitter",
            "screen",
            "--non-emitter",
            "tray",
            "--map-type",
            "Color=string",
            "-vv",
        ])
        .unwrap();
        assert_eq!(args.input, PathBuf::from("api.json"));
        assert_eq!(args.output, Some(PathBuf::from("electron.d.ts")));
        assert_eq!(args.namespace, "Electron");
        assert_eq!(args.non_emitters, vec!["screen", "tray"]);
        assert_eq!(args.mappings, vec![("Color".to_string(), "string".to_string())]);
        assert_eq!(args.verbose, 2);
        assert!(!args.no_prelude);
    }
}
