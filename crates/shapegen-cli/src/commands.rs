//! CLI argument definitions and the conversion command handler.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use shapegen_schema::{convert_file, Conversion, ConvertOptions, NamingStrategy};
use tracing::{error, info, warn};

/// Main CLI structure
#[derive(Parser, Debug)]
#[command(name = "shapegen")]
#[command(about = "Convert SHACL shapes graphs to structural JSON Schema")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Turtle shapes file to convert
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Property naming strategy: local, curie, or context
    #[arg(long, default_value = "curie")]
    pub naming: NamingStrategy,

    /// JSON-LD context document, required for --naming context
    #[arg(long)]
    pub context: Option<PathBuf>,

    /// Definition promoted to the document root (default: first shape)
    #[arg(long)]
    pub root_shape: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    fn options(&self) -> ConvertOptions {
        ConvertOptions {
            naming: self.naming,
            context: self.context.clone(),
            root_shape: self.root_shape.clone(),
        }
    }
}

fn execute(cli: &Cli) -> Result<Conversion> {
    let conversion = convert_file(&cli.input, &cli.options())?;

    let rendered = serde_json::to_string_pretty(&conversion.schema)
        .context("failed to serialize schema")?;
    match &cli.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            fs::write(path, format!("{rendered}\n"))
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("wrote {}", path.display());
        }
        None => println!("{rendered}"),
    }

    Ok(conversion)
}

/// Runs the conversion and maps the outcome to a process exit code:
/// 0 clean, 2 completed with diagnostics, 1 fatal (no output written).
pub fn run(cli: Cli) -> i32 {
    match execute(&cli) {
        Ok(conversion) if conversion.is_clean() => 0,
        Ok(conversion) => {
            warn!(
                "conversion completed with {} diagnostic(s)",
                conversion.diagnostics.len()
            );
            2
        }
        Err(err) => {
            error!("{err:#}");
            1
        }
    }
}
