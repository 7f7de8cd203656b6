//! Shared CLI runner for the two generator binaries
//!
//! Both binaries take the same three positional arguments and walk the
//! same banner sequence on stderr; only the generator in the middle
//! differs. The catalog file is taken from the `PIPEGEN_CATALOG`
//! environment variable so the argument surface stays identical to the
//! original tools.
//!
//! Exit codes: 0 on success, 1 on a bad invocation, -1 (status 255) on
//! any fatal validation or I/O error.

use crate::catalog::StaticCatalog;
use crate::generator::{FeatureListGenerator, JoinConfigGenerator};
use clap::Parser;
use clap::error::ErrorKind;
use pipegen_core::error::{PipegenError, Result};
use std::path::{Path, PathBuf};
use std::process;
use tracing::error;

/// Environment variable naming the catalog YAML file
pub const CATALOG_ENV: &str = "PIPEGEN_CATALOG";

/// Which generator a binary runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorKind {
    /// Flat feature-list text artifact
    FeatureList,
    /// Structured join-config YAML artifact
    JoinConfig,
}

impl GeneratorKind {
    fn dump_banner(self) -> &'static str {
        match self {
            Self::FeatureList => "===== DUMPING FEATURE LIST =====",
            Self::JoinConfig => "===== DUMPING JOIN CONFIG =====",
        }
    }
}

/// Common arguments of both generator binaries
#[derive(Debug, Parser)]
pub struct GeneratorArgs {
    /// Path to the input workbook
    pub input_xls_file: PathBuf,
    /// Name of the sheet holding the rows
    pub input_sheet_name: String,
    /// Path of the artifact to write
    pub output_file: PathBuf,
}

/// Parse arguments, run the generator, and exit with the matching code.
pub fn run(kind: GeneratorKind) -> ! {
    init_tracing();
    let args = match GeneratorArgs::try_parse() {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            process::exit(0);
        }
        Err(err) => {
            eprintln!("invalid input args");
            eprintln!("{err}");
            process::exit(1);
        }
    };
    match execute(kind, &args) {
        Ok(()) => {
            eprintln!("===== SUCCESS =====");
            process::exit(0);
        }
        Err(err) => {
            eprintln!("===== FAILED =====");
            eprintln!("msg: {err}");
            error!(?err, "generator run aborted");
            process::exit(-1);
        }
    }
}

/// One full generator run: catalog, sheet, artifact, table summary.
fn execute(kind: GeneratorKind, args: &GeneratorArgs) -> Result<()> {
    let catalog = load_catalog()?;
    eprintln!("===== LOADING XLS FILE =====");
    match kind {
        GeneratorKind::FeatureList => {
            let mut generator =
                FeatureListGenerator::load(&args.input_xls_file, &args.input_sheet_name)?;
            eprintln!("{}", kind.dump_banner());
            generator.dump(&catalog, &args.output_file)?;
            eprintln!("===== INPUT TABLE INFO =====");
            print!("{}", generator.input_table_info());
        }
        GeneratorKind::JoinConfig => {
            let mut generator =
                JoinConfigGenerator::load(&args.input_xls_file, &args.input_sheet_name)?;
            eprintln!("{}", kind.dump_banner());
            generator.dump(&catalog, &args.output_file)?;
            eprintln!("===== INPUT TABLE INFO =====");
            print!("{}", generator.input_table_info());
        }
    }
    Ok(())
}

/// Load the catalog named by [`CATALOG_ENV`].
fn load_catalog() -> Result<StaticCatalog> {
    let path = std::env::var_os(CATALOG_ENV).ok_or_else(|| {
        PipegenError::config_source(format!(
            "{CATALOG_ENV} is not set; point it at a catalog YAML file"
        ))
    })?;
    StaticCatalog::from_yaml_file(Path::new(&path))
}

/// Diagnostics go to stderr so stdout stays free for the table summary.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();
}
