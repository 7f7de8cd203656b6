//! Join-config generator command-line tool
//!
//! Usage: `generate-join-config <input_xls_file> <input_sheet_name> <output_file>`

use pipegen_service::cli::{self, GeneratorKind};

fn main() {
    cli::run(GeneratorKind::JoinConfig)
}
