//! Migration command

use crate::cli::error::CliError;
use crate::migrator::stream;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

/// Arguments for the migrate command
#[derive(Debug, Clone)]
pub struct MigrateArgs {
    /// JSON Lines legacy entries, file path or `-`
    pub input: String,
    /// Output file; stdout when absent
    pub output: Option<PathBuf>,
    /// Fail when any record fails
    pub strict: bool,
}

/// Handle the migrate command
pub fn handle_migrate(args: &MigrateArgs) -> Result<(), CliError> {
    let writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).map_err(|e| CliError::FileWriteError(path.clone(), e.to_string()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let report = if args.input == "-" {
        stream::run(io::stdin().lock(), writer)?
    } else {
        let path = PathBuf::from(&args.input);
        let file =
            File::open(&path).map_err(|e| CliError::FileReadError(path.clone(), e.to_string()))?;
        stream::run(BufReader::new(file), writer)?
    };

    for error in &report.errors {
        eprintln!("line {}: {}", error.line, error.message);
    }
    eprintln!(
        "Migrated {} of {} records",
        report.succeeded, report.processed
    );

    if args.strict && !report.is_clean() {
        return Err(CliError::MigrationFailures(report.failed, report.processed));
    }
    Ok(())
}
