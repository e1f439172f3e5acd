// stockmerge CLI - merge warehouse stock counts into a product catalog

mod exit_codes;
mod inspect;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use exit_codes::{
    EXIT_ERROR, EXIT_INVALID_CONFIG, EXIT_SINK, EXIT_SOURCE, EXIT_SUCCESS, EXIT_UNMATCHED,
    EXIT_USAGE,
};
use stockmerge_core::cell::Row;
use stockmerge_core::{report, MergeConfig};

#[derive(Parser)]
#[command(name = "stockmerge")]
#[command(about = "Merge counted stock into a product catalog by barcode")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a merge from a TOML config file
    #[command(after_help = "\
Exit code 3 (with --strict) indicates catalog rows whose barcode had no
stock count. Without --strict these are reported but exit 0.

Examples:
  stockmerge run merge.toml
  stockmerge run merge.toml --json | jq .summary
  stockmerge run merge.toml --output result.json
  stockmerge run merge.toml --strict --quiet")]
    Run {
        /// Path to the merge config file
        config: PathBuf,

        /// Output result JSON to stdout instead of the human report
        #[arg(long)]
        json: bool,

        /// Write result JSON to a file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Exit 3 when any catalog row is unmatched
        #[arg(long)]
        strict: bool,

        /// Suppress stderr progress and report output
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Validate a merge config without running it
    #[command(after_help = "\
Examples:
  stockmerge validate merge.toml")]
    Validate {
        /// Path to the merge config file
        config: PathBuf,
    },

    /// Show a file's layout: row counts plus sample rows with column letters
    #[command(after_help = "\
Prints 1-based row and column positions, so values can be copied straight
into a config file's data_start_row / key_column fields.

Examples:
  stockmerge inspect catalog.xlsx
  stockmerge inspect counts.xlsx --rows 3
  stockmerge inspect export.csv --rows 10")]
    Inspect {
        /// File to inspect (xlsx, xls, xlsb, ods, csv, tsv)
        file: PathBuf,

        /// Sheet name (Excel inputs; default is the first sheet)
        #[arg(long)]
        sheet: Option<String>,

        /// Number of sample rows to print
        #[arg(long, default_value = "5")]
        rows: usize,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run { config, json, output, strict, quiet } => {
            cmd_run(config, json, output, strict, quiet)
        }
        Commands::Validate { config } => cmd_validate(config),
        Commands::Inspect { file, sheet, rows } => inspect::cmd_inspect(file, sheet, rows),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self { code: EXIT_INVALID_CONFIG, message: msg.into(), hint: None }
    }

    pub fn source(msg: impl Into<String>) -> Self {
        Self { code: EXIT_SOURCE, message: msg.into(), hint: None }
    }

    pub fn sink(msg: impl Into<String>) -> Self {
        Self { code: EXIT_SINK, message: msg.into(), hint: None }
    }
}

// ============================================================================
// Format dispatch
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableFormat {
    Excel,
    Csv,
    Tsv,
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default()
}

fn infer_format(path: &Path) -> Result<TableFormat, CliError> {
    match extension_of(path).as_str() {
        "xlsx" | "xls" | "xlsb" | "ods" => Ok(TableFormat::Excel),
        "csv" => Ok(TableFormat::Csv),
        "tsv" => Ok(TableFormat::Tsv),
        _ => Err(CliError {
            code: EXIT_USAGE,
            message: format!("unsupported file format: {}", path.display()),
            hint: Some("expected .xlsx, .xls, .xlsb, .ods, .csv, or .tsv".into()),
        }),
    }
}

/// Read any supported tabular source. `sheet` applies to Excel inputs
/// and is ignored for delimited text.
fn read_table(path: &Path, sheet: Option<&str>) -> Result<Vec<Row>, CliError> {
    let rows = match infer_format(path)? {
        TableFormat::Excel => stockmerge_io::xlsx::read_rows(path, sheet),
        TableFormat::Csv => stockmerge_io::csv::read_rows(path, None),
        TableFormat::Tsv => stockmerge_io::csv::read_rows(path, Some(b'\t')),
    };
    rows.map_err(CliError::source)
}

/// Write the merged table. Excel export is xlsx only; the legacy Excel
/// formats are read-side.
fn write_table(
    path: &Path,
    sheet_name: &str,
    headers: &[String],
    rows: &[Row],
) -> Result<(), CliError> {
    let written = match extension_of(path).as_str() {
        "xlsx" => stockmerge_io::xlsx::write_rows(path, sheet_name, headers, rows),
        "csv" => stockmerge_io::csv::write_rows(path, headers, rows, b','),
        "tsv" => stockmerge_io::csv::write_rows(path, headers, rows, b'\t'),
        _ => {
            return Err(CliError {
                code: EXIT_USAGE,
                message: format!("unsupported output format: {}", path.display()),
                hint: Some("output.file must end in .xlsx, .csv, or .tsv".into()),
            });
        }
    };
    written.map_err(CliError::sink)
}

// ============================================================================
// Commands
// ============================================================================

fn cmd_run(
    config_path: PathBuf,
    json_output: bool,
    output_file: Option<PathBuf>,
    strict: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let config_str = std::fs::read_to_string(&config_path)
        .map_err(|e| CliError::config(format!("cannot read config: {}", e)))?;
    let config = MergeConfig::from_toml(&config_str).map_err(|e| CliError::config(e.to_string()))?;

    // Data files resolve relative to the config file's directory
    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
    let reference_path = base_dir.join(&config.reference.file);
    let target_path = base_dir.join(&config.target.file);
    let output_path = base_dir.join(&config.output.file);

    if !quiet {
        eprintln!("[1] reading reference: {}", reference_path.display());
    }
    let reference_rows = read_table(&reference_path, config.reference.sheet.as_deref())?;

    if !quiet {
        eprintln!("[2] reading catalog: {}", target_path.display());
    }
    let target_rows = read_table(&target_path, config.target.sheet.as_deref())?;

    if !quiet {
        eprintln!("[3] merging");
    }
    let run = stockmerge_core::run(&config, &reference_rows, &target_rows)
        .map_err(|e| CliError::config(e.to_string()))?;
    if !quiet {
        eprintln!("    {} reference keys loaded", run.result.reference_keys);
    }

    if !quiet {
        eprintln!("[4] writing merged sheet: {}", output_path.display());
    }
    write_table(&output_path, &config.output.sheet, &config.output.headers, &run.rows)?;

    let json_str = serde_json::to_string_pretty(&run.result).map_err(|e| CliError {
        code: EXIT_ERROR,
        message: format!("JSON serialization error: {}", e),
        hint: None,
    })?;

    if let Some(ref path) = output_file {
        std::fs::write(path, &json_str)
            .map_err(|e| CliError::sink(format!("cannot write {}: {}", path.display(), e)))?;
        if !quiet {
            eprintln!("wrote {}", path.display());
        }
    }

    if json_output {
        println!("{}", json_str);
    }

    if !quiet {
        eprintln!();
        eprintln!("{}", report::render(&run.result));
    }

    if strict && run.result.summary.unmatched > 0 {
        return Err(CliError {
            code: EXIT_UNMATCHED,
            message: format!("{} unmatched product(s)", run.result.summary.unmatched),
            hint: None,
        });
    }

    Ok(())
}

fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config_str = std::fs::read_to_string(&config_path)
        .map_err(|e| CliError::config(format!("cannot read config: {}", e)))?;

    match MergeConfig::from_toml(&config_str) {
        Ok(config) => {
            eprintln!(
                "valid: merge '{}' ({} -> {} -> {}, {} header columns)",
                config.name,
                config.reference.file,
                config.target.file,
                config.output.file,
                config.output.headers.len(),
            );
            Ok(())
        }
        Err(e) => Err(CliError::config(e.to_string())),
    }
}
