use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glob::glob;
use mpview_core::{DecodeLimits, Report};

#[derive(Parser, Debug)]
#[command(name = "mpview")]
#[command(version)]
#[command(
    about = "Hex-inspector for MessagePack files: decodes into a labeled, offset-tagged tree.",
    long_about = None,
    after_help = "Examples:\n  mpview inspect data.msgpack --tree\n  mpview inspect data.msgpack -o report.json\n  mpview inspect data.msgpack --stdout --pretty"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode a MessagePack file and render the node tree.
    #[command(alias = "view")]
    #[command(
        after_help = "Examples:\n  mpview inspect data.msgpack --tree\n  mpview inspect data.msgpack -o report.json\n  mpview inspect data.msgpack --stdout --pretty"
    )]
    Inspect {
        /// Path to a MessagePack-encoded file (glob patterns allowed)
        input: PathBuf,

        /// Output report path (JSON)
        #[arg(short = 'o', long, required_unless_present_any = ["stdout", "tree"])]
        report: Option<PathBuf>,

        /// Write JSON report to stdout
        #[arg(long, conflicts_with = "report")]
        stdout: bool,

        /// Print a two-column text tree instead of a JSON report
        #[arg(long, conflicts_with_all = ["report", "stdout"])]
        tree: bool,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long)]
        compact: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,

        /// Exit with a non-zero code if the decode was truncated or incomplete
        #[arg(long)]
        strict: bool,

        /// Abort decoding after this many nodes
        #[arg(long)]
        max_nodes: Option<usize>,

        /// Abort decoding beyond this nesting depth
        #[arg(long)]
        max_depth: Option<usize>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Inspect {
            input,
            report,
            stdout,
            tree,
            pretty,
            compact,
            quiet,
            strict,
            max_nodes,
            max_depth,
        } => cmd_inspect(
            input, report, stdout, tree, pretty, compact, quiet, strict, max_nodes, max_depth,
        ),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(err.to_string(), None)
    }
}

fn cmd_inspect(
    input: PathBuf,
    report: Option<PathBuf>,
    stdout: bool,
    tree: bool,
    pretty: bool,
    compact: bool,
    quiet: bool,
    strict: bool,
    max_nodes: Option<usize>,
    max_depth: Option<usize>,
) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&input)?;
    validate_input_file(&resolved_input)?;

    let mut limits = DecodeLimits::default();
    if let Some(max_nodes) = max_nodes {
        limits.max_nodes = max_nodes;
    }
    if let Some(max_depth) = max_depth {
        limits.max_depth = max_depth;
    }

    let rep = mpview_core::inspect_file_with_limits(&resolved_input, limits)
        .with_context(|| format!("Failed to read input file: {}", resolved_input.display()))?;

    if tree {
        print_tree(&rep);
        warn_if_incomplete(&rep, quiet);
        return finish_strict(&rep, strict);
    }

    let json = serialize_report(&rep, pretty, compact)?;

    if stdout {
        print!("{}", json);
        warn_if_incomplete(&rep, quiet);
        return finish_strict(&rep, strict);
    }

    let report = report.ok_or_else(|| {
        CliError::new(
            "missing output path",
            Some("use -o/--report, --stdout, or --tree".to_string()),
        )
    })?;
    if let Some(parent) = report.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }

    fs::write(&report, json)
        .with_context(|| format!("Failed to write report: {}", report.display()))?;

    warn_if_incomplete(&rep, quiet);
    if !quiet {
        eprintln!("OK: report written -> {}", report.display());
    }
    finish_strict(&rep, strict)
}

/// Two-column text view: label, then the offset of the node's tag byte in
/// hexadecimal, with children indented under their container.
fn print_tree(rep: &Report) {
    println!("{:<56}  {}", "Data (Type/Value/...)", "Offset in HEX (Byte)");
    for row in rep.tree.rows() {
        let label = format!("{}{}", "  ".repeat(row.depth), row.node.label);
        println!("{:<56}  0x{:08X}", label, row.node.offset);
    }
}

fn warn_if_incomplete(rep: &Report, quiet: bool) {
    if quiet {
        return;
    }
    if let Some(error) = rep.summary.error.as_deref() {
        eprintln!("warning: {}", error);
    }
}

fn finish_strict(rep: &Report, strict: bool) -> Result<(), CliError> {
    if strict && !rep.summary.complete {
        return Err(CliError::new(
            "decode errors detected",
            Some("rerun without --strict to inspect the partial tree".to_string()),
        ));
    }
    Ok(())
}

fn serialize_report(rep: &Report, pretty: bool, compact: bool) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    if pretty {
        serde_json::to_string_pretty(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn validate_input_file(input: &PathBuf) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("pass a MessagePack-encoded file".to_string()),
        ));
    }
    let meta = fs::metadata(input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;
    if !meta.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("pass a MessagePack-encoded file".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &PathBuf) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.clone());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        ));
    }
    if matches.len() > 1 {
        let hint = "pass a single file, or run once per file".to_string();
        let mut message = format!(
            "multiple files match pattern '{}' ({} matches)",
            pattern,
            matches.len()
        );
        let listed = matches.iter().take(3).collect::<Vec<_>>();
        if !listed.is_empty() {
            let mut details = String::new();
            details.push_str("; matches: ");
            details.push_str(
                &listed
                    .into_iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            );
            if matches.len() > 3 {
                details.push_str(", ...");
            }
            message.push_str(&details);
        }
        return Err(CliError::new(message, Some(hint)));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
