use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use glob::glob;
use sfftool_core::{ChecksumPolicy, DecodeOptions, DecodeReport, StandardVariant};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("SFFTOOL_BUILD_COMMIT"),
    " ",
    env!("SFFTOOL_BUILD_DATE"),
    ")"
);

const EXAMPLES: &str = "Examples:\n  sfftool decode eth0.bin --standard sff8472 -o module.json\n  sfftool decode dump.hex --type-code 3 --stdout --pretty\n  sfftool decode 'dumps/*.hex' --stdout --view-only";

#[derive(Parser, Debug)]
#[command(name = "sfftool")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Decoder for pluggable transceiver EEPROM dumps (SFF-8079 / SFF-8472 / SFF-8636).",
    long_about = None,
    after_help = EXAMPLES
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG applies otherwise
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode an EEPROM dump and write a versioned JSON report.
    #[command(after_help = EXAMPLES)]
    Decode(DecodeArgs),
    /// List the supported standards with their type codes.
    Standards,
}

#[derive(clap::Args, Debug)]
struct DecodeArgs {
    /// Binary dump or hex text (whitespace, `0x` prefixes and `:` separators allowed)
    input: PathBuf,

    /// Memory map standard: sff8079, sff8472, sff8636, sff8436 or auto
    #[arg(long, default_value = "auto", conflicts_with = "type_code")]
    standard: String,

    /// ethtool module-info type code (1 = SFF-8079 ... 4 = SFF-8436)
    #[arg(long)]
    type_code: Option<u32>,

    /// Output report path (JSON)
    #[arg(short = 'o', long, required_unless_present = "stdout")]
    output: Option<PathBuf>,

    /// Write JSON report to stdout
    #[arg(long, conflicts_with = "output")]
    stdout: bool,

    /// Pretty-print JSON output
    #[arg(long, conflicts_with = "compact")]
    pretty: bool,

    /// Compact JSON output (default)
    #[arg(long)]
    compact: bool,

    /// Emit only the standard-independent view
    #[arg(long)]
    view_only: bool,

    /// Which checksum mismatches abort the decode
    #[arg(long, value_enum)]
    checksum: Option<ChecksumArg>,

    /// Report raw firmware readings, skipping external calibration
    #[arg(long)]
    raw_readings: bool,

    /// Decoder options as JSON; flags override values from the file
    #[arg(long, value_name = "FILE")]
    options: Option<PathBuf>,

    /// Suppress non-error output
    #[arg(long)]
    quiet: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum ChecksumArg {
    Strict,
    Diagnostics,
    Ignore,
}

impl From<ChecksumArg> for ChecksumPolicy {
    fn from(arg: ChecksumArg) -> Self {
        match arg {
            ChecksumArg::Strict => ChecksumPolicy::Strict,
            ChecksumArg::Diagnostics => ChecksumPolicy::DiagnosticsOnly,
            ChecksumArg::Ignore => ChecksumPolicy::Ignore,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let quiet = matches!(&cli.command, Commands::Decode(args) if args.quiet);
    init_tracing(cli.verbose, quiet);

    let result = match cli.command {
        Commands::Decode(args) => cmd_decode(args),
        Commands::Standards => cmd_standards(),
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

fn init_tracing(verbose: u8, quiet: bool) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(if quiet { "error" } else { "warn" })),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
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
        CliError::new(format!("{err:#}"), None)
    }
}

impl From<sfftool_core::DecodeError> for CliError {
    fn from(err: sfftool_core::DecodeError) -> Self {
        use sfftool_core::DecodeError;
        let hint = match &err {
            DecodeError::TooShort { .. } => {
                Some("dump the full EEPROM (ethtool -m <iface> raw on)".to_string())
            }
            DecodeError::ChecksumMismatch { .. } => {
                Some("re-read the module, or pass --checksum ignore to inspect anyway".to_string())
            }
            DecodeError::UnknownModuleType { .. } | DecodeError::UnknownStandard { .. } => {
                Some("run `sfftool standards` for the supported values".to_string())
            }
            _ => None,
        };
        CliError::new(format!("decode failed: {err}"), hint)
    }
}

fn cmd_standards() -> Result<(), CliError> {
    println!("{:<10} {:>4} {:>9}", "STANDARD", "CODE", "MIN BYTES");
    for variant in StandardVariant::ALL {
        println!(
            "{:<10} {:>4} {:>9}",
            variant.name(),
            variant.code(),
            variant.min_len()
        );
    }
    Ok(())
}

fn cmd_decode(args: DecodeArgs) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&args.input)?;
    validate_input_file(&resolved_input)?;
    if args.pretty && args.compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }

    let output = if args.stdout {
        None
    } else {
        let path = args.output.clone().ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--output or --stdout".to_string()),
            )
        })?;
        ensure_distinct_output(&resolved_input, &path)?;
        Some(path)
    };

    let options = load_options(&args)?;
    let contents = fs::read(&resolved_input)
        .with_context(|| format!("Failed to read input file: {}", resolved_input.display()))?;
    let image = parse_image(contents)?;
    let variant = resolve_variant(&args, &image)?;
    info!(
        input = %resolved_input.display(),
        variant = %variant,
        len = image.len(),
        "decoding dump"
    );

    let module = sfftool_core::decode(variant, &image, &options)?;
    let input_label = resolved_input.display().to_string();
    let mut report = DecodeReport::new(&input_label, image.len() as u64, module);
    if let Ok(now) = OffsetDateTime::now_utc().format(&Rfc3339) {
        report.generated_at = now;
    }
    if args.view_only {
        report = report.view_only();
    }
    let json = serialize_report(&report, args.pretty)?;

    let Some(output) = output else {
        println!("{}", json);
        return Ok(());
    };

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    fs::write(&output, json)
        .with_context(|| format!("Failed to write report: {}", output.display()))?;

    if !args.quiet {
        eprintln!("OK: report written -> {}", output.display());
    }
    Ok(())
}

fn load_options(args: &DecodeArgs) -> Result<DecodeOptions, CliError> {
    let mut options = match &args.options {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read options file: {}", path.display()))?;
            serde_json::from_str(&text).map_err(|err| {
                CliError::new(
                    format!("invalid options file '{}': {}", path.display(), err),
                    Some(
                        r#"expected e.g. {"checksum_policy":"strict","apply_calibration":true}"#
                            .to_string(),
                    ),
                )
            })?
        }
        None => DecodeOptions::default(),
    };
    if let Some(checksum) = args.checksum {
        options.checksum_policy = checksum.into();
    }
    if args.raw_readings {
        options.apply_calibration = false;
    }
    debug!(?options, "decoder options");
    Ok(options)
}

fn resolve_variant(args: &DecodeArgs, image: &[u8]) -> Result<StandardVariant, CliError> {
    if let Some(code) = args.type_code {
        return Ok(StandardVariant::from_code(code)?);
    }
    if !args.standard.eq_ignore_ascii_case("auto") {
        return Ok(args.standard.parse::<StandardVariant>()?);
    }
    let identifier = image.first().copied().ok_or_else(|| {
        CliError::new(
            "input is empty",
            Some("dump the module EEPROM first".to_string()),
        )
    })?;
    match identifier {
        0x03 => Ok(StandardVariant::Sff8472),
        0x0C => Ok(StandardVariant::Sff8436),
        0x0D | 0x11 => Ok(StandardVariant::Sff8636),
        other => Err(CliError::new(
            format!("cannot guess the standard from identifier {other:#04x}"),
            Some("pass --standard or --type-code".to_string()),
        )),
    }
}

/// Accept hex text when the whole file is hex digits and separators,
/// otherwise treat it as a binary image.
fn parse_image(contents: Vec<u8>) -> Result<Vec<u8>, CliError> {
    match std::str::from_utf8(&contents) {
        Ok(text) if looks_like_hex(text) => parse_hex_text(text),
        _ => Ok(contents),
    }
}

fn looks_like_hex(text: &str) -> bool {
    !text.trim().is_empty()
        && text.chars().all(|c| {
            c.is_ascii_hexdigit() || c.is_ascii_whitespace() || matches!(c, ':' | ',' | 'x' | 'X')
        })
}

fn parse_hex_text(text: &str) -> Result<Vec<u8>, CliError> {
    let mut digits = String::with_capacity(text.len());
    for token in text
        .split(|c: char| c.is_ascii_whitespace() || c == ':' || c == ',')
        .filter(|token| !token.is_empty())
    {
        let token = token
            .strip_prefix("0x")
            .or_else(|| token.strip_prefix("0X"))
            .unwrap_or(token);
        digits.push_str(token);
    }
    if digits.len() % 2 != 0 {
        return Err(CliError::new(
            format!("hex input has an odd number of digits ({})", digits.len()),
            Some("each byte needs two hex digits".to_string()),
        ));
    }
    digits
        .as_bytes()
        .chunks(2)
        .map(|pair| {
            std::str::from_utf8(pair)
                .ok()
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| {
                    CliError::new(
                        format!("invalid hex byte '{}'", String::from_utf8_lossy(pair)),
                        Some("only 0x prefixes may contain a non-hex character".to_string()),
                    )
                })
        })
        .collect()
}

fn serialize_report(report: &DecodeReport, pretty: bool) -> Result<String, CliError> {
    if pretty {
        serde_json::to_string_pretty(report)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(report)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn ensure_distinct_output(input: &Path, output: &Path) -> Result<(), CliError> {
    let input_abs = fs::canonicalize(input)
        .with_context(|| format!("Failed to resolve input path: {}", input.display()))?;
    let Some(name) = output.file_name() else {
        return Err(CliError::new(
            format!("invalid output path: {}", output.display()),
            Some("pass a file path to -o/--output".to_string()),
        ));
    };
    let parent = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    // A missing parent is created later and cannot hold the input.
    if let Ok(parent_abs) = fs::canonicalize(parent) {
        if parent_abs.join(name) == input_abs {
            return Err(CliError::new(
                format!("output path must differ from input: {}", output.display()),
                Some("choose a different output path".to_string()),
            ));
        }
    }
    Ok(())
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("pass a binary or hex EEPROM dump".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("pass a binary or hex EEPROM dump".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
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

    match matches.len() {
        0 => Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        )),
        1 => Ok(matches.remove(0)),
        count => {
            let mut listed = matches
                .iter()
                .take(3)
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            if count > 3 {
                listed.push_str(", ...");
            }
            Err(CliError::new(
                format!(
                    "multiple files match pattern '{}' ({} matches); matches: {}",
                    pattern, count, listed
                ),
                Some("pass a single dump, or run once per file".to_string()),
            ))
        }
    }
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_text_with_separators() {
        let image = parse_image(b"0x03 04:07\n20,0A".to_vec()).unwrap();
        assert_eq!(image, vec![0x03, 0x04, 0x07, 0x20, 0x0A]);
    }

    #[test]
    fn binary_input_passes_through() {
        let raw = vec![0x03, 0x04, 0xFF, 0x00];
        assert_eq!(parse_image(raw.clone()).unwrap(), raw);
    }

    #[test]
    fn odd_hex_digit_count_is_rejected() {
        let err = parse_image(b"03 4".to_vec()).unwrap_err();
        assert!(err.message.contains("odd number"));
    }

    #[test]
    fn glob_detection() {
        assert!(is_glob_pattern("dumps/*.hex"));
        assert!(!is_glob_pattern("dumps/eth0.hex"));
    }
}
