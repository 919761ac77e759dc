// crates/bc_cli/src/args.rs
//
// Offline CLI argument surface.
//
// - Pricing comes from a local file (--pricing) or the built-in table
// - Features: manual flags override whatever the blueprint heuristic extracts
// - Projection: --years-ahead directly, or --target-year minus --current-year
//   (current year defaults to the system clock)

use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

use bc_pipeline::ProjectionBasis;

/// Parsed CLI arguments.
#[derive(Debug, Parser, Clone)]
#[command(
    name = "bce",
    disable_help_subcommand = true,
    about = "Offline building construction cost estimator"
)]
pub struct Args {
    // --- Configuration ---
    /// Pricing table JSON path (default: built-in table).
    #[arg(long)]
    pub pricing: Option<PathBuf>,

    // --- Request ---
    /// City name; aliases such as Bengaluru or Bombay are accepted.
    #[arg(long, default_value = "Chennai")]
    pub city: String,
    /// Quality tier (economical|basic, standard, premium, high-end).
    #[arg(long, default_value = "standard")]
    pub quality: String,
    #[arg(long, default_value_t = 2)]
    pub floors: u32,

    // --- Feature overrides ---
    /// Built-up area in sqft (replaces any extracted value).
    #[arg(long, allow_negative_numbers = true)]
    pub area: Option<f64>,
    /// Room count (advisory).
    #[arg(long)]
    pub rooms: Option<u32>,
    /// Total wall length in ft (advisory).
    #[arg(long, allow_negative_numbers = true)]
    pub wall_length: Option<f64>,

    // --- Blueprint heuristic ---
    /// Blueprint image width in pixels.
    #[arg(long, requires = "blueprint_height")]
    pub blueprint_width: Option<u32>,
    /// Blueprint image height in pixels.
    #[arg(long, requires = "blueprint_width")]
    pub blueprint_height: Option<u32>,

    // --- Projection ---
    #[arg(long, default_value_t = 2026)]
    pub target_year: i32,
    /// Defaults to the current calendar year.
    #[arg(long)]
    pub current_year: Option<i32>,
    /// Years to project; overrides --target-year/--current-year. Negative means zero.
    #[arg(long, allow_negative_numbers = true, conflicts_with_all = ["current_year"])]
    pub years_ahead: Option<i32>,
    /// Annual inflation rate (default 0.07). Must be > -1.
    #[arg(long, allow_negative_numbers = true)]
    pub inflation_rate: Option<f64>,
    /// Which total the projection inflates.
    #[arg(long, value_enum, default_value_t = BasisArg::Predicted)]
    pub projection_basis: BasisArg,

    // --- Output & control ---
    /// Also write the record as canonical JSON to this path.
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Resolve and validate the request, print the report, do not estimate.
    #[arg(long)]
    pub validate_only: bool,
    /// Only log errors.
    #[arg(long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BasisArg {
    Breakdown,
    Predicted,
}

impl From<BasisArg> for ProjectionBasis {
    fn from(b: BasisArg) -> Self {
        match b {
            BasisArg::Breakdown => ProjectionBasis::Breakdown,
            BasisArg::Predicted => ProjectionBasis::Predicted,
        }
    }
}

/// Errors surfaced by argument validation.
#[derive(Debug)]
pub enum CliError {
    NonLocalPath(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::NonLocalPath(p) => write!(f, "path must be local file (no scheme): {p}"),
        }
    }
}
impl std::error::Error for CliError {}

/// Entry point used by main.rs
pub fn parse_and_validate() -> Result<Args, CliError> {
    let args = Args::parse();
    for p in [args.pricing.as_deref(), args.out.as_deref()].into_iter().flatten() {
        ensure_local_path(p)?;
    }
    Ok(args)
}

/// Reject any explicit URI scheme (e.g., http://, https://, file://).
#[inline]
fn has_scheme(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    lower.contains("://") || lower.starts_with("http:") || lower.starts_with("https:") || lower.starts_with("file:")
}

#[inline]
fn ensure_local_path(p: &Path) -> Result<(), CliError> {
    if let Some(s) = p.to_str() {
        if has_scheme(s) {
            return Err(CliError::NonLocalPath(s.to_string()));
        }
    }
    Ok(())
}
