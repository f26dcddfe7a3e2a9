use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::Parser;

use crate::badge::DEFAULT_BUILD_TYPE;
use crate::geometry::Scale;

/// Printed to stdout when required arguments are missing. It lists the
/// build type as well although only the first four are enforced.
pub const USAGE: &str = "\
You need to provide the following arguments in order:
1. Relative path for main AppIcon folder
2. Relative path for main Output Icon folder
3. Build version string
4. Build number string
5. Build type string (max 2 characters)";

#[derive(Parser, Debug)]
#[command(
    name = "iconbadge",
    version,
    about = "Stamp build version, number and type onto app icons over a frosted-glass band"
)]
pub struct Cli {
    /// Directory searched recursively for icons
    pub source_dir: PathBuf,

    /// Directory the badged icons are written to (flat)
    pub output_dir: PathBuf,

    /// Build version string, e.g. 1.2.3
    #[arg(allow_hyphen_values = true)]
    pub build_version: String,

    /// Build number string, e.g. 456
    #[arg(allow_hyphen_values = true)]
    pub build_number: String,

    /// Build type label, about two characters
    #[arg(default_value = DEFAULT_BUILD_TYPE, allow_hyphen_values = true)]
    pub build_type: String,

    /// Output pixels per source pixel
    #[arg(long, default_value = "1.0", value_parser = parse_scale)]
    pub scale: Scale,

    /// Do not print per-file status lines
    #[arg(short, long)]
    pub quiet: bool,

    /// Extra trailing arguments are accepted and ignored
    #[arg(hide = true, allow_hyphen_values = true)]
    pub extra: Vec<String>,
}

fn parse_scale(s: &str) -> Result<Scale, String> {
    let ratio: f64 = s.parse().map_err(|e| format!("{e}"))?;
    Scale::new(ratio).ok_or_else(|| format!("scale must be a positive number, got {ratio}"))
}

pub enum ParseOutcome {
    Run(Cli),
    /// Not enough positional arguments; the caller prints [`USAGE`] and
    /// exits with status 1.
    Usage,
}

pub fn parse_from<I, T>(args: I) -> Result<ParseOutcome, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Ok(ParseOutcome::Run(cli)),
        Err(err) if err.kind() == ErrorKind::MissingRequiredArgument => Ok(ParseOutcome::Usage),
        Err(err) => Err(err),
    }
}
