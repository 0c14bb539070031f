use std::path::PathBuf;

use clap::{Args, Parser};

/// Environment variable naming the dataset when no path argument is given.
pub const DATA_ENV_VAR: &str = "HEALTHCARE_DATA";

/// Dataset location used when neither argument nor env var is set.
pub const DEFAULT_DATA_PATH: &str = "assets/healthcare_dataset.csv";

// ---------------------------------------------------------------------------
// Startup configuration
// ---------------------------------------------------------------------------

/// Where the dataset comes from. Shared by every binary that loads it.
///
/// Precedence: positional argument, then `HEALTHCARE_DATA`, then
/// [`DEFAULT_DATA_PATH`].
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct DataSource {
    /// CSV file with the healthcare records.
    #[arg(value_name = "CSV_PATH", env = DATA_ENV_VAR, default_value = DEFAULT_DATA_PATH)]
    pub data_path: PathBuf,
}

/// Command line of the desktop dashboard.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "healthcare-dashboard",
    version,
    about = "Filterable charts over a healthcare-records CSV."
)]
pub struct DashboardConfig {
    #[command(flatten)]
    pub source: DataSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<DashboardConfig, clap::Error> {
        DashboardConfig::try_parse_from(std::iter::once("healthcare-dashboard").chain(args.iter().copied()))
    }

    // One test owns the env var so parallel tests never observe it half-set.
    #[test]
    fn test_data_path_precedence() {
        std::env::remove_var(DATA_ENV_VAR);
        let cfg = parse(&[]).unwrap();
        assert_eq!(cfg.source.data_path, PathBuf::from(DEFAULT_DATA_PATH));

        std::env::set_var(DATA_ENV_VAR, "b.csv");
        let from_env = parse(&[]).unwrap();
        let from_arg = parse(&["a.csv"]).unwrap();
        std::env::remove_var(DATA_ENV_VAR);

        assert_eq!(from_env.source.data_path, PathBuf::from("b.csv"));
        assert_eq!(from_arg.source.data_path, PathBuf::from("a.csv"));
    }

    #[test]
    fn test_help_is_not_a_path() {
        let err = parse(&["--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_unknown_and_extra_arguments_rejected() {
        assert!(parse(&["--verbose"]).is_err());
        assert!(parse(&["a.csv", "b.csv"]).is_err());
    }
}
