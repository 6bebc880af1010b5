//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::config::CONFIG_ENV;

/// New England Airport Explorer
///
/// Interactive dashboard over a table of New England airports. Filter by
/// state, elevation, airport size and scheduled service.
///
/// Examples:
///   airport-explorer
///   airport-explorer data/new_england_airports.parquet
///   airport-explorer --config ./airport_explorer.json
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Airport table to load (.csv, .json or .parquet)
    ///
    /// Overrides `data_path` from the config file.
    #[arg(value_name = "FILE")]
    pub data_path: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for airport_explorer.json in the current directory
    #[arg(short, long, value_name = "FILE", env = CONFIG_ENV)]
    pub config: Option<PathBuf>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_data_path() {
        let args = Args::try_parse_from(["airport-explorer", "airports.parquet"]).unwrap();
        assert_eq!(args.data_path, Some(PathBuf::from("airports.parquet")));
    }

    #[test]
    fn test_config_flag() {
        let args =
            Args::try_parse_from(["airport-explorer", "--config", "custom.json", "a.csv"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("custom.json")));
        assert_eq!(args.data_path, Some(PathBuf::from("a.csv")));
    }

    #[test]
    fn test_help_is_not_a_data_path() {
        let err = Args::try_parse_from(["airport-explorer", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);

        let err = Args::try_parse_from(["airport-explorer", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_args_definition() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
