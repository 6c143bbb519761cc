//! Command-line argument parsing.
//!
//! Flags only adjust the session configuration built from the
//! environment; everything else happens in the interactive console.

use std::path::PathBuf;

use crate::startup::{SessionConfig, SyncPolicy};

pub const USAGE: &str =
    "usage: authenticator [--store <path>] [--manual-sync] [--verbose] [--version]";

/// Options for an interactive session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub store: Option<PathBuf>,
    pub verbose: bool,
    pub manual_sync: bool,
}

impl RunOptions {
    /// Layer the flags over a config (flags win over the environment).
    pub fn apply(&self, mut config: SessionConfig) -> SessionConfig {
        if let Some(store) = &self.store {
            config.store_path = Some(store.clone());
        }
        if self.manual_sync {
            config.sync_policy = SyncPolicy::Manual;
        }
        config
    }
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Run the interactive account list (default)
    Run(RunOptions),
    /// Arguments could not be parsed
    Usage(String),
}

/// Parse command-line arguments (typically `std::env::args()`).
///
/// # Examples
///
/// ```
/// use authenticator::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["authenticator".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    let mut options = RunOptions::default();
    // Skip the program name
    let mut args = args.skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return CliCommand::Version,
            "--verbose" | "-v" => options.verbose = true,
            "--manual-sync" => options.manual_sync = true,
            "--store" => match args.next() {
                Some(path) if !path.starts_with('-') => options.store = Some(PathBuf::from(path)),
                _ => return CliCommand::Usage("--store needs a path".to_string()),
            },
            other => return CliCommand::Usage(format!("unknown argument: {other}")),
        }
    }
    CliCommand::Run(options)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliCommand {
        let args: Vec<String> = std::iter::once("authenticator")
            .chain(args.iter().copied())
            .map(String::from)
            .collect();
        parse_args(args.into_iter())
    }

    #[test]
    fn test_parse_version_flags() {
        assert_eq!(parse(&["--version"]), CliCommand::Version);
        assert_eq!(parse(&["-v", "-V"]), CliCommand::Version);
    }

    #[test]
    fn test_parse_no_args() {
        assert_eq!(parse(&[]), CliCommand::Run(RunOptions::default()));
    }

    #[test]
    fn test_parse_run_options() {
        let command = parse(&["--store", "/tmp/a.json", "--manual-sync", "-v"]);
        assert_eq!(
            command,
            CliCommand::Run(RunOptions {
                store: Some(PathBuf::from("/tmp/a.json")),
                verbose: true,
                manual_sync: true,
            })
        );
    }

    #[test]
    fn test_parse_store_without_path() {
        assert!(matches!(parse(&["--store"]), CliCommand::Usage(_)));
        assert!(matches!(parse(&["--store", "--verbose"]), CliCommand::Usage(_)));
    }

    #[test]
    fn test_parse_unknown_flag() {
        assert_eq!(
            parse(&["--unknown"]),
            CliCommand::Usage("unknown argument: --unknown".to_string())
        );
    }

    #[test]
    fn test_apply_overrides_config() {
        let options = RunOptions {
            store: Some(PathBuf::from("/tmp/b.json")),
            verbose: false,
            manual_sync: true,
        };
        let config = options.apply(SessionConfig::default().with_cloud_sync(true));
        assert_eq!(config.store_path, Some(PathBuf::from("/tmp/b.json")));
        assert_eq!(config.sync_policy, SyncPolicy::Manual);
        assert!(!config.syncs_on_launch());
    }
}
