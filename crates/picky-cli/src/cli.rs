use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "picky",
    about = "Check the packages used by pip and conda against their specifications",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true, value_enum, default_value = "warn")]
    pub log_level: LogLevel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Check pip and conda packages against their requirements files
    Requirements(RequirementsArgs),
    /// Lock the current environment into a concrete specification on disk
    Lock(EnvArgs),
    /// Check that the concrete specification matches the current environment
    Check(EnvArgs),
}

#[derive(Args)]
pub struct RequirementsArgs {
    /// pip executable to query
    #[arg(long, default_value = "pip")]
    pub pip: String,
    /// conda executable to query
    #[arg(long, default_value = "conda")]
    pub conda: String,
    #[arg(long, default_value = "requirements.txt")]
    pub pip_requirements: PathBuf,
    #[arg(long, default_value = "conda_versions.txt")]
    pub conda_versions: PathBuf,
    /// Rewrite the requirements files to match what is installed
    #[arg(long)]
    pub update: bool,
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Args)]
pub struct EnvArgs {
    /// Location of the concrete specification
    #[arg(long, default_value = "environment.lock.yaml")]
    pub concrete: PathBuf,
    /// Optional picky configuration file
    #[arg(long, default_value = "picky.yaml")]
    pub config: PathBuf,
    /// conda executable used to export the current environment
    #[arg(long, default_value = "conda")]
    pub conda: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_requirements_defaults() {
        let cli = Cli::try_parse_from(["picky", "requirements"]).unwrap();
        assert_eq!(cli.log_level, LogLevel::Warn);
        let Command::Requirements(args) = cli.command else {
            panic!("wrong command");
        };
        assert_eq!(args.pip, "pip");
        assert_eq!(args.conda, "conda");
        assert_eq!(args.pip_requirements, PathBuf::from("requirements.txt"));
        assert_eq!(args.conda_versions, PathBuf::from("conda_versions.txt"));
        assert!(!args.update);
        assert_eq!(args.format, OutputFormat::Text);
    }

    #[test]
    fn parse_requirements_update() {
        let cli = Cli::try_parse_from([
            "picky",
            "requirements",
            "--pip",
            "/opt/pip",
            "--pip-requirements",
            "reqs.txt",
            "--update",
        ])
        .unwrap();
        let Command::Requirements(args) = cli.command else {
            panic!("wrong command");
        };
        assert_eq!(args.pip, "/opt/pip");
        assert_eq!(args.pip_requirements, PathBuf::from("reqs.txt"));
        assert!(args.update);
    }

    #[test]
    fn parse_json_format() {
        let cli = Cli::try_parse_from(["picky", "requirements", "--format", "json"]).unwrap();
        let Command::Requirements(args) = cli.command else {
            panic!("wrong command");
        };
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn parse_lock_defaults() {
        let cli = Cli::try_parse_from(["picky", "lock"]).unwrap();
        let Command::Lock(args) = cli.command else {
            panic!("wrong command");
        };
        assert_eq!(args.concrete, PathBuf::from("environment.lock.yaml"));
        assert_eq!(args.config, PathBuf::from("picky.yaml"));
        assert_eq!(args.conda, "conda");
    }

    #[test]
    fn parse_check_concrete() {
        let cli = Cli::try_parse_from(["picky", "check", "--concrete", "env.yaml"]).unwrap();
        let Command::Check(args) = cli.command else {
            panic!("wrong command");
        };
        assert_eq!(args.concrete, PathBuf::from("env.yaml"));
    }

    #[test]
    fn parse_log_level_anywhere() {
        let cli = Cli::try_parse_from(["picky", "-l", "debug", "check"]).unwrap();
        assert_eq!(cli.log_level, LogLevel::Debug);
        let cli = Cli::try_parse_from(["picky", "check", "--log-level", "info"]).unwrap();
        assert_eq!(cli.log_level, LogLevel::Info);
    }

    #[test]
    fn bad_log_level() {
        assert!(Cli::try_parse_from(["picky", "-l", "wrong", "check"]).is_err());
    }

    #[test]
    fn subcommand_required() {
        assert!(Cli::try_parse_from(["picky"]).is_err());
    }
}
