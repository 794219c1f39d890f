use std::io::IsTerminal;

use anyhow::{Context, Result};
use colored::Colorize;
use picky_env::{diff_environments, EnvironmentDescriptor, EnvironmentDiff, PickyConfig};
use tracing::{error, info, warn};

use crate::cli::{Cli, Command, EnvArgs, OutputFormat, RequirementsArgs};
use crate::export::current_environment;
use crate::handler::{Handler, Manager};
use crate::reconcile;

/// Run the parsed command, returning the process exit status.
pub fn run_command(cli: Cli) -> Result<u8> {
    match cli.command {
        Command::Requirements(args) => cmd_requirements(&args),
        Command::Lock(args) => cmd_lock(&args),
        Command::Check(args) => cmd_check(&args),
    }
}

fn cmd_requirements(args: &RequirementsArgs) -> Result<u8> {
    let mut pip = Handler::load(Manager::Pip, &args.pip, &args.pip_requirements)?;
    let mut conda = Handler::load(Manager::Conda, &args.conda, &args.conda_versions)?;

    if !pip.is_available() && !conda.is_available() {
        error!("Neither {} nor {} could be found", args.pip, args.conda);
        return Ok(2);
    }

    let now = chrono::Local::now().naive_local();
    let drift = reconcile::detect(&mut pip, &mut conda, now)?;

    match args.format {
        OutputFormat::Text => {
            for finding in drift.findings() {
                warn!("{finding}");
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&drift.findings())?);
        }
    }

    if args.update {
        reconcile::update(&mut pip, &drift.pip, now)?;
        reconcile::update(&mut conda, &drift.conda, now)?;
    }

    Ok(drift.exit_code())
}

fn cmd_lock(args: &EnvArgs) -> Result<u8> {
    let config = PickyConfig::load(&args.config)?;
    let env = current_environment(&args.conda, &config)?;
    std::fs::write(&args.concrete, env.to_yaml_string()?)
        .with_context(|| format!("failed to write {}", args.concrete.display()))?;
    info!("Locked {} packages into '{}'", env.len(), args.concrete.display());
    Ok(0)
}

fn cmd_check(args: &EnvArgs) -> Result<u8> {
    let config = PickyConfig::load(&args.config)?;
    let expected = EnvironmentDescriptor::from_path(&args.concrete)?;
    let actual = current_environment(&args.conda, &config)?;
    let diff = diff_environments(&expected, &actual)?;
    print_diff(&diff);
    Ok(diff.exit_code())
}

fn print_diff(diff: &EnvironmentDiff) {
    if diff.is_empty() {
        return;
    }
    let rendered = diff.to_string();
    if !std::io::stdout().is_terminal() {
        print!("{rendered}");
        return;
    }
    for line in rendered.lines() {
        if line.starts_with("---") || line.starts_with("+++") {
            println!("{}", line.bold());
        } else if line.starts_with("@@") {
            println!("{}", line.cyan());
        } else if line.starts_with('+') {
            println!("{}", line.green());
        } else if line.starts_with('-') {
            println!("{}", line.red());
        } else {
            println!("{line}");
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::fs;
    use std::path::Path;

    use tracing::level_filters::LevelFilter;

    use super::*;
    use crate::testing::{capture, serial, stub};

    const EXPORT: &str = "\
name: package
channels:
- defaults
dependencies:
- python=3.6.5=0
- pip:
  - attrs==17.4.0
";

    fn env_args(dir: &Path, conda: &Path) -> EnvArgs {
        EnvArgs {
            concrete: dir.join("environment.lock.yaml"),
            config: dir.join("picky.yaml"),
            conda: conda.to_str().unwrap().to_string(),
        }
    }

    fn requirements_args(dir: &Path, update: bool) -> RequirementsArgs {
        RequirementsArgs {
            pip: dir.join("pip").to_str().unwrap().to_string(),
            conda: dir.join("conda").to_str().unwrap().to_string(),
            pip_requirements: dir.join("requirements.txt"),
            conda_versions: dir.join("conda_versions.txt"),
            update,
            format: OutputFormat::Text,
        }
    }

    #[test]
    fn lock_then_check_in_sync() {
        let _guard = serial();
        let dir = tempfile::tempdir().unwrap();
        let conda = stub(dir.path(), "conda", EXPORT);
        let args = env_args(dir.path(), &conda);

        assert_eq!(cmd_lock(&args).unwrap(), 0);
        assert_eq!(fs::read_to_string(&args.concrete).unwrap(), EXPORT);
        assert_eq!(cmd_check(&args).unwrap(), 0);
    }

    #[test]
    fn check_reports_drift() {
        let _guard = serial();
        let dir = tempfile::tempdir().unwrap();
        let conda = stub(dir.path(), "conda", EXPORT);
        let args = env_args(dir.path(), &conda);
        fs::write(&args.concrete, "dependencies:\n- python=3.6.5=0\n").unwrap();

        assert_eq!(cmd_check(&args).unwrap(), 1);
    }

    #[test]
    fn check_without_lock_file_is_an_error() {
        let _guard = serial();
        let dir = tempfile::tempdir().unwrap();
        let conda = stub(dir.path(), "conda", EXPORT);
        assert!(cmd_check(&env_args(dir.path(), &conda)).is_err());
    }

    #[test]
    fn lock_applies_config() {
        let _guard = serial();
        let dir = tempfile::tempdir().unwrap();
        let conda = stub(dir.path(), "conda", EXPORT);
        let args = env_args(dir.path(), &conda);
        fs::write(&args.config, "ignore:\n- attrs\n").unwrap();

        cmd_lock(&args).unwrap();
        assert_eq!(
            fs::read_to_string(&args.concrete).unwrap(),
            "name: package\nchannels:\n- defaults\ndependencies:\n- python=3.6.5=0\n"
        );
    }

    #[test]
    fn requirements_without_any_manager() {
        let _guard = serial();
        let dir = tempfile::tempdir().unwrap();
        let args = requirements_args(dir.path(), true);
        let (code, logs) = capture(LevelFilter::INFO, || cmd_requirements(&args).unwrap());
        assert_eq!(code, 2);
        assert_eq!(
            logs,
            vec![format!("ERROR Neither {} nor {} could be found", args.pip, args.conda)]
        );
        assert!(!dir.path().join("requirements.txt").exists());
        assert!(!dir.path().join("conda_versions.txt").exists());
    }

    #[test]
    fn requirements_update_then_in_sync() {
        let _guard = serial();
        let dir = tempfile::tempdir().unwrap();
        stub(dir.path(), "pip", "b==4.1\n");
        stub(dir.path(), "conda", "c=1.0=py_0\n");

        let (code, logs) = capture(LevelFilter::WARN, || {
            cmd_requirements(&requirements_args(dir.path(), true)).unwrap()
        });
        assert_eq!(code, 1);
        assert_eq!(
            logs,
            vec![
                "WARN b 4.1 missing from requirements.txt".to_string(),
                "WARN c 1.0 missing from conda_versions.txt".to_string(),
                format!("WARN Updating '{}'", dir.path().join("requirements.txt").display()),
                format!("WARN Updating '{}'", dir.path().join("conda_versions.txt").display()),
            ]
        );

        let (code, logs) = capture(LevelFilter::WARN, || {
            cmd_requirements(&requirements_args(dir.path(), false)).unwrap()
        });
        assert_eq!(code, 0);
        assert!(logs.is_empty());
    }
}
