use anyhow::{Context, Result};
use picky_env::{EnvironmentDescriptor, PickyConfig};

use crate::handler::run_captured;

/// Export the active conda environment and filter it through `config`.
pub fn current_environment(conda: &str, config: &PickyConfig) -> Result<EnvironmentDescriptor> {
    let executable = which::which(conda).with_context(|| format!("{conda} could not be found"))?;
    let mut args = vec!["env", "export"];
    if !config.detail.includes_build() {
        args.push("--no-builds");
    }
    let exported = run_captured(&executable, &args)?;
    let raw = EnvironmentDescriptor::from_yaml_str(&exported)
        .context("could not parse conda env export output")?;
    Ok(raw.modified(&config.ignore, &config.develop))
}
