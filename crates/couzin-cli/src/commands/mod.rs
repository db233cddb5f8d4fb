//! CLI command implementations.

pub mod init;
pub mod run;
pub mod consensus;
pub mod probe;

use anyhow::Result;
use crate::config::Config;

/// Load the project config and apply the overrides shared by every command.
pub(crate) fn load_config(agents: Option<usize>, seed: Option<u64>) -> Result<Config> {
    let mut config = Config::load()?;
    if let Some(n) = agents {
        config.board.agent_count = n;
    }
    if let Some(seed) = seed {
        config.board.seed = seed;
    }
    config.validate()?;
    Ok(config)
}

/// `0.123456` or `-` for graphs too small to have a Fiedler value.
pub(crate) fn fmt_fiedler(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.6}", v))
}
