//! Config command handler

use crate::commands::ConfigArgs;
use crate::config::CliConfig;
use crate::error::CliResult;

/// Execute the config command: YAML of the effective (or default) config
pub fn execute_config(config: &CliConfig, args: &ConfigArgs) -> CliResult<String> {
    if args.defaults {
        CliConfig::new().to_yaml()
    } else {
        config.to_yaml()
    }
}
