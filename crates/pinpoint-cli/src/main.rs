//! Pinpoint CLI: locator synthesis from DOM snapshots
//!
//! ## Usage
//!
//! ```bash
//! pinpoint synth page.json --id submit-btn              # All configured dialects
//! pinpoint synth page.json --path 0.2 -d playwright     # One dialect
//! pinpoint synth - --attr data-testid --format json     # Snapshot on stdin
//! pinpoint dialects                                     # Supported dialects
//! pinpoint config                                       # Effective configuration
//! ```

use clap::Parser;
use pinpoint_cli::{
    handlers, logging, Cli, CliConfig, CliResult, ColorChoice, Commands, Verbosity,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    let config = build_config(&cli)?;
    logging::init(config.verbosity);
    console::set_colors_enabled(config.color.should_color());

    let output = match &cli.command {
        Commands::Synth(args) => handlers::synth::execute_synth(&config, args)?,
        Commands::Dialects => handlers::dialects::execute_dialects()?,
        Commands::Config(args) => handlers::config::execute_config(&config, args)?,
    };
    if !config.verbosity.is_quiet() {
        println!("{output}");
    }
    Ok(())
}

/// Config file values, overridden by any flag the user passed
fn build_config(cli: &Cli) -> CliResult<CliConfig> {
    let mut config = CliConfig::discover(cli.config.as_deref())?;

    if cli.quiet || cli.verbose > 0 {
        config = config.with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose));
    }
    if let Some(color) = cli.color {
        config = config.with_color(ColorChoice::from(color));
    }
    Ok(config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "verbosity: debug\ncolor: always").unwrap();
        let path = file.path().to_str().unwrap();

        let config =
            build_config(&parse(&["pinpoint", "-q", "--color", "never", "-c", path, "dialects"]))
                .unwrap();
        assert_eq!(config.verbosity, Verbosity::Quiet);
        assert_eq!(config.color, ColorChoice::Never);
    }

    #[test]
    fn test_file_values_survive_without_flags() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "verbosity: verbose").unwrap();
        let path = file.path().to_str().unwrap();

        let config = build_config(&parse(&["pinpoint", "-c", path, "dialects"])).unwrap();
        assert_eq!(config.verbosity, Verbosity::Verbose);
        assert_eq!(config.color, ColorChoice::Auto);
    }
}
