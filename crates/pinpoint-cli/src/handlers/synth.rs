//! Synth command handler

use pinpoint::{render_named, synthesize_element, DomTree, NodeRef, PinpointError};
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

use crate::commands::{SynthArgs, Target};
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::{OutputFormat, SynthReport};

/// Read a snapshot from a file, or stdin for `-`
pub fn read_snapshot(path: &Path) -> CliResult<String> {
    if path.as_os_str() == "-" {
        let mut json = String::new();
        std::io::stdin().read_to_string(&mut json)?;
        return Ok(json);
    }
    std::fs::read_to_string(path).map_err(|e| {
        CliError::invalid_argument(format!("cannot read snapshot {}: {e}", path.display()))
    })
}

/// Resolve the target element
pub fn locate<'a>(tree: &'a DomTree, target: &Target) -> CliResult<NodeRef<'a>> {
    let found = match target {
        Target::Id(id) => tree.find_by_id(id),
        Target::Path(path) => tree.at_path(path),
        Target::Attribute(name) => tree.find_by_attribute(name),
    };
    found.ok_or_else(|| {
        CliError::element_not_found(format!("{} matches no element", target.describe()))
    })
}

/// Build the report for a snapshot already in memory
pub fn synth_report(
    json: &str,
    target: &Target,
    dialects: &[String],
) -> CliResult<SynthReport> {
    let tree = DomTree::from_json(json)?;
    info!(nodes = tree.len(), "snapshot indexed");

    let element = locate(&tree, target)?;
    let locators = synthesize_element(&element)?;

    let mut renderings = Vec::with_capacity(dialects.len());
    let mut unsupported = Vec::new();
    for name in dialects {
        match render_named(&locators, name) {
            Ok(rendering) => renderings.push(rendering),
            Err(PinpointError::UnsupportedDialect { name }) => {
                warn!(dialect = %name, "unsupported dialect, falling back to abstract candidates");
                unsupported.push(name);
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(SynthReport {
        target: target.describe(),
        locators,
        renderings,
        unsupported,
    })
}

/// Execute the synth command
pub fn execute_synth(config: &CliConfig, args: &SynthArgs) -> CliResult<String> {
    let target = args.target()?;
    let dialects: Vec<String> = if args.dialects.is_empty() {
        config.dialects.iter().map(ToString::to_string).collect()
    } else {
        args.dialects.clone()
    };
    let format = args.format.map_or(config.format, OutputFormat::from);

    let json = read_snapshot(&args.snapshot)?;
    synth_report(&json, &target, &dialects)?.render(format)
}
