//! Dialects command handler

use console::style;
use pinpoint::{render, synthesize, Dialect, ElementDescriptor};
use std::fmt::Write;

use crate::error::CliResult;

const fn aliases(dialect: Dialect) -> &'static str {
    match dialect {
        Dialect::Playwright => "pw",
        Dialect::Cypress => "cy",
        Dialect::TestingLibrary => "testinglibrary, testing_library, rtl",
    }
}

/// List every dialect with its aliases and a sample rendering
pub fn execute_dialects() -> CliResult<String> {
    let sample = ElementDescriptor::builder("button").text("Submit").build()?;
    let set = synthesize(&sample)?;

    let mut out = String::new();
    for dialect in Dialect::ALL {
        let rendering = render(&set, dialect);
        let _ = writeln!(
            out,
            "{:<16} {} {}",
            style(dialect).bold(),
            style("aliases:").dim(),
            aliases(dialect)
        );
        let _ = writeln!(out, "{:<16} {}", "", rendering.recommended);
    }
    Ok(out.trim_end().to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_every_dialect() {
        console::set_colors_enabled(false);
        let out = execute_dialects().unwrap();
        for dialect in Dialect::ALL {
            assert!(out.contains(dialect.name()));
        }
        assert!(out.contains("screen.getByRole('button', { name: 'Submit' })"));
    }

    #[test]
    fn test_aliases_parse_back() {
        for dialect in Dialect::ALL {
            for alias in aliases(dialect).split(", ") {
                assert_eq!(alias.parse::<Dialect>().unwrap(), dialect);
            }
        }
    }
}
