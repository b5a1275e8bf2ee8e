//! End-to-end synthesis: descriptor in, ranked locator set out.

use tracing::debug;

use crate::descriptor::ElementDescriptor;
use crate::extract::{extract, ElementHandle};
use crate::quality::{reliability, specificity};
use crate::ranker::{rank, LocatorSet};
use crate::result::{PinpointError, PinpointResult};
use crate::strategy::{css_fallback, generate_all, Literal};

/// Generate, rank and score every locator for one descriptor.
///
/// Pure: equal descriptors give equal sets. The CSS strategy never
/// abstains, so a validated descriptor always yields a primary.
///
/// # Errors
///
/// Returns [`PinpointError::InvalidArgument`] when the descriptor fails
/// validation.
pub fn synthesize(descriptor: &ElementDescriptor) -> PinpointResult<LocatorSet> {
    descriptor.validate()?;

    let ranking = rank(generate_all(descriptor)).ok_or_else(|| {
        PinpointError::invalid_argument(format!(
            "no locator candidates for <{}>",
            descriptor.tag()
        ))
    })?;

    let set = LocatorSet {
        specificity: specificity(&css_fallback(descriptor)),
        reliability: reliability(descriptor),
        css_path: descriptor.css_path(),
        xpath: Literal::new(descriptor.xpath()),
        primary: ranking.primary,
        alternatives: ranking.alternatives,
    };

    debug!(
        tag = descriptor.tag(),
        primary = %set.primary.strategy_type,
        candidates = set.alternatives.len(),
        specificity = set.specificity,
        reliability = %set.reliability,
        "locator set synthesized"
    );
    Ok(set)
}

/// Extract a live element, then synthesize
///
/// # Errors
///
/// Propagates extraction and validation errors.
pub fn synthesize_element<E: ElementHandle>(element: &E) -> PinpointResult<LocatorSet> {
    synthesize(&extract(element)?)
}
