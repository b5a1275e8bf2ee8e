//! Pinpoint: stable, accessibility-first locator synthesis
//!
//! Given a point-in-time snapshot of one DOM element, Pinpoint generates
//! every locator it can (role, test id, placeholder, text, label, alt text,
//! title, CSS), ranks them by stability, scores the CSS fallback and renders
//! the result as ready-to-paste code for Playwright, Cypress or Testing
//! Library.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────┐   ┌──────────────┐   ┌────────────┐   ┌────────────┐
//! │ ElementHandle │──►│ Element      │──►│ Strategies │──►│ Ranker +   │
//! │ (live / JSON) │   │ Descriptor   │   │ (8, pure)  │   │ Quality    │
//! └───────────────┘   └──────────────┘   └────────────┘   └─────┬──────┘
//!                                                              │
//!                     ┌──────────────────────────────────┐     │
//!                     │ Dialects: playwright / cypress / │◄────┘
//!                     │ testing-library                  │
//!                     └──────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use pinpoint::prelude::*;
//!
//! let descriptor = ElementDescriptor::builder("button")
//!     .id("submit-btn")
//!     .text("Submit")
//!     .build()?;
//! let set = synthesize(&descriptor)?;
//!
//! assert_eq!(set.primary.strategy_type, StrategyType::Role);
//! assert_eq!(
//!     render(&set, Dialect::Playwright).recommended,
//!     "page.getByRole('button', { name: 'Submit' })"
//! );
//! # Ok::<(), pinpoint::PinpointError>(())
//! ```

#![warn(missing_docs)]

mod descriptor;
mod dialect;
mod dom;
mod extract;
mod paths;
mod pipeline;
mod quality;
mod ranker;
mod result;
mod strategy;

pub use descriptor::{
    cap_text, collapse_whitespace, split_classes, AncestorSegment, BoundingBox,
    DescriptorBuilder, ElementDescriptor, ELLIPSIS, MAX_TEXT_CONTENT_CHARS, STYLE_ALLOW_LIST,
};
pub use dialect::{
    render, render_all, render_named, Cypress, Dialect, DialectEmitter, DialectRendering,
    Playwright, RenderedAlternative, TestingLibrary,
};
pub use dom::{DomTree, NodeId, NodeRef, SnapshotElement, SnapshotNode};
pub use extract::{extract, is_event_handler, ElementHandle};
pub use paths::{
    css_escape_ident, css_escape_string, css_path, is_safe_id, xpath, CSS_COMBINATOR,
    SAFE_ID_PATTERN,
};
pub use pipeline::{synthesize, synthesize_element};
pub use quality::{reliability, specificity, Reliability, CLASS_WEIGHT, ID_WEIGHT, TAG_WEIGHT};
pub use ranker::{rank, LocatorSet, Ranking};
pub use result::{PinpointError, PinpointResult};
pub use strategy::{
    accessible_name, by_alt_text, by_css, by_label, by_placeholder, by_role, by_test_id, by_text,
    by_title, css_fallback, escape_literal, generate_all, implicit_role, Literal,
    LocatorCandidate, LocatorExpression, StrategyType, MAX_TEXT_LOCATOR_CHARS,
    TEST_ID_ATTRIBUTES,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::dialect::{render, render_all, render_named, Dialect, DialectRendering};
    pub use super::descriptor::{AncestorSegment, BoundingBox, ElementDescriptor};
    pub use super::dom::DomTree;
    pub use super::extract::{extract, ElementHandle};
    pub use super::pipeline::{synthesize, synthesize_element};
    pub use super::quality::Reliability;
    pub use super::ranker::LocatorSet;
    pub use super::result::{PinpointError, PinpointResult};
    pub use super::strategy::{Literal, LocatorCandidate, LocatorExpression, StrategyType};
}
