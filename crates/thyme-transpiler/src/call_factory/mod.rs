//! Builders for the recurring IR shapes.
//!
//! Node transpilers compose these rather than assembling statement text
//! themselves. Every factory that allocates a per-lookup placeholder takes
//! the caller's scope so that repeated lookups within one composed fragment
//! receive distinct tokens.

pub mod assertion;
pub mod element;
pub mod element_locator;
pub mod navigator;
pub mod variable_assignment;

use thyme_source::{CompilableSource, VariablePlaceholder};

pub use navigator::NavigatorMethod;
pub use variable_assignment::VariableAssignmentFactory;

/// A single statement exporting `placeholders`.
pub(crate) fn exporting<'a>(
    statement: impl Into<String>,
    placeholders: impl IntoIterator<Item = &'a VariablePlaceholder>,
) -> CompilableSource {
    CompilableSource::statement(statement).with_additional_exports(placeholders)
}
