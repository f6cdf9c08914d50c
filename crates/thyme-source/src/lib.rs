//! Composable intermediate representation for transpiled thyme tests.
//!
//! A [`CompilableSource`] is an ordered list of statements plus
//! [`CompilationMetadata`]: the external class dependencies the statements
//! need and the [`VariablePlaceholder`]s they export. The final statement is
//! the value-producing expression; every earlier statement is setup.
//!
//! Placeholders render as `{{ NAME }}` template tokens. An external renderer
//! assigns concrete names and emits the dependency declarations.

mod assignment;
mod dependency;
mod metadata;
mod placeholder;
mod source;

pub use assignment::VariableAssignment;
pub use dependency::{ClassDependency, DependencySet};
pub use metadata::CompilationMetadata;
pub use placeholder::{placeholder_tokens, PlaceholderSet, VariablePlaceholder};
pub use source::CompilableSource;
