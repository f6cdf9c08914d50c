//! Dependency and export metadata carried by every fragment.

use serde::Serialize;

use crate::{DependencySet, PlaceholderSet, VariablePlaceholder};

/// What a fragment needs from outside (`dependencies`) and which
/// placeholders it makes visible to the enclosing scope (`exports`).
///
/// `merge` is associative, commutative and idempotent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompilationMetadata {
    pub dependencies: DependencySet,
    pub exports: PlaceholderSet,
}

impl CompilationMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dependencies(mut self, dependencies: DependencySet) -> Self {
        self.dependencies = dependencies;
        self
    }

    pub fn with_exports(mut self, exports: PlaceholderSet) -> Self {
        self.exports = exports;
        self
    }

    /// Add `placeholders` to the existing exports.
    pub fn with_additional_exports<'a>(
        mut self,
        placeholders: impl IntoIterator<Item = &'a VariablePlaceholder>,
    ) -> Self {
        for placeholder in placeholders {
            self.exports.insert(placeholder.clone());
        }
        self
    }

    pub fn merge<'a>(self, others: impl IntoIterator<Item = &'a CompilationMetadata>) -> Self {
        let others: Vec<&CompilationMetadata> = others.into_iter().collect();
        Self {
            dependencies: self
                .dependencies
                .merge(others.iter().map(|other| &other.dependencies)),
            exports: self.exports.merge(others.iter().map(|other| &other.exports)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(dependencies: &[&str], exports: &[&str]) -> CompilationMetadata {
        CompilationMetadata::new()
            .with_dependencies(DependencySet::from_names(dependencies.iter().copied()))
            .with_exports(PlaceholderSet::from_names(exports.iter().copied()))
    }

    #[test]
    fn test_merge_unions_both_sets() {
        let merged = metadata(&["ElementLocator"], &["NAVIGATOR"])
            .merge([&metadata(&["LocatorType"], &["TEST_CONTEXT", "NAVIGATOR"])]);
        assert_eq!(
            merged,
            metadata(&["ElementLocator", "LocatorType"], &["NAVIGATOR", "TEST_CONTEXT"])
        );
    }

    #[test]
    fn test_merge_with_nothing_is_identity() {
        let original = metadata(&["ElementLocator"], &["NAVIGATOR"]);
        assert_eq!(original.clone().merge(Vec::<&CompilationMetadata>::new()), original);
    }

    #[test]
    fn test_with_additional_exports_keeps_existing() {
        let extended = metadata(&[], &["A"])
            .with_additional_exports([&VariablePlaceholder::new("B")]);
        assert_eq!(extended.exports, PlaceholderSet::from_names(["A", "B"]));
    }
}
