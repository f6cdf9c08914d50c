//! The composable statement list.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::{placeholder_tokens, CompilationMetadata, DependencySet, PlaceholderSet, VariablePlaceholder};

/// Ordered statements plus the metadata needed to render them.
///
/// The last statement is the value-producing expression of the fragment;
/// everything before it is setup that must run first, in order. Every
/// compositional operation consumes `self` and returns a new value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompilableSource {
    statements: Vec<String>,
    #[serde(flatten)]
    metadata: CompilationMetadata,
}

impl CompilableSource {
    pub fn new(statements: Vec<String>, metadata: CompilationMetadata) -> Self {
        Self {
            statements,
            metadata,
        }
    }

    /// A single-statement fragment with no metadata.
    pub fn statement(statement: impl Into<String>) -> Self {
        Self::new(vec![statement.into()], CompilationMetadata::new())
    }

    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    pub fn final_statement(&self) -> Option<&str> {
        self.statements.last().map(String::as_str)
    }

    pub fn metadata(&self) -> &CompilationMetadata {
        &self.metadata
    }

    pub fn dependencies(&self) -> &DependencySet {
        &self.metadata.dependencies
    }

    pub fn exports(&self) -> &PlaceholderSet {
        &self.metadata.exports
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn into_parts(self) -> (Vec<String>, CompilationMetadata) {
        (self.statements, self.metadata)
    }

    // ── Composition ──────────────────────────────────────────────────────────

    /// Union this fragment's metadata with that of `others`.
    ///
    /// Statements are left untouched; only `self`'s statements survive.
    pub fn merge<'a>(self, others: impl IntoIterator<Item = &'a CompilableSource>) -> Self {
        let metadata = self.metadata.merge(others.into_iter().map(|other| &other.metadata));
        Self {
            statements: self.statements,
            metadata,
        }
    }

    pub fn with_additional_statements<S: Into<String>>(
        mut self,
        statements: impl IntoIterator<Item = S>,
    ) -> Self {
        self.statements.extend(statements.into_iter().map(Into::into));
        self
    }

    pub fn with_metadata(mut self, metadata: CompilationMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_additional_metadata(mut self, metadata: &CompilationMetadata) -> Self {
        self.metadata = self.metadata.merge([metadata]);
        self
    }

    pub fn with_additional_exports<'a>(
        mut self,
        placeholders: impl IntoIterator<Item = &'a VariablePlaceholder>,
    ) -> Self {
        self.metadata = self.metadata.with_additional_exports(placeholders);
        self
    }

    /// Render the whole fragment as one textual unit, pass it through
    /// `template` and return the single resulting statement carrying the
    /// union of the old metadata and `extra`.
    pub fn extend(
        self,
        template: impl FnOnce(&str) -> String,
        extra: &CompilationMetadata,
    ) -> Self {
        let rendered = self.statements.join("\n");
        Self {
            statements: vec![template(&rendered)],
            metadata: self.metadata.merge([extra]),
        }
    }

    /// Rewrite the value-producing statement. No-op on an empty fragment.
    pub fn map_final_statement(mut self, f: impl FnOnce(&str) -> String) -> Self {
        if let Some(last) = self.statements.last_mut() {
            *last = f(last);
        }
        self
    }

    /// Prepend the statements of `predecessors`, in order, and merge their
    /// metadata.
    pub fn with_predecessors(self, predecessors: impl IntoIterator<Item = CompilableSource>) -> Self {
        let mut statements = Vec::new();
        let mut metadata = Vec::new();
        for predecessor in predecessors {
            let (predecessor_statements, predecessor_metadata) = predecessor.into_parts();
            statements.extend(predecessor_statements);
            metadata.push(predecessor_metadata);
        }
        statements.extend(self.statements);
        Self {
            statements,
            metadata: self.metadata.merge(&metadata),
        }
    }

    /// Concatenate statements in order and merge all metadata.
    pub fn concat(sources: impl IntoIterator<Item = CompilableSource>) -> Self {
        let mut sources = sources.into_iter();
        match sources.next() {
            Some(first) => sources.fold(first, |acc, next| {
                let (statements, metadata) = next.into_parts();
                acc.with_additional_statements(statements)
                    .with_additional_metadata(&metadata)
            }),
            None => Self::default(),
        }
    }

    /// Placeholder tokens used by the statements but absent from the exports.
    ///
    /// Empty for every fragment the transpiler produces.
    pub fn dangling_placeholders(&self) -> Vec<String> {
        let exported: HashSet<String> = self.exports().iter().map(ToString::to_string).collect();
        let mut seen = HashSet::new();
        self.statements
            .iter()
            .flat_map(|statement| placeholder_tokens(statement))
            .filter(|token| !exported.contains(*token) && seen.insert(*token))
            .map(str::to_string)
            .collect()
    }
}

impl fmt::Display for CompilableSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.statements.join("\n"))
    }
}
