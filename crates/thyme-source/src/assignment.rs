//! Binding a fragment's value to a placeholder.

use std::fmt;

use serde::Serialize;

use crate::{CompilableSource, CompilationMetadata, VariablePlaceholder};

/// `target = <final statement of wrapped>`, preceded by every predecessor.
///
/// Construction always exports `target` from the wrapped source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariableAssignment {
    target: VariablePlaceholder,
    wrapped: CompilableSource,
    predecessors: Vec<CompilableSource>,
}

impl VariableAssignment {
    pub fn new(target: VariablePlaceholder, wrapped: CompilableSource) -> Self {
        let wrapped = wrapped.with_additional_exports([&target]);
        Self {
            target,
            wrapped,
            predecessors: Vec::new(),
        }
    }

    pub fn target(&self) -> &VariablePlaceholder {
        &self.target
    }

    pub fn wrapped(&self) -> &CompilableSource {
        &self.wrapped
    }

    pub fn predecessors(&self) -> &[CompilableSource] {
        &self.predecessors
    }

    /// Append `predecessors` after any already present.
    pub fn with_predecessors(mut self, predecessors: impl IntoIterator<Item = CompilableSource>) -> Self {
        self.predecessors.extend(predecessors);
        self
    }

    /// Predecessor statements in list order, then the wrapped setup
    /// statements, then the assignment line.
    pub fn statements(&self) -> Vec<String> {
        let mut statements: Vec<String> = self
            .predecessors
            .iter()
            .flat_map(|predecessor| predecessor.statements().iter().cloned())
            .collect();

        if let Some((last, setup)) = self.wrapped.statements().split_last() {
            statements.extend(setup.iter().cloned());
            statements.push(format!("{} = {}", self.target, last));
        }

        statements
    }

    pub fn metadata(&self) -> CompilationMetadata {
        self.wrapped
            .metadata()
            .clone()
            .merge(self.predecessors.iter().map(CompilableSource::metadata))
    }

    pub fn into_source(self) -> CompilableSource {
        let statements = self.statements();
        let metadata = self.metadata();
        CompilableSource::new(statements, metadata)
    }
}

impl From<VariableAssignment> for CompilableSource {
    fn from(assignment: VariableAssignment) -> Self {
        assignment.into_source()
    }
}

impl fmt::Display for VariableAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.statements().join("\n"))
    }
}
