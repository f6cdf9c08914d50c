//! Node transpilers and first-match category dispatch.

use std::fmt;

use thyme_source::CompilableSource;
use thyme_types::ModelNode;
use tracing::debug;

use crate::config::TranspilerConfig;
use crate::error::{TranspileError, TranspileResult};

/// A rule converting one model variant into compilable source.
///
/// `transpile` re-validates its input rather than trusting a prior
/// `handles` call, and fails with `NonTranspilableModel` for any node
/// `handles` would reject.
pub trait NodeTranspiler<N>: Send + Sync {
    /// Rule name, as accepted by `TranspilerConfig::from_skip_list`.
    fn name(&self) -> &'static str;

    /// Cheap, side-effect-free compatibility test. Never fails.
    fn handles(&self, node: &N) -> bool;

    fn transpile(&self, node: &N) -> TranspileResult<CompilableSource>;
}

/// An ordered list of rules for one model category.
///
/// The first rule whose `handles` accepts a node is selected. Errors raised
/// by the selected rule propagate as-is; later rules are never tried.
pub struct Dispatcher<N> {
    transpilers: Vec<Box<dyn NodeTranspiler<N>>>,
}

impl<N: ModelNode> Dispatcher<N> {
    pub fn new(transpilers: Vec<Box<dyn NodeTranspiler<N>>>) -> Self {
        Self { transpilers }
    }

    /// Append a rule with the lowest priority.
    pub fn push(&mut self, transpiler: Box<dyn NodeTranspiler<N>>) {
        self.transpilers.push(transpiler);
    }

    /// Drop the rules `config` disables, keeping the order of the rest.
    pub fn retain_enabled(&mut self, config: &TranspilerConfig) {
        self.transpilers
            .retain(|transpiler| config.is_enabled(transpiler.name()));
    }

    /// Rule names in priority order.
    pub fn names(&self) -> Vec<&'static str> {
        self.transpilers.iter().map(|t| t.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.transpilers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transpilers.is_empty()
    }

    fn select(&self, node: &N) -> Option<&dyn NodeTranspiler<N>> {
        self.transpilers
            .iter()
            .find(|transpiler| transpiler.handles(node))
            .map(|transpiler| transpiler.as_ref())
    }

    pub fn handles(&self, node: &N) -> bool {
        self.select(node).is_some()
    }

    pub fn transpile(&self, node: &N) -> TranspileResult<CompilableSource> {
        match self.select(node) {
            Some(transpiler) => {
                debug!(category = %N::CATEGORY, rule = transpiler.name(), %node, "rule selected");
                transpiler.transpile(node)
            }
            None => {
                debug!(category = %N::CATEGORY, %node, "no rule matched");
                Err(TranspileError::non_transpilable_model(node))
            }
        }
    }
}

impl<N> fmt::Debug for Dispatcher<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.transpilers.iter().map(|t| t.name()))
            .finish()
    }
}
