//! Top-level entry point.
//!
//! Builds one dispatcher per model category from a [`TranspilerConfig`] and
//! routes each node to it. A step is transpiled by running every action and
//! then every assertion through the dispatchers and concatenating the
//! results.

use std::sync::Arc;

use thyme_source::CompilableSource;
use thyme_types::{Action, Assertion, Identifier, Step, Value};
use tracing::{debug, debug_span};

use crate::call_factory::VariableAssignmentFactory;
use crate::config::TranspilerConfig;
use crate::dispatch::Dispatcher;
use crate::error::TranspileResult;
use crate::{action, assertion, identifier, value};

// ══════════════════════════════════════════════════════════════════════════════
// Public API
// ══════════════════════════════════════════════════════════════════════════════

/// Transpile `step` with every rule enabled.
pub fn transpile(step: &Step) -> TranspileResult<CompilableSource> {
    Transpiler::new().transpile_step(step)
}

// ══════════════════════════════════════════════════════════════════════════════
// Transpiler
// ══════════════════════════════════════════════════════════════════════════════

/// Holds no per-call state; one instance may serve any number of
/// independent calls, including from several threads.
#[derive(Debug)]
pub struct Transpiler {
    config: Arc<TranspilerConfig>,
    values: Arc<Dispatcher<Value>>,
    identifiers: Dispatcher<Identifier>,
    actions: Dispatcher<Action>,
    assertions: Dispatcher<Assertion>,
}

impl Default for Transpiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Transpiler {
    pub fn new() -> Self {
        Self::with_config(TranspilerConfig::default())
    }

    /// Build the dispatchers, leaving out the rules `config` disables.
    pub fn with_config(config: TranspilerConfig) -> Self {
        let config = Arc::new(config);

        let mut values = value::dispatcher();
        values.retain_enabled(&config);
        let values = Arc::new(values);

        let factory = Arc::new(VariableAssignmentFactory::new(values.clone(), config.clone()));

        let mut identifiers = identifier::dispatcher();
        identifiers.retain_enabled(&config);
        let mut actions = action::dispatcher(factory.clone());
        actions.retain_enabled(&config);
        let mut assertions = assertion::dispatcher(factory);
        assertions.retain_enabled(&config);

        debug!(
            values = ?values.names(),
            identifiers = ?identifiers.names(),
            actions = ?actions.names(),
            assertions = ?assertions.names(),
            "transpiler configured"
        );

        Self {
            config,
            values,
            identifiers,
            actions,
            assertions,
        }
    }

    pub fn config(&self) -> &TranspilerConfig {
        &self.config
    }

    pub fn values(&self) -> &Dispatcher<Value> {
        &self.values
    }

    pub fn identifiers(&self) -> &Dispatcher<Identifier> {
        &self.identifiers
    }

    pub fn actions(&self) -> &Dispatcher<Action> {
        &self.actions
    }

    pub fn assertions(&self) -> &Dispatcher<Assertion> {
        &self.assertions
    }

    pub fn transpile_value(&self, value: &Value) -> TranspileResult<CompilableSource> {
        self.values.transpile(value)
    }

    pub fn transpile_identifier(&self, identifier: &Identifier) -> TranspileResult<CompilableSource> {
        self.identifiers.transpile(identifier)
    }

    pub fn transpile_action(&self, action: &Action) -> TranspileResult<CompilableSource> {
        self.actions.transpile(action)
    }

    pub fn transpile_assertion(&self, assertion: &Assertion) -> TranspileResult<CompilableSource> {
        self.assertions.transpile(assertion)
    }

    /// Actions first, then assertions, each in order. The first failure
    /// aborts the step.
    pub fn transpile_step(&self, step: &Step) -> TranspileResult<CompilableSource> {
        let _span = debug_span!("step", %step).entered();

        let mut parts = Vec::with_capacity(step.actions.len() + step.assertions.len());
        for action in &step.actions {
            parts.push(self.transpile_action(action)?);
        }
        for assertion in &step.assertions {
            parts.push(self.transpile_assertion(assertion)?);
        }

        let source = CompilableSource::concat(parts);
        debug!(statements = source.statements().len(), "step transpiled");
        Ok(source)
    }
}
