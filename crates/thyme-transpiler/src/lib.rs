//! Thyme transpiler: turns the test model into compilable source.
//!
//! # Architecture
//!
//! ```text
//! Step → Category Dispatcher → Node Transpiler → Call Factories → CompilableSource
//! ```
//!
//! Each model category (value, identifier, action, assertion) has a
//! [`Dispatcher`] holding an ordered list of [`NodeTranspiler`] rules. The
//! first rule whose `handles` accepts a node transpiles it; there is no
//! backtracking. Rules build their output from the [`call_factory`]
//! builders, which keep dependencies and exported placeholders attached to
//! every fragment as it is composed.
//!
//! Output statements contain `{{ NAME }}` placeholder tokens. Every token
//! that appears in a result is listed in its exports.

pub mod action;
pub mod assertion;
pub mod call_factory;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod escape;
pub mod identifier;
pub mod names;
pub mod transpiler;
pub mod value;

pub use config::TranspilerConfig;
pub use dispatch::{Dispatcher, NodeTranspiler};
pub use error::{TranspileError, TranspileResult};
pub use transpiler::{transpile, Transpiler};
