//! Core library for zokrates-bridge.
//!
//! Provides the [`engine`] that spawns the `zokrates` binary and classifies its outcome,
//! along with the pieces every operation adapter shares: the closed [`options`] tables,
//! filename [`naming`] rules, precondition checks in [`validate`], [`config`] loading and
//! the unified [`error`] type.
//!
//! The operations themselves (and the `Zokrates` facade) live in the
//! [`zokrates_bridge`](https://docs.rs/zokrates-bridge) crate.

pub mod capture;
pub mod config;
pub mod engine;
pub mod error;
pub mod invocation;
pub mod naming;
pub mod options;
pub mod validate;

pub use config::{InvokeOptions, ZokratesConfig};
pub use engine::ProcessExecutor;
pub use error::{Operation, Result, ZokratesError};
pub use invocation::{Executor, Invocation, InvocationFailure, Output};
pub use options::{Backend, Curve, ProvingScheme, SolidityAbi};
