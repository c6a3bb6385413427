//! Remote execution boundary.
//!
//! The push-down core hands a [`crate::pushdown::CompiledQuery`] across this
//! boundary; everything here performs I/O and nothing here influences the
//! push-down decision. Failures propagate as [`ExecError`] - a failed query
//! is never reported as an empty result.

pub mod adapter;
pub mod registry;
pub mod session;

pub use adapter::{RegionExecutor, Row};
pub use registry::{global, SessionRegistry};
pub use session::{ExecError, ExecResult, RegionSession};
