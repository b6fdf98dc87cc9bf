//! Error taxonomy for node-graph mutation and strategy evaluation
//!
//! These are local, recoverable errors surfaced at the selector / node-attach
//! boundary. The projection engine itself is total and never returns them.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("node '{0}' is not a skeleton node; drivers attach only under skeleton parents")]
    NotSkeleton(String),

    #[error("node '{0}' is not a driver node")]
    NotDriver(String),

    #[error("driver '{0}' already attached")]
    DuplicateDriver(String),

    #[error("driver '{driver}' is not attached to '{parent}'")]
    DriverNotAttached { parent: String, driver: String },

    #[error("node '{0}' not found in skeleton")]
    UnknownNode(String),

    #[error("unknown strategy: {0}")]
    UnknownStrategy(String),

    #[error("{strategy} strategy requires '{driver}' driver")]
    MissingDriver { strategy: &'static str, driver: String },

    #[error("{strategy} strategy requires a non-zero prior-year value")]
    MissingBaseline { strategy: &'static str },
}
