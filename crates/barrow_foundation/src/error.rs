//! Error types for the Barrow simulation core.
//!
//! Uses `thiserror` for ergonomic error definition. Every variant here is a
//! fault: an invariant violation that must propagate to the caller. Expected
//! "nothing found" outcomes (a missing component, an unreachable goal) are
//! ordinary return values and never appear in this taxonomy.

use thiserror::Error;

use crate::entity::{EntityId, MapId};
use crate::types::ComponentKind;

/// The main error type for Barrow operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind }
    }

    /// Creates a component type mismatch error.
    #[must_use]
    pub fn type_mismatch(expected: ComponentKind, actual: ComponentKind) -> Self {
        Self::new(ErrorKind::TypeMismatch { expected, actual })
    }

    /// Creates a duplicate live id error.
    #[must_use]
    pub fn duplicate_id(id: EntityId) -> Self {
        Self::new(ErrorKind::DuplicateId(id))
    }

    /// Creates a malformed join error.
    #[must_use]
    pub fn malformed_join(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedJoin(message.into()))
    }

    /// Creates an unknown command error.
    #[must_use]
    pub fn unknown_command(command: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownCommand(command.into()))
    }

    /// Creates an unknown map error.
    #[must_use]
    pub fn unknown_map(map: MapId) -> Self {
        Self::new(ErrorKind::UnknownMap(map))
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A component of the wrong kind was inserted into a store.
    #[error("type mismatch: store holds {expected}, got {actual}")]
    TypeMismatch {
        /// The kind the store declares.
        expected: ComponentKind,
        /// The kind of the offending value.
        actual: ComponentKind,
    },

    /// An explicit id was restored while already live.
    #[error("duplicate entity id: {0:?} is already live")]
    DuplicateId(EntityId),

    /// Join arguments do not describe the joined columns.
    #[error("malformed join: {0}")]
    MalformedJoin(String),

    /// A symbolic command string outside the vocabulary.
    #[error("unknown command: {0:?}")]
    UnknownCommand(String),

    /// A map id with no registered tile map.
    #[error("unknown map: {0}")]
    UnknownMap(MapId),

    /// An internal fault, such as exhausting the entity id space.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias using Barrow's Error.
pub type Result<T> = std::result::Result<T, Error>;
