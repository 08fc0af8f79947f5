//! Error types for the action plan library.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::{NodeId, NodeKind};

/// Comprehensive error type for all action plan operations.
#[derive(Error, Debug)]
pub enum PlanError {
    /// No node with the given ID exists in the plan
    #[error("Node with ID {id} not found")]
    NodeNotFound { id: NodeId },
    /// A node exists but sits at a different level than the path expects
    #[error("Node {id} has kind {actual}, expected {expected}")]
    WrongKind {
        id: NodeId,
        expected: NodeKind,
        actual: NodeKind,
    },
    /// A node exists but is not a child of the given parent
    #[error("Node {id} is not a child of {parent}")]
    NotAChild { id: NodeId, parent: NodeId },
    /// Node path text could not be parsed
    #[error("Invalid node path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },
    /// Adding the dependency would close a cycle in the dependency graph
    #[error("Node {from} cannot depend on {to}: would create a circular dependency")]
    CircularDependency { from: NodeId, to: NodeId },
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Every id up to `NodeId::MAX` has been handed out
    #[error("No node ids left: the plan has used every id up to {}", NodeId::MAX)]
    IdsExhausted,
    /// A stored or imported plan document breaks a tree invariant
    #[error("Invalid plan document: {reason}")]
    InvalidDocument { reason: String },
    /// Named plan not present in the store
    #[error("Plan '{name}' not found")]
    PlanNotFound { name: String },
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> PlanError {
        PlanError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> PlanError {
        PlanError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl PlanError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates an invalid document error.
    pub fn invalid_document(reason: impl Into<String>) -> Self {
        Self::InvalidDocument {
            reason: reason.into(),
        }
    }

    /// Whether this error means a referenced node is stale or was never there.
    ///
    /// Hosts use this to treat commands aimed at deleted nodes as no-ops.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NodeNotFound { .. })
    }

    /// Whether this error is a rejected dependency edge.
    pub fn is_cycle_rejection(&self) -> bool {
        matches!(self, Self::CircularDependency { .. })
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| PlanError::database(message).with_source(e))
    }
}

/// Result type alias for action plan operations
pub type Result<T> = std::result::Result<T, PlanError>;
