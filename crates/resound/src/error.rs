use thiserror::Error;

// ---------------------------------------------------------------------------
// CollectionError
// ---------------------------------------------------------------------------

/// Contract violations raised by [`Collection`](crate::collection::Collection)
/// operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CollectionError {
    #[error("Index {index} out of bounds for collection of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Value not present in collection")]
    ValueNotFound,
}

// ---------------------------------------------------------------------------
// EmitterError
// ---------------------------------------------------------------------------

/// Errors surfaced by [`EventEmitter`](crate::events::EventEmitter) methods.
///
/// Every public emitter method tags failures crossing its boundary with the
/// originating operation name, so an error born deep inside a cache replay
/// carries the full call chain as a `source` trail: an `on` registration that
/// fails while replaying wraps the `check_cache` tag, which wraps the `emit`
/// tag, which wraps the underlying collection failure.
#[derive(Debug, Error)]
pub enum EmitterError {
    #[error("Error in EventEmitter::{operation}")]
    Operation {
        operation: &'static str,
        #[source]
        source: Box<EmitterError>,
    },

    #[error(transparent)]
    Collection(#[from] CollectionError),
}

impl EmitterError {
    /// Wrap `source` with the name of the emitter operation it crossed.
    pub fn in_operation(operation: &'static str, source: EmitterError) -> Self {
        EmitterError::Operation {
            operation,
            source: Box::new(source),
        }
    }

    /// The innermost error, unwrapping every operation tag.
    pub fn root_cause(&self) -> &EmitterError {
        match self {
            EmitterError::Operation { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Crate-wide result alias; the error type defaults to [`EmitterError`].
pub type Result<T, E = EmitterError> = std::result::Result<T, E>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
