//! Crate-wide error type (§7).

use crate::shape::Shape;
use crate::literal::Literal;

/// Errors raised by precondition violations. Never raised to paper over
/// silent corruption — every variant corresponds to a checked precondition
/// in spec.md §7.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// Rank/dimension disagreement, bad reshape extent, or a malformed
    /// `polymer` mapping.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Two non-Boolean logics that are not the same Solver instance were
    /// combined.
    #[error("logic mismatch: tensors are bound to different solvers")]
    LogicMismatch,

    /// Literal `0` passed as an operand, a literal outside the allocated
    /// range, or a non-{-1,+1} literal given to the Boolean logic.
    #[error("invalid literal: {0}")]
    InvalidLiteral(String),

    /// A non-positive dimension, or an extent computation overflowed.
    #[error("invalid shape: {0}")]
    InvalidShape(String),

    /// An unrecognized solver backend name.
    #[error("unknown solver backend {0:?}")]
    BackendUnavailable(String),

    /// `get_scalar` called on a tensor whose extent is not 1.
    #[error("tensor is not a scalar (shape {0} has extent {1})")]
    NotScalar(Shape, u64),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn shape_mismatch(msg: impl Into<String>) -> Error {
        Error::ShapeMismatch(msg.into())
    }

    pub(crate) fn invalid_literal(lit: Literal, msg: impl Into<String>) -> Error {
        Error::InvalidLiteral(format!("{} ({})", lit, msg.into()))
    }
}
