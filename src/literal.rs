//! Signed-integer literal algebra (§3, §4 leaf component).
//!
//! A literal is a nonzero signed integer: positive for a variable, negative
//! for its complement. `TRUE`/`FALSE` are the reserved constants; `UNDEF`
//! is the sentinel returned by model queries for don't-care variables.
//! Variable `1` is always reserved to mean TRUE.

/// A signed literal. Positive is a variable, negative its negation.
pub type Literal = i32;

/// The reserved always-true literal. Variable 1 is seeded as TRUE by every
/// Solver on construction/`clear`.
pub const TRUE: Literal = 1;

/// The reserved always-false literal.
pub const FALSE: Literal = -1;

/// Sentinel returned by `model_value` when a literal's truth value is not
/// determined by the model. Never a valid operand.
pub const UNDEF: Literal = 0;

/// Negates a literal. Pure, never allocates.
#[inline]
pub fn lnot(l: Literal) -> Literal {
    -l
}

/// Lifts a Rust bool into the TRUE/FALSE literal encoding.
#[inline]
pub fn lift(value: bool) -> Literal {
    if value {
        TRUE
    } else {
        FALSE
    }
}

/// True for the two Boolean-logic literals.
#[inline]
pub fn is_boolean_literal(l: Literal) -> bool {
    l == TRUE || l == FALSE
}
