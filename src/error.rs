//! The latched error model.

use thiserror::Error;

/// An error raised by a state-machine entry point.
///
/// Errors are not returned to the caller; the context latches the
/// first one raised since the last [`Context::get_error`] and drops
/// the rest, which is how the emulated API reports failure. An entry
/// point that raises an error leaves all state untouched.
///
/// [`Context::get_error`]: crate::Context::get_error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GlError {
    /// An enumerated argument is outside its accepted set.
    #[error("invalid enum")]
    InvalidEnum,
    /// A numeric argument is out of range.
    #[error("invalid value")]
    InvalidValue,
    /// The call violates a precondition of the current state.
    #[error("invalid operation")]
    InvalidOperation,
    /// A matrix-stack push would exceed the stack's depth cap.
    #[error("stack overflow")]
    StackOverflow,
    /// A matrix-stack pop would empty the stack.
    #[error("stack underflow")]
    StackUnderflow,
}
