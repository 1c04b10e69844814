pub mod random;

pub use random::RandomGenerator;

use leafy_core::LinkCode;

/// Trait for generating candidate short codes.
///
/// Implementations are pure generators that don't interact with storage.
/// A generated code is only a candidate: the store claims it atomically and
/// asks for another one if it is already taken.
pub trait Generator: Send + Sync + 'static {
    type Output: Into<LinkCode>;

    /// Generates a candidate short code.
    fn generate(&self) -> Self::Output;
}
