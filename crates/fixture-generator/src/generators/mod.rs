//! Individual value generators for the primitive schema kinds.
//!
//! Each generator is a plain function over a [`RandomSource`]; none of them
//! recurse. Composite kinds live on [`FixtureGenerator`] itself.
//!
//! [`RandomSource`]: crate::random::RandomSource
//! [`FixtureGenerator`]: crate::generator::FixtureGenerator

pub mod enums;
pub mod numeric;
pub mod text;
pub mod timestamp;
pub mod uuid;
