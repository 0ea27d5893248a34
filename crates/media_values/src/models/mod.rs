//! Primitive value kinds for media metadata.
//!
//! - [`Rational`]: exact numerator/denominator ratios (edit rates, aspect ratios)
//! - [`CodedEnumeration`]: closed vocabularies with stable integer codes
//! - Concrete vocabularies declared with [`coded_enumeration!`](crate::coded_enumeration)

mod coded;
mod enums;
mod rational;

// Re-export all public types
pub use coded::CodedEnumeration;
pub use enums::{FadeType, PulldownDirectionType, PulldownKindType};
pub use rational::{parse_rational, Rational};
