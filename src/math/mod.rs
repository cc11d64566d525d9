//! Mathematical utilities: the Hurwitz zeta normalizer and normal-CDF helpers.

pub mod special;

pub use special::*;
