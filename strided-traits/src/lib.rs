//! Shared traits for the strided kernel crates.
//!
//! This crate provides the element accessor seam used by `strided-view`,
//! `strided-kernel` and `strided-blas`, so external crates can implement
//! accessors for their own storage without orphan rule violations.

pub mod accessor;
pub mod scalar;

pub use accessor::{Accessor, AccessorMut};
pub use scalar::ScalarBase;
