//! `genmat` is a Rust library for building generator matrices of binary linear codes
//! and reducing them to systematic form over the 2-element finite field. Some features
//! include:
//! - staging codeword rows one at a time, then freezing them into a validated,
//!   fixed-shape matrix
//! - row access by value, by slice, or by mutable reference
//! - Gauss-Jordan elimination over GF(2) with deterministic pivoting, producing a
//!   rank-many-row systematic form with a leading identity block
//! - rank computation and a systematic-form check
//!
//! The two main data structures provided by this crate are:
//! - [`Codeword`]: a fixed-length vector of bits stored in 64-bit blocks, with
//!   per-bit access, position swap, and in-place GF(2) addition
//! - [`GeneratorMatrix`]: a two-phase container of [`Codeword`] rows that derives
//!   new, independently owned matrices in systematic form
//!
//! # Examples
//!
//! ```
//! use genmat::{Codeword, GeneratorMatrix};
//!
//! let mut r1 = Codeword::zeros(6);
//! r1.set_bit(0, true);
//! r1.set_bit(3, true);
//!
//! let mut r2 = Codeword::zeros(6);
//! r2.set_bit(1, true);
//! r2.set_bit(4, true);
//!
//! let mut g = GeneratorMatrix::new();
//! g.stage_row(&r1)?;
//! g.stage_row(&r2)?;
//! g.stage_row(&r1)?; // linearly dependent duplicate
//! g.freeze()?;
//!
//! let s = g.systematic_form()?;
//! assert_eq!(s.num_rows()?, 2); // the GF(2) rank of the staged rows
//! assert!(s.is_systematic()?);
//! # Ok::<(), genmat::MatrixError>(())
//! ```

#![allow(
    clippy::needless_range_loop,
    clippy::uninlined_format_args,
    clippy::bool_assert_comparison,
    clippy::must_use_candidate
)]
pub mod codeword;
pub mod matrix;

pub use codeword::{BitBlock, Codeword, BLOCKSIZE};
pub use matrix::{ErrorKind, GeneratorMatrix, MatrixError};
