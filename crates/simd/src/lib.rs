// Copyright 2025 Irreducible Inc.

//! Vectorized bit-matrix kernel.
//!
//! Square bit matrices are stored packed in 32-byte aligned buffers of [`M256`] values and are
//! transposed, permuted, population-counted and combined with 256-bit vector operations. A matrix
//! of width `n` (a multiple of 256) is stored row-major: bit `(i, j)` lives at linear index
//! `i * n + j`, least significant bit first inside every 64-bit word.
//!
//! The transpose engine is built bottom-up: [`permutation`] holds the per-level bit-plane swaps,
//! [`transpose::transpose_block`] composes them into an exact 256x256 transpose and
//! [`transpose::transpose_matrix`] combines block transposes with
//! [`transpose::rearrange_blocks`].

pub mod aligned_bits;
pub mod arch;
pub mod diagnostics;
pub mod error;
pub mod lane_arithmetic;
pub mod packing;
pub mod permutation;
pub mod transpose;

pub use aligned_bits::{ceil256, AlignedBits256};
pub use arch::M256;
pub use diagnostics::hex;
pub use error::Error;
pub use lane_arithmetic::{acc_plus_minus_epi2, any_nonzero, popcnt16, xor_into};
pub use packing::{bits_to_m256, m256_to_bits};
pub use transpose::{
	rearrange_blocks, transpose_block, transpose_block_strided, transpose_each_block,
	transpose_matrix,
};
