// Copyright 2025 Irreducible Inc.

//! Address-bit permutation primitives over 256x256 bit blocks.
//!
//! A block is 256 rows of one [`M256`] each. The bit at row `r`, column `c` has the 16-bit
//! address `r * 256 + c`: the column bits `c0..c7` are the low byte of the address and select the
//! bit inside a vector, the row bits `r0..r7` are the high byte and select the vector. The level
//! `k` primitive exchanges address bit `c_k` with address bit `r_k` and fixes every other address
//! bit, so it moves bits around without changing any of them. Applying all eight levels exchanges
//! the two address bytes, which is a transpose of the block.
//!
//! The exchange itself is [`M256::interleave`] on the row pairs `(r, r + 2^k)` with `r_k = 0`:
//! - levels 0..=2 swap blocks of 1, 2 or 4 bits inside every byte with a masked delta swap,
//! - levels 3..=6 shift one row by `2^k` bits, exchange the masked blocks against its partner and
//!   shift back,
//! - level 7 exchanges the 128-bit halves of the two rows.

use bitplane_utils::checked_arithmetics::checked_log_2;

use crate::M256;

/// Number of rows, and of columns, of a block.
pub const BLOCK_DIM: usize = M256::BITS;

/// Number of row (and column) address bits of a block.
pub const LOG_BLOCK_DIM: usize = checked_log_2(BLOCK_DIM);

/// Level swap applied to one contiguous block.
pub type BitPlaneSwap = fn(&mut [M256; BLOCK_DIM]);

/// The contiguous level swaps, indexed by level.
pub const BIT_PLANE_SWAPS: [BitPlaneSwap; LOG_BLOCK_DIM] = [
	swap_bit_plane::<0>,
	swap_bit_plane::<1>,
	swap_bit_plane::<2>,
	swap_bit_plane::<3>,
	swap_bit_plane::<4>,
	swap_bit_plane::<5>,
	swap_bit_plane::<6>,
	swap_bit_plane::<7>,
];

/// Exchange column address bit `LEVEL` with row address bit `LEVEL` of a contiguous block.
#[inline]
pub fn swap_bit_plane<const LEVEL: usize>(block: &mut [M256; BLOCK_DIM]) {
	swap_bit_plane_strided(block, LEVEL, 0, 1);
}

/// Exchange column address bit `level` with row address bit `level` of a block whose row `r` is
/// `vectors[base + r * row_stride]`.
///
/// With `row_stride == 1` this is the contiguous primitive. A larger stride addresses a block that
/// lives inside a bigger row-major matrix, where consecutive block rows are `row_stride` vectors
/// apart; vectors outside the block are not touched.
///
/// Panics if `level >= LOG_BLOCK_DIM`, if `row_stride` is zero or if the block does not fit in
/// `vectors`.
#[inline]
pub fn swap_bit_plane_strided(vectors: &mut [M256], level: usize, base: usize, row_stride: usize) {
	assert!(level < LOG_BLOCK_DIM, "bit-plane level {level} is out of range");
	assert!(row_stride > 0, "row stride must be positive");
	assert!(
		base + (BLOCK_DIM - 1) * row_stride < vectors.len(),
		"block does not fit in a buffer of {} vectors",
		vectors.len()
	);

	let half = 1 << level;
	for group in (0..BLOCK_DIM).step_by(2 * half) {
		for row in group..group + half {
			let idx0 = base + row * row_stride;
			let idx1 = idx0 + half * row_stride;

			let (v0, v1) = vectors[idx0].interleave(vectors[idx1], level);
			vectors[idx0] = v0;
			vectors[idx1] = v1;
		}
	}
}

/// The address permutation realized by the level `level` primitive: bit `level` and bit
/// `level + LOG_BLOCK_DIM` of `address` are exchanged.
pub const fn bit_plane_permutation(address: usize, level: usize) -> usize {
	swap_address_bits(address, level, level + LOG_BLOCK_DIM)
}

/// Exchange bits `a` and `b` of `address`.
pub const fn swap_address_bits(address: usize, a: usize, b: usize) -> usize {
	let diff = ((address >> a) ^ (address >> b)) & 1;
	address ^ (diff << a) ^ (diff << b)
}
