// Copyright 2025 Irreducible Inc.

//! Lane-wise arithmetic on vector values and XOR/zero checks over vector buffers.

use crate::M256;

/// Even bit of every 2-bit lane.
const LOW_BIT_PLANE: M256 = M256::from_equal_u64s(0x5555_5555_5555_5555);

/// Set-bit count of every 16-bit lane, each output lane holds a value in `0..=16`.
#[inline]
pub fn popcnt16(value: M256) -> M256 {
	value.popcnt16()
}

/// Computes `(a + b - c) mod 4` independently in each of the 128 two-bit lanes.
///
/// The low bit planes are combined with XOR, carries and borrows are formed on the low plane
/// only and moved into the high plane of the same lane.
#[inline]
pub fn acc_plus_minus_epi2(a: M256, b: M256, c: M256) -> M256 {
	let carry = (a & b & LOW_BIT_PLANE).shl_64(1);
	let sum = a ^ b ^ carry;

	let borrow = (!sum & c & LOW_BIT_PLANE).shl_64(1);
	sum ^ c ^ borrow
}

/// `dst[i] ^= src[i]` for every vector.
///
/// Panics if the slices have different lengths.
#[inline]
pub fn xor_into(dst: &mut [M256], src: &[M256]) {
	assert_eq!(dst.len(), src.len(), "xor_into requires slices of equal length");
	for (dst, src) in dst.iter_mut().zip(src) {
		*dst ^= *src;
	}
}

/// Whether any bit of any vector in `vectors` is set.
#[inline]
pub fn any_nonzero(vectors: &[M256]) -> bool {
	vectors
		.chunks(4)
		.any(|chunk| !chunk.iter().fold(M256::ZERO, |acc, &v| acc | v).is_zero())
}
