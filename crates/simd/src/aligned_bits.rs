// Copyright 2025 Irreducible Inc.

use std::{fmt, ops::BitXorAssign};

use rand::RngCore;

use crate::{
	lane_arithmetic::{any_nonzero, xor_into},
	M256,
};

/// Round `bits` up to the next multiple of 256. `ceil256(0) == 0`.
pub const fn ceil256(bits: usize) -> usize {
	bits.div_ceil(M256::BITS) * M256::BITS
}

/// Owned, 32-byte aligned, zero-initialized bit buffer padded to a multiple of 256 bits.
///
/// Bit `k` lives in 64-bit word `k / 64` at offset `k % 64`, least significant bit first. The same
/// storage is exposed as bytes, 64-bit words and [`M256`] vectors. Equality compares the whole
/// padded buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct AlignedBits256 {
	data: Vec<M256>,
}

impl AlignedBits256 {
	/// Create a zeroed buffer holding at least `bits` bits.
	pub fn new(bits: usize) -> Self {
		Self {
			data: vec![M256::ZERO; ceil256(bits) / M256::BITS],
		}
	}

	/// Create a buffer holding at least `bits` bits, every bit (padding included) drawn from `rng`.
	pub fn random(bits: usize, mut rng: impl RngCore) -> Self {
		let data = (0..ceil256(bits) / M256::BITS)
			.map(|_| M256::random(&mut rng))
			.collect();
		Self { data }
	}

	/// Capacity in bits, always a multiple of 256.
	pub fn num_bits(&self) -> usize {
		self.data.len() * M256::BITS
	}

	/// Panics if `index >= self.num_bits()`.
	#[inline]
	pub fn get_bit(&self, index: usize) -> bool {
		self.check_index(index);
		(self.words()[index / 64] >> (index % 64)) & 1 == 1
	}

	/// Panics if `index >= self.num_bits()`.
	#[inline]
	pub fn set_bit(&mut self, index: usize, value: bool) {
		self.check_index(index);
		let word = &mut self.words_mut()[index / 64];
		let mask = 1u64 << (index % 64);
		if value {
			*word |= mask;
		} else {
			*word &= !mask;
		}
	}

	pub fn bytes(&self) -> &[u8] {
		bytemuck::cast_slice(&self.data)
	}

	pub fn words(&self) -> &[u64] {
		bytemuck::cast_slice(&self.data)
	}

	pub fn words_mut(&mut self) -> &mut [u64] {
		bytemuck::cast_slice_mut(&mut self.data)
	}

	pub fn vectors(&self) -> &[M256] {
		&self.data
	}

	pub fn vectors_mut(&mut self) -> &mut [M256] {
		&mut self.data
	}

	/// Zero every bit.
	pub fn clear(&mut self) {
		self.data.fill(M256::ZERO);
	}

	/// Whether any bit, padding included, is set.
	pub fn not_zero(&self) -> bool {
		any_nonzero(&self.data)
	}

	fn check_index(&self, index: usize) {
		assert!(
			index < self.num_bits(),
			"bit index {index} is out of range for a buffer of {} bits",
			self.num_bits()
		);
	}
}

impl BitXorAssign<&AlignedBits256> for AlignedBits256 {
	/// Panics if the capacities differ.
	fn bitxor_assign(&mut self, rhs: &AlignedBits256) {
		xor_into(&mut self.data, &rhs.data);
	}
}

impl fmt::Debug for AlignedBits256 {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("AlignedBits256")
			.field("num_bits", &self.num_bits())
			.field("data", &self.data)
			.finish()
	}
}
