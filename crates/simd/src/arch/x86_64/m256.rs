// Copyright 2025 Irreducible Inc.

use std::{
	arch::x86_64::*,
	mem::transmute,
	ops::{BitAnd, BitOr, BitXor, Not},
};

use bytemuck::{Pod, Zeroable};

/// 256-bit value that is used for 256-bit SIMD operations
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct M256(__m256i);

impl M256 {
	pub const ZERO: Self = Self::from_equal_u64s(0);
	pub const ONES: Self = Self::from_equal_u64s(u64::MAX);

	pub const fn from_equal_u64s(val: u64) -> Self {
		unsafe { transmute([val; 4]) }
	}

	#[inline]
	pub fn is_zero(&self) -> bool {
		unsafe { _mm256_testz_si256(self.0, self.0) == 1 }
	}

	/// Shift every 64-bit word left by `count` bits, bits never cross word boundaries.
	#[inline]
	pub fn shl_64(self, count: u32) -> Self {
		Self(unsafe { _mm256_sll_epi64(self.0, _mm_cvtsi32_si128(count as i32)) })
	}

	/// Shift every 64-bit word right by `count` bits, bits never cross word boundaries.
	#[inline]
	pub fn shr_64(self, count: u32) -> Self {
		Self(unsafe { _mm256_srl_epi64(self.0, _mm_cvtsi32_si128(count as i32)) })
	}

	/// Interleave blocks of `2^log_block_len` bits of `self` and `other`.
	///
	/// Returns `(c, d)` where, for every even block index `i`, `c[i] = self[i]`,
	/// `c[i + 1] = other[i]`, `d[i] = self[i + 1]`, `d[i + 1] = other[i + 1]`.
	#[inline]
	pub fn interleave(self, other: Self, log_block_len: usize) -> (Self, Self) {
		let (a, b) = unsafe { interleave_bits(self.0, other.0, log_block_len) };
		(Self(a), Self(b))
	}

	/// Count the set bits of each 16-bit lane.
	#[inline]
	pub fn popcnt16(self) -> Self {
		Self(unsafe { popcnt_epi16(self.0) })
	}
}

impl_m256_common!(M256);

impl Default for M256 {
	#[inline(always)]
	fn default() -> Self {
		Self(unsafe { _mm256_setzero_si256() })
	}
}

impl BitAnd for M256 {
	type Output = Self;

	#[inline(always)]
	fn bitand(self, rhs: Self) -> Self::Output {
		Self(unsafe { _mm256_and_si256(self.0, rhs.0) })
	}
}

impl BitOr for M256 {
	type Output = Self;

	#[inline(always)]
	fn bitor(self, rhs: Self) -> Self::Output {
		Self(unsafe { _mm256_or_si256(self.0, rhs.0) })
	}
}

impl BitXor for M256 {
	type Output = Self;

	#[inline(always)]
	fn bitxor(self, rhs: Self) -> Self::Output {
		Self(unsafe { _mm256_xor_si256(self.0, rhs.0) })
	}
}

impl Not for M256 {
	type Output = Self;

	#[inline(always)]
	fn not(self) -> Self::Output {
		self ^ Self::ONES
	}
}

impl PartialEq for M256 {
	#[inline(always)]
	fn eq(&self, other: &Self) -> bool {
		unsafe {
			let pcmp = _mm256_cmpeq_epi32(self.0, other.0);
			let bitmask = _mm256_movemask_epi8(pcmp) as u32;
			bitmask == 0xffffffff
		}
	}
}

impl Eq for M256 {}

unsafe impl Zeroable for M256 {}

unsafe impl Pod for M256 {}

unsafe impl Send for M256 {}

unsafe impl Sync for M256 {}

#[inline]
unsafe fn interleave_bits(a: __m256i, b: __m256i, log_block_len: usize) -> (__m256i, __m256i) {
	match log_block_len {
		0 => interleave_bits_imm::<1>(a, b, _mm256_set1_epi8(0x55i8)),
		1 => interleave_bits_imm::<2>(a, b, _mm256_set1_epi8(0x33i8)),
		2 => interleave_bits_imm::<4>(a, b, _mm256_set1_epi8(0x0fi8)),
		3 => interleave_bits_imm::<8>(a, b, _mm256_set1_epi16(0x00ffi16)),
		4 => interleave_bits_imm::<16>(a, b, _mm256_set1_epi32(0x0000ffffi32)),
		5 => interleave_bits_imm::<32>(a, b, _mm256_set1_epi64x(0x0000_0000_ffff_ffffi64)),
		6 => {
			let a_prime = _mm256_unpacklo_epi64(a, b);
			let b_prime = _mm256_unpackhi_epi64(a, b);
			(a_prime, b_prime)
		}
		7 => {
			let a_prime = _mm256_permute2x128_si256(a, b, 0x20);
			let b_prime = _mm256_permute2x128_si256(a, b, 0x31);
			(a_prime, b_prime)
		}
		_ => panic!("unsupported block length"),
	}
}

/// Shift `a` down by `BLOCK_LEN`, exchange the masked blocks with `b`, shift back.
#[inline]
unsafe fn interleave_bits_imm<const BLOCK_LEN: i32>(
	a: __m256i,
	b: __m256i,
	mask: __m256i,
) -> (__m256i, __m256i) {
	let t = _mm256_and_si256(_mm256_xor_si256(_mm256_srli_epi64::<BLOCK_LEN>(a), b), mask);
	let a_prime = _mm256_xor_si256(a, _mm256_slli_epi64::<BLOCK_LEN>(t));
	let b_prime = _mm256_xor_si256(b, t);
	(a_prime, b_prime)
}

/// Nibble lookup popcount, byte counts are then summed pairwise into 16-bit lanes.
#[inline]
unsafe fn popcnt_epi16(v: __m256i) -> __m256i {
	let lut = _mm256_setr_epi8(
		0, 1, 1, 2, 1, 2, 2, 3, 1, 2, 2, 3, 2, 3, 3, 4, 0, 1, 1, 2, 1, 2, 2, 3, 1, 2, 2, 3, 2, 3,
		3, 4,
	);
	let low_nibbles = _mm256_set1_epi8(0x0f);
	let lo = _mm256_and_si256(v, low_nibbles);
	let hi = _mm256_and_si256(_mm256_srli_epi16::<4>(v), low_nibbles);
	let count8 = _mm256_add_epi8(_mm256_shuffle_epi8(lut, lo), _mm256_shuffle_epi8(lut, hi));

	_mm256_add_epi16(
		_mm256_and_si256(count8, _mm256_set1_epi16(0x00ff)),
		_mm256_srli_epi16::<8>(count8),
	)
}
