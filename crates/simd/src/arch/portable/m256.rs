// Copyright 2025 Irreducible Inc.

use std::ops::{BitAnd, BitOr, BitXor, Not};

use bytemuck::{Pod, Zeroable};

/// 256-bit value backed by four 64-bit words, least significant word first.
#[derive(Copy, Clone, Default, PartialEq, Eq)]
#[repr(C, align(32))]
pub struct M256([u64; 4]);

unsafe impl Zeroable for M256 {}

unsafe impl Pod for M256 {}

/// Even-block masks for every interleave level that stays inside a 64-bit word.
const INTERLEAVE_EVEN_MASK: [u64; 6] = [
	0x5555_5555_5555_5555,
	0x3333_3333_3333_3333,
	0x0f0f_0f0f_0f0f_0f0f,
	0x00ff_00ff_00ff_00ff,
	0x0000_ffff_0000_ffff,
	0x0000_0000_ffff_ffff,
];

impl M256 {
	pub const ZERO: Self = Self([0; 4]);
	pub const ONES: Self = Self([u64::MAX; 4]);

	pub const fn from_equal_u64s(val: u64) -> Self {
		Self([val; 4])
	}

	#[inline]
	pub fn is_zero(&self) -> bool {
		self.0.iter().all(|&word| word == 0)
	}

	/// Shift every 64-bit word left by `count` bits, bits never cross word boundaries.
	#[inline]
	pub fn shl_64(self, count: u32) -> Self {
		Self(self.0.map(|word| word.checked_shl(count).unwrap_or(0)))
	}

	/// Shift every 64-bit word right by `count` bits, bits never cross word boundaries.
	#[inline]
	pub fn shr_64(self, count: u32) -> Self {
		Self(self.0.map(|word| word.checked_shr(count).unwrap_or(0)))
	}

	/// Interleave blocks of `2^log_block_len` bits of `self` and `other`.
	///
	/// Returns `(c, d)` where, for every even block index `i`, `c[i] = self[i]`,
	/// `c[i + 1] = other[i]`, `d[i] = self[i + 1]`, `d[i + 1] = other[i + 1]`.
	#[inline]
	pub fn interleave(self, other: Self, log_block_len: usize) -> (Self, Self) {
		let Self(mut a) = self;
		let Self(mut b) = other;
		match log_block_len {
			0..=5 => {
				let block_len = 1 << log_block_len;
				let mask = INTERLEAVE_EVEN_MASK[log_block_len];
				for (a, b) in a.iter_mut().zip(b.iter_mut()) {
					// See Hacker's Delight, Section 7-3.
					let t = ((*a >> block_len) ^ *b) & mask;
					*a ^= t << block_len;
					*b ^= t;
				}
			}
			6 => {
				std::mem::swap(&mut a[1], &mut b[0]);
				std::mem::swap(&mut a[3], &mut b[2]);
			}
			7 => {
				let [a0, a1, a2, a3] = a;
				let [b0, b1, b2, b3] = b;
				a = [a0, a1, b0, b1];
				b = [a2, a3, b2, b3];
			}
			_ => panic!("unsupported block length"),
		}

		(Self(a), Self(b))
	}

	/// Count the set bits of each 16-bit lane.
	#[inline]
	pub fn popcnt16(self) -> Self {
		Self(self.0.map(|x| {
			let x = x - ((x >> 1) & 0x5555_5555_5555_5555);
			let x = (x & 0x3333_3333_3333_3333) + ((x >> 2) & 0x3333_3333_3333_3333);
			let x = (x + (x >> 4)) & 0x0f0f_0f0f_0f0f_0f0f;
			(x + (x >> 8)) & 0x00ff_00ff_00ff_00ff
		}))
	}
}

impl_m256_common!(M256);

impl BitAnd for M256 {
	type Output = Self;

	#[inline(always)]
	fn bitand(self, rhs: Self) -> Self::Output {
		Self(std::array::from_fn(|i| self.0[i] & rhs.0[i]))
	}
}

impl BitOr for M256 {
	type Output = Self;

	#[inline(always)]
	fn bitor(self, rhs: Self) -> Self::Output {
		Self(std::array::from_fn(|i| self.0[i] | rhs.0[i]))
	}
}

impl BitXor for M256 {
	type Output = Self;

	#[inline(always)]
	fn bitxor(self, rhs: Self) -> Self::Output {
		Self(std::array::from_fn(|i| self.0[i] ^ rhs.0[i]))
	}
}

impl Not for M256 {
	type Output = Self;

	#[inline(always)]
	fn not(self) -> Self::Output {
		Self(self.0.map(|word| !word))
	}
}
