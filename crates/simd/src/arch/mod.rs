// Copyright 2025 Irreducible Inc.

use cfg_if::cfg_if;

/// Conversions, randomness and formatting that both `M256` backends share.
///
/// The backend type must be `Pod` and exactly 256 bits wide.
macro_rules! impl_m256_common {
	($name:ty) => {
		impl $name {
			/// Number of bits in the register.
			pub const BITS: usize = 256;

			/// Generate a value with every bit drawn from `rng`.
			pub fn random(mut rng: impl rand::RngCore) -> Self {
				let words: [u64; 4] = rand::Rng::gen(&mut rng);
				Self::from(words)
			}
		}

		impl From<[u64; 4]> for $name {
			#[inline(always)]
			fn from(value: [u64; 4]) -> Self {
				bytemuck::must_cast(value)
			}
		}

		impl From<[u32; 8]> for $name {
			#[inline(always)]
			fn from(value: [u32; 8]) -> Self {
				bytemuck::must_cast(value)
			}
		}

		impl From<[u16; 16]> for $name {
			#[inline(always)]
			fn from(value: [u16; 16]) -> Self {
				bytemuck::must_cast(value)
			}
		}

		impl From<[u8; 32]> for $name {
			#[inline(always)]
			fn from(value: [u8; 32]) -> Self {
				bytemuck::must_cast(value)
			}
		}

		impl From<$name> for [u64; 4] {
			#[inline(always)]
			fn from(value: $name) -> Self {
				bytemuck::must_cast(value)
			}
		}

		impl From<$name> for [u32; 8] {
			#[inline(always)]
			fn from(value: $name) -> Self {
				bytemuck::must_cast(value)
			}
		}

		impl From<$name> for [u16; 16] {
			#[inline(always)]
			fn from(value: $name) -> Self {
				bytemuck::must_cast(value)
			}
		}

		impl From<$name> for [u8; 32] {
			#[inline(always)]
			fn from(value: $name) -> Self {
				bytemuck::must_cast(value)
			}
		}

		impl std::ops::BitAndAssign for $name {
			#[inline(always)]
			fn bitand_assign(&mut self, rhs: Self) {
				*self = *self & rhs
			}
		}

		impl std::ops::BitOrAssign for $name {
			#[inline(always)]
			fn bitor_assign(&mut self, rhs: Self) {
				*self = *self | rhs
			}
		}

		impl std::ops::BitXorAssign for $name {
			#[inline(always)]
			fn bitxor_assign(&mut self, rhs: Self) {
				*self = *self ^ rhs
			}
		}

		impl std::fmt::Debug for $name {
			fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
				let words: [u64; 4] = (*self).into();
				write!(f, "M256({})", $crate::diagnostics::hex_words(&words))
			}
		}
	};
}

#[cfg_attr(all(target_arch = "x86_64", target_feature = "avx2"), allow(dead_code))]
pub(crate) mod portable;

cfg_if! {
	if #[cfg(all(target_arch = "x86_64", target_feature = "avx2"))] {
		mod x86_64;
		pub use x86_64::m256::M256;
	} else {
		pub use portable::m256::M256;
	}
}
