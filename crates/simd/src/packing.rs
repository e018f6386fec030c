// Copyright 2025 Irreducible Inc.

use bitplane_utils::ensure;

use crate::{Error, M256};

/// Pack exactly 256 booleans into a vector, `bits[i]` becoming bit `i % 64` of word `i / 64`.
pub fn bits_to_m256(bits: &[bool]) -> Result<M256, Error> {
	ensure!(
		bits.len() == M256::BITS,
		Error::InvalidBufferSize {
			param: "bits",
			msg: format!("expected exactly {} bits, got {}", M256::BITS, bits.len()),
		}
	);

	let mut words = [0u64; 4];
	for (i, &bit) in bits.iter().enumerate() {
		words[i / 64] |= (bit as u64) << (i % 64);
	}
	Ok(words.into())
}

/// Inverse of [`bits_to_m256`].
pub fn m256_to_bits(value: M256) -> Vec<bool> {
	let words: [u64; 4] = value.into();
	(0..M256::BITS)
		.map(|i| (words[i / 64] >> (i % 64)) & 1 == 1)
		.collect()
}
