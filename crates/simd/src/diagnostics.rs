// Copyright 2025 Irreducible Inc.

//! Human readable rendering of vector values for debugging.

use itertools::Itertools;

use crate::M256;

/// Render `v` as a grid of hex nibbles.
///
/// Each 64-bit word is printed as 16 uppercase nibbles, most significant first, with zero nibbles
/// shown as `.`. Words are printed from least to most significant, separated by single spaces.
pub fn hex(v: M256) -> String {
	hex_words(&v.into())
}

pub(crate) fn hex_words(words: &[u64; 4]) -> String {
	words
		.iter()
		.map(|word| format!("{word:016X}").replace('0', "."))
		.join(" ")
}
