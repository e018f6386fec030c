// Copyright 2025 Irreducible Inc.

//! Bit-matrix transposes built from the [`crate::permutation`] primitives.
//!
//! A row-major `n x n` matrix (`n` a multiple of 256) is split into `(n / 256)^2` blocks of
//! 256x256 bits. Transposing the matrix exchanges every row address bit with the matching column
//! address bit. The eight low levels live inside a block and are handled by the block transpose;
//! the remaining levels only pick the block and are handled by moving whole blocks.

use std::ops::Range;

use bitplane_utils::{bail, checked_arithmetics::checked_int_div, ensure};
use tracing::{debug, instrument};

use crate::{
	permutation::{swap_bit_plane_strided, BIT_PLANE_SWAPS, BLOCK_DIM, LOG_BLOCK_DIM},
	Error, M256,
};

/// Transpose one contiguous 256x256 bit block in place.
///
/// `block` holds the 256 rows of the block, one vector per row.
pub fn transpose_block(block: &mut [M256]) -> Result<(), Error> {
	let Ok(block) = <&mut [M256; BLOCK_DIM]>::try_from(block) else {
		bail!(Error::InvalidBufferSize {
			param: "block",
			msg: format!("a block is exactly {BLOCK_DIM} vectors"),
		});
	};

	for swap in BIT_PLANE_SWAPS {
		swap(block);
	}
	Ok(())
}

/// Transpose every 256x256 block of a buffer made of contiguous blocks, leaving the blocks where
/// they are.
///
/// Bit `col + (row << 8) + (block << 16)` moves to `row + (col << 8) + (block << 16)`.
#[instrument(skip_all, level = "debug")]
pub fn transpose_each_block(vectors: &mut [M256]) -> Result<(), Error> {
	ensure!(
		vectors.len() % BLOCK_DIM == 0,
		Error::InvalidBufferSize {
			param: "vectors",
			msg: format!("length {} is not a multiple of {BLOCK_DIM}", vectors.len()),
		}
	);

	debug!(blocks = vectors.len() / BLOCK_DIM, "transposing blocks");
	for base in (0..vectors.len()).step_by(BLOCK_DIM) {
		transpose_block_strided(vectors, base, 1, 0..LOG_BLOCK_DIM);
	}
	Ok(())
}

/// Exchange block `(br, bc)` with block `(bc, br)` of the row-major `n x n` bit matrix in
/// `vectors`, for every pair of block coordinates. The bits inside a block keep their layout.
///
/// The matrix covers `n * n` bits, so `vectors` must hold exactly `n * n / 256` vectors.
#[instrument(skip(vectors), level = "debug")]
pub fn rearrange_blocks(vectors: &mut [M256], n: usize) -> Result<(), Error> {
	let blocks_per_row = check_square_matrix(vectors, n)?;

	for block_row in 0..blocks_per_row {
		for block_col in block_row + 1..blocks_per_row {
			for row in 0..BLOCK_DIM {
				vectors.swap(
					(block_row * BLOCK_DIM + row) * blocks_per_row + block_col,
					(block_col * BLOCK_DIM + row) * blocks_per_row + block_row,
				);
			}
		}
	}
	Ok(())
}

/// Transpose the row-major `n x n` bit matrix in `vectors` in place: bit `(i, j)` ends up at
/// `(j, i)`.
///
/// `n` must be a multiple of 256 and `vectors` must hold exactly `n * n / 256` vectors. Both
/// conditions are checked before anything is written, so a rejected call leaves the buffer
/// untouched.
#[instrument(skip(vectors), level = "debug")]
pub fn transpose_matrix(vectors: &mut [M256], n: usize) -> Result<(), Error> {
	let blocks_per_row = check_square_matrix(vectors, n)?;

	debug!(blocks = blocks_per_row * blocks_per_row, "transposing blocks in place");
	for block_row in 0..blocks_per_row {
		for block_col in 0..blocks_per_row {
			let base = block_row * BLOCK_DIM * blocks_per_row + block_col;
			transpose_block_strided(vectors, base, blocks_per_row, 0..LOG_BLOCK_DIM);
		}
	}

	rearrange_blocks(vectors, n)
}

/// Apply the level swaps in `levels` to the 256x256 block whose row `r` is
/// `vectors[base + r * row_stride]`.
///
/// `0..LOG_BLOCK_DIM` transposes the whole block. A shorter prefix `0..k` transposes each
/// `2^k x 2^k` sub-block in place, e.g. `0..6` transposes the sixteen 64x64 tiles of the block.
///
/// Panics if a level is out of range, if `row_stride` is zero or if the block does not fit in
/// `vectors`.
pub fn transpose_block_strided(
	vectors: &mut [M256],
	base: usize,
	row_stride: usize,
	levels: Range<usize>,
) {
	for level in levels {
		swap_bit_plane_strided(vectors, level, base, row_stride);
	}
}

/// Validate the geometry of a row-major `n x n` matrix and return the number of blocks per row.
fn check_square_matrix(vectors: &[M256], n: usize) -> Result<usize, Error> {
	ensure!(n % BLOCK_DIM == 0, Error::MatrixWidthNotMultipleOf256 { n });

	let blocks_per_row = checked_int_div(n, BLOCK_DIM);
	let Some(expected_len) = n.checked_mul(blocks_per_row) else {
		bail!(Error::InvalidBufferSize {
			param: "n",
			msg: format!("a {n}x{n} bit matrix does not fit in memory"),
		});
	};
	ensure!(
		vectors.len() == expected_len,
		Error::InvalidBufferSize {
			param: "vectors",
			msg: format!(
				"a {n}x{n} bit matrix needs {expected_len} vectors, got {}",
				vectors.len()
			),
		}
	);
	Ok(blocks_per_row)
}

#[cfg(test)]
mod tests {
	use assert_matches::assert_matches;
	use rand::{rngs::StdRng, SeedableRng};

	use super::*;
	use crate::AlignedBits256;

	fn reference_transpose(input: &AlignedBits256, n: usize) -> AlignedBits256 {
		let mut expected = AlignedBits256::new(n * n);
		for i in 0..n {
			for j in 0..n {
				expected.set_bit(j * n + i, input.get_bit(i * n + j));
			}
		}
		expected
	}

	#[test]
	fn test_transpose_matrix_768() {
		let n = 256 * 3;
		let input = AlignedBits256::random(n * n, StdRng::seed_from_u64(0));
		let expected = reference_transpose(&input, n);

		let mut data = input.clone();
		transpose_matrix(data.vectors_mut(), n).unwrap();
		assert!(data == expected, "768x768 transpose does not match the reference");
	}

	#[test]
	fn test_transpose_matrix_involution() {
		let mut rng = StdRng::seed_from_u64(1);
		for n in [0, 256, 512] {
			let input = AlignedBits256::random(n * n, &mut rng);
			let mut data = input.clone();

			transpose_matrix(data.vectors_mut(), n).unwrap();
			if n > 0 {
				assert!(data != input);
			}
			transpose_matrix(data.vectors_mut(), n).unwrap();
			assert!(data == input, "double transpose of {n}x{n} is not the identity");
		}
	}

	#[test]
	fn test_transpose_matrix_single_bits() {
		let n = 512;
		let mut data = AlignedBits256::new(n * n);
		for (i, j) in [(0, 0), (0, 511), (511, 0), (3, 300), (300, 3), (255, 256), (511, 511)] {
			data.set_bit(i * n + j, true);
			transpose_matrix(data.vectors_mut(), n).unwrap();
			assert!(data.get_bit(j * n + i), "({i}, {j})");
			data.set_bit(j * n + i, false);
			assert!(!data.not_zero(), "({i}, {j}) left extra bits");
		}
	}

	#[test]
	fn test_transpose_block_matches_reference() {
		let input = AlignedBits256::random(BLOCK_DIM * BLOCK_DIM, StdRng::seed_from_u64(2));
		let mut data = input.clone();
		transpose_block(data.vectors_mut()).unwrap();
		assert!(data == reference_transpose(&input, BLOCK_DIM));
	}

	#[test]
	fn test_transpose_block_address_planes() {
		// Plane `p` has bit `a` set iff bit `p` of address `a` is set. After the transpose, the
		// planes read at address `a` must spell the address the bit came from.
		let planes: Vec<AlignedBits256> = (0..2 * LOG_BLOCK_DIM)
			.map(|plane| {
				let mut bits = AlignedBits256::new(BLOCK_DIM * BLOCK_DIM);
				for address in 0..BLOCK_DIM * BLOCK_DIM {
					bits.set_bit(address, (address >> plane) & 1 == 1);
				}
				transpose_block(bits.vectors_mut()).unwrap();
				bits
			})
			.collect();

		for address in 0..BLOCK_DIM * BLOCK_DIM {
			let source = planes
				.iter()
				.enumerate()
				.fold(0, |acc, (plane, bits)| acc | (bits.get_bit(address) as usize) << plane);
			let (row, col) = (address / BLOCK_DIM, address % BLOCK_DIM);
			assert_eq!(source, col * BLOCK_DIM + row, "address {address:#06x}");
		}
	}

	#[test]
	fn test_transpose_each_block() {
		let n = 256 * 3;
		let input = AlignedBits256::random(n * n, StdRng::seed_from_u64(3));
		let mut expected = AlignedBits256::new(n * n);
		for i in 0..n {
			for j in 0..n {
				let (i0, i1) = (i & 255, i >> 8);
				let (j0, j1) = (j & 255, j >> 8);
				let a = i0 + (j0 << 8) + (i1 << 16) + j1 * (n << 8);
				let b = j0 + (i0 << 8) + (i1 << 16) + j1 * (n << 8);
				expected.set_bit(b, input.get_bit(a));
			}
		}

		let mut data = input.clone();
		transpose_each_block(data.vectors_mut()).unwrap();
		assert!(data == expected, "per-block transpose does not match the reference");
	}

	#[test]
	fn test_rearrange_blocks_moves_whole_blocks() {
		let n = 256 * 3;
		let blocks_per_row = 3;
		let input = AlignedBits256::random(n * n, StdRng::seed_from_u64(4));
		let mut data = input.clone();
		rearrange_blocks(data.vectors_mut(), n).unwrap();

		for block_row in 0..blocks_per_row {
			for block_col in 0..blocks_per_row {
				for row in 0..BLOCK_DIM {
					let dst = (block_row * BLOCK_DIM + row) * blocks_per_row + block_col;
					let src = (block_col * BLOCK_DIM + row) * blocks_per_row + block_row;
					assert_eq!(data.vectors()[dst], input.vectors()[src]);
				}
			}
		}

		rearrange_blocks(data.vectors_mut(), n).unwrap();
		assert!(data == input);
	}

	#[test]
	fn test_phases_commute() {
		let n = 512;
		let input = AlignedBits256::random(n * n, StdRng::seed_from_u64(5));

		let mut data = input.clone();
		rearrange_blocks(data.vectors_mut(), n).unwrap();
		for block_row in 0..2 {
			for block_col in 0..2 {
				transpose_block_strided(
					data.vectors_mut(),
					block_row * BLOCK_DIM * 2 + block_col,
					2,
					0..LOG_BLOCK_DIM,
				);
			}
		}
		assert!(data == reference_transpose(&input, n));
	}

	#[test]
	fn test_transpose_64x64_tiles_within_strided_block() {
		let n = 512;
		let base = 1;
		let input = AlignedBits256::random(n * n, StdRng::seed_from_u64(7));
		let mut data = input.clone();
		transpose_block_strided(data.vectors_mut(), base, 2, 0..6);

		let block_bit = |bits: &AlignedBits256, row: usize, col: usize| {
			bits.get_bit((base + row * 2) * BLOCK_DIM + col)
		};
		for row in 0..BLOCK_DIM {
			for col in 0..BLOCK_DIM {
				let src_row = (row & !63) | (col & 63);
				let src_col = (col & !63) | (row & 63);
				assert_eq!(
					block_bit(&data, row, col),
					block_bit(&input, src_row, src_col),
					"({row}, {col})"
				);
			}
		}
		for (i, (out, inp)) in data.vectors().iter().zip(input.vectors()).enumerate() {
			if i % 2 != base {
				assert_eq!(out, inp, "vector {i} outside the block was modified");
			}
		}
	}

	#[test]
	#[should_panic(expected = "out of range")]
	fn test_transpose_block_strided_level_out_of_range() {
		let mut vectors = vec![M256::ZERO; BLOCK_DIM];
		transpose_block_strided(&mut vectors, 0, 1, 0..LOG_BLOCK_DIM + 1);
	}

	#[test]
	fn test_size_errors_leave_buffer_untouched() {
		let input = AlignedBits256::random(300 * 300, StdRng::seed_from_u64(6));
		let mut data = input.clone();

		assert_matches!(
			transpose_matrix(data.vectors_mut(), 300),
			Err(Error::MatrixWidthNotMultipleOf256 { n: 300 })
		);
		assert_matches!(
			transpose_matrix(data.vectors_mut(), 256),
			Err(Error::InvalidBufferSize { param: "vectors", .. })
		);
		assert_matches!(
			transpose_matrix(data.vectors_mut(), 1 << 40),
			Err(Error::InvalidBufferSize { param: "n", .. })
		);
		assert_matches!(
			rearrange_blocks(data.vectors_mut(), usize::MAX - 255),
			Err(Error::InvalidBufferSize { param: "n", .. })
		);
		assert_matches!(
			rearrange_blocks(data.vectors_mut(), 100),
			Err(Error::MatrixWidthNotMultipleOf256 { n: 100 })
		);
		assert_matches!(
			transpose_block(&mut data.vectors_mut()[..255]),
			Err(Error::InvalidBufferSize { param: "block", .. })
		);
		assert_matches!(
			transpose_each_block(&mut data.vectors_mut()[..300]),
			Err(Error::InvalidBufferSize { param: "vectors", .. })
		);
		assert!(data == input);
	}
}
