// Copyright 2025 Irreducible Inc.

#[derive(Clone, Debug, thiserror::Error)]
pub enum Error {
	#[error("the \"{param}\" argument's size is invalid: {msg}")]
	InvalidBufferSize { param: &'static str, msg: String },
	#[error("matrix width {n} is not a multiple of 256")]
	MatrixWidthNotMultipleOf256 { n: usize },
}
