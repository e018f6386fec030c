// Copyright 2025 Irreducible Inc.

//! Shared helpers for the bitplane crates: checked arithmetic, error macros, environment flags
//! and tracing setup.

pub mod checked_arithmetics;
pub mod env;
pub mod error_utils;
pub mod tracing;
