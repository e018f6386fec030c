// Copyright 2025 Irreducible Inc.

pub(crate) mod m256;
