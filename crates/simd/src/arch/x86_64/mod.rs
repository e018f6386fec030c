// Copyright 2025 Irreducible Inc.

pub(super) mod m256;
