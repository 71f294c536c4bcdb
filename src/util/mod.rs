// Copyright (c) 2025, Imprint contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Geometry and overlay layout helpers.

pub mod geometry;
pub mod layout;
