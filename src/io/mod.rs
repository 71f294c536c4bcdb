// Copyright (c) 2025, Imprint contributors
// SPDX-License-Identifier: BSD-3-Clause

//! I/O: image decoding, feed fetching, and export.

pub mod export;
pub mod feed;
pub mod media;
