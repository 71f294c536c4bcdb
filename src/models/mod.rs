// Copyright (c) 2025, Imprint contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Core data structures for the editor.

pub mod editor;
pub mod gallery;
