// Copyright (c) 2025, Imprint contributors
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the Imprint application.

pub mod canvas;
pub mod gallery;
pub mod toolbar;
