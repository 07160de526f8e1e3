// Copyright 2025 the Hoverlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapters to integrate with other Hoverlay crates.
//!
//! Enabled via feature flags to keep the core small and `no_std` by default.

#[cfg(feature = "tree_adapter")]
pub mod widget_tree;
