//! # Config Crate
//!
//! Centralized configuration constants for the mesh extraction pipeline.
//! Tolerances, lookup-table parameters, decimation policy and render budgets
//! are defined here so the dataset, slicing and packing crates agree on them.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{ExtractConfig, STRIDE_DIVISOR, LOOKUP_TABLE_SIZE};
//!
//! let cfg = ExtractConfig::default();
//! assert_eq!(cfg.stride_divisor, STRIDE_DIVISOR);
//! assert_eq!(LOOKUP_TABLE_SIZE, 256);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Browser-Safe**: No platform-specific values
//! - **Validated Overrides**: `ExtractConfig::new` rejects unusable values

pub mod constants;
