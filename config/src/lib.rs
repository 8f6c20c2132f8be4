//! # Config Crate
//!
//! Centralized configuration constants for the RAGE asset conversion
//! pipeline. All magic numbers and sentinels are defined once here and
//! used by every member crate.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{EPSILON, NO_ATTACHED_PORTAL};
//!
//! let value: f64 = 0.00000000001; // 1e-11, smaller than EPSILON (1e-10)
//! assert!(value.abs() < EPSILON);
//! assert_eq!(NO_ATTACHED_PORTAL, -1);
//! ```

pub mod constants;
