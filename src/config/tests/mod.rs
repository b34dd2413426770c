//! Unit tests for configuration loading and precedence.
//!
//! - `helpers`: shared layer composition
//! - `precedence`: layer precedence
//! - `operation_mode`: mode selection
//! - `field_resolution`: token, direct-mode fields, API base and repository

mod helpers;
