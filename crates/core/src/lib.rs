//! Core business logic for Hesab.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `fiscal` - Fiscal year and period sequencing rules
//! - `costcenter` - Cost center hierarchy and traversal
//! - `billing` - Storage billing and tax calculation

pub mod billing;
pub mod costcenter;
pub mod fiscal;
