//! Siteline application orchestrator with clean module layout.
//!
//! This module provides:
//! - `core`: Siteline struct and initialization
//! - `contact`: contact submission flow
//! - `visitors`: visitor counter flow and background tracking
//! - `tests`: unit tests for the flow properties

pub mod contact;
pub mod core;
pub mod visitors;

pub use core::Siteline;
