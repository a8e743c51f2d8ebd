//! Strongly-typed, order-independent model configuration with
//! compile-time (or startup-time) validation.
//!
//! See [`model`] for the configuration builder itself,
//! and [`configuration`] for the configuration file it can be loaded from.

pub mod configuration;
pub mod demonstration;
pub mod logging;
pub mod model;
pub mod output;
