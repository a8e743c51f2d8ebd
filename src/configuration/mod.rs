//! Application configuration: the configuration file format, and the code
//! needed to load and validate it.
//!
//! Your starting point should probably be [`Configuration::load_from_path`].
//!
//! # Internals
//! Loading happens in two stages. The TOML file is first deserialized into
//! [`UnresolvedConfiguration`], which is a direct image of the file.
//! Its `resolve` method then validates every table and turns it into
//! its resolved counterpart (e.g. the `[model]` table becomes a
//! [`ModelConfiguration`][crate::model::ModelConfiguration] built from
//! the listed options, and relative paths in `[logging]` are anchored
//! at the configuration file's directory).
//!
//! The output of that is [`Configuration`]. Anything that can be checked
//! up front belongs in a [`resolve`][traits::ResolvableConfiguration::resolve]
//! implementation, so that a bad file is rejected before anything runs.

#![allow(rustdoc::private_intra_doc_links)]

mod structure;
mod traits;
mod utilities;

pub use structure::*;
pub use utilities::get_default_configuration_file_path;
