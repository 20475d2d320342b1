// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Parametric fold preview core for folded print products.
//!
//! Foldview turns a sheet size, a fold topology and an orientation into a
//! hinged 3D model that a renderer can draw and animate from flat to
//! folded.
//!
//! # Key entry points
//!
//! - [`layout::calculate`] - partition a sheet into hinged panels
//! - [`scene::build`] - turn a panel layout into a transform tree with
//!   textured quads
//! - [`animation::FoldMotion`] - pose a tree at a fold progress
//! - [`engine::FoldEngine`] - owns the live state and drives playback
//! - [`options::Options`] - TOML presets for sheet, layout, scene and
//!   animation settings
//!
//! # Architecture
//!
//! Data flows one way: [`scene::FoldState`] → [`layout::PanelConfig`] →
//! [`scene::FoldTree`]. Rebuilds replace the tree wholesale; animation only
//! writes pivot rotation and translation on the current tree. The engine
//! sequences both behind `&mut self`, so a frame's animation step and a
//! rebuild never interleave.

pub mod animation;
pub mod engine;
pub mod error;
pub mod layout;
pub mod options;
pub mod scene;
pub mod util;

pub use engine::FoldEngine;
pub use error::FoldError;
pub use layout::{FoldType, Orientation, PanelConfig, PaperSize};
pub use options::Options;
pub use scene::{FoldState, FoldTree};
