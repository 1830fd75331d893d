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

//! Procedurally generated, animated DNA double helix rendered with wgpu.
//!
//! Duplex builds two backbone strands, their junction nodes and the rung
//! field from a handful of helix parameters, then spins and bobs the whole
//! group in front of an orbiting camera. A page shell (heading, subtitle,
//! shimmering placeholder) overlays the scene.
//!
//! # Key entry points
//!
//! - [`geometry`] - curve builder, tube mesher, instance placer
//! - [`helix::HelixAssembly`] - the composed helix and its per-frame pose
//! - [`engine::HelixEngine`] - GPU scene host for an existing surface
//! - [`shell::PageShell`] - overlay text and loading placeholder
//! - [`options::Options`] - runtime configuration with TOML presets
//!
//! # Architecture
//!
//! Geometry is generated on a background
//! [`helix::processor::HelixProcessor`] thread and handed to the render
//! thread through a lock-free triple buffer. Until the first build lands,
//! the engine draws the shimmer placeholder. Afterwards each frame writes
//! the camera, lighting and helix-pose uniforms and issues five draw
//! calls: two strand tubes, two node batches and one rung batch.

pub mod camera;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod gpu;
pub mod helix;
pub mod input;
pub mod options;
pub mod renderer;
pub mod shell;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use engine::HelixEngine;
pub use error::DuplexError;
pub use input::{InputEvent, MouseButton};
pub use options::Options;
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
