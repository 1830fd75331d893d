//! Render passes drawn into the main color and depth targets.
//!
//! [`mesh_pass`] draws the lit helix geometry; [`shimmer`] draws the loading
//! placeholder until the first build arrives.

pub mod mesh_pass;
pub(crate) mod pipeline_util;
pub mod shimmer;

pub use mesh_pass::MeshPass;
pub use shimmer::ShimmerPass;
