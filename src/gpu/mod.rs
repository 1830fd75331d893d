//! GPU resource management.
//!
//! Device/surface setup, growable buffers, uniform bindings, frame
//! attachments, lighting, and shader composition.

/// Growable GPU buffers with automatic reallocation.
pub mod dynamic_buffer;
/// Ambient + point-light uniform.
pub mod lighting;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// WGSL shader composition with `#import` support via naga-oil.
pub mod shader_composer;
/// Depth and MSAA attachments.
pub mod texture;
/// Single-value uniform buffers with bind groups.
pub mod uniform;
