//! Variable path resolution and cycle-safe value rendering for interactive debuggers.

/// Value model, path parsing and resolution, rendering, and snapshot loading.
pub mod var;
