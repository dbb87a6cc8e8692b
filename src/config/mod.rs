//! Versioned scoring configuration.
//!
//! Every numeric threshold and weight used by the pillar scorer and grade
//! conversion lives in [`ScoringConfig`]. Configs are immutable snapshots
//! held by a [`ConfigRegistry`]; scoring functions receive a config (or the
//! registry's active handle) explicitly rather than reading ambient global
//! state.

pub mod registry;
pub mod scoring;

pub use registry::{ConfigRegistry, ConfigVersionInfo};
pub use scoring::{
    overrides_from_toml_str, ConfigDiffEntry, GradeScale, ScoringConfig,
};
