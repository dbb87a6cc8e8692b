//! # SSI Rust Engine
//!
//! Scoring and kinetic-sequence analytics engine for baseball hitters.
//!
//! This crate is the computation core of the Swing Scoring Intelligence (SSI)
//! platform: it turns raw per-swing measurements (exit velocity, launch angle,
//! distance, body-segment time series) into normalized, comparable scores,
//! detects named kinetic-chain sequencing defects, and reconciles scores
//! produced by independent measurement pipelines.
//!
//! ## Features
//!
//! - **Ingestion**: Detect the vendor format of a measurement export from its
//!   column headers and normalize rows into canonical [`models::Swing`] records
//! - **Session analytics**: Descriptive statistics and a legacy points-based
//!   Ball Score over a session's swings
//! - **Configurable scoring**: Hard-hit / sweet-spot / barrel classification
//!   and a continuous 0-100 contact-quality score, parameterized by a
//!   versioned [`config::ScoringConfig`]
//! - **4B composite**: Weighted Brain/Body/Bat/Ball composite with letter
//!   grades and weakest-pillar identification
//! - **Kinetic sequencing**: Peak-activation ordering analysis with inversion
//!   scoring and defect classification
//! - **Cross-source validation**: Delta/accuracy-tier reconciliation of two
//!   independently computed score sets
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Public DTO surface and identifier newtypes
//! - [`models`]: Core domain records and the tagged cell-value scalar
//! - [`ingest`]: Vendor format detection and swing normalization
//! - [`config`]: Versioned scoring thresholds and the active-config registry
//! - [`algorithms`]: Pure numeric helpers (descriptive stats, inversions)
//! - [`services`]: High-level scoring engines and report builders
//!
//! Every computation here is a pure, synchronous function over in-memory
//! data; the only shared state is the registry's active-config pointer, which
//! is published by whole-value swap so concurrent scoring never observes a
//! torn configuration.

pub mod algorithms;
pub mod api;
pub mod config;
pub mod error;
pub mod ingest;
pub mod models;
pub mod services;

pub use error::{EngineError, EngineResult};
