//! # Engine Module
//!
//! This module implements the calculation engine: every numerical procedure
//! the library offers runs here, over an immutable geometry snapshot from
//! the [`core`](crate::core) layer.
//!
//! ## Overview
//!
//! Each calculator borrows its geometry (and optional loading condition)
//! once at construction and is then pure: the same inputs always produce
//! the same freshly-constructed result, with no state carried between
//! calls. Multi-draft and multi-angle sweeps iterate sequentially by
//! default and honor a cancellation token between iterations; with the
//! `parallel` feature the independent iterations fan out across a rayon
//! pool with results collected in input order.
//!
//! ## Architecture
//!
//! - **Hydrostatics** ([`hydrostatics`]) - Displacement, centers of buoyancy,
//!   metacentric properties, waterplane properties, and form coefficients at
//!   a draft
//! - **Curves** ([`curves`]) - Property-vs-draft curves and per-station
//!   sectional-area (Bonjean) profiles
//! - **Stability** ([`stability`]) - Righting-arm (GZ) curves by the
//!   wall-sided approximation or full immersion/emersion integration
//! - **Criteria** ([`criteria`]) - The fixed intact-stability rule set
//!   evaluated against a computed GZ curve
//! - **Trim** ([`trim`]) - Newton-Raphson equilibrium search over mean draft
//!   for a target displacement
//! - **Progress Monitoring** ([`progress`]) - Progress reporting and
//!   cooperative cancellation for long sweeps
//! - **Error Handling** ([`error`]) - Engine-specific error types

pub mod criteria;
pub mod curves;
pub mod error;
pub mod hydrostatics;
pub mod progress;
pub mod stability;
pub mod trim;
