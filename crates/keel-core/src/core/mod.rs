//! # Core Module
//!
//! This module provides the fundamental building blocks for hull hydrostatics
//! and stability analysis, serving as the computational foundation of the
//! library.
//!
//! ## Overview
//!
//! The core module implements the data structures and pure numerical routines
//! that every calculation in the engine layer is built from. Nothing in this
//! module holds state between calls: geometry and loading snapshots are
//! immutable once constructed, and the quadrature primitives are free
//! functions over sample slices.
//!
//! ## Architecture
//!
//! The module is organized into specialized submodules that handle different
//! aspects of the problem domain:
//!
//! - **Hull Representation** ([`models`]) - Stations, waterlines, offsets, loading
//!   conditions, and the result value objects produced by the engine
//! - **Numerical Integration** ([`quadrature`]) - Definite integrals and first/second
//!   moments over unevenly-spaced samples, with adaptive rule selection
//! - **Data Boundaries** ([`provider`]) - Traits through which collaborators supply
//!   hull geometry and loading conditions
//! - **Sample Hulls** ([`fixtures`]) - Analytic hull-form generators for tests and
//!   example data seeding
//!
//! ## Design Constraints
//!
//! - The engine assumes a rigid, port/starboard-symmetric hull; offsets are
//!   half-breadths measured from the centerline.
//! - Offset grids are expected to be complete and rectangular; missing
//!   intersections are tolerated by substituting a zero half-breadth, but
//!   integration accuracy assumes the full grid.
//! - Stations are strictly increasing in `x` and waterlines strictly
//!   increasing in `z`; providers are responsible for this invariant.

pub mod fixtures;
pub mod models;
pub mod provider;
pub mod quadrature;
