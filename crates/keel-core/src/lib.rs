//! # Keel Core Library
//!
//! A library for computing naval-architecture hydrostatic and intact-stability
//! properties of a ship hull from a discretized station/waterline/offset grid.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict three-layer architecture to ensure a clear
//! separation of concerns, making it modular, testable, and extensible.
//!
//! - **[`core`]: The Foundation.** Contains stateless data models (`HullGeometry`,
//!   `LoadingCondition`, result value objects), the pure quadrature primitives
//!   (`quadrature`), boundary traits for geometry/loadcase providers, and analytic
//!   sample-hull generators.
//!
//! - **[`engine`]: The Logic Core.** This layer orchestrates calculations over an
//!   immutable geometry snapshot: the hydrostatic calculator, curve and Bonjean
//!   generation, righting-arm (GZ) curve computation, regulatory criteria checks,
//!   and the equilibrium-trim solver.
//!
//! - **[`workflows`]: The Public API.** This is the highest-level, user-facing layer.
//!   It ties the `engine` and `core` together to execute complete procedures, such
//!   as a full intact-stability assessment of a vessel at a loading condition.
//!
//! All arithmetic is carried out in SI units (meters, kilograms); heel and trim
//! angles cross the API in degrees. Every computation is pure given its
//! geometry/loading inputs — no state is shared between calls.

pub mod core;
pub mod engine;
pub mod workflows;
