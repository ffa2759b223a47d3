//! Numerical methods
//!
//! This module contains concrete implementations of the
//! [`Solver`](crate::solver::Solver) trait.
//!
//! # Available Methods
//!
//! - **[`ExplicitFdmSolver`]**: forward Euler in time, central difference in space
//!   - Order: O(dt) in time, O(dx²) in space
//!   - Cost: one three-point stencil per interior cell per step
//!   - Stability: r = alpha dt / dx² <= 0.5
//!
//! # Performance Considerations
//!
//! - **Rayon parallelization** (feature `parallel`) of the interior sweep
//!   for long rows
//! - **Configurable threshold** via `set_parallel_threshold()`

mod explicit;

pub use explicit::ExplicitFdmSolver;
