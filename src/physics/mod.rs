//! Physical description of the problem
//!
//! This module holds WHAT is being solved:
//!
//! - **Parameters** (`DiffusionParameters`): domain length, diffusivity,
//!   grid size, simulated time and time step
//! - **Initial conditions** (`InitialCondition`, `InitialProfile`): the
//!   temperature profile at t = 0 and the selection of a profile from a
//!   user-provided token
//! - **Analytical solutions** (`analytical`): closed-form references
//!
//! The numerical method (HOW it is solved) lives in [`crate::solver`].
//!
//! # Governing Equation
//!
//! ```text
//! ∂T/∂t = alpha · ∂²T/∂x²,   x ∈ [0, L],   t ∈ [0, T_final]
//! T(0, t) = T(L, t) = boundary value
//! T(x, 0) = initial profile
//! ```

pub mod analytical;
mod parameters;
mod profile;

pub use parameters::{DiffusionParameters, STABILITY_LIMIT};
pub use profile::{FnProfile, InitialCondition, InitialProfile, ProfileSelection, SelectionPolicy};
