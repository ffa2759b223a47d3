//! heat1d: 1D Transient Heat Conduction
//!
//! Solves the one-dimensional heat equation `∂T/∂t = alpha ∂²T/∂x²` on
//! [0, L] with fixed-temperature (Dirichlet) ends, using the explicit
//! finite-difference scheme (forward Euler in time, central difference in
//! space).
//!
//! # Architecture
//!
//! heat1d keeps the problem apart from the method:
//!
//! 1. **Physics** (WHAT to solve)
//!    - Diffusion parameters and their derived quantities (dx, Nt, r)
//!    - Initial temperature profiles
//!    - Closed-form reference solutions
//!
//! 2. **Solver** (HOW to solve)
//!    - Space-time grid, boundary application
//!    - Pure row transform (stencil), sequential or data-parallel
//!    - Stability policy and NaN/Inf checks
//!
//! 3. **Output** (read-only consumers of a finished grid)
//!    - CSV export
//!    - Profile plots, heatmap, 3D surface
//!
//! # Quick Start
//!
//! ```rust
//! use heat1d::prelude::*;
//!
//! # fn main() -> heat1d::Result<()> {
//! // 1. Pick the initial condition from a user token (falls back to sin(pi x))
//! let selection = InitialProfile::from_selection("2", SelectionPolicy::default())?;
//!
//! // 2. Describe the scenario
//! let params = DiffusionParameters::default().with_t_final(0.5);
//! let scenario = Scenario::with_profile(params, selection.profile);
//!
//! // 3. Run the explicit stepper
//! let result = ExplicitFdmSolver::new().solve(&scenario, &SolverConfiguration::default())?;
//!
//! // 4. Access results
//! assert_eq!(result.nt(), 500);
//! assert_eq!(result.nx(), 100);
//! assert!(result.max_amplitude(result.nt() - 1) < result.max_amplitude(0));
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`physics`]: parameters, initial profiles, reference solutions
//! - [`solver`]: grid, stencil, explicit solver
//! - [`output`]: CSV export and plots
//! - [`error`]: crate error type
//!
//! # Features
//!
//! - `parallel`: sweep long rows with Rayon

pub mod error;
pub mod output;
pub mod physics;
pub mod solver;

pub use error::{HeatError, Result};

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use heat1d::prelude::*;
    //! ```
    pub use crate::error::{HeatError, Result};
    pub use crate::physics::{
        DiffusionParameters,
        InitialCondition,
        InitialProfile,
        SelectionPolicy,
    };
    pub use crate::solver::{
        DirichletBoundary,
        ExplicitFdmSolver,
        Scenario,
        SimulationResult,
        Solver,
        SolverConfiguration,
        StabilityPolicy,
    };
}
