//! Simulation scenario definition
//!
//! A scenario combines the diffusion parameters with the initial and
//! boundary conditions.
use crate::error::Result;
use crate::physics::{DiffusionParameters, InitialCondition, InitialProfile};
use crate::solver::boundary::DirichletBoundary;
use crate::solver::initializer::GridInitializer;

/// Simulation scenario
///
/// Defines a specific case to simulate:
/// - Diffusion parameters (domain, diffusivity, discretisation)
/// - Initial condition (profile at t = 0)
/// - Boundary condition (fixed end temperatures)
///
/// This is the "WHAT to solve" (not "HOW to solve").
///
/// # Examples
///
/// ```rust
/// use heat1d::physics::{DiffusionParameters, InitialProfile};
/// use heat1d::solver::{DirichletBoundary, Scenario};
///
/// let scenario = Scenario::new(
///     DiffusionParameters::default(),
///     Box::new(InitialProfile::Sin2Pi),
///     DirichletBoundary::default(),
/// );
/// assert!(scenario.validate().is_ok());
/// assert_eq!(scenario.initial_condition_name(), "sin(2pi * x)");
/// ```
pub struct Scenario {
    /// Physical and discretisation parameters
    pub parameters: DiffusionParameters,

    /// Temperature profile at t = 0
    pub initial: Box<dyn InitialCondition>,

    /// Fixed end temperatures
    pub boundary: DirichletBoundary,
}

impl Scenario {
    /// Create a scenario
    pub fn new(
        parameters: DiffusionParameters,
        initial: Box<dyn InitialCondition>,
        boundary: DirichletBoundary,
    ) -> Self {
        Self { parameters, initial, boundary }
    }

    /// Scenario with one of the menu profiles and zero boundaries
    pub fn with_profile(parameters: DiffusionParameters, profile: InitialProfile) -> Self {
        Self::new(parameters, Box::new(profile), DirichletBoundary::default())
    }

    /// Verify parameters and boundary values
    pub fn validate(&self) -> Result<()> {
        self.parameters.validate()?;
        self.boundary.validate()
    }

    /// Grid initializer for this scenario
    pub fn initializer(&self) -> Result<GridInitializer> {
        GridInitializer::new(&self.parameters, self.boundary)
    }

    /// Get initial condition name
    pub fn initial_condition_name(&self) -> &str {
        self.initial.name()
    }
}

impl std::fmt::Debug for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scenario")
            .field("parameters", &self.parameters)
            .field("initial condition", &self.initial_condition_name())
            .field("boundary", &self.boundary)
            .finish()
    }
}

// ================================================================================================
// Tests
// ================================================================================================
