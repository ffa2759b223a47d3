//! Diffusion parameters
//!
//! The physical and discretisation constants of a heat conduction problem,
//! gathered in a single immutable structure instead of module-level
//! constants.
//!
//! # Derived Quantities
//!
//! ```text
//! dx = L / (Nx - 1)
//! Nt = floor(T_final / dt)
//! r  = alpha * dt / dx²
//! ```
//!
//! `r` is the stability number of the explicit scheme. The scheme is stable
//! for `r <= 0.5`.

use crate::error::{HeatError, Result};

/// Stability limit of the explicit central-difference scheme.
pub const STABILITY_LIMIT: f64 = 0.5;

/// Physical and numerical parameters of a 1D diffusion problem
///
/// # Defaults
///
/// | Field     | Value  |
/// |-----------|--------|
/// | `length`  | 1.0    |
/// | `alpha`   | 0.01   |
/// | `nx`      | 100    |
/// | `t_final` | 10.0   |
/// | `dt`      | 0.001  |
///
/// # Example
///
/// ```rust
/// use heat1d::physics::DiffusionParameters;
///
/// let params = DiffusionParameters::default()
///     .with_nx(51)
///     .with_dt(0.01);
///
/// params.validate().unwrap();
/// assert_eq!(params.nt(), 1000);
/// assert!(params.is_stable());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiffusionParameters {
    /// Domain length L (m)
    pub length: f64,

    /// Thermal diffusivity alpha = k / (rho * Cp) (m²/s)
    pub alpha: f64,

    /// Number of spatial grid points, boundaries included
    pub nx: usize,

    /// Total simulated time (s)
    pub t_final: f64,

    /// Time step size (s)
    pub dt: f64,
}

impl Default for DiffusionParameters {
    fn default() -> Self {
        Self {
            length: 1.0,
            alpha: 0.01,
            nx: 100,
            t_final: 10.0,
            dt: 0.001,
        }
    }
}

impl DiffusionParameters {
    /// Create validated parameters
    ///
    /// # Errors
    ///
    /// Returns [`HeatError::InvalidParameters`] when any value is outside its
    /// domain (see [`validate`](Self::validate)).
    pub fn new(length: f64, alpha: f64, nx: usize, t_final: f64, dt: f64) -> Result<Self> {
        let params = Self { length, alpha, nx, t_final, dt };
        params.validate()?;
        Ok(params)
    }

    /// Builder pattern: set domain length
    pub fn with_length(mut self, length: f64) -> Self {
        self.length = length;
        self
    }

    /// Builder pattern: set thermal diffusivity
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Builder pattern: set number of spatial points
    pub fn with_nx(mut self, nx: usize) -> Self {
        self.nx = nx;
        self
    }

    /// Builder pattern: set total simulated time
    pub fn with_t_final(mut self, t_final: f64) -> Self {
        self.t_final = t_final;
        self
    }

    /// Builder pattern: set time step size
    pub fn with_dt(mut self, dt: f64) -> Self {
        self.dt = dt;
        self
    }

    /// Check that every parameter lies in its valid domain
    ///
    /// - `length`, `alpha`, `t_final`, `dt`: finite and strictly positive
    /// - `nx >= 2`
    /// - `floor(t_final / dt) >= 1` (at least the initial row)
    pub fn validate(&self) -> Result<()> {
        check_positive("length", self.length)?;
        check_positive("alpha", self.alpha)?;
        check_positive("t_final", self.t_final)?;
        check_positive("dt", self.dt)?;

        if self.nx < 2 {
            return Err(HeatError::invalid(format!(
                "nx must be at least 2 (two boundary points), got {}",
                self.nx
            )));
        }

        if self.nt() == 0 {
            return Err(HeatError::invalid(format!(
                "dt ({}) must not exceed t_final ({}): no time row would be produced",
                self.dt, self.t_final
            )));
        }

        Ok(())
    }

    /// Spatial step dx = L / (Nx - 1)
    ///
    /// NaN when `nx < 2`, so `stability_number()` is NaN and `is_stable()`
    /// is false for such a grid.
    pub fn dx(&self) -> f64 {
        if self.nx < 2 {
            return f64::NAN;
        }
        self.length / (self.nx - 1) as f64
    }

    /// Number of time rows Nt = floor(T_final / dt), initial row included
    pub fn nt(&self) -> usize {
        let ratio = self.t_final / self.dt;
        if ratio.is_finite() && ratio >= 0.0 {
            ratio.floor() as usize
        } else {
            0
        }
    }

    /// Stability number r = alpha * dt / dx²
    pub fn stability_number(&self) -> f64 {
        let dx = self.dx();
        self.alpha * self.dt / (dx * dx)
    }

    /// `true` when r <= 0.5
    pub fn is_stable(&self) -> bool {
        self.stability_number() <= STABILITY_LIMIT
    }

    /// Largest dt that keeps r <= 0.5 on the current grid
    pub fn max_stable_dt(&self) -> f64 {
        let dx = self.dx();
        STABILITY_LIMIT * dx * dx / self.alpha
    }
}

fn check_positive(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(HeatError::invalid(format!("{} must be finite, got {}", name, value)));
    }
    if value <= 0.0 {
        return Err(HeatError::invalid(format!("{} must be positive, got {}", name, value)));
    }
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
