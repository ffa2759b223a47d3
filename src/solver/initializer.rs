//! Grid initialisation
//!
//! Builds the axes of a problem and the starting grid: row 0 holds the
//! initial profile evaluated at every position, and the boundary columns of
//! every row hold the Dirichlet values.

use ndarray::Array1;

use crate::error::Result;
use crate::physics::{DiffusionParameters, InitialCondition};
use crate::solver::boundary::DirichletBoundary;
use crate::solver::grid::{Grid, SpatialAxis, TemporalAxis};

/// Applies initial and boundary conditions to a fresh grid
///
/// # Example
///
/// ```rust
/// use heat1d::physics::{DiffusionParameters, InitialProfile};
/// use heat1d::solver::{DirichletBoundary, GridInitializer};
///
/// let params = DiffusionParameters::default().with_nx(11).with_t_final(0.01);
/// let init = GridInitializer::new(&params, DirichletBoundary::default()).unwrap();
///
/// let grid = init.allocate(&InitialProfile::SinPi).unwrap();
/// assert_eq!(grid.nt(), 10);
/// assert_eq!(grid.nx(), 11);
/// assert_eq!(grid.get(0, 0), Some(0.0));
/// ```
#[derive(Debug, Clone)]
pub struct GridInitializer {
    spatial: SpatialAxis,
    temporal: TemporalAxis,
    boundary: DirichletBoundary,
}

impl GridInitializer {
    /// Validate inputs and build both axes
    pub fn new(params: &DiffusionParameters, boundary: DirichletBoundary) -> Result<Self> {
        params.validate()?;
        boundary.validate()?;

        Ok(Self {
            spatial: SpatialAxis::from_parameters(params)?,
            temporal: TemporalAxis::from_parameters(params)?,
            boundary,
        })
    }

    pub fn spatial_axis(&self) -> &SpatialAxis {
        &self.spatial
    }

    pub fn temporal_axis(&self) -> &TemporalAxis {
        &self.temporal
    }

    pub fn boundary(&self) -> DirichletBoundary {
        self.boundary
    }

    /// Initial profile sampled on the spatial axis, boundary values applied
    pub fn initial_row(&self, initial: &dyn InitialCondition) -> Array1<f64> {
        let mut row = self.spatial.positions().mapv(|x| initial.value_at(x));
        self.boundary.apply_to_row(row.view_mut());
        row
    }

    /// Nt × Nx grid with row 0 and the boundary columns filled
    ///
    /// Interior cells of rows 1.. are zero until the stepper writes them.
    pub fn allocate(&self, initial: &dyn InitialCondition) -> Result<Grid> {
        let nt = self.temporal.len();
        let nx = self.spatial.len();

        let mut values = ndarray::Array2::zeros((nt, nx));
        values.row_mut(0).assign(&self.initial_row(initial));
        self.boundary.apply_to_grid(&mut values);

        Grid::from_array(values)
    }

    /// Consume the initializer, returning its axes
    pub fn into_axes(self) -> (SpatialAxis, TemporalAxis) {
        (self.spatial, self.temporal)
    }
}

// ================================================================================================
// Tests
// ================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{FnProfile, InitialProfile};
    use approx::assert_relative_eq;

    fn small_params() -> DiffusionParameters {
        DiffusionParameters::default().with_nx(5).with_t_final(0.005)
    }

    #[test]
    fn test_axes_match_parameters() {
        let init = GridInitializer::new(&small_params(), DirichletBoundary::default()).unwrap();
        assert_eq!(init.spatial_axis().len(), 5);
        assert_eq!(init.temporal_axis().len(), 5);
        assert_relative_eq!(init.spatial_axis().dx(), 0.25, epsilon = 1e-15);
    }

    #[test]
    fn test_initial_row_samples_profile() {
        let init = GridInitializer::new(&small_params(), DirichletBoundary::default()).unwrap();
        let row = init.initial_row(&InitialProfile::SinPi);

        assert_eq!(row[0], 0.0);
        assert_relative_eq!(row[2], 1.0, epsilon = 1e-15);
        // sin(pi) is not exactly zero; the boundary value overrides it
        assert_eq!(row[4], 0.0);
    }

    #[test]
    fn test_boundary_overrides_profile() {
        let boundary = DirichletBoundary::new(5.0, -5.0);
        let init = GridInitializer::new(&small_params(), boundary).unwrap();
        let grid = init.allocate(&FnProfile::new("one", |_| 1.0)).unwrap();

        for n in 0..grid.nt() {
            assert_eq!(grid.get(n, 0), Some(5.0));
            assert_eq!(grid.get(n, 4), Some(-5.0));
        }
        assert_eq!(grid.get(0, 2), Some(1.0));
        assert_eq!(grid.get(1, 2), Some(0.0));
    }

    #[test]
    fn test_rejects_invalid_inputs() {
        assert!(GridInitializer::new(&small_params().with_dt(-1.0), DirichletBoundary::default()).is_err());
        assert!(GridInitializer::new(&small_params(), DirichletBoundary::uniform(f64::INFINITY)).is_err());
    }
}
