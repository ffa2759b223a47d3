//! Closed-form solutions of the heat equation
//!
//! For homogeneous Dirichlet boundaries T(0, t) = T(L, t) = 0, a single sine
//! mode decays without changing shape:
//!
//! ```text
//! T(x, 0) = sin(k π x / L)
//! T(x, t) = sin(k π x / L) · exp(-alpha (k π / L)² t)
//! ```
//!
//! These are the reference solutions used to check the convergence of the
//! explicit stepper.

use std::f64::consts::PI;

/// Exact solution for a single sine mode `k` at position `x` and time `t`
pub fn sine_mode_solution(mode: u32, alpha: f64, length: f64, x: f64, t: f64) -> f64 {
    let wavenumber = mode as f64 * PI / length;
    (wavenumber * x).sin() * sine_mode_decay(mode, alpha, length, t)
}

/// Amplitude factor exp(-alpha (k π / L)² t) of mode `k`
pub fn sine_mode_decay(mode: u32, alpha: f64, length: f64, t: f64) -> f64 {
    let wavenumber = mode as f64 * PI / length;
    (-alpha * wavenumber * wavenumber * t).exp()
}

/// Amplification factor of mode `k` for one explicit step with stability number `r`
///
/// ```text
/// g = 1 - 4 r sin²(k π / (2 (Nx - 1)))
/// ```
///
/// The scheme is stable for mode `k` while |g| <= 1.
pub fn explicit_amplification(mode: u32, r: f64, nx: usize) -> f64 {
    let intervals = (nx - 1) as f64;
    let s = (mode as f64 * PI / (2.0 * intervals)).sin();
    1.0 - 4.0 * r * s * s
}
