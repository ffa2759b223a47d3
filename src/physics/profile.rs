//! Initial conditions and profile selection
//!
//! This module defines:
//! - `InitialCondition`: trait for any temperature profile T(x, t = 0)
//! - `InitialProfile`: the enumerated profiles offered to the end user
//! - `FnProfile`: closure-backed profile for custom initial conditions
//! - `SelectionPolicy`: what to do with an invalid selection token
//!
//! # Selection
//!
//! The selection step is a pure function from the token typed by the user to
//! a profile. No I/O happens here; the caller decides where the token comes
//! from.
//!
//! ```rust
//! use heat1d::physics::{InitialProfile, SelectionPolicy};
//!
//! let selection = InitialProfile::from_selection("2", SelectionPolicy::default()).unwrap();
//! assert_eq!(selection.profile, InitialProfile::Sin2Pi);
//! assert!(!selection.fell_back);
//!
//! // Unknown choices fall back to sin(pi * x)
//! let selection = InitialProfile::from_selection("99", SelectionPolicy::default()).unwrap();
//! assert_eq!(selection.profile, InitialProfile::SinPi);
//! assert!(selection.fell_back);
//! ```

use std::f64::consts::PI;
use std::fmt;

use crate::error::{HeatError, Result};

// =================================================================================================
// Initial Condition Trait
// =================================================================================================

/// Temperature profile at t = 0
///
/// # Responsibility
///
/// Evaluates the initial temperature at a given position. Boundary values
/// are applied afterwards by the grid initializer, so implementations do not
/// need to match the Dirichlet values at the domain ends.
pub trait InitialCondition: Send + Sync {
    /// Temperature at position `x`
    fn value_at(&self, x: f64) -> f64;

    /// Human-readable name
    fn name(&self) -> &str;
}

// =================================================================================================
// Enumerated Profiles
// =================================================================================================

/// Initial profiles available from the selection menu
///
/// Profiles are written in terms of the raw position `x`, exactly as listed
/// in the menu. On the default unit domain they vanish at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InitialProfile {
    /// sin(pi * x)
    #[default]
    SinPi,

    /// sin(2 pi * x)
    Sin2Pi,

    /// x sin(pi * x) + x sin(2 pi * x)
    Composite,
}

impl InitialProfile {
    /// All profiles in menu order
    pub const ALL: [InitialProfile; 3] = [
        InitialProfile::SinPi,
        InitialProfile::Sin2Pi,
        InitialProfile::Composite,
    ];

    /// Menu index (1-based) of this profile
    pub fn index(&self) -> u32 {
        match self {
            InitialProfile::SinPi => 1,
            InitialProfile::Sin2Pi => 2,
            InitialProfile::Composite => 3,
        }
    }

    /// Profile for a 1-based menu index
    pub fn from_index(index: u32) -> Option<Self> {
        match index {
            1 => Some(InitialProfile::SinPi),
            2 => Some(InitialProfile::Sin2Pi),
            3 => Some(InitialProfile::Composite),
            _ => None,
        }
    }

    /// Formula shown in the selection menu
    pub fn label(&self) -> &'static str {
        match self {
            InitialProfile::SinPi => "sin(pi * x)",
            InitialProfile::Sin2Pi => "sin(2pi * x)",
            InitialProfile::Composite => "x*sin(pi * x) + x*sin(2pi * x)",
        }
    }

    /// Resolve a selection token
    ///
    /// The token is trimmed and parsed as a menu index. Anything that is not
    /// `1`, `2` or `3` is invalid and handled according to `policy`.
    ///
    /// # Errors
    ///
    /// Only with [`SelectionPolicy::Strict`]: returns
    /// [`HeatError::InvalidSelection`] for an invalid token.
    pub fn from_selection(token: &str, policy: SelectionPolicy) -> Result<ProfileSelection> {
        let trimmed = token.trim();
        let parsed = trimmed.parse::<u32>().ok().and_then(Self::from_index);

        match (parsed, policy) {
            (Some(profile), _) => Ok(ProfileSelection { profile, fell_back: false }),
            (None, SelectionPolicy::FallbackToDefault) => {
                let profile = Self::default();
                log::warn!(
                    "Invalid initial-condition choice {:?}. Defaulting to {}.",
                    trimmed,
                    profile.label()
                );
                Ok(ProfileSelection { profile, fell_back: true })
            }
            (None, SelectionPolicy::Strict) => Err(HeatError::InvalidSelection {
                token: trimmed.to_string(),
            }),
        }
    }
}

impl InitialCondition for InitialProfile {
    fn value_at(&self, x: f64) -> f64 {
        match self {
            InitialProfile::SinPi => (PI * x).sin(),
            InitialProfile::Sin2Pi => (2.0 * PI * x).sin(),
            InitialProfile::Composite => x * (PI * x).sin() + x * (2.0 * PI * x).sin(),
        }
    }

    fn name(&self) -> &str {
        self.label()
    }
}

impl fmt::Display for InitialProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.index(), self.label())
    }
}

// =================================================================================================
// Selection Policy
// =================================================================================================

/// Handling of invalid selection tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionPolicy {
    /// Fall back to [`InitialProfile::SinPi`] and log a notice
    #[default]
    FallbackToDefault,

    /// Reject the token with [`HeatError::InvalidSelection`]
    Strict,
}

/// Outcome of a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileSelection {
    /// Selected profile
    pub profile: InitialProfile,

    /// `true` when the token was invalid and the default was used
    pub fell_back: bool,
}

// =================================================================================================
// Closure-backed Profile
// =================================================================================================

/// Initial condition backed by a closure
///
/// # Example
///
/// ```rust
/// use heat1d::physics::{FnProfile, InitialCondition};
///
/// let tent = FnProfile::new("tent", |x: f64| 1.0 - (2.0 * x - 1.0).abs());
/// assert_eq!(tent.value_at(0.5), 1.0);
/// ```
pub struct FnProfile<F> {
    name: String,
    function: F,
}

impl<F> FnProfile<F>
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    pub fn new(name: impl Into<String>, function: F) -> Self {
        Self { name: name.into(), function }
    }
}

impl<F> InitialCondition for FnProfile<F>
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    fn value_at(&self, x: f64) -> f64 {
        (self.function)(x)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl<F> fmt::Debug for FnProfile<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnProfile").field("name", &self.name).finish()
    }
}

// =================================================================================================
// Tests
// =================================================================================================
