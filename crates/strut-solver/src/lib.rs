//! Constraint solving for view layout.
//!
//! This crate implements:
//! - Cassowary simplex algorithm for incremental solving
//! - Lowering of constraint descriptors onto solver variables
//! - Priority handling

mod engine;
mod simplex;

pub use engine::{ConstraintHandle, Engine, Layout, SolveError};
pub use simplex::{Expression, SimplexError, Solver, Strength, Variable};

use strut_core::Constraint;

/// Activate a batch of descriptors and solve them in one shot.
///
/// Convenient for static layouts solved once. Anything incremental,
/// resizing a window or swapping constraints, wants a long-lived
/// [`Engine`] instead.
pub fn solve(constraints: &[Constraint]) -> Result<Layout, SolveError> {
    let mut engine = Engine::new();
    engine.activate_all(constraints)?;
    Ok(engine.solve())
}
