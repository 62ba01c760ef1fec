//! Descriptor-facing layout engine.
//!
//! The [`Engine`] accepts the constraint descriptors callers build (typically
//! via `strut-anchors`) and lowers them onto simplex expressions. Each view
//! mentioned by a descriptor gets four solver variables (x, y, width,
//! height); every attribute is a linear combination of those, so `Right` is
//! `x + width` and `CenterY` is `y + height / 2`.
//!
//! Activation is the hand-off point: the engine holds nothing about a
//! descriptor until [`Engine::activate`] is called, and forgets it again on
//! [`Engine::deactivate`]. Solving itself never fails; conflicts surface at
//! activation, while the offending descriptor is still known.

use std::collections::HashMap;

use indexmap::IndexMap;
use thiserror::Error;

use strut_core::{Anchor, Attribute, Constraint, Rect, Relation, ViewId};

use crate::simplex::{Expression, SimplexError, Solver, Strength, Variable};

/// Errors reported while activating or deactivating descriptors.
#[derive(Debug, Error)]
pub enum SolveError {
    /// A required constraint conflicts with the already-active set.
    #[error("unsatisfiable required constraint: {description}")]
    Unsatisfiable { description: String },

    /// The handle does not name an active constraint.
    #[error("constraint is not active")]
    UnknownConstraint,

    /// An internal solver invariant was violated.
    #[error("solver invariant violated: {0}")]
    Internal(&'static str),
}

/// Handle naming one activation, used to deactivate it later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConstraintHandle(usize);

/// Solver variables for one view's frame.
#[derive(Debug, Clone, Copy)]
struct ViewVars {
    x: Variable,
    y: Variable,
    width: Variable,
    height: Variable,
}

/// Solved frames, keyed by view in first-activation order.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    frames: IndexMap<ViewId, Rect>,
}

impl Layout {
    /// Get the solved frame of a view.
    pub fn frame(&self, view: ViewId) -> Option<Rect> {
        self.frames.get(&view).copied()
    }

    /// Number of views with a solved frame.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Check whether any view was solved.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Iterate over solved frames in first-activation order.
    pub fn iter(&self) -> impl Iterator<Item = (ViewId, Rect)> + '_ {
        self.frames.iter().map(|(&view, &frame)| (view, frame))
    }
}

/// The layout engine: turns activated descriptors into solved frames.
#[derive(Debug, Default)]
pub struct Engine {
    solver: Solver,
    /// Frame variables per view, in first-activation order
    views: IndexMap<ViewId, ViewVars>,
    /// Underlying solver constraint ids per handle
    active: HashMap<ConstraintHandle, Vec<usize>>,
    next_handle: usize,
}

impl Engine {
    /// Create an empty engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate one descriptor, adding it to the solved system.
    ///
    /// The caller keeps ownership of the descriptor; the engine copies what
    /// it needs. A required descriptor that conflicts with the active set is
    /// rejected and leaves the engine unchanged.
    pub fn activate(&mut self, constraint: &Constraint) -> Result<ConstraintHandle, SolveError> {
        let id = self.add_to_solver(constraint)?;
        let handle = self.register(vec![id]);
        tracing::trace!("activated {} as {:?}", describe(constraint), handle);
        Ok(handle)
    }

    /// Activate a batch of descriptors, one handle per descriptor.
    ///
    /// Stops at the first rejected descriptor; descriptors activated before
    /// it stay active.
    pub fn activate_all(
        &mut self,
        constraints: &[Constraint],
    ) -> Result<Vec<ConstraintHandle>, SolveError> {
        constraints.iter().map(|c| self.activate(c)).collect()
    }

    /// Deactivate a previously activated constraint.
    pub fn deactivate(&mut self, handle: ConstraintHandle) -> Result<(), SolveError> {
        let ids = self
            .active
            .remove(&handle)
            .ok_or(SolveError::UnknownConstraint)?;
        for id in ids {
            match self.solver.remove_constraint(id) {
                Ok(()) => {}
                Err(SimplexError::Internal(message)) => return Err(SolveError::Internal(message)),
                Err(_) => return Err(SolveError::Internal("handle named a missing tableau row")),
            }
        }
        tracing::trace!("deactivated {:?}", handle);
        Ok(())
    }

    /// Pin a view's frame with required strength.
    ///
    /// This is how window geometry enters the system: pin the root view to
    /// the window frame and let descriptors place everything else inside it.
    /// Re-pinning a view means deactivating the returned handle first; a
    /// conflicting pin is rejected without leaving partial pins behind.
    pub fn set_frame(&mut self, view: ViewId, frame: Rect) -> Result<ConstraintHandle, SolveError> {
        let pins = [
            Constraint::fix(view.left(), Relation::Equal, frame.x),
            Constraint::fix(view.top(), Relation::Equal, frame.y),
            Constraint::fix(view.width(), Relation::Equal, frame.width),
            Constraint::fix(view.height(), Relation::Equal, frame.height),
        ];

        let mut ids = Vec::with_capacity(pins.len());
        for pin in &pins {
            match self.add_to_solver(pin) {
                Ok(id) => ids.push(id),
                Err(err) => {
                    for id in ids {
                        self.solver.remove_constraint(id).ok();
                    }
                    return Err(err);
                }
            }
        }

        let handle = self.register(ids);
        tracing::debug!("pinned view {} to {:?} as {:?}", view.0, frame, handle);
        Ok(handle)
    }

    /// Solve the active system and return every touched view's frame.
    ///
    /// A view axis no active constraint determines settles at zero.
    pub fn solve(&mut self) -> Layout {
        self.solver.update_variables();

        let mut frames = IndexMap::with_capacity(self.views.len());
        for (&view, vars) in &self.views {
            frames.insert(
                view,
                Rect::new(
                    self.solver.value_of(vars.x),
                    self.solver.value_of(vars.y),
                    self.solver.value_of(vars.width),
                    self.solver.value_of(vars.height),
                ),
            );
        }

        tracing::debug!(
            "solved {} views under {} activations",
            frames.len(),
            self.active.len()
        );
        Layout { frames }
    }

    fn register(&mut self, ids: Vec<usize>) -> ConstraintHandle {
        let handle = ConstraintHandle(self.next_handle);
        self.next_handle += 1;
        self.active.insert(handle, ids);
        handle
    }

    fn add_to_solver(&mut self, constraint: &Constraint) -> Result<usize, SolveError> {
        let expression = self.expression_for(constraint);
        let strength = Strength::from_priority(constraint.priority);
        self.solver
            .add_constraint(&expression, constraint.relation, strength)
            .map_err(|err| match err {
                SimplexError::Unsatisfiable => SolveError::Unsatisfiable {
                    description: describe(constraint),
                },
                SimplexError::Internal(message) => SolveError::Internal(message),
                SimplexError::UnknownConstraint => {
                    SolveError::Internal("solver rejected a fresh constraint as unknown")
                }
            })
    }

    /// Lower a descriptor to `anchor - multiplier * target - constant`,
    /// related to zero.
    fn expression_for(&mut self, constraint: &Constraint) -> Expression {
        let mut expression = Expression::from_constant(-constraint.constant);
        self.add_anchor_terms(&mut expression, constraint.anchor, 1.0);
        if let Some(target) = constraint.target {
            self.add_anchor_terms(&mut expression, target, -constraint.multiplier);
        }
        expression
    }

    fn add_anchor_terms(&mut self, expression: &mut Expression, anchor: Anchor, scale: f64) {
        let vars = self.vars_for(anchor.view);
        match anchor.attribute {
            Attribute::Left => expression.add_term(vars.x, scale),
            Attribute::Top => expression.add_term(vars.y, scale),
            Attribute::Width => expression.add_term(vars.width, scale),
            Attribute::Height => expression.add_term(vars.height, scale),
            Attribute::Right => {
                expression.add_term(vars.x, scale);
                expression.add_term(vars.width, scale);
            }
            Attribute::Bottom => {
                expression.add_term(vars.y, scale);
                expression.add_term(vars.height, scale);
            }
            Attribute::CenterX => {
                expression.add_term(vars.x, scale);
                expression.add_term(vars.width, scale * 0.5);
            }
            Attribute::CenterY => {
                expression.add_term(vars.y, scale);
                expression.add_term(vars.height, scale * 0.5);
            }
        }
    }

    fn vars_for(&mut self, view: ViewId) -> ViewVars {
        if let Some(&vars) = self.views.get(&view) {
            return vars;
        }
        let vars = ViewVars {
            x: self.solver.new_variable(),
            y: self.solver.new_variable(),
            width: self.solver.new_variable(),
            height: self.solver.new_variable(),
        };
        self.views.insert(view, vars);
        vars
    }
}

/// Render a descriptor for diagnostics.
fn describe(constraint: &Constraint) -> String {
    let relation = match constraint.relation {
        Relation::Equal => "==",
        Relation::LessOrEqual => "<=",
        Relation::GreaterOrEqual => ">=",
    };
    match constraint.target {
        Some(target) => format!(
            "view {}.{:?} {} {} * view {}.{:?} + {}",
            constraint.anchor.view.0,
            constraint.anchor.attribute,
            relation,
            constraint.multiplier,
            target.view.0,
            target.attribute,
            constraint.constant,
        ),
        None => format!(
            "view {}.{:?} {} {}",
            constraint.anchor.view.0, constraint.anchor.attribute, relation, constraint.constant,
        ),
    }
}
