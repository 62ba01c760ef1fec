//! Edge alignment factories.
//!
//! Each function relates one edge of a view to an edge of another view, or
//! to the matching edge of its superview. The margin is always the visual
//! gap: factories pinning a right or bottom edge negate it internally.

use strut_core::{Constraint, Relation, ViewId, ViewTree};

use crate::superview_of;

/// Align `view`'s left edge with `other`'s left edge, offset by `margin`.
pub fn left_to_left_of(view: ViewId, other: ViewId, margin: f64) -> Constraint {
    Constraint::relate(view.left(), Relation::Equal, other.left()).with_constant(margin)
}

/// Place `view`'s left edge `margin` points after `other`'s right edge.
pub fn left_to_right_of(view: ViewId, other: ViewId, margin: f64) -> Constraint {
    Constraint::relate(view.left(), Relation::Equal, other.right()).with_constant(margin)
}

/// Place `view`'s left edge `margin` points after `other`'s horizontal center.
pub fn left_to_center_x_of(view: ViewId, other: ViewId, margin: f64) -> Constraint {
    Constraint::relate(view.left(), Relation::Equal, other.center_x()).with_constant(margin)
}

/// Align `view`'s right edge with `other`'s right edge, `margin` before it.
pub fn right_to_right_of(view: ViewId, other: ViewId, margin: f64) -> Constraint {
    Constraint::relate(view.right(), Relation::Equal, other.right()).with_constant(-margin)
}

/// Place `view`'s right edge `margin` points before `other`'s left edge.
pub fn right_to_left_of(view: ViewId, other: ViewId, margin: f64) -> Constraint {
    Constraint::relate(view.right(), Relation::Equal, other.left()).with_constant(-margin)
}

/// Place `view`'s right edge `margin` points before `other`'s horizontal center.
pub fn right_to_center_x_of(view: ViewId, other: ViewId, margin: f64) -> Constraint {
    Constraint::relate(view.right(), Relation::Equal, other.center_x()).with_constant(-margin)
}

/// Align `view`'s top edge with `other`'s top edge, offset by `margin`.
pub fn top_to_top_of(view: ViewId, other: ViewId, margin: f64) -> Constraint {
    Constraint::relate(view.top(), Relation::Equal, other.top()).with_constant(margin)
}

/// Place `view`'s top edge `margin` points below `other`'s bottom edge.
pub fn top_to_bottom_of(view: ViewId, other: ViewId, margin: f64) -> Constraint {
    Constraint::relate(view.top(), Relation::Equal, other.bottom()).with_constant(margin)
}

/// Place `view`'s top edge `margin` points below `other`'s vertical center.
pub fn top_to_center_y_of(view: ViewId, other: ViewId, margin: f64) -> Constraint {
    Constraint::relate(view.top(), Relation::Equal, other.center_y()).with_constant(margin)
}

/// Align `view`'s bottom edge with `other`'s bottom edge, `margin` above it.
pub fn bottom_to_bottom_of(view: ViewId, other: ViewId, margin: f64) -> Constraint {
    Constraint::relate(view.bottom(), Relation::Equal, other.bottom()).with_constant(-margin)
}

/// Place `view`'s bottom edge `margin` points above `other`'s top edge.
pub fn bottom_to_top_of(view: ViewId, other: ViewId, margin: f64) -> Constraint {
    Constraint::relate(view.bottom(), Relation::Equal, other.top()).with_constant(-margin)
}

/// Place `view`'s bottom edge `margin` points above `other`'s vertical center.
pub fn bottom_to_center_y_of(view: ViewId, other: ViewId, margin: f64) -> Constraint {
    Constraint::relate(view.bottom(), Relation::Equal, other.center_y()).with_constant(-margin)
}

/// Align `view`'s left edge with its superview's, `margin` inside it.
///
/// # Panics
///
/// Panics if `view` has no superview.
pub fn align_superview_left(tree: &ViewTree, view: ViewId, margin: f64) -> Constraint {
    left_to_left_of(view, superview_of(tree, view), margin)
}

/// Align `view`'s right edge with its superview's, `margin` inside it.
///
/// # Panics
///
/// Panics if `view` has no superview.
pub fn align_superview_right(tree: &ViewTree, view: ViewId, margin: f64) -> Constraint {
    right_to_right_of(view, superview_of(tree, view), margin)
}

/// Align `view`'s top edge with its superview's, `margin` inside it.
///
/// # Panics
///
/// Panics if `view` has no superview.
pub fn align_superview_top(tree: &ViewTree, view: ViewId, margin: f64) -> Constraint {
    top_to_top_of(view, superview_of(tree, view), margin)
}

/// Align `view`'s bottom edge with its superview's, `margin` inside it.
///
/// # Panics
///
/// Panics if `view` has no superview.
pub fn align_superview_bottom(tree: &ViewTree, view: ViewId, margin: f64) -> Constraint {
    bottom_to_bottom_of(view, superview_of(tree, view), margin)
}
