//! Filling factories: span a superview, or span a scroll container's page.

use strut_core::{Constraint, Relation, ViewId, ViewTree};

use crate::edges::{
    align_superview_bottom, align_superview_left, align_superview_right, align_superview_top,
};

/// Span `view` across its superview's width by pinning both vertical edges.
///
/// # Panics
///
/// Panics if `view` has no superview.
pub fn fill_superview_width(
    tree: &ViewTree,
    view: ViewId,
    leading_margin: f64,
    trailing_margin: f64,
) -> Vec<Constraint> {
    vec![
        align_superview_left(tree, view, leading_margin),
        align_superview_right(tree, view, trailing_margin),
    ]
}

/// Span `view` across its superview's height by pinning both horizontal edges.
///
/// # Panics
///
/// Panics if `view` has no superview.
pub fn fill_superview_height(
    tree: &ViewTree,
    view: ViewId,
    top_margin: f64,
    bottom_margin: f64,
) -> Vec<Constraint> {
    vec![
        align_superview_top(tree, view, top_margin),
        align_superview_bottom(tree, view, bottom_margin),
    ]
}

/// Make `view` coincide with its superview by pinning all four edges.
///
/// # Panics
///
/// Panics if `view` has no superview.
pub fn fill_superview(tree: &ViewTree, view: ViewId) -> Vec<Constraint> {
    let mut constraints = fill_superview_width(tree, view, 0.0, 0.0);
    constraints.extend(fill_superview_height(tree, view, 0.0, 0.0));
    constraints
}

/// Make `view` span one horizontal page of `scroll_view`.
///
/// A scroll container sizes its content area from its subviews, so pinning
/// both edges to the container would leave the span indeterminate. Instead
/// the page is pinned at its leading edge and given the container's width,
/// shrunk by both margins.
pub fn fill_scroll_page_horizontally(
    view: ViewId,
    scroll_view: ViewId,
    leading_margin: f64,
    trailing_margin: f64,
) -> Vec<Constraint> {
    vec![
        Constraint::relate(view.left(), Relation::Equal, scroll_view.left())
            .with_constant(leading_margin),
        Constraint::relate(view.width(), Relation::Equal, scroll_view.width())
            .with_constant(-(leading_margin + trailing_margin)),
    ]
}

/// Make `view` span one vertical page of `scroll_view`.
///
/// Same shape as [`fill_scroll_page_horizontally`]: leading pin plus an
/// extent link shrunk by both margins.
pub fn fill_scroll_page_vertically(
    view: ViewId,
    scroll_view: ViewId,
    top_margin: f64,
    bottom_margin: f64,
) -> Vec<Constraint> {
    vec![
        Constraint::relate(view.top(), Relation::Equal, scroll_view.top())
            .with_constant(top_margin),
        Constraint::relate(view.height(), Relation::Equal, scroll_view.height())
            .with_constant(-(top_margin + bottom_margin)),
    ]
}

/// Make `view` coincide with one full page of `scroll_view` on both axes.
pub fn fill_scroll_page(view: ViewId, scroll_view: ViewId) -> Vec<Constraint> {
    let mut constraints = fill_scroll_page_horizontally(view, scroll_view, 0.0, 0.0);
    constraints.extend(fill_scroll_page_vertically(view, scroll_view, 0.0, 0.0));
    constraints
}
