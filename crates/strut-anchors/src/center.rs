//! Centering factories.

use strut_core::{Constraint, Point, Relation, ViewId, ViewTree};

use crate::superview_of;

/// Align `view`'s horizontal center with `other`'s, offset by `margin`.
pub fn center_x_to_center_x_of(view: ViewId, other: ViewId, margin: f64) -> Constraint {
    Constraint::relate(view.center_x(), Relation::Equal, other.center_x()).with_constant(margin)
}

/// Align `view`'s vertical center with `other`'s, offset by `margin`.
pub fn center_y_to_center_y_of(view: ViewId, other: ViewId, margin: f64) -> Constraint {
    Constraint::relate(view.center_y(), Relation::Equal, other.center_y()).with_constant(margin)
}

/// Align both of `view`'s centers with `other`'s.
pub fn center_to_center_of(view: ViewId, other: ViewId) -> Vec<Constraint> {
    vec![
        center_x_to_center_x_of(view, other, 0.0),
        center_y_to_center_y_of(view, other, 0.0),
    ]
}

/// Center `view` horizontally in its superview.
///
/// # Panics
///
/// Panics if `view` has no superview.
pub fn align_superview_center_x(tree: &ViewTree, view: ViewId) -> Constraint {
    center_x_to_center_x_of(view, superview_of(tree, view), 0.0)
}

/// Center `view` vertically in its superview.
///
/// # Panics
///
/// Panics if `view` has no superview.
pub fn align_superview_center_y(tree: &ViewTree, view: ViewId) -> Constraint {
    center_y_to_center_y_of(view, superview_of(tree, view), 0.0)
}

/// Center `view` on both axes in its superview.
///
/// # Panics
///
/// Panics if `view` has no superview.
pub fn center_in_superview(tree: &ViewTree, view: ViewId) -> Vec<Constraint> {
    center_to_center_of(view, superview_of(tree, view))
}

/// Pin `view`'s horizontal center to an absolute window coordinate.
pub fn center_x(view: ViewId, value: f64) -> Constraint {
    Constraint::fix(view.center_x(), Relation::Equal, value)
}

/// Pin `view`'s vertical center to an absolute window coordinate.
pub fn center_y(view: ViewId, value: f64) -> Constraint {
    Constraint::fix(view.center_y(), Relation::Equal, value)
}

/// Pin `view`'s center to an absolute window point.
pub fn center(view: ViewId, point: Point) -> Vec<Constraint> {
    vec![center_x(view, point.x), center_y(view, point.y)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use strut_core::Attribute;

    #[test]
    fn test_pairwise_centers_keep_margin_sign() {
        let a = ViewId(0);
        let b = ViewId(1);

        let constraint = center_x_to_center_x_of(a, b, 10.0);
        assert_eq!(constraint.anchor, a.center_x());
        assert_eq!(constraint.target, Some(b.center_x()));
        assert!((constraint.constant - 10.0).abs() < 0.001);

        let constraint = center_y_to_center_y_of(a, b, -6.0);
        assert!((constraint.constant + 6.0).abs() < 0.001);
    }

    #[test]
    fn test_center_to_center_order() {
        let a = ViewId(0);
        let b = ViewId(1);
        let constraints = center_to_center_of(a, b);
        assert_eq!(constraints.len(), 2);
        assert_eq!(constraints[0].anchor.attribute, Attribute::CenterX);
        assert_eq!(constraints[1].anchor.attribute, Attribute::CenterY);
        assert!(constraints.iter().all(|c| c.constant.abs() < 0.001));
    }

    #[test]
    fn test_center_in_superview() {
        let mut tree = ViewTree::new();
        let root = tree.add_root();
        let child = tree.add_subview(root);

        let constraints = center_in_superview(&tree, child);
        assert_eq!(constraints.len(), 2);
        assert_eq!(constraints[0].target, Some(root.center_x()));
        assert_eq!(constraints[1].target, Some(root.center_y()));
    }

    #[test]
    fn test_absolute_center_has_no_target() {
        let view = ViewId(2);
        let constraints = center(view, Point::new(160.0, 240.0));
        assert_eq!(constraints.len(), 2);
        assert_eq!(constraints[0].target, None);
        assert!((constraints[0].constant - 160.0).abs() < 0.001);
        assert_eq!(constraints[1].target, None);
        assert!((constraints[1].constant - 240.0).abs() < 0.001);
    }
}
