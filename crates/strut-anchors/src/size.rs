//! Sizing factories: absolute sizes, size matching, ratios, and clamps.

use strut_core::{Constraint, Relation, Size, ViewId, ViewTree};

use crate::superview_of;

/// Fix `view`'s width to an absolute value.
pub fn width(view: ViewId, value: f64) -> Constraint {
    Constraint::fix(view.width(), Relation::Equal, value)
}

/// Fix `view`'s height to an absolute value.
pub fn height(view: ViewId, value: f64) -> Constraint {
    Constraint::fix(view.height(), Relation::Equal, value)
}

/// Fix both of `view`'s dimensions.
pub fn size(view: ViewId, size: Size) -> Vec<Constraint> {
    vec![width(view, size.width), height(view, size.height)]
}

/// Match `view`'s width to `other`'s.
pub fn width_to_width_of(view: ViewId, other: ViewId) -> Constraint {
    Constraint::relate(view.width(), Relation::Equal, other.width())
}

/// Match `view`'s height to `other`'s.
pub fn height_to_height_of(view: ViewId, other: ViewId) -> Constraint {
    Constraint::relate(view.height(), Relation::Equal, other.height())
}

/// Match both of `view`'s dimensions to `other`'s.
pub fn size_to_size_of(view: ViewId, other: ViewId) -> Vec<Constraint> {
    vec![width_to_width_of(view, other), height_to_height_of(view, other)]
}

/// Tie `view`'s width to its own height: `width = ratio * height`.
pub fn aspect_ratio(view: ViewId, ratio: f64) -> Constraint {
    Constraint::relate(view.width(), Relation::Equal, view.height()).with_multiplier(ratio)
}

/// Make `view`'s width a fraction of its superview's width.
///
/// # Panics
///
/// Panics if `view` has no superview.
pub fn width_fraction_of_superview(tree: &ViewTree, view: ViewId, fraction: f64) -> Constraint {
    Constraint::relate(view.width(), Relation::Equal, superview_of(tree, view).width())
        .with_multiplier(fraction)
}

/// Make `view`'s height a fraction of its superview's height.
///
/// # Panics
///
/// Panics if `view` has no superview.
pub fn height_fraction_of_superview(tree: &ViewTree, view: ViewId, fraction: f64) -> Constraint {
    Constraint::relate(view.height(), Relation::Equal, superview_of(tree, view).height())
        .with_multiplier(fraction)
}

/// Keep `view`'s width at or above a value.
pub fn min_width(view: ViewId, value: f64) -> Constraint {
    Constraint::fix(view.width(), Relation::GreaterOrEqual, value)
}

/// Keep `view`'s height at or above a value.
pub fn min_height(view: ViewId, value: f64) -> Constraint {
    Constraint::fix(view.height(), Relation::GreaterOrEqual, value)
}

/// Keep `view`'s width at or below a value.
pub fn max_width(view: ViewId, value: f64) -> Constraint {
    Constraint::fix(view.width(), Relation::LessOrEqual, value)
}

/// Keep `view`'s height at or below a value.
pub fn max_height(view: ViewId, value: f64) -> Constraint {
    Constraint::fix(view.height(), Relation::LessOrEqual, value)
}

/// Keep `view` at or above a minimum size. A zero dimension is skipped
/// entirely rather than emitted as a no-op.
pub fn min_size(view: ViewId, size: Size) -> Vec<Constraint> {
    let mut constraints = Vec::with_capacity(2);
    if size.width != 0.0 {
        constraints.push(min_width(view, size.width));
    }
    if size.height != 0.0 {
        constraints.push(min_height(view, size.height));
    }
    constraints
}

/// Keep `view` at or below a maximum size. A zero dimension is skipped
/// entirely rather than emitted as a no-op.
pub fn max_size(view: ViewId, size: Size) -> Vec<Constraint> {
    let mut constraints = Vec::with_capacity(2);
    if size.width != 0.0 {
        constraints.push(max_width(view, size.width));
    }
    if size.height != 0.0 {
        constraints.push(max_height(view, size.height));
    }
    constraints
}

/// Clamp `view` between a minimum and a maximum size. Zero dimensions are
/// skipped on either bound, so this yields between zero and four descriptors.
pub fn clamp_size(view: ViewId, min: Size, max: Size) -> Vec<Constraint> {
    let mut constraints = min_size(view, min);
    constraints.extend(max_size(view, max));
    constraints
}

#[cfg(test)]
mod tests {
    use super::*;
    use strut_core::Attribute;

    #[test]
    fn test_absolute_size_order() {
        let view = ViewId(0);
        let constraints = size(view, Size::new(120.0, 44.0));
        assert_eq!(constraints.len(), 2);
        assert_eq!(constraints[0].anchor, view.width());
        assert_eq!(constraints[0].target, None);
        assert!((constraints[0].constant - 120.0).abs() < 0.001);
        assert_eq!(constraints[1].anchor, view.height());
        assert!((constraints[1].constant - 44.0).abs() < 0.001);
    }

    #[test]
    fn test_size_matching_defaults() {
        let a = ViewId(0);
        let b = ViewId(1);
        let constraints = size_to_size_of(a, b);
        assert_eq!(constraints.len(), 2);
        for constraint in &constraints {
            assert!((constraint.multiplier - 1.0).abs() < 0.001);
            assert!(constraint.constant.abs() < 0.001);
        }
        assert_eq!(constraints[0].target, Some(b.width()));
        assert_eq!(constraints[1].target, Some(b.height()));
    }

    #[test]
    fn test_aspect_ratio_is_self_referential() {
        let view = ViewId(0);
        let constraint = aspect_ratio(view, 16.0 / 9.0);
        assert_eq!(constraint.anchor, view.width());
        assert_eq!(constraint.target, Some(view.height()));
        assert!((constraint.multiplier - 16.0 / 9.0).abs() < 0.001);
        assert!(constraint.constant.abs() < 0.001);
    }

    #[test]
    fn test_fraction_goes_into_multiplier() {
        let mut tree = ViewTree::new();
        let root = tree.add_root();
        let child = tree.add_subview(root);

        let constraint = width_fraction_of_superview(&tree, child, 0.5);
        assert_eq!(constraint.anchor, child.width());
        assert_eq!(constraint.target, Some(root.width()));
        assert!((constraint.multiplier - 0.5).abs() < 0.001);
        assert!(constraint.constant.abs() < 0.001);

        let constraint = height_fraction_of_superview(&tree, child, 0.25);
        assert!((constraint.multiplier - 0.25).abs() < 0.001);
    }

    #[test]
    fn test_clamp_relations() {
        let view = ViewId(0);
        assert_eq!(min_width(view, 50.0).relation, Relation::GreaterOrEqual);
        assert_eq!(max_height(view, 90.0).relation, Relation::LessOrEqual);
    }

    #[test]
    fn test_min_size_skips_zero_dimensions() {
        let view = ViewId(0);

        let constraints = min_size(view, Size::new(0.0, 40.0));
        assert_eq!(constraints.len(), 1);
        assert_eq!(constraints[0].anchor.attribute, Attribute::Height);
        assert_eq!(constraints[0].relation, Relation::GreaterOrEqual);

        assert!(min_size(view, Size::new(0.0, 0.0)).is_empty());
        assert_eq!(min_size(view, Size::new(10.0, 20.0)).len(), 2);
    }

    #[test]
    fn test_clamp_size_concatenates_min_then_max() {
        let view = ViewId(0);
        let constraints = clamp_size(view, Size::new(50.0, 0.0), Size::new(200.0, 100.0));
        assert_eq!(constraints.len(), 3);
        assert_eq!(constraints[0].relation, Relation::GreaterOrEqual);
        assert_eq!(constraints[0].anchor.attribute, Attribute::Width);
        assert_eq!(constraints[1].relation, Relation::LessOrEqual);
        assert_eq!(constraints[1].anchor.attribute, Attribute::Width);
        assert_eq!(constraints[2].relation, Relation::LessOrEqual);
        assert_eq!(constraints[2].anchor.attribute, Attribute::Height);
    }
}
