//! Consecutive placement of sibling views along one axis.

use strut_core::{Axis, Constraint, Relation, ViewId, ViewTree};

use crate::superview_of;

/// Configuration for laying views out one after another along an axis.
///
/// Each consecutive pair is linked trailing edge to leading edge, separated
/// by [`spacing`](Chain::spacing). The run can additionally be pinned to the
/// superview of its first view at the start, to the superview of its last
/// view at the end, or both. Pinning both ends fixes only the positions of
/// the run's outer edges; how the views share the enclosed space is left to
/// whatever size constraints the caller adds.
///
/// The builder mirrors the margin convention of the rest of this crate:
/// every padding is the visual gap, whichever edges are involved.
#[derive(Debug, Clone, Copy, Default)]
pub struct Chain {
    /// Axis the views run along
    pub axis: Axis,
    /// Pin the first view to its superview's leading edge
    pub align_to_start: bool,
    /// Gap between the superview's leading edge and the first view
    pub padding_start: f64,
    /// Pin the last view to its superview's trailing edge
    pub align_to_end: bool,
    /// Gap between the last view and the superview's trailing edge
    pub padding_end: f64,
    /// Gap between consecutive views
    pub padding_between: f64,
}

impl Chain {
    /// Create a left-to-right chain.
    pub fn horizontal() -> Self {
        Self {
            axis: Axis::Horizontal,
            ..Default::default()
        }
    }

    /// Create a top-to-bottom chain.
    pub fn vertical() -> Self {
        Self {
            axis: Axis::Vertical,
            ..Default::default()
        }
    }

    /// Pin the first view to its superview's leading edge with a gap.
    pub fn pin_start(mut self, padding: f64) -> Self {
        self.align_to_start = true;
        self.padding_start = padding;
        self
    }

    /// Pin the last view to its superview's trailing edge with a gap.
    pub fn pin_end(mut self, padding: f64) -> Self {
        self.align_to_end = true;
        self.padding_end = padding;
        self
    }

    /// Set the gap between consecutive views.
    pub fn spacing(mut self, padding: f64) -> Self {
        self.padding_between = padding;
        self
    }

    /// Build the descriptors for `views`, in order: the start pin if
    /// requested, one descriptor per consecutive pair, then the end pin if
    /// requested.
    ///
    /// An empty slice yields an empty collection, whatever the flags say,
    /// without ever touching the tree.
    ///
    /// # Panics
    ///
    /// Panics if a requested start or end pin finds no superview on the
    /// first or last view.
    pub fn constraints(&self, tree: &ViewTree, views: &[ViewId]) -> Vec<Constraint> {
        let (Some(&first), Some(&last)) = (views.first(), views.last()) else {
            return Vec::new();
        };

        let leading = self.axis.leading();
        let trailing = self.axis.trailing();
        let mut constraints = Vec::with_capacity(views.len() + 1);

        if self.align_to_start {
            let superview = superview_of(tree, first);
            constraints.push(
                Constraint::relate(
                    first.anchor(leading),
                    Relation::Equal,
                    superview.anchor(leading),
                )
                .with_constant(self.padding_start),
            );
        }

        for pair in views.windows(2) {
            constraints.push(
                Constraint::relate(
                    pair[0].anchor(trailing),
                    Relation::Equal,
                    pair[1].anchor(leading),
                )
                .with_constant(-self.padding_between),
            );
        }

        if self.align_to_end {
            let superview = superview_of(tree, last);
            constraints.push(
                Constraint::relate(
                    last.anchor(trailing),
                    Relation::Equal,
                    superview.anchor(trailing),
                )
                .with_constant(-self.padding_end),
            );
        }

        constraints
    }
}
