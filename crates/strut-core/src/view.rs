//! View handles and the view hierarchy.
//!
//! Views carry no geometry of their own. The tree records only the
//! parent/child relationships that the anchor factories resolve superviews
//! against; solved frames live in the layout engine.

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::constraint::{Anchor, Attribute};

/// Unique identifier for a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewId(pub u64);

impl ViewId {
    /// Get an anchor for an arbitrary attribute of this view.
    pub fn anchor(self, attribute: Attribute) -> Anchor {
        Anchor::new(self, attribute)
    }

    /// Get the left edge anchor.
    pub fn left(self) -> Anchor {
        self.anchor(Attribute::Left)
    }

    /// Get the right edge anchor.
    pub fn right(self) -> Anchor {
        self.anchor(Attribute::Right)
    }

    /// Get the top edge anchor.
    pub fn top(self) -> Anchor {
        self.anchor(Attribute::Top)
    }

    /// Get the bottom edge anchor.
    pub fn bottom(self) -> Anchor {
        self.anchor(Attribute::Bottom)
    }

    /// Get the width anchor.
    pub fn width(self) -> Anchor {
        self.anchor(Attribute::Width)
    }

    /// Get the height anchor.
    pub fn height(self) -> Anchor {
        self.anchor(Attribute::Height)
    }

    /// Get the horizontal center anchor.
    pub fn center_x(self) -> Anchor {
        self.anchor(Attribute::CenterX)
    }

    /// Get the vertical center anchor.
    pub fn center_y(self) -> Anchor {
        self.anchor(Attribute::CenterY)
    }
}

#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct ViewData {
    name: Option<String>,
    parent: Option<ViewId>,
    children: SmallVec<[ViewId; 4]>,
}

/// The view hierarchy.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewTree {
    /// All views, in insertion order
    views: IndexMap<ViewId, ViewData>,
    /// Top-level views with no superview
    roots: Vec<ViewId>,
    /// Counter for generating unique IDs
    next_id: u64,
}

impl ViewTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> ViewId {
        let id = ViewId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a view with no superview.
    pub fn add_root(&mut self) -> ViewId {
        let id = self.next_id();
        self.views.insert(id, ViewData::default());
        self.roots.push(id);
        id
    }

    /// Add a view as a subview of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is not in the tree.
    pub fn add_subview(&mut self, parent: ViewId) -> ViewId {
        assert!(
            self.views.contains_key(&parent),
            "parent view {:?} is not in the tree",
            parent
        );
        let id = self.next_id();
        self.views.insert(
            id,
            ViewData {
                parent: Some(parent),
                ..ViewData::default()
            },
        );
        if let Some(data) = self.views.get_mut(&parent) {
            data.children.push(id);
        }
        id
    }

    /// Get the superview of a view, if it has one.
    pub fn superview(&self, view: ViewId) -> Option<ViewId> {
        self.views.get(&view).and_then(|data| data.parent)
    }

    /// Get the subviews of a view, in insertion order.
    pub fn subviews(&self, view: ViewId) -> &[ViewId] {
        self.views
            .get(&view)
            .map_or(&[], |data| data.children.as_slice())
    }

    /// Attach a debug name to a view.
    pub fn set_name(&mut self, view: ViewId, name: impl Into<String>) {
        if let Some(data) = self.views.get_mut(&view) {
            data.name = Some(name.into());
        }
    }

    /// Get the debug name of a view.
    pub fn name(&self, view: ViewId) -> Option<&str> {
        self.views.get(&view).and_then(|data| data.name.as_deref())
    }

    /// Check whether a view is in the tree.
    pub fn contains(&self, view: ViewId) -> bool {
        self.views.contains_key(&view)
    }

    /// Number of views in the tree.
    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// Check whether the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Get the top-level views.
    pub fn roots(&self) -> &[ViewId] {
        &self.roots
    }

    /// Iterate over all views in insertion order.
    pub fn views(&self) -> impl Iterator<Item = ViewId> + '_ {
        self.views.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_query() {
        let mut tree = ViewTree::new();
        let root = tree.add_root();
        let a = tree.add_subview(root);
        let b = tree.add_subview(root);
        let c = tree.add_subview(a);

        assert_eq!(tree.len(), 4);
        assert_eq!(tree.superview(root), None);
        assert_eq!(tree.superview(a), Some(root));
        assert_eq!(tree.superview(c), Some(a));
        assert_eq!(tree.subviews(root), &[a, b]);
        assert_eq!(tree.subviews(b), &[]);
        assert_eq!(tree.roots(), &[root]);
    }

    #[test]
    fn test_names() {
        let mut tree = ViewTree::new();
        let root = tree.add_root();
        assert_eq!(tree.name(root), None);
        tree.set_name(root, "content");
        assert_eq!(tree.name(root), Some("content"));
    }

    #[test]
    fn test_ids_are_unique_across_parents() {
        let mut tree = ViewTree::new();
        let first = tree.add_root();
        let second = tree.add_root();
        let child = tree.add_subview(second);
        assert_ne!(first, second);
        assert_ne!(second, child);
        assert!(tree.contains(child));
        assert!(!tree.contains(ViewId(99)));
    }

    #[test]
    #[should_panic(expected = "not in the tree")]
    fn test_add_subview_unknown_parent_panics() {
        let mut tree = ViewTree::new();
        tree.add_subview(ViewId(42));
    }

    #[test]
    fn test_anchor_accessors() {
        let view = ViewId(7);
        assert_eq!(view.left(), Anchor::new(view, Attribute::Left));
        assert_eq!(view.bottom(), Anchor::new(view, Attribute::Bottom));
        assert_eq!(view.center_y(), Anchor::new(view, Attribute::CenterY));
        assert_eq!(view.width().attribute, Attribute::Width);
    }
}
