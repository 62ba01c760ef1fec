//! Stateless constraint factories for common layout intents.
//!
//! Every function in this crate translates one spatial intent ("fill the
//! superview", "sit 8 points to the right of that view") into the constraint
//! descriptor(s) a layout engine consumes. Nothing is activated and nothing
//! is retained: each call builds fresh [`Constraint`](strut_core::Constraint)
//! values and hands them back in a deterministic order, so calling a factory
//! twice yields two equal collections.
//!
//! Margins follow a single sign convention throughout: a positive margin
//! always reads as the visual gap between the two edges involved. Factories
//! that pin a trailing-side attribute (right or bottom) negate the margin
//! internally so callers never have to think about coordinate direction.
//!
//! Factories that mention a superview take the [`ViewTree`](strut_core::ViewTree)
//! as an argument and panic if the view has no superview, mirroring how a
//! toolkit traps when asked to constrain a detached view. Pairwise factories
//! never touch the tree and accept any two views.

pub mod center;
pub mod chain;
pub mod edges;
pub mod fill;
pub mod size;

pub use center::*;
pub use chain::*;
pub use edges::*;
pub use fill::*;
pub use size::*;

use strut_core::{ViewId, ViewTree};

/// Resolve the superview of `view`, panicking if it is detached.
pub(crate) fn superview_of(tree: &ViewTree, view: ViewId) -> ViewId {
    match tree.superview(view) {
        Some(superview) => superview,
        None => panic!("view {:?} has no superview in this tree", view),
    }
}
