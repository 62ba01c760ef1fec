//! Constraint descriptors.
//!
//! A [`Constraint`] is a plain value describing one linear relation between
//! view attributes: `anchor relation multiplier * target + constant`. Nothing
//! here solves anything. Descriptors are built (usually by the factory
//! functions in `strut-anchors`), handed to a layout engine, and activated
//! there.

use crate::view::ViewId;

/// Attribute of a view that a constraint can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Attribute {
    /// Left edge (minimum x)
    Left,
    /// Right edge (x + width)
    Right,
    /// Top edge (minimum y)
    Top,
    /// Bottom edge (y + height)
    Bottom,
    /// Horizontal extent
    Width,
    /// Vertical extent
    Height,
    /// Horizontal center (x + width / 2)
    CenterX,
    /// Vertical center (y + height / 2)
    CenterY,
}

impl Attribute {
    /// Get the axis this attribute lives on.
    pub fn axis(self) -> Axis {
        match self {
            Attribute::Left | Attribute::Right | Attribute::Width | Attribute::CenterX => {
                Axis::Horizontal
            }
            Attribute::Top | Attribute::Bottom | Attribute::Height | Attribute::CenterY => {
                Axis::Vertical
            }
        }
    }
}

/// A layout axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// Left to right
    #[default]
    Horizontal,
    /// Top to bottom
    Vertical,
}

impl Axis {
    /// Get the leading edge attribute (left or top).
    pub fn leading(self) -> Attribute {
        match self {
            Axis::Horizontal => Attribute::Left,
            Axis::Vertical => Attribute::Top,
        }
    }

    /// Get the trailing edge attribute (right or bottom).
    pub fn trailing(self) -> Attribute {
        match self {
            Axis::Horizontal => Attribute::Right,
            Axis::Vertical => Attribute::Bottom,
        }
    }

    /// Get the extent attribute (width or height).
    pub fn extent(self) -> Attribute {
        match self {
            Axis::Horizontal => Attribute::Width,
            Axis::Vertical => Attribute::Height,
        }
    }
}

/// How the two sides of a constraint relate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Relation {
    LessOrEqual,
    Equal,
    GreaterOrEqual,
}

/// Priority of a constraint, from weakest to required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Priority {
    /// Weak preference, easily overridden
    Weak = 1,
    /// Low priority
    Low = 250,
    /// Medium priority
    Medium = 500,
    /// High priority
    High = 750,
    /// Must be satisfied
    Required = 1000,
}

impl Default for Priority {
    fn default() -> Self {
        Self::Required
    }
}

/// One side of a constraint: a view paired with one of its attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Anchor {
    pub view: ViewId,
    pub attribute: Attribute,
}

impl Anchor {
    /// Create an anchor.
    pub fn new(view: ViewId, attribute: Attribute) -> Self {
        Self { view, attribute }
    }
}

/// A constraint descriptor: `anchor relation multiplier * target + constant`.
///
/// When `target` is `None` the anchor is related to the bare constant, which
/// pins it to an absolute value in window coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Constraint {
    /// The attribute being constrained
    pub anchor: Anchor,
    /// How the two sides relate
    pub relation: Relation,
    /// The attribute the anchor is related to, if any
    pub target: Option<Anchor>,
    /// Scale applied to the target attribute
    pub multiplier: f64,
    /// Offset added to the scaled target
    pub constant: f64,
    /// Priority the layout engine resolves conflicts with
    pub priority: Priority,
}

impl Constraint {
    /// Relate an anchor to a target anchor with multiplier 1 and constant 0.
    pub fn relate(anchor: Anchor, relation: Relation, target: Anchor) -> Self {
        Self {
            anchor,
            relation,
            target: Some(target),
            multiplier: 1.0,
            constant: 0.0,
            priority: Priority::default(),
        }
    }

    /// Pin an anchor to an absolute constant.
    pub fn fix(anchor: Anchor, relation: Relation, constant: f64) -> Self {
        Self {
            anchor,
            relation,
            target: None,
            multiplier: 1.0,
            constant,
            priority: Priority::default(),
        }
    }

    /// Set the multiplier.
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Set the constant.
    pub fn with_constant(mut self, constant: f64) -> Self {
        self.constant = constant;
        self
    }

    /// Set the priority.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }
}
