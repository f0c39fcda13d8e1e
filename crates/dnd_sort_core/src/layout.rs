use serde::{Deserialize, Serialize};

use crate::geometry::{Bounds, Point};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Display {
    #[default]
    Block,
    Flex,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlexDirection {
    #[default]
    Row,
    RowReverse,
    Column,
    ColumnReverse,
}

impl FlexDirection {
    fn is_row(self) -> bool {
        matches!(self, FlexDirection::Row | FlexDirection::RowReverse)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlexWrap {
    #[default]
    NoWrap,
    Wrap,
    WrapReverse,
}

/// The computed style of the list container, as far as reordering cares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerStyle {
    pub display: Display,
    pub direction: FlexDirection,
    pub wrap: FlexWrap,
}

impl ContainerStyle {
    /// A plain vertical stack.
    pub const fn stack() -> Self {
        Self {
            display: Display::Block,
            direction: FlexDirection::Row,
            wrap: FlexWrap::NoWrap,
        }
    }

    /// A row that wraps onto new lines, like a tag cloud.
    pub const fn wrapping_row() -> Self {
        Self {
            display: Display::Flex,
            direction: FlexDirection::Row,
            wrap: FlexWrap::Wrap,
        }
    }

    pub fn orientation(&self) -> Orientation {
        Orientation::from_style(self)
    }
}

/// The axis along which the insertion side is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Flex + wrap + row direction is horizontal, everything else stacks vertically.
    pub fn from_style(style: &ContainerStyle) -> Self {
        let wraps = style.wrap != FlexWrap::NoWrap;
        if style.display == Display::Flex && wraps && style.direction.is_row() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }

    pub fn is_horizontal(self) -> bool {
        self == Orientation::Horizontal
    }

    /// Which side of `hovered` the pointer falls on.
    pub fn side_of(self, pointer: Point, hovered: &Bounds) -> InsertSide {
        let center = hovered.center();
        let before = match self {
            Orientation::Horizontal => pointer.x < center.x,
            Orientation::Vertical => pointer.y < center.y,
        };
        if before {
            InsertSide::Before
        } else {
            InsertSide::After
        }
    }

    pub fn is_before_leading_edge(self, pointer: Point, first: &Bounds) -> bool {
        match self {
            Orientation::Horizontal => pointer.x < first.left(),
            Orientation::Vertical => pointer.y < first.top(),
        }
    }

    pub fn is_past_trailing_edge(self, pointer: Point, last: &Bounds) -> bool {
        match self {
            Orientation::Horizontal => pointer.x > last.right(),
            Orientation::Vertical => pointer.y > last.bottom(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertSide {
    Before,
    After,
}
