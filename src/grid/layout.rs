// SPDX-License-Identifier: MPL-2.0
//! Relative tile layout of each section.
//!
//! Sizes are fractions of the enclosing container. A [`LayoutNode::Repeat`]
//! splits its extent evenly between `count` copies of its item along its
//! axis, whatever the item's own size along that axis says.
//!
//! Resolved frames live in a unit square covering the whole page: the three
//! sections are stacked, each one third of the height.

use super::Section;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Width and height as fractions of the parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fraction {
    pub width: f64,
    pub height: f64,
}

impl Fraction {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutNode {
    /// A single tile.
    Item { size: Fraction },
    /// Children laid out one after another along `axis`.
    Group {
        axis: Axis,
        size: Fraction,
        children: Vec<LayoutNode>,
    },
    /// `count` copies of `item` sharing the extent along `axis` evenly.
    Repeat {
        axis: Axis,
        size: Fraction,
        item: Box<LayoutNode>,
        count: usize,
    },
}

impl LayoutNode {
    fn size(&self) -> Fraction {
        match self {
            LayoutNode::Item { size }
            | LayoutNode::Group { size, .. }
            | LayoutNode::Repeat { size, .. } => *size,
        }
    }

    /// Number of tiles under this node.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        match self {
            LayoutNode::Item { .. } => 1,
            LayoutNode::Group { children, .. } => children.iter().map(Self::tile_count).sum(),
            LayoutNode::Repeat { item, count, .. } => item.tile_count() * count,
        }
    }

    fn resolve(&self, frame: TileFrame, out: &mut Vec<TileFrame>) {
        match self {
            LayoutNode::Item { .. } => out.push(frame),
            LayoutNode::Group { axis, children, .. } => {
                let mut cursor = frame.origin(*axis);
                for child in children {
                    let size = child.size();
                    let child_frame = frame.child(
                        *axis,
                        cursor,
                        size.width * frame.width,
                        size.height * frame.height,
                    );
                    cursor += child_frame.extent(*axis);
                    child.resolve(child_frame, out);
                }
            }
            LayoutNode::Repeat {
                axis, item, count, ..
            } => {
                if *count == 0 {
                    return;
                }
                let size = item.size();
                let along = frame.extent(*axis) / *count as f64;
                let (width, height) = match axis {
                    Axis::Horizontal => (along, size.height * frame.height),
                    Axis::Vertical => (size.width * frame.width, along),
                };
                for i in 0..*count {
                    let start = frame.origin(*axis) + along * i as f64;
                    item.resolve(frame.child(*axis, start, width, height), out);
                }
            }
        }
    }
}

/// An absolute tile rectangle inside the unit page square.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileFrame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl TileFrame {
    fn origin(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    fn extent(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    fn child(&self, axis: Axis, start: f64, width: f64, height: f64) -> TileFrame {
        match axis {
            Axis::Horizontal => TileFrame {
                x: start,
                y: self.y,
                width,
                height,
            },
            Axis::Vertical => TileFrame {
                x: self.x,
                y: start,
                width,
                height,
            },
        }
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// Height of one section relative to the page.
const SECTION_HEIGHT: f64 = 1.0 / 3.0;

/// The layout tree of one section.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionLayout {
    pub section: Section,
    pub root: LayoutNode,
}

impl SectionLayout {
    #[must_use]
    pub fn for_section(section: Section) -> Self {
        let root = match section {
            // One full-width tile.
            Section::Hero => LayoutNode::Group {
                axis: Axis::Horizontal,
                size: Fraction::new(1.0, SECTION_HEIGHT),
                children: vec![LayoutNode::Item {
                    size: Fraction::new(1.0, 1.0),
                }],
            },
            // Three columns of two stacked tiles.
            Section::Middle => LayoutNode::Repeat {
                axis: Axis::Horizontal,
                size: Fraction::new(1.0, SECTION_HEIGHT),
                count: 3,
                item: Box::new(LayoutNode::Repeat {
                    axis: Axis::Vertical,
                    size: Fraction::new(1.0 / 3.0, 1.0),
                    count: 2,
                    item: Box::new(LayoutNode::Item {
                        size: Fraction::new(1.0, 1.0 / 3.0),
                    }),
                }),
            },
            // A wide tile beside a column of two.
            Section::Bottom => LayoutNode::Group {
                axis: Axis::Horizontal,
                size: Fraction::new(1.0, SECTION_HEIGHT),
                children: vec![
                    LayoutNode::Item {
                        size: Fraction::new(2.0 / 3.0, 1.0),
                    },
                    LayoutNode::Repeat {
                        axis: Axis::Vertical,
                        size: Fraction::new(1.0 / 3.0, 1.0),
                        count: 2,
                        item: Box::new(LayoutNode::Item {
                            size: Fraction::new(1.0, 1.0 / 3.0),
                        }),
                    },
                ],
            },
        };
        Self { section, root }
    }

    /// Number of tiles in the template; always [`Section::capacity`].
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.root.tile_count()
    }

    /// Tile rectangles in row order.
    #[must_use]
    pub fn tile_frames(&self) -> Vec<TileFrame> {
        let size = self.root.size();
        let frame = TileFrame {
            x: 0.0,
            y: self.section.index() as f64 * SECTION_HEIGHT,
            width: size.width,
            height: size.height,
        };
        let mut out = Vec::with_capacity(self.capacity());
        self.root.resolve(frame, &mut out);
        out
    }
}
