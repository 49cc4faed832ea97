//! Layout engines for container components.
//!
//! Every engine is a pure function of the container box, the children's
//! intrinsic boxes (in child order), and an alignment configuration. Engines
//! return one [`Rect`] per child and never touch the tree; the container
//! components in [`crate::widget`] write the results back.
//!
//! Center offsets and grid cell sizes are floored so children stay inside the
//! container.

/// A rectangle in screen coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// X position (left edge).
    pub x: f32,
    /// Y position (top edge).
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// A zero-sized rect at the origin.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Returns the right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Returns the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Returns the center point.
    #[must_use]
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Returns true if the point is inside the rectangle. Edges count as inside.
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }

    /// Expands the rectangle by the given amount on all sides.
    #[must_use]
    pub fn expand(&self, amount: f32) -> Self {
        Self::new(
            self.x - amount,
            self.y - amount,
            self.width + amount * 2.0,
            self.height + amount * 2.0,
        )
    }

    /// Shrinks the rectangle by the given amount on all sides.
    #[must_use]
    pub fn shrink(&self, amount: f32) -> Self {
        self.expand(-amount)
    }

    /// Returns the same rect moved to a new origin.
    #[must_use]
    pub const fn at(self, x: f32, y: f32) -> Self {
        Self::new(x, y, self.width, self.height)
    }
}

/// Main axis of a flex layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Horizontal (left to right). Used by rows.
    #[default]
    Horizontal,
    /// Vertical (top to bottom). Used by columns.
    Vertical,
}

/// Main-axis distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Justify {
    /// Pack from the leading edge.
    #[default]
    Start,
    /// Center the packed children.
    Center,
    /// Pack against the trailing edge.
    End,
    /// First and last child touch the edges, remaining space split evenly.
    SpaceBetween,
}

impl Justify {
    /// Parses a `justify_content` prop value. Unknown names map to `Start`.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "center" => Self::Center,
            "end" => Self::End,
            "space-between" | "space_between" => Self::SpaceBetween,
            _ => Self::Start,
        }
    }
}

/// Cross-axis alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    /// Align to start (left/top).
    #[default]
    Start,
    /// Align to center.
    Center,
    /// Align to end (right/bottom).
    End,
    /// Stretch to fill the container's cross extent.
    Stretch,
}

impl Alignment {
    /// Parses an `align_items` prop value. Unknown names map to `Start`.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "center" => Self::Center,
            "end" => Self::End,
            "stretch" => Self::Stretch,
            _ => Self::Start,
        }
    }
}

/// Offset of an item of `size` inside `extent` for the given alignment.
fn cross_offset(alignment: Alignment, extent: f32, size: f32) -> f32 {
    match alignment {
        Alignment::Start | Alignment::Stretch => 0.0,
        Alignment::Center => ((extent - size) / 2.0).floor(),
        Alignment::End => extent - size,
    }
}

/// Row/column layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlexLayout {
    /// Main axis.
    pub direction: Direction,
    /// Main axis distribution.
    pub justify: Justify,
    /// Cross axis alignment.
    pub align: Alignment,
    /// Gap between consecutive children.
    pub gap: f32,
    /// Padding around content.
    pub padding: f32,
}

impl Default for FlexLayout {
    fn default() -> Self {
        Self {
            direction: Direction::Horizontal,
            justify: Justify::Start,
            align: Alignment::Start,
            gap: 0.0,
            padding: 0.0,
        }
    }
}

impl FlexLayout {
    /// Creates a horizontal layout.
    #[must_use]
    pub fn row() -> Self {
        Self {
            direction: Direction::Horizontal,
            ..Default::default()
        }
    }

    /// Creates a vertical layout.
    #[must_use]
    pub fn column() -> Self {
        Self {
            direction: Direction::Vertical,
            ..Default::default()
        }
    }

    /// Sets the gap between elements.
    #[must_use]
    pub const fn with_gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }

    /// Sets padding around content.
    #[must_use]
    pub const fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    /// Sets main axis distribution.
    #[must_use]
    pub const fn justify(mut self, justify: Justify) -> Self {
        self.justify = justify;
        self
    }

    /// Sets cross axis alignment.
    #[must_use]
    pub const fn align(mut self, alignment: Alignment) -> Self {
        self.align = alignment;
        self
    }

    /// Lays out children within the given bounds.
    ///
    /// `children` are the current child boxes; only their sizes are read.
    /// Returns the new box for each child. With `Stretch` the cross-axis size
    /// is replaced by the container's; the main-axis size is never changed.
    #[must_use]
    pub fn arrange(&self, bounds: Rect, children: &[Rect]) -> Vec<Rect> {
        if children.is_empty() {
            return Vec::new();
        }

        let content = bounds.shrink(self.padding);
        let horizontal = self.direction == Direction::Horizontal;
        let (main_origin, main_extent, cross_origin, cross_extent) = if horizontal {
            (content.x, content.width, content.y, content.height)
        } else {
            (content.y, content.height, content.x, content.width)
        };
        let main_size = |r: &Rect| if horizontal { r.width } else { r.height };
        let cross_size = |r: &Rect| if horizontal { r.height } else { r.width };

        #[allow(clippy::cast_precision_loss)]
        let gaps = (children.len() - 1) as f32;
        let total: f32 = children.iter().map(main_size).sum();
        let available = main_extent - gaps * self.gap;

        let (start, spacing) = match self.justify {
            Justify::Start => (main_origin, self.gap),
            Justify::Center => (main_origin + ((available - total) / 2.0).floor(), self.gap),
            Justify::End => (main_origin + available - total, self.gap),
            Justify::SpaceBetween if children.len() == 1 => (main_origin, 0.0),
            Justify::SpaceBetween => (main_origin, (main_extent - total) / gaps),
        };

        let mut cursor = start;
        children
            .iter()
            .map(|child| {
                let cross = if self.align == Alignment::Stretch {
                    cross_extent
                } else {
                    cross_size(child)
                };
                let cross_pos = cross_origin + cross_offset(self.align, cross_extent, cross);
                let rect = if horizontal {
                    Rect::new(cursor, cross_pos, child.width, cross)
                } else {
                    Rect::new(cross_pos, cursor, cross, child.height)
                };
                cursor += main_size(child) + spacing;
                rect
            })
            .collect()
    }
}

/// Stack layout: every child is aligned against the same container box.
///
/// Later children paint over earlier ones; no overlap avoidance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StackLayout {
    /// Alignment applied on both axes.
    pub align: Alignment,
}

impl StackLayout {
    /// Creates a stack layout with the given alignment.
    #[must_use]
    pub const fn new(align: Alignment) -> Self {
        Self { align }
    }

    /// Lays out children within the given bounds.
    #[must_use]
    pub fn arrange(&self, bounds: Rect, children: &[Rect]) -> Vec<Rect> {
        children
            .iter()
            .map(|child| match self.align {
                Alignment::Stretch => bounds,
                align => Rect::new(
                    bounds.x + cross_offset(align, bounds.width, child.width),
                    bounds.y + cross_offset(align, bounds.height, child.height),
                    child.width,
                    child.height,
                ),
            })
            .collect()
    }
}

/// Grid layout with a fixed column count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    /// Number of columns (at least 1).
    pub columns: usize,
    /// Explicit row count, or `None` to fit the children.
    pub rows: Option<usize>,
    /// Horizontal gap between cells.
    pub column_gap: f32,
    /// Vertical gap between cells.
    pub row_gap: f32,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            columns: 2,
            rows: None,
            column_gap: 0.0,
            row_gap: 0.0,
        }
    }
}

impl GridLayout {
    /// Creates a grid with the given column count.
    #[must_use]
    pub fn new(columns: usize) -> Self {
        Self {
            columns: columns.max(1),
            ..Default::default()
        }
    }

    /// Sets both gaps.
    #[must_use]
    pub const fn with_gap(mut self, gap: f32) -> Self {
        self.column_gap = gap;
        self.row_gap = gap;
        self
    }

    /// Fixes the row count.
    #[must_use]
    pub const fn with_rows(mut self, rows: usize) -> Self {
        self.rows = Some(rows);
        self
    }

    /// Row count used for `child_count` children.
    #[must_use]
    pub fn row_count(&self, child_count: usize) -> usize {
        let columns = self.columns.max(1);
        self.rows
            .unwrap_or_else(|| child_count.div_ceil(columns))
            .max(1)
    }

    /// Row-major cell of the child at `index`, as `(row, col)`.
    #[must_use]
    pub fn cell(&self, index: usize) -> (usize, usize) {
        let columns = self.columns.max(1);
        (index / columns, index % columns)
    }

    /// Cell size for `child_count` children inside `bounds`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn cell_size(&self, bounds: Rect, child_count: usize) -> (f32, f32) {
        let columns = self.columns.max(1) as f32;
        let rows = self.row_count(child_count) as f32;
        let width = ((bounds.width - (columns - 1.0) * self.column_gap) / columns).floor();
        let height = ((bounds.height - (rows - 1.0) * self.row_gap) / rows).floor();
        (width, height)
    }

    /// Lays out children; each child is forced to exactly one cell.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn arrange(&self, bounds: Rect, children: &[Rect]) -> Vec<Rect> {
        if children.is_empty() {
            return Vec::new();
        }

        let (cell_width, cell_height) = self.cell_size(bounds, children.len());
        (0..children.len())
            .map(|index| {
                let (row, col) = self.cell(index);
                Rect::new(
                    bounds.x + col as f32 * (cell_width + self.column_gap),
                    bounds.y + row as f32 * (cell_height + self.row_gap),
                    cell_width,
                    cell_height,
                )
            })
            .collect()
    }
}
