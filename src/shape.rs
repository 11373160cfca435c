//! Polyomino shapes and their rigid transformations.
//!
//! A [`Shape`] is a set of cell offsets relative to an anchor, together with a
//! [`Color`] tag. Offsets are always kept normalized: the minimum row and the
//! minimum column are both zero, and the offsets are sorted in row-major
//! order. Rotating or flipping a shape re-normalizes the result, so placement
//! and collision math stays relative to the anchor.

use std::fmt;

/// A cell offset `(row, column)` relative to a shape's anchor.
pub type Offset = (usize, usize);

/// Identity tag of a shape, drawn from a fixed palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    /// `#e74c3c`
    Red,
    /// `#e67e22`
    Orange,
    /// `#f1c40f`
    Yellow,
    /// `#2ecc71`
    Green,
    /// `#1abc9c`
    Cyan,
    /// `#3498db`
    Blue,
    /// `#9b59b6`
    Purple,
    /// `#e84393`
    Magenta,
}

impl Color {
    /// The full palette, in declaration order.
    pub const PALETTE: [Color; 8] = [
        Color::Red,
        Color::Orange,
        Color::Yellow,
        Color::Green,
        Color::Cyan,
        Color::Blue,
        Color::Purple,
        Color::Magenta,
    ];

    /// CSS hex string used by presentation layers.
    pub fn hex(self) -> &'static str {
        match self {
            Color::Red => "#e74c3c",
            Color::Orange => "#e67e22",
            Color::Yellow => "#f1c40f",
            Color::Green => "#2ecc71",
            Color::Cyan => "#1abc9c",
            Color::Blue => "#3498db",
            Color::Purple => "#9b59b6",
            Color::Magenta => "#e84393",
        }
    }

    /// Single character used when rendering a board as text.
    pub fn letter(self) -> char {
        match self {
            Color::Red => 'R',
            Color::Orange => 'O',
            Color::Yellow => 'Y',
            Color::Green => 'G',
            Color::Cyan => 'C',
            Color::Blue => 'B',
            Color::Purple => 'P',
            Color::Magenta => 'M',
        }
    }
}

/// Shift offsets so the minimum row and column are zero, then sort and
/// remove duplicates.
///
/// # Panics
///
/// Panics if `offsets` is empty.
pub fn normalize(offsets: impl IntoIterator<Item = (isize, isize)>) -> Vec<Offset> {
    let offsets: Vec<_> = offsets.into_iter().collect();
    assert!(!offsets.is_empty(), "Shape must have at least one cell.");

    let min_row = offsets.iter().map(|&(r, _)| r).min().unwrap_or(0);
    let min_col = offsets.iter().map(|&(_, c)| c).min().unwrap_or(0);

    let mut normalized: Vec<Offset> = offsets
        .into_iter()
        .map(|(r, c)| ((r - min_row) as usize, (c - min_col) as usize))
        .collect();
    normalized.sort_unstable();
    normalized.dedup();
    normalized
}

fn extents(offsets: &[Offset]) -> (usize, usize) {
    let height = offsets.iter().map(|&(r, _)| r + 1).max().unwrap_or(0);
    let width = offsets.iter().map(|&(_, c)| c + 1).max().unwrap_or(0);
    (height, width)
}

/// Rotate offsets by 90 degrees and normalize the result.
///
/// Four rotations in the same direction return the normalized input, and a
/// clockwise rotation followed by a counter-clockwise one is the identity.
pub fn rotate(offsets: &[Offset], clockwise: bool) -> Vec<Offset> {
    let (height, width) = extents(offsets);

    normalize(offsets.iter().map(|&(r, c)| {
        let (r, c) = (r as isize, c as isize);
        if clockwise {
            (c, height as isize - 1 - r)
        } else {
            (width as isize - 1 - c, r)
        }
    }))
}

/// Mirror offsets and normalize the result.
///
/// A horizontal flip mirrors left to right (columns are reversed), a vertical
/// flip mirrors top to bottom (rows are reversed).
pub fn flip(offsets: &[Offset], horizontal: bool) -> Vec<Offset> {
    let (height, width) = extents(offsets);

    normalize(offsets.iter().map(|&(r, c)| {
        let (r, c) = (r as isize, c as isize);
        if horizontal {
            (r, width as isize - 1 - c)
        } else {
            (height as isize - 1 - r, c)
        }
    }))
}

/// A polyomino piece: normalized cell offsets plus a color tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Shape {
    cells: Vec<Offset>,
    color: Color,
}

impl Shape {
    /// Create a shape from arbitrary offsets. The offsets are normalized
    /// before being stored.
    ///
    /// # Panics
    ///
    /// Panics if `offsets` is empty.
    pub fn new(offsets: impl IntoIterator<Item = (isize, isize)>, color: Color) -> Self {
        Self {
            cells: normalize(offsets),
            color,
        }
    }

    /// Create a shape from a row-major binary mask, where `1` marks an
    /// occupied cell. Empty rows and columns on the edges are dropped.
    ///
    /// # Panics
    ///
    /// Panics if the mask has no occupied cell.
    pub fn from_mask<const W: usize, const H: usize>(mask: [[u8; W]; H], color: Color) -> Self {
        let offsets = mask.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, value)| **value != 0)
                .map(move |(c, _)| (r as isize, c as isize))
        });

        Self::new(offsets, color)
    }

    /// Normalized cell offsets in row-major order.
    pub fn cells(&self) -> &[Offset] {
        &self.cells
    }

    /// The color tag.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false, a shape has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of rows spanned by the shape.
    pub fn height(&self) -> usize {
        extents(&self.cells).0
    }

    /// Number of columns spanned by the shape.
    pub fn width(&self) -> usize {
        extents(&self.cells).1
    }

    /// Return this shape rotated by 90 degrees.
    pub fn rotated(&self, clockwise: bool) -> Self {
        Self {
            cells: rotate(&self.cells, clockwise),
            color: self.color,
        }
    }

    /// Return this shape mirrored along the chosen axis.
    pub fn flipped(&self, horizontal: bool) -> Self {
        Self {
            cells: flip(&self.cells, horizontal),
            color: self.color,
        }
    }

    /// Return the distinct orientations of this shape.
    ///
    /// The order is fixed: the four clockwise rotations starting from the
    /// shape itself, then the four rotations of the horizontally flipped
    /// shape. Duplicates keep their first position, so the first entry is
    /// always `self`.
    pub fn orientations(&self) -> Vec<Shape> {
        let mut orientations: Vec<Shape> = Vec::with_capacity(8);
        let mut current = self.clone();
        let mut mirrored = self.flipped(true);
        let mut candidates = Vec::with_capacity(8);

        for _ in 0..4 {
            let next = current.rotated(true);
            candidates.push(current);
            current = next;
        }
        for _ in 0..4 {
            let next = mirrored.rotated(true);
            candidates.push(mirrored);
            mirrored = next;
        }

        for candidate in candidates {
            if !orientations.contains(&candidate) {
                orientations.push(candidate);
            }
        }

        orientations
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (height, width) = extents(&self.cells);
        for r in 0..height {
            for c in 0..width {
                let ch = if self.cells.binary_search(&(r, c)).is_ok() {
                    self.color.letter()
                } else {
                    '.'
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
