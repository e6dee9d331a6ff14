//! Piece module - tetromino geometry and rotation transforms.
//!
//! A piece is a shape plus four pivot-relative cell offsets. Rotation
//! produces a new piece value; nothing here knows about the board.

use crate::types::Shape;

/// Offset of a single cell relative to the piece pivot.
///
/// `y` grows upward; the board locks a cell at `(x + dx, y - dy)`.
pub type CellOffset = (i8, i8);

/// The four cell offsets of a piece.
pub type PieceOffsets = [CellOffset; 4];

/// Fixed geometry table, keyed by shape variant.
pub const fn shape_offsets(shape: Shape) -> PieceOffsets {
    match shape {
        Shape::Z => [(0, -1), (0, 0), (-1, 0), (-1, 1)],
        Shape::S => [(0, -1), (0, 0), (1, 0), (1, 1)],
        Shape::I => [(0, -1), (0, 0), (0, 1), (0, 2)],
        Shape::T => [(-1, 0), (0, 0), (1, 0), (0, 1)],
        Shape::O => [(0, 0), (1, 0), (0, 1), (1, 1)],
        Shape::L => [(-1, -1), (0, -1), (0, 0), (0, 1)],
        Shape::J => [(1, -1), (0, -1), (0, 0), (0, 1)],
    }
}

/// A tetromino as a value: shape identity plus current cell offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    shape: Shape,
    offsets: PieceOffsets,
}

impl Piece {
    /// Create a piece in its spawn orientation.
    pub const fn new(shape: Shape) -> Self {
        Self {
            shape,
            offsets: shape_offsets(shape),
        }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn offsets(&self) -> &PieceOffsets {
        &self.offsets
    }

    /// Counter-clockwise rotation: (x, y) -> (y, -x).
    ///
    /// Returns a new piece; the O shape is a fixed point.
    pub fn rotated_left(&self) -> Piece {
        if self.shape == Shape::O {
            return *self;
        }
        let mut offsets = self.offsets;
        for cell in &mut offsets {
            *cell = (cell.1, -cell.0);
        }
        Piece {
            shape: self.shape,
            offsets,
        }
    }

    /// Clockwise rotation: (x, y) -> (-y, x).
    ///
    /// Returns a new piece; the O shape is a fixed point.
    pub fn rotated_right(&self) -> Piece {
        if self.shape == Shape::O {
            return *self;
        }
        let mut offsets = self.offsets;
        for cell in &mut offsets {
            *cell = (-cell.1, cell.0);
        }
        Piece {
            shape: self.shape,
            offsets,
        }
    }

    /// Minimum x offset component across the four cells.
    pub fn min_x(&self) -> i8 {
        self.offsets.iter().map(|&(x, _)| x).min().unwrap_or(0)
    }

    /// Minimum y offset component across the four cells.
    ///
    /// Used by the spawn computation so no cell starts above the top row.
    pub fn min_y(&self) -> i8 {
        self.offsets.iter().map(|&(_, y)| y).min().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut offsets: PieceOffsets) -> PieceOffsets {
        offsets.sort_unstable();
        offsets
    }

    #[test]
    fn test_every_shape_has_four_cells() {
        for shape in Shape::ALL {
            assert_eq!(shape_offsets(shape).len(), 4);
        }
    }

    #[test]
    fn test_o_rotation_is_identity() {
        let o = Piece::new(Shape::O);
        assert_eq!(o.rotated_left(), o);
        assert_eq!(o.rotated_right(), o);
    }

    #[test]
    fn test_left_then_right_is_identity() {
        for shape in Shape::ALL {
            let p = Piece::new(shape);
            assert_eq!(
                sorted(*p.rotated_left().rotated_right().offsets()),
                sorted(*p.offsets()),
                "{:?}",
                shape
            );
        }
    }

    #[test]
    fn test_four_right_rotations_are_identity() {
        for shape in Shape::ALL {
            let p = Piece::new(shape);
            let q = p
                .rotated_right()
                .rotated_right()
                .rotated_right()
                .rotated_right();
            assert_eq!(sorted(*q.offsets()), sorted(*p.offsets()), "{:?}", shape);
        }
    }

    #[test]
    fn test_min_offsets() {
        let i = Piece::new(Shape::I);
        assert_eq!(i.min_x(), 0);
        assert_eq!(i.min_y(), -1);

        let t = Piece::new(Shape::T);
        assert_eq!(t.min_x(), -1);
        assert_eq!(t.min_y(), 0);

        let l = Piece::new(Shape::L);
        assert_eq!(l.min_x(), -1);
        assert_eq!(l.min_y(), -1);
    }
}
