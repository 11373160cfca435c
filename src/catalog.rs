//! The standard set of shapes offered by the game.

use crate::shape::{Color, Shape};

/// Two cells in a row.
pub fn domino() -> Shape {
    Shape::from_mask([[1, 1]], Color::Red)
}

/// Three cells in a row.
pub fn straight_tromino() -> Shape {
    Shape::from_mask([[1, 1, 1]], Color::Orange)
}

/// Three cells bent at a right angle.
pub fn bent_tromino() -> Shape {
    Shape::from_mask([[1, 0], [1, 1]], Color::Magenta)
}

/// Four cells in a row.
pub fn i_tetromino() -> Shape {
    Shape::from_mask([[1, 1, 1, 1]], Color::Cyan)
}

/// The 2×2 square.
pub fn o_tetromino() -> Shape {
    Shape::from_mask([[1, 1], [1, 1]], Color::Yellow)
}

/// T-shaped tetromino.
pub fn t_tetromino() -> Shape {
    Shape::from_mask([[1, 1, 1], [0, 1, 0]], Color::Purple)
}

/// S-shaped tetromino.
pub fn s_tetromino() -> Shape {
    Shape::from_mask([[0, 1, 1], [1, 1, 0]], Color::Green)
}

/// Z-shaped tetromino.
pub fn z_tetromino() -> Shape {
    Shape::from_mask([[1, 1, 0], [0, 1, 1]], Color::Red)
}

/// L-shaped tetromino.
pub fn l_tetromino() -> Shape {
    Shape::from_mask([[1, 0], [1, 0], [1, 1]], Color::Orange)
}

/// J-shaped tetromino.
pub fn j_tetromino() -> Shape {
    Shape::from_mask([[0, 1], [0, 1], [1, 1]], Color::Blue)
}

/// The default catalogue: the domino, both trominoes and the seven
/// tetrominoes.
pub fn standard() -> Vec<Shape> {
    vec![
        domino(),
        straight_tromino(),
        bent_tromino(),
        i_tetromino(),
        o_tetromino(),
        t_tetromino(),
        s_tetromino(),
        z_tetromino(),
        l_tetromino(),
        j_tetromino(),
    ]
}
