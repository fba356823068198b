//! Piece definitions and rotation frames
//!
//! The seven piece kinds with their precomputed rotation frames. Each frame
//! is four (col, row) offsets relative to the piece origin, derived from a
//! 5x5 cell pattern centered on the origin. Columns increase rightward, rows
//! increase downward.

use ratatui::style::Color;

/// The seven piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    T,    // bar with a nub below center
    L,    // bar with a nub below the left end
    J,    // bar with a nub below the right end
    O,    // 2x2 square, single frame
    S,    // offset pair, leaning left
    Z,    // offset pair, leaning right
    Hook, // corner piece, the only four-frame kind
}

/// Rotation frames for the T piece
const T_FRAMES: [[(i32, i32); 4]; 2] = [
    [(-1, 0), (0, 0), (1, 0), (0, 1)],
    [(0, -1), (0, 0), (1, 0), (1, 1)],
];

/// Rotation frames for the L piece
const L_FRAMES: [[(i32, i32); 4]; 2] = [
    [(-1, 0), (0, 0), (1, 0), (-1, 1)],
    [(0, -1), (1, -1), (1, 0), (1, 1)],
];

/// Rotation frames for the J piece
const J_FRAMES: [[(i32, i32); 4]; 2] = [
    [(-1, 0), (0, 0), (1, 0), (1, 1)],
    [(1, -1), (1, 0), (0, 1), (1, 1)],
];

/// The O piece does not rotate
const O_FRAMES: [[(i32, i32); 4]; 1] = [[(0, 0), (1, 0), (0, 1), (1, 1)]];

/// Rotation frames for the S piece
const S_FRAMES: [[(i32, i32); 4]; 2] = [
    [(0, 0), (1, 0), (-1, 1), (0, 1)],
    [(1, -1), (0, 0), (1, 0), (0, 1)],
];

/// Rotation frames for the Z piece
const Z_FRAMES: [[(i32, i32); 4]; 2] = [
    [(-1, 0), (0, 0), (0, 1), (1, 1)],
    [(0, -1), (-1, 0), (0, 0), (1, 1)],
];

/// Rotation frames for the Hook piece
const HOOK_FRAMES: [[(i32, i32); 4]; 4] = [
    [(1, 0), (-1, 1), (0, 1), (1, 1)],
    [(0, -1), (0, 0), (1, 0), (0, 1)],
    [(-1, 0), (0, 0), (1, 0), (-1, 1)],
    [(1, -1), (1, 0), (0, 1), (1, 1)],
];

impl PieceKind {
    /// Get the color for this piece kind
    pub fn color(&self) -> Color {
        match self {
            PieceKind::T => Color::Rgb(255, 85, 85),
            PieceKind::L => Color::Rgb(100, 200, 115),
            PieceKind::J => Color::Rgb(120, 108, 245),
            PieceKind::O => Color::Rgb(255, 140, 50),
            PieceKind::S => Color::Rgb(50, 120, 52),
            PieceKind::Z => Color::Rgb(146, 202, 73),
            PieceKind::Hook => Color::Rgb(150, 161, 218),
        }
    }

    /// Get all piece kinds for random selection
    pub fn all() -> [PieceKind; 7] {
        [
            PieceKind::T,
            PieceKind::L,
            PieceKind::J,
            PieceKind::O,
            PieceKind::S,
            PieceKind::Z,
            PieceKind::Hook,
        ]
    }

    /// Get the ordered rotation frames for this kind
    ///
    /// Every frame holds exactly 4 offsets. The frame count varies per kind
    /// (the O piece has one frame, the Hook has four, the rest have two).
    pub fn frames(&self) -> &'static [[(i32, i32); 4]] {
        match self {
            PieceKind::T => &T_FRAMES,
            PieceKind::L => &L_FRAMES,
            PieceKind::J => &J_FRAMES,
            PieceKind::O => &O_FRAMES,
            PieceKind::S => &S_FRAMES,
            PieceKind::Z => &Z_FRAMES,
            PieceKind::Hook => &HOOK_FRAMES,
        }
    }
}
