//! SVG chess board rendering for the profile README.
//!
//! Renders the piece placement of a FEN string with Unicode glyphs, file and
//! rank coordinates, and the last move highlighted. White is always at the
//! bottom.

use std::path::Path;

use askama::Template;
use thiserror::Error;

/// Side length of the rendered board in pixels.
pub const BOARD_SIZE: u32 = 400;

const SQUARE_SIZE: u32 = BOARD_SIZE / 8;

/// Errors that can occur while producing the board image.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The template failed to render.
    #[error("Failed to render board: {0}")]
    Template(#[from] askama::Error),
    /// The image could not be written.
    #[error("Failed to write board image: {0}")]
    Io(#[from] std::io::Error),
}

/// Square colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub light: &'static str,
    pub dark: &'static str,
    pub highlight: &'static str,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            light: "#f0d9b5",
            dark: "#b58863",
            highlight: "#cdd26a",
        }
    }
}

/// A board square in pixel coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SquareView {
    pub x: u32,
    pub y: u32,
    /// `light` or `dark`.
    pub class: &'static str,
}

/// A piece to render on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceView {
    /// Row index (0-7, where 0 is the 8th rank).
    pub row: usize,
    /// Column index (0-7, where 0 is the a-file).
    pub col: usize,
    /// Centre of the square in pixels.
    pub x: u32,
    pub y: u32,
    /// Unicode chess piece symbol.
    pub symbol: char,
}

/// A file or rank coordinate drawn in the corner of an edge square.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelView {
    pub x: u32,
    pub y: u32,
    pub text: char,
    /// Contrasting colour class for the square underneath.
    pub class: &'static str,
}

/// SVG board template.
#[derive(Template, Debug)]
#[template(path = "board.svg")]
pub struct BoardSvg {
    pub size: u32,
    pub square_size: u32,
    pub piece_size: u32,
    pub theme: Theme,
    pub squares: Vec<SquareView>,
    pub highlights: Vec<SquareView>,
    pub labels: Vec<LabelView>,
    pub pieces: Vec<PieceView>,
}

impl BoardSvg {
    /// Create a board from a FEN string and an optional last move.
    ///
    /// Only the piece placement field of the FEN is used. Unknown characters
    /// are skipped, so a damaged FEN renders as a partial board rather than
    /// failing. `last_move` is a coordinate move such as `e2e4`; its from and
    /// to squares are highlighted when they parse.
    ///
    /// # Examples
    ///
    /// ```
    /// use board_render::BoardSvg;
    ///
    /// let board = BoardSvg::from_fen(
    ///     "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1",
    ///     Some("e2e4"),
    /// );
    /// assert_eq!(board.pieces.len(), 32);
    /// assert_eq!(board.highlights.len(), 2);
    /// ```
    #[must_use]
    pub fn from_fen(fen: &str, last_move: Option<&str>) -> Self {
        Self::with_theme(fen, last_move, Theme::default())
    }

    /// Like [`from_fen`](Self::from_fen) with custom colours.
    #[must_use]
    pub fn with_theme(fen: &str, last_move: Option<&str>, theme: Theme) -> Self {
        let mut squares = Vec::with_capacity(64);
        for row in 0..8 {
            for col in 0..8 {
                squares.push(square_view(row, col));
            }
        }

        let highlights = last_move
            .map(|m| {
                [m.get(0..2), m.get(2..4)]
                    .into_iter()
                    .flatten()
                    .filter_map(parse_square)
                    .map(|(row, col)| square_view(row, col))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            size: BOARD_SIZE,
            square_size: SQUARE_SIZE,
            piece_size: SQUARE_SIZE * 4 / 5,
            theme,
            squares,
            highlights,
            labels: labels(),
            pieces: pieces(fen),
        }
    }

    /// Renders the board and writes it to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if rendering or writing fails.
    pub fn write_to(&self, path: &Path) -> Result<(), RenderError> {
        let svg = self.render()?;
        std::fs::write(path, svg)?;
        tracing::debug!("Wrote board image to {}", path.display());
        Ok(())
    }
}

fn is_light(row: usize, col: usize) -> bool {
    (row + col) % 2 == 0
}

fn square_view(row: usize, col: usize) -> SquareView {
    SquareView {
        x: col as u32 * SQUARE_SIZE,
        y: row as u32 * SQUARE_SIZE,
        class: if is_light(row, col) { "light" } else { "dark" },
    }
}

/// Parses an algebraic square like `e4` into (row, col).
fn parse_square(text: &str) -> Option<(usize, usize)> {
    let bytes = text.as_bytes();
    let (file, rank) = (*bytes.first()?, *bytes.get(1)?);
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return None;
    }
    Some((usize::from(b'8' - rank), usize::from(file - b'a')))
}

fn labels() -> Vec<LabelView> {
    let contrast = |row, col| if is_light(row, col) { "on-light" } else { "on-dark" };
    let mut labels = Vec::with_capacity(16);

    // Files along the bottom edge, ranks along the left edge
    for (col, text) in ('a'..='h').enumerate() {
        labels.push(LabelView {
            x: col as u32 * SQUARE_SIZE + SQUARE_SIZE - 9,
            y: BOARD_SIZE - 3,
            text,
            class: contrast(7, col),
        });
    }
    for (row, text) in ('1'..='8').rev().enumerate() {
        labels.push(LabelView {
            x: 2,
            y: row as u32 * SQUARE_SIZE + 11,
            text,
            class: contrast(row, 0),
        });
    }
    labels
}

fn pieces(fen: &str) -> Vec<PieceView> {
    let mut pieces = Vec::new();
    let board_part = fen.split_whitespace().next().unwrap_or("");

    for (row, rank) in board_part.split('/').enumerate().take(8) {
        let mut col = 0;
        for c in rank.chars() {
            if let Some(skip) = c.to_digit(10) {
                col += skip as usize;
            } else {
                if let Some(symbol) = piece_to_symbol(c) {
                    if col < 8 {
                        pieces.push(PieceView {
                            row,
                            col,
                            x: col as u32 * SQUARE_SIZE + SQUARE_SIZE / 2,
                            y: row as u32 * SQUARE_SIZE + SQUARE_SIZE / 2,
                            symbol,
                        });
                    }
                }
                col += 1;
            }
        }
    }

    pieces
}

/// Convert a FEN piece character to its Unicode chess symbol.
const fn piece_to_symbol(piece: char) -> Option<char> {
    match piece {
        // White pieces
        'K' => Some('\u{2654}'),
        'Q' => Some('\u{2655}'),
        'R' => Some('\u{2656}'),
        'B' => Some('\u{2657}'),
        'N' => Some('\u{2658}'),
        'P' => Some('\u{2659}'),
        // Black pieces
        'k' => Some('\u{265A}'),
        'q' => Some('\u{265B}'),
        'r' => Some('\u{265C}'),
        'b' => Some('\u{265D}'),
        'n' => Some('\u{265E}'),
        'p' => Some('\u{265F}'),
        _ => None,
    }
}
