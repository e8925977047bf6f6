use arrayvec::ArrayVec;

use super::piece::PieceKind;

/// Width and height of the next-piece preview area.
pub const PREVIEW_SIZE: usize = 4;

// Signed copy of `PREVIEW_SIZE` for offset arithmetic.
const PREVIEW_EXTENT: i8 = 4;

/// Next-piece preview laid out on a `PREVIEW_SIZE × PREVIEW_SIZE` grid.
///
/// The unrotated shape is centered per axis using its bounding box:
/// `offset = floor((PREVIEW_SIZE - extent) / 2) - min`. Cells that would fall
/// outside the grid are dropped.
///
/// # Example
///
/// ```
/// use stackfall_engine::{PieceKind, PreviewGrid};
///
/// let preview = PreviewGrid::new(PieceKind::I);
/// assert!((0..4).all(|x| preview.is_occupied(x, 1)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewGrid {
    kind: PieceKind,
    cells: ArrayVec<(usize, usize), 4>,
}

impl PreviewGrid {
    #[must_use]
    pub fn new(kind: PieceKind) -> Self {
        let offsets = kind.offsets();
        let offset_x = centering_offset(offsets.map(|(x, _)| x));
        let offset_y = centering_offset(offsets.map(|(_, y)| y));

        let cells = offsets
            .into_iter()
            .filter_map(|(x, y)| {
                let px = usize::try_from(x + offset_x).ok()?;
                let py = usize::try_from(y + offset_y).ok()?;
                (px < PREVIEW_SIZE && py < PREVIEW_SIZE).then_some((px, py))
            })
            .collect();

        Self { kind, cells }
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Returns the occupied `(x, y)` cells of the grid.
    #[must_use]
    pub fn cells(&self) -> &[(usize, usize)] {
        &self.cells
    }

    #[must_use]
    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        self.cells.contains(&(x, y))
    }
}

fn centering_offset(coords: [i8; 4]) -> i8 {
    let min = coords.iter().copied().min().unwrap_or(0);
    let max = coords.iter().copied().max().unwrap_or(0);
    let extent = max - min + 1;
    (PREVIEW_EXTENT - extent).div_euclid(2) - min
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_i_piece_fills_second_row() {
        let preview = PreviewGrid::new(PieceKind::I);
        assert_eq!(preview.cells(), &[(0, 1), (1, 1), (2, 1), (3, 1)]);
    }

    #[test]
    fn test_o_piece_is_centered() {
        let preview = PreviewGrid::new(PieceKind::O);
        assert_eq!(preview.cells(), &[(1, 1), (2, 1), (1, 2), (2, 2)]);
    }

    #[test]
    fn test_three_wide_pieces_lean_left() {
        // extent 3: floor(1 / 2) = 0, so min x = -1 maps to column 0.
        let preview = PreviewGrid::new(PieceKind::T);
        assert_eq!(preview.cells(), &[(0, 1), (1, 1), (2, 1), (1, 2)]);

        let preview = PreviewGrid::new(PieceKind::S);
        assert_eq!(preview.cells(), &[(1, 1), (2, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn test_every_kind_keeps_four_cells() {
        for kind in PieceKind::ALL {
            let preview = PreviewGrid::new(kind);
            assert_eq!(preview.kind(), kind);
            assert_eq!(preview.cells().len(), 4, "{kind:?}");
        }
    }
}
