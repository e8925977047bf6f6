use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use stackfall_engine::{PREVIEW_SIZE, PreviewGrid};

use crate::view::widgets::BlockDisplay;

/// The next piece, centred in a fixed 4×4 grid.
#[derive(Debug)]
pub struct PreviewDisplay<'a> {
    preview: Option<&'a PreviewGrid>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PreviewDisplay<'a> {
    pub fn new(preview: Option<&'a PreviewGrid>) -> Self {
        Self {
            preview,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        super::cell_count(PREVIEW_SIZE) * BlockDisplay::width()
            + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        super::cell_count(PREVIEW_SIZE) * BlockDisplay::height()
            + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for PreviewDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PreviewDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints = (0..PREVIEW_SIZE).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints = (0..PREVIEW_SIZE).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints).flex(Flex::Center);

        let empty_block = BlockDisplay::empty(false);
        let occupied_block = self.preview.map(|preview| BlockDisplay::locked(preview.kind()));

        let grid_rows = area
            .layout::<PREVIEW_SIZE>(&vertical)
            .map(|row| row.layout::<PREVIEW_SIZE>(&horizontal));
        for (y, grid_row) in grid_rows.into_iter().enumerate() {
            for (x, grid_cell) in grid_row.into_iter().enumerate() {
                match (self.preview, &occupied_block) {
                    (Some(preview), Some(occupied)) if preview.is_occupied(x, y) => {
                        Widget::render(occupied, grid_cell, buf);
                    }
                    _ => Widget::render(&empty_block, grid_cell, buf),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use stackfall_engine::PieceKind;

    use super::*;
    use crate::view::widgets::color;

    fn render(preview: Option<&PreviewGrid>) -> Buffer {
        let display = PreviewDisplay::new(preview);
        let area = Rect::new(0, 0, display.width(), display.height());
        let mut buf = Buffer::empty(area);
        display.render(area, &mut buf);
        buf
    }

    fn occupied_cells(buf: &Buffer) -> Vec<(u16, u16)> {
        let mut cells = vec![];
        for y in 0..4 {
            for x in 0..4 {
                if buf[(x * 2, y)].bg != color::BLACK {
                    cells.push((x, y));
                }
            }
        }
        cells
    }

    #[test]
    fn test_size_covers_grid_and_border() {
        let display = PreviewDisplay::new(None);
        assert_eq!((display.width(), display.height()), (8, 4));
        let bordered = PreviewDisplay::new(None).block(BlockWidget::bordered());
        assert_eq!((bordered.width(), bordered.height()), (10, 6));
    }

    #[test]
    fn test_o_is_centred() {
        let preview = PreviewGrid::new(PieceKind::O);
        let buf = render(Some(&preview));
        assert_eq!(occupied_cells(&buf), [(1, 1), (2, 1), (1, 2), (2, 2)]);
        assert_eq!(buf[(2, 1)].bg, color::YELLOW);
    }

    #[test]
    fn test_i_fills_a_row() {
        let preview = PreviewGrid::new(PieceKind::I);
        let buf = render(Some(&preview));
        assert_eq!(occupied_cells(&buf), [(0, 1), (1, 1), (2, 1), (3, 1)]);
    }

    #[test]
    fn test_no_preview_is_blank() {
        let buf = render(None);
        assert!(occupied_cells(&buf).is_empty());
    }
}
