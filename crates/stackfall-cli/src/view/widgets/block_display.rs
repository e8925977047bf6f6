use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};
use stackfall_engine::{PieceKind, ViewBlock};

use crate::view::widgets::style;

/// One board cell, two terminal columns wide.
#[derive(Debug)]
pub struct BlockDisplay {
    style: Style,
    symbol: &'static str,
}

impl BlockDisplay {
    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub fn width() -> u16 {
        2
    }

    pub fn height() -> u16 {
        1
    }

    pub const fn empty(show_dots: bool) -> Self {
        if show_dots {
            Self::new(style::EMPTY_DOT, ".")
        } else {
            Self::new(style::EMPTY, "")
        }
    }

    pub const fn locked(kind: PieceKind) -> Self {
        Self::new(style::locked(kind), "")
    }

    pub fn from_view_block(block: ViewBlock, show_dots: bool) -> Self {
        match block {
            ViewBlock::Empty => Self::empty(show_dots),
            ViewBlock::Locked(kind) => Self::locked(kind),
            ViewBlock::Active(kind) => Self::new(style::active(kind), "[]"),
        }
    }
}

impl Widget for BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        // Use a Paragraph to fill the whole area, not just the cells with the symbol
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::widgets::{buffer_text, color};

    fn render(block: ViewBlock) -> Buffer {
        let area = Rect::new(0, 0, BlockDisplay::width(), BlockDisplay::height());
        let mut buf = Buffer::empty(area);
        BlockDisplay::from_view_block(block, true).render(area, &mut buf);
        buf
    }

    #[test]
    fn test_fills_both_columns() {
        let buf = render(ViewBlock::Locked(PieceKind::T));
        assert_eq!(buf[(0, 0)].bg, color::MAGENTA);
        assert_eq!(buf[(1, 0)].bg, color::MAGENTA);
    }

    #[test]
    fn test_active_is_marked() {
        let buf = render(ViewBlock::Active(PieceKind::I));
        assert_eq!(buf[(0, 0)].symbol(), "[");
        assert_eq!(buf[(1, 0)].symbol(), "]");
        assert_eq!(buf[(0, 0)].bg, color::CYAN);
    }

    #[test]
    fn test_empty_shows_dot() {
        let buf = render(ViewBlock::Empty);
        assert_eq!(buffer_text(&buf).trim(), ".");
        assert_eq!(buf[(0, 0)].bg, color::BLACK);
        assert_eq!(buf[(1, 0)].bg, color::BLACK);
    }

    #[test]
    fn test_empty_without_dots_is_blank() {
        let area = Rect::new(0, 0, BlockDisplay::width(), BlockDisplay::height());
        let mut buf = Buffer::empty(area);
        BlockDisplay::empty(false).render(area, &mut buf);
        assert_eq!(buffer_text(&buf).trim(), "");
        assert_eq!(buf[(1, 0)].bg, color::BLACK);
    }
}
