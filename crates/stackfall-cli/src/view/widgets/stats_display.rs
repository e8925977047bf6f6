use std::iter;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use stackfall_engine::GameStats;

use crate::view::widgets::style;

pub struct StatsDisplay<'a> {
    stats: &'a GameStats,
    block: Option<BlockWidget<'a>>,
}

impl<'a> StatsDisplay<'a> {
    pub fn new(stats: &'a GameStats) -> Self {
        Self { stats, block: None }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        18 + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        super::cell_count(LINE_COUNT) + super::block_vertical_margin(self.block.as_ref())
    }
}

/// Score label and value, a gap, level/lines/pieces, a gap, then the clear histogram.
const LINE_COUNT: usize = 11;

/// Labels for `line_cleared_counter()[1..]`.
const CLEAR_LABELS: [&str; 4] = ["SINGLES:", "DOUBLES:", "TRIPLES:", "TETRIS:"];

fn render_entry(label: &str, value: usize, area: Rect, buf: &mut Buffer) {
    Line::styled(label, style::DEFAULT)
        .left_aligned()
        .render(area, buf);
    Line::styled(value.to_string(), style::DEFAULT)
        .right_aligned()
        .render(area, buf);
}

impl Widget for StatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let [score_label, score_value, _, level, lines, pieces, _, clears @ ..] =
            area.layout::<LINE_COUNT>(&Layout::vertical([Constraint::Length(1); LINE_COUNT]));

        let stats = self.stats;
        Line::styled("SCORE:", style::DEFAULT)
            .left_aligned()
            .render(score_label, buf);
        Line::styled(stats.score().to_string(), style::DEFAULT)
            .right_aligned()
            .render(score_value, buf);
        render_entry("LEVEL:", stats.level(), level, buf);
        render_entry("LINES:", stats.total_cleared_lines(), lines, buf);
        render_entry("PIECES:", stats.completed_pieces(), pieces, buf);

        let counts = &stats.line_cleared_counter()[1..];
        for ((label, count), area) in iter::zip(CLEAR_LABELS, counts).zip(clears) {
            render_entry(label, *count, area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::widgets::buffer_text;

    fn render(stats: &GameStats) -> String {
        let display = StatsDisplay::new(stats);
        let area = Rect::new(0, 0, display.width(), display.height());
        let mut buf = Buffer::empty(area);
        display.render(area, &mut buf);
        buffer_text(&buf)
    }

    fn line_of<'a>(text: &'a str, label: &str) -> &'a str {
        text.lines().find(|line| line.starts_with(label)).unwrap()
    }

    #[test]
    fn test_fresh_stats() {
        let text = render(&GameStats::new());
        assert!(text.starts_with("SCORE:"));
        assert!(line_of(&text, "LEVEL:").trim_end().ends_with('1'));
        assert!(line_of(&text, "LINES:").trim_end().ends_with('0'));
    }

    #[test]
    fn test_values_follow_stats() {
        let mut stats = GameStats::new();
        stats.complete_piece_drop(2);
        stats.complete_piece_drop(4);
        let text = render(&stats);
        assert_eq!(text.lines().nth(1).map(str::trim), Some("1100"));
        assert!(line_of(&text, "LINES:").ends_with('6'));
        assert!(line_of(&text, "DOUBLES:").ends_with('1'));
        assert!(line_of(&text, "TETRIS:").ends_with('1'));
        assert!(line_of(&text, "SINGLES:").ends_with('0'));
    }
}
