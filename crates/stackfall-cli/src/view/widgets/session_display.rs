use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::{Color, Style},
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};
use stackfall_engine::{SessionState, Snapshot};

use crate::view::widgets::{BoardDisplay, PreviewDisplay, StatsDisplay, color, style};

const START_PROMPT: &str = "Press Enter to start";

/// The whole game screen: stats, board, next piece and any status popup.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    snapshot: &'a Snapshot,
    horizontal_padding: u16,
    vertical_padding: u16,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(snapshot: &'a Snapshot) -> Self {
        Self {
            snapshot,
            horizontal_padding: 1,
            vertical_padding: 0,
        }
    }

    pub fn height(&self) -> u16 {
        BoardDisplay::new(self.snapshot.rows())
            .block(Block::bordered())
            .height()
    }

    fn border_color(&self) -> Color {
        match self.snapshot.state() {
            SessionState::Active => color::WHITE,
            SessionState::Paused => color::YELLOW,
            SessionState::Idle if self.snapshot.message().is_empty() => color::GRAY,
            SessionState::Idle => color::RED,
        }
    }

    fn popup(&self) -> Option<(&'static str, Style)> {
        let message = self.snapshot.message();
        match self.snapshot.state() {
            SessionState::Active => None,
            SessionState::Paused => Some((message, style::PAUSED_POPUP)),
            SessionState::Idle if message.is_empty() => Some((START_PROMPT, style::IDLE_POPUP)),
            SessionState::Idle => Some((message, style::GAME_OVER_POPUP)),
        }
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let block_padding = Padding::symmetric(self.horizontal_padding, self.vertical_padding);
        let border_style = self.border_color();

        let game_board = BoardDisplay::new(self.snapshot.rows())
            .block(Block::bordered().border_style(border_style).style(style::DEFAULT));
        let preview_panel = PreviewDisplay::new(self.snapshot.preview()).block(
            Block::bordered()
                .title(Line::from("NEXT").centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style::DEFAULT),
        );
        let stats_panel = StatsDisplay::new(self.snapshot.stats()).block(
            Block::bordered()
                .title(Line::from("STATS").centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style::DEFAULT),
        );

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(stats_panel.width()),
            Constraint::Length(game_board.width()),
            Constraint::Length(preview_panel.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] =
            Layout::vertical([Constraint::Length(stats_panel.height())]).areas(left_column);
        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(center_column);
        let [preview_area] =
            Layout::vertical([Constraint::Length(preview_panel.height())]).areas(right_column);

        stats_panel.render(stats_area, buf);
        game_board.render(board_area, buf);
        preview_panel.render(preview_area, buf);

        if let Some((text, style)) = self.popup() {
            let width = u16::try_from(Line::from(text).width())
                .unwrap_or(u16::MAX)
                .saturating_add(4);
            let row = board_area.centered_vertically(Constraint::Length(3));
            let area = Rect::new(area.x, row.y, area.width, row.height)
                .centered_horizontally(Constraint::Length(width));

            let block = Block::new().style(style);
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            Text::styled(text, style)
                .centered()
                .render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}
