use ratatui::{
    prelude::{Buffer, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Keys and what they do, e.g. `(&["P"], "Pause")`.
pub type KeyBinding<'a> = (&'a [&'a str], &'a str);

/// One-line help bar listing the active key bindings.
#[derive(Debug)]
pub struct KeyBindingDisplay<'a> {
    bindings: &'a [KeyBinding<'a>],
}

impl<'a> KeyBindingDisplay<'a> {
    pub fn new(bindings: &'a [KeyBinding<'a>]) -> Self {
        Self { bindings }
    }
}

const KEY_STYLE: Style = Style::new().fg(Color::Cyan);
const KEY_SEPARATOR_STYLE: Style = Style::new().fg(Color::DarkGray);
const DESCRIPTION_STYLE: Style = Style::new().fg(Color::White);
const ITEM_SEPARATOR_STYLE: Style = Style::new().fg(Color::DarkGray);

/// `keys` joined by `/`, then the description.
fn binding_spans<'a>(keys: &[&'a str], desc: &'a str) -> impl Iterator<Item = Span<'a>> {
    let key_spans = keys.iter().enumerate().flat_map(|(i, key)| {
        let separator = (i > 0).then(|| Span::styled("/", KEY_SEPARATOR_STYLE));
        separator.into_iter().chain([Span::styled(*key, KEY_STYLE)])
    });
    key_spans.chain([Span::from(" "), Span::styled(desc, DESCRIPTION_STYLE)])
}

impl Widget for KeyBindingDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![];
        for (i, (keys, desc)) in self.bindings.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", ITEM_SEPARATOR_STYLE));
            }
            spans.extend(binding_spans(keys, desc));
        }
        Line::from(spans).centered().render(area, buf);
    }
}
