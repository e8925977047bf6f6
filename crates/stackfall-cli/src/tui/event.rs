use crossterm::event::Event as CrosstermEvent;

/// Events dispatched by [`Tui`](super::Tui).
#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    /// The gravity timer fired.
    Tick,
    /// Something changed since the last draw.
    Render,
    /// Terminal events such as key input, mouse, and resize.
    Crossterm(CrosstermEvent),
}
