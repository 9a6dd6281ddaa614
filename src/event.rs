use crossterm::event::{KeyEvent, MouseEvent};

/// Application events.
#[derive(Debug)]
pub enum Event {
    /// A key press event.
    Key(KeyEvent),
    /// A mouse event.
    Mouse(MouseEvent),
    /// The terminal was resized; the next frame re-measures the layout.
    Resize(u16, u16),
}
