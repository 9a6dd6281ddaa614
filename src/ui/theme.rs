use ratatui::style::Color;

use crate::preferences::Document;

/// Colors for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg_primary: Color,
    pub bg_panel: Color,
    pub fg_primary: Color,
    pub fg_dim: Color,
    pub fg_heading: Color,

    pub bar_bg: Color,
    pub bar_text: Color,
    pub bar_highlight_bg: Color,
    pub bar_highlight_text: Color,

    pub border_idle: Color,
    pub border_focus: Color,
    pub accent: Color,

    pub button_bg: Color,
    pub button_text: Color,
    pub button_disabled_bg: Color,
    pub button_disabled_text: Color,

    pub selection_bg: Color,
    pub selection_fg: Color,
    pub overlay_bg: Color,
}

pub const LIGHT: Palette = Palette {
    bg_primary: Color::Rgb(248, 250, 252),
    bg_panel: Color::Rgb(255, 255, 255),
    fg_primary: Color::Rgb(51, 65, 85),
    fg_dim: Color::Rgb(100, 116, 139),
    fg_heading: Color::Rgb(15, 23, 42),

    bar_bg: Color::Rgb(15, 23, 42),
    bar_text: Color::Rgb(226, 232, 240),
    bar_highlight_bg: Color::Rgb(16, 185, 129),
    bar_highlight_text: Color::Rgb(255, 255, 255),

    border_idle: Color::Rgb(203, 213, 225),
    border_focus: Color::Rgb(14, 165, 233),
    accent: Color::Rgb(5, 150, 105),

    button_bg: Color::Rgb(16, 185, 129),
    button_text: Color::Rgb(255, 255, 255),
    button_disabled_bg: Color::Rgb(226, 232, 240),
    button_disabled_text: Color::Rgb(100, 116, 139),

    selection_bg: Color::Rgb(224, 242, 254),
    selection_fg: Color::Rgb(15, 23, 42),
    overlay_bg: Color::Rgb(241, 245, 249),
};

pub const DARK: Palette = Palette {
    bg_primary: Color::Rgb(2, 6, 23),
    bg_panel: Color::Rgb(15, 23, 42),
    fg_primary: Color::Rgb(226, 232, 240),
    fg_dim: Color::Rgb(148, 163, 184),
    fg_heading: Color::Rgb(255, 255, 255),

    bar_bg: Color::Rgb(30, 41, 59),
    bar_text: Color::Rgb(203, 213, 225),
    bar_highlight_bg: Color::Rgb(5, 150, 105),
    bar_highlight_text: Color::Rgb(255, 255, 255),

    border_idle: Color::Rgb(51, 65, 85),
    border_focus: Color::Rgb(125, 211, 252),
    accent: Color::Rgb(110, 231, 183),

    button_bg: Color::Rgb(5, 150, 105),
    button_text: Color::Rgb(255, 255, 255),
    button_disabled_bg: Color::Rgb(30, 41, 59),
    button_disabled_text: Color::Rgb(148, 163, 184),

    selection_bg: Color::Rgb(12, 74, 110),
    selection_fg: Color::Rgb(255, 255, 255),
    overlay_bg: Color::Rgb(30, 41, 59),
};

pub fn palette(document: &Document) -> &'static Palette {
    if document.dark { &DARK } else { &LIGHT }
}
