use crate::domain::ItemStatus;
use ratatui::style::{Color, Modifier, Style};

/// Default text style
pub fn default_style() -> Style {
    Style::default().fg(Color::White)
}

/// Column header style
pub fn header_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Title style for listings
pub fn title_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Border style
pub fn border_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Footer ("Left tasks: N") style
pub fn hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Status badge style
pub fn status_style(status: ItemStatus) -> Style {
    match status {
        ItemStatus::Todo => Style::default().fg(Color::Gray),
        ItemStatus::InProgress => Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
        ItemStatus::Done => Style::default().fg(Color::Green),
    }
}
