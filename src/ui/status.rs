//! Bottom status bar

use ratatui::{prelude::*, widgets::Paragraph};

use super::helpers::to_color;
use crate::theme::{CARD_BORDER, TITLE};

pub const KEY_HINTS: &str = " q: Quit | a: Add cell | d: Remove last | h: Header | f: Footer ";

/// Key hints on the left, the most recent status message on the right
pub fn render_status_bar(area: Rect, latest: Option<&str>, frame: &mut Frame) {
    let hint_width = (KEY_HINTS.chars().count() as u16).min(area.width);
    let [hints_area, message_area] =
        Layout::horizontal([Constraint::Length(hint_width), Constraint::Min(0)]).areas(area);

    let style = Style::default().fg(to_color(TITLE)).bg(to_color(CARD_BORDER));
    frame.render_widget(Paragraph::new(KEY_HINTS).style(style), hints_area);

    let message = latest.map(|text| format!(" {text}")).unwrap_or_default();
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            message,
            Style::default().add_modifier(Modifier::BOLD),
        )))
        .style(style),
        message_area,
    );
}
