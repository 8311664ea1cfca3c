use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::nav::Verse;

/// Draws the verse centred in `area`: gurmukhi, then transliteration, then translation.
pub fn draw_verse(frame: &mut Frame<'_>, area: Rect, verse: Option<&Verse>) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let lines = match verse {
        Some(verse) => vec![
            Line::styled(
                verse.gurmukhi().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Line::default(),
            Line::styled(
                verse.transliteration().to_string(),
                Style::default().fg(Color::Cyan),
            ),
            Line::default(),
            Line::styled(
                verse.translation().to_string(),
                Style::default().fg(Color::Gray),
            ),
        ],
        None => vec![Line::styled(
            "No verse loaded",
            Style::default().fg(Color::DarkGray),
        )],
    };

    let height = wrapped_height(&lines, area.width).min(area.height);
    let top = area.y + (area.height - height) / 2;
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    let below = area.bottom() - top;
    frame.render_widget(paragraph, Rect::new(area.x, top, area.width, below));
}

/// Rows `lines` occupy once wrapped to `width` columns. Word wrapping can
/// need a row more than this per line, so it only positions the text.
fn wrapped_height(lines: &[Line<'_>], width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let rows: usize = lines
        .iter()
        .map(|line| {
            let text_width: usize = line
                .spans
                .iter()
                .map(|span| span.content.as_ref().width())
                .sum();
            text_width.div_ceil(width).max(1)
        })
        .sum();
    u16::try_from(rows).unwrap_or(u16::MAX)
}
