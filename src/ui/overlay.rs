use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::palette::{PaletteItemView, PaletteView};

use super::layout::centered_rect;

pub fn draw_loading_overlay(frame: &mut Frame<'_>, area: Rect, ang: u32) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let popup_width = area.width.min(34);
    let popup_height = area.height.min(5);
    let popup = centered_rect(area, popup_width, popup_height);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title("Loading")
        .borders(Borders::ALL)
        .style(Style::default().fg(Color::Yellow));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let message = Paragraph::new(format!("Loading ang {ang}..."))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::White));
    frame.render_widget(message, inner);
}

pub fn draw_palette_overlay(frame: &mut Frame<'_>, area: Rect, view: &PaletteView) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let popup = centered_rect(area, area.width.min(72), area.height.clamp(7, 24));
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(format!(" {} ", view.title))
        .title_bottom(Line::from(format!(" {} ", match_count_label(view))).right_aligned())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    if inner.width == 0 || inner.height < 3 {
        return;
    }

    let [input_area, rule_area, list_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .areas(inner);

    // Software caret; the terminal cursor stays hidden.
    let input_line = build_palette_input_line(&view.input, view.cursor, input_area.width as usize);
    frame.render_widget(Paragraph::new(input_line), input_area);
    frame.render_widget(
        Paragraph::new("─".repeat(inner.width as usize)).style(Style::default().fg(Color::DarkGray)),
        rule_area,
    );

    let mut lines = Vec::new();
    if let Some(assistive) = view.assistive_text.as_deref().filter(|text| !text.is_empty()) {
        lines.push(Line::from(vec![
            Span::raw("   "),
            Span::styled(assistive.to_string(), Style::default().fg(Color::DarkGray)),
        ]));
    }

    let rows = (list_area.height as usize).saturating_sub(lines.len());
    let start = scroll_start(view.selected_idx, view.items.len(), rows);
    lines.extend(
        view.items
            .iter()
            .skip(start)
            .take(rows)
            .map(|item| candidate_line(item, inner.width as usize)),
    );

    frame.render_widget(Paragraph::new(lines), list_area);
}

fn match_count_label(view: &PaletteView) -> String {
    match view.items.len() {
        1 => "1 match".to_string(),
        count => format!("{count} matches"),
    }
}

/// First visible row so `selected` sits mid-window where the list allows.
fn scroll_start(selected: usize, len: usize, rows: usize) -> usize {
    if rows == 0 || len <= rows {
        return 0;
    }
    let selected = selected.min(len - 1);
    selected.saturating_sub(rows / 2).min(len - rows)
}

fn candidate_line(item: &PaletteItemView, width: usize) -> Line<'static> {
    let marker = if item.selected {
        Span::styled(" ┃ ", Style::default().fg(Color::Yellow))
    } else {
        Span::raw("   ")
    };
    let mut spans = vec![marker, Span::raw(item.label.clone())];
    let mut used = 3 + item.label.width();

    if let Some(detail) = &item.detail {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            detail.clone(),
            Style::default().fg(Color::DarkGray),
        ));
        used += 2 + detail.width();
    }

    // Pad so the selection background spans the row.
    spans.push(Span::raw(" ".repeat(width.saturating_sub(used))));

    let style = if item.selected {
        Style::default().bg(Color::Rgb(45, 45, 50))
    } else {
        Style::default()
    };
    Line::from(spans).style(style)
}

fn build_palette_input_line(input: &str, cursor: usize, width: usize) -> Line<'static> {
    let prefix_spans = vec![
        Span::raw(" ".to_string()),
        Span::styled("> ".to_string(), Style::default().fg(Color::White)),
    ];
    let prefix_width = 3;
    let max_text_width = width.saturating_sub(prefix_width);

    let chars: Vec<char> = input.chars().collect();
    let char_count = chars.len();
    let cursor = cursor.min(char_count);

    let mut start = 0usize;
    if max_text_width > 0 {
        if cursor >= max_text_width {
            start = cursor.saturating_sub(max_text_width.saturating_sub(1));
        }
        if start > char_count {
            start = char_count;
        }
    } else {
        start = char_count;
    }

    let text_width = max_text_width.max(1);
    let end = (start + text_width).min(char_count);
    let mut visible: Vec<char> = chars[start..end].to_vec();
    if visible.len() < text_width {
        visible.extend(std::iter::repeat_n(' ', text_width - visible.len()));
    }

    let caret_idx = cursor
        .saturating_sub(start)
        .min(text_width.saturating_sub(1));

    let mut spans = prefix_spans;
    for (idx, ch) in visible.into_iter().enumerate() {
        if idx == caret_idx {
            spans.push(Span::styled(ch.to_string(), Style::default().reversed()));
        } else {
            spans.push(Span::raw(ch.to_string()));
        }
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;
    use ratatui::style::Modifier;

    use crate::palette::{PaletteItemView, PaletteKind, PaletteView};

    use super::{build_palette_input_line, draw_loading_overlay, draw_palette_overlay, scroll_start};

    fn test_view(input: &str, cursor: usize) -> PaletteView {
        PaletteView {
            title: "Commands".to_string(),
            kind: PaletteKind::Command,
            input: input.to_string(),
            cursor,
            assistive_text: None,
            items: vec![PaletteItemView {
                label: "goto-ang".to_string(),
                detail: None,
                selected: true,
            }],
            selected_idx: 0,
        }
    }

    #[test]
    fn palette_overlay_highlights_caret_on_character() {
        let line = build_palette_input_line("abc", 1, 12);
        assert_eq!(line.spans[3].content.as_ref(), "b");
        assert!(
            line.spans[3]
                .style
                .add_modifier
                .contains(Modifier::REVERSED)
        );
    }

    #[test]
    fn palette_overlay_highlights_trailing_space_at_end_cursor() {
        let line = build_palette_input_line("abc", 3, 12);
        assert_eq!(line.spans[5].content.as_ref(), " ");
        assert!(
            line.spans[5]
                .style
                .add_modifier
                .contains(Modifier::REVERSED)
        );
    }

    #[test]
    fn palette_overlay_handles_gurmukhi_input_without_panic() {
        let backend = TestBackend::new(30, 10);
        let mut terminal = Terminal::new(backend).expect("test terminal should initialize");
        terminal
            .draw(|frame| {
                draw_palette_overlay(frame, Rect::new(0, 0, 30, 10), &test_view("ਜਪੁ", 1));
            })
            .expect("draw should pass");
    }

    #[test]
    fn scroll_keeps_selection_visible() {
        assert_eq!(scroll_start(0, 18, 6), 0);
        assert_eq!(scroll_start(5, 18, 6), 2);
        assert_eq!(scroll_start(17, 18, 6), 12);
        assert_eq!(scroll_start(3, 4, 6), 0);
        assert_eq!(scroll_start(3, 4, 0), 0);
    }

    #[test]
    fn loading_overlay_names_the_ang() {
        let backend = TestBackend::new(40, 9);
        let mut terminal = Terminal::new(backend).expect("test terminal should initialize");
        terminal
            .draw(|frame| draw_loading_overlay(frame, Rect::new(0, 0, 40, 9), 917))
            .expect("draw should pass");
        let buffer = terminal.backend().buffer();
        let text: String = (0..buffer.area.height)
            .flat_map(|y| (0..buffer.area.width).map(move |x| (x, y)))
            .map(|pos| buffer[pos].symbol().to_string())
            .collect();
        assert!(text.contains("Loading ang 917..."));
    }
}
