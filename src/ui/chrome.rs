use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Gauge, Paragraph, Wrap};

use crate::app::{AppState, Mode};

use super::layout::UiLayout;

/// Everything the chrome needs from the navigation engine for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChromeSnapshot {
    pub ang: u32,
    /// 1-based line within the ang, with the line count.
    pub line: Option<(usize, usize)>,
    /// An auto-advance is pending.
    pub advancing: bool,
    /// Share of the page shown so far.
    pub progress: Option<f64>,
    /// Elapsed share of the current advance interval.
    pub advance: Option<f64>,
}

pub fn draw_chrome(frame: &mut Frame<'_>, layout: UiLayout, app: &AppState, snap: ChromeSnapshot) {
    draw_header(frame, layout.header, snap);
    draw_gauge(frame, layout.gauge, snap);
    draw_controls(frame, layout.controls, app, snap);
    draw_status(frame, layout.status, app);
}

fn draw_header(frame: &mut Frame<'_>, area: Rect, snap: ChromeSnapshot) {
    let mut spans = vec![Span::styled(
        format!(" Ang {}", snap.ang),
        Style::default().fg(Color::Yellow),
    )];
    if let Some((line, total)) = snap.line {
        spans.push(Span::styled(
            format!("  Line {line} of {total}"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_gauge(frame: &mut Frame<'_>, area: Rect, snap: ChromeSnapshot) {
    let (Some((line, total)), Some(progress)) = (snap.line, snap.progress) else {
        return;
    };
    let label = match snap.advance {
        Some(advance) => format!("{line}/{total}  next {:.0}%", advance * 100.0),
        _ => format!("{line}/{total}"),
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
        .ratio(progress.clamp(0.0, 1.0))
        .label(label);
    frame.render_widget(gauge, area);
}

fn draw_controls(frame: &mut Frame<'_>, area: Rect, app: &AppState, snap: ChromeSnapshot) {
    let text = match app.mode {
        Mode::Palette => "Enter: select  Tab: complete  Esc: close".to_string(),
        Mode::Normal => {
            let toggle = if snap.advancing { "Pause" } else { "Resume" };
            format!("<- Previous  Space: {toggle}  Next ->  b: Banis  :: Commands  q: Quit")
        }
    };
    let controls = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(controls, area);
}

fn draw_status(frame: &mut Frame<'_>, area: Rect, app: &AppState) {
    let style = if app.status.is_error {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    };
    let status = Paragraph::new(app.status.message.clone())
        .style(style)
        .wrap(Wrap { trim: true });
    frame.render_widget(status, area);
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::style::Color;

    use crate::app::AppState;
    use crate::command::ActionId;
    use crate::ui::split_layout;

    use super::{ChromeSnapshot, draw_chrome};

    fn render(app: &AppState, snap: ChromeSnapshot) -> ratatui::buffer::Buffer {
        let mut terminal =
            Terminal::new(TestBackend::new(80, 8)).expect("test terminal should initialize");
        terminal
            .draw(|frame| {
                let layout = split_layout(frame.area());
                draw_chrome(frame, layout, app, snap);
            })
            .expect("draw should pass");
        terminal.backend().buffer().clone()
    }

    fn row(buffer: &ratatui::buffer::Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn header_shows_ang_and_line() {
        let snap = ChromeSnapshot {
            ang: 12,
            line: Some((3, 10)),
            advancing: true,
            progress: Some(0.3),
            advance: Some(0.5),
        };
        let buffer = render(&AppState::default(), snap);
        let header = row(&buffer, 0);
        assert!(header.contains("Ang 12"));
        assert!(header.contains("Line 3 of 10"));
    }

    #[test]
    fn controls_reflect_pause_state() {
        let mut snap = ChromeSnapshot {
            ang: 1,
            line: Some((1, 4)),
            advancing: false,
            progress: Some(0.25),
            advance: None,
        };
        let buffer = render(&AppState::default(), snap);
        assert!(row(&buffer, 6).contains("Space: Resume"));

        snap.advancing = true;
        snap.advance = Some(0.1);
        let buffer = render(&AppState::default(), snap);
        assert!(row(&buffer, 6).contains("Space: Pause"));
    }

    #[test]
    fn stopped_advance_offers_resume_while_unpaused() {
        let snap = ChromeSnapshot {
            ang: 1,
            line: Some((1, 1)),
            advancing: false,
            progress: Some(1.0),
            advance: None,
        };
        let buffer = render(&AppState::default(), snap);
        assert!(row(&buffer, 6).contains("Space: Resume"));
        assert!(!row(&buffer, 5).contains("next"));
    }

    #[test]
    fn error_status_is_red() {
        let mut app = AppState::default();
        app.status.error(ActionId::Next, "ang 9 could not be fetched");
        let snap = ChromeSnapshot {
            ang: 8,
            line: None,
            advancing: false,
            progress: None,
            advance: None,
        };
        let buffer = render(&app, snap);
        assert!(row(&buffer, 7).starts_with("ang 9 could not be fetched"));
        assert_eq!(buffer[(0, 7)].fg, Color::Red);
    }
}
