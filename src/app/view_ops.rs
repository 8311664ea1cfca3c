use tokio::time::Instant;

use crate::error::AppResult;
use crate::provider::ContentProvider;
use crate::ui::{self, ChromeSnapshot};

use super::core::App;
use super::terminal_session::TerminalSurface;

impl<P: ContentProvider> App<P> {
    pub(super) fn chrome_snapshot(&self, now: Instant) -> ChromeSnapshot {
        let engine = &self.engine;
        ChromeSnapshot {
            ang: engine.page_number(),
            line: engine
                .cursor_position()
                .map(|cursor| (cursor + 1, engine.buffer_size())),
            advancing: engine.is_advancing(),
            progress: engine.progress(),
            advance: engine.advance_progress(now),
        }
    }

    pub(super) fn render_frame(&self, session: &mut impl TerminalSurface) -> AppResult<()> {
        let snapshot = self.chrome_snapshot(Instant::now());
        let palette_view = self.interaction.palette_view();
        let state = &self.state;
        let verse = self.engine.current_verse();

        session.draw(|frame| {
            let layout = ui::split_layout(frame.area());
            ui::draw_chrome(frame, layout, state, snapshot);
            ui::draw_verse(frame, layout.verse, verse);

            if let Some(ang) = state.loading {
                ui::draw_loading_overlay(frame, layout.verse, ang);
            }
            if let Some(view) = palette_view.as_ref() {
                ui::draw_palette_overlay(frame, layout.verse, view);
            }
        })?;
        Ok(())
    }
}
