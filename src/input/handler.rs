use crossterm::event::{Event, KeyEventKind};

use crate::command::Command;
use crate::error::AppResult;
use crate::provider::ContentProvider;

use crate::app::App;
use crate::app::terminal_session::TerminalSurface;

#[derive(Debug, Default)]
pub(crate) struct InputEventOutcome {
    pub(crate) redraw: bool,
    pub(crate) quit_requested: bool,
    pub(crate) command: Option<Command>,
}

impl<P: ContentProvider> App<P> {
    pub(crate) fn handle_input_event(
        &mut self,
        event: Event,
        session: &mut impl TerminalSurface,
    ) -> AppResult<InputEventOutcome> {
        match event {
            Event::Key(key) if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) => {
                let outcome = self.interaction.handle_key_event(
                    &mut self.state,
                    key,
                    &self.config.keymap.preset,
                )?;
                if outcome.clear_terminal {
                    session.clear()?;
                }
                Ok(InputEventOutcome {
                    redraw: outcome.redraw,
                    quit_requested: outcome.quit_requested,
                    command: outcome.command,
                })
            }
            Event::Resize(_, _) => Ok(InputEventOutcome {
                redraw: true,
                ..InputEventOutcome::default()
            }),
            _ => Ok(InputEventOutcome::default()),
        }
    }
}
