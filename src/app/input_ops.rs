use crossterm::event::KeyEvent;

use crate::command::{ActionId, Command};
use crate::error::AppResult;
use crate::input::{KeymapPreset, map_key_to_command_with_preset};
use crate::palette::{PaletteKeyResult, PaletteSubmitEffect, PaletteView};

use super::core::InteractionSubsystem;
use super::state::{AppState, Mode, PaletteRequest};

#[derive(Debug, Clone, Default)]
pub(crate) struct KeyEventOutcome {
    pub redraw: bool,
    pub clear_terminal: bool,
    pub quit_requested: bool,
    pub command: Option<Command>,
}

impl InteractionSubsystem {
    pub(crate) fn handle_key_event(
        &mut self,
        state: &mut AppState,
        key: KeyEvent,
        keymap_preset: &str,
    ) -> AppResult<KeyEventOutcome> {
        if state.mode == Mode::Palette {
            return self.handle_palette_key(state, key);
        }

        let preset = KeymapPreset::parse(keymap_preset);
        let Some(command) = map_key_to_command_with_preset(key, state.mode, preset) else {
            return Ok(KeyEventOutcome::default());
        };

        if matches!(command, Command::Quit) {
            return Ok(KeyEventOutcome {
                quit_requested: true,
                ..KeyEventOutcome::default()
            });
        }

        Ok(KeyEventOutcome {
            command: Some(command),
            ..KeyEventOutcome::default()
        })
    }

    pub(crate) fn palette_view(&self) -> Option<PaletteView> {
        self.palette.manager.view()
    }

    fn handle_palette_key(
        &mut self,
        state: &mut AppState,
        key: KeyEvent,
    ) -> AppResult<KeyEventOutcome> {
        let result = self
            .palette
            .manager
            .handle_key(&self.palette.registry, state, key)?;

        match result {
            PaletteKeyResult::Consumed { redraw } => Ok(KeyEventOutcome {
                redraw,
                ..KeyEventOutcome::default()
            }),
            PaletteKeyResult::CloseRequested { session_id } => {
                let closed = self.close_palette_session(state, session_id);
                Ok(KeyEventOutcome {
                    redraw: closed,
                    clear_terminal: closed,
                    ..KeyEventOutcome::default()
                })
            }
            PaletteKeyResult::Submit(action) => {
                let (changed, command) =
                    self.handle_palette_submit_effect(state, action.session_id, action.effect);
                Ok(KeyEventOutcome {
                    redraw: changed,
                    clear_terminal: changed,
                    quit_requested: matches!(command, Some(Command::Quit)),
                    command: command.filter(|command| !matches!(command, Command::Quit)),
                })
            }
        }
    }

    pub(crate) fn close_palette_session(&mut self, state: &mut AppState, session_id: u64) -> bool {
        if !self.palette.manager.close_if_matches(session_id) {
            return false;
        }
        state.mode = Mode::Normal;
        true
    }

    pub(crate) fn apply_palette_requests(&mut self, state: &mut AppState) -> bool {
        let mut changed = false;
        while let Some(request) = self.palette.pending_requests.pop_front() {
            match request {
                PaletteRequest::Open { kind, seed } => {
                    match self
                        .palette
                        .manager
                        .open(&self.palette.registry, state, kind, seed)
                    {
                        Ok(()) => {
                            state.mode = Mode::Palette;
                            state
                                .status
                                .info(ActionId::OpenPalette, format!("palette opened: {}", kind.id()));
                            changed = true;
                        }
                        Err(err) => {
                            state.status.error(
                                ActionId::OpenPalette,
                                format!("failed to open palette: {err}"),
                            );
                        }
                    }
                }
                PaletteRequest::Close => {
                    if self.palette.manager.close() {
                        state.mode = Mode::Normal;
                        state.status.info(ActionId::ClosePalette, "palette closed");
                        changed = true;
                    }
                }
            }
        }

        if !self.palette.manager.is_open() && state.mode == Mode::Palette {
            state.mode = Mode::Normal;
            changed = true;
        }
        changed
    }

    fn handle_palette_submit_effect(
        &mut self,
        state: &mut AppState,
        session_id: u64,
        effect: PaletteSubmitEffect,
    ) -> (bool, Option<Command>) {
        if !self.palette.manager.close_if_matches(session_id) {
            return (false, None);
        }
        state.mode = Mode::Normal;

        let command = match effect {
            PaletteSubmitEffect::Close => None,
            PaletteSubmitEffect::Reopen { kind, seed } => {
                self.palette
                    .pending_requests
                    .push_back(PaletteRequest::Open { kind, seed });
                None
            }
            PaletteSubmitEffect::Dispatch(command) => Some(command),
        };

        self.apply_palette_requests(state);
        (true, command)
    }
}
