use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use crate::app::AppState;
use crate::error::AppResult;

use super::kind::PaletteKind;
use super::matcher::{CandidateMatcher, ContainsMatcher};
use super::registry::PaletteRegistry;
use super::types::{
    PaletteCandidate, PaletteContext, PaletteInputMode, PaletteItemView, PaletteKeyResult,
    PaletteSubmitAction, PaletteTabEffect, PaletteView,
};

const PAGE_JUMP: usize = 8;

#[derive(Debug)]
struct PaletteSession {
    id: u64,
    kind: PaletteKind,
    seed: Option<String>,
    title: String,
    input_mode: PaletteInputMode,
    input: Input,
    candidates: Vec<PaletteCandidate>,
    visible: Vec<usize>,
    selected: usize,
    assistive_text: Option<String>,
}

impl PaletteSession {
    fn selected_candidate(&self) -> Option<&PaletteCandidate> {
        selected_candidate_for(&self.candidates, &self.visible, self.selected)
    }

    /// Moves the selection by `delta`, wrapping at both ends.
    fn step_selection(&mut self, delta: isize) {
        let len = self.visible.len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        let len = len as isize;
        self.selected = (self.selected as isize + delta).rem_euclid(len) as usize;
    }

    fn jump_selection(&mut self, delta: isize) {
        let last = self.visible.len().saturating_sub(1);
        self.selected = if delta < 0 {
            self.selected.saturating_sub(delta.unsigned_abs())
        } else {
            self.selected.saturating_add(delta as usize).min(last)
        };
    }
}

pub struct PaletteManager {
    next_session_id: u64,
    active: Option<PaletteSession>,
    matcher: Box<dyn CandidateMatcher>,
}

impl Default for PaletteManager {
    fn default() -> Self {
        Self {
            next_session_id: 1,
            active: None,
            matcher: Box::new(ContainsMatcher),
        }
    }
}

impl PaletteManager {
    pub fn open(
        &mut self,
        registry: &PaletteRegistry,
        app: &AppState,
        kind: PaletteKind,
        seed: Option<String>,
    ) -> AppResult<()> {
        let provider = registry.get(kind);
        let input = Input::new(seed.clone().unwrap_or_default());

        let ctx = PaletteContext {
            app,
            kind,
            input: input.value(),
            seed: seed.as_deref(),
        };
        let title = provider.title(&ctx);
        let candidates = provider.list(&ctx)?;
        let input_mode = provider.input_mode();
        let visible = self.visible_candidates(input_mode, input.value(), &candidates);
        let assistive_text =
            provider.assistive_text(&ctx, selected_candidate_for(&candidates, &visible, 0));

        self.active = Some(PaletteSession {
            id: self.take_session_id(),
            kind,
            seed,
            title,
            input_mode,
            input,
            candidates,
            visible,
            selected: 0,
            assistive_text,
        });
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_kind(&self) -> Option<PaletteKind> {
        self.active.as_ref().map(|session| session.kind)
    }

    pub fn close(&mut self) -> bool {
        self.active.take().is_some()
    }

    pub fn close_if_matches(&mut self, session_id: u64) -> bool {
        if self.active.as_ref().map(|session| session.id) != Some(session_id) {
            return false;
        }
        self.active = None;
        true
    }

    pub fn handle_key(
        &mut self,
        registry: &PaletteRegistry,
        app: &AppState,
        key: KeyEvent,
    ) -> AppResult<PaletteKeyResult> {
        let Some(session) = self.active.as_mut() else {
            return Ok(PaletteKeyResult::Consumed { redraw: false });
        };
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => {
                return Ok(PaletteKeyResult::CloseRequested {
                    session_id: session.id,
                });
            }
            KeyCode::Char('c') if ctrl => {
                return Ok(PaletteKeyResult::CloseRequested {
                    session_id: session.id,
                });
            }
            KeyCode::Up => session.step_selection(-1),
            KeyCode::Down => session.step_selection(1),
            KeyCode::Char('p') if ctrl => session.step_selection(-1),
            KeyCode::Char('n') if ctrl => session.step_selection(1),
            KeyCode::PageUp => session.jump_selection(-(PAGE_JUMP as isize)),
            KeyCode::PageDown => session.jump_selection(PAGE_JUMP as isize),
            KeyCode::Tab => {
                let provider = registry.get(session.kind);
                let ctx = PaletteContext {
                    app,
                    kind: session.kind,
                    input: session.input.value(),
                    seed: session.seed.as_deref(),
                };
                if let PaletteTabEffect::SetInput(value) =
                    provider.on_tab(&ctx, session.selected_candidate())?
                {
                    session.input = Input::new(value);
                }
                self.rebuild(registry, app)?;
                return Ok(PaletteKeyResult::Consumed { redraw: true });
            }
            KeyCode::Enter => {
                let provider = registry.get(session.kind);
                let ctx = PaletteContext {
                    app,
                    kind: session.kind,
                    input: session.input.value(),
                    seed: session.seed.as_deref(),
                };
                let effect = provider.on_submit(&ctx, session.selected_candidate())?;
                return Ok(PaletteKeyResult::Submit(PaletteSubmitAction {
                    session_id: session.id,
                    effect,
                }));
            }
            _ => {
                session.input.handle_event(&Event::Key(key));
                self.rebuild(registry, app)?;
                return Ok(PaletteKeyResult::Consumed { redraw: true });
            }
        }

        self.refresh_assistive_text(registry, app);
        Ok(PaletteKeyResult::Consumed { redraw: true })
    }

    pub fn view(&self) -> Option<PaletteView> {
        let session = self.active.as_ref()?;
        let items = session
            .visible
            .iter()
            .enumerate()
            .filter_map(|(idx_in_visible, candidate_idx)| {
                let candidate = session.candidates.get(*candidate_idx)?;
                Some(PaletteItemView {
                    label: candidate.label.clone(),
                    detail: candidate.detail.clone(),
                    selected: idx_in_visible == session.selected,
                })
            })
            .collect();

        Some(PaletteView {
            title: session.title.clone(),
            kind: session.kind,
            input: session.input.value().to_string(),
            cursor: session.input.visual_cursor(),
            assistive_text: session.assistive_text.clone(),
            selected_idx: session.selected,
            items,
        })
    }

    fn rebuild(&mut self, registry: &PaletteRegistry, app: &AppState) -> AppResult<()> {
        let Some(existing) = self.active.as_ref() else {
            return Ok(());
        };
        let kind = existing.kind;
        let seed = existing.seed.clone();
        let input_mode = existing.input_mode;
        let input_text = existing.input.value().to_string();
        let current_selected = existing.selected;

        let provider = registry.get(kind);
        let ctx = PaletteContext {
            app,
            kind,
            input: &input_text,
            seed: seed.as_deref(),
        };

        let title = provider.title(&ctx);
        let candidates = provider.list(&ctx)?;
        let visible = self.visible_candidates(input_mode, &input_text, &candidates);
        let selected = current_selected.min(visible.len().saturating_sub(1));
        let assistive_text =
            provider.assistive_text(&ctx, selected_candidate_for(&candidates, &visible, selected));

        let Some(session) = self.active.as_mut() else {
            return Ok(());
        };
        session.title = title;
        session.candidates = candidates;
        session.visible = visible;
        session.selected = selected;
        session.assistive_text = assistive_text;
        Ok(())
    }

    fn refresh_assistive_text(&mut self, registry: &PaletteRegistry, app: &AppState) {
        let Some(session) = self.active.as_mut() else {
            return;
        };
        let provider = registry.get(session.kind);
        let ctx = PaletteContext {
            app,
            kind: session.kind,
            input: session.input.value(),
            seed: session.seed.as_deref(),
        };
        let text = provider.assistive_text(&ctx, session.selected_candidate());
        session.assistive_text = text;
    }

    fn visible_candidates(
        &self,
        input_mode: PaletteInputMode,
        input: &str,
        candidates: &[PaletteCandidate],
    ) -> Vec<usize> {
        match input_mode {
            PaletteInputMode::FilterCandidates => self.matcher.select(input, candidates),
            PaletteInputMode::Custom => (0..candidates.len()).collect(),
        }
    }

    fn take_session_id(&mut self) -> u64 {
        let id = self.next_session_id;
        self.next_session_id = self.next_session_id.saturating_add(1);
        id
    }
}

fn selected_candidate_for<'a>(
    candidates: &'a [PaletteCandidate],
    visible: &[usize],
    selected: usize,
) -> Option<&'a PaletteCandidate> {
    visible.get(selected).and_then(|idx| candidates.get(*idx))
}
