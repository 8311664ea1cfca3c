use crate::command::ActionId;
use crate::palette::PaletteKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Palette,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteRequest {
    Open {
        kind: PaletteKind,
        seed: Option<String>,
    },
    Close,
}

#[derive(Debug, Clone, Default)]
pub struct StatusState {
    pub message: String,
    pub last_action_id: Option<ActionId>,
    /// Set when the last message reports a failure.
    pub is_error: bool,
}

impl StatusState {
    pub fn info(&mut self, action: ActionId, message: impl Into<String>) {
        self.last_action_id = Some(action);
        self.message = message.into();
        self.is_error = false;
    }

    pub fn error(&mut self, action: ActionId, message: impl Into<String>) {
        self.last_action_id = Some(action);
        self.message = message.into();
        self.is_error = true;
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub mode: Mode,
    pub status: StatusState,
    /// Ang being fetched while the loading overlay is shown.
    pub loading: Option<u32>,
    /// Mirrors the engine so palette providers can read it.
    pub paused: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mode: Mode::Normal,
            status: StatusState::default(),
            loading: None,
            paused: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::command::ActionId;

    use super::StatusState;

    #[test]
    fn status_helpers_track_error_flag() {
        let mut status = StatusState::default();
        status.error(ActionId::Next, "ang 2 could not be fetched");
        assert!(status.is_error);
        assert_eq!(status.last_action_id, Some(ActionId::Next));

        status.info(ActionId::Pause, "paused");
        assert!(!status.is_error);
        assert_eq!(status.message, "paused");
    }
}
