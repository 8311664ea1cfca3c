use crossterm::event::Event;

use crate::app::Mode;
use crate::command::{ActionId, Command, CommandOutcome};

/// Describes *why* the visible ang changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavReason {
    /// Next/previous crossed a page boundary.
    Step,
    /// The advance timer fired.
    AutoAdvance,
    /// goto-ang.
    Jump,
    /// Bani selection. Carries the bani name.
    Bani(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    CommandExecuted {
        id: ActionId,
        outcome: CommandOutcome,
    },
    PageChanged {
        from: u32,
        to: u32,
        reason: NavReason,
    },
    PauseChanged {
        paused: bool,
    },
    ModeChanged {
        from: Mode,
        to: Mode,
    },
}

#[derive(Debug)]
pub(crate) enum DomainEvent {
    Input(Event),
    InputError(String),
    Command(Command),
    App(AppEvent),
    AdvanceDue,
    RedrawTick,
}
