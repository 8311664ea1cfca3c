use std::collections::VecDeque;

use crate::app::{AppState, Mode, PaletteRequest};
use crate::config::NavigationConfig;
use crate::error::AppResult;
use crate::event::{AppEvent, NavReason};
use crate::nav::NavigationEngine;
use crate::provider::ContentProvider;

use super::core::{auto_advance, goto_ang, load_bani, next, pause, previous, resume, toggle_pause};
use super::types::{ActionId, Command, CommandOutcome};

#[derive(Debug, Clone)]
pub struct CommandDispatchResult {
    pub outcome: CommandOutcome,
    pub emitted_events: Vec<AppEvent>,
}

/// Snapshot taken before a command runs, diffed afterwards into events.
#[derive(Debug, Clone, Copy)]
struct Before {
    page: u32,
    loaded: bool,
    paused: bool,
    mode: Mode,
}

impl Before {
    fn capture<P: ContentProvider>(app: &AppState, engine: &NavigationEngine<P>) -> Self {
        Self {
            page: engine.page_number(),
            loaded: engine.is_loaded(),
            paused: engine.is_paused(),
            mode: app.mode,
        }
    }
}

pub async fn dispatch<P: ContentProvider>(
    app: &mut AppState,
    cmd: Command,
    engine: &mut NavigationEngine<P>,
    policy: &NavigationConfig,
    palette_requests: &mut VecDeque<PaletteRequest>,
) -> AppResult<CommandDispatchResult> {
    let before = Before::capture(app, engine);
    let action_id = cmd.action_id();
    let reason = nav_reason(&cmd);

    let outcome = match cmd {
        Command::Next => next(app, engine, policy).await,
        Command::Previous => previous(app, engine).await,
        Command::Pause => pause(app, engine),
        Command::Resume => resume(app, engine),
        Command::TogglePause => toggle_pause(app, engine),
        Command::GotoAng { ang } => goto_ang(app, engine, ang).await,
        Command::LoadBani { name } => load_bani(app, engine, &name).await,
        Command::OpenPalette { kind, seed } => {
            palette_requests.push_back(PaletteRequest::Open { kind, seed });
            app.status.info(ActionId::OpenPalette, "opening palette");
            Ok(CommandOutcome::Applied)
        }
        Command::ClosePalette => {
            palette_requests.push_back(PaletteRequest::Close);
            app.status.info(ActionId::ClosePalette, "closing palette");
            Ok(CommandOutcome::Applied)
        }
        Command::Cancel => {
            if app.mode == Mode::Palette {
                palette_requests.push_back(PaletteRequest::Close);
            } else {
                app.mode = Mode::Normal;
            }
            app.status.info(ActionId::Cancel, "canceled current mode");
            Ok(CommandOutcome::Applied)
        }
        Command::Quit => {
            app.status.info(ActionId::Quit, "quit requested");
            Ok(CommandOutcome::QuitRequested)
        }
    }?;

    Ok(finish(app, engine, before, action_id, outcome, reason))
}

/// Runs the pending auto-advance if its deadline has passed.
pub async fn dispatch_advance<P: ContentProvider>(
    app: &mut AppState,
    engine: &mut NavigationEngine<P>,
    policy: &NavigationConfig,
) -> AppResult<CommandDispatchResult> {
    let before = Before::capture(app, engine);
    let outcome = auto_advance(app, engine, policy).await?;
    Ok(finish(
        app,
        engine,
        before,
        ActionId::AutoAdvance,
        outcome,
        NavReason::AutoAdvance,
    ))
}

fn finish<P: ContentProvider>(
    app: &mut AppState,
    engine: &NavigationEngine<P>,
    before: Before,
    id: ActionId,
    outcome: CommandOutcome,
    reason: NavReason,
) -> CommandDispatchResult {
    let mut emitted_events = Vec::new();
    let page = engine.page_number();
    if page != before.page || (engine.is_loaded() && !before.loaded) {
        emitted_events.push(AppEvent::PageChanged {
            from: before.page,
            to: page,
            reason,
        });
    }
    if engine.is_paused() != before.paused {
        app.paused = engine.is_paused();
        emitted_events.push(AppEvent::PauseChanged {
            paused: engine.is_paused(),
        });
    }
    if app.mode != before.mode {
        emitted_events.push(AppEvent::ModeChanged {
            from: before.mode,
            to: app.mode,
        });
    }
    emitted_events.push(AppEvent::CommandExecuted { id, outcome });

    CommandDispatchResult {
        outcome,
        emitted_events,
    }
}

fn nav_reason(command: &Command) -> NavReason {
    match command {
        Command::Next | Command::Previous => NavReason::Step,
        Command::LoadBani { name } => NavReason::Bani(name.trim().to_string()),
        _ => NavReason::Jump,
    }
}
