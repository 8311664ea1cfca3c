use crate::app::{AppState, recover_forward};
use crate::bani::find_bani;
use crate::config::NavigationConfig;
use crate::error::{AppError, AppResult};
use crate::nav::{NavigationEngine, Step};
use crate::provider::ContentProvider;

use super::types::{ActionId, CommandOutcome};

pub(crate) async fn next<P: ContentProvider>(
    app: &mut AppState,
    engine: &mut NavigationEngine<P>,
    policy: &NavigationConfig,
) -> AppResult<CommandOutcome> {
    let from = engine.page_number();
    let result = match engine.next().await {
        Ok(step) => Ok(step),
        Err(err) => recover_forward(engine, policy, from, err).await,
    };
    Ok(report_step(app, engine, ActionId::Next, result))
}

pub(crate) async fn auto_advance<P: ContentProvider>(
    app: &mut AppState,
    engine: &mut NavigationEngine<P>,
    policy: &NavigationConfig,
) -> AppResult<CommandOutcome> {
    let from = engine.page_number();
    let result = match engine.on_advance_timer().await {
        Ok(Step::Unchanged) => return Ok(CommandOutcome::Noop),
        Ok(step) => Ok(step),
        Err(err) => recover_forward(engine, policy, from, err).await,
    };
    Ok(report_step(app, engine, ActionId::AutoAdvance, result))
}

pub(crate) async fn previous<P: ContentProvider>(
    app: &mut AppState,
    engine: &mut NavigationEngine<P>,
) -> AppResult<CommandOutcome> {
    let result = engine.previous().await;
    Ok(report_step(app, engine, ActionId::Previous, result))
}

pub(crate) async fn goto_ang<P: ContentProvider>(
    app: &mut AppState,
    engine: &mut NavigationEngine<P>,
    ang: u32,
) -> AppResult<CommandOutcome> {
    let result = engine.jump_to(ang).await;
    Ok(report_step(app, engine, ActionId::GotoAng, result))
}

pub(crate) async fn load_bani<P: ContentProvider>(
    app: &mut AppState,
    engine: &mut NavigationEngine<P>,
    name: &str,
) -> AppResult<CommandOutcome> {
    let Some(bani) = find_bani(name) else {
        app.status
            .error(ActionId::LoadBani, format!("unknown bani: {}", name.trim()));
        return Ok(CommandOutcome::Noop);
    };

    match engine.jump_to(bani.start_ang).await {
        Ok(_) => {
            tracing::info!(bani = bani.name, ang = bani.start_ang, "bani loaded");
            app.status.info(
                ActionId::LoadBani,
                format!("Loaded {} ({})", bani.name, bani.range_label()),
            );
            Ok(CommandOutcome::Applied)
        }
        Err(err) => Ok(report_step(app, engine, ActionId::LoadBani, Err(err))),
    }
}

pub(crate) fn pause<P: ContentProvider>(
    app: &mut AppState,
    engine: &mut NavigationEngine<P>,
) -> AppResult<CommandOutcome> {
    if !engine.pause() {
        app.status.info(ActionId::Pause, "already paused");
        return Ok(CommandOutcome::Noop);
    }
    app.status.info(ActionId::Pause, "paused");
    Ok(CommandOutcome::Applied)
}

pub(crate) fn resume<P: ContentProvider>(
    app: &mut AppState,
    engine: &mut NavigationEngine<P>,
) -> AppResult<CommandOutcome> {
    if !engine.resume() {
        app.status.info(ActionId::Resume, "auto-advance already running");
        return Ok(CommandOutcome::Noop);
    }
    app.status.info(ActionId::Resume, "resumed");
    Ok(CommandOutcome::Applied)
}

pub(crate) fn toggle_pause<P: ContentProvider>(
    app: &mut AppState,
    engine: &mut NavigationEngine<P>,
) -> AppResult<CommandOutcome> {
    let paused = engine.toggle_pause();
    let message = if paused { "paused" } else { "resumed" };
    app.status.info(ActionId::TogglePause, message);
    Ok(CommandOutcome::Applied)
}

pub(crate) fn location_label<P: ContentProvider>(engine: &NavigationEngine<P>) -> String {
    match engine.cursor_position() {
        Some(cursor) => format!(
            "Ang {}, line {} of {}",
            engine.page_number(),
            cursor + 1,
            engine.buffer_size()
        ),
        None => format!("Ang {} (not loaded)", engine.page_number()),
    }
}

/// Turns a navigation result into a status line. Load failures are shown,
/// never propagated; the engine keeps its previous state.
fn report_step<P: ContentProvider>(
    app: &mut AppState,
    engine: &NavigationEngine<P>,
    action: ActionId,
    result: AppResult<Step>,
) -> CommandOutcome {
    match result {
        Ok(Step::Unchanged) => {
            let message = match action {
                ActionId::Previous if engine.is_loaded() => "already at the first verse",
                ActionId::Previous => "nothing loaded yet",
                _ => "nothing to do",
            };
            app.status.info(action, message);
            CommandOutcome::Noop
        }
        Ok(_) => {
            app.status.info(action, location_label(engine));
            CommandOutcome::Applied
        }
        Err(err) => {
            log_failure(action, &err);
            app.status.error(action, err.to_string());
            CommandOutcome::Noop
        }
    }
}

fn log_failure(action: ActionId, err: &AppError) {
    if err.is_page_failure() {
        tracing::warn!(action = action.as_str(), error = %err, "navigation halted");
    } else {
        tracing::debug!(action = action.as_str(), error = %err, "navigation rejected");
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::app::AppState;
    use crate::command::{ActionId, CommandOutcome};
    use crate::config::NavigationConfig;
    use crate::nav::NavigationEngine;
    use crate::provider::stub::StubProvider;

    use super::{goto_ang, load_bani, next, previous, resume};

    fn engine(provider: StubProvider) -> NavigationEngine<StubProvider> {
        NavigationEngine::new(provider, Duration::from_secs(5))
    }

    #[tokio::test]
    async fn next_reports_location() {
        let mut app = AppState::default();
        let mut nav = engine(StubProvider::uniform(3));
        nav.load_page(1).await.expect("ang 1 should load");

        let outcome = next(&mut app, &mut nav, &NavigationConfig::default())
            .await
            .expect("next should not fail");

        assert_eq!(outcome, CommandOutcome::Applied);
        assert_eq!(app.status.message, "Ang 1, line 2 of 3");
    }

    #[tokio::test]
    async fn failed_load_is_shown_not_propagated() {
        let mut app = AppState::default();
        let mut nav = engine(StubProvider::uniform(1).with_missing_page(2));
        nav.load_page(1).await.expect("ang 1 should load");

        let outcome = next(&mut app, &mut nav, &NavigationConfig::default())
            .await
            .expect("load failures are reported in status");

        assert_eq!(outcome, CommandOutcome::Noop);
        assert!(app.status.is_error);
        assert!(app.status.message.contains("ang 2"));
        assert_eq!(nav.page_number(), 1);
        assert!(nav.advance_deadline().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn resume_after_failed_load_restarts_auto_advance() {
        let mut app = AppState::default();
        let mut nav = engine(StubProvider::uniform(1).with_missing_page(2));
        nav.load_page(1).await.expect("ang 1 should load");
        next(&mut app, &mut nav, &NavigationConfig::default())
            .await
            .expect("load failures are reported in status");

        let outcome = resume(&mut app, &mut nav).expect("resume");

        assert_eq!(outcome, CommandOutcome::Applied);
        assert_eq!(app.status.message, "resumed");
        assert!(nav.advance_deadline().is_some());
    }

    #[tokio::test]
    async fn previous_at_start_is_noop() {
        let mut app = AppState::default();
        let mut nav = engine(StubProvider::uniform(3));
        nav.load_page(1).await.expect("ang 1 should load");

        let outcome = previous(&mut app, &mut nav).await.expect("previous");

        assert_eq!(outcome, CommandOutcome::Noop);
        assert_eq!(app.status.message, "already at the first verse");
    }

    #[tokio::test]
    async fn goto_out_of_range_is_reported() {
        let mut app = AppState::default();
        let mut nav = engine(StubProvider::uniform(3));

        let outcome = goto_ang(&mut app, &mut nav, 5000).await.expect("goto");

        assert_eq!(outcome, CommandOutcome::Noop);
        assert_eq!(app.status.last_action_id, Some(ActionId::GotoAng));
        assert!(app.status.is_error);
        assert!(nav.provider().page_calls().is_empty());
    }

    #[tokio::test]
    async fn load_bani_jumps_to_start_ang() {
        let mut app = AppState::default();
        let mut nav = engine(StubProvider::uniform(3));

        let outcome = load_bani(&mut app, &mut nav, "Rehras Sahib")
            .await
            .expect("bani");

        assert_eq!(outcome, CommandOutcome::Applied);
        assert_eq!(nav.page_number(), 18);
        assert_eq!(app.status.message, "Loaded Rehras Sahib (Ang 18-20)");

        let unknown = load_bani(&mut app, &mut nav, "nope").await.expect("bani");
        assert_eq!(unknown, CommandOutcome::Noop);
        assert!(app.status.is_error);
        assert_eq!(nav.page_number(), 18);
    }
}
