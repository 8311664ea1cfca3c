use std::time::Duration;

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::bani::find_bani;
use crate::command::{
    ActionId, Command, CommandDispatchResult, CommandOutcome, dispatch, dispatch_advance,
    location_label,
};
use crate::error::AppResult;
use crate::event::{AppEvent, DomainEvent};
use crate::nav::{Step, sleep_until_deadline};
use crate::provider::ContentProvider;

use super::core::App;
use super::event_bus::EventBusRuntime;
use super::policy::recover_forward;
use super::terminal_session::{TerminalSession, TerminalSurface};

struct LoopRuntime {
    redraw_tick: time::Interval,
    needs_redraw: bool,
    loop_event_tx: UnboundedSender<DomainEvent>,
}

enum WaitEvent {
    Event(DomainEvent),
    Closed,
}

enum LoopControl {
    Continue,
    Break,
}

impl<P: ContentProvider> App<P> {
    pub async fn run(&mut self) -> AppResult<()> {
        let mut session = TerminalSession::enter()?;
        let (loop_event_tx, loop_event_rx, mut loop_event_runtime) = EventBusRuntime::spawn();

        let result = self
            .run_loop(&mut session, loop_event_tx, loop_event_rx)
            .await;

        loop_event_runtime.shutdown();
        self.engine.halt();
        session.restore()?;
        tracing::info!(ang = self.engine.page_number(), "viewer stopped");
        result
    }

    /// Drives the viewer until quit or until every sender is gone.
    pub(crate) async fn run_loop<S: TerminalSurface>(
        &mut self,
        session: &mut S,
        loop_event_tx: UnboundedSender<DomainEvent>,
        mut loop_event_rx: UnboundedReceiver<DomainEvent>,
    ) -> AppResult<()> {
        let mut redraw_tick =
            time::interval(Duration::from_millis(self.config.viewer.redraw_interval_ms));
        redraw_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut runtime = LoopRuntime {
            redraw_tick,
            needs_redraw: true,
            loop_event_tx,
        };

        self.load_initial_page(session).await?;

        loop {
            if self.interaction.apply_palette_requests(&mut self.state) {
                runtime.needs_redraw = true;
            }
            if runtime.needs_redraw {
                self.render_frame(session)?;
                runtime.needs_redraw = false;
            }

            let waited = wait_next_event(
                &mut loop_event_rx,
                self.engine.advance_deadline(),
                &mut runtime.redraw_tick,
            )
            .await;
            if matches!(
                self.handle_waited_event(waited, &mut runtime, session)
                    .await?,
                LoopControl::Break
            ) {
                break;
            }
        }
        Ok(())
    }

    async fn load_initial_page<S: TerminalSurface>(&mut self, session: &mut S) -> AppResult<()> {
        let ang = self.engine.page_number();
        self.state.loading = Some(ang);
        self.render_frame(session)?;

        let result = match self.engine.load_page(ang).await {
            Ok(()) => Ok(Step::PageLoaded { from: ang, to: ang }),
            Err(err) => recover_forward(&mut self.engine, &self.config.navigation, ang, err).await,
        };
        self.state.loading = None;

        match result {
            Ok(_) => {
                tracing::info!(ang = self.engine.page_number(), "initial ang loaded");
                self.state
                    .status
                    .info(ActionId::Startup, location_label(&self.engine));
            }
            Err(err) => {
                tracing::warn!(ang, error = %err, "initial ang failed to load");
                self.state.status.error(ActionId::Startup, err.to_string());
            }
        }
        Ok(())
    }

    async fn handle_waited_event<S: TerminalSurface>(
        &mut self,
        waited: WaitEvent,
        runtime: &mut LoopRuntime,
        session: &mut S,
    ) -> AppResult<LoopControl> {
        match waited {
            WaitEvent::Event(DomainEvent::Input(event)) => {
                let input_outcome = self.handle_input_event(event, session)?;
                if input_outcome.quit_requested {
                    tracing::info!("quit requested from keyboard");
                    return Ok(LoopControl::Break);
                }
                if input_outcome.redraw {
                    runtime.needs_redraw = true;
                }
                if let Some(command) = input_outcome.command {
                    let _ = runtime.loop_event_tx.send(DomainEvent::Command(command));
                }
            }
            WaitEvent::Event(DomainEvent::InputError(message)) => {
                tracing::warn!(%message, "terminal input error");
                self.state
                    .status
                    .error(ActionId::Input, format!("input error: {message}"));
                runtime.needs_redraw = true;
            }
            WaitEvent::Event(DomainEvent::Command(command)) => {
                let target = self.load_target(&command);
                self.show_loading(target, session)?;
                let dispatched = dispatch(
                    &mut self.state,
                    command,
                    &mut self.engine,
                    &self.config.navigation,
                    &mut self.interaction.palette.pending_requests,
                )
                .await;
                self.state.loading = None;
                runtime.needs_redraw = true;
                if let Some(result) = self.publish_dispatch(dispatched, runtime)
                    && result.outcome == CommandOutcome::QuitRequested
                {
                    return Ok(LoopControl::Break);
                }
            }
            WaitEvent::Event(DomainEvent::AdvanceDue) => {
                let target = if self.engine.is_paused() {
                    None
                } else {
                    self.engine.next_load_target()
                };
                self.show_loading(target, session)?;
                let dispatched =
                    dispatch_advance(&mut self.state, &mut self.engine, &self.config.navigation)
                        .await;
                self.state.loading = None;
                runtime.needs_redraw = true;
                self.publish_dispatch(dispatched, runtime);
            }
            WaitEvent::Event(DomainEvent::App(event)) => {
                self.handle_app_event(&event);
            }
            WaitEvent::Event(DomainEvent::RedrawTick) => {
                // Only the advance gauge moves between events.
                if self.engine.advance_deadline().is_some() {
                    runtime.needs_redraw = true;
                }
            }
            WaitEvent::Closed => return Ok(LoopControl::Break),
        }
        Ok(LoopControl::Continue)
    }

    /// The ang a command is about to fetch, if any.
    fn load_target(&self, command: &Command) -> Option<u32> {
        match command {
            Command::Next => self.engine.next_load_target(),
            Command::Previous => self.engine.previous_load_target(),
            Command::GotoAng { ang } => Some(*ang),
            Command::LoadBani { name } => find_bani(name).map(|bani| bani.start_ang),
            _ => None,
        }
    }

    fn show_loading<S: TerminalSurface>(
        &mut self,
        target: Option<u32>,
        session: &mut S,
    ) -> AppResult<()> {
        let Some(ang) = target else {
            return Ok(());
        };
        self.state.loading = Some(ang);
        self.render_frame(session)
    }

    fn publish_dispatch(
        &mut self,
        dispatched: AppResult<CommandDispatchResult>,
        runtime: &mut LoopRuntime,
    ) -> Option<CommandDispatchResult> {
        match dispatched {
            Ok(result) => {
                for event in &result.emitted_events {
                    let _ = runtime
                        .loop_event_tx
                        .send(DomainEvent::App(event.clone()));
                }
                Some(result)
            }
            Err(err) => {
                tracing::error!(error = %err, "command dispatch failed");
                let action = self
                    .state
                    .status
                    .last_action_id
                    .unwrap_or(ActionId::Input);
                self.state.status.error(action, err.to_string());
                None
            }
        }
    }

    fn handle_app_event(&mut self, event: &AppEvent) {
        match event {
            AppEvent::PageChanged { from, to, reason } => {
                tracing::info!(from, to, ?reason, "ang changed");
            }
            AppEvent::PauseChanged { paused } => {
                self.state.paused = *paused;
                tracing::info!(paused, "auto-advance toggled");
            }
            AppEvent::ModeChanged { from, to } => {
                tracing::debug!(?from, ?to, "mode changed");
            }
            AppEvent::CommandExecuted { id, outcome } => {
                tracing::debug!(command = id.as_str(), ?outcome, "command executed");
            }
        }
    }
}

async fn wait_next_event(
    loop_event_rx: &mut UnboundedReceiver<DomainEvent>,
    advance_deadline: Option<Instant>,
    redraw_tick: &mut time::Interval,
) -> WaitEvent {
    tokio::select! {
        biased;
        maybe_loop = loop_event_rx.recv() => {
            match maybe_loop {
                Some(event) => WaitEvent::Event(event),
                None => WaitEvent::Closed,
            }
        },
        _ = sleep_until_deadline(advance_deadline) => {
            WaitEvent::Event(DomainEvent::AdvanceDue)
        },
        _ = redraw_tick.tick() => {
            WaitEvent::Event(DomainEvent::RedrawTick)
        }
    }
}
