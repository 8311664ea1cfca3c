use std::collections::VecDeque;
use std::time::Duration;

use crate::config::Config;
use crate::nav::NavigationEngine;
use crate::palette::{PaletteManager, PaletteRegistry};
use crate::provider::ContentProvider;

use super::state::{AppState, PaletteRequest};

#[derive(Default)]
pub struct PaletteSubsystem {
    pub registry: PaletteRegistry,
    pub manager: PaletteManager,
    pub pending_requests: VecDeque<PaletteRequest>,
}

#[derive(Default)]
pub struct InteractionSubsystem {
    pub palette: PaletteSubsystem,
}

pub struct App<P: ContentProvider> {
    pub state: AppState,
    pub engine: NavigationEngine<P>,
    pub interaction: InteractionSubsystem,
    pub config: Config,
}

impl<P: ContentProvider> App<P> {
    /// Nothing is fetched here; the first ang loads when the loop starts.
    pub fn new(provider: P, config: Config) -> Self {
        let config = config.sanitized();
        let viewer = &config.viewer;
        let engine = NavigationEngine::new(provider, Duration::from_millis(viewer.auto_advance_ms))
            .with_paused(viewer.start_paused)
            .with_current_page(viewer.start_ang);

        let state = AppState {
            paused: engine.is_paused(),
            ..AppState::default()
        };

        Self {
            state,
            engine,
            interaction: InteractionSubsystem::default(),
            config,
        }
    }
}
