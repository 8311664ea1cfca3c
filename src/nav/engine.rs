use std::time::Duration;

use tokio::time::Instant;

use crate::error::{AppError, AppResult};
use crate::provider::ContentProvider;

use super::TOTAL_ANGS;
use super::page::{PageBuffer, Verse};
use super::timer::AdvanceTimer;

/// What a navigation call changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Cursor moved within the loaded page.
    Moved,
    PageLoaded { from: u32, to: u32 },
    Unchanged,
}

impl Step {
    pub fn changed(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

#[derive(Debug)]
struct LoadedPage {
    buffer: PageBuffer,
    cursor: usize,
}

impl LoadedPage {
    fn verse(&self) -> Option<&Verse> {
        self.buffer.get(self.cursor)
    }
}

/// Ang/verse cursor with a single pending auto-advance deadline.
///
/// Until the first successful load there is no cursor; `next` then retries
/// the current ang. A failed load leaves the visible state as it was.
pub struct NavigationEngine<P> {
    provider: P,
    current_page: u32,
    loaded: Option<LoadedPage>,
    paused: bool,
    timer: AdvanceTimer,
}

impl<P: ContentProvider> NavigationEngine<P> {
    pub fn new(provider: P, interval: Duration) -> Self {
        Self {
            provider,
            current_page: 1,
            loaded: None,
            paused: false,
            timer: AdvanceTimer::new(interval),
        }
    }

    pub fn with_paused(mut self, paused: bool) -> Self {
        self.paused = paused;
        self
    }

    pub fn with_current_page(mut self, ang: u32) -> Self {
        if (1..=TOTAL_ANGS).contains(&ang) {
            self.current_page = ang;
        }
        self
    }

    pub async fn load_page(&mut self, ang: u32) -> AppResult<()> {
        if !(1..=TOTAL_ANGS).contains(&ang) {
            return Err(AppError::page_not_found(
                ang,
                format!("outside 1..={TOTAL_ANGS}"),
            ));
        }

        self.timer.cancel();
        let buffer = self.fetch_buffer(ang).await?;
        tracing::info!(ang, verses = buffer.len(), "ang loaded");

        self.current_page = ang;
        self.loaded = Some(LoadedPage { buffer, cursor: 0 });
        self.show_current();
        Ok(())
    }

    async fn fetch_buffer(&self, ang: u32) -> AppResult<PageBuffer> {
        let refs = self.provider.fetch_page(ang).await?;
        let mut verses = Vec::with_capacity(refs.len());
        let mut incomplete = 0usize;

        for verse_ref in &refs {
            match self.provider.fetch_verse_detail(verse_ref).await {
                Ok(detail) => match Verse::from_detail(detail) {
                    Some(verse) => verses.push(verse),
                    None => incomplete += 1,
                },
                Err(err) => {
                    tracing::warn!(ang, verse_id = verse_ref.verse_id, error = %err, "verse skipped");
                }
            }
        }

        if incomplete > 0 {
            tracing::debug!(ang, incomplete, "verses without all three texts filtered");
        }
        PageBuffer::new(ang, verses).ok_or_else(|| AppError::empty_page(ang))
    }

    pub async fn next(&mut self) -> AppResult<Step> {
        let Some((cursor, len)) = self.position() else {
            let ang = self.current_page;
            self.load_page(ang).await?;
            return Ok(Step::PageLoaded { from: ang, to: ang });
        };

        if cursor + 1 < len {
            self.set_cursor(cursor + 1);
            self.show_current();
            return Ok(Step::Moved);
        }

        let from = self.current_page;
        let to = following_ang(from);
        self.load_page(to).await?;
        Ok(Step::PageLoaded { from, to })
    }

    pub async fn previous(&mut self) -> AppResult<Step> {
        let Some((cursor, _)) = self.position() else {
            return Ok(Step::Unchanged);
        };

        if cursor > 0 {
            self.set_cursor(cursor - 1);
            self.show_current();
            return Ok(Step::Moved);
        }
        if self.current_page <= 1 {
            return Ok(Step::Unchanged);
        }

        let from = self.current_page;
        let to = from - 1;
        self.load_page(to).await?;
        if let Some(loaded) = self.loaded.as_mut() {
            loaded.cursor = loaded.buffer.last_index();
        }
        self.show_current();
        Ok(Step::PageLoaded { from, to })
    }

    /// Jumps to the first verse of `ang`.
    pub async fn jump_to(&mut self, ang: u32) -> AppResult<Step> {
        let from = self.current_page;
        self.load_page(ang).await?;
        Ok(Step::PageLoaded { from, to: ang })
    }

    /// Returns false when already paused.
    pub fn pause(&mut self) -> bool {
        if self.paused {
            return false;
        }
        self.paused = true;
        self.timer.cancel();
        tracing::debug!(ang = self.current_page, "auto-advance paused");
        true
    }

    /// Returns false when auto-advance is already running. Also restarts the
    /// timer after a failed forward load left it stopped.
    pub fn resume(&mut self) -> bool {
        if !self.paused && !self.is_stalled() {
            return false;
        }
        self.paused = false;
        self.show_current();
        tracing::debug!(ang = self.current_page, "auto-advance resumed");
        true
    }

    /// Returns the new paused flag.
    pub fn toggle_pause(&mut self) -> bool {
        if self.paused || self.is_stalled() {
            self.resume();
        } else {
            self.pause();
        }
        self.paused
    }

    /// Advances once if the pending deadline has passed. Stale or cancelled
    /// fires are ignored.
    pub async fn on_advance_timer(&mut self) -> AppResult<Step> {
        if self.paused || !self.timer.take_due(Instant::now()) {
            return Ok(Step::Unchanged);
        }
        self.next().await
    }

    /// Cancels the pending advance. Used on shutdown.
    pub fn halt(&mut self) {
        self.timer.cancel();
    }

    pub fn current_verse(&self) -> Option<&Verse> {
        self.loaded.as_ref().and_then(LoadedPage::verse)
    }

    pub fn page_number(&self) -> u32 {
        self.current_page
    }

    pub fn cursor_position(&self) -> Option<usize> {
        self.loaded.as_ref().map(|loaded| loaded.cursor)
    }

    pub fn buffer_size(&self) -> usize {
        self.loaded
            .as_ref()
            .map(|loaded| loaded.buffer.len())
            .unwrap_or(0)
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    /// Whether an auto-advance is pending.
    pub fn is_advancing(&self) -> bool {
        self.timer.is_armed()
    }

    pub fn advance_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    pub fn advance_interval(&self) -> Duration {
        self.timer.interval()
    }

    /// Share of the page shown so far, counting the current verse.
    pub fn progress(&self) -> Option<f64> {
        self.position()
            .map(|(cursor, len)| (cursor + 1) as f64 / len as f64)
    }

    /// Fraction of the interval elapsed toward the pending advance.
    pub fn advance_progress(&self, now: Instant) -> Option<f64> {
        let deadline = self.timer.deadline()?;
        let interval = self.timer.interval().as_secs_f64();
        if interval <= 0.0 {
            return Some(1.0);
        }
        let remaining = deadline.saturating_duration_since(now).as_secs_f64();
        Some((1.0 - remaining / interval).clamp(0.0, 1.0))
    }

    /// The ang `next` would fetch, or `None` when it only moves the cursor.
    pub fn next_load_target(&self) -> Option<u32> {
        match self.position() {
            None => Some(self.current_page),
            Some((cursor, len)) if cursor + 1 >= len => Some(following_ang(self.current_page)),
            Some(_) => None,
        }
    }

    /// The ang `previous` would fetch, or `None` when it stays on this page.
    pub fn previous_load_target(&self) -> Option<u32> {
        match self.position() {
            Some((0, _)) if self.current_page > 1 => Some(self.current_page - 1),
            _ => None,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    fn position(&self) -> Option<(usize, usize)> {
        self.loaded
            .as_ref()
            .map(|loaded| (loaded.cursor, loaded.buffer.len()))
    }

    /// Unpaused with a verse on screen but nothing pending.
    fn is_stalled(&self) -> bool {
        !self.paused && self.loaded.is_some() && !self.timer.is_armed()
    }

    fn set_cursor(&mut self, cursor: usize) {
        if let Some(loaded) = self.loaded.as_mut() {
            loaded.cursor = cursor.min(loaded.buffer.last_index());
        }
    }

    /// Every display re-arms the advance unless paused.
    fn show_current(&mut self) {
        if self.paused || self.loaded.is_none() {
            self.timer.cancel();
        } else {
            self.timer.arm(Instant::now());
        }
    }
}

pub fn following_ang(ang: u32) -> u32 {
    if ang >= TOTAL_ANGS { 1 } else { ang + 1 }
}
