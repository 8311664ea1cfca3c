use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::error::{AppError, AppResult};

use super::traits::{ContentProvider, VerseDetail, VerseRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StubEntry {
    Complete,
    MissingTranslation,
    Failing,
}

/// In-memory provider. Verse ids encode `ang * 1000 + index` and the shabad
/// id is the ang, so details can be resolved without extra tables.
pub(crate) struct StubProvider {
    pages: HashMap<u32, Vec<StubEntry>>,
    missing: Vec<u32>,
    default_verses: usize,
    page_calls: RefCell<Vec<u32>>,
    detail_calls: Cell<usize>,
}

impl StubProvider {
    pub(crate) fn uniform(default_verses: usize) -> Self {
        Self {
            pages: HashMap::new(),
            missing: Vec::new(),
            default_verses,
            page_calls: RefCell::new(Vec::new()),
            detail_calls: Cell::new(0),
        }
    }

    pub(crate) fn with_page(mut self, ang: u32, entries: Vec<StubEntry>) -> Self {
        self.pages.insert(ang, entries);
        self
    }

    pub(crate) fn with_missing_page(mut self, ang: u32) -> Self {
        self.missing.push(ang);
        self
    }

    pub(crate) fn page_calls(&self) -> Vec<u32> {
        self.page_calls.borrow().clone()
    }

    pub(crate) fn detail_calls(&self) -> usize {
        self.detail_calls.get()
    }

    fn entries(&self, ang: u32) -> Option<Vec<StubEntry>> {
        if self.missing.contains(&ang) {
            return None;
        }
        match self.pages.get(&ang) {
            Some(entries) => Some(entries.clone()),
            None => Some(vec![StubEntry::Complete; self.default_verses]),
        }
    }
}

pub(crate) fn stub_gurmukhi(ang: u32, index: usize) -> String {
    format!("gurmukhi {ang}:{index}")
}

impl ContentProvider for StubProvider {
    async fn fetch_page(&self, ang: u32) -> AppResult<Vec<VerseRef>> {
        self.page_calls.borrow_mut().push(ang);
        let entries = self
            .entries(ang)
            .ok_or_else(|| AppError::page_not_found(ang, "stub has no such ang"))?;
        Ok((0..entries.len())
            .map(|index| VerseRef {
                verse_id: u64::from(ang) * 1000 + index as u64,
                shabad_id: u64::from(ang),
            })
            .collect())
    }

    async fn fetch_verse_detail(&self, verse: &VerseRef) -> AppResult<VerseDetail> {
        self.detail_calls.set(self.detail_calls.get() + 1);
        let ang = verse.shabad_id as u32;
        let index = (verse.verse_id % 1000) as usize;
        let entry = self
            .entries(ang)
            .and_then(|entries| entries.get(index).copied())
            .ok_or_else(|| AppError::verse_detail(verse.verse_id, "unknown verse"))?;

        match entry {
            StubEntry::Complete => Ok(VerseDetail {
                gurmukhi: Some(stub_gurmukhi(ang, index)),
                transliteration: Some(format!("translit {ang}:{index}")),
                translation: Some(format!("translation {ang}:{index}")),
            }),
            StubEntry::MissingTranslation => Ok(VerseDetail {
                gurmukhi: Some(stub_gurmukhi(ang, index)),
                transliteration: Some(format!("translit {ang}:{index}")),
                translation: None,
            }),
            StubEntry::Failing => Err(AppError::verse_detail(verse.verse_id, "stub failure")),
        }
    }
}
