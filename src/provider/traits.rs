use std::future::Future;

use crate::error::AppResult;

/// Points at one verse of the corpus. The shabad id is what the content API
/// keys full verse detail on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VerseRef {
    pub verse_id: u64,
    pub shabad_id: u64,
}

/// Raw verse detail as served. Any field may be missing; deciding what is
/// displayable is left to the navigation engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerseDetail {
    pub gurmukhi: Option<String>,
    pub transliteration: Option<String>,
    pub translation: Option<String>,
}

pub trait ContentProvider {
    /// Lists the verses printed on `ang`, in page order.
    ///
    /// Fails with `AppError::PageNotFound` for unknown pages and transport
    /// failures alike.
    fn fetch_page(&self, ang: u32) -> impl Future<Output = AppResult<Vec<VerseRef>>>;

    /// Fails with `AppError::VerseDetail` when the lookup itself fails.
    fn fetch_verse_detail(&self, verse: &VerseRef) -> impl Future<Output = AppResult<VerseDetail>>;
}
