use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use lru::LruCache;
use reqwest::Client;

use crate::config::ProviderConfig;
use crate::error::{AppError, AppResult};

use super::traits::{ContentProvider, VerseDetail, VerseRef};
use super::wire::{AngResponse, ShabadResponse, TextSelection};

const USER_AGENT: &str = concat!("gbv/", env!("CARGO_PKG_VERSION"));

/// Client for the BaniDB v2 REST API.
///
/// Verses on one ang usually share a handful of shabads, so recent shabad
/// responses are memoized in memory for the life of the process.
pub struct BaniDbProvider {
    client: Client,
    base_url: String,
    selection: TextSelection,
    shabads: Mutex<LruCache<u64, Arc<ShabadResponse>>>,
}

impl BaniDbProvider {
    pub fn new(config: &ProviderConfig) -> AppResult<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;
        let capacity = NonZeroUsize::new(config.shabad_memo_entries).unwrap_or(NonZeroUsize::MIN);

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            selection: TextSelection {
                transliteration_lang: config.transliteration_lang.clone(),
                translation_lang: config.translation_lang.clone(),
                translation_source: config.translation_source.clone(),
            },
            shabads: Mutex::new(LruCache::new(capacity)),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> AppResult<T> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.json::<T>().await?)
    }

    async fn shabad(&self, shabad_id: u64) -> AppResult<Arc<ShabadResponse>> {
        if let Some(hit) = self.memo_get(shabad_id) {
            return Ok(hit);
        }

        let url = format!("{}/shabads/{shabad_id}", self.base_url);
        tracing::debug!(shabad_id, %url, "fetching shabad");
        let shabad = Arc::new(self.get_json::<ShabadResponse>(&url).await?);
        if let Ok(mut memo) = self.shabads.lock() {
            memo.put(shabad_id, Arc::clone(&shabad));
        }
        Ok(shabad)
    }

    fn memo_get(&self, shabad_id: u64) -> Option<Arc<ShabadResponse>> {
        let mut memo = self.shabads.lock().ok()?;
        memo.get(&shabad_id).cloned()
    }
}

impl ContentProvider for BaniDbProvider {
    async fn fetch_page(&self, ang: u32) -> AppResult<Vec<VerseRef>> {
        let url = format!("{}/angs/{ang}", self.base_url);
        tracing::debug!(ang, %url, "fetching ang");
        let page = self
            .get_json::<AngResponse>(&url)
            .await
            .map_err(|err| AppError::page_not_found(ang, err))?;

        let (refs, dropped) = page.into_refs();
        if dropped > 0 {
            tracing::warn!(ang, dropped, "ang entries without verse or shabad id skipped");
        }
        Ok(refs)
    }

    async fn fetch_verse_detail(&self, verse: &VerseRef) -> AppResult<VerseDetail> {
        let shabad = self
            .shabad(verse.shabad_id)
            .await
            .map_err(|err| AppError::verse_detail(verse.verse_id, err))?;

        shabad
            .find_verse(verse.verse_id)
            .map(|found| found.to_detail(&self.selection))
            .ok_or_else(|| {
                AppError::verse_detail(
                    verse.verse_id,
                    format!("not present in shabad {}", verse.shabad_id),
                )
            })
    }
}
