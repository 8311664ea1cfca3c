use crate::config::{LoadErrorPolicy, NavigationConfig};
use crate::error::{AppError, AppResult};
use crate::nav::{NavigationEngine, Step, following_ang};
use crate::provider::ContentProvider;

/// Applies `navigation.on_load_error` to a failed forward step from `from`.
///
/// Under `skip`, empty angs are passed over up to `max_skip` times. Every
/// other failure, and the last empty ang, is returned to the caller.
pub(crate) async fn recover_forward<P: ContentProvider>(
    engine: &mut NavigationEngine<P>,
    policy: &NavigationConfig,
    from: u32,
    err: AppError,
) -> AppResult<Step> {
    if policy.on_load_error != LoadErrorPolicy::Skip {
        return Err(err);
    }
    let Some(mut empty) = empty_page_ang(&err) else {
        return Err(err);
    };

    for attempt in 1..=policy.max_skip {
        let target = following_ang(empty);
        tracing::warn!(skipped = empty, target, attempt, "skipping ang without verses");
        match engine.load_page(target).await {
            Ok(()) => return Ok(Step::PageLoaded { from, to: target }),
            Err(next_err) => match empty_page_ang(&next_err) {
                Some(ang) => empty = ang,
                None => return Err(next_err),
            },
        }
    }

    tracing::warn!(last = empty, max_skip = policy.max_skip, "skip budget exhausted");
    Err(AppError::empty_page(empty))
}

fn empty_page_ang(err: &AppError) -> Option<u32> {
    match err {
        AppError::EmptyPage { ang } => Some(*ang),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::config::{LoadErrorPolicy, NavigationConfig};
    use crate::error::AppError;
    use crate::nav::{NavigationEngine, Step};
    use crate::provider::stub::StubProvider;

    use super::recover_forward;

    fn skip_policy(max_skip: u32) -> NavigationConfig {
        NavigationConfig {
            on_load_error: LoadErrorPolicy::Skip,
            max_skip,
        }
    }

    async fn engine_at_end_of(ang: u32, provider: StubProvider) -> NavigationEngine<StubProvider> {
        let mut engine = NavigationEngine::new(provider, Duration::from_secs(5));
        engine.load_page(ang).await.expect("start ang should load");
        while engine.next_load_target().is_none() {
            engine.next().await.expect("next within page");
        }
        engine
    }

    #[tokio::test]
    async fn halt_returns_the_error_untouched() {
        let provider = StubProvider::uniform(2).with_page(2, Vec::new());
        let mut engine = engine_at_end_of(1, provider).await;
        let err = engine.next().await.expect_err("ang 2 is empty");

        let result = recover_forward(&mut engine, &NavigationConfig::default(), 1, err).await;

        assert!(matches!(result, Err(AppError::EmptyPage { ang: 2 })));
        assert_eq!(engine.page_number(), 1);
    }

    #[tokio::test]
    async fn skip_passes_over_empty_angs() {
        let provider = StubProvider::uniform(2)
            .with_page(2, Vec::new())
            .with_page(3, Vec::new());
        let mut engine = engine_at_end_of(1, provider).await;
        let err = engine.next().await.expect_err("ang 2 is empty");

        let step = recover_forward(&mut engine, &skip_policy(3), 1, err)
            .await
            .expect("ang 4 should load");

        assert_eq!(step, Step::PageLoaded { from: 1, to: 4 });
        assert_eq!(engine.page_number(), 4);
        assert_eq!(engine.cursor_position(), Some(0));
    }

    #[tokio::test]
    async fn skip_is_bounded_by_max_skip() {
        let provider = StubProvider::uniform(2)
            .with_page(2, Vec::new())
            .with_page(3, Vec::new())
            .with_page(4, Vec::new());
        let mut engine = engine_at_end_of(1, provider).await;
        let err = engine.next().await.expect_err("ang 2 is empty");

        let result = recover_forward(&mut engine, &skip_policy(2), 1, err).await;

        assert!(matches!(result, Err(AppError::EmptyPage { ang: 4 })));
        assert_eq!(engine.page_number(), 1);
        assert_eq!(engine.provider().page_calls(), vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn skip_does_not_mask_fetch_failures() {
        let provider = StubProvider::uniform(2).with_missing_page(2);
        let mut engine = engine_at_end_of(1, provider).await;
        let err = engine.next().await.expect_err("ang 2 is missing");

        let result = recover_forward(&mut engine, &skip_policy(3), 1, err).await;

        assert!(matches!(result, Err(AppError::PageNotFound { ang: 2, .. })));
        assert_eq!(engine.provider().page_calls(), vec![1, 2]);
    }
}
