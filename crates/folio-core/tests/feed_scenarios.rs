//! Functional tests for the project feed's source-of-truth policy.
//!
//! These tests drive a ProjectFeed over a scripted source and check the
//! published view:
//! - remote records win whenever there is at least one
//! - an empty or failed remote answer falls back to the filtered catalog
//! - the two advisory notices are never confused
//! - the unfiltered query is cached and concurrent misses share one fetch
//! - a resolution overtaken by a newer intent is never published

use folio_catalog::{Catalog, ProjectCategory};
use folio_core::{FeedNotice, FilterIntent, ProjectCache};
use folio_test_utils::{eight_project_catalog, feed_with, init_tracing, record, Query, StubSource};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::sync::Arc;
use std::time::Duration;

fn ids(records: &[folio_catalog::ProjectRecord]) -> Vec<&str> {
    records.iter().map(|r| r.id.as_str()).collect()
}

/// Scenario: no credential, no filter. All eight static records, no notice.
#[tokio::test]
async fn unconfigured_source_serves_whole_catalog() {
    init_tracing();
    let source = Arc::new(StubSource::unconfigured());
    let feed = feed_with(Arc::clone(&source), eight_project_catalog());

    let view = feed.set_intent(FilterIntent::all()).await;

    assert_eq!(view.records.len(), 8);
    assert!(!view.using_remote);
    assert!(!view.is_loading);
    assert_eq!(view.error, None);
}

/// Scenario: no credential, category `web`. Exactly the three web records.
#[tokio::test]
async fn unconfigured_source_filters_catalog_by_category() {
    let source = Arc::new(StubSource::unconfigured());
    let feed = feed_with(Arc::clone(&source), eight_project_catalog());

    let view = feed.set_intent(FilterIntent::by_category(ProjectCategory::Web)).await;

    assert_eq!(ids(&view.records), vec!["w1", "w2", "w3"]);
    assert!(!view.using_remote);
    assert_eq!(view.error, None);
    assert_eq!(source.calls(&Query::Category(ProjectCategory::Web)), 1);
}

/// Scenario: configured source returns two records. Static catalog ignored.
#[tokio::test]
async fn remote_records_replace_catalog_entirely() {
    let source = Arc::new(StubSource::configured().respond(
        Query::All,
        Ok(vec![
            record("remote-1", ProjectCategory::Saas),
            record("remote-2", ProjectCategory::Mobile),
        ]),
    ));
    let feed = feed_with(Arc::clone(&source), eight_project_catalog());

    let view = feed.set_intent(FilterIntent::all()).await;

    assert_eq!(ids(&view.records), vec!["remote-1", "remote-2"]);
    assert!(view.using_remote);
    assert_eq!(view.error, None);
}

/// Scenario: configured source, backend answers with a failure status.
/// Catalog is served with the generic notice, not the configuration one.
#[tokio::test]
async fn backend_failure_falls_back_with_generic_notice() {
    let source = Arc::new(StubSource::configured().fail(Query::All, 503));
    let feed = feed_with(Arc::clone(&source), eight_project_catalog());

    let view = feed.set_intent(FilterIntent::all()).await;

    assert_eq!(view.records.len(), 8);
    assert!(!view.using_remote);
    assert_eq!(view.error, Some(FeedNotice::LocalFallback));
}

/// The configuration notice only appears when nothing is left to show.
#[tokio::test]
async fn configuration_notice_requires_empty_fallback() {
    let feed = feed_with(Arc::new(StubSource::unconfigured()), eight_project_catalog());

    let view = feed.set_intent(FilterIntent::by_tag("Unknown")).await;
    assert!(view.records.is_empty());
    assert_eq!(view.error, Some(FeedNotice::NotConfigured));

    let view = feed.set_intent(FilterIntent::by_tag("Fintech")).await;
    assert_eq!(ids(&view.records), vec!["s1"]);
    assert_eq!(view.error, None);
}

/// An empty catalog and no credential still yields a settled, empty view.
#[tokio::test]
async fn empty_catalog_and_no_credential() {
    let feed = feed_with(Arc::new(StubSource::unconfigured()), Catalog::default());

    let view = feed.set_intent(FilterIntent::all()).await;

    assert!(view.records.is_empty());
    assert!(!view.is_loading);
    assert_eq!(view.error, Some(FeedNotice::NotConfigured));
}

/// A panic inside the source is contained and routed to the fallback path.
#[tokio::test]
async fn panicking_source_is_contained() {
    let source = Arc::new(StubSource::configured().panic_on(Query::Category(ProjectCategory::Mobile)));
    let feed = feed_with(Arc::clone(&source), eight_project_catalog());

    let view = feed.set_intent(FilterIntent::by_category(ProjectCategory::Mobile)).await;

    assert_eq!(ids(&view.records), vec!["m1", "m2"]);
    assert!(!view.using_remote);
    assert_eq!(view.error, Some(FeedNotice::LocalFallback));
}

/// Unfiltered resolutions share the cache across feeds; filtered ones never touch it.
#[tokio::test]
async fn only_unfiltered_queries_are_cached() {
    let source = Arc::new(
        StubSource::configured()
            .respond(Query::All, Ok(vec![record("r1", ProjectCategory::Web)]))
            .respond(Query::Tag("Web".into()), Ok(vec![record("r2", ProjectCategory::Web)])),
    );
    let cache = ProjectCache::with_ttl(source.clone(), Duration::from_secs(60));
    let first = folio_core::ProjectFeed::new(cache.clone(), Arc::new(eight_project_catalog()));
    let second = folio_core::ProjectFeed::new(cache.clone(), Arc::new(eight_project_catalog()));

    first.set_intent(FilterIntent::all()).await;
    second.set_intent(FilterIntent::all()).await;
    first.set_intent(FilterIntent::by_tag("Web")).await;
    second.set_intent(FilterIntent::by_tag("Web")).await;

    assert_eq!(source.calls(&Query::All), 1);
    assert_eq!(source.calls(&Query::Tag("Web".into())), 2);
    assert_eq!(cache.stats().refreshes, 1);
}

/// Concurrent misses collapse into a single upstream fetch.
#[tokio::test]
async fn concurrent_cache_misses_share_one_fetch() {
    let source = Arc::new(StubSource::configured().respond_after(
        Query::All,
        Duration::from_millis(50),
        Ok(vec![record("r1", ProjectCategory::Web)]),
    ));
    let cache = ProjectCache::with_ttl(source.clone(), Duration::from_secs(60));

    let (a, b, c) = tokio::join!(cache.get(), cache.get(), cache.get());

    assert_eq!(a.unwrap(), b.unwrap());
    assert_eq!(c.unwrap().len(), 1);
    assert_eq!(source.calls(&Query::All), 1);
}

/// Invalidation forces the next read to refetch regardless of elapsed time.
#[tokio::test]
async fn invalidate_then_get_refetches() {
    let source = Arc::new(StubSource::configured().respond(Query::All, Ok(vec![record("r1", ProjectCategory::Web)])));
    let cache = ProjectCache::with_ttl(source.clone(), Duration::from_secs(3600));

    cache.get().await.unwrap();
    cache.get().await.unwrap();
    assert_eq!(source.calls(&Query::All), 1);

    cache.invalidate().await;
    cache.get().await.unwrap();
    assert_eq!(source.calls(&Query::All), 2);
}

/// A slow resolution overtaken by a newer intent never publishes.
#[tokio::test(start_paused = true)]
async fn stale_resolution_is_discarded() {
    let source = Arc::new(
        StubSource::configured()
            .respond_after(
                Query::Tag("slow".into()),
                Duration::from_millis(500),
                Ok(vec![record("stale", ProjectCategory::Saas)]),
            )
            .respond_after(
                Query::Category(ProjectCategory::Web),
                Duration::from_millis(10),
                Ok(vec![record("fresh", ProjectCategory::Web)]),
            ),
    );
    let feed = Arc::new(feed_with(Arc::clone(&source), eight_project_catalog()));

    let slow_feed = Arc::clone(&feed);
    let slow = tokio::spawn(async move { slow_feed.set_intent(FilterIntent::by_tag("slow")).await });

    // Let the slow resolution start and park on its delay
    tokio::task::yield_now().await;
    assert_eq!(feed.intent(), Some(FilterIntent::by_tag("slow")));
    assert!(feed.current().is_loading);

    let fresh = feed.set_intent(FilterIntent::by_category(ProjectCategory::Web)).await;
    assert_eq!(ids(&fresh.records), vec!["fresh"]);

    let after_slow = slow.await.unwrap();

    assert_eq!(ids(&after_slow.records), vec!["fresh"]);
    assert_eq!(ids(&feed.current().records), vec!["fresh"]);
    assert_eq!(source.calls(&Query::Tag("slow".into())), 1);
}

/// A caller that stops waiting does not strand the feed in the loading state.
#[tokio::test(start_paused = true)]
async fn abandoned_resolution_still_publishes() {
    let source = Arc::new(StubSource::configured().respond_after(
        Query::All,
        Duration::from_millis(500),
        Ok(vec![record("r1", ProjectCategory::Web)]),
    ));
    let feed = feed_with(Arc::clone(&source), eight_project_catalog());

    let abandoned = tokio::time::timeout(Duration::from_millis(10), feed.set_intent(FilterIntent::all())).await;
    assert!(abandoned.is_err());
    assert!(feed.current().is_loading);

    tokio::time::sleep(Duration::from_secs(1)).await;

    let view = feed.current();
    assert!(!view.is_loading);
    assert_eq!(ids(&view.records), vec!["r1"]);
    assert_eq!(source.calls(&Query::All), 1);
}

/// Re-issuing an intent whose caller gave up waits for that same resolution.
#[tokio::test(start_paused = true)]
async fn reissued_intent_after_timeout_settles() {
    let source = Arc::new(StubSource::configured().respond_after(
        Query::All,
        Duration::from_millis(500),
        Ok(vec![record("r1", ProjectCategory::Web)]),
    ));
    let feed = feed_with(Arc::clone(&source), eight_project_catalog());

    let abandoned = tokio::time::timeout(Duration::from_millis(10), feed.set_intent(FilterIntent::all())).await;
    assert!(abandoned.is_err());

    let view = feed.set_intent(FilterIntent::all()).await;

    assert!(!view.is_loading);
    assert!(view.using_remote);
    assert_eq!(ids(&view.records), vec!["r1"]);
    assert_eq!(source.calls(&Query::All), 1);
}

/// While a resolution is in flight the previous records stay visible.
#[tokio::test(start_paused = true)]
async fn loading_keeps_previous_records() {
    let source = Arc::new(
        StubSource::unconfigured().respond_after(
            Query::Category(ProjectCategory::Mobile),
            Duration::from_millis(100),
            Ok(Vec::new()),
        ),
    );
    let feed = Arc::new(feed_with(Arc::clone(&source), eight_project_catalog()));
    feed.set_intent(FilterIntent::all()).await;

    let pending_feed = Arc::clone(&feed);
    let pending = tokio::spawn(async move {
        pending_feed
            .set_intent(FilterIntent::by_category(ProjectCategory::Mobile))
            .await
    });
    tokio::task::yield_now().await;

    let loading = feed.current();
    assert!(loading.is_loading);
    assert_eq!(loading.records.len(), 8);

    let settled = pending.await.unwrap();
    assert!(!settled.is_loading);
    assert_eq!(ids(&settled.records), vec!["m1", "m2"]);
}

fn intent_strategy() -> impl Strategy<Value = FilterIntent> {
    let categories = proptest::sample::select(ProjectCategory::ALL.to_vec());
    let tags = proptest::sample::select(vec!["Web", "Mobile", "Backend", "Ads", "IA", "Unknown", ""]);
    (proptest::option::of(categories), proptest::option::of(tags)).prop_map(|(category, tag)| {
        let mut intent = FilterIntent::all();
        if let Some(category) = category {
            intent = intent.with_category(category);
        }
        if let Some(tag) = tag {
            intent = intent.with_tag(tag);
        }
        intent
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Empty remote answer: the view is exactly the catalog filtered by the intent.
    #[test]
    fn prop_empty_remote_equals_filtered_catalog(intent in intent_strategy(), configured in any::<bool>()) {
        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
        let source = if configured { StubSource::configured() } else { StubSource::unconfigured() };
        let catalog = eight_project_catalog();
        let expected = catalog.filter(&intent.to_filter());
        let feed = feed_with(Arc::new(source), catalog);

        let view = runtime.block_on(feed.set_intent(intent));

        prop_assert_eq!(&view.records, &expected);
        prop_assert!(!view.using_remote);
        let expected_error = (expected.is_empty() && !configured).then_some(FeedNotice::NotConfigured);
        prop_assert_eq!(view.error, expected_error);
    }

    /// Non-empty remote answer: the view is exactly the remote records.
    #[test]
    fn prop_remote_answer_wins(intent in intent_strategy(), count in 1usize..5) {
        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
        let remote: Vec<_> = (0..count).map(|i| record(&format!("r{i}"), ProjectCategory::Saas)).collect();
        let query = match (intent.category(), intent.tag()) {
            (Some(category), _) => Query::Category(category),
            (None, Some(tag)) => Query::Tag(tag.to_string()),
            (None, None) => Query::All,
        };
        let source = StubSource::configured().respond(query, Ok(remote.clone()));
        let feed = feed_with(Arc::new(source), eight_project_catalog());

        let view = runtime.block_on(feed.set_intent(intent));

        prop_assert_eq!(view.records, remote);
        prop_assert!(view.using_remote);
        prop_assert_eq!(view.error, None);
    }
}
