use std::sync::Arc;
use std::time::Duration;

use action_locator::{ElementResolver, FallbackResolver, LocatorError};
use page_driver::{ElementScript, PageScript, ScriptedPage};
use storefront_core_types::{CandidateList, Diagnostic, RecordingSink};
use tokio::time::Instant;

const BUDGET: Duration = Duration::from_millis(1000);

fn setup(script: PageScript) -> (FallbackResolver, Arc<ScriptedPage>, Arc<RecordingSink>) {
    let page = Arc::new(ScriptedPage::loaded("https://shop.test/", script));
    let sink = Arc::new(RecordingSink::new());
    let resolver = FallbackResolver::new(page.clone(), sink.clone());
    (resolver, page, sink)
}

#[tokio::test(start_paused = true)]
async fn test_subscribe_field_heals_to_second_candidate() {
    let (resolver, page, sink) = setup(
        PageScript::new("Home")
            .element("#subscribe_email", ElementScript::visible())
            .element("input[type=\"email\"]", ElementScript::visible()),
    );
    let candidates = CandidateList::new(
        "#susbscribe_email",
        ["#subscribe_email", "input[type=\"email\"]"],
    );

    let resolution = resolver.resolve(&candidates, BUDGET).await.unwrap();

    assert_eq!(resolution.candidate_index, 1);
    assert_eq!(resolution.locator.as_str(), "#subscribe_email");
    assert!(resolution.healed());

    let fallbacks = sink.fallbacks();
    assert_eq!(fallbacks.len(), 1);
    assert_eq!(
        fallbacks[0].to_string(),
        "[Self-Healing] Used fallback locator: #subscribe_email (primary failed: #susbscribe_email)"
    );

    // Later candidates are never touched once one wins
    assert!(!page.probes().iter().any(|p| p == "input[type=\"email\"]"));
}

#[tokio::test(start_paused = true)]
async fn test_all_candidates_failing_lists_every_locator() {
    let (resolver, _page, sink) = setup(PageScript::new("Home"));
    let candidates = CandidateList::new("#a", ["#b", "#c"]);

    let started = Instant::now();
    let err = resolver.resolve(&candidates, BUDGET).await.unwrap_err();

    assert_eq!(err.to_string(), "All locators failed: #a, #b, #c");
    let LocatorError::AllLocatorsFailed { attempts } = &err;
    assert_eq!(attempts.len(), 3);
    assert_eq!(err.candidates().len(), 3);
    assert!(sink.records().is_empty());

    // Primary costs nothing; each fallback spends its own budget
    assert_eq!(started.elapsed(), BUDGET * 2);
}

#[tokio::test(start_paused = true)]
async fn test_fallback_appearing_within_budget_is_accepted() {
    let (resolver, _page, sink) = setup(PageScript::new("Home").element(
        "#late",
        ElementScript::visible().appears_after(Duration::from_millis(600)),
    ));
    let candidates = CandidateList::new("#missing", ["#late"]);

    let resolution = resolver.resolve(&candidates, BUDGET).await.unwrap();

    assert_eq!(resolution.candidate_index, 1);
    assert_eq!(sink.fallbacks().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_hidden_primary_is_skipped() {
    let (resolver, _page, sink) = setup(
        PageScript::new("Home")
            .element("#primary", ElementScript::hidden())
            .element("#backup", ElementScript::visible()),
    );
    let candidates = CandidateList::new("#primary", ["#backup"]);

    let resolution = resolver.resolve(&candidates, BUDGET).await.unwrap();

    assert_eq!(resolution.locator.as_str(), "#backup");
    match &sink.records()[0] {
        Diagnostic::FallbackUsed {
            primary,
            candidate_index,
            ..
        } => {
            assert_eq!(primary.as_str(), "#primary");
            assert_eq!(*candidate_index, 1);
        }
        other => panic!("unexpected diagnostic: {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn test_duplicate_candidates_are_retried_in_place() {
    let (resolver, page, _sink) = setup(PageScript::new("Home").element(
        "#flaky",
        ElementScript::visible().visible_after(Duration::from_millis(1500)),
    ));
    let candidates = CandidateList::new("#flaky", ["#flaky", "#flaky"]);

    let resolution = resolver.resolve(&candidates, BUDGET).await.unwrap();

    assert_eq!(resolution.candidate_index, 2);
    assert!(page.probes().iter().all(|p| p == "#flaky"));
}

#[tokio::test(start_paused = true)]
async fn test_healing_is_not_remembered_between_calls() {
    let (resolver, page, sink) = setup(
        PageScript::new("Home")
            .element("#old", ElementScript::hidden())
            .element("#new", ElementScript::visible()),
    );
    let candidates = CandidateList::new("#old", ["#new"]);

    resolver.resolve(&candidates, BUDGET).await.unwrap();
    let first_call_probes = page.probes().len();
    resolver.resolve(&candidates, BUDGET).await.unwrap();

    assert_eq!(page.probes()[first_call_probes], "#old");
    assert_eq!(sink.fallbacks().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_earlier_fallbacks_are_tried_before_the_winner() {
    let (resolver, page, sink) = setup(
        PageScript::new("Home")
            .element("#c", ElementScript::visible())
            .element("#d", ElementScript::visible()),
    );
    let candidates = CandidateList::new("#a", ["#b", "#c", "#d"]);

    let resolution = resolver.resolve(&candidates, BUDGET).await.unwrap();

    assert_eq!(resolution.candidate_index, 2);
    assert_eq!(resolution.locator.as_str(), "#c");

    // #b is polled repeatedly while it waits out its budget
    let mut queried = page.probes();
    queried.dedup();
    assert_eq!(queried, ["#a", "#b", "#c"]);

    let fallbacks = sink.fallbacks();
    assert_eq!(fallbacks.len(), 1);
    match &fallbacks[0] {
        Diagnostic::FallbackUsed {
            primary,
            fallback,
            candidate_index,
        } => {
            assert_eq!(primary.as_str(), "#a");
            assert_eq!(fallback.as_str(), "#c");
            assert_eq!(*candidate_index, 2);
        }
        other => panic!("unexpected diagnostic: {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn test_missing_subscribe_field_heals_to_alternate_id() {
    let (resolver, _page, sink) = setup(
        PageScript::new("Home").element("#subscribe_email_alt", ElementScript::visible()),
    );
    let candidates = CandidateList::new("#subscribe_email", ["#subscribe_email_alt"]);

    let resolution = resolver.resolve(&candidates, BUDGET).await.unwrap();

    assert_eq!(resolution.candidate_index, 1);
    assert_eq!(resolution.locator.as_str(), "#subscribe_email_alt");
    let fallbacks = sink.fallbacks();
    assert_eq!(fallbacks.len(), 1);
    assert_eq!(
        fallbacks[0].to_string(),
        "[Self-Healing] Used fallback locator: #subscribe_email_alt (primary failed: #subscribe_email)"
    );
}

#[tokio::test(start_paused = true)]
async fn test_two_missing_locators_fail_together() {
    let (resolver, _page, sink) = setup(PageScript::new("Home"));
    let candidates = CandidateList::new("#missing1", ["#missing2"]);

    let err = resolver.resolve(&candidates, BUDGET).await.unwrap_err();

    assert_eq!(err.to_string(), "All locators failed: #missing1, #missing2");
    assert!(sink.records().is_empty());
}
