mod common;

use common::{fixtures, harness, harness_in, settle};
use voltdesk::api::ProducerFilter;
use voltdesk::list::{ListState, Viewport};
use voltdesk::notify::Notification;
use voltdesk::selectors::{app_view, documents_view, producer_view};
use voltdesk::state::EventKind;
use voltdesk::storage::{LocalStorage, LOCALE_KEY};
use voltdesk::ApiError;

fn bottom() -> Viewport {
    Viewport::new(900.0, 1500.0, 600.0)
}

#[tokio::test(start_paused = true)]
async fn documents_list_scrolls_through_the_store() {
    let h = harness(fixtures());
    let list = h.client.documents_list();
    list.mount();
    settle(1).await;

    let view = documents_view(&h.client.store().get_state());
    assert_eq!(view.documents.len(), 10);
    assert!(view.has_next);

    for _ in 0..2 {
        list.on_scroll(bottom());
        settle(150).await;
    }

    assert_eq!(list.state(), ListState::Exhausted);
    let view = documents_view(&h.client.store().get_state());
    assert_eq!(view.documents.len(), 25);
    assert!(!view.has_next);
    assert_eq!(list.items(), view.documents);
    assert_eq!(h.api.call_count(EventKind::GetDocuments), 3);
}

#[tokio::test(start_paused = true)]
async fn remount_during_slow_page_loads_first_page() {
    let mut slow = fixtures();
    slow.latency_ms = 1000;
    let h = harness(slow);
    let list = h.client.documents_list();
    list.mount();
    settle(1100).await;
    assert_eq!(list.state(), ListState::Idle(0));

    list.on_scroll(bottom());
    settle(150).await;
    assert_eq!(list.state(), ListState::Fetching(1));

    list.unmount();
    list.mount();
    settle(5000).await;

    assert_eq!(list.state(), ListState::Idle(0));
    assert_eq!(list.items().len(), 10);
    assert_eq!(list.cursor().total, Some(25));
    assert_eq!(h.api.call_count(EventKind::GetDocuments), 3);
    assert!(h.notifier.seen().is_empty());
    let view = documents_view(&h.client.store().get_state());
    assert_eq!(view.documents.len(), 10);
}

#[tokio::test(start_paused = true)]
async fn filter_reset_during_slow_page_loads_first_page() {
    let mut slow = fixtures();
    slow.latency_ms = 1000;
    let h = harness(slow);
    let list = h.client.producers_list(ProducerFilter::default());
    list.mount();
    settle(100).await;
    assert_eq!(list.state(), ListState::Fetching(0));

    list.reset();
    settle(5000).await;

    assert_eq!(list.state(), ListState::Exhausted);
    assert_eq!(list.items().len(), 3);
    assert_eq!(h.api.call_count(EventKind::GetProducers), 2);
}

#[tokio::test(start_paused = true)]
async fn documents_failure_is_notified_once_by_the_list() {
    let h = harness(fixtures());
    h.api.fail(EventKind::GetDocuments, ApiError::new("Documents unavailable"));

    let list = h.client.documents_list();
    list.mount();
    settle(1).await;

    assert_eq!(list.state(), ListState::Idle(0));
    assert_eq!(
        h.notifier.seen(),
        vec![Notification::error("Documents unavailable")]
    );
    assert_eq!(
        documents_view(&h.client.store().get_state()).error,
        Some(ApiError::new("Documents unavailable"))
    );
}

#[tokio::test(start_paused = true)]
async fn producers_list_applies_filter() {
    let h = harness(fixtures());
    let list = h.client.producers_list(ProducerFilter {
        energy_types: vec!["wind".to_string()],
    });
    list.mount();
    settle(1).await;

    assert_eq!(list.state(), ListState::Exhausted);
    let ids: Vec<_> = list.items().into_iter().map(|p| p.id).collect();
    assert_eq!(ids, vec!["p1", "p3"]);
    assert_eq!(
        h.client
            .store()
            .get_state()
            .producers
            .producers
            .data
            .number_of_producers,
        2
    );
}

#[tokio::test]
async fn start_loads_and_persists_locale() {
    let h = harness(fixtures());
    let settled = h.client.start().await;
    assert!(matches!(settled, Some(Ok(_))));

    let state = h.client.store().get_state();
    let locale = app_view(&state).locale.expect("locale set");
    assert!(h.client.config().locale.supported.contains(&locale));
    assert!(!state.app.localization.data.content.is_empty());

    h.client.shutdown().await;
    let storage = LocalStorage::new(h.dir.path().join("state.toml"));
    assert_eq!(storage.get(LOCALE_KEY).unwrap(), Some(locale));
}

#[tokio::test]
async fn saved_locale_is_restored_on_next_bootstrap() {
    let dir = tempfile::TempDir::new().unwrap();
    LocalStorage::new(dir.path().join("state.toml"))
        .set(LOCALE_KEY, "de")
        .unwrap();

    let h = harness_in(fixtures(), dir);
    assert_eq!(
        app_view(&h.client.store().get_state()).locale.as_deref(),
        Some("de")
    );

    h.client.start().await;
    let state = h.client.store().get_state();
    assert_eq!(state.app.localization.data.locale.as_deref(), Some("de"));
    assert_eq!(
        state.app.localization.data.content.get("app.logout").map(String::as_str),
        Some("Abmelden")
    );
}

#[tokio::test]
async fn switching_locale_is_persisted() {
    let h = harness(fixtures());
    h.client.actions().setup_locale("en").await;
    h.client.actions().setup_locale("de").await;
    h.client.shutdown().await;

    let storage = LocalStorage::new(h.dir.path().join("state.toml"));
    assert_eq!(storage.get(LOCALE_KEY).unwrap().as_deref(), Some("de"));
}

#[tokio::test]
async fn failed_locale_switch_keeps_persisted_locale() {
    let h = harness(fixtures());
    h.client.actions().setup_locale("de").await;
    h.client.actions().setup_locale("fr").await;
    h.client.shutdown().await;

    let storage = LocalStorage::new(h.dir.path().join("state.toml"));
    assert_eq!(storage.get(LOCALE_KEY).unwrap().as_deref(), Some("de"));
    let notes = h.notifier.seen();
    assert_eq!(notes.len(), 1);
    assert!(notes[0].message.contains("fr"));
}

#[tokio::test]
async fn producer_screen_flow() {
    let h = harness(fixtures());
    let actions = h.client.actions();
    actions.get_user_data().await;
    actions.get_producer("p1").await;

    let view = producer_view(&h.client.store().get_state());
    assert!(!view.loading);
    assert!(view.can_trade);
    assert!(!view.sold_out);

    actions.select_producer("p1").await;
    let view = producer_view(&h.client.store().get_state());
    assert_eq!(
        view.selected_producer.map(|s| s.producer_id).as_deref(),
        Some("p1")
    );
    assert_eq!(
        h.notifier.seen(),
        vec![Notification::success("Producer p1 selected")]
    );
}

#[tokio::test]
async fn breadcrumbs_and_loader_are_synchronous() {
    let h = harness(fixtures());
    let actions = h.client.actions();
    actions.setup_loader_visibility(true);
    actions.setup_breadcrumbs(Some(vec![voltdesk::api::Breadcrumb {
        id: "buyEnergy".to_string(),
        label: "Buy Energy".to_string(),
        path: "/buy_energy".to_string(),
    }]));

    let state = h.client.store().get_state();
    assert!(state.app.loader_visible);
    assert_eq!(app_view(&state).breadcrumbs.len(), 1);

    actions.setup_breadcrumbs(None);
    assert!(app_view(&h.client.store().get_state()).breadcrumbs.is_empty());
}

#[tokio::test]
async fn shutdown_detaches_subscribers() {
    let h = harness(fixtures());
    let store = h.client.store().clone();
    assert_eq!(store.listener_count(), 2);
    h.client.shutdown().await;
    assert_eq!(store.listener_count(), 0);
}

#[tokio::test]
async fn locale_switch_repairs_corrupt_state_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("state.toml");
    std::fs::write(&path, "locale = ").unwrap();

    let h = harness_in(fixtures(), dir);
    assert!(matches!(
        h.client.actions().setup_locale("de").await,
        Some(Ok(_))
    ));
    h.client.shutdown().await;

    assert_eq!(
        LocalStorage::new(&path).get(LOCALE_KEY).unwrap().as_deref(),
        Some("de")
    );
}
