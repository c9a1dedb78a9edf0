//! Store subscriber turning settled operations into notifications.

use std::sync::Arc;

use parking_lot::Mutex;

use super::{Notification, Notifier};
use crate::error::ApiError;
use crate::mvi::Subscription;
use crate::reducers::AppStore;
use crate::state::{SliceState, StateTree};

type Status<'a> = (bool, Option<&'a ApiError>);

fn status<D>(slice: &SliceState<D>) -> Status<'_> {
    (slice.loading, slice.error.as_ref())
}

fn login(s: &StateTree) -> Status<'_> {
    status(&s.users.login)
}

fn logout(s: &StateTree) -> Status<'_> {
    status(&s.users.logout)
}

fn profile(s: &StateTree) -> Status<'_> {
    status(&s.users.profile)
}

fn localization(s: &StateTree) -> Status<'_> {
    status(&s.app.localization)
}

fn producer(s: &StateTree) -> Status<'_> {
    status(&s.producers.producer)
}

fn selected_producer(s: &StateTree) -> Status<'_> {
    status(&s.producers.selected_producer)
}

/// Slices whose failures are surfaced. The paginated lists are left out;
/// their controllers report their own failures.
const TRACKED: &[(&str, for<'a> fn(&'a StateTree) -> Status<'a>)] = &[
    ("login", login),
    ("logout", logout),
    ("profile", profile),
    ("localization", localization),
    ("producer", producer),
    ("selected_producer", selected_producer),
];

/// Pushes an error notification whenever a tracked slice settles with a
/// failure, and a success notification when a producer selection is
/// confirmed.
pub struct FailureWatcher {
    subscription: Subscription,
}

impl FailureWatcher {
    pub fn attach(store: &AppStore, notifier: Arc<dyn Notifier>) -> Self {
        let previous = Mutex::new(store.get_state());
        let subscription = store.subscribe(move |state| {
            let before = std::mem::replace(&mut *previous.lock(), Arc::clone(state));
            for notification in transitions(&before, state) {
                notifier.push(notification);
            }
        });
        Self { subscription }
    }

    pub fn detach(self) {
        self.subscription.unsubscribe();
    }
}

fn transitions(before: &StateTree, after: &StateTree) -> Vec<Notification> {
    let mut out = Vec::new();
    for (slice, status_of) in TRACKED {
        let (was_loading, _) = status_of(before);
        let (loading, error) = status_of(after);
        if !was_loading || loading {
            continue;
        }
        match error {
            Some(err) => {
                tracing::debug!(slice, error = %err, "Slice failure surfaced");
                out.push(Notification::error(err.message.clone()));
            }
            None if *slice == "selected_producer" => {
                if let Some(selection) = &after.producers.selected_producer.data {
                    out.push(Notification::success(format!(
                        "Producer {} selected",
                        selection.producer_id
                    )));
                }
            }
            None => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::SelectedProducer;
    use crate::mvi::Reducer;
    use crate::reducers::RootReducer;
    use crate::state::{Event, Phase};

    fn apply(state: &Arc<StateTree>, event: Event) -> Arc<StateTree> {
        RootReducer::reduce(Arc::clone(state), &event)
    }

    #[test]
    fn failure_after_request_is_reported_once() {
        let idle = Arc::new(StateTree::default());
        let loading = apply(&idle, Event::GetUserData { phase: Phase::Request });
        let failed = apply(
            &loading,
            Event::GetUserData {
                phase: Phase::Failure(ApiError::new("Profile unavailable")),
            },
        );
        assert!(transitions(&idle, &loading).is_empty());
        assert_eq!(
            transitions(&loading, &failed),
            vec![Notification::error("Profile unavailable")]
        );

        let unrelated = apply(&failed, Event::SetupLoaderVisibility { visible: true });
        assert!(transitions(&failed, &unrelated).is_empty());
    }

    #[test]
    fn confirmed_selection_is_a_success() {
        let idle = Arc::new(StateTree::default());
        let loading = apply(
            &idle,
            Event::SelectProducer {
                producer_id: "p1".into(),
                phase: Phase::Request,
            },
        );
        let done = apply(
            &loading,
            Event::SelectProducer {
                producer_id: "p1".into(),
                phase: Phase::Success(SelectedProducer {
                    producer_id: "p1".into(),
                }),
            },
        );
        assert_eq!(
            transitions(&loading, &done),
            vec![Notification::success("Producer p1 selected")]
        );
    }

    #[test]
    fn list_failures_are_not_tracked() {
        let idle = Arc::new(StateTree::default());
        let loading = apply(&idle, Event::GetDocuments { page: 0, phase: Phase::Request });
        let failed = apply(
            &loading,
            Event::GetDocuments {
                page: 0,
                phase: Phase::Failure(ApiError::new("down")),
            },
        );
        assert!(transitions(&loading, &failed).is_empty());
    }
}
