//! Reducer for the users slice (login, logout, profile).

use std::sync::Arc;

use crate::mvi::Reducer;
use crate::state::{Event, Phase, SliceState, UsersState};

pub struct UsersReducer;

impl Reducer for UsersReducer {
    type State = UsersState;
    type Intent = Event;

    fn reduce(state: Arc<Self::State>, event: &Self::Intent) -> Arc<Self::State> {
        match event {
            Event::Login { phase, .. } => Arc::new(UsersState {
                login: state.login.replace(phase),
                ..(*state).clone()
            }),

            Event::Logout { phase } => {
                let logout = state.logout.apply(phase, |_, _| ());
                match phase {
                    // A finished logout invalidates the session and everything
                    // fetched with it.
                    Phase::Success(()) => Arc::new(UsersState {
                        logout,
                        login: SliceState::default(),
                        profile: SliceState::default(),
                    }),
                    _ => Arc::new(UsersState {
                        logout,
                        ..(*state).clone()
                    }),
                }
            }

            Event::GetUserData { phase } => Arc::new(UsersState {
                profile: state.profile.replace(phase),
                ..(*state).clone()
            }),

            _ => state,
        }
    }
}
