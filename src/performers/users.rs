use std::sync::Arc;

use super::Actions;
use crate::api::{Credentials, Session, UserProfile};
use crate::dispatch::Settlement;
use crate::state::{Event, StateTree};

impl Actions {
    pub fn login(&self, credentials: Credentials) -> Settlement<Session> {
        let api = Arc::clone(&self.api);
        let meta = credentials.clone();
        self.dispatcher.dispatch_async(
            move || async move { api.login(credentials).await },
            move |phase| Event::Login {
                credentials: meta.clone(),
                phase,
            },
            |state: &StateTree| state.users.login.loading,
        )
    }

    pub fn logout(&self) -> Settlement<()> {
        let api = Arc::clone(&self.api);
        self.dispatcher.dispatch_async(
            move || async move { api.logout().await },
            |phase| Event::Logout { phase },
            |state: &StateTree| state.users.logout.loading,
        )
    }

    pub fn get_user_data(&self) -> Settlement<UserProfile> {
        let api = Arc::clone(&self.api);
        self.dispatcher.dispatch_async(
            move || async move { api.get_user_data().await },
            |phase| Event::GetUserData { phase },
            |state: &StateTree| state.users.profile.loading,
        )
    }
}
