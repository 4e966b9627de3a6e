use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use serde_json::Value;

use crate::authz::Actor;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::events::{init_event_bus, EventBus};
use crate::store::Store;

/// Shared state handed to every service operation.
pub struct AppState<S> {
    pub store: Arc<S>,
    pub events: EventBus,
    pub config: Arc<Config>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            events: self.events.clone(),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S: Store> AppState<S> {
    pub fn new(store: S, config: Config) -> (Self, broadcast::Receiver<Value>) {
        let (events, rx) = init_event_bus(config.event_bus_capacity);
        let state = Self {
            store: Arc::new(store),
            events,
            config: Arc::new(config),
        };
        (state, rx)
    }

    /// Resolves the Identity Context for an authenticated user id.
    pub async fn actor(&self, user_id: i64) -> AppResult<Actor> {
        let user = self
            .store
            .find_user(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User not found with given ID: {user_id}")))?;
        Ok(Actor::from(&user))
    }
}

/// Builds the state and spawns the activity listener on the current runtime.
/// The returned handle resolves, with the number of events logged, once every
/// clone of the state has been dropped.
pub fn create_app<S: Store>(store: S, config: Config) -> (AppState<S>, JoinHandle<u64>) {
    let (state, rx) = AppState::new(store, config);
    let listener = tokio::spawn(crate::events::start_activity_listener(rx));
    (state, listener)
}
