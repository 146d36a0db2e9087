use super::actor::{GoogleCalendarActor, GoogleCalendarActorHandle};
use super::fetcher::EventSource;
use super::models::Event;
use super::query::CalendarQuery;
use crate::error::TableResult;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Handle for interacting with the Google Calendar actor
#[derive(Clone)]
pub struct GoogleCalendarHandle {
    actor_handle: GoogleCalendarActorHandle,
    _actor_task: Arc<JoinHandle<()>>,
}

impl GoogleCalendarHandle {
    /// Create a new GoogleCalendarHandle and spawn the actor
    pub fn new(source: Arc<dyn EventSource>) -> Self {
        let (mut actor, handle) = GoogleCalendarActor::new(source);

        let actor_task = tokio::spawn(async move {
            actor.run().await;
        });

        Self {
            actor_handle: handle,
            _actor_task: Arc::new(actor_task),
        }
    }

    /// Fetch the events selected by a query
    pub async fn fetch_events(&self, query: CalendarQuery) -> TableResult<Vec<Event>> {
        self.actor_handle.fetch_events(query).await
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> TableResult<()> {
        self.actor_handle.shutdown().await
    }
}
