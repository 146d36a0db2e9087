use super::fetcher::EventSource;
use super::models::Event;
use super::query::CalendarQuery;
use crate::error::{component_error, TableResult};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::info;

/// The Google Calendar actor that processes fetch requests one at a time
pub struct GoogleCalendarActor {
    source: Arc<dyn EventSource>,
    command_rx: mpsc::Receiver<GoogleCalendarCommand>,
}

/// Commands that can be sent to the Google Calendar actor
pub enum GoogleCalendarCommand {
    FetchEvents(CalendarQuery, oneshot::Sender<TableResult<Vec<Event>>>),
    Shutdown,
}

/// Handle for communicating with the Google Calendar actor
#[derive(Clone)]
pub struct GoogleCalendarActorHandle {
    command_tx: mpsc::Sender<GoogleCalendarCommand>,
}

impl GoogleCalendarActorHandle {
    /// Fetch the events selected by a query
    pub async fn fetch_events(&self, query: CalendarQuery) -> TableResult<Vec<Event>> {
        let (response_tx, response_rx) = oneshot::channel();
        self.command_tx
            .send(GoogleCalendarCommand::FetchEvents(query, response_tx))
            .await
            .map_err(|e| component_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .await
            .map_err(|_| component_error("Response channel closed"))?
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> TableResult<()> {
        let _ = self.command_tx.send(GoogleCalendarCommand::Shutdown).await;
        Ok(())
    }
}

impl GoogleCalendarActor {
    /// Create a new actor and return its handle
    pub fn new(source: Arc<dyn EventSource>) -> (Self, GoogleCalendarActorHandle) {
        let (command_tx, command_rx) = mpsc::channel(32);

        let actor = Self { source, command_rx };
        let handle = GoogleCalendarActorHandle { command_tx };

        (actor, handle)
    }

    /// Start the actor's processing loop
    pub async fn run(&mut self) {
        info!("Google Calendar actor started");

        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                GoogleCalendarCommand::FetchEvents(query, response_tx) => {
                    let result = self.source.fetch(&query).await;
                    let _ = response_tx.send(result);
                }
                GoogleCalendarCommand::Shutdown => {
                    info!("Google Calendar actor shutting down");
                    break;
                }
            }
        }

        info!("Google Calendar actor shut down");
    }
}
