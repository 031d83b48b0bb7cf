//! Background fetch worker
//!
//! Receives `AppCommand`s from the app, runs each one as its own tokio task
//! against the catalog, and posts the result back as an `AppMessage`.
//! A new command for a concern aborts the task still running for it.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::api::CatalogClient;
use crate::app::{AppCommand, AppMessage, FetchError};

/// Worker state: one in-flight task slot per concern
pub struct FetchWorker {
    client: CatalogClient,
    commands: mpsc::UnboundedReceiver<AppCommand>,
    messages: mpsc::UnboundedSender<AppMessage>,
    shows: Option<JoinHandle<()>>,
    show: Option<JoinHandle<()>>,
    genre: Option<JoinHandle<()>>,
}

/// Spawn the worker and return the receiver for its results
pub fn spawn_worker(
    client: CatalogClient,
    commands: mpsc::UnboundedReceiver<AppCommand>,
) -> (JoinHandle<()>, mpsc::UnboundedReceiver<AppMessage>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let worker = FetchWorker::new(client, commands, tx);
    (tokio::spawn(worker.run()), rx)
}

impl FetchWorker {
    pub fn new(
        client: CatalogClient,
        commands: mpsc::UnboundedReceiver<AppCommand>,
        messages: mpsc::UnboundedSender<AppMessage>,
    ) -> Self {
        Self {
            client,
            commands,
            messages,
            shows: None,
            show: None,
            genre: None,
        }
    }

    /// Process commands until the app drops its sender
    pub async fn run(mut self) {
        while let Some(command) = self.commands.recv().await {
            self.dispatch(command);
        }

        for handle in [self.shows.take(), self.show.take(), self.genre.take()]
            .into_iter()
            .flatten()
        {
            handle.abort();
        }
        tracing::debug!("fetch worker stopped");
    }

    fn dispatch(&mut self, command: AppCommand) {
        let client = self.client.clone();
        let tx = self.messages.clone();

        match command {
            AppCommand::FetchShows { request } => {
                let handle = tokio::spawn(async move {
                    let result = client.fetch_all_shows().await.map_err(FetchError::from);
                    let _ = tx.send(AppMessage::ShowsLoaded { request, result });
                });
                replace(&mut self.shows, handle);
            }
            AppCommand::FetchShow { id, request } => {
                let handle = tokio::spawn(async move {
                    let result = client.fetch_show(&id).await.map_err(FetchError::from);
                    let _ = tx.send(AppMessage::ShowLoaded { request, result });
                });
                replace(&mut self.show, handle);
            }
            AppCommand::FetchGenre { id, request } => {
                let handle = tokio::spawn(async move {
                    let result = client.fetch_genre(id).await.map_err(FetchError::from);
                    let _ = tx.send(AppMessage::GenreLoaded { request, result });
                });
                replace(&mut self.genre, handle);
            }
        }
    }
}

fn replace(slot: &mut Option<JoinHandle<()>>, handle: JoinHandle<()>) {
    if let Some(previous) = slot.replace(handle) {
        previous.abort();
    }
}
