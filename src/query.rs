use std::sync::{Arc, Mutex, PoisonError};
use tokio::runtime::Handle;
use tokio::sync::watch;

use crate::graphql::GraphQLResponse;
use crate::{Client, Error};

pub type Outcome = Result<Arc<GraphQLResponse>, Arc<Error>>;

/// A single fetch, started on first use and shared by every later caller.
///
/// The request runs on its own task, so callers that stop waiting do not
/// cancel it, and at most one request is issued per instance. If that task
/// is dropped before it finishes, every caller gets an error instead.
#[derive(Clone)]
pub struct CachedQuery {
    inner: Arc<Inner>,
}

struct Inner {
    client: Client,
    document: String,
    // Taken by the fetch task; dropping it closes the channel.
    sender: Mutex<Option<watch::Sender<Option<Outcome>>>>,
    outcome: watch::Receiver<Option<Outcome>>,
}

impl CachedQuery {
    pub fn new(client: Client, document: impl Into<String>) -> Self {
        let (sender, outcome) = watch::channel(None);
        Self {
            inner: Arc::new(Inner {
                client,
                document: document.into(),
                sender: Mutex::new(Some(sender)),
                outcome,
            }),
        }
    }

    pub async fn outcome(&self) -> Outcome {
        if let Err(error) = self.start() {
            return Err(Arc::new(error));
        }
        let mut receiver = self.inner.outcome.clone();
        let outcome = match receiver.wait_for(Option::is_some).await {
            Ok(outcome) => (*outcome).clone(),
            Err(..) => None,
        };
        outcome.unwrap_or_else(|| {
            Err(Arc::new(Error::Custom(
                "The query was abandoned before it completed".to_owned(),
            )))
        })
    }

    /// Spawns the fetch on the current tokio runtime, once. Later calls do nothing.
    pub fn start(&self) -> Result<(), Error> {
        let handle = Handle::try_current()
            .map_err(|_| Error::Custom("The query must be started from a tokio runtime".to_owned()))?;
        let sender = self
            .inner
            .sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        let Some(sender) = sender else {
            return Ok(());
        };
        let inner = Arc::clone(&self.inner);
        handle.spawn(async move {
            log::debug!("Querying {}", inner.client.endpoint());
            let outcome = inner
                .client
                .fetch(&inner.document)
                .await
                .map(Arc::new)
                .map_err(Arc::new);
            sender.send_replace(Some(outcome));
        });
        Ok(())
    }
}
