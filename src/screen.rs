use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::graphql::GraphQLResponse;
use crate::projector::{project, surface_errors};
use crate::trips::{DateFormat, DisplayRow, TripRow};
use crate::{CachedQuery, Client, Config, Error};

/// What the list renderer receives: rows, plus at most one transient notice.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Update {
    pub rows: Vec<DisplayRow>,
    pub notice: Option<String>,
}

impl Update {
    pub fn from_response(response: &GraphQLResponse, field: &str, format: &DateFormat) -> Self {
        let notice = surface_errors(response);
        let rows = project(response, field, TripRow::from_record)
            .iter()
            .map(|trip| DisplayRow::new(trip.display_text(format)))
            .collect();
        Self { rows, notice }
    }

    pub fn failed(error: &Error) -> Self {
        Self {
            rows: vec![],
            notice: Some(error.to_string()),
        }
    }
}

struct Subscription(JoinHandle<()>);

impl Subscription {
    fn dispose(self) {
        if !self.0.is_finished() {
            log::debug!("Cancelling pending delivery");
            self.0.abort();
        }
    }
}

/// Owns one cached trips query and the single live subscription to it.
pub struct TripsScreen {
    query: CachedQuery,
    field: String,
    date_format: DateFormat,
    subscription: Option<Subscription>,
}

impl TripsScreen {
    pub fn new(query: CachedQuery, field: impl Into<String>, date_format: DateFormat) -> Self {
        Self {
            query,
            field: field.into(),
            date_format,
            subscription: None,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let client = Client::new(config.endpoint_url()?, config.timeout())?;
        Ok(Self::new(
            CachedQuery::new(client, config.document.clone()),
            config.field.clone(),
            config.date_format(),
        ))
    }

    /// Replaces any live subscription. The receiver gets exactly one update,
    /// unless the screen is torn down first.
    pub fn subscribe(&mut self) -> oneshot::Receiver<Update> {
        self.teardown();
        let (sender, receiver) = oneshot::channel();
        let query = self.query.clone();
        let field = self.field.clone();
        let date_format = self.date_format;
        let task = tokio::spawn(async move {
            let update = match query.outcome().await {
                Ok(response) => Update::from_response(&response, &field, &date_format),
                Err(error) => {
                    log::error!("Exception processing request: {}", error);
                    Update::failed(&error)
                }
            };
            if sender.send(update).is_err() {
                log::debug!("Update dropped, nobody is listening");
            }
        });
        self.subscription = Some(Subscription(task));
        receiver
    }

    pub fn teardown(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.dispose();
        }
    }
}

impl Drop for TripsScreen {
    fn drop(&mut self) {
        self.teardown();
    }
}
