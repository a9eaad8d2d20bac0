//! Remote event API client

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::types::{Conference, Exhibitor, Organizer, Reservation, Room};
use expo_admin_core::environment::{FlagSource, RecordSource, SourceFuture};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::marker::PhantomData;

/// Header scoping every request to one project (event)
pub const PROJECT_HEADER: &str = "X-Project-Id";

/// A record type the API can list with `GET {base_url}/{PATH}`
pub trait Resource: DeserializeOwned + Send + 'static {
    /// Collection path, relative to the base URL
    const PATH: &'static str;
}

impl Resource for Conference {
    const PATH: &'static str = "conferences";
}

impl Resource for Exhibitor {
    const PATH: &'static str = "exhibitors";
}

impl Resource for Organizer {
    const PATH: &'static str = "organizers";
}

impl Resource for Room {
    const PATH: &'static str = "rooms";
}

/// Remote event API client
#[derive(Clone)]
pub struct DashboardClient {
    client: Client,
    base_url: String,
    token: String,
    project_id: String,
}

impl DashboardClient {
    /// Create a client from the API configuration
    ///
    /// # Errors
    ///
    /// Returns `ApiError::RequestFailed` if the HTTP client cannot be built
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            project_id: config.project_id.clone(),
        })
    }

    /// Base URL every path is resolved against
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Project the client is scoped to
    #[must_use]
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}/{path}", self.base_url))
            .bearer_auth(&self.token)
            .header(PROJECT_HEADER, &self.project_id)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
            StatusCode::NOT_FOUND => {
                let body = response.text().await.unwrap_or_default();
                Err(ApiError::NotFound(body))
            },
            StatusCode::CONFLICT => {
                let body = response.text().await.unwrap_or_default();
                Err(ApiError::Conflict(body))
            },
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(ApiError::Api {
                    status: status.as_u16(),
                    message: body,
                })
            },
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(self.request(Method::GET, path))
            .await?
            .json::<T>()
            .await
            .map_err(|e| ApiError::ResponseParseFailed(e.to_string()))
    }

    /// Fetch every record of one collection
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, API errors, or parsing failures
    pub async fn list<T: Resource>(&self) -> Result<Vec<T>, ApiError> {
        let records: Vec<T> = self.get_json(T::PATH).await?;
        tracing::debug!(path = T::PATH, count = records.len(), "fetched records");
        Ok(records)
    }

    /// Fetch every conference row (one per show date)
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, API errors, or parsing failures
    pub async fn conferences(&self) -> Result<Vec<Conference>, ApiError> {
        self.list().await
    }

    /// Fetch every exhibitor
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, API errors, or parsing failures
    pub async fn exhibitors(&self) -> Result<Vec<Exhibitor>, ApiError> {
        self.list().await
    }

    /// Fetch every organizer
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, API errors, or parsing failures
    pub async fn organizers(&self) -> Result<Vec<Organizer>, ApiError> {
        self.list().await
    }

    /// Fetch every room
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, API errors, or parsing failures
    pub async fn rooms(&self) -> Result<Vec<Room>, ApiError> {
        self.list().await
    }

    /// Fetch a participant's reservations
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, API errors, or parsing failures
    pub async fn participant_reservations(&self, participant_id: &str) -> Result<Vec<Reservation>, ApiError> {
        self.get_json(&format!("participants/{participant_id}/reservations"))
            .await
    }

    /// Reserve a seat; the server enforces quotas and double booking
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Conflict` if the server refuses the reservation,
    /// or any other request error
    pub async fn reserve(&self, participant_id: &str, conference_id: &str) -> Result<Reservation, ApiError> {
        let reservation = Reservation {
            participant_id: participant_id.to_string(),
            conference_id: conference_id.to_string(),
        };
        let created = self
            .send(self.request(Method::POST, "reservations").json(&reservation))
            .await?
            .json::<Reservation>()
            .await
            .map_err(|e| ApiError::ResponseParseFailed(e.to_string()))?;

        tracing::info!(participant_id, conference_id, "seat reserved");
        Ok(created)
    }

    /// Cancel a reservation
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if there was no such reservation, or any
    /// other request error
    pub async fn cancel_reservation(&self, participant_id: &str, conference_id: &str) -> Result<(), ApiError> {
        self.send(self.request(
            Method::DELETE,
            &format!("participants/{participant_id}/reservations/{conference_id}"),
        ))
        .await?;

        tracing::info!(participant_id, conference_id, "reservation cancelled");
        Ok(())
    }
}

/// [`RecordSource`] fetching one collection through a [`DashboardClient`]
pub struct ApiSource<T> {
    client: DashboardClient,
    _resource: PhantomData<fn() -> T>,
}

impl<T> ApiSource<T> {
    /// Create a source for `T`'s collection
    #[must_use]
    pub const fn new(client: DashboardClient) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }
}

impl<T: Resource> RecordSource<T> for ApiSource<T> {
    fn fetch(&self) -> SourceFuture<'_, Vec<T>> {
        Box::pin(async move { self.client.list::<T>().await.map_err(|e| e.to_string()) })
    }
}

/// [`FlagSource`] listing the conferences one participant has reserved
pub struct ReservationFlags {
    client: DashboardClient,
    participant_id: String,
}

impl ReservationFlags {
    /// Create a flag source for `participant_id`
    #[must_use]
    pub fn new(client: DashboardClient, participant_id: impl Into<String>) -> Self {
        Self {
            client,
            participant_id: participant_id.into(),
        }
    }
}

impl FlagSource<String> for ReservationFlags {
    fn flagged_keys(&self) -> SourceFuture<'_, Vec<String>> {
        Box::pin(async move {
            let reservations = self
                .client
                .participant_reservations(&self.participant_id)
                .await
                .map_err(|e| e.to_string())?;
            Ok(reservations
                .into_iter()
                .map(|reservation| reservation.conference_id)
                .collect())
        })
    }
}
