//! HTTP client for the transit console's REST backend

use crate::error::{ClientError, Result};
use crate::types::*;
use reqwest::{header, Client, StatusCode};
use std::time::Duration;
use transitops_core::model::{
    AuditLog, Bus, Conductor, Driver, Employee, Route, ScheduledTrip, User,
};

/// HTTP client for the transit console's REST backend
///
/// All mutating requests ride on session-cookie credentials; the cookie
/// store is owned by the client and populated by the backend's auth
/// endpoints (authentication itself lives outside this crate).
///
/// # Example
///
/// ```rust,no_run
/// use transitops_client::{ApiClient, ClientConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ApiClient::new(ClientConfig {
///     base_url: "http://localhost:8080/api".into(),
///     ..Default::default()
/// })?;
///
/// // 404 maps to None, not an error
/// let bus = client.get_bus(42).await?;
/// # Ok(())
/// # }
/// ```
pub struct ApiClient {
    config: ClientConfig,
    client: Client,
}

impl ApiClient {
    /// Create a new client
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // ==================== Fetch-by-id ====================

    /// Fetch a bus by id; `None` when the backend reports 404
    pub async fn get_bus(&self, id: i64) -> Result<Option<Bus>> {
        self.get_optional(&format!("{}/buses/{}", self.config.base_url, id))
            .await
    }

    /// Fetch a driver by id
    pub async fn get_driver(&self, id: i64) -> Result<Option<Driver>> {
        self.get_optional(&format!("{}/drivers/{}", self.config.base_url, id))
            .await
    }

    /// Fetch a conductor by id
    pub async fn get_conductor(&self, id: i64) -> Result<Option<Conductor>> {
        self.get_optional(&format!("{}/conductors/{}", self.config.base_url, id))
            .await
    }

    /// Fetch a route by id
    pub async fn get_route(&self, id: i64) -> Result<Option<Route>> {
        self.get_optional(&format!("{}/routes/{}", self.config.base_url, id))
            .await
    }

    /// Fetch a scheduled trip by id
    pub async fn get_trip(&self, id: i64) -> Result<Option<ScheduledTrip>> {
        self.get_optional(&format!("{}/trips/{}", self.config.base_url, id))
            .await
    }

    /// Fetch a console user by id
    pub async fn get_user(&self, id: i64) -> Result<Option<User>> {
        self.get_optional(&format!("{}/users/{}", self.config.base_url, id))
            .await
    }

    // ==================== Create ====================

    /// Create a bus; the response is the server-assigned record
    pub async fn create_bus(&self, bus: &Bus) -> Result<Bus> {
        self.post_json(&format!("{}/buses", self.config.base_url), bus)
            .await
    }

    /// Create a driver
    pub async fn create_driver(&self, driver: &Driver) -> Result<Driver> {
        self.post_json(&format!("{}/drivers", self.config.base_url), driver)
            .await
    }

    /// Create a conductor
    pub async fn create_conductor(&self, conductor: &Conductor) -> Result<Conductor> {
        self.post_json(&format!("{}/conductors", self.config.base_url), conductor)
            .await
    }

    /// Create a route
    pub async fn create_route(&self, route: &Route) -> Result<Route> {
        self.post_json(&format!("{}/routes", self.config.base_url), route)
            .await
    }

    /// Create a scheduled trip
    pub async fn create_trip(&self, trip: &ScheduledTrip) -> Result<ScheduledTrip> {
        self.post_json(&format!("{}/trips", self.config.base_url), trip)
            .await
    }

    // ==================== Update ====================

    /// Update a bus; success returns the persisted record, which becomes
    /// the caller's new backup snapshot
    pub async fn update_bus(&self, id: i64, bus: &Bus) -> Result<Bus> {
        self.put_json(&format!("{}/buses/{}", self.config.base_url, id), bus)
            .await
    }

    /// Update a driver
    pub async fn update_driver(&self, id: i64, driver: &Driver) -> Result<Driver> {
        self.put_json(&format!("{}/drivers/{}", self.config.base_url, id), driver)
            .await
    }

    /// Update a conductor
    pub async fn update_conductor(&self, id: i64, conductor: &Conductor) -> Result<Conductor> {
        self.put_json(
            &format!("{}/conductors/{}", self.config.base_url, id),
            conductor,
        )
        .await
    }

    /// Update a scheduled trip
    pub async fn update_trip(&self, id: i64, trip: &ScheduledTrip) -> Result<ScheduledTrip> {
        self.put_json(&format!("{}/trips/{}", self.config.base_url, id), trip)
            .await
    }

    /// Update a console user
    pub async fn update_user(&self, id: i64, user: &User) -> Result<User> {
        self.put_json(&format!("{}/users/{}", self.config.base_url, id), user)
            .await
    }

    // ==================== Search ====================

    /// Search buses; returns a flat array
    pub async fn search_buses(&self, filter: &BusFilter) -> Result<Vec<Bus>> {
        let mut url = format!("{}/buses/search", self.config.base_url);

        let mut params = Vec::new();
        if let Some(ref reg) = filter.registration_number {
            params.push(format!("registrationNumber={}", urlencoding::encode(reg)));
        }
        if let Some(ref model) = filter.model {
            params.push(format!("model={}", urlencoding::encode(model)));
        }
        if let Some(active) = filter.active {
            params.push(format!("active={}", active));
        }
        append_query(&mut url, params);

        self.get_json(&url).await
    }

    /// Search buses with pagination; drives the infinite-scroll pager
    pub async fn search_buses_page(
        &self,
        filter: &BusFilter,
        page: u32,
        size: u32,
    ) -> Result<Page<Bus>> {
        let mut url = format!("{}/buses/search", self.config.base_url);

        let mut params = Vec::new();
        if let Some(ref reg) = filter.registration_number {
            params.push(format!("registrationNumber={}", urlencoding::encode(reg)));
        }
        if let Some(ref model) = filter.model {
            params.push(format!("model={}", urlencoding::encode(model)));
        }
        if let Some(active) = filter.active {
            params.push(format!("active={}", active));
        }
        params.push(format!("page={}", page));
        params.push(format!("size={}", size));
        append_query(&mut url, params);

        self.get_json(&url).await
    }

    /// Search drivers
    pub async fn search_drivers(&self, filter: &EmployeeFilter) -> Result<Vec<Driver>> {
        let url = crew_search_url(&self.config.base_url, "drivers", filter);
        self.get_json(&url).await
    }

    /// Search conductors
    pub async fn search_conductors(&self, filter: &EmployeeFilter) -> Result<Vec<Conductor>> {
        let url = crew_search_url(&self.config.base_url, "conductors", filter);
        self.get_json(&url).await
    }

    /// Search across both crew roles; each record carries its `role`
    /// discriminant
    pub async fn search_employees(&self, filter: &EmployeeFilter) -> Result<Vec<Employee>> {
        let url = crew_search_url(&self.config.base_url, "employees", filter);
        self.get_json(&url).await
    }

    /// Search routes
    pub async fn search_routes(&self, filter: &RouteFilter) -> Result<Vec<Route>> {
        let mut url = format!("{}/routes/search", self.config.base_url);

        let mut params = Vec::new();
        if let Some(ref number) = filter.route_number {
            params.push(format!("routeNumber={}", urlencoding::encode(number)));
        }
        if let Some(ref origin) = filter.origin {
            params.push(format!("origin={}", urlencoding::encode(origin)));
        }
        if let Some(ref destination) = filter.destination {
            params.push(format!("destination={}", urlencoding::encode(destination)));
        }
        append_query(&mut url, params);

        self.get_json(&url).await
    }

    /// Search scheduled trips
    pub async fn search_trips(&self, filter: &TripFilter) -> Result<Vec<ScheduledTrip>> {
        let mut url = format!("{}/trips/search", self.config.base_url);

        let mut params = Vec::new();
        if let Some(route_id) = filter.route_id {
            params.push(format!("routeId={}", route_id));
        }
        if let Some(bus_id) = filter.bus_id {
            params.push(format!("busId={}", bus_id));
        }
        if let Some(ref date) = filter.service_date {
            params.push(format!("serviceDate={}", urlencoding::encode(date)));
        }
        append_query(&mut url, params);

        self.get_json(&url).await
    }

    // ==================== Audit ====================

    /// List audit log entries, newest first
    pub async fn list_audit_logs(&self, filter: &AuditFilter) -> Result<Vec<AuditLog>> {
        let mut url = format!("{}/audit-logs", self.config.base_url);

        let mut params = Vec::new();
        if let Some(ref actor) = filter.actor {
            params.push(format!("actor={}", urlencoding::encode(actor)));
        }
        if let Some(ref kind) = filter.entity_kind {
            params.push(format!("entityKind={}", urlencoding::encode(kind)));
        }
        append_query(&mut url, params);

        self.get_json(&url).await
    }

    // ==================== Helper Methods ====================

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.client.get(url).send().await?;
        handle_response(response).await
    }

    async fn get_optional<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<Option<T>> {
        let response = self.client.get(url).send().await?;
        match handle_response(response).await {
            Ok(value) => Ok(Some(value)),
            Err(ClientError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn post_json<B, T>(&self, url: &str, body: &B) -> Result<T>
    where
        B: serde::Serialize,
        T: serde::de::DeserializeOwned,
    {
        let response = self
            .client
            .post(url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await?;
        handle_response(response).await
    }

    async fn put_json<B, T>(&self, url: &str, body: &B) -> Result<T>
    where
        B: serde::Serialize,
        T: serde::de::DeserializeOwned,
    {
        let response = self
            .client
            .put(url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await?;
        handle_response(response).await
    }
}

fn append_query(url: &mut String, params: Vec<String>) {
    if !params.is_empty() {
        url.push('?');
        url.push_str(&params.join("&"));
    }
}

fn crew_search_url(base_url: &str, segment: &str, filter: &EmployeeFilter) -> String {
    let mut url = format!("{}/{}/search", base_url, segment);

    let mut params = Vec::new();
    if let Some(ref name) = filter.name {
        params.push(format!("name={}", urlencoding::encode(name)));
    }
    if let Some(ref nic) = filter.nic {
        params.push(format!("nic={}", urlencoding::encode(nic)));
    }
    append_query(&mut url, params);
    url
}

async fn handle_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T> {
    if response.status() == StatusCode::NOT_FOUND {
        return Err(ClientError::NotFound("Record not found".to_string()));
    }

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        return Err(ClientError::Server {
            status,
            message: body,
        });
    }

    let body = response.json().await?;
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crew_search_url_encodes_filters() {
        let filter = EmployeeFilter {
            name: Some("Ruwan Perera".to_string()),
            nic: None,
        };
        let url = crew_search_url("http://x/api", "drivers", &filter);
        assert_eq!(url, "http://x/api/drivers/search?name=Ruwan%20Perera");
    }

    #[test]
    fn test_blank_filter_yields_bare_url() {
        let url = crew_search_url("http://x/api", "employees", &EmployeeFilter::default());
        assert_eq!(url, "http://x/api/employees/search");
    }
}
