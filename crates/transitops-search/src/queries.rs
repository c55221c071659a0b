//! Per-entity query bindings over [`ApiClient`].
//!
//! One thin `SearchQuery` impl per entity kind; cancellation and
//! ordering semantics all live in the controller.

use std::sync::Arc;

use async_trait::async_trait;

use transitops_client::{
    ApiClient, BusFilter, EmployeeFilter, Page, RouteFilter, TripFilter,
};
use transitops_core::model::{Bus, Conductor, Driver, Employee, Route, ScheduledTrip};
use transitops_core::OpsError;

use crate::controller::{SearchParams, SearchQuery};
use crate::pager::PagedQuery;

impl SearchParams for BusFilter {
    fn is_blank(&self) -> bool {
        BusFilter::is_blank(self)
    }
}

impl SearchParams for EmployeeFilter {
    fn is_blank(&self) -> bool {
        EmployeeFilter::is_blank(self)
    }
}

impl SearchParams for RouteFilter {
    fn is_blank(&self) -> bool {
        RouteFilter::is_blank(self)
    }
}

impl SearchParams for TripFilter {
    fn is_blank(&self) -> bool {
        TripFilter::is_blank(self)
    }
}

/// Bus search backing query.
pub struct BusSearch {
    client: Arc<ApiClient>,
}

impl BusSearch {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SearchQuery for BusSearch {
    type Params = BusFilter;
    type Item = Bus;

    async fn run(&self, params: BusFilter) -> Result<Vec<Bus>, OpsError> {
        self.client
            .search_buses(&params)
            .await
            .map_err(|e| OpsError::from(e).with_op("search_buses"))
    }
}

/// Paginated bus search backing the infinite-scroll list.
pub struct BusPageSearch {
    client: Arc<ApiClient>,
}

impl BusPageSearch {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PagedQuery for BusPageSearch {
    type Params = BusFilter;
    type Item = Bus;

    async fn run(&self, params: &BusFilter, page: u32, size: u32) -> Result<Page<Bus>, OpsError> {
        self.client
            .search_buses_page(params, page, size)
            .await
            .map_err(|e| OpsError::from(e).with_op("search_buses_page"))
    }
}

/// Driver search backing query.
pub struct DriverSearch {
    client: Arc<ApiClient>,
}

impl DriverSearch {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SearchQuery for DriverSearch {
    type Params = EmployeeFilter;
    type Item = Driver;

    async fn run(&self, params: EmployeeFilter) -> Result<Vec<Driver>, OpsError> {
        self.client
            .search_drivers(&params)
            .await
            .map_err(|e| OpsError::from(e).with_op("search_drivers"))
    }
}

/// Conductor search backing query.
pub struct ConductorSearch {
    client: Arc<ApiClient>,
}

impl ConductorSearch {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SearchQuery for ConductorSearch {
    type Params = EmployeeFilter;
    type Item = Conductor;

    async fn run(&self, params: EmployeeFilter) -> Result<Vec<Conductor>, OpsError> {
        self.client
            .search_conductors(&params)
            .await
            .map_err(|e| OpsError::from(e).with_op("search_conductors"))
    }
}

/// Mixed-role employee search; results carry the role discriminant.
pub struct EmployeeSearch {
    client: Arc<ApiClient>,
}

impl EmployeeSearch {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SearchQuery for EmployeeSearch {
    type Params = EmployeeFilter;
    type Item = Employee;

    async fn run(&self, params: EmployeeFilter) -> Result<Vec<Employee>, OpsError> {
        self.client
            .search_employees(&params)
            .await
            .map_err(|e| OpsError::from(e).with_op("search_employees"))
    }
}

/// Route search backing query.
pub struct RouteSearch {
    client: Arc<ApiClient>,
}

impl RouteSearch {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SearchQuery for RouteSearch {
    type Params = RouteFilter;
    type Item = Route;

    async fn run(&self, params: RouteFilter) -> Result<Vec<Route>, OpsError> {
        self.client
            .search_routes(&params)
            .await
            .map_err(|e| OpsError::from(e).with_op("search_routes"))
    }
}

/// Scheduled trip search backing query.
pub struct TripSearch {
    client: Arc<ApiClient>,
}

impl TripSearch {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SearchQuery for TripSearch {
    type Params = TripFilter;
    type Item = ScheduledTrip;

    async fn run(&self, params: TripFilter) -> Result<Vec<ScheduledTrip>, OpsError> {
        self.client
            .search_trips(&params)
            .await
            .map_err(|e| OpsError::from(e).with_op("search_trips"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_satisfy_the_params_contract() {
        assert!(SearchParams::is_blank(&BusFilter::default()));
        assert!(SearchParams::is_blank(&EmployeeFilter::default()));
        assert!(!SearchParams::is_blank(&RouteFilter {
            route_number: Some("138".to_string()),
            ..Default::default()
        }));
    }
}
