//! Server-managed record types for the transit console.
//!
//! Every type here is a flat wire record with camelCase field names,
//! deserialised straight from the backend's JSON responses. The flat shape
//! matters: the diff engine only accepts records whose fields are scalar,
//! and these types are designed to stay within that contract (with
//! [`route::Route`] as the documented exception).

pub mod audit;
pub mod bus;
pub mod employee;
pub mod route;
pub mod trip;
pub mod user;

pub use audit::AuditLog;
pub use bus::Bus;
pub use employee::{Conductor, Driver, Employee};
pub use route::Route;
pub use trip::{Assignment, AssignmentStatus, ScheduledTrip, TripDirection};
pub use user::User;
