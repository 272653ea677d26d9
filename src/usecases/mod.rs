//! Application use cases. Orchestrate domain logic via ports.

pub mod dispatch_service;
pub mod throttle;

pub use dispatch_service::DispatchService;
pub use throttle::Throttle;
