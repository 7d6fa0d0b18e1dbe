//! Resource namespaces for the Analytics Engine API.

mod applications;
mod cluster;
mod instance;

pub use applications::{ApplicationsPager, ApplicationsResource};
pub use cluster::ClusterResource;
pub use instance::InstanceResource;
