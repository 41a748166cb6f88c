//! Document Model
//!
//! Pure data: the parsed manifest handed to the validation engine.

pub mod schema;

pub use schema::{
    Container, ContainerPort, CpuQuantity, Document, HttpGetAction, Metadata, PodSpec, Probe,
    ResourceLimits, ResourceRequirements,
};
