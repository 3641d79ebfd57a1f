//! Data models for `MallaPlanner`

pub mod catalog;
pub mod dataset;
mod lenient;
pub mod ramo;

pub use catalog::{MajorInfo, MinorInfo};
pub use dataset::{MallaKey, MallasDataset, NO_MINOR};
pub use ramo::{Ramo, Requisite, RequisiteKind, Requisitos};
