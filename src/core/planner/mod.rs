//! Plan operations over the curriculum dataset
//!
//! Everything here is a pure function of the dataset and the request: nothing
//! is cached or persisted between calls.

pub mod catalog;
pub mod malla;
pub mod progress;
pub mod requisites;
pub mod semesters;

pub use catalog::{catalog, Catalog};
pub use malla::{build_malla, dedupe_by_sigla, Malla};
pub use progress::{progress, Progress};
pub use requisites::{requisite_sets, RequisiteSets};
pub use semesters::{board_id, SemesterBoard, SemesterColumn};
