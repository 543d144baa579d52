//! Event records and the event dataset

pub mod dataset;
pub mod event;

pub use dataset::EventDataset;
pub use event::{Event, WorkPerformance};
