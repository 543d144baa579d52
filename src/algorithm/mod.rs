//! Analysis algorithms over the event dataset

pub mod frequency;
