//! Domain models for plant bookkeeping.
//!
//! This module contains the core domain types including plants, watering
//! events, the preset catalog, and the watering status read-model.

/// The preset catalog of plant species.
pub mod catalog;
pub use catalog::PlantTemplate;

mod clock;
pub use clock::{Clock, FixedClock, SystemClock};

mod config;
pub use config::Config;

/// The in-memory, filesystem agnostic plant collection.
pub mod garden;
pub use garden::Garden;

mod plant;
pub use plant::{InvalidPlantName, Plant, PlantName, PlantView, WaterEvent};

/// Partitioning of plants into "needs water" and "okay".
pub mod status;
pub use status::{Threshold, WateringReport};
