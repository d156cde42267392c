//! Plain-text Houseplant Watering Tracker
//!
//! Adopted plants and their watering history are stored as a YAML document
//! in a directory.

pub mod domain;
pub use domain::{
    Clock, Config, Garden, InvalidPlantName, Plant, PlantName, PlantTemplate, PlantView,
    SystemClock, Threshold, WaterEvent, WateringReport,
};

/// Filesystem storage for the plant collection.
pub mod storage;
pub use storage::{PersistenceError, PlantStore, StoreError};
