//! The on-disk representation of the plant collection.
//!
//! The collection is stored as a single YAML document holding two record
//! kinds: plants, and watering events that refer to their plant by name.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{Garden, Plant, PlantName};

/// The serialized versions of the document.
/// This allows for future changes to the storage format and to the domain
/// types without breaking compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "_version")]
pub enum Document {
    #[serde(rename = "1")]
    V1 {
        #[serde(default, deserialize_with = "null_as_empty")]
        plants: Vec<PlantRecord>,

        #[serde(default, deserialize_with = "null_as_empty")]
        waterings: Vec<WaterRecord>,
    },
}

/// A section with no entries (`plants:` on its own) reads as an empty list.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantRecord {
    name: String,
    #[serde(default)]
    details: String,
    #[serde(default, rename = "icon")]
    icon_reference: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaterRecord {
    plant: String,
    timestamp: DateTime<Utc>,
}

/// A stored document that violates the collection's invariants.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InconsistentDocument {
    /// A plant record has an empty name.
    #[error("plant record {index} has an empty name")]
    EmptyName {
        /// Position of the record in the document.
        index: usize,
    },
    /// Two plant records share a name.
    #[error("plant '{0}' is listed more than once")]
    DuplicateName(String),
    /// A watering record refers to a plant that does not exist.
    #[error("watering at {timestamp} refers to unknown plant '{plant}'")]
    UnknownPlant {
        /// The name the record refers to.
        plant: String,
        /// When the watering happened.
        timestamp: DateTime<Utc>,
    },
}

impl From<&Garden> for Document {
    fn from(garden: &Garden) -> Self {
        let mut plants = Vec::with_capacity(garden.len());
        let mut waterings = Vec::with_capacity(garden.watering_count());

        for plant in garden.plants() {
            plants.push(PlantRecord {
                name: plant.name.to_string(),
                details: plant.details.to_string(),
                icon_reference: plant.icon_reference.to_string(),
            });
            waterings.extend(plant.waterings.iter().map(|event| WaterRecord {
                plant: plant.name.to_string(),
                timestamp: event.timestamp(),
            }));
        }

        Self::V1 { plants, waterings }
    }
}

impl TryFrom<Document> for Garden {
    type Error = InconsistentDocument;

    fn try_from(document: Document) -> Result<Self, Self::Error> {
        match document {
            Document::V1 { plants, waterings } => {
                let mut garden = Self::with_capacity(plants.len());

                for (index, record) in plants.into_iter().enumerate() {
                    let name = PlantName::new(record.name)
                        .map_err(|_| InconsistentDocument::EmptyName { index })?;
                    let duplicate = name.to_string();
                    garden
                        .insert(Plant::new(name, record.details, record.icon_reference))
                        .map_err(|_| InconsistentDocument::DuplicateName(duplicate))?;
                }

                for record in waterings {
                    garden
                        .record_watering(&record.plant, record.timestamp)
                        .map_err(|_| InconsistentDocument::UnknownPlant {
                            plant: record.plant.clone(),
                            timestamp: record.timestamp,
                        })?;
                }

                Ok(garden)
            }
        }
    }
}
