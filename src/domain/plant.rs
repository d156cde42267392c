use std::{
    borrow::Borrow,
    fmt,
    hash::{Hash, Hasher},
    ops::Deref,
    str::FromStr,
};

use chrono::{DateTime, Utc};
use non_empty_string::NonEmptyString;
use serde::{Deserialize, Serialize};

use crate::domain::PlantTemplate;

/// The name of an adopted plant.
///
/// Names are the natural key of the collection: they must be non-empty and
/// are compared exactly (case-sensitive).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlantName(NonEmptyString);

impl PlantName {
    /// Creates a new `PlantName` from a string.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPlantName` if the string is empty.
    pub fn new(s: impl Into<String>) -> Result<Self, InvalidPlantName> {
        NonEmptyString::new(s.into())
            .map(Self)
            .map_err(|_| InvalidPlantName)
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Hash for PlantName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl Borrow<str> for PlantName {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<String> for PlantName {
    type Error = InvalidPlantName;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for PlantName {
    type Error = InvalidPlantName;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for PlantName {
    type Err = InvalidPlantName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<PlantName> for String {
    fn from(name: PlantName) -> Self {
        name.as_str().to_string()
    }
}

impl AsRef<str> for PlantName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Deref for PlantName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl fmt::Display for PlantName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a plant name is empty.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("plant name must not be empty")]
pub struct InvalidPlantName;

/// A single recorded watering.
///
/// Watering events are immutable once recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WaterEvent {
    timestamp: DateTime<Utc>,
}

impl WaterEvent {
    /// Creates a watering event at the given instant.
    #[must_use]
    pub const fn new(timestamp: DateTime<Utc>) -> Self {
        Self { timestamp }
    }

    /// When the plant was watered.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// An adopted houseplant together with its watering history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plant {
    /// The unique name of the plant.
    pub name: PlantName,
    /// Free-text description.
    pub details: String,
    /// Name of a visual asset. Opaque to this crate.
    pub icon_reference: String,
    /// Watering history, in the order the events were recorded.
    pub waterings: Vec<WaterEvent>,
}

impl Plant {
    /// Creates a plant with an empty watering history.
    #[must_use]
    pub const fn new(name: PlantName, details: String, icon_reference: String) -> Self {
        Self {
            name,
            details,
            icon_reference,
            waterings: Vec::new(),
        }
    }

    /// Creates a plant by copying the fields of a catalog template.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPlantName` if the template has an empty name.
    pub fn from_template(template: &PlantTemplate) -> Result<Self, InvalidPlantName> {
        Ok(Self::new(
            PlantName::new(template.name)?,
            template.details.to_string(),
            template.icon_reference.to_string(),
        ))
    }

    /// Borrow this plant as a [`PlantView`].
    #[must_use]
    pub fn view(&self) -> PlantView<'_> {
        PlantView {
            name: &self.name,
            details: &self.details,
            icon_reference: &self.icon_reference,
            waterings: &self.waterings,
        }
    }
}

/// A borrowed view of an adopted plant.
///
/// Views are cheap to copy and are what the collection hands out for reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlantView<'a> {
    /// The unique name of the plant.
    pub name: &'a PlantName,
    /// Free-text description.
    pub details: &'a str,
    /// Name of a visual asset.
    pub icon_reference: &'a str,
    /// Watering history, in the order the events were recorded.
    pub waterings: &'a [WaterEvent],
}

impl PlantView<'_> {
    /// The most recent watering, if the plant has ever been watered.
    ///
    /// This is the maximum timestamp across the history, regardless of the
    /// order in which the events were recorded.
    #[must_use]
    pub fn most_recent_watering(&self) -> Option<DateTime<Utc>> {
        self.waterings.iter().map(WaterEvent::timestamp).max()
    }

    /// The watering history sorted newest first.
    #[must_use]
    pub fn waterings_newest_first(&self) -> Vec<WaterEvent> {
        let mut waterings = self.waterings.to_vec();
        waterings.sort_unstable_by(|a, b| b.cmp(a));
        waterings
    }

    /// Creates an owned [`Plant`] from this view.
    #[must_use]
    pub fn to_plant(&self) -> Plant {
        Plant {
            name: self.name.clone(),
            details: self.details.to_string(),
            icon_reference: self.icon_reference.to_string(),
            waterings: self.waterings.to_vec(),
        }
    }
}
