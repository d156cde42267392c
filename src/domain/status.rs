//! Watering status of a plant collection.
//!
//! A plant "needs water" if and only if it has no watering event strictly
//! after `now - threshold`. Everything here is recomputed from the given
//! snapshot on every call.

use chrono::{DateTime, TimeDelta, Utc};

use crate::domain::{Clock, PlantView};

/// The staleness threshold: how long a plant may go without water before it
/// is considered overdue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Threshold(TimeDelta);

impl Threshold {
    /// The default threshold, in days.
    pub const DEFAULT_DAYS: u32 = 7;

    /// A threshold of the given number of days.
    #[must_use]
    pub fn days(days: u32) -> Self {
        Self(TimeDelta::days(i64::from(days)))
    }

    /// A threshold of an arbitrary duration.
    #[must_use]
    pub const fn from_delta(delta: TimeDelta) -> Self {
        Self(delta)
    }

    /// The threshold as a duration.
    #[must_use]
    pub const fn as_delta(self) -> TimeDelta {
        self.0
    }

    /// The instant after which a watering counts as recent.
    ///
    /// Saturates at the earliest representable instant.
    #[must_use]
    pub fn cutoff(self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_sub_signed(self.0)
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self::days(Self::DEFAULT_DAYS)
    }
}

/// The most recent watering of a plant, or `None` if it was never watered.
#[must_use]
pub fn most_recent_watering(plant: &PlantView<'_>) -> Option<DateTime<Utc>> {
    plant.most_recent_watering()
}

/// Whether a single plant is overdue for water.
#[must_use]
pub fn is_overdue(plant: &PlantView<'_>, threshold: Threshold, now: DateTime<Utc>) -> bool {
    let cutoff = threshold.cutoff(now);
    !plant.waterings.iter().any(|w| w.timestamp() > cutoff)
}

/// The plants that are overdue for water, in input order.
///
/// A plant with no watering history is always overdue.
#[must_use]
pub fn needs_water<'a>(
    plants: impl IntoIterator<Item = PlantView<'a>>,
    threshold: Threshold,
    now: DateTime<Utc>,
) -> Vec<PlantView<'a>> {
    plants
        .into_iter()
        .filter(|plant| is_overdue(plant, threshold, now))
        .collect()
}

/// The plants that are not overdue for water, in input order.
///
/// This is the complement of [`needs_water`].
#[must_use]
pub fn okay<'a>(
    plants: impl IntoIterator<Item = PlantView<'a>>,
    threshold: Threshold,
    now: DateTime<Utc>,
) -> Vec<PlantView<'a>> {
    plants
        .into_iter()
        .filter(|plant| !is_overdue(plant, threshold, now))
        .collect()
}

/// Both halves of the partition, each sorted by name for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WateringReport<'a> {
    /// Plants overdue for water, sorted by name.
    pub needs_water: Vec<PlantView<'a>>,
    /// Plants watered recently enough, sorted by name.
    pub okay: Vec<PlantView<'a>>,
}

impl<'a> WateringReport<'a> {
    /// Iterates over every plant in display order: the overdue plants first,
    /// then the rest.
    pub fn rows(&self) -> impl Iterator<Item = PlantView<'a>> + '_ {
        self.needs_water.iter().chain(&self.okay).copied()
    }

    /// The total number of plants in the report.
    #[must_use]
    pub fn len(&self) -> usize {
        self.needs_water.len() + self.okay.len()
    }

    /// Whether the report has no plants.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.needs_water.is_empty() && self.okay.is_empty()
    }
}

/// Partitions plants into overdue and okay in a single pass.
///
/// Each half is sorted by name, ascending and case-sensitive.
#[must_use]
pub fn partition<'a>(
    plants: impl IntoIterator<Item = PlantView<'a>>,
    threshold: Threshold,
    now: DateTime<Utc>,
) -> WateringReport<'a> {
    let (mut needs_water, mut okay): (Vec<_>, Vec<_>) = plants
        .into_iter()
        .partition(|plant| is_overdue(plant, threshold, now));

    needs_water.sort_by(|a, b| a.name.cmp(b.name));
    okay.sort_by(|a, b| a.name.cmp(b.name));

    WateringReport { needs_water, okay }
}

/// Partitions plants as of the clock's current instant.
#[must_use]
pub fn report<'a>(
    plants: impl IntoIterator<Item = PlantView<'a>>,
    threshold: Threshold,
    clock: &impl Clock,
) -> WateringReport<'a> {
    partition(plants, threshold, clock.now())
}
