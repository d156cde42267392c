//! In-memory collection of adopted plants
//!
//! The [`Garden`] knows nothing about the filesystem. It stores plants in a
//! decomposed format: plant data keyed by name, and watering events keyed by
//! the name of the plant that owns them.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::instrument;

use crate::domain::{InvalidPlantName, Plant, PlantName, PlantTemplate, PlantView, WaterEvent};

/// The mutable content of a plant, excluding its identity and history.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PlantData {
    details: String,
    icon_reference: String,
}

/// An in-memory representation of the adopted plants.
///
/// Plants are stored as separate components:
/// - Insertion order: `Vec<PlantName>`
/// - Content data: `HashMap<PlantName, PlantData>`
/// - Watering history: `HashMap<PlantName, Vec<WaterEvent>>`, owned by the
///   plant and removed with it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Garden {
    /// Plant names in the order they were adopted.
    order: Vec<PlantName>,

    /// Plant data, keyed by name.
    plants: HashMap<PlantName, PlantData>,

    /// Watering events, keyed by the name of the owning plant.
    /// Events are kept in the order they were recorded.
    waterings: HashMap<PlantName, Vec<WaterEvent>>,
}

/// Errors that can occur when mutating a [`Garden`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A plant with this name has already been adopted.
    #[error("a plant named '{0}' already exists")]
    DuplicateName(PlantName),
    /// No plant with this name exists.
    #[error("no plant named '{0}'")]
    NotFound(String),
    /// The plant name is not valid.
    #[error(transparent)]
    InvalidName(#[from] InvalidPlantName),
}

impl Garden {
    /// Creates a new garden with pre-allocated capacity for the given number
    /// of plants.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            order: Vec::with_capacity(capacity),
            plants: HashMap::with_capacity(capacity),
            waterings: HashMap::with_capacity(capacity),
        }
    }

    /// Inserts a plant, together with its watering history.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateName`] if a plant with the same name already
    /// exists. The garden is unchanged in that case.
    pub fn insert(&mut self, plant: Plant) -> Result<(), Error> {
        if self.plants.contains_key(&plant.name) {
            return Err(Error::DuplicateName(plant.name));
        }

        let Plant {
            name,
            details,
            icon_reference,
            waterings,
        } = plant;

        self.order.push(name.clone());
        self.waterings.insert(name.clone(), waterings);
        self.plants.insert(
            name,
            PlantData {
                details,
                icon_reference,
            },
        );

        Ok(())
    }

    /// Adopts a catalog template as a new plant with an empty history.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateName`] if a plant with the template's name
    /// already exists.
    #[instrument(level = "debug", skip(self, template), fields(name = template.name))]
    pub fn adopt(&mut self, template: &PlantTemplate) -> Result<Plant, Error> {
        let plant = Plant::from_template(template)?;
        self.insert(plant.clone())?;
        Ok(plant)
    }

    /// Removes a plant and every watering event it owns.
    ///
    /// Returns the removed plant, including its history.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if there is no plant with this name.
    pub fn remove(&mut self, name: &str) -> Result<Plant, Error> {
        let (name, data) = self
            .plants
            .remove_entry(name)
            .ok_or_else(|| Error::NotFound(name.to_string()))?;

        self.order.retain(|n| n != &name);
        let waterings = self.waterings.remove(&name).unwrap_or_default();

        Ok(Plant {
            name,
            details: data.details,
            icon_reference: data.icon_reference,
            waterings,
        })
    }

    /// Appends a watering event to a plant's history.
    ///
    /// No ordering is enforced: events may be recorded out of chronological
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if there is no plant with this name.
    pub fn record_watering(&mut self, name: &str, at: DateTime<Utc>) -> Result<WaterEvent, Error> {
        let (key, _) = self
            .plants
            .get_key_value(name)
            .ok_or_else(|| Error::NotFound(name.to_string()))?;

        let event = WaterEvent::new(at);
        self.waterings.entry(key.clone()).or_default().push(event);

        Ok(event)
    }

    /// Retrieves a plant by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<PlantView<'_>> {
        let (name, data) = self.plants.get_key_value(name)?;
        Some(self.view(name, data))
    }

    /// Whether a plant with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.plants.contains_key(name)
    }

    /// Iterates over every plant, in the order they were adopted.
    pub fn plants(&self) -> impl Iterator<Item = PlantView<'_>> {
        self.order
            .iter()
            .filter_map(|name| self.plants.get(name).map(|data| self.view(name, data)))
    }

    /// The number of adopted plants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no plants have been adopted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The total number of watering events across all plants.
    #[must_use]
    pub fn watering_count(&self) -> usize {
        self.waterings.values().map(Vec::len).sum()
    }

    fn view<'a>(&'a self, name: &'a PlantName, data: &'a PlantData) -> PlantView<'a> {
        PlantView {
            name,
            details: &data.details,
            icon_reference: &data.icon_reference,
            waterings: self.waterings.get(name).map_or(&[][..], Vec::as_slice),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::domain::catalog;

    fn template(name: &'static str) -> PlantTemplate {
        PlantTemplate {
            name,
            details: "details",
            icon_reference: "Icon",
        }
    }

    fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap() + chrono::TimeDelta::days(n)
    }

    #[test]
    fn adopt_copies_template_with_empty_history() {
        let mut garden = Garden::default();
        let template = catalog::find("Monstera deliciosa").unwrap();

        let plant = garden.adopt(template).unwrap();

        assert_eq!(plant.name.as_str(), template.name);
        assert_eq!(plant.details, template.details);
        assert_eq!(plant.icon_reference, template.icon_reference);
        assert!(plant.waterings.is_empty());
        assert_eq!(garden.get("Monstera deliciosa"), Some(plant.view()));
    }

    #[test]
    fn distinct_adopts_are_all_present() {
        let mut garden = Garden::default();
        for template in catalog::list() {
            garden.adopt(template).unwrap();
        }

        let names: Vec<_> = garden.plants().map(|p| p.name.as_str()).collect();
        let expected: Vec<_> = catalog::list().iter().map(|t| t.name).collect();
        assert_eq!(names, expected);
        assert_eq!(garden.len(), catalog::list().len());
    }

    #[test]
    fn duplicate_adopt_fails_without_mutation() {
        let mut garden = Garden::default();
        garden.adopt(&template("Monstera deliciosa")).unwrap();
        garden
            .record_watering("Monstera deliciosa", day(1))
            .unwrap();
        let before = garden.clone();

        let error = garden.adopt(&template("Monstera deliciosa")).unwrap_err();

        assert!(matches!(error, Error::DuplicateName(name) if name.as_str() == "Monstera deliciosa"));
        assert_eq!(garden, before);
        assert_eq!(garden.len(), 1);
    }

    #[test]
    fn names_differing_in_case_are_distinct() {
        let mut garden = Garden::default();
        garden.adopt(&template("euphorbe")).unwrap();
        garden.adopt(&template("Euphorbe")).unwrap();
        assert_eq!(garden.len(), 2);
    }

    #[test]
    fn empty_template_name_is_rejected() {
        let mut garden = Garden::default();
        let error = garden.adopt(&template("")).unwrap_err();
        assert_eq!(error, Error::InvalidName(InvalidPlantName));
        assert!(garden.is_empty());
    }

    #[test]
    fn remove_cascades_to_waterings() {
        let mut garden = Garden::default();
        garden.adopt(&template("Alocasia Frydek")).unwrap();
        garden.adopt(&template("Euphorbe")).unwrap();
        garden.record_watering("Alocasia Frydek", day(1)).unwrap();
        garden.record_watering("Alocasia Frydek", day(2)).unwrap();
        garden.record_watering("Euphorbe", day(3)).unwrap();

        let removed = garden.remove("Alocasia Frydek").unwrap();

        assert_eq!(removed.waterings.len(), 2);
        assert!(garden.get("Alocasia Frydek").is_none());
        assert!(!garden.contains("Alocasia Frydek"));
        assert_eq!(garden.watering_count(), 1);
        assert_eq!(
            garden.plants().map(|p| p.name.as_str()).collect::<Vec<_>>(),
            vec!["Euphorbe"]
        );
    }

    #[test]
    fn readopting_after_remove_starts_with_empty_history() {
        let mut garden = Garden::default();
        garden.adopt(&template("Euphorbe")).unwrap();
        garden.record_watering("Euphorbe", day(1)).unwrap();
        garden.remove("Euphorbe").unwrap();

        garden.adopt(&template("Euphorbe")).unwrap();

        assert!(garden.get("Euphorbe").unwrap().waterings.is_empty());
    }

    #[test]
    fn remove_missing_plant_is_not_found() {
        let mut garden = Garden::default();
        assert_eq!(
            garden.remove("Ficus"),
            Err(Error::NotFound("Ficus".to_string()))
        );
    }

    #[test]
    fn record_watering_appends_in_insertion_order() {
        let mut garden = Garden::default();
        garden.adopt(&template("Calathea Kennedy")).unwrap();

        garden.record_watering("Calathea Kennedy", day(5)).unwrap();
        garden.record_watering("Calathea Kennedy", day(2)).unwrap();

        let plant = garden.get("Calathea Kennedy").unwrap();
        let timestamps: Vec<_> = plant.waterings.iter().map(WaterEvent::timestamp).collect();
        assert_eq!(timestamps, vec![day(5), day(2)]);
        assert_eq!(plant.most_recent_watering(), Some(day(5)));
    }

    #[test]
    fn record_watering_on_missing_plant_is_not_found() {
        let mut garden = Garden::default();
        assert_eq!(
            garden.record_watering("Ficus", day(1)),
            Err(Error::NotFound("Ficus".to_string()))
        );
        assert_eq!(garden.watering_count(), 0);
    }

    #[test]
    fn insert_restores_history() {
        let mut garden = Garden::with_capacity(1);
        let mut plant = Plant::from_template(&template("Euphorbe")).unwrap();
        plant.waterings = vec![WaterEvent::new(day(1)), WaterEvent::new(day(4))];

        garden.insert(plant.clone()).unwrap();

        assert_eq!(garden.get("Euphorbe").unwrap().to_plant(), plant);
    }
}
