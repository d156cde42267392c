//! A filesystem backed store of plants
//!
//! The [`PlantStore`] persists the collection as a YAML document in a
//! directory. It is a wrapper around the filesystem agnostic [`Garden`].
//!
//! Every mutation is a transaction: the change is applied to a copy of the
//! garden, the copy is written to disk, and only then does it replace the
//! in-memory state. A failed operation leaves both untouched.

use std::{
    collections::BTreeSet,
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use tracing::instrument;

use crate::{
    domain::{
        Garden, InvalidPlantName, Plant, PlantName, PlantTemplate, PlantView, WaterEvent, garden,
    },
    storage::document::{Document, InconsistentDocument},
};

/// A filesystem backed store of plants.
#[derive(Debug)]
pub struct PlantStore {
    /// The directory the data file lives in.
    root: PathBuf,
    garden: Garden,
}

/// Errors returned by [`PlantStore`] operations.
///
/// None of these are fatal: the store remains usable after any of them.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A plant with this name has already been adopted.
    #[error("a plant named '{0}' already exists")]
    DuplicateName(PlantName),
    /// No plant with this name exists.
    #[error("no plant named '{0}'")]
    NotFound(String),
    /// The plant name is not valid.
    #[error(transparent)]
    InvalidName(#[from] InvalidPlantName),
    /// A row index does not refer to an entry of the given sequence.
    #[error("row {index} is out of range ({len} rows)")]
    IndexOutOfRange {
        /// The offending zero-based index.
        index: usize,
        /// The length of the sequence.
        len: usize,
    },
    /// The collection could not be written to disk.
    ///
    /// The operation may be retried.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl From<garden::Error> for StoreError {
    fn from(error: garden::Error) -> Self {
        match error {
            garden::Error::DuplicateName(name) => Self::DuplicateName(name),
            garden::Error::NotFound(name) => Self::NotFound(name),
            garden::Error::InvalidName(e) => Self::InvalidName(e),
        }
    }
}

/// Errors reading or writing the data file.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    /// The data file could not be read or written.
    #[error("failed to access {}: {source}", path.display())]
    Io {
        /// The path being accessed.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },
    /// The data file is not a valid document.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        /// The path of the data file.
        path: PathBuf,
        /// The underlying error.
        source: serde_yaml::Error,
    },
    /// The collection could not be serialized.
    #[error("failed to serialize plants: {0}")]
    Serialize(#[source] serde_yaml::Error),
    /// The data file parses but violates the collection's invariants.
    #[error("inconsistent data in {}: {source}", path.display())]
    Inconsistent {
        /// The path of the data file.
        path: PathBuf,
        /// What is wrong with it.
        source: InconsistentDocument,
    },
}

impl PlantStore {
    /// The name of the data file within the store root.
    pub const FILE_NAME: &'static str = "plants.yaml";

    /// Opens the store in the given directory, loading any existing plants.
    ///
    /// A missing data file (or directory) is an empty store; nothing is
    /// written until the first mutation.
    ///
    /// # Errors
    ///
    /// Returns an error if the data file exists but cannot be read, parsed,
    /// or violates the collection's invariants.
    #[instrument(level = "debug", skip_all, fields(root = %root.as_ref().display()))]
    pub fn open(root: impl AsRef<Path>) -> Result<Self, PersistenceError> {
        let root = root.as_ref().to_path_buf();
        let path = root.join(Self::FILE_NAME);

        let garden = match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => Garden::default(),
            Ok(content) => {
                let document: Document =
                    serde_yaml::from_str(&content).map_err(|source| PersistenceError::Parse {
                        path: path.clone(),
                        source,
                    })?;
                Garden::try_from(document)
                    .map_err(|source| PersistenceError::Inconsistent { path, source })?
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("No data file at {}, starting empty", path.display());
                Garden::default()
            }
            Err(source) => return Err(PersistenceError::Io { path, source }),
        };

        tracing::debug!(
            "Loaded {} plant(s) and {} watering(s)",
            garden.len(),
            garden.watering_count()
        );

        Ok(Self { root, garden })
    }

    /// The directory the store lives in.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The path of the data file.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.root.join(Self::FILE_NAME)
    }

    /// The in-memory collection.
    #[must_use]
    pub const fn garden(&self) -> &Garden {
        &self.garden
    }

    /// Adopts a catalog template as a new plant with an empty watering
    /// history.
    ///
    /// # Errors
    ///
    /// - [`StoreError::DuplicateName`] if a plant with that name exists; the
    ///   store is unchanged.
    /// - [`StoreError::Persistence`] if the change cannot be written.
    pub fn add(&mut self, template: &PlantTemplate) -> Result<Plant, StoreError> {
        let plant = self.transact(|garden| garden.adopt(template))?;
        tracing::info!("Added plant: {}", plant.name);
        Ok(plant)
    }

    /// Removes a plant and all of its watering events.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`] if there is no plant with that name.
    /// - [`StoreError::Persistence`] if the change cannot be written.
    pub fn remove(&mut self, name: &str) -> Result<(), StoreError> {
        let removed = self.transact(|garden| garden.remove(name))?;
        tracing::info!(
            "Removed plant: {} ({} watering(s))",
            removed.name,
            removed.waterings.len()
        );
        Ok(())
    }

    /// Removes the plants at the given positions of an ordered sequence, as
    /// displayed by a list.
    ///
    /// The targets are collected before anything is removed, so the indices
    /// all refer to `from` as it was given. Repeated indices are ignored. The
    /// whole batch is a single transaction.
    ///
    /// # Errors
    ///
    /// - [`StoreError::IndexOutOfRange`] if any index is past the end of
    ///   `from`; nothing is removed.
    /// - [`StoreError::NotFound`] if a targeted plant is no longer in the
    ///   store; nothing is removed.
    /// - [`StoreError::Persistence`] if the change cannot be written.
    pub fn remove_at(&mut self, indices: &[usize], from: &[PlantName]) -> Result<(), StoreError> {
        let targets = indices
            .iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(|index| {
                from.get(index).ok_or_else(|| StoreError::IndexOutOfRange {
                    index,
                    len: from.len(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.transact(|garden| {
            for name in &targets {
                garden.remove(name)?;
            }
            Ok(())
        })?;

        for name in targets {
            tracing::info!("Removed plant: {name}");
        }
        Ok(())
    }

    /// Appends a watering event to a plant's history.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`] if there is no plant with that name.
    /// - [`StoreError::Persistence`] if the change cannot be written.
    pub fn record_watering(
        &mut self,
        name: &str,
        at: DateTime<Utc>,
    ) -> Result<WaterEvent, StoreError> {
        let event = self.transact(|garden| garden.record_watering(name, at))?;
        tracing::info!("Watered {name} at {at}");
        Ok(event)
    }

    /// Every adopted plant, in the order they were added.
    #[must_use]
    pub fn all(&self) -> Vec<PlantView<'_>> {
        self.garden.plants().collect()
    }

    /// Retrieves a plant by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<PlantView<'_>> {
        self.garden.get(name)
    }

    fn transact<T>(
        &mut self,
        f: impl FnOnce(&mut Garden) -> Result<T, garden::Error>,
    ) -> Result<T, StoreError> {
        let mut staged = self.garden.clone();
        let output = f(&mut staged)?;
        self.write(&staged)?;
        self.garden = staged;
        Ok(output)
    }

    /// Atomically replaces the data file with the given garden.
    fn write(&self, garden: &Garden) -> Result<(), PersistenceError> {
        let path = self.path();
        let io_error = |source| PersistenceError::Io {
            path: path.clone(),
            source,
        };

        let content =
            serde_yaml::to_string(&Document::from(garden)).map_err(PersistenceError::Serialize)?;

        fs::create_dir_all(&self.root).map_err(io_error)?;

        let mut file = tempfile::NamedTempFile::new_in(&self.root).map_err(io_error)?;
        file.write_all(content.as_bytes()).map_err(io_error)?;
        file.as_file().sync_all().map_err(io_error)?;
        file.persist(&path).map_err(|e| io_error(e.error))?;

        tracing::debug!("Wrote {}", path.display());
        Ok(())
    }
}
