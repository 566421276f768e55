use thiserror::Error;

/// The seven stock practice assignments.
pub const DEFAULT_ASSIGNMENTS: [&str; 7] = [
    "Reflex scale drills",
    "Segovia C major scales",
    "Carlevaro arpeggio studies",
    "Carcassi accent etudes",
    "Carlevaro ligado training",
    "Shifting reflex training",
    "Octave reflex training",
];

/// Ordered list of practice assignments, fixed for the process lifetime.
///
/// The 0-based position of a name is the durable identity of the
/// assignment: reordering or renaming the list silently remaps history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentCatalog {
    names: Vec<String>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("assignment catalog must not be empty")]
    Empty,
}

impl AssignmentCatalog {
    /// Build a catalog from assignment names.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Empty` for an empty list; every completion
    /// percentage divides by the catalog length.
    pub fn new(names: Vec<String>) -> Result<Self, CatalogError> {
        if names.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self { names })
    }

    /// The stock seven-assignment guitar catalog.
    #[must_use]
    pub fn default_guitar() -> Self {
        Self {
            names: DEFAULT_ASSIGNMENTS.iter().map(ToString::to_string).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    #[must_use]
    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl Default for AssignmentCatalog {
    fn default() -> Self {
        Self::default_guitar()
    }
}
