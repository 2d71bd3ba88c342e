//! Survey-year and land-cover class vocabulary shared by every pipeline stage.
//!
//! The vocabulary is explicit configuration passed into the pipeline. Its
//! `Default` is the reference change-detection dataset: four survey epochs a
//! decade apart and six land-cover classes.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result, VocabularyError};
use crate::records::LABEL_DELIMITER;

pub const DEFAULT_YEARS: [i32; 4] = [1995, 2005, 2015, 2025];

pub const DEFAULT_CLASSES: [&str; 6] =
    ["Water", "Trees", "Croplands", "OpenFields", "BuiltUp", "SandySoil"];

/// Ordered survey years and ordered land-cover classes.
///
/// Years are strictly ascending; class names are unique. Order matters: it
/// fixes key order in the output document and breaks ties in the summary
/// statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "VocabularyDef")]
pub struct Vocabulary {
    years: Vec<i32>,
    classes: Vec<String>,
}

#[derive(Deserialize)]
struct VocabularyDef {
    years: Vec<i32>,
    classes: Vec<String>,
}

impl TryFrom<VocabularyDef> for Vocabulary {
    type Error = VocabularyError;

    fn try_from(def: VocabularyDef) -> std::result::Result<Self, Self::Error> {
        Vocabulary::new(def.years, def.classes)
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            years: DEFAULT_YEARS.to_vec(),
            classes: DEFAULT_CLASSES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Vocabulary {
    pub fn new<S: Into<String>>(
        years: Vec<i32>,
        classes: impl IntoIterator<Item = S>,
    ) -> std::result::Result<Self, VocabularyError> {
        let classes: Vec<String> = classes.into_iter().map(Into::into).collect();

        if years.is_empty() {
            return Err(VocabularyError::NoYears);
        }
        if classes.is_empty() {
            return Err(VocabularyError::NoClasses);
        }
        for pair in years.windows(2) {
            if pair[1] <= pair[0] {
                return Err(VocabularyError::YearsNotAscending { previous: pair[0], next: pair[1] });
            }
        }

        let mut seen = HashSet::with_capacity(classes.len());
        for class in &classes {
            if class.trim().is_empty() {
                return Err(VocabularyError::EmptyClassName);
            }
            // Label components are trimmed before lookup.
            if class.trim() != class {
                return Err(VocabularyError::UntrimmedClassName(class.clone()));
            }
            // Totals rows carry the year beside the class keys.
            if class == "year" {
                return Err(VocabularyError::ReservedClassName(class.clone()));
            }
            if class.contains(LABEL_DELIMITER) {
                return Err(VocabularyError::DelimiterInClassName(class.clone()));
            }
            if !seen.insert(class.as_str()) {
                return Err(VocabularyError::DuplicateClass(class.clone()));
            }
        }

        Ok(Self { years, classes })
    }

    /// Parse and validate a vocabulary from `{"years": [...], "classes": [...]}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let def: VocabularyDef = serde_json::from_str(json)?;
        Ok(Vocabulary::try_from(def)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| Error::io("reading", path, e))?;
        Self::from_json(&json)
    }

    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Number of survey epochs, i.e. the required length of a class sequence.
    pub fn epochs(&self) -> usize {
        self.years.len()
    }

    pub fn class_index(&self, class: &str) -> Option<usize> {
        self.classes.iter().position(|c| c == class)
    }

    pub fn first_year(&self) -> i32 {
        self.years[0]
    }

    pub fn last_year(&self) -> i32 {
        self.years[self.years.len() - 1]
    }

    /// Consecutive epoch index pairs `(p, p + 1)`.
    pub fn periods(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (1..self.years.len()).map(|i| (i - 1, i))
    }
}
