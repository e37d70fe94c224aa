use std::collections::{HashMap, HashSet};
use std::fmt::{self, Debug, Display};
use std::hash::Hash;

use crate::error::{Error, Result};

/// Row label: either an integer (the positional default) or a string
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RowLabel {
    Int(i64),
    Str(String),
}

impl Display for RowLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowLabel::Int(v) => write!(f, "{}", v),
            RowLabel::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for RowLabel {
    fn from(v: i64) -> Self {
        RowLabel::Int(v)
    }
}

impl From<i32> for RowLabel {
    fn from(v: i32) -> Self {
        RowLabel::Int(v as i64)
    }
}

impl From<usize> for RowLabel {
    fn from(v: usize) -> Self {
        RowLabel::Int(v as i64)
    }
}

impl From<&str> for RowLabel {
    fn from(v: &str) -> Self {
        RowLabel::Str(v.to_string())
    }
}

impl From<String> for RowLabel {
    fn from(v: String) -> Self {
        RowLabel::Str(v)
    }
}

/// Index structure
///
/// Row labels for a frame. Labels attached by callers are unique; labels
/// gathered by a positional selection may repeat, and a repeated label
/// cannot be looked up.
#[derive(Debug, Clone, PartialEq)]
pub struct Index<T>
where
    T: Debug + Clone + Eq + Hash + Display,
{
    /// Index values
    values: Vec<T>,

    /// Mapping from values to their first position
    map: HashMap<T, usize>,

    /// Values that occur more than once
    repeated: HashSet<T>,
}

impl<T> Index<T>
where
    T: Debug + Clone + Eq + Hash + Display,
{
    /// Creates a new index
    ///
    /// # Errors
    /// Returns an error if there are duplicate values
    pub fn new(values: Vec<T>) -> Result<Self> {
        let mut map = HashMap::with_capacity(values.len());

        // Build map while checking for uniqueness
        for (i, value) in values.iter().enumerate() {
            if map.insert(value.clone(), i).is_some() {
                return Err(Error::DuplicateLabel(value.to_string()));
            }
        }

        Ok(Index {
            values,
            map,
            repeated: HashSet::new(),
        })
    }

    /// Builds an index that tolerates repeated values
    pub(crate) fn from_values(values: Vec<T>) -> Self {
        let mut map = HashMap::with_capacity(values.len());
        let mut repeated = HashSet::new();
        for (i, value) in values.iter().enumerate() {
            if map.contains_key(value) {
                repeated.insert(value.clone());
            } else {
                map.insert(value.clone(), i);
            }
        }
        Index {
            values,
            map,
            repeated,
        }
    }

    /// Whether every value occurs once
    pub fn is_unique(&self) -> bool {
        self.repeated.is_empty()
    }

    /// Get the length of the index
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get the position from a value
    ///
    /// # Errors
    /// Returns `DuplicateLabel` when the value occurs more than once
    pub fn get_loc(&self, key: &T) -> Result<Option<usize>> {
        if self.repeated.contains(key) {
            return Err(Error::DuplicateLabel(key.to_string()));
        }
        Ok(self.map.get(key).copied())
    }

    /// Get the value from a position
    pub fn get_value(&self, pos: usize) -> Option<&T> {
        self.values.get(pos)
    }

    /// Get all values
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Labels at the given positions; repeated positions repeat labels
    pub(crate) fn take(&self, positions: &[usize]) -> Result<Self> {
        let values = positions
            .iter()
            .map(|&p| {
                self.values.get(p).cloned().ok_or(Error::IndexOutOfBounds {
                    index: p,
                    size: self.values.len(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_values(values))
    }
}
