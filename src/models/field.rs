use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A request body field that distinguishes "absent" from "explicitly null".
///
/// Create and update bodies share this shape. On update, [`Field::Missing`]
/// keeps the stored value while [`Field::Null`] clears it, which makes the
/// field fail its "required" check during validation.
///
/// Struct fields of this type must carry `#[serde(default)]` so that an
/// absent key deserializes as `Missing`.
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    Missing,
    Null,
    Value(T),
}

impl<T> Field<T> {
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// The supplied value, treating both `Missing` and `Null` as absent.
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Value(v) => Some(v),
            Self::Missing | Self::Null => None,
        }
    }

    pub fn as_value(&self) -> Option<&T> {
        match self {
            Self::Value(v) => Some(v),
            Self::Missing | Self::Null => None,
        }
    }

    /// Merge this field over an existing value.
    pub fn merge(self, existing: T) -> Option<T> {
        match self {
            Self::Missing => Some(existing),
            Self::Null => None,
            Self::Value(v) => Some(v),
        }
    }
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Self::Missing
    }
}

impl<T> From<T> for Field<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Self::Value(v),
            None => Self::Null,
        })
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Value(v) => serializer.serialize_some(v),
            Self::Missing | Self::Null => serializer.serialize_none(),
        }
    }
}
