//! Identifier management using string interning for model items.
//!
//! Structurizr documents identify every element and relationship with a
//! string ID (usually a decimal number such as `"12"`). IDs are compared and
//! hashed constantly while resolving references, so they are interned once
//! and handled as a small [`Copy`] value afterwards.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for identifier storage.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn with_interner<R>(f: impl FnOnce(&mut DefaultStringInterner) -> R) -> R {
    let mut interner = INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock");
    f(&mut interner)
}

/// Identifier of an element or relationship inside a model.
///
/// Elements and relationships share a single ID namespace within a
/// [`Model`](crate::model::Model).
///
/// # Examples
///
/// ```
/// use structurizr_core::identifier::Id;
///
/// let id = Id::new("42");
/// assert_eq!(id, "42");
/// assert_eq!(id.as_sequence(), Some(42));
///
/// let generated = Id::from_sequence(7);
/// assert_eq!(generated.to_string(), "7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from its string form.
    pub fn new(value: &str) -> Self {
        Self(with_interner(|interner| interner.get_or_intern(value)))
    }

    /// Creates the `Id` issued by a sequential generator for `value`.
    pub fn from_sequence(value: u64) -> Self {
        Self::new(&value.to_string())
    }

    /// Returns the numeric value of this identifier if it is a plain
    /// non-negative integer.
    pub fn as_sequence(&self) -> Option<u64> {
        with_interner(|interner| {
            interner
                .resolve(self.0)
                .and_then(|value| value.parse::<u64>().ok())
        })
    }

    /// Returns `true` if the identifier is the empty string.
    pub fn is_blank(&self) -> bool {
        self == ""
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = with_interner(|interner| {
            interner
                .resolve(self.0)
                .expect("Symbol should exist in interner")
                .to_owned()
        });
        write!(f, "{value}")
    }
}

impl std::str::FromStr for Id {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl PartialEq<str> for Id {
    /// Allows direct comparison with string slices: `id == "12"`
    fn eq(&self, other: &str) -> bool {
        with_interner(|interner| interner.resolve(self.0) == Some(other))
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Self::new(&value))
    }
}
