use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;
use uuid::Uuid;

use crate::error::{PicError, PicResult};

/// Typed identifier. The phantom parameter keeps a contact id from being
/// passed where some other entity's id is expected.
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id<T> {
    pub value: Uuid,
    #[serde(skip)]
    _phantom: PhantomData<T>,
}

impl<T> Id<T> {
    pub fn new(value: Uuid) -> Self {
        Self {
            value,
            _phantom: PhantomData,
        }
    }

    pub fn generate() -> Self {
        Self::new(Uuid::new_v4())
    }

    /// Parse an id read back from storage.
    pub fn parse(s: &str) -> PicResult<Self> {
        Uuid::parse_str(s)
            .map(Self::new)
            .map_err(|e| PicError::Other(format!("Invalid UUID '{}': {}", s, e)))
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Foo;

    #[test]
    fn parse_roundtrips() {
        let id = Id::<Foo>::generate();
        let parsed = Id::<Foo>::parse(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(Id::<Foo>::parse("not-a-uuid").is_err());
    }
}
