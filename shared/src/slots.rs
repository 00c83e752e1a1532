use crate::block::BLOCK_LEN;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::ops::{Deref, DerefMut};
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("block must hold exactly {expected} slots, got {actual}")]
pub struct SlotCountError {
    pub expected: usize,
    pub actual: usize,
}

/// Exactly `BLOCK_SIZE` values, one per slot of a block.
///
/// The length is fixed at construction; the contents can be read and
/// mutated through the slice this dereferences to.
#[derive(Debug, Clone, PartialEq)]
pub struct Slots<T>(Box<[T]>);

impl<T> Slots<T> {
    pub fn from_fn(f: impl FnMut(usize) -> T) -> Self {
        Slots((0..BLOCK_LEN).map(f).collect())
    }

    pub fn into_vec(self) -> Vec<T> {
        self.0.into_vec()
    }
}

impl<T: Clone> Slots<T> {
    pub fn filled(value: T) -> Self {
        Slots(vec![value; BLOCK_LEN].into_boxed_slice())
    }
}

impl<T: Default> Default for Slots<T> {
    fn default() -> Self {
        Self::from_fn(|_| T::default())
    }
}

impl<T> TryFrom<Vec<T>> for Slots<T> {
    type Error = SlotCountError;

    fn try_from(values: Vec<T>) -> Result<Self, Self::Error> {
        if values.len() != BLOCK_LEN {
            return Err(SlotCountError { expected: BLOCK_LEN, actual: values.len() });
        }
        Ok(Slots(values.into_boxed_slice()))
    }
}

impl<T> Deref for Slots<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.0
    }
}

impl<T> DerefMut for Slots<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.0
    }
}

impl<'a, T> IntoIterator for &'a Slots<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T: Serialize> Serialize for Slots<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Slots<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values = Vec::<T>::deserialize(deserializer)?;
        Slots::try_from(values).map_err(serde::de::Error::custom)
    }
}
