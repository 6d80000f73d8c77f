//! Identity-keyed ordered collection.
//!
//! # Responsibility
//! - Keep entities in insertion order while rejecting identity collisions.
//!
//! # Invariants
//! - No two elements share an identity key.
//! - Iteration order equals insertion order; nothing is sorted implicitly.
//! - A failed operation leaves the list unchanged.

use super::{EntityError, EntityResult};
use crate::model::identity::Identity;
use std::collections::HashSet;
use std::slice::Iter;

/// Ordered list enforcing unique identity across its elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueList<T> {
    items: Vec<T>,
}

impl<T> Default for UniqueList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Identity> UniqueList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether an element with the same identity as `item` exists.
    pub fn contains(&self, item: &T) -> bool {
        self.contains_key(&item.identity())
    }

    pub fn contains_key(&self, key: &T::Key) -> bool {
        self.position(key).is_some()
    }

    /// Looks up the element with identity `key`.
    pub fn get(&self, key: &T::Key) -> Option<&T> {
        self.position(key).map(|index| &self.items[index])
    }

    /// Appends `item`.
    ///
    /// # Errors
    /// - `DuplicateEntity` when an element with the same identity exists.
    pub fn add(&mut self, item: T) -> EntityResult<()> {
        if self.contains(&item) {
            return Err(EntityError::duplicate(&item));
        }
        self.items.push(item);
        Ok(())
    }

    /// Removes the element sharing `item`'s identity and returns it.
    ///
    /// # Errors
    /// - `EntityNotFound` when no element has that identity.
    pub fn remove(&mut self, item: &T) -> EntityResult<T> {
        let index = self
            .position(&item.identity())
            .ok_or_else(|| EntityError::not_found(item))?;
        Ok(self.items.remove(index))
    }

    /// Replaces `target` with `edited` at the same position.
    ///
    /// `edited` may keep `target`'s identity (a field edit) or take a new one
    /// that is not used by any other element.
    ///
    /// # Errors
    /// - `EntityNotFound` when `target` is absent.
    /// - `DuplicateEntity` when `edited` collides with a different element.
    pub fn replace(&mut self, target: &T, edited: T) -> EntityResult<()> {
        let index = self
            .position(&target.identity())
            .ok_or_else(|| EntityError::not_found(target))?;
        if !target.same_identity(&edited) && self.contains(&edited) {
            return Err(EntityError::duplicate(&edited));
        }
        self.items[index] = edited;
        Ok(())
    }

    /// Replaces the whole contents with `items`, keeping their order.
    ///
    /// # Errors
    /// - `DuplicateEntity` when `items` holds two elements with one identity.
    pub fn set_all(&mut self, items: Vec<T>) -> EntityResult<()> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.identity()) {
                return Err(EntityError::duplicate(item));
            }
        }
        self.items = items;
        Ok(())
    }

    fn position(&self, key: &T::Key) -> Option<usize> {
        self.items.iter().position(|item| item.identity() == *key)
    }
}

impl<T> UniqueList<T> {
    pub fn iter(&self) -> Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        self.items.as_slice()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a, T> IntoIterator for &'a UniqueList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
