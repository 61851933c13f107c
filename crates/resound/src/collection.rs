//! `Collection<T>`, an ordered container with predicate-based queries.
//!
//! A thin layer over `Vec<T>` that adds the query primitives the event
//! registry and the emission cache are built on: first match, filtered
//! subset, membership, and position lookup, all by caller-supplied
//! predicate. Structural edits return typed errors instead of panicking,
//! and lookups return `Option` instead of sentinel values.

use std::ops::{Index, IndexMut};

use crate::error::CollectionError;

// ============================================================================
// Collection
// ============================================================================

/// Ordered container preserving insertion order.
///
/// The container itself enforces no uniqueness; callers that need
/// uniqueness (such as the event registry) enforce it as policy on top of
/// the query methods.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T> Collection<T> {
    /// Create a new, empty collection.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    // -----------------------------------------------------------------------
    // Predicate queries
    // -----------------------------------------------------------------------

    /// The first element satisfying `predicate`, in iteration order.
    pub fn first_or_none(&self, mut predicate: impl FnMut(&T) -> bool) -> Option<&T> {
        self.items.iter().find(|item| predicate(item))
    }

    /// A newly allocated collection of all elements satisfying `predicate`,
    /// preserving original order.
    pub fn where_matching(&self, mut predicate: impl FnMut(&T) -> bool) -> Collection<T>
    where
        T: Clone,
    {
        Self {
            items: self
                .items
                .iter()
                .filter(|item| predicate(item))
                .cloned()
                .collect(),
        }
    }

    /// Whether any element satisfies `predicate`.
    pub fn contains(&self, predicate: impl FnMut(&T) -> bool) -> bool {
        self.items.iter().any(predicate)
    }

    /// Zero-based position of the first element satisfying `predicate`.
    pub fn position_of(&self, predicate: impl FnMut(&T) -> bool) -> Option<usize> {
        self.items.iter().position(predicate)
    }

    // -----------------------------------------------------------------------
    // Structural edits
    // -----------------------------------------------------------------------

    /// Append `value` at the end.
    pub fn append(&mut self, value: T) {
        self.items.push(value);
    }

    /// Insert `value` at `index`, shifting later elements right.
    ///
    /// `index == count()` appends; anything larger is out of bounds.
    pub fn insert_at(&mut self, index: usize, value: T) -> Result<(), CollectionError> {
        if index > self.items.len() {
            return Err(CollectionError::IndexOutOfBounds {
                index,
                len: self.items.len(),
            });
        }
        self.items.insert(index, value);
        Ok(())
    }

    /// Remove and return the element at `index`, shifting later elements left.
    pub fn remove_at(&mut self, index: usize) -> Result<T, CollectionError> {
        if index >= self.items.len() {
            return Err(CollectionError::IndexOutOfBounds {
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    /// Remove all elements.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    // -----------------------------------------------------------------------
    // Lookup / iteration
    // -----------------------------------------------------------------------

    /// Number of elements.
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Whether the collection holds no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Shared reference to the element at `index`, if in bounds.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Mutable reference to the element at `index`, if in bounds.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    /// Iterator over shared references, in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

// ============================================================================
// Value-based operations (T: PartialEq)
// ============================================================================

impl<T: PartialEq> Collection<T> {
    /// Remove the first element equal to `value`.
    pub fn remove(&mut self, value: &T) -> Result<(), CollectionError> {
        match self.items.iter().position(|item| item == value) {
            Some(index) => {
                self.items.remove(index);
                Ok(())
            }
            None => Err(CollectionError::ValueNotFound),
        }
    }

    /// Zero-based position of the first element equal to `value`.
    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.items.iter().position(|item| item == value)
    }

    /// Shared reference to the first element equal to `value`.
    pub fn find(&self, value: &T) -> Option<&T> {
        self.items.iter().find(|item| *item == value)
    }
}

// ============================================================================
// Trait implementations
// ============================================================================

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for Collection<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T> IndexMut<usize> for Collection<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.items[index]
    }
}

impl<T> IntoIterator for Collection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> FromIterator<T> for Collection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
