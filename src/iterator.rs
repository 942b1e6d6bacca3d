//! Cyclic traversal over flat or sectioned suggestions
//!
//! A flat collection behaves as a single unnamed section. Empty sections are
//! skipped. Walking past either end yields `None`, which hands focus back to
//! the input; the next step from `None` starts over from the other end.

use crate::suggestion::{Address, Suggestion, SuggestionsCollection};

/// Borrowing cursor arithmetic over one collection
#[derive(Debug, Clone, Copy)]
pub struct SectionIterator<'a> {
    collection: &'a SuggestionsCollection,
}

impl<'a> SectionIterator<'a> {
    pub fn new(collection: &'a SuggestionsCollection) -> Self {
        Self { collection }
    }

    fn section_len(&self, section: usize) -> usize {
        self.collection.section_items(section).len()
    }

    /// First item of the first non-empty section at or after `section`
    fn first_from(&self, section: usize) -> Option<Address> {
        (section..self.collection.section_count())
            .find(|&s| self.section_len(s) > 0)
            .map(|s| Address::new(s, 0))
    }

    /// Last item of the last non-empty section strictly before `section`
    fn last_before(&self, section: usize) -> Option<Address> {
        (0..section)
            .rev()
            .find(|&s| self.section_len(s) > 0)
            .map(|s| Address::new(s, self.section_len(s) - 1))
    }

    pub fn first(&self) -> Option<Address> {
        self.first_from(0)
    }

    pub fn last(&self) -> Option<Address> {
        self.last_before(self.collection.section_count())
    }

    /// Step forward; `None` means focus returns to the input
    pub fn next(&self, cursor: Option<Address>) -> Option<Address> {
        let Some(current) = cursor else {
            return self.first();
        };
        debug_assert!(self.contains(current), "cursor {current} out of range");

        if current.item + 1 < self.section_len(current.section) {
            return Some(Address::new(current.section, current.item + 1));
        }

        self.first_from(current.section + 1)
    }

    /// Step backward; `None` means focus returns to the input
    pub fn prev(&self, cursor: Option<Address>) -> Option<Address> {
        let Some(current) = cursor else {
            return self.last();
        };
        debug_assert!(self.contains(current), "cursor {current} out of range");

        if current.item > 0 {
            return Some(Address::new(current.section, current.item - 1));
        }

        self.last_before(current.section)
    }

    pub fn contains(&self, address: Address) -> bool {
        self.collection.get(address).is_some()
    }

    /// Suggestion at `address`
    ///
    /// # Panics
    /// Panics when `address` does not name an existing item. Focus state only
    /// ever holds addresses produced by this iterator, so reaching the panic
    /// means the caller kept a cursor across a collection change.
    #[track_caller]
    pub fn item_at(&self, address: Address) -> &'a Suggestion {
        match self.collection.get(address) {
            Some(item) => item,
            None => panic!(
                "invalid cursor access: {address} does not address an item ({} sections)",
                self.collection.section_count()
            ),
        }
    }

    /// Every address in traversal order
    pub fn addresses(self) -> impl Iterator<Item = Address> + 'a {
        std::iter::successors(self.first(), move |&a| self.next(Some(a)))
    }
}

#[cfg(test)]
#[path = "iterator_tests.rs"]
mod iterator_tests;
