//! Ordered entity collections
//!
//! Every short-lived entity type (projectiles, explosions, smoke, tracers)
//! lives in an `EntityList`. Each tick the list updates all members, then
//! drops the expired ones with an order-preserving filter.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Per-tick contract for short-lived entities
pub trait Expiring {
    /// Advance physics and lifetime by `dt` seconds
    fn update(&mut self, dt: f32, tuning: &Tuning);
    /// True once the entity should be removed
    fn is_expired(&self, tuning: &Tuning) -> bool;
}

/// Append-only list with order-preserving pruning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityList<T> {
    items: Vec<T>,
}

impl<T> Default for EntityList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> EntityList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }
}

impl<T: Expiring> EntityList<T> {
    /// Update every member, then remove the expired ones.
    /// Returns how many were removed.
    pub fn update_and_prune(&mut self, dt: f32, tuning: &Tuning) -> usize {
        for item in self.items.iter_mut() {
            item.update(dt, tuning);
        }
        self.prune(tuning)
    }

    /// Remove expired members, keeping survivors in their original order
    pub fn prune(&mut self, tuning: &Tuning) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !item.is_expired(tuning));
        before - self.items.len()
    }
}

impl<T> Extend<T> for EntityList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<'a, T> IntoIterator for &'a EntityList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
