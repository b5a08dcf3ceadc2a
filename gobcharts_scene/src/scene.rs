// Copyright 2026 the GobCharts Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The item store.

use hashbrown::HashMap;
use kurbo::{Point, Rect};
use peniko::Color;
use peniko::color::palette::css;
use smallvec::SmallVec;

use crate::item::{Item, ItemId};

/// A flat store of drawable items keyed by stable [`ItemId`]s.
///
/// The scene owns attached items. Components that create items keep their
/// ids and are the only parties that insert or remove them; detaching an
/// item hands ownership back to the caller.
#[derive(Debug)]
pub struct Scene {
    items: HashMap<ItemId, Item>,
    focus: Option<ItemId>,
    background: Color,
}

impl Scene {
    /// Creates an empty scene with the default light-grey background.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
            focus: None,
            background: css::WHITE_SMOKE,
        }
    }

    /// Attaches an item under the given id, replacing (and returning) any
    /// item previously stored under it.
    pub fn insert(&mut self, id: ItemId, item: Item) -> Option<Item> {
        self.items.insert(id, item)
    }

    /// Detaches and returns the item stored under `id`.
    ///
    /// Clears focus if the focused item is removed.
    pub fn remove(&mut self, id: ItemId) -> Option<Item> {
        if self.focus == Some(id) {
            self.focus = None;
        }
        self.items.remove(&id)
    }

    /// Returns the item stored under `id`.
    #[must_use]
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    /// Returns a mutable reference to the item stored under `id`.
    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.get_mut(&id)
    }

    /// Returns the number of attached items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if no items are attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates all attached items in unspecified order.
    pub fn items(&self) -> impl Iterator<Item = (ItemId, &Item)> {
        self.items.iter().map(|(id, item)| (*id, item))
    }

    /// Returns all attached items sorted by `(z_index, id)`, back to front.
    ///
    /// This is the order a renderer should paint in.
    #[must_use]
    pub fn items_ordered(&self) -> Vec<(ItemId, &Item)> {
        let mut out: Vec<_> = self.items().collect();
        out.sort_by_key(|(id, item)| (item.z_index, *id));
        out
    }

    /// Returns the ids of visible items containing `point`, topmost first.
    ///
    /// Items with zero opacity are invisible and never hit.
    #[must_use]
    pub fn items_at(&self, point: Point) -> SmallVec<[ItemId; 4]> {
        let mut hits: SmallVec<[ItemId; 4]> = self
            .items
            .iter()
            .filter(|(_, item)| item.opacity > 0.0 && item.contains(point))
            .map(|(id, _)| *id)
            .collect();
        hits.sort_by_key(|id| {
            let z = self.items[id].z_index;
            (std::cmp::Reverse(z), *id)
        });
        hits
    }

    /// Returns the ids of visible items whose bounds intersect `rect`,
    /// topmost first.
    #[must_use]
    pub fn items_in(&self, rect: Rect) -> SmallVec<[ItemId; 4]> {
        let mut hits: SmallVec<[ItemId; 4]> = self
            .items
            .iter()
            .filter(|(_, item)| {
                let b = item.bounds();
                item.opacity > 0.0
                    && b.x0 <= rect.x1
                    && b.x1 >= rect.x0
                    && b.y0 <= rect.y1
                    && b.y1 >= rect.y0
            })
            .map(|(id, _)| *id)
            .collect();
        hits.sort_by_key(|id| {
            let z = self.items[id].z_index;
            (std::cmp::Reverse(z), *id)
        });
        hits
    }

    /// Assigns keyboard focus to an attached item (or clears it with `None`).
    ///
    /// Focusing an id that is not attached clears focus instead.
    pub fn set_focus(&mut self, id: Option<ItemId>) {
        self.focus = id.filter(|id| self.items.contains_key(id));
    }

    /// Returns the focused item id, if any.
    #[must_use]
    pub fn focus(&self) -> Option<ItemId> {
        self.focus
    }

    /// Sets the background colour.
    pub fn set_background(&mut self, colour: Color) {
        self.background = colour;
    }

    /// Returns the background colour.
    #[must_use]
    pub fn background(&self) -> Color {
        self.background
    }

    /// Detaches every item and clears focus.
    pub fn clear(&mut self) {
        self.items.clear();
        self.focus = None;
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
