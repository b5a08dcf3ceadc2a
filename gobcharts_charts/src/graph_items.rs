// Copyright 2026 the GobCharts Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The row / legend / item registry.

use gobcharts_scene::{Item, ItemId, Scene};
use hashbrown::HashMap;
use kurbo::Rect;

/// Highlight opacity applied to the selected row's items.
const HIGHLIGHT_OPACITY: f64 = 0.65;

/// Id namespace for per-row series items.
const SERIES_ID_BASE: u64 = 1 << 32;
/// Id namespace for per-row companion items (e.g. connecting segments).
const COMPANION_ID_BASE: u64 = 2 << 32;

/// Returns the stable item id for the series item of `row`.
#[must_use]
pub fn series_id(row: usize) -> ItemId {
    ItemId::from_raw(SERIES_ID_BASE | row as u64)
}

/// Returns the stable item id for the companion item of `row`.
#[must_use]
pub fn companion_id(row: usize) -> ItemId {
    ItemId::from_raw(COMPANION_ID_BASE | row as u64)
}

/// Bidirectional index between data rows, legend strings and scene items.
///
/// The registry owns every item it is handed until the item is attached to a
/// scene, and takes ownership back on detach; it is the sole deletion
/// authority for its items (detach, then delete). The whole mapping is
/// rebuilt from scratch on every redraw.
#[derive(Debug, Default)]
pub struct GraphItemRegistry {
    // Items currently owned by the registry (not attached).
    pending: Vec<(ItemId, Item)>,
    // Ids of items currently attached to a scene.
    attached: Vec<ItemId>,
    row_of: HashMap<ItemId, usize>,
    item_of_row: HashMap<usize, ItemId>,
    item_of_legend: HashMap<String, ItemId>,
    legend_of: HashMap<ItemId, String>,
    companion_row_of: HashMap<ItemId, usize>,
}

impl GraphItemRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the `(row, item, legend text)` triple.
    ///
    /// The item is held by the registry until [`attach_to_scene`] runs.
    ///
    /// [`attach_to_scene`]: Self::attach_to_scene
    pub fn add_item(&mut self, row: usize, item: Item, legend_text: impl Into<String>) {
        let id = series_id(row);
        let legend = legend_text.into();
        self.pending.push((id, item));
        self.row_of.insert(id, row);
        self.item_of_row.insert(row, id);
        self.item_of_legend.insert(legend.clone(), id);
        self.legend_of.insert(id, legend);
    }

    /// Registers a companion item for `row` (no legend entry of its own).
    ///
    /// Companions follow their row's highlight state and lifetime but do not
    /// take part in row or legend lookups.
    pub fn add_companion(&mut self, row: usize, item: Item) {
        let id = companion_id(row);
        self.pending.push((id, item));
        self.companion_row_of.insert(id, row);
    }

    /// Moves every pending item into the scene.
    pub fn attach_to_scene(&mut self, scene: &mut Scene) {
        for (id, item) in self.pending.drain(..) {
            scene.insert(id, item);
            self.attached.push(id);
        }
    }

    /// Takes every attached item back out of the scene.
    pub fn detach_from_scene(&mut self, scene: &mut Scene) {
        for id in self.attached.drain(..) {
            if let Some(item) = scene.remove(id) {
                self.pending.push((id, item));
            }
        }
    }

    /// Destroys every owned item and clears all mappings.
    ///
    /// Items still attached to `scene` are removed from it first, so no
    /// orphaned items remain on the surface.
    pub fn delete_all(&mut self, scene: &mut Scene) {
        for id in self.attached.drain(..) {
            scene.remove(id);
        }
        self.pending.clear();
        self.row_of.clear();
        self.item_of_row.clear();
        self.item_of_legend.clear();
        self.legend_of.clear();
        self.companion_row_of.clear();
    }

    /// Dims the items of `row` to the highlight opacity and restores every
    /// other item to full opacity.
    pub fn set_highlighted(&self, scene: &mut Scene, row: usize) {
        for (&id, &item_row) in self.row_of.iter().chain(self.companion_row_of.iter()) {
            if let Some(item) = scene.item_mut(id) {
                item.set_opacity(if item_row == row {
                    HIGHLIGHT_OPACITY
                } else {
                    1.0
                });
            }
        }
    }

    /// Restores every registered item to full opacity.
    pub fn clear_highlight(&self, scene: &mut Scene) {
        for &id in self.row_of.keys().chain(self.companion_row_of.keys()) {
            if let Some(item) = scene.item_mut(id) {
                item.set_opacity(1.0);
            }
        }
    }

    /// Returns the data row for a scene item, if registered.
    #[must_use]
    pub fn row_for_item(&self, id: ItemId) -> Option<usize> {
        self.row_of.get(&id).copied()
    }

    /// Returns the data row for a legend string, if registered.
    #[must_use]
    pub fn row_for_legend(&self, text: &str) -> Option<usize> {
        let id = self.item_of_legend.get(text)?;
        self.row_of.get(id).copied()
    }

    /// Returns the legend string for a scene item, if registered.
    #[must_use]
    pub fn legend_for_item(&self, id: ItemId) -> Option<&str> {
        self.legend_of.get(&id).map(String::as_str)
    }

    /// Returns a 1×1 rectangle at the centre of the row's item, if attached.
    #[must_use]
    pub fn item_rect(&self, scene: &Scene, row: usize) -> Option<Rect> {
        let id = self.item_of_row.get(&row)?;
        let centre = scene.item(*id)?.bounds().center();
        Some(Rect::new(centre.x, centre.y, centre.x + 1.0, centre.y + 1.0))
    }

    /// Returns a 1×1 rectangle at the centre of the legend entry's item.
    #[must_use]
    pub fn item_rect_for_legend(&self, scene: &Scene, text: &str) -> Option<Rect> {
        let id = self.item_of_legend.get(text)?;
        let centre = scene.item(*id)?.bounds().center();
        Some(Rect::new(centre.x, centre.y, centre.x + 1.0, centre.y + 1.0))
    }

    /// Returns the number of registered series items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.row_of.len()
    }

    /// Returns `true` when no items are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.row_of.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use gobcharts_scene::ShapeKind;

    use super::*;

    fn rect_item(x: f64) -> Item {
        Item::new(ShapeKind::Rect(Rect::new(x, 0.0, x + 10.0, 10.0)))
    }

    #[test]
    fn triples_stay_consistent() {
        let mut registry = GraphItemRegistry::new();
        registry.add_item(3, rect_item(0.0), "A - 10");
        registry.add_item(5, rect_item(20.0), "B - 2");

        assert_eq!(registry.row_for_legend("A - 10"), Some(3));
        assert_eq!(registry.row_for_item(series_id(5)), Some(5));
        assert_eq!(registry.legend_for_item(series_id(3)), Some("A - 10"));
        assert_eq!(registry.row_for_legend("missing"), None);
        assert_eq!(registry.legend_for_item(ItemId::from_raw(1)), None);
    }

    #[test]
    fn attach_detach_round_trips_items() {
        let mut scene = Scene::new();
        let mut registry = GraphItemRegistry::new();
        registry.add_item(0, rect_item(0.0), "A - 1");
        registry.add_companion(0, rect_item(50.0));

        registry.attach_to_scene(&mut scene);
        assert_eq!(scene.len(), 2);

        registry.detach_from_scene(&mut scene);
        assert!(scene.is_empty());

        registry.attach_to_scene(&mut scene);
        assert_eq!(scene.len(), 2, "detached items can be re-attached");
    }

    #[test]
    fn delete_all_leaves_no_orphans() {
        let mut scene = Scene::new();
        let mut registry = GraphItemRegistry::new();
        registry.add_item(0, rect_item(0.0), "A - 1");
        registry.add_item(1, rect_item(20.0), "B - 2");
        registry.attach_to_scene(&mut scene);

        registry.delete_all(&mut scene);
        assert!(scene.is_empty());
        assert!(registry.is_empty());
        assert_eq!(registry.row_for_legend("A - 1"), None);
    }

    #[test]
    fn highlight_dims_matching_row_only() {
        let mut scene = Scene::new();
        let mut registry = GraphItemRegistry::new();
        registry.add_item(0, rect_item(0.0), "A - 1");
        registry.add_item(1, rect_item(20.0), "B - 2");
        registry.add_companion(1, rect_item(40.0));
        registry.attach_to_scene(&mut scene);

        registry.set_highlighted(&mut scene, 1);
        assert_eq!(scene.item(series_id(0)).unwrap().opacity, 1.0);
        assert_eq!(scene.item(series_id(1)).unwrap().opacity, 0.65);
        assert_eq!(scene.item(companion_id(1)).unwrap().opacity, 0.65);

        registry.clear_highlight(&mut scene);
        assert_eq!(scene.item(series_id(1)).unwrap().opacity, 1.0);
        assert_eq!(scene.item(companion_id(1)).unwrap().opacity, 1.0);
    }

    #[test]
    fn item_rect_is_a_unit_rect_at_the_centre() {
        let mut scene = Scene::new();
        let mut registry = GraphItemRegistry::new();
        registry.add_item(0, rect_item(0.0), "A - 1");
        registry.attach_to_scene(&mut scene);

        let rect = registry.item_rect(&scene, 0).unwrap();
        assert_eq!((rect.width(), rect.height()), (1.0, 1.0));
        assert_eq!((rect.x0, rect.y0), (5.0, 5.0));
        assert_eq!(registry.item_rect(&scene, 9), None);
    }
}
