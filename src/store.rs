// In-memory PARA store

use crate::draft::Draft;
use crate::filter::{Filter, matches_all};
use crate::models::{Category, Item, is_blank};
use crate::state::ParaState;
use tracing::{debug, info, warn};

/// Process-local store holding the four PARA collections
///
/// All operations are synchronous in-memory mutations. Validation failures
/// (blank titles) are silent no-ops.
#[derive(Debug, Clone, Default)]
pub struct Store {
    state: ParaState,
}

impl Store {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing state snapshot
    pub fn from_state(state: ParaState) -> Self {
        Self { state }
    }

    /// Read-only view of the collections
    pub fn state(&self) -> &ParaState {
        &self.state
    }

    // ========================================================================
    // Item CRUD
    // ========================================================================

    /// Add a new item to the end of `category`
    ///
    /// Returns the new item's id, or `None` when the title is blank.
    pub fn add_item(&mut self, title: &str, category: Category) -> Option<String> {
        if is_blank(title) {
            debug!(%category, "add_item: blank title ignored");
            return None;
        }

        let item = Item::new(title, category);
        let id = item.id.clone();
        info!(id = %id, %category, "Added item");
        self.state.append(item);
        Some(id)
    }

    /// Get an item by id from any category
    pub fn get(&self, id: &str) -> Option<&Item> {
        self.state.find(id)
    }

    /// Stage a full copy of an item for editing
    pub fn edit(&self, id: &str) -> Option<Draft> {
        let item = self.state.find(id)?;
        debug!(id, category = %item.category, "Staged item for editing");
        Some(Draft::new(item.clone()))
    }

    /// Apply a draft
    ///
    /// The stored item is removed from whichever category holds it and the
    /// edited copy is appended to the end of its (possibly new) category.
    /// A draft staged before another save of the same item still replaces
    /// that item rather than adding a second copy.
    pub fn save(&mut self, draft: Draft) {
        let (item, original) = draft.into_parts();

        match self.state.remove_any(&item.id) {
            Some((_, current)) if current != original => {
                debug!(id = %item.id, %original, %current, "Saved item had moved since it was staged");
            }
            Some(_) => {}
            None => warn!(id = %item.id, %original, "Saved item was no longer in the store"),
        }

        info!(id = %item.id, from = %original, to = %item.category, "Saved item");
        self.state.append(item);
    }

    /// Remove an item from `category`
    ///
    /// Returns the removed item, or `None` if it was not in that category.
    pub fn delete_item(&mut self, id: &str, category: Category) -> Option<Item> {
        let removed = self.state.remove(id, category);
        match &removed {
            Some(_) => info!(id, %category, "Deleted item"),
            None => debug!(id, %category, "delete_item: no such item"),
        }
        removed
    }

    /// Delete the item a draft was staged from, discarding the draft
    pub fn delete_draft(&mut self, draft: Draft) -> Option<Item> {
        let (item, original) = draft.into_parts();
        self.delete_item(&item.id, original)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Items of one category, in order
    pub fn list(&self, category: Category) -> &[Item] {
        self.state.collection(category)
    }

    /// Items of one category matching every filter, in order
    pub fn list_filtered(&self, category: Category, filters: &[Filter]) -> Vec<&Item> {
        self.state
            .collection(category)
            .iter()
            .filter(|item| matches_all(*item, filters))
            .collect()
    }

    /// Items from every category matching every filter, in canonical order
    pub fn search(&self, filters: &[Filter]) -> Vec<&Item> {
        self.state.iter().filter(|item| matches_all(*item, filters)).collect()
    }

    /// Item count per category, in canonical order
    pub fn counts(&self) -> [(Category, usize); 4] {
        Category::ALL.map(|c| (c, self.state.collection(c).len()))
    }

    /// Find items whose title equals `title` (case-insensitive, trimmed)
    pub fn find_by_title(&self, title: &str) -> Vec<&Item> {
        let wanted = title.trim().to_lowercase();
        self.state
            .iter()
            .filter(|item| item.title.trim().to_lowercase() == wanted)
            .collect()
    }
}
