// The four PARA collections

use crate::models::{Category, Item};
use serde::{Deserialize, Serialize};

/// Four parallel ordered collections, one per category
///
/// Every item lives in exactly one collection: the one matching its
/// `category` field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParaState {
    pub projects: Vec<Item>,
    pub areas: Vec<Item>,
    pub resources: Vec<Item>,
    pub archives: Vec<Item>,
}

impl ParaState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Items of one category, in insertion order
    pub fn collection(&self, category: Category) -> &[Item] {
        match category {
            Category::Projects => &self.projects,
            Category::Areas => &self.areas,
            Category::Resources => &self.resources,
            Category::Archives => &self.archives,
        }
    }

    pub(crate) fn collection_mut(&mut self, category: Category) -> &mut Vec<Item> {
        match category {
            Category::Projects => &mut self.projects,
            Category::Areas => &mut self.areas,
            Category::Resources => &mut self.resources,
            Category::Archives => &mut self.archives,
        }
    }

    /// Append an item to the collection its category names
    pub(crate) fn append(&mut self, item: Item) {
        self.collection_mut(item.category).push(item);
    }

    /// Remove an item from one collection, returning it if present
    pub(crate) fn remove(&mut self, id: &str, category: Category) -> Option<Item> {
        let collection = self.collection_mut(category);
        let pos = collection.iter().position(|item| item.id == id)?;
        Some(collection.remove(pos))
    }

    /// Remove an item from whichever collection holds it
    pub(crate) fn remove_any(&mut self, id: &str) -> Option<(Item, Category)> {
        Category::ALL
            .into_iter()
            .find_map(|category| self.remove(id, category).map(|item| (item, category)))
    }

    /// Find an item in any collection
    pub fn find(&self, id: &str) -> Option<&Item> {
        self.iter().find(|item| item.id == id)
    }

    /// All items, category by category in canonical order
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        Category::ALL.into_iter().flat_map(move |c| self.collection(c).iter())
    }

    pub fn len(&self) -> usize {
        Category::ALL.iter().map(|c| self.collection(*c).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check that every item sits in the collection its category names
    /// and that no id appears twice
    pub fn is_consistent(&self) -> bool {
        let placed = Category::ALL
            .iter()
            .all(|c| self.collection(*c).iter().all(|item| item.category == *c));

        let mut ids: Vec<&str> = self.iter().map(|item| item.id.as_str()).collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();

        placed && ids.len() == total
    }
}
