// Staged copy of an item being edited

use crate::models::{Artifact, ArtifactKind, Category, Item, ItemStatus, Task, is_blank, new_id, today};
use chrono::NaiveDate;
use tracing::debug;

/// A full copy of an item, staged for editing
///
/// Edits touch only the draft. The store sees them when the draft is passed
/// to [`Store::save`](crate::Store::save); dropping the draft discards them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    item: Item,
    original_category: Category,
}

impl Draft {
    pub(crate) fn new(item: Item) -> Self {
        let original_category = item.category;
        Self { item, original_category }
    }

    /// The staged item as it currently stands
    pub fn item(&self) -> &Item {
        &self.item
    }

    pub fn id(&self) -> &str {
        &self.item.id
    }

    /// Category the item was in when staged
    pub fn original_category(&self) -> Category {
        self.original_category
    }

    pub(crate) fn into_parts(self) -> (Item, Category) {
        (self.item, self.original_category)
    }

    // ========================================================================
    // Field edits
    // ========================================================================

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.item.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.item.description = description.into();
    }

    /// Move to another category; takes effect on save
    pub fn set_category(&mut self, category: Category) {
        self.item.category = category;
    }

    pub fn set_status(&mut self, status: ItemStatus) {
        self.item.status = status;
    }

    pub fn set_end_date(&mut self, end_date: Option<NaiveDate>) {
        self.item.end_date = end_date;
    }

    // ========================================================================
    // Tasks
    // ========================================================================

    /// Append a new open task. Blank titles are ignored.
    pub fn add_task(&mut self, title: &str) -> Option<String> {
        if is_blank(title) {
            debug!(item = %self.item.id, "add_task: blank title ignored");
            return None;
        }

        let task = Task::new(title);
        let id = task.id.clone();
        self.item.tasks.push(task);
        Some(id)
    }

    /// Flip a task's completion, stamping today's date when it completes
    pub fn toggle_task(&mut self, task_id: &str) -> bool {
        self.toggle_task_on(task_id, today())
    }

    /// Flip a task's completion using `date` as the completion date
    ///
    /// Returns false when no task has the given id.
    pub fn toggle_task_on(&mut self, task_id: &str, date: NaiveDate) -> bool {
        let Some(task) = self.item.tasks.iter_mut().find(|t| t.id == task_id) else {
            debug!(item = %self.item.id, task_id, "toggle_task: unknown task");
            return false;
        };

        task.completed = !task.completed;
        task.end_date = task.completed.then_some(date);
        true
    }

    /// Remove a task. Returns false when no task has the given id.
    pub fn delete_task(&mut self, task_id: &str) -> bool {
        let before = self.item.tasks.len();
        self.item.tasks.retain(|t| t.id != task_id);
        self.item.tasks.len() != before
    }

    // ========================================================================
    // Artifacts
    // ========================================================================

    /// Append an artifact at index = current artifact count.
    /// Blank content is ignored.
    pub fn add_artifact(&mut self, kind: ArtifactKind, content: &str) -> Option<String> {
        if is_blank(content) {
            debug!(item = %self.item.id, %kind, "add_artifact: blank content ignored");
            return None;
        }

        let artifact = Artifact {
            id: new_id(),
            kind,
            content: content.to_string(),
            index: self.item.artifacts.len(),
        };
        let id = artifact.id.clone();
        self.item.artifacts.push(artifact);
        Some(id)
    }
}
