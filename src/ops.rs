// Replayable store operations and the editing session that applies them

use crate::draft::Draft;
use crate::models::{ArtifactKind, Category, ItemStatus};
use crate::store::Store;
use chrono::NaiveDate;
use eyre::{Context, Result, eyre};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// One store operation in serializable form
///
/// Items and tasks are referenced by id or by a unique title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum Op {
    /// Add an item; category falls back to the session default
    Add {
        title: String,
        #[serde(default)]
        category: Option<Category>,
    },
    /// Open a draft of an item
    Edit { item: String },
    Title { title: String },
    Describe { description: String },
    Move { category: Category },
    Status { status: ItemStatus },
    EndDate {
        #[serde(default)]
        date: Option<NaiveDate>,
    },
    Task { title: String },
    Toggle { task: String },
    Untask { task: String },
    Artifact {
        #[serde(rename = "type")]
        kind: ArtifactKind,
        content: String,
    },
    Save,
    Cancel,
    /// Delete the named item, or the open draft's item when none is named
    Delete {
        #[serde(default)]
        item: Option<String>,
    },
}

/// Whether an op changed anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// Silently rejected (blank title or content, unknown task)
    Ignored,
}

impl From<bool> for Outcome {
    fn from(applied: bool) -> Self {
        if applied { Outcome::Applied } else { Outcome::Ignored }
    }
}

/// A store plus at most one open draft
#[derive(Debug, Default)]
pub struct Session {
    store: Store,
    draft: Option<Draft>,
    default_category: Category,
}

impl Session {
    pub fn new(default_category: Category) -> Self {
        Self {
            store: Store::new(),
            draft: None,
            default_category,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// The open draft, if any
    pub fn draft(&self) -> Option<&Draft> {
        self.draft.as_ref()
    }

    pub fn default_category(&self) -> Category {
        self.default_category
    }

    /// Apply one op
    pub fn apply(&mut self, op: Op) -> Result<Outcome> {
        debug!(?op, "apply");

        let outcome: Outcome = match op {
            Op::Add { title, category } => {
                let category = category.unwrap_or(self.default_category);
                self.store.add_item(&title, category).is_some().into()
            }
            Op::Edit { item } => {
                if let Some(open) = &self.draft {
                    return Err(eyre!("Already editing '{}'; save or cancel first", open.item().title));
                }
                let id = self.resolve_item(&item)?;
                let draft = self.store.edit(&id).ok_or_else(|| eyre!("No item '{}'", item))?;
                self.draft = Some(draft);
                Outcome::Applied
            }
            Op::Title { title } => {
                self.draft_mut()?.set_title(title);
                Outcome::Applied
            }
            Op::Describe { description } => {
                self.draft_mut()?.set_description(description);
                Outcome::Applied
            }
            Op::Move { category } => {
                self.draft_mut()?.set_category(category);
                Outcome::Applied
            }
            Op::Status { status } => {
                self.draft_mut()?.set_status(status);
                Outcome::Applied
            }
            Op::EndDate { date } => {
                self.draft_mut()?.set_end_date(date);
                Outcome::Applied
            }
            Op::Task { title } => self.draft_mut()?.add_task(&title).is_some().into(),
            Op::Toggle { task } => {
                let draft = self.draft_mut()?;
                let id = resolve_task(draft, &task)?;
                draft.toggle_task(&id).into()
            }
            Op::Untask { task } => {
                let draft = self.draft_mut()?;
                let id = resolve_task(draft, &task)?;
                draft.delete_task(&id).into()
            }
            Op::Artifact { kind, content } => self.draft_mut()?.add_artifact(kind, &content).is_some().into(),
            Op::Save => {
                let draft = self.draft.take().ok_or_else(|| eyre!("Nothing to save: no item is being edited"))?;
                self.store.save(draft);
                Outcome::Applied
            }
            Op::Cancel => {
                let draft = self.draft.take().ok_or_else(|| eyre!("Nothing to cancel: no item is being edited"))?;
                debug!(id = draft.id(), "Discarded draft");
                Outcome::Applied
            }
            Op::Delete { item: None } => {
                let draft = self.draft.take().ok_or_else(|| eyre!("Nothing to delete: no item is being edited"))?;
                self.store.delete_draft(draft).is_some().into()
            }
            Op::Delete { item: Some(item) } => {
                let id = self.resolve_item(&item)?;
                if self.draft.as_ref().is_some_and(|d| d.id() == id) {
                    return Err(eyre!("'{}' is being edited; use delete without an item", item));
                }
                let category = self
                    .store
                    .get(&id)
                    .map(|i| i.category)
                    .ok_or_else(|| eyre!("No item '{}'", item))?;
                self.store.delete_item(&id, category).is_some().into()
            }
        };

        Ok(outcome)
    }

    /// Apply ops in order, stopping at the first error
    pub fn run_script(&mut self, ops: Vec<Op>) -> Result<()> {
        let total = ops.len();
        for (n, op) in ops.into_iter().enumerate() {
            self.apply(op).wrap_err_with(|| format!("Script step {} of {} failed", n + 1, total))?;
        }
        info!(steps = total, items = self.store.state().len(), "Script complete");
        Ok(())
    }

    /// Resolve an item reference: exact id first, then unique title
    pub fn resolve_item(&self, reference: &str) -> Result<String> {
        if let Some(item) = self.store.get(reference) {
            return Ok(item.id.clone());
        }

        match self.store.find_by_title(reference).as_slice() {
            [item] => Ok(item.id.clone()),
            [] => Err(eyre!("No item '{}'", reference)),
            many => Err(eyre!("'{}' matches {} items; use the id", reference, many.len())),
        }
    }

    fn draft_mut(&mut self) -> Result<&mut Draft> {
        self.draft
            .as_mut()
            .ok_or_else(|| eyre!("No item is being edited; use edit first"))
    }
}

/// Resolve a task reference within a draft: exact id first, then unique title
fn resolve_task(draft: &Draft, reference: &str) -> Result<String> {
    let tasks = &draft.item().tasks;
    if let Some(task) = tasks.iter().find(|t| t.id == reference) {
        return Ok(task.id.clone());
    }

    let wanted = reference.trim().to_lowercase();
    let matches: Vec<_> = tasks.iter().filter(|t| t.title.trim().to_lowercase() == wanted).collect();
    match matches.as_slice() {
        [task] => Ok(task.id.clone()),
        [] => Err(eyre!("No task '{}' on '{}'", reference, draft.item().title)),
        many => Err(eyre!("'{}' matches {} tasks; use the id", reference, many.len())),
    }
}

/// Parse a YAML list of ops
pub fn parse_script(yaml: &str) -> Result<Vec<Op>> {
    if yaml.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_yaml::from_str(yaml).context("Failed to parse op script")
}

/// Load a YAML op script from disk
pub fn load_script<P: AsRef<Path>>(path: P) -> Result<Vec<Op>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).with_context(|| format!("Failed to read script {}", path.display()))?;
    parse_script(&content).with_context(|| format!("Invalid script {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn add(title: &str, category: Category) -> Op {
        Op::Add {
            title: title.to_string(),
            category: Some(category),
        }
    }

    fn edit(item: &str) -> Op {
        Op::Edit { item: item.to_string() }
    }

    #[test]
    fn test_add_uses_default_category() {
        let mut session = Session::new(Category::Areas);
        let outcome = session
            .apply(Op::Add {
                title: "Health".to_string(),
                category: None,
            })
            .unwrap();

        assert_eq!(outcome, Outcome::Applied);
        assert_eq!(session.store().list(Category::Areas).len(), 1);
    }

    #[test]
    fn test_add_blank_is_ignored() {
        let mut session = Session::default();
        assert_eq!(session.apply(add("  ", Category::Projects)).unwrap(), Outcome::Ignored);
        assert!(session.store().state().is_empty());
    }

    #[test]
    fn test_edit_move_save() {
        let mut session = Session::default();
        session.apply(add("Photography course", Category::Projects)).unwrap();
        session.apply(edit("photography course")).unwrap();
        session
            .apply(Op::Move {
                category: Category::Archives,
            })
            .unwrap();
        session
            .apply(Op::Status {
                status: ItemStatus::Completed,
            })
            .unwrap();
        session.apply(Op::Save).unwrap();

        let store = session.store();
        assert!(store.list(Category::Projects).is_empty());
        assert_eq!(store.list(Category::Archives).len(), 1);
        assert_eq!(store.list(Category::Archives)[0].status, ItemStatus::Completed);
        assert!(session.draft().is_none());
    }

    #[test]
    fn test_ops_without_draft_fail() {
        let mut session = Session::default();
        assert!(session.apply(Op::Save).is_err());
        assert!(session.apply(Op::Cancel).is_err());
        assert!(
            session
                .apply(Op::Task {
                    title: "x".to_string()
                })
                .is_err()
        );
        assert!(session.apply(Op::Delete { item: None }).is_err());
    }

    #[test]
    fn test_second_edit_fails() {
        let mut session = Session::default();
        session.apply(add("a", Category::Projects)).unwrap();
        session.apply(add("b", Category::Projects)).unwrap();
        session.apply(edit("a")).unwrap();
        assert!(session.apply(edit("b")).is_err());
    }

    #[test]
    fn test_cancel_discards_changes() {
        let mut session = Session::default();
        session.apply(add("Blog", Category::Projects)).unwrap();
        let before = session.store().state().clone();

        session.apply(edit("Blog")).unwrap();
        session
            .apply(Op::Title {
                title: "Vlog".to_string(),
            })
            .unwrap();
        session.apply(Op::Cancel).unwrap();

        assert_eq!(session.store().state(), &before);
    }

    #[test]
    fn test_tasks_by_title() {
        let mut session = Session::default();
        session.apply(add("Trip", Category::Projects)).unwrap();
        session.apply(edit("Trip")).unwrap();
        session
            .apply(Op::Task {
                title: "Book flights".to_string(),
            })
            .unwrap();
        session
            .apply(Op::Task {
                title: "Pack".to_string(),
            })
            .unwrap();
        session
            .apply(Op::Toggle {
                task: "book flights".to_string(),
            })
            .unwrap();
        session
            .apply(Op::Untask {
                task: "Pack".to_string(),
            })
            .unwrap();
        assert!(
            session
                .apply(Op::Toggle {
                    task: "Unpack".to_string()
                })
                .is_err()
        );
        session.apply(Op::Save).unwrap();

        let item = &session.store().list(Category::Projects)[0];
        assert_eq!(item.tasks.len(), 1);
        assert!(item.tasks[0].completed);
        assert!(item.tasks[0].end_date.is_some());
    }

    #[test]
    fn test_delete_open_draft() {
        let mut session = Session::default();
        session.apply(add("Old", Category::Resources)).unwrap();
        session.apply(edit("Old")).unwrap();
        session
            .apply(Op::Move {
                category: Category::Archives,
            })
            .unwrap();

        assert_eq!(session.apply(Op::Delete { item: None }).unwrap(), Outcome::Applied);
        assert!(session.store().state().is_empty());
        assert!(session.draft().is_none());
    }

    #[test]
    fn test_delete_named_item() {
        let mut session = Session::default();
        session.apply(add("Keep", Category::Areas)).unwrap();
        session.apply(add("Drop", Category::Areas)).unwrap();

        session
            .apply(Op::Delete {
                item: Some("drop".to_string()),
            })
            .unwrap();
        let titles: Vec<&str> = session
            .store()
            .list(Category::Areas)
            .iter()
            .map(|i| i.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Keep"]);
    }

    #[test]
    fn test_ambiguous_title() {
        let mut session = Session::default();
        session.apply(add("Notes", Category::Areas)).unwrap();
        session.apply(add("notes", Category::Resources)).unwrap();

        let err = session.resolve_item("Notes").unwrap_err();
        assert!(err.to_string().contains("matches 2 items"));

        let id = session.store().list(Category::Areas)[0].id.clone();
        assert_eq!(session.resolve_item(&id).unwrap(), id);
    }

    #[test]
    fn test_parse_script() {
        let yaml = r#"
- op: add
  title: Launch site
  category: projects
- op: edit
  item: Launch site
- op: task
  title: Buy domain
- op: artifact
  type: link
  content: https://example.com
- op: end-date
  date: 2026-12-01
- op: status
  status: in-progress
- op: save
"#;
        let ops = parse_script(yaml).unwrap();
        assert_eq!(ops.len(), 7);
        assert_eq!(ops[6], Op::Save);
        assert_eq!(
            ops[4],
            Op::EndDate {
                date: NaiveDate::from_ymd_opt(2026, 12, 1)
            }
        );

        let mut session = Session::default();
        session.run_script(ops).unwrap();
        let item = &session.store().list(Category::Projects)[0];
        assert_eq!(item.status, ItemStatus::InProgress);
        assert_eq!(item.artifacts.len(), 1);
        assert_eq!(item.tasks[0].title, "Buy domain");
    }

    #[test]
    fn test_run_script_reports_step() {
        let ops = vec![add("a", Category::Projects), Op::Save];
        let mut session = Session::default();
        let err = session.run_script(ops).unwrap_err();
        assert!(err.to_string().contains("Script step 2 of 2"));
    }

    #[test]
    fn test_load_script() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("ops.yml");
        fs::write(&path, "- op: add\n  title: Finances\n  category: areas\n").unwrap();

        let ops = load_script(&path).unwrap();
        assert_eq!(
            ops,
            vec![Op::Add {
                title: "Finances".to_string(),
                category: Some(Category::Areas)
            }]
        );

        assert!(load_script(temp.path().join("missing.yml")).is_err());
        assert!(parse_script("- op: fly\n").is_err());
        assert!(parse_script("").unwrap().is_empty());
    }
}
