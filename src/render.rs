// Text and JSON rendering of boards and items

use crate::config::OutputFormat;
use crate::models::{Artifact, ArtifactKind, Category, Item, ItemStatus};
use crate::state::ParaState;
use colored::{ColoredString, Colorize};
use eyre::{Context, Result};
use std::fmt::{self, Write};

/// Renders store contents in the configured format
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    format: OutputFormat,
}

impl Renderer {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// All four categories
    pub fn board(&self, state: &ParaState) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(state),
            OutputFormat::Text => {
                let mut out = String::new();
                for category in Category::ALL {
                    out.push_str(&section(category, state.collection(category).iter())?);
                }
                Ok(out)
            }
        }
    }

    /// One category (or a filtered subset of it)
    pub fn listing(&self, category: Category, items: &[&Item]) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(&items),
            OutputFormat::Text => Ok(section(category, items.iter().copied())?),
        }
    }

    /// One item with its tasks and artifacts
    pub fn item(&self, item: &Item) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(item),
            OutputFormat::Text => Ok(item_detail(item)?),
        }
    }
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    json.push('\n');
    Ok(json)
}

fn section<'a>(category: Category, items: impl Iterator<Item = &'a Item>) -> Result<String, fmt::Error> {
    let items: Vec<&Item> = items.collect();
    let mut out = String::new();

    let header = format!("{} ({})", category.as_str().to_uppercase(), items.len());
    writeln!(out, "{}", header.bold().color(category_color(category)))?;

    if items.is_empty() {
        writeln!(out, "  {}", "(empty)".dimmed())?;
    }
    for item in items {
        writeln!(out, "  {}", summary_line(item)?)?;
    }
    out.push('\n');
    Ok(out)
}

fn summary_line(item: &Item) -> Result<String, fmt::Error> {
    let mut line = format!("{} [{}]", item.title.bold(), status_label(item.status));

    if !item.tasks.is_empty() {
        write!(line, " {}/{} tasks", item.completed_tasks(), item.tasks.len())?;
    }
    if !item.artifacts.is_empty() {
        write!(line, " {} artifacts", item.artifacts.len())?;
    }
    if let Some(date) = item.end_date {
        write!(line, " due {}", date)?;
    }
    write!(line, " {}", short_id(&item.id).dimmed())?;
    Ok(line)
}

fn item_detail(item: &Item) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "{}", item.title.bold())?;
    writeln!(out, "  id:       {}", item.id)?;
    writeln!(
        out,
        "  category: {}",
        item.category.as_str().color(category_color(item.category))
    )?;
    writeln!(out, "  status:   {}", status_label(item.status))?;
    if let Some(date) = item.end_date {
        writeln!(out, "  end date: {}", date)?;
    }
    if !item.description.is_empty() {
        writeln!(out, "\n  {}", item.description)?;
    }

    writeln!(out, "\n  Tasks:")?;
    if item.tasks.is_empty() {
        writeln!(out, "    {}", "(none)".dimmed())?;
    }
    for task in &item.tasks {
        let mark = if task.completed { "[x]" } else { "[ ]" };
        let title = if task.completed {
            task.title.strikethrough()
        } else {
            task.title.normal()
        };
        match task.end_date {
            Some(date) => writeln!(out, "    {} {} (Completed: {})", mark, title, date)?,
            None => writeln!(out, "    {} {}", mark, title)?,
        }
    }

    writeln!(out, "\n  Artifacts:")?;
    if item.artifacts.is_empty() {
        writeln!(out, "    {}", "(none)".dimmed())?;
    }
    for artifact in &item.artifacts {
        writeln!(out, "    {}", artifact_line(artifact))?;
    }
    Ok(out)
}

fn artifact_line(artifact: &Artifact) -> String {
    let content = match artifact.kind {
        ArtifactKind::Link | ArtifactKind::Image => artifact.content.underline(),
        ArtifactKind::Text | ArtifactKind::File => artifact.content.normal(),
    };
    format!("{}. {:<5} {}", artifact.index + 1, artifact.kind.as_str(), content)
}

fn status_label(status: ItemStatus) -> ColoredString {
    match status {
        ItemStatus::Backlog => status.as_str().dimmed(),
        ItemStatus::Ready => status.as_str().cyan(),
        ItemStatus::InProgress => status.as_str().yellow(),
        ItemStatus::Completed => status.as_str().green(),
    }
}

fn category_color(category: Category) -> colored::Color {
    match category {
        Category::Projects => colored::Color::Blue,
        Category::Areas => colored::Color::Magenta,
        Category::Resources => colored::Color::Cyan,
        Category::Archives => colored::Color::White,
    }
}

fn short_id(id: &str) -> &str {
    // v7 uuids share their leading timestamp bits, so show the tail
    let start = id.char_indices().rev().nth(7).map_or(0, |(pos, _)| pos);
    &id[start..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::Draft;
    use crate::store::Store;
    use chrono::NaiveDate;

    fn sample_store() -> (Store, String) {
        let mut store = Store::new();
        let id = store.add_item("Launch site", Category::Projects).unwrap();
        store.add_item("Recipes", Category::Resources).unwrap();

        let mut draft: Draft = store.edit(&id).unwrap();
        let task = draft.add_task("Buy domain").unwrap();
        draft.add_task("Write copy").unwrap();
        draft.toggle_task_on(&task, NaiveDate::from_ymd_opt(2026, 2, 3).unwrap());
        draft.add_artifact(ArtifactKind::Link, "https://example.com").unwrap();
        draft.set_description("Personal homepage");
        store.save(draft);
        (store, id)
    }

    #[test]
    fn test_board_text() {
        let (store, _) = sample_store();
        let out = Renderer::new(OutputFormat::Text).board(store.state()).unwrap();

        assert!(out.contains("PROJECTS (1)"));
        assert!(out.contains("AREAS (0)"));
        assert!(out.contains("(empty)"));
        assert!(out.contains("Launch site"));
        assert!(out.contains("1/2 tasks"));
        assert!(out.contains("1 artifacts"));
        assert!(out.contains("Recipes"));
    }

    #[test]
    fn test_item_text() {
        let (store, id) = sample_store();
        let out = Renderer::default().item(store.get(&id).unwrap()).unwrap();

        assert!(out.contains("Personal homepage"));
        assert!(out.contains("[x]"));
        assert!(out.contains("(Completed: 2026-02-03)"));
        assert!(out.contains("[ ]"));
        assert!(out.contains("1. link"));
        assert!(out.contains("https://example.com"));
    }

    #[test]
    fn test_board_json() {
        let (store, _) = sample_store();
        let out = Renderer::new(OutputFormat::Json).board(store.state()).unwrap();

        let parsed: ParaState = serde_json::from_str(&out).unwrap();
        assert_eq!(&parsed, store.state());
    }

    #[test]
    fn test_listing_json() {
        let (store, _) = sample_store();
        let items: Vec<&Item> = store.list(Category::Projects).iter().collect();
        let out = Renderer::new(OutputFormat::Json).listing(Category::Projects, &items).unwrap();

        let parsed: Vec<Item> = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].title, "Launch site");
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("0123456789abcdef"), "89abcdef");
        assert_eq!(short_id("abc"), "abc");
        assert_eq!(short_id("12345678"), "12345678");
    }

    #[test]
    fn test_short_id_non_ascii() {
        assert_eq!(short_id("ärende-ü-ß-é-ø"), "-ü-ß-é-ø");
        assert_eq!(short_id("日本語"), "日本語");
    }

    #[test]
    fn test_board_text_with_deserialized_non_ascii_id() {
        let mut item = Item::new("Lesestoff", Category::Resources);
        item.id = "notiz-überblick-äöü".to_string();
        let mut state = ParaState::new();
        state.resources.push(item);

        let store = Store::from_state(state);
        let out = Renderer::new(OutputFormat::Text).board(store.state()).unwrap();
        assert!(out.contains("Lesestoff"));
        assert!(out.contains("lick-äöü"));
    }
}
