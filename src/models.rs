// Data models for the PARA store

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four PARA buckets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Projects,
    Areas,
    Resources,
    Archives,
}

impl Category {
    /// Canonical display and iteration order
    pub const ALL: [Category; 4] = [
        Category::Projects,
        Category::Areas,
        Category::Resources,
        Category::Archives,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Projects => "projects",
            Category::Areas => "areas",
            Category::Resources => "resources",
            Category::Archives => "archives",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "projects" | "project" => Ok(Category::Projects),
            "areas" | "area" => Ok(Category::Areas),
            "resources" | "resource" => Ok(Category::Resources),
            "archives" | "archive" => Ok(Category::Archives),
            other => Err(eyre::eyre!("Unknown category: {}", other)),
        }
    }
}

/// Workflow status of an item
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemStatus {
    #[default]
    Backlog,
    Ready,
    InProgress,
    Completed,
}

impl ItemStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ItemStatus::Backlog => "backlog",
            ItemStatus::Ready => "ready",
            ItemStatus::InProgress => "in-progress",
            ItemStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "backlog" => Ok(ItemStatus::Backlog),
            "ready" => Ok(ItemStatus::Ready),
            "in-progress" | "in_progress" | "inprogress" => Ok(ItemStatus::InProgress),
            "completed" | "done" => Ok(ItemStatus::Completed),
            other => Err(eyre::eyre!("Unknown status: {}", other)),
        }
    }
}

/// Kind of reference material attached to an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Link,
    Text,
    File,
    Image,
}

impl ArtifactKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ArtifactKind::Link => "link",
            ArtifactKind::Text => "text",
            ArtifactKind::File => "file",
            ArtifactKind::Image => "image",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ArtifactKind {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "link" | "url" => Ok(ArtifactKind::Link),
            "text" | "note" => Ok(ArtifactKind::Text),
            "file" => Ok(ArtifactKind::File),
            "image" | "img" => Ok(ArtifactKind::Image),
            other => Err(eyre::eyre!("Unknown artifact type: {}", other)),
        }
    }
}

/// A sub-task owned by an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub completed: bool,
    /// Set when the task is completed, cleared when it is reopened
    #[serde(rename = "endDate")]
    pub end_date: Option<NaiveDate>,
}

impl Task {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            title: title.into(),
            completed: false,
            end_date: None,
        }
    }
}

/// A reference artifact owned by an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ArtifactKind,
    /// URL for links and images, raw text otherwise
    pub content: String,
    /// Position among the parent's artifacts at append time
    pub index: usize,
}

/// A PARA item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub status: ItemStatus,
    pub tasks: Vec<Task>,
    pub artifacts: Vec<Artifact>,
    #[serde(rename = "endDate")]
    pub end_date: Option<NaiveDate>,
}

impl Item {
    pub fn new(title: impl Into<String>, category: Category) -> Self {
        Self {
            id: new_id(),
            title: title.into(),
            description: String::new(),
            category,
            status: ItemStatus::default(),
            tasks: Vec::new(),
            artifacts: Vec::new(),
            end_date: None,
        }
    }

    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    pub fn completed_tasks(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    pub fn open_tasks(&self) -> usize {
        self.tasks.len() - self.completed_tasks()
    }
}

/// Generate a new unique, time-ordered identifier
pub fn new_id() -> String {
    uuid::Uuid::now_v7().to_string()
}

/// Today's date in the local timezone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// True when the string is empty or whitespace-only
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}
