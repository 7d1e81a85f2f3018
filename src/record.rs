// Queryable record trait

use crate::models::Item;
use std::collections::HashMap;

/// Core trait for anything the store can filter on
pub trait Record {
    /// Unique identifier for this record
    fn id(&self) -> &str;

    /// Fields to index for filtering
    /// Return empty HashMap if no fields should be indexed
    fn indexed_fields(&self) -> HashMap<String, IndexValue> {
        HashMap::new()
    }
}

/// Value types that can be indexed for filtering
#[derive(Debug, Clone, PartialEq)]
pub enum IndexValue {
    String(String),
    Int(i64),
    Bool(bool),
}

impl std::fmt::Display for IndexValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexValue::String(s) => write!(f, "{}", s),
            IndexValue::Int(i) => write!(f, "{}", i),
            IndexValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl Record for Item {
    fn id(&self) -> &str {
        &self.id
    }

    fn indexed_fields(&self) -> HashMap<String, IndexValue> {
        let mut fields = HashMap::new();
        fields.insert("title".to_string(), IndexValue::String(self.title.clone()));
        fields.insert("category".to_string(), IndexValue::String(self.category.to_string()));
        fields.insert("status".to_string(), IndexValue::String(self.status.to_string()));
        fields.insert("task_count".to_string(), IndexValue::Int(self.tasks.len() as i64));
        fields.insert("open_tasks".to_string(), IndexValue::Int(self.open_tasks() as i64));
        fields.insert("artifact_count".to_string(), IndexValue::Int(self.artifacts.len() as i64));
        fields.insert("has_end_date".to_string(), IndexValue::Bool(self.end_date.is_some()));
        fields
    }
}
