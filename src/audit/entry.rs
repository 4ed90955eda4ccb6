//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// Kinds of records that appear in the audit log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Expense,
    Settings,
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityType::Expense => write!(f, "Expense"),
            EntityType::Settings => write!(f, "Settings"),
        }
    }
}

/// A single audit log entry
///
/// `before` is present for updates and deletes, `after` for creates and
/// updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub operation: Operation,
    pub entity_type: EntityType,
    pub entity_id: String,

    /// Human-readable label, e.g. the expense title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    fn new(
        operation: Operation,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            entity_type,
            entity_id,
            entity_name,
            before: None,
            after: None,
            diff_summary: None,
        }
    }

    pub fn create<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        Self {
            after: serde_json::to_value(entity).ok(),
            ..Self::new(Operation::Create, entity_type, entity_id.into(), entity_name)
        }
    }

    pub fn update<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> Self {
        Self {
            before: serde_json::to_value(before).ok(),
            after: serde_json::to_value(after).ok(),
            diff_summary,
            ..Self::new(Operation::Update, entity_type, entity_id.into(), entity_name)
        }
    }

    pub fn delete<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        Self {
            before: serde_json::to_value(entity).ok(),
            ..Self::new(Operation::Delete, entity_type, entity_id.into(), entity_name)
        }
    }

    /// One-line (two with a diff) rendering for `expense audit`
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.entity_id
        );

        if let Some(name) = &self.entity_name {
            output.push_str(&format!(" ({})", name));
        }

        if let Some(diff) = &self.diff_summary {
            output.push_str(&format!("\n  Changes: {}", diff));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display() {
        assert_eq!(Operation::Update.to_string(), "UPDATE");
        assert_eq!(EntityType::Expense.to_string(), "Expense");
        assert_eq!(EntityType::Settings.to_string(), "Settings");
    }

    #[test]
    fn test_create_entry() {
        let data = json!({"title": "Lunch", "amount": 25000});
        let entry = AuditEntry::create(EntityType::Expense, "exp-1", Some("Lunch".into()), &data);

        assert_eq!(entry.operation, Operation::Create);
        assert_eq!(entry.entity_id, "exp-1");
        assert!(entry.before.is_none());
        assert_eq!(entry.after, Some(data));
    }

    #[test]
    fn test_update_and_delete_entries() {
        let before = json!({"category": "FOOD"});
        let after = json!({"category": "STAFF"});
        let update = AuditEntry::update(
            EntityType::Expense,
            "exp-3",
            None,
            &before,
            &after,
            Some("category: \"FOOD\" -> \"STAFF\"".into()),
        );
        assert!(update.before.is_some() && update.after.is_some());

        let delete = AuditEntry::delete(EntityType::Expense, "exp-3", None, &after);
        assert_eq!(delete.operation, Operation::Delete);
        assert!(delete.after.is_none());
    }

    #[test]
    fn test_serialized_form_omits_empty_fields() {
        let entry = AuditEntry::create(EntityType::Settings, "config", None, &json!({}));
        let line = serde_json::to_string(&entry).unwrap();

        assert!(line.contains("\"operation\":\"create\""));
        assert!(line.contains("\"entity_type\":\"settings\""));
        assert!(!line.contains("before"));
        assert!(!line.contains("diff_summary"));
    }

    #[test]
    fn test_human_readable_format() {
        let entry = AuditEntry::update(
            EntityType::Expense,
            "exp-7",
            Some("Taxi".into()),
            &json!({"amount": 100}),
            &json!({"amount": 150}),
            Some("amount: 100 -> 150".into()),
        );

        let formatted = entry.format_human_readable();
        assert!(formatted.contains("UPDATE Expense exp-7 (Taxi)"));
        assert!(formatted.contains("Changes: amount: 100 -> 150"));
    }
}
