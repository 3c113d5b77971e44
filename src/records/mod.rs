//! Domain records supplied by the hosting application
//!
//! The hosting application owns loading and validation of these records;
//! this crate only derives views over them. Field names follow the
//! application's camelCase wire schema so snapshots round-trip through
//! JSON unchanged.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Organization hosting one or more community projects.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// One community project within an organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub org_id: String,
    pub title: String,
    pub slug: String,
    pub summary: String,
    pub description: String,
}

/// Scalar display values attached to a cost item, keyed by label.
pub type CostMeta = BTreeMap<String, serde_json::Value>;

/// A recurring expense of the project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostItem {
    pub id: String,
    pub project_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Monthly amount this item requires; `None` means the amount is still open.
    pub need: Option<f64>,
    pub currency: String,
    #[serde(default)]
    pub meta: CostMeta,
    pub description: String,
    /// Reference to a supporting document, if one is filed.
    pub document: Option<String>,
}

/// Discriminator partitioning task records into standing roles and one-off tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskKind {
    Role,
    Task,
}

/// Recurring time window a role or task is expected to cover.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSchedule {
    pub label: String,
    pub start_hour: u8,
    pub end_hour: u8,
    pub days: Vec<String>,
}

/// A standing role or one-off task posted for the project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskItem {
    pub id: String,
    pub project_id: String,
    #[serde(rename = "type")]
    pub kind: TaskKind,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<TaskSchedule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<BTreeMap<String, String>>,
}

/// A block of `count` identical pledge units for one cost item.
///
/// Each unit is individually capped at `max_amount` per month. Units are
/// anonymous and interchangeable; a seed with `count` of zero contributes
/// nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PledgeSeed {
    pub item_id: String,
    pub max_amount: f64,
    pub count: u32,
}

/// Kind of contribution to the project discussion thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DiscussionKind {
    Rationale,
    Question,
    Counterproposal,
}

/// One entry in the project discussion thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscussionEntry {
    pub id: String,
    pub project_id: String,
    /// Cost or task item the entry refers to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    pub author: String,
    #[serde(rename = "type")]
    pub kind: DiscussionKind,
    pub created_at: DateTime<Utc>,
    pub content: String,
}

/// Immutable snapshot of every record set one assembly pass consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub organization: Organization,
    pub project: Project,
    pub costs: Vec<CostItem>,
    pub tasks: Vec<TaskItem>,
    pub pledges: Vec<PledgeSeed>,
    pub discussions: Vec<DiscussionEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cost_item_deserializes_from_wire_schema() {
        let raw = r#"{
            "id": "cost-1",
            "projectId": "proj-1",
            "type": "COST",
            "title": "Miete",
            "need": 840.0,
            "currency": "EUR",
            "meta": {"Fläche": "120 m²", "Befristung": null},
            "description": "Monatsmiete für das Erdgeschoss.",
            "document": null
        }"#;

        let item: CostItem = serde_json::from_str(raw).unwrap();
        assert_eq!(item.project_id, "proj-1");
        assert_eq!(item.need, Some(840.0));
        assert!(item.subtitle.is_none());
        assert!(item.document.is_none());
        assert_eq!(item.meta.len(), 2);
    }

    #[test]
    fn task_kind_uses_uppercase_wire_names() {
        let raw = r#"{
            "id": "task-1",
            "projectId": "proj-1",
            "type": "ROLE",
            "title": "Schlüsseldienst",
            "description": "Öffnet und schließt das Haus."
        }"#;

        let item: TaskItem = serde_json::from_str(raw).unwrap();
        assert_eq!(item.kind, TaskKind::Role);

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "ROLE");
        assert_eq!(json["projectId"], "proj-1");
    }

    #[test]
    fn discussion_entry_parses_rfc3339_timestamp() {
        let raw = r#"{
            "id": "disc-1",
            "projectId": "proj-1",
            "author": "Miriam",
            "type": "QUESTION",
            "createdAt": "2025-11-03T18:15:00Z",
            "content": "Ist die Miete inklusive Betriebskosten?"
        }"#;

        let entry: DiscussionEntry = serde_json::from_str(raw).unwrap();
        assert_eq!(entry.kind, DiscussionKind::Question);
        assert_eq!(entry.created_at.to_rfc3339(), "2025-11-03T18:15:00+00:00");
        assert!(entry.item_id.is_none());
    }
}
