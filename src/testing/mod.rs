//! Test fixtures shared by unit and integration tests
//!
//! A sample snapshot in the shape the hosting application supplies: one
//! organization, one project, cost items with pledge seeds, role and task
//! postings, and a short discussion thread.

use chrono::{DateTime, TimeZone, Utc};

use crate::records::{
    CostItem, DiscussionEntry, DiscussionKind, Organization, PledgeSeed, Project, Snapshot,
    TaskItem, TaskKind, TaskSchedule,
};

fn timestamp(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 11, day, hour, 15, 0).unwrap()
}

pub fn sample_organization() -> Organization {
    Organization {
        id: "org-1".to_string(),
        name: "Dorfkern Kollektiv".to_string(),
        slug: "dorfkern".to_string(),
        location: Some("Stanz im Mürztal".to_string()),
    }
}

pub fn sample_project() -> Project {
    Project {
        id: "proj-1".to_string(),
        org_id: "org-1".to_string(),
        title: "Werkstatthaus".to_string(),
        slug: "werkstatthaus".to_string(),
        summary: "Offene Werkstatt und Treffpunkt im alten Gemeindehaus.".to_string(),
        description: "Das Werkstatthaus wird gemeinschaftlich getragen: alle laufenden \
                      Kosten sind offengelegt und werden über monatliche Zusagen gedeckt."
            .to_string(),
    }
}

/// Three cost items: partially covered rent, fully covered utilities, and
/// one with an open amount.
pub fn sample_cost_items() -> Vec<CostItem> {
    vec![
        CostItem {
            id: "cost-rent".to_string(),
            project_id: "proj-1".to_string(),
            title: "Miete Erdgeschoss".to_string(),
            subtitle: Some("inkl. Lagerraum".to_string()),
            need: Some(840.0),
            currency: "EUR".to_string(),
            meta: [(
                "Fläche".to_string(),
                serde_json::Value::String("120 m²".to_string()),
            )]
            .into_iter()
            .collect(),
            description: "Monatsmiete laut Vertrag mit der Gemeinde.".to_string(),
            document: Some("unterlagen/mietvertrag.pdf".to_string()),
        },
        CostItem {
            id: "cost-power".to_string(),
            project_id: "proj-1".to_string(),
            title: "Strom & Heizung".to_string(),
            subtitle: None,
            need: Some(120.0),
            currency: "EUR".to_string(),
            meta: Default::default(),
            description: "Abschlag laut Jahresabrechnung.".to_string(),
            document: None,
        },
        CostItem {
            id: "cost-upkeep".to_string(),
            project_id: "proj-1".to_string(),
            title: "Instandhaltung".to_string(),
            subtitle: None,
            need: None,
            currency: "EUR".to_string(),
            meta: Default::default(),
            description: "Rücklage für Reparaturen, Höhe noch offen.".to_string(),
            document: None,
        },
    ]
}

pub fn sample_pledge_seeds() -> Vec<PledgeSeed> {
    vec![
        PledgeSeed {
            item_id: "cost-rent".to_string(),
            max_amount: 30.0,
            count: 12,
        },
        PledgeSeed {
            item_id: "cost-rent".to_string(),
            max_amount: 60.0,
            count: 6,
        },
        PledgeSeed {
            item_id: "cost-power".to_string(),
            max_amount: 10.0,
            count: 12,
        },
    ]
}

pub fn sample_task_items() -> Vec<TaskItem> {
    vec![
        TaskItem {
            id: "task-keys".to_string(),
            project_id: "proj-1".to_string(),
            kind: TaskKind::Role,
            title: "Schlüsseldienst".to_string(),
            description: "Öffnet und schließt das Haus an Werktagen.".to_string(),
            schedule: Some(TaskSchedule {
                label: "Werktags".to_string(),
                start_hour: 8,
                end_hour: 20,
                days: vec!["Mo".into(), "Di".into(), "Mi".into(), "Do".into(), "Fr".into()],
            }),
            meta: None,
        },
        TaskItem {
            id: "task-books".to_string(),
            project_id: "proj-1".to_string(),
            kind: TaskKind::Role,
            title: "Buchhaltung".to_string(),
            description: "Führt die offene Kostenübersicht nach.".to_string(),
            schedule: None,
            meta: None,
        },
        TaskItem {
            id: "task-fest".to_string(),
            project_id: "proj-1".to_string(),
            kind: TaskKind::Task,
            title: "Sommerfest vorbereiten".to_string(),
            description: "Einmalige Aufgabe im Juni.".to_string(),
            schedule: None,
            meta: None,
        },
    ]
}

/// Discussion entries deliberately out of chronological order.
pub fn sample_discussion_entries() -> Vec<DiscussionEntry> {
    vec![
        DiscussionEntry {
            id: "disc-3".to_string(),
            project_id: "proj-1".to_string(),
            item_id: Some("cost-rent".to_string()),
            author: "Jakob".to_string(),
            kind: DiscussionKind::Counterproposal,
            created_at: timestamp(5, 9),
            content: "Teilfläche untervermieten und den Bedarf senken?".to_string(),
        },
        DiscussionEntry {
            id: "disc-1".to_string(),
            project_id: "proj-1".to_string(),
            item_id: None,
            author: "Miriam".to_string(),
            kind: DiscussionKind::Rationale,
            created_at: timestamp(3, 18),
            content: "Warum wir die Kosten vollständig offenlegen.".to_string(),
        },
        DiscussionEntry {
            id: "disc-2".to_string(),
            project_id: "proj-1".to_string(),
            item_id: Some("cost-power".to_string()),
            author: "Selim".to_string(),
            kind: DiscussionKind::Question,
            created_at: timestamp(4, 12),
            content: "Ist der Abschlag inklusive Heizung?".to_string(),
        },
    ]
}

/// Complete snapshot for the sample project.
pub fn sample_snapshot() -> Snapshot {
    Snapshot {
        organization: sample_organization(),
        project: sample_project(),
        costs: sample_cost_items(),
        tasks: sample_task_items(),
        pledges: sample_pledge_seeds(),
        discussions: sample_discussion_entries(),
    }
}

/// Cost item belonging to a different project; must be filtered out.
pub fn foreign_cost_item() -> CostItem {
    CostItem {
        id: "cost-other".to_string(),
        project_id: "proj-2".to_string(),
        title: "Fremde Miete".to_string(),
        subtitle: None,
        need: Some(500.0),
        currency: "EUR".to_string(),
        meta: Default::default(),
        description: "Gehört zu einem anderen Projekt.".to_string(),
        document: None,
    }
}

/// Task item belonging to a different project; must be filtered out.
pub fn foreign_task_item() -> TaskItem {
    TaskItem {
        id: "task-other".to_string(),
        project_id: "proj-2".to_string(),
        kind: TaskKind::Task,
        title: "Fremde Aufgabe".to_string(),
        description: "Gehört zu einem anderen Projekt.".to_string(),
        schedule: None,
        meta: None,
    }
}

/// Discussion entry belonging to a different project; must be filtered out.
pub fn foreign_discussion_entry() -> DiscussionEntry {
    DiscussionEntry {
        id: "disc-other".to_string(),
        project_id: "proj-2".to_string(),
        item_id: None,
        author: "Anonym".to_string(),
        kind: DiscussionKind::Question,
        created_at: timestamp(6, 8),
        content: "Gehört zu einem anderen Projekt.".to_string(),
    }
}
