//! End-to-end assembly through the public record-store seam.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use mittragen::bundle::{self, ProjectBundle};
use mittragen::records::{
    CostItem, DiscussionEntry, Organization, PledgeSeed, Project, TaskItem,
};
use mittragen::store::{MemoryRecordStore, RecordStore};
use mittragen::testing;

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

async fn assemble_sample() -> ProjectBundle {
    init_tracing();
    let store = MemoryRecordStore::new(testing::sample_snapshot());
    bundle::assemble("dorfkern", "werkstatthaus", &store)
        .await
        .expect("sample snapshot must assemble")
}

#[tokio::test]
async fn assembles_bundle_from_store() {
    let bundle = assemble_sample().await;

    assert_eq!(bundle.organization.name, "Dorfkern Kollektiv");
    assert_eq!(bundle.project.title, "Werkstatthaus");
    assert_eq!(bundle.costs.len(), 3);
    assert_eq!(bundle.roles.len(), 2);
    assert_eq!(bundle.tasks.len(), 1);
    assert_eq!(bundle.discussions.len(), 3);

    // Utilities are fully pledged: 12 units of 10 against a need of 120.
    let power = bundle
        .costs
        .iter()
        .find(|cost| cost.item.id == "cost-power")
        .unwrap();
    assert_eq!(power.coverage_amount, 120.0);
    assert_eq!(power.coverage_ratio, 1.0);
    assert_eq!(power.allocation.charge_groups.len(), 1);
    assert_eq!(power.allocation.charge_groups[0].count, 12);
}

#[tokio::test]
async fn worked_allocation_scenario_survives_assembly() {
    let mut snapshot = testing::sample_snapshot();
    snapshot.costs = vec![CostItem {
        id: "cost-demo".to_string(),
        project_id: "proj-1".to_string(),
        title: "Demo".to_string(),
        subtitle: None,
        need: Some(100.0),
        currency: "EUR".to_string(),
        meta: Default::default(),
        description: "Demo-Kostenposition".to_string(),
        document: None,
    }];
    snapshot.pledges = vec![
        PledgeSeed {
            item_id: "cost-demo".to_string(),
            max_amount: 30.0,
            count: 2,
        },
        PledgeSeed {
            item_id: "cost-demo".to_string(),
            max_amount: 50.0,
            count: 1,
        },
    ];

    let store = MemoryRecordStore::new(snapshot);
    let bundle = bundle::assemble("dorfkern", "werkstatthaus", &store)
        .await
        .unwrap();

    let demo = &bundle.costs[0];
    assert_eq!(demo.allocation.sum_max, 110.0);
    assert_eq!(demo.allocation.total_assigned, 100.0);
    assert_eq!(demo.coverage_amount, 100.0);
    assert_eq!(demo.coverage_ratio, 1.0);

    let groups: Vec<(f64, u32)> = demo
        .allocation
        .charge_groups
        .iter()
        .map(|group| (group.amount, group.count))
        .collect();
    assert_eq!(groups, vec![(45.46, 1), (27.27, 2)]);
}

#[tokio::test]
async fn unknown_slugs_surface_as_not_found() {
    let store = MemoryRecordStore::new(testing::sample_snapshot());

    let err = bundle::assemble("anderes-dorf", "werkstatthaus", &store)
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    let err = bundle::assemble("dorfkern", "schwimmbad", &store)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn bundle_serializes_with_wire_field_names() {
    let bundle = assemble_sample().await;
    let json = serde_json::to_value(&bundle).unwrap();

    let rent = json["costs"]
        .as_array()
        .unwrap()
        .iter()
        .find(|cost| cost["id"] == "cost-rent")
        .unwrap();
    assert!(rent["coverageAmount"].is_number());
    assert!(rent["coverageRatio"].is_number());
    assert_eq!(rent["projectId"], "proj-1");
    assert!(rent["allocation"]["sumMax"].is_number());
    assert!(rent["allocation"]["totalAssigned"].is_number());
    assert!(rent["allocation"]["chargeGroups"].is_array());
    assert!(json["discussions"][0]["createdAt"].is_string());
}

/// Store whose pledge load fails; the assembler must surface the failure
/// as a store error, not a panic or a silent empty bundle.
struct FlakyStore {
    inner: MemoryRecordStore,
}

#[async_trait]
impl RecordStore for FlakyStore {
    async fn load_organization(&self) -> Result<Organization> {
        self.inner.load_organization().await
    }

    async fn load_project(&self) -> Result<Project> {
        self.inner.load_project().await
    }

    async fn load_cost_items(&self) -> Result<Vec<CostItem>> {
        self.inner.load_cost_items().await
    }

    async fn load_task_items(&self) -> Result<Vec<TaskItem>> {
        self.inner.load_task_items().await
    }

    async fn load_pledge_seeds(&self) -> Result<Vec<PledgeSeed>> {
        Err(anyhow!("pledge backend unavailable"))
    }

    async fn load_discussion_entries(&self) -> Result<Vec<DiscussionEntry>> {
        self.inner.load_discussion_entries().await
    }
}

#[tokio::test]
async fn failed_load_is_a_store_error() {
    let store = FlakyStore {
        inner: MemoryRecordStore::new(testing::sample_snapshot()),
    };

    let err = bundle::assemble("dorfkern", "werkstatthaus", &store)
        .await
        .unwrap_err();
    assert!(!err.is_not_found());
    assert!(err.to_string().contains("pledge backend unavailable"));
}
