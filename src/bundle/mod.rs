//! Project bundle assembly
//!
//! Joins the raw records of one project into the presentation-ready view:
//! cost items with their computed pledge coverage, role and task postings,
//! and the discussion thread in chronological order.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::allocation::{self, AllocationResult};
use crate::error::{Error, Result};
use crate::records::{
    CostItem, DiscussionEntry, Organization, PledgeSeed, Project, Snapshot, TaskItem, TaskKind,
};
use crate::store::RecordStore;

/// A cost item enriched with its pledge allocation and coverage figures.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostWithComputed {
    #[serde(flatten)]
    pub item: CostItem,
    /// Portion of the need covered by pledges, capped at the need itself.
    pub coverage_amount: f64,
    /// `coverage_amount / need`; zero when the need is absent or zero.
    pub coverage_ratio: f64,
    /// Pledge seeds matched to this item.
    pub pledges: Vec<PledgeSeed>,
    pub allocation: AllocationResult,
}

/// Everything the presentation layer needs to render one project page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectBundle {
    pub organization: Organization,
    pub project: Project,
    pub costs: Vec<CostWithComputed>,
    pub roles: Vec<TaskItem>,
    pub tasks: Vec<TaskItem>,
    pub discussions: Vec<DiscussionEntry>,
}

/// Load all record sets from `store` and assemble the bundle for the
/// addressed project.
///
/// The loads are independent reads and run concurrently; assembly starts
/// only once all of them are available, since pledge matching needs the
/// full pledge-seed set. Each invocation derives everything from the
/// snapshot it loaded and shares no state with other invocations.
pub async fn assemble(
    org_slug: &str,
    project_slug: &str,
    store: &dyn RecordStore,
) -> Result<ProjectBundle> {
    debug!(org_slug, project_slug, "loading project records");
    let (organization, project, costs, tasks, pledges, discussions) = tokio::try_join!(
        store.load_organization(),
        store.load_project(),
        store.load_cost_items(),
        store.load_task_items(),
        store.load_pledge_seeds(),
        store.load_discussion_entries(),
    )?;

    assemble_snapshot(
        org_slug,
        project_slug,
        Snapshot {
            organization,
            project,
            costs,
            tasks,
            pledges,
            discussions,
        },
    )
}

/// Assemble the bundle for the addressed project from an already-loaded
/// snapshot.
///
/// Fails with [`Error::NotFound`] when either slug does not match the
/// snapshot's organization or project; the caller renders that as a
/// not-found page.
pub fn assemble_snapshot(
    org_slug: &str,
    project_slug: &str,
    snapshot: Snapshot,
) -> Result<ProjectBundle> {
    let Snapshot {
        organization,
        project,
        costs,
        tasks,
        pledges,
        discussions,
    } = snapshot;

    if organization.slug != org_slug {
        return Err(Error::NotFound(format!(
            "organization with slug {org_slug}"
        )));
    }
    if project.slug != project_slug {
        return Err(Error::NotFound(format!("project with slug {project_slug}")));
    }

    let costs: Vec<CostWithComputed> = costs
        .into_iter()
        .filter(|cost| cost.project_id == project.id)
        .map(|cost| compute_coverage(cost, &pledges))
        .collect();

    let (roles, tasks): (Vec<TaskItem>, Vec<TaskItem>) = tasks
        .into_iter()
        .filter(|task| task.project_id == project.id)
        .partition(|task| task.kind == TaskKind::Role);

    let mut discussions: Vec<DiscussionEntry> = discussions
        .into_iter()
        .filter(|entry| entry.project_id == project.id)
        .collect();
    // Stable: entries with the same timestamp keep their input order.
    discussions.sort_by_key(|entry| entry.created_at);

    debug!(
        project = %project.slug,
        costs = costs.len(),
        roles = roles.len(),
        tasks = tasks.len(),
        discussions = discussions.len(),
        "assembled project bundle"
    );

    Ok(ProjectBundle {
        organization,
        project,
        costs,
        roles,
        tasks,
        discussions,
    })
}

/// Attach the pledge allocation and coverage figures to one cost item.
fn compute_coverage(item: CostItem, all_pledges: &[PledgeSeed]) -> CostWithComputed {
    let pledges: Vec<PledgeSeed> = all_pledges
        .iter()
        .filter(|pledge| pledge.item_id == item.id)
        .cloned()
        .collect();
    let allocation = allocation::allocate(item.need, &pledges);

    let (coverage_amount, coverage_ratio) = match item.need {
        Some(need) if need > 0.0 => {
            let covered = allocation.total_assigned.min(need);
            (covered, covered / need)
        }
        _ => (0.0, 0.0),
    };

    CostWithComputed {
        item,
        coverage_amount,
        coverage_ratio,
        pledges,
        allocation,
    }
}
