//! Record source abstraction
//!
//! Trait-based seam to the hosting application that owns the raw records.
//! The library never reads files or talks to the network itself; the
//! application implements [`RecordStore`] and the assembler pulls an
//! immutable snapshot through it per request.

use anyhow::Result;
use async_trait::async_trait;

use crate::records::{
    CostItem, DiscussionEntry, Organization, PledgeSeed, Project, Snapshot, TaskItem,
};

/// Read access to the application's already-validated record sets.
///
/// Each method returns one complete record set. Implementations may serve
/// from memory or load lazily; the assembler issues the calls concurrently
/// and treats the results as one immutable snapshot. Retry and timeout
/// policy belongs to the implementation.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn load_organization(&self) -> Result<Organization>;
    async fn load_project(&self) -> Result<Project>;
    async fn load_cost_items(&self) -> Result<Vec<CostItem>>;
    async fn load_task_items(&self) -> Result<Vec<TaskItem>>;
    async fn load_pledge_seeds(&self) -> Result<Vec<PledgeSeed>>;
    async fn load_discussion_entries(&self) -> Result<Vec<DiscussionEntry>>;
}

/// [`RecordStore`] serving a snapshot held in memory.
///
/// Used by tests and by applications that already hold their records in
/// memory, e.g. parsed from embedded seed data.
#[derive(Debug, Clone)]
pub struct MemoryRecordStore {
    snapshot: Snapshot,
}

impl MemoryRecordStore {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn load_organization(&self) -> Result<Organization> {
        Ok(self.snapshot.organization.clone())
    }

    async fn load_project(&self) -> Result<Project> {
        Ok(self.snapshot.project.clone())
    }

    async fn load_cost_items(&self) -> Result<Vec<CostItem>> {
        Ok(self.snapshot.costs.clone())
    }

    async fn load_task_items(&self) -> Result<Vec<TaskItem>> {
        Ok(self.snapshot.tasks.clone())
    }

    async fn load_pledge_seeds(&self) -> Result<Vec<PledgeSeed>> {
        Ok(self.snapshot.pledges.clone())
    }

    async fn load_discussion_entries(&self) -> Result<Vec<DiscussionEntry>> {
        Ok(self.snapshot.discussions.clone())
    }
}
