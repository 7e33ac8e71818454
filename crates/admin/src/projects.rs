//! In-memory project list for the admin panel.
//!
//! The panel owns one ordered collection of projects, refreshed wholesale
//! from the backend and then kept current by applying each successful remote
//! write locally instead of refetching. The collection is arena-style: an
//! ordering list of ids plus an id-indexed map of records, so lookups stay
//! stable while order is preserved.

use std::collections::HashMap;

use alkhair_core::{Project, ProjectId, StoreError};

/// Fetch status of the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListStatus {
    /// A refresh is in flight; the prior collection (if any) stays visible.
    Loading,
    /// The collection mirrors the last successful `list()` response.
    Ready,
    /// The last refresh failed; the message is rendered as a banner and the
    /// prior collection is left intact.
    Error(String),
}

/// Owned, ordered project collection with optimistic local mutation.
///
/// Order is the store's return order (newest first). All mutating `apply_*`
/// methods are called only after the corresponding remote write succeeded;
/// remote failures never touch this state.
#[derive(Debug)]
pub struct ProjectList {
    order: Vec<ProjectId>,
    records: HashMap<ProjectId, Project>,
    status: ListStatus,
}

impl Default for ProjectList {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectList {
    /// An empty list, loading until the first refresh completes.
    #[must_use]
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            records: HashMap::new(),
            status: ListStatus::Loading,
        }
    }

    /// Mark a refresh as in flight. The existing collection stays readable.
    pub fn begin_refresh(&mut self) {
        self.status = ListStatus::Loading;
    }

    /// Land a refresh result: wholesale replacement on success, an error
    /// banner (collection untouched) on failure.
    pub fn complete_refresh(&mut self, result: Result<Vec<Project>, StoreError>) {
        match result {
            Ok(projects) => {
                self.order = projects.iter().map(|p| p.id.clone()).collect();
                self.records = projects.into_iter().map(|p| (p.id.clone(), p)).collect();
                self.status = ListStatus::Ready;
            }
            Err(err) => {
                self.status = ListStatus::Error(err.to_string());
            }
        }
    }

    /// Prepend a freshly created project without refetching.
    pub fn apply_create(&mut self, project: Project) {
        self.order.insert(0, project.id.clone());
        self.records.insert(project.id.clone(), project);
    }

    /// Replace the matching record in place, preserving its position.
    /// Unknown ids are ignored (the record was deleted from another view).
    pub fn apply_update(&mut self, project: Project) {
        if let Some(slot) = self.records.get_mut(&project.id) {
            *slot = project;
        }
    }

    /// Remove the matching record by id.
    pub fn apply_delete(&mut self, id: &ProjectId) {
        self.order.retain(|existing| existing != id);
        self.records.remove(id);
    }

    /// Begin a destructive delete. The remote call must only be issued after
    /// the returned handle is explicitly confirmed; dropping or cancelling it
    /// leaves all state untouched. Returns `None` for unknown ids.
    #[must_use]
    pub fn request_delete(&self, id: &ProjectId) -> Option<PendingDelete> {
        self.records
            .contains_key(id)
            .then(|| PendingDelete { id: id.clone() })
    }

    /// Projects in display order.
    pub fn projects(&self) -> impl Iterator<Item = &Project> {
        self.order.iter().filter_map(|id| self.records.get(id))
    }

    /// Look up a single record by id.
    #[must_use]
    pub fn get(&self, id: &ProjectId) -> Option<&Project> {
        self.records.get(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[must_use]
    pub const fn status(&self) -> &ListStatus {
        &self.status
    }
}

/// A delete that has been requested but not yet confirmed.
///
/// Holding the confirmation in the type keeps the contract visible: no code
/// path reaches the remote delete without passing through [`confirm`].
///
/// [`confirm`]: PendingDelete::confirm
#[derive(Debug)]
#[must_use = "a requested delete does nothing until confirmed"]
pub struct PendingDelete {
    id: ProjectId,
}

impl PendingDelete {
    /// The operator confirmed; yield the id for the remote delete call.
    #[must_use]
    pub fn confirm(self) -> ProjectId {
        self.id
    }

    /// The operator backed out; nothing happens.
    pub fn cancel(self) {}

    /// The id this request targets.
    #[must_use]
    pub const fn id(&self) -> &ProjectId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn project(id: &str, name: &str) -> Project {
        Project {
            id: ProjectId::new(id),
            name: name.to_owned(),
            description: "...".to_owned(),
            image: Some(format!("https://x/{id}.png")),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn ids(list: &ProjectList) -> Vec<&str> {
        list.projects().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_refresh_replaces_wholesale() {
        let mut list = ProjectList::new();
        assert_eq!(*list.status(), ListStatus::Loading);

        list.complete_refresh(Ok(vec![project("p1", "Warehouse"), project("p2", "Bridge")]));
        assert_eq!(*list.status(), ListStatus::Ready);
        assert_eq!(ids(&list), ["p1", "p2"]);

        list.begin_refresh();
        // Prior collection still visible while loading.
        assert_eq!(list.len(), 2);
        list.complete_refresh(Ok(vec![project("p3", "Clinic")]));
        assert_eq!(ids(&list), ["p3"]);
    }

    #[test]
    fn test_failed_refresh_keeps_prior_collection() {
        let mut list = ProjectList::new();
        list.complete_refresh(Ok(vec![project("p1", "Warehouse")]));

        list.begin_refresh();
        list.complete_refresh(Err(StoreError::Rejected("backend down".into())));

        assert_eq!(ids(&list), ["p1"]);
        assert_eq!(*list.status(), ListStatus::Error("backend down".into()));
    }

    #[test]
    fn test_apply_create_then_delete_round_trips() {
        let mut list = ProjectList::new();
        list.complete_refresh(Ok(vec![project("p1", "Warehouse")]));
        let before: Vec<Project> = list.projects().cloned().collect();

        list.apply_create(project("p9", "New"));
        assert_eq!(ids(&list), ["p9", "p1"]);

        list.apply_delete(&ProjectId::new("p9"));
        let after: Vec<Project> = list.projects().cloned().collect();
        assert_eq!(after, before);
    }

    #[test]
    fn test_apply_delete_only_project_empties_collection() {
        let mut list = ProjectList::new();
        list.complete_refresh(Ok(vec![project("p1", "Warehouse")]));

        list.apply_delete(&ProjectId::new("p1"));
        assert!(list.is_empty());
    }

    #[test]
    fn test_apply_update_preserves_position() {
        let mut list = ProjectList::new();
        list.complete_refresh(Ok(vec![
            project("p1", "Warehouse"),
            project("p2", "Bridge"),
            project("p3", "Clinic"),
        ]));

        let mut updated = project("p2", "Bridge (phase 2)");
        updated.image = Some("https://x/p2-v2.png".to_owned());
        list.apply_update(updated);

        assert_eq!(ids(&list), ["p1", "p2", "p3"]);
        assert_eq!(
            list.get(&ProjectId::new("p2")).unwrap().name,
            "Bridge (phase 2)"
        );
    }

    #[test]
    fn test_request_delete_requires_confirmation() {
        let mut list = ProjectList::new();
        list.complete_refresh(Ok(vec![project("p1", "Warehouse")]));

        // Cancel: state untouched.
        let pending = list.request_delete(&ProjectId::new("p1")).unwrap();
        pending.cancel();
        assert_eq!(list.len(), 1);

        // Unknown id: no pending delete at all.
        assert!(list.request_delete(&ProjectId::new("missing")).is_none());

        // Confirm: yields the id the remote call uses.
        let pending = list.request_delete(&ProjectId::new("p1")).unwrap();
        let id = pending.confirm();
        list.apply_delete(&id);
        assert!(list.is_empty());
    }
}
