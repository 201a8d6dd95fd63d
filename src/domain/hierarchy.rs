use super::staff::{Roster, StaffId};
use crate::error::{AdminError, Result};
use std::collections::HashSet;

/// Ordered approvers for one requester, direct manager first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ApprovalChain(Vec<StaffId>);

impl ApprovalChain {
    pub fn new(approvers: Vec<StaffId>) -> Self {
        Self(approvers)
    }

    pub fn first(&self) -> Option<StaffId> {
        self.0.first().copied()
    }

    pub fn position(&self, approver: StaffId) -> Option<usize> {
        self.0.iter().position(|id| *id == approver)
    }

    /// The approver after `approver`, or `None` if `approver` is last or absent.
    pub fn next_after(&self, approver: StaffId) -> Option<StaffId> {
        self.position(approver)
            .and_then(|index| self.0.get(index + 1))
            .copied()
    }

    pub fn approvers(&self) -> &[StaffId] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Walks manager links upward from `requester`.
///
/// The walk ends at a member without a manager, or at a manager id that is
/// not on the roster. Every id is visited at most once; reaching an id a
/// second time means the links form a cycle, which is reported instead of
/// producing a truncated chain.
pub fn resolve_chain(requester: StaffId, roster: &Roster) -> Result<ApprovalChain> {
    let mut visited = HashSet::from([requester]);
    let mut approvers = Vec::new();
    let mut current = requester;

    while let Some(manager) = roster.manager_of(current) {
        if !roster.contains(manager) {
            break;
        }
        if !visited.insert(manager) {
            return Err(AdminError::CyclicHierarchy { staff: requester });
        }
        approvers.push(manager);
        current = manager;
    }

    Ok(ApprovalChain(approvers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::staff::StaffMember;

    fn school() -> Roster {
        Roster::new([
            StaffMember::new(1, "Principal"),
            StaffMember::new(2, "Deputy").reporting_to(1),
            StaffMember::new(3, "Head of Science").reporting_to(2),
            StaffMember::new(4, "Chemistry Teacher").reporting_to(3),
        ])
    }

    #[test]
    fn test_chain_follows_manager_links_upward() {
        let chain = resolve_chain(4, &school()).unwrap();
        assert_eq!(chain.approvers(), &[3, 2, 1]);
    }

    #[test]
    fn test_top_of_hierarchy_has_empty_chain() {
        let chain = resolve_chain(1, &school()).unwrap();
        assert!(chain.is_empty());
        assert_eq!(chain.first(), None);
    }

    #[test]
    fn test_dangling_manager_ends_chain() {
        let roster = Roster::new([
            StaffMember::new(2, "Deputy").reporting_to(99),
            StaffMember::new(3, "Teacher").reporting_to(2),
        ]);
        let chain = resolve_chain(3, &roster).unwrap();
        assert_eq!(chain.approvers(), &[2]);
    }

    #[test]
    fn test_unknown_requester_has_empty_chain() {
        let chain = resolve_chain(42, &school()).unwrap();
        assert!(chain.is_empty());
    }

    #[test]
    fn test_chain_never_exceeds_roster_size() {
        let roster = school();
        for id in 1..=4 {
            let chain = resolve_chain(id, &roster).unwrap();
            assert!(chain.len() <= roster.len());
        }
    }

    #[test]
    fn test_two_member_cycle_terminates_with_error() {
        let roster = Roster::new([
            StaffMember::new(1, "A").reporting_to(2),
            StaffMember::new(2, "B").reporting_to(1),
        ]);
        let result = resolve_chain(1, &roster);
        assert!(matches!(
            result,
            Err(AdminError::CyclicHierarchy { staff: 1 })
        ));
    }

    #[test]
    fn test_cycle_above_requester_is_detected() {
        let roster = Roster::new([
            StaffMember::new(1, "A").reporting_to(2),
            StaffMember::new(2, "B").reporting_to(3),
            StaffMember::new(3, "C").reporting_to(2),
            StaffMember::new(4, "Teacher").reporting_to(1),
        ]);
        assert!(matches!(
            resolve_chain(4, &roster),
            Err(AdminError::CyclicHierarchy { staff: 4 })
        ));
    }

    #[test]
    fn test_self_managed_member_is_a_cycle() {
        let roster = Roster::new([StaffMember::new(1, "Loop").reporting_to(1)]);
        assert!(resolve_chain(1, &roster).is_err());
    }

    #[test]
    fn test_next_after() {
        let chain = ApprovalChain::new(vec![10, 20, 30]);
        assert_eq!(chain.next_after(10), Some(20));
        assert_eq!(chain.next_after(30), None);
        assert_eq!(chain.next_after(99), None);
    }
}
