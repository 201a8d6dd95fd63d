use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type StaffId = u32;
pub type RateCardId = u32;

/// A member of staff as supplied by the caller.
///
/// Teachers and managers share this record; a missing `rate_card_id` means
/// the member is not paid through the payroll engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: StaffId,
    pub name: String,
    pub manager_id: Option<StaffId>,
    pub rate_card_id: Option<RateCardId>,
    pub periods_worked: Option<u32>,
    pub moderation_hours: Option<Decimal>,
}

impl StaffMember {
    pub fn new(id: StaffId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            manager_id: None,
            rate_card_id: None,
            periods_worked: None,
            moderation_hours: None,
        }
    }

    pub fn reporting_to(mut self, manager_id: StaffId) -> Self {
        self.manager_id = Some(manager_id);
        self
    }

    pub fn paid_by(mut self, rate_card_id: RateCardId) -> Self {
        self.rate_card_id = Some(rate_card_id);
        self
    }

    pub fn with_workload(mut self, periods_worked: u32, moderation_hours: Decimal) -> Self {
        self.periods_worked = Some(periods_worked);
        self.moderation_hours = Some(moderation_hours);
        self
    }
}

/// Read-only view of the staff list, indexed by id.
///
/// Manager links are kept as a plain `id -> manager id` map rather than as
/// references between members.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    members: HashMap<StaffId, StaffMember>,
    managers: HashMap<StaffId, StaffId>,
}

impl Roster {
    pub fn new(members: impl IntoIterator<Item = StaffMember>) -> Self {
        let mut roster = Self::default();
        for member in members {
            if let Some(manager) = member.manager_id {
                roster.managers.insert(member.id, manager);
            } else {
                roster.managers.remove(&member.id);
            }
            roster.members.insert(member.id, member);
        }
        roster
    }

    pub fn get(&self, id: StaffId) -> Option<&StaffMember> {
        self.members.get(&id)
    }

    pub fn contains(&self, id: StaffId) -> bool {
        self.members.contains_key(&id)
    }

    pub fn manager_of(&self, id: StaffId) -> Option<StaffId> {
        self.managers.get(&id).copied()
    }

    /// Display name for history labels; falls back to the numeric id.
    pub fn display_name(&self, id: StaffId) -> String {
        self.get(id)
            .map(|member| member.name.clone())
            .unwrap_or_else(|| format!("staff #{id}"))
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_indexes_manager_links() {
        let roster = Roster::new([
            StaffMember::new(1, "Head"),
            StaffMember::new(2, "Deputy").reporting_to(1),
        ]);

        assert_eq!(roster.len(), 2);
        assert_eq!(roster.manager_of(2), Some(1));
        assert_eq!(roster.manager_of(1), None);
        assert_eq!(roster.display_name(2), "Deputy");
        assert_eq!(roster.display_name(9), "staff #9");
    }

    #[test]
    fn test_later_record_replaces_earlier() {
        let roster = Roster::new([
            StaffMember::new(2, "Deputy").reporting_to(1),
            StaffMember::new(2, "Deputy"),
        ]);

        assert_eq!(roster.len(), 1);
        assert_eq!(roster.manager_of(2), None);
    }
}
