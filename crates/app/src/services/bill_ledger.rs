//! Bill ledger: use-cases for building and querying a shared bill.

use splitbill_domain::error::{NotFoundError, SplitBillError, ValidationError};
use splitbill_domain::id::{ItemId, ParticipantId};
use splitbill_domain::item::{self, BillItem};
use splitbill_domain::money;
use splitbill_domain::participant::Participant;

use crate::id_generators::UuidIdGenerator;
use crate::ports::IdGenerator;

/// Label rendered for an assignee id that no longer resolves to a participant.
pub const UNKNOWN_PARTICIPANT: &str = "Unknown";

/// Owns the participants and items of one bill and keeps them consistent.
///
/// Mutations validate before touching state, so a rejected call leaves both
/// collections exactly as they were. Reads hand out shared borrows only.
#[derive(Debug)]
pub struct BillLedger<G> {
    ids: G,
    participants: Vec<Participant>,
    items: Vec<BillItem>,
}

impl Default for BillLedger<UuidIdGenerator> {
    fn default() -> Self {
        Self::new(UuidIdGenerator)
    }
}

impl<G: IdGenerator> BillLedger<G> {
    /// Create an empty ledger drawing ids from `ids`.
    pub fn new(ids: G) -> Self {
        Self {
            ids,
            participants: Vec::new(),
            items: Vec::new(),
        }
    }

    /// Add a participant with the trimmed `name`, appended after existing ones.
    ///
    /// # Errors
    ///
    /// Returns [`SplitBillError::Validation`] when the trimmed name is empty.
    #[tracing::instrument(skip(self))]
    pub fn add_participant(&mut self, name: &str) -> Result<Participant, SplitBillError> {
        if name.trim().is_empty() {
            tracing::debug!("rejected participant with empty name");
            return Err(ValidationError::EmptyName.into());
        }
        let participant = Participant::new(ParticipantId::new(self.ids.next_id()), name)?;
        self.participants.push(participant.clone());
        tracing::info!(participant_id = %participant.id, "participant added");
        Ok(participant)
    }

    /// Add an item split between `assigned_to`.
    ///
    /// Assignee ids are taken as given: they are neither deduplicated nor
    /// checked against the current participants.
    ///
    /// # Errors
    ///
    /// Returns [`SplitBillError::Validation`] with the first failing rule:
    /// empty name, then invalid price, then missing assignees.
    #[tracing::instrument(skip(self, assigned_to), fields(assignees = assigned_to.len()))]
    pub fn add_item(
        &mut self,
        name: &str,
        price: f64,
        assigned_to: Vec<ParticipantId>,
    ) -> Result<BillItem, SplitBillError> {
        item::validate_fields(name, price, &assigned_to)
            .inspect_err(|err| tracing::debug!(error = %err, "rejected item"))?;
        let item = BillItem::builder(ItemId::new(self.ids.next_id()))
            .name(name)
            .price(price)
            .assigned_to(assigned_to)
            .build()?;
        self.items.push(item.clone());
        tracing::info!(item_id = %item.id, price = item.price, "item added");
        Ok(item)
    }
}

impl<G> BillLedger<G> {
    /// Remove a participant and scrub its id from every item.
    ///
    /// Items left without assignees are kept. The scrub runs even when the
    /// participant is already gone, so stale assignee ids are cleaned up too.
    #[tracing::instrument(skip(self))]
    pub fn remove_participant(&mut self, id: &ParticipantId) -> Option<Participant> {
        let removed = self
            .participants
            .iter()
            .position(|participant| &participant.id == id)
            .map(|index| self.participants.remove(index));

        let mut orphaned = 0_usize;
        for item in &mut self.items {
            if item.unassign(id) && item.is_unassigned() {
                orphaned += 1;
            }
        }

        match &removed {
            Some(_) if orphaned > 0 => {
                tracing::warn!(orphaned, "participant removed, items left unassigned");
            }
            Some(_) => tracing::info!("participant removed"),
            None => tracing::debug!("participant not present"),
        }
        removed
    }

    /// Replace name, price, and assignees of an existing item in place.
    ///
    /// The item keeps its id and its position.
    ///
    /// # Errors
    ///
    /// Returns [`SplitBillError::Validation`] with the first failing rule, or
    /// [`SplitBillError::NotFound`] when no item has `id`. Validation runs
    /// first.
    #[tracing::instrument(skip(self, assigned_to), fields(assignees = assigned_to.len()))]
    pub fn edit_item(
        &mut self,
        id: &ItemId,
        name: &str,
        price: f64,
        assigned_to: Vec<ParticipantId>,
    ) -> Result<BillItem, SplitBillError> {
        item::validate_fields(name, price, &assigned_to)
            .inspect_err(|err| tracing::debug!(error = %err, "rejected item edit"))?;
        let Some(item) = self.items.iter_mut().find(|item| &item.id == id) else {
            tracing::debug!("item not present");
            return Err(NotFoundError {
                entity: "Item",
                id: id.to_string(),
            }
            .into());
        };
        item.name = name.trim().to_string();
        item.price = price;
        item.assigned_to = assigned_to;
        tracing::info!("item updated");
        Ok(item.clone())
    }

    /// Remove an item. Absent ids are ignored.
    #[tracing::instrument(skip(self))]
    pub fn remove_item(&mut self, id: &ItemId) -> Option<BillItem> {
        let index = self.items.iter().position(|item| &item.id == id)?;
        tracing::info!("item removed");
        Some(self.items.remove(index))
    }

    /// Clear every participant and item.
    ///
    /// Returns `false` when the ledger was already empty.
    #[tracing::instrument(skip(self))]
    pub fn reset(&mut self) -> bool {
        if self.is_empty() {
            return false;
        }
        self.participants.clear();
        self.items.clear();
        tracing::info!("ledger reset");
        true
    }

    #[must_use]
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    #[must_use]
    pub fn items(&self) -> &[BillItem] {
        &self.items
    }

    #[must_use]
    pub fn participant(&self, id: &ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|participant| &participant.id == id)
    }

    #[must_use]
    pub fn item(&self, id: &ItemId) -> Option<&BillItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Whether the ledger has neither participants nor items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty() && self.items.is_empty()
    }

    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of every item price, assigned or not.
    #[must_use]
    pub fn total_bill(&self) -> f64 {
        self.items.iter().map(|item| item.price).sum()
    }

    /// What `participant` owes: each item they carry, split by its current
    /// assignee count. Unknown ids owe nothing.
    #[must_use]
    pub fn participant_share(&self, participant: &ParticipantId) -> f64 {
        self.items.iter().map(|item| item.share(participant)).sum()
    }

    #[must_use]
    pub fn total_with_tax(&self, rate_percent: f64) -> f64 {
        money::apply_tax(self.total_bill(), rate_percent)
    }

    #[must_use]
    pub fn participant_share_with_tax(&self, participant: &ParticipantId, rate_percent: f64) -> f64 {
        money::apply_tax(self.participant_share(participant), rate_percent)
    }

    /// Price of the items nobody carries any more.
    ///
    /// This is the amount by which the per-person shares fall short of
    /// [`total_bill`](Self::total_bill); it is reported, not redistributed.
    #[must_use]
    pub fn unassigned_total(&self) -> f64 {
        self.items
            .iter()
            .filter(|item| item.is_unassigned())
            .map(|item| item.price)
            .sum()
    }

    /// Names of the item's assignees in assignment order.
    ///
    /// Ids that no longer resolve render as [`UNKNOWN_PARTICIPANT`].
    #[must_use]
    pub fn assignee_names(&self, item: &BillItem) -> Vec<String> {
        item.assigned_to
            .iter()
            .map(|id| {
                self.participant(id)
                    .map_or(UNKNOWN_PARTICIPANT, |participant| participant.name.as_str())
                    .to_string()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id_generators::SequentialIdGenerator;
    use proptest::prelude::*;

    const EPS: f64 = 1e-9;

    fn make_ledger() -> BillLedger<SequentialIdGenerator> {
        BillLedger::new(SequentialIdGenerator::new("id"))
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn should_add_participant_with_trimmed_name() {
        let mut ledger = make_ledger();
        let alice = ledger.add_participant("  Alice  ").unwrap();
        assert_eq!(alice.name, "Alice");
        assert_eq!(alice.id.as_str(), "id-1");
        assert_eq!(ledger.participants(), &[alice]);
    }

    #[test]
    fn should_keep_participants_in_insertion_order() {
        let mut ledger = make_ledger();
        ledger.add_participant("Alice").unwrap();
        ledger.add_participant("Bob").unwrap();
        ledger.add_participant("Carol").unwrap();
        let names: Vec<_> = ledger.participants().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Alice", "Bob", "Carol"]);
    }

    #[test]
    fn should_reject_blank_participant_without_consuming_an_id() {
        let mut ledger = make_ledger();
        let result = ledger.add_participant(" \n ");
        assert!(matches!(
            result,
            Err(SplitBillError::Validation(ValidationError::EmptyName))
        ));
        assert!(ledger.participants().is_empty());
        let alice = ledger.add_participant("Alice").unwrap();
        assert_eq!(alice.id.as_str(), "id-1");
    }

    #[test]
    fn should_reject_invalid_items_and_leave_state_unchanged() {
        let mut ledger = make_ledger();
        let alice = ledger.add_participant("Alice").unwrap();

        let empty_name = ledger.add_item("", 5.0, vec![alice.id.clone()]);
        assert!(matches!(
            empty_name,
            Err(SplitBillError::Validation(ValidationError::EmptyName))
        ));

        let negative = ledger.add_item("Pizza", -1.0, vec![alice.id.clone()]);
        assert!(matches!(
            negative,
            Err(SplitBillError::Validation(ValidationError::InvalidPrice))
        ));

        let unassigned = ledger.add_item("Pizza", 5.0, vec![]);
        assert!(matches!(
            unassigned,
            Err(SplitBillError::Validation(ValidationError::NoAssignees))
        ));

        assert_eq!(ledger.item_count(), 0);
    }

    #[test]
    fn should_accept_assignee_ids_without_checking_them() {
        let mut ledger = make_ledger();
        let ghost = ParticipantId::new("ghost");
        let item = ledger
            .add_item("Tip", 4.0, vec![ghost.clone(), ghost.clone()])
            .unwrap();
        assert_eq!(item.assigned_to, vec![ghost.clone(), ghost]);
    }

    #[test]
    fn should_split_lunch_evenly_between_two() {
        let mut ledger = make_ledger();
        let alice = ledger.add_participant("Alice").unwrap();
        let bob = ledger.add_participant("Bob").unwrap();
        ledger
            .add_item("Lunch", 20.0, vec![alice.id.clone(), bob.id.clone()])
            .unwrap();

        assert_close(ledger.participant_share(&alice.id), 10.0);
        assert_close(ledger.participant_share(&bob.id), 10.0);
        assert_close(ledger.total_bill(), 20.0);
    }

    #[test]
    fn should_return_zero_share_for_unknown_participant() {
        let mut ledger = make_ledger();
        let alice = ledger.add_participant("Alice").unwrap();
        ledger.add_item("Lunch", 20.0, vec![alice.id]).unwrap();
        assert_close(ledger.participant_share(&ParticipantId::new("nobody")), 0.0);
    }

    #[test]
    fn should_cascade_participant_removal_into_items() {
        let mut ledger = make_ledger();
        let alice = ledger.add_participant("Alice").unwrap();
        let bob = ledger.add_participant("Bob").unwrap();
        let pizza = ledger
            .add_item("Pizza", 30.0, vec![alice.id.clone(), bob.id.clone()])
            .unwrap();
        assert_close(ledger.participant_share(&alice.id), 15.0);

        let removed = ledger.remove_participant(&bob.id);
        assert_eq!(removed, Some(bob.clone()));
        assert!(ledger.participant(&bob.id).is_none());
        assert_eq!(ledger.item(&pizza.id).unwrap().assigned_to, vec![alice.id.clone()]);
        assert_close(ledger.participant_share(&alice.id), 30.0);
        assert_close(ledger.total_bill(), 30.0);
    }

    #[test]
    fn should_keep_orphaned_item_in_total_but_out_of_shares() {
        let mut ledger = make_ledger();
        let alice = ledger.add_participant("Alice").unwrap();
        let bob = ledger.add_participant("Bob").unwrap();
        ledger
            .add_item("Pizza", 30.0, vec![alice.id.clone(), bob.id.clone()])
            .unwrap();
        let beer = ledger.add_item("Beer", 8.0, vec![bob.id.clone()]).unwrap();

        ledger.remove_participant(&bob.id);

        let beer = ledger.item(&beer.id).unwrap();
        assert!(beer.is_unassigned());
        assert_close(ledger.total_bill(), 38.0);
        assert_close(ledger.participant_share(&alice.id), 30.0);
        assert_close(ledger.unassigned_total(), 8.0);
        assert_eq!(ledger.item_count(), 2);
    }

    #[test]
    fn should_ignore_removal_of_unknown_participant() {
        let mut ledger = make_ledger();
        let alice = ledger.add_participant("Alice").unwrap();
        assert!(ledger.remove_participant(&ParticipantId::new("nobody")).is_none());
        assert_eq!(ledger.participants(), &[alice]);
    }

    #[test]
    fn should_scrub_stale_assignee_even_when_participant_is_gone() {
        let mut ledger = make_ledger();
        let alice = ledger.add_participant("Alice").unwrap();
        let ghost = ParticipantId::new("ghost");
        let item = ledger
            .add_item("Tip", 4.0, vec![alice.id.clone(), ghost.clone()])
            .unwrap();
        assert!(ledger.remove_participant(&ghost).is_none());
        assert_eq!(ledger.item(&item.id).unwrap().assigned_to, vec![alice.id]);
    }

    #[test]
    fn should_edit_item_in_place() {
        let mut ledger = make_ledger();
        let alice = ledger.add_participant("Alice").unwrap();
        let bob = ledger.add_participant("Bob").unwrap();
        let first = ledger.add_item("Pizza", 30.0, vec![alice.id.clone()]).unwrap();
        let second = ledger.add_item("Soda", 4.0, vec![bob.id.clone()]).unwrap();

        let edited = ledger
            .edit_item(&first.id, " Large pizza ", 36.0, vec![alice.id.clone(), bob.id.clone()])
            .unwrap();

        assert_eq!(edited.id, first.id);
        assert_eq!(edited.name, "Large pizza");
        assert_eq!(ledger.items()[0], edited);
        assert_eq!(ledger.items()[1], second);
        assert_close(ledger.participant_share(&bob.id), 22.0);
    }

    #[test]
    fn should_validate_edit_before_looking_up_item() {
        let mut ledger = make_ledger();
        let alice = ledger.add_participant("Alice").unwrap();
        let item = ledger.add_item("Pizza", 30.0, vec![alice.id.clone()]).unwrap();

        let invalid = ledger.edit_item(&ItemId::new("missing"), "Pizza", 0.0, vec![alice.id.clone()]);
        assert!(matches!(
            invalid,
            Err(SplitBillError::Validation(ValidationError::InvalidPrice))
        ));

        let unassigned = ledger.edit_item(&item.id, "Pizza", 30.0, vec![]);
        assert!(matches!(
            unassigned,
            Err(SplitBillError::Validation(ValidationError::NoAssignees))
        ));
        assert_eq!(ledger.items(), &[item]);
    }

    #[test]
    fn should_return_not_found_when_editing_unknown_item() {
        let mut ledger = make_ledger();
        let alice = ledger.add_participant("Alice").unwrap();
        let result = ledger.edit_item(&ItemId::new("missing"), "Pizza", 10.0, vec![alice.id]);
        match result {
            Err(SplitBillError::NotFound(err)) => {
                assert_eq!(err.entity, "Item");
                assert_eq!(err.id, "missing");
            }
            other => panic!("expected not found, got {other:?}"),
        }
    }

    #[test]
    fn should_remove_item_and_ignore_unknown_ids() {
        let mut ledger = make_ledger();
        let alice = ledger.add_participant("Alice").unwrap();
        let pizza = ledger.add_item("Pizza", 30.0, vec![alice.id.clone()]).unwrap();
        let soda = ledger.add_item("Soda", 4.0, vec![alice.id]).unwrap();

        assert_eq!(ledger.remove_item(&pizza.id), Some(pizza));
        assert!(ledger.remove_item(&ItemId::new("missing")).is_none());
        assert_eq!(ledger.items(), &[soda]);
        assert_close(ledger.total_bill(), 4.0);
    }

    #[test]
    fn should_never_reuse_ids_after_removal() {
        let mut ledger = make_ledger();
        let alice = ledger.add_participant("Alice").unwrap();
        ledger.remove_participant(&alice.id);
        let bob = ledger.add_participant("Bob").unwrap();
        assert_ne!(alice.id, bob.id);
    }

    #[test]
    fn should_report_whether_reset_cleared_anything() {
        let mut ledger = make_ledger();
        assert!(!ledger.reset());

        let alice = ledger.add_participant("Alice").unwrap();
        ledger.add_item("Pizza", 30.0, vec![alice.id]).unwrap();
        assert!(ledger.reset());
        assert!(ledger.is_empty());
        assert_eq!(ledger.item_count(), 0);
        assert!(!ledger.reset());
    }

    #[test]
    fn should_apply_tax_to_total_and_shares() {
        let mut ledger = make_ledger();
        let alice = ledger.add_participant("Alice").unwrap();
        let bob = ledger.add_participant("Bob").unwrap();
        ledger
            .add_item("Pizza", 30.0, vec![alice.id.clone(), bob.id.clone()])
            .unwrap();

        assert_close(ledger.total_with_tax(10.0), 33.0);
        assert_close(ledger.participant_share_with_tax(&alice.id, 10.0), 16.5);
        assert_close(ledger.participant_share_with_tax(&bob.id, -10.0), 13.5);
    }

    #[test]
    fn should_resolve_assignee_names_with_unknown_fallback() {
        let mut ledger = make_ledger();
        let alice = ledger.add_participant("Alice").unwrap();
        let item = ledger
            .add_item("Tip", 4.0, vec![alice.id, ParticipantId::new("ghost")])
            .unwrap();
        assert_eq!(ledger.assignee_names(&item), ["Alice", "Unknown"]);
    }

    #[test]
    fn should_draw_ids_from_closure_generator() {
        let mut next = 0;
        let mut ledger = BillLedger::new(move || {
            next += 1;
            format!("custom-{next}")
        });
        let alice = ledger.add_participant("Alice").unwrap();
        let item = ledger.add_item("Pizza", 10.0, vec![alice.id.clone()]).unwrap();
        assert_eq!(alice.id.as_str(), "custom-1");
        assert_eq!(item.id.as_str(), "custom-2");
    }

    proptest! {
        /// Property: the total equals the sum of prices regardless of order.
        #[test]
        fn total_is_sum_of_prices(prices in prop::collection::vec(0.01f64..10_000.0, 0..20)) {
            let mut ledger = make_ledger();
            let alice = ledger.add_participant("Alice").unwrap();
            for price in prices.iter().rev() {
                ledger.add_item("Item", *price, vec![alice.id.clone()]).unwrap();
            }
            let expected: f64 = prices.iter().sum();
            prop_assert!((ledger.total_bill() - expected).abs() < 1e-6);
            prop_assert_eq!(ledger.item_count(), prices.len());
        }

        /// Property: without orphaned items or duplicate assignees, the
        /// shares add up to the total.
        #[test]
        fn shares_add_up_to_total(
            items in prop::collection::vec(
                (0.01f64..1_000.0, prop::collection::btree_set(0usize..4, 1..4)),
                1..15,
            )
        ) {
            let mut ledger = make_ledger();
            let people: Vec<ParticipantId> = ["A", "B", "C", "D"]
                .iter()
                .map(|name| ledger.add_participant(name).unwrap().id)
                .collect();
            for (price, assignees) in items {
                let assigned = assignees.into_iter().map(|index| people[index].clone()).collect();
                ledger.add_item("Item", price, assigned).unwrap();
            }
            let shares: f64 = people.iter().map(|id| ledger.participant_share(id)).sum();
            prop_assert!((shares - ledger.total_bill()).abs() < 1e-6);
        }

        /// Property: a zero tax rate leaves the total unchanged.
        #[test]
        fn zero_tax_is_identity(prices in prop::collection::vec(0.01f64..10_000.0, 0..10)) {
            let mut ledger = make_ledger();
            let alice = ledger.add_participant("Alice").unwrap();
            for price in prices {
                ledger.add_item("Item", price, vec![alice.id.clone()]).unwrap();
            }
            prop_assert_eq!(ledger.total_with_tax(0.0), ledger.total_bill());
        }
    }
}
