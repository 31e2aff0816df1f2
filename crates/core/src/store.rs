//! The domain store: the single owner of the lead, order and reminder
//! collections.
//!
//! Every mutating operation follows the same two steps: change the
//! in-memory collection, then write the changed collection back to its
//! slot. Writes are fire-and-forget. A failed write is logged and the
//! in-memory state stays authoritative for the running session.
//!
//! Lookups by id that miss are not errors: `update_*` returns `None` and
//! `delete_*` returns an empty [`Removed`] tally.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::clock::{Clock, SystemClock};
use crate::dashboard::DashboardSummary;
use crate::models::{
    Lead, LeadPatch, NewLead, NewOrder, NewReminder, Order, OrderPatch, Reminder, ReminderPatch,
};
use crate::storage::{ALL_SLOTS, LEADS_SLOT, ORDERS_SLOT, REMINDERS_SLOT, Storage, StorageError};
use crate::transfer::{ExportBundle, TransferError};
use crate::types::{EntityType, LeadId, LeadStage, OrderId, OrderStage, ReminderId};

/// How many entities a delete removed, per collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Removed {
    pub leads: usize,
    pub orders: usize,
    pub reminders: usize,
}

impl Removed {
    /// True when the delete matched nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.leads == 0 && self.orders == 0 && self.reminders == 0
    }
}

#[derive(Debug, Clone, Copy)]
enum Collection {
    Leads,
    Orders,
    Reminders,
}

/// In-memory CRM state mirrored to a [`Storage`] backend.
#[derive(Debug)]
pub struct DomainStore<S, C = SystemClock> {
    storage: S,
    clock: C,
    leads: Vec<Lead>,
    orders: Vec<Order>,
    reminders: Vec<Reminder>,
}

impl<S: Storage> DomainStore<S> {
    /// Load the store from `storage`, stamping entities with wall time.
    pub fn open(storage: S) -> Self {
        Self::with_clock(storage, SystemClock)
    }
}

impl<S: Storage, C: Clock> DomainStore<S, C> {
    /// Load the store from `storage` with an explicit time source.
    pub fn with_clock(storage: S, clock: C) -> Self {
        let mut store = Self {
            storage,
            clock,
            leads: Vec::new(),
            orders: Vec::new(),
            reminders: Vec::new(),
        };
        store.reload();
        store
    }

    /// Discard in-memory state and load every collection from storage.
    ///
    /// An absent, unreadable or malformed slot yields an empty collection.
    pub fn reload(&mut self) {
        self.leads = load_slot(&self.storage, LEADS_SLOT);
        self.orders = load_slot(&self.storage, ORDERS_SLOT);
        self.reminders = load_slot(&self.storage, REMINDERS_SLOT);
        tracing::debug!(
            leads = self.leads.len(),
            orders = self.orders.len(),
            reminders = self.reminders.len(),
            "store loaded"
        );
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    #[must_use]
    pub fn leads(&self) -> &[Lead] {
        &self.leads
    }

    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    #[must_use]
    pub fn reminders(&self) -> &[Reminder] {
        &self.reminders
    }

    #[must_use]
    pub fn lead(&self, id: &LeadId) -> Option<&Lead> {
        self.leads.iter().find(|l| &l.id == id)
    }

    #[must_use]
    pub fn order(&self, id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| &o.id == id)
    }

    #[must_use]
    pub fn reminder(&self, id: &ReminderId) -> Option<&Reminder> {
        self.reminders.iter().find(|r| &r.id == id)
    }

    /// Orders referencing `lead_id`, in collection order.
    pub fn orders_for_lead<'a>(&'a self, lead_id: &'a LeadId) -> impl Iterator<Item = &'a Order> {
        self.orders.iter().filter(move |o| &o.lead_id == lead_id)
    }

    /// Reminders attached to the given entity, in collection order.
    pub fn reminders_for<'a>(
        &'a self,
        entity_type: EntityType,
        entity_id: &'a str,
    ) -> impl Iterator<Item = &'a Reminder> {
        self.reminders
            .iter()
            .filter(move |r| r.targets(entity_type, entity_id))
    }

    /// Leads grouped into board columns, one per stage in pipeline order.
    #[must_use]
    pub fn leads_by_stage(&self) -> Vec<(LeadStage, Vec<&Lead>)> {
        LeadStage::ALL
            .into_iter()
            .map(|stage| (stage, self.leads.iter().filter(|l| l.stage == stage).collect()))
            .collect()
    }

    /// Orders grouped into board columns, one per stage in pipeline order.
    #[must_use]
    pub fn orders_by_stage(&self) -> Vec<(OrderStage, Vec<&Order>)> {
        OrderStage::ALL
            .into_iter()
            .map(|stage| (stage, self.orders.iter().filter(|o| o.stage == stage).collect()))
            .collect()
    }

    /// Aggregate counts and this week's open reminders, as of now.
    #[must_use]
    pub fn dashboard_summary(&self) -> DashboardSummary {
        DashboardSummary::compute(&self.leads, &self.orders, &self.reminders, self.clock.now())
    }

    pub const fn storage(&self) -> &S {
        &self.storage
    }

    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Consume the store, returning its backend.
    pub fn into_storage(self) -> S {
        self.storage
    }

    // -----------------------------------------------------------------------
    // Leads
    // -----------------------------------------------------------------------

    /// Append a new lead with a fresh id and `createdAt == updatedAt == now`.
    pub fn add_lead(&mut self, new: NewLead) -> Lead {
        let lead = new.into_lead(LeadId::generate(), self.clock.now());
        self.leads.push(lead.clone());
        self.persist(Collection::Leads);
        tracing::debug!(lead_id = %lead.id, "lead added");
        lead
    }

    /// Merge `patch` over the lead and refresh `updatedAt`.
    ///
    /// Changing `stage` here does not create orders; use
    /// [`update_lead_stage`](Self::update_lead_stage) for that.
    pub fn update_lead(&mut self, id: &LeadId, patch: LeadPatch) -> Option<&Lead> {
        let now = self.clock.now();
        let lead = self.leads.iter_mut().find(|l| &l.id == id)?;
        patch.apply(lead);
        lead.updated_at = now;
        self.persist(Collection::Leads);
        self.lead(id)
    }

    /// Remove a lead, every order referencing it, and its reminders.
    ///
    /// Reminders attached to the removed orders are left in place.
    pub fn delete_lead(&mut self, id: &LeadId) -> Removed {
        let removed = Removed {
            leads: remove_where(&mut self.leads, |l| &l.id == id),
            orders: remove_where(&mut self.orders, |o| &o.lead_id == id),
            reminders: remove_where(&mut self.reminders, |r| {
                r.targets(EntityType::Lead, id.as_str())
            }),
        };
        self.persist_removed(removed);
        if !removed.is_empty() {
            tracing::info!(
                lead_id = %id,
                orders = removed.orders,
                reminders = removed.reminders,
                "lead deleted"
            );
        }
        removed
    }

    /// Move a lead to `stage` and refresh `updatedAt`.
    ///
    /// Moving to `Won` when no order references the lead yet creates one in
    /// `Order Received`, carrying the lead's name. The created order is
    /// returned. The existence check and the insert run against the current
    /// collections under the same `&mut` borrow, so repeated calls never
    /// produce a second order.
    pub fn update_lead_stage(&mut self, id: &LeadId, stage: LeadStage) -> Option<Order> {
        let now = self.clock.now();
        let lead = self.leads.iter_mut().find(|l| &l.id == id)?;
        let draft = NewOrder::for_lead(lead);
        lead.stage = stage;
        lead.updated_at = now;
        self.persist(Collection::Leads);

        if stage != LeadStage::Won || self.orders.iter().any(|o| &o.lead_id == id) {
            return None;
        }

        let order = draft.into_order(OrderId::generate(), now);
        self.orders.push(order.clone());
        self.persist(Collection::Orders);
        tracing::info!(lead_id = %id, order_id = %order.id, "lead won; order created");
        Some(order)
    }

    // -----------------------------------------------------------------------
    // Orders
    // -----------------------------------------------------------------------

    /// Append a new order with a fresh id and `createdAt == updatedAt == now`.
    pub fn add_order(&mut self, new: NewOrder) -> Order {
        let order = new.into_order(OrderId::generate(), self.clock.now());
        self.orders.push(order.clone());
        self.persist(Collection::Orders);
        tracing::debug!(order_id = %order.id, lead_id = %order.lead_id, "order added");
        order
    }

    /// Merge `patch` over the order and refresh `updatedAt`.
    pub fn update_order(&mut self, id: &OrderId, patch: OrderPatch) -> Option<&Order> {
        let now = self.clock.now();
        let order = self.orders.iter_mut().find(|o| &o.id == id)?;
        patch.apply(order);
        order.updated_at = now;
        self.persist(Collection::Orders);
        self.order(id)
    }

    /// Move an order to `stage` and refresh `updatedAt`.
    pub fn update_order_stage(&mut self, id: &OrderId, stage: OrderStage) -> Option<&Order> {
        self.update_order(
            id,
            OrderPatch {
                stage: Some(stage),
                ..OrderPatch::default()
            },
        )
    }

    /// Remove an order and its reminders.
    pub fn delete_order(&mut self, id: &OrderId) -> Removed {
        let removed = Removed {
            leads: 0,
            orders: remove_where(&mut self.orders, |o| &o.id == id),
            reminders: remove_where(&mut self.reminders, |r| {
                r.targets(EntityType::Order, id.as_str())
            }),
        };
        self.persist_removed(removed);
        if !removed.is_empty() {
            tracing::info!(order_id = %id, reminders = removed.reminders, "order deleted");
        }
        removed
    }

    // -----------------------------------------------------------------------
    // Reminders
    // -----------------------------------------------------------------------

    /// Append a new reminder with a fresh id.
    pub fn add_reminder(&mut self, new: NewReminder) -> Reminder {
        let reminder = new.into_reminder(ReminderId::generate());
        self.reminders.push(reminder.clone());
        self.persist(Collection::Reminders);
        reminder
    }

    /// Merge `patch` over the reminder. Reminders carry no timestamps.
    pub fn update_reminder(&mut self, id: &ReminderId, patch: ReminderPatch) -> Option<&Reminder> {
        let reminder = self.reminders.iter_mut().find(|r| &r.id == id)?;
        patch.apply(reminder);
        self.persist(Collection::Reminders);
        self.reminder(id)
    }

    /// Tick or untick a reminder.
    pub fn set_reminder_completed(
        &mut self,
        id: &ReminderId,
        completed: bool,
    ) -> Option<&Reminder> {
        self.update_reminder(
            id,
            ReminderPatch {
                completed: Some(completed),
                ..ReminderPatch::default()
            },
        )
    }

    pub fn delete_reminder(&mut self, id: &ReminderId) -> Removed {
        let removed = Removed {
            reminders: remove_where(&mut self.reminders, |r| &r.id == id),
            ..Removed::default()
        };
        self.persist_removed(removed);
        removed
    }

    // -----------------------------------------------------------------------
    // Bulk data management
    // -----------------------------------------------------------------------

    /// Snapshot the raw slots for download.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::Storage`] if a slot cannot be read.
    pub fn export(&self) -> Result<ExportBundle, TransferError> {
        ExportBundle::read_from(&self.storage)
    }

    /// Overwrite every slot with the bundle's contents and reload.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::Storage`] if a slot cannot be written. Slots
    /// written before the failure keep their new contents; in-memory state
    /// is left untouched.
    pub fn import(&mut self, bundle: &ExportBundle) -> Result<(), TransferError> {
        bundle.write_to(&mut self.storage)?;
        self.reload();
        tracing::info!(
            leads = self.leads.len(),
            orders = self.orders.len(),
            reminders = self.reminders.len(),
            "data imported"
        );
        Ok(())
    }

    /// Erase every slot and reload, leaving all collections empty.
    ///
    /// This cannot be undone; callers are expected to confirm first.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if a slot cannot be removed.
    pub fn clear_all(&mut self) -> Result<(), StorageError> {
        for key in ALL_SLOTS {
            self.storage.remove(key)?;
        }
        self.reload();
        tracing::warn!("all data cleared");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    fn persist(&mut self, collection: Collection) {
        match collection {
            Collection::Leads => write_slot(&mut self.storage, LEADS_SLOT, &self.leads),
            Collection::Orders => write_slot(&mut self.storage, ORDERS_SLOT, &self.orders),
            Collection::Reminders => {
                write_slot(&mut self.storage, REMINDERS_SLOT, &self.reminders);
            }
        }
    }

    fn persist_removed(&mut self, removed: Removed) {
        if removed.leads > 0 {
            self.persist(Collection::Leads);
        }
        if removed.orders > 0 {
            self.persist(Collection::Orders);
        }
        if removed.reminders > 0 {
            self.persist(Collection::Reminders);
        }
    }
}

fn remove_where<T>(items: &mut Vec<T>, mut matches: impl FnMut(&T) -> bool) -> usize {
    let before = items.len();
    items.retain(|item| !matches(item));
    before - items.len()
}

fn load_slot<T, S>(storage: &S, key: &str) -> Vec<T>
where
    T: DeserializeOwned,
    S: Storage + ?Sized,
{
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(error) => {
            tracing::warn!(slot = key, error = %error, "failed to read slot; starting empty");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<T>>(&raw) {
        Ok(items) => items,
        Err(error) => {
            tracing::warn!(slot = key, error = %error, "failed to parse slot; starting empty");
            Vec::new()
        }
    }
}

fn write_slot<T, S>(storage: &mut S, key: &str, items: &[T])
where
    T: Serialize,
    S: Storage + ?Sized,
{
    let payload = match serde_json::to_string(items) {
        Ok(payload) => payload,
        Err(error) => {
            tracing::error!(slot = key, error = %error, "failed to encode slot");
            return;
        }
    };

    match storage.set(key, &payload) {
        Ok(()) => tracing::debug!(slot = key, records = items.len(), "slot persisted"),
        Err(error) => tracing::error!(slot = key, error = %error, "failed to persist slot"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};

    use super::*;
    use crate::clock::ManualClock;
    use crate::storage::MemoryStorage;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 1, 8, 0, 0).unwrap()
    }

    fn store() -> DomainStore<MemoryStorage, ManualClock> {
        DomainStore::with_clock(MemoryStorage::new(), ManualClock::new(start()))
    }

    fn tick(store: &DomainStore<MemoryStorage, ManualClock>) {
        store.clock().advance(Duration::seconds(1));
    }

    fn stored<T: DeserializeOwned>(
        store: &DomainStore<MemoryStorage, ManualClock>,
        key: &str,
    ) -> Vec<T> {
        serde_json::from_str(&store.storage().get(key).unwrap().unwrap()).unwrap()
    }

    #[test]
    fn test_add_lead_assigns_id_and_timestamps() {
        let mut store = store();
        let a = store.add_lead(NewLead::named("Acme"));
        let b = store.add_lead(NewLead::named("Globex"));

        assert_ne!(a.id, b.id);
        assert_eq!(a.created_at, a.updated_at);
        assert_eq!(a.created_at, start());
        assert_eq!(a.stage, LeadStage::New);
        let names: Vec<_> = store.leads().iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["Acme", "Globex"]);
    }

    #[test]
    fn test_every_mutation_is_persisted() {
        let mut store = store();
        let lead = store.add_lead(NewLead::named("Acme"));
        assert_eq!(stored::<Lead>(&store, LEADS_SLOT), store.leads());

        store.update_lead(
            &lead.id,
            LeadPatch {
                company: Some("Acme Corp".into()),
                ..LeadPatch::default()
            },
        );
        assert_eq!(stored::<Lead>(&store, LEADS_SLOT)[0].company, "Acme Corp");

        store.delete_lead(&lead.id);
        assert!(stored::<Lead>(&store, LEADS_SLOT).is_empty());
    }

    #[test]
    fn test_update_lead_merges_and_bumps_updated_at() {
        let mut store = store();
        let lead = store.add_lead(NewLead {
            contact: "jane@acme.example".into(),
            ..NewLead::named("Acme")
        });
        tick(&store);

        let updated = store
            .update_lead(
                &lead.id,
                LeadPatch {
                    name: Some("Acme Ltd".into()),
                    notes: Some(Some("prefers email".into())),
                    ..LeadPatch::default()
                },
            )
            .unwrap()
            .clone();

        assert_eq!(updated.name, "Acme Ltd");
        assert_eq!(updated.contact, "jane@acme.example");
        assert_eq!(updated.notes.as_deref(), Some("prefers email"));
        assert_eq!(updated.created_at, lead.created_at);
        assert!(updated.updated_at > lead.updated_at);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut store = store();
        store.add_lead(NewLead::named("Acme"));
        let before = store.leads().to_vec();

        let result = store.update_lead(
            &LeadId::new("missing"),
            LeadPatch {
                name: Some("x".into()),
                ..LeadPatch::default()
            },
        );

        assert!(result.is_none());
        assert_eq!(store.leads(), before.as_slice());
    }

    #[test]
    fn test_update_unknown_order_or_reminder_changes_nothing() {
        let mut store = store();
        let lead = store.add_lead(NewLead::named("Acme"));
        store.update_lead_stage(&lead.id, LeadStage::Won);
        store.add_reminder(NewReminder::new(
            "call",
            start() + Duration::days(1),
            EntityType::Lead,
            lead.id.as_str(),
        ));
        let orders = store.orders().to_vec();
        let reminders = store.reminders().to_vec();

        let missing_order = OrderId::new("missing");
        assert!(store.update_order_stage(&missing_order, OrderStage::Dispatched).is_none());
        assert!(
            store
                .update_order(
                    &missing_order,
                    OrderPatch {
                        courier: Some(Some("DHL".into())),
                        ..OrderPatch::default()
                    },
                )
                .is_none()
        );
        let missing_reminder = ReminderId::new("missing");
        assert!(store.set_reminder_completed(&missing_reminder, true).is_none());
        assert!(
            store
                .update_reminder(
                    &missing_reminder,
                    ReminderPatch {
                        title: Some("x".into()),
                        ..ReminderPatch::default()
                    },
                )
                .is_none()
        );

        assert_eq!(store.orders(), orders.as_slice());
        assert_eq!(store.reminders(), reminders.as_slice());
        assert_eq!(stored::<Order>(&store, ORDERS_SLOT), orders);
        assert_eq!(stored::<Reminder>(&store, REMINDERS_SLOT), reminders);
    }

    #[test]
    fn test_update_order_merges_and_bumps_updated_at() {
        let mut store = store();
        let lead = store.add_lead(NewLead::named("Acme"));
        let order = store.add_order(NewOrder {
            details: Some("200 units".into()),
            ..NewOrder::for_lead(&lead)
        });
        tick(&store);

        let updated = store
            .update_order(
                &order.id,
                OrderPatch {
                    courier: Some(Some("DHL".into())),
                    details: Some(None),
                    ..OrderPatch::default()
                },
            )
            .unwrap()
            .clone();

        assert_eq!(updated.courier.as_deref(), Some("DHL"));
        assert_eq!(updated.details, None);
        assert_eq!(updated.stage, OrderStage::OrderReceived);
        assert_eq!(updated.lead_name, "Acme");
        assert_eq!(updated.created_at, order.created_at);
        assert!(updated.updated_at > order.updated_at);
        assert_eq!(stored::<Order>(&store, ORDERS_SLOT), [updated]);
    }

    #[test]
    fn test_update_keeps_order_of_collection() {
        let mut store = store();
        let a = store.add_lead(NewLead::named("A"));
        store.add_lead(NewLead::named("B"));
        store.update_lead(
            &a.id,
            LeadPatch {
                name: Some("A2".into()),
                ..LeadPatch::default()
            },
        );

        let names: Vec<_> = store.leads().iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["A2", "B"]);
    }

    #[test]
    fn test_won_creates_exactly_one_order() {
        let mut store = store();
        let lead = store.add_lead(NewLead::named("Acme"));
        tick(&store);

        let order = store.update_lead_stage(&lead.id, LeadStage::Won).unwrap();
        assert_eq!(order.lead_id, lead.id);
        assert_eq!(order.lead_name, "Acme");
        assert_eq!(order.stage, OrderStage::OrderReceived);
        assert_eq!(order.created_at, order.updated_at);

        let won = store.lead(&lead.id).unwrap();
        assert_eq!(won.stage, LeadStage::Won);
        assert!(won.updated_at > lead.updated_at);

        assert!(store.update_lead_stage(&lead.id, LeadStage::Won).is_none());
        assert!(store.update_lead_stage(&lead.id, LeadStage::Lost).is_none());
        assert!(store.update_lead_stage(&lead.id, LeadStage::Won).is_none());
        assert_eq!(store.orders().len(), 1);
        assert_eq!(stored::<Order>(&store, ORDERS_SLOT).len(), 1);
    }

    #[test]
    fn test_won_skips_order_when_one_already_references_lead() {
        let mut store = store();
        let lead = store.add_lead(NewLead::named("Acme"));
        store.add_order(NewOrder::for_lead(&lead));

        assert!(store.update_lead_stage(&lead.id, LeadStage::Won).is_none());
        assert_eq!(store.orders().len(), 1);
    }

    #[test]
    fn test_other_stages_do_not_create_orders() {
        let mut store = store();
        let lead = store.add_lead(NewLead::named("Acme"));
        for stage in [LeadStage::Contacted, LeadStage::ProposalSent, LeadStage::Lost] {
            assert!(store.update_lead_stage(&lead.id, stage).is_none());
        }
        assert!(store.orders().is_empty());
        assert!(store.update_lead_stage(&LeadId::new("missing"), LeadStage::Won).is_none());
        assert!(store.orders().is_empty());
    }

    #[test]
    fn test_generic_update_to_won_does_not_create_order() {
        let mut store = store();
        let lead = store.add_lead(NewLead::named("Acme"));
        store.update_lead(
            &lead.id,
            LeadPatch {
                stage: Some(LeadStage::Won),
                ..LeadPatch::default()
            },
        );
        assert!(store.orders().is_empty());
    }

    #[test]
    fn test_renaming_lead_keeps_order_snapshot() {
        let mut store = store();
        let lead = store.add_lead(NewLead::named("Acme"));
        let order = store.update_lead_stage(&lead.id, LeadStage::Won).unwrap();
        store.update_lead(
            &lead.id,
            LeadPatch {
                name: Some("Acme Holdings".into()),
                ..LeadPatch::default()
            },
        );
        assert_eq!(store.order(&order.id).unwrap().lead_name, "Acme");
    }

    #[test]
    fn test_delete_lead_cascades() {
        let mut store = store();
        let keep = store.add_lead(NewLead::named("Keep"));
        let gone = store.add_lead(NewLead::named("Gone"));
        let gone_order = store.update_lead_stage(&gone.id, LeadStage::Won).unwrap();
        let keep_order = store.update_lead_stage(&keep.id, LeadStage::Won).unwrap();

        let date = start() + Duration::days(1);
        store.add_reminder(NewReminder::new("gone lead", date, EntityType::Lead, gone.id.as_str()));
        store.add_reminder(NewReminder::new("keep lead", date, EntityType::Lead, keep.id.as_str()));
        store.add_reminder(NewReminder::new(
            "gone order",
            date,
            EntityType::Order,
            gone_order.id.as_str(),
        ));
        store.add_reminder(NewReminder::new(
            "order with lead id",
            date,
            EntityType::Order,
            gone.id.as_str(),
        ));

        let removed = store.delete_lead(&gone.id);
        assert_eq!(
            removed,
            Removed {
                leads: 1,
                orders: 1,
                reminders: 1
            }
        );

        assert!(store.lead(&gone.id).is_none());
        assert!(store.lead(&keep.id).is_some());
        assert!(store.order(&gone_order.id).is_none());
        assert!(store.order(&keep_order.id).is_some());
        let titles: Vec<_> = store.reminders().iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["keep lead", "gone order", "order with lead id"]);
    }

    #[test]
    fn test_delete_order_cascades_to_its_reminders_only() {
        let mut store = store();
        let lead = store.add_lead(NewLead::named("Acme"));
        let order = store.update_lead_stage(&lead.id, LeadStage::Won).unwrap();
        let date = start() + Duration::days(2);
        store.add_reminder(NewReminder::new("ship", date, EntityType::Order, order.id.as_str()));
        store.add_reminder(NewReminder::new("call", date, EntityType::Lead, lead.id.as_str()));

        let removed = store.delete_order(&order.id);
        assert_eq!(removed.orders, 1);
        assert_eq!(removed.reminders, 1);
        assert_eq!(store.leads().len(), 1);
        assert_eq!(store.reminders().len(), 1);
        assert_eq!(store.reminders()[0].title, "call");
    }

    #[test]
    fn test_delete_unknown_is_noop() {
        let mut store = store();
        store.add_lead(NewLead::named("Acme"));
        assert!(store.delete_lead(&LeadId::new("missing")).is_empty());
        assert!(store.delete_order(&OrderId::new("missing")).is_empty());
        assert!(store.delete_reminder(&ReminderId::new("missing")).is_empty());
        assert_eq!(store.leads().len(), 1);
    }

    #[test]
    fn test_reminder_crud() {
        let mut store = store();
        let date = start() + Duration::hours(3);
        let reminder = store.add_reminder(NewReminder::new("Call", date, EntityType::Lead, "l-1"));
        assert!(!reminder.completed);

        let done = store.set_reminder_completed(&reminder.id, true).unwrap();
        assert!(done.completed);

        let moved = store
            .update_reminder(
                &reminder.id,
                ReminderPatch {
                    date: Some(date + Duration::days(1)),
                    description: Some(Some("bring samples".into())),
                    ..ReminderPatch::default()
                },
            )
            .unwrap();
        assert_eq!(moved.date, date + Duration::days(1));
        assert!(moved.completed);

        assert_eq!(store.delete_reminder(&reminder.id).reminders, 1);
        assert!(stored::<Reminder>(&store, REMINDERS_SLOT).is_empty());
    }

    #[test]
    fn test_update_order_stage_bumps_updated_at() {
        let mut store = store();
        let lead = store.add_lead(NewLead::named("Acme"));
        let order = store.update_lead_stage(&lead.id, LeadStage::Won).unwrap();
        tick(&store);

        let moved = store
            .update_order_stage(&order.id, OrderStage::InDevelopment)
            .unwrap();
        assert_eq!(moved.stage, OrderStage::InDevelopment);
        assert!(moved.updated_at > order.updated_at);
        assert_eq!(store.leads()[0].stage, LeadStage::Won);
    }

    #[test]
    fn test_boards_group_in_pipeline_order() {
        let mut store = store();
        let a = store.add_lead(NewLead::named("A"));
        store.add_lead(NewLead::named("B"));
        store.update_lead_stage(&a.id, LeadStage::Qualified);

        let board = store.leads_by_stage();
        assert_eq!(board.len(), LeadStage::ALL.len());
        assert_eq!(board[0].0, LeadStage::New);
        assert_eq!(board[0].1.len(), 1);
        assert_eq!(board[2].0, LeadStage::Qualified);
        assert_eq!(board[2].1[0].name, "A");

        let orders = store.orders_by_stage();
        assert_eq!(orders.len(), OrderStage::ALL.len());
        assert!(orders.iter().all(|(_, col)| col.is_empty()));
    }

    #[test]
    fn test_lookup_helpers() {
        let mut store = store();
        let lead = store.add_lead(NewLead::named("Acme"));
        let order = store.update_lead_stage(&lead.id, LeadStage::Won).unwrap();
        let date = start() + Duration::days(1);
        store.add_reminder(NewReminder::new("ship", date, EntityType::Order, order.id.as_str()));

        assert_eq!(store.orders_for_lead(&lead.id).count(), 1);
        assert_eq!(store.reminders_for(EntityType::Order, order.id.as_str()).count(), 1);
        assert_eq!(store.reminders_for(EntityType::Lead, order.id.as_str()).count(), 0);
    }

    #[test]
    fn test_dashboard_uses_store_clock() {
        let mut store = store();
        let lead = store.add_lead(NewLead::named("Acme"));
        store.add_lead(NewLead::named("Globex"));
        store.update_lead_stage(&lead.id, LeadStage::Won);
        store.add_reminder(NewReminder::new(
            "soon",
            start() + Duration::days(3),
            EntityType::Lead,
            lead.id.as_str(),
        ));

        let summary = store.dashboard_summary();
        assert_eq!(summary.total_leads, 2);
        assert_eq!(summary.open_leads, 1);
        assert!((summary.conversion_rate - 50.0).abs() < f64::EPSILON);
        assert_eq!(summary.orders_received, 1);
        assert_eq!(summary.upcoming_follow_ups.len(), 1);

        store.clock().advance(Duration::days(4));
        assert!(store.dashboard_summary().upcoming_follow_ups.is_empty());
    }

    #[test]
    fn test_corrupt_slot_loads_empty_and_others_survive() {
        let mut seed = store();
        seed.add_lead(NewLead::named("Acme"));
        let storage = seed
            .into_storage()
            .with_slot(ORDERS_SLOT, "{ not json")
            .with_slot(REMINDERS_SLOT, "null");

        let store = DomainStore::with_clock(storage, ManualClock::new(start()));
        assert_eq!(store.leads().len(), 1);
        assert!(store.orders().is_empty());
        assert!(store.reminders().is_empty());
    }

    #[test]
    fn test_unknown_stage_loads_collection_empty() {
        let leads = r#"[
            {"id":"l-1","name":"Acme","contact":"","company":"","productInterest":"",
             "stage":"New","createdAt":"2026-04-01T08:00:00Z","updatedAt":"2026-04-01T08:00:00Z"},
            {"id":"l-2","name":"Globex","contact":"","company":"","productInterest":"",
             "stage":"Archived",
             "createdAt":"2026-04-01T08:00:00Z","updatedAt":"2026-04-01T08:00:00Z"}
        ]"#;
        let orders = r#"[
            {"id":"o-1","leadId":"l-1","leadName":"Acme","stage":"Shipped",
             "createdAt":"2026-04-01T08:00:00Z","updatedAt":"2026-04-01T08:00:00Z"}
        ]"#;
        let storage = MemoryStorage::new()
            .with_slot(LEADS_SLOT, leads)
            .with_slot(ORDERS_SLOT, orders);

        let store = DomainStore::with_clock(storage, ManualClock::new(start()));
        assert!(store.leads().is_empty());
        assert!(store.orders().is_empty());
    }

    #[test]
    fn test_bare_reminder_date_loads() {
        let reminders = r#"[
            {"id":"r-1","title":"Call","date":"2026-04-03","completed":false,
             "entityType":"lead","entityId":"l-1"}
        ]"#;
        let storage = MemoryStorage::new().with_slot(REMINDERS_SLOT, reminders);

        let store = DomainStore::with_clock(storage, ManualClock::new(start()));
        assert_eq!(store.reminders().len(), 1);
        assert_eq!(
            store.reminders()[0].date,
            Utc.with_ymd_and_hms(2026, 4, 3, 0, 0, 0).unwrap()
        );
        assert_eq!(store.dashboard_summary().upcoming_follow_ups.len(), 1);
    }

    #[test]
    fn test_reopen_reproduces_collections() {
        let mut store = store();
        let lead = store.add_lead(NewLead {
            company: "Acme Corp".into(),
            follow_up_date: chrono::NaiveDate::from_ymd_opt(2026, 4, 8),
            ..NewLead::named("Acme")
        });
        store.update_lead_stage(&lead.id, LeadStage::Won);
        store.add_reminder(NewReminder::new(
            "call",
            start() + Duration::days(1),
            EntityType::Lead,
            lead.id.as_str(),
        ));
        let (leads, orders, reminders) = (
            store.leads().to_vec(),
            store.orders().to_vec(),
            store.reminders().to_vec(),
        );

        let reopened = DomainStore::with_clock(store.into_storage(), ManualClock::new(start()));
        assert_eq!(reopened.leads(), leads.as_slice());
        assert_eq!(reopened.orders(), orders.as_slice());
        assert_eq!(reopened.reminders(), reminders.as_slice());
    }

    #[test]
    fn test_clear_all_and_import() {
        let mut store = store();
        store.add_lead(NewLead::named("Acme"));
        let bundle = store.export().unwrap();
        assert!(bundle.leads.is_some());
        assert!(bundle.orders.is_none());

        store.clear_all().unwrap();
        assert!(store.leads().is_empty());
        assert_eq!(store.storage().get(LEADS_SLOT).unwrap(), None);

        store.import(&bundle).unwrap();
        assert_eq!(store.leads().len(), 1);
        assert_eq!(store.leads()[0].name, "Acme");
    }
}
