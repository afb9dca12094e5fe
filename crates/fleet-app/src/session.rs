//! Register session: load, gate, transform, persist
//!
//! Every mutation checks the acting role, applies a pure record operation
//! to a copy of the state, saves it, and only then swaps it in. A failed
//! save leaves the in-memory state untouched.

use fleet_domain::records;
use fleet_domain::views::{self, FleetSummary, PartFilter, VehicleFilter};
use fleet_domain::authorize;
use fleet_store::{FileSlot, KeyValueSlot, Store};
use fleet_types::{Action, AppState, Error, Part, Result, Role, Vehicle};
use tracing::info;

use crate::config::Config;
use crate::repository::open_store;

pub struct RegisterSession<S: KeyValueSlot = FileSlot> {
    store: Store<S>,
    state: AppState,
    role: Role,
}

impl RegisterSession<FileSlot> {
    /// Open the configured store and load its state
    pub fn open(config: &Config, role: Role) -> Result<Self> {
        Ok(Self::with_store(open_store(config)?, role))
    }
}

impl<S: KeyValueSlot> RegisterSession<S> {
    pub fn with_store(store: Store<S>, role: Role) -> Self {
        let state = store.load();
        Self { store, state, role }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn store(&self) -> &Store<S> {
        &self.store
    }

    fn commit(&mut self, next: AppState) -> Result<()> {
        self.store.save(&next)?;
        self.state = next;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Browsing
    // ------------------------------------------------------------------

    pub fn vehicles(&self, filter: &VehicleFilter) -> Result<Vec<&Vehicle>> {
        authorize(self.role, Action::Browse)?;
        Ok(filter.apply(&self.state))
    }

    pub fn parts(&self, filter: &PartFilter) -> Result<Vec<&Part>> {
        authorize(self.role, Action::Browse)?;
        Ok(filter.apply(&self.state))
    }

    pub fn vehicle(&self, id: &str) -> Result<&Vehicle> {
        authorize(self.role, Action::Browse)?;
        views::find_vehicle(&self.state, id)
            .ok_or_else(|| Error::NotFound(format!("vehicle {}", id)))
    }

    pub fn part(&self, id: &str) -> Result<&Part> {
        authorize(self.role, Action::Browse)?;
        views::find_part(&self.state, id).ok_or_else(|| Error::NotFound(format!("part {}", id)))
    }

    /// A part that must be installed on `vehicle_id`
    pub fn vehicle_part(&self, vehicle_id: &str, part_id: &str) -> Result<&Part> {
        let part = self.part(part_id)?;
        if part.vehicle_id != vehicle_id {
            return Err(Error::NotFound(format!(
                "part {} on vehicle {}",
                part_id, vehicle_id
            )));
        }
        Ok(part)
    }

    pub fn summary(&self) -> Result<FleetSummary> {
        authorize(self.role, Action::Browse)?;
        Ok(FleetSummary::from_state(&self.state))
    }

    // ------------------------------------------------------------------
    // Vehicles
    // ------------------------------------------------------------------

    pub fn add_vehicle(&mut self, vehicle: Vehicle) -> Result<&Vehicle> {
        authorize(self.role, Action::CreateVehicle)?;
        let id = vehicle.id.clone();
        let next = records::upsert_vehicle(self.state.clone(), vehicle);
        self.commit(next)?;
        info!(vehicle = %id, role = %self.role, "vehicle saved");
        self.vehicle(&id)
    }

    /// Apply `edit` to a copy of the vehicle and save it; the id cannot change
    pub fn edit_vehicle<F>(&mut self, id: &str, edit: F) -> Result<&Vehicle>
    where
        F: FnOnce(&mut Vehicle),
    {
        authorize(self.role, Action::EditVehicle)?;
        let mut vehicle = self.vehicle(id)?.clone();
        edit(&mut vehicle);
        vehicle.id = id.to_string();
        let next = records::upsert_vehicle(self.state.clone(), vehicle);
        self.commit(next)?;
        info!(vehicle = %id, role = %self.role, "vehicle updated");
        self.vehicle(id)
    }

    /// Delete a vehicle and its parts, returning how many parts went with it
    pub fn delete_vehicle(&mut self, id: &str) -> Result<usize> {
        authorize(self.role, Action::DeleteVehicle)?;
        self.vehicle(id)?;
        let removed_parts = views::parts_for_vehicle(&self.state, id).len();
        let next = records::delete_vehicle(self.state.clone(), id);
        self.commit(next)?;
        info!(vehicle = %id, removed_parts, role = %self.role, "vehicle deleted");
        Ok(removed_parts)
    }

    // ------------------------------------------------------------------
    // Parts
    // ------------------------------------------------------------------

    pub fn add_part(&mut self, part: Part) -> Result<&Part> {
        authorize(self.role, Action::CreatePart)?;
        let id = part.id.clone();
        let next = records::upsert_part(self.state.clone(), part)?;
        self.commit(next)?;
        info!(part = %id, role = %self.role, "part saved");
        self.part(&id)
    }

    /// Apply `edit` to a copy of the part and save it; the id cannot change
    pub fn edit_part<F>(&mut self, id: &str, edit: F) -> Result<&Part>
    where
        F: FnOnce(&mut Part),
    {
        authorize(self.role, Action::EditPart)?;
        let mut part = self.part(id)?.clone();
        edit(&mut part);
        part.id = id.to_string();
        let next = records::upsert_part(self.state.clone(), part)?;
        self.commit(next)?;
        info!(part = %id, role = %self.role, "part updated");
        self.part(id)
    }

    pub fn delete_part(&mut self, id: &str) -> Result<()> {
        authorize(self.role, Action::DeletePart)?;
        self.part(id)?;
        let next = records::delete_part(self.state.clone(), id);
        self.commit(next)?;
        info!(part = %id, role = %self.role, "part deleted");
        Ok(())
    }

    /// Add several parts with a single save
    pub fn import_parts(&mut self, parts: Vec<Part>) -> Result<usize> {
        authorize(self.role, Action::CreatePart)?;
        let count = parts.len();
        let next = parts
            .into_iter()
            .try_fold(self.state.clone(), records::upsert_part)?;
        self.commit(next)?;
        info!(count, role = %self.role, "parts imported");
        Ok(count)
    }

    /// Forget saved data and start over from the seed dataset
    pub fn reset(&mut self) -> Result<()> {
        authorize(self.role, Action::ResetData)?;
        self.store.reset()?;
        self.state = self.store.load();
        info!(role = %self.role, "register reset to seed data");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fleet_store::seed_state;
    use fleet_types::{AccessError, DomainError, PartCategory, VehicleType};

    fn admin() -> RegisterSession<fleet_store::MemorySlot> {
        RegisterSession::with_store(Store::in_memory(), Role::Admin)
    }

    fn technician() -> RegisterSession<fleet_store::MemorySlot> {
        RegisterSession::with_store(Store::in_memory(), Role::Technician)
    }

    fn new_part(vehicle_id: &str) -> Part {
        Part::new(
            vehicle_id.to_string(),
            "BP-77".to_string(),
            "Brake pads".to_string(),
            4,
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            PartCategory::Other,
        )
    }

    #[test]
    fn test_session_starts_from_seed() {
        assert_eq!(admin().state(), &seed_state());
    }

    #[test]
    fn test_add_vehicle_persists() {
        let mut session = admin();
        let vehicle = Vehicle::new(
            "EQ-3".to_string(),
            VehicleType::Equipment,
            "CAT".to_string(),
            "320".to_string(),
            2016,
        );
        let id = session.add_vehicle(vehicle).unwrap().id.clone();
        assert_eq!(session.store().load().vehicles.last().map(|v| v.id.clone()), Some(id));
    }

    #[test]
    fn test_edit_vehicle_keeps_id_and_position() {
        let mut session = admin();
        let edited = session
            .edit_vehicle("v1", |v| {
                v.id = "hijack".to_string();
                v.model = "Giga Max".to_string();
            })
            .unwrap();
        assert_eq!(edited.id, "v1");
        assert_eq!(session.state().vehicles[0].model, "Giga Max");
        assert_eq!(session.state().vehicles.len(), 2);
    }

    #[test]
    fn test_edit_unknown_vehicle_is_not_found() {
        let mut session = admin();
        assert!(matches!(
            session.edit_vehicle("nope", |_| {}),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_delete_vehicle_cascades_and_persists() {
        let mut session = admin();
        assert_eq!(session.delete_vehicle("v1").unwrap(), 1);
        let saved = session.store().load();
        assert!(saved.vehicles.iter().all(|v| v.id != "v1"));
        assert!(saved.parts.iter().all(|p| p.vehicle_id != "v1"));
    }

    #[test]
    fn test_technician_cannot_delete_vehicle() {
        let mut session = technician();
        let err = session.delete_vehicle("v1").unwrap_err();
        assert!(matches!(err, Error::Access(AccessError::Denied { .. })));
        assert_eq!(session.state(), &seed_state());
        assert!(!session.store().has_saved_state());
    }

    #[test]
    fn test_vehicle_part_checks_owner() {
        let session = technician();
        assert_eq!(session.vehicle_part("v1", "p1").unwrap().item_number, "OF-220");
        assert!(matches!(
            session.vehicle_part("v2", "p1"),
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            session.vehicle_part("v1", "missing"),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_technician_can_log_parts() {
        let mut session = technician();
        let part = session.add_part(new_part("v2")).unwrap().clone();
        let edited = session.edit_part(&part.id, |p| p.quantity = 2).unwrap();
        assert_eq!(edited.quantity, 2);
        assert!(session.delete_part(&part.id).is_err());
    }

    #[test]
    fn test_part_on_unknown_vehicle_rejected() {
        let mut session = admin();
        let err = session.add_part(new_part("ghost")).unwrap_err();
        assert!(matches!(err, Error::Domain(DomainError::UnknownVehicle(_))));
        assert_eq!(session.state().parts.len(), 2);
    }

    #[test]
    fn test_import_is_all_or_nothing() {
        let mut session = admin();
        let err = session.import_parts(vec![new_part("v1"), new_part("ghost")]);
        assert!(err.is_err());
        assert_eq!(session.state().parts.len(), 2);

        assert_eq!(session.import_parts(vec![new_part("v1"), new_part("v2")]).unwrap(), 2);
        assert_eq!(session.store().load().parts.len(), 4);
    }

    #[test]
    fn test_reset_returns_to_seed() {
        let mut session = admin();
        session.delete_vehicle("v2").unwrap();
        session.reset().unwrap();
        assert_eq!(session.state(), &seed_state());
    }
}
