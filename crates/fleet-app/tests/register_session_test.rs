//! Register session against a file-backed store

use chrono::NaiveDate;
use fleet_app::{Config, RegisterSession};
use fleet_domain::views::PartFilter;
use fleet_store::seed_state;
use fleet_types::{Error, Part, PartCategory, Role, Vehicle, VehicleType};
use tempfile::{tempdir, TempDir};

fn config_in(dir: &TempDir) -> Config {
    Config {
        data_dir: Some(dir.path().join("data")),
        ..Config::default()
    }
}

#[test]
fn test_first_run_shows_seed_data() {
    let dir = tempdir().expect("Failed to create temp dir");
    let session = RegisterSession::open(&config_in(&dir), Role::Technician).expect("open");
    assert_eq!(session.state(), &seed_state());
}

#[test]
fn test_changes_survive_reopen() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = config_in(&dir);

    let vehicle_id = {
        let mut session = RegisterSession::open(&config, Role::Admin).expect("open");
        let vehicle = Vehicle::new(
            "TRK-020".to_string(),
            VehicleType::Truck,
            "Mitsubishi Fuso".to_string(),
            "Canter".to_string(),
            2022,
        );
        let id = session.add_vehicle(vehicle).expect("add vehicle").id.clone();
        let part = Part::new(
            id.clone(),
            "AF-3".to_string(),
            "Air filter".to_string(),
            1,
            NaiveDate::from_ymd_opt(2024, 7, 1).expect("date"),
            PartCategory::Engine,
        );
        session.add_part(part).expect("add part");
        id
    };

    let session = RegisterSession::open(&config, Role::Technician).expect("reopen");
    assert_eq!(session.state().vehicles.len(), 3);
    let parts = session
        .parts(&PartFilter::for_vehicle(&vehicle_id))
        .expect("browse");
    assert_eq!(parts.len(), 1);
    assert_eq!(parts[0].item_number, "AF-3");
}

#[test]
fn test_cascade_delete_is_persisted() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = config_in(&dir);

    let mut session = RegisterSession::open(&config, Role::Admin).expect("open");
    session.delete_vehicle("v1").expect("delete");

    let reopened = RegisterSession::open(&config, Role::Admin).expect("reopen");
    assert!(reopened.state().parts.iter().all(|p| p.vehicle_id != "v1"));
    assert_eq!(reopened.state().parts.len(), 1);
}

#[test]
fn test_denied_edit_leaves_file_untouched() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = config_in(&dir);

    let mut session = RegisterSession::open(&config, Role::Technician).expect("open");
    let result = session.edit_vehicle("v2", |v| v.year = 1999);
    assert!(matches!(result, Err(Error::Access(_))));
    assert!(!session.store().has_saved_state());
}

#[test]
fn test_last_writer_wins() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = config_in(&dir);

    let mut first = RegisterSession::open(&config, Role::Admin).expect("open first");
    let mut second = RegisterSession::open(&config, Role::Admin).expect("open second");

    first.delete_part("p1").expect("first write");
    second
        .edit_part("p2", |p| p.quantity = 6)
        .expect("second write");

    let reopened = RegisterSession::open(&config, Role::Admin).expect("reopen");
    // The second session never saw the first delete
    assert_eq!(reopened.state().parts.len(), 2);
    assert_eq!(reopened.part("p2").expect("p2").quantity, 6);
}
