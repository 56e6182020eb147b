mod common;

use std::fs;
use tempfile::tempdir;

use common::{FakeRunner, session_at};
use redshiftctl::FormState;
use redshiftctl::args::{FieldOverrides, LocationArgs};
use redshiftctl::commands::{
    auto::handle_auto_command, manual::handle_manual_command, nudge::handle_nudge_command,
    reset::handle_reset_command, save::handle_save_command, status::handle_status_command,
    stop::handle_stop_command,
};
use redshiftctl::form::{AdjustableField, Direction};
use redshiftctl::{ConfigStore, ControlError, GammaTriple, ValidationError};

const AUTO_LISTING: &str = "1234 redshift -l 52.23:21.01 -t 6500:4500 -b 1.0:0.8\n";

fn krakow() -> LocationArgs {
    LocationArgs {
        city: Some("Kraków".to_string()),
        pick_city: false,
    }
}

#[test]
fn test_save_then_load_reproduces_fields() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("redshift").join("redshift.conf");

    let mut form = FormState::default();
    form.latitude = "-33.87".to_string();
    form.longitude = "151.21".to_string();
    form.temp_day = "5900".to_string();
    form.temp_night = "3400".to_string();
    form.brightness_day = "0.95".to_string();
    form.brightness_night = "0.7".to_string();
    form.gamma = GammaTriple::new(0.9, 1.0, 1.1);

    let store = ConfigStore::new(&path);
    let (redshift, manual) = form.to_sections();
    store.save(&redshift, &manual).unwrap();

    let loaded = FormState::from_config(store.load().as_ref());
    assert_eq!(loaded.latitude, "-33.87");
    assert_eq!(loaded.longitude, "151.21");
    assert_eq!(loaded.temp_day, "5900");
    assert_eq!(loaded.temp_night, "3400");
    assert_eq!(loaded.brightness_day, "0.95");
    assert_eq!(loaded.brightness_night, "0.7");
    assert_eq!(loaded.gamma, GammaTriple::new(0.9, 1.0, 1.1));
}

#[test]
fn test_save_command_writes_city_and_overrides() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("redshift.conf");
    let session = session_at(path.clone(), FakeRunner::default());

    let fields = FieldOverrides {
        temp_night: Some("3700".to_string()),
        ..Default::default()
    };
    handle_save_command(&session, &krakow(), &fields, Some(GammaTriple::new(1.0, 0.9, 0.8)))
        .unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("[redshift]"));
    assert!(content.contains("temp-night = 3700"));
    assert!(content.contains("gamma = 1.00:0.90:0.80"));
    assert!(content.contains("lat = 50.06"));
    assert!(content.contains("lon = 19.94"));
    assert!(session.controller.runner().calls.borrow().is_empty());
}

#[test]
fn test_save_command_rejects_unknown_city() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("redshift.conf");
    let session = session_at(path.clone(), FakeRunner::default());

    let location = LocationArgs {
        city: Some("Atlantis".to_string()),
        pick_city: false,
    };
    let result = handle_save_command(&session, &location, &FieldOverrides::default(), None);
    assert!(result.is_err());
    assert!(!path.exists());
}

#[test]
fn test_auto_command_launches_in_background() {
    let temp_dir = tempdir().unwrap();
    let session = session_at(
        temp_dir.path().join("redshift.conf"),
        FakeRunner::with_listing(AUTO_LISTING),
    );

    handle_auto_command(&session, &krakow(), &FieldOverrides::default()).unwrap();

    let runner = session.controller.runner();
    assert_eq!(
        *runner.spawned.borrow(),
        vec![vec!["-l", "50.06:19.94", "-t", "6500:4500", "-b", "1.0:1.0"]]
    );
    let killed: Vec<String> = runner.ran("killall").into_iter().flatten().collect();
    assert_eq!(killed, vec!["redshift-gtk", "redshift"]);
    assert_eq!(runner.ran("pgrep").len(), 1);
}

#[test]
fn test_auto_command_without_location_spawns_nothing() {
    let temp_dir = tempdir().unwrap();
    let session = session_at(temp_dir.path().join("redshift.conf"), FakeRunner::default());

    let result = handle_auto_command(&session, &LocationArgs::default(), &FieldOverrides::default());
    assert!(result.is_err());

    let runner = session.controller.runner();
    assert!(runner.spawned.borrow().is_empty());
    assert!(runner.calls.borrow().is_empty());
}

#[test]
fn test_manual_command_formats_two_decimals() {
    let temp_dir = tempdir().unwrap();
    let session = session_at(temp_dir.path().join("redshift.conf"), FakeRunner::default());

    handle_manual_command(&session, Some(3400), Some(0.5), None).unwrap();

    let runner = session.controller.runner();
    assert_eq!(
        runner.ran("redshift"),
        vec![vec![
            "-P",
            "-O",
            "3400",
            "-b",
            "0.50",
            "-g",
            "1.00:1.00:1.00"
        ]]
    );
    assert!(runner.spawned.borrow().is_empty());
}

#[test]
fn test_manual_command_rejects_out_of_range_temperature() {
    let temp_dir = tempdir().unwrap();
    let session = session_at(temp_dir.path().join("redshift.conf"), FakeRunner::default());

    assert!(handle_manual_command(&session, Some(9500), None, None).is_err());
    assert!(session.controller.runner().calls.borrow().is_empty());
}

#[test]
fn test_reset_and_stop_commands() {
    let temp_dir = tempdir().unwrap();
    let session = session_at(temp_dir.path().join("redshift.conf"), FakeRunner::default());

    handle_reset_command(&session).unwrap();
    handle_stop_command(&session).unwrap();

    let programs: Vec<String> = session
        .controller
        .runner()
        .calls
        .borrow()
        .iter()
        .map(|(program, args)| format!("{} {}", program, args.join(" ")))
        .collect();
    assert_eq!(
        programs,
        vec![
            "killall redshift",
            "redshift -x",
            "pgrep -a redshift",
            "killall redshift",
            "pgrep -a redshift",
        ]
    );
}

#[test]
fn test_reset_makes_next_manual_effect_neutral() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("redshift.conf");
    fs::write(
        &path,
        "[redshift]\ntemp-night = 3900\ngamma = 0.50:0.60:0.70\n[manual]\nlat = 50.06\nlon = 19.94\n",
    )
    .unwrap();
    let session = session_at(path.clone(), FakeRunner::default());

    handle_reset_command(&session).unwrap();
    handle_manual_command(&session, None, None, None).unwrap();

    let runs = session.controller.runner().ran("redshift");
    assert_eq!(
        runs.last().unwrap(),
        &vec!["-P", "-O", "6500", "-b", "1.00", "-g", "1.00:1.00:1.00"]
    );

    // Everything except gamma survives the rewrite
    let loaded = FormState::from_config(ConfigStore::new(&path).load().as_ref());
    assert_eq!(loaded.gamma, GammaTriple::default());
    assert_eq!(loaded.temp_night, "3900");
    assert_eq!(loaded.latitude, "50.06");
}

#[test]
fn test_reset_without_config_creates_no_file() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("redshift.conf");
    let session = session_at(path.clone(), FakeRunner::default());

    handle_reset_command(&session).unwrap();
    assert!(!path.exists());
}

#[test]
fn test_validation_failures_surface_as_control_errors() {
    let temp_dir = tempdir().unwrap();
    let session = session_at(temp_dir.path().join("redshift.conf"), FakeRunner::default());

    let fields = FieldOverrides {
        lat: Some("91".to_string()),
        lon: Some("21.01".to_string()),
        ..Default::default()
    };
    let err = handle_auto_command(&session, &LocationArgs::default(), &fields).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ControlError>(),
        Some(ControlError::Validation(ValidationError::Coordinates))
    ));

    let err = handle_manual_command(&session, None, Some(0.05), None).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ControlError>(),
        Some(ControlError::Validation(ValidationError::Brightness))
    ));
}

#[test]
fn test_status_save_adopts_running_auto_mode() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("redshift.conf");
    let session = session_at(path.clone(), FakeRunner::with_listing(AUTO_LISTING));

    handle_status_command(&session, true).unwrap();

    let loaded = FormState::from_config(ConfigStore::new(&path).load().as_ref());
    assert_eq!(loaded.latitude, "52.23");
    assert_eq!(loaded.longitude, "21.01");
    assert_eq!(loaded.temp_night, "4500");
    assert_eq!(loaded.brightness_night, "0.8");
}

#[test]
fn test_status_save_without_instance_leaves_file_alone() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("redshift.conf");
    let session = session_at(path.clone(), FakeRunner::default());

    handle_status_command(&session, true).unwrap();
    assert!(!path.exists());

    let session = session_at(path.clone(), FakeRunner::with_listing("5678 redshift\n"));
    handle_status_command(&session, true).unwrap();
    assert!(!path.exists());
}

#[test]
fn test_nudge_command_updates_saved_value() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("redshift.conf");
    fs::write(&path, "[redshift]\ntemp-night = 24950\n[manual]\nlat = 1\nlon = 2\n").unwrap();
    let session = session_at(path.clone(), FakeRunner::default());

    handle_nudge_command(&session, AdjustableField::TempNight, Direction::Up).unwrap();
    handle_nudge_command(&session, AdjustableField::BrightnessDay, Direction::Down).unwrap();

    let loaded = FormState::from_config(ConfigStore::new(&path).load().as_ref());
    assert_eq!(loaded.temp_night, "25000");
    assert_eq!(loaded.brightness_day, "0.95");
    assert_eq!(loaded.latitude, "1");
}

#[test]
fn test_malformed_config_falls_back_to_defaults() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("redshift.conf");
    fs::write(&path, "temp-day = 5000\n").unwrap();

    let loaded = FormState::from_config(ConfigStore::new(&path).load().as_ref());
    assert_eq!(loaded, FormState::default());
}
