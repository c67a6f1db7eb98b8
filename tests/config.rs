#![forbid(unsafe_code)]
use chrono::NaiveDate;
use shift_scheduler::{
    generate, io, load_params, read_params, save_params, DutyKind, Flags, PersonId,
    RotationPolicy, ScheduleParams, TimeWindow,
};
use std::fs;
use tempfile::tempdir;

#[test]
fn save_and_load_params_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("params.json");
    let params = ScheduleParams {
        start: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
        years: 0.5,
        rotation: ["Ann", "Bob", "Cy", "Dee"].iter().map(PersonId::new).collect(),
        policy: RotationPolicy::Single { cycle_len: Some(3) },
        lane_every_weeks: 2,
        weekend_lane_every_weeks: 5,
        flags: Flags {
            show_off: true,
            double_off: false,
        },
        ..ScheduleParams::default()
    };

    save_params(&path, &params).unwrap();
    let loaded = load_params(&path).unwrap();
    assert_eq!(loaded, params);
}

#[test]
fn load_single_policy_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("single.json");
    fs::write(
        &path,
        r#"{
            "start": "2025-01-06",
            "years": 0.05,
            "rotation": ["A", "B", "C"],
            "policy": {"kind": "single", "cycle_len": 2},
            "windows": {
                "hospital": {"start": "07:30", "end": "16:00"},
                "on_call": {"start": "16:00", "end": "22:00"},
                "lane": {"start": "16:00", "end": "23:00"},
                "weekend": {"start": "09:00", "end": "18:00"}
            },
            "lane_every_weeks": 2
        }"#,
    )
    .unwrap();

    let params = load_params(&path).unwrap();
    assert_eq!(params.policy, RotationPolicy::Single { cycle_len: Some(2) });
    assert_eq!(params.weekend_lane_every_weeks, 4);
    assert_eq!(params.flags, Flags::default());
    assert_eq!(params.windows.hospital, TimeWindow::new("07:30", "16:00"));

    let schedule = generate(&params).unwrap();
    let first = &schedule.events()[0];
    assert_eq!(first.title(), "HOSPITAL A");
    assert_eq!(
        first.start(),
        NaiveDate::from_ymd_opt(2025, 1, 6)
            .unwrap()
            .and_hms_opt(7, 30, 0)
            .unwrap()
    );
    // semaines 0 et 2 -> A, semaine 1 -> B
    let hospital: Vec<_> = schedule
        .iter()
        .filter(|e| e.kind() == DutyKind::Hospital)
        .map(|e| e.title())
        .collect();
    assert_eq!(hospital[5], "HOSPITAL B");
    assert_eq!(hospital[10], "HOSPITAL A");
}

#[test]
fn read_params_skips_validation() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("short.json");
    fs::write(&path, r#"{"start":"2025-01-06","years":1,"rotation":["A","B"]}"#).unwrap();

    let raw = read_params(&path).unwrap();
    assert_eq!(raw.rotation.len(), 2);
    let err = load_params(&path).unwrap_err();
    assert!(format!("{err:#}").contains("rotation order too short"));
}

#[test]
fn unknown_policy_kind_is_a_parse_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(
        &path,
        r#"{"start":"2025-01-06","years":1,"rotation":["A","B","C"],"policy":{"kind":"weekly"}}"#,
    )
    .unwrap();
    let err = read_params(&path).unwrap_err();
    assert!(format!("{err:#}").contains("parsing params"));
}

#[test]
fn export_schedule_json_lists_events() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("schedule.json");
    let params = ScheduleParams {
        years: 0.02,
        ..ScheduleParams::default()
    };
    let schedule = generate(&params).unwrap();
    io::export_schedule_json(&path, &schedule).unwrap();

    let value: serde_json::Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
    let events = value["events"].as_array().unwrap();
    assert_eq!(events.len(), schedule.len());
    assert_eq!(events[0]["title"], "HOSPITAL A");
    assert_eq!(events[0]["kind"], "hospital");
    assert_eq!(events[0]["person"], "A");
    assert_eq!(events[0]["start"], "2025-01-06T08:00:00");
    assert!(events[1].get("person").is_none());
}
