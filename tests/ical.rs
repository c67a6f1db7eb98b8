#![forbid(unsafe_code)]
use chrono::{NaiveDate, NaiveDateTime};
use shift_scheduler::{
    generate, parse_ics, to_ics, to_ics_with, Clock, DutyKind, Event, PersonId, Schedule,
    ScheduleParams, UidSource,
};
use std::collections::HashSet;

struct FixedClock(NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

#[derive(Default)]
struct Counter(usize);

impl UidSource for Counter {
    fn next_uid(&mut self) -> String {
        let uid = format!("uid-{}", self.0);
        self.0 += 1;
        uid
    }
}

fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, d)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

fn small_schedule() -> Schedule {
    Schedule::new(vec![
        Event::new(
            DutyKind::WeekendLane,
            None,
            at(11, 8, 0),
            at(12, 20, 0),
        ),
        Event::new(
            DutyKind::Hospital,
            Some(&PersonId::new("A")),
            at(6, 8, 0),
            at(6, 17, 0),
        ),
    ])
}

#[test]
fn calendar_layout_with_fakes() {
    let clock = FixedClock(at(1, 12, 0) + chrono::Duration::seconds(30));
    let text = to_ics_with(&small_schedule(), &clock, &mut Counter::default());

    assert!(!text.replace("\r\n", "").contains('\n'));
    insta::assert_snapshot!(text.replace("\r\n", "\n"), @r"
    BEGIN:VCALENDAR
    VERSION:2.0
    PRODID:-//ShiftScheduler//EN
    BEGIN:VEVENT
    UID:uid-0
    DTSTAMP:20250101T120000
    SUMMARY:HOSPITAL A
    DTSTART:20250106T080000
    DTEND:20250106T170000
    END:VEVENT
    BEGIN:VEVENT
    UID:uid-1
    DTSTAMP:20250101T120000
    SUMMARY:Weekend Lane
    DTSTART:20250111T080000
    DTEND:20250112T200000
    END:VEVENT
    END:VCALENDAR
    ");
}

#[test]
fn empty_schedule_is_header_and_footer_only() {
    let text = to_ics_with(&Schedule::default(), &FixedClock(at(1, 0, 0)), &mut Counter::default());
    assert_eq!(
        text,
        "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//ShiftScheduler//EN\r\nEND:VCALENDAR"
    );
}

#[test]
fn entries_follow_schedule_order() {
    let schedule = small_schedule();
    assert_eq!(schedule.events()[0].title(), "HOSPITAL A");
    let parsed = parse_ics(&to_ics(&schedule)).unwrap();
    assert_eq!(parsed[0].summary, "HOSPITAL A");
    assert_eq!(parsed[1].summary, "Weekend Lane");
}

#[test]
fn round_trip_recovers_events() {
    let mut params = ScheduleParams::default();
    params.flags.show_off = true;
    let schedule = generate(&params).unwrap();
    let parsed = parse_ics(&to_ics(&schedule)).unwrap();

    assert_eq!(parsed.len(), schedule.len());
    for (p, e) in parsed.iter().zip(schedule.iter()) {
        assert_eq!(p.summary, e.title());
        assert_eq!(p.start, e.start());
        assert_eq!(p.end, e.end());
    }
    let uids: HashSet<_> = parsed.iter().map(|p| p.uid.as_str()).collect();
    assert_eq!(uids.len(), parsed.len());
}

#[test]
fn uids_are_fresh_on_every_call() {
    let schedule = small_schedule();
    let first = parse_ics(&to_ics(&schedule)).unwrap();
    let second = parse_ics(&to_ics(&schedule)).unwrap();
    for (a, b) in first.iter().zip(second.iter()) {
        assert_ne!(a.uid, b.uid);
        assert_eq!(a.summary, b.summary);
    }
}

#[test]
fn parse_rejects_broken_documents() {
    assert!(parse_ics("BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\nSUMMARY:x\r\n").is_err());
    assert!(parse_ics("BEGIN:VEVENT\r\nEND:VEVENT\r\n").is_err());
    assert!(parse_ics(
        "BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\nDTSTART:nope\r\nDTEND:20250101T000000\r\nEND:VEVENT\r\nEND:VCALENDAR"
    )
    .is_err());
}

#[test]
fn parse_ignores_property_parameters() {
    let text = "BEGIN:VCALENDAR\nBEGIN:VEVENT\nUID:x\nSUMMARY:ODC B\nDTSTART;VALUE=DATE-TIME:20250106T170000\nDTEND:20250106T230000\nLOCATION:ward 3\nEND:VEVENT\nEND:VCALENDAR\n";
    let parsed = parse_ics(text).unwrap();
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0].summary, "ODC B");
    assert_eq!(parsed[0].start, at(6, 17, 0));
}
