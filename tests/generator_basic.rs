#![forbid(unsafe_code)]
use chrono::{NaiveDate, NaiveTime};
use rota::generator::{generate, RotaError};
use rota::model::{LeaveInterval, Member, MemberId, ShiftDefinition, ShiftId};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn member(id: &str, shifts: &[&str], days: &str) -> Member {
    Member {
        id: MemberId::new(id),
        name: id.to_string(),
        shifts: shifts.iter().map(ShiftId::new).collect(),
        days: rota::io::parse_days(days).unwrap(),
    }
}

fn shift(
    id: &str,
    name: &str,
    start: (u32, u32),
    end: (u32, u32),
    headcount: u32,
    days: &str,
) -> ShiftDefinition {
    ShiftDefinition {
        id: ShiftId::new(id),
        name: name.to_string(),
        start: time(start.0, start.1),
        end: time(end.0, end.1),
        headcount,
        days: rota::io::parse_days(days).unwrap(),
    }
}

// 2025-10-06 est un lundi.
const MON: (i32, u32, u32) = (2025, 10, 6);

#[test]
fn weekday_shift_covers_monday_to_friday() {
    let members = vec![member("m1", &["morning"], "mon,tue,wed,thu,fri")];
    let shifts = vec![shift(
        "morning",
        "Morning",
        (8, 0),
        (17, 0),
        1,
        "mon,tue,wed,thu,fri",
    )];

    let rota = generate(&members, &shifts, &[], date(2025, 10, 6), date(2025, 10, 12)).unwrap();

    // Sam/dim ne produisent aucune instance.
    assert_eq!(rota.entries.len(), 5);
    assert_eq!(rota.entries[0].date, date(2025, 10, 6));
    assert_eq!(rota.entries[4].date, date(2025, 10, 10));
    for e in &rota.entries {
        assert_eq!(e.assigned, vec![MemberId::new("m1")]);
        assert_eq!(e.shortage, 0);
    }
    assert!(rota.is_fully_staffed());
}

#[test]
fn leave_excludes_member_and_records_shortage() {
    let members = vec![member("m1", &["morning"], "mon,tue,wed,thu,fri")];
    let shifts = vec![shift(
        "morning",
        "Morning",
        (8, 0),
        (17, 0),
        1,
        "mon,tue,wed,thu,fri",
    )];
    let leaves = vec![LeaveInterval::new(
        MemberId::new("m1"),
        date(2025, 10, 8),
        date(2025, 10, 8),
    )
    .unwrap()];

    let rota = generate(
        &members,
        &shifts,
        &leaves,
        date(2025, 10, 6),
        date(2025, 10, 12),
    )
    .unwrap();

    let wed = rota.entry(date(2025, 10, 8), &ShiftId::new("morning")).unwrap();
    assert!(wed.assigned.is_empty());
    assert_eq!(wed.shortage, 1);
    assert_eq!(rota.total_shortage(), 1);
    assert!(!rota.is_fully_staffed());

    let mon = rota.entry(date(2025, 10, 6), &ShiftId::new("morning")).unwrap();
    assert_eq!(mon.assigned, vec![MemberId::new("m1")]);
}

#[test]
fn rejects_inverted_range() {
    let err = generate(&[], &[], &[], date(2025, 10, 12), date(2025, 10, 6)).unwrap_err();
    assert!(matches!(err, RotaError::InvalidRange { .. }));
}

#[test]
fn rejects_leave_for_unknown_member() {
    let members = vec![member("m1", &[], "mon")];
    let leaves = vec![LeaveInterval::new(
        MemberId::new("ghost"),
        date(2025, 10, 6),
        date(2025, 10, 7),
    )
    .unwrap()];

    let err = generate(
        &members,
        &[],
        &leaves,
        date(2025, 10, 6),
        date(2025, 10, 6),
    )
    .unwrap_err();
    assert!(matches!(err, RotaError::UnknownMember(_)));
}

#[test]
fn rejects_eligibility_for_unknown_shift() {
    let members = vec![member("m1", &["ghost"], "mon")];

    let err = generate(&members, &[], &[], date(2025, 10, 6), date(2025, 10, 6)).unwrap_err();
    assert!(matches!(err, RotaError::UnknownShift(_)));
}

#[test]
fn identical_inputs_produce_identical_output() {
    let members = vec![
        member("m1", &["day", "late"], "mon,tue,wed,thu,fri"),
        member("m2", &["day", "late"], "mon,tue,wed,thu,fri"),
        member("m3", &["day"], "mon,wed,fri"),
    ];
    let shifts = vec![
        shift("day", "Day", (8, 0), (16, 0), 2, "mon,tue,wed,thu,fri"),
        shift("late", "Late", (16, 0), (22, 0), 1, "mon,wed,fri"),
    ];
    let leaves = vec![LeaveInterval::new(
        MemberId::new("m2"),
        date(2025, 10, 7),
        date(2025, 10, 9),
    )
    .unwrap()];

    let a = generate(
        &members,
        &shifts,
        &leaves,
        date(MON.0, MON.1, MON.2),
        date(2025, 10, 12),
    )
    .unwrap();
    let b = generate(
        &members,
        &shifts,
        &leaves,
        date(MON.0, MON.1, MON.2),
        date(2025, 10, 12),
    )
    .unwrap();
    assert_eq!(a, b);
}

#[test]
fn load_balancing_alternates_equal_members() {
    let members = vec![
        member("m1", &["day"], "mon,tue,wed,thu,fri"),
        member("m2", &["day"], "mon,tue,wed,thu,fri"),
    ];
    let shifts = vec![shift("day", "Day", (8, 0), (16, 0), 1, "mon,tue,wed,thu,fri")];

    let rota = generate(&members, &shifts, &[], date(2025, 10, 6), date(2025, 10, 10)).unwrap();

    let got: Vec<&str> = rota
        .entries
        .iter()
        .map(|e| e.assigned[0].as_str())
        .collect();
    // Charge égale => départage par id croissant, puis alternance.
    assert_eq!(got, ["m1", "m2", "m1", "m2", "m1"]);
}

#[test]
fn overlapping_windows_are_never_double_booked() {
    let members = vec![member("m1", &["day", "late"], "mon")];
    let shifts = vec![
        shift("day", "Day", (8, 0), (16, 0), 1, "mon"),
        shift("late", "Late", (12, 0), (20, 0), 1, "mon"),
    ];

    let rota = generate(&members, &shifts, &[], date(2025, 10, 6), date(2025, 10, 6)).unwrap();

    assert_eq!(rota.entries.len(), 2);
    let day = rota.entry(date(2025, 10, 6), &ShiftId::new("day")).unwrap();
    let late = rota.entry(date(2025, 10, 6), &ShiftId::new("late")).unwrap();
    assert_eq!(day.assigned, vec![MemberId::new("m1")]);
    assert!(late.assigned.is_empty());
    assert_eq!(late.shortage, 1);
}

#[test]
fn disjoint_windows_may_share_a_member() {
    let members = vec![member("m1", &["open", "close"], "mon")];
    let shifts = vec![
        shift("close", "Close", (14, 0), (18, 0), 1, "mon"),
        shift("open", "Open", (8, 0), (12, 0), 1, "mon"),
    ];

    let rota = generate(&members, &shifts, &[], date(2025, 10, 6), date(2025, 10, 6)).unwrap();

    assert!(rota.is_fully_staffed());
    for e in &rota.entries {
        assert_eq!(e.assigned, vec![MemberId::new("m1")]);
    }
}

#[test]
fn overnight_window_blocks_late_evening() {
    let members = vec![member("m1", &["evening", "night"], "mon")];
    let shifts = vec![
        shift("evening", "Evening", (23, 0), (23, 45), 1, "mon"),
        shift("night", "Night", (22, 0), (6, 0), 1, "mon"),
    ];

    let rota = generate(&members, &shifts, &[], date(2025, 10, 6), date(2025, 10, 6)).unwrap();

    // "evening" passe en premier (id croissant), la fenêtre de nuit chevauche.
    let evening = rota
        .entry(date(2025, 10, 6), &ShiftId::new("evening"))
        .unwrap();
    let night = rota.entry(date(2025, 10, 6), &ShiftId::new("night")).unwrap();
    assert_eq!(evening.assigned, vec![MemberId::new("m1")]);
    assert!(night.assigned.is_empty());
    assert_eq!(night.shortage, 1);
}

#[test]
fn headcount_is_bounded_and_shortage_is_exact() {
    let members = vec![
        member("m1", &["day"], "mon"),
        member("m2", &["day"], "mon"),
    ];
    let shifts = vec![shift("day", "Day", (8, 0), (16, 0), 3, "mon")];

    let rota = generate(&members, &shifts, &[], date(2025, 10, 6), date(2025, 10, 6)).unwrap();

    let entry = &rota.entries[0];
    assert_eq!(
        entry.assigned,
        vec![MemberId::new("m1"), MemberId::new("m2")]
    );
    assert_eq!(entry.shortage, 1);
}

#[test]
fn output_is_ordered_by_date_then_shift_id() {
    let members = vec![member("m1", &["a-open", "b-close"], "mon,tue")];
    let shifts = vec![
        shift("b-close", "Close", (14, 0), (18, 0), 1, "mon,tue"),
        shift("a-open", "Open", (8, 0), (12, 0), 1, "mon,tue"),
    ];

    let rota = generate(&members, &shifts, &[], date(2025, 10, 6), date(2025, 10, 7)).unwrap();

    let keys: Vec<(NaiveDate, &str)> = rota
        .entries
        .iter()
        .map(|e| (e.date, e.shift_id.as_str()))
        .collect();
    assert_eq!(
        keys,
        vec![
            (date(2025, 10, 6), "a-open"),
            (date(2025, 10, 6), "b-close"),
            (date(2025, 10, 7), "a-open"),
            (date(2025, 10, 7), "b-close"),
        ]
    );
}
