#![forbid(unsafe_code)]
use chrono::{Datelike, NaiveDate, Timelike};
use garde::{
    model::{Doctor, Station},
    scheduler::{classify, coverage_window, day_sequence, PlanError, Planner},
    ShiftKind,
};
use std::collections::HashSet;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn planner_with(doctors: Vec<Doctor>, stations: Vec<Station>) -> Planner {
    let mut planner = Planner::new();
    planner.add_doctors(doctors);
    planner.add_stations(stations);
    planner
}

fn nobody() -> HashSet<garde::DoctorId> {
    HashSet::new()
}

#[test]
fn day_sequence_is_inclusive_and_ascending() {
    let days = day_sequence(date(2025, 4, 28), date(2025, 5, 2)).unwrap();
    assert_eq!(days.len(), 5);
    assert_eq!(days[0], date(2025, 4, 28));
    assert_eq!(days[4], date(2025, 5, 2));
    for pair in days.windows(2) {
        assert_eq!(pair[1], pair[0].succ_opt().unwrap());
    }

    // borne unique : un seul jour
    let single = day_sequence(date(2025, 4, 30), date(2025, 4, 30)).unwrap();
    assert_eq!(single, vec![date(2025, 4, 30)]);
}

#[test]
fn classification_is_pure_and_matches_weekday() {
    // 2025-04-19 est un samedi, 2025-04-14 un lundi
    assert_eq!(classify(date(2025, 4, 19)), ShiftKind::Weekend);
    assert_eq!(classify(date(2025, 4, 20)), ShiftKind::Weekend);
    assert_eq!(classify(date(2025, 4, 14)), ShiftKind::Weekday);
    // idempotence
    assert_eq!(classify(date(2025, 4, 19)), classify(date(2025, 4, 19)));
    assert_eq!(
        coverage_window(date(2025, 4, 19)),
        coverage_window(date(2025, 4, 19))
    );
}

#[test]
fn coverage_windows_follow_fixed_rules() {
    // semaine : 16:00 → 09:00 le lendemain
    let (start, end) = coverage_window(date(2025, 4, 14));
    assert_eq!(start.date_naive(), date(2025, 4, 14));
    assert_eq!((start.hour(), start.minute()), (16, 0));
    assert_eq!(end.date_naive(), date(2025, 4, 15));
    assert_eq!((end.hour(), end.minute()), (9, 0));

    // week-end : 08:00 → 08:00 le lendemain (24 h)
    let (start, end) = coverage_window(date(2025, 4, 19));
    assert_eq!(start.date_naive(), date(2025, 4, 19));
    assert_eq!((start.hour(), start.minute()), (8, 0));
    assert_eq!(end.date_naive(), date(2025, 4, 20));
    assert_eq!((end.hour(), end.minute()), (8, 0));
    assert_eq!((end - start).num_hours(), 24);
}

#[test]
fn single_weekend_day_prefers_first_doctor() {
    // Scénario : samedi seul, deux médecins interchangeables du groupe 1
    let alice = Doctor::new("Alice", "a@h.com", "Cardiology", 1);
    let bob = Doctor::new("Bob", "b@h.com", "Surgery", 1);
    let station = Station::new("Réanimation", vec![1]);
    let planner = planner_with(vec![alice.clone(), bob], vec![station.clone()]);

    let report = planner
        .generate(date(2025, 4, 19), date(2025, 4, 19), &nobody())
        .unwrap();

    assert_eq!(report.shifts.len(), 1);
    assert!(report.unfilled.is_empty());
    let shift = &report.shifts[0];
    assert_eq!(shift.kind, ShiftKind::Weekend);
    assert_eq!(shift.station, station.id);
    // registre vide : l'ordre d'origine du pool départage
    assert_eq!(shift.doctor, alice.id);
    assert_eq!((shift.start.hour(), shift.end.hour()), (8, 8));
    assert_eq!(shift.end.date_naive(), date(2025, 4, 20));
}

#[test]
fn full_week_alternates_between_two_doctors() {
    let alice = Doctor::new("Alice", "a@h.com", "Cardiology", 1);
    let bob = Doctor::new("Bob", "b@h.com", "Surgery", 1);
    let station = Station::new("Urgence", vec![1]);
    let planner = planner_with(vec![alice.clone(), bob.clone()], vec![station]);

    // lundi → dimanche : 7 jours, une station
    let report = planner
        .generate(date(2025, 4, 14), date(2025, 4, 20), &nobody())
        .unwrap();

    assert_eq!(report.shifts.len(), 7);
    let alice_days = report.shifts.iter().filter(|s| s.doctor == alice.id).count();
    let bob_days = report.shifts.iter().filter(|s| s.doctor == bob.id).count();
    assert_eq!(alice_days + bob_days, 7);
    // alternance stricte depuis un registre vide
    assert_eq!(alice_days, 4);
    assert_eq!(bob_days, 3);
}

#[test]
fn station_without_eligible_group_stays_unfilled() {
    let alice = Doctor::new("Alice", "a@h.com", "Cardiology", 1);
    let bob = Doctor::new("Bob", "b@h.com", "Surgery", 2);
    let station = Station::new("Visite MedI", vec![5]);
    let planner = planner_with(vec![alice, bob], vec![station.clone()]);

    let report = planner
        .generate(date(2025, 4, 14), date(2025, 4, 16), &nobody())
        .unwrap();

    assert!(report.shifts.is_empty());
    assert_eq!(report.unfilled.len(), 3);
    assert!(report.unfilled.iter().all(|slot| slot.station == station.id));
    assert!(!report.is_complete());
}

#[test]
fn inverted_range_is_rejected() {
    let planner = planner_with(
        vec![Doctor::new("Alice", "a@h.com", "Cardiology", 1)],
        vec![Station::new("Urgence", vec![1])],
    );

    let err = planner
        .generate(date(2025, 4, 10), date(2025, 4, 9), &nobody())
        .unwrap_err();
    assert!(matches!(err, PlanError::InvalidDateRange));
}

#[test]
fn excluding_every_doctor_is_rejected() {
    let alice = Doctor::new("Alice", "a@h.com", "Cardiology", 1);
    let bob = Doctor::new("Bob", "b@h.com", "Surgery", 1);
    let excluded: HashSet<_> = [alice.id.clone(), bob.id.clone()].into();
    let planner = planner_with(vec![alice, bob], vec![Station::new("Urgence", vec![1])]);

    let err = planner
        .generate(date(2025, 4, 14), date(2025, 4, 20), &excluded)
        .unwrap_err();
    assert!(matches!(err, PlanError::NoAvailableDoctors));
}

#[test]
fn empty_station_list_is_rejected() {
    let planner = planner_with(vec![Doctor::new("Alice", "a@h.com", "Cardiology", 1)], vec![]);

    let err = planner
        .generate(date(2025, 4, 14), date(2025, 4, 20), &nobody())
        .unwrap_err();
    assert!(matches!(err, PlanError::NoStations));
}

#[test]
fn duplicate_ids_are_rejected_not_deduplicated() {
    let alice = Doctor::new("Alice", "a@h.com", "Cardiology", 1);
    let planner = planner_with(
        vec![alice.clone(), alice.clone()],
        vec![Station::new("Urgence", vec![1])],
    );
    let err = planner
        .generate(date(2025, 4, 14), date(2025, 4, 15), &nobody())
        .unwrap_err();
    assert!(matches!(err, PlanError::DuplicateDoctor(_)));

    let station = Station::new("Urgence", vec![1]);
    let planner = planner_with(
        vec![Doctor::new("Alice", "a@h.com", "Cardiology", 1)],
        vec![station.clone(), station.clone()],
    );
    let err = planner
        .generate(date(2025, 4, 14), date(2025, 4, 15), &nobody())
        .unwrap_err();
    assert!(matches!(err, PlanError::DuplicateStation(_)));
}

#[test]
fn emitted_plus_unfilled_covers_every_slot() {
    let doctors = vec![
        Doctor::new("Alice", "a@h.com", "Cardiology", 1),
        Doctor::new("Bob", "b@h.com", "Surgery", 2),
    ];
    let stations = vec![
        Station::new("Réanimation", vec![1, 2]),
        Station::new("Urgence", vec![2]),
        Station::new("Visite MedI", vec![7]), // jamais couvrable
    ];
    let planner = planner_with(doctors, stations);

    let report = planner
        .generate(date(2025, 4, 14), date(2025, 4, 18), &nobody())
        .unwrap();

    // 5 jours × 3 stations
    assert_eq!(report.shifts.len() + report.unfilled.len(), 15);
    assert_eq!(report.unfilled.len(), 5);
}

#[test]
fn assigned_doctor_always_belongs_to_an_allowed_group() {
    let doctors = vec![
        Doctor::new("Alice", "a@h.com", "Cardiology", 1),
        Doctor::new("Bob", "b@h.com", "Surgery", 2),
        Doctor::new("Carol", "c@h.com", "Neurology", 3),
        Doctor::new("Dan", "d@h.com", "Pediatrics", 4),
    ];
    let stations = vec![
        Station::new("Réanimation", vec![1, 2]),
        Station::new("Urgence", vec![1, 2, 3]),
        Station::new("Périphérie", vec![1, 2, 3, 4]),
    ];
    let planner = planner_with(doctors, stations);

    let report = planner
        .generate(date(2025, 4, 1), date(2025, 4, 30), &nobody())
        .unwrap();

    assert!(report.is_complete());
    for shift in &report.shifts {
        let doctor = planner.planning().find_doctor_by_id(&shift.doctor).unwrap();
        let station = planner
            .planning()
            .find_station_by_id(&shift.station)
            .unwrap();
        assert!(
            station.accepts(doctor.group),
            "doctor {} (group {}) assigned to {}",
            doctor.name,
            doctor.group,
            station.name
        );
    }
}

#[test]
fn ledger_updates_between_stations_of_the_same_day() {
    // Deux stations, deux médecins interchangeables : la deuxième station du
    // jour doit voir la charge laissée par la première.
    let alice = Doctor::new("Alice", "a@h.com", "Cardiology", 1);
    let bob = Doctor::new("Bob", "b@h.com", "Surgery", 1);
    let planner = planner_with(
        vec![alice.clone(), bob.clone()],
        vec![
            Station::new("Réanimation", vec![1]),
            Station::new("Urgence", vec![1]),
        ],
    );

    let report = planner
        .generate(date(2025, 4, 14), date(2025, 4, 14), &nobody())
        .unwrap();

    assert_eq!(report.shifts.len(), 2);
    assert_eq!(report.shifts[0].doctor, alice.id);
    assert_eq!(report.shifts[1].doctor, bob.id);
}

#[test]
fn load_stays_balanced_within_one_shift() {
    let doctors: Vec<Doctor> = ["Alice", "Bob", "Carol", "Dan"]
        .iter()
        .map(|name| Doctor::new(*name, "", "", 1))
        .collect();
    let planner = planner_with(doctors.clone(), vec![Station::new("Urgence", vec![1])]);

    // 10 jours, une station : chacun reçoit 2 ou 3 gardes
    let report = planner
        .generate(date(2025, 4, 7), date(2025, 4, 16), &nobody())
        .unwrap();
    assert_eq!(report.shifts.len(), 10);

    let counts: Vec<usize> = doctors
        .iter()
        .map(|d| report.shifts.iter().filter(|s| s.doctor == d.id).count())
        .collect();
    let max = counts.iter().max().unwrap();
    let min = counts.iter().min().unwrap();
    assert!(max - min <= 1, "unbalanced counts: {counts:?}");
}

#[test]
fn identical_inputs_generate_identical_output() {
    let doctors = vec![
        Doctor::new("Alice", "a@h.com", "Cardiology", 1),
        Doctor::new("Bob", "b@h.com", "Surgery", 2),
        Doctor::new("Carol", "c@h.com", "Neurology", 2),
    ];
    let stations = vec![
        Station::new("Réanimation", vec![1, 2]),
        Station::new("Urgence", vec![2]),
    ];
    let planner = planner_with(doctors, stations);

    let first = planner
        .generate(date(2025, 3, 1), date(2025, 3, 31), &nobody())
        .unwrap();
    let second = planner
        .generate(date(2025, 3, 1), date(2025, 3, 31), &nobody())
        .unwrap();

    assert_eq!(first.shifts, second.shifts);
    assert_eq!(first.unfilled, second.unfilled);
}

#[test]
fn excluded_doctor_never_appears() {
    let alice = Doctor::new("Alice", "a@h.com", "Cardiology", 1);
    let bob = Doctor::new("Bob", "b@h.com", "Surgery", 1);
    let excluded: HashSet<_> = [alice.id.clone()].into();
    let planner = planner_with(
        vec![alice.clone(), bob.clone()],
        vec![Station::new("Urgence", vec![1])],
    );

    let report = planner
        .generate(date(2025, 4, 14), date(2025, 4, 20), &excluded)
        .unwrap();

    assert_eq!(report.shifts.len(), 7);
    assert!(report.shifts.iter().all(|s| s.doctor == bob.id));
}

#[test]
fn generation_does_not_touch_the_planning() {
    let planner = planner_with(
        vec![Doctor::new("Alice", "a@h.com", "Cardiology", 1)],
        vec![Station::new("Urgence", vec![1])],
    );

    let report = planner
        .generate(date(2025, 4, 14), date(2025, 4, 20), &nobody())
        .unwrap();

    assert_eq!(report.shifts.len(), 7);
    assert!(planner.planning().shifts.is_empty());
}

#[test]
fn adopt_replaces_regenerated_slots() {
    let mut planner = planner_with(
        vec![
            Doctor::new("Alice", "a@h.com", "Cardiology", 1),
            Doctor::new("Bob", "b@h.com", "Surgery", 1),
        ],
        vec![Station::new("Urgence", vec![1])],
    );

    let first = planner
        .generate(date(2025, 4, 14), date(2025, 4, 20), &nobody())
        .unwrap();
    planner.adopt(&first);
    assert_eq!(planner.planning().shifts.len(), 7);

    // régénérer une sous-période ne duplique pas les créneaux
    let again = planner
        .generate(date(2025, 4, 16), date(2025, 4, 18), &nobody())
        .unwrap();
    planner.adopt(&again);
    assert_eq!(planner.planning().shifts.len(), 7);

    // les jours croissants restent triés
    for pair in planner.planning().shifts.windows(2) {
        assert!(pair[0].start <= pair[1].start);
    }
}

#[test]
fn weekday_shift_lasts_17_hours() {
    let planner = planner_with(
        vec![Doctor::new("Alice", "a@h.com", "Cardiology", 1)],
        vec![Station::new("Urgence", vec![1])],
    );
    let report = planner
        .generate(date(2025, 4, 14), date(2025, 4, 14), &nobody())
        .unwrap();
    assert_eq!(report.shifts[0].duration_hours(), 17);
    assert_eq!(report.shifts[0].date.weekday(), chrono::Weekday::Mon);
}
