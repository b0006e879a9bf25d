use super::types::PlanError;
use crate::model::ShiftKind;
use anyhow::Context;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc, Weekday};

/// Suite inclusive et croissante des jours de `start` à `end`.
///
/// Fonction pure des deux bornes ; `start > end` est rejeté avant de
/// produire le moindre jour.
pub fn day_sequence(start: NaiveDate, end: NaiveDate) -> Result<Vec<NaiveDate>, PlanError> {
    if end < start {
        return Err(PlanError::InvalidDateRange);
    }

    let mut days = Vec::new();
    let mut current = start;
    while current <= end {
        days.push(current);
        current = current.succ_opt().context("date overflow")?;
    }
    Ok(days)
}

/// Samedi et dimanche sont des jours `weekend`, tout le reste `weekday`.
pub fn classify(date: NaiveDate) -> ShiftKind {
    match date.weekday() {
        Weekday::Sat | Weekday::Sun => ShiftKind::Weekend,
        _ => ShiftKind::Weekday,
    }
}

/// Fenêtre de couverture du jour (UTC), selon les règles fixes :
/// - semaine : 16:00 → 09:00 le lendemain ;
/// - week-end : 08:00 → 08:00 le lendemain (24 h).
pub fn coverage_window(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let (start_time, end_time) = match classify(date) {
        ShiftKind::Weekday => (hm(16, 0), hm(9, 0)),
        ShiftKind::Weekend => (hm(8, 0), hm(8, 0)),
    };
    build_datetimes(date, start_time, end_time)
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

fn build_datetimes(
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
) -> (DateTime<Utc>, DateTime<Utc>) {
    let start_dt = Utc.from_utc_datetime(&NaiveDateTime::new(date, start_time));
    let mut end_date = date;
    if end_time <= start_time {
        end_date = end_date.succ_opt().unwrap();
    }
    let end_dt = Utc.from_utc_datetime(&NaiveDateTime::new(end_date, end_time));
    (start_dt, end_dt)
}
