use super::calendar;
use crate::model::{Doctor, DoctorId, Shift, ShiftId, Station};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Charge d'une génération en cours : jours déjà affectés par médecin.
/// Construite pendant un appel à `generate`, jetée à la fin.
#[derive(Debug, Default)]
pub(super) struct Ledger {
    days: HashMap<DoctorId, Vec<NaiveDate>>,
}

impl Ledger {
    pub(super) fn count(&self, doctor: &DoctorId) -> usize {
        self.days.get(doctor).map_or(0, Vec::len)
    }

    /// À appeler avant de traiter la station suivante du même jour :
    /// la comparaison de charge doit voir l'affectation qui précède.
    pub(super) fn record(&mut self, doctor: &DoctorId, date: NaiveDate) {
        self.days.entry(doctor.clone()).or_default().push(date);
    }
}

/// Sous-ensemble du pool admis par la station, dans l'ordre du pool.
/// Vide = créneau vacant, jamais une erreur.
pub(super) fn eligible_doctors<'a>(station: &Station, pool: &[&'a Doctor]) -> Vec<&'a Doctor> {
    pool.iter()
        .copied()
        .filter(|d| station.accepts(d.group))
        .collect()
}

/// Médecin le moins chargé de la liste ; tri stable par nombre de jours,
/// donc à charge égale l'ordre d'origine du pool départage. Aucun aléa.
pub(super) fn pick_least_loaded<'a>(
    eligible: &[&'a Doctor],
    ledger: &Ledger,
) -> Option<&'a Doctor> {
    let mut ranked = eligible.to_vec();
    ranked.sort_by_key(|d| ledger.count(&d.id));
    ranked.first().copied()
}

/// Assemble la garde du triplet (jour, station, médecin) avec la fenêtre
/// de couverture du jour.
pub(super) fn emit_shift(station: &Station, doctor: &Doctor, date: NaiveDate) -> Shift {
    let (start, end) = calendar::coverage_window(date);
    Shift {
        id: ShiftId::for_slot(&station.id, date),
        station: station.id.clone(),
        doctor: doctor.id.clone(),
        date,
        start,
        end,
        kind: calendar::classify(date),
    }
}
