mod assignment;
mod calendar;
mod conflicts;
mod types;
mod util;

pub use calendar::{classify, coverage_window, day_sequence};
pub use types::{Conflict, ConflictKind, GenerationReport, PlanError, UnfilledSlot};

use crate::model::{Doctor, DoctorId, Planning, Station};
use assignment::Ledger;
use chrono::NaiveDate;
use std::collections::HashSet;

/// Planner : encapsule un Planning en cours de construction
#[derive(Debug, Default)]
pub struct Planner {
    planning: Planning,
}

impl Planner {
    pub fn new() -> Self {
        Self {
            planning: Planning::default(),
        }
    }

    pub fn planning(&self) -> &Planning {
        &self.planning
    }
    pub fn planning_mut(&mut self) -> &mut Planning {
        &mut self.planning
    }

    pub fn add_doctors(&mut self, doctors: Vec<Doctor>) {
        self.planning.doctors.extend(doctors);
    }

    pub fn add_stations(&mut self, stations: Vec<Station>) {
        self.planning.stations.extend(stations);
    }

    /// Génère une garde par station et par jour sur `[start, end]`.
    ///
    /// Jours croissants, stations dans l'ordre du planning ; chaque
    /// affectation est inscrite au registre de charge avant la station
    /// suivante du même jour. Une station sans médecin éligible un jour
    /// donné est comptée vacante, jamais fatale. Les préconditions sont
    /// toutes vérifiées avant la première affectation : soit la génération
    /// échoue sans rien produire, soit elle va au bout.
    ///
    /// Le planning n'est pas modifié ; la persistance des gardes produites
    /// revient à l'appelant (voir [`Planner::adopt`]).
    pub fn generate(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        excluded: &HashSet<DoctorId>,
    ) -> Result<GenerationReport, PlanError> {
        let days = calendar::day_sequence(start, end)?;
        self.ensure_unique_ids()?;

        let pool: Vec<&Doctor> = self
            .planning
            .doctors
            .iter()
            .filter(|d| !excluded.contains(&d.id))
            .collect();
        if pool.is_empty() {
            return Err(PlanError::NoAvailableDoctors);
        }
        if self.planning.stations.is_empty() {
            return Err(PlanError::NoStations);
        }

        let mut ledger = Ledger::default();
        let mut report = GenerationReport::default();

        for &date in &days {
            for station in &self.planning.stations {
                let eligible = assignment::eligible_doctors(station, &pool);
                match assignment::pick_least_loaded(&eligible, &ledger) {
                    Some(doctor) => {
                        ledger.record(&doctor.id, date);
                        report.shifts.push(assignment::emit_shift(station, doctor, date));
                    }
                    None => report.unfilled.push(UnfilledSlot {
                        station: station.id.clone(),
                        date,
                    }),
                }
            }
        }

        Ok(report)
    }

    /// Intègre les gardes d'un rapport dans le planning. Les ids de créneau
    /// sont déterministes (jour + station) : régénérer une période remplace
    /// ses gardes au lieu de les dupliquer.
    pub fn adopt(&mut self, report: &GenerationReport) {
        self.planning
            .shifts
            .retain(|s| !report.shifts.iter().any(|n| n.id == s.id));
        self.planning.shifts.extend(report.shifts.iter().cloned());
        self.planning.shifts.sort_by_key(|s| s.start);
    }

    pub fn detect_conflicts(&self) -> Vec<Conflict> {
        conflicts::detect_conflicts(self)
    }

    /// Des listes avec doublons d'ids sont rejetées, jamais dédupliquées.
    fn ensure_unique_ids(&self) -> Result<(), PlanError> {
        let mut seen_doctors = HashSet::new();
        for d in &self.planning.doctors {
            if !seen_doctors.insert(&d.id) {
                return Err(PlanError::DuplicateDoctor(d.id.as_str().to_string()));
            }
        }
        let mut seen_stations = HashSet::new();
        for s in &self.planning.stations {
            if !seen_stations.insert(&s.id) {
                return Err(PlanError::DuplicateStation(s.id.as_str().to_string()));
            }
        }
        Ok(())
    }
}
