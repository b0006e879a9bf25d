use crate::model::{DoctorId, Shift, ShiftId, StationId};
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictKind {
    /// Médecin affecté à une station dont le groupe ne l'admet pas.
    GroupMismatch,
    /// Deux gardes du même médecin se chevauchent dans le temps.
    Overlap,
}

#[derive(Debug, Clone)]
pub struct Conflict {
    pub doctor: DoctorId,
    pub shift_a: ShiftId,
    /// Absent pour un `GroupMismatch` (une seule garde en cause).
    pub shift_b: Option<ShiftId>,
    pub kind: ConflictKind,
}

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("invalid date range: end date precedes start date")]
    InvalidDateRange,
    #[error("no doctors available after exclusions")]
    NoAvailableDoctors,
    #[error("station list is empty")]
    NoStations,
    #[error("duplicate doctor id: {0}")]
    DuplicateDoctor(String),
    #[error("duplicate station id: {0}")]
    DuplicateStation(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Créneau resté vacant : aucun médecin éligible ce jour-là pour la station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnfilledSlot {
    pub station: StationId,
    pub date: NaiveDate,
}

/// Résultat d'une génération : gardes émises + créneaux vacants.
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    pub shifts: Vec<Shift>,
    pub unfilled: Vec<UnfilledSlot>,
}

impl GenerationReport {
    pub fn is_complete(&self) -> bool {
        self.unfilled.is_empty()
    }
}
