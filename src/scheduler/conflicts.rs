use super::{util, Conflict, ConflictKind, Planner};
use crate::model::Shift;

/// Passe de contrôle a posteriori sur les gardes d'un planning.
///
/// `GroupMismatch` ne peut pas sortir du générateur (filtre d'éligibilité) ;
/// il attrape les plannings édités à la main. `Overlap` est informatif :
/// avec un seul médecin éligible pour deux stations, le générateur
/// double-affecte légitimement.
pub(super) fn detect_conflicts(planner: &Planner) -> Vec<Conflict> {
    let mut out = Vec::new();
    let planning = planner.planning();

    for shift in &planning.shifts {
        let Some(doctor) = planning.find_doctor_by_id(&shift.doctor) else {
            continue;
        };
        let mismatch = planning
            .find_station_by_id(&shift.station)
            .is_some_and(|station| !station.accepts(doctor.group));
        if mismatch {
            out.push(Conflict {
                doctor: doctor.id.clone(),
                shift_a: shift.id.clone(),
                shift_b: None,
                kind: ConflictKind::GroupMismatch,
            });
        }
    }

    for doctor in planning.doctors.iter() {
        let mut shifts: Vec<&Shift> = planning
            .shifts
            .iter()
            .filter(|s| s.doctor == doctor.id)
            .collect();
        shifts.sort_by_key(|s| s.start);

        for (idx, a) in shifts.iter().enumerate() {
            for b in shifts.iter().skip(idx + 1) {
                if util::overlaps(a.start, a.end, b.start, b.end) {
                    out.push(Conflict {
                        doctor: doctor.id.clone(),
                        shift_a: a.id.clone(),
                        shift_b: Some(b.id.clone()),
                        kind: ConflictKind::Overlap,
                    });
                }
            }
        }
    }

    out
}
