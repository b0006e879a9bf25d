use crate::model::{DoctorId, Planning, ShiftKind, StationId};

/// Charge d'un médecin sur le planning courant (les médecins sans garde
/// apparaissent avec des compteurs à zéro).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorLoad {
    pub doctor: DoctorId,
    pub name: String,
    pub total: u32,
    pub weekday: u32,
    pub weekend: u32,
}

/// Couverture d'une station sur le planning courant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationLoad {
    pub station: StationId,
    pub name: String,
    pub total: u32,
    pub weekday: u32,
    pub weekend: u32,
}

/// Tableau des charges par médecin, trié par total décroissant puis nom.
/// Une garde pointant vers un médecin absent du planning reçoit sa propre
/// ligne plutôt que d'être passée sous silence.
pub fn doctor_loads(planning: &Planning) -> Vec<DoctorLoad> {
    let mut loads: Vec<DoctorLoad> = planning
        .doctors
        .iter()
        .map(|d| DoctorLoad {
            doctor: d.id.clone(),
            name: d.name.clone(),
            total: 0,
            weekday: 0,
            weekend: 0,
        })
        .collect();

    for shift in &planning.shifts {
        let idx = match loads.iter().position(|l| l.doctor == shift.doctor) {
            Some(idx) => idx,
            None => {
                let short = shift.doctor.as_str();
                let short = &short[..short.len().min(8)];
                loads.push(DoctorLoad {
                    doctor: shift.doctor.clone(),
                    name: format!("Unknown doctor ({short})"),
                    total: 0,
                    weekday: 0,
                    weekend: 0,
                });
                loads.len() - 1
            }
        };
        let entry = &mut loads[idx];
        entry.total += 1;
        match shift.kind {
            ShiftKind::Weekday => entry.weekday += 1,
            ShiftKind::Weekend => entry.weekend += 1,
        }
    }

    loads.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.name.cmp(&b.name)));
    loads
}

/// Tableau des couvertures par station, dans l'ordre du planning.
pub fn station_loads(planning: &Planning) -> Vec<StationLoad> {
    let mut loads: Vec<StationLoad> = planning
        .stations
        .iter()
        .map(|s| StationLoad {
            station: s.id.clone(),
            name: s.name.clone(),
            total: 0,
            weekday: 0,
            weekend: 0,
        })
        .collect();

    for shift in &planning.shifts {
        if let Some(entry) = loads.iter_mut().find(|l| l.station == shift.station) {
            entry.total += 1;
            match shift.kind {
                ShiftKind::Weekday => entry.weekday += 1,
                ShiftKind::Weekend => entry.weekend += 1,
            }
        }
    }

    loads
}
