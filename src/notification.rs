use crate::model::{Doctor, Planning, Shift};
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Duration, Utc};

/// Représente un rappel généré pour un médecin.
#[derive(Debug, Clone)]
pub struct Reminder {
    pub doctor_name: String,
    pub shift_id: String,
    pub notice_at: DateTime<Utc>,
    pub content: String,
}

/// Permet de customiser le rendu du message (texte, SMS, etc.).
pub trait ReminderRenderer {
    fn render(
        &self,
        doctor: &Doctor,
        shift: &Shift,
        station_name: &str,
        notice_at: DateTime<Utc>,
    ) -> String;
}

/// Gabarit texte simple destiné à un futur mail/SMS.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextReminder;

impl ReminderRenderer for TextReminder {
    fn render(
        &self,
        doctor: &Doctor,
        shift: &Shift,
        station_name: &str,
        notice_at: DateTime<Utc>,
    ) -> String {
        format!(
            "Bonjour {name},\n\nTu es de garde à la station \"{station}\" du {start} au {end}.\nCe message est généré le {notice}.\n\nMerci de prévenir le secrétariat en cas d'empêchement.\n",
            name = doctor.name,
            station = station_name,
            start = shift.start.to_rfc3339(),
            end = shift.end.to_rfc3339(),
            notice = notice_at.to_rfc3339()
        )
    }
}

/// Prépare un rappel pour la prochaine garde d'un médecin.
pub fn prepare_reminder(
    planning: &Planning,
    name: &str,
    days_before: i64,
    now: DateTime<Utc>,
    renderer: &dyn ReminderRenderer,
) -> Result<Reminder> {
    if days_before < 0 {
        bail!("days_before must be positive");
    }

    let doctor = planning
        .find_doctor_by_name(name)
        .with_context(|| format!("unknown doctor: {name}"))?;

    let mut upcoming: Vec<&Shift> = planning
        .shifts
        .iter()
        .filter(|shift| shift.doctor == doctor.id && shift.start >= now)
        .collect();

    if upcoming.is_empty() {
        bail!("no upcoming shift found for doctor {name}");
    }

    upcoming.sort_by_key(|shift| shift.start);
    let shift = upcoming[0];

    let station_name = planning
        .find_station_by_id(&shift.station)
        .map(|s| s.name.as_str())
        .unwrap_or_else(|| shift.station.as_str());

    let notice_at = shift.start - Duration::days(days_before);

    let content = renderer.render(doctor, shift, station_name, notice_at);
    Ok(Reminder {
        doctor_name: doctor.name.clone(),
        shift_id: shift.id.as_str().to_string(),
        notice_at,
        content,
    })
}
