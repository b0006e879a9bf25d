use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Plus grand numéro de groupe admis pour un médecin.
pub const MAX_GROUP: u8 = 8;

/// Identifiant fort pour Doctor
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DoctorId(String);

impl DoctorId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Médecin (membre du tableau de garde)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: DoctorId,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub specialty: String,
    /// Groupe de rotation (1..=8) ; seul critère d'éligibilité par station.
    pub group: u8,
}

impl Doctor {
    pub fn new<N: Into<String>, E: Into<String>, S: Into<String>>(
        name: N,
        email: E,
        specialty: S,
        group: u8,
    ) -> Self {
        Self {
            id: DoctorId::random(),
            name: name.into(),
            email: email.into(),
            specialty: specialty.into(),
            group,
        }
    }
}

/// Identifiant fort pour Station
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StationId(String);

impl StationId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Poste de garde (service hospitalier couvert une fois par jour)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    /// Groupes admis ; une station sans groupe admis n'est jamais couverte.
    pub allowed_groups: Vec<u8>,
}

impl Station {
    pub fn new<N: Into<String>>(name: N, allowed_groups: Vec<u8>) -> Self {
        Self {
            id: StationId::random(),
            name: name.into(),
            allowed_groups,
        }
    }

    pub fn accepts(&self, group: u8) -> bool {
        self.allowed_groups.contains(&group)
    }
}

/// Type de créneau, déterminé uniquement par le jour calendaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftKind {
    Weekday,
    Weekend,
}

impl ShiftKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ShiftKind::Weekday => "weekday",
            ShiftKind::Weekend => "weekend",
        }
    }
}

/// Identifiant fort pour Shift
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShiftId(String);

impl ShiftId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    /// Identifiant déterministe d'un créneau (station, jour) : deux
    /// générations identiques produisent les mêmes ids.
    pub fn for_slot(station: &StationId, date: NaiveDate) -> Self {
        Self(format!("{date}-{}", station.as_str()))
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Garde émise : un médecin couvre une station pour un jour calendaire (UTC)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    pub id: ShiftId,
    pub station: StationId,
    pub doctor: DoctorId,
    pub date: NaiveDate,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub kind: ShiftKind,
}

impl Shift {
    /// Durée en heures (17 h en semaine, 24 h le week-end).
    pub fn duration_hours(&self) -> i64 {
        (self.end - self.start).num_hours()
    }
}

/// Planning complet persisté (médecins, stations, gardes émises)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Planning {
    pub doctors: Vec<Doctor>,
    pub stations: Vec<Station>,
    pub shifts: Vec<Shift>,
}

impl Planning {
    pub fn find_doctor_by_name<'a>(&'a self, name: &str) -> Option<&'a Doctor> {
        self.doctors.iter().find(|d| d.name == name)
    }
    pub fn find_doctor_by_id<'a>(&'a self, id: &DoctorId) -> Option<&'a Doctor> {
        self.doctors.iter().find(|d| &d.id == id)
    }
    pub fn find_station_by_name<'a>(&'a self, name: &str) -> Option<&'a Station> {
        self.stations.iter().find(|s| s.name == name)
    }
    pub fn find_station_by_id<'a>(&'a self, id: &StationId) -> Option<&'a Station> {
        self.stations.iter().find(|s| &s.id == id)
    }
}
