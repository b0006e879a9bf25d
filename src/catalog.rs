use crate::io;
use crate::model::{Doctor, Planning, Station, MAX_GROUP};
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Référentiel d'un hôpital : stations de garde et effectif médical.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stations: Vec<Station>,
    #[serde(default)]
    pub doctors: Vec<Doctor>,
}

impl Catalog {
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            bail!("catalog id cannot be empty");
        }
        if self.name.trim().is_empty() {
            bail!("catalog name cannot be empty");
        }
        if self.stations.is_empty() {
            bail!("catalog must contain at least one station");
        }
        for station in &self.stations {
            validate_station(station)?;
        }
        for doctor in &self.doctors {
            validate_doctor(doctor)?;
        }
        validate_unique(self)?;
        Ok(())
    }

    /// Planning initial bâti sur le référentiel (aucune garde émise).
    pub fn into_planning(self) -> Planning {
        Planning {
            doctors: self.doctors,
            stations: self.stations,
            shifts: Vec::new(),
        }
    }
}

fn validate_station(station: &Station) -> Result<()> {
    if station.name.trim().is_empty() {
        bail!("station name cannot be empty");
    }
    if station.allowed_groups.is_empty() {
        bail!("station {} must allow at least one group", station.name);
    }
    for group in &station.allowed_groups {
        if *group == 0 || *group > MAX_GROUP {
            bail!(
                "station {} allows group {} outside 1..={MAX_GROUP}",
                station.name,
                group
            );
        }
    }
    Ok(())
}

fn validate_doctor(doctor: &Doctor) -> Result<()> {
    if doctor.name.trim().is_empty() {
        bail!("doctor name cannot be empty");
    }
    if doctor.group == 0 || doctor.group > MAX_GROUP {
        bail!(
            "doctor {} has group {} outside 1..={MAX_GROUP}",
            doctor.name,
            doctor.group
        );
    }
    Ok(())
}

fn validate_unique(catalog: &Catalog) -> Result<()> {
    for (i, a) in catalog.stations.iter().enumerate() {
        for b in catalog.stations.iter().skip(i + 1) {
            if a.id == b.id {
                bail!("catalog contains duplicate station id {}", a.id.as_str());
            }
            if a.name == b.name {
                bail!("catalog contains duplicate station name {}", a.name);
            }
        }
    }
    for (i, a) in catalog.doctors.iter().enumerate() {
        for b in catalog.doctors.iter().skip(i + 1) {
            if a.id == b.id {
                bail!("catalog contains duplicate doctor id {}", a.id.as_str());
            }
        }
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct CatalogInfo {
    pub catalog: Catalog,
    pub path: PathBuf,
    pub modified: Option<DateTime<Utc>>,
}

/// Gestion simple des référentiels persistés sur disque.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    base_dir: PathBuf,
}

impl CatalogStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            base_dir: dir.as_ref().to_path_buf(),
        }
    }

    fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.base_dir)
            .with_context(|| format!("creating catalog directory {}", self.base_dir.display()))
    }

    pub fn save(&self, catalog: &Catalog) -> Result<PathBuf> {
        catalog.validate()?;
        self.ensure_dir()?;
        let path = self.base_dir.join(format!("{}.json", catalog.id));
        let json = serde_json::to_string_pretty(catalog)?;
        fs::write(&path, json).with_context(|| format!("writing catalog {}", path.display()))?;
        Ok(path)
    }

    pub fn load(&self, id: &str) -> Result<Catalog> {
        let path = self.base_dir.join(format!("{id}.json"));
        let data = fs::read(&path).with_context(|| format!("reading catalog {}", path.display()))?;
        let catalog: Catalog = serde_json::from_slice(&data)
            .with_context(|| format!("parsing catalog {}", path.display()))?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn list(&self) -> Result<Vec<CatalogInfo>> {
        if !self.base_dir.exists() {
            return Ok(Vec::new());
        }
        let mut infos = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            let data = fs::read(&path)?;
            let catalog: Catalog = match serde_json::from_slice(&data) {
                Ok(c) => c,
                Err(err) => {
                    eprintln!("Warning: could not parse catalog {}: {err}", path.display());
                    continue;
                }
            };
            let modified = entry
                .metadata()
                .and_then(|meta| meta.modified())
                .ok()
                .map(DateTime::<Utc>::from);
            infos.push(CatalogInfo {
                catalog,
                path,
                modified,
            });
        }
        infos.sort_by(|a, b| a.catalog.id.cmp(&b.catalog.id));
        Ok(infos)
    }
}

pub fn load_catalog_from_file<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let data = fs::read(&path)?;
    let catalog: Catalog = serde_json::from_slice(&data)?;
    catalog.validate()?;
    Ok(catalog)
}

pub fn export_catalog_json<P: AsRef<Path>>(path: P, catalog: &Catalog) -> Result<()> {
    let json = serde_json::to_string_pretty(catalog)?;
    fs::write(path, json)?;
    Ok(())
}

pub fn export_planning_to_path<P: AsRef<Path>>(path: P, planning: &Planning) -> Result<()> {
    io::export_planning_json(path, planning)
}

/// Référentiel d'amorçage : les six stations de l'hôpital et un effectif
/// d'exemple couvrant tous les groupes.
pub fn default_catalog() -> Catalog {
    let all_groups: Vec<u8> = (1..=MAX_GROUP).collect();
    Catalog {
        id: "hopital-defaut".into(),
        name: "Hôpital — stations par défaut".into(),
        description: Some("Stations de garde et effectif d'exemple".into()),
        stations: vec![
            Station::new("Réanimation", vec![1, 2]),
            Station::new("Weaning", vec![1, 2]),
            Station::new("Urgence", vec![1, 2, 3]),
            Station::new("Périphérie", vec![1, 2, 3, 4]),
            Station::new("Visite MedI", all_groups.clone()),
            Station::new("Visite MedH", all_groups),
        ],
        doctors: vec![
            Doctor::new("Anna Müller", "anna.mueller@hospital.com", "Internal Medicine", 1),
            Doctor::new("Max Schmidt", "max.schmidt@hospital.com", "Surgery", 1),
            Doctor::new("Lisa Becker", "lisa.becker@hospital.com", "Cardiology", 1),
            Doctor::new("Smati Dorra", "smati.dorra@hospital.com", "Internal Medicine", 2),
            Doctor::new("Paul Wagner", "paul.wagner@hospital.com", "Neurology", 2),
            Doctor::new("Julia Weber", "julia.weber@hospital.com", "Pediatrics", 3),
            Doctor::new("Tim Hoffmann", "tim.hoffmann@hospital.com", "Orthopedics", 3),
            Doctor::new("Laura Koch", "laura.koch@hospital.com", "Gynecology", 4),
            Doctor::new("Felix Bauer", "felix.bauer@hospital.com", "Urology", 5),
            Doctor::new("Nina Fischer", "nina.fischer@hospital.com", "Radiology", 6),
            Doctor::new("Omar Haddad", "omar.haddad@hospital.com", "Anesthesiology", 7),
            Doctor::new("Clara Lenz", "clara.lenz@hospital.com", "Dermatology", 8),
        ],
    }
}
