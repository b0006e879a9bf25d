#![forbid(unsafe_code)]
use anyhow::Result;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use garde::{
    catalog::{self, CatalogStore},
    io,
    model::DoctorId,
    notification::{prepare_reminder, TextReminder},
    report,
    scheduler::{ConflictKind, Planner},
    storage::{JsonStorage, Storage},
};
use std::collections::HashSet;
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI minimaliste de planification des gardes (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON de planning
    #[arg(long, global = true, default_value = "planning.json")]
    planning: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Initialiser le planning depuis un référentiel (défaut intégré)
    Seed {
        /// Fichier JSON de référentiel ; sinon le référentiel intégré
        #[arg(long)]
        catalog: Option<String>,
        /// Répertoire de référentiels : charge `<dir>/<id>.json`
        #[arg(long, requires = "id")]
        dir: Option<String>,
        #[arg(long, requires = "dir")]
        id: Option<String>,
    },

    /// Importer des médecins depuis un CSV
    ImportDoctors {
        #[arg(long)]
        csv: String,
    },

    /// Importer des stations depuis un CSV
    ImportStations {
        #[arg(long)]
        csv: String,
    },

    /// Générer les gardes sur une période (une par station et par jour)
    Generate {
        /// Date de début (YYYY-MM-DD, incluse)
        #[arg(long)]
        start: String,
        /// Date de fin (YYYY-MM-DD, incluse)
        #[arg(long)]
        end: String,
        /// Médecins exclus de la génération : "nom1,nom2,..."
        #[arg(long)]
        exclude: Option<String>,
    },

    /// Lister et optionnellement exporter
    List {
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Charges par médecin et couvertures par station
    Report,

    /// Vérifier les gardes du planning (groupes, chevauchements)
    Check {
        /// Export CSV des conflits (optionnel)
        #[arg(long)]
        report: Option<String>,
    },

    /// Générer un rappel texte pour la prochaine garde d'un médecin
    Notify {
        #[arg(long)]
        name: String,
        #[arg(long, default_value_t = 2)]
        days_before: i64,
        /// Fichier de sortie (texte brut)
        #[arg(long)]
        out: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.planning)?;
    let mut planner = match storage.load() {
        Ok(p) => {
            let mut planner = Planner::new();
            *planner.planning_mut() = p;
            planner
        }
        Err(_) => Planner::new(),
    };

    let code = match cli.cmd {
        Commands::Seed { catalog, dir, id } => {
            let loaded = match (catalog, dir, id) {
                (Some(path), _, _) => catalog::load_catalog_from_file(path)?,
                (None, Some(dir), Some(id)) => CatalogStore::new(dir).load(&id)?,
                _ => catalog::default_catalog(),
            };
            *planner.planning_mut() = loaded.into_planning();
            storage.save(planner.planning())?;
            println!(
                "Planning initialisé : {} station(s), {} médecin(s)",
                planner.planning().stations.len(),
                planner.planning().doctors.len()
            );
            0
        }
        Commands::ImportDoctors { csv } => {
            let doctors = io::import_doctors_csv(csv)?;
            planner.add_doctors(doctors);
            storage.save(planner.planning())?;
            0
        }
        Commands::ImportStations { csv } => {
            let stations = io::import_stations_csv(csv)?;
            planner.add_stations(stations);
            storage.save(planner.planning())?;
            0
        }
        Commands::Generate {
            start,
            end,
            exclude,
        } => {
            let start: NaiveDate = start.parse()?;
            let end: NaiveDate = end.parse()?;

            let mut excluded: HashSet<DoctorId> = HashSet::new();
            if let Some(list) = exclude {
                for name in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                    let doctor = planner
                        .planning()
                        .find_doctor_by_name(name)
                        .ok_or_else(|| anyhow::anyhow!("unknown doctor: {}", name))?;
                    excluded.insert(doctor.id.clone());
                }
            }

            let report = planner.generate(start, end, &excluded)?;
            let emitted = report.shifts.len();
            let unfilled = report.unfilled.len();
            planner.adopt(&report);
            storage.save(planner.planning())?;

            println!("{emitted} garde(s) émise(s), {unfilled} créneau(x) vacant(s)");
            for slot in &report.unfilled {
                let station = planner
                    .planning()
                    .find_station_by_id(&slot.station)
                    .map(|s| s.name.as_str())
                    .unwrap_or_else(|| slot.station.as_str());
                eprintln!("vacant: {} | {}", slot.date, station);
            }
            // Code 2 = WARNING/INCOMPLETE
            if unfilled > 0 {
                2
            } else {
                0
            }
        }
        Commands::List { out_json, out_csv } => {
            if let Some(path) = out_json {
                io::export_planning_json(path, planner.planning())?;
            }
            if let Some(path) = out_csv {
                io::export_shifts_csv(path, planner.planning())?;
            }
            // impression compacte
            for s in &planner.planning().shifts {
                let station = planner
                    .planning()
                    .find_station_by_id(&s.station)
                    .map(|st| st.name.as_str())
                    .unwrap_or("-");
                let doctor = planner
                    .planning()
                    .find_doctor_by_id(&s.doctor)
                    .map(|d| d.name.as_str())
                    .unwrap_or("-");
                println!(
                    "{} | {} | {} → {} | {} | {}",
                    s.date,
                    s.kind.as_str(),
                    s.start.to_rfc3339(),
                    s.end.to_rfc3339(),
                    station,
                    doctor
                );
            }
            0
        }
        Commands::Report => {
            println!("Médecins (total / semaine / week-end) :");
            for load in report::doctor_loads(planner.planning()) {
                println!(
                    "  {} | {} | {} | {}",
                    load.name, load.total, load.weekday, load.weekend
                );
            }
            println!("Stations (total / semaine / week-end) :");
            for load in report::station_loads(planner.planning()) {
                println!(
                    "  {} | {} | {} | {}",
                    load.name, load.total, load.weekday, load.weekend
                );
            }
            0
        }
        Commands::Check { report } => {
            let conflicts = planner.detect_conflicts();
            if conflicts.is_empty() {
                println!("OK: no conflicts");
                0
            } else {
                eprintln!("Found {} conflict(s)", conflicts.len());
                if let Some(path) = report {
                    // CSV simple
                    let mut w = csv::Writer::from_path(path)?;
                    w.write_record(["doctor_id", "shift_a", "shift_b", "kind"])?;
                    for c in &conflicts {
                        w.write_record([
                            c.doctor.as_str(),
                            c.shift_a.as_str(),
                            c.shift_b.as_ref().map(|s| s.as_str()).unwrap_or(""),
                            match c.kind {
                                ConflictKind::GroupMismatch => "group",
                                ConflictKind::Overlap => "overlap",
                            },
                        ])?;
                    }
                    w.flush()?;
                }
                // Code 2 = WARNING/INCOMPLETE
                2
            }
        }
        Commands::Notify {
            name,
            days_before,
            out,
        } => {
            let renderer = TextReminder;
            let reminder = prepare_reminder(
                planner.planning(),
                &name,
                days_before,
                Utc::now(),
                &renderer,
            )?;
            std::fs::write(&out, reminder.content)?;
            println!(
                "Reminder generated for {} (shift {}) at {}",
                reminder.doctor_name,
                reminder.shift_id,
                reminder.notice_at.to_rfc3339()
            );
            0
        }
    };

    std::process::exit(code);
}
