use crate::model::{Doctor, Planning, Station, MAX_GROUP};
use anyhow::{bail, Context};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::Path;

/// Import de médecins depuis CSV: header `name,email,specialty,group`
pub fn import_doctors_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Doctor>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let name = rec.get(0).context("missing name")?.trim();
        let email = rec.get(1).context("missing email")?.trim();
        let specialty = rec.get(2).context("missing specialty")?.trim();
        let group = rec.get(3).context("missing group")?.trim();
        if name.is_empty() {
            bail!("invalid doctor row (empty name)");
        }
        let group =
            parse_group(group).with_context(|| format!("invalid group for doctor {name}"))?;
        out.push(Doctor::new(name, email, specialty, group));
    }
    Ok(out)
}

fn parse_group(s: &str) -> anyhow::Result<u8> {
    let group: u8 = s.parse().context("expected integer")?;
    if group == 0 || group > MAX_GROUP {
        bail!("group must be within 1..={MAX_GROUP}");
    }
    Ok(group)
}

/// Import de stations: header `name,allowed_groups` (groupes séparés par `|`)
pub fn import_stations_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Station>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let name = rec.get(0).context("missing name")?.trim();
        let groups = rec.get(1).context("missing allowed_groups")?.trim();
        if name.is_empty() {
            bail!("invalid station row (empty name)");
        }
        let groups =
            parse_groups(groups).with_context(|| format!("invalid groups for station {name}"))?;
        out.push(Station::new(name, groups));
    }
    Ok(out)
}

fn parse_groups(raw: &str) -> anyhow::Result<Vec<u8>> {
    let groups: Vec<u8> = raw
        .split('|')
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .map(parse_group)
        .collect::<anyhow::Result<_>>()?;
    if groups.is_empty() {
        bail!("expected at least one group");
    }
    Ok(groups)
}

/// Export JSON du planning (jolie mise en forme)
pub fn export_planning_json<P: AsRef<Path>>(path: P, planning: &Planning) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(planning)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV des gardes: header `id,station,doctor,date,start,end,kind,hours`
pub fn export_shifts_csv<P: AsRef<Path>>(path: P, planning: &Planning) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["id", "station", "doctor", "date", "start", "end", "kind", "hours"])?;
    let mut hours = itoa::Buffer::new();
    for s in &planning.shifts {
        let station = planning
            .find_station_by_id(&s.station)
            .map(|st| st.name.as_str())
            .unwrap_or("");
        let doctor = planning
            .find_doctor_by_id(&s.doctor)
            .map(|d| d.name.as_str())
            .unwrap_or("");
        let date = s.date.to_string();
        let start = s.start.to_rfc3339();
        let end = s.end.to_rfc3339();
        w.write_record([
            s.id.as_str(),
            station,
            doctor,
            date.as_str(),
            start.as_str(),
            end.as_str(),
            s.kind.as_str(),
            hours.format(s.duration_hours()),
        ])?;
    }
    w.flush()?;
    Ok(())
}
