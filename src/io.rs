use crate::model::{LeaveInterval, Member, MemberId, RotaResult, ShiftDefinition, ShiftId};
use anyhow::{bail, Context};
use chrono::{NaiveDate, NaiveTime, Weekday};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::Path;

/// Import de membres depuis CSV: header `id,name,shifts,days`
/// (`shifts` et `days` séparés par `;` ; id vide = id aléatoire)
pub fn import_members_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Member>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let id = rec.get(0).context("missing id")?.trim();
        let name = rec.get(1).context("missing name")?.trim();
        if name.is_empty() {
            bail!("invalid member row (empty name)");
        }
        let mut member = Member::new(name.to_string());
        if !id.is_empty() {
            member.id = MemberId::new(id);
        }
        if let Some(shifts) = rec.get(2) {
            member.shifts = parse_shift_ids(shifts);
        }
        if let Some(days) = rec.get(3) {
            let days = days.trim();
            if !days.is_empty() {
                member.days = parse_days(days)
                    .with_context(|| format!("invalid days value for member {name}"))?;
            }
        }
        out.push(member);
    }
    Ok(out)
}

fn parse_shift_ids(raw: &str) -> Vec<ShiftId> {
    raw.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ShiftId::new)
        .collect()
}

/// Jours de semaine depuis une liste `mon;tue` (noms ou numéros 1..7).
pub fn parse_days(raw: &str) -> anyhow::Result<Vec<Weekday>> {
    let mut out = Vec::new();
    for chunk in raw
        .split([';', ','])
        .map(str::trim)
        .filter(|c| !c.is_empty())
    {
        let day = parse_weekday(chunk)?;
        if !out.contains(&day) {
            out.push(day);
        }
    }
    Ok(out)
}

pub fn parse_weekday(raw: &str) -> anyhow::Result<Weekday> {
    Ok(match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "mon" | "monday" => Weekday::Mon,
        "2" | "tue" | "tuesday" => Weekday::Tue,
        "3" | "wed" | "wednesday" => Weekday::Wed,
        "4" | "thu" | "thursday" => Weekday::Thu,
        "5" | "fri" | "friday" => Weekday::Fri,
        "6" | "sat" | "saturday" => Weekday::Sat,
        "7" | "sun" | "sunday" => Weekday::Sun,
        _ => bail!("invalid weekday: {raw}"),
    })
}

/// Jeton stable pour l'export et l'affichage des jours.
pub fn day_token(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "mon",
        Weekday::Tue => "tue",
        Weekday::Wed => "wed",
        Weekday::Thu => "thu",
        Weekday::Fri => "fri",
        Weekday::Sat => "sat",
        Weekday::Sun => "sun",
    }
}

/// Heure `HH:MM`.
pub fn parse_time(raw: &str) -> anyhow::Result<NaiveTime> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M")
        .with_context(|| format!("invalid time (expected HH:MM): {raw}"))
}

/// Date `YYYY-MM-DD`.
pub fn parse_date(raw: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .with_context(|| format!("invalid date (expected YYYY-MM-DD): {raw}"))
}

/// Import de créneaux: header `id,name,start,end,headcount,days`
pub fn import_shifts_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<ShiftDefinition>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let id = rec.get(0).context("missing id")?.trim();
        let name = rec.get(1).context("missing name")?.trim().to_string();
        if name.is_empty() {
            bail!("invalid shift row (empty name)");
        }
        let start = parse_time(rec.get(2).context("missing start")?)?;
        let end = parse_time(rec.get(3).context("missing end")?)?;
        let headcount: u32 = rec
            .get(4)
            .context("missing headcount")?
            .trim()
            .parse()
            .with_context(|| format!("invalid headcount for shift {name}"))?;
        let mut shift =
            ShiftDefinition::new(name, start, end, headcount).map_err(anyhow::Error::msg)?;
        if !id.is_empty() {
            shift.id = ShiftId::new(id);
        }
        if let Some(days) = rec.get(5) {
            let days = days.trim();
            if !days.is_empty() {
                shift.days = parse_days(days)
                    .with_context(|| format!("invalid days value for shift {}", shift.name))?;
            }
        }
        out.push(shift);
    }
    Ok(out)
}

/// Import de congés: header `member_id,start,end` (dates `YYYY-MM-DD`)
pub fn import_leaves_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<LeaveInterval>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let member = rec.get(0).context("missing member_id")?.trim();
        if member.is_empty() {
            bail!("invalid leave row (empty member_id)");
        }
        let start = parse_date(rec.get(1).context("missing start")?)?;
        let end = parse_date(rec.get(2).context("missing end")?)?;
        let leave = LeaveInterval::new(MemberId::new(member), start, end)
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("invalid leave for member {member}"))?;
        out.push(leave);
    }
    Ok(out)
}

/// Export JSON de la rota (jolie mise en forme)
pub fn export_rota_json<P: AsRef<Path>>(path: P, rota: &RotaResult) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(rota)?;
    fs::write(path, s)?;
    Ok(())
}

/// Recharge une rota exportée en JSON.
pub fn load_rota_json<P: AsRef<Path>>(path: P) -> anyhow::Result<RotaResult> {
    let data =
        fs::read(&path).with_context(|| format!("reading {}", path.as_ref().display()))?;
    let rota = serde_json::from_slice(&data).with_context(|| "parsing rota json")?;
    Ok(rota)
}

/// Export CSV de la rota: header `date,shift_id,shift_name,assigned,shortage`
/// (`assigned` = ids de membres séparés par `;`)
pub fn export_rota_csv<P: AsRef<Path>>(path: P, rota: &RotaResult) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["date", "shift_id", "shift_name", "assigned", "shortage"])?;
    let mut buf = itoa::Buffer::new();
    for e in &rota.entries {
        let date = e.date.to_string();
        let assigned = e
            .assigned
            .iter()
            .map(MemberId::as_str)
            .collect::<Vec<_>>()
            .join(";");
        w.write_record([
            date.as_str(),
            e.shift_id.as_str(),
            e.shift_name.as_str(),
            assigned.as_str(),
            buf.format(e.shortage),
        ])?;
    }
    w.flush()?;
    Ok(())
}
