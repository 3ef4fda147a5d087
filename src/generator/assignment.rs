use super::{types::RotaError, util};
use crate::model::{LeaveInterval, Member, MemberId, RotaEntry, RotaResult, ShiftDefinition};
use anyhow::Context;
use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;
use tracing::{debug, warn};

pub(super) fn generate(
    members: &[Member],
    shifts: &[ShiftDefinition],
    leaves: &[LeaveInterval],
    start: NaiveDate,
    end: NaiveDate,
) -> Result<RotaResult, RotaError> {
    validate(members, shifts, leaves, start, end)?;

    let mut ordered: Vec<&ShiftDefinition> = shifts.iter().collect();
    ordered.sort_by(|a, b| a.id.cmp(&b.id));

    // Charge par membre sur toute la génération (équilibrage).
    let mut loads: HashMap<&MemberId, u32> = members.iter().map(|m| (&m.id, 0u32)).collect();
    let mut entries = Vec::new();

    let mut date = start;
    loop {
        let weekday = date.weekday();
        // Fenêtres déjà prises ce jour-là, pour bloquer les chevauchements.
        let mut booked: Vec<(&MemberId, (u32, u32))> = Vec::new();

        for shift in &ordered {
            if !shift.runs_on(weekday) {
                continue;
            }
            let window = shift.window();

            let mut pool: Vec<&Member> = members
                .iter()
                .filter(|m| m.can_work(&shift.id, weekday))
                .filter(|m| !leaves.iter().any(|l| l.member_id == m.id && l.covers(date)))
                .filter(|m| {
                    !booked
                        .iter()
                        .any(|(id, w)| *id == &m.id && util::overlaps(*w, window))
                })
                .collect();

            // Le moins chargé d'abord, puis id croissant : sortie reproductible.
            pool.sort_by(|a, b| {
                loads[&a.id]
                    .cmp(&loads[&b.id])
                    .then_with(|| a.id.cmp(&b.id))
            });

            let take = (shift.headcount as usize).min(pool.len());
            for m in &pool[..take] {
                *loads.entry(&m.id).or_insert(0) += 1;
                booked.push((&m.id, window));
            }
            let mut assigned: Vec<MemberId> = pool[..take].iter().map(|m| m.id.clone()).collect();
            assigned.sort();

            let shortage = shift.headcount - take as u32;
            if shortage > 0 {
                warn!(
                    date = %date,
                    shift = shift.id.as_str(),
                    shortage,
                    "shift instance is short-staffed"
                );
            } else {
                debug!(date = %date, shift = shift.id.as_str(), assigned = take, "shift instance filled");
            }

            entries.push(RotaEntry {
                date,
                shift_id: shift.id.clone(),
                shift_name: shift.name.clone(),
                assigned,
                shortage,
            });
        }

        if date == end {
            break;
        }
        date = date.succ_opt().context("date overflow")?;
    }

    Ok(RotaResult { entries })
}

/// Passe de validation avant toute affectation : aucune rota partielle
/// n'est produite si les entrées sont incohérentes.
fn validate(
    members: &[Member],
    shifts: &[ShiftDefinition],
    leaves: &[LeaveInterval],
    start: NaiveDate,
    end: NaiveDate,
) -> Result<(), RotaError> {
    if start > end {
        return Err(RotaError::InvalidRange { start, end });
    }
    for leave in leaves {
        if !members.iter().any(|m| m.id == leave.member_id) {
            return Err(RotaError::UnknownMember(
                leave.member_id.as_str().to_string(),
            ));
        }
    }
    for member in members {
        for sid in &member.shifts {
            if !shifts.iter().any(|s| &s.id == sid) {
                return Err(RotaError::UnknownShift(sid.as_str().to_string()));
            }
        }
    }
    Ok(())
}
