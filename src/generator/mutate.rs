use super::{types::RotaError, util};
use crate::model::{Dataset, MemberId, RotaResult, ShiftId};
use chrono::{Datelike, NaiveDate};
use tracing::debug;

pub(super) fn swap(
    rota: &mut RotaResult,
    dataset: &Dataset,
    date: NaiveDate,
    shift_id: &ShiftId,
    from: &MemberId,
    to: &MemberId,
) -> Result<(), RotaError> {
    let Some(pos) = rota
        .entries
        .iter()
        .position(|e| e.date == date && &e.shift_id == shift_id)
    else {
        return Err(RotaError::UnknownEntry {
            date,
            shift: shift_id.as_str().to_string(),
        });
    };

    let member = dataset
        .find_member(to)
        .ok_or_else(|| RotaError::UnknownMember(to.as_str().to_string()))?;
    let shift = dataset
        .find_shift(shift_id)
        .ok_or_else(|| RotaError::UnknownShift(shift_id.as_str().to_string()))?;

    {
        let entry = &rota.entries[pos];
        if !entry.assigned.contains(from) {
            return Err(RotaError::SwapInvalid("member not assigned to this entry"));
        }
        if entry.assigned.contains(to) {
            return Err(RotaError::SwapInvalid(
                "replacement already assigned to this entry",
            ));
        }
    }

    if !member.can_work(shift_id, date.weekday()) {
        return Err(RotaError::SwapInvalid(
            "replacement not eligible or unavailable",
        ));
    }
    if dataset
        .leaves
        .iter()
        .any(|l| &l.member_id == to && l.covers(date))
    {
        return Err(RotaError::SwapInvalid("replacement on leave"));
    }

    // Autres entrées du même jour où `to` est déjà pris : refus si chevauchement.
    let window = shift.window();
    let double_booked = rota.entries.iter().enumerate().any(|(i, e)| {
        if i == pos || e.date != date || !e.assigned.contains(to) {
            return false;
        }
        dataset
            .find_shift(&e.shift_id)
            .map(|other| util::overlaps(window, other.window()))
            .unwrap_or(false)
    });
    if double_booked {
        return Err(RotaError::SwapInvalid("introduces double-booking"));
    }

    let entry = &mut rota.entries[pos];
    entry.assigned.retain(|m| m != from);
    entry.assigned.push(to.clone());
    entry.assigned.sort();
    debug!(
        date = %date,
        shift = shift_id.as_str(),
        from = from.as_str(),
        to = to.as_str(),
        "swap applied"
    );
    Ok(())
}
