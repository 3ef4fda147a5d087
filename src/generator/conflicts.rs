use super::{types::Violation, util};
use crate::model::{Dataset, RotaResult};
use chrono::Datelike;

pub(super) fn detect_violations(rota: &RotaResult, dataset: &Dataset) -> Vec<Violation> {
    let mut out = Vec::new();

    for entry in &rota.entries {
        let Some(shift) = dataset.find_shift(&entry.shift_id) else {
            out.push(Violation::UnknownReference {
                date: entry.date,
                shift: entry.shift_id.clone(),
                member: None,
            });
            continue;
        };

        if entry.assigned.len() > shift.headcount as usize {
            out.push(Violation::OverHeadcount {
                date: entry.date,
                shift: entry.shift_id.clone(),
                assigned: entry.assigned.len(),
                headcount: shift.headcount,
            });
        }

        for member_id in &entry.assigned {
            let Some(member) = dataset.find_member(member_id) else {
                out.push(Violation::UnknownReference {
                    date: entry.date,
                    shift: entry.shift_id.clone(),
                    member: Some(member_id.clone()),
                });
                continue;
            };
            if !member.can_work(&shift.id, entry.date.weekday()) {
                out.push(Violation::NotEligible {
                    date: entry.date,
                    member: member_id.clone(),
                    shift: entry.shift_id.clone(),
                });
            }
            if dataset
                .leaves
                .iter()
                .any(|l| &l.member_id == member_id && l.covers(entry.date))
            {
                out.push(Violation::OnLeave {
                    date: entry.date,
                    member: member_id.clone(),
                    shift: entry.shift_id.clone(),
                });
            }
        }
    }

    // Chevauchements : paires d'entrées du même jour partageant un membre.
    for (idx, a) in rota.entries.iter().enumerate() {
        let Some(shift_a) = dataset.find_shift(&a.shift_id) else {
            continue;
        };
        for b in rota.entries.iter().skip(idx + 1) {
            if b.date != a.date {
                continue;
            }
            let Some(shift_b) = dataset.find_shift(&b.shift_id) else {
                continue;
            };
            if !util::overlaps(shift_a.window(), shift_b.window()) {
                continue;
            }
            for member in &a.assigned {
                if b.assigned.contains(member) {
                    out.push(Violation::DoubleBooking {
                        date: a.date,
                        member: member.clone(),
                        shift_a: a.shift_id.clone(),
                        shift_b: b.shift_id.clone(),
                    });
                }
            }
        }
    }

    out
}
