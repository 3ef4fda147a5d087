use crate::model::{MemberId, ShiftId};
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RotaError {
    #[error("invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
    #[error("unknown member: {0}")]
    UnknownMember(String),
    #[error("unknown shift: {0}")]
    UnknownShift(String),
    #[error("no rota entry for shift {shift} on {date}")]
    UnknownEntry { date: NaiveDate, shift: String },
    #[error("swap invalid: {0}")]
    SwapInvalid(&'static str),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Anomalie relevée en vérifiant une rota contre son jeu de données.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// Même membre sur deux fenêtres qui se chevauchent le même jour.
    DoubleBooking {
        date: NaiveDate,
        member: MemberId,
        shift_a: ShiftId,
        shift_b: ShiftId,
    },
    /// Membre affecté alors qu'un congé couvre la date.
    OnLeave {
        date: NaiveDate,
        member: MemberId,
        shift: ShiftId,
    },
    /// Membre non éligible au créneau ou indisponible ce jour-là.
    NotEligible {
        date: NaiveDate,
        member: MemberId,
        shift: ShiftId,
    },
    /// Plus d'affectés que l'effectif requis.
    OverHeadcount {
        date: NaiveDate,
        shift: ShiftId,
        assigned: usize,
        headcount: u32,
    },
    /// L'entrée référence un créneau ou un membre absent du jeu de données.
    UnknownReference {
        date: NaiveDate,
        shift: ShiftId,
        member: Option<MemberId>,
    },
}

impl Violation {
    /// Étiquette courte pour les rapports CSV.
    pub fn kind(&self) -> &'static str {
        match self {
            Violation::DoubleBooking { .. } => "double_booking",
            Violation::OnLeave { .. } => "on_leave",
            Violation::NotEligible { .. } => "not_eligible",
            Violation::OverHeadcount { .. } => "over_headcount",
            Violation::UnknownReference { .. } => "unknown_reference",
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Violation::DoubleBooking {
                date,
                member,
                shift_a,
                shift_b,
            } => write!(
                f,
                "{date}: member {} double-booked on {} and {}",
                member.as_str(),
                shift_a.as_str(),
                shift_b.as_str()
            ),
            Violation::OnLeave {
                date,
                member,
                shift,
            } => write!(
                f,
                "{date}: member {} assigned to {} while on leave",
                member.as_str(),
                shift.as_str()
            ),
            Violation::NotEligible {
                date,
                member,
                shift,
            } => write!(
                f,
                "{date}: member {} not eligible for {}",
                member.as_str(),
                shift.as_str()
            ),
            Violation::OverHeadcount {
                date,
                shift,
                assigned,
                headcount,
            } => write!(
                f,
                "{date}: shift {} has {assigned} assigned for headcount {headcount}",
                shift.as_str()
            ),
            Violation::UnknownReference {
                date,
                shift,
                member,
            } => match member {
                Some(m) => write!(
                    f,
                    "{date}: entry for {} references unknown member {}",
                    shift.as_str(),
                    m.as_str()
                ),
                None => write!(f, "{date}: entry references unknown shift {}", shift.as_str()),
            },
        }
    }
}
