mod assignment;
mod conflicts;
mod mutate;
mod types;
mod util;

pub use types::{RotaError, Violation};

use crate::model::{
    Dataset, LeaveInterval, Member, MemberId, RotaResult, ShiftDefinition, ShiftId,
};
use chrono::NaiveDate;

/// Génère une rota déterministe sur `[start, end]` (bornes incluses).
///
/// Fonction pure : aucune entrée n'est modifiée, aucun état ne survit à
/// l'appel. Mêmes entrées, même sortie. Les instances en sous-effectif sont
/// rapportées via `shortage`, jamais comme erreur ; seules une plage
/// inversée ou une référence inconnue font échouer l'appel, avant toute
/// affectation.
pub fn generate(
    members: &[Member],
    shifts: &[ShiftDefinition],
    leaves: &[LeaveInterval],
    start: NaiveDate,
    end: NaiveDate,
) -> Result<RotaResult, RotaError> {
    assignment::generate(members, shifts, leaves, start, end)
}

/// Vérifie une rota existante contre un jeu de données.
pub fn detect_violations(rota: &RotaResult, dataset: &Dataset) -> Vec<Violation> {
    conflicts::detect_violations(rota, dataset)
}

/// Remplace `from` par `to` sur l'entrée (date, créneau), avec revalidation
/// complète du remplaçant (éligibilité, congés, chevauchements du jour).
pub fn swap(
    rota: &mut RotaResult,
    dataset: &Dataset,
    date: NaiveDate,
    shift: &ShiftId,
    from: &MemberId,
    to: &MemberId,
) -> Result<(), RotaError> {
    mutate::swap(rota, dataset, date, shift, from, to)
}
