/// Chevauchement strict de deux fenêtres en secondes depuis minuit.
/// Les fenêtres passant minuit arrivent déjà étendues (+24 h côté fin).
pub(super) fn overlaps(a: (u32, u32), b: (u32, u32)) -> bool {
    a.0 < b.1 && b.0 < a.1
}
