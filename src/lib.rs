#![forbid(unsafe_code)]
//! Rota — bibliothèque de génération de rotas d'équipe locale (sans BD).
//!
//! - Stockage fichiers (JSON/CSV).
//! - Génération déterministe : équilibrage de charge, départage par id.
//! - Congés, double affectation et sous-effectif gérés ; swaps sûrs.
//! - Dates et heures naïves ; l'interprétation des fuseaux reste hors lib.

pub mod generator;
pub mod io;
pub mod model;
pub mod notification;
pub mod storage;

pub use generator::{detect_violations, generate, swap, RotaError, Violation};
pub use model::{
    Dataset, LeaveInterval, Member, MemberId, RotaEntry, RotaResult, ShiftDefinition, ShiftId,
};
pub use notification::{prepare_notice, Notice, NoticeRenderer, TextNotice};
pub use storage::{JsonStorage, Storage};
