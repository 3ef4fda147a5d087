use anyhow::{bail, Result};
use chrono::{NaiveDate, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifiant fort pour Member
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MemberId(String);

impl MemberId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifiant fort pour ShiftDefinition
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ShiftId(String);

impl ShiftId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Membre d'équipe planifiable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    /// Types de créneaux que le membre peut tenir.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shifts: Vec<ShiftId>,
    /// Jours de la semaine où le membre est disponible.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub days: Vec<Weekday>,
}

impl Member {
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self {
            id: MemberId::random(),
            name: name.into(),
            shifts: Vec::new(),
            days: Vec::new(),
        }
    }

    /// Éligible pour ce créneau et disponible ce jour de semaine.
    pub fn can_work(&self, shift: &ShiftId, day: Weekday) -> bool {
        self.shifts.contains(shift) && self.days.contains(&day)
    }
}

/// Congé d'un membre (intervalle de dates inclusif).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveInterval {
    pub member_id: MemberId,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl LeaveInterval {
    pub fn new(member_id: MemberId, start: NaiveDate, end: NaiveDate) -> Result<Self, String> {
        if end < start {
            return Err("leave end must not precede start".to_string());
        }
        Ok(Self {
            member_id,
            start,
            end,
        })
    }

    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Nombre de jours couverts, bornes incluses.
    pub fn days(&self) -> i64 {
        self.end.signed_duration_since(self.start).num_days() + 1
    }
}

/// Définition de créneau récurrent (heures naïves, effectif requis)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftDefinition {
    pub id: ShiftId,
    pub name: String,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub headcount: u32,
    /// Jours de la semaine où le créneau a lieu.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub days: Vec<Weekday>,
}

impl ShiftDefinition {
    /// Crée un créneau en validant la fenêtre et l'effectif.
    pub fn new(
        name: String,
        start: NaiveTime,
        end: NaiveTime,
        headcount: u32,
    ) -> Result<Self, String> {
        if start == end {
            return Err("start and end cannot be equal".to_string());
        }
        if headcount == 0 {
            return Err("headcount must be at least 1".to_string());
        }
        Ok(Self {
            id: ShiftId::random(),
            name,
            start,
            end,
            headcount,
            days: Vec::new(),
        })
    }

    pub fn runs_on(&self, day: Weekday) -> bool {
        self.days.contains(&day)
    }

    /// Fenêtre en secondes depuis minuit ; une fin <= début passe minuit.
    pub fn window(&self) -> (u32, u32) {
        let start = self.start.num_seconds_from_midnight();
        let mut end = self.end.num_seconds_from_midnight();
        if end <= start {
            end += 24 * 60 * 60;
        }
        (start, end)
    }

    /// Durée en minutes.
    pub fn duration_minutes(&self) -> i64 {
        let (start, end) = self.window();
        i64::from(end - start) / 60
    }
}

/// Jeu de données complet : membres, créneaux, congés.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Dataset {
    pub members: Vec<Member>,
    pub shifts: Vec<ShiftDefinition>,
    pub leaves: Vec<LeaveInterval>,
}

impl Dataset {
    pub fn find_member<'a>(&'a self, id: &MemberId) -> Option<&'a Member> {
        self.members.iter().find(|m| &m.id == id)
    }
    pub fn find_member_by_name<'a>(&'a self, name: &str) -> Option<&'a Member> {
        self.members.iter().find(|m| m.name == name)
    }
    pub fn find_shift<'a>(&'a self, id: &ShiftId) -> Option<&'a ShiftDefinition> {
        self.shifts.iter().find(|s| &s.id == id)
    }
    pub fn find_shift_by_name<'a>(&'a self, name: &str) -> Option<&'a ShiftDefinition> {
        self.shifts.iter().find(|s| s.name == name)
    }

    /// Génère la rota sur `[start, end]` à partir de ce jeu de données.
    pub fn generate(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<RotaResult, crate::generator::RotaError> {
        crate::generator::generate(&self.members, &self.shifts, &self.leaves, start, end)
    }

    /// Valide les entrées dynamiques (formulaires, CSV) avant génération.
    pub fn validate(&self) -> Result<()> {
        for (i, m) in self.members.iter().enumerate() {
            if m.name.trim().is_empty() {
                bail!("member name cannot be empty");
            }
            if self.members[..i].iter().any(|o| o.id == m.id) {
                bail!("duplicate member id: {}", m.id.as_str());
            }
            for sid in &m.shifts {
                if self.find_shift(sid).is_none() {
                    bail!(
                        "member {} references unknown shift id: {}",
                        m.name,
                        sid.as_str()
                    );
                }
            }
        }
        for (i, s) in self.shifts.iter().enumerate() {
            if s.name.trim().is_empty() {
                bail!("shift name cannot be empty");
            }
            if s.headcount == 0 {
                bail!("shift {} must require at least one member", s.name);
            }
            if s.start == s.end {
                bail!("shift {} start and end cannot be equal", s.name);
            }
            if s.days.is_empty() {
                bail!("shift {} must define at least one day", s.name);
            }
            if self.shifts[..i].iter().any(|o| o.id == s.id) {
                bail!("duplicate shift id: {}", s.id.as_str());
            }
        }
        for (i, l) in self.leaves.iter().enumerate() {
            if l.end < l.start {
                bail!(
                    "leave end {} precedes start {} for member {}",
                    l.end,
                    l.start,
                    l.member_id.as_str()
                );
            }
            if self.find_member(&l.member_id).is_none() {
                bail!(
                    "leave references unknown member id: {}",
                    l.member_id.as_str()
                );
            }
            let overlapping = self.leaves[..i]
                .iter()
                .any(|o| o.member_id == l.member_id && o.start <= l.end && l.start <= o.end);
            if overlapping {
                bail!(
                    "leave {} / {} overlaps an existing leave for member {}",
                    l.start,
                    l.end,
                    l.member_id.as_str()
                );
            }
        }
        Ok(())
    }
}

/// Instance de créneau datée avec ses affectations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotaEntry {
    pub date: NaiveDate,
    pub shift_id: ShiftId,
    pub shift_name: String,
    /// Identifiants des membres affectés, triés par ordre croissant.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assigned: Vec<MemberId>,
    /// Effectif manquant (`headcount - affectés`), 0 si complet.
    #[serde(default)]
    pub shortage: u32,
}

/// Rota générée : séquence ordonnée par (date, id de créneau).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RotaResult {
    pub entries: Vec<RotaEntry>,
}

impl RotaResult {
    pub fn total_shortage(&self) -> u32 {
        self.entries.iter().map(|e| e.shortage).sum()
    }

    pub fn is_fully_staffed(&self) -> bool {
        self.entries.iter().all(|e| e.shortage == 0)
    }

    pub fn entry<'a>(&'a self, date: NaiveDate, shift: &ShiftId) -> Option<&'a RotaEntry> {
        self.entries
            .iter()
            .find(|e| e.date == date && &e.shift_id == shift)
    }

    pub fn duties_for<'a>(&'a self, member: &MemberId) -> Vec<&'a RotaEntry> {
        self.entries
            .iter()
            .filter(|e| e.assigned.contains(member))
            .collect()
    }
}
