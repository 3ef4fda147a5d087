use crate::model::{Dataset, Member, MemberId, RotaEntry, RotaResult};
use anyhow::{bail, Context, Result};

/// Avis de service généré pour un membre.
#[derive(Debug, Clone)]
pub struct Notice {
    pub member_id: MemberId,
    pub member_name: String,
    pub duty_count: usize,
    pub content: String,
}

/// Permet de customiser le rendu du message (texte, SMS, etc.).
pub trait NoticeRenderer {
    fn render(&self, member: &Member, duties: &[&RotaEntry]) -> String;
}

/// Gabarit texte simple destiné à un futur mail/SMS.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextNotice;

impl NoticeRenderer for TextNotice {
    fn render(&self, member: &Member, duties: &[&RotaEntry]) -> String {
        let mut out = format!(
            "Bonjour {name},\n\nTes affectations sur la rota :\n",
            name = member.name
        );
        for duty in duties {
            out.push_str(&format!(
                "  - {date} : {shift}\n",
                date = duty.date,
                shift = duty.shift_name
            ));
        }
        out.push_str("\nMerci de vérifier tes disponibilités et de signaler tout conflit.\n");
        out
    }
}

/// Prépare l'avis de service d'un membre à partir d'une rota générée.
pub fn prepare_notice(
    rota: &RotaResult,
    dataset: &Dataset,
    member_id: &MemberId,
    renderer: &dyn NoticeRenderer,
) -> Result<Notice> {
    let member = dataset
        .find_member(member_id)
        .with_context(|| format!("unknown member id: {}", member_id.as_str()))?;

    let duties = rota.duties_for(&member.id);
    if duties.is_empty() {
        bail!("no duty found for member {}", member.name);
    }

    let content = renderer.render(member, &duties);
    Ok(Notice {
        member_id: member.id.clone(),
        member_name: member.name.clone(),
        duty_count: duties.len(),
        content,
    })
}
