//! Share text: a plain multi-line summary of the pool for messaging apps.
//!
//! Lines are in Portuguese, as the product ships them. The per-slip
//! `Volantes:` count is `tickets / MAX_TICKETS_PER_SLIP` rounded down, so a
//! partial slip reads 0.

use bolao_core::{Money, Slip, MAX_TICKETS_PER_SLIP, MIN_PRICE_PER_QUOTA};
use bolao_pipeline::PlanDoc;

use crate::format_brl;

pub fn build_share_text(slips: &[Slip], participants: u32, total_cost: Money) -> String {
    let per_participant = total_cost.per_quota(participants);

    let mut lines: Vec<String> = vec![
        "*Bolao da Mega-Sena*".into(),
        String::new(),
        format!("Participantes: {participants}"),
        format!("Contribuição por Participante: {}", format_brl(per_participant)),
        format!("Valor Total: {}", format_brl(total_cost)),
        format!("Total de Volantes: {}", slips.len()),
        String::new(),
        "*Detalhes dos Volantes:*".into(),
    ];

    for slip in slips {
        let status = if slip.is_valid { "OK" } else { "ATENCAO" };
        lines.push(String::new());
        lines.push(format!("{status} - *{} dezenas*", slip.choices().unwrap_or(0)));
        lines.push(format!("   - Volantes: {}", slip.ticket_count() / MAX_TICKETS_PER_SLIP));
        lines.push(format!("   - Jogos: {}", slip.ticket_count()));
        lines.push(format!("   - Custo: {}", format_brl(slip.total_cost)));
        lines.push(format!("   - Preco por cota: {}", format_brl(slip.price_per_quota)));
        if !slip.is_valid {
            lines.push(format!(
                "   ATENCAO: Preco por cota abaixo do minimo ({})",
                format_brl(MIN_PRICE_PER_QUOTA)
            ));
        }
    }

    if slips.iter().any(|s| !s.is_valid) {
        lines.push(String::new());
        lines.push(format!(
            "*ATENCAO:* Alguns volantes tem preco por cota abaixo do minimo de {}",
            format_brl(MIN_PRICE_PER_QUOTA)
        ));
    }

    lines.join("\n")
}

/// Share text for a plan; `None` when nothing is selected.
pub fn share_text_for(doc: &PlanDoc) -> Option<String> {
    let pool = doc.pool.as_ref()?;
    Some(build_share_text(&pool.slips, doc.inputs.participants, pool.total_cost))
}
