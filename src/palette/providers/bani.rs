use crate::bani::catalog;
use crate::command::Command;
use crate::error::AppResult;
use crate::palette::{
    PaletteCandidate, PaletteContext, PaletteInputMode, PaletteKind, PalettePayload,
    PaletteProvider, PaletteSubmitEffect,
};

/// Lists the bani catalog grouped by category.
pub struct BaniPaletteProvider;

impl PaletteProvider for BaniPaletteProvider {
    fn kind(&self) -> PaletteKind {
        PaletteKind::Bani
    }

    fn title(&self, _ctx: &PaletteContext<'_>) -> String {
        "Banis".to_string()
    }

    fn input_mode(&self) -> PaletteInputMode {
        PaletteInputMode::FilterCandidates
    }

    fn list(&self, _ctx: &PaletteContext<'_>) -> AppResult<Vec<PaletteCandidate>> {
        Ok(catalog()
            .map(|bani| PaletteCandidate {
                id: bani.name.to_string(),
                label: bani.name.to_string(),
                detail: Some(format!("{} · {}", bani.category, bani.range_label())),
                payload: PalettePayload::Opaque(bani.name.to_string()),
            })
            .collect())
    }

    fn on_submit(
        &self,
        ctx: &PaletteContext<'_>,
        selected: Option<&PaletteCandidate>,
    ) -> AppResult<PaletteSubmitEffect> {
        if let Some(candidate) = selected
            && let PalettePayload::Opaque(name) = &candidate.payload
        {
            return Ok(PaletteSubmitEffect::Dispatch(Command::LoadBani {
                name: name.clone(),
            }));
        }

        Ok(PaletteSubmitEffect::Reopen {
            kind: self.kind(),
            seed: Some(ctx.input.to_string()),
        })
    }

    fn assistive_text(
        &self,
        _ctx: &PaletteContext<'_>,
        selected: Option<&PaletteCandidate>,
    ) -> Option<String> {
        match selected.and_then(|candidate| candidate.detail.as_deref()) {
            Some(detail) => Some(format!("Enter: open  {detail}")),
            None => Some("no matching bani".to_string()),
        }
    }
}
