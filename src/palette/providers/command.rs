use crate::command::{ArgSpec, CommandSpec, all_command_specs, find_command_spec};
use crate::command::parse_command_text;
use crate::error::AppResult;
use crate::palette::{
    PaletteCandidate, PaletteContext, PaletteInputMode, PaletteKind, PalettePayload,
    PaletteProvider, PaletteSubmitEffect, PaletteTabEffect,
};

const HINT: &str = "Enter: run  Tab: complete";

pub struct CommandPaletteProvider;

impl PaletteProvider for CommandPaletteProvider {
    fn kind(&self) -> PaletteKind {
        PaletteKind::Command
    }

    fn title(&self, _ctx: &PaletteContext<'_>) -> String {
        "Command".to_string()
    }

    fn input_mode(&self) -> PaletteInputMode {
        PaletteInputMode::Custom
    }

    fn list(&self, ctx: &PaletteContext<'_>) -> AppResult<Vec<PaletteCandidate>> {
        if has_argument_phase(ctx.input) {
            return Ok(Vec::new());
        }

        let mut candidates = all_command_specs()
            .into_iter()
            .filter(|spec| is_relevant(spec.id, ctx))
            .map(|spec| PaletteCandidate {
                id: spec.id.to_string(),
                label: spec.id.to_string(),
                detail: Some(format_detail(spec.title, spec.args)),
                payload: PalettePayload::Opaque(spec.id.to_string()),
            })
            .collect::<Vec<_>>();
        rank_command_candidates(ctx.input, &mut candidates);
        Ok(candidates)
    }

    fn on_submit(
        &self,
        ctx: &PaletteContext<'_>,
        selected: Option<&PaletteCandidate>,
    ) -> AppResult<PaletteSubmitEffect> {
        let input = ctx.input.trim();

        // Full command text with arguments wins over the highlighted row.
        if !input.is_empty()
            && let Ok(command) = parse_command_text(input)
        {
            return Ok(PaletteSubmitEffect::Dispatch(command));
        }

        if let Some(candidate) = selected
            && let Some(spec) = find_command_spec(&candidate.id)
        {
            if spec.args.iter().all(|arg| !arg.required)
                && let Ok(command) = parse_command_text(spec.id)
            {
                return Ok(PaletteSubmitEffect::Dispatch(command));
            }
            return Ok(PaletteSubmitEffect::Reopen {
                kind: self.kind(),
                seed: Some(format!("{} ", spec.id)),
            });
        }

        Ok(PaletteSubmitEffect::Reopen {
            kind: self.kind(),
            seed: Some(ctx.input.to_string()),
        })
    }

    fn on_tab(
        &self,
        _ctx: &PaletteContext<'_>,
        selected: Option<&PaletteCandidate>,
    ) -> AppResult<PaletteTabEffect> {
        let Some(candidate) = selected else {
            return Ok(PaletteTabEffect::Noop);
        };

        let value = match &candidate.payload {
            PalettePayload::Opaque(value) => value.clone(),
            PalettePayload::None => candidate.label.clone(),
        };
        Ok(PaletteTabEffect::SetInput(value))
    }

    fn assistive_text(
        &self,
        ctx: &PaletteContext<'_>,
        _selected: Option<&PaletteCandidate>,
    ) -> Option<String> {
        let trimmed = ctx.input.trim();
        if trimmed.is_empty() {
            return Some(HINT.to_string());
        }

        let command_id = if has_argument_phase(ctx.input) {
            first_token(trimmed)
        } else {
            trimmed
        };
        Some(
            find_command_spec(command_id)
                .map(|spec| spec_summary(&spec))
                .unwrap_or_else(|| HINT.to_string()),
        )
    }
}

fn spec_summary(spec: &CommandSpec) -> String {
    let usage = usage_text(spec.args);
    if usage.is_empty() {
        format!("{} | {}", spec.id, spec.title)
    } else {
        format!("{} {} | {}", spec.id, usage, spec.title)
    }
}

fn format_detail(title: &str, args: &[ArgSpec]) -> String {
    let usage = usage_text(args);
    if usage.is_empty() {
        format!("| {title}")
    } else {
        format!("{usage} | {title}")
    }
}

fn usage_text(args: &[ArgSpec]) -> String {
    args.iter()
        .map(|arg| {
            if arg.required {
                format!("<{}>", arg.name)
            } else {
                format!("[{}]", arg.name)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn has_argument_phase(input: &str) -> bool {
    let trimmed = input.trim_start();
    !trimmed.is_empty() && trimmed.contains(char::is_whitespace)
}

fn first_token(input: &str) -> &str {
    match input.find(char::is_whitespace) {
        Some(index) => &input[..index],
        None => input,
    }
}

/// Hides the pause command that would be a no-op right now.
fn is_relevant(id: &str, ctx: &PaletteContext<'_>) -> bool {
    match id {
        "pause" => !ctx.app.paused,
        "resume" => ctx.app.paused,
        _ => true,
    }
}

const SCORE_ID_EXACT: i32 = 10_000;
const SCORE_ID_PREFIX: i32 = 9_000;
const SCORE_ID_TOKEN_PREFIX: i32 = 8_000;
const SCORE_ID_ACRONYM: i32 = 7_000;
const SCORE_ID_CONTAINS: i32 = 6_000;
const SCORE_ID_SUBSEQUENCE: i32 = 5_000;
const SCORE_TITLE_PREFIX: i32 = 800;
const SCORE_TITLE_CONTAINS: i32 = 700;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CandidateScore {
    score: i32,
    tie_len: usize,
}

fn rank_command_candidates(input: &str, candidates: &mut Vec<PaletteCandidate>) {
    let query = input.trim().to_ascii_lowercase();
    if query.is_empty() {
        return;
    }

    let mut scored = candidates
        .drain(..)
        .filter_map(|candidate| {
            score_command_candidate(&query, &candidate).map(|meta| (candidate, meta))
        })
        .collect::<Vec<_>>();

    scored.sort_by(
        |(left_candidate, left_meta), (right_candidate, right_meta)| {
            right_meta
                .score
                .cmp(&left_meta.score)
                .then_with(|| left_meta.tie_len.cmp(&right_meta.tie_len))
                .then_with(|| left_candidate.id.cmp(&right_candidate.id))
        },
    );

    *candidates = scored
        .into_iter()
        .map(|(candidate, _meta)| candidate)
        .collect();
}

fn score_command_candidate(query: &str, candidate: &PaletteCandidate) -> Option<CandidateScore> {
    let id = candidate.id.to_ascii_lowercase();
    let title = extract_title(candidate).to_ascii_lowercase();

    let id_score = score_id(query, &id);
    let title_score = score_title(query, &title);
    let score = id_score.max(title_score);
    if score <= 0 {
        return None;
    }

    Some(CandidateScore {
        score,
        tie_len: id.len(),
    })
}

fn extract_title(candidate: &PaletteCandidate) -> &str {
    let Some(detail) = candidate.detail.as_deref() else {
        return "";
    };
    let Some((_, title)) = detail.split_once('|') else {
        return "";
    };
    title.trim()
}

fn score_id(query: &str, id: &str) -> i32 {
    if id == query {
        return SCORE_ID_EXACT;
    }
    if id.starts_with(query) {
        return SCORE_ID_PREFIX;
    }
    if token_prefix_match(query, id) {
        return SCORE_ID_TOKEN_PREFIX;
    }
    if acronym_match(query, id) {
        return SCORE_ID_ACRONYM;
    }
    if id.contains(query) {
        return SCORE_ID_CONTAINS;
    }
    if is_subsequence(query, id) {
        return SCORE_ID_SUBSEQUENCE;
    }
    0
}

fn score_title(query: &str, title: &str) -> i32 {
    if title.is_empty() {
        return 0;
    }
    if title.starts_with(query) {
        return SCORE_TITLE_PREFIX;
    }
    if title.contains(query) {
        return SCORE_TITLE_CONTAINS;
    }
    0
}

fn token_prefix_match(query: &str, id: &str) -> bool {
    id.split('-').any(|token| token.starts_with(query))
}

fn acronym_match(query: &str, id: &str) -> bool {
    let acronym = id
        .split('-')
        .filter(|token| !token.is_empty())
        .filter_map(|token| token.chars().next())
        .collect::<String>();
    !acronym.is_empty() && acronym.starts_with(query)
}

fn is_subsequence(query: &str, text: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    let mut query_chars = query.chars();
    let mut current = match query_chars.next() {
        Some(ch) => ch,
        None => return true,
    };

    for text_char in text.chars() {
        if text_char == current {
            if let Some(next) = query_chars.next() {
                current = next;
            } else {
                return true;
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use crate::app::AppState;
    use crate::command::Command;
    use crate::palette::{
        PaletteCandidate, PaletteContext, PaletteKind, PaletteProvider, PaletteSubmitEffect,
    };

    use super::CommandPaletteProvider;

    fn ids(list: &[PaletteCandidate]) -> Vec<String> {
        list.iter().map(|candidate| candidate.id.clone()).collect()
    }

    fn command_list_for_input(input: &str, paused: bool) -> Vec<PaletteCandidate> {
        let app = AppState {
            paused,
            ..AppState::default()
        };
        let ctx = PaletteContext {
            app: &app,
            kind: PaletteKind::Command,
            input,
            seed: None,
        };
        CommandPaletteProvider
            .list(&ctx)
            .expect("list should be built")
    }

    fn submit(input: &str, selected: Option<&PaletteCandidate>) -> PaletteSubmitEffect {
        let app = AppState::default();
        let ctx = PaletteContext {
            app: &app,
            kind: PaletteKind::Command,
            input,
            seed: None,
        };
        CommandPaletteProvider
            .on_submit(&ctx, selected)
            .expect("submit should succeed")
    }

    #[test]
    fn list_offers_only_the_applicable_pause_command() {
        let running = ids(&command_list_for_input("", false));
        assert!(running.iter().any(|id| id == "pause"));
        assert!(!running.iter().any(|id| id == "resume"));

        let paused = ids(&command_list_for_input("", true));
        assert!(paused.iter().any(|id| id == "resume"));
        assert!(!paused.iter().any(|id| id == "pause"));
    }

    #[test]
    fn argument_phase_hides_candidates() {
        assert!(command_list_for_input("goto-ang ", false).is_empty());
    }

    #[test]
    fn scoring_prioritizes_exact_id_match() {
        let list = command_list_for_input("next", false);
        assert_eq!(
            list.first().map(|candidate| candidate.id.as_str()),
            Some("next")
        );
    }

    #[test]
    fn scoring_supports_hyphen_acronym_query() {
        let list = command_list_for_input("ga", false);
        assert_eq!(
            list.first().map(|candidate| candidate.id.as_str()),
            Some("goto-ang")
        );
    }

    #[test]
    fn scoring_prefers_id_matches_over_title_only_matches() {
        let list = command_list_for_input("ang", false);
        let ids = ids(&list);
        let idx_goto = ids
            .iter()
            .position(|id| id == "goto-ang")
            .expect("goto-ang should match by id");
        assert_eq!(idx_goto, 0);
    }

    #[test]
    fn submit_parses_typed_arguments() {
        assert_eq!(
            submit("goto-ang 12", None),
            PaletteSubmitEffect::Dispatch(Command::GotoAng { ang: 12 })
        );
    }

    #[test]
    fn submit_selected_command_requiring_args_reopens_prefilled() {
        let list = command_list_for_input("goto", false);
        assert_eq!(
            submit("goto", list.first()),
            PaletteSubmitEffect::Reopen {
                kind: PaletteKind::Command,
                seed: Some("goto-ang ".to_string())
            }
        );
    }

    #[test]
    fn submit_selected_bani_without_name_opens_catalog() {
        let list = command_list_for_input("bani", false);
        assert_eq!(
            submit("ban", list.first()),
            PaletteSubmitEffect::Dispatch(Command::OpenPalette {
                kind: PaletteKind::Bani,
                seed: None
            })
        );
    }
}
