//! BaniDB v2 response shapes. Only the fields the viewer reads are modeled;
//! everything else in the payload is ignored.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use super::traits::{VerseDetail, VerseRef};

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct AngResponse {
    #[serde(default)]
    pub(crate) page: Vec<AngVerse>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AngVerse {
    pub(crate) verse_id: Option<u64>,
    pub(crate) shabad_id: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ShabadResponse {
    #[serde(default)]
    pub(crate) verses: Vec<ShabadVerse>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ShabadVerse {
    pub(crate) verse_id: Option<u64>,
    #[serde(default)]
    pub(crate) verse: VerseText,
    #[serde(default)]
    pub(crate) transliteration: HashMap<String, Value>,
    #[serde(default)]
    pub(crate) translation: HashMap<String, HashMap<String, Value>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct VerseText {
    pub(crate) unicode: Option<String>,
    pub(crate) gurmukhi: Option<String>,
}

/// Which transliteration and translation to pull out of a verse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TextSelection {
    pub(crate) transliteration_lang: String,
    pub(crate) translation_lang: String,
    pub(crate) translation_source: String,
}

impl AngResponse {
    /// Returns the usable refs and the number of entries dropped for lacking ids.
    pub(crate) fn into_refs(self) -> (Vec<VerseRef>, usize) {
        let total = self.page.len();
        let refs = self
            .page
            .into_iter()
            .filter_map(|entry| match (entry.verse_id, entry.shabad_id) {
                (Some(verse_id), Some(shabad_id)) => Some(VerseRef {
                    verse_id,
                    shabad_id,
                }),
                _ => None,
            })
            .collect::<Vec<_>>();
        let dropped = total - refs.len();
        (refs, dropped)
    }
}

impl ShabadResponse {
    pub(crate) fn find_verse(&self, verse_id: u64) -> Option<&ShabadVerse> {
        self.verses
            .iter()
            .find(|verse| verse.verse_id == Some(verse_id))
    }
}

impl ShabadVerse {
    pub(crate) fn to_detail(&self, selection: &TextSelection) -> VerseDetail {
        let gurmukhi = self
            .verse
            .unicode
            .as_deref()
            .and_then(non_blank)
            .or_else(|| self.verse.gurmukhi.as_deref().and_then(non_blank));

        let transliteration = language_keys(&selection.transliteration_lang)
            .iter()
            .find_map(|key| self.transliteration.get(*key).and_then(text_of));

        let translation = language_keys(&selection.translation_lang)
            .iter()
            .filter_map(|key| self.translation.get(*key))
            .find_map(|sources| {
                sources
                    .get(selection.translation_source.as_str())
                    .and_then(text_of)
            });

        VerseDetail {
            gurmukhi,
            transliteration,
            translation,
        }
    }
}

// The API mixes short codes and spelled-out names across endpoints.
fn language_keys(code: &str) -> Vec<&str> {
    match code {
        "en" | "english" => vec!["en", "english"],
        "hi" | "hindi" => vec!["hi", "hindi"],
        "ur" | "urdu" => vec!["ur", "urdu"],
        other => vec![other],
    }
}

fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => non_blank(text),
        Value::Object(map) => map
            .get("unicode")
            .or_else(|| map.get("gurmukhi"))
            .and_then(Value::as_str)
            .and_then(non_blank),
        _ => None,
    }
}

fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{AngResponse, ShabadResponse, TextSelection};

    fn english_bdb() -> TextSelection {
        TextSelection {
            transliteration_lang: "en".to_string(),
            translation_lang: "en".to_string(),
            translation_source: "bdb".to_string(),
        }
    }

    #[test]
    fn ang_response_keeps_entries_with_both_ids() {
        let raw = r#"{
            "source": {"sourceId": "G"},
            "count": 3,
            "page": [
                {"verseId": 1, "shabadId": 1, "verse": {"unicode": "ੴ"}},
                {"verseId": 2, "verse": {"unicode": "missing shabad"}},
                {"verseId": 3, "shabadId": 1}
            ]
        }"#;
        let parsed: AngResponse = serde_json::from_str(raw).expect("ang payload should parse");
        let (refs, dropped) = parsed.into_refs();

        assert_eq!(dropped, 1);
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].verse_id, 1);
        assert_eq!(refs[1].verse_id, 3);
        assert_eq!(refs[1].shabad_id, 1);
    }

    #[test]
    fn shabad_verse_selects_unicode_english_and_bdb() {
        let raw = r#"{
            "shabadInfo": {"shabadId": 1},
            "verses": [{
                "verseId": 7,
                "verse": {"gurmukhi": "sic", "unicode": " ਸੋਚੈ ਸੋਚਿ ਨ ਹੋਵਈ "},
                "transliteration": {"english": "sochai soch na hovaee", "hindi": "सोचै"},
                "translation": {
                    "en": {"bdb": "By thinking, He cannot be reduced to thought.", "ms": "other"},
                    "pu": {"ss": {"gurmukhi": "x", "unicode": "ਸੋਚਣ ਨਾਲ"}}
                }
            }]
        }"#;
        let parsed: ShabadResponse = serde_json::from_str(raw).expect("shabad payload should parse");
        let verse = parsed.find_verse(7).expect("verse 7 should be present");
        let detail = verse.to_detail(&english_bdb());

        assert_eq!(detail.gurmukhi.as_deref(), Some("ਸੋਚੈ ਸੋਚਿ ਨ ਹੋਵਈ"));
        assert_eq!(detail.transliteration.as_deref(), Some("sochai soch na hovaee"));
        assert_eq!(
            detail.translation.as_deref(),
            Some("By thinking, He cannot be reduced to thought.")
        );

        let punjabi = TextSelection {
            translation_lang: "pu".to_string(),
            translation_source: "ss".to_string(),
            ..english_bdb()
        };
        assert_eq!(
            verse.to_detail(&punjabi).translation.as_deref(),
            Some("ਸੋਚਣ ਨਾਲ")
        );
    }

    #[test]
    fn blank_or_null_fields_become_absent() {
        let raw = r#"{
            "verses": [{
                "verseId": 9,
                "verse": {"unicode": "ਸਤਿ"},
                "transliteration": {"en": null},
                "translation": {"en": {"bdb": "   "}}
            }]
        }"#;
        let parsed: ShabadResponse = serde_json::from_str(raw).expect("shabad payload should parse");
        let detail = parsed
            .find_verse(9)
            .expect("verse 9 should be present")
            .to_detail(&english_bdb());

        assert!(detail.gurmukhi.is_some());
        assert!(detail.transliteration.is_none());
        assert!(detail.translation.is_none());
        assert!(parsed.find_verse(10).is_none());
    }
}
