use crate::provider::VerseDetail;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verse {
    gurmukhi: String,
    transliteration: String,
    translation: String,
}

impl Verse {
    /// Returns `None` unless all three texts are present and non-blank.
    pub fn from_detail(detail: VerseDetail) -> Option<Self> {
        let VerseDetail {
            gurmukhi,
            transliteration,
            translation,
        } = detail;
        Some(Self {
            gurmukhi: displayable(gurmukhi)?,
            transliteration: displayable(transliteration)?,
            translation: displayable(translation)?,
        })
    }

    pub fn gurmukhi(&self) -> &str {
        &self.gurmukhi
    }

    pub fn transliteration(&self) -> &str {
        &self.transliteration
    }

    pub fn translation(&self) -> &str {
        &self.translation
    }
}

fn displayable(text: Option<String>) -> Option<String> {
    let text = text?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}

/// The verses of one ang, in page order. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageBuffer {
    ang: u32,
    verses: Vec<Verse>,
}

impl PageBuffer {
    pub fn new(ang: u32, verses: Vec<Verse>) -> Option<Self> {
        if verses.is_empty() {
            return None;
        }
        Some(Self { ang, verses })
    }

    pub fn ang(&self) -> u32 {
        self.ang
    }

    pub fn len(&self) -> usize {
        self.verses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.verses.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&Verse> {
        self.verses.get(index)
    }
}
