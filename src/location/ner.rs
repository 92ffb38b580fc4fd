//! Named-entity recognition for place names in free-text queries.
//!
//! The resolver only depends on the [`EntityRecognizer`] trait. The bundled
//! [`RuleRecognizer`] combines two rules:
//!
//! * gazetteer: known stop names, matched case-insensitively on word
//!   boundaries, tagged `Gpe`
//! * locative cue: a run of capitalized words right after "near", "at",
//!   "close to", … tagged `Loc`

/// Entity type, following the usual NER label set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityLabel {
    /// Non-political location (area, landmark).
    Loc,
    /// Geo-political entity (city, district, named stop).
    Gpe,
    /// Building or facility.
    Fac,
    Other,
}

impl EntityLabel {
    pub fn is_location(self) -> bool {
        matches!(self, Self::Loc | Self::Gpe)
    }
}

/// A labelled span of the input. `start`/`end` are byte offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub label: EntityLabel,
}

/// Anything that can tag entity spans in a query.
pub trait EntityRecognizer: Send + Sync {
    /// Entities in order of appearance.
    fn entities(&self, text: &str) -> Vec<Entity>;
}

const SINGLE_CUES: &[&str] = &[
    "near", "at", "in", "from", "around", "by", "beside", "opposite", "behind",
];

const DOUBLE_CUES: &[(&str, &str)] = &[("close", "to"), ("next", "to"), ("near", "to")];

/// Words that describe the kind of place rather than name it.
const GENERIC_SUFFIXES: &[&str] = &[
    "bus", "stand", "stop", "station", "metro", "terminal", "depot",
];

/// Capitalized words that follow a cue without naming a place ("at Noon",
/// "by Monday"). A cue run made only of these is not an entity.
const NON_PLACE_WORDS: &[&str] = &[
    "please", "today", "tonight", "tomorrow", "yesterday", "now", "once",
    "morning", "afternoon", "evening", "night", "noon", "midnight", "dawn", "dusk",
    "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday",
    "january", "february", "march", "april", "may", "june", "july", "august",
    "september", "october", "november", "december",
];

#[derive(Debug, Clone, Copy)]
struct Word<'a> {
    text: &'a str,
    start: usize,
    end: usize,
}

/// Gazetteer + locative-cue recognizer.
#[derive(Debug, Clone, Default)]
pub struct RuleRecognizer {
    /// Lowercased word sequences of every known place name.
    gazetteer: Vec<Vec<String>>,
}

impl RuleRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recognizer whose gazetteer holds the given place names.
    pub fn with_gazetteer<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut gazetteer: Vec<Vec<String>> = names
            .into_iter()
            .map(|n| {
                split_words(n.as_ref())
                    .iter()
                    .map(|w| w.text.to_lowercase())
                    .collect::<Vec<_>>()
            })
            .filter(|seq| !seq.is_empty())
            .collect();
        gazetteer.sort();
        gazetteer.dedup();
        // Longest names first so the longest match at a position wins
        gazetteer.sort_by(|a, b| b.len().cmp(&a.len()));
        Self { gazetteer }
    }

    fn gazetteer_spans(&self, text: &str, words: &[Word<'_>]) -> Vec<Entity> {
        let lowered: Vec<String> = words.iter().map(|w| w.text.to_lowercase()).collect();
        let mut spans = Vec::new();
        let mut i = 0;
        while i < words.len() {
            let hit = self.gazetteer.iter().find(|name| {
                i + name.len() <= words.len()
                    && name.iter().zip(&lowered[i..]).all(|(a, b)| a == b)
            });
            match hit {
                Some(name) => {
                    let last = i + name.len() - 1;
                    spans.push(span(text, words[i].start, words[last].end, EntityLabel::Gpe));
                    i = last + 1;
                }
                None => i += 1,
            }
        }
        spans
    }

    fn cue_spans(&self, text: &str, words: &[Word<'_>]) -> Vec<Entity> {
        let mut spans = Vec::new();
        let mut i = 0;
        while i < words.len() {
            let Some(cue_len) = cue_at(words, i) else {
                i += 1;
                continue;
            };

            let first = i + cue_len;
            let mut end = first;
            while end < words.len()
                && is_name_word(words[end].text)
                && !punctuated(text, &words[end - 1], &words[end])
            {
                end += 1;
            }
            while end > first && is_generic(words[end - 1].text) {
                end -= 1;
            }

            let non_place = words[first..end].iter().all(|w| is_non_place(w.text));
            if end > first && !non_place {
                spans.push(span(text, words[first].start, words[end - 1].end, EntityLabel::Loc));
                i = end;
            } else {
                i += cue_len;
            }
        }
        spans
    }
}

impl EntityRecognizer for RuleRecognizer {
    fn entities(&self, text: &str) -> Vec<Entity> {
        let words = split_words(text);
        let mut entities = self.gazetteer_spans(text, &words);

        for cue in self.cue_spans(text, &words) {
            let overlaps = entities
                .iter()
                .any(|e| cue.start < e.end && e.start < cue.end);
            if !overlaps {
                entities.push(cue);
            }
        }

        entities.sort_by_key(|e| e.start);
        entities
    }
}

fn span(text: &str, start: usize, end: usize, label: EntityLabel) -> Entity {
    Entity {
        text: text[start..end].to_string(),
        start,
        end,
        label,
    }
}

/// Words are maximal runs of alphanumerics, with inner apostrophes and
/// hyphens kept ("I'm", "Hauz-Khas").
fn split_words(text: &str) -> Vec<Word<'_>> {
    let is_word_char = |c: char| c.is_alphanumeric() || c == '\'' || c == '-';
    let mut words = Vec::new();
    let mut start: Option<usize> = None;

    for (idx, c) in text.char_indices() {
        match (start, is_word_char(c)) {
            (None, true) => start = Some(idx),
            (Some(s), false) => {
                push_word(text, s, idx, &mut words);
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        push_word(text, s, text.len(), &mut words);
    }
    words
}

fn push_word<'a>(text: &'a str, start: usize, end: usize, words: &mut Vec<Word<'a>>) {
    let raw = &text[start..end];
    let trimmed = raw.trim_matches(|c| c == '\'' || c == '-');
    if trimmed.is_empty() {
        return;
    }
    let offset = raw.find(trimmed).unwrap_or(0);
    words.push(Word {
        text: trimmed,
        start: start + offset,
        end: start + offset + trimmed.len(),
    });
}

fn cue_at(words: &[Word<'_>], i: usize) -> Option<usize> {
    let w = words[i].text.to_lowercase();
    if let Some(next) = words.get(i + 1) {
        let n = next.text.to_lowercase();
        if DOUBLE_CUES.iter().any(|(a, b)| *a == w && *b == n) {
            return Some(2);
        }
    }
    SINGLE_CUES.contains(&w.as_str()).then_some(1)
}

fn is_name_word(word: &str) -> bool {
    let starts_upper = word.chars().next().is_some_and(char::is_uppercase);
    let pronoun = word == "I" || word.starts_with("I'");
    starts_upper && !pronoun
}

fn is_non_place(word: &str) -> bool {
    NON_PLACE_WORDS.contains(&word.to_lowercase().as_str())
}

fn is_generic(word: &str) -> bool {
    GENERIC_SUFFIXES.contains(&word.to_lowercase().as_str())
}

/// True when anything other than whitespace separates two words.
fn punctuated(text: &str, prev: &Word<'_>, next: &Word<'_>) -> bool {
    !text[prev.end..next.start].chars().all(char::is_whitespace)
}
