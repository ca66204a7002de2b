use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use utoipa::ToSchema;

use super::search_result::SearchResult;

const NAME_SEPARATORS: [&str; 2] = [" - ", " | "];
const HEADLINE_SEPARATOR: &str = " - ";
const TITLE_SUFFIX: &str = " | LinkedIn";
const EXPERIENCE_MARKER: &str = "Experience:";
const EDUCATION_MARKER: &str = "Education:";
const FIELD_SEPARATORS: [char; 2] = ['·', '•'];

#[derive(Debug, Default, Clone, PartialEq, Serialize, ToSchema)]
pub struct StructuredProfile {
    pub name: Option<String>,
    pub headline: Option<String>,
    pub about: Option<String>,
    pub location: Option<String>,
    pub experience: Option<String>,
    pub education: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Name,
    Headline,
    About,
    Location,
    Experience,
    Education,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleSource {
    Title,
    Snippet,
}

/// One independent heuristic: reads a single source string and yields at most one field value.
pub struct ExtractionRule {
    pub field: ProfileField,
    pub source: RuleSource,
    pub apply: fn(&str) -> Option<String>,
}

pub const EXTRACTION_RULES: [ExtractionRule; 6] = [
    ExtractionRule {
        field: ProfileField::Name,
        source: RuleSource::Title,
        apply: name_from_title,
    },
    ExtractionRule {
        field: ProfileField::Headline,
        source: RuleSource::Title,
        apply: headline_from_title,
    },
    ExtractionRule {
        field: ProfileField::About,
        source: RuleSource::Snippet,
        apply: about_from_snippet,
    },
    ExtractionRule {
        field: ProfileField::Location,
        source: RuleSource::Snippet,
        apply: location_from_snippet,
    },
    ExtractionRule {
        field: ProfileField::Experience,
        source: RuleSource::Snippet,
        apply: experience_from_snippet,
    },
    ExtractionRule {
        field: ProfileField::Education,
        source: RuleSource::Snippet,
        apply: education_from_snippet,
    },
];

impl StructuredProfile {
    fn set(&mut self, field: ProfileField, value: Option<String>) {
        let slot = match field {
            ProfileField::Name => &mut self.name,
            ProfileField::Headline => &mut self.headline,
            ProfileField::About => &mut self.about,
            ProfileField::Location => &mut self.location,
            ProfileField::Experience => &mut self.experience,
            ProfileField::Education => &mut self.education,
        };
        *slot = value;
    }
}

/// Best-effort parse of a search hit into profile fields. Never fails, a rule that does not
/// match leaves its field empty.
pub fn extract(result: &SearchResult) -> StructuredProfile {
    let title = squash_whitespace(&result.title);
    let snippet = squash_whitespace(&result.snippet);

    let mut profile = StructuredProfile::default();
    for rule in EXTRACTION_RULES.iter() {
        let text = match rule.source {
            RuleSource::Title => &title,
            RuleSource::Snippet => &snippet,
        };
        profile.set(rule.field, (rule.apply)(text));
    }

    profile
}

/// `"John Doe - Engineer | LinkedIn"` and `"John Doe | LinkedIn"` both give `John Doe`.
pub fn name_from_title(title: &str) -> Option<String> {
    let cut = NAME_SEPARATORS
        .iter()
        .filter_map(|sep| title.find(sep))
        .min()?;

    non_empty(&title[..cut])
}

/// Only matches the `<Name> - <Headline> | LinkedIn` shape. Lower-cased.
pub fn headline_from_title(title: &str) -> Option<String> {
    let stripped = strip_suffix_ignore_case(title.trim_end(), TITLE_SUFFIX)?;
    let (name, headline) = stripped.split_once(HEADLINE_SEPARATOR)?;

    // "<Name> | x - y | LinkedIn" has no headline
    if name.contains(" | ") {
        return None;
    }

    non_empty(headline).map(|h| h.to_lowercase())
}

pub fn about_from_snippet(snippet: &str) -> Option<String> {
    let marker = [EXPERIENCE_MARKER, EDUCATION_MARKER]
        .iter()
        .filter_map(|marker| snippet.find(marker))
        .min();

    // With a marker present the about text ends at the first separator before it
    let end = match marker {
        Some(marker) => snippet[..marker].find(is_separator).unwrap_or(marker),
        None => snippet.len(),
    };

    let head = snippet[..end].trim_end_matches(|c: char| c.is_whitespace() || is_separator(c));

    non_empty(head)
}

pub fn location_from_snippet(snippet: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"\b(?i:based\s+in)\s+((?:[^.·•;|\n]|\.[^\s.·•])+\.?)").unwrap()
    });

    let phrase = re.captures(snippet)?.get(1)?.as_str();

    // "based in the UK"
    let mut words = phrase.split_whitespace().peekable();
    words.next_if(|word| word.eq_ignore_ascii_case("the"));

    // Place names are capitalised: "Bangalore with experience in ..." stops at "with",
    // "Bengaluru, India" keeps both parts
    let place = words
        .take_while(|word| word.chars().next().is_some_and(char::is_uppercase))
        .collect::<Vec<&str>>()
        .join(" ");

    let place = place.trim_end_matches(|c: char| !c.is_alphanumeric() && c != '.');
    // Keep the final period of abbreviations like "U.S." only
    let place = match place.trim_end_matches('.') {
        stripped if stripped.contains('.') => place,
        stripped => stripped,
    };

    non_empty(place)
}

pub fn experience_from_snippet(snippet: &str) -> Option<String> {
    section_after(snippet, EXPERIENCE_MARKER, EDUCATION_MARKER)
}

pub fn education_from_snippet(snippet: &str) -> Option<String> {
    section_after(snippet, EDUCATION_MARKER, EXPERIENCE_MARKER)
}

/// Text after `marker` up to the next separator, the `other` marker or the end of `text`.
fn section_after(text: &str, marker: &str, other: &str) -> Option<String> {
    let start = text.find(marker)? + marker.len();
    let rest = &text[start..];

    let end = [rest.find(is_separator), rest.find(other)]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(rest.len());

    non_empty(&rest[..end])
}

fn is_separator(c: char) -> bool {
    FIELD_SEPARATORS.contains(&c)
}

fn strip_suffix_ignore_case<'a>(text: &'a str, suffix: &str) -> Option<&'a str> {
    let cut = text.len().checked_sub(suffix.len())?;
    if !text.is_char_boundary(cut) {
        return None;
    }

    text[cut..].eq_ignore_ascii_case(suffix).then(|| &text[..cut])
}

fn squash_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<&str>>().join(" ")
}

fn non_empty(text: &str) -> Option<String> {
    let text = squash_whitespace(text);
    match text.is_empty() {
        true => None,
        false => Some(text),
    }
}
