//! Dictionary-based lemmatizer.
//!
//! Reduces inflected noun forms to their dictionary base form: an
//! irregular-form exception table is consulted first, then ordered suffix
//! detachments whose candidates must appear in the embedded base-form
//! dictionary. Tokens that match neither pass through unchanged, so the
//! lemmatizer is total and stable (lemmatizing its own output is a no-op).
//!
//! Tokens reach this module lowercased and punctuation-free.

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

/// Irregular inflections that no suffix rule recovers.
const EXCEPTIONS: &[(&str, &str)] = &[
    ("analyses", "analysis"),
    ("appendices", "appendix"),
    ("children", "child"),
    ("crises", "crisis"),
    ("criteria", "criterion"),
    ("data", "datum"),
    ("diagnoses", "diagnosis"),
    ("elves", "elf"),
    ("feet", "foot"),
    ("geese", "goose"),
    ("halves", "half"),
    ("hypotheses", "hypothesis"),
    ("indices", "index"),
    ("knives", "knife"),
    ("leaves", "leaf"),
    ("lives", "life"),
    ("loaves", "loaf"),
    ("matrices", "matrix"),
    ("media", "medium"),
    ("men", "man"),
    ("mice", "mouse"),
    ("oxen", "ox"),
    ("phenomena", "phenomenon"),
    ("selves", "self"),
    ("shelves", "shelf"),
    ("teeth", "tooth"),
    ("theses", "thesis"),
    ("thieves", "thief"),
    ("wives", "wife"),
    ("wolves", "wolf"),
    ("women", "woman"),
];

/// Ordered suffix detachments; a candidate counts only if the dictionary
/// contains it.
const DETACHMENTS: &[(&str, &str)] = &[
    ("s", ""),
    ("ses", "s"),
    ("ves", "f"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
];

/// Base forms the detachment rules may resolve to. Skewed toward the
/// vocabulary of news archives; anything outside it passes through untouched.
const BASE_FORMS: &[&str] = &[
    "accident", "account", "action", "actor", "agency", "agreement", "air", "airline", "analyst",
    "animal", "answer", "area", "argument", "army", "arrest", "art", "article", "artist",
    "attack", "attorney", "author", "award", "bank", "banker", "battle", "bill", "bird", "board",
    "bomb", "bond", "book", "border", "box", "budget", "building", "bus", "business", "buyer",
    "campaign", "candidate", "car", "case", "cause", "cent", "century", "charge", "chief",
    "child", "church", "city", "class", "climate", "coach", "college", "committee", "company",
    "computer", "congress", "consumer", "cost", "country", "county", "court", "crash", "crime",
    "critic", "crowd", "cut", "day", "deal", "death", "debt", "decade", "decision", "deficit",
    "democrat", "doctor", "dollar", "drug", "economist", "economy", "editor",
    "effect", "election", "employee", "energy", "event", "executive", "expert", "factory",
    "family", "fan", "farm", "farmer", "field", "film", "fire", "firm", "fish", "flight",
    "flood", "food", "force", "friend", "fund", "game", "gain", "gas", "goal", "government",
    "governor", "group", "growth", "gun", "headline", "health", "holiday", "home", "hospital",
    "hour", "house", "idea", "industry", "investigation", "investor", "issue", "job", "journal",
    "journalist", "judge", "jury", "justice", "killing", "kind", "land", "launch", "law",
    "lawmaker", "lawsuit", "lawyer", "leader", "letter", "line", "loan", "loss", "man", "march",
    "market", "mayor", "meeting", "member", "minister", "minute", "model", "money", "month",
    "morning", "mother", "movie", "museum", "music", "nation", "neighborhood", "news",
    "newspaper", "night", "number", "officer", "official", "oil", "opinion", "order", "page",
    "parent", "part", "party", "patient", "payment", "people", "person", "phone", "place",
    "plan", "plane", "plant", "play", "player", "point", "police", "policy", "price", "prison",
    "problem", "profit", "program", "project", "promise", "protest", "question", "race", "rally",
    "rate", "reader", "record", "reform", "region", "report", "reporter", "republican",
    "researcher", "result", "right", "risk", "river", "road", "rule", "ruling", "sale", "school",
    "scientist", "season", "secretary", "sector", "senator", "series", "service", "share",
    "shooting", "show", "side", "sign", "soldier", "song", "source", "sport", "star", "state",
    "statement", "stock", "store", "storm", "story", "street", "strike", "student", "study",
    "supporter", "survey", "system", "talk", "tariff", "tax", "teacher", "team", "technology",
    "term", "test", "thing", "threat", "time", "trade", "trader", "trial", "troop",
    "union", "university", "value", "victim", "victory", "violation", "vote", "voter", "wage",
    "war", "water", "way", "weapon", "week", "weekend", "wish", "witness", "woman", "word",
    "worker", "world", "writer", "year",
];

static EXCEPTION_MAP: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| EXCEPTIONS.iter().copied().collect());

static DICTIONARY: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    let mut dict: HashSet<&'static str> = BASE_FORMS.iter().copied().collect();
    // Exception targets are dictionary words by definition.
    dict.extend(EXCEPTIONS.iter().map(|(_, base)| *base));
    dict
});

/// Reduce one token to its dictionary base form; unknown tokens pass through
/// unchanged.
pub fn lemmatize(token: &str) -> String {
    if let Some(base) = EXCEPTION_MAP.get(token) {
        return (*base).to_string();
    }
    if DICTIONARY.contains(token) {
        return token.to_string();
    }
    for (suffix, replacement) in DETACHMENTS {
        if let Some(stem) = token.strip_suffix(suffix) {
            let candidate = format!("{stem}{replacement}");
            if DICTIONARY.contains(candidate.as_str()) {
                return candidate;
            }
        }
    }
    token.to_string()
}
