// src/analyze/stopwords.rs
// =============================================================================
// Compiled-in stopword tables for the semantic analyzer.
//
// The tables are plain static slices baked into the binary, so keyword
// analysis needs no files on disk and no network. Lookup is by detected
// language; a language without a table simply yields None and the caller
// reports that keyword analysis is unavailable for the page.
// =============================================================================

use std::collections::HashSet;
use whatlang::Lang;

static ENGLISH: &[&str] = &[
    "a", "about", "after", "all", "also", "an", "and", "any", "are", "as", "at", "be", "because",
    "been", "but", "by", "can", "could", "do", "for", "from", "had", "has", "have", "he", "her",
    "him", "his", "how", "i", "if", "in", "into", "is", "it", "its", "just", "like", "more",
    "most", "my", "no", "not", "of", "on", "one", "only", "or", "other", "our", "out", "over",
    "she", "so", "some", "than", "that", "the", "their", "them", "then", "there", "these", "they",
    "this", "to", "up", "us", "was", "we", "were", "what", "when", "which", "who", "will", "with",
    "would", "you", "your",
];

static GERMAN: &[&str] = &[
    "aber", "als", "am", "an", "auch", "auf", "aus", "bei", "bin", "bis", "das", "dass", "dem",
    "den", "der", "des", "die", "doch", "du", "durch", "ein", "eine", "einem", "einen", "einer",
    "er", "es", "für", "hat", "hatte", "ich", "ihr", "im", "in", "ist", "ja", "kann", "mein",
    "mit", "nach", "nicht", "noch", "nur", "oder", "sein", "sich", "sie", "sind", "so", "über",
    "um", "und", "uns", "von", "vor", "war", "was", "wenn", "werden", "wie", "wir", "wird", "zu",
    "zum", "zur",
];

static FRENCH: &[&str] = &[
    "au", "aux", "avec", "ce", "ces", "dans", "de", "des", "du", "elle", "en", "et", "eux", "il",
    "ils", "je", "la", "le", "les", "leur", "lui", "ma", "mais", "me", "même", "mes", "moi",
    "mon", "ne", "nos", "notre", "nous", "on", "ou", "où", "par", "pas", "plus", "pour", "qu",
    "que", "qui", "sa", "se", "ses", "son", "sont", "sur", "ta", "te", "tes", "toi", "ton", "tu",
    "un", "une", "vos", "votre", "vous",
];

static SPANISH: &[&str] = &[
    "al", "algo", "como", "con", "cuando", "de", "del", "donde", "el", "ella", "ellos", "en",
    "entre", "era", "es", "esta", "este", "esto", "fue", "ha", "hay", "la", "las", "le", "lo",
    "los", "más", "me", "mi", "muy", "no", "nos", "o", "para", "pero", "por", "que", "se", "ser",
    "si", "sin", "sobre", "son", "su", "sus", "también", "te", "tiene", "todo", "un", "una",
    "uno", "y", "ya", "yo",
];

static ITALIAN: &[&str] = &[
    "a", "ad", "al", "alla", "anche", "che", "chi", "ci", "come", "con", "da", "dal", "degli",
    "dei", "del", "della", "di", "e", "era", "gli", "ha", "hanno", "ho", "i", "il", "in", "io",
    "la", "le", "lei", "lo", "loro", "lui", "ma", "mi", "nel", "nella", "noi", "non", "o", "per",
    "più", "quella", "quello", "questa", "questo", "se", "si", "sono", "su", "sua", "sul", "suo",
    "tra", "tu", "tutti", "un", "una", "uno", "voi",
];

static DUTCH: &[&str] = &[
    "aan", "al", "als", "bij", "dan", "dat", "de", "der", "die", "dit", "door", "een", "en", "er",
    "hebben", "heeft", "het", "hij", "hun", "ik", "in", "is", "je", "kan", "maar", "meer", "met",
    "mijn", "naar", "niet", "nog", "nu", "of", "om", "ook", "op", "over", "te", "tot", "uit",
    "van", "veel", "voor", "was", "wat", "we", "werd", "wij", "wordt", "zal", "ze", "zich",
    "zijn", "zo",
];

/// The stopword resource, loaded once at startup and shared read-only.
pub struct Stopwords {
    tables: Vec<(Lang, HashSet<&'static str>)>,
}

impl Stopwords {
    pub fn load() -> Self {
        let tables = vec![
            (Lang::Eng, ENGLISH.iter().copied().collect()),
            (Lang::Deu, GERMAN.iter().copied().collect()),
            (Lang::Fra, FRENCH.iter().copied().collect()),
            (Lang::Spa, SPANISH.iter().copied().collect()),
            (Lang::Ita, ITALIAN.iter().copied().collect()),
            (Lang::Nld, DUTCH.iter().copied().collect()),
        ];
        Self { tables }
    }

    /// The table for a detected language, or None when we have no list
    /// for it and keyword analysis cannot run.
    pub fn for_lang(&self, lang: Lang) -> Option<&HashSet<&'static str>> {
        self.tables
            .iter()
            .find(|(table_lang, _)| *table_lang == lang)
            .map(|(_, words)| words)
    }
}
