//! Common-word dictionaries for the lexical language fallback.
//!
//! Words are lowercase, diacritic-free and at least two letters long, matching
//! the output of [`tokenize`]. The table is built once and only read afterwards.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

const ENGLISH: &[&str] = &[
    "the", "and", "you", "that", "was", "for", "are", "with", "his", "they", "this", "have",
    "from", "one", "had", "word", "but", "not", "what", "all", "were", "when", "your", "can",
    "said", "there", "use", "each", "which", "she", "how", "their", "will", "other", "about",
    "out", "many", "then", "them", "these", "some", "her", "would", "make", "like", "him",
    "into", "time", "has", "look", "more", "is", "it", "in", "of", "to", "be", "on", "at",
    "we", "my", "me", "an", "or", "by", "if", "do", "so", "up", "no", "please", "hello",
    "thanks", "message", "test", "account", "click", "here", "now", "today",
];

const SPANISH: &[&str] = &[
    "de", "la", "que", "el", "en", "los", "se", "del", "las", "un", "por", "con", "no", "una",
    "su", "para", "es", "al", "lo", "como", "mas", "pero", "sus", "le", "ya", "fue", "este",
    "ha", "si", "porque", "esta", "son", "entre", "cuando", "muy", "sin", "sobre", "tambien",
    "me", "hasta", "hay", "donde", "quien", "desde", "todo", "nos", "durante", "todos", "uno",
    "les", "ni", "contra", "otros", "ese", "eso", "hola", "gracias", "mensaje", "prueba",
    "cuenta", "aqui", "ahora", "usted", "tu", "estoy", "hoy",
];

const FRENCH: &[&str] = &[
    "de", "la", "le", "et", "les", "des", "en", "un", "du", "une", "que", "est", "pour", "qui",
    "dans", "par", "plus", "pas", "au", "sur", "ne", "se", "ce", "il", "sont", "avec", "ou",
    "mais", "comme", "aux", "nous", "vous", "elle", "cette", "ont", "ses", "leur", "sans",
    "tout", "fait", "etre", "bien", "ceci", "cela", "tres", "bonjour", "merci", "message",
    "test", "compte", "ici", "maintenant", "aujourd", "hui", "votre", "notre", "je", "tu",
    "francais",
];

const GERMAN: &[&str] = &[
    "der", "die", "und", "in", "den", "von", "zu", "das", "mit", "sich", "des", "auf", "fur",
    "ist", "im", "dem", "nicht", "ein", "eine", "als", "auch", "es", "an", "werden", "aus",
    "er", "hat", "dass", "sie", "nach", "wird", "bei", "einer", "um", "am", "sind", "noch",
    "wie", "einem", "uber", "einen", "so", "zum", "war", "haben", "nur", "oder", "aber",
    "vor", "zur", "bis", "mehr", "durch", "man", "hallo", "danke", "nachricht", "konto",
    "hier", "jetzt", "heute", "ich", "du", "wir", "ihr", "bitte",
];

const ITALIAN: &[&str] = &[
    "di", "che", "il", "la", "per", "un", "non", "in", "una", "sono", "mi", "ho", "lo", "ma",
    "ti", "le", "si", "ha", "con", "cosa", "da", "se", "io", "ci", "questo", "qui", "hai",
    "bene", "tu", "del", "della", "gli", "alla", "anche", "come", "piu", "nel", "sul", "dei",
    "quando", "suo", "sua", "molto", "tutto", "ciao", "grazie", "messaggio", "prova",
    "conto", "adesso", "oggi", "lei", "noi", "voi", "essere",
];

const PORTUGUESE: &[&str] = &[
    "de", "que", "nao", "do", "da", "em", "um", "para", "com", "uma", "os", "no", "se", "na",
    "por", "mais", "as", "dos", "como", "mas", "ao", "ele", "das", "tem", "seu", "sua", "ou",
    "ser", "quando", "muito", "nos", "ja", "esta", "eu", "tambem", "so", "pelo", "pela",
    "ate", "isso", "ela", "entre", "depois", "sem", "mesmo", "aos", "ola", "obrigado",
    "mensagem", "teste", "conta", "aqui", "agora", "hoje", "voce", "voces",
];

const DUTCH: &[&str] = &[
    "de", "en", "van", "ik", "te", "dat", "die", "in", "een", "hij", "het", "niet", "zijn",
    "is", "was", "op", "aan", "met", "als", "voor", "had", "er", "maar", "om", "hem", "dan",
    "zou", "of", "wat", "mijn", "men", "dit", "zo", "door", "over", "ze", "zich", "bij",
    "ook", "tot", "je", "mij", "uit", "der", "daar", "haar", "naar", "heb", "hoe", "heeft",
    "hallo", "bedankt", "bericht", "rekening", "hier", "nu", "vandaag", "jij", "wij", "jullie",
];

const DANISH: &[&str] = &[
    "og", "at", "det", "er", "en", "til", "som", "pa", "de", "med", "han", "af", "for", "ikke",
    "der", "var", "mig", "sig", "men", "et", "har", "om", "vi", "min", "havde", "ham", "hun",
    "nu", "over", "da", "fra", "du", "ud", "sin", "dem", "os", "op", "man", "hans", "hvor",
    "eller", "hvad", "skal", "selv", "her", "alle", "vil", "blev", "kunne", "ind", "hej",
    "tak", "besked", "konto", "idag", "jeg", "jer", "venligst",
];

/// Per-language common-word sets keyed by ISO 639-3 code.
static LEXICON: LazyLock<HashMap<&'static str, HashSet<&'static str>>> = LazyLock::new(|| {
    [
        ("eng", ENGLISH),
        ("spa", SPANISH),
        ("fra", FRENCH),
        ("deu", GERMAN),
        ("ita", ITALIAN),
        ("por", PORTUGUESE),
        ("nld", DUTCH),
        ("dan", DANISH),
    ]
    .into_iter()
    .map(|(code, words)| (code, words.iter().copied().collect()))
    .collect()
});

/// Returns the common-word set for a language, if one exists.
pub fn dictionary(language: &str) -> Option<&'static HashSet<&'static str>> {
    LEXICON.get(language)
}

/// Splits text into lowercase, diacritic-free alphabetic runs of length >= 2.
///
/// Repeated words are kept; the match ratio counts every occurrence.
pub fn tokenize(content: &str) -> Vec<String> {
    let folded: String = content
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect();

    folded
        .split(|c: char| !c.is_alphabetic())
        .filter(|run| run.chars().count() >= 2)
        .map(str::to_string)
        .collect()
}

/// Fraction of `tokens` found in the dictionary of `language`.
///
/// Returns `0.0` for an empty token list or a language without a dictionary.
pub fn match_ratio(tokens: &[String], language: &str) -> f64 {
    let Some(words) = dictionary(language) else {
        return 0.0;
    };
    if tokens.is_empty() {
        return 0.0;
    }

    let hits = tokens
        .iter()
        .filter(|t| words.contains(t.as_str()))
        .count();
    hits as f64 / tokens.len() as f64
}
