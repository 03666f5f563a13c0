use crate::config::Language;
use crate::stopwords::is_stopword;
use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref NON_WORD: Regex = Regex::new(r"[^\w\s]").expect("valid regex");
    static ref ENGLISH_STEMMER: Stemmer = Stemmer::create(Algorithm::English);
    static ref FRENCH_STEMMER: Stemmer = Stemmer::create(Algorithm::French);
}

/// Passes never grow a token, in practice a fixed point is reached after two or three.
const MAX_STEM_PASSES: usize = 32;

/// NFKC, lowercase, then drop every character that is neither a word character nor whitespace.
pub fn normalize(text: &str) -> String {
    let lowered = text.nfkc().collect::<String>().to_lowercase();
    NON_WORD.replace_all(&lowered, "").into_owned()
}

/// Text preprocessing pipeline shared by documents and queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Preprocessor {
    language: Language,
}

impl Preprocessor {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Stem to a fixed point, so `stem(stem(t)) == stem(t)`.
    ///
    /// A single Snowball pass is not idempotent ("agreed" -> "agre" -> "agr"), so the
    /// stemmer is reapplied until its output stops changing.
    pub fn stem(&self, token: &str) -> String {
        let stemmer: &Stemmer = match self.language {
            Language::English => &ENGLISH_STEMMER,
            Language::French => &FRENCH_STEMMER,
        };
        let mut current = stemmer.stem(token).into_owned();
        for _ in 0..MAX_STEM_PASSES {
            let next = stemmer.stem(&current);
            if next == current {
                break;
            }
            current = next.into_owned();
        }
        current
    }

    /// Normalize, split on whitespace, remove stopwords and stem.
    ///
    /// Never fails: punctuation-only or stopword-only input yields an empty vector.
    pub fn preprocess(&self, text: &str) -> Vec<String> {
        normalize(text)
            .split_whitespace()
            .filter(|token| !is_stopword(token))
            .map(|token| self.stem(token))
            .collect()
    }
}

/// Preprocess with the default (English) stemmer.
pub fn preprocess(text: &str) -> Vec<String> {
    Preprocessor::default().preprocess(text)
}
