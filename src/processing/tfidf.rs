//! TF-IDF vectorization over a small in-memory corpus

use crate::config::ScoringConfig;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::{BTreeMap, HashMap, HashSet};

lazy_static! {
    static ref TOKEN_RE: Regex = Regex::new(r"\b\w\w+\b").expect("Invalid token regex");
    static ref STOP_WORDS: HashSet<&'static str> = ENGLISH_STOP_WORDS.iter().copied().collect();
}

/// Standard English stop-word list used by classic TF-IDF vectorizers
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst",
    "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway",
    "anywhere", "are", "around", "as", "at", "back", "be", "became", "because", "become",
    "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below", "beside",
    "besides", "between", "beyond", "bill", "both", "bottom", "but", "by", "call", "can",
    "cannot", "cant", "co", "con", "could", "couldnt", "cry", "de", "describe", "detail", "do",
    "done", "down", "due", "during", "each", "eg", "eight", "either", "eleven", "else",
    "elsewhere", "empty", "enough", "etc", "even", "ever", "every", "everyone", "everything",
    "everywhere", "except", "few", "fifteen", "fifty", "fill", "find", "fire", "first", "five",
    "for", "former", "formerly", "forty", "found", "four", "from", "front", "full", "further",
    "get", "give", "go", "had", "has", "hasnt", "have", "he", "hence", "her", "here", "hereafter",
    "hereby", "herein", "hereupon", "hers", "herself", "him", "himself", "his", "how", "however",
    "hundred", "i", "ie", "if", "in", "inc", "indeed", "interest", "into", "is", "it", "its",
    "itself", "keep", "last", "latter", "latterly", "least", "less", "ltd", "made", "many",
    "may", "me", "meanwhile", "might", "mill", "mine", "more", "moreover", "most", "mostly",
    "move", "much", "must", "my", "myself", "name", "namely", "neither", "never",
    "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor", "not", "nothing",
    "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto", "or", "other",
    "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own", "part", "per",
    "perhaps", "please", "put", "rather", "re", "same", "see", "seem", "seemed", "seeming",
    "seems", "serious", "several", "she", "should", "show", "side", "since", "sincere", "six",
    "sixty", "so", "some", "somehow", "someone", "something", "sometime", "sometimes",
    "somewhere", "still", "such", "system", "take", "ten", "than", "that", "the", "their",
    "them", "themselves", "then", "thence", "there", "thereafter", "thereby", "therefore",
    "therein", "thereupon", "these", "they", "thick", "thin", "third", "this", "those", "though",
    "three", "through", "throughout", "thru", "thus", "to", "together", "too", "top", "toward",
    "towards", "twelve", "twenty", "two", "un", "under", "until", "up", "upon", "us", "very",
    "via", "was", "we", "well", "were", "what", "whatever", "when", "whence", "whenever",
    "where", "whereafter", "whereas", "whereby", "wherein", "whereupon", "wherever", "whether",
    "which", "while", "whither", "who", "whoever", "whole", "whom", "whose", "why", "will",
    "with", "within", "without", "would", "yet", "you", "your", "yours", "yourself",
    "yourselves",
];

/// Fits vocabulary and IDF statistics fresh on every call; nothing is retained between corpora
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    ngram_range: (usize, usize),
    max_features: usize,
    remove_stop_words: bool,
}

/// Dense document-term matrix with L2-normalized rows
#[derive(Debug, Clone, Default)]
pub struct TfidfMatrix {
    /// Feature names, sorted alphabetically
    pub features: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::from_config(&ScoringConfig::default())
    }
}

impl TfidfVectorizer {
    pub fn new(ngram_range: (usize, usize), max_features: usize, remove_stop_words: bool) -> Self {
        let min_n = ngram_range.0.max(1);
        let max_n = ngram_range.1.max(min_n);
        Self {
            ngram_range: (min_n, max_n),
            max_features,
            remove_stop_words,
        }
    }

    pub fn from_config(config: &ScoringConfig) -> Self {
        Self::new(config.ngram_range, config.max_features, config.remove_stop_words)
    }

    /// Split text into lowercase word tokens of at least two characters
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        TOKEN_RE
            .find_iter(&lowered)
            .map(|m| m.as_str().to_string())
            .filter(|token| !self.remove_stop_words || !STOP_WORDS.contains(token.as_str()))
            .collect()
    }

    /// Produce the n-gram terms of a document; stop words are dropped before joining
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let tokens = self.tokenize(text);
        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();

        for n in min_n..=max_n {
            if n > tokens.len() {
                break;
            }
            for window in tokens.windows(n) {
                terms.push(window.join(" "));
            }
        }

        terms
    }

    pub fn fit_transform(&self, documents: &[&str]) -> TfidfMatrix {
        let doc_counts: Vec<HashMap<String, usize>> = documents
            .iter()
            .map(|doc| {
                let mut counts = HashMap::new();
                for term in self.analyze(doc) {
                    *counts.entry(term).or_insert(0) += 1;
                }
                counts
            })
            .collect();

        // Corpus frequency and document frequency per term
        let mut corpus_freq: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
        for counts in &doc_counts {
            for (term, count) in counts {
                let entry = corpus_freq.entry(term.as_str()).or_insert((0, 0));
                entry.0 += count;
                entry.1 += 1;
            }
        }

        if corpus_freq.is_empty() {
            return TfidfMatrix {
                features: Vec::new(),
                rows: vec![Vec::new(); documents.len()],
            };
        }

        let mut selected: Vec<(&str, usize, usize)> = corpus_freq
            .into_iter()
            .map(|(term, (tf, df))| (term, tf, df))
            .collect();
        if selected.len() > self.max_features {
            // Highest corpus frequency wins; ties keep alphabetical order
            selected.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
            selected.truncate(self.max_features);
            selected.sort_by(|a, b| a.0.cmp(b.0));
        }

        let n_docs = documents.len() as f64;
        let idf: Vec<f64> = selected
            .iter()
            .map(|&(_, _, df)| ((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let rows = doc_counts
            .iter()
            .map(|counts| {
                let mut row: Vec<f64> = selected
                    .iter()
                    .zip(&idf)
                    .map(|(&(term, _, _), weight)| {
                        counts.get(term).copied().unwrap_or(0) as f64 * weight
                    })
                    .collect();
                l2_normalize(&mut row);
                row
            })
            .collect();

        TfidfMatrix {
            features: selected.into_iter().map(|(term, _, _)| term.to_string()).collect(),
            rows,
        }
    }
}

impl TfidfMatrix {
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<&[f64]> {
        self.rows.get(index).map(|row| row.as_slice())
    }
}

fn l2_normalize(row: &mut [f64]) {
    let norm = row.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm > 0.0 {
        for value in row.iter_mut() {
            *value /= norm;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_drops_stop_words_and_short_tokens() {
        let vectorizer = TfidfVectorizer::default();
        let tokens = vectorizer.tokenize("I know c++ and node.js with Python");

        assert_eq!(tokens, vec!["know", "node", "js", "python"]);
    }

    #[test]
    fn test_bigrams_span_removed_stop_words() {
        let vectorizer = TfidfVectorizer::default();
        let terms = vectorizer.analyze("python and sql");

        assert!(terms.contains(&"python".to_string()));
        assert!(terms.contains(&"sql".to_string()));
        assert!(terms.contains(&"python sql".to_string()));
        assert_eq!(terms.len(), 3);
    }

    #[test]
    fn test_rows_are_unit_length() {
        let vectorizer = TfidfVectorizer::default();
        let matrix = vectorizer.fit_transform(&["python sql developer", "python aws engineer"]);

        assert!(!matrix.is_empty());
        for row in &matrix.rows {
            let norm: f64 = row.iter().map(|x| x * x).sum::<f64>().sqrt();
            assert!((norm - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_shared_terms_get_lower_idf() {
        let vectorizer = TfidfVectorizer::new((1, 1), 5000, true);
        let matrix = vectorizer.fit_transform(&["python python sql", "python aws"]);

        let python = matrix.features.iter().position(|f| f == "python").unwrap();
        let sql = matrix.features.iter().position(|f| f == "sql").unwrap();
        let row = matrix.row(0).unwrap();
        // python: 2 * 1.0, sql: 1 * (ln(1.5) + 1)
        let ratio = row[python] / row[sql];
        assert!((ratio - 2.0 / (1.5f64.ln() + 1.0)).abs() < 1e-9);
    }

    #[test]
    fn test_max_features_keeps_most_frequent() {
        let vectorizer = TfidfVectorizer::new((1, 1), 2, true);
        let matrix = vectorizer.fit_transform(&["rust rust rust go", "rust python python zig"]);

        assert_eq!(matrix.features, vec!["python".to_string(), "rust".to_string()]);
    }

    #[test]
    fn test_empty_corpus_yields_empty_vocabulary() {
        let vectorizer = TfidfVectorizer::default();
        let matrix = vectorizer.fit_transform(&["", "the and of"]);

        assert!(matrix.is_empty());
        assert_eq!(matrix.rows.len(), 2);
    }
}
