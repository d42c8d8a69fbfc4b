//! Term-frequency / inverse-document-frequency vectorization.
//!
//! The vocabulary is built per request over the joint set of capability
//! phrases and feature texts, so query and corpus share one coordinate
//! space and cosine similarity is meaningful between them.

use crate::stopwords::is_stop_word;
use ahash::AHashMap;
use thiserror::Error;
use vendorq_core::SparseVector;

#[derive(Debug, Clone, Error)]
pub enum VectorizeError {
    #[error("cannot fit a vocabulary over an empty text set")]
    EmptyTextSet,
}

/// TF-IDF vectorizer over unigrams and bigrams.
///
/// Weighting is raw term frequency times smoothed inverse document
/// frequency, idf(t) = ln((1 + N) / (1 + df(t))) + 1, and every produced
/// vector is L2-normalized so similarity reduces to a dot product.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: AHashMap<String, u32>,
    idf: Vec<f32>,
}

impl TfidfVectorizer {
    /// Build the vocabulary and idf table over `texts`.
    ///
    /// When more than `max_features` distinct terms exist, the terms with
    /// the highest corpus-wide occurrence count are kept; ties break
    /// alphabetically so the capped vocabulary is deterministic.
    pub fn fit<S: AsRef<str>>(texts: &[S], max_features: usize) -> Result<Self, VectorizeError> {
        if texts.is_empty() {
            return Err(VectorizeError::EmptyTextSet);
        }

        // term -> (corpus-wide occurrence count, document frequency)
        let mut stats: AHashMap<String, (u64, u32)> = AHashMap::new();
        for text in texts {
            let mut tf: AHashMap<String, u64> = AHashMap::new();
            for term in term_stream(text.as_ref()) {
                *tf.entry(term).or_insert(0) += 1;
            }
            for (term, count) in tf {
                let entry = stats.entry(term).or_insert((0, 0));
                entry.0 += count;
                entry.1 += 1;
            }
        }

        let mut stats: Vec<(String, u64, u32)> = stats
            .into_iter()
            .map(|(term, (count, df))| (term, count, df))
            .collect();
        if stats.len() > max_features {
            stats.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            stats.truncate(max_features);
        }
        stats.sort_by(|a, b| a.0.cmp(&b.0));

        let n_docs = texts.len() as f32;
        let mut vocabulary = AHashMap::with_capacity(stats.len());
        let mut idf = Vec::with_capacity(stats.len());
        for (i, (term, _, df)) in stats.into_iter().enumerate() {
            vocabulary.insert(term, i as u32);
            idf.push(((1.0 + n_docs) / (1.0 + df as f32)).ln() + 1.0);
        }

        Ok(Self { vocabulary, idf })
    }

    /// Vectorize one text against the fitted vocabulary.
    ///
    /// Out-of-vocabulary terms are ignored; a text with no known terms
    /// yields an empty vector, which scores zero against everything.
    #[must_use]
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut tf: AHashMap<u32, f32> = AHashMap::new();
        for term in term_stream(text) {
            if let Some(&idx) = self.vocabulary.get(&term) {
                *tf.entry(idx).or_insert(0.0) += 1.0;
            }
        }
        let entries: Vec<(u32, f32)> = tf
            .into_iter()
            .map(|(idx, count)| (idx, count * self.idf[idx as usize]))
            .collect();
        let mut vector = SparseVector::new(entries);
        vector.normalize();
        vector
    }

    #[inline]
    #[must_use]
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }
}

/// Tokenize text for vectorization.
/// Uses lowercase normalization, splits on non-alphanumeric characters and
/// drops single-character tokens.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| s.len() > 1)
        .map(str::to_string)
        .collect()
}

/// Unigrams plus adjacent bigrams over the stopword-filtered token stream.
fn term_stream(text: &str) -> Vec<String> {
    let tokens: Vec<String> = tokenize(text)
        .into_iter()
        .filter(|t| !is_stop_word(t))
        .collect();

    let mut terms = Vec::with_capacity(tokens.len() * 2);
    terms.extend(tokens.iter().cloned());
    for pair in tokens.windows(2) {
        terms.push(format!("{} {}", pair[0], pair[1]));
    }
    terms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_lowercases_and_drops_short_tokens() {
        let tokens = tokenize("A/B Testing, e-mail & CRM!");
        assert_eq!(tokens, vec!["testing", "mail", "crm"]);
    }

    #[test]
    fn test_bigrams_form_after_stopword_removal() {
        let terms = term_stream("tracks and scores leads");
        assert!(terms.contains(&"tracks".to_string()));
        assert!(terms.contains(&"tracks scores".to_string()));
        assert!(terms.contains(&"scores leads".to_string()));
        assert!(!terms.iter().any(|t| t.contains("and")));
    }

    #[test]
    fn test_identical_texts_share_a_unit_vector() {
        let texts = ["lead management", "lead management", "email campaigns"];
        let vectorizer = TfidfVectorizer::fit(&texts, 5_000).unwrap();
        let a = vectorizer.transform("lead management");
        let b = vectorizer.transform("lead management");
        assert!((a.dot(&b) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_vocabulary_cap_keeps_most_frequent_terms() {
        let texts = ["alpha alpha alpha beta", "alpha gamma"];
        let vectorizer = TfidfVectorizer::fit(&texts, 2).unwrap();
        assert_eq!(vectorizer.vocabulary_len(), 2);
        // "alpha" dominates the counts, so rarer terms fall out of vocabulary
        assert!(!vectorizer.transform("alpha").is_empty());
        assert!(vectorizer.transform("gamma").is_empty());
    }

    #[test]
    fn test_cap_ties_break_alphabetically() {
        let texts = ["beta delta", "beta delta"];
        // terms: beta, delta, "beta delta", all with identical counts
        let vectorizer = TfidfVectorizer::fit(&texts, 2).unwrap();
        assert_eq!(vectorizer.vocabulary_len(), 2);
        assert!(!vectorizer.transform("beta").is_empty());
        assert!(vectorizer.transform("delta").is_empty());
    }

    #[test]
    fn test_empty_text_set_is_an_error() {
        let texts: Vec<&str> = Vec::new();
        assert!(matches!(
            TfidfVectorizer::fit(&texts, 100),
            Err(VectorizeError::EmptyTextSet)
        ));
    }

    #[test]
    fn test_unknown_terms_yield_empty_vector() {
        let vectorizer = TfidfVectorizer::fit(&["lead management"], 5_000).unwrap();
        assert!(vectorizer.transform("inventory forecasting").is_empty());
    }
}
