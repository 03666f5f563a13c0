use crate::error::SearchError;
use crate::vector::SparseVector;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Added to the euclidean distance so an exact match scores `1 / EPSILON` instead of infinity.
pub const EUCLIDEAN_EPSILON: f64 = 1e-4;

/// How a query vector is compared to a document vector. Higher scores are better for both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimilarityMethod {
    #[default]
    Cosine,
    Euclidean,
}

impl SimilarityMethod {
    pub fn score(self, query: &SparseVector, document: &SparseVector) -> f64 {
        match self {
            SimilarityMethod::Cosine => cosine(query, document),
            SimilarityMethod::Euclidean => inverse_euclidean(query, document),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SimilarityMethod::Cosine => "cosine",
            SimilarityMethod::Euclidean => "euclidean",
        }
    }
}

impl FromStr for SimilarityMethod {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cosine" => Ok(SimilarityMethod::Cosine),
            "euclidean" => Ok(SimilarityMethod::Euclidean),
            _ => Err(SearchError::UnknownMethod(s.to_string())),
        }
    }
}

impl fmt::Display for SimilarityMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `dot(q, d) / (|q| * |d|)`, exactly 0 when either vector has zero norm.
pub fn cosine(query: &SparseVector, document: &SparseVector) -> f64 {
    let qn = query.norm();
    let dn = document.norm();
    if qn == 0.0 || dn == 0.0 {
        return 0.0;
    }
    query.dot(document) / (qn * dn)
}

/// Distance over the union of both term sets.
pub fn euclidean_distance(a: &SparseVector, b: &SparseVector) -> f64 {
    let terms: HashSet<&str> = a.terms().chain(b.terms()).collect();
    terms
        .into_iter()
        .map(|t| {
            let d = a.get(t) - b.get(t);
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

pub fn inverse_euclidean(query: &SparseVector, document: &SparseVector) -> f64 {
    1.0 / (euclidean_distance(query, document) + EUCLIDEAN_EPSILON)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(pairs: &[(&str, f64)]) -> SparseVector {
        pairs.iter().map(|(t, w)| (t.to_string(), *w)).collect()
    }

    #[test]
    fn cosine_of_identical_vectors_is_one() {
        let a = v(&[("cat", 0.3), ("dog", 0.7)]);
        assert!((cosine(&a, &a) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn cosine_with_zero_vector_is_zero_not_nan() {
        let a = v(&[("cat", 0.3)]);
        let empty = SparseVector::new();
        assert_eq!(cosine(&a, &empty), 0.0);
        assert_eq!(cosine(&empty, &a), 0.0);
        assert_eq!(cosine(&empty, &empty), 0.0);
    }

    #[test]
    fn disjoint_vectors_have_zero_cosine() {
        assert_eq!(cosine(&v(&[("cat", 1.0)]), &v(&[("dog", 1.0)])), 0.0);
    }

    #[test]
    fn euclidean_uses_term_union() {
        let a = v(&[("x", 3.0)]);
        let b = v(&[("y", 4.0)]);
        assert_eq!(euclidean_distance(&a, &b), 5.0);
        assert_eq!(inverse_euclidean(&a, &b), 1.0 / (5.0 + EUCLIDEAN_EPSILON));
    }

    #[test]
    fn exact_match_is_large_but_finite() {
        let a = v(&[("x", 0.5)]);
        let s = inverse_euclidean(&a, &a);
        assert!(s.is_finite());
        assert_eq!(s, 1.0 / EUCLIDEAN_EPSILON);
    }

    #[test]
    fn method_parsing() {
        assert_eq!("cosine".parse::<SimilarityMethod>().unwrap(), SimilarityMethod::Cosine);
        assert_eq!("Euclidean".parse::<SimilarityMethod>().unwrap(), SimilarityMethod::Euclidean);
        assert_eq!(
            "manhattan".parse::<SimilarityMethod>().unwrap_err(),
            SearchError::UnknownMethod("manhattan".into())
        );
        assert_eq!(SimilarityMethod::default(), SimilarityMethod::Cosine);
        assert_eq!(SimilarityMethod::Euclidean.to_string(), "euclidean");
    }
}
