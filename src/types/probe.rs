//! Outcome of a single step in a format-detection fallback chain.

/// Result of probing one candidate (file name, signature, schema variant).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe<T> {
    /// The candidate was recognised and produced a usable value.
    Matched(T),
    /// The candidate looked right but could not be decoded.
    Invalid(String),
    /// The candidate is not of this kind; try the next one.
    NoMatch,
}
