//! Linear-time literal search: KMP and Boyer-Moore for a
//! single literal, Aho-Corasick for a literal set.

pub(crate) mod aho_corasick;
pub(crate) mod boyer_moore;
pub(crate) mod kmp;
