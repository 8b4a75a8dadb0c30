//! Static analysis of the syntax tree to find substrings that must appear in
//! any match. Feeds the prefilter and the algorithm
//! selector.

use super::ast::{Ast, EMPTY};

/// The result of analyzing a syntax tree for literal content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct LiteralExtraction {
    /// Required literal substrings, deduplicated and sorted longest-first
    /// (longer literals are more selective prefilters).
    pub(crate) literals: Vec<String>,
    /// True if the tree contains an `Alt` node anywhere. Determines whether
    /// the prefilter predicate downstream should be "any literal matches"
    /// (alternation) or "all literals must match" (concatenation).
    pub(crate) has_alt: bool,
}

impl LiteralExtraction {
    /// A pattern benefits from prefiltering iff its longest literal has
    /// length >= 2; shorter literals are not selective enough.
    pub(crate) fn benefits_from_prefilter(&self) -> bool {
        self.literals.iter().map(|l| l.chars().count()).max().unwrap_or(0) >= 2
    }
}

/// Walk the tree, accumulating runs of consecutive literal characters. A
/// `Dot` or `Star` flushes the current run (nothing is guaranteed to appear
/// verbatim across one); `Concat` threads a run through both children;
/// `Alt` flushes and recurses into each branch independently, unioning their
/// literals rather than taking a Cartesian product across the alternation.
pub(crate) fn extract(ast: &Ast) -> LiteralExtraction {
    let mut literals = Vec::new();
    let mut has_alt = false;
    let mut current = String::new();
    walk(ast, &mut current, &mut literals, &mut has_alt);
    flush(&mut current, &mut literals);

    literals.sort();
    literals.dedup();
    literals.sort_by_key(|l| std::cmp::Reverse(l.chars().count()));

    LiteralExtraction { literals, has_alt }
}

fn flush(current: &mut String, literals: &mut Vec<String>) {
    if !current.is_empty() {
        literals.push(std::mem::take(current));
    }
}

fn walk(ast: &Ast, current: &mut String, literals: &mut Vec<String>, has_alt: &mut bool) {
    match ast {
        Ast::Char(c) if *c == EMPTY => {}
        Ast::Char(c) => current.push(*c),
        Ast::Dot => flush(current, literals),
        Ast::Star(_) => flush(current, literals),
        Ast::Concat(l, r) => {
            walk(l, current, literals, has_alt);
            walk(r, current, literals, has_alt);
        }
        Ast::Alt(l, r) => {
            *has_alt = true;
            flush(current, literals);
            for branch in [l.as_ref(), r.as_ref()] {
                let mut branch_run = String::new();
                walk(branch, &mut branch_run, literals, has_alt);
                flush(&mut branch_run, literals);
            }
        }
    }
}

/// Detect a pure alternation-of-literals tree: every leaf reachable by
/// descending only through `Alt` nodes must be a pure literal concatenation
/// (no `Dot`/`Star`). Returns the flat literal list on success.
pub(crate) fn alternation_of_literals(ast: &Ast) -> Option<Vec<String>> {
    fn collect(ast: &Ast, out: &mut Vec<String>) -> bool {
        match ast {
            Ast::Alt(l, r) => collect(l, out) && collect(r, out),
            _ => match pure_literal(ast) {
                Some(s) => {
                    out.push(s);
                    true
                }
                None => false,
            },
        }
    }
    let mut out = Vec::new();
    if collect(ast, &mut out) && out.len() >= 2 {
        Some(out)
    } else {
        None
    }
}

/// Render `ast` as a literal string if the whole pattern is a pure
/// concatenation of characters with no `Dot`, `Star`, or `Alt` anywhere.
/// This is the "is this pattern just a literal?" check used by the selector
/// to route to KMP/Boyer-Moore instead of building an automaton at all.
pub(crate) fn pure_literal_pattern(ast: &Ast) -> Option<String> {
    pure_literal(ast)
}

/// Render `ast` as a literal string if it is a pure concatenation of
/// characters (no `Dot`, `Star`, or nested `Alt`); `None` otherwise.
fn pure_literal(ast: &Ast) -> Option<String> {
    match ast {
        Ast::Char(c) if *c == EMPTY => Some(String::new()),
        Ast::Char(c) => Some(c.to_string()),
        Ast::Concat(l, r) => {
            let mut s = pure_literal(l)?;
            s.push_str(&pure_literal(r)?);
            Some(s)
        }
        Ast::Dot | Ast::Star(_) | Ast::Alt(_, _) => None,
    }
}
