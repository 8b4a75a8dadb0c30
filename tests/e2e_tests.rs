//! End-to-end scenarios S1-S7.

use std::io::Write;

use linerex::{compile, CompileOptions, MatcherChoice, MatcherKind};

#[test]
fn test_s1_dot_star_wraps_literal() {
    let m = compile("(.*)(abc)(.*)", CompileOptions::default()).unwrap();
    assert!(m.is_match("jdioaabczd"));
    assert!(m.find_all("jdioaabczd").iter().any(|x| x.text().contains("abc")));
}

#[test]
fn test_s2_alternation_star_full_match() {
    let m = compile("(a|b)*abb", CompileOptions::default()).unwrap();
    for (s, expected) in [
        ("abb", true),
        ("aabb", true),
        ("babb", true),
        ("ab", false),
        ("", false),
    ] {
        assert_eq!(m.is_match(s), expected, "input {s:?}");
    }
}

#[test]
fn test_s3_find_all_leftmost_longest() {
    let m = compile("a(.*)b", CompileOptions::default()).unwrap();
    let spans: Vec<(usize, usize)> = m
        .find_all("ab axxxb")
        .iter()
        .map(|x| (x.start(), x.end()))
        .collect();
    assert_eq!(spans, vec![(0, 2), (3, 8)]);
}

#[test]
fn test_s4_alternation_of_literals() {
    let m = compile("cat|dog|bird", CompileOptions::default()).unwrap();
    assert_eq!(m.kind(), MatcherKind::AhoCorasick);
    let found = m.find_all("I have a cat and a dog but no bird");
    let words: Vec<&str> = found.iter().map(|x| x.text()).collect();
    assert_eq!(words, vec!["cat", "dog", "bird"]);
}

#[test]
fn test_s5_pure_literal() {
    let m = compile("test", CompileOptions::default()).unwrap();
    assert_eq!(m.kind(), MatcherKind::LiteralKmp);
    let matches = m.find_all("this is a test line");
    assert_eq!(matches.len(), 1);
    assert_eq!((matches[0].start(), matches[0].end()), (10, 14));
}

#[test]
fn test_s6_star_matches_empty_string() {
    let m = compile("a*", CompileOptions::default()).unwrap();
    assert!(m.is_match(""));
    let matches = m.find_all("");
    assert_eq!(matches.len(), 1);
    assert!(matches[0].is_empty());
}

#[test]
fn test_s7_lazy_dfa_agrees_with_min_dfa_across_curated_suite() {
    let patterns = [
        "a", "abc", "a|b", "a*", "a.c", ".*", "(a|b)*", "(a|b)*abb", "(.*)abc", "a(.*)b",
        "(.*)(abc)(.*)", "cat|dog|bird",
    ];
    let inputs = ["", "a", "abc", "abb", "aabb", "babb", "ab", "cat", "xyzabcxyz"];
    for pattern in patterns {
        let lazy_options = CompileOptions {
            matcher: MatcherChoice::LazyDfa,
            ..CompileOptions::default()
        };
        let min_options = CompileOptions {
            matcher: MatcherChoice::MinDfa,
            ..CompileOptions::default()
        };
        let lazy = compile(pattern, lazy_options).unwrap();
        let min_dfa = compile(pattern, min_options).unwrap();
        for input in inputs {
            assert_eq!(
                lazy.is_match(input),
                min_dfa.is_match(input),
                "pattern {pattern:?} input {input:?}"
            );
            let lazy_spans: Vec<(usize, usize)> =
                lazy.find_all(input).iter().map(|m| (m.start(), m.end())).collect();
            let min_spans: Vec<(usize, usize)> =
                min_dfa.find_all(input).iter().map(|m| (m.start(), m.end())).collect();
            assert_eq!(lazy_spans, min_spans, "pattern {pattern:?} input {input:?}");
        }
    }
}

struct TempFile {
    path: std::path::PathBuf,
}

impl TempFile {
    fn new(name: &str, contents: &str) -> Self {
        let mut path = std::env::temp_dir();
        path.push(format!("linerex-e2e-{}-{name}", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        Self { path }
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

#[test]
fn test_search_stream_reports_line_numbers_and_matches() {
    let file = TempFile::new("search", "no hit here\ncat on the mat\nanother dog\nnothing\n");
    let m = compile("cat|dog", CompileOptions::default()).unwrap();
    let hits: Vec<(usize, Vec<String>)> = m
        .search_stream(&file.path)
        .unwrap()
        .map(|r| {
            let lm = r.unwrap();
            (lm.line_number, lm.matches.iter().map(|x| x.text().to_string()).collect())
        })
        .collect();
    assert_eq!(
        hits,
        vec![(2, vec!["cat".to_string()]), (3, vec!["dog".to_string()])]
    );
}

#[test]
fn test_count_and_has_match() {
    let file = TempFile::new("count", "cat\nno\ndog\nno\ncat\n");
    let m = compile("cat|dog", CompileOptions::default()).unwrap();
    assert_eq!(m.count(&file.path).unwrap(), 3);
    assert!(m.has_match(&file.path).unwrap());

    let none = compile("elephant", CompileOptions::default()).unwrap();
    assert_eq!(none.count(&file.path).unwrap(), 0);
    assert!(!none.has_match(&file.path).unwrap());
}

#[test]
fn test_invert_match_reports_non_hit_lines() {
    let file = TempFile::new("invert", "cat\nno\ndog\nno\n");
    let options = CompileOptions {
        invert_match: true,
        ..CompileOptions::default()
    };
    let m = compile("cat|dog", options).unwrap();
    let lines: Vec<usize> = m
        .search_stream(&file.path)
        .unwrap()
        .map(|r| r.unwrap().line_number)
        .collect();
    assert_eq!(lines, vec![2, 4]);
}

#[test]
fn test_search_stream_surfaces_io_error_for_missing_file() {
    let m = compile("cat", CompileOptions::default()).unwrap();
    assert!(m.search_stream("/nonexistent/path/linerex-test").is_err());
}
