use criterion::{criterion_group, criterion_main, Criterion};
use linerex::{compile, CompileOptions, MatcherChoice};

const LINE: &str = "the quick brown fox jumps over the lazy dog near the riverbank every single morning";

fn corpus(lines: usize) -> String {
    let mut text = String::with_capacity(LINE.len() * lines);
    for i in 0..lines {
        text.push_str(LINE);
        if i % 37 == 0 {
            text.push_str(" cat");
        }
        if i % 53 == 0 {
            text.push_str(" dog");
        }
        text.push('\n');
    }
    text
}

fn compile_with(pattern: &str, choice: MatcherChoice) -> linerex::Matcher {
    let options = CompileOptions {
        matcher: choice,
        ..CompileOptions::default()
    };
    compile(pattern, options).unwrap()
}

fn find_all_benchmark(c: &mut Criterion) {
    let text = corpus(2000);
    let lines: Vec<&str> = text.lines().collect();

    let mut group = c.benchmark_group("find_all");

    let literal_kmp = compile_with("cat", MatcherChoice::LiteralKmp);
    group.bench_function("literal_kmp", |b| {
        b.iter(|| {
            for line in &lines {
                let _ = literal_kmp.find_all(line);
            }
        });
    });

    let literal_bm = compile_with("riverbank", MatcherChoice::LiteralBm);
    group.bench_function("literal_bm", |b| {
        b.iter(|| {
            for line in &lines {
                let _ = literal_bm.find_all(line);
            }
        });
    });

    let aho_corasick = compile_with("cat|dog|fox", MatcherChoice::AhoCorasick);
    group.bench_function("aho_corasick", |b| {
        b.iter(|| {
            for line in &lines {
                let _ = aho_corasick.find_all(line);
            }
        });
    });

    let min_dfa = compile_with("(quick|lazy)(.*)fox", MatcherChoice::MinDfa);
    group.bench_function("min_dfa", |b| {
        b.iter(|| {
            for line in &lines {
                let _ = min_dfa.find_all(line);
            }
        });
    });

    let lazy_dfa = compile_with("(quick|lazy)(.*)fox", MatcherChoice::LazyDfa);
    group.bench_function("lazy_dfa", |b| {
        b.iter(|| {
            for line in &lines {
                let _ = lazy_dfa.find_all(line);
            }
        });
    });

    let nfa = compile_with("(quick|lazy)(.*)fox", MatcherChoice::Nfa);
    group.bench_function("nfa", |b| {
        b.iter(|| {
            for line in &lines {
                let _ = nfa.find_all(line);
            }
        });
    });

    group.finish();
}

fn compile_benchmark(c: &mut Criterion) {
    c.bench_function("compile_min_dfa", |b| {
        b.iter(|| compile("(a|b)*abb", CompileOptions::default()).unwrap());
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(50);
    targets = find_all_benchmark, compile_benchmark
}

criterion_main!(benches);
