//! Aho-Corasick multi-literal search: a trie over the
//! literal set with BFS-built failure links, each node's output inheriting
//! the outputs along its failure edge.

use std::collections::{BTreeMap, VecDeque};

#[derive(Default)]
struct Node {
    children: BTreeMap<char, usize>,
    fail: usize,
    /// Indices (into the original pattern list) of literals ending here,
    /// including those inherited via the failure chain.
    outputs: Vec<usize>,
}

/// A single hit: which literal matched and where, in char offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Hit {
    pub(crate) pattern_index: usize,
    pub(crate) start: usize,
    pub(crate) end: usize,
}

pub(crate) struct AhoCorasick {
    nodes: Vec<Node>,
    pattern_lens: Vec<usize>,
}

impl AhoCorasick {
    pub(crate) fn build<S: AsRef<str>>(patterns: &[S]) -> Self {
        let mut nodes = vec![Node::default()];
        let pattern_lens = patterns.iter().map(|p| p.as_ref().chars().count()).collect();

        for (idx, pattern) in patterns.iter().enumerate() {
            let mut state = 0;
            for c in pattern.as_ref().chars() {
                state = *nodes[state].children.entry(c).or_insert_with(|| {
                    nodes.push(Node::default());
                    nodes.len() - 1
                });
            }
            nodes[state].outputs.push(idx);
        }

        let mut queue = VecDeque::new();
        let root_children: Vec<usize> = nodes[0].children.values().copied().collect();
        for &child in &root_children {
            nodes[child].fail = 0;
            queue.push_back(child);
        }

        while let Some(u) = queue.pop_front() {
            let children: Vec<(char, usize)> =
                nodes[u].children.iter().map(|(&c, &v)| (c, v)).collect();
            for (c, v) in children {
                let mut f = nodes[u].fail;
                while f != 0 && !nodes[f].children.contains_key(&c) {
                    f = nodes[f].fail;
                }
                let fail_target = match nodes[f].children.get(&c) {
                    Some(&t) if t != v => t,
                    _ => 0,
                };
                nodes[v].fail = fail_target;
                let inherited = nodes[fail_target].outputs.clone();
                nodes[v].outputs.extend(inherited);
                queue.push_back(v);
            }
        }

        Self {
            nodes,
            pattern_lens,
        }
    }

    fn goto(&self, mut state: usize, c: char) -> usize {
        loop {
            if let Some(&next) = self.nodes[state].children.get(&c) {
                return next;
            }
            if state == 0 {
                return 0;
            }
            state = self.nodes[state].fail;
        }
    }

    /// All hits of any literal in `text`, ordered by start offset.
    pub(crate) fn search(&self, text: &str) -> Vec<Hit> {
        let mut state = 0;
        let mut hits = Vec::new();
        for (i, c) in text.chars().enumerate() {
            state = self.goto(state, c);
            for &pattern_index in &self.nodes[state].outputs {
                let end = i + 1;
                let start = end - self.pattern_lens[pattern_index];
                hits.push(Hit {
                    pattern_index,
                    start,
                    end,
                });
            }
        }
        hits.sort_by_key(|h| (h.start, h.end));
        hits
    }

    /// Whether any literal in the set matches anywhere in `text`.
    pub(crate) fn contains(&self, text: &str) -> bool {
        let mut state = 0;
        for c in text.chars() {
            state = self.goto(state, c);
            if !self.nodes[state].outputs.is_empty() {
                return true;
            }
        }
        false
    }

    /// Whether every literal in the set appears somewhere in `text`, in any order.
    pub(crate) fn contains_all(&self, text: &str) -> bool {
        let total = self.pattern_lens.len();
        if total == 0 {
            return true;
        }
        let mut seen = vec![false; total];
        let mut remaining = total;
        let mut state = 0;
        for c in text.chars() {
            state = self.goto(state, c);
            for &pattern_index in &self.nodes[state].outputs {
                if !seen[pattern_index] {
                    seen[pattern_index] = true;
                    remaining -= 1;
                    if remaining == 0 {
                        return true;
                    }
                }
            }
        }
        remaining == 0
    }

    /// The leftmost hit of any literal, if any.
    pub(crate) fn find_first(&self, text: &str) -> Option<Hit> {
        self.search(text).into_iter().next()
    }
}
