//! Union-find clustering of similar pairs. Paths are interned to dense
//! integer ids on first sight and the disjoint-set itself is
//! array-backed with iterative path compression and union-by-rank — no
//! recursion, no per-step hashing, and the structure is plain `Vec<u32>`
//! data if it ever needs to cross a thread boundary.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

struct DisjointSet {
    parent: Vec<u32>,
    rank: Vec<u8>,
}

impl DisjointSet {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n as u32).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, mut x: u32) -> u32 {
        while self.parent[x as usize] != x {
            let grandparent = self.parent[self.parent[x as usize] as usize];
            self.parent[x as usize] = grandparent;
            x = grandparent;
        }
        x
    }

    fn union(&mut self, a: u32, b: u32) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return;
        }
        match self.rank[ra as usize].cmp(&self.rank[rb as usize]) {
            std::cmp::Ordering::Less => self.parent[ra as usize] = rb,
            std::cmp::Ordering::Greater => self.parent[rb as usize] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb as usize] = ra;
                self.rank[ra as usize] += 1;
            }
        }
    }
}

/// Path interner: assigns each distinct path a dense `u32` id in first-seen
/// order.
struct Interner {
    ids: HashMap<PathBuf, u32>,
    paths: Vec<PathBuf>,
}

impl Interner {
    fn new() -> Self {
        Self {
            ids: HashMap::new(),
            paths: Vec::new(),
        }
    }

    fn intern(&mut self, path: &Path) -> u32 {
        if let Some(&id) = self.ids.get(path) {
            return id;
        }
        let id = self.paths.len() as u32;
        self.paths.push(path.to_path_buf());
        self.ids.insert(path.to_path_buf(), id);
        id
    }
}

/// Merge an edge list of `(path_a, path_b)` pairs into clusters via
/// union-find. Each returned cluster is a sorted, deduplicated list of
/// distinct paths with at least 2 members; singletons are dropped.
pub fn pairs_to_groups(pairs: &[(PathBuf, PathBuf)]) -> Vec<Vec<PathBuf>> {
    if pairs.is_empty() {
        return Vec::new();
    }

    let mut interner = Interner::new();
    let edges: Vec<(u32, u32)> = pairs
        .iter()
        .map(|(a, b)| (interner.intern(a), interner.intern(b)))
        .collect();

    let mut dsu = DisjointSet::new(interner.paths.len());
    for (a, b) in edges {
        dsu.union(a, b);
    }

    let mut clusters: HashMap<u32, Vec<PathBuf>> = HashMap::new();
    for id in 0..interner.paths.len() as u32 {
        let root = dsu.find(id);
        clusters
            .entry(root)
            .or_default()
            .push(interner.paths[id as usize].clone());
    }

    let mut groups: Vec<Vec<PathBuf>> = clusters
        .into_values()
        .filter(|members| members.len() >= 2)
        .map(|mut members| {
            members.sort();
            members
        })
        .collect();
    groups.sort();
    groups
}
