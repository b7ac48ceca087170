//! Tests for the DP cache module.

use std::cell::Cell;
use std::rc::Rc;

use super::*;

/// No dependencies: value is twice the index
struct Doubler;

impl DpProblem<usize, i32> for Doubler {
    fn deps(&self, _n: &usize) -> Vec<usize> {
        vec![]
    }

    fn compute(&self, n: &usize, _deps: Vec<i32>) -> i32 {
        (*n as i32) * 2
    }
}

struct Fibonacci;

impl DpProblem<usize, u64> for Fibonacci {
    fn deps(&self, n: &usize) -> Vec<usize> {
        if *n <= 1 { vec![] } else { vec![n - 1, n - 2] }
    }

    fn compute(&self, n: &usize, deps: Vec<u64>) -> u64 {
        if *n <= 1 { *n as u64 } else { deps[0] + deps[1] }
    }
}

/// Paths through a small grid that may only move right or down, avoiding walls
struct GridPaths {
    rows: Vec<&'static [u8]>,
}

impl DpProblem<(usize, usize), u64> for GridPaths {
    fn deps(&self, &(r, c): &(usize, usize)) -> Vec<(usize, usize)> {
        if self.rows[r][c] == b'#' {
            return vec![];
        }
        let mut deps = Vec::new();
        if r > 0 {
            deps.push((r - 1, c));
        }
        if c > 0 {
            deps.push((r, c - 1));
        }
        deps
    }

    fn compute(&self, &(r, c): &(usize, usize), deps: Vec<u64>) -> u64 {
        match (self.rows[r][c], r, c) {
            (b'#', _, _) => 0,
            (_, 0, 0) => 1,
            _ => deps.iter().sum(),
        }
    }
}

#[test]
fn test_single_values_without_dependencies() {
    let cache = DpCache::builder()
        .backend(VecBackend::new())
        .problem(Doubler)
        .build();

    assert_eq!(cache.get(&5), 10);
    assert_eq!(cache.get(&0), 0);
    assert_eq!(cache.get(&100), 200);
}

#[test]
fn test_fibonacci_chain() {
    let cache = DpCache::builder()
        .backend(VecBackend::new())
        .problem(Fibonacci)
        .build();

    assert_eq!(cache.get(&2), 1);
    assert_eq!(cache.get(&10), 55);
    assert_eq!(cache.get(&20), 6765);
    assert_eq!(cache.get(&90), 2_880_067_194_370_816_120);
}

#[test]
fn test_diamond_dependency_computed_once() {
    let compute_count = Rc::new(Cell::new(0));

    struct Diamond {
        count: Rc<Cell<i32>>,
    }

    impl DpProblem<usize, i32> for Diamond {
        fn deps(&self, n: &usize) -> Vec<usize> {
            match *n {
                0 => vec![1, 2],
                1 | 2 => vec![3],
                _ => vec![],
            }
        }

        fn compute(&self, n: &usize, deps: Vec<i32>) -> i32 {
            self.count.set(self.count.get() + 1);
            match *n {
                0 => deps[0] + deps[1],
                1 => deps[0] * 2,
                2 => deps[0] * 3,
                _ => 10,
            }
        }
    }

    let cache = DpCache::builder()
        .backend(VecBackend::new())
        .problem(Diamond {
            count: compute_count.clone(),
        })
        .build();

    assert_eq!(cache.get(&0), 50);
    assert_eq!(compute_count.get(), 4);

    assert_eq!(cache.get(&0), 50);
    assert_eq!(compute_count.get(), 4);
}

#[test]
fn test_vec_backend_get_or_insert() {
    let mut backend: VecBackend<i32> = VecBackend::new();

    assert_eq!(*backend.get_or_insert(5, || 42), 42);
    assert_eq!(*backend.get_or_insert(5, || 999), 42);
    assert_eq!(backend.get(&5), Some(&42));
    assert_eq!(backend.get(&3), None);
    assert_eq!(backend.get(&10), None);
}

#[test]
fn test_hashmap_backend_get_or_insert() {
    let mut backend: HashMapBackend<String, i32> = HashMapBackend::new();

    assert_eq!(*backend.get_or_insert("dac".to_string(), || 7), 7);
    assert_eq!(*backend.get_or_insert("dac".to_string(), || 8), 7);
    assert_eq!(backend.get(&"dac".to_string()), Some(&7));
    assert_eq!(backend.get(&"fft".to_string()), None);
    assert_eq!(backend.len(), 1);
}

#[test]
fn test_grid_paths_with_walls() {
    let rows = ["...", ".#.", "..."].map(str::as_bytes).to_vec();
    let cache = DpCache::builder()
        .backend(HashMapBackend::new())
        .problem(GridPaths { rows })
        .build();

    // Only the two outer routes remain with the centre blocked
    assert_eq!(cache.get(&(2, 2)), 2);
    assert_eq!(cache.get(&(1, 1)), 0);
    assert_eq!(cache.get(&(0, 2)), 1);
}

#[test]
fn test_closure_problem_matches_trait_problem() {
    let closure_cache = DpCache::new(
        VecBackend::new(),
        ClosureProblem::new(
            |n: &usize| if *n <= 1 { vec![] } else { vec![n - 1, n - 2] },
            |n: &usize, deps: Vec<u64>| if *n <= 1 { *n as u64 } else { deps[0] + deps[1] },
        ),
    );
    let trait_cache = DpCache::new(VecBackend::new(), Fibonacci);

    for n in 0..40 {
        assert_eq!(closure_cache.get(&n), trait_cache.get(&n));
    }
}

#[test]
fn test_into_backend_keeps_computed_values() {
    let cache = DpCache::new(HashMapBackend::new(), Fibonacci);
    cache.get(&10);

    let backend = cache.into_backend();
    assert_eq!(backend.len(), 11);
    assert_eq!(backend.get(&7), Some(&13));
}
