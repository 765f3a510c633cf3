//! Randomized checks of queue algorithms against `Vec` models.

use std::collections::VecDeque;

use nexus_ring::{Arena, Chain, ChainStorage, Node, Queue, QueueError, Storage};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

type Elems = Arena<Node<u32>>;
type ElemQueue = Queue<u32, Elems>;
type TaggedElems = Arena<Node<Tagged>>;
type TaggedContexts = ChainStorage<Tagged, TaggedElems>;

const ROUNDS: usize = 200;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

fn random_values(rng: &mut SmallRng, max_len: usize, max_value: u32) -> Vec<u32> {
    let len = rng.random_range(0..=max_len);
    (0..len).map(|_| rng.random_range(0..max_value)).collect()
}

fn build<T, S>(storage: &mut S, values: &[T]) -> Queue<T, S>
where
    T: Clone + core::fmt::Debug,
    S: nexus_ring::BoundedStorage<Node<T>, Index = u32>,
{
    let mut queue = Queue::new();
    for v in values {
        queue.try_push_back(storage, v.clone()).unwrap();
    }
    queue
}

fn contents<T: Clone, S: Storage<Node<T>, Index = u32>>(queue: &Queue<T, S>, storage: &S) -> Vec<T> {
    let forward: Vec<T> = queue.iter(storage).cloned().collect();
    assert_eq!(forward.len(), queue.size(storage));
    assert_eq!(queue.iter(storage).rev().count(), forward.len());
    assert!(queue.ring().is_well_formed(storage));
    forward
}

/// Ordered by `key` alone, so `seq` exposes how ties were placed.
#[derive(Debug, Clone, Copy)]
struct Tagged {
    key: u8,
    seq: usize,
}

impl PartialEq for Tagged {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Tagged {}

impl PartialOrd for Tagged {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tagged {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

fn tagged(rng: &mut SmallRng, len: usize, keys: u8) -> Vec<Tagged> {
    (0..len)
        .map(|seq| Tagged {
            key: rng.random_range(0..keys),
            seq,
        })
        .collect()
}

fn pairs(values: &[Tagged]) -> Vec<(u8, usize)> {
    values.iter().map(|t| (t.key, t.seq)).collect()
}

#[test]
fn reverse_matches_model_and_is_involution() {
    let mut rng = SmallRng::seed_from_u64(1);
    let mut storage = Elems::with_capacity(256);

    for _ in 0..ROUNDS {
        let model = random_values(&mut rng, 200, 1000);
        let mut queue = build(&mut storage, &model);

        queue.reverse(&mut storage);
        let mut reversed = model.clone();
        reversed.reverse();
        assert_eq!(contents(&queue, &storage), reversed);

        queue.reverse(&mut storage);
        assert_eq!(contents(&queue, &storage), model);

        queue.destroy(&mut storage);
        assert!(storage.is_empty());
    }
}

#[test]
fn sort_is_ordered_stable_and_size_preserving() {
    init_tracing();
    let mut rng = SmallRng::seed_from_u64(2);
    let mut storage = TaggedElems::with_capacity(512);

    for _ in 0..ROUNDS {
        let len = rng.random_range(0..=500);
        let model = tagged(&mut rng, len, 8);
        let descend = rng.random::<bool>();

        let mut queue = build(&mut storage, &model);
        queue.sort(&mut storage, descend);

        let mut expected = model.clone();
        if descend {
            expected.sort_by(|a, b| b.key.cmp(&a.key));
        } else {
            expected.sort_by(|a, b| a.key.cmp(&b.key));
        }
        assert_eq!(pairs(&contents(&queue, &storage)), pairs(&expected));

        queue.destroy(&mut storage);
    }
}

#[test]
fn sort_degenerate_large_inputs() {
    const N: u32 = 50_000;
    let mut storage = Elems::with_capacity(N as usize);

    let ascending: Vec<u32> = (0..N).collect();
    let descending: Vec<u32> = (0..N).rev().collect();
    let equal = vec![7u32; N as usize];

    for input in [&ascending, &descending, &equal] {
        for descend in [false, true] {
            let mut queue = build(&mut storage, input);
            queue.sort(&mut storage, descend);

            let mut expected = input.clone();
            expected.sort_unstable();
            if descend {
                expected.reverse();
            }
            assert_eq!(contents(&queue, &storage), expected);
            queue.destroy(&mut storage);
        }
    }
}

#[test]
fn merge_two_sorted_queues_matches_model() {
    let mut rng = SmallRng::seed_from_u64(3);
    let mut storage = TaggedElems::with_capacity(256);

    for _ in 0..ROUNDS {
        let len = rng.random_range(0..=120);
        let mut model = tagged(&mut rng, len, 6);
        let split = rng.random_range(0..=model.len());
        model[..split].sort_by_key(|t| t.key);
        model[split..].sort_by_key(|t| t.key);

        let mut left = build(&mut storage, &model[..split]);
        let mut right = build(&mut storage, &model[split..]);
        left.merge(&mut storage, &mut right, false);

        assert!(right.is_empty());
        let mut expected = model.clone();
        expected.sort_by_key(|t| t.key);
        assert_eq!(pairs(&contents(&left, &storage)), pairs(&expected));

        left.destroy(&mut storage);
        right.destroy(&mut storage);
    }
}

#[test]
fn delete_mid_removes_index_half_n() {
    let mut storage = Elems::with_capacity(128);

    let mut empty = ElemQueue::new();
    assert_eq!(empty.delete_mid(&mut storage), Err(QueueError::Empty));
    empty.destroy(&mut storage);

    for n in 1..100u32 {
        let model: Vec<u32> = (0..n).collect();
        let mut queue = build(&mut storage, &model);

        assert_eq!(queue.delete_mid(&mut storage), Ok(n / 2));
        let mut expected = model.clone();
        expected.remove((n / 2) as usize);
        assert_eq!(contents(&queue, &storage), expected);

        queue.destroy(&mut storage);
    }
}

fn monotone_model(values: &[u32], keep: impl Fn(u32, u32) -> bool) -> Vec<u32> {
    values
        .iter()
        .enumerate()
        .filter(|&(i, &v)| values[i + 1..].iter().all(|&later| keep(v, later)))
        .map(|(_, &v)| v)
        .collect()
}

#[test]
fn ascend_and_descend_keep_monotone_subsequence() {
    let mut rng = SmallRng::seed_from_u64(4);
    let mut storage = Elems::with_capacity(128);

    for _ in 0..ROUNDS {
        let model = random_values(&mut rng, 100, 20);

        let mut queue = build(&mut storage, &model);
        let expected = monotone_model(&model, |v, later| v <= later);
        assert_eq!(queue.ascend(&mut storage), expected.len());
        let kept = contents(&queue, &storage);
        assert_eq!(kept, expected);
        assert!(kept.windows(2).all(|w| w[0] <= w[1]));
        queue.destroy(&mut storage);

        let mut queue = build(&mut storage, &model);
        let expected = monotone_model(&model, |v, later| v >= later);
        assert_eq!(queue.descend(&mut storage), expected.len());
        let kept = contents(&queue, &storage);
        assert_eq!(kept, expected);
        assert!(kept.windows(2).all(|w| w[0] >= w[1]));
        queue.destroy(&mut storage);
    }
}

#[test]
fn reverse_k_and_swap_pairs_match_model() {
    let mut rng = SmallRng::seed_from_u64(5);
    let mut storage = Elems::with_capacity(128);

    for _ in 0..ROUNDS {
        let model = random_values(&mut rng, 100, 1000);
        let k = rng.random_range(1..=10);

        let mut queue = build(&mut storage, &model);
        queue.reverse_k(&mut storage, k);
        let mut expected = model.clone();
        expected.chunks_exact_mut(k).for_each(<[u32]>::reverse);
        assert_eq!(contents(&queue, &storage), expected);

        // A second pass restores the original order
        queue.reverse_k(&mut storage, k);
        assert_eq!(contents(&queue, &storage), model);
        queue.destroy(&mut storage);

        let mut queue = build(&mut storage, &model);
        queue.swap_pairs(&mut storage);
        let mut expected = model.clone();
        expected.chunks_exact_mut(2).for_each(<[u32]>::reverse);
        assert_eq!(contents(&queue, &storage), expected);
        queue.destroy(&mut storage);
    }
}

fn without_runs(values: &[u32]) -> Vec<u32> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < values.len() {
        let mut j = i + 1;
        while j < values.len() && values[j] == values[i] {
            j += 1;
        }
        if j - i == 1 {
            out.push(values[i]);
        }
        i = j;
    }
    out
}

#[test]
fn delete_dup_drops_every_adjacent_run() {
    let mut rng = SmallRng::seed_from_u64(6);
    let mut storage = Elems::with_capacity(128);

    for _ in 0..ROUNDS {
        let mut model = random_values(&mut rng, 100, 6);
        if rng.random::<bool>() {
            model.sort_unstable();
        }

        let mut queue = build(&mut storage, &model);
        assert_eq!(queue.delete_dup(&mut storage), !model.is_empty());
        assert_eq!(contents(&queue, &storage), without_runs(&model));
        queue.destroy(&mut storage);
    }
}

#[test]
fn chain_merge_matches_stable_sort() {
    init_tracing();
    let mut rng = SmallRng::seed_from_u64(7);
    let mut storage = TaggedElems::with_capacity(1024);
    let mut contexts = TaggedContexts::with_capacity(16);

    for _ in 0..ROUNDS {
        let queues = rng.random_range(1..=16);
        let descend = rng.random::<bool>();
        let mut chain: Chain<Tagged, TaggedElems, TaggedContexts> = Chain::new();
        let mut all = Vec::new();

        for _ in 0..queues {
            let len = rng.random_range(0..=50);
            let mut part = tagged(&mut rng, len, 10);
            for t in &mut part {
                t.seq += all.len();
            }
            if descend {
                part.sort_by(|a, b| b.key.cmp(&a.key));
            } else {
                part.sort_by_key(|t| t.key);
            }
            all.extend_from_slice(&part);

            let queue = build(&mut storage, &part);
            chain.try_push_back(&mut contexts, &storage, queue).unwrap();
        }

        assert_eq!(chain.merge(&mut contexts, &mut storage, descend), all.len());
        assert_eq!(chain.len(&contexts), queues);

        if descend {
            all.sort_by(|a, b| b.key.cmp(&a.key));
        } else {
            all.sort_by_key(|t| t.key);
        }
        let merged = chain.first_queue(&contexts).unwrap();
        assert_eq!(pairs(&contents(merged, &storage)), pairs(&all));

        let sizes: Vec<usize> = chain.contexts(&contexts).map(|c| c.size()).collect();
        assert_eq!(sizes[0], all.len());
        assert!(sizes[1..].iter().all(|&s| s == 0));

        chain.destroy(&mut contexts, &mut storage);
        assert!(storage.is_empty());
        assert!(contexts.is_empty());
    }
}

#[test]
fn end_operations_match_deque_model() {
    let mut rng = SmallRng::seed_from_u64(8);
    let mut storage = Elems::with_capacity(64);
    let mut queue = ElemQueue::new();
    let mut model: VecDeque<(u32, u32)> = VecDeque::new();

    for step in 0..10_000u32 {
        match rng.random_range(0..6) {
            0 | 1 => match queue.try_push_back(&mut storage, step) {
                Ok(key) => model.push_back((key, step)),
                Err(full) => {
                    assert_eq!(model.len(), 64);
                    assert_eq!(full.into_inner(), step);
                }
            },
            2 => match queue.try_push_front(&mut storage, step) {
                Ok(key) => model.push_front((key, step)),
                Err(_) => assert_eq!(model.len(), 64),
            },
            3 => assert_eq!(queue.pop_front(&mut storage), model.pop_front().map(|e| e.1)),
            4 => assert_eq!(queue.pop_back(&mut storage), model.pop_back().map(|e| e.1)),
            _ => {
                if !model.is_empty() {
                    let at = rng.random_range(0..model.len());
                    let (key, value) = model.remove(at).unwrap();
                    assert_eq!(queue.remove(&mut storage, key), Some(value));
                }
            }
        }

        assert_eq!(queue.front(&storage), model.front().map(|e| &e.1));
        assert_eq!(queue.back(&storage), model.back().map(|e| &e.1));
        assert_eq!(storage.len(), model.len());
    }

    let values: Vec<u32> = model.iter().map(|e| e.1).collect();
    assert_eq!(contents(&queue, &storage), values);
    queue.destroy(&mut storage);
}
