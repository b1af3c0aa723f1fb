use super::*;

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use std::collections::{BTreeMap, BTreeSet};

fn validate_trie<V>(t: &Trie<V>) {
    assert!(!t.root().is_terminal(), "root must never hold a value");

    let mut stack: Vec<(&Node<V>, bool)> = vec![(t.root(), true)];
    let mut terminal_count = 0usize;
    while let Some((node, is_root)) = stack.pop() {
        if node.is_terminal() {
            terminal_count += 1;
        } else if !is_root {
            assert!(
                !node.is_leaf(),
                "childless node without a value should have been pruned"
            );
        }
        stack.extend(node.children().map(|(_, child)| (child, false)));
    }

    assert_eq!(
        terminal_count,
        t.len(),
        "reachable terminal count must match Trie::len"
    );
}

fn key_strategy() -> impl Strategy<Value = String> + Clone {
    // A small alphabet so keys share prefixes and collide often.
    "[a-d]{1,6}"
}

#[derive(Clone, Debug, Arbitrary)]
enum Op {
    #[proptest(weight = 50)]
    Put(#[proptest(strategy = "key_strategy()")] String, u64),
    #[proptest(weight = 15)]
    Remove(#[proptest(strategy = "key_strategy()")] String),
    #[proptest(weight = 10)]
    Delete(#[proptest(strategy = "key_strategy()")] String),
    #[proptest(weight = 25)]
    Get(#[proptest(strategy = "key_strategy()")] String),
}

fn model_from(keys: &[String]) -> (Trie<usize>, BTreeMap<String, usize>) {
    let mut t = Trie::new();
    let mut m = BTreeMap::new();
    for (i, k) in keys.iter().enumerate() {
        assert_eq!(t.put(k, i).unwrap(), m.insert(k.clone(), i));
    }
    (t, m)
}

/// Positional mismatches of `key` against `word`; positions past the end of
/// `word` count as mismatches.
fn positional_distance(key: &str, word: &str) -> usize {
    let word: Vec<char> = word.chars().collect();
    key.chars()
        .enumerate()
        .filter(|&(i, c)| word.get(i) != Some(&c))
        .count()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 50_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence(ops in prop::collection::vec(any::<Op>(), 0..=1000)) {
        let mut t: Trie<u64> = Trie::new();
        let mut m: BTreeMap<String, u64> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Put(key, value) => {
                    let old_t = t.put(&key, value).unwrap();
                    let old_m = m.insert(key, value);
                    prop_assert_eq!(old_t, old_m);
                }
                Op::Remove(key) => {
                    let old_t = t.remove(&key).unwrap();
                    let old_m = m.remove(&key);
                    prop_assert_eq!(old_t, old_m);
                }
                Op::Delete(key) => {
                    let had = m.remove(&key).is_some();
                    let emptied = t.delete(&key).unwrap();
                    prop_assert_eq!(emptied, had && m.is_empty());
                    prop_assert!(!t.contains(&key).unwrap());
                }
                Op::Get(key) => {
                    let got_t = t.get(&key).unwrap().copied();
                    let got_m = m.get(&key).copied();
                    prop_assert_eq!(got_t, got_m);
                }
            }

            prop_assert_eq!(t.len(), m.len());
            prop_assert_eq!(t.is_empty(), m.is_empty());
        }

        validate_trie(&t);
        let got: Vec<(String, u64)> = t.iter().map(|(k, v)| (k, *v)).collect();
        let expected: Vec<(String, u64)> = m.iter().map(|(k, v)| (k.clone(), *v)).collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_prefix_queries(
        keys in prop::collection::vec(key_strategy(), 0..=64),
        prefix in "[a-d]{1,3}",
    ) {
        let (t, m) = model_from(&keys);

        let scoped = t.keys_with_prefix(&prefix).unwrap();
        prop_assert!(scoped.iter().all(|k| k.starts_with(&prefix)));
        let expected: Vec<String> = m.keys().filter(|k| k.starts_with(&prefix)).cloned().collect();
        prop_assert_eq!(&scoped, &expected);
        prop_assert_eq!(t.count_words_with_prefix(&prefix), scoped.len());
        prop_assert_eq!(t.count_words_with_prefix(""), m.len());
        prop_assert_eq!(has_prefix(&t, &prefix), m.keys().any(|k| k.starts_with(&prefix)));
    }

    #[test]
    fn prop_longest_prefix_of(
        keys in prop::collection::vec(key_strategy(), 0..=64),
        s in "[a-d]{1,8}",
    ) {
        let (t, m) = model_from(&keys);

        let expected = m
            .keys()
            .filter(|k| s.starts_with(k.as_str()))
            .max_by_key(|k| k.len())
            .cloned()
            .unwrap_or_default();
        prop_assert_eq!(t.longest_prefix_of(&s).unwrap(), expected);
    }

    #[test]
    fn prop_corrections_match_brute_force(
        keys in prop::collection::vec(key_strategy(), 0..=64),
        word in "[a-d]{1,6}",
        max_distance in 0usize..4,
    ) {
        let (t, m) = model_from(&keys);

        let got = t.get_corrections(&word, max_distance).unwrap();
        prop_assert!(
            got.windows(2).all(|w| w[0].chars().count() <= w[1].chars().count()),
            "breadth-first order yields shorter keys first"
        );

        let got: BTreeSet<String> = got.into_iter().collect();
        let expected: BTreeSet<String> = m
            .keys()
            .filter(|k| {
                let d = positional_distance(k, &word);
                d > 0 && d <= max_distance
            })
            .cloned()
            .collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_suffix_count(
        keys in prop::collection::vec(key_strategy(), 0..=64),
        pattern in "[a-d]{0,3}",
    ) {
        let (t, m) = model_from(&keys);
        let expected = m.keys().filter(|k| k.ends_with(&pattern)).count();
        prop_assert_eq!(count_words_with_suffix(&t, &pattern), expected);
    }

    #[test]
    fn prop_common_prefix(words in prop::collection::vec("[a-c]{1,6}", 1..=8)) {
        let expected: String = {
            let first = &words[0];
            let mut end = 0;
            for (i, c) in first.char_indices() {
                let candidate = &first[..i + c.len_utf8()];
                if words.iter().all(|w| w.starts_with(candidate)) {
                    end = candidate.len();
                } else {
                    break;
                }
            }
            first[..end].to_string()
        };
        prop_assert_eq!(find_longest_common_word(&words).unwrap(), expected);
    }
}

/// Calls `f` with every ordering of `items`, stepping index orderings in
/// lexicographic order.
fn for_each_permutation<T: Clone>(items: &[T], mut f: impl FnMut(Vec<T>)) {
    let mut order: Vec<usize> = (0..items.len()).collect();
    loop {
        f(order.iter().map(|&i| items[i].clone()).collect());

        let Some(pivot) = (1..order.len()).rev().find(|&i| order[i - 1] < order[i]) else {
            return;
        };
        let swap = (pivot..order.len())
            .rev()
            .find(|&j| order[j] > order[pivot - 1])
            .unwrap_or(pivot);
        order.swap(pivot - 1, swap);
        order[pivot..].reverse();
    }
}

#[test]
fn permutations_visit_each_ordering_once() {
    let mut seen = BTreeSet::new();
    for_each_permutation(&[1, 2, 3, 4], |perm| {
        assert!(seen.insert(perm), "ordering repeated");
    });
    assert_eq!(seen.len(), 24);
}

fn small_set() -> Vec<String> {
    ["a", "b", "c", "aa", "ab", "ba", "abc"]
        .into_iter()
        .map(String::from)
        .collect()
}

#[test]
fn exhaustive_insert_order_small_set() {
    let keys = small_set();

    for_each_permutation(&keys, |perm| {
        let mut t: Trie<u64> = Trie::new();
        let mut m: BTreeMap<String, u64> = BTreeMap::new();

        for (i, k) in perm.into_iter().enumerate() {
            let v = i as u64;
            assert_eq!(t.put(&k, v).unwrap(), m.insert(k, v));
        }

        validate_trie(&t);
        let got: Vec<(String, u64)> = t.iter().map(|(k, v)| (k, *v)).collect();
        let expected: Vec<(String, u64)> = m.iter().map(|(k, v)| (k.clone(), *v)).collect();
        assert_eq!(got, expected);
    });
}

#[test]
fn exhaustive_remove_order_small_set() {
    let keys = small_set();

    // Insert in a fixed order, then remove in all permutations.
    let mut base_trie: Trie<u64> = Trie::new();
    let mut base_map: BTreeMap<String, u64> = BTreeMap::new();
    for (i, k) in keys.iter().enumerate() {
        let v = i as u64;
        assert_eq!(base_trie.put(k, v).unwrap(), base_map.insert(k.clone(), v));
    }

    for_each_permutation(&keys, |perm| {
        let mut t = base_trie.clone();
        let mut m = base_map.clone();

        for k in perm {
            assert_eq!(t.remove(&k).unwrap(), m.remove(&k));
            assert_eq!(t.len(), m.len());
            validate_trie(&t);
        }
        assert_eq!(t.len(), 0);
        assert!(t.root().is_leaf());
    });
}
