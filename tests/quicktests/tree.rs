use ordered_tree::{OrderedTree, TreeError};

use std::collections::HashMap;

use crate::Op;

/// Applies a set of operations to a tree and to a count of each item.
/// This way we can ensure that after a random smattering of inserts,
/// removes, and rebalances we have the same items in both.
fn do_ops<T>(ops: &[Op<T>], tree: &mut OrderedTree<T>, counts: &mut HashMap<T, usize>)
where
    T: std::hash::Hash + Eq + Clone + Ord + std::fmt::Debug,
{
    for op in ops {
        match op {
            Op::Insert(x) => {
                tree.insert(x.clone());
                *counts.entry(x.clone()).or_default() += 1;
            }
            Op::Remove(x) => match counts.get_mut(x) {
                Some(count) => {
                    assert_eq!(tree.remove(x), Ok(x.clone()));
                    *count -= 1;
                    if *count == 0 {
                        counts.remove(x);
                    }
                }
                None => assert_eq!(tree.remove(x), Err(TreeError::NotFound)),
            },
            Op::Rebalance => tree.rebalance(),
        }
    }
}

fn is_sorted<T: Ord>(items: &[&T]) -> bool {
    items.windows(2).all(|pair| pair[0] <= pair[1])
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = OrderedTree::new();
    let mut counts = HashMap::new();

    do_ops(&ops, &mut tree, &mut counts);

    let items: Vec<_> = tree.ascending().collect();
    is_sorted(&items)
        && tree.len() == counts.values().sum::<usize>()
        && counts
            .iter()
            .all(|(x, count)| items.iter().filter(|item| **item == x).count() == *count)
}

#[quickcheck]
fn ascending_is_sorted_and_complete(xs: Vec<i8>) -> bool {
    let tree: OrderedTree<_> = xs.iter().copied().collect();

    let mut sorted = xs.clone();
    sorted.sort();

    tree.len() == xs.len() && tree.ascending().copied().eq(sorted)
}

#[quickcheck]
fn iter_visits_every_item(xs: Vec<i8>) -> bool {
    let tree: OrderedTree<_> = xs.iter().copied().collect();

    let mut preorder: Vec<_> = tree.iter().copied().collect();
    preorder.sort();
    let mut sorted = xs;
    sorted.sort();

    preorder == sorted
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: OrderedTree<_> = xs.iter().copied().collect();

    nots.iter()
        .filter(|x| !xs.contains(*x))
        .all(|x| !tree.contains(x) && tree.find(x).is_none())
}

#[quickcheck]
fn with_removals(xs: Vec<i8>, removes: Vec<i8>) -> bool {
    let mut tree: OrderedTree<_> = xs.iter().copied().collect();
    let mut still_present = xs;

    for x in &removes {
        match still_present.iter().position(|y| y == x) {
            Some(pos) => {
                let len = tree.len();
                if tree.remove(x) != Ok(*x) || tree.len() != len - 1 {
                    return false;
                }
                still_present.swap_remove(pos);
            }
            None => {
                if tree.remove(x) != Err(TreeError::NotFound) {
                    return false;
                }
            }
        }
    }

    still_present.sort();
    removes.iter().all(|x| tree.contains(x) == still_present.contains(x))
        && tree.ascending().copied().eq(still_present)
}

#[quickcheck]
fn rebalance_keeps_items_and_bounds_height(xs: Vec<i16>) -> bool {
    let mut tree: OrderedTree<_> = xs.iter().copied().collect();
    let before: Vec<_> = tree.ascending().copied().collect();

    tree.rebalance();

    let bound = ((xs.len() + 1) as f64).log2().ceil() as isize - 1;
    tree.height() <= bound
        && tree.ascending().copied().eq(before)
        && (xs.is_empty() || tree.is_balanced())
}

#[quickcheck]
fn successor_matches_sorted_items(xs: Vec<i8>, probe: i8) -> bool {
    let tree: OrderedTree<_> = xs.iter().copied().collect();

    let successor = xs.iter().filter(|x| **x > probe).min();
    let predecessor = xs.iter().filter(|x| **x < probe).max();

    tree.successor(&probe) == successor && tree.predecessor(&probe) == predecessor
}

#[quickcheck]
fn successor_ignores_shape(xs: Vec<i8>, probe: i8) -> bool {
    let skewed: OrderedTree<_> = xs.iter().copied().collect();
    let mut balanced = skewed.clone();
    balanced.rebalance();

    skewed.successor(&probe) == balanced.successor(&probe)
        && skewed.predecessor(&probe) == balanced.predecessor(&probe)
}

#[quickcheck]
fn range_find_matches_filter(xs: Vec<i8>, low: i8, high: i8) -> bool {
    let tree: OrderedTree<_> = xs.iter().copied().collect();

    let mut expected: Vec<_> = xs.iter().filter(|x| low <= **x && **x <= high).collect();
    expected.sort();

    tree.range_find(&low, &high) == expected
}
