use std::collections::BTreeSet;

use rb_tree::RbTree;

type Entry = (i32, &'static str);

fn by_key(a: &Entry, b: &Entry) -> bool {
    a.0 < b.0
}

#[test]
fn equivalent_values_coexist_matrix() {
    let mut tree = RbTree::with_before(by_key);
    tree.add((1, "a"));
    tree.add((1, "b"));
    tree.add((0, "z"));
    tree.validate().unwrap();
    assert_eq!(tree.len(), 3);

    let found = tree.find(&(1, "?")).unwrap();
    assert_eq!(found.0, 1);

    let mut tags = BTreeSet::new();
    tags.insert(tree.remove(&(1, "?")).unwrap().1);
    tree.validate().unwrap();
    assert!(tree.contains(&(1, "?")));
    tags.insert(tree.remove(&(1, "?")).unwrap().1);
    tree.validate().unwrap();

    assert_eq!(tags, BTreeSet::from(["a", "b"]));
    assert_eq!(tree.remove(&(1, "?")), None);
    assert_eq!(tree.to_vec(), vec![&(0, "z")]);
}

#[test]
fn equivalent_runs_stay_ordered_matrix() {
    let mut tree = RbTree::with_before(|a: &i32, b: &i32| a / 10 < b / 10);
    for v in [15, 3, 12, 7, 19, 1, 11, 25, 4, 13] {
        tree.add(v);
        tree.validate().unwrap();
    }

    let buckets: Vec<i32> = tree.to_vec().into_iter().map(|v| v / 10).collect();
    let mut sorted = buckets.clone();
    sorted.sort();
    assert_eq!(buckets, sorted);

    // Values within a bucket keep insertion order: each new one descends right.
    let tens: Vec<i32> = tree.to_vec().into_iter().copied().filter(|v| v / 10 == 1).collect();
    assert_eq!(tens, vec![15, 12, 19, 11, 13]);

    let mut removed = 0;
    while tree.remove(&10).is_some() {
        removed += 1;
        tree.validate().unwrap();
    }
    assert_eq!(removed, 5);
    assert_eq!(tree.len(), 5);
}

#[test]
fn many_duplicates_drain_matrix() {
    let mut tree = RbTree::new();
    for i in 0..300 {
        tree.add(i % 3);
    }
    tree.validate().unwrap();
    assert_eq!(tree.len(), 300);

    for value in [2, 0, 1] {
        for _ in 0..100 {
            assert_eq!(tree.remove(&value), Some(value));
        }
        tree.validate().unwrap();
        assert_eq!(tree.find(&value), None);
    }
    assert!(tree.is_empty());
    assert_eq!(tree.slots(), 1);
}

#[test]
fn reversed_predicate_matrix() {
    let mut tree = RbTree::with_before(|a: &i32, b: &i32| a > b);
    for v in [5, 3, 8, 1, 4, 7, 9] {
        tree.add(v);
    }
    tree.validate().unwrap();
    let values: Vec<i32> = tree.to_vec().into_iter().copied().collect();
    assert_eq!(values, vec![9, 8, 7, 5, 4, 3, 1]);
}

#[test]
fn case_insensitive_strings_matrix() {
    let mut tree = RbTree::with_before_and_capacity(
        |a: &String, b: &String| a.to_lowercase() < b.to_lowercase(),
        4,
    );
    for s in ["Beta", "alpha", "Gamma", "delta"] {
        tree.add(s.to_string());
    }
    tree.validate().unwrap();

    assert_eq!(tree.find(&"ALPHA".to_string()).map(String::as_str), Some("alpha"));
    assert_eq!(tree.remove(&"GAMMA".to_string()).as_deref(), Some("Gamma"));
    assert_eq!(tree.find(&"gamma".to_string()), None);
    tree.validate().unwrap();

    let values: Vec<&str> = tree.to_vec().into_iter().map(String::as_str).collect();
    assert_eq!(values, vec!["alpha", "Beta", "delta"]);
}
