use tidyseries::{Error, Index, JoinHow};

#[test]
fn test_index_creation() {
    let index = Index::new(vec![2002, 2000, 2001]).unwrap();

    assert_eq!(index.len(), 3);
    assert_eq!(index.get_loc(&2000), Some(1));
    assert_eq!(index.get_value(2), Some(&2001));
    assert!(index.contains(&2002));
    assert!(!index.is_monotonic_increasing());
    assert!(index.sorted().is_monotonic_increasing());
}

#[test]
fn test_duplicate_labels_are_rejected() {
    let err = Index::new(vec!["a", "b", "a"]).unwrap_err();
    assert!(matches!(err, Error::DuplicateLabel(_)));
}

#[test]
fn test_union_and_intersection() {
    let a = Index::new(vec![3, 1, 5]).unwrap();
    let b = Index::new(vec![4, 3, 2]).unwrap();

    assert_eq!(a.union(&b).values(), &[1, 2, 3, 4, 5]);
    assert_eq!(a.intersection(&b).values(), &[3]);
    assert_eq!(a.join(&b, JoinHow::Outer), a.union(&b));
    assert_eq!(a.join(&b, JoinHow::Right), b);
}

#[test]
fn test_get_indexer() {
    let a = Index::new(vec!["x", "y"]).unwrap();
    let target = Index::new(vec!["y", "z", "x"]).unwrap();

    assert_eq!(a.get_indexer(&target), vec![Some(1), None, Some(0)]);
}

#[test]
fn test_take_and_range() {
    let index = Index::with_name(vec![10, 20, 30, 40], Some("year".to_string())).unwrap();

    let taken = index.take(&[3, 0]).unwrap();
    assert_eq!(taken.values(), &[40, 10]);
    assert_eq!(taken.name(), Some(&"year".to_string()));
    assert!(index.take(&[4]).is_err());

    assert_eq!(index.positions_in(&(15..=30)), vec![1, 2]);
    assert!(index.positions_in(&(50..=60)).is_empty());
}

#[test]
fn test_range_index() {
    let index = Index::<usize>::from_range(0..3);
    assert_eq!(index.values(), &[0, 1, 2]);
}

#[test]
fn test_index_names() {
    let mut index = Index::new(vec![2000, 2001]).unwrap();
    assert_eq!(index.name(), None);

    index.set_name(Some("year".to_string()));
    assert_eq!(index.name(), Some(&"year".to_string()));

    let renamed = index.rename(Some("period".to_string()));
    assert_eq!(renamed.name(), Some(&"period".to_string()));
    assert_eq!(renamed.values(), index.values());
    // The source keeps its own name
    assert_eq!(index.name(), Some(&"year".to_string()));

    assert_eq!(index.rename(None).name(), None);
}
