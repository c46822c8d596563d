use hierarchy_id::*;
use proptest::prelude::*;

fn hid(labels: &[u32]) -> HierarchyId {
    HierarchyId::from_labels(labels.iter().copied()).unwrap()
}

#[test]
fn four_level_scenario() {
    let id = parse("/1/2/3/4/").unwrap();
    assert_eq!(id, hid(&[1, 2, 3, 4]));

    let bytes = encode(&id);
    let back = decode(&bytes).unwrap();
    assert_eq!(back, hid(&[1, 2, 3, 4]));
    assert_eq!(format(&back), "/1/2/3/4/");

    let chain = ancestors(&id);
    assert_eq!(
        chain,
        vec![hid(&[]), hid(&[1]), hid(&[1, 2]), hid(&[1, 2, 3])]
    );
    for ancestor in &chain {
        assert!(
            encode(ancestor) < bytes,
            "{} should sort before {}",
            ancestor,
            id
        );
    }
}

#[test]
fn sorting_bytes_sorts_the_tree() {
    let paths = [
        "/2/", "/1/10/", "/1/", "/", "/1/2/", "/1/2/0/", "/100000/", "/1/9/", "/3/1/",
    ];
    let mut by_bytes: Vec<(Vec<u8>, HierarchyId)> = paths
        .iter()
        .map(|p| {
            let id = parse(p).unwrap();
            (encode(&id), id)
        })
        .collect();
    by_bytes.sort();
    let sorted: Vec<String> = by_bytes.into_iter().map(|(_, id)| id.to_string()).collect();
    assert_eq!(
        sorted,
        vec!["/", "/1/", "/1/2/", "/1/2/0/", "/1/9/", "/1/10/", "/2/", "/3/1/", "/100000/"]
    );
}

#[test]
fn truncated_prefix_never_decodes_to_a_different_path() {
    let id = hid(&[5, 300, 70_000, 9]);
    let bytes = encode(&id);
    for cut in 0..bytes.len() {
        match decode(&bytes[..cut]) {
            Ok(prefix) => assert!(prefix.is_ancestor_of(&id), "cut {} gave {}", cut, prefix),
            Err(e) => assert_eq!(e, DecodeError::Truncated, "cut {}", cut),
        }
    }
}

proptest! {
    #[test]
    fn ancestors_sort_before_descendant(id: HierarchyId) {
        let bytes = encode(&id);
        let chain = id.ancestors();
        prop_assert_eq!(chain.len(), id.depth());
        for (depth, ancestor) in chain.iter().enumerate() {
            prop_assert_eq!(ancestor.depth(), depth);
            prop_assert!(ancestor.is_ancestor_of(&id));
            prop_assert!(encode(ancestor) < bytes.clone());
        }
    }

    #[test]
    fn order_is_preserved(a: HierarchyId, b: HierarchyId) {
        prop_assert_eq!(encode(&a) < encode(&b), a < b);
        prop_assert_eq!(encode(&a) == encode(&b), a == b);
    }

    #[test]
    fn extension_sorts_after(a: HierarchyId, label: Label) {
        let child = a.child(label);
        prop_assert!(encode(&a) < encode(&child));
        prop_assert_eq!(child.parent(), Some(a));
    }

    #[test]
    fn both_round_trips(id: HierarchyId) {
        prop_assert_eq!(&parse(&format(&id)).unwrap(), &id);
        prop_assert_eq!(&decode(&encode(&id)).unwrap(), &id);
    }
}
