//! Tests for most-recent-common-ancestor queries

use std::path::Path;

use rstest::{fixture, rstest};

use famtree::arena::FamilyTree;
use famtree::builder::TreeBuilder;
use famtree::errors::{QueryOperand, TreeError};
use famtree::query::{ancestors_of, most_recent_common_ancestor};

#[fixture]
fn hobbits() -> FamilyTree {
    TreeBuilder::build_from_file(Path::new("tests/resources/trees/hobbits.txt")).unwrap()
}

#[fixture]
fn simple() -> FamilyTree {
    TreeBuilder::build_from_lines(["A:B,C", "B:D,E", "C:F"]).unwrap()
}

fn mrca(tree: &FamilyTree, a: &str, b: &str) -> Option<String> {
    most_recent_common_ancestor(tree, a, b)
        .unwrap()
        .and_then(|idx| tree.name(idx).map(str::to_string))
}

#[rstest]
#[case("D", "F", Some("A"))]
#[case("D", "E", Some("B"))]
#[case("E", "C", Some("A"))]
#[case("D", "B", Some("A"))]
#[case("F", "F", Some("C"))]
#[case("A", "F", None)]
fn given_simple_tree_when_querying_then_returns_strict_common_ancestor(
    simple: FamilyTree,
    #[case] a: &str,
    #[case] b: &str,
    #[case] expected: Option<&str>,
) {
    assert_eq!(mrca(&simple, a, b).as_deref(), expected);
}

#[rstest]
#[case("Bilbo", "Frodo", "Balbo")]
#[case("Bilbo", "Lotho", "Mungo")]
#[case("Dora", "Frodo", "Fosco")]
#[case("Frodo", "Dudo", "Fosco")]
#[case("Otho", "Longo", "Mungo")]
fn given_hobbits_when_querying_then_finds_deepest_shared_ancestor(
    hobbits: FamilyTree,
    #[case] a: &str,
    #[case] b: &str,
    #[case] expected: &str,
) {
    assert_eq!(mrca(&hobbits, a, b).as_deref(), Some(expected));
}

#[rstest]
fn given_any_pair_when_querying_both_ways_then_result_is_symmetric(hobbits: FamilyTree) {
    let names: Vec<String> = hobbits
        .iter()
        .map(|(_, node, _)| node.data.name.clone())
        .collect();
    for a in &names {
        for b in &names {
            assert_eq!(
                mrca(&hobbits, a, b),
                mrca(&hobbits, b, a),
                "asymmetric for {a} / {b}"
            );
        }
    }
}

#[rstest]
fn given_chain_when_querying_descendant_and_ancestor_then_skips_the_ancestor() {
    let tree = TreeBuilder::build_from_lines(["A:B", "B:C"]).unwrap();
    assert_eq!(mrca(&tree, "C", "B").as_deref(), Some("A"));
}

#[rstest]
fn given_unknown_first_name_when_querying_then_names_first_operand(simple: FamilyTree) {
    let err = most_recent_common_ancestor(&simple, "Gandalf", "D").unwrap_err();
    match err {
        TreeError::NodeNotFound { operand, name } => {
            assert_eq!(operand, QueryOperand::First);
            assert_eq!(name, "Gandalf");
        }
        other => panic!("expected NodeNotFound, got {:?}", other),
    }
}

#[rstest]
fn given_unknown_second_name_when_querying_then_names_second_operand(simple: FamilyTree) {
    let err = most_recent_common_ancestor(&simple, "D", "Sauron").unwrap_err();
    assert!(matches!(
        err,
        TreeError::NodeNotFound { operand: QueryOperand::Second, ref name } if name == "Sauron"
    ));
    assert!(err.to_string().contains("Sauron"));
}

#[rstest]
fn given_failed_query_when_querying_again_then_tree_is_unchanged(simple: FamilyTree) {
    let before = simple.to_string();
    assert!(most_recent_common_ancestor(&simple, "X", "Y").is_err());
    assert_eq!(simple.to_string(), before);
    assert_eq!(mrca(&simple, "D", "E").as_deref(), Some("B"));
}

#[rstest]
fn given_name_when_listing_ancestors_then_last_is_root(hobbits: FamilyTree) {
    let chain = ancestors_of(&hobbits, "Lotho").unwrap();
    let names: Vec<_> = chain.iter().filter_map(|&i| hobbits.name(i)).collect();
    assert_eq!(names, vec!["Otho", "Longo", "Mungo", "Balbo"]);
    assert_eq!(chain.last().copied(), hobbits.root());
}
