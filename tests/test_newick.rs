use transtree::model::TransmissionEdge;
use transtree::newick::{NewickParser, NewickStyle, parse_file, parse_str, to_newick, write_newick_file};
use transtree::parser::byte_parser::ByteParser;
use transtree::{build_forest, parse_newick_str};

// --- TESTS NEWICK STRING PARSING ---
#[test]
fn test_basic_tree() {
    let newick = "((A:1.0,B:2.0)C:3.0,D:4.0)E:0.5;";
    let mut parser = ByteParser::for_str(newick);
    let tree = NewickParser::new()
        .with_num_vertices(5)
        .parse_str(&mut parser)
        .unwrap();

    // Counts
    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(tree.num_vertices(), 5);
    assert!(tree.is_valid());

    // Relationships
    let root = tree.root().unwrap();
    assert_eq!(root.label(), "E");
    assert_eq!(*root.branch_length().unwrap(), 0.5);
    let &[internal, leaf_d] = root.children() else {
        panic!("root should have two children");
    };
    assert_eq!(tree[internal].label(), "C");
    assert_eq!(tree[leaf_d].label(), "D");
    assert_eq!(tree[internal].parent(), Some(root.index()));

    let &[leaf_a, leaf_b] = tree[internal].children() else {
        panic!("C should have two children");
    };
    assert_eq!(tree[leaf_a].label(), "A");
    assert_eq!(tree[leaf_b].label(), "B");
    assert_eq!(*tree[leaf_b].branch_length().unwrap(), 2.0);
}

#[test]
fn test_multifurcation_and_unary_vertices() {
    let tree = parse_newick_str("((((O)N)M)L,K,(J,I,H)G)F;").unwrap();
    assert_eq!(tree.num_vertices(), 10);
    assert_eq!(tree.root().unwrap().children().len(), 3);
    assert_eq!(tree.lineage("O"), Some(vec!["F", "L", "M", "N", "O"]));
    assert_eq!(tree.find("G").unwrap().children().len(), 3);
}

#[test]
fn test_tree_with_quoted_labels() {
    let newick = "(('Taxon one':1.5,'Second''s taxon':2.5)'an ancestor':3.0,'3rd Taxon':4.0);";
    let tree = parse_str(newick).unwrap();

    assert_eq!(tree.num_leaves(), 3);
    let labels = tree.leaf_labels();
    assert!(labels.contains("Taxon one"));
    assert!(labels.contains("Second's taxon"));
    assert!(labels.contains("3rd Taxon"));
    assert!(tree.find("an ancestor").is_some());

    // Quoting survives writing
    assert_eq!(to_newick(&tree, NewickStyle::WithBranchLengths), newick);
}

#[test]
fn test_tree_with_scientific_notation() {
    let tree = parse_str("((A:1e-5,B:2.5E+3):1.0e2,C:3.14E-10):0.0;").unwrap();
    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(*tree.find("B").unwrap().branch_length().unwrap(), 2500.0);
    assert_eq!(*tree.find("A").unwrap().branch_length().unwrap(), 1e-5);
}

#[test]
fn test_optional_branch_length() {
    let tree = parse_str("((A:1.0,B),C:4.0);").unwrap();
    assert!(tree.find("B").unwrap().branch_length().is_none());
    assert!(tree.root().unwrap().branch_length().is_none());
}

#[test]
fn test_newick_with_comment_1() {
    let newick_with_comment = "[A tree of] (([Shags!]A[Great Commentoran]:0.33,B[Pied Commentoran]:0.33):1.87,C:[King Commentoran]2.2):0.0;";
    let tree = parse_str(newick_with_comment);

    if tree.is_err() {
        eprintln!(
            "Error parsing tree with comments: {:?}",
            tree.as_ref().err()
        );
    }

    assert_eq!(tree.unwrap().num_leaves(), 3);
}

#[test]
fn test_newick_with_comment_2() {
    let newick_with_comment = "[A tree of] ([Shags!] C:[King Commentoran] 2.2, (A[Great Commentoran]:0.33, B[Pied Commentoran]:0.33)Shags:1.87)[The end.];";
    let tree = parse_str(newick_with_comment).unwrap();
    assert_eq!(
        to_newick(&tree, NewickStyle::WithBranchLengths),
        "(C:2.2,(A:0.33,B:0.33)Shags:1.87);"
    );
}

#[test]
fn test_multiple_trees_lazily() {
    let parser = ByteParser::for_str("(A)B;\n[second] (C,D)E;\n");
    let trees: Vec<_> = NewickParser::new()
        .into_iter(parser)
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(trees.len(), 2);
    assert_eq!(trees[1].root().unwrap().label(), "E");
}

// --- TESTS DEALING WITH CORRUPT NEWICK STRINGS ---

#[test]
fn test_missing_semicolon() {
    assert!(parse_str("((A:1.0,B:2.0):3.0,C:4.0):0.5").is_err());
}

#[test]
fn test_missing_comma() {
    assert!(parse_str("((A:1.0 B:2.0):3.0,C:4.0):0.5;").is_err());
}

#[test]
fn test_unmatched_parentheses() {
    assert!(parse_str("((A:1.0,B:2.0:3.0,C:4.0):0.5;").is_err());
    assert!(parse_str("((A:1.0,B:2.0):3.0,C:4.0;").is_err());
}

#[test]
fn test_invalid_branch_length() {
    assert!(parse_str("((A:1.0,B:abc):3.0,C:4.0):0.5;").is_err());
}

#[test]
fn test_lazy_parsing_stops_after_error() {
    let parser = ByteParser::for_str("(A)B; (C,D; (E)F;");
    let results: Vec<_> = NewickParser::new().into_iter(parser).collect();
    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    assert!(results[1].is_err());
}

// --- TESTS ROUND TRIP WITH PIPELINE OUTPUT ---
#[test]
fn test_round_trip_of_pipeline_output() {
    let edges = vec![
        TransmissionEdge::new("M", "N", 1),
        TransmissionEdge::new("M", "O", 2),
        TransmissionEdge::new("N", "P", 3),
        TransmissionEdge::new("R", "M", 5),
        TransmissionEdge::new("R", "U", 6),
    ];
    let forest = build_forest(&edges).unwrap();
    let tree = forest.to_tree();

    let parsed = parse_str(to_newick(&forest, NewickStyle::WithBranchLengths)).unwrap();
    assert!(parsed.is_valid());
    assert!(parsed.same_shape(&tree));
}

// --- TESTS WHOLE FILE ---
#[test]
fn test_writing_and_parsing_newick_file() {
    let first = build_forest(&[
        TransmissionEdge::new("X", "Y", 1),
        TransmissionEdge::new("Y", "Z", 2),
        TransmissionEdge::new("Z", "X", 3),
    ])
    .unwrap();
    let second = build_forest(&[
        TransmissionEdge::new("A", "B", 1),
        TransmissionEdge::new("C", "D", 2),
    ])
    .unwrap();

    let path = std::env::temp_dir().join(format!("transtree_test_{}.nwk", std::process::id()));
    write_newick_file(&path, &[first.clone(), second.clone()], NewickStyle::WithBranchLengths).unwrap();
    let trees = parse_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(trees.len(), 2);
    assert!(trees[0].same_shape(&first.to_tree()));
    assert!(trees[1].same_shape(&second.to_tree()));
    assert_eq!(to_newick(&trees[1], NewickStyle::WithBranchLengths), "((B:1.0)A:0.0,(D:2.0)C:0.0)ROOT;");
}
