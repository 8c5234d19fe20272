use house_challenges::house_assignment::*;
use house_utils::dejsonify;
use serde_json::{Map, Value};

const SEED: [u8; 32] = [7u8; 32];

fn relationships(pairs: &[(&str, &[&str])]) -> Map<String, Value> {
    pairs
        .iter()
        .map(|(p, cs)| (p.to_string(), Value::from(cs.to_vec())))
        .collect()
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn scenario_c_input() -> InputData {
    InputData {
        house_capacities: vec![2, 2, 2],
        relationships: relationships(&[
            ("A", &["B", "C", "D"]),
            ("B", &["C"]),
            ("E", &["F"]),
            ("G", &["H"]),
            ("I", &[]),
            ("J", &[]),
        ]),
        people_to_select: Some(names(&["A", "B", "C", "D", "E", "F", "G", "H", "I", "J"])),
        num_people_to_select: None,
    }
}

fn challenge_error(err: &anyhow::Error) -> &ChallengeError {
    err.downcast_ref::<ChallengeError>()
        .expect("expected a ChallengeError")
}

#[test]
fn test_graph_is_symmetric() {
    let graph =
        RelationshipGraph::from_relationships(vec![("X", vec!["Y"]), ("Z", vec!["X"])]).unwrap();
    assert!(graph.has_edge("X", "Y"));
    assert!(graph.has_edge("Y", "X"));
    assert!(graph.has_edge("X", "Z"));
    assert!(!graph.has_edge("Y", "Z"));
    assert_eq!(graph.neighbors("X").into_iter().collect::<Vec<_>>(), vec!["Y", "Z"]);
    assert_eq!(graph.neighbors("Y").into_iter().collect::<Vec<_>>(), vec!["X"]);
    assert_eq!(graph.num_edges(), 2);
}

#[test]
fn test_graph_collapses_duplicates_and_self_edges() {
    let graph = RelationshipGraph::from_relationships(vec![
        ("A", vec!["B", "B", "A"]),
        ("B", vec!["A"]),
    ])
    .unwrap();
    assert_eq!(graph.num_edges(), 1);
    assert!(!graph.has_edge("A", "A"));
    assert_eq!(graph.all_people().into_iter().collect::<Vec<_>>(), vec!["A", "B"]);
}

#[test]
fn test_graph_rejects_empty_identifier() {
    let err = RelationshipGraph::from_relationships(vec![("A", vec![""])]).unwrap_err();
    assert!(matches!(err, ChallengeError::MalformedGraph(_)));
    let err = RelationshipGraph::from_relationships(vec![("", vec!["A"])]).unwrap_err();
    assert!(matches!(err, ChallengeError::MalformedGraph(_)));
}

#[test]
fn test_neighbors_of_unknown_person_is_empty() {
    let graph = RelationshipGraph::from_relationships(vec![("A", vec!["B"])]).unwrap();
    assert!(graph.neighbors("nobody").is_empty());
    assert!(!graph.has_edge("A", "nobody"));
}

#[test]
fn test_invalid_capacities() {
    let err = HouseCapacities::try_from(&[1i64, 2][..]).unwrap_err();
    assert!(matches!(err, ChallengeError::InvalidCapacity(_)));
    let err = HouseCapacities::try_from(&[1i64, -2, 3][..]).unwrap_err();
    assert!(matches!(err, ChallengeError::InvalidCapacity(_)));
    let ok = HouseCapacities::try_from(&[0i64, 2, 3][..]).unwrap();
    assert_eq!(ok.total(), 5);

    let mut input = scenario_c_input();
    input.house_capacities = vec![2, 2, 2, 2];
    let err = Challenge::from_input(&input, &SEED, TrimPolicy::Trim).unwrap_err();
    assert!(matches!(challenge_error(&err), ChallengeError::InvalidCapacity(_)));
}

#[test]
fn test_unknown_candidate_is_rejected() {
    let mut input = scenario_c_input();
    input.people_to_select = Some(names(&["A", "Q"]));
    let err = Challenge::from_input(&input, &SEED, TrimPolicy::Trim).unwrap_err();
    assert_eq!(
        challenge_error(&err),
        &ChallengeError::UnknownPerson("Q".to_string())
    );
}

#[test]
fn test_scenario_c_trims_to_highest_priority() {
    let challenge = Challenge::from_input(&scenario_c_input(), &SEED, TrimPolicy::Trim).unwrap();
    assert_eq!(challenge.candidates.len(), 6);
    // A=3, B=2, C=2, D..H=1, I=J=0; ties on 1 resolved by input order
    assert_eq!(challenge.candidate_names(), vec!["A", "B", "C", "D", "E", "F"]);

    let again = Challenge::from_input(&scenario_c_input(), &SEED, TrimPolicy::Trim).unwrap();
    assert_eq!(again.candidates, challenge.candidates);
}

#[test]
fn test_scenario_c_strict_rejects() {
    let err = Challenge::from_input(&scenario_c_input(), &SEED, TrimPolicy::Reject).unwrap_err();
    assert_eq!(
        challenge_error(&err),
        &ChallengeError::OverCapacityRequest {
            requested: 10,
            capacity: 6
        }
    );
}

#[test]
fn test_selector_is_idempotent() {
    let challenge = Challenge::from_input(&scenario_c_input(), &SEED, TrimPolicy::Trim).unwrap();
    let again = select_candidates(
        &challenge.graph,
        &challenge.candidates,
        challenge.total_capacity(),
        TrimPolicy::Reject,
    )
    .unwrap();
    assert_eq!(again, challenge.candidates);
}

#[test]
fn test_trim_keeps_stable_priority_order() {
    // A=3, E=2, everyone else 1
    let graph = RelationshipGraph::from_relationships(vec![
        ("A", vec!["B", "C", "D"]),
        ("E", vec!["F", "G"]),
    ])
    .unwrap();
    let pool = resolve_candidates(&graph, &["A", "B", "C", "D", "E", "F", "G"]).unwrap();
    let kept = select_candidates(&graph, &pool, 3, TrimPolicy::Trim).unwrap();
    let kept: Vec<&str> = kept.iter().map(|&p| graph.name(p)).collect();
    assert_eq!(kept, vec!["A", "E", "B"]);
}

#[test]
fn test_count_mode_selects_from_everyone() {
    let mut input = scenario_c_input();
    input.people_to_select = None;
    input.num_people_to_select = Some(4);
    let challenge = Challenge::from_input(&input, &SEED, TrimPolicy::Reject).unwrap();
    assert_eq!(challenge.candidate_names(), vec!["A", "B", "C", "D"]);

    input.num_people_to_select = Some(8);
    let challenge = Challenge::from_input(&input, &SEED, TrimPolicy::Trim).unwrap();
    assert_eq!(challenge.candidates.len(), 6);
    let err = Challenge::from_input(&input, &SEED, TrimPolicy::Reject).unwrap_err();
    assert!(matches!(
        challenge_error(&err),
        ChallengeError::OverCapacityRequest { requested: 8, capacity: 6 }
    ));
}

#[test]
fn test_duplicate_candidates_collapse() {
    let mut input = scenario_c_input();
    input.people_to_select = Some(names(&["A", "B", "A"]));
    let challenge = Challenge::from_input(&input, &SEED, TrimPolicy::Reject).unwrap();
    assert_eq!(challenge.candidate_names(), vec!["A", "B"]);
}

#[test]
fn test_evaluate_counts_intra_house_edges() {
    let one_way = RelationshipGraph::from_relationships(vec![("X", vec!["Y"])]).unwrap();
    let both_ways =
        RelationshipGraph::from_relationships(vec![("X", vec!["Y"]), ("Y", vec!["X"])]).unwrap();
    let x = one_way.index_of("X").unwrap();
    let y = one_way.index_of("Y").unwrap();
    let together = Partition::new([vec![x, y], vec![], vec![]], vec![]);
    let apart = Partition::new([vec![x], vec![y], vec![]], vec![]);
    assert_eq!(evaluate(&together, &one_way), 1);
    assert_eq!(evaluate(&together, &both_ways), 1);
    assert_eq!(evaluate(&apart, &one_way), 0);
    assert_eq!(together.house_scores(&one_way), [1, 0, 0]);
}

#[test]
fn test_evaluate_bounded_by_pairs_per_house() {
    let track = Track {
        num_people: 30,
        avg_degree: 12,
        house_capacities: [4, 5, 6],
        num_candidates: 15,
    };
    for s in 0..5u8 {
        let challenge = Challenge::generate_instance(&[s; 32], &track).unwrap();
        let c = &challenge.candidates;
        let partition = Partition::new(
            [c[0..4].to_vec(), c[4..9].to_vec(), c[9..15].to_vec()],
            vec![],
        );
        let scores = partition.house_scores(&challenge.graph);
        for (h, &score) in scores.iter().enumerate() {
            let size = partition.house(h).len() as u32;
            assert!(score <= size * size.saturating_sub(1) / 2);
        }
        assert_eq!(scores.iter().sum::<u32>(), partition.evaluate(&challenge.graph));
    }
}

#[test]
fn test_verify_solution() {
    let input = InputData {
        house_capacities: vec![1, 1, 1],
        relationships: relationships(&[("X", &["Y"]), ("Z", &[])]),
        people_to_select: Some(names(&["X", "Y", "Z"])),
        num_people_to_select: None,
    };
    let challenge = Challenge::from_input(&input, &SEED, TrimPolicy::Trim).unwrap();

    let ok = Solution {
        houses: vec![names(&["X"]), names(&["Y"]), names(&["Z"])],
        unassigned: vec![],
    };
    assert_eq!(challenge.evaluate_score(&ok).unwrap(), 0);

    let over = Solution {
        houses: vec![names(&["X", "Y"]), names(&["Z"]), vec![]],
        unassigned: vec![],
    };
    let err = challenge.verify_solution(&over).unwrap_err();
    assert!(matches!(challenge_error(&err), ChallengeError::InvalidSolution(_)));

    let duplicate = Solution {
        houses: vec![names(&["X"]), names(&["X"]), names(&["Z"])],
        unassigned: names(&["Y"]),
    };
    assert!(challenge.verify_solution(&duplicate).is_err());

    let missing = Solution {
        houses: vec![names(&["X"]), names(&["Y"]), vec![]],
        unassigned: vec![],
    };
    assert!(challenge.verify_solution(&missing).is_err());

    let listed = Solution {
        houses: vec![names(&["X"]), names(&["Y"]), vec![]],
        unassigned: names(&["Z"]),
    };
    assert_eq!(challenge.evaluate_score(&listed).unwrap(), 0);

    let two_houses = Solution {
        houses: vec![names(&["X", "Y", "Z"])],
        unassigned: vec![],
    };
    assert!(challenge.verify_solution(&two_houses).is_err());
}

#[test]
fn test_solution_from_json_map() {
    let value = serde_json::json!({"houses": [["A"], [], ["B", "C"]]});
    let map = value.as_object().unwrap().clone();
    let solution = Solution::try_from(map).unwrap();
    assert_eq!(solution.houses[2], names(&["B", "C"]));
    assert!(solution.unassigned.is_empty());
}

#[test]
fn test_generate_instance_is_reproducible() {
    let track = Track {
        num_people: 25,
        avg_degree: 3,
        house_capacities: [3, 5, 5],
        num_candidates: 20,
    };
    let a = InputData::generate(&SEED, &track).unwrap();
    let b = InputData::generate(&SEED, &track).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.relationships.len(), 25);
    assert_eq!(a.relationships.keys().next().map(String::as_str), Some("P1"));
    assert_eq!(a.people_to_select.as_ref().unwrap().len(), 20);

    let challenge = Challenge::generate_instance(&SEED, &track).unwrap();
    assert_eq!(challenge.candidates.len(), 13);
    assert_eq!(challenge.graph.len(), 25);
}

#[test]
fn test_count_mode_ties_follow_document_order() {
    let input: InputData = dejsonify(
        r#"{"house_capacities": [1, 1, 1],
            "relationships": {"Zed": [], "Amy": [], "Mo": []},
            "num_people_to_select": 1}"#,
    )
    .unwrap();
    let challenge = Challenge::from_input(&input, &SEED, TrimPolicy::Trim).unwrap();
    assert_eq!(challenge.graph.people(), &["Zed", "Amy", "Mo"]);
    assert_eq!(challenge.candidate_names(), vec!["Zed"]);

    // no candidate mode: everyone, ties again in document order
    let input: InputData = dejsonify(
        r#"{"house_capacities": [1, 0, 1],
            "relationships": {"Zed": ["Mo"], "Amy": [], "Bo": [], "Mo": []}}"#,
    )
    .unwrap();
    let challenge = Challenge::from_input(&input, &SEED, TrimPolicy::Trim).unwrap();
    assert_eq!(challenge.candidate_names(), vec!["Zed", "Mo"]);

    let input: InputData = dejsonify(
        r#"{"house_capacities": [2, 2, 2],
            "relationships": {"Cy": [], "Al": [], "Bea": []},
            "num_people_to_select": 2}"#,
    )
    .unwrap();
    let challenge = Challenge::from_input(&input, &SEED, TrimPolicy::Trim).unwrap();
    assert_eq!(challenge.candidate_names(), vec!["Cy", "Al"]);
}

#[test]
fn test_relationship_values_must_be_name_lists() {
    for document in [
        r#"{"house_capacities": [1, 1, 1], "relationships": {"A": "B"}}"#,
        r#"{"house_capacities": [1, 1, 1], "relationships": {"A": ["B", 3]}}"#,
    ] {
        let input: InputData = dejsonify(document).unwrap();
        let err = Challenge::from_input(&input, &SEED, TrimPolicy::Trim).unwrap_err();
        assert!(matches!(challenge_error(&err), ChallengeError::MalformedGraph(_)));
    }
}
