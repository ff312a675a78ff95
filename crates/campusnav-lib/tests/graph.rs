mod common;

use campusnav_lib::{build_graph, Campus, Error, Location, PathStatus, RouteEngine, Segment};

use common::four_building_campus;

#[test]
fn every_walkway_produces_two_symmetric_edges() {
    let (locations, segments) = four_building_campus();
    let nodes = build_graph(&locations, &segments).expect("graph builds");

    assert_eq!(nodes.len(), 4);
    let total_edges: usize = nodes.iter().map(|node| node.connections.len()).sum();
    assert_eq!(total_edges, segments.len() * 2);

    for node in &nodes {
        for edge in &node.connections {
            let neighbor = nodes
                .iter()
                .find(|other| other.id == edge.neighbor_id)
                .expect("neighbor exists");
            let reverse = neighbor.edge_to(&node.id).expect("reverse edge exists");
            assert_eq!(reverse.path_id, edge.path_id);
            assert_eq!(reverse.distance, edge.distance);
            assert_eq!(reverse.is_available, edge.is_available);
        }
    }
}

#[test]
fn availability_follows_open_status() {
    let (locations, segments) = four_building_campus();
    let nodes = build_graph(&locations, &segments).expect("graph builds");

    let student = nodes.iter().find(|node| node.id == "S").unwrap();
    assert!(student.edge_to("L").unwrap().is_available);
    assert!(!student.edge_to("C").unwrap().is_available);
}

#[test]
fn nodes_keep_input_order_and_positions() {
    let (locations, segments) = four_building_campus();
    let nodes = build_graph(&locations, &segments).expect("graph builds");

    let ids: Vec<_> = nodes.iter().map(|node| node.id.as_str()).collect();
    assert_eq!(ids, vec!["M", "L", "S", "C"]);
    assert_eq!(nodes[0].name, "Main Building");
    assert_eq!(nodes[1].position, locations[1].position());
}

#[test]
fn connections_keep_discovery_order() {
    let locations = vec![
        Location::new("hub", 0.0, 0.0),
        Location::new("x", 0.0, 1.0),
        Location::new("y", 0.0, 2.0),
    ];
    let segments = vec![
        Segment::new("y", "hub", 5.0, PathStatus::Open),
        Segment::new("hub", "x", 7.0, PathStatus::Closed),
    ];
    let nodes = build_graph(&locations, &segments).expect("graph builds");

    let neighbours: Vec<_> = nodes[0]
        .connections
        .iter()
        .map(|edge| edge.neighbor_id.as_str())
        .collect();
    assert_eq!(neighbours, vec!["y", "x"]);
}

#[test]
fn walkways_with_unknown_endpoints_are_dropped() {
    let locations = vec![Location::new("a", 0.0, 0.0), Location::new("b", 0.0, 1.0)];
    let segments = vec![
        Segment::new("a", "b", 10.0, PathStatus::Open),
        Segment::new("a", "nowhere", 10.0, PathStatus::Open),
        Segment::new("ghost", "b", 10.0, PathStatus::Open),
    ];
    let nodes = build_graph(&locations, &segments).expect("graph builds");

    assert_eq!(nodes[0].connections.len(), 1);
    assert_eq!(nodes[1].connections.len(), 1);
}

#[test]
fn derived_path_ids_are_shared_by_both_directions() {
    let locations = vec![Location::new("a", 0.0, 0.0), Location::new("b", 0.0, 1.0)];
    let segments = vec![Segment::new("a", "b", 10.0, PathStatus::Open)];
    let nodes = build_graph(&locations, &segments).expect("graph builds");

    assert_eq!(nodes[0].connections[0].path_id, "a-b");
    assert_eq!(nodes[1].connections[0].path_id, "a-b");
}

#[test]
fn negative_distance_is_rejected() {
    let locations = vec![Location::new("a", 0.0, 0.0), Location::new("b", 0.0, 1.0)];
    let segments = vec![Segment::new("a", "b", -1.0, PathStatus::Open).with_id("bad")];

    let err = build_graph(&locations, &segments).unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidDistance { ref path_id, distance } if path_id == "bad" && distance == -1.0
    ));
}

#[test]
fn non_finite_distance_is_rejected() {
    let locations = vec![Location::new("a", 0.0, 0.0), Location::new("b", 0.0, 1.0)];
    let segments = vec![Segment::new("a", "b", f64::NAN, PathStatus::Open)];

    assert!(matches!(
        build_graph(&locations, &segments),
        Err(Error::InvalidDistance { .. })
    ));
}

#[test]
fn duplicate_location_ids_are_rejected() {
    let locations = vec![Location::new("a", 0.0, 0.0), Location::new("a", 1.0, 1.0)];

    let err = build_graph(&locations, &[]).unwrap_err();
    assert!(matches!(err, Error::DuplicateLocation { ref id } if id == "a"));
}

#[test]
fn zero_length_walkways_are_allowed() {
    let campus = Campus::new(
        vec![Location::new("a", 0.0, 0.0), Location::new("b", 0.0, 0.0)],
        vec![Segment::new("a", "b", 0.0, PathStatus::Open)],
    );
    let nodes = campus.build_graph().expect("graph builds");
    assert_eq!(nodes[0].connections[0].distance, 0.0);
}

#[test]
fn accessibility_flag_is_carried_onto_edges() {
    let locations = vec![Location::new("a", 0.0, 0.0), Location::new("b", 0.0, 1.0)];
    let segments = vec![Segment::new("a", "b", 10.0, PathStatus::Open).inaccessible()];
    let nodes = build_graph(&locations, &segments).expect("graph builds");

    assert!(!nodes[0].connections[0].accessible);
    assert!(!nodes[1].connections[0].accessible);
}

#[test]
fn duplicate_explicit_path_ids_are_rejected() {
    let locations = vec![
        Location::new("a", 0.0, 0.0),
        Location::new("b", 0.0, 1.0),
        Location::new("c", 1.0, 0.0),
        Location::new("d", 1.0, 1.0),
    ];
    let segments = vec![
        Segment::new("a", "b", 10.0, PathStatus::Open).with_id("p"),
        Segment::new("c", "d", 10.0, PathStatus::Construction).with_id("p"),
    ];

    let err = build_graph(&locations, &segments).unwrap_err();
    assert!(matches!(err, Error::DuplicatePath { ref id } if id == "p"));
}

#[test]
fn colliding_derived_path_ids_are_rejected() {
    let locations = vec![
        Location::new("a", 0.0, 0.0),
        Location::new("b-c", 0.0, 1.0),
        Location::new("a-b", 1.0, 0.0),
        Location::new("c", 1.0, 1.0),
    ];
    let segments = vec![
        Segment::new("a", "b-c", 10.0, PathStatus::Open),
        Segment::new("a-b", "c", 10.0, PathStatus::Open),
    ];

    let err = Campus::new(locations, segments).build_graph().unwrap_err();
    assert!(matches!(err, Error::DuplicatePath { ref id } if id == "a-b-c"));
}

#[test]
fn distinct_explicit_ids_keep_parallel_walkways_apart() {
    let campus = Campus::new(
        vec![
            Location::new("a", 0.0, 0.0),
            Location::new("b-c", 0.0, 1.0),
            Location::new("a-b", 1.0, 0.0),
            Location::new("c", 1.0, 1.0),
        ],
        vec![
            Segment::new("a", "b-c", 10.0, PathStatus::Open).with_id("north"),
            Segment::new("a-b", "c", 10.0, PathStatus::Construction).with_id("south"),
        ],
    );
    let mut engine = RouteEngine::from_campus(&campus).expect("engine builds");

    assert_eq!(engine.segment_count(), 2);
    assert_eq!(engine.segment("north").unwrap().status, PathStatus::Open);
    assert_eq!(engine.segment("south").unwrap().status, PathStatus::Construction);

    assert!(engine.set_segment_status("south", PathStatus::Open));
    assert!(engine.node("a-b").unwrap().edge_to("c").unwrap().is_available);
    assert!(engine.node("a").unwrap().edge_to("b-c").unwrap().is_available);
}
