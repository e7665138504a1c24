// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs, clippy::panic)]
//! End-to-end scenes run through the public entry points.

use boxsweep_core::{
    brute_force_pairs, canonicalize, generate, sweep_into, sweep_pairs, BoxFile, BoxSet,
    BoxSetError, ConfigError, DualAxisSweep, PairSink, ScenarioSpec,
};

mod common;
use common::bx;

fn canonical<Id: Ord>(mut pairs: Vec<(Id, Id)>) -> Vec<(Id, Id)> {
    canonicalize(&mut pairs);
    pairs
}

#[test]
fn one_pair_among_three_boxes() {
    let boxes: BoxSet<&str> = [
        (bx([0.0, 0.0, 0.0], [10.0, 5.0, 5.0]), "A"),
        (bx([3.0, 1.0, 1.0], [8.0, 4.0, 4.0]), "B"),
        (bx([20.0, 0.0, 0.0], [25.0, 5.0, 5.0]), "C"),
    ]
    .into_iter()
    .collect();
    let pairs = canonical(sweep_pairs(&boxes));
    assert_eq!(pairs, vec![("A", "B")]);
    assert!(pairs.iter().all(|(a, b)| *a != "C" && *b != "C"));
}

#[test]
fn face_contact_on_the_sweep_axis() {
    let boxes: BoxSet<u8> = [
        (bx([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]), 0),
        (bx([1.0, 0.2, 0.2], [2.0, 0.8, 0.8]), 1),
        (bx([2.0 + f32::EPSILON * 4.0, 0.0, 0.0], [3.0, 1.0, 1.0]), 2),
    ]
    .into_iter()
    .collect();
    assert_eq!(canonical(sweep_pairs(&boxes)), vec![(0, 1)]);
}

#[test]
fn identical_boxes_pair_completely() {
    let unit = bx([0.0; 3], [1.0; 3]);
    let boxes: BoxSet<u16> = (0..50u16).map(|i| (unit, i)).collect();
    let pairs = canonical(sweep_pairs(&boxes));
    assert_eq!(pairs.len(), 50 * 49 / 2);
    assert_eq!(pairs, canonical(brute_force_pairs(&boxes)));
}

#[test]
fn zero_width_boxes_touch_their_neighbors() {
    let boxes: BoxSet<u8> = [
        (bx([1.0, 1.0, 1.0], [1.0, 1.0, 1.0]), 0),
        (bx([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]), 1),
        (bx([1.0, 1.0, 1.0], [2.0, 2.0, 2.0]), 2),
    ]
    .into_iter()
    .collect();
    assert_eq!(canonical(sweep_pairs(&boxes)), vec![(0, 1), (0, 2), (1, 2)]);
}

#[test]
fn generated_scenes_match_oracle() {
    for (seed, grid) in [(1u64, None), (2, Some(1.0)), (3, Some(4.0)), (4, None)] {
        let spec = ScenarioSpec {
            count: 1_500,
            seed,
            extent: 60.0,
            grid,
            ..ScenarioSpec::default()
        };
        let boxes = generate(&spec);
        let mut sink = PairSink::new();
        let stats = sweep_into(&boxes, &mut sink);
        assert_eq!(stats.pairs, sink.len());
        assert!(stats.candidates >= stats.pairs);
        assert_eq!(
            sink.into_canonical(),
            canonical(brute_force_pairs(&boxes)),
            "seed {seed} grid {grid:?}"
        );
    }
}

#[test]
fn one_sweep_serves_many_frames() {
    let mut sweep = DualAxisSweep::new();
    let mut sink = PairSink::new();
    for frame in 0..10u64 {
        let spec = ScenarioSpec {
            count: 100 + 37 * usize::try_from(frame).unwrap_or(0),
            seed: frame,
            extent: 20.0,
            ..ScenarioSpec::default()
        };
        let boxes = generate(&spec);
        sink.clear();
        let _ = sweep.run(&boxes, &mut sink);
        assert_eq!(
            sink.clone().into_canonical(),
            canonical(brute_force_pairs(&boxes)),
            "frame {frame}"
        );
    }
}

#[test]
fn box_file_scene_sweeps() {
    let json = br#"{
        "boxes": [
            { "min": [0, 0, 0], "max": [10, 5, 5], "id": 10 },
            { "min": [3, 1, 1], "max": [8, 4, 4], "id": 20 },
            { "min": [20, 0, 0], "max": [25, 5, 5] }
        ]
    }"#;
    let file: BoxFile = match serde_json::from_slice(json) {
        Ok(file) => file,
        Err(err) => panic!("box file should parse: {err}"),
    };
    let boxes = match file.into_box_set() {
        Ok(boxes) => boxes,
        Err(err) => panic!("box file should validate: {err}"),
    };
    assert_eq!(boxes.ids(), &[10, 20, 2]);
    assert_eq!(canonical(sweep_pairs(&boxes)), vec![(10, 20)]);
}

#[test]
fn box_file_rejects_default_id_colliding_with_explicit_id() {
    // Record 2 defaults to id 2, which record 0 already claims; the two boxes
    // overlap, so accepting the file would yield the pair (2, 2).
    let json = br#"{
        "boxes": [
            { "min": [0, 0, 0], "max": [2, 2, 2], "id": 2 },
            { "min": [50, 50, 50], "max": [51, 51, 51] },
            { "min": [1, 1, 1], "max": [3, 3, 3] }
        ]
    }"#;
    let file: BoxFile = match serde_json::from_slice(json) {
        Ok(file) => file,
        Err(err) => panic!("box file should parse: {err}"),
    };
    let result = file.into_box_set();
    assert!(
        matches!(
            result,
            Err(ConfigError::Boxes(BoxSetError::DuplicateId { index: 2, first: 0 }))
        ),
        "{result:?}"
    );
}
