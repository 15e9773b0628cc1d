//! End-to-end properties of the planning pipeline: replica planning,
//! placement, and the two-view index, exercised together the way the
//! simulation driver uses them.

use std::collections::BTreeSet;

use chunkplace::{
    compute_assignment, AccessLog, ChunkId, PlacementConfig, PlacementError, StrategyKind, WorkerId,
};

fn workers(n: u64) -> Vec<WorkerId> {
    (0..n).map(WorkerId).collect()
}

fn chunks(n: u64) -> Vec<ChunkId> {
    (0..n).map(ChunkId).collect()
}

fn config(strategy: StrategyKind) -> PlacementConfig {
    PlacementConfig {
        strategy,
        replication_factor_average: 2.0,
        lower_bound: 1,
        upper_bound: 5,
    }
}

#[test]
fn forward_and_reverse_views_always_agree() {
    for kind in [StrategyKind::Rendezvous, StrategyKind::ConsistentRing] {
        let assignment =
            compute_assignment(&workers(8), &chunks(500), &AccessLog::new(), &config(kind))
                .unwrap();

        for (&w, held) in assignment.workers() {
            for &c in held {
                assert!(
                    assignment.workers_for(c).is_some_and(|ws| ws.contains(&w)),
                    "({w}, {c}) present forward but missing in reverse"
                );
            }
        }
        for (&c, holders) in assignment.chunks() {
            for &w in holders {
                assert!(
                    assignment.chunks_for(w).is_some_and(|cs| cs.contains(&c)),
                    "({w}, {c}) present in reverse but missing forward"
                );
            }
        }
    }
}

#[test]
fn every_chunk_reaches_at_least_one_worker() {
    for kind in [StrategyKind::Rendezvous, StrategyKind::ConsistentRing] {
        let assignment =
            compute_assignment(&workers(5), &chunks(1000), &AccessLog::new(), &config(kind))
                .unwrap();
        for c in chunks(1000) {
            assert!(
                assignment.workers_for(c).is_some_and(|ws| !ws.is_empty()),
                "chunk {c} unreachable under {kind}"
            );
        }
    }
}

#[test]
fn replica_counts_stay_inside_the_bounds() {
    let mut log = AccessLog::new();
    for c in 0..200u64 {
        // Skewed traffic: low ids are hot.
        for _ in 0..(200 - c) {
            log.record(ChunkId(c));
        }
    }
    let cfg = PlacementConfig {
        strategy: StrategyKind::Rendezvous,
        replication_factor_average: 2.5,
        lower_bound: 1,
        upper_bound: 4,
    };
    let assignment = compute_assignment(&workers(10), &chunks(200), &log, &cfg).unwrap();
    for c in chunks(200) {
        let replicas = assignment.workers_for(c).map_or(0, BTreeSet::len);
        assert!(
            (1..=4).contains(&replicas),
            "chunk {c} has {replicas} replicas"
        );
    }
}

#[test]
fn hotter_chunks_never_get_fewer_replicas() {
    let mut log = AccessLog::new();
    for (c, hits) in [(0u64, 90), (1, 60), (2, 30), (3, 0)] {
        for _ in 0..hits {
            log.record(ChunkId(c));
        }
    }
    let cfg = PlacementConfig {
        strategy: StrategyKind::Rendezvous,
        replication_factor_average: 2.0,
        lower_bound: 1,
        upper_bound: 8,
    };
    let assignment = compute_assignment(&workers(10), &chunks(4), &log, &cfg).unwrap();
    let replicas: Vec<usize> = chunks(4)
        .iter()
        .map(|&c| assignment.workers_for(c).map_or(0, BTreeSet::len))
        .collect();
    assert!(
        replicas.windows(2).all(|w| w[0] >= w[1]),
        "replica counts not monotone in heat: {replicas:?}"
    );
}

#[test]
fn assignments_reproduce_bit_identically() {
    let mut log = AccessLog::new();
    for c in 0..300u64 {
        for _ in 0..(c % 17) {
            log.record(ChunkId(c));
        }
    }
    for kind in [StrategyKind::Rendezvous, StrategyKind::ConsistentRing] {
        let a = compute_assignment(&workers(12), &chunks(300), &log, &config(kind)).unwrap();
        let b = compute_assignment(&workers(12), &chunks(300), &log, &config(kind)).unwrap();
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}

#[test]
fn rendezvous_removal_only_disturbs_affected_chunks() {
    let all = workers(6);
    let removed = WorkerId(3);
    let survivors: Vec<WorkerId> = all.iter().copied().filter(|w| *w != removed).collect();

    let before =
        compute_assignment(&all, &chunks(400), &AccessLog::new(), &config(StrategyKind::Rendezvous))
            .unwrap();
    let after = compute_assignment(
        &survivors,
        &chunks(400),
        &AccessLog::new(),
        &config(StrategyKind::Rendezvous),
    )
    .unwrap();

    for c in chunks(400) {
        let old = before.workers_for(c).cloned().unwrap_or_default();
        let new = after.workers_for(c).cloned().unwrap_or_default();
        if !old.contains(&removed) {
            assert_eq!(old, new, "chunk {c} moved although {removed} never held it");
        } else {
            assert!(!new.contains(&removed));
        }
    }
}

#[test]
fn ring_never_places_a_chunk_twice_on_one_worker() {
    // Replica demand far above the fleet size: the ring caps at the
    // number of distinct workers instead of revisiting them.
    let cfg = PlacementConfig {
        strategy: StrategyKind::ConsistentRing,
        replication_factor_average: 50.0,
        lower_bound: 1,
        upper_bound: 50,
    };
    let assignment = compute_assignment(&workers(4), &chunks(100), &AccessLog::new(), &cfg)
        .unwrap();
    for c in chunks(100) {
        assert_eq!(
            assignment.workers_for(c).map(BTreeSet::len),
            Some(4),
            "chunk {c} should sit on every distinct worker exactly once"
        );
    }
}

#[test]
fn configuration_errors_leave_no_partial_assignment() {
    let err = compute_assignment(
        &workers(3),
        &chunks(10),
        &AccessLog::new(),
        &PlacementConfig {
            strategy: StrategyKind::Rendezvous,
            replication_factor_average: 2.0,
            lower_bound: 6,
            upper_bound: 2,
        },
    )
    .unwrap_err();
    assert_eq!(err, PlacementError::InvalidBounds { lower: 6, upper: 2 });

    let err = compute_assignment(
        &[],
        &chunks(10),
        &AccessLog::new(),
        &config(StrategyKind::ConsistentRing),
    )
    .unwrap_err();
    assert_eq!(err, PlacementError::EmptyWorkerSet);
}
