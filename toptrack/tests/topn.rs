//! Selection-order guarantees of the top-N selector.

use toptrack::{select_top, select_top_by, ProcessSample, RatedSample};

fn sample(pid: u32, bytes: u64) -> ProcessSample {
    ProcessSample {
        pid,
        name: format!("proc-{pid}"),
        bytes,
    }
}

#[test]
fn ranks_descending_with_pid_tiebreak() {
    // ranks [100, 100, 50, 50, 10] on pids [5, 3, 9, 1, 2]
    let items = vec![
        sample(5, 100),
        sample(3, 100),
        sample(9, 50),
        sample(1, 50),
        sample(2, 10),
    ];
    let top = select_top(items, 3);
    let picked: Vec<(u64, u32)> = top.iter().map(|s| (s.bytes, s.pid)).collect();
    assert_eq!(picked, vec![(100, 3), (100, 5), (50, 1)]);
}

#[test]
fn result_never_longer_than_n() {
    let items: Vec<_> = (0..50).map(|pid| sample(pid, pid as u64)).collect();
    assert_eq!(select_top(items, 25).len(), 25);
}

#[test]
fn n_larger_than_input_returns_everything_sorted() {
    let items = vec![sample(1, 10), sample(2, 30), sample(3, 20)];
    let top = select_top(items, 25);
    let pids: Vec<u32> = top.iter().map(|s| s.pid).collect();
    assert_eq!(pids, vec![2, 3, 1]);
}

#[test]
fn n_zero_means_disabled() {
    let items = vec![sample(1, 10), sample(2, 30)];
    assert!(select_top(items, 0).is_empty());
}

#[test]
fn empty_input_is_fine() {
    assert!(select_top(Vec::<ProcessSample>::new(), 5).is_empty());
}

#[test]
fn rated_samples_rank_by_combined_throughput() {
    let items = vec![
        RatedSample {
            pid: 1,
            name: "rx-heavy".into(),
            bytes_in_per_sec: 900.0,
            bytes_out_per_sec: 10.0,
        },
        RatedSample {
            pid: 2,
            name: "balanced".into(),
            bytes_in_per_sec: 500.0,
            bytes_out_per_sec: 500.0,
        },
        RatedSample {
            pid: 3,
            name: "idle".into(),
            bytes_in_per_sec: 0.0,
            bytes_out_per_sec: 0.0,
        },
    ];
    let top = select_top(items, 2);
    let pids: Vec<u32> = top.iter().map(|s| s.pid).collect();
    assert_eq!(pids, vec![2, 1]);
}

#[test]
fn custom_ranking_key() {
    let items = vec![
        RatedSample {
            pid: 1,
            name: "a".into(),
            bytes_in_per_sec: 900.0,
            bytes_out_per_sec: 10.0,
        },
        RatedSample {
            pid: 2,
            name: "b".into(),
            bytes_in_per_sec: 100.0,
            bytes_out_per_sec: 800.0,
        },
    ];
    // Rank by outbound only.
    let top = select_top_by(items, 1, |s| s.bytes_out_per_sec);
    assert_eq!(top[0].pid, 2);
}

#[test]
fn identical_ranks_are_stable_across_shuffles() {
    let a = vec![sample(4, 77), sample(8, 77), sample(2, 77)];
    let b = vec![sample(8, 77), sample(2, 77), sample(4, 77)];
    let pick = |items| {
        select_top(items, 2)
            .iter()
            .map(|s: &ProcessSample| s.pid)
            .collect::<Vec<_>>()
    };
    assert_eq!(pick(a), pick(b));
}
