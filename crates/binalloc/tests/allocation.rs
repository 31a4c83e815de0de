//! End-to-end allocation rounds against the MILP backend.

use binalloc::prelude::*;
use binalloc::{SolveStatus, SolverSettings};
use binalloc_core::ids::sequential;
use binalloc_test::{
    assert_each_item_placed, assert_occupancy, CountingSolver, PerBinPolicy, StubSolver,
};

#[test]
fn test_single_bin() {
    binalloc_console::init_for_tests();
    let mut allocator = Allocator::new(1, 1, 1);

    let placement = allocator.allocate().unwrap();
    assert_eq!(placement.len(), 1);
    assert_eq!(placement.bin_of(Item(0)), Some(Bin(0)));
}

#[test]
fn test_infeasible_over_capacity() {
    let mut allocator = Allocator::new(15, 1, 1);

    assert_eq!(allocator.allocate().unwrap_err(), AllocateError::Infeasible);
    assert!(allocator.last_placement().is_empty());
}

#[test]
fn test_even_split() {
    binalloc_console::init_for_tests();
    let mut allocator = Allocator::new(30, 5, 1);

    let placement = allocator.allocate().unwrap().clone();
    assert_eq!(placement.len(), 30);
    assert_eq!(placement.used_bins().len(), 5);
    assert_occupancy(
        &placement,
        &[(Bin(0), 6), (Bin(1), 6), (Bin(2), 6), (Bin(3), 6), (Bin(4), 6)],
    );
    assert_eq!(allocator.last_placement(), &placement);
}

#[test]
fn test_uneven_split_bounds_fullest_bin() {
    // Floor average 2: any placement whose fullest bin holds 3 is optimal,
    // so 3/3/1 is as good as 3/2/2.
    let mut allocator = Allocator::new(7, 3, 1);

    let placement = allocator.allocate().unwrap();
    let counts: Vec<usize> = placement.occupancy().into_values().collect();
    assert_eq!(counts.iter().sum::<usize>(), 7);
    assert_eq!(counts.iter().max(), Some(&3), "{:?}", counts);
}

#[test]
fn test_repeat_round_keeps_load_shape() {
    // Exact item-to-bin identity may differ between equal-cost solutions;
    // only per-bin counts are compared.
    let mut allocator = Allocator::new(12, 4, 1);

    let first = allocator.allocate().unwrap().occupancy();
    let second = allocator.allocate().unwrap().occupancy();
    let mut first: Vec<usize> = first.into_values().collect();
    let mut second: Vec<usize> = second.into_values().collect();
    first.sort_unstable();
    second.sort_unstable();
    assert_eq!(first, second);
}

#[test]
fn test_disabling_capacity_allows_overfill() {
    let options = AllocationOptions {
        disable_capacity_checking: true,
        ..AllocationOptions::default()
    };
    let mut allocator = Allocator::new(15, 1, 1).with_options(options);

    let placement = allocator.allocate().unwrap();
    assert_occupancy(placement, &[(Bin(0), 15)]);
}

#[test]
fn test_without_even_distribution_any_feasible_placement() {
    let options = AllocationOptions {
        disable_even_distribution: true,
        ..AllocationOptions::default()
    };
    let mut allocator = Allocator::new(12, 3, 1).with_options(options);

    let placement = allocator.allocate().unwrap();
    let items: Vec<Item> = sequential(12);
    assert_each_item_placed(placement, &items, 1);
    assert!(placement.occupancy().values().all(|&c| c <= 10));
}

#[test]
fn test_replicated_items_use_distinct_bins() {
    let policy = UniformPolicy::default().with_copies(2).with_capacity(2);
    let mut allocator = Allocator::new(3, 3, 1).with_policy(policy);

    let placement = allocator.allocate().unwrap();
    let items: Vec<Item> = sequential(3);
    assert_each_item_placed(placement, &items, 2);
    assert_occupancy(placement, &[(Bin(0), 2), (Bin(1), 2), (Bin(2), 2)]);
}

#[test]
fn test_replication_beyond_bins_is_infeasible() {
    let policy = UniformPolicy::default().with_copies(3);
    let mut allocator = Allocator::new(1, 2, 1).with_policy(policy);

    assert_eq!(allocator.allocate().unwrap_err(), AllocateError::Infeasible);
}

#[test]
fn test_per_bin_capacities() {
    let items: Vec<Item> = sequential(4);
    let bins: Vec<Bin> = sequential(2);
    let problem = Problem::new(&items, &bins, &[]).with_policy(PerBinPolicy::new(vec![1, 5]));

    let placement = allocate_round(&problem, &MilpSolver::new(), None).unwrap();
    assert_occupancy(&placement, &[(Bin(0), 1), (Bin(1), 3)]);
}

#[test]
fn test_empty_item_set() {
    let mut allocator = Allocator::new(0, 3, 1);

    let placement = allocator.allocate().unwrap();
    assert!(placement.is_empty());
}

#[test]
fn test_even_distribution_without_bins() {
    let mut allocator = Allocator::new(2, 0, 1);

    assert_eq!(allocator.allocate().unwrap_err(), AllocateError::EmptyBins);
}

#[test]
fn test_invalid_model_is_never_solved() {
    let items: Vec<Item> = sequential(2);
    let bins: Vec<Bin> = sequential(2);
    let problem = Problem::new(&items, &bins, &[]).with_max_surplus_bound(-1);
    let solver = CountingSolver::new(MilpSolver::new());

    let err = allocate_round(&problem, &solver, None).unwrap_err();
    assert!(matches!(err, AllocateError::InvalidModel(ref issues) if issues.len() == 1));
    assert_eq!(solver.calls(), 0);
}

#[test]
fn test_unbounded_surplus_bound_does_not_overflow() {
    let items: Vec<Item> = sequential(3);
    let bins: Vec<Bin> = sequential(2);
    let problem = Problem::new(&items, &bins, &[]).with_max_surplus_bound(i64::MAX);

    let placement = allocate_round(&problem, &MilpSolver::new(), None).unwrap();
    assert_each_item_placed(&placement, &items, 1);
    let mut counts: Vec<usize> = placement.occupancy().into_values().collect();
    counts.sort_unstable();
    assert_eq!(counts, vec![1, 2]);
}

#[test]
fn test_large_surplus_bound_still_balances() {
    let items: Vec<Item> = sequential(12);
    let bins: Vec<Bin> = sequential(4);
    let problem =
        Problem::new(&items, &bins, &[]).with_max_surplus_bound(1_000_000_000_000);

    let placement = allocate_round(&problem, &MilpSolver::new(), None).unwrap();
    assert_occupancy(
        &placement,
        &[(Bin(0), 3), (Bin(1), 3), (Bin(2), 3), (Bin(3), 3)],
    );
}

#[test]
fn test_not_optimal_keeps_last_placement() {
    let mut allocator = Allocator::new(4, 2, 1);
    let before = allocator.allocate().unwrap().clone();

    for status in [SolveStatus::Unknown, SolveStatus::Feasible] {
        let mut stubbed = allocator.clone().with_solver(StubSolver::new(status));
        let err = stubbed.allocate().unwrap_err();
        assert_eq!(err, AllocateError::NotOptimal);
        assert!(err.is_retryable());
        assert_eq!(stubbed.last_placement(), &before);
    }
}

#[test]
fn test_infeasible_keeps_last_placement() {
    let mut allocator = Allocator::new(10, 1, 1);
    let before = allocator.allocate().unwrap().clone();

    for _ in 0..5 {
        allocator.add_item();
    }
    assert_eq!(allocator.allocate().unwrap_err(), AllocateError::Infeasible);
    assert_eq!(allocator.last_placement(), &before);
}

#[test]
fn test_allocator_from_config() {
    let config = AllocatorConfig::from_toml_str(
        r#"
        [options]
        disable_capacity_checking = true

        [solver]
        max_surplus_bound = 20
        "#,
    )
    .unwrap();
    assert_eq!(config.solver, SolverSettings { max_surplus_bound: 20 });

    let mut allocator = Allocator::from_config(15, 1, 1, &config);
    assert_eq!(allocator.allocate().unwrap().len(), 15);
}
