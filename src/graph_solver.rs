//! Bottom-up fixed-point driver. Repeatedly sweeps the tree from its
//! deepest parents up, solving each interior node's pending deposit over
//! its children, until no node has a positive `amount_to_add` left to
//! propagate.

use crate::error::Error;
use crate::solver::{default_max_steps, BucketSolution, BucketSolver, BucketSystem, SolveOptions, DEFAULT_STEP_SIZE};
use crate::tree::{normalize, LevelSpec, Tree};
use crate::schema::Column;

/// Run the driver to completion and return the solved tree.
///
/// Each pass visits (parent, children) groups in reverse breadth-first
/// order, deepest parents first, so that a parent's `amount_to_add` at
/// the time it's visited reflects only propagation written during a prior
/// pass, never this one. A parent with a positive `amount_to_add` has it
/// negated once consumed, a single-bit marker meaning "already propagated
/// this value" without a side set; finalization below undoes it with
/// `abs`.
pub fn solve(mut tree: Tree, solver: &BucketSolver, options: SolveOptions) -> Result<Tree, Error> {
    let mut converged = false;

    for attempt in 0..options.max_attempts {
        let mut stop = true;
        let groups = tree.bfs_groups();

        for (parent, children) in groups.into_iter().rev() {
            let amount = tree.node(parent).amount_to_add;
            if amount <= 0.0 {
                continue;
            }
            stop = false;

            let current_values: Vec<f64> = children.iter().map(|&c| tree.node(c).current_value).collect();
            let optimal_ratios: Vec<f64> = children.iter().map(|&c| tree.node(c).optimal_ratio).collect();
            let labels: Vec<String> = children.iter().map(|&c| tree.node(c).label.clone()).collect();
            let system = BucketSystem::new(amount, current_values, optimal_ratios, labels)?;

            let solved = solve_with_fallback(solver, &system, options.under_allocation_tolerance)?;

            tree.node_mut(parent).amount_to_add = -amount;
            for (&child, &delta) in children.iter().zip(solved.delta()) {
                tree.node_mut(child).amount_to_add += delta;
            }
        }

        if stop {
            log::info!("graph solver converged after {} pass(es)", attempt + 1);
            converged = true;
            break;
        }
    }

    if !converged {
        log::error!("graph solver exhausted {} attempts without converging", options.max_attempts);
        return Err(Error::SolverNotConverged { max_attempts: options.max_attempts });
    }

    Ok(finalize(tree))
}

/// `(&mut Tree, ...) -> ()` convenience wrapper around the functional
/// `solve`. Only worth reaching for if profiling shows the clone here
/// matters.
pub fn solve_in_place(tree: &mut Tree, solver: &BucketSolver, options: SolveOptions) -> Result<(), Error> {
    *tree = solve(tree.clone(), solver, options)?;
    Ok(())
}

fn solve_with_fallback(solver: &BucketSolver, system: &BucketSystem, tolerance: f64) -> Result<BucketSolution, Error> {
    let solution = solver.solve(system)?;
    if matches!(solver, BucketSolver::MonteCarlo { .. }) {
        return Ok(solution);
    }
    if (solution.delta_sum() - system.amount_to_add()).abs() > tolerance {
        log::warn!(
            "constrained solver under-allocated ({} of {}), falling back to monte-carlo",
            solution.delta_sum(),
            system.amount_to_add()
        );
        let max_steps = default_max_steps(system.amount_to_add(), DEFAULT_STEP_SIZE);
        let fallback = BucketSolver::MonteCarlo { step_size: DEFAULT_STEP_SIZE, max_steps };
        return fallback.solve(system);
    }
    Ok(solution)
}

fn finalize(mut tree: Tree) -> Tree {
    let nodes: Vec<_> = tree.nodes().collect();
    for idx in nodes {
        let amount = tree.node(idx).amount_to_add.abs();
        tree.node_mut(idx).amount_to_add = amount;
        let results_value = tree.node(idx).current_value + amount;
        tree.node_mut(idx).results_value = results_value;
        if !tree.is_leaf(idx) {
            tree.node_mut(idx).amount_to_add = 0.0;
        }
    }

    normalize(tree, Column::ResultsValue, Column::ResultsRatio, LevelSpec::All)
}
