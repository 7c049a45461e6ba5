//! Global cheapest-arc tour construction.
//!
//! # Algorithm
//!
//! Every ordered pair (i, j), i ≠ j, is a candidate arc. Candidates are
//! sorted by ascending cost (ties keep row-major order, so the result is
//! reproducible) and scanned once. An arc u→v is accepted when
//!
//! - u has no outgoing arc and v has no incoming arc yet, and
//! - u and v lie on different chains, or the arc is the closing arc: n−1
//!   arcs are in, every node is on one chain, and v is that chain's tail.
//!
//! Accepted arcs join chains; after n acceptances the chains form a single
//! Hamiltonian circuit, which is read off by following successors from the
//! depot.
//!
//! This is a first-solution heuristic: no backtracking and no improvement
//! phase, so the tour is not minimal in general for n > 4.
//!
//! # Complexity
//!
//! O(n² log n), dominated by sorting the n(n−1) candidates.

use super::chain::ChainTracker;
use crate::distance::CostMatrix;
use crate::error::SolveError;
use crate::models::{Arc, DEPOT};

/// Builds a closed tour with the global cheapest-arc heuristic.
///
/// Returns the node sequence (depot first and last, n+1 entries) and the
/// sum of the n accepted arc costs.
///
/// # Examples
///
/// ```
/// use u_tour::distance::CostMatrix;
/// use u_tour::constructive::cheapest_arc;
///
/// let labels = ["A", "B", "C", "D"].map(String::from).to_vec();
/// let dm = CostMatrix::new(
///     vec![
///         vec![0.0, 10.0, 15.0, 20.0],
///         vec![10.0, 0.0, 35.0, 25.0],
///         vec![15.0, 35.0, 0.0, 30.0],
///         vec![20.0, 25.0, 30.0, 0.0],
///     ],
///     labels,
/// )
/// .unwrap();
///
/// let (tour, cost) = cheapest_arc(&dm).unwrap();
/// assert_eq!(tour, vec![0, 1, 3, 2, 0]);
/// assert_eq!(cost, 80.0);
/// ```
pub fn cheapest_arc(matrix: &CostMatrix) -> Result<(Vec<usize>, f64), SolveError> {
    let n = matrix.size();
    let mut candidates = Vec::with_capacity(n * n.saturating_sub(1));
    for i in 0..n {
        for j in 0..n {
            if i != j {
                candidates.push(Arc::new(i, j, matrix.cost(i, j)));
            }
        }
    }
    build_from_candidates(n, candidates)
}

/// Per-solve working state.
struct PartialTour {
    out_used: Vec<bool>,
    in_used: Vec<bool>,
    successor: Vec<Option<usize>>,
    chains: ChainTracker,
    accepted: usize,
    cost: f64,
}

impl PartialTour {
    fn new(n: usize) -> Self {
        Self {
            out_used: vec![false; n],
            in_used: vec![false; n],
            successor: vec![None; n],
            chains: ChainTracker::new(n),
            accepted: 0,
            cost: 0.0,
        }
    }

    fn n(&self) -> usize {
        self.successor.len()
    }

    /// Whether `arc` keeps the partial structure extendable to a circuit.
    fn admits(&mut self, arc: &Arc) -> bool {
        let (u, v) = (arc.tail, arc.head);
        if u == v || self.out_used[u] || self.in_used[v] {
            return false;
        }
        if !self.chains.same_chain(u, v) {
            return true;
        }
        // Same chain: only the arc that closes the full circuit is allowed.
        self.accepted + 1 == self.n()
            && self.chains.chain_len(u) == self.n()
            && self.chains.head_of(u) == u
            && self.chains.tail_of(u) == v
    }

    fn accept(&mut self, arc: &Arc) {
        self.out_used[arc.tail] = true;
        self.in_used[arc.head] = true;
        self.successor[arc.tail] = Some(arc.head);
        self.chains.link(arc.tail, arc.head);
        self.accepted += 1;
        self.cost += arc.cost;
    }

    /// Follows successors from the depot; `None` if they do not form one
    /// circuit through all nodes.
    fn circuit(&self) -> Option<Vec<usize>> {
        let n = self.n();
        let mut tour = Vec::with_capacity(n + 1);
        let mut current = DEPOT;
        tour.push(current);
        for _ in 0..n {
            current = self.successor[current]?;
            tour.push(current);
        }
        (current == DEPOT).then_some(tour)
    }
}

/// Runs the acceptance scan over an explicit candidate list.
///
/// Candidates are stably sorted by cost, so ties keep the order given.
/// Fails with [`SolveError::Infeasible`] when the candidates run out before
/// n arcs are accepted.
pub(crate) fn build_from_candidates(
    n: usize,
    mut candidates: Vec<Arc>,
) -> Result<(Vec<usize>, f64), SolveError> {
    candidates.sort_by(|a, b| a.cost.total_cmp(&b.cost));
    log::debug!("cheapest_arc: n={n} candidates={}", candidates.len());

    let mut partial = PartialTour::new(n);
    for arc in &candidates {
        if partial.accepted == n {
            break;
        }
        if partial.admits(arc) {
            log::trace!(
                "cheapest_arc: accept {}->{} cost={} accepted={}",
                arc.tail,
                arc.head,
                arc.cost,
                partial.accepted + 1
            );
            partial.accept(arc);
        }
    }

    if partial.accepted < n {
        log::debug!(
            "cheapest_arc: candidates exhausted accepted={} required={n}",
            partial.accepted
        );
        return Err(SolveError::Infeasible {
            accepted: partial.accepted,
            required: n,
        });
    }

    let tour = partial.circuit().ok_or(SolveError::Infeasible {
        accepted: partial.accepted,
        required: n,
    })?;
    Ok((tour, partial.cost))
}
