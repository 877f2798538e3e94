use tgen_core::errors::{ErrorInfo, GenError};

use crate::generators::WeightLimit;

fn params(info: ErrorInfo) -> GenError {
    GenError::Params(info)
}

/// Maximum number of distinct edges on `point_count` vertices.
///
/// Counts ordered pairs when `directed`, unordered pairs otherwise, plus one
/// self-loop per vertex when `self_loop` is set.
pub fn max_edge_capacity(point_count: usize, directed: bool, self_loop: bool) -> usize {
    let mut capacity = point_count.saturating_mul(point_count.saturating_sub(1));
    if !directed {
        capacity /= 2;
    }
    if self_loop {
        capacity = capacity.saturating_add(point_count);
    }
    capacity
}

pub(crate) fn check_fraction(name: &str, value: f64) -> Result<(), GenError> {
    if (0.0..=1.0).contains(&value) {
        return Ok(());
    }
    Err(params(
        ErrorInfo::new("fraction-out-of-range", format!("{name} must be between 0 and 1"))
            .with_context(name, value),
    ))
}

pub(crate) fn check_fraction_pair(
    (name_a, a): (&str, f64),
    (name_b, b): (&str, f64),
) -> Result<(), GenError> {
    check_fraction(name_a, a)?;
    check_fraction(name_b, b)?;
    if a + b > 1.0 {
        return Err(params(
            ErrorInfo::new(
                "fraction-sum",
                format!("{name_a} plus {name_b} must not exceed 1"),
            )
            .with_context(name_a, a)
            .with_context(name_b, b),
        ));
    }
    Ok(())
}

pub(crate) fn check_weight_limit(limit: &WeightLimit) -> Result<(), GenError> {
    if limit.lo <= limit.hi {
        return Ok(());
    }
    Err(params(
        ErrorInfo::new("empty-weight-range", "weight range lower bound exceeds upper bound")
            .with_context("lo", limit.lo)
            .with_context("hi", limit.hi),
    ))
}

pub(crate) fn check_connectivity_floor(
    point_count: usize,
    edge_count: usize,
) -> Result<(), GenError> {
    if edge_count + 1 >= point_count {
        return Ok(());
    }
    Err(params(
        ErrorInfo::new(
            "below-connectivity-floor",
            "a connected graph needs at least point_count - 1 edges",
        )
        .points(point_count)
        .edges(edge_count),
    ))
}

/// Rejects requests that rejection sampling could never satisfy.
///
/// `capacity` is the number of distinct admissible edges. Without repeats the
/// request must fit in it; with repeats there must be at least one slot.
pub(crate) fn check_capacity(
    point_count: usize,
    edge_count: usize,
    capacity: usize,
    repeated_edges: bool,
) -> Result<(), GenError> {
    if edge_count == 0 {
        return Ok(());
    }
    if capacity == 0 {
        return Err(params(
            ErrorInfo::new("no-vertices", "no admissible edge exists for this vertex count")
                .points(point_count)
                .edges(edge_count),
        ));
    }
    if !repeated_edges && edge_count > capacity {
        return Err(params(
            ErrorInfo::new(
                "edge-capacity-exceeded",
                format!(
                    "a graph with {point_count} vertices holds at most {capacity} distinct edges"
                ),
            )
            .points(point_count)
            .edges(edge_count)
            .with_context("capacity", capacity)
            .with_hint("allow repeated edges or request fewer edges"),
        ));
    }
    Ok(())
}

pub(crate) fn check_tree_count(point_count: usize, tree_count: usize) -> Result<(), GenError> {
    if (1..=point_count).contains(&tree_count) {
        return Ok(());
    }
    Err(params(
        ErrorInfo::new("tree-count-out-of-range", "tree_count must be between 1 and point_count")
            .points(point_count)
            .with_context("tree_count", tree_count),
    ))
}

pub(crate) fn check_parent(vertex: usize, parent: usize) -> Result<(), GenError> {
    if (1..vertex).contains(&parent) {
        return Ok(());
    }
    Err(GenError::Precondition(
        ErrorInfo::new("parent-out-of-range", "parent must precede the attached vertex")
            .at_vertex(vertex)
            .with_context("parent", parent),
    ))
}
