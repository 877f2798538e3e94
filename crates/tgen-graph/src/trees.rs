use rand::seq::index;
use rand::Rng;
use tgen_core::errors::GenError;
use tgen_core::{Edge, RngHandle};
use tracing::{debug, instrument};

use crate::generators::{ParentGen, UniformParent, WeightGen};
use crate::graph::Graph;
use crate::options::{BinaryTreeOptions, TreeOptions};
use crate::validate;

/// Maps a uniform draw in `[0, 1)` to a side: `[0, left)` and the lower half
/// of `[left + right, 1)` go left.
fn goes_left(options: &BinaryTreeOptions, draw: f64) -> bool {
    let sided = options.left + options.right;
    let left_cut = sided + (1.0 - sided) / 2.0;
    draw < options.left || (draw >= sided && draw < left_cut)
}

impl Graph {
    /// Random tree on `point_count` vertices.
    ///
    /// The first `floor((n-1) * chain)` edges form the path `1-2-…`, the next
    /// `floor((n-1) * flower)` attach to vertex 1, and the rest attach to a
    /// uniformly chosen lower-indexed vertex.
    pub fn tree(
        point_count: usize,
        options: &TreeOptions,
        rng: &mut RngHandle,
    ) -> Result<Graph, GenError> {
        let mut weights = options.weight_limit;
        Self::tree_with(point_count, options, &mut weights, &mut UniformParent, rng)
    }

    /// [`Graph::tree`] with explicit weight and parent generators.
    #[instrument(
        level = "debug",
        skip(options, weights, parents, rng),
        fields(chain = options.chain, flower = options.flower)
    )]
    pub fn tree_with<W, P>(
        point_count: usize,
        options: &TreeOptions,
        weights: &mut W,
        parents: &mut P,
        rng: &mut RngHandle,
    ) -> Result<Graph, GenError>
    where
        W: WeightGen + ?Sized,
        P: ParentGen + ?Sized,
    {
        weights.check()?;
        validate::check_fraction_pair(("chain", options.chain), ("flower", options.flower))?;

        let mut graph = Graph::new(point_count, options.directed);
        let edge_total = point_count.saturating_sub(1);
        let chain_count = ((edge_total as f64 * options.chain) as usize).min(edge_total);
        let flower_count =
            ((edge_total as f64 * options.flower) as usize).min(edge_total - chain_count);
        let random_count = edge_total - chain_count - flower_count;

        for v in 2..chain_count + 2 {
            graph.add_edge(v - 1, v, weights.next_weight(rng))?;
        }
        for v in chain_count + 2..chain_count + flower_count + 2 {
            graph.add_edge(1, v, weights.next_weight(rng))?;
        }
        for v in point_count - random_count + 1..=point_count {
            let parent = parents.parent_of(v, rng);
            validate::check_parent(v, parent)?;
            graph.add_edge(parent, v, weights.next_weight(rng))?;
        }

        debug!(chain_count, flower_count, random_count, "tree built");
        Ok(graph)
    }

    /// Path `1-2-…-n`.
    pub fn chain(
        point_count: usize,
        options: &TreeOptions,
        rng: &mut RngHandle,
    ) -> Result<Graph, GenError> {
        let shaped = TreeOptions {
            chain: 1.0,
            flower: 0.0,
            ..*options
        };
        Self::tree(point_count, &shaped, rng)
    }

    /// Star centred on vertex 1.
    pub fn flower(
        point_count: usize,
        options: &TreeOptions,
        rng: &mut RngHandle,
    ) -> Result<Graph, GenError> {
        let shaped = TreeOptions {
            chain: 0.0,
            flower: 1.0,
            ..*options
        };
        Self::tree(point_count, &shaped, rng)
    }

    /// Random binary tree rooted at vertex 1.
    pub fn binary_tree(
        point_count: usize,
        options: &BinaryTreeOptions,
        rng: &mut RngHandle,
    ) -> Result<Graph, GenError> {
        let mut weights = options.weight_limit;
        Self::binary_tree_with(point_count, options, &mut weights, rng)
    }

    /// [`Graph::binary_tree`] with an explicit weight generator.
    ///
    /// Each vertex keeps one open left and one open right slot. Vertex `i`
    /// picks a side (left with probability `left`, right with `right`, the
    /// remainder split evenly), then a uniformly random open slot on that side.
    #[instrument(
        level = "debug",
        skip(options, weights, rng),
        fields(left = options.left, right = options.right)
    )]
    pub fn binary_tree_with<W>(
        point_count: usize,
        options: &BinaryTreeOptions,
        weights: &mut W,
        rng: &mut RngHandle,
    ) -> Result<Graph, GenError>
    where
        W: WeightGen + ?Sized,
    {
        weights.check()?;
        validate::check_fraction_pair(("left", options.left), ("right", options.right))?;

        let mut graph = Graph::new(point_count, options.directed);
        let mut open_left = vec![1];
        let mut open_right = vec![1];

        for v in 2..=point_count {
            let open = if goes_left(options, rng.gen()) {
                &mut open_left
            } else {
                &mut open_right
            };
            let slot = rng.gen_range(0..open.len());
            let parent = open.swap_remove(slot);
            graph.add_edge(parent, v, weights.next_weight(rng))?;
            open_left.push(v);
            open_right.push(v);
        }
        Ok(graph)
    }

    /// Forest of `tree_count` trees.
    ///
    /// Builds a random tree, then keeps a uniformly chosen set of
    /// `point_count - tree_count` of its edges in canonical order.
    pub fn forest(
        point_count: usize,
        tree_count: usize,
        options: &TreeOptions,
        rng: &mut RngHandle,
    ) -> Result<Graph, GenError> {
        let mut weights = options.weight_limit;
        Self::forest_with(
            point_count,
            tree_count,
            options,
            &mut weights,
            &mut UniformParent,
            rng,
        )
    }

    /// [`Graph::forest`] with explicit weight and parent generators.
    #[instrument(level = "debug", skip(options, weights, parents, rng))]
    pub fn forest_with<W, P>(
        point_count: usize,
        tree_count: usize,
        options: &TreeOptions,
        weights: &mut W,
        parents: &mut P,
        rng: &mut RngHandle,
    ) -> Result<Graph, GenError>
    where
        W: WeightGen + ?Sized,
        P: ParentGen + ?Sized,
    {
        validate::check_tree_count(point_count, tree_count)?;

        let tree = Self::tree_with(point_count, options, weights, parents, rng)?;
        let tree_edges: Vec<Edge> = tree.edges().copied().collect();
        let keep = point_count - tree_count;
        let mut picked = index::sample(rng, tree_edges.len(), keep).into_vec();
        picked.sort_unstable();

        let mut forest = Graph::new(point_count, options.directed);
        for edge in picked.into_iter().map(|i| tree_edges[i]) {
            forest.add_edge(edge.start, edge.end, edge.weight)?;
        }
        Ok(forest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(left: f64, right: f64) -> BinaryTreeOptions {
        BinaryTreeOptions {
            left,
            right,
            ..BinaryTreeOptions::default()
        }
    }

    #[test]
    fn side_cuts_follow_the_fractions() {
        let options = split(0.3, 0.2);
        assert!(goes_left(&options, 0.0));
        assert!(goes_left(&options, 0.29));
        assert!(!goes_left(&options, 0.3));
        assert!(!goes_left(&options, 0.49));
        assert!(goes_left(&options, 0.55));
        assert!(goes_left(&options, 0.7));
        assert!(!goes_left(&options, 0.8));
        assert!(!goes_left(&options, 0.99));
    }

    #[test]
    fn unset_fractions_split_evenly() {
        let options = split(0.0, 0.0);
        let mut rng = RngHandle::from_seed(17);
        let draws = 10_000;
        let lefts = (0..draws)
            .filter(|_| goes_left(&options, rng.gen()))
            .count();
        assert!((4_500..=5_500).contains(&lefts), "left share {lefts}");
    }

    #[test]
    fn full_fractions_pin_the_side() {
        let mut rng = RngHandle::from_seed(3);
        for _ in 0..1_000 {
            let draw: f64 = rng.gen();
            assert!(goes_left(&split(1.0, 0.0), draw));
            assert!(!goes_left(&split(0.0, 1.0), draw));
        }
    }
}
