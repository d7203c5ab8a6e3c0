//! Index-linked search tree for RRT*
//!
//! Nodes live in an append-only arena and refer to each other by index,
//! so rewiring a node never invalidates references held elsewhere.
//! Index 0 is always the root.

use ordered_float::OrderedFloat;

use crate::common::{Path2D, Point2D};

/// Tree vertex
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub position: Point2D,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    /// Path length from the root along the parent chain
    pub cost: f64,
}

impl Node {
    pub fn root(position: Point2D) -> Self {
        Node {
            position,
            parent: None,
            children: Vec::new(),
            cost: 0.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    pub fn new(root: Point2D) -> Self {
        Tree {
            nodes: vec![Node::root(root)],
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false, the root is never removed
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> &Node {
        &self.nodes[0]
    }

    pub fn node(&self, index: usize) -> &Node {
        &self.nodes[index]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Parent/child position pairs, one per non-root node
    pub fn edges(&self) -> impl Iterator<Item = (Point2D, Point2D)> + '_ {
        self.nodes.iter().filter_map(move |node| {
            node.parent
                .map(|parent| (self.nodes[parent].position, node.position))
        })
    }

    /// Index of the closest node, lowest index on ties
    pub fn nearest(&self, point: &Point2D) -> usize {
        self.nodes
            .iter()
            .enumerate()
            .min_by_key(|(_, node)| OrderedFloat(node.position.distance(point)))
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    /// Indices of all nodes within `radius` of `point`, inclusive
    pub fn within_radius(&self, point: &Point2D, radius: f64) -> Vec<usize> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.position.distance(point) <= radius)
            .map(|(i, _)| i)
            .collect()
    }

    /// Cost of reaching `point` through node `via`
    pub fn cost_through(&self, via: usize, point: &Point2D) -> f64 {
        let node = &self.nodes[via];
        node.cost + node.position.distance(point)
    }

    /// Append a node under `parent` and return its index
    pub fn attach(&mut self, position: Point2D, parent: usize) -> usize {
        let index = self.nodes.len();
        let cost = self.cost_through(parent, &position);

        self.nodes.push(Node {
            position,
            parent: Some(parent),
            children: Vec::new(),
            cost,
        });
        self.nodes[parent].children.push(index);
        index
    }

    /// Move `child` under `new_parent` and update the costs of its subtree.
    ///
    /// `new_parent` must not be a descendant of `child`.
    pub fn reparent(&mut self, child: usize, new_parent: usize) {
        if let Some(old_parent) = self.nodes[child].parent {
            self.nodes[old_parent].children.retain(|&c| c != child);
        }

        let cost = self.cost_through(new_parent, &self.nodes[child].position);
        self.nodes[child].cost = cost;
        self.nodes[child].parent = Some(new_parent);
        self.nodes[new_parent].children.push(child);

        self.propagate_costs(child);
    }

    /// Recompute the cost of every descendant of `from`, depth first
    pub fn propagate_costs(&mut self, from: usize) {
        let mut stack = vec![from];

        while let Some(parent) = stack.pop() {
            let (parent_cost, parent_position) = {
                let node = &self.nodes[parent];
                (node.cost, node.position)
            };

            for k in 0..self.nodes[parent].children.len() {
                let child = self.nodes[parent].children[k];
                let node = &mut self.nodes[child];
                node.cost = parent_cost + parent_position.distance(&node.position);
                stack.push(child);
            }
        }
    }

    /// Positions from the root down to `index`
    pub fn path_from_root(&self, index: usize) -> Path2D {
        let mut points = Vec::new();
        let mut current = Some(index);

        while let Some(i) = current {
            points.push(self.nodes[i].position);
            current = self.nodes[i].parent;
        }

        points.reverse();
        Path2D::from_points(points)
    }

    /// Check the parent/child links and cost bookkeeping of every node
    pub fn is_consistent(&self) -> bool {
        let n = self.nodes.len();
        let mut child_refs = vec![0usize; n];

        for node in &self.nodes {
            for &child in &node.children {
                if child >= n {
                    return false;
                }
                child_refs[child] += 1;
            }
        }

        self.nodes.iter().enumerate().all(|(i, node)| match node.parent {
            None => i == 0 && node.cost == 0.0 && child_refs[i] == 0,
            Some(parent) => {
                let expected = self.cost_through(parent, &node.position);
                parent < n
                    && node.cost == expected
                    && child_refs[i] == 1
                    && self.nodes[parent].children.contains(&i)
                    && self.reaches_root(i)
            }
        })
    }

    fn reaches_root(&self, index: usize) -> bool {
        let mut current = index;
        for _ in 0..self.nodes.len() {
            match self.nodes[current].parent {
                None => return current == 0,
                Some(parent) => current = parent,
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2D {
        Point2D::new(x, y)
    }

    // 0 (0,0) -> 1 (10,0) -> 2 (10,10) -> 3 (20,10)
    fn chain() -> Tree {
        let mut tree = Tree::new(p(0.0, 0.0));
        let a = tree.attach(p(10.0, 0.0), 0);
        let b = tree.attach(p(10.0, 10.0), a);
        tree.attach(p(20.0, 10.0), b);
        tree
    }

    #[test]
    fn test_new_tree_has_root_only() {
        let tree = Tree::new(p(5.0, 5.0));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.root().parent, None);
        assert_eq!(tree.root().cost, 0.0);
        assert!(tree.is_consistent());
    }

    #[test]
    fn test_attach_accumulates_cost() {
        let tree = chain();
        assert_eq!(tree.len(), 4);
        assert!((tree.node(3).cost - 30.0).abs() < 1e-10);
        assert_eq!(tree.node(1).children, vec![2]);
        assert!(tree.is_consistent());
        assert_eq!(tree.edges().count(), 3);
    }

    #[test]
    fn test_nearest_prefers_lowest_index_on_ties() {
        let mut tree = Tree::new(p(0.0, 0.0));
        tree.attach(p(10.0, 0.0), 0);
        tree.attach(p(0.0, 10.0), 0);
        assert_eq!(tree.nearest(&p(5.0, 5.0)), 0);
        assert_eq!(tree.nearest(&p(9.0, 1.0)), 1);
    }

    #[test]
    fn test_within_radius_is_inclusive() {
        let tree = chain();
        assert_eq!(tree.within_radius(&p(10.0, 5.0), 5.0), vec![1, 2]);
        assert!(tree.within_radius(&p(100.0, 100.0), 5.0).is_empty());
    }

    #[test]
    fn test_reparent_propagates_to_subtree() {
        let mut tree = chain();
        // Shortcut from the root straight to (10,10)
        let shortcut = tree.attach(p(5.0, 5.0), 0);
        tree.reparent(2, shortcut);

        assert_eq!(tree.node(2).parent, Some(shortcut));
        assert!(tree.node(1).children.is_empty());
        assert_eq!(tree.node(shortcut).children, vec![2]);

        let expected = 2.0 * 50.0f64.sqrt();
        assert!((tree.node(2).cost - expected).abs() < 1e-10);
        assert!((tree.node(3).cost - (expected + 10.0)).abs() < 1e-10);
        assert!(tree.is_consistent());
    }

    #[test]
    fn test_inconsistent_tree_is_detected() {
        let mut tree = chain();
        tree.nodes[3].cost += 1.0;
        assert!(!tree.is_consistent());

        let mut tree = chain();
        tree.nodes[0].children.push(2);
        assert!(!tree.is_consistent());
    }

    #[test]
    fn test_path_from_root() {
        let tree = chain();
        let path = tree.path_from_root(3);
        assert_eq!(path.points, vec![p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0), p(20.0, 10.0)]);
        assert!((path.total_length() - tree.node(3).cost).abs() < 1e-10);
        assert_eq!(tree.path_from_root(0).len(), 1);
    }
}
