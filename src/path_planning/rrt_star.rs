//! RRT* path planning among polygonal obstacles
//!
//! Grows a tree of collision-free straight segments from the start point,
//! choosing the cheapest collision-free parent for every new vertex and
//! rewiring nearby vertices through it whenever that shortens their path.
//! The search stops at the first vertex that lands inside the goal region.
//!
//! Samples are drawn from the integer lattice of the workspace and each
//! steering step is truncated toward zero per axis, so grown vertices stay
//! on integer coordinates.

use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Uniform};

use crate::common::{
    CollisionChecker, Path2D, Point2D, RoboticsError, RoboticsResult, Visualizable,
};
use crate::mapping::ObstacleField;
use crate::path_planning::tree::Tree;
use crate::utils::Visualizer;

/// Configuration for RRT* planner
#[derive(Debug, Clone)]
pub struct RRTStarConfig {
    /// Workspace width, samples have x in [0, x_max)
    pub x_max: u32,
    /// Workspace height, samples have y in [0, y_max)
    pub y_max: u32,
    /// Radius for parent selection and rewiring
    pub neighborhood_radius: f64,
    /// Maximum steering step
    pub rho: f64,
    /// Maximum iterations before reporting no path
    pub max_iterations: usize,
    /// Rejected samples allowed before giving up on free space
    pub max_sample_attempts: usize,
}

impl Default for RRTStarConfig {
    fn default() -> Self {
        Self {
            x_max: 640,
            y_max: 480,
            neighborhood_radius: 50.0,
            rho: 30.0,
            max_iterations: 3000,
            max_sample_attempts: 100_000,
        }
    }
}

impl RRTStarConfig {
    pub fn validate(&self) -> RoboticsResult<()> {
        if self.x_max == 0 || self.y_max == 0 {
            return Err(RoboticsError::ConfigurationError(format!(
                "workspace must be non-empty, got {}x{}",
                self.x_max, self.y_max
            )));
        }
        if !(self.rho > 0.0) {
            return Err(RoboticsError::ConfigurationError(format!(
                "step size must be positive, got {}",
                self.rho
            )));
        }
        if !(self.neighborhood_radius >= 0.0) {
            return Err(RoboticsError::ConfigurationError(format!(
                "neighborhood radius must be non-negative, got {}",
                self.neighborhood_radius
            )));
        }
        if self.max_sample_attempts == 0 {
            return Err(RoboticsError::ConfigurationError(
                "at least one sampling attempt is required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Disc around the goal point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalRegion {
    pub center: Point2D,
    pub radius: f64,
}

impl GoalRegion {
    pub fn new(center: Point2D, radius: f64) -> Self {
        GoalRegion { center, radius }
    }

    pub fn contains(&self, point: &Point2D) -> bool {
        point.distance(&self.center) <= self.radius
    }
}

/// Lifecycle of a planning run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerState {
    /// No run started yet
    Idle,
    /// Tree is being grown
    Growing,
    /// A vertex reached the goal region
    Succeeded,
    /// Iteration budget spent without reaching the goal
    Exhausted,
}

/// RRT* planner over a collision oracle
pub struct RRTStar<C = ObstacleField> {
    config: RRTStarConfig,
    obstacles: C,
    start: Point2D,
    goal: GoalRegion,
    tree: Tree,
    path: Path2D,
    path_cost: f64,
    state: PlannerState,
    iterations: usize,
    rng: StdRng,
    x_range: Uniform<u32>,
    y_range: Uniform<u32>,
}

impl<C: CollisionChecker> RRTStar<C> {
    /// Create a planner seeded from OS entropy
    pub fn new(
        obstacles: C,
        start: Point2D,
        goal: GoalRegion,
        config: RRTStarConfig,
    ) -> RoboticsResult<Self> {
        Self::with_rng(obstacles, start, goal, config, StdRng::from_entropy())
    }

    /// Create a planner drawing samples from the given generator.
    ///
    /// Fails if the start lies inside an obstacle. A goal inside an
    /// obstacle is accepted and simply never reached.
    pub fn with_rng(
        obstacles: C,
        start: Point2D,
        goal: GoalRegion,
        config: RRTStarConfig,
        rng: StdRng,
    ) -> RoboticsResult<Self> {
        config.validate()?;

        if !(goal.radius >= 0.0) {
            return Err(RoboticsError::ConfigurationError(format!(
                "goal radius must be non-negative, got {}",
                goal.radius
            )));
        }
        if obstacles.is_blocked(&start) {
            return Err(RoboticsError::ConfigurationError(format!(
                "start ({}, {}) lies within an obstacle",
                start.x, start.y
            )));
        }

        Ok(RRTStar {
            x_range: Uniform::new(0, config.x_max),
            y_range: Uniform::new(0, config.y_max),
            config,
            obstacles,
            start,
            goal,
            tree: Tree::new(start),
            path: Path2D::new(),
            path_cost: 0.0,
            state: PlannerState::Idle,
            iterations: 0,
            rng,
        })
    }

    /// Run a fresh search to completion.
    ///
    /// Returns the start-to-goal path, or an empty path when the iteration
    /// budget runs out.
    pub fn find_best_path(&mut self) -> RoboticsResult<Path2D> {
        self.reset();

        while self.state == PlannerState::Growing {
            self.step()?;
        }

        Ok(self.path.clone())
    }

    /// Drop the current tree and path and start growing from the root
    pub fn reset(&mut self) {
        self.tree = Tree::new(self.start);
        self.path = Path2D::new();
        self.path_cost = 0.0;
        self.iterations = 0;
        self.state = if self.config.max_iterations == 0 {
            PlannerState::Exhausted
        } else {
            PlannerState::Growing
        };
    }

    /// Run a single iteration; starts a run when idle.
    ///
    /// Terminal states are returned unchanged until the next `reset`.
    pub fn step(&mut self) -> RoboticsResult<PlannerState> {
        match self.state {
            PlannerState::Idle => self.reset(),
            PlannerState::Growing => {}
            PlannerState::Succeeded | PlannerState::Exhausted => return Ok(self.state),
        }
        if self.state != PlannerState::Growing {
            return Ok(self.state);
        }

        if self.iterations % 100 == 0 {
            debug!("Iter: {}, number of nodes: {}", self.iterations, self.tree.len());
        }
        self.iterations += 1;

        if let Some(new_index) = self.extend()? {
            let node = self.tree.node(new_index);
            if self.goal.contains(&node.position) {
                self.path = self.tree.path_from_root(new_index);
                self.path_cost = node.cost;
                self.state = PlannerState::Succeeded;
                info!(
                    "goal reached after {} iterations, cost {:.2}, {} nodes",
                    self.iterations,
                    self.path_cost,
                    self.tree.len()
                );
                return Ok(self.state);
            }
        }

        if self.iterations >= self.config.max_iterations {
            self.state = PlannerState::Exhausted;
            info!(
                "reached max iterations ({}) without finding the goal, {} nodes",
                self.iterations,
                self.tree.len()
            );
        }
        Ok(self.state)
    }

    // Sample, steer, choose a parent, attach and rewire. Returns the new
    // node index, or None when the iteration is abandoned.
    fn extend(&mut self) -> RoboticsResult<Option<usize>> {
        let sample = self.free_sample()?;
        let nearest = self.tree.nearest(&sample);
        let candidate = self.steer(&sample, &self.tree.node(nearest).position);

        if self.obstacles.is_blocked(&candidate) {
            return Ok(None);
        }

        let neighbors = self.tree.within_radius(&candidate, self.config.neighborhood_radius);
        let parent = match self.choose_parent(&neighbors, nearest, &candidate) {
            Some(parent) => parent,
            None => return Ok(None),
        };

        let new_index = self.tree.attach(candidate, parent);
        self.rewire(&neighbors, new_index);

        Ok(Some(new_index))
    }

    // Uniform lattice point outside every obstacle
    fn free_sample(&mut self) -> RoboticsResult<Point2D> {
        for _ in 0..self.config.max_sample_attempts {
            let point = Point2D::new(
                self.x_range.sample(&mut self.rng) as f64,
                self.y_range.sample(&mut self.rng) as f64,
            );
            if !self.obstacles.is_blocked(&point) {
                return Ok(point);
            }
        }

        Err(RoboticsError::NoFreeSpace {
            attempts: self.config.max_sample_attempts,
        })
    }

    fn steer(&self, sample: &Point2D, nearest: &Point2D) -> Point2D {
        if sample.distance(nearest) <= self.config.rho {
            return *sample;
        }

        match (*sample - *nearest).normalized() {
            Some(direction) => {
                let step = direction * self.config.rho;
                *nearest + Point2D::new(step.x.trunc(), step.y.trunc())
            }
            None => *sample,
        }
    }

    fn choose_parent(&self, neighbors: &[usize], nearest: usize, candidate: &Point2D) -> Option<usize> {
        let mut best = nearest;
        let mut best_cost = self.tree.cost_through(nearest, candidate);

        for &i in neighbors {
            let cost = self.tree.cost_through(i, candidate);
            if cost < best_cost
                && !self.obstacles.segment_blocked(&self.tree.node(i).position, candidate)
            {
                best = i;
                best_cost = cost;
            }
        }

        // Only the nearest vertex is left and its edge is obstructed
        if best == nearest
            && self.obstacles.segment_blocked(&self.tree.node(nearest).position, candidate)
        {
            return None;
        }

        Some(best)
    }

    fn rewire(&mut self, neighbors: &[usize], new_index: usize) {
        let new_position = self.tree.node(new_index).position;

        for &i in neighbors {
            let position = self.tree.node(i).position;
            let cost = self.tree.cost_through(new_index, &position);

            if cost < self.tree.node(i).cost
                && !self.obstacles.segment_blocked(&position, &new_position)
            {
                trace!(
                    "rewire node {} through {}: {:.2} -> {:.2}",
                    i,
                    new_index,
                    self.tree.node(i).cost,
                    cost
                );
                self.tree.reparent(i, new_index);
            }
        }
    }

    pub fn state(&self) -> PlannerState {
        self.state
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Last path found, empty if none
    pub fn path(&self) -> &Path2D {
        &self.path
    }

    pub fn path_cost(&self) -> f64 {
        self.path_cost
    }

    /// Path cost truncated to whole units
    pub fn cost(&self) -> i64 {
        self.path_cost as i64
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn start(&self) -> Point2D {
        self.start
    }

    pub fn goal(&self) -> &GoalRegion {
        &self.goal
    }

    pub fn config(&self) -> &RRTStarConfig {
        &self.config
    }

    pub fn obstacles(&self) -> &C {
        &self.obstacles
    }
}

impl<C: CollisionChecker + Visualizable> Visualizable for RRTStar<C> {
    fn visualize(&self, vis: &mut Visualizer) {
        self.obstacles.visualize(vis);
        vis.plot_tree(&self.tree);
        vis.plot_path(&self.path, &crate::utils::PathStyle::default());
        vis.plot_start(self.start);
        vis.plot_goal_region(&self.goal);
    }
}
