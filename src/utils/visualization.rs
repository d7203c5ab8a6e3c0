//! Visualization utilities for rrt_star_planner
//!
//! Provides a unified interface for plotting obstacles, search trees and
//! paths using gnuplot.

use std::f64::consts::PI;

use gnuplot::{AutoOption, AxesCommon, Caption, Color, Figure, LineWidth, PointSize, PointSymbol};
use itertools::Itertools;

use crate::common::{Path2D, Point2D, RoboticsError, RoboticsResult, Visualizable};
use crate::geometry::Polygon;
use crate::mapping::ObstacleField;
use crate::path_planning::{GoalRegion, Tree};

/// Color palette for consistent styling
pub mod colors {
    pub const BLACK: &str = "#000000";
    pub const RED: &str = "#FF0000";
    pub const GREEN: &str = "#00FF00";
    pub const BLUE: &str = "#0000FF";
    pub const GRAY: &str = "#808080";

    // Semantic colors
    pub const OBSTACLE: &str = "#9873AC";
    pub const TREE: &str = "#C8C8C8";
    pub const START: &str = GREEN;
    pub const GOAL: &str = "#C81E1E";
    pub const PATH: &str = "#006464";
}

// Points used to draw the goal circle
const GOAL_CIRCLE_POINTS: usize = 40;

/// Style for path rendering
#[derive(Debug, Clone)]
pub struct PathStyle {
    pub color: String,
    pub line_width: f64,
    pub caption: String,
}

impl PathStyle {
    pub fn new(color: &str, caption: &str) -> Self {
        Self {
            color: color.to_string(),
            line_width: 2.0,
            caption: caption.to_string(),
        }
    }

    pub fn with_line_width(mut self, width: f64) -> Self {
        self.line_width = width;
        self
    }
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            color: colors::PATH.to_string(),
            line_width: 2.0,
            caption: "Path".to_string(),
        }
    }
}

/// Main visualizer struct
pub struct Visualizer {
    figure: Figure,
    title: String,
    x_label: String,
    y_label: String,
    x_range: Option<(f64, f64)>,
    y_range: Option<(f64, f64)>,
    aspect_ratio: Option<f64>,
}

impl Visualizer {
    /// Create a new visualizer
    pub fn new() -> Self {
        Self {
            figure: Figure::new(),
            title: String::new(),
            x_label: "X".to_string(),
            y_label: "Y".to_string(),
            x_range: None,
            y_range: None,
            aspect_ratio: Some(1.0),
        }
    }

    /// Set the plot title
    pub fn set_title(&mut self, title: &str) -> &mut Self {
        self.title = title.to_string();
        self
    }

    /// Set X axis range
    pub fn set_x_range(&mut self, min: f64, max: f64) -> &mut Self {
        self.x_range = Some((min, max));
        self
    }

    /// Set Y axis range
    pub fn set_y_range(&mut self, min: f64, max: f64) -> &mut Self {
        self.y_range = Some((min, max));
        self
    }

    /// Set aspect ratio (None for auto)
    pub fn set_aspect_ratio(&mut self, ratio: Option<f64>) -> &mut Self {
        self.aspect_ratio = ratio;
        self
    }

    /// Plot the closed outline of a polygon
    pub fn plot_polygon(&mut self, polygon: &Polygon) -> &mut Self {
        let (x, y) = closed_ring(polygon.vertices());

        self.figure.axes2d()
            .lines(&x, &y, &[
                Color(colors::OBSTACLE),
                LineWidth(1.5),
            ]);
        self
    }

    /// Plot every polygon of an obstacle field
    pub fn plot_obstacle_field(&mut self, field: &ObstacleField) -> &mut Self {
        for polygon in field.polygons() {
            self.plot_polygon(polygon);
        }
        self
    }

    /// Plot tree edges and vertices
    pub fn plot_tree(&mut self, tree: &Tree) -> &mut Self {
        for (parent, child) in tree.edges() {
            self.figure.axes2d()
                .lines(&[parent.x, child.x], &[parent.y, child.y], &[
                    Color(colors::TREE),
                    LineWidth(0.5),
                ]);
        }

        let x: Vec<f64> = tree.nodes().iter().map(|n| n.position.x).collect();
        let y: Vec<f64> = tree.nodes().iter().map(|n| n.position.y).collect();
        self.figure.axes2d()
            .points(&x, &y, &[
                Caption("Tree"),
                Color(colors::TREE),
                PointSymbol('.'),
                PointSize(0.5),
            ]);
        self
    }

    /// Plot a path
    pub fn plot_path(&mut self, path: &Path2D, style: &PathStyle) -> &mut Self {
        if path.is_empty() {
            return self;
        }

        self.figure.axes2d()
            .lines(&path.x_coords(), &path.y_coords(), &[
                Caption(&style.caption),
                Color(&style.color),
                LineWidth(style.line_width),
            ]);
        self
    }

    /// Plot start position
    pub fn plot_start(&mut self, point: Point2D) -> &mut Self {
        self.figure.axes2d()
            .points(&[point.x], &[point.y], &[
                Caption("Start"),
                Color(colors::START),
                PointSymbol('O'),
                PointSize(1.5),
            ]);
        self
    }

    /// Plot the goal region as a dotted circle
    pub fn plot_goal_region(&mut self, goal: &GoalRegion) -> &mut Self {
        let (x, y): (Vec<f64>, Vec<f64>) = circle_points(goal.center, goal.radius)
            .into_iter()
            .map(|p| (p.x, p.y))
            .unzip();

        self.figure.axes2d()
            .points(&x, &y, &[
                Caption("Goal"),
                Color(colors::GOAL),
                PointSymbol('.'),
                PointSize(0.8),
            ]);
        self
    }

    /// Finalize and show the plot
    pub fn show(&mut self) -> RoboticsResult<()> {
        self.apply_settings();
        self.figure.show()
            .map(|_| ())
            .map_err(|e| RoboticsError::VisualizationError(e.to_string()))
    }

    /// Save plot to PNG file
    pub fn save_png(&mut self, path: &str, width: u32, height: u32) -> RoboticsResult<()> {
        self.apply_settings();
        self.figure.save_to_png(path, width, height)
            .map_err(|e| RoboticsError::VisualizationError(e.to_string()))
    }

    /// Save plot to SVG file
    pub fn save_svg(&mut self, path: &str) -> RoboticsResult<()> {
        self.apply_settings();
        self.figure.save_to_svg(path, 800, 600)
            .map_err(|e| RoboticsError::VisualizationError(e.to_string()))
    }

    fn apply_settings(&mut self) {
        let axes = self.figure.axes2d();

        if !self.title.is_empty() {
            axes.set_title(&self.title, &[]);
        }
        axes.set_x_label(&self.x_label, &[]);
        axes.set_y_label(&self.y_label, &[]);

        if let Some((min, max)) = self.x_range {
            axes.set_x_range(AutoOption::Fix(min), AutoOption::Fix(max));
        }
        if let Some((min, max)) = self.y_range {
            axes.set_y_range(AutoOption::Fix(min), AutoOption::Fix(max));
        }
        if let Some(ratio) = self.aspect_ratio {
            axes.set_aspect_ratio(AutoOption::Fix(ratio));
        }
    }
}

impl Default for Visualizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Visualizable for ObstacleField {
    fn visualize(&self, vis: &mut Visualizer) {
        vis.plot_obstacle_field(self);
    }
}

// Vertex coordinates with the first vertex repeated at the end
fn closed_ring(vertices: &[Point2D]) -> (Vec<f64>, Vec<f64>) {
    vertices
        .iter()
        .chain(vertices.first())
        .map(|v| (v.x, v.y))
        .unzip()
}

fn circle_points(center: Point2D, radius: f64) -> Vec<Point2D> {
    (0..GOAL_CIRCLE_POINTS)
        .map(|i| {
            let theta = 2.0 * PI * i as f64 / GOAL_CIRCLE_POINTS as f64;
            Point2D::new(center.x + radius * theta.cos(), center.y + radius * theta.sin())
        })
        .collect_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visualizer_creation() {
        let vis = Visualizer::new();
        assert!(vis.aspect_ratio.is_some());
    }

    #[test]
    fn test_path_style() {
        let style = PathStyle::new(colors::RED, "Test Path")
            .with_line_width(3.0);
        assert_eq!(style.line_width, 3.0);
        assert_eq!(style.color, colors::RED);
    }

    #[test]
    fn test_closed_ring() {
        let (x, y) = closed_ring(&[
            Point2D::new(0.0, 0.0),
            Point2D::new(0.0, 1.0),
            Point2D::new(1.0, 0.0),
        ]);
        assert_eq!(x, vec![0.0, 0.0, 1.0, 0.0]);
        assert_eq!(y, vec![0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_circle_points_lie_on_goal_circle() {
        let center = Point2D::new(580.0, 460.0);
        let points = circle_points(center, 20.0);
        assert_eq!(points.len(), GOAL_CIRCLE_POINTS);
        assert!(points.iter().all(|p| (p.distance(&center) - 20.0).abs() < 1e-9));
    }

    #[test]
    fn test_plot_scene_builds_without_rendering() {
        let field = ObstacleField::parse("0 0\n0 10\n10 10\n10 0").unwrap();
        let mut tree = Tree::new(Point2D::new(20.0, 20.0));
        tree.attach(Point2D::new(30.0, 20.0), 0);

        let mut vis = Visualizer::new();
        field.visualize(&mut vis);
        vis.plot_tree(&tree)
            .plot_path(&tree.path_from_root(1), &PathStyle::default())
            .plot_start(Point2D::new(20.0, 20.0))
            .plot_goal_region(&GoalRegion::new(Point2D::new(30.0, 20.0), 5.0));
    }
}
