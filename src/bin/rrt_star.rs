// RRT* path planning among polygonal obstacles loaded from a file

use clap::Parser;
use env_logger::Env;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use rrt_star_planner::utils::Visualizer;
use rrt_star_planner::{
    GoalRegion, ObstacleField, Point2D, RRTStar, RRTStarConfig, RoboticsError, RoboticsResult,
    Visualizable,
};

#[derive(Parser)]
#[command(name = "rrt_star")]
#[command(about = "Plan a path with RRT* around polygonal obstacles")]
struct Cli {
    /// Obstacle file: one "x y" vertex per line, polygons separated by a blank line
    obstacle_file: String,

    /// Optional overrides, all or none: START_X START_Y GOAL_X GOAL_Y GOAL_RADIUS
    #[arg(allow_negative_numbers = true)]
    overrides: Vec<f64>,

    /// Workspace width
    #[arg(long, default_value_t = 640)]
    width: u32,

    /// Workspace height
    #[arg(long, default_value_t = 480)]
    height: u32,

    /// Radius for parent selection and rewiring
    #[arg(long, default_value_t = 50.0)]
    neighborhood_radius: f64,

    /// Steering step size
    #[arg(long, default_value_t = 30.0)]
    rho: f64,

    /// Maximum iterations before giving up
    #[arg(long, default_value_t = 3000)]
    max_iterations: usize,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Save the result as SVG
    #[arg(short, long)]
    output: Option<String>,

    /// Open an interactive gnuplot window
    #[arg(long)]
    show: bool,
}

fn endpoints(overrides: &[f64]) -> RoboticsResult<(Point2D, GoalRegion)> {
    match overrides {
        [] => Ok((
            Point2D::new(10.0, 10.0),
            GoalRegion::new(Point2D::new(580.0, 460.0), 20.0),
        )),
        [sx, sy, gx, gy, radius] => Ok((
            Point2D::new(*sx, *sy),
            GoalRegion::new(Point2D::new(*gx, *gy), *radius),
        )),
        _ => Err(RoboticsError::InvalidParameter(format!(
            "start and goal overrides must be given together \
             (START_X START_Y GOAL_X GOAL_Y GOAL_RADIUS), got {} values",
            overrides.len()
        ))),
    }
}

fn main() -> RoboticsResult<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    println!("RRT* path planning start!!");

    let (start, goal) = endpoints(&cli.overrides)?;
    let obstacles = ObstacleField::from_file(&cli.obstacle_file)?;
    info!("loaded {} obstacles from {}", obstacles.len(), cli.obstacle_file);

    let config = RRTStarConfig {
        x_max: cli.width,
        y_max: cli.height,
        neighborhood_radius: cli.neighborhood_radius,
        rho: cli.rho,
        max_iterations: cli.max_iterations,
        ..Default::default()
    };

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut planner = RRTStar::with_rng(obstacles, start, goal, config, rng)?;

    let path = planner.find_best_path()?;
    if path.is_empty() {
        println!("Cannot find path within {} iterations", cli.max_iterations);
    } else {
        println!("Path found of length: {}", planner.cost());
    }

    if cli.output.is_some() || cli.show {
        let mut vis = Visualizer::new();
        vis.set_title("RRT* Path Planning")
            .set_x_range(0.0, cli.width as f64)
            .set_y_range(0.0, cli.height as f64);
        planner.visualize(&mut vis);

        if let Some(output) = &cli.output {
            vis.save_svg(output)?;
            println!("RRT* result saved to {}", output);
        }
        if cli.show {
            vis.show()?;
        }
    }

    println!("RRT* path planning finish!!");
    Ok(())
}
