//! Error types for rrt_star_planner

use std::fmt;

/// Main error type for the planner and its geometry layer
#[derive(Debug)]
pub enum RoboticsError {
    /// Planner was configured with an unusable start or parameters
    ConfigurationError(String),
    /// Invalid parameter
    InvalidParameter(String),
    /// Containment query on a polygon that has not been triangulated
    UntriangulatedPolygon,
    /// Ear clipping could not find an ear
    TriangulationError(String),
    /// Malformed line in an obstacle file (1-based line number)
    ParseError { line: usize, message: String },
    /// Rejection sampling never hit free space
    NoFreeSpace { attempts: usize },
    /// I/O error
    IoError(std::io::Error),
    /// Visualization error
    VisualizationError(String),
}

impl fmt::Display for RoboticsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoboticsError::ConfigurationError(msg) => write!(f, "Configuration error: {}", msg),
            RoboticsError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            RoboticsError::UntriangulatedPolygon => write!(
                f,
                "Containment queries require a triangulated polygon, call triangulate() first"
            ),
            RoboticsError::TriangulationError(msg) => write!(f, "Triangulation error: {}", msg),
            RoboticsError::ParseError { line, message } => {
                write!(f, "Parse error on line {}: {}", line, message)
            }
            RoboticsError::NoFreeSpace { attempts } => write!(
                f,
                "No free space found after {} sampling attempts",
                attempts
            ),
            RoboticsError::IoError(e) => write!(f, "I/O error: {}", e),
            RoboticsError::VisualizationError(msg) => write!(f, "Visualization error: {}", msg),
        }
    }
}

impl std::error::Error for RoboticsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RoboticsError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RoboticsError {
    fn from(e: std::io::Error) -> Self {
        RoboticsError::IoError(e)
    }
}

/// Result type alias for planner operations
pub type RoboticsResult<T> = Result<T, RoboticsError>;
