//! Obstacle polygon text format
//!
//! One vertex per line as `"<x> <y>"`, polygons separated by a blank line:
//!
//! ```text
//! 100 100
//! 100 200
//! 200 200
//! 200 100
//!
//! 300 50
//! 350 120
//! 400 50
//! ```

use std::fs;
use std::path::Path;

use log::warn;

use crate::common::{Point2D, RoboticsError, RoboticsResult};
use crate::geometry::Polygon;

/// Parse polygons from obstacle-file text. Polygons are not triangulated.
pub fn parse_obstacles(text: &str) -> RoboticsResult<Vec<Polygon>> {
    let mut polygons = Vec::new();
    let mut vertices = Vec::new();

    for (i, raw) in text.lines().enumerate() {
        let line = raw.trim_end_matches('\r');

        if line.is_empty() {
            if vertices.is_empty() {
                warn!("skipping empty polygon at line {}", i + 1);
            }
            flush_polygon(&mut polygons, &mut vertices);
        } else {
            vertices.push(parse_vertex(line, i + 1)?);
        }
    }
    flush_polygon(&mut polygons, &mut vertices);

    Ok(polygons)
}

/// Read and parse an obstacle file
pub fn load_obstacles<P: AsRef<Path>>(path: P) -> RoboticsResult<Vec<Polygon>> {
    let text = fs::read_to_string(path)?;
    parse_obstacles(&text)
}

fn flush_polygon(polygons: &mut Vec<Polygon>, vertices: &mut Vec<Point2D>) {
    if !vertices.is_empty() {
        polygons.push(Polygon::new(std::mem::take(vertices)));
    }
}

fn parse_vertex(line: &str, line_no: usize) -> RoboticsResult<Point2D> {
    let tokens: Vec<&str> = line.split(' ').collect();
    if tokens.len() != 2 {
        return Err(RoboticsError::ParseError {
            line: line_no,
            message: format!("expected \"x y\", got {} tokens in {:?}", tokens.len(), line),
        });
    }

    let coord = |token: &str| {
        token.parse::<f64>().map_err(|e| RoboticsError::ParseError {
            line: line_no,
            message: format!("invalid coordinate {:?}: {}", token, e),
        })
    };

    Ok(Point2D::new(coord(tokens[0])?, coord(tokens[1])?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TWO_POLYGONS: &str = "100 100\n100 200\n200 200\n200 100\n\n300 50\n350 120\n400 50";

    #[test]
    fn test_parse_two_polygons() {
        let polygons = parse_obstacles(TWO_POLYGONS).unwrap();
        assert_eq!(polygons.len(), 2);
        assert_eq!(polygons[0].vertices().len(), 4);
        assert_eq!(polygons[1].vertices()[1], Point2D::new(350.0, 120.0));
        assert!(!polygons[0].is_triangulated());
    }

    #[test]
    fn test_parse_tolerates_extra_blank_lines() {
        let text = "0 0\r\n0 5\r\n5 0\r\n\r\n\r\n10 10\n10 15\n15 10\n\n";
        let polygons = parse_obstacles(text).unwrap();
        assert_eq!(polygons.len(), 2);
        assert_eq!(polygons[0].vertices()[2], Point2D::new(5.0, 0.0));
    }

    #[test]
    fn test_parse_rejects_malformed_lines() {
        let err = parse_obstacles("0 0\n1 2 3\n").unwrap_err();
        assert!(matches!(err, RoboticsError::ParseError { line: 2, .. }));

        let err = parse_obstacles("0 0\n1\n").unwrap_err();
        assert!(matches!(err, RoboticsError::ParseError { line: 2, .. }));

        let err = parse_obstacles("abc 0\n").unwrap_err();
        assert!(matches!(err, RoboticsError::ParseError { line: 1, .. }));

        // Separator is exactly one space
        assert!(parse_obstacles("1  2\n").is_err());
    }

    #[test]
    fn test_load_obstacles_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", TWO_POLYGONS).unwrap();

        let polygons = load_obstacles(file.path()).unwrap();
        assert_eq!(polygons.len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_obstacles(dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, RoboticsError::IoError(_)));
    }
}
