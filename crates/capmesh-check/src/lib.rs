//! # Capmesh Check
//!
//! Validates a generated capacity mesh against the board it was built for:
//! nodes sharing a layer must not overlap, every node must stay inside the
//! bounds and outline, and no node may cover an obstacle on its layers.

pub mod violation;

pub use violation::{MeshViolation, Severity, ViolationType};

use capmesh_core::{EntrySource, MeshNode, ObstacleIndex, Rect, EPSILON};
use log::debug;

fn bbox_of(rect: &Rect) -> [f64; 4] {
    [rect.min.x, rect.min.y, rect.max.x, rect.max.y]
}

/// Every violation found in `nodes`, in node order.
pub fn check_mesh(index: &ObstacleIndex, nodes: &[MeshNode]) -> Vec<MeshViolation> {
    let mut violations = Vec::new();
    let rects: Vec<Rect> = nodes.iter().map(MeshNode::rect).collect();

    for (node, rect) in nodes.iter().zip(&rects) {
        check_node(index, node, rect, &mut violations);
    }

    for i in 0..nodes.len() {
        for j in i + 1..nodes.len() {
            if !nodes[i].shares_layer(&nodes[j]) {
                continue;
            }
            if let Some(overlap) = rects[i].intersection(&rects[j]) {
                violations.push(MeshViolation {
                    violation_type: ViolationType::Overlap,
                    severity: Severity::Error,
                    message: format!(
                        "{} and {} overlap on a shared layer",
                        nodes[i].id, nodes[j].id
                    ),
                    node_ids: vec![nodes[i].id.clone(), nodes[j].id.clone()],
                    bbox: bbox_of(&overlap),
                });
            }
        }
    }

    debug!("Mesh check: {} nodes, {} violations", nodes.len(), violations.len());
    violations
}

fn check_node(index: &ObstacleIndex, node: &MeshNode, rect: &Rect, out: &mut Vec<MeshViolation>) {
    let mut report = |violation_type: ViolationType, severity: Severity, message: String, bbox: &Rect| {
        out.push(MeshViolation {
            violation_type,
            severity,
            message,
            node_ids: vec![node.id.clone()],
            bbox: bbox_of(bbox),
        });
    };

    if rect.is_degenerate() || node.available_z.is_empty() {
        report(
            ViolationType::Degenerate,
            Severity::Warning,
            format!("{} is {}x{} on {}", node.id, node.width, node.height, node.layer),
            rect,
        );
    }

    let bad_z: Vec<usize> = node
        .available_z
        .iter()
        .copied()
        .filter(|&z| z >= index.layer_count())
        .collect();
    if !bad_z.is_empty() {
        report(
            ViolationType::LayerOutOfRange,
            Severity::Error,
            format!("{} uses z{:?} on a {}-layer board", node.id, bad_z, index.layer_count()),
            rect,
        );
    }

    if !index.bounds().contains_rect(rect) {
        report(
            ViolationType::OutOfBounds,
            Severity::Error,
            format!("{} extends past the board bounds", node.id),
            rect,
        );
    }

    if let Some(outline) = index.outline() {
        let inner = rect.inflate(-EPSILON.sqrt());
        let escapes = inner.corners().iter().any(|c| !outline.contains_point(c))
            || !outline.contains_point(&rect.center());
        if escapes {
            report(
                ViolationType::OutsideOutline,
                Severity::Error,
                format!("{} extends past the board outline", node.id),
                rect,
            );
        }
    }

    for &z in node.available_z.iter().filter(|&&z| z < index.layer_count()) {
        for entry in index.query(z, rect) {
            if let EntrySource::Obstacle(i) = entry.source {
                let overlap = rect.intersection(&entry.rect).unwrap_or(entry.rect);
                report(
                    ViolationType::ObstacleIntersection,
                    Severity::Error,
                    format!("{} covers obstacle {} on z{}", node.id, i, z),
                    &overlap,
                );
            }
        }
    }
}

/// Shorthand for "no errors" (warnings allowed).
pub fn is_clean(violations: &[MeshViolation]) -> bool {
    violations.iter().all(|v| v.severity != Severity::Error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use capmesh_core::{BoardDescription, Obstacle, ObstacleShape, Point};

    fn index() -> ObstacleIndex {
        let board = BoardDescription::new(Rect::from_corners(0.0, 0.0, 10.0, 10.0))
            .with_layer_count(2)
            .with_obstacle(Obstacle::new(ObstacleShape::rect(Point::new(8.0, 8.0), 2.0, 2.0)).on_z(&[0]));
        ObstacleIndex::build(&board).unwrap()
    }

    #[test]
    fn test_clean_mesh() {
        let nodes = vec![
            MeshNode::new("a", &Rect::from_corners(0.0, 0.0, 5.0, 5.0), &[0, 1]),
            MeshNode::new("b", &Rect::from_corners(5.0, 0.0, 10.0, 5.0), &[0]),
            MeshNode::new("c", &Rect::from_corners(0.0, 0.0, 10.0, 10.0), &[1]),
        ];
        // a and c share z1 and overlap
        let violations = check_mesh(&index(), &nodes);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].violation_type, ViolationType::Overlap);
        assert_eq!(violations[0].node_ids, vec!["a", "c"]);

        let clean = check_mesh(&index(), &nodes[..2]);
        assert!(clean.is_empty());
        assert!(is_clean(&clean));
    }

    #[test]
    fn test_obstacle_and_bounds_violations() {
        let nodes = vec![
            MeshNode::new("over", &Rect::from_corners(6.0, 6.0, 9.0, 9.0), &[0]),
            MeshNode::new("free", &Rect::from_corners(6.0, 6.0, 9.0, 9.0), &[1]),
            MeshNode::new("out", &Rect::from_corners(-1.0, 0.0, 1.0, 1.0), &[3]),
        ];
        let violations = check_mesh(&index(), &nodes);
        let kinds: Vec<_> = violations.iter().map(|v| v.violation_type.clone()).collect();
        assert!(kinds.contains(&ViolationType::ObstacleIntersection));
        assert!(kinds.contains(&ViolationType::OutOfBounds));
        assert!(kinds.contains(&ViolationType::LayerOutOfRange));
        assert!(!violations.iter().any(|v| v.node_ids == vec!["free"]));
        assert!(!is_clean(&violations));
    }

    #[test]
    fn test_outline_violation() {
        let board = BoardDescription::new(Rect::from_corners(0.0, 0.0, 10.0, 10.0)).with_outline(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 5.0),
            Point::new(5.0, 5.0),
            Point::new(5.0, 10.0),
            Point::new(0.0, 10.0),
        ]);
        let index = ObstacleIndex::build(&board).unwrap();
        let inside = MeshNode::new("in", &Rect::from_corners(0.0, 0.0, 10.0, 5.0), &[0]);
        let outside = MeshNode::new("out", &Rect::from_corners(4.0, 4.0, 6.0, 6.0), &[0]);
        assert!(check_mesh(&index, &[inside]).is_empty());
        let violations = check_mesh(&index, &[outside]);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].violation_type, ViolationType::OutsideOutline);
    }

    #[test]
    fn test_degenerate_is_warning() {
        let nodes = vec![MeshNode::new("thin", &Rect::from_corners(1.0, 1.0, 1.0, 2.0), &[0])];
        let violations = check_mesh(&index(), &nodes);
        assert_eq!(violations[0].violation_type, ViolationType::Degenerate);
        assert!(is_clean(&violations));
    }
}
