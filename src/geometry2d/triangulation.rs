//! Constrained Delaunay triangulation of polygon boundaries.
//!
//! Boundaries are inserted as constraint edges; triangles whose centroid is
//! outside the boundaries under the even-odd rule (outer area and holes) are
//! dropped afterwards.

use glam::Vec2;
use spade::handles::FixedVertexHandle;
use spade::{ConstrainedDelaunayTriangulation, Point2, Triangulation};

use super::{is_point_inside_polygons, Polygon, PolygonList};
use crate::error::PhysicsError;

type Cdt = ConstrainedDelaunayTriangulation<Point2<f64>>;

/// Insert all boundaries into a fresh CDT.
///
/// Returns the triangulation and, for every CDT vertex index, the index of the
/// first input point that produced it (duplicates are merged by the CDT).
fn build_cdt(boundaries: &[Polygon]) -> Result<(Cdt, Vec<usize>), PhysicsError> {
    let mut cdt = Cdt::new();
    let mut input_index_of = Vec::new();
    let mut input_index = 0;

    for polygon in boundaries {
        let mut handles: Vec<FixedVertexHandle> = Vec::with_capacity(polygon.len());
        for p in polygon {
            let handle = cdt
                .insert(Point2::new(p.x as f64, p.y as f64))
                .map_err(|e| PhysicsError::Triangulation(format!("{e:?} at {p}")))?;
            if handle.index() == input_index_of.len() {
                input_index_of.push(input_index);
            }
            handles.push(handle);
            input_index += 1;
        }

        let n = handles.len();
        for i in 0..n {
            let from = handles[i];
            let to = handles[(i + 1) % n];
            if from != to && cdt.can_add_constraint(from, to) {
                cdt.add_constraint(from, to);
            } else if from != to {
                tracing::warn!(
                    "skipping boundary edge {} -> {}: it crosses an existing constraint",
                    i,
                    (i + 1) % n
                );
            }
        }
    }

    Ok((cdt, input_index_of))
}

/// Centroid-based containment check for one CDT face.
fn face_is_inside(positions: [Point2<f64>; 3], boundaries: &[Polygon]) -> bool {
    let centroid = Vec2::new(
        ((positions[0].x + positions[1].x + positions[2].x) / 3.0) as f32,
        ((positions[0].y + positions[1].y + positions[2].y) / 3.0) as f32,
    );
    is_point_inside_polygons(centroid, boundaries)
}

/// Triangulate a single polygon boundary.
///
/// Returns a flat list of vertex indices into `polygon`, three per triangle.
pub fn triangulate_polygon(polygon: &[Vec2]) -> Result<Vec<usize>, PhysicsError> {
    let boundaries = vec![polygon.to_vec()];
    let (cdt, input_index_of) = build_cdt(&boundaries)?;

    let mut indices = Vec::with_capacity(cdt.num_inner_faces() * 3);
    for face in cdt.inner_faces() {
        let vertices = face.vertices();
        if !face_is_inside(vertices.map(|v| v.position()), &boundaries) {
            continue;
        }
        indices.extend(vertices.iter().map(|v| input_index_of[v.fix().index()]));
    }
    Ok(indices)
}

/// Triangulate several boundaries as one constrained point/edge set.
///
/// Regions covered by an even number of boundaries (holes) are left out.
pub fn triangulate_polygons(boundaries: &[Polygon]) -> Result<PolygonList, PhysicsError> {
    let (cdt, _) = build_cdt(boundaries)?;

    let triangles = cdt
        .inner_faces()
        .map(|face| face.vertices().map(|v| v.position()))
        .filter(|positions| face_is_inside(*positions, boundaries))
        .map(|positions| {
            positions
                .iter()
                .map(|p| Vec2::new(p.x as f32, p.y as f32))
                .collect::<Polygon>()
        })
        .collect();
    Ok(triangles)
}
