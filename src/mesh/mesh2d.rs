//! 2D mesh representation for quadrilateral elements.
//!
//! The mesh stores:
//! - Vertex coordinates (mutable, so a solid mesh can be deformed in place)
//! - Element-vertex connectivity (counter-clockwise ordering)
//! - Edge-based connectivity between neighbouring elements
//! - Boundary identifiers on boundary edges
//!
//! Face convention (counter-clockwise around element):
//! - Face 0 (bottom): from vertex 0 to vertex 1
//! - Face 1 (right):  from vertex 1 to vertex 2
//! - Face 2 (top):    from vertex 2 to vertex 3
//! - Face 3 (left):   from vertex 3 to vertex 0
//!
//! Geometry is the bilinear (Q1) map of each element from [-1, 1]².

use std::collections::HashMap;

use super::boundary_id::BoundaryId;
use crate::fe::shape::{q1_reference_gradients, q1_values};
use crate::types::{Bounds2D, ElementIndex, Point2, Tensor2, VertexIndex};

/// Tolerance (in reference coordinates) for the point-in-cell test.
pub const CONTAINMENT_TOLERANCE: f64 = 1e-10;

/// Local vertex pairs of the four faces.
pub const FACE_VERTICES: [(usize, usize); 4] = [(0, 1), (1, 2), (2, 3), (3, 0)];

const MAX_NEWTON_ITERATIONS: usize = 50;

/// Newton stops once the physical residual is below this fraction of the
/// element diameter.
const NEWTON_TOLERANCE: f64 = 1e-13;

/// Reference to an element and one of its faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ElementFace {
    /// Element index
    pub element: usize,
    /// Face index (0-3 for quads)
    pub face: usize,
}

impl ElementFace {
    pub fn new(element: usize, face: usize) -> Self {
        Self { element, face }
    }
}

/// Information about an edge in the mesh.
#[derive(Clone, Debug)]
pub struct Edge {
    /// Vertex indices (v0, v1) with v0 < v1 for consistent ordering
    pub vertices: (usize, usize),
    /// Left element-face (always present)
    pub left: ElementFace,
    /// Right element-face (None for boundary edges)
    pub right: Option<ElementFace>,
    /// Boundary identifier (only for boundary edges)
    pub boundary_id: Option<BoundaryId>,
}

impl Edge {
    /// Check if this is a boundary edge.
    pub fn is_boundary(&self) -> bool {
        self.right.is_none()
    }
}

/// 2D mesh of quadrilateral elements.
#[derive(Clone, Debug)]
pub struct Mesh2D {
    /// Vertex coordinates
    pub vertices: Vec<Point2>,

    /// Element-vertex connectivity: elements[k] = [v0, v1, v2, v3]
    /// Vertices are in counter-clockwise order:
    /// - v0: (r=-1, s=-1)
    /// - v1: (r=+1, s=-1)
    /// - v2: (r=+1, s=+1)
    /// - v3: (r=-1, s=+1)
    pub elements: Vec<[usize; 4]>,

    /// Edge list with connectivity information
    pub edges: Vec<Edge>,

    /// Element-to-edge mapping: element_edges[k][f] = edge index for face f of element k
    pub element_edges: Vec<[usize; 4]>,

    /// Number of elements
    pub n_elements: usize,

    /// Number of edges
    pub n_edges: usize,

    /// Number of boundary edges
    pub n_boundary_edges: usize,

    /// Number of vertices
    pub n_vertices: usize,
}

impl Mesh2D {
    /// Build a mesh from vertices and counter-clockwise quad cells.
    ///
    /// Edges are numbered in order of first appearance while walking
    /// cells and their faces, so the layout is deterministic. Boundary edges
    /// take their identifier from `boundary_ids` (keyed by the sorted vertex
    /// pair) and fall back to `default_id`.
    pub fn from_cells(
        vertices: Vec<Point2>,
        elements: Vec<[usize; 4]>,
        boundary_ids: &HashMap<(usize, usize), BoundaryId>,
        default_id: BoundaryId,
    ) -> Self {
        let n_elements = elements.len();
        let n_vertices = vertices.len();

        let mut edges: Vec<Edge> = Vec::new();
        let mut edge_lookup: HashMap<(usize, usize), usize> = HashMap::new();
        let mut element_edges = vec![[0usize; 4]; n_elements];

        for (k, elem) in elements.iter().enumerate() {
            for (face, &(a, b)) in FACE_VERTICES.iter().enumerate() {
                let (v0, v1) = (elem[a], elem[b]);
                let key = if v0 < v1 { (v0, v1) } else { (v1, v0) };

                match edge_lookup.get(&key) {
                    Some(&edge_idx) => {
                        edges[edge_idx].right = Some(ElementFace::new(k, face));
                        element_edges[k][face] = edge_idx;
                    }
                    None => {
                        let edge_idx = edges.len();
                        edge_lookup.insert(key, edge_idx);
                        edges.push(Edge {
                            vertices: key,
                            left: ElementFace::new(k, face),
                            right: None,
                            boundary_id: None,
                        });
                        element_edges[k][face] = edge_idx;
                    }
                }
            }
        }

        for edge in edges.iter_mut().filter(|e| e.is_boundary()) {
            edge.boundary_id = Some(
                boundary_ids
                    .get(&edge.vertices)
                    .copied()
                    .unwrap_or(default_id),
            );
        }

        let n_edges = edges.len();
        let n_boundary_edges = edges.iter().filter(|e| e.is_boundary()).count();

        Self {
            vertices,
            elements,
            edges,
            element_edges,
            n_elements,
            n_edges,
            n_boundary_edges,
            n_vertices,
        }
    }

    /// Create a uniform rectangular mesh of [x0, x1] × [y0, y1] with
    /// boundary identifier 0 on every side.
    pub fn uniform_rectangle(x0: f64, x1: f64, y0: f64, y1: f64, nx: usize, ny: usize) -> Self {
        Self::structured_rectangle(x0, x1, y0, y1, nx, ny, [BoundaryId(0); 4])
    }

    /// Create a uniform rectangular mesh with one identifier per side:
    /// left = 0, right = 1, bottom = 2, top = 3.
    pub fn uniform_rectangle_colorized(
        x0: f64,
        x1: f64,
        y0: f64,
        y1: f64,
        nx: usize,
        ny: usize,
    ) -> Self {
        Self::structured_rectangle(
            x0,
            x1,
            y0,
            y1,
            nx,
            ny,
            [BoundaryId(0), BoundaryId(1), BoundaryId(2), BoundaryId(3)],
        )
    }

    /// Create a quad mesh of the disk with the given center and radius.
    ///
    /// An n × n grid on [-1, 1]² is mapped with the elliptical grid map
    /// (u, v) -> (u √(1 - v²/2), v √(1 - u²/2)), which places every
    /// boundary vertex on the circle. Edges between vertices are straight,
    /// so the meshed region is the inscribed polygon. Boundary identifier 0.
    pub fn disk(center: Point2, radius: f64, n: usize) -> Self {
        assert!(n > 0, "Need at least one element in each direction");
        assert!(radius > 0.0, "Radius must be positive");

        let h = 2.0 / n as f64;
        let mut vertices = Vec::with_capacity((n + 1) * (n + 1));
        for j in 0..=n {
            for i in 0..=n {
                let u = -1.0 + i as f64 * h;
                let v = -1.0 + j as f64 * h;
                let x = u * (1.0 - v * v / 2.0).sqrt();
                let y = v * (1.0 - u * u / 2.0).sqrt();
                vertices.push(Point2::new(center.x + radius * x, center.y + radius * y));
            }
        }

        let elements = Self::grid_elements(n, n);
        Self::from_cells(vertices, elements, &HashMap::new(), BoundaryId(0))
    }

    /// Structured rectangle with side identifiers [left, right, bottom, top].
    fn structured_rectangle(
        x0: f64,
        x1: f64,
        y0: f64,
        y1: f64,
        nx: usize,
        ny: usize,
        side_ids: [BoundaryId; 4],
    ) -> Self {
        assert!(
            nx > 0 && ny > 0,
            "Need at least one element in each direction"
        );
        assert!(x1 > x0 && y1 > y0, "Invalid domain bounds");

        let dx = (x1 - x0) / nx as f64;
        let dy = (y1 - y0) / ny as f64;

        // Generate vertices: (nx+1) × (ny+1) grid
        let mut vertices = Vec::with_capacity((nx + 1) * (ny + 1));
        for j in 0..=ny {
            for i in 0..=nx {
                vertices.push(Point2::new(x0 + i as f64 * dx, y0 + j as f64 * dy));
            }
        }

        let vid = |i: usize, j: usize| j * (nx + 1) + i;
        let sorted = |a: usize, b: usize| if a < b { (a, b) } else { (b, a) };
        let [left, right, bottom, top] = side_ids;

        let mut boundary_ids = HashMap::new();
        for i in 0..nx {
            boundary_ids.insert(sorted(vid(i, 0), vid(i + 1, 0)), bottom);
            boundary_ids.insert(sorted(vid(i, ny), vid(i + 1, ny)), top);
        }
        for j in 0..ny {
            boundary_ids.insert(sorted(vid(0, j), vid(0, j + 1)), left);
            boundary_ids.insert(sorted(vid(nx, j), vid(nx, j + 1)), right);
        }

        let elements = Self::grid_elements(nx, ny);
        Self::from_cells(vertices, elements, &boundary_ids, left)
    }

    /// Counter-clockwise quads of an (nx+1) × (ny+1) vertex grid.
    fn grid_elements(nx: usize, ny: usize) -> Vec<[usize; 4]> {
        let mut elements = Vec::with_capacity(nx * ny);
        for j in 0..ny {
            for i in 0..nx {
                let v0 = j * (nx + 1) + i; // bottom-left
                let v1 = v0 + 1; // bottom-right
                let v2 = v1 + (nx + 1); // top-right
                let v3 = v0 + (nx + 1); // top-left
                elements.push([v0, v1, v2, v3]);
            }
        }
        elements
    }

    /// Refine every cell `times` times, splitting each quad into four.
    ///
    /// New vertices are edge midpoints and cell centers (straight-sided
    /// refinement). Child edges on a parent boundary edge inherit its
    /// identifier. Children of cell k are numbered 4k..4k+3.
    pub fn refine_global(&mut self, times: usize) {
        for _ in 0..times {
            *self = self.refined_once();
        }
    }

    fn refined_once(&self) -> Self {
        let mut vertices = self.vertices.clone();
        let mut midpoints: HashMap<(usize, usize), usize> = HashMap::new();
        let mut elements = Vec::with_capacity(4 * self.n_elements);
        let mut boundary_ids = HashMap::new();

        let sorted = |a: usize, b: usize| if a < b { (a, b) } else { (b, a) };

        for (k, elem) in self.elements.iter().enumerate() {
            let mut m = [0usize; 4];
            for (face, &(a, b)) in FACE_VERTICES.iter().enumerate() {
                let (va, vb) = (elem[a], elem[b]);
                let key = sorted(va, vb);
                m[face] = *midpoints.entry(key).or_insert_with(|| {
                    vertices.push((self.vertices[va] + self.vertices[vb]) * 0.5);
                    vertices.len() - 1
                });

                if let Some(id) = self.boundary_id(k, face) {
                    boundary_ids.insert(sorted(va, m[face]), id);
                    boundary_ids.insert(sorted(m[face], vb), id);
                }
            }

            let center = self
                .element_vertices(k)
                .iter()
                .fold(Point2::ZERO, |acc, p| acc + *p)
                * 0.25;
            vertices.push(center);
            let c = vertices.len() - 1;

            let [v0, v1, v2, v3] = *elem;
            elements.push([v0, m[0], c, m[3]]);
            elements.push([m[0], v1, m[1], c]);
            elements.push([c, m[1], v2, m[2]]);
            elements.push([m[3], c, m[2], v3]);
        }

        Self::from_cells(vertices, elements, &boundary_ids, BoundaryId(0))
    }

    /// Number of active cells.
    #[inline]
    pub fn n_active_cells(&self) -> usize {
        self.n_elements
    }

    /// Get the vertices of an element.
    pub fn element_vertices(&self, k: usize) -> [Point2; 4] {
        let [v0, v1, v2, v3] = self.elements[k];
        [
            self.vertices[v0],
            self.vertices[v1],
            self.vertices[v2],
            self.vertices[v3],
        ]
    }

    /// Global vertex index of local vertex `v` of element `k`.
    #[inline]
    pub fn vertex_index(&self, k: usize, v: usize) -> VertexIndex {
        VertexIndex::new(self.elements[k][v])
    }

    /// Coordinates of a vertex.
    #[inline]
    pub fn vertex(&self, v: VertexIndex) -> Point2 {
        self.vertices[v]
    }

    /// Map reference coordinates (r, s) in [-1, 1]² to physical coordinates.
    ///
    /// Uses bilinear interpolation for quadrilateral elements:
    /// ```text
    /// x(r, s) = (1-r)(1-s)/4 * x0 + (1+r)(1-s)/4 * x1
    ///         + (1+r)(1+s)/4 * x2 + (1-r)(1+s)/4 * x3
    /// ```
    pub fn reference_to_physical(&self, k: usize, xi: Point2) -> Point2 {
        let verts = self.element_vertices(k);
        q1_values(xi)
            .iter()
            .zip(verts.iter())
            .fold(Point2::ZERO, |acc, (n, p)| acc + *p * *n)
    }

    /// Jacobian of the reference map at `xi`: `J[i][j] = ∂x_i/∂ξ_j`.
    pub fn jacobian_at(&self, k: usize, xi: Point2) -> Tensor2 {
        let verts = self.element_vertices(k);
        q1_reference_gradients(xi)
            .iter()
            .zip(verts.iter())
            .fold(Tensor2::ZERO, |acc, (g, p)| acc + p.outer(g))
    }

    /// Invert the bilinear map with Newton iteration.
    ///
    /// The map is evaluated relative to the first vertex, so rounding scales
    /// with the element size rather than with the distance from the origin.
    /// Returns `None` if the residual does not drop below
    /// `NEWTON_TOLERANCE` times the element diameter or the Jacobian is
    /// singular. For parallelograms the map is affine and the first step is
    /// exact.
    pub fn physical_to_reference(&self, k: usize, p: Point2) -> Option<Point2> {
        let verts = self.element_vertices(k);
        let origin = verts[0];
        let local = verts.map(|v| v - origin);
        let target = p - origin;
        let diameter = local[2].norm().max((local[3] - local[1]).norm());
        let tolerance = NEWTON_TOLERANCE * diameter;

        let mut xi = Point2::ZERO;
        for _ in 0..MAX_NEWTON_ITERATIONS {
            let values = q1_values(xi);
            let gradients = q1_reference_gradients(xi);
            let mut x = Point2::ZERO;
            let mut j = Tensor2::ZERO;
            for i in 0..4 {
                x = x + local[i] * values[i];
                j = j + local[i].outer(&gradients[i]);
            }

            let residual = x - target;
            if residual.norm() <= tolerance {
                return Some(xi);
            }

            let det = j.t[0][0] * j.t[1][1] - j.t[0][1] * j.t[1][0];
            if det.abs() < f64::MIN_POSITIVE {
                return None;
            }

            xi.x -= (j.t[1][1] * residual.x - j.t[0][1] * residual.y) / det;
            xi.y -= (-j.t[1][0] * residual.x + j.t[0][0] * residual.y) / det;

            if !(xi.x.is_finite() && xi.y.is_finite()) {
                return None;
            }
        }

        None
    }

    /// Axis-aligned bounding box of an element in its current geometry.
    pub fn element_bounds(&self, k: usize) -> Bounds2D {
        Bounds2D::from_points(&self.element_vertices(k))
    }

    /// Check whether a physical point lies inside element `k`.
    ///
    /// A bounding-box reject precedes the inverse map; the point is inside
    /// when its reference coordinates satisfy |r|, |s| ≤ 1 + tolerance.
    pub fn point_inside(&self, k: usize, p: Point2) -> bool {
        let bounds = self.element_bounds(k);
        let slack = CONTAINMENT_TOLERANCE * (bounds.width() + bounds.height());
        if !bounds.contains(p, slack) {
            return false;
        }

        match self.physical_to_reference(k, p) {
            Some(xi) => {
                xi.x.abs() <= 1.0 + CONTAINMENT_TOLERANCE
                    && xi.y.abs() <= 1.0 + CONTAINMENT_TOLERANCE
            }
            None => false,
        }
    }

    /// Find the first element (in index order) containing `p`.
    ///
    /// Linear scan over all elements. Returns the element and the reference
    /// coordinates of `p` inside it.
    pub fn find_active_cell(&self, p: Point2) -> Option<(ElementIndex, Point2)> {
        (0..self.n_elements).find_map(|k| {
            if !self.point_inside(k, p) {
                return None;
            }
            self.physical_to_reference(k, p)
                .map(|xi| (ElementIndex::new(k), xi))
        })
    }

    /// Get the boundary identifier for a face, if it's a boundary face.
    pub fn boundary_id(&self, element: usize, face: usize) -> Option<BoundaryId> {
        self.edges[self.element_edges[element][face]].boundary_id
    }

    /// Physical end points of a face, in counter-clockwise order.
    pub fn face_vertices(&self, element: usize, face: usize) -> (Point2, Point2) {
        let (a, b) = FACE_VERTICES[face];
        let verts = self.element_vertices(element);
        (verts[a], verts[b])
    }

    /// Signed area of an element (positive for counter-clockwise vertices).
    pub fn element_area(&self, k: usize) -> f64 {
        let verts = self.element_vertices(k);
        let mut twice_area = 0.0;
        for i in 0..4 {
            let (p, q) = (verts[i], verts[(i + 1) % 4]);
            twice_area += p.x * q.y - q.x * p.y;
        }
        twice_area / 2.0
    }
}
