//! Fixed cube topology: eight corners, one pivot and twelve faces
use crate::algebra::{apply, drop_w, lift, Mat4, Vec3};

/// Number of mesh vertices including the pivot
pub const VERTEX_COUNT: usize = 9;

/// Number of renderable corners; the pivot follows them
pub const CORNER_COUNT: usize = VERTEX_COUNT - 1;

/// Index of the rotation pivot in the vertex table
pub const PIVOT: usize = VERTEX_COUNT - 1;

pub const TRIANGLE_COUNT: usize = 12;

/// A triangle face given as three indices into the vertex table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triangle {
    pub indices: [usize; 3],
}

impl Triangle {
    pub const fn new(a: usize, b: usize, c: usize) -> Self {
        Self { indices: [a, b, c] }
    }
}

/// Face list of the cube. Winding is chosen so that the pixel-space edge
/// function alone separates front faces from back faces.
pub const CUBE_TRIANGLES: [Triangle; TRIANGLE_COUNT] = [
    Triangle::new(0, 1, 3),
    Triangle::new(1, 2, 3),
    Triangle::new(1, 5, 2),
    Triangle::new(5, 6, 2),
    Triangle::new(3, 2, 7),
    Triangle::new(2, 6, 7),
    Triangle::new(6, 4, 7),
    Triangle::new(6, 5, 4),
    Triangle::new(0, 7, 4),
    Triangle::new(0, 3, 7),
    Triangle::new(5, 0, 4),
    Triangle::new(5, 1, 0),
];

/// Vertex positions plus the immutable face table
#[derive(Debug, Clone)]
pub struct Mesh {
    vertices: [Vec3; VERTEX_COUNT],
    triangles: &'static [Triangle; TRIANGLE_COUNT],
}

impl Mesh {
    /// Axis-aligned cube of edge `size` centred on the origin, with the
    /// pivot at the centre
    pub fn cube(size: f64) -> Self {
        let h = size / 2.0;
        Self {
            vertices: [
                Vec3::new(-h, -h, -h),
                Vec3::new(-h, h, -h),
                Vec3::new(h, h, -h),
                Vec3::new(h, -h, -h),
                Vec3::new(-h, -h, h),
                Vec3::new(-h, h, h),
                Vec3::new(h, h, h),
                Vec3::new(h, -h, h),
                Vec3::new(0.0, 0.0, 0.0),
            ],
            triangles: &CUBE_TRIANGLES,
        }
    }

    pub fn vertices(&self) -> &[Vec3; VERTEX_COUNT] {
        &self.vertices
    }

    pub fn corners(&self) -> &[Vec3] {
        &self.vertices[..CORNER_COUNT]
    }

    pub fn pivot(&self) -> Vec3 {
        self.vertices[PIVOT]
    }

    pub fn triangles(&self) -> &[Triangle] {
        self.triangles
    }

    /// Apply `matrix` to every vertex, pivot included
    pub fn transform_all(&mut self, matrix: &Mat4) {
        for v in &mut self.vertices {
            *v = drop_w(&apply(matrix, &lift(v)));
        }
    }

    /// Replace each corner with `f(corner, pivot)`; the pivot stays put
    pub fn update_corners<F>(&mut self, mut f: F)
    where
        F: FnMut(&Vec3, &Vec3) -> Vec3,
    {
        let pivot = self.pivot();
        for v in &mut self.vertices[..CORNER_COUNT] {
            *v = f(v, &pivot);
        }
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::cube(1.0)
    }
}
