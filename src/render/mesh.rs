use std::f32::consts::PI;

/// Vertex layout shared by every primitive mesh.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// CPU-side triangle mesh for one unit primitive. Primitive dimensions
/// are applied per instance via the model matrix.
#[derive(Debug, Clone)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

/// Unit cube centered on the origin, one quad per face so normals and
/// uvs stay per-face.
pub fn unit_cube() -> MeshData {
    // (normal, tangent u, tangent v) per face.
    const FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, u_axis, v_axis) in FACES {
        let base = vertices.len() as u32;
        for (du, dv, uv) in [
            (-0.5, -0.5, [0.0, 1.0]),
            (0.5, -0.5, [1.0, 1.0]),
            (0.5, 0.5, [1.0, 0.0]),
            (-0.5, 0.5, [0.0, 0.0]),
        ] {
            let position = [
                normal[0] * 0.5 + u_axis[0] * du + v_axis[0] * dv,
                normal[1] * 0.5 + u_axis[1] * du + v_axis[1] * dv,
                normal[2] * 0.5 + u_axis[2] * du + v_axis[2] * dv,
            ];
            vertices.push(Vertex {
                position,
                normal,
                uv,
            });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    MeshData { vertices, indices }
}

/// Unit-radius UV sphere with `segments` rings and sectors.
pub fn unit_sphere(segments: u32) -> MeshData {
    let segments = segments.max(3);
    let rings = segments;
    let sectors = segments;

    let mut vertices = Vec::with_capacity(((rings + 1) * (sectors + 1)) as usize);
    for ring in 0..=rings {
        let phi = PI * ring as f32 / rings as f32;
        let (sin_phi, cos_phi) = phi.sin_cos();
        for sector in 0..=sectors {
            let theta = 2.0 * PI * sector as f32 / sectors as f32;
            let (sin_theta, cos_theta) = theta.sin_cos();
            let position = [sin_phi * cos_theta, cos_phi, sin_phi * sin_theta];
            vertices.push(Vertex {
                position,
                normal: position,
                uv: [
                    sector as f32 / sectors as f32,
                    ring as f32 / rings as f32,
                ],
            });
        }
    }

    let mut indices = Vec::with_capacity((rings * sectors * 6) as usize);
    let stride = sectors + 1;
    for ring in 0..rings {
        for sector in 0..sectors {
            let a = ring * stride + sector;
            let b = a + stride;
            indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
        }
    }
    MeshData { vertices, indices }
}

/// Unit quad in the XY plane facing +Z, corners at (+-1, +-1, 0).
pub fn unit_quad() -> MeshData {
    let normal = [0.0, 0.0, 1.0];
    let vertices = vec![
        Vertex {
            position: [-1.0, 1.0, 0.0],
            normal,
            uv: [0.0, 0.0],
        },
        Vertex {
            position: [1.0, 1.0, 0.0],
            normal,
            uv: [1.0, 0.0],
        },
        Vertex {
            position: [1.0, -1.0, 0.0],
            normal,
            uv: [1.0, 1.0],
        },
        Vertex {
            position: [-1.0, -1.0, 0.0],
            normal,
            uv: [0.0, 1.0],
        },
    ];
    MeshData {
        vertices,
        indices: vec![0, 2, 1, 0, 3, 2],
    }
}
