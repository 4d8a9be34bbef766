//! Particle vertex buffer

use bytemuck::{Pod, Zeroable};

use crate::sim::ParticleSystem;

/// One point-sprite vertex per particle (must match shader)
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct ParticleVertex {
    pub position: [f32; 3],
    /// Life-faded color
    pub color: [f32; 3],
}

impl ParticleVertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ParticleVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// CPU mirror of a fixed-size particle vertex buffer.
///
/// The buffer is allocated once at pool capacity; each frame the live
/// particles are packed at the front and only `count` vertices are drawn.
#[derive(Debug, Clone)]
pub struct ParticleBatch {
    vertices: Vec<ParticleVertex>,
    count: u32,
}

impl ParticleBatch {
    pub fn new(capacity: usize) -> Self {
        Self {
            vertices: vec![ParticleVertex::default(); capacity],
            count: 0,
        }
    }

    /// Size to allocate for the GPU buffer
    pub fn buffer_size(&self) -> wgpu::BufferAddress {
        (std::mem::size_of::<ParticleVertex>() * self.vertices.len()) as wgpu::BufferAddress
    }

    /// Pack live particles; slots past the draw range are zeroed
    pub fn fill(&mut self, particles: &ParticleSystem) -> u32 {
        let mut count = 0;
        for (slot, view) in self.vertices.iter_mut().zip(particles.views()) {
            *slot = ParticleVertex {
                position: view.pos.to_array(),
                color: view.color,
            };
            count += 1;
        }
        for slot in self.vertices.iter_mut().skip(count) {
            *slot = ParticleVertex::default();
        }
        self.count = count as u32;
        self.count
    }

    /// Vertices to draw this frame
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn capacity(&self) -> usize {
        self.vertices.len()
    }

    /// Whole buffer contents for `queue.write_buffer`
    pub fn bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_vertex_layout() {
        assert_eq!(std::mem::size_of::<ParticleVertex>(), 24);
        let desc = ParticleVertex::desc();
        assert_eq!(desc.array_stride, 24);
        assert_eq!(desc.attributes[1].offset, 12);
    }

    #[test]
    fn test_fill_packs_and_zeroes_tail() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut particles = ParticleSystem::new(32);
        particles.spawn_burst(Vec3::new(1.0, 2.0, 0.0), 0xffffff, 10, &mut rng);

        let mut batch = ParticleBatch::new(32);
        assert_eq!(batch.fill(&particles), 10);
        assert_eq!(batch.bytes().len() as u64, batch.buffer_size());
        assert_eq!(batch.vertices[0].position, [1.0, 2.0, 0.0]);
        assert_eq!(batch.vertices[0].color, [1.0, 1.0, 1.0]);

        particles.clear();
        assert_eq!(batch.fill(&particles), 0);
        assert!(batch.vertices.iter().all(|v| *v == ParticleVertex::default()));
    }

    #[test]
    fn test_fill_truncates_to_buffer() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut particles = ParticleSystem::new(100);
        particles.spawn_burst(Vec3::ZERO, 0x00ff88, 50, &mut rng);

        let mut batch = ParticleBatch::new(16);
        assert_eq!(batch.fill(&particles), 16);
        assert_eq!(batch.count(), 16);
    }
}
