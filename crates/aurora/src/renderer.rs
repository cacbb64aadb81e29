//! Aurora mesh builder.

use crate::model::Aurora;
use glam::DVec3;

/// Position + colour vertex, laid out for direct upload.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct AuroraVertex {
    /// Band-local position, before the mesh translation and scale.
    pub position: [f32; 3],
    /// RGBA.
    pub color: [f32; 4],
}

/// Geometry for one frame.
///
/// Vertices come in groups of four, one quad (triangle fan) each.
#[derive(Debug, Clone, Default)]
pub struct AuroraMesh {
    /// Camera-relative translation to apply before drawing.
    pub translation: DVec3,
    /// Scale applied after the translation.
    pub scale: DVec3,
    pub vertices: Vec<AuroraVertex>,
}

impl AuroraMesh {
    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }

    /// Triangle-list indices for the fans.
    pub fn indices(&self) -> Vec<u32> {
        (0..self.quad_count() as u32)
            .flat_map(|q| {
                let b = q * 4;
                [b, b + 1, b + 2, b, b + 2, b + 3]
            })
            .collect()
    }

    /// Raw bytes for a vertex buffer upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// Builds camera-relative aurora geometry.
#[derive(Debug, Clone, Copy)]
pub struct AuroraRenderer {
    pub render_distance_chunks: u32,
}

impl AuroraRenderer {
    pub fn new(render_distance_chunks: u32) -> Self {
        Self {
            render_distance_chunks,
        }
    }

    /// Distance the band sits in front of the player along -Z.
    pub fn z_offset(&self) -> f64 {
        f64::from((self.render_distance_chunks + 1) * 16)
    }

    /// Vertical stretch; grows with render distance.
    pub fn scaled_height(&self) -> f64 {
        4.0 + 16.0 * ((f64::from(self.render_distance_chunks) - 6.0) / 24.0)
    }

    /// Translation from the interpolated camera to the band origin.
    pub fn translation(&self, sea_level: i32, position: DVec3, last: DVec3, partial_tick: f32) -> DVec3 {
        let interpolated = last + (position - last) * f64::from(partial_tick);
        DVec3::new(
            position.x - interpolated.x,
            f64::from(sea_level) - interpolated.y,
            (position.z - self.z_offset()) - interpolated.z,
        )
    }

    /// Animate `aurora` to `partial_tick` and emit its quads. Returns `None`
    /// when the aurora is fully transparent.
    pub fn build(
        &self,
        aurora: &mut Aurora,
        sea_level: i32,
        position: DVec3,
        last: DVec3,
        partial_tick: f32,
    ) -> Option<AuroraMesh> {
        let alpha = aurora.alpha();
        if alpha <= 0.0 {
            return None;
        }

        aurora.translate(partial_tick);

        let [br, bg, bb] = aurora.base_color();
        let [fr, fg, fb] = aurora.fade_color();
        let base = [br, bg, bb, alpha];
        let fade = [fr, fg, fb, 0.0];
        let v = |x: f32, y: f32, z: f32, color: [f32; 4]| AuroraVertex {
            position: [x, y, z],
            color,
        };

        let nodes = aurora.nodes();
        let mut vertices = Vec::with_capacity(nodes.len().saturating_sub(1) * 12);
        for i in 0..nodes.len().saturating_sub(1) {
            let node = &nodes[i];
            let pos_y = node.modded_y();
            let (pos_x, pos_z) = (node.tet_x, node.tet_z);
            let (tet_x, tet_z) = (node.tet_x2, node.tet_z2);

            // The final segment closes the band down to the ground line.
            let (pos_x2, pos_z2, tet_x2, tet_z2, pos_y2) = if i + 2 < nodes.len() {
                let next = &nodes[i + 1];
                (next.tet_x, next.tet_z, next.tet_x2, next.tet_z2, next.modded_y())
            } else {
                let z = node.modded_z();
                (node.pos_x, z, node.pos_x, z, 0.0)
            };

            // Front
            vertices.push(v(pos_x, 0.0, pos_z, base));
            vertices.push(v(pos_x, pos_y, pos_z, fade));
            vertices.push(v(pos_x2, pos_y2, pos_z2, fade));
            vertices.push(v(pos_x2, 0.0, pos_z2, base));

            // Bottom
            vertices.push(v(pos_x, 0.0, pos_z, base));
            vertices.push(v(pos_x2, 0.0, pos_z2, base));
            vertices.push(v(tet_x2, 0.0, tet_z2, base));
            vertices.push(v(tet_x, 0.0, tet_z, base));

            // Back
            vertices.push(v(tet_x, 0.0, tet_z, base));
            vertices.push(v(tet_x, pos_y, tet_z, fade));
            vertices.push(v(tet_x2, pos_y2, tet_z2, fade));
            vertices.push(v(tet_x2, 0.0, tet_z2, base));
        }

        Some(AuroraMesh {
            translation: self.translation(sea_level, position, last, partial_tick),
            scale: DVec3::new(0.5, self.scaled_height(), 0.5),
            vertices,
        })
    }
}
