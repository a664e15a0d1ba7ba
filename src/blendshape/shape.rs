//! BlendShape 定义

use glam::Vec3;

/// BlendShape 的单帧：激活阈值 + 逐顶点位置/法线/切线偏移
#[derive(Clone, Debug, PartialEq)]
pub struct BlendShapeFrame {
    /// 激活阈值（0-100）
    pub weight: f32,
    pub delta_vertices: Vec<Vec3>,
    pub delta_normals: Vec<Vec3>,
    pub delta_tangents: Vec<Vec3>,
}

impl BlendShapeFrame {
    pub fn new(
        weight: f32,
        delta_vertices: Vec<Vec3>,
        delta_normals: Vec<Vec3>,
        delta_tangents: Vec<Vec3>,
    ) -> Self {
        Self {
            weight,
            delta_vertices,
            delta_normals,
            delta_tangents,
        }
    }

    /// 全零偏移的帧
    pub fn zeroed(weight: f32, vertex_count: usize) -> Self {
        Self::new(
            weight,
            vec![Vec3::ZERO; vertex_count],
            vec![Vec3::ZERO; vertex_count],
            vec![Vec3::ZERO; vertex_count],
        )
    }

    /// 仅有位置偏移的帧（法线、切线为零）
    pub fn from_vertices(weight: f32, delta_vertices: Vec<Vec3>) -> Self {
        let vertex_count = delta_vertices.len();
        Self::new(
            weight,
            delta_vertices,
            vec![Vec3::ZERO; vertex_count],
            vec![Vec3::ZERO; vertex_count],
        )
    }

    /// 三个数组中与期望顶点数不一致的长度
    pub fn mismatched_len(&self, expected: usize) -> Option<usize> {
        [
            self.delta_vertices.len(),
            self.delta_normals.len(),
            self.delta_tangents.len(),
        ]
        .into_iter()
        .find(|&len| len != expected)
    }
}

/// 命名的 BlendShape，包含一个或多个帧
#[derive(Clone, Debug, PartialEq)]
pub struct BlendShape {
    pub name: String,
    pub frames: Vec<BlendShapeFrame>,
}

impl BlendShape {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            frames: Vec::new(),
        }
    }

    /// 以单帧创建
    pub fn with_frame(name: impl Into<String>, frame: BlendShapeFrame) -> Self {
        Self {
            name: name.into(),
            frames: vec![frame],
        }
    }

    /// 追加帧
    pub fn add_frame(&mut self, frame: BlendShapeFrame) {
        self.frames.push(frame);
    }

    /// 最后一帧（通常是 100% 帧），没有帧时返回 None
    pub fn full_frame(&self) -> Option<&BlendShapeFrame> {
        self.frames.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_frame_is_last() {
        let mut shape = BlendShape::new("まばたき");
        assert!(shape.full_frame().is_none());

        shape.add_frame(BlendShapeFrame::from_vertices(50.0, vec![Vec3::X; 2]));
        shape.add_frame(BlendShapeFrame::from_vertices(100.0, vec![Vec3::Y; 2]));
        let frame = shape.full_frame().unwrap();
        assert_eq!(frame.weight, 100.0);
        assert_eq!(frame.delta_vertices[0], Vec3::Y);
    }

    #[test]
    fn test_mismatched_len() {
        let frame = BlendShapeFrame::new(100.0, vec![Vec3::ZERO; 3], vec![Vec3::ZERO; 3], vec![Vec3::ZERO; 2]);
        assert_eq!(frame.mismatched_len(3), Some(2));
        assert_eq!(BlendShapeFrame::zeroed(100.0, 4).mismatched_len(4), None);
    }
}
