//! 现有 BlendShape 索引

use std::collections::HashMap;

use crate::blendshape::{BlendShape, BlendShapeFrame};
use crate::{GeneratorError, Result};

/// 合成前的 BlendShape 名称索引
///
/// 只在合成开始时从原始网格构建一次，合成过程中不变。
pub struct ExistingShapeIndex<'a> {
    shapes: &'a [BlendShape],
    name_to_index: HashMap<&'a str, usize>,
}

impl<'a> ExistingShapeIndex<'a> {
    /// 建立索引并校验所有帧的顶点数
    pub fn build(shapes: &'a [BlendShape], vertex_count: usize) -> Result<Self> {
        let mut name_to_index = HashMap::with_capacity(shapes.len());
        for (index, shape) in shapes.iter().enumerate() {
            for frame in &shape.frames {
                if let Some(actual) = frame.mismatched_len(vertex_count) {
                    return Err(GeneratorError::VertexCountMismatch {
                        shape: shape.name.clone(),
                        expected: vertex_count,
                        actual,
                    });
                }
            }
            // 同名时后面的覆盖前面的
            name_to_index.insert(shape.name.as_str(), index);
        }
        Ok(Self {
            shapes,
            name_to_index,
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.name_to_index.contains_key(name)
    }

    pub fn find(&self, name: &str) -> Option<&'a BlendShape> {
        self.name_to_index.get(name).map(|&index| &self.shapes[index])
    }

    /// 解析源：返回最后一帧（100% 帧），没有帧视为不存在
    pub fn resolve(&self, name: &str) -> Option<&'a BlendShapeFrame> {
        self.find(name).and_then(|shape| shape.full_frame())
    }

    /// 不同名称的数量
    pub fn len(&self) -> usize {
        self.name_to_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.name_to_index.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_resolve_uses_last_frame_and_newest_name() {
        let mut blink = BlendShape::new("vrc.blink");
        blink.add_frame(BlendShapeFrame::from_vertices(50.0, vec![Vec3::X; 2]));
        blink.add_frame(BlendShapeFrame::from_vertices(100.0, vec![Vec3::Y; 2]));
        let shadowed = BlendShape::with_frame("あ", BlendShapeFrame::from_vertices(100.0, vec![Vec3::X; 2]));
        let newest = BlendShape::with_frame("あ", BlendShapeFrame::from_vertices(100.0, vec![Vec3::Z; 2]));
        let shapes = vec![blink, shadowed, newest, BlendShape::new("empty")];

        let index = ExistingShapeIndex::build(&shapes, 2).unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(index.resolve("vrc.blink").unwrap().delta_vertices[0], Vec3::Y);
        assert_eq!(index.resolve("あ").unwrap().delta_vertices[0], Vec3::Z);
        assert!(index.contains("empty"));
        assert!(index.resolve("empty").is_none());
        assert!(index.resolve("missing").is_none());
    }

    #[test]
    fn test_build_rejects_mismatched_frames() {
        let shapes = vec![BlendShape::with_frame("vrc.v_aa", BlendShapeFrame::zeroed(100.0, 5))];
        assert!(matches!(
            ExistingShapeIndex::build(&shapes, 10),
            Err(GeneratorError::VertexCountMismatch { expected: 10, actual: 5, .. })
        ));
    }
}
