//! 面部网格

use glam::Vec3;

use crate::blendshape::{BlendShape, BlendShapeSet};
use crate::{GeneratorError, Result};

use super::BlendShapeHost;

/// 面部网格：顶点坐标 + BlendShape 集合
#[derive(Clone, Debug, Default)]
pub struct FaceMesh {
    pub name: String,
    pub positions: Vec<Vec3>,
    blend_shapes: BlendShapeSet,
}

impl FaceMesh {
    pub fn new(name: impl Into<String>, positions: Vec<Vec3>) -> Self {
        Self {
            name: name.into(),
            positions,
            blend_shapes: BlendShapeSet::new(),
        }
    }

    /// 获取顶点数量
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// 创建工作副本（原网格保持不变）
    pub fn instantiate(&self) -> Self {
        self.clone()
    }

    pub fn blend_shape_set(&self) -> &BlendShapeSet {
        &self.blend_shapes
    }

    /// 获取 BlendShape 数量
    pub fn blend_shape_count(&self) -> usize {
        self.blend_shapes.count()
    }

    /// 按名称获取（同名取最新）
    pub fn get_blend_shape(&self, name: &str) -> Option<&BlendShape> {
        self.blend_shapes.get_by_name(name)
    }

    /// 可用的 BlendShape 名称列表
    pub fn available_blend_shapes(&self) -> Vec<String> {
        self.blend_shapes.names()
    }

    /// 添加 BlendShape（校验顶点数）
    pub fn add_blend_shape(&mut self, shape: BlendShape) -> Result<usize> {
        let expected = self.vertex_count();
        for frame in &shape.frames {
            if let Some(actual) = frame.mismatched_len(expected) {
                return Err(GeneratorError::VertexCountMismatch {
                    shape: shape.name.clone(),
                    expected,
                    actual,
                });
            }
        }
        Ok(self.blend_shapes.add_shape(shape))
    }

    /// 顶点 X 坐标范围，空网格返回 None
    pub fn vertex_x_range(&self) -> Option<(f32, f32)> {
        vertex_x_range(&self.positions)
    }
}

impl BlendShapeHost for FaceMesh {
    fn mesh_name(&self) -> &str {
        &self.name
    }

    fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    fn vertex_positions(&self) -> &[Vec3] {
        &self.positions
    }

    fn blend_shapes(&self) -> &[BlendShape] {
        self.blend_shapes.as_slice()
    }

    fn append_blend_shape(&mut self, shape: BlendShape) -> Result<()> {
        self.add_blend_shape(shape).map(|_| ())
    }
}

/// 计算顶点 X 坐标范围
pub(crate) fn vertex_x_range(positions: &[Vec3]) -> Option<(f32, f32)> {
    if positions.is_empty() {
        return None;
    }
    let (min_x, max_x) = positions
        .iter()
        .fold((f32::MAX, f32::MIN), |(lo, hi), p| (lo.min(p.x), hi.max(p.x)));
    Some((min_x, max_x))
}
