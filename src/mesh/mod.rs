//! 网格与宿主适配接口

mod face_mesh;

pub use face_mesh::FaceMesh;
pub(crate) use face_mesh::vertex_x_range;

use glam::Vec3;

use crate::blendshape::BlendShape;
use crate::Result;

/// 合成引擎所需的网格接口
///
/// 宿主提供顶点坐标（左右判定用）与现有 BlendShape 列表，
/// 并接收新生成的 BlendShape。
pub trait BlendShapeHost {
    fn mesh_name(&self) -> &str;

    /// 顶点数，所有 BlendShape 帧都必须与之一致
    fn vertex_count(&self) -> usize;

    /// 静止姿态的顶点坐标
    fn vertex_positions(&self) -> &[Vec3];

    /// 现有 BlendShape（按添加顺序）
    fn blend_shapes(&self) -> &[BlendShape];

    /// 追加 BlendShape，帧长度不一致时报错
    fn append_blend_shape(&mut self, shape: BlendShape) -> Result<()>;
}
