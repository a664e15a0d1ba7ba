//! BlendShape 变形目标

mod shape;
mod set;

pub use shape::{BlendShape, BlendShapeFrame};
pub use set::BlendShapeSet;

/// 满强度帧的权重（合成结果统一写在这一帧）
pub const FULL_FRAME_WEIGHT: f32 = 100.0;
