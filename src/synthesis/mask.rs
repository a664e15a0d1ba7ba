//! 左右遮罩

use crate::mapping::Side;

/// 中心线阈值，中心附近的顶点同时属于两侧
pub const CENTER_THRESHOLD: f32 = 0.0001;

/// 遮罩策略
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MaskPolicy {
    /// 硬分割：按 X 符号二值取舍（批处理使用）
    Hard,
    /// 平滑渐变：在 [-blend_width, blend_width] 内线性过渡（预览使用），避免中心线折痕
    Smooth { blend_width: f32 },
}

impl MaskPolicy {
    /// 顶点 X 坐标对应的系数（0.0 ~ 1.0）
    ///
    /// ARKit Left = 观看者的左 = 角色的右侧 = X < 0
    pub fn multiplier(self, side: Side, x: f32) -> f32 {
        match (self, side) {
            (_, Side::Both) => 1.0,
            (MaskPolicy::Hard, Side::LeftOnly) => {
                if x < CENTER_THRESHOLD { 1.0 } else { 0.0 }
            }
            (MaskPolicy::Hard, Side::RightOnly) => {
                if x > -CENTER_THRESHOLD { 1.0 } else { 0.0 }
            }
            // 宽度非正或 NaN 时退化为硬分割
            (MaskPolicy::Smooth { blend_width }, side) if !(blend_width > 0.0) => {
                MaskPolicy::Hard.multiplier(side, x)
            }
            (MaskPolicy::Smooth { blend_width }, Side::LeftOnly) => {
                if x > blend_width {
                    0.0
                } else if x > -blend_width {
                    (blend_width - x) / (blend_width * 2.0)
                } else {
                    1.0
                }
            }
            (MaskPolicy::Smooth { blend_width }, Side::RightOnly) => {
                if x < -blend_width {
                    0.0
                } else if x < blend_width {
                    (x + blend_width) / (blend_width * 2.0)
                } else {
                    1.0
                }
            }
        }
    }
}
