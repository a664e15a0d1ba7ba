//! 偏移合成

use glam::Vec3;
use rayon::prelude::*;

use crate::blendshape::{BlendShapeFrame, FULL_FRAME_WEIGHT};
use crate::mapping::Side;

use super::{MaskPolicy, CENTER_THRESHOLD};

/// 已解析的合成源
#[derive(Clone, Copy, Debug)]
pub struct ComposeSource<'a> {
    pub name: &'a str,
    pub frame: &'a BlendShapeFrame,
    pub weight: f32,
    pub side: Side,
}

/// 按 权重 × 强度 × 遮罩 叠加所有源，生成 100% 帧
///
/// 每个顶点按源的顺序累加，结果与并行划分无关。
pub fn compose(
    positions: &[Vec3],
    sources: &[ComposeSource<'_>],
    intensity: f32,
    policy: MaskPolicy,
) -> BlendShapeFrame {
    let mut frame = BlendShapeFrame::zeroed(FULL_FRAME_WEIGHT, positions.len());
    let BlendShapeFrame {
        delta_vertices,
        delta_normals,
        delta_tangents,
        ..
    } = &mut frame;

    delta_vertices
        .par_iter_mut()
        .zip(delta_normals.par_iter_mut())
        .zip(delta_tangents.par_iter_mut())
        .zip(positions.par_iter())
        .enumerate()
        .for_each(|(i, (((dv, dn), dt), position))| {
            for source in sources {
                let multiplier = policy.multiplier(source.side, position.x);
                if multiplier <= 0.0 {
                    continue;
                }
                let weight = source.weight * intensity * multiplier;
                *dv += source.frame.delta_vertices[i] * weight;
                *dn += source.frame.delta_normals[i] * weight;
                *dt += source.frame.delta_tangents[i] * weight;
            }
        });

    frame
}

/// 单个源的顶点分布（调试用）
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SideDistribution {
    /// X > 阈值
    pub positive: usize,
    /// X < -阈值
    pub negative: usize,
    pub center: usize,
    /// 有位移的顶点
    pub moving: usize,
    /// 有位移且遮罩系数 > 0 的顶点
    pub applied: usize,
}

/// 统计源在左右两侧的分布
pub fn side_distribution(
    positions: &[Vec3],
    source: &ComposeSource<'_>,
    policy: MaskPolicy,
) -> SideDistribution {
    let mut dist = SideDistribution::default();
    for (position, delta) in positions.iter().zip(&source.frame.delta_vertices) {
        let x = position.x;
        if x > CENTER_THRESHOLD {
            dist.positive += 1;
        } else if x < -CENTER_THRESHOLD {
            dist.negative += 1;
        } else {
            dist.center += 1;
        }

        let moving = delta.length_squared() > 0.0001;
        if moving {
            dist.moving += 1;
            if policy.multiplier(source.side, x) > 0.0 {
                dist.applied += 1;
            }
        }
    }
    dist
}
