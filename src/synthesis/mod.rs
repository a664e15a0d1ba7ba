//! BlendShape 合成引擎
//!
//! 流程：
//! 1. 从原始网格建立现有 BlendShape 索引（本次生成的结果不会加入索引）
//! 2. 处理自定义映射（最高优先级）
//! 3. 处理自动映射表，跳过已被自定义映射生成的名称；同名规则第一条成功的生效
//! 4. 每个结果按 源偏移 × 权重 × 强度 × 左右遮罩 叠加

mod compose;
mod engine;
mod index;
mod mask;

pub use compose::{compose, side_distribution, ComposeSource, SideDistribution};
pub use engine::{synthesize, Synthesis};
pub use index::ExistingShapeIndex;
pub use mask::{MaskPolicy, CENTER_THRESHOLD};

/// 合成参数
#[derive(Clone, Debug, PartialEq)]
pub struct SynthesisOptions {
    /// 强度系数（0.1 ~ 2.0）
    pub intensity: f32,
    /// 是否进行左右分割：作用于自动映射的单侧规则；
    /// 平滑遮罩（预览）下同时作用于自定义映射
    pub enable_split: bool,
    /// 是否覆盖原网格中已存在的同名 BlendShape
    pub overwrite_existing: bool,
    /// 平滑遮罩半宽，None 时使用硬分割
    pub blend_width: Option<f32>,
    /// 输出调试日志
    pub debug: bool,
}

impl SynthesisOptions {
    pub fn mask_policy(&self) -> MaskPolicy {
        match self.blend_width {
            Some(blend_width) => MaskPolicy::Smooth { blend_width },
            None => MaskPolicy::Hard,
        }
    }
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self {
            intensity: 1.0,
            enable_split: true,
            overwrite_existing: false,
            blend_width: None,
            debug: false,
        }
    }
}

/// 跳过原因
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// 自定义映射未启用或为空
    CustomInactive,
    /// 同名自定义映射已生成
    CustomDuplicate,
    /// 原网格已存在且不覆盖
    Exists,
    /// 已由自定义映射生成
    CustomDefined,
    /// 没有可用的源
    NoSource,
}

/// 合成结果的诊断信息，不影响控制流程
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SynthesisReport {
    /// 生成的名称（按生成顺序）
    pub generated: Vec<String>,
    /// 被跳过的名称
    pub skipped: Vec<(String, SkipReason)>,
    /// 找不到的源：(ARKit 名称, 源名称)
    pub missing_sources: Vec<(String, String)>,
}

impl SynthesisReport {
    pub fn is_generated(&self, name: &str) -> bool {
        self.generated.iter().any(|n| n == name)
    }

    pub fn skip_reason(&self, name: &str) -> Option<SkipReason> {
        self.skipped
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, reason)| *reason)
    }
}
