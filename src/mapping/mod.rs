//! 映射定义：自动映射表 + 自定义映射

mod custom;
mod rule_table;

pub use custom::{
    add_category_mappings, default_eye_look_mappings, vrchat_standard_preset, BlendShapeSource,
    CustomMapping, SOURCE_WEIGHT_MAX, SOURCE_WEIGHT_MIN,
};
pub use rule_table::RuleTable;

use serde::{Deserialize, Serialize};

/// 左右适用范围
///
/// ARKit 以观看者视角定义左右：
/// eyeBlinkLeft = 观看者的左 = 角色自身的右侧 = X < 0
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// 两侧都适用
    #[default]
    Both,
    /// 仅左侧（X < 0）
    LeftOnly,
    /// 仅右侧（X > 0）
    RightOnly,
}

/// 一组候选源名称 + 权重，使用第一个存在的名称
#[derive(Clone, Debug, PartialEq)]
pub struct SourceGroup {
    pub weight: f32,
    pub names: Vec<String>,
}

impl SourceGroup {
    pub fn new(weight: f32, names: &[&str]) -> Self {
        Self {
            weight,
            names: names.iter().map(|n| n.to_string()).collect(),
        }
    }
}

/// 自动映射规则
#[derive(Clone, Debug, PartialEq)]
pub struct SynthesisRule {
    pub arkit_name: String,
    pub sources: Vec<SourceGroup>,
    pub side: Side,
}

impl SynthesisRule {
    pub fn new(arkit_name: impl Into<String>, sources: Vec<SourceGroup>, side: Side) -> Self {
        Self {
            arkit_name: arkit_name.into(),
            sources,
            side,
        }
    }

    /// 单组、两侧适用的规则
    pub fn single(arkit_name: &str, weight: f32, names: &[&str]) -> Self {
        Self::new(arkit_name, vec![SourceGroup::new(weight, names)], Side::Both)
    }

    /// 单组、限定一侧的规则
    pub fn sided(arkit_name: &str, weight: f32, names: &[&str], side: Side) -> Self {
        Self::new(arkit_name, vec![SourceGroup::new(weight, names)], side)
    }
}
