//! 自定义映射（优先于自动映射表）

use serde::{Deserialize, Serialize};

use crate::catalog;

use super::Side;

/// 源权重下限
pub const SOURCE_WEIGHT_MIN: f32 = -2.0;
/// 源权重上限
pub const SOURCE_WEIGHT_MAX: f32 = 2.0;

fn default_true() -> bool {
    true
}

fn default_weight() -> f32 {
    1.0
}

/// 自定义映射的源
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlendShapeSource {
    /// 源 BlendShape 名称，空字符串表示未设置
    #[serde(default)]
    pub blend_shape_name: String,
    /// 权重（-2.0 ~ 2.0）
    #[serde(default = "default_weight")]
    pub weight: f32,
    #[serde(default)]
    pub side: Side,
}

impl BlendShapeSource {
    pub fn new(blend_shape_name: impl Into<String>, weight: f32, side: Side) -> Self {
        Self {
            blend_shape_name: blend_shape_name.into(),
            weight: weight.clamp(SOURCE_WEIGHT_MIN, SOURCE_WEIGHT_MAX),
            side,
        }
    }

    /// 设置权重
    pub fn set_weight(&mut self, weight: f32) {
        self.weight = weight.clamp(SOURCE_WEIGHT_MIN, SOURCE_WEIGHT_MAX);
    }
}

impl Default for BlendShapeSource {
    fn default() -> Self {
        Self::new(String::new(), 1.0, Side::Both)
    }
}

/// 自定义映射：一个 ARKit 名称 + 显式的源列表
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CustomMapping {
    pub arkit_name: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub sources: Vec<BlendShapeSource>,
}

impl CustomMapping {
    pub fn new(arkit_name: impl Into<String>) -> Self {
        Self {
            arkit_name: arkit_name.into(),
            enabled: true,
            sources: Vec::new(),
        }
    }

    /// 追加源（链式）
    pub fn with_source(mut self, name: impl Into<String>, weight: f32, side: Side) -> Self {
        self.sources.push(BlendShapeSource::new(name, weight, side));
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// 是否参与合成（启用、有名称、至少一个源）
    pub fn is_active(&self) -> bool {
        self.enabled && !self.arkit_name.is_empty() && !self.sources.is_empty()
    }
}

/// 视线系默认映射（MMD 通常没有，默认禁用）
pub fn default_eye_look_mappings() -> Vec<CustomMapping> {
    catalog::EYE_LOOK
        .iter()
        .map(|name| CustomMapping::new(*name).disabled())
        .collect()
}

/// 为尚未存在的名称追加空映射
pub fn add_category_mappings(mappings: &mut Vec<CustomMapping>, arkit_names: &[&str]) -> usize {
    let mut added = 0;
    for name in arkit_names {
        if mappings.iter().any(|m| m.arkit_name == *name) {
            continue;
        }
        mappings.push(CustomMapping::new(*name));
        added += 1;
    }
    added
}

/// 从候选名称中找网格上存在的，找不到时用第一个候选
fn find_vrc_blend_shape<'a>(available: &[String], candidates: &[&'a str]) -> &'a str {
    candidates
        .iter()
        .copied()
        .find(|name| available.iter().any(|a| a == name))
        .unwrap_or(candidates[0])
}

/// 只使用 VRChat 标准表情（vrc.blink / vrc.v_*）的预设
///
/// 用于没有 MMD 表情的模型。`vrc.x` 与 `vrc_x` 两种写法按网格实际存在的选择。
pub fn vrchat_standard_preset(available: &[String]) -> Vec<CustomMapping> {
    let blink = find_vrc_blend_shape(available, &["vrc.blink", "vrc_blink"]);
    let v_aa = find_vrc_blend_shape(available, &["vrc.v_aa", "vrc_v_aa"]);
    let v_ou = find_vrc_blend_shape(available, &["vrc.v_ou", "vrc_v_ou"]);
    let v_ih = find_vrc_blend_shape(available, &["vrc.v_ih", "vrc_v_ih"]);
    let v_nn = find_vrc_blend_shape(available, &["vrc.v_nn", "vrc_v_nn"]);
    let v_ch = find_vrc_blend_shape(available, &["vrc.v_ch", "vrc_v_ch"]);
    let v_oh = find_vrc_blend_shape(available, &["vrc.v_oh", "vrc_v_oh"]);

    let preset: [(&str, &str, f32, Side); 16] = [
        ("eyeBlinkLeft", blink, 1.0, Side::LeftOnly),
        ("eyeBlinkRight", blink, 1.0, Side::RightOnly),
        ("jawOpen", v_aa, 0.7, Side::Both),
        ("mouthFunnel", v_ou, 1.0, Side::Both),
        ("mouthPucker", v_ou, 1.2, Side::Both),
        ("mouthUpperUpLeft", v_ih, 1.0, Side::LeftOnly),
        ("mouthUpperUpRight", v_ih, 1.0, Side::RightOnly),
        ("mouthLowerDownLeft", v_aa, 0.6, Side::LeftOnly),
        ("mouthLowerDownRight", v_aa, 0.6, Side::RightOnly),
        ("mouthClose", v_nn, 1.0, Side::Both),
        ("mouthShrugUpper", v_ch, 1.0, Side::Both),
        ("mouthShrugLower", v_oh, 0.5, Side::Both),
        ("mouthStretchLeft", v_ih, 1.0, Side::LeftOnly),
        ("mouthStretchRight", v_ih, 1.0, Side::RightOnly),
        ("mouthSmileLeft", v_ih, 0.7, Side::LeftOnly),
        ("mouthSmileRight", v_ih, 0.7, Side::RightOnly),
    ];

    let mut mappings: Vec<CustomMapping> = preset
        .iter()
        .map(|(arkit, source, weight, side)| CustomMapping::new(*arkit).with_source(*source, *weight, *side))
        .collect();
    mappings.extend(default_eye_look_mappings());
    mappings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_weight_clamped() {
        let mut source = BlendShapeSource::new("vrc.blink", 3.5, Side::Both);
        assert_eq!(source.weight, 2.0);
        source.set_weight(-4.0);
        assert_eq!(source.weight, -2.0);
    }

    #[test]
    fn test_is_active() {
        assert!(!CustomMapping::new("jawOpen").is_active());
        assert!(CustomMapping::new("jawOpen").with_source("あ", 1.0, Side::Both).is_active());
        assert!(!CustomMapping::new("jawOpen").with_source("あ", 1.0, Side::Both).disabled().is_active());
        assert!(!CustomMapping::new("").with_source("あ", 1.0, Side::Both).is_active());
    }

    #[test]
    fn test_add_category_mappings_skips_existing() {
        let mut mappings = vec![CustomMapping::new("eyeLookUpLeft")];
        let added = add_category_mappings(&mut mappings, catalog::EYE_LOOK);
        assert_eq!(added, 7);
        assert_eq!(mappings.len(), 8);
        assert_eq!(add_category_mappings(&mut mappings, catalog::EYE_LOOK), 0);
    }

    #[test]
    fn test_vrchat_preset_prefers_available_spelling() {
        let available = vec!["vrc_blink".to_string(), "vrc.v_aa".to_string()];
        let preset = vrchat_standard_preset(&available);

        let blink = preset.iter().find(|m| m.arkit_name == "eyeBlinkLeft").unwrap();
        assert_eq!(blink.sources[0].blend_shape_name, "vrc_blink");
        assert_eq!(blink.sources[0].side, Side::LeftOnly);

        let jaw = preset.iter().find(|m| m.arkit_name == "jawOpen").unwrap();
        assert_eq!(jaw.sources[0].blend_shape_name, "vrc.v_aa");
        assert!((jaw.sources[0].weight - 0.7).abs() < 1e-6);

        // 未找到时回退到第一个候选
        let close = preset.iter().find(|m| m.arkit_name == "mouthClose").unwrap();
        assert_eq!(close.sources[0].blend_shape_name, "vrc.v_nn");

        let eye_look: Vec<_> = preset.iter().filter(|m| m.arkit_name.starts_with("eyeLook")).collect();
        assert_eq!(eye_look.len(), 8);
        assert!(eye_look.iter().all(|m| !m.enabled && m.sources.is_empty()));
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let json = r#"{"arkit_name":"jawOpen","sources":[{"blend_shape_name":"あ"}]}"#;
        let mapping: CustomMapping = serde_json::from_str(json).unwrap();
        assert!(mapping.enabled);
        assert_eq!(mapping.sources[0].weight, 1.0);
        assert_eq!(mapping.sources[0].side, Side::Both);
    }
}
