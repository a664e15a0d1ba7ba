//! 生成器配置
//!
//! 参数扁平化，默认值写在 `Default` 中。

use std::fs;
use std::path::Path;
use std::sync::RwLock;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::mapping::{default_eye_look_mappings, CustomMapping, SOURCE_WEIGHT_MAX, SOURCE_WEIGHT_MIN};
use crate::synthesis::SynthesisOptions;
use crate::{GeneratorError, Result};

/// 强度下限
pub const INTENSITY_MIN: f32 = 0.1;
/// 强度上限
pub const INTENSITY_MAX: f32 = 2.0;

/// 生成器配置（每个组件一份，随模型资源保存）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// 生成时的强度系数，默认 1.0（推荐 0.5 ~ 1.5）
    pub intensity_multiplier: f32,

    /// 左右分割，默认 true
    /// 关闭后自动映射中的单侧规则按两侧生成（眨眼等不再左右分开）
    pub enable_left_right_split: bool,

    /// 覆盖已存在的 ARKit BlendShape，默认 false
    pub overwrite_existing: bool,

    /// 预览时平滑遮罩的半宽，默认 0.01
    /// 只在预览中使用，批处理始终是硬分割
    pub blend_width: f32,

    /// 自定义映射，优先于自动映射
    pub custom_mappings: Vec<CustomMapping>,

    /// 输出调试日志，默认 false
    pub debug_mode: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            intensity_multiplier: 1.0,
            enable_left_right_split: true,
            overwrite_existing: false,
            blend_width: 0.01,
            custom_mappings: Vec::new(),
            debug_mode: false,
        }
    }
}

impl GeneratorConfig {
    /// 新组件的初始配置（带视线系默认映射）
    pub fn with_default_mappings() -> Self {
        Self {
            custom_mappings: default_eye_look_mappings(),
            ..Self::default()
        }
    }

    /// 从 JSON 字符串读取并规范化
    pub fn from_json_str(json: &str) -> Result<Self> {
        let mut config: GeneratorConfig = serde_json::from_str(json)?;
        config.normalize()?;
        Ok(config)
    }

    /// 从 JSON 文件读取
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 设置强度
    pub fn set_intensity(&mut self, intensity: f32) {
        self.intensity_multiplier = intensity.clamp(INTENSITY_MIN, INTENSITY_MAX);
    }

    /// 设置平滑遮罩半宽
    pub fn set_blend_width(&mut self, blend_width: f32) {
        self.blend_width = blend_width.max(0.0);
    }

    /// 将数值限制到有效范围，非有限值报错
    pub fn normalize(&mut self) -> Result<()> {
        if !self.intensity_multiplier.is_finite() {
            return Err(GeneratorError::Config(format!(
                "intensity_multiplier must be finite, got {}",
                self.intensity_multiplier
            )));
        }
        if !self.blend_width.is_finite() {
            return Err(GeneratorError::Config(format!(
                "blend_width must be finite, got {}",
                self.blend_width
            )));
        }
        self.set_intensity(self.intensity_multiplier);
        self.set_blend_width(self.blend_width);

        for mapping in &mut self.custom_mappings {
            for source in &mut mapping.sources {
                if !source.weight.is_finite() {
                    return Err(GeneratorError::Config(format!(
                        "weight of '{}' in '{}' must be finite",
                        source.blend_shape_name, mapping.arkit_name
                    )));
                }
                source.weight = source.weight.clamp(SOURCE_WEIGHT_MIN, SOURCE_WEIGHT_MAX);
            }
        }
        Ok(())
    }

    /// 批处理用的合成参数（硬分割）
    pub fn synthesis_options(&self) -> SynthesisOptions {
        SynthesisOptions {
            intensity: self.intensity_multiplier,
            enable_split: self.enable_left_right_split,
            overwrite_existing: self.overwrite_existing,
            blend_width: None,
            debug: self.debug_mode,
        }
    }

    /// 预览用的合成参数（平滑遮罩）
    pub fn preview_options(&self) -> SynthesisOptions {
        SynthesisOptions {
            blend_width: Some(self.blend_width),
            ..self.synthesis_options()
        }
    }
}

/// 全局默认配置（新组件的初始值）
static GENERATOR_CONFIG: Lazy<RwLock<GeneratorConfig>> =
    Lazy::new(|| RwLock::new(GeneratorConfig::with_default_mappings()));

/// 获取当前默认配置
pub fn get_config() -> GeneratorConfig {
    GENERATOR_CONFIG
        .read()
        .unwrap_or_else(|e| e.into_inner())
        .clone()
}

/// 设置默认配置
pub fn set_config(config: GeneratorConfig) {
    *GENERATOR_CONFIG.write().unwrap_or_else(|e| e.into_inner()) = config;
}

/// 重置为默认配置
pub fn reset_config() {
    set_config(GeneratorConfig::with_default_mappings());
}
