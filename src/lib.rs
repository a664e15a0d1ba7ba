//! ARKit BlendShape Generator - 从 VRChat/MMD 表情合成 ARKit 面部 BlendShape
//!
//! 提供：
//! - ARKit 通道名称目录
//! - VRChat/MMD → ARKit 自动映射表
//! - 用户自定义映射（优先于自动映射）
//! - BlendShape 合成（左右硬分割 / 平滑渐变遮罩）
//! - 宿主适配层（网格克隆、替换、批量处理）

pub mod blendshape;
pub mod catalog;
pub mod config;
pub mod host;
pub mod mapping;
pub mod mesh;
pub mod synthesis;

pub use blendshape::{BlendShape, BlendShapeFrame, BlendShapeSet};
pub use catalog::ArkitCategory;
pub use config::GeneratorConfig;
pub use host::{Avatar, GeneratorComponent, SkinnedRenderer};
pub use mapping::{BlendShapeSource, CustomMapping, RuleTable, Side, SourceGroup, SynthesisRule};
pub use mesh::{BlendShapeHost, FaceMesh};
pub use synthesis::{synthesize, MaskPolicy, Synthesis, SynthesisOptions, SynthesisReport};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Vertex count mismatch in '{shape}': expected {expected}, got {actual}")]
    VertexCountMismatch {
        shape: String,
        expected: usize,
        actual: usize,
    },

    #[error("SkinnedMeshRenderer not found: {0}")]
    MissingRenderer(String),

    #[error("Renderer has no mesh: {0}")]
    MissingMesh(String),

    #[error("Component not found: {0}")]
    MissingComponent(usize),

    #[error("Invalid handle: {0}")]
    InvalidHandle(i64),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, GeneratorError>;
