//! 宿主适配层
//!
//! 对应引擎侧的 Avatar / SkinnedMeshRenderer。每次处理都从渲染器的原始网格
//! 克隆工作副本，全部生成成功后才替换渲染器当前使用的网格。

mod processor;
mod registry;

pub use processor::{generate_mesh, generate_preview_mesh, process_avatar, process_component, PREVIEW_SUFFIX};
pub use registry::{
    avatar_count, process_all, process_avatar_handle, register_avatar, remove_avatar, with_avatar,
};

use std::sync::Arc;

use crate::config::{self, GeneratorConfig};
use crate::mesh::FaceMesh;

/// 自动检测身体网格时使用的名称（按顺序）
pub const BODY_MESH_NAMES: [&str; 6] = ["Body", "body", "Face", "face", "Head", "head"];

/// 蒙皮网格渲染器
#[derive(Clone, Debug)]
pub struct SkinnedRenderer {
    pub name: String,
    /// 原始网格资源，不会被修改
    pub source_mesh: Option<Arc<FaceMesh>>,
    /// 当前使用的网格
    pub shared_mesh: Option<Arc<FaceMesh>>,
}

impl SkinnedRenderer {
    pub fn new(name: impl Into<String>, mesh: FaceMesh) -> Self {
        let mesh = Arc::new(mesh);
        Self {
            name: name.into(),
            source_mesh: Some(mesh.clone()),
            shared_mesh: Some(mesh),
        }
    }

    /// 没有网格的渲染器
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source_mesh: None,
            shared_mesh: None,
        }
    }

    /// 是否已被替换为生成的网格
    pub fn is_modified(&self) -> bool {
        match (&self.source_mesh, &self.shared_mesh) {
            (Some(source), Some(shared)) => !Arc::ptr_eq(source, shared),
            _ => false,
        }
    }
}

/// 生成器组件
#[derive(Clone, Debug)]
pub struct GeneratorComponent {
    /// 目标渲染器名称，None 时自动检测
    pub target_renderer: Option<String>,
    pub config: GeneratorConfig,
}

impl GeneratorComponent {
    /// 使用全局默认配置创建
    pub fn new() -> Self {
        Self {
            target_renderer: None,
            config: config::get_config(),
        }
    }

    pub fn with_config(config: GeneratorConfig) -> Self {
        Self {
            target_renderer: None,
            config,
        }
    }

    pub fn targeting(mut self, renderer: impl Into<String>) -> Self {
        self.target_renderer = Some(renderer.into());
        self
    }
}

impl Default for GeneratorComponent {
    fn default() -> Self {
        Self::new()
    }
}

/// 模型（Avatar）
#[derive(Clone, Debug, Default)]
pub struct Avatar {
    pub name: String,
    pub renderers: Vec<SkinnedRenderer>,
    pub components: Vec<GeneratorComponent>,
}

impl Avatar {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            renderers: Vec::new(),
            components: Vec::new(),
        }
    }

    pub fn add_renderer(&mut self, renderer: SkinnedRenderer) -> usize {
        self.renderers.push(renderer);
        self.renderers.len() - 1
    }

    pub fn add_component(&mut self, component: GeneratorComponent) -> usize {
        self.components.push(component);
        self.components.len() - 1
    }

    pub fn find_renderer(&self, name: &str) -> Option<usize> {
        self.renderers.iter().position(|r| r.name == name)
    }

    /// 组件的目标渲染器：显式指定 → 常见名称 → 第一个渲染器
    pub fn resolve_renderer(&self, component: &GeneratorComponent) -> Option<usize> {
        if let Some(target) = &component.target_renderer {
            if let Some(index) = self.find_renderer(target) {
                return Some(index);
            }
        }
        BODY_MESH_NAMES
            .iter()
            .find_map(|name| self.find_renderer(name))
            .or(if self.renderers.is_empty() { None } else { Some(0) })
    }

    /// 渲染器当前网格上的 BlendShape 名称
    pub fn available_blend_shapes(&self, component: &GeneratorComponent) -> Vec<String> {
        self.resolve_renderer(component)
            .and_then(|index| self.renderers[index].shared_mesh.as_ref())
            .map(|mesh| mesh.available_blend_shapes())
            .unwrap_or_default()
    }
}
