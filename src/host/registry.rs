//! 全局模型存储
//!
//! 每个模型独占自己的网格副本，可以并行处理。

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use once_cell::sync::Lazy;
use rayon::prelude::*;

use crate::synthesis::SynthesisReport;
use crate::{GeneratorError, Result};

use super::{process_avatar, Avatar};

static AVATARS: Lazy<RwLock<HashMap<i64, Arc<Mutex<Avatar>>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// 生成唯一句柄 ID
fn next_handle_id() -> i64 {
    static COUNTER: AtomicI64 = AtomicI64::new(1);
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// 注册模型并返回句柄
pub fn register_avatar(avatar: Avatar) -> i64 {
    let id = next_handle_id();
    AVATARS
        .write()
        .unwrap_or_else(|e| e.into_inner())
        .insert(id, Arc::new(Mutex::new(avatar)));
    id
}

/// 删除模型
pub fn remove_avatar(handle: i64) -> bool {
    AVATARS
        .write()
        .unwrap_or_else(|e| e.into_inner())
        .remove(&handle)
        .is_some()
}

pub fn avatar_count() -> usize {
    AVATARS.read().unwrap_or_else(|e| e.into_inner()).len()
}

fn get_avatar(handle: i64) -> Result<Arc<Mutex<Avatar>>> {
    AVATARS
        .read()
        .unwrap_or_else(|e| e.into_inner())
        .get(&handle)
        .cloned()
        .ok_or(GeneratorError::InvalidHandle(handle))
}

/// 在锁内访问模型
pub fn with_avatar<R>(handle: i64, f: impl FnOnce(&mut Avatar) -> R) -> Result<R> {
    let avatar = get_avatar(handle)?;
    let mut guard = avatar.lock().unwrap_or_else(|e| e.into_inner());
    Ok(f(&mut *guard))
}

/// 处理指定模型的全部组件
pub fn process_avatar_handle(handle: i64) -> Result<Vec<Result<SynthesisReport>>> {
    with_avatar(handle, process_avatar)
}

/// 并行处理所有已注册的模型，按句柄排序返回
pub fn process_all() -> Vec<(i64, Vec<Result<SynthesisReport>>)> {
    let mut avatars: Vec<(i64, Arc<Mutex<Avatar>>)> = AVATARS
        .read()
        .unwrap_or_else(|e| e.into_inner())
        .iter()
        .map(|(id, avatar)| (*id, avatar.clone()))
        .collect();
    avatars.sort_by_key(|(id, _)| *id);

    avatars
        .par_iter()
        .map(|(id, avatar)| {
            let mut guard = avatar.lock().unwrap_or_else(|e| e.into_inner());
            (*id, process_avatar(&mut *guard))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blendshape::{BlendShape, BlendShapeFrame};
    use crate::config::GeneratorConfig;
    use crate::host::{GeneratorComponent, SkinnedRenderer};
    use crate::mesh::FaceMesh;
    use glam::Vec3;

    fn avatar(name: &str) -> Avatar {
        let mut mesh = FaceMesh::new("Body", vec![Vec3::ZERO; 4]);
        mesh.add_blend_shape(BlendShape::with_frame("あ", BlendShapeFrame::from_vertices(100.0, vec![Vec3::Y; 4])))
            .unwrap();
        let mut avatar = Avatar::new(name);
        avatar.add_renderer(SkinnedRenderer::new("Body", mesh));
        avatar.add_component(GeneratorComponent::with_config(GeneratorConfig::default()));
        avatar
    }

    #[test]
    fn test_register_process_remove() {
        let handle = register_avatar(avatar("a"));
        let results = process_avatar_handle(handle).unwrap();
        assert!(results[0].as_ref().unwrap().is_generated("jawOpen"));

        let modified = with_avatar(handle, |a| a.renderers[0].is_modified()).unwrap();
        assert!(modified);

        assert!(remove_avatar(handle));
        assert!(!remove_avatar(handle));
        assert!(matches!(process_avatar_handle(handle), Err(GeneratorError::InvalidHandle(_))));
    }

    #[test]
    fn test_process_all_isolates_avatars() {
        let good = register_avatar(avatar("good"));
        let mut broken = Avatar::new("broken");
        broken.add_component(GeneratorComponent::with_config(GeneratorConfig::default()));
        let bad = register_avatar(broken);

        let results = process_all();
        let good_result = results.iter().find(|(id, _)| *id == good).unwrap();
        assert!(good_result.1[0].is_ok());
        let bad_result = results.iter().find(|(id, _)| *id == bad).unwrap();
        assert!(matches!(bad_result.1[0], Err(GeneratorError::MissingRenderer(_))));

        remove_avatar(good);
        remove_avatar(bad);
    }
}
