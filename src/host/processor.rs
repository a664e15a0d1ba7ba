//! 组件处理：克隆网格 → 合成 → 替换

use std::collections::HashSet;
use std::sync::Arc;

use crate::config::GeneratorConfig;
use crate::mapping::RuleTable;
use crate::mesh::{BlendShapeHost, FaceMesh};
use crate::synthesis::{synthesize, SynthesisReport};
use crate::{GeneratorError, Result};

use super::Avatar;

/// 预览网格名称后缀
pub const PREVIEW_SUFFIX: &str = "_ARKitPreview";

/// 从原始网格生成带 ARKit BlendShape 的新网格
///
/// 原始网格不会被修改；对同一原始网格重复调用结果相同。
pub fn generate_mesh(source: &FaceMesh, config: &GeneratorConfig) -> Result<(FaceMesh, SynthesisReport)> {
    let synthesis = synthesize(
        source,
        &config.custom_mappings,
        RuleTable::builtin(),
        &config.synthesis_options(),
    )?;

    let mut working = source.instantiate();
    for shape in synthesis.shapes {
        working.append_blend_shape(shape)?;
    }
    Ok((working, synthesis.report))
}

/// 生成预览网格：只处理自定义映射，使用平滑遮罩
pub fn generate_preview_mesh(source: &FaceMesh, config: &GeneratorConfig) -> Result<FaceMesh> {
    let synthesis = synthesize(
        source,
        &config.custom_mappings,
        &RuleTable::empty(),
        &config.preview_options(),
    )?;

    let mut preview = source.instantiate();
    preview.name = format!("{}{}", source.name, PREVIEW_SUFFIX);
    for shape in synthesis.shapes {
        preview.append_blend_shape(shape)?;
    }
    Ok(preview)
}

/// 处理单个组件
pub fn process_component(avatar: &mut Avatar, component_index: usize) -> Result<SynthesisReport> {
    run_component(avatar, component_index, &mut HashSet::new())
}

/// 处理模型上的全部组件
///
/// 单个组件失败只记录日志，不影响其它组件。同一渲染器上的后续组件
/// 在前一个组件的结果上继续生成。
pub fn process_avatar(avatar: &mut Avatar) -> Vec<Result<SynthesisReport>> {
    let mut processed = HashSet::new();
    (0..avatar.components.len())
        .map(|index| {
            let result = run_component(avatar, index, &mut processed);
            if let Err(e) = &result {
                log::warn!("[ARKitGenerator] {} component {}: {}", avatar.name, index, e);
            }
            result
        })
        .collect()
}

fn run_component(
    avatar: &mut Avatar,
    component_index: usize,
    processed: &mut HashSet<usize>,
) -> Result<SynthesisReport> {
    let component = avatar
        .components
        .get(component_index)
        .cloned()
        .ok_or(GeneratorError::MissingComponent(component_index))?;

    let renderer_index = avatar
        .resolve_renderer(&component)
        .ok_or_else(|| GeneratorError::MissingRenderer(avatar.name.clone()))?;

    let renderer = &mut avatar.renderers[renderer_index];
    let base = if processed.contains(&renderer_index) {
        renderer.shared_mesh.clone()
    } else {
        renderer.source_mesh.clone()
    };
    let base = base.ok_or_else(|| GeneratorError::MissingMesh(renderer.name.clone()))?;

    let (mesh, report) = generate_mesh(&base, &component.config)?;

    // 全部成功后才替换
    renderer.shared_mesh = Some(Arc::new(mesh));
    processed.insert(renderer_index);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blendshape::{BlendShape, BlendShapeFrame};
    use crate::host::{GeneratorComponent, SkinnedRenderer};
    use crate::mapping::{CustomMapping, Side};
    use glam::Vec3;

    fn body_mesh() -> FaceMesh {
        let positions = vec![Vec3::new(-1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)];
        let mut mesh = FaceMesh::new("Body", positions);
        mesh.add_blend_shape(BlendShape::with_frame("vrc.blink", BlendShapeFrame::from_vertices(100.0, vec![Vec3::Z; 3])))
            .unwrap();
        mesh.add_blend_shape(BlendShape::with_frame("vrc.v_aa", BlendShapeFrame::from_vertices(100.0, vec![Vec3::Y; 3])))
            .unwrap();
        mesh
    }

    fn avatar() -> Avatar {
        let mut avatar = Avatar::new("avatar");
        avatar.add_renderer(SkinnedRenderer::new("Body", body_mesh()));
        avatar.add_component(GeneratorComponent::with_config(GeneratorConfig::default()));
        avatar
    }

    #[test]
    fn test_process_component_swaps_mesh() {
        let mut avatar = avatar();
        let report = process_component(&mut avatar, 0).unwrap();
        assert!(report.is_generated("eyeBlinkLeft"));
        assert!(report.is_generated("jawOpen"));

        let renderer = &avatar.renderers[0];
        assert!(renderer.is_modified());
        assert_eq!(renderer.source_mesh.as_ref().unwrap().blend_shape_count(), 2);
        let live = renderer.shared_mesh.as_ref().unwrap();
        assert_eq!(live.blend_shape_count(), 2 + report.generated.len());
    }

    #[test]
    fn test_repeated_processing_is_idempotent() {
        let mut avatar = avatar();
        process_component(&mut avatar, 0).unwrap();
        let first = avatar.renderers[0].shared_mesh.clone().unwrap();
        process_component(&mut avatar, 0).unwrap();
        let second = avatar.renderers[0].shared_mesh.clone().unwrap();

        assert_eq!(first.blend_shape_count(), second.blend_shape_count());
        assert_eq!(first.blend_shape_set().as_slice(), second.blend_shape_set().as_slice());
    }

    #[test]
    fn test_missing_renderer_and_mesh() {
        let mut avatar = Avatar::new("empty");
        avatar.add_component(GeneratorComponent::with_config(GeneratorConfig::default()));
        assert!(matches!(process_component(&mut avatar, 0), Err(GeneratorError::MissingRenderer(_))));

        avatar.add_renderer(SkinnedRenderer::empty("Body"));
        assert!(matches!(process_component(&mut avatar, 0), Err(GeneratorError::MissingMesh(_))));
        assert!(matches!(process_component(&mut avatar, 5), Err(GeneratorError::MissingComponent(5))));
    }

    #[test]
    fn test_process_avatar_isolates_failures() {
        let mut avatar = avatar();
        avatar.add_component(GeneratorComponent::with_config(GeneratorConfig::default()).targeting("Nope"));
        avatar.renderers.push(SkinnedRenderer::empty("Face"));
        avatar.components.push(GeneratorComponent::with_config(GeneratorConfig::default()).targeting("Face"));

        let results = process_avatar(&mut avatar);
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        // 第二个组件回退到 Body，且在第一个组件的结果上继续：全部已存在
        let second = results[1].as_ref().unwrap();
        assert!(second.generated.is_empty());
        assert!(matches!(results[2], Err(GeneratorError::MissingMesh(_))));
    }

    #[test]
    fn test_preview_mesh_uses_custom_mappings_only() {
        let mut config = GeneratorConfig::default();
        config.set_blend_width(0.5);
        config.custom_mappings = vec![CustomMapping::new("eyeBlinkLeft").with_source("vrc.blink", 1.0, Side::LeftOnly)];

        let source = body_mesh();
        let preview = generate_preview_mesh(&source, &config).unwrap();
        assert_eq!(preview.name, "Body_ARKitPreview");
        assert_eq!(preview.blend_shape_count(), 3);
        assert!(preview.get_blend_shape("jawOpen").is_none());

        let blink = preview.get_blend_shape("eyeBlinkLeft").unwrap();
        let deltas = &blink.frames[0].delta_vertices;
        assert!((deltas[0].z - 1.0).abs() < 1e-6);
        assert!((deltas[1].z - 0.5).abs() < 1e-6);
        assert!(deltas[2].z.abs() < 1e-6);
        assert_eq!(source.blend_shape_count(), 2);
    }

    #[test]
    fn test_preview_ignores_sides_when_split_disabled() {
        let mut config = GeneratorConfig::default();
        config.enable_left_right_split = false;
        config.custom_mappings = vec![CustomMapping::new("eyeBlinkLeft").with_source("vrc.blink", 1.0, Side::LeftOnly)];

        let preview = generate_preview_mesh(&body_mesh(), &config).unwrap();
        let deltas = &preview.get_blend_shape("eyeBlinkLeft").unwrap().frames[0].delta_vertices;
        assert!(deltas.iter().all(|d| (d.z - 1.0).abs() < 1e-6));

        // 批处理仍按自定义映射指定的侧生成
        let (mesh, _) = generate_mesh(&body_mesh(), &config).unwrap();
        let deltas = &mesh.get_blend_shape("eyeBlinkLeft").unwrap().frames[0].delta_vertices;
        assert!((deltas[0].z - 1.0).abs() < 1e-6);
        assert!(deltas[2].z.abs() < 1e-6);
    }
}
