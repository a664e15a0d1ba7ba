//! 合成流程：自定义映射 → 自动映射

use std::collections::HashSet;

use glam::Vec3;

use crate::blendshape::BlendShape;
use crate::catalog;
use crate::mapping::{CustomMapping, RuleTable, Side, SynthesisRule};
use crate::mesh::BlendShapeHost;
use crate::{GeneratorError, Result};

use super::{
    compose, side_distribution, ComposeSource, ExistingShapeIndex, MaskPolicy, SkipReason,
    SynthesisOptions, SynthesisReport,
};

/// 一次合成的输出
#[derive(Clone, Debug, Default)]
pub struct Synthesis {
    /// 新生成的 BlendShape（按生成顺序，每个名称最多一个）
    pub shapes: Vec<BlendShape>,
    pub report: SynthesisReport,
}

/// 从网格现有的 BlendShape 合成 ARKit BlendShape
///
/// 只读取 `mesh`，不修改；生成结果由调用方追加到工作副本上。
/// 源缺失等情况只会跳过对应名称，唯一的错误是顶点数不一致。
pub fn synthesize(
    mesh: &dyn BlendShapeHost,
    mappings: &[CustomMapping],
    rules: &RuleTable,
    options: &SynthesisOptions,
) -> Result<Synthesis> {
    let vertex_count = mesh.vertex_count();
    let positions = mesh.vertex_positions();
    if positions.len() != vertex_count {
        return Err(GeneratorError::VertexCountMismatch {
            shape: mesh.mesh_name().to_string(),
            expected: vertex_count,
            actual: positions.len(),
        });
    }

    let index = ExistingShapeIndex::build(mesh.blend_shapes(), vertex_count)?;
    let mut pass = Pass {
        positions,
        index: &index,
        options,
        policy: options.mask_policy(),
        claimed: HashSet::new(),
        output: Synthesis::default(),
    };

    pass.log(format!(
        "Processing mesh: {}, existing shapes: {}, vertices: {}",
        mesh.mesh_name(),
        mesh.blend_shapes().len(),
        vertex_count
    ));

    pass.process_custom_mappings(mappings);
    pass.process_rule_table(rules);

    pass.log(format!(
        "Generated {} BlendShapes: {}",
        pass.output.shapes.len(),
        pass.output.report.generated.join(", ")
    ));

    Ok(pass.output)
}

/// 单次合成的状态
struct Pass<'a> {
    positions: &'a [Vec3],
    index: &'a ExistingShapeIndex<'a>,
    options: &'a SynthesisOptions,
    policy: MaskPolicy,
    /// 已由自定义映射生成的名称
    claimed: HashSet<String>,
    output: Synthesis,
}

impl<'a> Pass<'a> {
    fn process_custom_mappings(&mut self, mappings: &'a [CustomMapping]) {
        for mapping in mappings {
            let name = mapping.arkit_name.as_str();

            if !mapping.is_active() {
                if !name.is_empty() {
                    self.skip(name, SkipReason::CustomInactive, "custom (inactive)");
                }
                continue;
            }

            if self.claimed.contains(name) {
                self.skip(name, SkipReason::CustomDuplicate, "custom (duplicate)");
                continue;
            }

            if self.index.contains(name) && !self.options.overwrite_existing {
                self.skip(name, SkipReason::Exists, "custom (exists)");
                continue;
            }

            let mut sources = Vec::with_capacity(mapping.sources.len());
            for src in &mapping.sources {
                if src.blend_shape_name.is_empty() {
                    continue;
                }
                match self.index.resolve(&src.blend_shape_name) {
                    Some(frame) => sources.push(ComposeSource {
                        name: &src.blend_shape_name,
                        frame,
                        weight: src.weight,
                        side: self.custom_side(src.side),
                    }),
                    None => self.missing(name, &src.blend_shape_name),
                }
            }

            if sources.is_empty() {
                self.skip(name, SkipReason::NoSource, "custom (no valid source)");
                continue;
            }

            self.emit(name, &sources);
            self.claimed.insert(name.to_string());
        }
    }

    fn process_rule_table(&mut self, rules: &'a RuleTable) {
        for name in rules.output_names() {
            if self.claimed.contains(name) {
                self.skip(name, SkipReason::CustomDefined, "auto (custom defined)");
                continue;
            }

            if self.index.contains(name) && !self.options.overwrite_existing {
                self.skip(name, SkipReason::Exists, "auto (exists in original)");
                continue;
            }

            // 第一条能解析到源的规则生效
            let resolved = rules
                .rules_for(name)
                .into_iter()
                .map(|rule| self.resolve_rule(rule))
                .find(|sources| !sources.is_empty());

            match resolved {
                Some(sources) => self.emit(name, &sources),
                None => self.skip(name, SkipReason::NoSource, "auto (no source)"),
            }
        }
    }

    /// 预览（平滑遮罩）关闭左右分割时，自定义映射的单侧源也按两侧处理；
    /// 批处理始终保留自定义映射指定的侧
    fn custom_side(&self, side: Side) -> Side {
        match self.policy {
            MaskPolicy::Smooth { .. } if !self.options.enable_split => Side::Both,
            _ => side,
        }
    }

    /// 每组取第一个存在的候选名称
    fn resolve_rule(&self, rule: &'a SynthesisRule) -> Vec<ComposeSource<'a>> {
        // 关闭左右分割时单侧规则按两侧处理
        let side = if self.options.enable_split { rule.side } else { Side::Both };
        rule.sources
            .iter()
            .filter_map(|group| {
                group.names.iter().find_map(|candidate| {
                    self.index.resolve(candidate).map(|frame| ComposeSource {
                        name: candidate,
                        frame,
                        weight: group.weight,
                        side,
                    })
                })
            })
            .collect()
    }

    fn emit(&mut self, name: &str, sources: &[ComposeSource<'_>]) {
        if self.options.debug {
            self.log_sources(sources);
        }

        let frame = compose(self.positions, sources, self.options.intensity, self.policy);
        self.output.shapes.push(BlendShape::with_frame(name, frame));
        self.output.report.generated.push(name.to_string());

        let sided = sources.iter().any(|s| s.side != Side::Both);
        self.log(format!(
            "Generated{}: {} [{}] from {} source(s)",
            if sided { " (with side filter)" } else { "" },
            name,
            catalog::category_of(name).label(),
            sources.len()
        ));
    }

    fn log_sources(&self, sources: &[ComposeSource<'_>]) {
        if sources.iter().any(|s| s.side != Side::Both) {
            if let Some((min_x, max_x)) = crate::mesh::vertex_x_range(self.positions) {
                self.log(format!("Mesh vertex X range: {:.4} to {:.4}", min_x, max_x));
            }
        }
        for source in sources {
            let dist = side_distribution(self.positions, source, self.policy);
            self.log(format!(
                "  Source '{}' side={:?} weight={}: moving={}, applied={}, distribution: X>0={}, X<0={}, center={}",
                source.name,
                source.side,
                source.weight,
                dist.moving,
                dist.applied,
                dist.positive,
                dist.negative,
                dist.center
            ));
        }
    }

    fn skip(&mut self, name: &str, reason: SkipReason, label: &str) {
        self.log(format!("Skip {}: {}", label, name));
        self.output.report.skipped.push((name.to_string(), reason));
    }

    fn missing(&mut self, name: &str, source: &str) {
        self.log(format!("Warning: Source not found: {} for {}", source, name));
        self.output
            .report
            .missing_sources
            .push((name.to_string(), source.to_string()));
    }

    fn log(&self, message: String) {
        if self.options.debug {
            log::info!("[ARKitGenerator] {}", message);
        }
    }
}
