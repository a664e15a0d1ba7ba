//! BlendShape 集合

use std::collections::HashMap;

use super::BlendShape;

/// 只追加的 BlendShape 列表
///
/// 同名时后添加的优先（旧的不删除，只被遮蔽）。
#[derive(Clone, Debug, Default)]
pub struct BlendShapeSet {
    shapes: Vec<BlendShape>,
    name_to_index: HashMap<String, usize>,
}

impl BlendShapeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加 BlendShape，返回其索引
    pub fn add_shape(&mut self, shape: BlendShape) -> usize {
        let index = self.shapes.len();
        self.name_to_index.insert(shape.name.clone(), index);
        self.shapes.push(shape);
        index
    }

    /// 通过名称查找（同名取最新）
    pub fn find_by_name(&self, name: &str) -> Option<usize> {
        self.name_to_index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.name_to_index.contains_key(name)
    }

    /// 获取 BlendShape 数量（含被遮蔽的）
    pub fn count(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// 按名称获取（同名取最新）
    pub fn get_by_name(&self, name: &str) -> Option<&BlendShape> {
        self.find_by_name(name).and_then(|index| self.shapes.get(index))
    }

    pub fn as_slice(&self) -> &[BlendShape] {
        &self.shapes
    }

    /// 全部名称（按添加顺序，含重复）
    pub fn names(&self) -> Vec<String> {
        self.shapes.iter().map(|s| s.name.clone()).collect()
    }
}
