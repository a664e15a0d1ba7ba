//! ARKit BlendShape 名称目录
//!
//! 面部追踪通道，按部位分组（含 mouthPress 及其左右变体）。仅用于枚举和分类显示，
//! 合成逻辑不依赖此目录。

/// 部位分类
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArkitCategory {
    Eye,
    EyeLook,
    Brow,
    Mouth,
    Cheek,
    Nose,
    Tongue,
    Unknown,
}

/// 目
pub const EYE: &[&str] = &[
    "eyeBlinkLeft", "eyeBlinkRight",
    "eyeSquintLeft", "eyeSquintRight",
    "eyeWideLeft", "eyeWideRight",
];

/// 视线
pub const EYE_LOOK: &[&str] = &[
    "eyeLookUpLeft", "eyeLookUpRight",
    "eyeLookDownLeft", "eyeLookDownRight",
    "eyeLookInLeft", "eyeLookInRight",
    "eyeLookOutLeft", "eyeLookOutRight",
];

/// 眉毛
pub const BROW: &[&str] = &[
    "browDownLeft", "browDownRight",
    "browInnerUp",
    "browOuterUpLeft", "browOuterUpRight",
];

/// 口（含下颚）
pub const MOUTH: &[&str] = &[
    "jawOpen", "jawForward", "jawLeft", "jawRight",
    "mouthFunnel", "mouthPucker",
    "mouthSmileLeft", "mouthSmileRight",
    "mouthFrownLeft", "mouthFrownRight",
    "mouthLeft", "mouthRight",
    "mouthUpperUpLeft", "mouthUpperUpRight",
    "mouthLowerDownLeft", "mouthLowerDownRight",
    "mouthClose",
    "mouthShrugUpper", "mouthShrugLower",
    "mouthPress", "mouthPressLeft", "mouthPressRight",
    "mouthStretchLeft", "mouthStretchRight",
    "mouthDimpleLeft", "mouthDimpleRight",
    "mouthRollUpper", "mouthRollLower",
];

/// 脸颊
pub const CHEEK: &[&str] = &[
    "cheekPuff",
    "cheekSquintLeft", "cheekSquintRight",
];

/// 鼻
pub const NOSE: &[&str] = &["noseSneerLeft", "noseSneerRight"];

/// 舌
pub const TONGUE: &[&str] = &["tongueOut"];

impl ArkitCategory {
    /// 全部有效分类（不含 Unknown），按目录顺序
    pub const ALL: [ArkitCategory; 7] = [
        ArkitCategory::Eye,
        ArkitCategory::EyeLook,
        ArkitCategory::Brow,
        ArkitCategory::Mouth,
        ArkitCategory::Cheek,
        ArkitCategory::Nose,
        ArkitCategory::Tongue,
    ];

    /// 该分类下的名称
    pub fn names(self) -> &'static [&'static str] {
        match self {
            ArkitCategory::Eye => EYE,
            ArkitCategory::EyeLook => EYE_LOOK,
            ArkitCategory::Brow => BROW,
            ArkitCategory::Mouth => MOUTH,
            ArkitCategory::Cheek => CHEEK,
            ArkitCategory::Nose => NOSE,
            ArkitCategory::Tongue => TONGUE,
            ArkitCategory::Unknown => &[],
        }
    }

    /// 调试显示用标签
    pub fn label(self) -> &'static str {
        match self {
            ArkitCategory::Eye => "Eye",
            ArkitCategory::EyeLook => "Eye Look",
            ArkitCategory::Brow => "Brow",
            ArkitCategory::Mouth => "Mouth",
            ArkitCategory::Cheek => "Cheek",
            ArkitCategory::Nose => "Nose",
            ArkitCategory::Tongue => "Tongue",
            ArkitCategory::Unknown => "Unknown",
        }
    }
}

/// 获取全部 ARKit 名称（目录顺序）
pub fn all_names() -> Vec<&'static str> {
    ArkitCategory::ALL
        .iter()
        .flat_map(|category| category.names().iter().copied())
        .collect()
}

/// 查询名称所属分类
pub fn category_of(name: &str) -> ArkitCategory {
    ArkitCategory::ALL
        .iter()
        .copied()
        .find(|category| category.names().contains(&name))
        .unwrap_or(ArkitCategory::Unknown)
}

/// 是否为 ARKit 标准名称
pub fn is_arkit_name(name: &str) -> bool {
    category_of(name) != ArkitCategory::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_all_names_count() {
        let names = all_names();
        assert_eq!(names.len(), 53);
        let unique: HashSet<_> = names.iter().collect();
        assert_eq!(unique.len(), names.len());
        assert_eq!(names[0], "eyeBlinkLeft");
        assert_eq!(names[names.len() - 1], "tongueOut");
    }

    #[test]
    fn test_category_of() {
        assert_eq!(category_of("eyeBlinkLeft"), ArkitCategory::Eye);
        assert_eq!(category_of("eyeLookInRight"), ArkitCategory::EyeLook);
        assert_eq!(category_of("browInnerUp"), ArkitCategory::Brow);
        assert_eq!(category_of("jawOpen"), ArkitCategory::Mouth);
        assert_eq!(category_of("mouthPress"), ArkitCategory::Mouth);
        assert_eq!(category_of("mouthPressLeft"), ArkitCategory::Mouth);
        assert_eq!(ArkitCategory::Mouth.label(), "Mouth");
        assert_eq!(ArkitCategory::Unknown.label(), "Unknown");
        assert_eq!(category_of("cheekPuff"), ArkitCategory::Cheek);
        assert_eq!(category_of("noseSneerLeft"), ArkitCategory::Nose);
        assert_eq!(category_of("tongueOut"), ArkitCategory::Tongue);
        assert_eq!(category_of("vrc.blink"), ArkitCategory::Unknown);
        assert!(!is_arkit_name(""));
    }
}
