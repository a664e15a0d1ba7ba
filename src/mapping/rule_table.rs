//! VRChat/MMD → ARKit 自动映射表
//!
//! 同一 ARKit 名称可以有多条规则，按声明顺序尝试，第一条能解析到源的规则生效。
//! 因此左右分开的源（Blink_L 等）必须写在从双侧源分割的规则之前。

use once_cell::sync::Lazy;

use super::{Side, SynthesisRule};

/// 内置映射表
static BUILTIN: Lazy<RuleTable> = Lazy::new(|| RuleTable::new(builtin_rules()));

/// 有序的规则列表
#[derive(Clone, Debug, Default)]
pub struct RuleTable {
    rules: Vec<SynthesisRule>,
}

impl RuleTable {
    pub fn new(rules: Vec<SynthesisRule>) -> Self {
        Self { rules }
    }

    /// 空表（预览只处理自定义映射时使用）
    pub fn empty() -> Self {
        Self::default()
    }

    /// 内置 VRChat/MMD 映射表
    pub fn builtin() -> &'static RuleTable {
        &BUILTIN
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SynthesisRule> {
        self.rules.iter()
    }

    /// 指定 ARKit 名称的全部规则（保持声明顺序）
    pub fn rules_for(&self, arkit_name: &str) -> Vec<&SynthesisRule> {
        self.rules
            .iter()
            .filter(|rule| rule.arkit_name == arkit_name)
            .collect()
    }

    /// 表中出现的 ARKit 名称，按首次出现顺序去重
    pub fn output_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for rule in &self.rules {
            if !names.contains(&rule.arkit_name.as_str()) {
                names.push(&rule.arkit_name);
            }
        }
        names
    }
}

/// 左右两条同源分割规则
fn split(rules: &mut Vec<SynthesisRule>, left: &str, right: &str, weight: f32, names: &[&str]) {
    rules.push(SynthesisRule::sided(left, weight, names, Side::LeftOnly));
    rules.push(SynthesisRule::sided(right, weight, names, Side::RightOnly));
}

/// 左右分开的源
fn pair(rules: &mut Vec<SynthesisRule>, left: (&str, &[&str]), right: (&str, &[&str]), weight: f32) {
    rules.push(SynthesisRule::single(left.0, weight, left.1));
    rules.push(SynthesisRule::single(right.0, weight, right.1));
}

fn builtin_rules() -> Vec<SynthesisRule> {
    let mut r = Vec::new();

    // ========== 目 ==========
    pair(
        &mut r,
        ("eyeBlinkLeft", &["vrc.blink_left", "blink_left", "Blink_L"]),
        ("eyeBlinkRight", &["vrc.blink_right", "blink_right", "Blink_R"]),
        1.0,
    );
    r.push(SynthesisRule::sided("eyeBlinkLeft", 1.0, &["vrc.blink", "まばたき", "ウィンク", "blink"], Side::LeftOnly));
    r.push(SynthesisRule::sided("eyeBlinkRight", 1.0, &["vrc.blink", "まばたき", "ウィンク右", "blink"], Side::RightOnly));

    pair(
        &mut r,
        ("eyeSquintLeft", &["Squint_L", "squint_left"]),
        ("eyeSquintRight", &["Squint_R", "squint_right"]),
        0.7,
    );
    split(&mut r, "eyeSquintLeft", "eyeSquintRight", 0.7, &["笑い", "にこり", "><", "笑い目"]);

    pair(
        &mut r,
        ("eyeWideLeft", &["Wide_L", "wide_left"]),
        ("eyeWideRight", &["Wide_R", "wide_right"]),
        1.0,
    );
    split(&mut r, "eyeWideLeft", "eyeWideRight", 1.0, &["びっくり", "見開き", "驚き"]);

    // ========== 视线（通常需要手动设置）==========
    pair(&mut r, ("eyeLookUpLeft", &["EyeUp_L", "eye_up_L"]), ("eyeLookUpRight", &["EyeUp_R", "eye_up_R"]), 1.0);
    pair(&mut r, ("eyeLookDownLeft", &["EyeDown_L", "eye_down_L"]), ("eyeLookDownRight", &["EyeDown_R", "eye_down_R"]), 1.0);
    pair(&mut r, ("eyeLookInLeft", &["EyeIn_L", "eye_in_L"]), ("eyeLookInRight", &["EyeIn_R", "eye_in_R"]), 1.0);
    pair(&mut r, ("eyeLookOutLeft", &["EyeOut_L", "eye_out_L"]), ("eyeLookOutRight", &["EyeOut_R", "eye_out_R"]), 1.0);
    split(&mut r, "eyeLookUpLeft", "eyeLookUpRight", 1.0, &["目上"]);
    split(&mut r, "eyeLookDownLeft", "eyeLookDownRight", 1.0, &["目下"]);
    split(&mut r, "eyeLookInLeft", "eyeLookInRight", 1.0, &["より目"]);

    // ========== 眉毛 ==========
    pair(&mut r, ("browDownLeft", &["BrowDown_L"]), ("browDownRight", &["BrowDown_R"]), 1.0);
    split(&mut r, "browDownLeft", "browDownRight", 1.0, &["怒り", "真面目", "困る"]);
    r.push(SynthesisRule::single("browInnerUp", 1.0, &["困る", "上", "悲しい", "BrowInnerUp"]));
    pair(&mut r, ("browOuterUpLeft", &["BrowOuterUp_L"]), ("browOuterUpRight", &["BrowOuterUp_R"]), 1.0);
    split(&mut r, "browOuterUpLeft", "browOuterUpRight", 1.0, &["上", "驚き"]);

    // ========== 口 - 母音 ==========
    r.push(SynthesisRule::single("jawOpen", 0.7, &["vrc.v_aa", "あ", "a", "A"]));
    r.push(SynthesisRule::single("mouthFunnel", 1.0, &["vrc.v_ou", "う", "u", "U"]));
    r.push(SynthesisRule::single("mouthPucker", 1.2, &["vrc.v_ou", "う", "ω", "u", "U"]));

    // ========== 口 - 表情 ==========
    pair(&mut r, ("mouthSmileLeft", &["Smile_L"]), ("mouthSmileRight", &["Smile_R"]), 1.0);
    split(&mut r, "mouthSmileLeft", "mouthSmileRight", 1.0, &["にやり", "∧", "にっこり"]);
    pair(&mut r, ("mouthFrownLeft", &["Frown_L"]), ("mouthFrownRight", &["Frown_R"]), 1.0);
    split(&mut r, "mouthFrownLeft", "mouthFrownRight", 1.0, &["への字", "悲しみ"]);
    r.push(SynthesisRule::single("mouthLeft", 1.0, &["口左", "MouthLeft"]));
    r.push(SynthesisRule::single("mouthRight", 1.0, &["口右", "MouthRight"]));
    split(&mut r, "mouthUpperUpLeft", "mouthUpperUpRight", 1.0, &["vrc.v_ih", "い", "i", "I"]);
    split(&mut r, "mouthLowerDownLeft", "mouthLowerDownRight", 0.6, &["vrc.v_aa", "あ", "a", "A"]);
    r.push(SynthesisRule::single("mouthClose", 1.0, &["vrc.v_nn", "ん", "n", "N"]));
    r.push(SynthesisRule::single("mouthShrugUpper", 1.0, &["vrc.v_ch", "え", "e", "E"]));
    r.push(SynthesisRule::single("mouthShrugLower", 0.5, &["vrc.v_oh", "お", "o", "O"]));
    r.push(SynthesisRule::single("mouthPress", 1.0, &["むっ", "MouthPress"]));
    pair(&mut r, ("mouthPressLeft", &["MouthPress_L"]), ("mouthPressRight", &["MouthPress_R"]), 1.0);
    split(&mut r, "mouthStretchLeft", "mouthStretchRight", 1.0, &["vrc.v_ih", "い", "i"]);

    // ========== 脸颊 ==========
    r.push(SynthesisRule::single("cheekPuff", 1.0, &["ぷく", "膨らみ", "CheekPuff"]));
    pair(&mut r, ("cheekSquintLeft", &["CheekSquint_L"]), ("cheekSquintRight", &["CheekSquint_R"]), 0.8);
    split(&mut r, "cheekSquintLeft", "cheekSquintRight", 0.8, &["笑い", "にこり"]);

    // ========== 鼻 ==========
    pair(&mut r, ("noseSneerLeft", &["NoseSneer_L"]), ("noseSneerRight", &["NoseSneer_R"]), 1.0);
    split(&mut r, "noseSneerLeft", "noseSneerRight", 1.0, &["怒り"]);

    // ========== 下颚 ==========
    r.push(SynthesisRule::single("jawForward", 1.0, &["JawForward"]));
    r.push(SynthesisRule::single("jawLeft", 1.0, &["JawLeft"]));
    r.push(SynthesisRule::single("jawRight", 1.0, &["JawRight"]));

    // ========== 舌 ==========
    r.push(SynthesisRule::single("tongueOut", 1.0, &["べー", "舌", "TongueOut"]));

    r
}
