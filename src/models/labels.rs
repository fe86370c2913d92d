use serde::{Deserialize, Serialize};

/// Display data attached to an enumerated preference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelInfo {
    pub emoji: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

/// Training experience of a user or candidate
///
/// The onboarding screen historically stored the Japanese label instead of
/// the code, so both spellings deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    #[serde(alias = "初心者")]
    Beginner,
    #[serde(alias = "中級者")]
    Intermediate,
    #[serde(alias = "上級者")]
    Advanced,
    #[serde(alias = "エキスパート")]
    Expert,
}

const EXPERIENCE_LEVELS: [LabelInfo; 4] = [
    LabelInfo { emoji: "🌱", label: "初心者", description: "3ヶ月未満" },
    LabelInfo { emoji: "💪", label: "中級者", description: "3ヶ月〜2年" },
    LabelInfo { emoji: "🏋️", label: "上級者", description: "2年〜5年" },
    LabelInfo { emoji: "⭐", label: "エキスパート", description: "5年以上" },
];

impl ExperienceLevel {
    pub const ALL: [ExperienceLevel; 4] = [
        ExperienceLevel::Beginner,
        ExperienceLevel::Intermediate,
        ExperienceLevel::Advanced,
        ExperienceLevel::Expert,
    ];

    pub fn info(self) -> &'static LabelInfo {
        &EXPERIENCE_LEVELS[self as usize]
    }
}

/// Who the user wants to train with, relative to their own level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelPreference {
    Same,
    Learn,
    Teach,
}

const LEVEL_PREFERENCES: [LabelInfo; 3] = [
    LabelInfo { emoji: "🤝", label: "同じくらいのレベル", description: "同レベルで励まし合いたい" },
    LabelInfo { emoji: "📚", label: "教えてもらいたい", description: "上級者にフォームなど教わりたい" },
    LabelInfo { emoji: "🎓", label: "教えてもOK", description: "初心者にアドバイスできる" },
];

impl LevelPreference {
    pub const ALL: [LevelPreference; 3] = [
        LevelPreference::Same,
        LevelPreference::Learn,
        LevelPreference::Teach,
    ];

    pub fn info(self) -> &'static LabelInfo {
        &LEVEL_PREFERENCES[self as usize]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenderPreference {
    #[default]
    #[serde(alias = "どちらでも", alias = "指定なし")]
    All,
    #[serde(alias = "男性のみ")]
    Male,
    #[serde(alias = "女性のみ")]
    Female,
}

const GENDER_PREFERENCES: [LabelInfo; 3] = [
    LabelInfo { emoji: "👫", label: "どちらでも", description: "" },
    LabelInfo { emoji: "👨", label: "男性のみ", description: "" },
    LabelInfo { emoji: "👩", label: "女性のみ", description: "" },
];

impl GenderPreference {
    pub fn info(self) -> &'static LabelInfo {
        &GENDER_PREFERENCES[self as usize]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrainingType {
    Weight,
    Pilates,
    Exercise,
    Running,
    Yoga,
    Swimming,
}

const TRAINING_TYPES: [LabelInfo; 6] = [
    LabelInfo { emoji: "🏋️", label: "ウエイト", description: "" },
    LabelInfo { emoji: "🧘", label: "ピラティス", description: "" },
    LabelInfo { emoji: "💪", label: "エクササイズ", description: "" },
    LabelInfo { emoji: "🏃", label: "ランニング", description: "" },
    LabelInfo { emoji: "🧘‍♀️", label: "ヨガ", description: "" },
    LabelInfo { emoji: "🏊", label: "スイミング", description: "" },
];

impl TrainingType {
    pub fn info(self) -> &'static LabelInfo {
        &TRAINING_TYPES[self as usize]
    }
}

/// Direction of expertise exchange a user is open to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpertiseType {
    Teach,
    Learn,
    #[default]
    Both,
}
