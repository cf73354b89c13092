//! Typed parsing of builder and sheet form submissions.
//!
//! Form fields arrive as loosely typed strings and checkbox flags. Everything
//! is coerced here, once, with the clamps the rules expect, so the rest of the
//! crate only sees valid values. Malformed numbers never fail: they resolve to
//! the lower bound of their range. Numbers too large for any integer type
//! saturate and then clamp, so `1e300` in a rank field reads as the max rank.
//!
//! Field keys:
//!
//! | Key | Value |
//! |-----|-------|
//! | `name` | text |
//! | `level` | number >= 1 |
//! | `essence.<strength\|speed\|smarts\|social>` | number >= 0 |
//! | `morphed` | checkbox |
//! | `armor.training`, `armor.bonusToughness` | tier key, number >= 0 |
//! | `health.base`, `health.value`, `pp.max`, `pp.value`, `move` | number >= 0 |
//! | `role`, `origin`, `pronouns`, `description`, `languages`, `influences`, `hangups`, `notes` | text |
//! | `skill.<id>.rank` | number in `[0, maxRank]` |
//! | `skill.<id>.specialized` | checkbox |
//! | `skill.<id>.specialization`, `skill.<id>.notes` | text |

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

use crate::common::clamp_number;
use crate::error::DomainError;
use crate::game_systems::{CharacterDraft, SkillCatalog, SkillDraft, DEFAULT_CHARACTER_NAME};
use crate::value_objects::{
    ArmorState, ArmorTraining, CharacterDetails, EssenceKey, EssenceScoreSet, HealthPool,
    Movement, PersonalPower, ResourcePools, DEFAULT_ESSENCE_VALUE, DEFAULT_MOVEMENT,
};

/// A single submitted field.
///
/// Fractional JSON numbers are kept as their text, so they go through the
/// same flooring as a typed-in `"1.5"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged, from = "SubmittedValue")]
pub enum FormValue {
    Flag(bool),
    Number(i64),
    Text(String),
}

/// Wire shape of a [`FormValue`].
#[derive(Deserialize)]
#[serde(untagged)]
enum SubmittedValue {
    Flag(bool),
    Number(i64),
    Fraction(f64),
    Text(String),
}

impl From<SubmittedValue> for FormValue {
    fn from(value: SubmittedValue) -> Self {
        match value {
            SubmittedValue::Flag(b) => FormValue::Flag(b),
            SubmittedValue::Number(n) => FormValue::Number(n),
            SubmittedValue::Fraction(f) => FormValue::Text(f.to_string()),
            SubmittedValue::Text(s) => FormValue::Text(s),
        }
    }
}

impl FormValue {
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            FormValue::Text(s) => Cow::Borrowed(s.as_str()),
            FormValue::Flag(true) => Cow::Borrowed("1"),
            FormValue::Flag(false) => Cow::Borrowed("0"),
            FormValue::Number(n) => Cow::Owned(n.to_string()),
        }
    }

    /// Checkbox reading. Text counts as checked unless blank, "0", "false" or "off".
    pub fn is_checked(&self) -> bool {
        match self {
            FormValue::Flag(b) => *b,
            FormValue::Number(n) => *n != 0,
            FormValue::Text(s) => {
                let s = s.trim();
                !(s.is_empty()
                    || s == "0"
                    || s.eq_ignore_ascii_case("false")
                    || s.eq_ignore_ascii_case("off"))
            }
        }
    }
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        FormValue::Text(value.to_string())
    }
}

impl From<String> for FormValue {
    fn from(value: String) -> Self {
        FormValue::Text(value)
    }
}

impl From<bool> for FormValue {
    fn from(value: bool) -> Self {
        FormValue::Flag(value)
    }
}

impl From<i32> for FormValue {
    fn from(value: i32) -> Self {
        FormValue::Number(value.into())
    }
}

/// Submitted form fields keyed by field name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormData {
    fields: HashMap<String, FormValue>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FormValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FormValue>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&FormValue> {
        self.fields.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Text value, or `default` when the field is absent.
    pub fn text_or(&self, key: &str, default: &str) -> String {
        self.get(key)
            .map(|v| v.as_text().into_owned())
            .unwrap_or_else(|| default.to_string())
    }

    /// Checkbox value; an absent field is unchecked.
    pub fn checked(&self, key: &str) -> bool {
        self.get(key).is_some_and(FormValue::is_checked)
    }

    /// Clamped number, or the clamped `default` when the field is absent.
    pub fn number_or(&self, key: &str, default: i32, min: i32, max: i32) -> i32 {
        match self.get(key) {
            Some(value) => clamp_number(&value.as_text(), min, max),
            None => default.clamp(min, max),
        }
    }

    /// Clamped number, only when the field was submitted.
    pub fn number(&self, key: &str, min: i32, max: i32) -> Option<i32> {
        self.get(key).map(|v| clamp_number(&v.as_text(), min, max))
    }

    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).map(|v| v.as_text().into_owned())
    }
}

impl<K: Into<String>, V: Into<FormValue>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut data = FormData::new();
        for (k, v) in iter {
            data.insert(k, v);
        }
        data
    }
}

/// Free-text detail fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DetailField {
    Role,
    Origin,
    Pronouns,
    Description,
    Languages,
    Influences,
    Hangups,
    Notes,
}

impl DetailField {
    pub const ALL: [DetailField; 8] = [
        DetailField::Role,
        DetailField::Origin,
        DetailField::Pronouns,
        DetailField::Description,
        DetailField::Languages,
        DetailField::Influences,
        DetailField::Hangups,
        DetailField::Notes,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            DetailField::Role => "role",
            DetailField::Origin => "origin",
            DetailField::Pronouns => "pronouns",
            DetailField::Description => "description",
            DetailField::Languages => "languages",
            DetailField::Influences => "influences",
            DetailField::Hangups => "hangups",
            DetailField::Notes => "notes",
        }
    }

    pub fn apply(&self, details: &mut CharacterDetails, value: String) {
        let slot = match self {
            DetailField::Role => &mut details.role,
            DetailField::Origin => &mut details.origin,
            DetailField::Pronouns => &mut details.pronouns,
            DetailField::Description => &mut details.description,
            DetailField::Languages => &mut details.languages,
            DetailField::Influences => &mut details.influences,
            DetailField::Hangups => &mut details.hangups,
            DetailField::Notes => &mut details.notes,
        };
        *slot = value;
    }
}

/// Upper bound for unbounded numeric sheet fields.
const MAX_FIELD_VALUE: i32 = 9_999;

fn essence_key(essence: EssenceKey) -> String {
    format!("essence.{}", essence.key())
}

fn skill_key(id: &str, field: &str) -> String {
    format!("skill.{}.{}", id, field)
}

/// Read a builder submission into a draft.
///
/// Every field has a default: name "New Ranger" (also used when blank),
/// essences 1, level 1, movement 30, light armor training, everything else
/// 0 or empty. Ranks are clamped to each skill's max rank. The specialized
/// flags are kept as requested so the validator can warn about them.
pub fn parse_builder_form(catalog: &SkillCatalog, form: &FormData) -> CharacterDraft {
    let name = form.text_or("name", DEFAULT_CHARACTER_NAME);
    let name = match name.trim() {
        "" => DEFAULT_CHARACTER_NAME.to_string(),
        trimmed => trimmed.to_string(),
    };

    let mut essences = EssenceScoreSet::default();
    for essence in EssenceKey::ALL {
        essences.set(
            essence,
            form.number_or(&essence_key(essence), DEFAULT_ESSENCE_VALUE, 0, MAX_FIELD_VALUE),
        );
    }

    let mut details = CharacterDetails {
        level: form.number_or("level", 1, 1, MAX_FIELD_VALUE),
        ..CharacterDetails::default()
    };
    for field in DetailField::ALL {
        field.apply(&mut details, form.text_or(field.key(), ""));
    }

    let armor = ArmorState::new(
        ArmorTraining::parse_or_default(&form.text_or("armor.training", "light")),
        form.number_or("armor.bonusToughness", 0, 0, MAX_FIELD_VALUE),
    );

    let resources = ResourcePools {
        health: HealthPool {
            base: form.number_or("health.base", 0, 0, MAX_FIELD_VALUE),
            value: form.number_or("health.value", 0, 0, MAX_FIELD_VALUE),
            max: 0,
        },
        personal_power: PersonalPower {
            max: form.number_or("pp.max", 0, 0, MAX_FIELD_VALUE),
            value: form.number_or("pp.value", 0, 0, MAX_FIELD_VALUE),
        },
        movement: Movement {
            value: form.number_or("move", DEFAULT_MOVEMENT, 0, MAX_FIELD_VALUE),
        },
    };

    let skills = catalog
        .iter()
        .map(|skill| {
            let rank = form.number_or(
                &skill_key(skill.id, "rank"),
                0,
                0,
                i32::from(skill.max_rank),
            );
            let draft = SkillDraft {
                rank: u8::try_from(rank).unwrap_or(skill.max_rank),
                specialized: form.checked(&skill_key(skill.id, "specialized")),
                specialization: form.text_or(&skill_key(skill.id, "specialization"), ""),
            };
            (skill.id.to_string(), draft)
        })
        .collect();

    CharacterDraft {
        name,
        kind: Default::default(),
        details,
        morphed: form.checked("morphed"),
        armor,
        essences,
        skills,
        resources,
    }
}

/// Changes to one skill from a sheet edit.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillPatch {
    pub rank: Option<u8>,
    pub specialized: Option<bool>,
    pub specialization: Option<String>,
    pub notes: Option<String>,
}

impl SkillPatch {
    pub fn is_empty(&self) -> bool {
        self.rank.is_none()
            && self.specialized.is_none()
            && self.specialization.is_none()
            && self.notes.is_none()
    }
}

/// A partial sheet edit. Only submitted fields are `Some`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetUpdate {
    pub name: Option<String>,
    pub level: Option<i32>,
    pub morphed: Option<bool>,
    pub essences: BTreeMap<EssenceKey, i32>,
    pub armor_training: Option<ArmorTraining>,
    pub bonus_toughness: Option<i32>,
    pub health_base: Option<i32>,
    pub health_value: Option<i32>,
    pub pp_max: Option<i32>,
    pub pp_value: Option<i32>,
    pub movement: Option<i32>,
    pub details: BTreeMap<DetailField, String>,
    /// Keyed by catalog skill id
    pub skills: BTreeMap<String, SkillPatch>,
}

/// Read a sheet edit into a partial update.
///
/// Absent fields stay `None`. A submitted `morphed` or `skill.<id>.specialized`
/// field is read as a checkbox value, so an explicit "off" clears it.
///
/// # Errors
///
/// `UnknownSkill` when a `skill.<id>.*` key names a skill missing from the
/// catalog.
pub fn parse_sheet_update(
    catalog: &SkillCatalog,
    form: &FormData,
) -> Result<SheetUpdate, DomainError> {
    for key in form.keys() {
        if let Some(rest) = key.strip_prefix("skill.") {
            let id = rest.split('.').next().unwrap_or_default();
            catalog.require(id)?;
        }
    }

    let mut update = SheetUpdate {
        name: form
            .text("name")
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty()),
        level: form.number("level", 1, MAX_FIELD_VALUE),
        morphed: form.get("morphed").map(FormValue::is_checked),
        armor_training: form
            .text("armor.training")
            .map(|t| ArmorTraining::parse_or_default(&t)),
        bonus_toughness: form.number("armor.bonusToughness", 0, MAX_FIELD_VALUE),
        health_base: form.number("health.base", 0, MAX_FIELD_VALUE),
        health_value: form.number("health.value", 0, MAX_FIELD_VALUE),
        pp_max: form.number("pp.max", 0, MAX_FIELD_VALUE),
        pp_value: form.number("pp.value", 0, MAX_FIELD_VALUE),
        movement: form.number("move", 0, MAX_FIELD_VALUE),
        ..SheetUpdate::default()
    };

    for essence in EssenceKey::ALL {
        if let Some(value) = form.number(&essence_key(essence), 0, MAX_FIELD_VALUE) {
            update.essences.insert(essence, value);
        }
    }

    for field in DetailField::ALL {
        if let Some(value) = form.text(field.key()) {
            update.details.insert(field, value);
        }
    }

    for skill in catalog.iter() {
        let patch = SkillPatch {
            rank: form
                .number(&skill_key(skill.id, "rank"), 0, i32::from(skill.max_rank))
                .map(|r| u8::try_from(r).unwrap_or(skill.max_rank)),
            specialized: form
                .get(&skill_key(skill.id, "specialized"))
                .map(FormValue::is_checked),
            specialization: form.text(&skill_key(skill.id, "specialization")),
            notes: form.text(&skill_key(skill.id, "notes")),
        };
        if !patch.is_empty() {
            update.skills.insert(skill.id.to_string(), patch);
        }
    }

    Ok(update)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_fractions_are_floored_like_text() {
        let form: FormData = serde_json::from_value(serde_json::json!({
            "bonus": 1.5,
            "level": 3,
            "penalty": -0.5,
            "morphed": true,
            "name": "Tommy"
        }))
        .unwrap();

        assert_eq!(form.get("bonus"), Some(&FormValue::Text("1.5".into())));
        assert_eq!(form.number_or("bonus", 0, -999, 999), 1);
        assert_eq!(form.number_or("penalty", 0, -999, 999), -1);
        assert_eq!(form.number_or("level", 1, 1, 20), 3);
        assert!(form.checked("morphed"));
        assert_eq!(form.text("name").as_deref(), Some("Tommy"));
    }

    #[test]
    fn huge_json_numbers_clamp_to_range() {
        let form: FormData = serde_json::from_value(serde_json::json!({
            "big": 1e300,
            "wide": u64::MAX
        }))
        .unwrap();
        assert_eq!(form.number_or("big", 0, 0, 6), 6);
        assert_eq!(form.number_or("wide", 0, 0, 6), 6);
    }

    #[test]
    fn empty_builder_form_uses_defaults() {
        let catalog = SkillCatalog::standard();
        let draft = parse_builder_form(&catalog, &FormData::new());

        assert_eq!(draft.name, "New Ranger");
        assert_eq!(draft.essences, EssenceScoreSet::uniform(1));
        assert_eq!(draft.details.level, 1);
        assert_eq!(draft.resources.movement.value, 30);
        assert_eq!(draft.armor.training, ArmorTraining::Light);
        assert!(!draft.morphed);
        assert_eq!(draft.skills.len(), catalog.len());
        assert_eq!(draft.skill("athletics").rank, 0);
    }

    #[test]
    fn blank_name_falls_back() {
        let form = FormData::new().with("name", "   ");
        let draft = parse_builder_form(&SkillCatalog::standard(), &form);
        assert_eq!(draft.name, "New Ranger");
    }

    #[test]
    fn builder_clamps_numbers() {
        let form = FormData::new()
            .with("name", " Kimberly ")
            .with("essence.strength", "-4")
            .with("essence.speed", "4.8")
            .with("essence.smarts", "lots")
            .with("level", "0")
            .with("skill.athletics.rank", "11")
            .with("skill.conditioning.rank", "abc")
            .with("armor.training", "mithril")
            .with("armor.bonusToughness", "2");
        let draft = parse_builder_form(&SkillCatalog::standard(), &form);

        assert_eq!(draft.name, "Kimberly");
        assert_eq!(draft.essences.get(EssenceKey::Strength), 0);
        assert_eq!(draft.essences.get(EssenceKey::Speed), 4);
        assert_eq!(draft.essences.get(EssenceKey::Smarts), 0);
        assert_eq!(draft.essences.get(EssenceKey::Social), 1);
        assert_eq!(draft.details.level, 1);
        assert_eq!(draft.skill("athletics").rank, 6);
        assert_eq!(draft.skill("conditioning").rank, 0);
        assert_eq!(draft.armor, ArmorState::new(ArmorTraining::Light, 2));
    }

    #[test]
    fn builder_reads_checkboxes_and_text() {
        let form = FormData::new()
            .with("morphed", "on")
            .with("skill.driving.rank", "2")
            .with("skill.driving.specialized", true)
            .with("skill.driving.specialization", "Motorcycles")
            .with("pronouns", "she/her");
        let draft = parse_builder_form(&SkillCatalog::standard(), &form);

        assert!(draft.morphed);
        let driving = draft.skill("driving");
        assert_eq!(driving.rank, 2);
        assert!(driving.specialized);
        assert_eq!(driving.specialization, "Motorcycles");
        assert_eq!(draft.details.pronouns, "she/her");
    }

    #[test]
    fn form_data_deserializes_from_json() {
        let form: FormData = serde_json::from_value(serde_json::json!({
            "name": "Billy",
            "morphed": true,
            "essence.smarts": "5",
            "move": 25
        }))
        .unwrap();
        assert!(form.checked("morphed"));
        assert_eq!(form.number_or("essence.smarts", 1, 0, 99), 5);
        assert_eq!(form.number_or("move", 30, 0, 99), 25);
    }

    #[test]
    fn checkbox_text_values() {
        assert!(FormValue::from("on").is_checked());
        assert!(!FormValue::from("off").is_checked());
        assert!(!FormValue::from("").is_checked());
        assert!(!FormValue::from("false").is_checked());
    }

    #[test]
    fn sheet_update_only_carries_submitted_fields() {
        let form = FormData::new()
            .with("essence.speed", "4")
            .with("skill.targeting.rank", "3")
            .with("skill.targeting.notes", "blaster")
            .with("morphed", false);
        let update = parse_sheet_update(&SkillCatalog::standard(), &form).unwrap();

        assert_eq!(update.essences.get(&EssenceKey::Speed), Some(&4));
        assert_eq!(update.essences.len(), 1);
        assert_eq!(update.morphed, Some(false));
        assert_eq!(update.name, None);
        assert_eq!(update.level, None);
        let targeting = &update.skills["targeting"];
        assert_eq!(targeting.rank, Some(3));
        assert_eq!(targeting.notes.as_deref(), Some("blaster"));
        assert_eq!(targeting.specialized, None);
        assert_eq!(update.skills.len(), 1);
    }

    #[test]
    fn sheet_update_rejects_unknown_skills() {
        let form = FormData::new().with("skill.piloting.rank", "2");
        let err = parse_sheet_update(&SkillCatalog::standard(), &form).unwrap_err();
        assert_eq!(err, DomainError::unknown_skill("piloting"));
    }

    #[test]
    fn sheet_update_reads_details() {
        let form = FormData::new()
            .with("hangups", "Heights")
            .with("level", "3")
            .with("name", "  ");
        let update = parse_sheet_update(&SkillCatalog::standard(), &form).unwrap();
        assert_eq!(update.details.get(&DetailField::Hangups).map(String::as_str), Some("Heights"));
        assert_eq!(update.level, Some(3));
        assert_eq!(update.name, None);
    }
}
