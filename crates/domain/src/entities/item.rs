//! Items owned by a character

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::ids::ItemId;

/// Item categories a sheet can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemKind {
    Origin,
    Role,
    Perk,
    Gear,
    Weapon,
    Shield,
    Armor,
}

impl ItemKind {
    /// All kinds in sheet order.
    pub const ALL: [ItemKind; 7] = [
        ItemKind::Origin,
        ItemKind::Role,
        ItemKind::Perk,
        ItemKind::Gear,
        ItemKind::Weapon,
        ItemKind::Shield,
        ItemKind::Armor,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ItemKind::Origin => "origin",
            ItemKind::Role => "role",
            ItemKind::Perk => "perk",
            ItemKind::Gear => "gear",
            ItemKind::Weapon => "weapon",
            ItemKind::Shield => "shield",
            ItemKind::Armor => "armor",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ItemKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemKind::ALL
            .into_iter()
            .find(|k| k.key() == s.trim())
            .ok_or_else(|| DomainError::parse(format!("Unknown item type: {}", s)))
    }
}

/// An item embedded in a character sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterItem {
    pub id: ItemId,
    pub name: String,
    pub kind: ItemKind,
}

impl CharacterItem {
    /// A blank item of the given kind, named "New <kind>".
    pub fn blank(kind: ItemKind) -> Self {
        Self {
            id: ItemId::new(),
            name: format!("New {}", kind),
            kind,
        }
    }
}
