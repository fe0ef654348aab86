//! Field catalogue for [`Item`](crate::Item).

use core::str::FromStr;

use outliner_core::DomainError;

/// The named attributes of an item, in declaration order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ItemField {
    Id,
    Uid,
    Parent,
    Text,
    Format,
    View,
    Orientation,
}

impl ItemField {
    pub const ALL: [ItemField; 7] = [
        ItemField::Id,
        ItemField::Uid,
        ItemField::Parent,
        ItemField::Text,
        ItemField::Format,
        ItemField::View,
        ItemField::Orientation,
    ];

    pub const REQUIRED: [ItemField; 6] = [
        ItemField::Id,
        ItemField::Uid,
        ItemField::Parent,
        ItemField::Text,
        ItemField::Format,
        ItemField::View,
    ];

    /// Key used for this field in every key/value representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            ItemField::Id => "id",
            ItemField::Uid => "uid",
            ItemField::Parent => "parent",
            ItemField::Text => "text",
            ItemField::Format => "format",
            ItemField::View => "view",
            ItemField::Orientation => "orientation",
        }
    }

    pub const fn is_required(self) -> bool {
        !matches!(self, ItemField::Orientation)
    }
}

impl core::fmt::Display for ItemField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown item field: {s}")))
    }
}
