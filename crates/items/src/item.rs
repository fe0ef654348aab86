use serde::{Deserialize, Serialize};

use outliner_core::Entity;

use crate::field::ItemField;

/// One node of an outline.
///
/// Every field is plain text and any value, including the empty string, is
/// accepted. `parent` refers to another item's `id`; an empty `parent` marks an
/// item without a parent. Nothing here checks that the referenced item exists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub uid: String,
    pub parent: String,
    pub text: String,
    pub format: String,
    pub view: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<String>,
}

impl Item {
    pub fn new(
        id: impl Into<String>,
        uid: impl Into<String>,
        parent: impl Into<String>,
        text: impl Into<String>,
        format: impl Into<String>,
        view: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            uid: uid.into(),
            parent: parent.into(),
            text: text.into(),
            format: format.into(),
            view: view.into(),
            orientation: None,
        }
    }

    #[must_use]
    pub fn with_orientation(mut self, orientation: impl Into<String>) -> Self {
        self.orientation = Some(orientation.into());
        self
    }

    pub fn orientation(&self) -> Option<&str> {
        self.orientation.as_deref()
    }

    pub fn has_parent(&self) -> bool {
        !self.parent.is_empty()
    }

    /// Value of `field`, or `None` when the optional field is absent.
    pub fn get(&self, field: ItemField) -> Option<&str> {
        match field {
            ItemField::Id => Some(&self.id),
            ItemField::Uid => Some(&self.uid),
            ItemField::Parent => Some(&self.parent),
            ItemField::Text => Some(&self.text),
            ItemField::Format => Some(&self.format),
            ItemField::View => Some(&self.view),
            ItemField::Orientation => self.orientation(),
        }
    }

    /// Present fields in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (ItemField, &str)> + '_ {
        ItemField::ALL
            .into_iter()
            .filter_map(move |field| self.get(field).map(|value| (field, value)))
    }
}

impl Entity for Item {
    type Id = str;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
