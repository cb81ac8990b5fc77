//! Menu option descriptors
//!
//! Every recognised field is present on every record, unset fields are
//! `None`. Adding or removing an optional field therefore changes the record
//! (and is observed by reconciliation), while display enumeration and JSON
//! serialization only yield fields that are set.

use parking_lot::RwLock;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// A reconciled record. The `Arc` is the option's identity: reconciliation
/// writes new field values through the lock and never swaps the `Arc`.
pub type SharedOption = Arc<RwLock<MenuOption>>;

/// Opaque action callback supplied by the contributing component.
#[derive(Clone)]
pub struct Handler(Arc<dyn Fn() + Send + Sync>);

impl Handler {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn invoke(&self) {
        (self.0)()
    }
}

impl PartialEq for Handler {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Handler(..)")
    }
}

/// Boolean state that is either fixed or computed by the UI at render time.
#[derive(Clone)]
pub enum Flag {
    Value(bool),
    Predicate(Arc<dyn Fn() -> bool + Send + Sync>),
}

impl Flag {
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        Flag::Predicate(Arc::new(f))
    }

    /// Evaluate the flag. The store itself never calls this; it exists for
    /// renderers and for serialization snapshots.
    pub fn evaluate(&self) -> bool {
        match self {
            Flag::Value(value) => *value,
            Flag::Predicate(predicate) => predicate(),
        }
    }
}

impl From<bool> for Flag {
    fn from(value: bool) -> Self {
        Flag::Value(value)
    }
}

impl PartialEq for Flag {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Flag::Value(a), Flag::Value(b)) => a == b,
            (Flag::Predicate(a), Flag::Predicate(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Flag::Value(value) => write!(f, "Value({})", value),
            Flag::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

impl Serialize for Flag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(self.evaluate())
    }
}

impl<'de> Deserialize<'de> for Flag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        bool::deserialize(deserializer).map(Flag::Value)
    }
}

/// How the UI folds an option's group into neighbouring groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroupMerge {
    None,
    Merge,
    MergeUp,
}

/// Names of every recognised descriptor field, in serialization order.
pub const MENU_OPTION_FIELDS: [&str; 16] = [
    "name",
    "label",
    "icon",
    "group",
    "groupLabel",
    "groupMerge",
    "isActive",
    "isDisabled",
    "isHidden",
    "handler",
    "local",
    "global",
    "component",
    "context",
    "formTitle",
    "formDescription",
];

/// A single named editor action contributed by a context node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuOption {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_merge: Option<GroupMerge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<Flag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_disabled: Option<Flag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_hidden: Option<Flag>,
    #[serde(skip)]
    pub handler: Option<Handler>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global: Option<bool>,
    /// Render override, resolved by the UI layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    /// Id of the contributing context node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_description: Option<String>,
}

impl MenuOption {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_group(mut self, group: impl Into<String>, group_label: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self.group_label = Some(group_label.into());
        self
    }

    pub fn with_group_merge(mut self, merge: GroupMerge) -> Self {
        self.group_merge = Some(merge);
        self
    }

    pub fn with_active(mut self, active: impl Into<Flag>) -> Self {
        self.is_active = Some(active.into());
        self
    }

    pub fn with_disabled(mut self, disabled: impl Into<Flag>) -> Self {
        self.is_disabled = Some(disabled.into());
        self
    }

    pub fn with_hidden(mut self, hidden: impl Into<Flag>) -> Self {
        self.is_hidden = Some(hidden.into());
        self
    }

    pub fn with_handler<F>(mut self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.handler = Some(Handler::new(f));
        self
    }

    pub fn with_scope(mut self, local: bool, global: bool) -> Self {
        self.local = Some(local);
        self.global = Some(global);
        self
    }

    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_form(mut self, title: impl Into<String>, description: impl Into<String>) -> Self {
        self.form_title = Some(title.into());
        self.form_description = Some(description.into());
        self
    }

    /// Overwrite every field with `next`, skipping the write when nothing
    /// differs. Returns whether the record changed.
    pub fn assign(&mut self, next: MenuOption) -> bool {
        if *self == next {
            return false;
        }
        *self = next;
        true
    }

    /// Names of the fields that currently hold a value.
    pub fn set_fields(&self) -> Vec<&'static str> {
        let present = [
            true,
            self.label.is_some(),
            self.icon.is_some(),
            self.group.is_some(),
            self.group_label.is_some(),
            self.group_merge.is_some(),
            self.is_active.is_some(),
            self.is_disabled.is_some(),
            self.is_hidden.is_some(),
            self.handler.is_some(),
            self.local.is_some(),
            self.global.is_some(),
            self.component.is_some(),
            self.context.is_some(),
            self.form_title.is_some(),
            self.form_description.is_some(),
        ];
        MENU_OPTION_FIELDS
            .iter()
            .zip(present)
            .filter_map(|(field, set)| set.then_some(*field))
            .collect()
    }

    pub fn into_shared(self) -> SharedOption {
        Arc::new(RwLock::new(self))
    }
}
