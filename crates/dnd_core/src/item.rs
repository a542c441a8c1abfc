use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of an item, unique within one drop area.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Number(n) => write!(f, "{n}"),
            ItemId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ItemId {
    fn from(value: i64) -> Self {
        ItemId::Number(value)
    }
}

impl From<i32> for ItemId {
    fn from(value: i32) -> Self {
        ItemId::Number(value.into())
    }
}

impl From<u32> for ItemId {
    fn from(value: u32) -> Self {
        ItemId::Number(value.into())
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        ItemId::Text(value.to_string())
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        ItemId::Text(value)
    }
}

impl From<&ItemId> for ItemId {
    fn from(value: &ItemId) -> Self {
        value.clone()
    }
}

/// A single entry of an ordered item list. The payload is opaque to the core.
#[derive(Clone, Debug, PartialEq)]
pub struct Item<T> {
    pub id: ItemId,
    pub payload: T,
}

impl<T> Item<T> {
    pub fn new(id: impl Into<ItemId>, payload: T) -> Self {
        Self {
            id: id.into(),
            payload,
        }
    }
}

/// Wrap caller payloads into items, deriving each id with `extract_id`.
pub fn items_from<T, I>(
    payloads: impl IntoIterator<Item = T>,
    extract_id: impl Fn(&T) -> I,
) -> Vec<Item<T>>
where
    I: Into<ItemId>,
{
    payloads
        .into_iter()
        .map(|payload| Item {
            id: extract_id(&payload).into(),
            payload,
        })
        .collect()
}
