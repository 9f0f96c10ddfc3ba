//! Serde support for Discord ids stored in persisted documents.
//!
//! Ids are written as strings since snowflakes exceed the integer range JSON readers
//! such as JavaScript handle exactly. Older documents stored plain numbers, so both
//! representations are accepted on read; `null`, empty strings and `0` read as absent.

use serde::{Deserialize, Deserializer, Serializer};
use serenity::all::{ChannelId, RoleId};

/// Discord id types that can be persisted.
pub trait Snowflake: Copy {
    fn from_raw(raw: u64) -> Option<Self>;
    fn raw(self) -> u64;
}

impl Snowflake for ChannelId {
    fn from_raw(raw: u64) -> Option<Self> {
        (raw != 0).then(|| ChannelId::new(raw))
    }

    fn raw(self) -> u64 {
        self.get()
    }
}

impl Snowflake for RoleId {
    fn from_raw(raw: u64) -> Option<Self> {
        (raw != 0).then(|| RoleId::new(raw))
    }

    fn raw(self) -> u64 {
        self.get()
    }
}

/// `#[serde(with = "...")]` module for `Option<impl Snowflake>` fields.
pub mod optional {
    use serde::de::Error as _;

    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(u64),
        Text(String),
    }

    pub fn serialize<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Snowflake,
        S: Serializer,
    {
        match value {
            Some(id) => serializer.serialize_some(&id.raw().to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        T: Snowflake,
        D: Deserializer<'de>,
    {
        match Option::<RawId>::deserialize(deserializer)? {
            None => Ok(None),
            Some(RawId::Number(raw)) => Ok(T::from_raw(raw)),
            Some(RawId::Text(text)) if text.trim().is_empty() => Ok(None),
            Some(RawId::Text(text)) => text
                .trim()
                .parse::<u64>()
                .map(T::from_raw)
                .map_err(D::Error::custom),
        }
    }
}
