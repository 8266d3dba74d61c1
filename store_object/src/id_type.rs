//! Id Type module
//!
//! Typed record identifiers. A `RecordId<K>` wraps a UUID and carries the record
//! kind `K` in its type, so an id of one kind cannot stand in for another.

use std::cmp::Ordering;
use std::fmt::{self, Debug, Display};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::postgres::{PgArgumentBuffer, PgTypeInfo, PgValueRef};
use sqlx::Postgres;
use uuid::Uuid;

use crate::errors::StoreError;

pub struct RecordId<K> {
    uuid: Uuid,
    _kind: PhantomData<fn() -> K>,
}

impl<K> RecordId<K> {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self {
            uuid,
            _kind: PhantomData,
        }
    }

    /// Parse the textual form of an identifier.
    ///
    /// Surrounding whitespace is not accepted; callers validating user input
    /// should trim first if that is the desired behaviour.
    pub fn parse(raw: &str) -> Result<Self, StoreError> {
        Uuid::parse_str(raw)
            .map(Self::from_uuid)
            .map_err(|_| StoreError::InvalidIdentifier(raw.to_string()))
    }

    /// The id as a JSON value, suitable for equality filters
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::Value::String(self.uuid.to_string())
    }
}

// Manual impls so that no bounds are placed on the kind marker.
impl<K> Clone for RecordId<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for RecordId<K> {}

impl<K> PartialEq for RecordId<K> {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid
    }
}

impl<K> Eq for RecordId<K> {}

impl<K> PartialOrd for RecordId<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K> Ord for RecordId<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.uuid.cmp(&other.uuid)
    }
}

impl<K> Hash for RecordId<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uuid.hash(state);
    }
}

impl<K> Debug for RecordId<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", self.uuid)
    }
}

impl<K> Display for RecordId<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.uuid, f)
    }
}

impl<K> FromStr for RecordId<K> {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<K> From<Uuid> for RecordId<K> {
    fn from(uuid: Uuid) -> Self {
        Self::from_uuid(uuid)
    }
}

impl<K> Serialize for RecordId<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.uuid.serialize(serializer)
    }
}

impl<'de, K> Deserialize<'de> for RecordId<K> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Uuid::deserialize(deserializer).map(Self::from_uuid)
    }
}

impl<K> sqlx::Type<Postgres> for RecordId<K> {
    fn type_info() -> PgTypeInfo {
        <Uuid as sqlx::Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <Uuid as sqlx::Type<Postgres>>::compatible(ty)
    }
}

impl<'q, K> sqlx::Encode<'q, Postgres> for RecordId<K> {
    fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> Result<IsNull, BoxDynError> {
        <Uuid as sqlx::Encode<'q, Postgres>>::encode_by_ref(&self.uuid, buf)
    }
}

impl<'r, K> sqlx::Decode<'r, Postgres> for RecordId<K> {
    fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
        <Uuid as sqlx::Decode<'r, Postgres>>::decode(value).map(Self::from_uuid)
    }
}
