//! Serde goes through the string form, so `/1/2/` in JSON is `"/1/2/"`.

use std::fmt;

use serde::de::{self, Visitor};

use crate::{encode_str, storage::NullableHierarchyId, HierarchyId};

impl serde::Serialize for HierarchyId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for HierarchyId {
    fn deserialize<D>(deserializer: D) -> Result<HierarchyId, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_str(HierarchyIdVisitor)
    }
}

struct HierarchyIdVisitor;

impl<'de> Visitor<'de> for HierarchyIdVisitor {
    type Value = HierarchyId;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a hierarchy path string like \"/1/2/\"")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        encode_str::parse(v).map_err(de::Error::custom)
    }
}

impl serde::Serialize for NullableHierarchyId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match &self.0 {
            Some(id) => serializer.serialize_some(id),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> serde::Deserialize<'de> for NullableHierarchyId {
    fn deserialize<D>(deserializer: D) -> Result<NullableHierarchyId, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Option::<HierarchyId>::deserialize(deserializer).map(NullableHierarchyId)
    }
}
