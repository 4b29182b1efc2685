use std::fmt;

use serde::{
    de::{MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub description: String,
    pub schedule: String,
    pub max_participants: i64,
    #[serde(default)]
    pub participants: Vec<String>,
}

impl Activity {
    /// Remaining capacity. Not clamped: an over-full roster yields a negative count.
    /// Computed in `i128` so any capacity the server sends stays exact.
    pub fn spots_left(&self) -> i128 {
        i128::from(self.max_participants) - self.participants.len() as i128
    }
}

/// Activities keyed by name, in the order the server listed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<(String, Activity)>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an activity. A replaced entry keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, activity: Activity) {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = activity,
            None => self.entries.push((name, activity)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Activity> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, activity)| activity)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Activity)> {
        self.entries
            .iter()
            .map(|(name, activity)| (name.as_str(), activity))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Activity)> for Catalog {
    fn from_iter<T: IntoIterator<Item = (String, Activity)>>(iter: T) -> Self {
        let mut catalog = Catalog::new();
        for (name, activity) in iter {
            catalog.insert(name, activity);
        }
        catalog
    }
}

impl Serialize for Catalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, activity) in &self.entries {
            map.serialize_entry(name, activity)?;
        }
        map.end()
    }
}

struct CatalogVisitor;

impl<'de> Visitor<'de> for CatalogVisitor {
    type Value = Catalog;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of activity name to activity details")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Catalog, A::Error> {
        let mut catalog = Catalog {
            entries: Vec::with_capacity(access.size_hint().unwrap_or(0)),
        };
        while let Some((name, activity)) = access.next_entry::<String, Activity>()? {
            catalog.insert(name, activity);
        }
        Ok(catalog)
    }
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(CatalogVisitor)
    }
}
