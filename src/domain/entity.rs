use serde::{de::DeserializeOwned, Serialize};
use std::fmt;

/// Which collection a generic operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Route,
    Station,
}

impl EntityKind {
    /// Resolves the collection segment of `/api/{entity}`.
    pub fn from_path_segment(segment: &str) -> Option<Self> {
        match segment {
            "routes" => Some(Self::Route),
            "stations" => Some(Self::Station),
            _ => None,
        }
    }

    pub fn table(self) -> &'static str {
        match self {
            Self::Route => "route",
            Self::Station => "station",
        }
    }

    // SQL is fixed per kind; table names are never spliced in at runtime.

    pub fn insert_sql(self) -> &'static str {
        match self {
            Self::Route => "INSERT INTO route (name) VALUES ($1) RETURNING id",
            Self::Station => "INSERT INTO station (name) VALUES ($1) RETURNING id",
        }
    }

    pub fn update_sql(self) -> &'static str {
        match self {
            Self::Route => "UPDATE route SET name = $1 WHERE id = $2",
            Self::Station => "UPDATE station SET name = $1 WHERE id = $2",
        }
    }

    pub fn delete_sql(self) -> &'static str {
        match self {
            Self::Route => "DELETE FROM route WHERE id = $1",
            Self::Station => "DELETE FROM station WHERE id = $1",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

/// Capability set shared by every stored entity.
///
/// Generic create/update/delete in the repository and the HTTP handlers only
/// go through these methods, so adding an entity means implementing this
/// trait and adding a variant to [`EntityKind`].
pub trait Model: Serialize + DeserializeOwned + Default + Send + Sync + 'static {
    const KIND: EntityKind;

    fn id(&self) -> i64;
    fn name(&self) -> &str;
    fn set_id(&mut self, id: i64);
    fn set_name(&mut self, name: String);
}
