use serde::{Deserialize, Serialize};

use super::{EntityKind, Model};

/// A named stop. Routes reference stations; stations never own routes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    #[serde(default)]
    pub id: i64,
    pub name: String,
}

impl Station {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl Model for Station {
    const KIND: EntityKind = EntityKind::Station;

    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}
