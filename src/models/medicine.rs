use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medicine {
    pub id: Uuid,
    pub name: String,
    pub intake_method: String,
    pub action_description: String,
    pub side_effects: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewMedicine {
    pub name: String,
    #[serde(default)]
    pub intake_method: String,
    #[serde(default)]
    pub action_description: String,
    #[serde(default)]
    pub side_effects: String,
}

impl NewMedicine {
    pub fn into_medicine(self, id: Uuid) -> Medicine {
        Medicine {
            id,
            name: self.name,
            intake_method: self.intake_method,
            action_description: self.action_description,
            side_effects: self.side_effects,
        }
    }
}
