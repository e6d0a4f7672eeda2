//! Identity payload: the JSON text the producer writes for the active character

mod kinds;

use serde::{Deserialize, Serialize};

use crate::error::{LinkError, Result};

pub use kinds::{Profession, Race, UiSize};

/// Shape of the identity JSON; unknown keys are ignored
#[derive(Debug, Deserialize)]
struct IdentityPayload {
    name: String,
    profession: Profession,
    #[serde(default)]
    spec: u32,
    race: Race,
    map_id: u32,
    world_id: u64,
    team_color_id: u32,
    commander: bool,
    fov: f32,
    #[serde(default)]
    uisz: UiSize,
}

/// Character identity decoded from the region
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Identity {
    name: String,
    profession: Profession,
    specialization: u32,
    race: Race,
    map_id: u32,
    world_id: u64,
    team_color_id: u32,
    commander: bool,
    fov: f32,
    ui_size: UiSize,
}

impl Identity {
    /// Character name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn profession(&self) -> Profession {
        self.profession
    }

    /// Elite specialization id, 0 when none
    pub fn specialization(&self) -> u32 {
        self.specialization
    }

    pub fn race(&self) -> Race {
        self.race
    }

    pub fn map_id(&self) -> u32 {
        self.map_id
    }

    pub fn world_id(&self) -> u64 {
        self.world_id
    }

    pub fn team_color_id(&self) -> u32 {
        self.team_color_id
    }

    pub fn is_commander(&self) -> bool {
        self.commander
    }

    /// Vertical field of view in radians
    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn ui_size(&self) -> UiSize {
        self.ui_size
    }
}

impl From<IdentityPayload> for Identity {
    fn from(payload: IdentityPayload) -> Self {
        Self {
            name: payload.name,
            profession: payload.profession,
            specialization: payload.spec,
            race: payload.race,
            map_id: payload.map_id,
            world_id: payload.world_id,
            team_color_id: payload.team_color_id,
            commander: payload.commander,
            fov: payload.fov,
            ui_size: payload.uisz,
        }
    }
}

/// Parse the identity text.
///
/// Parser failures are reported as [`LinkError::MalformedPayload`] so callers
/// see one error type whatever the text format.
pub fn decode(text: &str) -> Result<Identity> {
    serde_json::from_str::<IdentityPayload>(text)
        .map(Identity::from)
        .map_err(|e| LinkError::malformed("identity", e.to_string()))
}
