//! Map type, UI state and mount values carried in the context blob

use serde::Serialize;

/// Kind of map the avatar is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MapType {
    Redirect,
    CharacterCreate,
    Pvp,
    Gvg,
    Instance,
    Public,
    Tournament,
    Tutorial,
    UserTournament,
    Center,
    EternalBattlegrounds,
    BlueHome,
    GreenHome,
    RedHome,
    FortunesVale,
    JumpPuzzle,
    ObsidianSanctum,
    EdgeOfTheMists,
    PublicMini,
    WvwLounge,
    Unknown(u32),
}

impl MapType {
    pub fn from_raw(value: u32) -> Self {
        match value {
            0 => MapType::Redirect,
            1 => MapType::CharacterCreate,
            2 => MapType::Pvp,
            3 => MapType::Gvg,
            4 => MapType::Instance,
            5 => MapType::Public,
            6 => MapType::Tournament,
            7 => MapType::Tutorial,
            8 => MapType::UserTournament,
            9 => MapType::Center,
            10 => MapType::EternalBattlegrounds,
            11 => MapType::BlueHome,
            12 => MapType::GreenHome,
            13 => MapType::RedHome,
            14 => MapType::FortunesVale,
            15 => MapType::JumpPuzzle,
            16 => MapType::ObsidianSanctum,
            17 => MapType::EdgeOfTheMists,
            18 => MapType::PublicMini,
            19 => MapType::WvwLounge,
            other => MapType::Unknown(other),
        }
    }

    /// World-vs-world maps, including the lounge
    pub fn is_wvw(&self) -> bool {
        matches!(
            self,
            MapType::Center
                | MapType::EternalBattlegrounds
                | MapType::BlueHome
                | MapType::GreenHome
                | MapType::RedHome
                | MapType::JumpPuzzle
                | MapType::ObsidianSanctum
                | MapType::EdgeOfTheMists
                | MapType::WvwLounge
        )
    }
}

/// Bitfield of UI flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UiState(pub u32);

impl UiState {
    pub const MAP_OPEN: u32 = 1 << 0;
    pub const COMPASS_TOP_RIGHT: u32 = 1 << 1;
    pub const COMPASS_ROTATION: u32 = 1 << 2;
    pub const GAME_FOCUS: u32 = 1 << 3;
    pub const COMPETITIVE: u32 = 1 << 4;
    pub const TEXTBOX_FOCUS: u32 = 1 << 5;
    pub const IN_COMBAT: u32 = 1 << 6;

    fn has(&self, flag: u32) -> bool {
        self.0 & flag != 0
    }

    pub fn is_map_open(&self) -> bool {
        self.has(Self::MAP_OPEN)
    }

    pub fn is_compass_top_right(&self) -> bool {
        self.has(Self::COMPASS_TOP_RIGHT)
    }

    pub fn is_compass_rotation_enabled(&self) -> bool {
        self.has(Self::COMPASS_ROTATION)
    }

    pub fn game_has_focus(&self) -> bool {
        self.has(Self::GAME_FOCUS)
    }

    pub fn is_competitive(&self) -> bool {
        self.has(Self::COMPETITIVE)
    }

    pub fn textbox_has_focus(&self) -> bool {
        self.has(Self::TEXTBOX_FOCUS)
    }

    pub fn is_in_combat(&self) -> bool {
        self.has(Self::IN_COMBAT)
    }
}

/// Active mount, `None` when dismounted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Mount {
    None,
    Jackal,
    Griffon,
    Springer,
    Skimmer,
    Raptor,
    RollerBeetle,
    Warclaw,
    Skyscale,
    Skiff,
    SiegeTurtle,
    Unknown(u8),
}

impl Mount {
    pub fn from_raw(value: u8) -> Self {
        match value {
            0 => Mount::None,
            1 => Mount::Jackal,
            2 => Mount::Griffon,
            3 => Mount::Springer,
            4 => Mount::Skimmer,
            5 => Mount::Raptor,
            6 => Mount::RollerBeetle,
            7 => Mount::Warclaw,
            8 => Mount::Skyscale,
            9 => Mount::Skiff,
            10 => Mount::SiegeTurtle,
            other => Mount::Unknown(other),
        }
    }
}

/// Fields appended to the context by newer producers
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContextExtension {
    pub ui_state: UiState,
    pub compass_width: u16,
    pub compass_height: u16,
    /// Radians
    pub compass_rotation: f32,
    /// Continent coordinates
    pub player_position: [f32; 2],
    pub map_center: [f32; 2],
    pub map_scale: f32,
    /// Producer process id
    pub process_id: u32,
    pub mount_index: u8,
}

impl ContextExtension {
    pub fn mount(&self) -> Mount {
        Mount::from_raw(self.mount_index)
    }
}
