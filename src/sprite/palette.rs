//! Named color palette shared by every sprite generator

use serde::{Deserialize, Serialize};

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value
    pub const fn hex(v: u32) -> Self {
        Self::rgb((v >> 16) as u8, (v >> 8) as u8, v as u8)
    }

    pub const fn to_hex(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

/// Semantic colors used by the generators
///
/// Constructed once at startup and passed by reference; generators never
/// mutate it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Palette {
    pub deep_night: Color,
    pub shadow_green: Color,
    pub dark_grass: Color,
    pub forest_green: Color,
    pub dead_grass: Color,
    pub stone_gray: Color,
    pub dark_stone: Color,
    pub mossy_stone: Color,
    pub dark_bark: Color,
    pub old_wood: Color,
    pub earth_brown: Color,
    pub blood_red: Color,
    pub torch_glow: Color,
    pub moonlight: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self::dark_fantasy()
    }
}

impl Palette {
    /// Dark fantasy preset (the game's stock look)
    pub const fn dark_fantasy() -> Self {
        Self {
            deep_night: Color::hex(0x4a5462),
            shadow_green: Color::hex(0x122020),
            dark_grass: Color::hex(0x1a7a3e),
            forest_green: Color::hex(0x24523b),
            dead_grass: Color::hex(0xa08662),
            stone_gray: Color::hex(0x8b93af),
            dark_stone: Color::hex(0x6d758d),
            mossy_stone: Color::hex(0x477d85),
            dark_bark: Color::hex(0x5a4e44),
            old_wood: Color::hex(0x71413b),
            earth_brown: Color::hex(0xa08662),
            blood_red: Color::hex(0xdf3e23),
            torch_glow: Color::hex(0xf9a31b),
            moonlight: Color::hex(0xb3b9d1),
        }
    }
}

/// Palette entry names, for data-driven recipes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    DeepNight,
    ShadowGreen,
    DarkGrass,
    ForestGreen,
    DeadGrass,
    StoneGray,
    DarkStone,
    MossyStone,
    DarkBark,
    OldWood,
    EarthBrown,
    BloodRed,
    TorchGlow,
    Moonlight,
}

impl Palette {
    /// Color for a palette entry
    pub fn tone(&self, tone: Tone) -> Color {
        match tone {
            Tone::DeepNight => self.deep_night,
            Tone::ShadowGreen => self.shadow_green,
            Tone::DarkGrass => self.dark_grass,
            Tone::ForestGreen => self.forest_green,
            Tone::DeadGrass => self.dead_grass,
            Tone::StoneGray => self.stone_gray,
            Tone::DarkStone => self.dark_stone,
            Tone::MossyStone => self.mossy_stone,
            Tone::DarkBark => self.dark_bark,
            Tone::OldWood => self.old_wood,
            Tone::EarthBrown => self.earth_brown,
            Tone::BloodRed => self.blood_red,
            Tone::TorchGlow => self.torch_glow,
            Tone::Moonlight => self.moonlight,
        }
    }
}
