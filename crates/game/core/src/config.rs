/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Number of tile columns (x axis).
    pub width: u32,
    /// Number of tile rows (z axis).
    pub length: u32,
    /// Edge length of one tile in world units.
    pub tile_size: f32,
    /// Gap between adjacent tiles in world units.
    pub tile_spacing: f32,
    /// Fraction of maximum hit points recovered by resting.
    pub rest_ratio: f32,
    /// Remaining hit points below which a hit counts as near-lethal.
    pub near_lethal_threshold: f32,
}

impl GameConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_WIDTH: u32 = 8;
    pub const DEFAULT_LENGTH: u32 = 8;
    pub const DEFAULT_TILE_SIZE: f32 = 0.2;
    pub const DEFAULT_TILE_SPACING: f32 = 0.01;
    pub const DEFAULT_REST_RATIO: f32 = 0.1;
    pub const DEFAULT_NEAR_LETHAL_THRESHOLD: f32 = 0.2;

    pub fn new() -> Self {
        Self {
            width: Self::DEFAULT_WIDTH,
            length: Self::DEFAULT_LENGTH,
            tile_size: Self::DEFAULT_TILE_SIZE,
            tile_spacing: Self::DEFAULT_TILE_SPACING,
            rest_ratio: Self::DEFAULT_REST_RATIO,
            near_lethal_threshold: Self::DEFAULT_NEAR_LETHAL_THRESHOLD,
        }
    }

    pub fn with_dimensions(mut self, width: u32, length: u32) -> Self {
        self.width = width;
        self.length = length;
        self
    }

    pub fn with_tile_size(mut self, tile_size: f32, tile_spacing: f32) -> Self {
        self.tile_size = tile_size;
        self.tile_spacing = tile_spacing;
        self
    }

    pub fn with_rest_ratio(mut self, rest_ratio: f32) -> Self {
        self.rest_ratio = rest_ratio;
        self
    }

    /// Distance between the centres of two adjacent tiles.
    pub fn pitch(&self) -> f32 {
        self.tile_size + self.tile_spacing
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
