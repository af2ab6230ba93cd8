//! Face, tile and recognition-result types
//!
//! A recognized face is a 3×3 grid of tile colors. Its fingerprint is the
//! only thing the stability filter compares across frames.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// One of the six sticker colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TileColor {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    White,
}

impl TileColor {
    /// All colors, in code order
    pub const ALL: [TileColor; 6] = [
        TileColor::Red,
        TileColor::Orange,
        TileColor::Yellow,
        TileColor::Green,
        TileColor::Blue,
        TileColor::White,
    ];

    /// Single-letter code
    pub fn code(&self) -> char {
        match self {
            TileColor::Red => 'R',
            TileColor::Orange => 'O',
            TileColor::Yellow => 'Y',
            TileColor::Green => 'G',
            TileColor::Blue => 'B',
            TileColor::White => 'W',
        }
    }

    /// Parse a single-letter code (case-insensitive)
    pub fn from_code(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'R' => Some(TileColor::Red),
            'O' => Some(TileColor::Orange),
            'Y' => Some(TileColor::Yellow),
            'G' => Some(TileColor::Green),
            'B' => Some(TileColor::Blue),
            'W' => Some(TileColor::White),
            _ => None,
        }
    }
}

impl std::fmt::Display for TileColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Face names, in the order the user is guided to show them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FaceName {
    Up,
    Right,
    Front,
    Down,
    Left,
    Back,
}

impl FaceName {
    /// Adoption order, which is also facelet-string order
    pub const ORDER: [FaceName; 6] = [
        FaceName::Up,
        FaceName::Right,
        FaceName::Front,
        FaceName::Down,
        FaceName::Left,
        FaceName::Back,
    ];

    /// Face letter used by facelet strings and move mnemonics
    pub fn letter(&self) -> char {
        match self {
            FaceName::Up => 'U',
            FaceName::Right => 'R',
            FaceName::Front => 'F',
            FaceName::Down => 'D',
            FaceName::Left => 'L',
            FaceName::Back => 'B',
        }
    }

    /// Parse a face letter (exact case)
    pub fn from_letter(c: char) -> Option<Self> {
        match c {
            'U' => Some(FaceName::Up),
            'R' => Some(FaceName::Right),
            'F' => Some(FaceName::Front),
            'D' => Some(FaceName::Down),
            'L' => Some(FaceName::Left),
            'B' => Some(FaceName::Back),
            _ => None,
        }
    }
}

impl std::fmt::Display for FaceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Opaque identity of a tile layout, compared for equality only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(pub u64);

impl Fingerprint {
    /// Derive from a tile grid: first 8 bytes of SHA-256 over the color codes
    pub fn of_tiles(tiles: &[[TileColor; 3]; 3]) -> Self {
        let mut hasher = Sha256::new();
        for row in tiles {
            for tile in row {
                hasher.update([tile.code() as u8]);
            }
        }
        let digest: [u8; 32] = hasher.finalize().into();
        let mut head = [0u8; 8];
        head.copy_from_slice(&digest[0..8]);
        Fingerprint(u64::from_be_bytes(head))
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// A recognized face: observed tiles plus their fingerprint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "FaceTiles", into = "FaceTiles")]
pub struct RubikFace {
    tiles: [[TileColor; 3]; 3],
    fingerprint: Fingerprint,
}

/// Wire form of a face; the fingerprint is always recomputed
#[derive(Debug, Clone, Serialize, Deserialize)]
struct FaceTiles {
    tiles: [[TileColor; 3]; 3],
}

impl From<FaceTiles> for RubikFace {
    fn from(wire: FaceTiles) -> Self {
        RubikFace::new(wire.tiles)
    }
}

impl From<RubikFace> for FaceTiles {
    fn from(face: RubikFace) -> Self {
        FaceTiles { tiles: face.tiles }
    }
}

impl RubikFace {
    /// Create a face from its tile grid
    pub fn new(tiles: [[TileColor; 3]; 3]) -> Self {
        Self {
            fingerprint: Fingerprint::of_tiles(&tiles),
            tiles,
        }
    }

    /// Face with every tile the same color
    pub fn uniform(color: TileColor) -> Self {
        Self::new([[color; 3]; 3])
    }

    /// Parse nine color codes, row-major (e.g. "WWWWWWWWW")
    pub fn from_codes(codes: &str) -> Option<Self> {
        let colors: Vec<TileColor> = codes
            .chars()
            .map(TileColor::from_code)
            .collect::<Option<Vec<_>>>()?;
        if colors.len() != crate::TILES_PER_FACE {
            return None;
        }
        let mut tiles = [[TileColor::White; 3]; 3];
        for (i, color) in colors.into_iter().enumerate() {
            tiles[i / 3][i % 3] = color;
        }
        Some(Self::new(tiles))
    }

    /// Tile grid, row-major
    pub fn tiles(&self) -> &[[TileColor; 3]; 3] {
        &self.tiles
    }

    /// Center tile, which names the face's color
    pub fn center(&self) -> TileColor {
        self.tiles[1][1]
    }

    /// Layout fingerprint
    pub fn fingerprint(&self) -> Fingerprint {
        self.fingerprint
    }

    /// Nine color codes, row-major
    pub fn codes(&self) -> String {
        self.tiles.iter().flatten().map(TileColor::code).collect()
    }
}

/// Tile counts per color; colors never seen count zero
pub fn count_tile_colors<'a>(
    faces: impl IntoIterator<Item = &'a RubikFace>,
) -> BTreeMap<TileColor, usize> {
    let mut counts: BTreeMap<TileColor, usize> = TileColor::ALL.iter().map(|c| (*c, 0)).collect();
    for face in faces {
        for tile in face.tiles().iter().flatten() {
            *counts.entry(*tile).or_insert(0) += 1;
        }
    }
    counts
}

/// Result of recognizing one camera frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "face", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FaceRecognitionResult {
    /// A complete face was recognized
    Solved(RubikFace),
    /// Nothing usable in this frame
    Invalid,
}

impl FaceRecognitionResult {
    /// Fingerprint, when solved
    pub fn fingerprint(&self) -> Option<Fingerprint> {
        match self {
            FaceRecognitionResult::Solved(face) => Some(face.fingerprint()),
            FaceRecognitionResult::Invalid => None,
        }
    }
}
