//! Cube state store: recorded faces and solution bookkeeping
//!
//! Faces are named in adoption order (U, R, F, D, L, B). Only the phase
//! controller writes here; everyone else reads snapshots.

use std::collections::BTreeMap;

use crate::types::{count_tile_colors, FaceName, Move, RubikFace, SolverFault, TileColor};
use crate::{FACE_COUNT, TILES_PER_FACE};

/// Recorded faces plus solver results for one session
#[derive(Debug, Clone, Default)]
pub struct CubeState {
    faces: BTreeMap<FaceName, RubikFace>,
    /// Faces recorded, including any beyond the sixth
    observed: u32,
    /// Last solver failure
    pub fault: Option<SolverFault>,
    /// Raw solver output
    pub solution: Option<String>,
    /// Parsed moves
    pub moves: Vec<Move>,
    /// Index of the move the user should perform
    pub move_index: usize,
}

impl CubeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a recognized face under the next unused name.
    ///
    /// Once six faces are held the face is only counted, not stored.
    pub fn record_face(&mut self, face: RubikFace) -> Option<FaceName> {
        let slot = FaceName::ORDER.get(self.observed as usize).copied();
        self.observed += 1;
        if let Some(name) = slot {
            self.faces.insert(name, face);
        }
        slot
    }

    pub fn has_full_face_set(&self) -> bool {
        self.faces.len() == FACE_COUNT
    }

    /// Tile counts per color across recorded faces
    pub fn color_counts(&self) -> BTreeMap<TileColor, usize> {
        count_tile_colors(self.faces.values())
    }

    /// Exactly nine tiles of each of the six colors
    pub fn validate_tile_colors(&self) -> bool {
        self.has_full_face_set() && self.color_counts().values().all(|n| *n == TILES_PER_FACE)
    }

    /// 54-character facelet string in U R F D L B order.
    ///
    /// Each tile becomes the letter of the face whose center shares its
    /// color. None until six faces with six distinct centers are held.
    pub fn to_facelet_string(&self) -> Option<String> {
        if !self.has_full_face_set() {
            return None;
        }
        let mut by_center: BTreeMap<TileColor, FaceName> = BTreeMap::new();
        for (name, face) in &self.faces {
            by_center.insert(face.center(), *name);
        }
        if by_center.len() != FACE_COUNT {
            return None;
        }

        let mut facelets = String::with_capacity(FACE_COUNT * TILES_PER_FACE);
        for name in FaceName::ORDER {
            let face = self.faces.get(&name)?;
            for tile in face.tiles().iter().flatten() {
                facelets.push(by_center.get(tile)?.letter());
            }
        }
        Some(facelets)
    }

    pub fn face(&self, name: FaceName) -> Option<&RubikFace> {
        self.faces.get(&name)
    }

    pub fn faces(&self) -> &BTreeMap<FaceName, RubikFace> {
        &self.faces
    }

    /// Monotonic count of recorded faces
    pub fn observed_face_count(&self) -> u32 {
        self.observed
    }

    pub fn current_move(&self) -> Option<Move> {
        self.moves.get(self.move_index).copied()
    }

    /// Forget everything
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn solved_cube() -> CubeState {
        let mut cube = CubeState::new();
        for color in [
            TileColor::White,
            TileColor::Red,
            TileColor::Green,
            TileColor::Yellow,
            TileColor::Orange,
            TileColor::Blue,
        ] {
            cube.record_face(RubikFace::uniform(color));
        }
        cube
    }

    #[test]
    fn test_faces_named_in_adoption_order() {
        let mut cube = CubeState::new();
        assert_eq!(cube.record_face(RubikFace::uniform(TileColor::White)), Some(FaceName::Up));
        assert_eq!(cube.record_face(RubikFace::uniform(TileColor::Red)), Some(FaceName::Right));
        assert_eq!(cube.observed_face_count(), 2);
        assert!(!cube.has_full_face_set());
    }

    #[test]
    fn test_seventh_face_only_counted() {
        let mut cube = solved_cube();
        assert!(cube.has_full_face_set());
        assert_eq!(cube.record_face(RubikFace::uniform(TileColor::White)), None);
        assert_eq!(cube.observed_face_count(), 7);
        assert_eq!(cube.faces().len(), 6);
    }

    #[test]
    fn test_solved_cube_colors_valid() {
        assert!(solved_cube().validate_tile_colors());
    }

    #[test]
    fn test_incomplete_cube_colors_invalid() {
        let mut cube = CubeState::new();
        cube.record_face(RubikFace::uniform(TileColor::White));
        assert!(!cube.validate_tile_colors());
    }

    #[test]
    fn test_duplicate_color_invalid() {
        let mut cube = CubeState::new();
        for color in [
            TileColor::White,
            TileColor::White,
            TileColor::Green,
            TileColor::Yellow,
            TileColor::Orange,
            TileColor::Blue,
        ] {
            cube.record_face(RubikFace::uniform(color));
        }
        assert!(!cube.validate_tile_colors());
        assert_eq!(cube.color_counts()[&TileColor::White], 18);
        assert_eq!(cube.color_counts()[&TileColor::Red], 0);
    }

    #[test]
    fn test_facelet_string_of_solved_cube() {
        let expected = "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB";
        assert_eq!(solved_cube().to_facelet_string().as_deref(), Some(expected));
    }

    #[test]
    fn test_facelet_string_maps_by_center() {
        let mut cube = CubeState::new();
        cube.record_face(RubikFace::from_codes("WWWWWWWWR").unwrap());
        cube.record_face(RubikFace::from_codes("RRRRRRRRW").unwrap());
        for color in [TileColor::Green, TileColor::Yellow, TileColor::Orange, TileColor::Blue] {
            cube.record_face(RubikFace::uniform(color));
        }
        let facelets = cube.to_facelet_string().unwrap();
        assert_eq!(facelets.len(), 54);
        assert_eq!(&facelets[0..9], "UUUUUUUUR");
        assert_eq!(&facelets[9..18], "RRRRRRRRU");
    }

    #[test]
    fn test_facelet_string_needs_distinct_centers() {
        let mut cube = CubeState::new();
        for _ in 0..6 {
            cube.record_face(RubikFace::uniform(TileColor::White));
        }
        assert_eq!(cube.to_facelet_string(), None);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut cube = solved_cube();
        cube.solution = Some("U".to_string());
        cube.move_index = 1;
        cube.reset();
        assert_eq!(cube.observed_face_count(), 0);
        assert!(cube.faces().is_empty());
        assert_eq!(cube.solution, None);
        assert_eq!(cube.move_index, 0);
    }
}
