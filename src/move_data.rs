use crate::errors::{MoveDataError, MoveDataResult};
use schema::{MoveCategory, MoveData, MoveEffect, PokemonType};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

// Compiled-in catalogue, parsed on first use.
static MOVE_DATA: LazyLock<MoveDataResult<HashMap<String, MoveData>>> =
    LazyLock::new(|| load_moves_from_str(include_str!("../data/moves.ron")));

/// Look a move up in the built-in catalogue by display name. Lookup ignores
/// case, spaces, hyphens and underscores, so "double-edge" finds "Double-Edge".
pub fn get_move_data(name: &str) -> MoveDataResult<MoveData> {
    match &*MOVE_DATA {
        Ok(moves) => moves
            .get(&normalize_move_name(name))
            .cloned()
            .ok_or_else(|| MoveDataError::MoveNotFound(name.to_string())),
        Err(err) => Err(err.clone()),
    }
}

/// Parse a RON move list into a lookup map. The synthetic moves are always
/// present and every entry starts with full PP.
pub fn load_moves_from_str(source: &str) -> MoveDataResult<HashMap<String, MoveData>> {
    let entries: Vec<MoveData> =
        ron::from_str(source).map_err(|err| MoveDataError::MalformedData(err.to_string()))?;

    let mut move_map = HashMap::new();
    for special in [hit_itself(), struggle()] {
        move_map.insert(normalize_move_name(&special.name), special);
    }

    for mut move_data in entries {
        move_data.pp = move_data.max_pp;
        let key = normalize_move_name(&move_data.name);
        if move_map.insert(key, move_data.clone()).is_some() {
            log::warn!("Duplicate catalogue entry for {}", move_data.name);
        }
    }

    log::debug!("Loaded {} moves", move_map.len());
    Ok(move_map)
}

/// Load a RON move list from disk.
pub fn load_moves_from_path(path: &Path) -> MoveDataResult<HashMap<String, MoveData>> {
    let content = fs::read_to_string(path).map_err(|err| {
        MoveDataError::MalformedData(format!("{}: {}", path.display(), err))
    })?;
    load_moves_from_str(&content)
}

/// The attack a confused creature turns on itself: typeless, so it is always
/// neutral, and it never misses.
pub fn hit_itself() -> MoveData {
    MoveData {
        id: 0,
        name: "Hit Itself".to_string(),
        move_type: PokemonType::Typeless,
        category: MoveCategory::Physical,
        power: 40,
        accuracy: 100,
        pp: 0,
        max_pp: 0, // Not a real move, no PP
        effects: vec![],
    }
}

pub const STRUGGLE_ID: u16 = 165;

/// Fallback move with half the damage dealt as recoil.
pub fn struggle() -> MoveData {
    MoveData {
        id: STRUGGLE_ID,
        name: "Struggle".to_string(),
        move_type: PokemonType::Typeless,
        category: MoveCategory::Physical,
        power: 50,
        accuracy: 100,
        pp: 0,
        max_pp: 0,
        effects: vec![MoveEffect::Recoil(2)],
    }
}

fn normalize_move_name(name: &str) -> String {
    name.to_uppercase().replace([' ', '-', '_'], "")
}
