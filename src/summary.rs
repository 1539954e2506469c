use serde::Serialize;

use crate::lookup::{type_color, type_display_name};
use crate::pokemon::Pokemon;

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct TypeTag {
    pub slot: u32,
    pub name: String,
    pub display_name: String,
    pub color: &'static str,
}

impl TypeTag {
    pub fn new(slot: u32, name: &str) -> Self {
        Self {
            slot,
            name: name.to_string(),
            display_name: type_display_name(name),
            color: type_color(name),
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct StatValue {
    pub name: String,
    pub base_stat: u32,
}

/// Everything a list row or the header of the detail view shows.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct PokemonSummary {
    pub id: u32,
    pub name: String,
    pub image_url: Option<String>,
    pub fallback_image_url: Option<String>,
    pub types: Vec<TypeTag>,
    pub height: u32,
    pub weight: u32,
    pub moves: Vec<String>,
    pub stats: Vec<StatValue>,
}

impl From<&Pokemon> for PokemonSummary {
    fn from(pokemon: &Pokemon) -> Self {
        let mut types: Vec<TypeTag> = pokemon
            .types
            .iter()
            .map(|t| TypeTag::new(t.slot, &t.r#type.name))
            .collect();
        types.sort_by_key(|t| t.slot);

        Self {
            id: pokemon.id,
            name: pokemon.name.clone(),
            image_url: pokemon.sprites.official_artwork().map(str::to_string),
            fallback_image_url: pokemon.sprites.front_default.clone(),
            types,
            height: pokemon.height,
            weight: pokemon.weight,
            moves: pokemon.moves.iter().map(|m| m.r#move.name.clone()).collect(),
            stats: pokemon
                .stats
                .iter()
                .map(|s| StatValue {
                    name: s.stat.name.clone(),
                    base_stat: s.base_stat,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct EvolutionNode {
    pub id: u32,
    pub name: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct PokemonDetail {
    pub pokemon: PokemonSummary,
    pub evolution: Vec<EvolutionNode>,
    pub cry_url: String,
}
