//! Static display tables for Pokémon types.
//!
//! Both tables cover every identifier in [`KNOWN_TYPES`]. Anything else falls
//! back to the capitalized identifier and [`FALLBACK_COLOR`].

use serde::Serialize;

pub const FALLBACK_COLOR: &str = "#68A090";

pub const KNOWN_TYPES: [&str; 18] = [
    "normal", "fire", "water", "grass", "electric", "ice", "fighting", "poison", "ground",
    "flying", "psychic", "bug", "rock", "ghost", "dragon", "dark", "steel", "fairy",
];

/// Localized (Spanish) name for a type identifier.
pub fn type_display_name(type_name: &str) -> String {
    let known = match type_name {
        "normal" => "Normal",
        "fire" => "Fuego",
        "water" => "Agua",
        "grass" => "Planta",
        "electric" => "Eléctrico",
        "ice" => "Hielo",
        "fighting" => "Lucha",
        "poison" => "Veneno",
        "ground" => "Tierra",
        "flying" => "Volador",
        "psychic" => "Psíquico",
        "bug" => "Bicho",
        "rock" => "Roca",
        "ghost" => "Fantasma",
        "dragon" => "Dragón",
        "dark" => "Siniestro",
        "steel" => "Acero",
        "fairy" => "Hada",
        other => return capitalize(other),
    };
    known.to_string()
}

pub fn type_color(type_name: &str) -> &'static str {
    match type_name {
        "normal" => "#A8A878",
        "fire" => "#F08030",
        "water" => "#6890F0",
        "grass" => "#78C850",
        "electric" => "#F8D030",
        "ice" => "#98D8D8",
        "fighting" => "#C03028",
        "poison" => "#A040A0",
        "ground" => "#E0C068",
        "flying" => "#A890F0",
        "psychic" => "#F85888",
        "bug" => "#A8B820",
        "rock" => "#B8A038",
        "ghost" => "#705898",
        "dragon" => "#7038F8",
        "dark" => "#705848",
        "steel" => "#B8B8D0",
        "fairy" => "#EE99AC",
        _ => FALLBACK_COLOR,
    }
}

fn capitalize(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// One row of the type table, as served by `/types`.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct TypeInfo {
    pub name: &'static str,
    pub display_name: String,
    pub color: &'static str,
}

pub fn type_table() -> Vec<TypeInfo> {
    KNOWN_TYPES
        .iter()
        .map(|&name| TypeInfo {
            name,
            display_name: type_display_name(name),
            color: type_color(name),
        })
        .collect()
}
