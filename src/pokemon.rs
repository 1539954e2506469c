// pokemon.rs
// Wire records returned by the remote Pokémon API. Fields the service does
// not use are left out and ignored by serde.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct NamedApiResource {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ApiResource {
    pub url: String,
}

/// One page of the `/pokemon` index.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PokemonPage {
    pub count: u32,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<NamedApiResource>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Pokemon {
    pub id: u32,
    pub name: String,
    pub height: u32,
    pub weight: u32,
    #[serde(default)]
    pub sprites: Sprites,
    #[serde(default)]
    pub types: Vec<PokemonType>,
    #[serde(default)]
    pub moves: Vec<PokemonMove>,
    #[serde(default)]
    pub stats: Vec<PokemonStat>,
    pub species: Option<NamedApiResource>,
    pub cries: Option<Cries>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Sprites {
    pub front_default: Option<String>,
    pub other: Option<OtherSprites>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct OtherSprites {
    #[serde(rename = "official-artwork")]
    pub official_artwork: Option<ArtworkSprites>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ArtworkSprites {
    pub front_default: Option<String>,
}

impl Sprites {
    pub fn official_artwork(&self) -> Option<&str> {
        self.other
            .as_ref()
            .and_then(|other| other.official_artwork.as_ref())
            .and_then(|artwork| artwork.front_default.as_deref())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PokemonType {
    pub slot: u32,
    pub r#type: NamedApiResource,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PokemonMove {
    pub r#move: NamedApiResource,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PokemonStat {
    pub base_stat: u32,
    pub effort: u32,
    pub stat: NamedApiResource,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Cries {
    pub latest: Option<String>,
    pub legacy: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PokemonSpecies {
    pub id: u32,
    pub name: String,
    pub evolution_chain: Option<ApiResource>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EvolutionChain {
    pub id: u32,
    pub chain: ChainLink,
}

/// A node of the evolution tree. The API guarantees it is finite and acyclic.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChainLink {
    pub species: NamedApiResource,
    #[serde(default)]
    pub evolves_to: Vec<ChainLink>,
}
