use crate::api::Fetch;
use crate::config::CdnConfig;
use crate::cry::resolve_cry_url;
use crate::error::AppError;
use crate::evolution::flatten_chain;
use crate::pokemon::{EvolutionChain, Pokemon, PokemonSpecies};
use crate::summary::{PokemonDetail, PokemonSummary};

/// Resolves everything the detail view needs for one Pokémon.
///
/// The record, its species and the species' evolution chain are fetched one
/// after another; the chain address is only known once the species arrives.
/// Any failure aborts the whole resolution.
pub async fn resolve<F: Fetch>(
    fetcher: &F,
    api_url: &str,
    cdn: &CdnConfig,
    id: u32,
) -> Result<PokemonDetail, AppError> {
    let pokemon: Pokemon = fetcher
        .get_json(&format!("{}/pokemon/{}", api_url, id))
        .await?;

    let species: PokemonSpecies = fetcher
        .get_json(&format!("{}/pokemon-species/{}", api_url, id))
        .await?;

    let chain_url = species.evolution_chain.as_ref().ok_or_else(|| {
        AppError::InvalidReference(format!("species {} has no evolution chain", species.name))
    })?;
    let chain: EvolutionChain = fetcher.get_json(&chain_url.url).await?;

    let evolution = flatten_chain(&chain.chain, &cdn.artwork_template)?;
    let cry_url = resolve_cry_url(&pokemon, &cdn.cry_template);

    tracing::debug!(
        "Resolved {} (ID: {}) with {} evolution stages",
        pokemon.name,
        pokemon.id,
        evolution.len()
    );

    Ok(PokemonDetail {
        pokemon: PokemonSummary::from(&pokemon),
        evolution,
        cry_url,
    })
}
