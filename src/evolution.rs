use crate::error::AppError;
use crate::pokemon::ChainLink;
use crate::summary::EvolutionNode;

/// Extracts the numeric id from a resource URL such as
/// `https://pokeapi.co/api/v2/pokemon-species/5/`.
pub fn species_id_from_url(url: &str) -> Result<u32, AppError> {
    let segment = url
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::InvalidReference(format!("no id segment in {}", url)))?;

    segment
        .parse::<u32>()
        .map_err(|_| AppError::InvalidReference(format!("non-numeric id segment in {}", url)))
}

pub fn artwork_url(template: &str, id: u32) -> String {
    template.replace("{id}", &id.to_string())
}

/// Flattens the chain in pre-order: root first, then each child's whole
/// subtree in source order before the next sibling.
pub fn flatten_chain(
    chain: &ChainLink,
    artwork_template: &str,
) -> Result<Vec<EvolutionNode>, AppError> {
    let mut nodes = Vec::new();
    visit(chain, artwork_template, &mut nodes)?;
    Ok(nodes)
}

fn visit(
    link: &ChainLink,
    artwork_template: &str,
    nodes: &mut Vec<EvolutionNode>,
) -> Result<(), AppError> {
    let id = species_id_from_url(&link.species.url)?;
    nodes.push(EvolutionNode {
        id,
        name: link.species.name.clone(),
        image_url: Some(artwork_url(artwork_template, id)),
    });

    for child in &link.evolves_to {
        visit(child, artwork_template, nodes)?;
    }
    Ok(())
}
