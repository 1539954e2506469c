use crate::pokemon::Pokemon;

/// Picks the cry audio URL for a record: the embedded `latest` cry, then the
/// embedded `legacy` one, then the CDN template filled with the record id.
/// The templated URL is not checked for existence.
pub fn resolve_cry_url(pokemon: &Pokemon, cry_template: &str) -> String {
    let embedded = pokemon.cries.as_ref().and_then(|cries| {
        [cries.latest.as_deref(), cries.legacy.as_deref()]
            .into_iter()
            .flatten()
            .find(|url| !url.is_empty())
    });

    match embedded {
        Some(url) => url.to_string(),
        None => {
            tracing::debug!("No embedded cry for {}, using CDN fallback", pokemon.name);
            cry_template.replace("{id}", &pokemon.id.to_string())
        }
    }
}
