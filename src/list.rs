use futures::future::try_join_all;

use crate::api::Fetch;
use crate::error::AppError;
use crate::pokemon::{Pokemon, PokemonPage};
use crate::summary::PokemonSummary;

/// Fetches the first `limit` entries of the index, then every referenced
/// record concurrently. The first failed request fails the whole list.
/// Results keep the index order.
pub async fn aggregate<F: Fetch>(
    fetcher: &F,
    api_url: &str,
    limit: u32,
) -> Result<Vec<PokemonSummary>, AppError> {
    let index_url = format!("{}/pokemon?limit={}", api_url, limit);
    let page: PokemonPage = fetcher.get_json(&index_url).await?;
    tracing::debug!(
        "Index returned {} of {} references",
        page.results.len(),
        page.count
    );

    let records = try_join_all(
        page.results
            .iter()
            .map(|reference| fetcher.get_json::<Pokemon>(&reference.url)),
    )
    .await?;

    tracing::info!("Aggregated {} Pokémon", records.len());
    Ok(records.iter().map(PokemonSummary::from).collect())
}

/// Entities whose name contains `query`, ignoring case. An empty query keeps
/// everything.
pub fn filter(list: &[PokemonSummary], query: &str) -> Vec<PokemonSummary> {
    if query.is_empty() {
        return list.to_vec();
    }

    let needle = query.to_lowercase();
    list.iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::stub::StubFetcher;
    use serde::de::DeserializeOwned;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::sync::Barrier;

    const API: &str = "https://api.test/v2";

    fn record(id: u32, name: &str, type_name: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": name,
            "height": 7,
            "weight": 69,
            "sprites": { "front_default": format!("https://cdn.test/{}.png", id) },
            "types": [{ "slot": 1, "type": { "name": type_name, "url": "" } }],
            "moves": [],
            "stats": [],
            "species": { "name": name, "url": format!("{}/pokemon-species/{}/", API, id) },
            "cries": null
        })
    }

    fn index(names: &[(u32, &str)]) -> serde_json::Value {
        json!({
            "count": 1302,
            "next": null,
            "previous": null,
            "results": names
                .iter()
                .map(|(id, name)| {
                    json!({ "name": name, "url": format!("{}/pokemon/{}/", API, id) })
                })
                .collect::<Vec<_>>()
        })
    }

    fn starter_documents() -> HashMap<String, serde_json::Value> {
        HashMap::from([
            (
                format!("{}/pokemon?limit=3", API),
                index(&[(1, "bulbasaur"), (4, "charmander"), (7, "squirtle")]),
            ),
            (format!("{}/pokemon/1/", API), record(1, "bulbasaur", "grass")),
            (format!("{}/pokemon/4/", API), record(4, "charmander", "fire")),
            (format!("{}/pokemon/7/", API), record(7, "squirtle", "water")),
        ])
    }

    fn lookup<T: DeserializeOwned>(
        documents: &HashMap<String, serde_json::Value>,
        url: &str,
    ) -> Result<T, AppError> {
        let body = documents
            .get(url)
            .cloned()
            .ok_or_else(|| AppError::NetworkError(format!("404 Not Found: {}", url)))?;
        serde_json::from_value(body).map_err(|e| AppError::ParseError(e.to_string()))
    }

    /// Holds every record request until `expected` of them are waiting at once,
    /// and remembers the most requests it saw in flight together.
    struct GatedFetcher {
        documents: HashMap<String, serde_json::Value>,
        gate: Barrier,
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    impl GatedFetcher {
        fn new(documents: HashMap<String, serde_json::Value>, expected: usize) -> Self {
            Self {
                documents,
                gate: Barrier::new(expected),
                in_flight: AtomicUsize::new(0),
                peak: AtomicUsize::new(0),
            }
        }
    }

    impl Fetch for GatedFetcher {
        async fn get_json<T>(&self, url: &str) -> Result<T, AppError>
        where
            T: DeserializeOwned + Send,
        {
            // Only record requests are gated; the `?limit=` index answers at once.
            if !url.contains('?') {
                let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                self.peak.fetch_max(now, Ordering::SeqCst);
                self.gate.wait().await;
                self.in_flight.fetch_sub(1, Ordering::SeqCst);
            }
            lookup(&self.documents, url)
        }
    }

    /// Never answers requests for `hung_url`.
    struct HangingFetcher {
        documents: HashMap<String, serde_json::Value>,
        hung_url: String,
    }

    impl Fetch for HangingFetcher {
        async fn get_json<T>(&self, url: &str) -> Result<T, AppError>
        where
            T: DeserializeOwned + Send,
        {
            if url == self.hung_url {
                std::future::pending::<()>().await;
            }
            lookup(&self.documents, url)
        }
    }

    fn summary(id: u32, name: &str) -> PokemonSummary {
        PokemonSummary {
            id,
            name: name.to_string(),
            image_url: None,
            fallback_image_url: None,
            types: Vec::new(),
            height: 0,
            weight: 0,
            moves: Vec::new(),
            stats: Vec::new(),
        }
    }

    fn names(list: &[PokemonSummary]) -> Vec<&str> {
        list.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_filter_by_substring() {
        let list = vec![summary(1, "bulbasaur"), summary(4, "charmander")];

        assert_eq!(names(&filter(&list, "char")), vec!["charmander"]);
        assert_eq!(names(&filter(&list, "saur")), vec!["bulbasaur"]);
        assert!(filter(&list, "pika").is_empty());
    }

    #[test]
    fn test_filter_empty_query_keeps_everything() {
        let list = vec![summary(1, "bulbasaur"), summary(4, "charmander")];

        assert_eq!(filter(&list, ""), list);
    }

    #[test]
    fn test_filter_ignores_case() {
        let list = vec![summary(1, "bulbasaur"), summary(4, "charmander")];

        assert_eq!(filter(&list, "CHAR"), filter(&list, "char"));
        assert_eq!(names(&filter(&list, "ChArM")), vec!["charmander"]);
    }

    #[tokio::test]
    async fn test_aggregate_keeps_index_order() {
        let fetcher = StubFetcher::default()
            .with(
                &format!("{}/pokemon?limit=3", API),
                index(&[(1, "bulbasaur"), (4, "charmander"), (7, "squirtle")]),
            )
            .with(&format!("{}/pokemon/1/", API), record(1, "bulbasaur", "grass"))
            .with(&format!("{}/pokemon/4/", API), record(4, "charmander", "fire"))
            .with(&format!("{}/pokemon/7/", API), record(7, "squirtle", "water"));

        let list = aggregate(&fetcher, API, 3).await.unwrap();

        assert_eq!(names(&list), vec!["bulbasaur", "charmander", "squirtle"]);
        assert_eq!(list[1].types[0].display_name, "Fuego");
        assert_eq!(list[1].types[0].color, "#F08030");
        assert_eq!(fetcher.calls().len(), 4);
    }

    #[tokio::test]
    async fn test_aggregate_single_failure_fails_all() {
        let fetcher = StubFetcher::default()
            .with(
                &format!("{}/pokemon?limit=3", API),
                index(&[(1, "bulbasaur"), (4, "charmander"), (7, "squirtle")]),
            )
            .with(&format!("{}/pokemon/1/", API), record(1, "bulbasaur", "grass"))
            .with(&format!("{}/pokemon/7/", API), record(7, "squirtle", "water"));

        let result = aggregate(&fetcher, API, 3).await;

        assert!(matches!(result, Err(AppError::NetworkError(_))));
    }

    #[tokio::test]
    async fn test_aggregate_fetches_records_concurrently() {
        let fetcher = GatedFetcher::new(starter_documents(), 3);

        let result = tokio::time::timeout(Duration::from_secs(5), aggregate(&fetcher, API, 3))
            .await
            .expect("record requests were not in flight together");

        assert_eq!(
            names(&result.unwrap()),
            vec!["bulbasaur", "charmander", "squirtle"]
        );
        assert_eq!(fetcher.peak.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_aggregate_first_failure_does_not_wait_for_siblings() {
        let mut documents = starter_documents();
        documents.remove(&format!("{}/pokemon/4/", API));
        let fetcher = HangingFetcher {
            documents,
            hung_url: format!("{}/pokemon/1/", API),
        };

        let result =
            tokio::time::timeout(Duration::from_secs(5), aggregate(&fetcher, API, 3)).await;

        assert!(matches!(result, Ok(Err(AppError::NetworkError(_)))));
    }

    #[tokio::test]
    async fn test_aggregate_index_failure() {
        let fetcher = StubFetcher::default();

        assert!(aggregate(&fetcher, API, 20).await.is_err());
        assert_eq!(fetcher.calls(), vec![format!("{}/pokemon?limit=20", API)]);
    }

    #[tokio::test]
    async fn test_aggregate_empty_index() {
        let fetcher =
            StubFetcher::default().with(&format!("{}/pokemon?limit=0", API), index(&[]));

        assert!(aggregate(&fetcher, API, 0).await.unwrap().is_empty());
    }
}
