use axum::{
    Json, Router, debug_handler,
    extract::{Path, Query, State},
    routing::get,
};
use pokedex_service::{
    Config, LoadFailure, PokeApiClient, PokemonDetail, PokemonSummary, detail, list,
    lookup::{self, TypeInfo},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

struct AppState {
    client: PokeApiClient,
    config: Config,
}

#[derive(Debug, Deserialize)]
struct ListParams {
    limit: Option<u32>,
    search: Option<String>,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        // axum logs rejections from built-in extractors with the `axum::rejection`
        // target, at `TRACE` level. `axum::rejection=trace` enables showing those events
        format!(
            "{}=debug,tower_http=debug,axum::rejection=trace",
            env!("CARGO_CRATE_NAME")
        )
        .into()
    })
}

fn init_tracing() {
    let registry = tracing_subscriber::registry().with(env_filter());
    if std::env::var("LOG_FORMAT").is_ok_and(|format| format == "json") {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() {
    init_tracing();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let client = match PokeApiClient::new(&config.pokemon) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Failed to create API client: {}", e);
            std::process::exit(1);
        }
    };

    let bind = config.server.bind.clone();
    let app_state = Arc::new(AppState { client, config });

    let app = Router::new()
        .route("/pokemon", get(list_pokemon_handler))
        .route("/pokemon/{id}", get(get_pokemon_handler))
        .route("/random", get(get_random_pokemon_handler))
        .route("/types", get(list_types_handler))
        .with_state(app_state);

    let listener = match tokio::net::TcpListener::bind(&bind).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind to address {}: {}", bind, e);
            std::process::exit(1);
        }
    };

    match listener.local_addr() {
        Ok(addr) => tracing::info!("listening on {}", addr),
        Err(_) => tracing::info!("listening on {}", bind),
    }

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

#[debug_handler]
async fn list_pokemon_handler(
    State(app_state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<PokemonSummary>>, LoadFailure> {
    let limit = params.limit.unwrap_or(app_state.config.pokemon.page_size);
    tracing::debug!("Loading list with limit {}", limit);

    let all = list::aggregate(&app_state.client, &app_state.config.pokemon.api_url, limit)
        .await
        .map_err(LoadFailure::ListLoadFailed)?;

    let query = params.search.unwrap_or_default();
    let filtered = list::filter(&all, &query);
    tracing::debug!("Search {:?} matched {} of {}", query, filtered.len(), all.len());

    Ok(Json(filtered))
}

#[debug_handler]
async fn get_pokemon_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<u32>,
) -> Result<Json<PokemonDetail>, LoadFailure> {
    load_detail(&app_state, id).await.map(Json)
}

#[debug_handler]
async fn get_random_pokemon_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<PokemonDetail>, LoadFailure> {
    let max_id = app_state.config.pokemon.max_id.max(1);
    let random_pokemon: u32 = rand::random_range(1..=max_id);
    tracing::debug!("Picked random Pokémon ID: {}", random_pokemon);

    load_detail(&app_state, random_pokemon).await.map(Json)
}

async fn list_types_handler() -> Json<Vec<TypeInfo>> {
    Json(lookup::type_table())
}

async fn load_detail(app_state: &AppState, id: u32) -> Result<PokemonDetail, LoadFailure> {
    let resolved = detail::resolve(
        &app_state.client,
        &app_state.config.pokemon.api_url,
        &app_state.config.cdn,
        id,
    )
    .await
    .map_err(LoadFailure::DetailLoadFailed)?;

    tracing::debug!("Successfully resolved Pokémon ID: {}", id);
    Ok(resolved)
}
