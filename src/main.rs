use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use anyhow::Context;
use clap::Parser;
use log::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use std::sync::Arc;

mod api;
mod blockchain;
mod config;
mod network;

use blockchain::storage::SnapshotStore;
use config::NodeConfig;
use network::{HttpTransport, Node};

// Build the node, resuming from the chain snapshot when one is usable
fn initialize_node(config: &NodeConfig) -> anyhow::Result<Node> {
    let settings = config.node_settings();
    let transport = HttpTransport::new(settings.peer_timeout)
        .context("Failed to build peer HTTP client")?;

    info!("Node {} rewards address {}", settings.node_url, settings.node_address);
    let node = Node::new(settings, Arc::new(transport));

    match SnapshotStore::new(&config.data_dir) {
        Ok(store) => Ok(node.with_store(store)),
        Err(err) => {
            warn!("Failed to open data directory {}: {}", config.data_dir.display(), err);
            warn!("Running without chain snapshots");
            Ok(node)
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        api::handlers::get_blockchain,
        api::handlers::new_transaction,
        api::handlers::broadcast_transaction,
        api::handlers::mine_block,
        api::handlers::receive_new_block,
        api::handlers::register_and_broadcast_node,
        api::handlers::register_node,
        api::handlers::register_nodes_bulk,
        api::handlers::consensus,
        api::handlers::get_block,
        api::handlers::get_transaction,
        api::handlers::get_address
    ),
    components(
        schemas(
            blockchain::Block,
            blockchain::Transaction,
            blockchain::Address,
            network::PeerOutcome,
            api::schema::TransactionRequest,
            api::schema::NoteResponse,
            api::schema::BroadcastTransactionResponse,
            api::schema::MineResponse,
            api::schema::ReceiveBlockRequest,
            api::schema::ReceiveBlockResponse,
            api::schema::RegisterNodeRequest,
            api::schema::RegisterBulkRequest,
            api::schema::RegisterBroadcastResponse,
            api::schema::ChainSnapshot,
            api::schema::ConsensusResponse,
            api::schema::BlockResponse,
            api::schema::TransactionLookupResponse,
            api::schema::AddressDataResponse,
            api::schema::AddressResponse
        )
    ),
    tags(
        (name = "ledger", description = "Ledger node endpoints")
    ),
    info(
        title = "Ledger Node API",
        version = "1.0.0",
        description = "A replicated proof-of-work ledger node",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
struct ApiDoc;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = NodeConfig::parse();
    let node = web::Data::new(initialize_node(&config)?);

    info!("Starting HTTP server at {}", node.settings().node_url);

    // Start HTTP server
    HttpServer::new(move || {
        // Configure CORS
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        // Configure OpenAPI documentation
        let openapi = ApiDoc::openapi();

        App::new()
            .wrap(middleware::Logger::default())
            .wrap(cors)
            .app_data(node.clone())
            .configure(api::configure_routes)
            // Swagger UI
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone())
            )
    })
    .bind((config.host.as_str(), config.port))
    .with_context(|| format!("Failed to bind {}:{}", config.host, config.port))?
    .run()
    .await?;

    Ok(())
}
