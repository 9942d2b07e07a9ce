use actix_web::web;

use super::handlers;

/// Configures the API routes
///
/// # Arguments
///
/// * `cfg` - The service configuration
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/blockchain", web::get().to(handlers::get_blockchain))
        .route("/transaction", web::post().to(handlers::new_transaction))
        .route("/transaction/broadcast", web::post().to(handlers::broadcast_transaction))
        .route("/transaction/{id}", web::get().to(handlers::get_transaction))
        .route("/mine", web::get().to(handlers::mine_block))
        .route("/receive-new-block", web::post().to(handlers::receive_new_block))
        .route("/register-and-broadcast-node", web::post().to(handlers::register_and_broadcast_node))
        .route("/register-node", web::post().to(handlers::register_node))
        .route("/register-nodes-bulk", web::post().to(handlers::register_nodes_bulk))
        .route("/consensus", web::get().to(handlers::consensus))
        .route("/block/{hash}", web::get().to(handlers::get_block))
        .route("/address/{address}", web::get().to(handlers::get_address));
}
