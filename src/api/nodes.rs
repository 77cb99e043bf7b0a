use actix_web::{HttpResponse, Responder, get, post, web};
use log::{debug, info};

use super::models::{AppState, RegisterNodesRequest, RegisterNodesResponse, ResolveResponse};
use crate::consensus;

/// Register peer addresses. Idempotent: re-registering a known address is a
/// no-op. Addresses are stored verbatim, without normalization.
#[post("/nodes/register/")]
pub async fn register_nodes(
    state: web::Data<AppState>,
    body: web::Json<RegisterNodesRequest>,
) -> impl Responder {
    if body.nodes.is_empty() {
        return HttpResponse::BadRequest().body("nodes list required");
    }

    let total_nodes = {
        let mut bc = state.blockchain.lock().expect("mutex poisoned");
        for node in &body.nodes {
            if bc.register_peer(node.clone()) {
                debug!("NODES - registered peer {node}");
            }
        }
        let mut all: Vec<String> = bc.peers().iter().cloned().collect();
        all.sort();
        all
    };
    info!("NODES - peer set now has {} entries", total_nodes.len());

    HttpResponse::Created().json(RegisterNodesResponse {
        message: "New nodes have been added".to_string(),
        total_nodes,
    })
}

/// Run longest-valid-chain conflict resolution against all known peers.
/// Peer fetches happen with the write lock released.
#[get("/nodes/resolve/")]
pub async fn resolve_conflicts(state: web::Data<AppState>) -> impl Responder {
    let replaced = consensus::resolve_conflicts(&state.blockchain, &state.fetcher).await;

    let (chain, length) = {
        let bc = state.blockchain.lock().expect("mutex poisoned");
        bc.snapshot()
    };
    let message = if replaced {
        "Our chain was replaced"
    } else {
        "Our chain is authoritative"
    };

    HttpResponse::Ok().json(ResolveResponse {
        message: message.to_string(),
        replaced,
        chain,
        length,
    })
}
