use actix_web::{HttpResponse, Responder, get, web};
use log::{info, warn};

use super::models::{AppState, MineResponse};
use crate::blockchain::{MINING_REWARD, proof_of_work};
use crate::transaction::Transaction;

/// Mine one block: run the Proof-of-Work search against the tail block's
/// proof, credit the reward to this node, and append a block consuming the
/// pending pool.
///
/// The search runs with the write lock released; only the tail read and the
/// final append hold it. If another block lands in between, ours still links
/// to the new tail via its hash (first-come-first-served base semantics).
#[get("/mine/")]
pub async fn mine(state: web::Data<AppState>) -> impl Responder {
    let last_proof = {
        let bc = state.blockchain.lock().expect("mutex poisoned");
        bc.last_block().proof
    };

    // CPU-bound search, kept off the actix worker thread.
    let proof = match web::block(move || proof_of_work(last_proof)).await {
        Ok(Ok(proof)) => proof,
        Ok(Err(err)) => {
            warn!("MINER - search gave up: {err}");
            return HttpResponse::ServiceUnavailable().body(err.to_string());
        }
        Err(err) => {
            warn!("MINER - search task failed: {err}");
            return HttpResponse::InternalServerError().body("mining task failed");
        }
    };

    let block = {
        let mut bc = state.blockchain.lock().expect("mutex poisoned");
        bc.push_transaction(Transaction::reward(state.node_id.clone(), MINING_REWARD));
        bc.new_block(proof, None).clone()
    };
    info!(
        "MINER - sealed block #{} (proof={}, txs={})",
        block.index,
        block.proof,
        block.transactions.len()
    );

    HttpResponse::Ok().json(MineResponse {
        message: "New block forged".to_string(),
        index: block.index,
        transactions: block.transactions,
        proof: block.proof,
        previous_hash: block.previous_hash,
    })
}
