use actix_web::{HttpResponse, Responder, get, web};

use super::models::{AppState, ChainResponse, ValidateResponse};
use crate::blockchain::valid_chain;

/// Get the full chain plus its length, from a consistent snapshot.
#[get("/chain/")]
pub async fn get_chain(state: web::Data<AppState>) -> impl Responder {
    let (chain, length) = {
        let bc = state.blockchain.lock().expect("mutex poisoned");
        bc.snapshot()
    };
    HttpResponse::Ok().json(ChainResponse { chain, length })
}

/// Validate the local chain's linkage and proofs.
#[get("/validate/")]
pub async fn validate_chain(state: web::Data<AppState>) -> impl Responder {
    let (chain, length) = {
        let bc = state.blockchain.lock().expect("mutex poisoned");
        bc.snapshot()
    };
    HttpResponse::Ok().json(ValidateResponse {
        valid: valid_chain(&chain),
        length,
    })
}
