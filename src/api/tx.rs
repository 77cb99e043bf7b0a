use actix_web::{HttpResponse, Responder, post, web};
use log::{debug, info};

use super::models::{AppState, NewTransactionRequest, NewTransactionResponse};

/// Submit a new transaction into the pending pool.
/// The JSON body is strongly typed; a shape mismatch is a 400, never a crash.
#[post("/transactions/new/")]
pub async fn post_transaction(
    state: web::Data<AppState>,
    body: web::Json<NewTransactionRequest>,
) -> impl Responder {
    if body.sender.is_empty() || body.recipient.is_empty() {
        return HttpResponse::BadRequest().body("sender and recipient required");
    }

    let index = {
        let mut bc = state.blockchain.lock().expect("mutex poisoned");
        bc.new_transaction(body.sender.clone(), body.recipient.clone(), body.amount)
    };
    debug!(
        "POST /transactions/new/ - {} -> {} ({}) queued for block {}",
        body.sender, body.recipient, body.amount, index
    );
    info!("TX - accepted, will be included in block {index}");

    HttpResponse::Created().json(NewTransactionResponse {
        message: format!("Transaction will be added to block {index}"),
        index,
    })
}
