use actix_web::web;
use actix_web::HttpResponse;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use crate::store::DocumentStore;
use crate::store::BANKING_DETAILS;

/// `POST /api/userBankingDetails` body. `expiry` and `cvv` are accepted so
/// the storefront's checkout form can submit unchanged, but they are dropped
/// on the floor: neither may be persisted.
#[derive(Deserialize)]
pub struct BankingDetails {
    email: String,
    method: String,
    #[serde(rename = "cardNumber")]
    card_number: Option<String>,
    #[allow(dead_code)]
    expiry: Option<String>,
    #[allow(dead_code)]
    cvv: Option<String>,
    #[serde(rename = "accountNumber")]
    account_number: Option<String>,
    #[serde(rename = "bankName")]
    bank_name: Option<String>,
}

/// `POST /api/userBankingDetails`
#[tracing::instrument(name = "Saving banking details", skip(body, store))]
pub async fn save_banking_details(
    body: web::Json<BankingDetails>,
    store: web::Data<dyn DocumentStore>,
) -> HttpResponse {
    let details = body.into_inner();
    let document = json!({
        "email": details.email,
        "method": details.method,
        "cardNumber": details.card_number,
        "accountNumber": details.account_number,
        "bankName": details.bank_name,
        "createdAt": Utc::now().to_rfc3339(),
    });

    match store.insert_one(BANKING_DETAILS, document).await {
        Ok(_) => HttpResponse::Created().json(json!({ "message": "Banking details saved" })),
        Err(e) => {
            tracing::error!(error.cause_chain = ?e, "could not save banking details");
            HttpResponse::InternalServerError()
                .json(json!({ "error": "Failed to save banking details" }))
        }
    }
}
