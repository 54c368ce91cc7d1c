//! In-memory imitation of the Thunes money-transfer API.
//!
//! Serves fixed discovery data (services, payers, rates, countries, balances)
//! and keeps quotations, transactions and attachments in memory. Requests
//! must carry the configured basic-auth credentials. Failures answer with the
//! API's `{"errors":[{"code","message"}]}` envelope.

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

/// Fixed wholesale rate applied to every quotation.
const FX_RATE: f64 = 1.08;
const MAX_ATTACHMENTS: usize = 3;
const CREATION_DATE: &str = "2025-01-01T00:00:00Z";
const EXPIRATION_DATE: &str = "2025-01-01T01:00:00Z";

#[derive(Clone, Debug)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
}

impl Credentials {
    pub fn new(api_key: &str, api_secret: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            api_secret: api_secret.to_string(),
        }
    }

    fn header_value(&self) -> String {
        format!(
            "Basic {}",
            STANDARD.encode(format!("{}:{}", self.api_key, self.api_secret))
        )
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Service {
    pub id: i64,
    pub name: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct Payer {
    pub id: i64,
    pub name: String,
    pub precision: u32,
    pub increment: Decimal,
    pub currency: String,
    pub country_iso_code: String,
    pub minimum_transaction_amount: Option<Decimal>,
    pub maximum_transaction_amount: Option<Decimal>,
    pub service: Service,
    pub transaction_types: Value,
}

#[derive(Clone, Debug, Serialize)]
pub struct Country {
    pub iso_code: String,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Source {
    pub country_iso_code: String,
    pub currency: String,
    pub amount: Option<Decimal>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Money {
    pub currency: String,
    pub amount: Option<Decimal>,
}

#[derive(Clone, Debug, Serialize)]
pub struct Quotation {
    pub id: i64,
    pub external_id: String,
    pub payer: Payer,
    pub mode: String,
    pub transaction_type: String,
    pub source: Source,
    pub destination: Money,
    pub sent_amount: Money,
    pub wholesale_fx_rate: f64,
    pub fee: Money,
    pub creation_date: String,
    pub expiration_date: String,
}

#[derive(Deserialize)]
pub struct CreateQuotation {
    pub external_id: String,
    pub payer_id: String,
    pub mode: String,
    pub transaction_type: String,
    pub source: Source,
    pub destination: Money,
}

#[derive(Clone, Debug, Serialize)]
pub struct Transaction {
    pub id: i64,
    pub status: String,
    pub status_message: String,
    pub external_id: String,
    pub transaction_type: String,
    pub creation_date: String,
    pub expiration_date: String,
    pub credit_party_identifier: Value,
    pub source: Source,
    pub destination: Money,
    pub payer: Payer,
    pub sender: Option<Value>,
    pub beneficiary: Option<Value>,
    pub sending_business: Option<Value>,
    pub receiving_business: Option<Value>,
    pub callback_url: Option<String>,
    pub sent_amount: Money,
    pub wholesale_fx_rate: f64,
    pub fee: Money,
}

#[derive(Deserialize)]
pub struct CreateTransaction {
    pub credit_party_identifier: Value,
    pub external_id: String,
    pub sender: Option<Value>,
    pub beneficiary: Option<Value>,
    pub sending_business: Option<Value>,
    pub receiving_business: Option<Value>,
    pub callback_url: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct Attachment {
    pub id: i64,
    pub transaction_id: i64,
    pub name: String,
    pub content_type: String,
    #[serde(rename = "type")]
    pub attachment_type: String,
}

#[derive(Deserialize)]
pub struct CreditPartyBody {
    pub credit_party_identifier: Value,
}

#[derive(Deserialize, Default)]
pub struct PageQuery {
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

#[derive(Deserialize, Default)]
pub struct ServiceQuery {
    pub page: Option<usize>,
    pub per_page: Option<usize>,
    pub country_iso_code: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct PayerQuery {
    pub page: Option<usize>,
    pub per_page: Option<usize>,
    pub service_id: Option<i64>,
    pub country_iso_code: Option<String>,
    pub currency: Option<String>,
}

#[derive(Default)]
pub struct Store {
    quotations: Vec<Quotation>,
    transactions: Vec<Transaction>,
    attachments: Vec<Attachment>,
    last_id: i64,
}

impl Store {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }
}

#[derive(Clone)]
pub struct AppState {
    store: Arc<RwLock<Store>>,
    credentials: Arc<Credentials>,
}

/// Error answered in the API's envelope format.
#[derive(Debug)]
pub struct ApiFailure {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiFailure {
    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    fn not_found(what: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, "1000404", format!("{what} not found"))
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let body = json!({"errors": [{"code": self.code, "message": self.message}]});
        (self.status, Json(body)).into_response()
    }
}

pub fn app(credentials: Credentials) -> Router {
    let state = AppState {
        store: Arc::new(RwLock::new(Store::default())),
        credentials: Arc::new(credentials),
    };
    Router::new()
        .route("/ping", get(ping))
        .route("/v2/money-transfer/services", get(list_services))
        .route("/v2/money-transfer/payers", get(list_payers))
        .route("/v2/money-transfer/payers/{id}", get(get_payer))
        .route("/v2/money-transfer/payers/{id}/rates", get(get_payer_rates))
        .route(
            "/v2/money-transfer/payers/{id}/{transaction_type}/credit-party-information",
            post(credit_party_information),
        )
        .route(
            "/v2/money-transfer/payers/{id}/{transaction_type}/credit-party-verification",
            post(credit_party_verification),
        )
        .route("/v2/money-transfer/countries", get(list_countries))
        .route("/v2/money-transfer/lookups/BIC/{code}", get(lookup_bic))
        .route("/v2/money-transfer/balances", get(list_balances))
        .route("/v2/money-transfer/quotations", post(create_quotation))
        .route("/v2/money-transfer/quotations/{reference}", get(get_quotation))
        .route(
            "/v2/money-transfer/quotations/{reference}/transactions",
            post(create_transaction),
        )
        .route("/v2/money-transfer/transactions/{reference}", get(get_transaction))
        .route(
            "/v2/money-transfer/transactions/{reference}/confirm",
            post(confirm_transaction),
        )
        .route(
            "/v2/money-transfer/transactions/{reference}/cancel",
            post(cancel_transaction),
        )
        .route(
            "/v2/money-transfer/transactions/{reference}/attachments",
            get(list_attachments).post(add_attachment),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .fallback(unknown_route)
        .with_state(state)
}

pub async fn run(listener: TcpListener, credentials: Credentials) -> Result<(), std::io::Error> {
    axum::serve(listener, app(credentials)).await
}

async fn require_auth(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let expected = state.credentials.header_value();
    let given = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    if given != Some(expected.as_str()) {
        tracing::warn!(uri = %request.uri(), "rejected request with bad credentials");
        return ApiFailure::new(StatusCode::UNAUTHORIZED, "1000401", "Unauthorized").into_response();
    }
    next.run(request).await
}

async fn unknown_route() -> ApiFailure {
    ApiFailure::not_found("Resource")
}

// --- fixtures ---

fn mobile_wallet() -> Service {
    Service {
        id: 1,
        name: "MobileWallet".to_string(),
    }
}

fn bank_account() -> Service {
    Service {
        id: 2,
        name: "BankAccount".to_string(),
    }
}

fn cash_pickup() -> Service {
    Service {
        id: 3,
        name: "CashPickup".to_string(),
    }
}

fn rules(identifiers: &[&str]) -> Value {
    json!({
        "minimum_transaction_amount": "1.00",
        "maximum_transaction_amount": "5000.00",
        "credit_party_identifiers_accepted": [identifiers],
        "required_sending_entity_fields": [["firstname", "lastname"]],
        "required_receiving_entity_fields": [["firstname", "lastname"]],
        "required_documents": [],
        "credit_party_information": {"credit_party_identifiers_accepted": [identifiers]},
        "credit_party_verification": {
            "credit_party_identifiers_accepted": [identifiers],
            "required_receiving_entity_fields": []
        }
    })
}

pub fn payers() -> Vec<Payer> {
    vec![
        Payer {
            id: 1,
            name: "EcoCash Zimbabwe".to_string(),
            precision: 2,
            increment: Decimal::new(1, 2),
            currency: "USD".to_string(),
            country_iso_code: "ZWE".to_string(),
            minimum_transaction_amount: Some(Decimal::from(1)),
            maximum_transaction_amount: Some(Decimal::from(5000)),
            service: mobile_wallet(),
            transaction_types: json!({"C2C": rules(&["msisdn"]), "C2B": rules(&["msisdn"])}),
        },
        Payer {
            id: 2,
            name: "Barclays UK".to_string(),
            precision: 2,
            increment: Decimal::new(1, 2),
            currency: "GBP".to_string(),
            country_iso_code: "GBR".to_string(),
            minimum_transaction_amount: None,
            maximum_transaction_amount: None,
            service: bank_account(),
            transaction_types: json!({
                "B2B": rules(&["iban", "swift_bic_code"]),
                "B2C": rules(&["iban"])
            }),
        },
        Payer {
            id: 3,
            name: "Cash Pickup Philippines".to_string(),
            precision: 0,
            increment: Decimal::from(1),
            currency: "PHP".to_string(),
            country_iso_code: "PHL".to_string(),
            minimum_transaction_amount: None,
            maximum_transaction_amount: None,
            service: cash_pickup(),
            transaction_types: json!({"C2C": rules(&["msisdn"])}),
        },
    ]
}

fn countries() -> Vec<Country> {
    [("GBR", "United Kingdom"), ("PHL", "Philippines"), ("ZWE", "Zimbabwe")]
        .into_iter()
        .map(|(iso_code, name)| Country {
            iso_code: iso_code.to_string(),
            name: name.to_string(),
        })
        .collect()
}

fn paginate<T>(items: Vec<T>, page: Option<usize>, per_page: Option<usize>) -> Vec<T> {
    let per_page = per_page.unwrap_or(50).clamp(1, 100);
    let page = page.unwrap_or(1).max(1);
    items
        .into_iter()
        .skip((page - 1).saturating_mul(per_page))
        .take(per_page)
        .collect()
}

fn find_payer(id: i64) -> Result<Payer, ApiFailure> {
    payers()
        .into_iter()
        .find(|p| p.id == id)
        .ok_or_else(|| ApiFailure::not_found("Payer"))
}

fn is_business_receiver(transaction_type: &str) -> Result<bool, ApiFailure> {
    match transaction_type {
        "C2C" | "B2C" => Ok(false),
        "C2B" | "B2B" => Ok(true),
        other => Err(ApiFailure::new(
            StatusCode::BAD_REQUEST,
            "1000400",
            format!("Invalid transaction type {other}"),
        )),
    }
}

/// Resolves `42` or `ext-<external id>` against a collection.
fn matches_reference(reference: &str, id: i64, external_id: &str) -> bool {
    match reference.strip_prefix("ext-") {
        Some(external) => external == external_id,
        None => reference.parse::<i64>().map(|r| r == id).unwrap_or(false),
    }
}

// --- discovery ---

async fn ping() -> Json<Value> {
    Json(json!({"status": "up"}))
}

async fn list_services(Query(query): Query<ServiceQuery>) -> Json<Vec<Service>> {
    let mut services: Vec<Service> = Vec::new();
    for payer in payers() {
        let in_country = query
            .country_iso_code
            .as_ref()
            .map_or(true, |code| &payer.country_iso_code == code);
        if in_country && !services.iter().any(|s| s.id == payer.service.id) {
            services.push(payer.service);
        }
    }
    Json(paginate(services, query.page, query.per_page))
}

async fn list_payers(Query(query): Query<PayerQuery>) -> Json<Vec<Payer>> {
    let payers: Vec<Payer> = payers()
        .into_iter()
        .filter(|p| query.service_id.map_or(true, |id| p.service.id == id))
        .filter(|p| {
            query
                .country_iso_code
                .as_ref()
                .map_or(true, |code| &p.country_iso_code == code)
        })
        .filter(|p| query.currency.as_ref().map_or(true, |c| &p.currency == c))
        .collect();
    Json(paginate(payers, query.page, query.per_page))
}

async fn get_payer(Path(id): Path<i64>) -> Result<Json<Payer>, ApiFailure> {
    find_payer(id).map(Json)
}

async fn get_payer_rates(Path(id): Path<i64>) -> Result<Json<Value>, ApiFailure> {
    let payer = find_payer(id)?;
    Ok(Json(json!({
        "destination_currency": payer.currency,
        "rates": {
            "EUR": {
                payer.currency.clone(): [
                    {"source_amount_min": 0, "source_amount_max": 1000, "wholesale_fx_rate": FX_RATE},
                    {"source_amount_min": 1000.01, "source_amount_max": 5000, "wholesale_fx_rate": FX_RATE + 0.01}
                ]
            }
        }
    })))
}

async fn list_countries(Query(query): Query<PageQuery>) -> Json<Vec<Country>> {
    Json(paginate(countries(), query.page, query.per_page))
}

async fn lookup_bic(Path(code): Path<String>, Query(query): Query<PageQuery>) -> Json<Vec<Value>> {
    let found = match code.as_str() {
        "BARCGB22" => vec![json!({"id": 2, "name": "Barclays UK"})],
        _ => Vec::new(),
    };
    Json(paginate(found, query.page, query.per_page))
}

async fn list_balances(Query(query): Query<PageQuery>) -> Json<Vec<Value>> {
    let balances = vec![
        json!({"id": 1, "currency": "EUR", "balance": "1000.00", "pending": "50.00", "available": "950.00", "credit_facility": "0.00"}),
        json!({"id": 2, "currency": "USD", "balance": "200.00", "pending": "0.00", "available": "300.00", "credit_facility": "100.00"}),
    ];
    Json(paginate(balances, query.page, query.per_page))
}

// --- credit party ---

fn known_msisdn(body: &CreditPartyBody) -> bool {
    body.credit_party_identifier
        .get("msisdn")
        .and_then(Value::as_str)
        .is_some_and(|msisdn| msisdn.starts_with("+263"))
}

async fn credit_party_information(
    Path((id, transaction_type)): Path<(i64, String)>,
    Json(body): Json<CreditPartyBody>,
) -> Result<Json<Value>, ApiFailure> {
    find_payer(id)?;
    let business = is_business_receiver(&transaction_type)?;
    if !known_msisdn(&body) {
        return Err(ApiFailure::not_found("Credit party"));
    }
    let info = if business {
        json!({"registered_name": "Harare Traders Ltd", "country_iso_code": "ZWE"})
    } else {
        json!({"firstname": "Tendai", "lastname": "Moyo", "country_iso_code": "ZWE"})
    };
    Ok(Json(info))
}

async fn credit_party_verification(
    Path((id, transaction_type)): Path<(i64, String)>,
    Json(body): Json<CreditPartyBody>,
) -> Result<Json<Value>, ApiFailure> {
    find_payer(id)?;
    is_business_receiver(&transaction_type)?;
    let status = if known_msisdn(&body) {
        "AVAILABLE"
    } else {
        "UNAVAILABLE-INVALID-ACCOUNT"
    };
    Ok(Json(json!({"id": id, "account_status": status})))
}

// --- quotations ---

fn fx_rate() -> Decimal {
    Decimal::new(108, 2)
}

async fn create_quotation(
    State(state): State<AppState>,
    Json(input): Json<CreateQuotation>,
) -> Result<(StatusCode, Json<Quotation>), ApiFailure> {
    let bad_request = |message: &str| ApiFailure::new(StatusCode::BAD_REQUEST, "1003001", message);

    let payer_id = input
        .payer_id
        .parse::<i64>()
        .map_err(|_| bad_request("payer_id must be numeric"))?;
    let payer = find_payer(payer_id)?;
    is_business_receiver(&input.transaction_type)?;

    let (source_amount, destination_amount) =
        match (input.mode.as_str(), input.source.amount, input.destination.amount) {
            ("SOURCE_AMOUNT", Some(source), None) => (source, (source * fx_rate()).round_dp(2)),
            ("DESTINATION_AMOUNT", None, Some(destination)) => {
                ((destination / fx_rate()).round_dp(2), destination)
            }
            _ => return Err(bad_request("mode does not match the amount given")),
        };

    let mut store = state.store.write().await;
    if store
        .quotations
        .iter()
        .any(|q| q.external_id == input.external_id)
    {
        return Err(ApiFailure::new(
            StatusCode::CONFLICT,
            "1003003",
            "External ID already used",
        ));
    }

    let fee = Decimal::new(200, 2);
    let quotation = Quotation {
        id: store.next_id(),
        external_id: input.external_id,
        mode: input.mode,
        transaction_type: input.transaction_type,
        source: Source {
            amount: Some(source_amount),
            ..input.source.clone()
        },
        destination: Money {
            currency: payer.currency.clone(),
            amount: Some(destination_amount),
        },
        sent_amount: Money {
            currency: input.source.currency.clone(),
            amount: Some(source_amount + fee),
        },
        wholesale_fx_rate: FX_RATE,
        fee: Money {
            currency: input.source.currency,
            amount: Some(fee),
        },
        payer,
        creation_date: CREATION_DATE.to_string(),
        expiration_date: EXPIRATION_DATE.to_string(),
    };
    store.quotations.push(quotation.clone());
    tracing::info!(id = quotation.id, external_id = %quotation.external_id, "quotation created");
    Ok((StatusCode::CREATED, Json(quotation)))
}

async fn get_quotation(
    State(state): State<AppState>,
    Path(reference): Path<String>,
) -> Result<Json<Quotation>, ApiFailure> {
    let store = state.store.read().await;
    store
        .quotations
        .iter()
        .find(|q| matches_reference(&reference, q.id, &q.external_id))
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiFailure::not_found("Quotation"))
}

// --- transactions ---

async fn create_transaction(
    State(state): State<AppState>,
    Path(reference): Path<String>,
    Json(input): Json<CreateTransaction>,
) -> Result<(StatusCode, Json<Transaction>), ApiFailure> {
    let mut store = state.store.write().await;
    let quotation = store
        .quotations
        .iter()
        .find(|q| matches_reference(&reference, q.id, &q.external_id))
        .cloned()
        .ok_or_else(|| ApiFailure::not_found("Quotation"))?;
    if store
        .transactions
        .iter()
        .any(|t| t.external_id == input.external_id)
    {
        return Err(ApiFailure::new(
            StatusCode::CONFLICT,
            "1007003",
            "External ID already used",
        ));
    }

    let transaction = Transaction {
        id: store.next_id(),
        status: "10000".to_string(),
        status_message: "CREATED".to_string(),
        external_id: input.external_id,
        transaction_type: quotation.transaction_type,
        creation_date: CREATION_DATE.to_string(),
        expiration_date: EXPIRATION_DATE.to_string(),
        credit_party_identifier: input.credit_party_identifier,
        source: quotation.source,
        destination: quotation.destination,
        payer: quotation.payer,
        sender: input.sender,
        beneficiary: input.beneficiary,
        sending_business: input.sending_business,
        receiving_business: input.receiving_business,
        callback_url: input.callback_url,
        sent_amount: quotation.sent_amount,
        wholesale_fx_rate: quotation.wholesale_fx_rate,
        fee: quotation.fee,
    };
    store.transactions.push(transaction.clone());
    tracing::info!(id = transaction.id, external_id = %transaction.external_id, "transaction created");
    Ok((StatusCode::CREATED, Json(transaction)))
}

async fn get_transaction(
    State(state): State<AppState>,
    Path(reference): Path<String>,
) -> Result<Json<Transaction>, ApiFailure> {
    let store = state.store.read().await;
    store
        .transactions
        .iter()
        .find(|t| matches_reference(&reference, t.id, &t.external_id))
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiFailure::not_found("Transaction"))
}

async fn confirm_transaction(
    State(state): State<AppState>,
    Path(reference): Path<String>,
) -> Result<Json<Transaction>, ApiFailure> {
    let mut store = state.store.write().await;
    let transaction = store
        .transactions
        .iter_mut()
        .find(|t| matches_reference(&reference, t.id, &t.external_id))
        .ok_or_else(|| ApiFailure::not_found("Transaction"))?;
    if transaction.status_message != "CREATED" {
        return Err(ApiFailure::new(
            StatusCode::BAD_REQUEST,
            "1007013",
            "Transaction can not be confirmed",
        ));
    }
    let (status, message) = if transaction.payer.service.id == cash_pickup().id {
        ("20110", "CONFIRMED-WAITING-FOR-PICKUP")
    } else {
        ("20000", "CONFIRMED")
    };
    transaction.status = status.to_string();
    transaction.status_message = message.to_string();
    tracing::info!(id = transaction.id, status, "transaction confirmed");
    Ok(Json(transaction.clone()))
}

async fn cancel_transaction(
    State(state): State<AppState>,
    Path(reference): Path<String>,
) -> Result<Json<Transaction>, ApiFailure> {
    let mut store = state.store.write().await;
    let transaction = store
        .transactions
        .iter_mut()
        .find(|t| matches_reference(&reference, t.id, &t.external_id))
        .ok_or_else(|| ApiFailure::not_found("Transaction"))?;
    if transaction.status_message != "CONFIRMED-WAITING-FOR-PICKUP" {
        return Err(ApiFailure::new(
            StatusCode::BAD_REQUEST,
            "1007014",
            "Transaction can not be cancelled",
        ));
    }
    transaction.status = "90000".to_string();
    transaction.status_message = "CANCELLED".to_string();
    Ok(Json(transaction.clone()))
}

// --- attachments ---

async fn add_attachment(
    State(state): State<AppState>,
    Path(reference): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<Attachment>, ApiFailure> {
    let bad_request = |message: String| ApiFailure::new(StatusCode::BAD_REQUEST, "1007020", message);

    let mut attachment_type: Option<String> = None;
    let mut file: Option<(String, String)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(e.to_string()))?
    {
        match field.file_name().map(str::to_string) {
            Some(file_name) => {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                field.bytes().await.map_err(|e| bad_request(e.to_string()))?;
                file = Some((file_name, content_type));
            }
            None if field.name() == Some("type") => {
                attachment_type = Some(field.text().await.map_err(|e| bad_request(e.to_string()))?);
            }
            None => {}
        }
    }
    let attachment_type = attachment_type.ok_or_else(|| bad_request("type is required".into()))?;
    let (name, content_type) = file.ok_or_else(|| bad_request("file is required".into()))?;

    let mut store = state.store.write().await;
    let transaction_id = store
        .transactions
        .iter()
        .find(|t| matches_reference(&reference, t.id, &t.external_id))
        .map(|t| t.id)
        .ok_or_else(|| ApiFailure::not_found("Transaction"))?;
    let existing = store
        .attachments
        .iter()
        .filter(|a| a.transaction_id == transaction_id)
        .count();
    if existing >= MAX_ATTACHMENTS {
        return Err(bad_request(format!(
            "A maximum of {MAX_ATTACHMENTS} attachments is allowed per transaction"
        )));
    }

    let attachment = Attachment {
        id: store.next_id(),
        transaction_id,
        name,
        content_type,
        attachment_type,
    };
    store.attachments.push(attachment.clone());
    Ok(Json(attachment))
}

async fn list_attachments(
    State(state): State<AppState>,
    Path(reference): Path<String>,
) -> Result<Json<Vec<Attachment>>, ApiFailure> {
    let store = state.store.read().await;
    let transaction_id = store
        .transactions
        .iter()
        .find(|t| matches_reference(&reference, t.id, &t.external_id))
        .map(|t| t.id)
        .ok_or_else(|| ApiFailure::not_found("Transaction"))?;
    Ok(Json(
        store
            .attachments
            .iter()
            .filter(|a| a.transaction_id == transaction_id)
            .cloned()
            .collect(),
    ))
}
