//! Stateless HTTP request builder and response parser for the money-transfer
//! API.
//!
//! # Design
//! `ThunesClient` holds only the base URL and the precomputed basic-auth
//! header, and carries no mutable state between calls. Each operation is
//! split into a `build_*` method that produces an `HttpRequest` and a
//! `parse_*` method that consumes an `HttpResponse`. The caller (usually
//! `BlockingClient`) executes the round trip in between, keeping this type
//! deterministic and free of I/O.
//!
//! Every request carries basic authentication. A response whose status is
//! not the one the operation expects is decoded as the API error envelope.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::attachment;
use crate::config::ClientConfig;
use crate::error::{ApiError, ErrorEnvelope};
use crate::filters::{Pagination, PayerFilter, ServiceFilter};
use crate::http::{encode_segment, HttpMethod, HttpRequest, HttpResponse};
use crate::reference::ResourceRef;
use crate::types::{
    AttachmentType, Balance, Beneficiary, Country, CreateQuotationRequest,
    CreateTransactionRequest, CreditPartyIdentifier, CreditPartyInformation, CreditPartyRequest,
    Lookup, NewQuotation, Payer, PayerRates, Quotation, QuotationAmount, ReceivingBusiness,
    Service, Status, Transaction, TransactionAttachment, TransactionType, VerificationStatus,
};

const MONEY_TRANSFER: &str = "v2/money-transfer";

const OK: u16 = 200;
const CREATED: u16 = 201;

/// Synchronous, stateless client for the money-transfer API.
#[derive(Clone)]
pub struct ThunesClient {
    base_url: String,
    authorization: String,
}

impl std::fmt::Debug for ThunesClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThunesClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ThunesClient {
    pub fn new(config: &ClientConfig) -> Self {
        let credentials = STANDARD.encode(format!("{}:{}", config.api_key, config.api_secret));
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            authorization: format!("Basic {credentials}"),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ---------------------------------------------------------------------
    // Discovery
    // ---------------------------------------------------------------------

    pub fn build_ping(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "ping", &[])
    }

    pub fn parse_ping(&self, response: HttpResponse) -> Result<Status, ApiError> {
        decode(response, OK)
    }

    pub fn build_list_services(&self, filter: &ServiceFilter) -> HttpRequest {
        self.request(
            HttpMethod::Get,
            &format!("{MONEY_TRANSFER}/services"),
            &filter.query(),
        )
    }

    pub fn parse_list_services(&self, response: HttpResponse) -> Result<Vec<Service>, ApiError> {
        decode(response, OK)
    }

    pub fn build_list_payers(&self, filter: &PayerFilter) -> HttpRequest {
        self.request(
            HttpMethod::Get,
            &format!("{MONEY_TRANSFER}/payers"),
            &filter.query(),
        )
    }

    pub fn parse_list_payers(&self, response: HttpResponse) -> Result<Vec<Payer>, ApiError> {
        decode(response, OK)
    }

    pub fn build_get_payer(&self, payer_id: i64) -> HttpRequest {
        self.request(
            HttpMethod::Get,
            &format!("{MONEY_TRANSFER}/payers/{payer_id}"),
            &[],
        )
    }

    pub fn parse_get_payer(&self, response: HttpResponse) -> Result<Payer, ApiError> {
        decode(response, OK)
    }

    pub fn build_get_payer_rates(&self, payer_id: i64) -> HttpRequest {
        self.request(
            HttpMethod::Get,
            &format!("{MONEY_TRANSFER}/payers/{payer_id}/rates"),
            &[],
        )
    }

    pub fn parse_get_payer_rates(&self, response: HttpResponse) -> Result<PayerRates, ApiError> {
        decode(response, OK)
    }

    pub fn build_list_countries(&self, pagination: &Pagination) -> HttpRequest {
        self.request(
            HttpMethod::Get,
            &format!("{MONEY_TRANSFER}/countries"),
            &pagination.query(),
        )
    }

    pub fn parse_list_countries(&self, response: HttpResponse) -> Result<Vec<Country>, ApiError> {
        decode(response, OK)
    }

    /// Payers reachable through a SWIFT BIC code.
    pub fn build_lookup_bic(&self, swift_bic_code: &str, pagination: &Pagination) -> HttpRequest {
        self.request(
            HttpMethod::Get,
            &format!("{MONEY_TRANSFER}/lookups/BIC/{}", encode_segment(swift_bic_code)),
            &pagination.query(),
        )
    }

    pub fn parse_lookup_bic(&self, response: HttpResponse) -> Result<Vec<Lookup>, ApiError> {
        decode(response, OK)
    }

    pub fn build_list_balances(&self, pagination: &Pagination) -> HttpRequest {
        self.request(
            HttpMethod::Get,
            &format!("{MONEY_TRANSFER}/balances"),
            &pagination.query(),
        )
    }

    pub fn parse_list_balances(&self, response: HttpResponse) -> Result<Vec<Balance>, ApiError> {
        decode(response, OK)
    }

    // ---------------------------------------------------------------------
    // Credit party
    // ---------------------------------------------------------------------

    pub fn build_credit_party_information(
        &self,
        payer_id: i64,
        transaction_type: TransactionType,
        identifier: &CreditPartyIdentifier,
    ) -> Result<HttpRequest, ApiError> {
        self.json_request(
            HttpMethod::Post,
            &format!("{MONEY_TRANSFER}/payers/{payer_id}/{transaction_type}/credit-party-information"),
            &CreditPartyRequest {
                credit_party_identifier: identifier.clone(),
            },
        )
    }

    /// Decodes a beneficiary for C2C/B2C and a receiving business for
    /// C2B/B2B. `transaction_type` must be the one the request was built
    /// with.
    pub fn parse_credit_party_information(
        &self,
        transaction_type: TransactionType,
        response: HttpResponse,
    ) -> Result<CreditPartyInformation, ApiError> {
        if transaction_type.to_business() {
            decode::<ReceivingBusiness>(response, OK).map(CreditPartyInformation::ReceivingBusiness)
        } else {
            decode::<Beneficiary>(response, OK).map(CreditPartyInformation::Beneficiary)
        }
    }

    pub fn build_verify_credit_party(
        &self,
        payer_id: i64,
        transaction_type: TransactionType,
        identifier: &CreditPartyIdentifier,
    ) -> Result<HttpRequest, ApiError> {
        self.json_request(
            HttpMethod::Post,
            &format!("{MONEY_TRANSFER}/payers/{payer_id}/{transaction_type}/credit-party-verification"),
            &CreditPartyRequest {
                credit_party_identifier: identifier.clone(),
            },
        )
    }

    pub fn parse_verify_credit_party(
        &self,
        response: HttpResponse,
    ) -> Result<VerificationStatus, ApiError> {
        decode(response, OK)
    }

    // ---------------------------------------------------------------------
    // Quotations
    // ---------------------------------------------------------------------

    /// Quotation fixing the amount the sender pays.
    pub fn build_create_quotation_for_source(
        &self,
        quotation: &NewQuotation,
        source_amount: Decimal,
    ) -> Result<HttpRequest, ApiError> {
        self.build_create_quotation(quotation, QuotationAmount::Source(source_amount))
    }

    /// Quotation fixing the amount the beneficiary receives.
    pub fn build_create_quotation_for_destination(
        &self,
        quotation: &NewQuotation,
        destination_amount: Decimal,
    ) -> Result<HttpRequest, ApiError> {
        self.build_create_quotation(quotation, QuotationAmount::Destination(destination_amount))
    }

    pub fn build_create_quotation(
        &self,
        quotation: &NewQuotation,
        amount: QuotationAmount,
    ) -> Result<HttpRequest, ApiError> {
        self.json_request(
            HttpMethod::Post,
            &format!("{MONEY_TRANSFER}/quotations"),
            &CreateQuotationRequest::new(quotation, amount),
        )
    }

    pub fn parse_create_quotation(&self, response: HttpResponse) -> Result<Quotation, ApiError> {
        decode(response, CREATED)
    }

    pub fn build_get_quotation(&self, quotation: &ResourceRef) -> HttpRequest {
        self.request(
            HttpMethod::Get,
            &format!("{MONEY_TRANSFER}/quotations/{}", quotation.path_segment()),
            &[],
        )
    }

    pub fn parse_get_quotation(&self, response: HttpResponse) -> Result<Quotation, ApiError> {
        decode(response, OK)
    }

    // ---------------------------------------------------------------------
    // Transactions
    // ---------------------------------------------------------------------

    /// Transaction created from the given quotation.
    pub fn build_create_transaction(
        &self,
        quotation: &ResourceRef,
        input: &CreateTransactionRequest,
    ) -> Result<HttpRequest, ApiError> {
        self.json_request(
            HttpMethod::Post,
            &format!("{MONEY_TRANSFER}/quotations/{}/transactions", quotation.path_segment()),
            input,
        )
    }

    pub fn parse_create_transaction(&self, response: HttpResponse) -> Result<Transaction, ApiError> {
        decode(response, CREATED)
    }

    pub fn build_confirm_transaction(&self, transaction: &ResourceRef) -> HttpRequest {
        self.request(
            HttpMethod::Post,
            &format!("{MONEY_TRANSFER}/transactions/{}/confirm", transaction.path_segment()),
            &[],
        )
    }

    pub fn parse_confirm_transaction(
        &self,
        response: HttpResponse,
    ) -> Result<Transaction, ApiError> {
        decode(response, OK)
    }

    /// Only cash pickup transactions waiting for pickup can be cancelled;
    /// the API answers with error 1007014 otherwise.
    pub fn build_cancel_transaction(&self, transaction: &ResourceRef) -> HttpRequest {
        self.request(
            HttpMethod::Post,
            &format!("{MONEY_TRANSFER}/transactions/{}/cancel", transaction.path_segment()),
            &[],
        )
    }

    pub fn parse_cancel_transaction(&self, response: HttpResponse) -> Result<Transaction, ApiError> {
        decode(response, OK)
    }

    pub fn build_get_transaction(&self, transaction: &ResourceRef) -> HttpRequest {
        self.request(
            HttpMethod::Get,
            &format!("{MONEY_TRANSFER}/transactions/{}", transaction.path_segment()),
            &[],
        )
    }

    pub fn parse_get_transaction(&self, response: HttpResponse) -> Result<Transaction, ApiError> {
        decode(response, OK)
    }

    // ---------------------------------------------------------------------
    // Attachments
    // ---------------------------------------------------------------------

    /// Multipart upload of one document. The extension and size are checked
    /// first; a rejected file produces an error and no request.
    pub fn build_add_attachment(
        &self,
        transaction: &ResourceRef,
        attachment_type: AttachmentType,
        file_name: &str,
        contents: &[u8],
    ) -> Result<HttpRequest, ApiError> {
        attachment::validate(file_name, contents.len() as u64)?;
        let name = attachment::base_name(file_name);
        let (content_type, body) = attachment::encode_form(attachment_type.as_str(), name, contents)?;

        let mut request = self.request(
            HttpMethod::Post,
            &format!("{MONEY_TRANSFER}/transactions/{}/attachments", transaction.path_segment()),
            &[],
        );
        request
            .headers
            .push(("content-type".to_string(), content_type));
        request.body = Some(body);
        Ok(request)
    }

    /// Upload answers 200, unlike the other create calls which answer 201.
    pub fn parse_add_attachment(
        &self,
        response: HttpResponse,
    ) -> Result<TransactionAttachment, ApiError> {
        decode(response, OK)
    }

    pub fn build_list_attachments(&self, transaction: &ResourceRef) -> HttpRequest {
        self.request(
            HttpMethod::Get,
            &format!("{MONEY_TRANSFER}/transactions/{}/attachments", transaction.path_segment()),
            &[],
        )
    }

    pub fn parse_list_attachments(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<TransactionAttachment>, ApiError> {
        decode(response, OK)
    }

    // ---------------------------------------------------------------------
    // Plumbing
    // ---------------------------------------------------------------------

    /// Request without a body. The query is appended only when non-empty.
    fn request(&self, method: HttpMethod, path: &str, query: &[(&'static str, String)]) -> HttpRequest {
        let mut url = format!("{}/{}", self.base_url, path);
        if !query.is_empty() {
            let encoded = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(query)
                .finish();
            url.push('?');
            url.push_str(&encoded);
        }
        HttpRequest {
            method,
            url,
            headers: vec![
                ("authorization".to_string(), self.authorization.clone()),
                ("accept".to_string(), "application/json".to_string()),
            ],
            body: None,
            timeout: None,
        }
    }

    fn json_request<B: Serialize>(
        &self,
        method: HttpMethod,
        path: &str,
        body: &B,
    ) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_vec(body).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        let mut request = self.request(method, path, &[]);
        request
            .headers
            .push(("content-type".to_string(), "application/json".to_string()));
        request.body = Some(body);
        Ok(request)
    }
}

/// Decodes the body into `T` when the status is `expected`, otherwise into
/// an error.
fn decode<T: DeserializeOwned>(response: HttpResponse, expected: u16) -> Result<T, ApiError> {
    check_status(&response, expected)?;
    serde_json::from_slice(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Maps an unexpected status to the API error it carries.
///
/// A body that is not an error envelope is a deserialization failure in its
/// own right, not a generic status error.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    let envelope: ErrorEnvelope = serde_json::from_slice(&response.body)
        .map_err(|e| ApiError::DeserializationError(e.to_string()))?;
    if envelope.errors.is_empty() {
        return Err(ApiError::HttpError {
            status: response.status,
            body: String::from_utf8_lossy(&response.body).into_owned(),
        });
    }
    tracing::warn!(status = response.status, errors = %envelope, "API returned errors");
    Err(ApiError::Api(envelope))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AccountStatus;

    fn client() -> ThunesClient {
        ThunesClient::new(&ClientConfig::new("http://localhost:3000", "key", "secret"))
    }

    fn body_json(request: &HttpRequest) -> serde_json::Value {
        serde_json::from_slice(request.body.as_deref().unwrap()).unwrap()
    }

    #[test]
    fn build_ping_produces_correct_request() {
        let req = client().build_ping();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3000/ping");
        assert!(req.body.is_none());
        assert!(req.header("content-type").is_none());
    }

    #[test]
    fn every_request_carries_basic_auth() {
        let req = client().build_ping();
        // base64("key:secret")
        assert_eq!(req.header("authorization"), Some("Basic a2V5OnNlY3JldA=="));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client =
            ThunesClient::new(&ClientConfig::new("https://api-mt.pre.thunes.com/", "k", "s"));
        assert_eq!(client.build_ping().url, "https://api-mt.pre.thunes.com/ping");
    }

    #[test]
    fn list_without_filters_has_no_query() {
        let req = client().build_list_payers(&PayerFilter::default());
        assert_eq!(req.url, "http://localhost:3000/v2/money-transfer/payers");
    }

    #[test]
    fn list_payers_with_filters() {
        let filter = PayerFilter {
            pagination: Pagination::new(2, 50),
            service_id: Some(1),
            country_iso_code: Some("ZWE".to_string()),
            currency: None,
        };
        let req = client().build_list_payers(&filter);
        assert_eq!(
            req.url,
            "http://localhost:3000/v2/money-transfer/payers?page=2&per_page=50&service_id=1&country_iso_code=ZWE"
        );
        assert!(!req.url.contains("currency"));
    }

    #[test]
    fn services_filter_by_country_only() {
        let filter = ServiceFilter {
            country_iso_code: Some("FRA".to_string()),
            ..ServiceFilter::default()
        };
        let req = client().build_list_services(&filter);
        assert_eq!(
            req.url,
            "http://localhost:3000/v2/money-transfer/services?country_iso_code=FRA"
        );
    }

    #[test]
    fn bic_lookup_path() {
        let req = client().build_lookup_bic("BARCGB22", &Pagination::default());
        assert_eq!(
            req.url,
            "http://localhost:3000/v2/money-transfer/lookups/BIC/BARCGB22"
        );
    }

    #[test]
    fn payer_rates_path() {
        let req = client().build_get_payer_rates(7);
        assert_eq!(req.url, "http://localhost:3000/v2/money-transfer/payers/7/rates");
    }

    #[test]
    fn dual_identifier_paths() {
        let c = client();
        let by_ext = ResourceRef::resolve(None, Some("abc")).unwrap();
        assert_eq!(
            c.build_get_transaction(&by_ext).url,
            "http://localhost:3000/v2/money-transfer/transactions/ext-abc"
        );
        let by_id = ResourceRef::resolve(Some(42), None).unwrap();
        assert_eq!(
            c.build_confirm_transaction(&by_id).url,
            "http://localhost:3000/v2/money-transfer/transactions/42/confirm"
        );
        let both = ResourceRef::resolve(Some(42), Some("abc")).unwrap();
        let req = c.build_get_quotation(&both);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3000/v2/money-transfer/quotations/42");
    }

    #[test]
    fn cancel_and_list_attachment_paths() {
        let c = client();
        let tx = ResourceRef::external("tx-9");
        let req = c.build_cancel_transaction(&tx);
        assert_eq!(req.method, HttpMethod::Post);
        assert!(req.body.is_none());
        assert!(req.url.ends_with("/transactions/ext-tx-9/cancel"));
        assert!(c
            .build_list_attachments(&tx)
            .url
            .ends_with("/transactions/ext-tx-9/attachments"));
    }

    #[test]
    fn create_quotation_for_source() {
        let quotation = NewQuotation {
            external_id: "q-1".to_string(),
            payer_id: 1,
            transaction_type: TransactionType::C2C,
            source_currency: "EUR".to_string(),
            source_country_iso_code: "FRA".to_string(),
            destination_currency: "USD".to_string(),
        };
        let req = client()
            .build_create_quotation_for_source(&quotation, Decimal::from(100))
            .unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:3000/v2/money-transfer/quotations");
        assert_eq!(req.header("content-type"), Some("application/json"));
        let body = body_json(&req);
        assert_eq!(body["mode"], "SOURCE_AMOUNT");
        assert!(!body["source"]["amount"].is_null());
        assert!(body["destination"]["amount"].is_null());
    }

    #[test]
    fn create_transaction_targets_the_quotation() {
        let input = CreateTransactionRequest {
            credit_party_identifier: CreditPartyIdentifier::msisdn("+263775892100"),
            external_id: "tx-1".to_string(),
            ..CreateTransactionRequest::default()
        };
        let req = client()
            .build_create_transaction(&ResourceRef::external("q-1"), &input)
            .unwrap();
        assert_eq!(
            req.url,
            "http://localhost:3000/v2/money-transfer/quotations/ext-q-1/transactions"
        );
        assert_eq!(body_json(&req)["external_id"], "tx-1");
    }

    #[test]
    fn credit_party_information_request() {
        let req = client()
            .build_credit_party_information(
                3,
                TransactionType::C2B,
                &CreditPartyIdentifier::msisdn("+263775892100"),
            )
            .unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(
            req.url,
            "http://localhost:3000/v2/money-transfer/payers/3/C2B/credit-party-information"
        );
        assert_eq!(
            body_json(&req),
            serde_json::json!({"credit_party_identifier": {"msisdn": "+263775892100"}})
        );
    }

    #[test]
    fn parse_credit_party_information_follows_the_transaction_type() {
        let body = r#"{"registered_name":"Acme Ltd","firstname":null}"#;
        let info = client()
            .parse_credit_party_information(TransactionType::C2B, HttpResponse::json(200, body))
            .unwrap();
        let business = info.receiving_business().unwrap();
        assert_eq!(business.registered_name.as_deref(), Some("Acme Ltd"));

        let info = client()
            .parse_credit_party_information(TransactionType::B2C, HttpResponse::json(200, body))
            .unwrap();
        assert!(info.beneficiary().is_some());
    }

    #[test]
    fn parse_verification_status() {
        let status = client()
            .parse_verify_credit_party(HttpResponse::json(
                200,
                r#"{"id":1,"account_status":"AVAILABLE"}"#,
            ))
            .unwrap();
        assert_eq!(status.account_status, AccountStatus::Available);
    }

    #[test]
    fn add_attachment_builds_multipart() {
        let req = client()
            .build_add_attachment(
                &ResourceRef::Id(42),
                AttachmentType::Invoice,
                "/tmp/invoice.pdf",
                b"%PDF-1.4",
            )
            .unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(
            req.url,
            "http://localhost:3000/v2/money-transfer/transactions/42/attachments"
        );
        assert!(req
            .header("content-type")
            .unwrap()
            .starts_with("multipart/form-data; boundary="));
        let body = String::from_utf8(req.body.unwrap()).unwrap();
        assert!(body.contains("name=\"type\"\r\n\r\ninvoice\r\n"));
        assert!(body.contains("name=\"invoice.pdf\"; filename=\"invoice.pdf\""));
        assert!(!body.contains("/tmp"));
    }

    #[test]
    fn add_attachment_rejects_before_building() {
        let c = client();
        let err = c
            .build_add_attachment(&ResourceRef::Id(1), AttachmentType::Contract, "report.exe", b"MZ")
            .unwrap_err();
        assert!(matches!(err, ApiError::UnsupportedAttachment(_)));

        let oversized = vec![0u8; 8 * 1024 * 1024 + 1];
        let err = c
            .build_add_attachment(&ResourceRef::Id(1), AttachmentType::Contract, "scan.png", &oversized)
            .unwrap_err();
        assert!(matches!(err, ApiError::AttachmentTooLarge { .. }));
    }

    #[test]
    fn parse_ping_success() {
        let status = client()
            .parse_ping(HttpResponse::json(200, r#"{"status":"up"}"#))
            .unwrap();
        assert_eq!(status.status, "up");
    }

    #[test]
    fn error_envelope_becomes_api_error() {
        let err = client()
            .parse_get_transaction(HttpResponse::json(
                404,
                r#"{"errors":[{"code":"E1","message":"not found"}]}"#,
            ))
            .unwrap_err();
        assert_eq!(err.to_string(), "E1: not found");
        assert_eq!(err.envelope().unwrap().errors[0].code, "E1");
    }

    #[test]
    fn non_envelope_error_body_is_a_deserialization_error() {
        let err = client()
            .parse_ping(HttpResponse::json(502, "<html>Bad Gateway</html>"))
            .unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn empty_envelope_keeps_status() {
        let err = client()
            .parse_ping(HttpResponse::json(500, r#"{"errors":[]}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
    }

    #[test]
    fn create_expects_201() {
        // A 200 on a create call is a status mismatch, and the quotation body
        // is not an error envelope.
        let err = client()
            .parse_create_quotation(HttpResponse::json(200, r#"{"id":1}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn parse_list_bad_json() {
        let err = client()
            .parse_list_countries(HttpResponse::json(200, "not json"))
            .unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }
}
