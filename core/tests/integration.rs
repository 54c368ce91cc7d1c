//! Money-transfer flows against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives `BlockingClient`
//! over real HTTP through the default ureq transport. Catches drift between
//! the client's DTOs and what the server actually sends.

use std::net::SocketAddr;

use mock_server::Credentials;
use rust_decimal::Decimal;
use thunes_core::{
    AccountStatus, ApiError, AttachmentType, BlockingClient, ClientConfig,
    CreateTransactionRequest, CreditPartyIdentifier, NewQuotation, Pagination, PayerFilter,
    QuotationMode, ResourceRef, Sender, ServiceFilter, TransactionType,
};

const API_KEY: &str = "integration-key";
const API_SECRET: &str = "integration-secret";

fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener, Credentials::new(API_KEY, API_SECRET)).await
        })
        .unwrap();
    });
    addr
}

fn client(addr: SocketAddr) -> BlockingClient {
    BlockingClient::new(&ClientConfig::new(
        &format!("http://{addr}"),
        API_KEY,
        API_SECRET,
    ))
}

fn new_quotation(external_id: &str, payer_id: i64, destination_currency: &str) -> NewQuotation {
    NewQuotation {
        external_id: external_id.to_string(),
        payer_id,
        transaction_type: TransactionType::C2C,
        source_currency: "EUR".to_string(),
        source_country_iso_code: "FRA".to_string(),
        destination_currency: destination_currency.to_string(),
    }
}

fn transaction_request(external_id: &str) -> CreateTransactionRequest {
    CreateTransactionRequest {
        credit_party_identifier: CreditPartyIdentifier::msisdn("+263775892100"),
        external_id: external_id.to_string(),
        sender: Some(Sender {
            firstname: Some("Marie".to_string()),
            lastname: Some("Dubois".to_string()),
            ..Sender::default()
        }),
        ..CreateTransactionRequest::default()
    }
}

#[test]
fn discovery() {
    let client = client(start_server());

    assert_eq!(client.ping().unwrap().status, "up");

    let services = client
        .list_services(&ServiceFilter {
            country_iso_code: Some("ZWE".to_string()),
            ..ServiceFilter::default()
        })
        .unwrap();
    assert_eq!(services.len(), 1);
    assert_eq!(services[0].name, "MobileWallet");

    let payers = client.list_payers(&PayerFilter::service(services[0].id)).unwrap();
    assert_eq!(payers.len(), 1);
    let payer = &payers[0];
    assert!(payer.transaction_types.supports(TransactionType::C2C));
    assert!(!payer.transaction_types.supports(TransactionType::B2B));

    let fetched = client.get_payer(payer.id).unwrap();
    assert_eq!(&fetched, payer);

    let rates = client.get_payer_rates(payer.id).unwrap();
    assert_eq!(rates.destination_currency, "USD");
    let band = rates.band_for("EUR", "USD", Decimal::from(100)).unwrap();
    assert_eq!(band.wholesale_fx_rate, 1.08);

    let first_page = client.list_countries(&Pagination::new(1, 2)).unwrap();
    let second_page = client.list_countries(&Pagination::new(2, 2)).unwrap();
    assert_eq!(first_page.len(), 2);
    assert_eq!(second_page.len(), 1);
    assert_eq!(second_page[0].iso_code, "ZWE");

    let lookups = client
        .lookup_bic("BARCGB22", &Pagination::default())
        .unwrap();
    assert_eq!(lookups[0].id, 2);

    let balances = client.list_balances(&Pagination::default()).unwrap();
    let usd = balances.iter().find(|b| b.currency == "USD").unwrap();
    assert_eq!(usd.available, usd.balance - usd.pending + usd.credit_facility);
}

#[test]
fn credit_party_checks() {
    let client = client(start_server());
    let known = CreditPartyIdentifier::msisdn("+263775892100");

    let info = client
        .credit_party_information(1, TransactionType::C2C, &known)
        .unwrap();
    assert_eq!(info.beneficiary().unwrap().firstname.as_deref(), Some("Tendai"));

    let info = client
        .credit_party_information(1, TransactionType::C2B, &known)
        .unwrap();
    assert_eq!(
        info.receiving_business().unwrap().registered_name.as_deref(),
        Some("Harare Traders Ltd")
    );

    let status = client
        .verify_credit_party(1, TransactionType::C2C, &known)
        .unwrap();
    assert!(status.account_status.can_receive());

    let status = client
        .verify_credit_party(1, TransactionType::C2C, &CreditPartyIdentifier::msisdn("+15550000"))
        .unwrap();
    assert_eq!(status.account_status, AccountStatus::InvalidAccount);
}

#[test]
fn quotation_to_confirmed_transaction() {
    let client = client(start_server());

    let quotation = client
        .create_quotation_for_source(&new_quotation("q-1", 1, "USD"), Decimal::from(100))
        .unwrap();
    assert_eq!(quotation.mode, QuotationMode::SourceAmount);
    assert_eq!(quotation.source.amount, Some(Decimal::from(100)));
    assert_eq!(quotation.destination.amount, Some(Decimal::new(10800, 2)));

    let by_external = client.get_quotation(&ResourceRef::external("q-1")).unwrap();
    assert_eq!(by_external, quotation);

    let transaction = client
        .create_transaction(&ResourceRef::Id(quotation.id), &transaction_request("t-1"))
        .unwrap();
    assert_eq!(transaction.status, "10000");
    assert_eq!(
        transaction.sender.as_ref().and_then(|s| s.firstname.as_deref()),
        Some("Marie")
    );

    let confirmed = client
        .confirm_transaction(&ResourceRef::Id(transaction.id))
        .unwrap();
    assert_eq!(confirmed.status_message.as_deref(), Some("CONFIRMED"));

    let fetched = client.get_transaction(&ResourceRef::external("t-1")).unwrap();
    assert_eq!(fetched.status, confirmed.status);

    // Only cash pickups waiting for pickup can be cancelled.
    let err = client
        .cancel_transaction(&ResourceRef::Id(transaction.id))
        .unwrap_err();
    let envelope = err.envelope().unwrap();
    assert_eq!(envelope.codes().collect::<Vec<_>>(), vec!["1007014"]);
}

#[test]
fn cash_pickup_can_be_cancelled() {
    let client = client(start_server());

    let quotation = client
        .create_quotation_for_destination(&new_quotation("q-cash", 3, "PHP"), Decimal::from(540))
        .unwrap();
    assert_eq!(quotation.mode, QuotationMode::DestinationAmount);
    assert_eq!(quotation.source.amount, Some(Decimal::from(500)));

    let reference = ResourceRef::external("t-cash");
    client
        .create_transaction(&ResourceRef::external("q-cash"), &transaction_request("t-cash"))
        .unwrap();
    let confirmed = client.confirm_transaction(&reference).unwrap();
    assert_eq!(
        confirmed.status_message.as_deref(),
        Some("CONFIRMED-WAITING-FOR-PICKUP")
    );

    let cancelled = client.cancel_transaction(&reference).unwrap();
    assert_eq!(cancelled.status_message.as_deref(), Some("CANCELLED"));
}

#[test]
fn external_ids_with_reserved_characters() {
    let client = client(start_server());
    let quotation_id = "order#7/b?x=1";
    let transaction_id = "tx 7%/ü";

    client
        .create_quotation_for_source(&new_quotation(quotation_id, 1, "USD"), Decimal::from(10))
        .unwrap();
    let quotation = client
        .get_quotation(&ResourceRef::external(quotation_id))
        .unwrap();
    assert_eq!(quotation.external_id.as_deref(), Some(quotation_id));

    client
        .create_transaction(
            &ResourceRef::external(quotation_id),
            &transaction_request(transaction_id),
        )
        .unwrap();
    let confirmed = client
        .confirm_transaction(&ResourceRef::external(transaction_id))
        .unwrap();
    assert_eq!(confirmed.external_id.as_deref(), Some(transaction_id));
    assert_eq!(confirmed.status_message.as_deref(), Some("CONFIRMED"));
}

#[test]
fn call_timeout_bounds_a_silent_server() {
    // Accepts connections but never answers.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let client = client(listener.local_addr().unwrap());

    let err = client
        .with_call_timeout(std::time::Duration::from_millis(200))
        .ping()
        .unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
    drop(listener);
}

#[test]
fn attachments() {
    let client = client(start_server());
    client
        .create_quotation_for_source(&new_quotation("q-doc", 1, "USD"), Decimal::from(20))
        .unwrap();
    client
        .create_transaction(&ResourceRef::external("q-doc"), &transaction_request("t-doc"))
        .unwrap();
    let transaction = ResourceRef::external("t-doc");

    let uploaded = client
        .add_attachment(&transaction, AttachmentType::Invoice, "invoice.pdf", b"%PDF-1.4")
        .unwrap();
    assert_eq!(uploaded.name, "invoice.pdf");
    assert_eq!(uploaded.content_type, "application/pdf");
    assert_eq!(uploaded.attachment_type, AttachmentType::Invoice);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("order.png");
    std::fs::write(&path, b"\x89PNG").unwrap();
    let from_disk = client
        .add_attachment_from_path(&transaction, AttachmentType::PurchaseOrder, &path)
        .unwrap();
    assert_eq!(from_disk.name, "order.png");

    let listed = client.list_attachments(&transaction).unwrap();
    assert_eq!(listed, vec![uploaded, from_disk]);

    let rejected = client
        .add_attachment(&transaction, AttachmentType::Contract, "setup.exe", b"MZ")
        .unwrap_err();
    assert!(matches!(rejected, ApiError::UnsupportedAttachment(_)));
    let rejected = client
        .add_attachment(&transaction, AttachmentType::Contract, "SCAN.PDF", b"%PDF")
        .unwrap_err();
    assert!(matches!(rejected, ApiError::UnsupportedAttachment(_)));
    let rejected = client
        .add_attachment(
            &transaction,
            AttachmentType::Contract,
            "evil\r\nX-Injected: yes\r\n.pdf",
            b"%PDF",
        )
        .unwrap_err();
    assert!(matches!(rejected, ApiError::InvalidArgument(_)));
    assert_eq!(client.list_attachments(&transaction).unwrap().len(), 2);
}

#[test]
fn api_errors_carry_the_envelope() {
    let addr = start_server();
    let client = client(addr);

    let err = client
        .get_transaction(&ResourceRef::external("missing"))
        .unwrap_err();
    assert!(matches!(err, ApiError::Api(_)));
    assert_eq!(err.to_string(), "1000404: Transaction not found");

    client
        .create_quotation_for_source(&new_quotation("dup", 1, "USD"), Decimal::from(10))
        .unwrap();
    let err = client
        .create_quotation_for_source(&new_quotation("dup", 1, "USD"), Decimal::from(10))
        .unwrap_err();
    assert_eq!(err.envelope().unwrap().codes().next(), Some("1003003"));

    let intruder = BlockingClient::new(&ClientConfig::new(
        &format!("http://{addr}"),
        API_KEY,
        "wrong",
    ));
    let err = intruder.ping().unwrap_err();
    assert_eq!(err.to_string(), "1000401: Unauthorized");
}

#[test]
fn unreachable_server_is_a_transport_error() {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    drop(std_listener);

    let err = client(addr).ping().unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
    assert!(!err.is_local());
}
