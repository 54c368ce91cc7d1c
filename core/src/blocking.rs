//! Blocking client: one synchronous round trip per operation.
//!
//! # Design
//! `BlockingClient` pairs the stateless `ThunesClient` with a `Transport`.
//! Every method is `build_*`, execute, `parse_*`; nothing is retried and no
//! state is kept between calls, so a single client can be shared across
//! threads.

use std::fs;
use std::path::Path;
use std::time::Duration;

use rust_decimal::Decimal;
use tracing::debug;

use crate::attachment;
use crate::client::ThunesClient;
use crate::config::{ClientConfig, ConfigError};
use crate::error::ApiError;
use crate::filters::{Pagination, PayerFilter, ServiceFilter};
use crate::http::{HttpRequest, HttpResponse};
use crate::reference::ResourceRef;
use crate::transport::{Transport, UreqTransport};
use crate::types::{
    AttachmentType, Balance, Country, CreateTransactionRequest, CreditPartyIdentifier,
    CreditPartyInformation, Lookup, NewQuotation, Payer, PayerRates, Quotation, Service, Status,
    Transaction, TransactionAttachment, TransactionType, VerificationStatus,
};

#[derive(Debug, Clone)]
pub struct BlockingClient<T = UreqTransport> {
    client: ThunesClient,
    transport: T,
    call_timeout: Option<Duration>,
}

impl BlockingClient<UreqTransport> {
    /// Client over ureq, honouring `config.timeout`.
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::new(config.timeout))
    }

    /// Client configured from `THUNES_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(&ClientConfig::from_env()?))
    }
}

impl<T: Transport> BlockingClient<T> {
    pub fn with_transport(config: &ClientConfig, transport: T) -> Self {
        Self {
            client: ThunesClient::new(config),
            transport,
            call_timeout: None,
        }
    }

    /// A view of this client whose calls are bounded by `timeout` instead of
    /// the configured one. Shares the transport.
    ///
    /// ```no_run
    /// # use std::time::Duration;
    /// # use thunes_core::{BlockingClient, ResourceRef};
    /// # fn check(client: &BlockingClient) -> Result<(), thunes_core::ApiError> {
    /// let transaction = client
    ///     .with_call_timeout(Duration::from_secs(2))
    ///     .get_transaction(&ResourceRef::external("order-7"))?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_call_timeout(&self, timeout: Duration) -> BlockingClient<&T> {
        BlockingClient {
            client: self.client.clone(),
            transport: &self.transport,
            call_timeout: Some(timeout),
        }
    }

    /// The request builder/parser, for callers that run their own I/O.
    pub fn inner(&self) -> &ThunesClient {
        &self.client
    }

    fn send(&self, mut request: HttpRequest) -> Result<HttpResponse, ApiError> {
        if request.timeout.is_none() {
            request.timeout = self.call_timeout;
        }
        debug!(method = request.method.as_str(), url = %request.url, "sending request");
        let response = self.transport.execute(request)?;
        debug!(status = response.status, bytes = response.body.len(), "received response");
        Ok(response)
    }

    /// Checks that the credentials are accepted.
    pub fn ping(&self) -> Result<Status, ApiError> {
        let response = self.send(self.client.build_ping())?;
        self.client.parse_ping(response)
    }

    pub fn list_services(&self, filter: &ServiceFilter) -> Result<Vec<Service>, ApiError> {
        let response = self.send(self.client.build_list_services(filter))?;
        self.client.parse_list_services(response)
    }

    pub fn list_payers(&self, filter: &PayerFilter) -> Result<Vec<Payer>, ApiError> {
        let response = self.send(self.client.build_list_payers(filter))?;
        self.client.parse_list_payers(response)
    }

    pub fn get_payer(&self, payer_id: i64) -> Result<Payer, ApiError> {
        let response = self.send(self.client.build_get_payer(payer_id))?;
        self.client.parse_get_payer(response)
    }

    pub fn get_payer_rates(&self, payer_id: i64) -> Result<PayerRates, ApiError> {
        let response = self.send(self.client.build_get_payer_rates(payer_id))?;
        self.client.parse_get_payer_rates(response)
    }

    pub fn list_countries(&self, pagination: &Pagination) -> Result<Vec<Country>, ApiError> {
        let response = self.send(self.client.build_list_countries(pagination))?;
        self.client.parse_list_countries(response)
    }

    pub fn lookup_bic(
        &self,
        swift_bic_code: &str,
        pagination: &Pagination,
    ) -> Result<Vec<Lookup>, ApiError> {
        let response = self.send(self.client.build_lookup_bic(swift_bic_code, pagination))?;
        self.client.parse_lookup_bic(response)
    }

    pub fn list_balances(&self, pagination: &Pagination) -> Result<Vec<Balance>, ApiError> {
        let response = self.send(self.client.build_list_balances(pagination))?;
        self.client.parse_list_balances(response)
    }

    /// Beneficiary (C2C, B2C) or receiving business (C2B, B2B) behind a
    /// credit-party identifier.
    pub fn credit_party_information(
        &self,
        payer_id: i64,
        transaction_type: TransactionType,
        identifier: &CreditPartyIdentifier,
    ) -> Result<CreditPartyInformation, ApiError> {
        let request =
            self.client
                .build_credit_party_information(payer_id, transaction_type, identifier)?;
        let response = self.send(request)?;
        self.client
            .parse_credit_party_information(transaction_type, response)
    }

    pub fn verify_credit_party(
        &self,
        payer_id: i64,
        transaction_type: TransactionType,
        identifier: &CreditPartyIdentifier,
    ) -> Result<VerificationStatus, ApiError> {
        let request = self
            .client
            .build_verify_credit_party(payer_id, transaction_type, identifier)?;
        let response = self.send(request)?;
        self.client.parse_verify_credit_party(response)
    }

    pub fn create_quotation_for_source(
        &self,
        quotation: &NewQuotation,
        source_amount: Decimal,
    ) -> Result<Quotation, ApiError> {
        let request = self
            .client
            .build_create_quotation_for_source(quotation, source_amount)?;
        let response = self.send(request)?;
        self.client.parse_create_quotation(response)
    }

    pub fn create_quotation_for_destination(
        &self,
        quotation: &NewQuotation,
        destination_amount: Decimal,
    ) -> Result<Quotation, ApiError> {
        let request = self
            .client
            .build_create_quotation_for_destination(quotation, destination_amount)?;
        let response = self.send(request)?;
        self.client.parse_create_quotation(response)
    }

    pub fn get_quotation(&self, quotation: &ResourceRef) -> Result<Quotation, ApiError> {
        let response = self.send(self.client.build_get_quotation(quotation))?;
        self.client.parse_get_quotation(response)
    }

    pub fn create_transaction(
        &self,
        quotation: &ResourceRef,
        input: &CreateTransactionRequest,
    ) -> Result<Transaction, ApiError> {
        let request = self.client.build_create_transaction(quotation, input)?;
        let response = self.send(request)?;
        self.client.parse_create_transaction(response)
    }

    pub fn confirm_transaction(&self, transaction: &ResourceRef) -> Result<Transaction, ApiError> {
        let response = self.send(self.client.build_confirm_transaction(transaction))?;
        self.client.parse_confirm_transaction(response)
    }

    pub fn cancel_transaction(&self, transaction: &ResourceRef) -> Result<Transaction, ApiError> {
        let response = self.send(self.client.build_cancel_transaction(transaction))?;
        self.client.parse_cancel_transaction(response)
    }

    pub fn get_transaction(&self, transaction: &ResourceRef) -> Result<Transaction, ApiError> {
        let response = self.send(self.client.build_get_transaction(transaction))?;
        self.client.parse_get_transaction(response)
    }

    /// Uploads in-memory contents under `file_name`.
    pub fn add_attachment(
        &self,
        transaction: &ResourceRef,
        attachment_type: AttachmentType,
        file_name: &str,
        contents: &[u8],
    ) -> Result<TransactionAttachment, ApiError> {
        let request =
            self.client
                .build_add_attachment(transaction, attachment_type, file_name, contents)?;
        let response = self.send(request)?;
        self.client.parse_add_attachment(response)
    }

    /// Uploads a file from disk. Extension and size are checked from the
    /// path and metadata before the file is read.
    pub fn add_attachment_from_path(
        &self,
        transaction: &ResourceRef,
        attachment_type: AttachmentType,
        path: &Path,
    ) -> Result<TransactionAttachment, ApiError> {
        let file_name = path.to_string_lossy();
        attachment::validate(&file_name, fs::metadata(path)?.len())?;
        let contents = fs::read(path)?;
        self.add_attachment(transaction, attachment_type, &file_name, &contents)
    }

    pub fn list_attachments(
        &self,
        transaction: &ResourceRef,
    ) -> Result<Vec<TransactionAttachment>, ApiError> {
        let response = self.send(self.client.build_list_attachments(transaction))?;
        self.client.parse_list_attachments(response)
    }
}
