use std::fmt;

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::{
    Beneficiary, CreditPartyIdentifier, CurrencyAmount, Payer, ReceivingBusiness, Sender,
    SendingBusiness, Source, TransactionType,
};

/// Point-in-time snapshot of a transfer.
///
/// `status` is whatever the server reports (`20000` / `COMPLETED`,
/// `CONFIRMED-WAITING-FOR-PICKUP`, ...). The lifecycle is enforced by the
/// API, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub status: String,
    #[serde(default)]
    pub status_message: Option<String>,
    #[serde(default)]
    pub status_class: Option<String>,
    #[serde(default)]
    pub status_class_message: Option<String>,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub external_code: Option<String>,
    #[serde(default)]
    pub transaction_type: Option<TransactionType>,
    #[serde(default)]
    pub payer_transaction_reference: Option<String>,
    #[serde(default)]
    pub payer_transaction_code: Option<String>,
    #[serde(default)]
    pub creation_date: Option<String>,
    #[serde(default)]
    pub expiration_date: Option<String>,
    #[serde(default)]
    pub credit_party_identifier: Option<CreditPartyIdentifier>,
    #[serde(default)]
    pub source: Option<Source>,
    #[serde(default)]
    pub destination: Option<CurrencyAmount>,
    #[serde(default)]
    pub payer: Option<Payer>,
    #[serde(default)]
    pub sender: Option<Sender>,
    #[serde(default)]
    pub beneficiary: Option<Beneficiary>,
    #[serde(default)]
    pub sending_business: Option<SendingBusiness>,
    #[serde(default)]
    pub receiving_business: Option<ReceivingBusiness>,
    #[serde(default)]
    pub callback_url: Option<String>,
    #[serde(default)]
    pub sent_amount: Option<CurrencyAmount>,
    #[serde(default)]
    pub wholesale_fx_rate: Option<f64>,
    #[serde(default)]
    pub retail_rate: Option<f64>,
    #[serde(default)]
    pub retail_fee: Option<f64>,
    #[serde(default)]
    pub retail_fee_currency: Option<String>,
    #[serde(default)]
    pub fee: Option<CurrencyAmount>,
    #[serde(default)]
    pub purpose_of_remittance: Option<String>,
    #[serde(default)]
    pub document_reference_number: Option<String>,
    #[serde(default)]
    pub additional_information_1: Option<String>,
    #[serde(default)]
    pub additional_information_2: Option<String>,
    #[serde(default)]
    pub additional_information_3: Option<String>,
}

/// Body of `POST /v2/money-transfer/quotations/{ref}/transactions`.
///
/// Which parties are required follows the quotation's transaction type:
/// C2C sender + beneficiary, C2B sender + receiving business, B2C sending
/// business + beneficiary, B2B sending + receiving business. B2B also needs
/// `purpose_of_remittance` and `document_reference_number`.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateTransactionRequest {
    pub credit_party_identifier: CreditPartyIdentifier,
    pub external_id: String,
    pub retail_fee: Option<f64>,
    pub retail_rate: Option<f64>,
    pub retail_fee_currency: Option<String>,
    pub sender: Option<Sender>,
    pub beneficiary: Option<Beneficiary>,
    pub sending_business: Option<SendingBusiness>,
    pub receiving_business: Option<ReceivingBusiness>,
    pub external_code: Option<String>,
    /// Passed through untouched; the client never listens on it.
    pub callback_url: Option<String>,
    pub purpose_of_remittance: Option<String>,
    pub document_reference_number: Option<String>,
    pub additional_information_1: Option<String>,
    pub additional_information_2: Option<String>,
    pub additional_information_3: Option<String>,
}

/// Business document attached to a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentType {
    Invoice,
    PurchaseOrder,
    DeliverySlip,
    Contract,
}

impl AttachmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttachmentType::Invoice => "invoice",
            AttachmentType::PurchaseOrder => "purchase_order",
            AttachmentType::DeliverySlip => "delivery_slip",
            AttachmentType::Contract => "contract",
        }
    }
}

impl fmt::Display for AttachmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionAttachment {
    pub id: i64,
    pub transaction_id: i64,
    pub name: String,
    pub content_type: String,
    #[serde(rename = "type")]
    pub attachment_type: AttachmentType,
}
