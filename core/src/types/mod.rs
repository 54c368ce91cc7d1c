//! Wire DTOs for the money-transfer API.
//!
//! # Design
//! Every type mirrors a JSON object of the API with `snake_case` field names.
//! Monetary amounts are `Decimal`, which accepts both JSON numbers and
//! strings; FX rates stay `f64`. Request payloads omit unset optional fields.

mod credit_party;
mod party;
mod payer;
mod quotation;
mod transaction;

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use credit_party::{
    AccountStatus, CreditPartyIdentifier, CreditPartyInformation, CreditPartyRequest,
    VerificationStatus,
};
pub use party::{Beneficiary, ReceivingBusiness, Sender, SendingBusiness};
pub use payer::{
    CreditPartyInformationRules, CreditPartyVerificationRules, Payer, PayerRates, RateBand,
    TransactionTypeRules, TransactionTypes,
};
pub use quotation::{CreateQuotationRequest, NewQuotation, Quotation, QuotationAmount, QuotationMode};
pub use transaction::{
    AttachmentType, CreateTransactionRequest, Transaction, TransactionAttachment,
};

/// Who sends and who receives: consumer or business on either side.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    C2C,
    C2B,
    B2C,
    B2B,
}

impl TransactionType {
    pub const ALL: [TransactionType; 4] = [
        TransactionType::C2C,
        TransactionType::C2B,
        TransactionType::B2C,
        TransactionType::B2B,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::C2C => "C2C",
            TransactionType::C2B => "C2B",
            TransactionType::B2C => "B2C",
            TransactionType::B2B => "B2B",
        }
    }

    /// True when the receiving side is a business (C2B, B2B).
    pub fn to_business(&self) -> bool {
        matches!(self, TransactionType::C2B | TransactionType::B2B)
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TransactionType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown transaction type: {s}"))
    }
}

/// Result of `ping`; `"up"` when the credentials are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub status: String,
}

/// A money-transfer corridor such as `MobileWallet` or `BankAccount`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub iso_code: String,
    pub name: String,
}

/// Payer matched by a SWIFT BIC lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lookup {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
}

/// Account balance in one currency. The server computes
/// `available = balance - pending + credit_facility`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub id: i64,
    pub currency: String,
    pub balance: Decimal,
    pub pending: Decimal,
    pub available: Decimal,
    pub credit_facility: Decimal,
}

/// Sending side of a quotation or transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub country_iso_code: String,
    pub currency: String,
    pub amount: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyAmount {
    pub currency: String,
    pub amount: Option<Decimal>,
}
