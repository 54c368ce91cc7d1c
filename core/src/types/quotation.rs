use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CurrencyAmount, Payer, Source, TransactionType};

/// Which side of the currency pair the caller fixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuotationMode {
    SourceAmount,
    DestinationAmount,
}

/// The amount a quotation is priced from. The other side is computed by the
/// API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotationAmount {
    Source(Decimal),
    Destination(Decimal),
}

impl QuotationAmount {
    pub fn mode(&self) -> QuotationMode {
        match self {
            QuotationAmount::Source(_) => QuotationMode::SourceAmount,
            QuotationAmount::Destination(_) => QuotationMode::DestinationAmount,
        }
    }
}

/// Everything a quotation needs apart from the amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuotation {
    /// Caller-chosen unique reference, usable later as `ext-<external_id>`.
    pub external_id: String,
    pub payer_id: i64,
    pub transaction_type: TransactionType,
    pub source_currency: String,
    pub source_country_iso_code: String,
    pub destination_currency: String,
}

/// Body of `POST /v2/money-transfer/quotations`.
///
/// Exactly one of `source.amount` and `destination.amount` is set, matching
/// `mode`; the other is sent as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateQuotationRequest {
    pub external_id: String,
    pub payer_id: String,
    pub mode: QuotationMode,
    pub transaction_type: TransactionType,
    pub source: Source,
    pub destination: CurrencyAmount,
}

impl CreateQuotationRequest {
    pub fn new(quotation: &NewQuotation, amount: QuotationAmount) -> Self {
        let (source_amount, destination_amount) = match amount {
            QuotationAmount::Source(amount) => (Some(amount), None),
            QuotationAmount::Destination(amount) => (None, Some(amount)),
        };
        Self {
            external_id: quotation.external_id.clone(),
            payer_id: quotation.payer_id.to_string(),
            mode: amount.mode(),
            transaction_type: quotation.transaction_type,
            source: Source {
                country_iso_code: quotation.source_country_iso_code.clone(),
                currency: quotation.source_currency.clone(),
                amount: source_amount,
            },
            destination: CurrencyAmount {
                currency: quotation.destination_currency.clone(),
                amount: destination_amount,
            },
        }
    }
}

/// A price lock between a source and a destination amount, valid until
/// `expiration_date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quotation {
    pub id: i64,
    #[serde(default)]
    pub external_id: Option<String>,
    pub payer: Payer,
    pub mode: QuotationMode,
    pub transaction_type: TransactionType,
    pub source: Source,
    pub destination: CurrencyAmount,
    #[serde(default)]
    pub sent_amount: Option<CurrencyAmount>,
    #[serde(default)]
    pub wholesale_fx_rate: Option<f64>,
    #[serde(default)]
    pub fee: Option<CurrencyAmount>,
    pub creation_date: String,
    pub expiration_date: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_quotation() -> NewQuotation {
        NewQuotation {
            external_id: "1481184321405".to_string(),
            payer_id: 1,
            transaction_type: TransactionType::C2C,
            source_currency: "EUR".to_string(),
            source_country_iso_code: "FRA".to_string(),
            destination_currency: "USD".to_string(),
        }
    }

    #[test]
    fn source_mode_nulls_destination_amount() {
        let body = serde_json::to_value(CreateQuotationRequest::new(
            &new_quotation(),
            QuotationAmount::Source(Decimal::from(10)),
        ))
        .unwrap();
        assert_eq!(body["mode"], "SOURCE_AMOUNT");
        assert_eq!(body["payer_id"], "1");
        assert_eq!(body["transaction_type"], "C2C");
        assert_eq!(body["source"]["country_iso_code"], "FRA");
        assert!(!body["source"]["amount"].is_null());
        assert!(body["destination"]["amount"].is_null());
        assert!(body["destination"].as_object().unwrap().contains_key("amount"));
    }

    #[test]
    fn destination_mode_nulls_source_amount() {
        let request = CreateQuotationRequest::new(
            &new_quotation(),
            QuotationAmount::Destination(Decimal::new(2550, 2)),
        );
        assert_eq!(request.source.amount, None);
        assert_eq!(request.destination.amount, Some(Decimal::new(2550, 2)));

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["mode"], "DESTINATION_AMOUNT");
        assert!(body["source"]["amount"].is_null());
        let amount: Decimal = serde_json::from_value(body["destination"]["amount"].clone()).unwrap();
        assert_eq!(amount, Decimal::new(2550, 2));
    }
}
