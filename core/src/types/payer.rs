use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use super::{Service, TransactionType};

/// Disbursement partner able to pay out funds to a credit party.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payer {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub precision: Option<u32>,
    #[serde(default)]
    pub increment: Option<Decimal>,
    pub currency: String,
    pub country_iso_code: String,
    #[serde(default)]
    pub minimum_transaction_amount: Option<Decimal>,
    #[serde(default)]
    pub maximum_transaction_amount: Option<Decimal>,
    pub service: Service,
    #[serde(default)]
    pub transaction_types: TransactionTypes,
}

/// What a payer supports, per transaction type.
///
/// The API sends an object keyed by transaction type tag. Known tags decode
/// into `TransactionTypeRules`; any other tag is kept as raw JSON so newer
/// API versions do not break decoding.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "BTreeMap<String, Value>")]
pub struct TransactionTypes {
    known: BTreeMap<TransactionType, TransactionTypeRules>,
    other: BTreeMap<String, Value>,
}

impl TransactionTypes {
    pub fn get(&self, transaction_type: TransactionType) -> Option<&TransactionTypeRules> {
        self.known.get(&transaction_type)
    }

    pub fn supports(&self, transaction_type: TransactionType) -> bool {
        self.known.contains_key(&transaction_type)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TransactionType, &TransactionTypeRules)> {
        self.known.iter().map(|(t, rules)| (*t, rules))
    }

    /// Rules for tags this client does not model.
    pub fn other(&self) -> &BTreeMap<String, Value> {
        &self.other
    }

    pub fn insert(&mut self, transaction_type: TransactionType, rules: TransactionTypeRules) {
        self.known.insert(transaction_type, rules);
    }
}

impl TryFrom<BTreeMap<String, Value>> for TransactionTypes {
    type Error = String;

    fn try_from(raw: BTreeMap<String, Value>) -> Result<Self, Self::Error> {
        let mut types = TransactionTypes::default();
        for (tag, rules) in raw {
            match tag.parse::<TransactionType>() {
                Ok(transaction_type) => {
                    let rules = serde_json::from_value(rules)
                        .map_err(|e| format!("transaction type {tag}: {e}"))?;
                    types.known.insert(transaction_type, rules);
                }
                Err(_) => {
                    types.other.insert(tag, rules);
                }
            }
        }
        Ok(types)
    }
}

/// One entry of the serialized map, borrowed from either side.
#[derive(Serialize)]
#[serde(untagged)]
enum RulesRef<'a> {
    Known(&'a TransactionTypeRules),
    Other(&'a Value),
}

impl Serialize for TransactionTypes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut entries: BTreeMap<&str, RulesRef<'_>> = self
            .other
            .iter()
            .map(|(tag, rules)| (tag.as_str(), RulesRef::Other(rules)))
            .collect();
        for (transaction_type, rules) in &self.known {
            entries.insert(transaction_type.as_str(), RulesRef::Known(rules));
        }
        serializer.collect_map(entries)
    }
}

/// Limits and required fields for one transaction type of a payer.
///
/// Nested lists are alternatives of field sets: any inner list satisfies the
/// requirement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionTypeRules {
    pub minimum_transaction_amount: Option<Decimal>,
    pub maximum_transaction_amount: Option<Decimal>,
    pub credit_party_identifiers_accepted: Vec<Vec<String>>,
    pub required_sending_entity_fields: Vec<Vec<String>>,
    pub required_receiving_entity_fields: Vec<Vec<String>>,
    pub required_documents: Vec<Vec<String>>,
    pub credit_party_information: Option<CreditPartyInformationRules>,
    pub credit_party_verification: Option<CreditPartyVerificationRules>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreditPartyInformationRules {
    pub credit_party_identifiers_accepted: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreditPartyVerificationRules {
    pub credit_party_identifiers_accepted: Vec<Vec<String>>,
    pub required_receiving_entity_fields: Vec<Vec<String>>,
}

/// Wholesale rates of a payer.
///
/// `rates` maps source currency to destination currency to amount bands.
/// The API keeps bands of one currency pair non-overlapping; this is not
/// checked here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayerRates {
    pub destination_currency: String,
    pub rates: BTreeMap<String, BTreeMap<String, Vec<RateBand>>>,
}

impl PayerRates {
    /// The band covering `source_amount` for a currency pair, if any.
    pub fn band_for(
        &self,
        source_currency: &str,
        destination_currency: &str,
        source_amount: Decimal,
    ) -> Option<&RateBand> {
        self.rates
            .get(source_currency)?
            .get(destination_currency)?
            .iter()
            .find(|band| band.source_amount_min <= source_amount && source_amount <= band.source_amount_max)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateBand {
    pub source_amount_min: Decimal,
    pub source_amount_max: Decimal,
    pub wholesale_fx_rate: f64,
}
