//! Sending and receiving parties. Which two of these a transaction needs
//! depends on its type: C2C uses sender and beneficiary, C2B sender and
//! receiving business, B2C sending business and beneficiary, B2B both
//! businesses.
//!
//! Dates are ISO 8601 strings and country codes ISO 3166-1 alpha-3, passed
//! through as the API sends them.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// Individual sending the funds.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sender {
    pub lastname: Option<String>,
    pub lastname2: Option<String>,
    pub middlename: Option<String>,
    pub firstname: Option<String>,
    pub nativename: Option<String>,
    pub nationality_country_iso_code: Option<String>,
    pub code: Option<String>,
    pub date_of_birth: Option<String>,
    pub country_of_birth_iso_code: Option<String>,
    /// `MALE` or `FEMALE`.
    pub gender: Option<String>,
    pub address: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub country_iso_code: Option<String>,
    pub msisdn: Option<String>,
    pub email: Option<String>,
    pub id_type: Option<String>,
    pub id_country_iso_code: Option<String>,
    pub id_number: Option<String>,
    pub id_delivery_date: Option<String>,
    pub id_expiration_date: Option<String>,
    pub occupation: Option<String>,
    pub bank: Option<String>,
    pub bank_account: Option<String>,
    pub card: Option<String>,
    pub province_state: Option<String>,
    pub beneficiary_relationship: Option<String>,
    pub source_of_funds: Option<String>,
}

/// Individual receiving the funds (C2C, B2C).
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Beneficiary {
    pub lastname: Option<String>,
    pub lastname2: Option<String>,
    pub middlename: Option<String>,
    pub firstname: Option<String>,
    pub nativename: Option<String>,
    pub nationality_country_iso_code: Option<String>,
    pub code: Option<String>,
    pub date_of_birth: Option<String>,
    pub country_of_birth_iso_code: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub country_iso_code: Option<String>,
    pub msisdn: Option<String>,
    pub email: Option<String>,
    pub id_type: Option<String>,
    pub id_country_iso_code: Option<String>,
    pub id_number: Option<String>,
    pub id_delivery_date: Option<String>,
    pub id_expiration_date: Option<String>,
    pub occupation: Option<String>,
    pub bank_account_holder_name: Option<String>,
    pub province_state: Option<String>,
}

/// Business sending the funds (B2C, B2B).
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendingBusiness {
    pub registered_name: Option<String>,
    pub trading_name: Option<String>,
    pub address: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub province_state: Option<String>,
    pub country_iso_code: Option<String>,
    pub msisdn: Option<String>,
    pub email: Option<String>,
    pub registration_number: Option<String>,
    pub code: Option<String>,
    pub tax_id: Option<String>,
    pub date_of_incorporation: Option<String>,
    pub representative_lastname: Option<String>,
    pub representative_lastname2: Option<String>,
    pub representative_firstname: Option<String>,
    pub representative_middlename: Option<String>,
    pub representative_nativename: Option<String>,
    pub representative_id_type: Option<String>,
    pub representative_id_country_iso_code: Option<String>,
    pub representative_id_number: Option<String>,
    pub representative_id_delivery_date: Option<String>,
    pub representative_id_expiration_date: Option<String>,
}

/// Business receiving the funds (C2B, B2B).
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceivingBusiness {
    pub registered_name: Option<String>,
    pub trading_name: Option<String>,
    pub address: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub province_state: Option<String>,
    pub country_iso_code: Option<String>,
    pub msisdn: Option<String>,
    pub email: Option<String>,
    pub registration_number: Option<String>,
    pub tax_id: Option<String>,
    pub date_of_incorporation: Option<String>,
    pub representative_lastname: Option<String>,
    pub representative_lastname2: Option<String>,
    pub representative_firstname: Option<String>,
    pub representative_middlename: Option<String>,
    pub representative_nativename: Option<String>,
    pub representative_id_type: Option<String>,
    pub representative_id_country_iso_code: Option<String>,
    pub representative_id_number: Option<String>,
    pub representative_id_delivery_date: Option<String>,
    pub representative_id_expiration_date: Option<String>,
}
