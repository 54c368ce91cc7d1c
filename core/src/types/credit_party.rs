use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_with::skip_serializing_none;

use super::party::{Beneficiary, ReceivingBusiness};

/// Identifies the receiving account. Each payer accepts specific
/// combinations of schemes (see `TransactionTypeRules`); typically only the
/// fields of one scheme are set.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditPartyIdentifier {
    pub msisdn: Option<String>,
    pub bank_account_number: Option<String>,
    pub iban: Option<String>,
    pub clabe: Option<String>,
    pub cbu: Option<String>,
    pub cbu_alias: Option<String>,
    pub swift_bic_code: Option<String>,
    pub bik_code: Option<String>,
    pub ifs_code: Option<String>,
    pub sort_code: Option<String>,
    pub aba_routing_number: Option<String>,
    pub bsb_number: Option<String>,
    pub branch_number: Option<String>,
    pub routing_code: Option<String>,
    pub entity_tt_id: Option<i64>,
    pub account_type: Option<String>,
    pub account_number: Option<String>,
    pub email: Option<String>,
}

impl CreditPartyIdentifier {
    /// Mobile wallet identified by its phone number.
    pub fn msisdn(msisdn: &str) -> Self {
        Self {
            msisdn: Some(msisdn.to_string()),
            ..Self::default()
        }
    }

    pub fn iban(iban: &str) -> Self {
        Self {
            iban: Some(iban.to_string()),
            ..Self::default()
        }
    }
}

/// Body of the credit-party information and verification calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditPartyRequest {
    pub credit_party_identifier: CreditPartyIdentifier,
}

/// Account details returned by the credit-party information call.
///
/// The shape is chosen by the transaction type the caller asked about:
/// C2C and B2C answer with a beneficiary, C2B and B2B with a receiving
/// business.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreditPartyInformation {
    Beneficiary(Beneficiary),
    ReceivingBusiness(ReceivingBusiness),
}

impl CreditPartyInformation {
    pub fn beneficiary(&self) -> Option<&Beneficiary> {
        match self {
            CreditPartyInformation::Beneficiary(b) => Some(b),
            CreditPartyInformation::ReceivingBusiness(_) => None,
        }
    }

    pub fn receiving_business(&self) -> Option<&ReceivingBusiness> {
        match self {
            CreditPartyInformation::ReceivingBusiness(b) => Some(b),
            CreditPartyInformation::Beneficiary(_) => None,
        }
    }
}

/// Outcome of a credit-party verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationStatus {
    pub id: i64,
    pub account_status: AccountStatus,
}

/// Whether the credit party can receive a transfer. Values the client does
/// not know yet are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AccountStatus {
    /// Account is available and can receive a transfer.
    Available,
    /// Account is not registered but can still receive a transfer.
    Unregistered,
    Unavailable,
    BeneficiaryMismatch,
    InvalidAccount,
    BarredAccount,
    Other(String),
}

impl AccountStatus {
    pub fn as_str(&self) -> &str {
        match self {
            AccountStatus::Available => "AVAILABLE",
            AccountStatus::Unregistered => "UNREGISTERED",
            AccountStatus::Unavailable => "UNAVAILABLE",
            AccountStatus::BeneficiaryMismatch => "UNAVAILABLE-BENEFICIARY-MISMATCH",
            AccountStatus::InvalidAccount => "UNAVAILABLE-INVALID-ACCOUNT",
            AccountStatus::BarredAccount => "UNAVAILABLE-BARRED-ACCOUNT",
            AccountStatus::Other(other) => other,
        }
    }

    /// True for the two statuses under which a transfer will be accepted.
    pub fn can_receive(&self) -> bool {
        matches!(self, AccountStatus::Available | AccountStatus::Unregistered)
    }
}

impl From<&str> for AccountStatus {
    fn from(s: &str) -> Self {
        match s {
            "AVAILABLE" => AccountStatus::Available,
            "UNREGISTERED" => AccountStatus::Unregistered,
            "UNAVAILABLE" => AccountStatus::Unavailable,
            "UNAVAILABLE-BENEFICIARY-MISMATCH" => AccountStatus::BeneficiaryMismatch,
            "UNAVAILABLE-INVALID-ACCOUNT" => AccountStatus::InvalidAccount,
            "UNAVAILABLE-BARRED-ACCOUNT" => AccountStatus::BarredAccount,
            other => AccountStatus::Other(other.to_string()),
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for AccountStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AccountStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(AccountStatus::from(raw.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_schemes_are_omitted() {
        let body = serde_json::to_value(CreditPartyRequest {
            credit_party_identifier: CreditPartyIdentifier::msisdn("+263775892100"),
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"credit_party_identifier": {"msisdn": "+263775892100"}})
        );
    }

    #[test]
    fn account_status_known_and_unknown() {
        let status: VerificationStatus =
            serde_json::from_str(r#"{"id":7,"account_status":"UNAVAILABLE-BARRED-ACCOUNT"}"#)
                .unwrap();
        assert_eq!(status.account_status, AccountStatus::BarredAccount);
        assert!(!status.account_status.can_receive());

        let status: VerificationStatus =
            serde_json::from_str(r#"{"id":7,"account_status":"PENDING-KYC"}"#).unwrap();
        assert_eq!(status.account_status, AccountStatus::Other("PENDING-KYC".into()));
        assert_eq!(
            serde_json::to_string(&status.account_status).unwrap(),
            "\"PENDING-KYC\""
        );
    }
}
