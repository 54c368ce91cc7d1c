//! Optional query filters of the list endpoints.
//!
//! A filter left as `None` is not sent at all; the API applies its own
//! defaults.

/// `page` / `per_page` paging, shared by every list endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl Pagination {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
        }
    }

    pub(crate) fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        push(&mut query, "page", self.page);
        push(&mut query, "per_page", self.per_page);
        query
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceFilter {
    pub pagination: Pagination,
    pub country_iso_code: Option<String>,
}

impl ServiceFilter {
    pub(crate) fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = self.pagination.query();
        push(&mut query, "country_iso_code", self.country_iso_code.as_deref());
        query
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PayerFilter {
    pub pagination: Pagination,
    pub service_id: Option<i64>,
    pub country_iso_code: Option<String>,
    pub currency: Option<String>,
}

impl PayerFilter {
    pub fn service(service_id: i64) -> Self {
        Self {
            service_id: Some(service_id),
            ..Self::default()
        }
    }

    pub(crate) fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = self.pagination.query();
        push(&mut query, "service_id", self.service_id);
        push(&mut query, "country_iso_code", self.country_iso_code.as_deref());
        push(&mut query, "currency", self.currency.as_deref());
        query
    }
}

fn push<T: ToString>(query: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<T>) {
    if let Some(value) = value {
        query.push((key, value.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_filters_are_absent() {
        assert!(Pagination::default().query().is_empty());
        assert!(PayerFilter::default().query().is_empty());
        assert!(ServiceFilter::default().query().is_empty());
    }

    #[test]
    fn set_filters_keep_declaration_order() {
        let filter = PayerFilter {
            pagination: Pagination {
                page: None,
                per_page: Some(100),
            },
            service_id: Some(1),
            country_iso_code: None,
            currency: Some("USD".to_string()),
        };
        assert_eq!(
            filter.query(),
            vec![
                ("per_page", "100".to_string()),
                ("service_id", "1".to_string()),
                ("currency", "USD".to_string()),
            ]
        );
    }
}
