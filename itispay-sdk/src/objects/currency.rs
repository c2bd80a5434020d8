use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A currency supported by ItIsPay, either fiat or crypto.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub currency_code: String,
    pub is_crypto: bool,
    /// Number of decimal places the currency is quoted with.
    pub precision: u32,
    pub is_active: bool,
    /// Regular expression deposit addresses of this currency match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Supported currencies, in the order the server listed them.
///
/// `GET /currencies` answers with a bare JSON array rather than an object;
/// the client wraps it into this struct. If the API ever switches to an
/// object, decoding in [`get_currencies`] is the place that breaks.
///
/// [`get_currencies`]: crate::client::ItisPayClient::get_currencies
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrenciesResponse {
    pub currencies: Vec<Currency>,
}

impl CurrenciesResponse {
    pub fn crypto(&self) -> impl Iterator<Item = &Currency> {
        self.currencies.iter().filter(|c| c.is_crypto)
    }

    pub fn fiat(&self) -> impl Iterator<Item = &Currency> {
        self.currencies.iter().filter(|c| !c.is_crypto)
    }

    pub fn find(&self, code: &str) -> Option<&Currency> {
        self.currencies
            .iter()
            .find(|c| c.currency_code.eq_ignore_ascii_case(code))
    }
}

impl From<Vec<Currency>> for CurrenciesResponse {
    fn from(currencies: Vec<Currency>) -> Self {
        Self { currencies }
    }
}

/// Exchange rates keyed by currency code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatesResponse {
    pub rates: HashMap<String, Decimal>,
}

impl RatesResponse {
    pub fn rate(&self, code: &str) -> Option<Decimal> {
        self.rates.get(code).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_currencies_from_bare_array() {
        let body = json!([
            {
                "currency_code": "BTC",
                "is_crypto": true,
                "precision": 8,
                "is_active": true,
                "wallet_pattern": "^(bc1|[13])[a-zA-HJ-NP-Z0-9]{25,39}$",
                "network": "bitcoin",
                "created_at": "2024-01-01T00:00:00Z"
            },
            {
                "currency_code": "EUR",
                "is_crypto": false,
                "precision": 2,
                "is_active": true,
                "created_at": "2024-01-01T00:00:00Z"
            }
        ]);
        let list: Vec<Currency> = serde_json::from_value(body).unwrap();
        let currencies = CurrenciesResponse::from(list);

        assert_eq!(currencies.currencies.len(), 2);
        assert_eq!(currencies.crypto().count(), 1);
        assert_eq!(currencies.fiat().next().unwrap().currency_code, "EUR");
        assert_eq!(currencies.find("btc").unwrap().network.as_deref(), Some("bitcoin"));
        assert!(currencies.find("EUR").unwrap().wallet_pattern.is_none());
        assert!(currencies.find("XMR").is_none());
    }

    #[test]
    fn test_rates_accept_numbers() {
        let rates: RatesResponse =
            serde_json::from_value(json!({ "rates": { "BTC": 61234.5, "ETH": 3000 } })).unwrap();
        assert_eq!(rates.rate("BTC"), Some(Decimal::new(612345, 1)));
        assert_eq!(rates.rate("ETH"), Some(Decimal::new(3000, 0)));
        assert_eq!(rates.rate("DOGE"), None);
    }
}
