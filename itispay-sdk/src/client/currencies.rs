//! Currency and exchange-rate endpoints.

use reqwest::Method;

use super::{ClientError, ItisPayClient, NO_BODY, decode};
use crate::objects::currency::{CurrenciesResponse, Currency, RatesResponse};

impl ItisPayClient {
    /// `GET /currencies` – list supported fiat and crypto currencies.
    ///
    /// The endpoint returns a bare JSON array; it is wrapped into
    /// [`CurrenciesResponse`] keeping the server's order.
    pub async fn get_currencies(&self) -> Result<CurrenciesResponse, ClientError> {
        let body = self.execute(Method::GET, "/currencies", NO_BODY).await?;
        let currencies: Vec<Currency> = decode("currency list", &body)?;
        Ok(CurrenciesResponse::from(currencies))
    }

    /// `GET /rates` – current exchange rates.
    pub async fn get_rates(&self) -> Result<RatesResponse, ClientError> {
        let body = self.execute(Method::GET, "/rates", NO_BODY).await?;
        decode("rates", &body)
    }
}
