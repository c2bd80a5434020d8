//! Invoice endpoints.

use reqwest::Method;

use super::{ClientError, ItisPayClient, NO_BODY, decode};
use crate::objects::invoice::{
    CreateInvoiceRequest, Invoice, ListInvoicesParams, ListInvoicesResponse, UpdateInvoiceRequest,
};

impl ItisPayClient {
    /// `POST /invoices` – create a new invoice.
    pub async fn create_invoice(&self, req: &CreateInvoiceRequest) -> Result<Invoice, ClientError> {
        let body = self.execute(Method::POST, "/invoices", Some(req)).await?;
        decode("invoice", &body)
    }

    /// `GET /invoices/{invoice_id}` – fetch a single invoice.
    pub async fn get_invoice(&self, invoice_id: &str) -> Result<Invoice, ClientError> {
        let path = invoice_path(invoice_id)?;
        let body = self.execute(Method::GET, &path, NO_BODY).await?;
        decode("invoice", &body)
    }

    /// `GET /invoices` – list invoices, filtered and paged by `params`.
    pub async fn list_invoices(
        &self,
        params: &ListInvoicesParams,
    ) -> Result<ListInvoicesResponse, ClientError> {
        let path = list_invoices_path(params)?;
        let body = self.execute(Method::GET, &path, NO_BODY).await?;
        decode("invoice list", &body)
    }

    /// `PATCH /invoices/{invoice_id}` – change an invoice's status.
    ///
    /// `status` is sent verbatim; pass an
    /// [`InvoiceStatus`](crate::objects::InvoiceStatus) or any string the
    /// server accepts.
    pub async fn update_invoice_status(
        &self,
        invoice_id: &str,
        status: impl AsRef<str>,
    ) -> Result<Invoice, ClientError> {
        let path = invoice_path(invoice_id)?;
        let req = UpdateInvoiceRequest {
            status: status.as_ref().to_owned(),
        };
        let body = self.execute(Method::PATCH, &path, Some(&req)).await?;
        decode("invoice", &body)
    }
}

/// Dot segments survive percent-encoding and would be collapsed by URL
/// normalization, so they are refused before any request is built.
fn invoice_path(invoice_id: &str) -> Result<String, ClientError> {
    if matches!(invoice_id, "" | "." | "..") {
        return Err(ClientError::InvalidInvoiceId(invoice_id.to_owned()));
    }
    Ok(format!("/invoices/{}", urlencoding::encode(invoice_id)))
}

fn list_invoices_path(params: &ListInvoicesParams) -> Result<String, ClientError> {
    let query = params.to_query_string()?;
    if query.is_empty() {
        Ok("/invoices".to_owned())
    } else {
        Ok(format!("/invoices?{query}"))
    }
}
