use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use super::traits::DashboardBackend;
use crate::errors::CoreError;
use crate::models::overview::{GeneralOverview, SheetOverview};
use crate::models::range::DateRange;
use crate::models::settings::Settings;
use crate::models::sheet::{NewSheet, SheetId, SheetRecord};

// Messages shown when a failing response carries no `error` field.
pub const FALLBACK_OVERVIEW_ALL: &str = "Erro ao carregar dashboard geral";
pub const FALLBACK_SHEET_OVERVIEW: &str = "Erro ao carregar dashboard";
pub const FALLBACK_REFRESH: &str = "Erro ao atualizar dados";
pub const FALLBACK_LIST_SHEETS: &str = "Erro ao carregar planilhas";
pub const FALLBACK_CREATE_SHEET: &str = "Erro ao cadastrar planilha";
pub const FALLBACK_DELETE_SHEET: &str = "Erro ao remover planilha";

/// Dashboard backend over HTTP/JSON.
///
/// - **Overview**: `GET /api/dashboard/overview-all`, `GET /api/dashboard/overview`
/// - **Ingestion**: `POST /api/dashboard/refresh-sheets`
/// - **Sheets**: `GET/POST /api/sheets`, `DELETE /api/sheets/:id`
///
/// Failures come back as `{ "error": "..." }` with a non-2xx status.
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(settings: &Settings) -> Result<Self, CoreError> {
        settings.validate()?;
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(settings.request_timeout_secs));
        Ok(Self {
            client: builder.build()?,
            base_url: settings.base_url().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn read_json<T: DeserializeOwned>(
        resp: Response,
        endpoint: &str,
        fallback: &str,
    ) -> Result<T, CoreError> {
        let resp = ensure_success(resp, endpoint, fallback).await?;
        resp.json::<T>().await.map_err(|e| {
            CoreError::Deserialization(format!("Failed to parse response of {endpoint}: {e}"))
        })
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// Message for a failing response: the body's `error` field when present and
/// non-blank, else `fallback`. Bodies that are not JSON also get `fallback`.
pub fn error_message_from_body(body: &str, fallback: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

async fn ensure_success(resp: Response, endpoint: &str, fallback: &str) -> Result<Response, CoreError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    let message = error_message_from_body(&body, fallback);
    warn!("{endpoint} failed with {status}: {message}");
    Err(CoreError::Api {
        endpoint: endpoint.to_string(),
        message,
    })
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl DashboardBackend for HttpBackend {
    fn name(&self) -> &str {
        "HTTP"
    }

    async fn overview_all(&self, range: &DateRange) -> Result<GeneralOverview, CoreError> {
        let endpoint = "GET /api/dashboard/overview-all";
        debug!("{endpoint} for {range}");
        let resp = self
            .client
            .get(self.url("/api/dashboard/overview-all"))
            .query(&range.query_params())
            .send()
            .await?;
        Self::read_json(resp, endpoint, FALLBACK_OVERVIEW_ALL).await
    }

    async fn sheet_overview(
        &self,
        sheet_id: &SheetId,
        range: &DateRange,
    ) -> Result<SheetOverview, CoreError> {
        let endpoint = "GET /api/dashboard/overview";
        debug!("{endpoint} for sheet {sheet_id}, {range}");
        let mut params = vec![("sheetDbId", sheet_id.to_string())];
        params.extend(range.query_params());
        let resp = self
            .client
            .get(self.url("/api/dashboard/overview"))
            .query(&params)
            .send()
            .await?;
        Self::read_json(resp, endpoint, FALLBACK_SHEET_OVERVIEW).await
    }

    async fn refresh_sheets(&self) -> Result<(), CoreError> {
        let endpoint = "POST /api/dashboard/refresh-sheets";
        debug!("{endpoint}");
        let resp = self
            .client
            .post(self.url("/api/dashboard/refresh-sheets"))
            .send()
            .await?;
        ensure_success(resp, endpoint, FALLBACK_REFRESH).await?;
        Ok(())
    }

    async fn list_sheets(&self) -> Result<Vec<SheetRecord>, CoreError> {
        let endpoint = "GET /api/sheets";
        let resp = self.client.get(self.url("/api/sheets")).send().await?;
        Self::read_json(resp, endpoint, FALLBACK_LIST_SHEETS).await
    }

    async fn create_sheet(&self, sheet: &NewSheet) -> Result<SheetRecord, CoreError> {
        let endpoint = "POST /api/sheets";
        debug!("{endpoint} '{}'", sheet.name);
        let resp = self
            .client
            .post(self.url("/api/sheets"))
            .json(sheet)
            .send()
            .await?;
        Self::read_json(resp, endpoint, FALLBACK_CREATE_SHEET).await
    }

    async fn delete_sheet(&self, id: &SheetId) -> Result<(), CoreError> {
        let endpoint = "DELETE /api/sheets/:id";
        debug!("{endpoint} {id}");
        let resp = self
            .client
            .delete(self.url(&format!("/api/sheets/{id}")))
            .send()
            .await?;
        ensure_success(resp, endpoint, FALLBACK_DELETE_SHEET).await?;
        Ok(())
    }
}
