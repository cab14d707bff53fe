//! The publishing API client.
//!
//! One method per resource action. Each call builds a request, signs it,
//! hands it to the [`Transport`], checks the status code and decodes the
//! body. Nothing is cached between calls.

use anews_bundle::{ArticleBundle, ScanMode, assemble_signed};
use anews_core::part::CONTENT_TYPE_JSON;
use anews_core::{
    ArticleRecord, ChannelRecord, Country, Credentials, Diagnostic, DiagnosticSink, Endpoint,
    Error, HttpRequest, HttpResponse, Metadata, Method, NotificationData, NotificationResponse,
    PromotedArticles, PromotedArticlesResponse, RequestPart, Result, SearchArticlesResponse,
    SectionList, SectionRecord, TracingSink, Transport,
};
use anews_signer::{AuthorizationHeader, Signer};
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::notification::validate_alert_body;
use crate::search::SearchOptions;

const READ_CHANNEL: &str = "ReadChannel";
const READ_SECTION: &str = "ReadSection";
const LIST_SECTIONS: &str = "ListSections";
const SEARCH_ARTICLES: &str = "SearchArticles";
const READ_ARTICLE: &str = "ReadArticle";
const CREATE_ARTICLE: &str = "CreateArticle";
const UPDATE_ARTICLE: &str = "UpdateArticle";
const UPDATE_ARTICLE_METADATA: &str = "UpdateArticleMetadata";
const PROMOTE_ARTICLES: &str = "PromoteArticles";
const DELETE_ARTICLE: &str = "DeleteArticle";
const SEND_NOTIFICATION: &str = "SendNotification";

const STATUS_OK: u16 = 200;
const STATUS_CREATED: u16 = 201;
const STATUS_NO_CONTENT: u16 = 204;

/// Client for one channel of the publishing API.
pub struct NewsClient {
    signer: Signer,
    endpoint: Endpoint,
    transport: Arc<dyn Transport>,
    diagnostics: Arc<dyn DiagnosticSink>,
    scan_mode: ScanMode,
}

impl NewsClient {
    pub fn new(credentials: Credentials, endpoint: Endpoint, transport: Arc<dyn Transport>) -> Self {
        Self {
            signer: Signer::new(credentials),
            endpoint,
            transport,
            diagnostics: Arc::new(TracingSink),
            scan_mode: ScanMode::default(),
        }
    }

    /// Report diagnostics somewhere other than `tracing`.
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Choose how bundle references are found in article documents.
    pub fn with_scan_mode(mut self, scan_mode: ScanMode) -> Self {
        self.scan_mode = scan_mode;
        self
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    // --- Reads ---

    pub async fn read_channel(&self) -> Result<ChannelRecord> {
        let url = self.resource_url(&["channels", self.endpoint.channel_id()])?;
        let response = self.send_empty(READ_CHANNEL, Method::Get, &url, STATUS_OK).await?;
        self.decode(READ_CHANNEL, &response)
    }

    pub async fn read_section(&self, section_id: &str) -> Result<SectionRecord> {
        let url = self.resource_url(&["sections", section_id])?;
        let response = self.send_empty(READ_SECTION, Method::Get, &url, STATUS_OK).await?;
        self.decode(READ_SECTION, &response)
    }

    pub async fn list_sections(&self) -> Result<SectionList> {
        let url = self.resource_url(&["channels", self.endpoint.channel_id(), "sections"])?;
        let response = self.send_empty(LIST_SECTIONS, Method::Get, &url, STATUS_OK).await?;
        self.decode(LIST_SECTIONS, &response)
    }

    /// Search the channel's articles. The signature covers the query string.
    pub async fn search_articles(&self, options: &SearchOptions) -> Result<SearchArticlesResponse> {
        let base = self.resource_url(&["channels", self.endpoint.channel_id(), "articles"])?;
        let url = options.apply_to(&base)?;
        let response = self
            .send_empty(SEARCH_ARTICLES, Method::Get, &url, STATUS_OK)
            .await?;
        self.decode(SEARCH_ARTICLES, &response)
    }

    pub async fn read_article(&self, article_id: &str) -> Result<ArticleRecord> {
        let url = self.resource_url(&["articles", article_id])?;
        let response = self.send_empty(READ_ARTICLE, Method::Get, &url, STATUS_OK).await?;
        self.decode(READ_ARTICLE, &response)
    }

    // --- Writes ---

    /// Upload a new article with its bundle assets.
    pub async fn create_article(
        &self,
        bundle: &ArticleBundle,
        metadata: Option<&Metadata>,
    ) -> Result<ArticleRecord> {
        let url = self.resource_url(&["channels", self.endpoint.channel_id(), "articles"])?;
        let parts = self.bundle_parts(CREATE_ARTICLE, bundle, metadata)?;
        let response = self
            .send_multipart(CREATE_ARTICLE, &url, parts, STATUS_CREATED)
            .await?;
        let record: ArticleRecord = self.decode(CREATE_ARTICLE, &response)?;
        info!(id = %record.id(), revision = %record.revision(), "Article created");
        Ok(record)
    }

    /// Replace an article's document and assets.
    ///
    /// `revision` must be the token from the latest read or write; the
    /// service rejects stale revisions.
    pub async fn update_article(
        &self,
        article_id: &str,
        revision: &str,
        bundle: &ArticleBundle,
        metadata: Metadata,
    ) -> Result<ArticleRecord> {
        let url = self.resource_url(&["articles", article_id])?;
        let metadata = metadata.with_revision(revision);
        let parts = self.bundle_parts(UPDATE_ARTICLE, bundle, Some(&metadata))?;
        let response = self
            .send_multipart(UPDATE_ARTICLE, &url, parts, STATUS_OK)
            .await?;
        let record: ArticleRecord = self.decode(UPDATE_ARTICLE, &response)?;
        info!(id = %record.id(), revision = %record.revision(), "Article updated");
        Ok(record)
    }

    /// Change an article's metadata without re-uploading its document.
    pub async fn update_article_metadata(
        &self,
        article_id: &str,
        revision: &str,
        metadata: Metadata,
    ) -> Result<ArticleRecord> {
        let url = self.resource_url(&["articles", article_id])?;
        let body = metadata.with_revision(revision).to_request_json()?;
        let response = self
            .send_json(UPDATE_ARTICLE_METADATA, &url, body, STATUS_OK)
            .await?;
        self.decode(UPDATE_ARTICLE_METADATA, &response)
    }

    /// Set the promoted articles of a section. An empty list clears them.
    pub async fn promote_articles(
        &self,
        section_id: &str,
        article_ids: &[String],
    ) -> Result<PromotedArticlesResponse> {
        let url = self.resource_url(&["sections", section_id, "promotedArticles"])?;
        let body = PromotedArticles {
            promoted_articles: article_ids.to_vec(),
        }
        .to_request_json()?;
        let response = self
            .send_json(PROMOTE_ARTICLES, &url, body, STATUS_OK)
            .await?;
        self.decode(PROMOTE_ARTICLES, &response)
    }

    pub async fn delete_article(&self, article_id: &str) -> Result<()> {
        let url = self.resource_url(&["articles", article_id])?;
        self.send_empty(DELETE_ARTICLE, Method::Delete, &url, STATUS_NO_CONTENT)
            .await?;
        info!(id = %article_id, "Article deleted");
        Ok(())
    }

    /// Send a push notification for an article.
    ///
    /// Over-long alerts are refused before any request is made unless
    /// `ignore_warnings` is set, in which case a warning is reported instead.
    pub async fn send_notification(
        &self,
        article_id: &str,
        alert_body: &str,
        countries: &[Country],
        ignore_warnings: bool,
    ) -> Result<NotificationResponse> {
        if let Err(violation) = validate_alert_body(alert_body) {
            if !ignore_warnings {
                let err = Error::Validation(violation);
                self.report_failure(SEND_NOTIFICATION, &err);
                return Err(err);
            }
            warn!(error = %violation, "Sending notification despite alert length");
            self.diagnostics.emit(Diagnostic::Warning {
                operation: SEND_NOTIFICATION.into(),
                message: violation.to_string(),
            });
        }

        let url = self.resource_url(&["articles", article_id, "notifications"])?;
        let body = NotificationData {
            alert_body: alert_body.to_string(),
            countries: countries.to_vec(),
        }
        .to_request_json()?;
        let response = self
            .send_json(SEND_NOTIFICATION, &url, body, STATUS_CREATED)
            .await?;
        self.decode(SEND_NOTIFICATION, &response)
    }

    // --- Request plumbing ---

    /// The base URL with `segments` appended, each percent-encoded as a
    /// single path segment. The serialized form is both signed and sent.
    fn resource_url(&self, segments: &[&str]) -> Result<String> {
        let base = self.endpoint.base_url();
        let mut url = Url::parse(base)
            .map_err(|e| Error::config(format!("Invalid base URL '{base}': {e}")))?;
        url.path_segments_mut()
            .map_err(|()| Error::config(format!("Base URL '{base}' cannot have a path")))?
            .pop_if_empty()
            .extend(segments);
        Ok(url.into())
    }

    /// Metadata part (if any), the document, then resolved assets.
    fn bundle_parts(
        &self,
        operation: &str,
        bundle: &ArticleBundle,
        metadata: Option<&Metadata>,
    ) -> Result<Vec<RequestPart>> {
        let assets = bundle
            .resolve_with(self.scan_mode)
            .inspect_err(|e| self.report_failure(operation, e))?;

        let mut parts = Vec::with_capacity(assets.len() + 2);
        if let Some(metadata) = metadata {
            parts.push(RequestPart::metadata(metadata.to_request_json()?));
        }
        parts.push(RequestPart::article(bundle.document.clone()));
        parts.extend(assets);

        self.diagnostics.emit(Diagnostic::BundleResolved {
            operation: operation.into(),
            parts: parts.len(),
        });
        Ok(parts)
    }

    async fn send_empty(
        &self,
        operation: &str,
        method: Method,
        url: &str,
        expected: u16,
    ) -> Result<HttpResponse> {
        let authorization = self.signer.authorize(method, url, "", &[]);
        self.dispatch(operation, method, url, None, Vec::new(), authorization, expected)
            .await
    }

    async fn send_json(
        &self,
        operation: &str,
        url: &str,
        body: Vec<u8>,
        expected: u16,
    ) -> Result<HttpResponse> {
        let authorization = self
            .signer
            .authorize(Method::Post, url, CONTENT_TYPE_JSON, &body);
        self.dispatch(
            operation,
            Method::Post,
            url,
            Some(CONTENT_TYPE_JSON.to_string()),
            body,
            authorization,
            expected,
        )
        .await
    }

    async fn send_multipart(
        &self,
        operation: &str,
        url: &str,
        parts: Vec<RequestPart>,
        expected: u16,
    ) -> Result<HttpResponse> {
        let signed = assemble_signed(parts, url, &self.signer)
            .inspect_err(|e| self.report_failure(operation, e))?;
        self.dispatch(
            operation,
            Method::Post,
            url,
            Some(signed.content_type),
            signed.body,
            signed.authorization,
            expected,
        )
        .await
    }

    #[allow(clippy::too_many_arguments)]
    async fn dispatch(
        &self,
        operation: &str,
        method: Method,
        url: &str,
        content_type: Option<String>,
        body: Vec<u8>,
        authorization: AuthorizationHeader,
        expected: u16,
    ) -> Result<HttpResponse> {
        let mut headers = vec![("Authorization".to_string(), authorization.to_string())];
        if let Some(content_type) = content_type {
            headers.push(("Content-Type".to_string(), content_type));
        }

        self.diagnostics.emit(Diagnostic::RequestSent {
            operation: operation.into(),
            method: method.to_string(),
            url: url.to_string(),
            body_len: body.len(),
        });
        debug!(%operation, %method, %url, transport = self.transport.name(), "Sending request");

        let request = HttpRequest {
            method,
            url: url.to_string(),
            headers,
            body,
        };
        let response = match self.transport.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                let err = Error::Transport(e);
                self.report_failure(operation, &err);
                return Err(err);
            }
        };

        self.diagnostics.emit(Diagnostic::ResponseReceived {
            operation: operation.into(),
            status: response.status,
        });

        if response.status != expected {
            let err = Error::Remote {
                operation: operation.to_string(),
                status_code: response.status,
                body: response.text(),
            };
            warn!(%operation, status = response.status, body = %response.text(), "API error");
            self.report_failure(operation, &err);
            return Err(err);
        }
        Ok(response)
    }

    fn decode<T: DeserializeOwned>(&self, operation: &str, response: &HttpResponse) -> Result<T> {
        serde_json::from_slice(&response.body)
            .map_err(Error::from)
            .inspect_err(|e| self.report_failure(operation, e))
    }

    fn report_failure(&self, operation: &str, error: &Error) {
        self.diagnostics.emit(Diagnostic::OperationFailed {
            operation: operation.into(),
            message: error.to_string(),
        });
    }
}
