//! HTTP catalog client

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::{
    catalog::{
        CatalogClient, CatalogError,
        auth::{ApiKey, LoginRequest, Registration},
    },
    products::{Product, ProductEnvelope, ProductPage},
    session::{Credentials, UserData},
};

/// Default API root.
pub const DEFAULT_BASE_URL: &str = "https://v2.api.noroff.dev";

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "X-Noroff-API-Key";

/// Connection settings for [`HttpCatalog`].
#[derive(Debug, Clone)]
pub struct HttpCatalogConfig {
    /// API root, e.g. `"https://v2.api.noroff.dev"`.
    pub base_url: String,

    /// Credentials attached to every request.
    pub credentials: Credentials,
}

impl Default for HttpCatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            credentials: Credentials::anonymous(),
        }
    }
}

#[derive(Debug, serde::Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Catalog and auth client for the remote shop API.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    config: HttpCatalogConfig,
    http: Client,
}

impl HttpCatalog {
    /// Create a new client from the given configuration.
    pub fn new(config: HttpCatalogConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    /// Create a client reusing an existing connection pool.
    pub fn with_client(config: HttpCatalogConfig, http: Client) -> Self {
        Self { config, http }
    }

    /// Active configuration.
    pub fn config(&self) -> &HttpCatalogConfig {
        &self.config
    }

    /// Register a new user.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] on transport failure or a non-success status.
    pub async fn register(&self, registration: &Registration) -> Result<UserData, CatalogError> {
        let envelope: Envelope<UserData> = self
            .send(self.post("/auth/register", registration))
            .await?;

        Ok(envelope.data)
    }

    /// Log in and return the profile with its access token.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] on transport failure or a non-success status.
    pub async fn login(&self, login: &LoginRequest) -> Result<UserData, CatalogError> {
        let envelope: Envelope<UserData> = self.send(self.post("/auth/login", login)).await?;

        Ok(envelope.data)
    }

    /// Issue a new API key for the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] on transport failure or a non-success status.
    pub async fn create_api_key(&self, name: Option<&str>) -> Result<ApiKey, CatalogError> {
        let body = match name {
            Some(name) => serde_json::json!({ "name": name }),
            None => serde_json::json!({}),
        };

        let envelope: Envelope<ApiKey> = self
            .send(self.post("/auth/create-api-key", &body))
            .await?;

        Ok(envelope.data)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url.trim_end_matches('/'))
    }

    fn post(&self, path: &str, body: &impl Serialize) -> RequestBuilder {
        self.http.post(self.url(path)).json(body)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let credentials = &self.config.credentials;

        let request = match credentials.access_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        match credentials.api_key() {
            Some(key) => request.header(API_KEY_HEADER, key),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, CatalogError> {
        let response = self.authorize(request).send().await?;

        let status = response.status();
        let body = response.text().await?;

        debug!(status = status.as_u16(), "catalog response");

        if !status.is_success() {
            return Err(CatalogError::from_response(status.as_u16(), &body));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl CatalogClient for HttpCatalog {
    async fn list_products(&self, page: u32, limit: u32) -> Result<ProductPage, CatalogError> {
        let request = self
            .http
            .get(self.url("/online-shop"))
            .query(&[("page", page), ("limit", limit)]);

        self.send(request).await
    }

    async fn get_product(&self, id: &str) -> Result<Product, CatalogError> {
        let request = self.http.get(self.url(&format!("/online-shop/{id}")));

        match self.send::<ProductEnvelope>(request).await {
            Ok(envelope) => Ok(envelope.data),
            Err(CatalogError::Status { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => {
                Err(CatalogError::NotFound(id.to_string()))
            }
            Err(error) => Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use mockito::{Matcher, Server};
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::session::Secret;

    use super::*;

    fn client(server: &Server, credentials: Credentials) -> HttpCatalog {
        HttpCatalog::new(HttpCatalogConfig {
            base_url: server.url(),
            credentials,
        })
    }

    #[tokio::test]
    async fn list_products_sends_paging_query() -> TestResult {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/online-shop")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("page".into(), "2".into()),
                Matcher::UrlEncoded("limit".into(), "12".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"data": [{"id": "p1", "title": "Mug", "price": 10}], "meta": {"currentPage": 2, "pageCount": 3}}"#,
            )
            .create_async()
            .await;

        let page = client(&server, Credentials::anonymous())
            .list_products(2, 12)
            .await?;

        mock.assert_async().await;

        assert_eq!(page.data.len(), 1);
        assert_eq!(page.meta.current_page, 2);
        assert_eq!(page.meta.page_count, 3);

        Ok(())
    }

    #[tokio::test]
    async fn requests_carry_supplied_credentials() -> TestResult {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/online-shop/p1")
            .match_header("authorization", "Bearer tok")
            .match_header("x-noroff-api-key", "key")
            .with_status(200)
            .with_body(r#"{"data": {"id": "p1", "title": "Mug", "price": 10, "discountedPrice": 8}}"#)
            .create_async()
            .await;

        let credentials = Credentials::anonymous()
            .with_access_token(Secret::new("tok"))
            .with_api_key(Secret::new("key"));

        let product = client(&server, credentials).get_product("p1").await?;

        mock.assert_async().await;

        assert_eq!(product.effective_price(), Decimal::from(8));

        Ok(())
    }

    #[tokio::test]
    async fn anonymous_requests_carry_no_auth_headers() -> TestResult {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/online-shop/p1")
            .match_header("authorization", Matcher::Missing)
            .match_header("x-noroff-api-key", Matcher::Missing)
            .with_status(200)
            .with_body(r#"{"data": {"id": "p1"}}"#)
            .create_async()
            .await;

        client(&server, Credentials::anonymous())
            .get_product("p1")
            .await?;

        mock.assert_async().await;

        Ok(())
    }

    #[tokio::test]
    async fn missing_product_maps_to_not_found() -> TestResult {
        let mut server = Server::new_async().await;

        server
            .mock("GET", "/online-shop/nope")
            .with_status(404)
            .with_body(r#"{"errors": [{"message": "No product with such ID"}]}"#)
            .create_async()
            .await;

        let result = client(&server, Credentials::anonymous())
            .get_product("nope")
            .await;

        assert!(matches!(result, Err(CatalogError::NotFound(id)) if id == "nope"));

        Ok(())
    }

    #[tokio::test]
    async fn login_failure_reports_status_and_message() -> TestResult {
        let mut server = Server::new_async().await;

        server
            .mock("POST", "/auth/login")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "email": "kari@stud.noroff.no"
            })))
            .with_status(401)
            .with_body(r#"{"errors": [{"message": "Invalid email or password"}], "statusCode": 401}"#)
            .create_async()
            .await;

        let request = LoginRequest::new("kari@stud.noroff.no", Secret::new("password1"));
        let result = client(&server, Credentials::anonymous())
            .login(&request)
            .await;

        let Err(error) = result else {
            return Err("expected login failure".into());
        };

        assert_eq!(error.status(), Some(401));
        assert!(error.to_string().starts_with("Invalid email or password"));

        Ok(())
    }

    #[tokio::test]
    async fn login_returns_profile_with_token() -> TestResult {
        let mut server = Server::new_async().await;

        server
            .mock("POST", "/auth/login")
            .with_status(200)
            .with_body(
                r#"{"data": {"name": "kari", "email": "kari@stud.noroff.no", "accessToken": "tok"}}"#,
            )
            .create_async()
            .await;

        let request = LoginRequest::new("kari@stud.noroff.no", Secret::new("password1"));
        let user = client(&server, Credentials::anonymous())
            .login(&request)
            .await?;

        assert_eq!(user.name, "kari");
        assert_eq!(
            user.access_token.as_ref().map(Secret::expose),
            Some("tok")
        );

        Ok(())
    }
}
