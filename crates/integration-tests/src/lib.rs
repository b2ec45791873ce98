//! End-to-end tests for the Botanical Store server.
//!
//! [`TestApp::spawn`] serves the complete router (storefront plus back
//! office) on an ephemeral local port and returns a client that keeps
//! cookies and does not follow redirects, so tests can assert on
//! `Location` headers and carry the session across requests.
//!
//! ```bash
//! cargo test -p botanical-integration-tests
//! ```

use std::net::SocketAddr;

use botanical_storefront::{app, config::StorefrontConfig, state::AppState};
use reqwest::{Client, Response, redirect::Policy};

/// A running server and a cookie-keeping client pointed at it.
pub struct TestApp {
    pub address: SocketAddr,
    pub client: Client,
}

impl TestApp {
    /// Serve the app with default configuration on `127.0.0.1:0`.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot bind or the client cannot be built.
    #[allow(clippy::print_stderr)]
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let address = listener.local_addr().expect("read test listener address");
        let router = app(AppState::new(StorefrontConfig::default()));
        tokio::spawn(async move {
            if let Err(error) = axum::serve(listener, router).await {
                eprintln!("test server stopped: {error}");
            }
        });

        let client = Client::builder()
            .cookie_store(true)
            .redirect(Policy::none())
            .build()
            .expect("build test client");

        Self { address, client }
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.address)
    }

    /// # Panics
    ///
    /// Panics if the request fails.
    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request")
    }

    /// POST a form body.
    ///
    /// # Panics
    ///
    /// Panics if the request fails.
    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Response {
        self.client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("POST request")
    }

    /// Sign in through the login form.
    pub async fn login(&self, email: &str) -> Response {
        self.post_form("/login", &[("email", email), ("password", "password123")])
            .await
    }
}

/// `Location` header of a redirect, or an empty string.
#[must_use]
pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}
