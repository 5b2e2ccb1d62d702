//! Bearer-token authorization with a single refresh-and-retry.
//!
//! When the SDK API answers 401, [`TokenAuth::send`] exchanges the refresh
//! token for a new pair, stores it, and replays the request once. A second
//! 401 is returned as [`TakeOneApiError::Unauthorized`] rather than looping.

use reqwest::StatusCode;
use tokio::sync::RwLock;

use crate::error::{parse_response, TakeOneApiError};
use crate::sdk::models::{TokenRequest, TokenResponse};

#[derive(Debug, Clone)]
struct Tokens {
    access_token: String,
    refresh_token: String,
}

/// Holds the current token pair for one app user.
pub struct TokenAuth {
    client: reqwest::Client,
    base_url: String,
    tokens: RwLock<Tokens>,
}

impl TokenAuth {
    pub fn new(client: reqwest::Client, base_url: String, tokens: TokenResponse) -> Self {
        Self {
            client,
            base_url,
            tokens: RwLock::new(Tokens {
                access_token: tokens.access_token,
                refresh_token: tokens.refresh_token,
            }),
        }
    }

    /// Exchange a one-time authorization code for a token pair.
    pub async fn exchange_code(
        client: &reqwest::Client,
        base_url: &str,
        code: &str,
    ) -> Result<TokenResponse, TakeOneApiError> {
        let body = TokenRequest::AuthorizationCode {
            code: code.to_string(),
        };
        let response = client
            .post(format!("{base_url}/sdkapi/v1/token"))
            .json(&body)
            .send()
            .await?;
        parse_response(response).await
    }

    pub async fn access_token(&self) -> String {
        self.tokens.read().await.access_token.clone()
    }

    /// Trade the refresh token for a new pair and keep it.
    pub async fn refresh(&self) -> Result<(), TakeOneApiError> {
        let refresh_token = self.tokens.read().await.refresh_token.clone();
        let body = TokenRequest::RefreshToken { refresh_token };
        let response = self
            .client
            .post(format!("{}/sdkapi/v1/token", self.base_url))
            .json(&body)
            .send()
            .await?;
        let fresh: TokenResponse = parse_response(response).await?;

        let mut tokens = self.tokens.write().await;
        tokens.access_token = fresh.access_token;
        tokens.refresh_token = fresh.refresh_token;
        tracing::info!("SDK access token refreshed");
        Ok(())
    }

    /// Send a request built by `build` with the current bearer token.
    ///
    /// `build` is called again to replay the request after a refresh.
    pub async fn send<F>(&self, build: F) -> Result<reqwest::Response, TakeOneApiError>
    where
        F: Fn() -> reqwest::RequestBuilder,
    {
        let token = self.access_token().await;
        let response = build().bearer_auth(&token).send().await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        tracing::debug!(url = %response.url(), "Access token rejected, refreshing");
        self.refresh().await?;

        let token = self.access_token().await;
        let response = build().bearer_auth(&token).send().await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            tracing::error!(url = %response.url(), "Refreshed access token rejected");
            return Err(TakeOneApiError::Unauthorized);
        }
        Ok(response)
    }
}
