use super::GatewayError;
use super::GatewayResult;
use super::UserGateway;
use crate::user::User;
use crate::user::UserFormValues;
use crate::user::UserId;
use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::Instrument;
use tracing::Span;
use url::Url;

/// `UserGateway` over a JSON REST API such as jsonplaceholder.
#[derive(Clone)]
pub struct HttpUserGateway {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpUserGateway {
    /// `base_url` must end with `/` so relative paths land beneath it.
    pub fn new(client: reqwest::Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> GatewayResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| GatewayError::Network(format!("invalid endpoint {path}: {e}")))
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> GatewayResult<Vec<u8>> {
        let request = request
            .build()
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let span = tracing::info_span!(
            "outgoing_http",
            http.method = %request.method(),
            http.url = %request.url(),
            http.status_code = tracing::field::Empty,
        );

        async move {
            let response = self.client.execute(request).await.map_err(|e| {
                tracing::warn!(error = %e, "request failed before a response arrived");
                GatewayError::Network(e.to_string())
            })?;

            let status = response.status();
            Span::current().record("http.status_code", status.as_u16());

            if !status.is_success() {
                tracing::warn!(status = status.as_u16(), "remote api rejected the request");
                return Err(GatewayError::HttpStatus {
                    status: status.as_u16(),
                });
            }

            let body = response
                .bytes()
                .await
                .map_err(|e| GatewayError::Network(e.to_string()))?;

            tracing::debug!(bytes = body.len(), "received response");
            Ok(body.to_vec())
        }
        .instrument(span)
        .await
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> GatewayResult<T> {
        let body = self.send(request).await?;
        serde_json::from_slice(&body).map_err(|e| GatewayError::Parse(e.to_string()))
    }
}

impl UserGateway for HttpUserGateway {
    async fn list_users(&self) -> GatewayResult<Vec<User>> {
        let url = self.endpoint("users")?;
        self.send_json(self.client.request(Method::GET, url)).await
    }

    async fn create_user(&self, values: UserFormValues, id: UserId) -> GatewayResult<User> {
        let url = self.endpoint("users")?;
        let body = User::from_form(id, values);
        self.send_json(self.client.request(Method::POST, url).json(&body))
            .await
    }

    async fn update_user(&self, user: User) -> GatewayResult<User> {
        let url = self.endpoint(&format!("users/{}", user.id))?;
        self.send_json(self.client.request(Method::PUT, url).json(&user))
            .await
    }

    async fn delete_user(&self, id: UserId) -> GatewayResult<()> {
        let url = self.endpoint(&format!("users/{id}"))?;
        self.send(self.client.request(Method::DELETE, url)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn gateway_for(server: &MockServer) -> HttpUserGateway {
        let base = Url::parse(&format!("{}/", server.base_url())).expect("mock server url");
        HttpUserGateway::new(reqwest::Client::new(), base)
    }

    fn id(raw: u64) -> UserId {
        UserId::try_new(raw).expect("test id should be positive")
    }

    #[tokio::test]
    async fn test_list_users() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/users");
                then.status(200).json_body(json!([
                    {
                        "id": 1,
                        "name": "Leanne Graham",
                        "username": "Bret",
                        "email": "Sincere@april.biz",
                        "phone": "1-770-736-8031 x56442"
                    },
                    {
                        "id": 2,
                        "name": "Ervin Howell",
                        "username": "Antonette",
                        "email": "Shanna@melissa.tv"
                    }
                ]));
            })
            .await;

        let users = gateway_for(&server)
            .list_users()
            .await
            .expect("list should succeed");

        mock.assert_async().await;
        assert_eq!(users.len(), 2);
        assert_eq!(users[1].username, "Antonette");
    }

    #[tokio::test]
    async fn test_create_sends_values_and_local_id() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/users").json_body(json!({
                    "id": 500,
                    "name": "Alice",
                    "email": "alice@example.com",
                    "username": "alice"
                }));
                then.status(201).json_body(json!({
                    "id": 11,
                    "name": "Alice",
                    "email": "alice@example.com",
                    "username": "alice"
                }));
            })
            .await;

        let created = gateway_for(&server)
            .create_user(
                UserFormValues {
                    name: "Alice".to_owned(),
                    email: "alice@example.com".to_owned(),
                    username: "alice".to_owned(),
                },
                id(500),
            )
            .await
            .expect("create should succeed");

        mock.assert_async().await;
        assert_eq!(created.id, id(11));
    }

    #[tokio::test]
    async fn test_update_uses_id_in_path() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(PUT).path("/users/3");
                then.status(200).json_body(json!({
                    "id": 3,
                    "name": "Clementine",
                    "email": "c@example.com",
                    "username": "clem"
                }));
            })
            .await;

        let user = User {
            id: id(3),
            name: "Clementine".to_owned(),
            email: "c@example.com".to_owned(),
            username: "clem".to_owned(),
        };

        let updated = gateway_for(&server)
            .update_user(user.clone())
            .await
            .expect("update should succeed");

        mock.assert_async().await;
        assert_eq!(updated, user);
    }

    #[tokio::test]
    async fn test_delete_ignores_body() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(DELETE).path("/users/4");
                then.status(200).body("{}");
            })
            .await;

        gateway_for(&server)
            .delete_user(id(4))
            .await
            .expect("delete should succeed");

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_status_is_reported() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(PUT).path("/users/42");
                then.status(500);
            })
            .await;

        let user = User {
            id: id(42),
            name: "Nobody".to_owned(),
            email: "n@example.com".to_owned(),
            username: "nobody".to_owned(),
        };

        let err = gateway_for(&server)
            .update_user(user)
            .await
            .expect_err("500 should fail");

        assert_eq!(err, GatewayError::HttpStatus { status: 500 });
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_parse_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/users");
                then.status(200).body("not json");
            })
            .await;

        let err = gateway_for(&server)
            .list_users()
            .await
            .expect_err("garbage should fail");

        assert!(matches!(err, GatewayError::Parse(_)));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_a_network_error() {
        // nothing listens on port 9 locally
        let base = Url::parse("http://127.0.0.1:9/").expect("static url");
        let gateway = HttpUserGateway::new(reqwest::Client::new(), base);

        let err = gateway
            .delete_user(id(1))
            .await
            .expect_err("connection should fail");

        assert!(matches!(err, GatewayError::Network(_)));
    }
}
