//! Chat server client.

use reqwest::{Method, Response};

use crate::error::ClientError;

/// Field delimiter of request and response bodies
const DELIMITER: char = ',';

/// Client for one chat server
#[derive(Debug, Clone)]
pub struct ChatClient {
    server_address: String,
    http_client: reqwest::Client,
}

impl ChatClient {
    /// Create a client for a server such as `http://127.0.0.1:8080`
    pub fn new(server_address: impl Into<String>) -> Self {
        Self {
            server_address: server_address.into().trim_end_matches('/').to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    pub fn server_address(&self) -> &str {
        &self.server_address
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> Result<String, ClientError> {
        let url = format!("{}{}", self.server_address, path);
        let mut request = self.http_client.request(method, &url);
        if let Some(body) = body {
            request = request.body(body);
        }
        tracing::debug!("Sending request to {}", url);
        let response = request.send().await?;
        read_response(response).await
    }

    /// Register a user
    pub async fn register_user(&self, username: &str) -> Result<(), ClientError> {
        self.send(Method::POST, "/user/add", Some(username.to_string()))
            .await
            .map(|_| ())
    }

    /// List registered users
    pub async fn list_users(&self) -> Result<Vec<String>, ClientError> {
        let body = self.send(Method::GET, "/users", None).await?;
        Ok(split_names(&body))
    }

    /// Create a room
    pub async fn create_room(&self, room_name: &str) -> Result<(), ClientError> {
        self.send(Method::POST, "/room/add", Some(room_name.to_string()))
            .await
            .map(|_| ())
    }

    /// Join a registered user to a room
    pub async fn join_room(&self, room_name: &str, username: &str) -> Result<(), ClientError> {
        let body = format!("{}{}{}", room_name, DELIMITER, username);
        self.send(Method::POST, "/room/user/add", Some(body))
            .await
            .map(|_| ())
    }

    /// List room names
    pub async fn get_rooms(&self) -> Result<Vec<String>, ClientError> {
        let body = self.send(Method::GET, "/room/names", None).await?;
        Ok(split_names(&body))
    }

    /// List the members of a room
    pub async fn get_room_users(&self, room_name: &str) -> Result<Vec<String>, ClientError> {
        let body = self
            .send(Method::GET, "/room/users", Some(room_name.to_string()))
            .await?;
        Ok(split_names(&body))
    }

    /// Post a message to a room
    pub async fn post_message(
        &self,
        room_name: &str,
        username: &str,
        message: &str,
    ) -> Result<(), ClientError> {
        let body = format!(
            "{}{}{}{}{}",
            room_name, DELIMITER, username, DELIMITER, message
        );
        self.send(Method::POST, "/room/message/add", Some(body))
            .await
            .map(|_| ())
    }

    /// Get the formatted transcript of a room
    pub async fn get_messages(&self, room_name: &str) -> Result<String, ClientError> {
        self.send(Method::GET, "/room/messages", Some(room_name.to_string()))
            .await
    }

    /// Check that the server is up
    pub async fn health(&self) -> Result<(), ClientError> {
        self.send(Method::GET, "/api/health", None).await.map(|_| ())
    }
}

async fn read_response(response: Response) -> Result<String, ClientError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(ClientError::Server { status, body });
    }
    Ok(body)
}

/// Split a comma-joined list; an empty body is an empty list.
fn split_names(body: &str) -> Vec<String> {
    if body.is_empty() {
        return Vec::new();
    }
    body.split(DELIMITER).map(str::to_string).collect()
}
