use album_service::config::AlbumConfig;
use album_service::startup::Application;

pub struct TestApp {
    pub address: String,
    #[allow(dead_code)]
    pub port: u16,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let mut config = AlbumConfig::load().expect("Failed to load configuration");
        config.common.port = 0; // Random port for testing

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");
        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint.
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp { address, port }
    }

    /// Login with the default dev credentials and return a bearer token.
    #[allow(dead_code)]
    pub async fn login(&self, client: &reqwest::Client) -> String {
        let response = client
            .post(format!("{}/login", self.address))
            .json(&serde_json::json!({"username": "demo", "password": "pass"}))
            .send()
            .await
            .expect("Failed to execute login request");
        assert_eq!(reqwest::StatusCode::OK, response.status());

        let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
        body["token"]
            .as_str()
            .expect("token missing from login response")
            .to_string()
    }

    /// Create an album through the API, returning the response body.
    #[allow(dead_code)]
    pub async fn create_album(
        &self,
        client: &reqwest::Client,
        token: &str,
        name: &str,
    ) -> serde_json::Value {
        let response = client
            .post(format!("{}/albums", self.address))
            .bearer_auth(token)
            .json(&serde_json::json!({ "name": name }))
            .send()
            .await
            .expect("Failed to execute create request");
        assert_eq!(reqwest::StatusCode::CREATED, response.status());
        response.json().await.expect("Failed to parse JSON")
    }

    /// Current total_count as reported by the list endpoint.
    #[allow(dead_code)]
    pub async fn total_count(&self, client: &reqwest::Client) -> u64 {
        let response = client
            .get(format!("{}/albums", self.address))
            .send()
            .await
            .expect("Failed to execute list request");
        assert_eq!(reqwest::StatusCode::OK, response.status());

        let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
        body["total_count"].as_u64().expect("total_count missing")
    }
}
