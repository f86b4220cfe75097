//! API test harness.
//!
//! Boots the full application (routes plus middleware stack, including the
//! response cache) against a seeded in-memory store.

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue};
use axum_test::{TestResponse, TestServer};
use coursebook_store::MemoryStore;
use serde_json::json;

use coursebook_api::{ServerConfig, catalog::demo_catalog, create_app_with_config};

/// Test harness for API testing.
///
/// # Example
///
/// ```rust,ignore
/// let harness = TestHarness::seeded();
/// let response = harness.get("/authors").await;
/// assert_eq!(response.status_code(), 200);
/// ```
pub struct TestHarness {
    /// The test server instance.
    pub server: TestServer,

    /// The storage backend; shared, so tests can mutate data mid-flight.
    pub store: Arc<MemoryStore>,

    /// Server configuration.
    pub config: ServerConfig,
}

impl TestHarness {
    /// Creates a harness over an empty store.
    pub fn new() -> Self {
        Self::with_config(ServerConfig::for_testing())
    }

    /// Creates a harness over an empty store with the given configuration.
    pub fn with_config(config: ServerConfig) -> Self {
        let store = Arc::new(MemoryStore::new());
        let catalog =
            demo_catalog(config.default_cache_directives()).expect("demo catalog must build");

        let app = create_app_with_config(Arc::clone(&store), catalog, config.clone());
        let server = TestServer::new(app).expect("Failed to create test server");

        Self {
            server,
            store,
            config,
        }
    }

    /// Creates a harness with the standard author/course fixtures loaded.
    pub fn seeded() -> Self {
        let harness = Self::new();
        harness.seed_author("a1", "Berry", "Rutherford", "1650-07-23", "Ships");
        harness.seed_author("a2", "Nancy", "Rock", "1668-05-21", "Rum");
        harness.seed_author("a3", "Eli", "Sweet", "1701-12-16", "Singing");
        harness.seed_author("a4", "Arnold", "Stafford", "1702-03-06", "Singing");
        harness.seed_course(
            "c1",
            "a1",
            "Commandeering a Ship Without Getting Caught",
            "How to sail away and avoid those pesky musketeers.",
        );
        harness.seed_course(
            "c2",
            "a1",
            "Overthrowing Mutiny",
            "Tips to avoid, or, if needed, overthrow pirate mutiny.",
        );
        harness.seed_course(
            "c3",
            "a2",
            "Avoiding Brawls While Drinking as Much Rum as You Desire",
            "Every good pirate loves rum, but it also has a tendency to get you into trouble.",
        );
        harness
    }

    /// Seeds one author.
    pub fn seed_author(
        &self,
        id: &str,
        first_name: &str,
        last_name: &str,
        date_of_birth: &str,
        main_category: &str,
    ) {
        self.store
            .insert(
                "authors",
                id,
                json!({
                    "id": id,
                    "firstName": first_name,
                    "lastName": last_name,
                    "dateOfBirth": date_of_birth,
                    "mainCategory": main_category
                }),
            )
            .expect("Failed to seed author");
    }

    /// Seeds one course.
    pub fn seed_course(&self, id: &str, author_id: &str, title: &str, description: &str) {
        self.store
            .insert(
                "courses",
                id,
                json!({
                    "id": id,
                    "authorId": author_id,
                    "title": title,
                    "description": description
                }),
            )
            .expect("Failed to seed course");
    }

    /// Makes a GET request.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.server.get(path).await
    }

    /// Makes a GET request carrying an `If-None-Match` token.
    pub async fn get_conditional(&self, path: &str, token: &str) -> TestResponse {
        self.server
            .get(path)
            .add_header(
                HeaderName::from_static("if-none-match"),
                HeaderValue::from_str(token).expect("validator token must be a header value"),
            )
            .await
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
