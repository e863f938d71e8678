use marketplace_service::config::MarketplaceConfig;
use marketplace_service::models::{Role, Store, User};
use marketplace_service::services::MongoDb;
use marketplace_service::startup::Application;
use uuid::Uuid;

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub db: MongoDb,
    pub db_name: String,
}

impl TestApp {
    pub async fn spawn() -> Self {
        if std::env::var("MONGODB_URI").is_err() {
            std::env::set_var("MONGODB_URI", "mongodb://localhost:27017");
        }

        let db_name = format!("marketplace_test_{}", Uuid::new_v4());

        let mut config = MarketplaceConfig::load().expect("Failed to load configuration");
        config.common.port = 0; // Random port for testing
        config.mongodb.database = db_name.clone();

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let db = app.db().clone();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            db,
            db_name,
        }
    }

    /// Insert a user directly; API registration is exercised separately.
    pub async fn seed_user(&self, roles: &[Role]) -> User {
        let tag = Uuid::new_v4().simple().to_string();
        let user = User::new(
            format!("user-{}", &tag[..8]),
            format!("{}@example.com", tag),
            roles.to_vec(),
        );
        self.db
            .users()
            .insert_one(&user, None)
            .await
            .expect("Failed to seed user");
        user
    }

    /// Insert a pending store owned by `owner`, bypassing the API.
    pub async fn seed_store(&self, owner: &User) -> Store {
        let store = Store::new(
            owner.id.clone(),
            "Test Store".to_string(),
            None,
            None,
            Some("A seeded store".to_string()),
            None,
            None,
        );
        self.db
            .stores()
            .insert_one(&store, None)
            .await
            .expect("Failed to seed store");
        store
    }

    /// Cleanup test resources (drops the per-test database).
    pub async fn cleanup(&self) {
        let _ = self.db.client().database(&self.db_name).drop(None).await;
    }
}
