use crate::collection::MongoCollection;
use crate::error::{MongoError, MongoResult};
use bson::doc;
use frota::common::validate_collection_name;
use frota::config::StoreConfig;
use frota::errors::FrotaResult;
use frota::store::{DocumentCollection, DocumentStore, DocumentStoreProvider};
use mongodb::options::ClientOptions;
use mongodb::sync::{Client, Database};
use std::sync::Arc;

/// MongoDB-backed document store.
///
/// Wraps a synchronous `mongodb` client bound to the database named in the
/// [StoreConfig]. Cloning is cheap and clones share the client and its
/// connection pool.
///
/// The driver connects lazily. With `verify_connection` set (the default),
/// [MongoStore::connect] pings the server so an unreachable endpoint is
/// reported as a `ConnectionError` right away instead of on first use.
///
/// ```rust,ignore
/// use frota::config::StoreConfig;
/// use frota::loan::LoanRepository;
/// use frota_mongodb_adapter::MongoStore;
///
/// let store = MongoStore::open(&StoreConfig::from_env()?)?;
/// let loans = LoanRepository::new(&store)?;
/// ```
#[derive(Clone)]
pub struct MongoStore {
    inner: Arc<MongoStoreInner>,
}

impl MongoStore {
    /// Builds the client from the configuration and, if asked to, checks that
    /// the server answers.
    pub fn connect(config: &StoreConfig) -> FrotaResult<MongoStore> {
        let inner = MongoStoreInner::connect(config).map_err(|err| {
            log::error!("Failed to open database {}: {}", config.database(), err);
            err
        })?;
        Ok(MongoStore {
            inner: Arc::new(inner),
        })
    }

    /// Same as [MongoStore::connect], wrapped as a [DocumentStore].
    pub fn open(config: &StoreConfig) -> FrotaResult<DocumentStore> {
        Ok(DocumentStore::new(MongoStore::connect(config)?))
    }
}

impl DocumentStoreProvider for MongoStore {
    fn database_name(&self) -> String {
        self.inner.database.name().to_string()
    }

    fn collection(&self, name: &str) -> FrotaResult<DocumentCollection> {
        validate_collection_name(name)?;
        let collection = self.inner.database.collection(name);
        Ok(DocumentCollection::new(MongoCollection::new(collection)))
    }

    fn collection_names(&self) -> FrotaResult<Vec<String>> {
        let mut names = self
            .inner
            .database
            .list_collection_names()
            .run()
            .map_err(|err| {
                let err = MongoError::read(err);
                log::error!("Listing collections failed: {}", err);
                err
            })?;
        names.sort();
        Ok(names)
    }

    fn drop_database(&self) -> FrotaResult<()> {
        log::debug!("Dropping database {}", self.inner.database.name());
        self.inner
            .database
            .drop()
            .run()
            .map_err(|err| {
                let err = MongoError::Write(err);
                log::error!("Dropping database failed: {}", err);
                err
            })?;
        Ok(())
    }
}

struct MongoStoreInner {
    database: Database,
}

impl MongoStoreInner {
    fn connect(config: &StoreConfig) -> MongoResult<MongoStoreInner> {
        let options = Self::client_options(config)?;
        let client = Client::with_options(options).map_err(MongoError::connect)?;
        let database = client.database(config.database());

        if config.verify_connection() {
            database
                .run_command(doc! { "ping": 1 })
                .run()
                .map_err(MongoError::connect)?;
            log::debug!("Connected to database {}", config.database());
        }

        Ok(MongoStoreInner { database })
    }

    fn client_options(config: &StoreConfig) -> MongoResult<ClientOptions> {
        let mut options = ClientOptions::parse(config.uri())
            .run()
            .map_err(MongoError::connect)?;

        if let Some(timeout) = config.connect_timeout() {
            options.connect_timeout = Some(timeout);
        }
        if let Some(timeout) = config.server_selection_timeout() {
            options.server_selection_timeout = Some(timeout);
        }
        if let Some(app_name) = config.app_name() {
            options.app_name = Some(app_name.to_string());
        }
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frota::errors::ErrorKind;
    use std::time::Duration;

    fn unreachable_config(verify: bool) -> StoreConfig {
        StoreConfig::builder()
            .uri("mongodb://127.0.0.1:1")
            .database("frota_unreachable")
            .server_selection_timeout(Duration::from_millis(200))
            .connect_timeout(Duration::from_millis(200))
            .verify_connection(verify)
            .build()
            .unwrap()
    }

    #[test]
    fn test_unreachable_server_is_connection_error() {
        let err = MongoStore::connect(&unreachable_config(true)).err().unwrap();
        assert_eq!(err.kind(), &ErrorKind::ConnectionError);
    }

    #[test]
    fn test_connect_without_verification_is_lazy() {
        let store = MongoStore::open(&unreachable_config(false)).unwrap();
        assert_eq!(store.database_name(), "frota_unreachable");

        let collection = store.collection("Loan").unwrap();
        assert_eq!(collection.name(), "Loan");
        assert_eq!(collection.count().unwrap_err().kind(), &ErrorKind::ConnectionError);
    }

    #[test]
    fn test_invalid_uri_is_validation_error() {
        let config = StoreConfig::builder()
            .uri("http://localhost")
            .build()
            .unwrap();
        let err = MongoStore::connect(&config).err().unwrap();
        assert_eq!(err.kind(), &ErrorKind::ValidationError);
    }

    #[test]
    fn test_invalid_collection_name() {
        let store = MongoStore::open(&unreachable_config(false)).unwrap();
        let err = store.collection("system.profile").err().unwrap();
        assert_eq!(err.kind(), &ErrorKind::ValidationError);
    }

    #[test]
    fn test_client_options_follow_config() {
        let config = StoreConfig::builder()
            .uri("mongodb://db.internal:27017")
            .app_name("frota-tests")
            .connect_timeout(Duration::from_secs(3))
            .server_selection_timeout(Duration::from_secs(4))
            .build()
            .unwrap();

        let options = MongoStoreInner::client_options(&config).unwrap();
        assert_eq!(options.app_name.as_deref(), Some("frota-tests"));
        assert_eq!(options.connect_timeout, Some(Duration::from_secs(3)));
        assert_eq!(options.server_selection_timeout, Some(Duration::from_secs(4)));
    }
}
