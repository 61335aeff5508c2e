use chrono::NaiveDate;
use std::panic::{catch_unwind, resume_unwind, AssertUnwindSafe};
use frota::errors::{ErrorKind, FrotaError, FrotaResult};
use frota::store::DocumentStore;

/// Runs a test between its setup and teardown.
///
/// `after` runs even when the test fails, so a live database created by
/// `before` is always dropped. Failures and panics fail the calling test.
pub fn run_test<T, B, A>(before: B, test: T, after: A)
where
    T: Fn(TestContext) -> FrotaResult<()>,
    B: Fn() -> FrotaResult<TestContext>,
    A: Fn(TestContext) -> FrotaResult<()>,
{
    let ctx = match before() {
        Ok(ctx) => ctx,
        Err(e) => panic!("Before run failed: {:?}", e),
    };

    let test_ctx = ctx.clone();
    let result = catch_unwind(AssertUnwindSafe(move || test(test_ctx)));
    let after_result = after(ctx);

    match result {
        Ok(Ok(())) => {}
        Ok(Err(e)) => panic!("Test failed: {:?}", e),
        Err(panic_err) => resume_unwind(panic_err),
    }

    if let Err(e) = after_result {
        panic!("After run failed: {:?}", e);
    }
}

#[derive(Clone)]
pub struct TestContext {
    database: String,
    store: DocumentStore,
}

impl TestContext {
    pub fn new(database: String, store: DocumentStore) -> Self {
        Self { database, store }
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn store(&self) -> DocumentStore {
        self.store.clone()
    }
}

pub fn random_database_name() -> String {
    format!("frota_test_{}", uuid::Uuid::new_v4().simple())
}

#[cfg(not(feature = "mongodb"))]
pub fn create_test_context() -> FrotaResult<TestContext> {
    use frota::config::StoreConfig;
    use frota::store::InMemoryStore;

    let database = random_database_name();
    let config = StoreConfig::builder().database(&database).build()?;
    Ok(TestContext::new(database, InMemoryStore::open(&config)))
}

#[cfg(feature = "mongodb")]
pub fn create_test_context() -> FrotaResult<TestContext> {
    use frota::config::StoreConfig;
    use frota_mongodb_adapter::MongoStore;

    let env = StoreConfig::from_env()?;
    let database = random_database_name();

    let mut builder = StoreConfig::builder()
        .uri(env.uri())
        .database(&database)
        .app_name(env.app_name().unwrap_or("frota-int-test"));
    if let Some(timeout) = env.connect_timeout() {
        builder = builder.connect_timeout(timeout);
    }
    if let Some(timeout) = env.server_selection_timeout() {
        builder = builder.server_selection_timeout(timeout);
    }

    let store = MongoStore::open(&builder.build()?)?;
    Ok(TestContext::new(database, store))
}

pub fn cleanup(ctx: TestContext) -> FrotaResult<()> {
    ctx.store().drop_database()
}

/// Calendar date shorthand for test data.
pub fn date(year: i32, month: u32, day: u32) -> FrotaResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        FrotaError::new(
            &format!("Invalid date {}-{}-{}", year, month, day),
            ErrorKind::ValidationError,
        )
    })
}
