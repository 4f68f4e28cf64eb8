//! End-to-end scenarios across the codec, chain records, stores and the
//! resolver.

use std::sync::{Mutex, Once};
use std::time::Duration;

use async_trait::async_trait;
use iprs::chain::{ChainError, ChainRecord, DagService};
use iprs::core::{type_node, RecordPayload};
use iprs::store::{Path, SqliteDatastore, Store, StoreError};
use iprs::{
    marshal, select_best, unmarshal_from_set, Context, NodeHash, Record, RecordRef, Resolver,
    ResolverConfig, ResolverError,
};
use iprs_testkit::{PrefixValidator, TestFixture};
use tokio::sync::mpsc;

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

/// A store that delivers its candidates one at a time, like a networked
/// store hearing back from peers, and optionally never closes the channel.
struct TrickleStore {
    fixture: TestFixture,
    candidates: Mutex<Vec<RecordRef>>,
    delay: Duration,
    hold_open: bool,
}

impl TrickleStore {
    fn new(fixture: TestFixture, delay: Duration, hold_open: bool) -> Self {
        Self {
            fixture,
            candidates: Mutex::new(Vec::new()),
            delay,
            hold_open,
        }
    }

    fn snapshot(&self) -> Vec<RecordRef> {
        self.candidates.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Store for TrickleStore {
    async fn put(&self, ctx: &Context, _path: &Path, record: &dyn Record) -> iprs::store::Result<()> {
        if let Some(err) = ctx.err() {
            return Err(err.into());
        }
        let decoded = unmarshal_from_set(&self.fixture.types, &marshal(record))?;
        if let Ok(mut candidates) = self.candidates.lock() {
            candidates.push(decoded);
        }
        Ok(())
    }

    async fn get(&self, _ctx: &Context, path: &Path) -> iprs::store::Result<RecordRef> {
        select_best(&self.snapshot()).ok_or_else(|| StoreError::NotFound(path.to_string()))
    }

    async fn get_chan(&self, _ctx: &Context, _path: &Path) -> iprs::store::Result<mpsc::Receiver<RecordRef>> {
        let (tx, rx) = mpsc::channel(8);
        let candidates = self.snapshot();
        let delay = self.delay;
        let hold_open = self.hold_open;

        tokio::spawn(async move {
            for candidate in candidates {
                tokio::time::sleep(delay).await;
                if tx.send(candidate).await.is_err() {
                    return;
                }
            }
            if hold_open {
                tx.closed().await;
            }
        });
        Ok(rx)
    }
}

#[tokio::test]
async fn test_version_dominance_through_store() -> anyhow::Result<()> {
    init_tracing();
    let fixture = TestFixture::new();
    let store = fixture.memory_store();
    let ctx = Context::background();
    let path = Path::new("/a");

    let r1 = fixture.entry(1, b"one");
    store.put(&ctx, &path, &r1).await?;
    assert_eq!(store.get(&ctx, &path).await?.version(), 1);

    let r2 = fixture.entry(2, b"two");
    store.put(&ctx, &path, &r2).await?;
    let best = store.get(&ctx, &path).await?;
    assert_eq!(best.version(), 2);
    assert_eq!(best.node(), r2.node());
    Ok(())
}

#[tokio::test]
async fn test_best_record_survives_out_of_order_puts() -> anyhow::Result<()> {
    init_tracing();
    let fixture = TestFixture::new();
    let resolver = Resolver::new(fixture.memory_store(), ResolverConfig::default());
    let ctx = Context::background();
    let path = Path::new("/names/bob");

    for version in [3, 1, 5, 2, 4] {
        resolver
            .publish(&ctx, &path, &fixture.entry(version, format!("v{}", version).as_bytes()))
            .await?;
    }

    let best = resolver.resolve(&ctx, &path).await?;
    assert_eq!(best.version(), 5);
    assert_eq!(best.value(), b"v5");
    Ok(())
}

#[tokio::test]
async fn test_parents_ordered_and_all_or_nothing() -> anyhow::Result<()> {
    init_tracing();
    let fixture = TestFixture::new();
    let ctx = Context::background();

    let p1 = fixture.entry(1, b"p1");
    let p2 = fixture.entry(1, b"p2");
    let h1 = fixture.add(&p1).await?;
    let h2 = fixture.add(&p2).await?;

    let child = fixture
        .chain
        .builder()
        .version(2)
        .parent(h1)
        .parent(h2)
        .record(h1)
        .build()?;

    let parents = child.parents(&ctx, fixture.dag.as_ref()).await?;
    let values: Vec<Vec<u8>> = parents.iter().map(|p| p.value().to_vec()).collect();
    assert_eq!(values, vec![b"p1".to_vec(), b"p2".to_vec()]);

    fixture.dag.remove(&h2).await;
    match child.parents(&ctx, fixture.dag.as_ref()).await {
        Err(ChainError::NodeNotFound(hash)) => assert_eq!(hash, h2),
        other => panic!("expected NodeNotFound for the second parent, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn test_chain_record_wraps_record_of_other_type() -> anyhow::Result<()> {
    init_tracing();
    let fixture = TestFixture::new();
    let ctx = Context::background();

    // a record whose type the fixture's type set does not know
    let foreign = RecordPayload::new(1, Vec::new(), b"foreign".to_vec())
        .to_node(type_node("iprs/unknown").hash(), Vec::new());
    let foreign_hash = fixture.dag.add(&ctx, &foreign).await?;

    let entry: ChainRecord = fixture.chain.builder().record(foreign_hash).build()?;
    let result = entry.record(&ctx, fixture.dag.as_ref(), &fixture.types).await;
    assert!(matches!(
        result,
        Err(ChainError::Core(iprs::CoreError::UnsupportedType(key))) if key == type_node("iprs/unknown").hash()
    ));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_resolve_returns_best_so_far_on_deadline() -> anyhow::Result<()> {
    init_tracing();
    let fixture = TestFixture::with_validator(PrefixValidator::new(b"ok"));
    let store = TrickleStore::new(fixture, Duration::from_millis(10), true);
    let ctx = Context::background();
    let path = Path::new("/a");

    // the forged record has the highest version but fails validation
    for (version, validity) in [(1, &b"ok"[..]), (3, &b"forged"[..]), (2, &b"ok"[..])] {
        let record = store.fixture.entry_with_validity(version, validity, b"v");
        store.put(&ctx, &path, &record).await?;
    }

    let config = ResolverConfig {
        validate_on_publish: false,
        validate_on_resolve: true,
        resolve_timeout: Some(Duration::from_millis(100)),
    };
    let resolver = Resolver::new(store, config);

    let best = resolver.resolve(&ctx, &path).await?;
    assert_eq!(best.version(), 2);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_resolve_times_out_without_candidates() {
    init_tracing();
    let store = TrickleStore::new(TestFixture::new(), Duration::from_secs(60), true);
    let late = store.fixture.entry(1, b"late");
    store
        .put(&Context::background(), &Path::new("/a"), &late)
        .await
        .unwrap();

    let resolver = Resolver::new(store, ResolverConfig::default());
    let ctx = Context::background().with_timeout(Duration::from_millis(50));

    let result = resolver.resolve(&ctx, &Path::new("/a")).await;
    assert!(result.as_ref().err().is_some_and(ResolverError::is_timeout));
}

#[tokio::test(start_paused = true)]
async fn test_resolve_cancelled_after_candidates_fails() -> anyhow::Result<()> {
    init_tracing();
    let store = TrickleStore::new(TestFixture::new(), Duration::from_millis(10), true);
    let path = Path::new("/a");
    let record = store.fixture.entry(1, b"v");
    store.put(&Context::background(), &path, &record).await?;

    let resolver = Resolver::new(store, ResolverConfig::default());
    let ctx = Context::background();
    let canceller = ctx.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        canceller.cancel();
    });

    // a valid candidate arrived at 10ms, but cancellation is not a deadline
    let result = resolver.resolve(&ctx, &path).await;
    assert!(matches!(result, Err(ResolverError::Store(StoreError::Cancelled))));
    Ok(())
}

#[tokio::test]
async fn test_sqlite_store_keeps_best_across_reopen() -> anyhow::Result<()> {
    init_tracing();
    let dir = tempfile::tempdir()?;
    let db = dir.path().join("iprs.db");
    let fixture = TestFixture::new();
    let ctx = Context::background();
    let path = Path::new("/names/carol");

    {
        let store = iprs::store::DatastoreStore::new(SqliteDatastore::open(&db)?, fixture.types.clone());
        store.put(&ctx, &path, &fixture.entry(2, b"two")).await?;
        store.put(&ctx, &path, &fixture.entry(1, b"one")).await?;
    }

    let store = iprs::store::DatastoreStore::new(SqliteDatastore::open(&db)?, fixture.types.clone());
    let best = store.get(&ctx, &path).await?;
    assert_eq!(best.version(), 2);
    assert_eq!(hex::encode(marshal(best.as_ref())), hex::encode(marshal(&fixture.entry(2, b"two"))));
    Ok(())
}

#[test]
fn test_distinct_records_never_tie() {
    let fixture = TestFixture::new();
    let a = fixture.entry(1, b"a");
    let b = fixture.entry(1, b"b");
    assert_ne!(iprs::order_records(&a, &b), std::cmp::Ordering::Equal);
    assert_ne!(a.node().hash(), NodeHash::ZERO);
}
