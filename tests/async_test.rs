use defer_guard::{defer, Guard};
use std::time::Duration;

#[tokio::test]
async fn test_guard_fires_when_future_completes() {
    let (tx, rx) = flume::unbounded();
    let out = async move {
        let tx2 = tx.clone();
        let _g = Guard::new(move || tx2.send("cleanup").unwrap());
        tokio::time::sleep(Duration::from_millis(1)).await;
        tx.send("body").unwrap();
        1
    }
    .await;
    assert_eq!(out, 1);
    assert_eq!(rx.recv_async().await.unwrap(), "body");
    assert_eq!(rx.recv_async().await.unwrap(), "cleanup");
}

#[tokio::test]
async fn test_guard_fires_on_timeout_cancel() {
    let (tx, rx) = flume::unbounded();
    let r = tokio::time::timeout(Duration::from_millis(10), async move {
        let _g = Guard::new(move || tx.send("cancelled").unwrap());
        tokio::time::sleep(Duration::from_secs(10)).await;
    })
    .await;
    assert!(r.is_err());
    assert_eq!(rx.recv_async().await.unwrap(), "cancelled");
}

#[tokio::test]
async fn test_guard_fires_on_abort() {
    let (tx, rx) = flume::unbounded();
    let (started_tx, started_rx) = flume::bounded(1);
    let handle = tokio::spawn(async move {
        let _g = Guard::new(move || tx.send("aborted").unwrap());
        started_tx.send_async(()).await.unwrap();
        tokio::time::sleep(Duration::from_secs(10)).await;
    });
    started_rx.recv_async().await.unwrap();
    handle.abort();
    let err = handle.await.unwrap_err();
    assert!(err.is_cancelled());
    assert_eq!(rx.recv_async().await.unwrap(), "aborted");
}

#[tokio::test]
async fn test_guard_fires_when_task_panics() {
    let (tx, rx) = flume::unbounded();
    let handle = tokio::spawn(async move {
        let _g = Guard::new(move || tx.send("unwound").unwrap());
        tokio::task::yield_now().await;
        panic!("boom");
    });
    let err = handle.await.unwrap_err();
    assert!(err.is_panic());
    let payload = err.into_panic();
    assert_eq!(payload.downcast_ref::<&str>(), Some(&"boom"));
    assert_eq!(rx.recv_async().await.unwrap(), "unwound");
}

async fn fetch(fail: bool, tx: flume::Sender<&'static str>) -> Result<u32, String> {
    defer!(tx.send("released").unwrap());
    tokio::task::yield_now().await;
    if fail {
        return Err("fetch failed".to_string());
    }
    Ok(42)
}

#[tokio::test]
async fn test_guard_in_async_fn_early_return() {
    let (tx, rx) = flume::unbounded();
    assert_eq!(fetch(false, tx.clone()).await, Ok(42));
    assert_eq!(fetch(true, tx).await, Err("fetch failed".to_string()));
    assert_eq!(rx.recv_async().await.unwrap(), "released");
    assert_eq!(rx.recv_async().await.unwrap(), "released");
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_reverse_order_across_await() {
    let (tx, rx) = flume::unbounded();
    {
        let t1 = tx.clone();
        let t2 = tx.clone();
        let _g1 = Guard::new(move || t1.send(1).unwrap());
        tokio::task::yield_now().await;
        let _g2 = Guard::new(move || t2.send(2).unwrap());
        tokio::task::yield_now().await;
    }
    drop(tx);
    let order: Vec<i32> = rx.into_iter().collect();
    assert_eq!(order, vec![2, 1]);
}
