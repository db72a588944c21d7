//! Scoped checker teardown.

use std::future::Future;
use std::sync::Arc;

use crate::check::Checker;
use crate::transport::Connector;

/// Run `f` with the checker, then close it whatever `f` returned.
pub async fn with_checker<C, F, Fut, T>(checker: Checker<C>, f: F) -> T
where
    C: Connector,
    F: FnOnce(Arc<Checker<C>>) -> Fut,
    Fut: Future<Output = T>,
{
    let checker = Arc::new(checker);
    let result = f(Arc::clone(&checker)).await;
    checker.close().await;
    result
}
