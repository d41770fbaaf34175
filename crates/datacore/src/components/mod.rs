pub mod app;
pub mod changelog;
pub mod chat;
pub mod common;
pub mod fuel;
pub mod hosts;
pub mod kanban;
pub mod metrics;
pub mod printer;
pub mod shell;

use std::future::Future;

use datacore_core::ApiError;
use datacore_core::contract::Pending;
use dioxus::prelude::*;
use futures::FutureExt;

/// Wrap a back-end mutation so a successful completion reloads `resource`.
pub fn refreshing<T: 'static>(
    call: impl Future<Output = Result<(), ApiError>> + 'static,
    mut resource: Resource<T>,
) -> Pending {
    async move {
        let result = call.await;
        match &result {
            Ok(()) => resource.restart(),
            Err(e) => tracing::warn!("Back-end call failed: {}", e),
        }
        result
    }
    .boxed_local()
}
