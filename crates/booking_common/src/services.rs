//! Service abstractions shared by provider crates.
//!
//! Provider traits return boxed futures so they stay object safe and can be held as
//! `Arc<dyn Trait>` in router state and swapped for stubs in tests.

use std::future::Future;
use std::pin::Pin;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;
