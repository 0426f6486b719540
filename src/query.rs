//! Single-shot async query used to load remote data into UI state.
//!
//! A `Query<T>` owns a fetcher closure, runs it on a spawned task and hands
//! the result back through a channel that the UI drains on each tick. The
//! UI task never awaits the request itself.
//!
//! ```ignore
//! let client = catalog_client.clone();
//! let mut query = Query::new(move || {
//!     let client = client.clone();
//!     async move { client.fetch_products().await.map_err(|e| e.to_string()) }
//! });
//!
//! query.fetch();
//!
//! // In event loop tick
//! if query.poll() {
//!     match query.state() {
//!         QueryState::Success(products) => show(products),
//!         QueryState::Error(e) => report(e),
//!         _ => {}
//!     }
//! }
//! ```

use std::future::Future;
use std::pin::Pin;
use tokio::sync::mpsc;

/// The state of a query
#[derive(Debug, Clone)]
pub enum QueryState<T> {
  /// Query has not been started
  Idle,
  /// Query is currently fetching data
  Loading,
  /// Query completed successfully
  Success(T),
  /// Query failed with an error
  Error(String),
}

#[cfg(test)]
impl<T> QueryState<T> {
  pub fn is_loading(&self) -> bool {
    matches!(self, QueryState::Loading)
  }

  pub fn is_success(&self) -> bool {
    matches!(self, QueryState::Success(_))
  }

  pub fn is_error(&self) -> bool {
    matches!(self, QueryState::Error(_))
  }

  pub fn data(&self) -> Option<&T> {
    match self {
      QueryState::Success(data) => Some(data),
      _ => None,
    }
  }

  pub fn error(&self) -> Option<&str> {
    match self {
      QueryState::Error(e) => Some(e),
      _ => None,
    }
  }
}

/// A boxed future that returns a Result<T, String>
type BoxFuture<T> = Pin<Box<dyn Future<Output = Result<T, String>> + Send>>;

/// A factory function that creates the fetch future
type FetcherFn<T> = Box<dyn FnOnce() -> BoxFuture<T> + Send>;

/// Async query with a single attempt: once started it ends in either
/// `Success` or `Error` and never runs again.
pub struct Query<T> {
  state: QueryState<T>,
  fetcher: Option<FetcherFn<T>>,
  receiver: Option<mpsc::UnboundedReceiver<Result<T, String>>>,
}

impl<T: Send + 'static> Query<T> {
  /// Create a new query with the given fetcher function.
  ///
  /// The fetcher is consumed by the first `fetch()`.
  pub fn new<F, Fut>(fetcher: F) -> Self
  where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, String>> + Send + 'static,
  {
    Self {
      state: QueryState::Idle,
      fetcher: Some(Box::new(move || Box::pin(fetcher()))),
      receiver: None,
    }
  }

  /// Get the current state of the query.
  pub fn state(&self) -> &QueryState<T> {
    &self.state
  }

  /// Get the data if the query succeeded.
  #[cfg(test)]
  pub fn data(&self) -> Option<&T> {
    self.state.data()
  }

  /// Check if the query is currently loading.
  #[cfg(test)]
  pub fn is_loading(&self) -> bool {
    self.state.is_loading()
  }

  /// Check if the query succeeded.
  #[cfg(test)]
  pub fn is_success(&self) -> bool {
    self.state.is_success()
  }

  /// Check if the query failed.
  #[cfg(test)]
  pub fn is_error(&self) -> bool {
    self.state.is_error()
  }

  /// Get the error message if the query failed.
  #[cfg(test)]
  pub fn error(&self) -> Option<&str> {
    self.state.error()
  }

  /// Start fetching. Only the first call has an effect.
  ///
  /// Must be called from within a tokio runtime.
  pub fn fetch(&mut self) {
    let Some(fetcher) = self.fetcher.take() else {
      return;
    };

    let (tx, rx) = mpsc::unbounded_channel();
    self.receiver = Some(rx);
    self.state = QueryState::Loading;

    let future = fetcher();
    tokio::spawn(async move {
      let result = future.await;
      // Receiver is gone once the app has quit
      let _ = tx.send(result);
    });
  }

  /// Poll for results from a pending fetch.
  ///
  /// Returns `true` if the state changed (data arrived or error occurred).
  /// Call this in your event loop tick handler.
  pub fn poll(&mut self) -> bool {
    let receiver = match &mut self.receiver {
      Some(rx) => rx,
      None => return false,
    };

    match receiver.try_recv() {
      Ok(Ok(data)) => {
        self.state = QueryState::Success(data);
        self.receiver = None;
        true
      }
      Ok(Err(error)) => {
        self.state = QueryState::Error(error);
        self.receiver = None;
        true
      }
      Err(mpsc::error::TryRecvError::Empty) => false,
      Err(mpsc::error::TryRecvError::Disconnected) => {
        // Task ended without sending (panicked or runtime shut down)
        self.state = QueryState::Error("Query was cancelled".to_string());
        self.receiver = None;
        true
      }
    }
  }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Query<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Query")
      .field("state", &self.state)
      .field("started", &self.fetcher.is_none())
      .finish_non_exhaustive()
  }
}
