//! Lazy iteration over paginated collection responses.

use std::{
  collections::VecDeque,
  pin::Pin,
  task::{Context, Poll},
};

use alb_models::Collection;
use futures_core::Stream;
use serde::de::DeserializeOwned;

use crate::{
  error::ClientError,
  request::RequestDescriptor,
  resolver,
  session::Session,
};

type PageFuture<T> = Pin<Box<dyn Future<Output = Result<Collection<T>, ClientError>> + Send>>;

enum PageState<T> {
  /// The request for the next page, not yet issued.
  Next(RequestDescriptor),
  /// A page fetch in flight.
  Fetching(PageFuture<T>),
  /// Last page consumed, or the stream ended with an error.
  Finished,
}

/// A lazy stream of collection items across pages.
///
/// The next page is requested only once the current page's buffer is
/// drained, so page N+1 is never fetched before page N's continuation
/// cursor has been observed. Server ordering is preserved. A page-fetch
/// error is yielded once and ends the stream.
pub struct Paginator<T> {
  session: Session,
  buffered: VecDeque<T>,
  state: PageState<T>,
}

impl<T> std::fmt::Debug for Paginator<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Paginator")
      .field("buffered", &self.buffered.len())
      .finish_non_exhaustive()
  }
}

impl<T> Paginator<T>
where
  T: DeserializeOwned + Send + 'static,
{
  pub(crate) fn new(session: Session, first_page: RequestDescriptor) -> Self {
    Self {
      session,
      buffered: VecDeque::new(),
      state: PageState::Next(first_page),
    }
  }

  fn fetch(session: Session, descriptor: RequestDescriptor) -> PageFuture<T> {
    Box::pin(async move {
      let response = session.execute(&descriptor).await?;
      resolver::resolve_collection::<T>(&response)
    })
  }
}

/// Turn a continuation URL into a request against the session base.
///
/// The controller returns `next` as an absolute URL; its host may differ
/// from the configured one (e.g. behind a load balancer), so only the path
/// and query are kept.
fn continuation_descriptor(next: &str) -> Result<RequestDescriptor, ClientError> {
  let url = reqwest::Url::parse(next).map_err(|err| ClientError::Config {
    detail: format!("continuation URL `{next}`: {err}"),
  })?;

  let mut descriptor = RequestDescriptor {
    method: http::Method::GET,
    path: url.path().trim_start_matches('/').to_string(),
    query: Vec::new(),
    body: None,
    idempotent: true,
  };
  descriptor.query = url.query_pairs().map(|(k, v)| (k.into_owned(), v.into_owned())).collect();
  Ok(descriptor)
}

impl<T> Stream for Paginator<T>
where
  T: DeserializeOwned + Unpin + Send + 'static,
{
  type Item = Result<T, ClientError>;

  fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
    let this = self.get_mut();
    loop {
      if let Some(item) = this.buffered.pop_front() {
        return Poll::Ready(Some(Ok(item)));
      }

      match std::mem::replace(&mut this.state, PageState::Finished) {
        PageState::Next(descriptor) => {
          this.state = PageState::Fetching(Self::fetch(this.session.clone(), descriptor));
        }
        PageState::Fetching(mut future) => match future.as_mut().poll(cx) {
          Poll::Pending => {
            this.state = PageState::Fetching(future);
            return Poll::Pending;
          }
          Poll::Ready(Ok(page)) => {
            this.buffered.extend(page.results);
            if let Some(next) = page.next.as_deref() {
              match continuation_descriptor(next) {
                Ok(descriptor) => this.state = PageState::Next(descriptor),
                Err(err) => return Poll::Ready(Some(Err(err))),
              }
            }
            // state stays Finished on the last page; the loop drains the
            // buffer and then ends the stream.
          }
          Poll::Ready(Err(err)) => return Poll::Ready(Some(Err(err))),
        },
        PageState::Finished => return Poll::Ready(None),
      }
    }
  }
}
