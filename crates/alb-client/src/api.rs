//! Typed per-resource operations over a [`Session`].

use std::marker::PhantomData;

use alb_models::{ApiResource, Collection, HealthMonitor, Pool, PoolGroup, VirtualService, VsVip};
use serde::{Serialize, de::DeserializeOwned};

use crate::{
  error::{BuildError, ClientError},
  paginate::Paginator,
  request::{self, FilterParams, PatchOp},
  resolver,
  session::Session,
};

/// Entry point for typed API calls against one controller.
#[derive(Debug, Clone)]
pub struct AlbClient {
  session: Session,
}

impl AlbClient {
  #[must_use]
  pub fn new(session: Session) -> Self {
    Self { session }
  }

  #[must_use]
  pub fn session(&self) -> &Session {
    &self.session
  }

  /// Operations on an arbitrary registered resource type.
  #[must_use]
  pub fn resource<T: ApiResource>(&self) -> ResourceClient<'_, T> {
    ResourceClient {
      session: &self.session,
      _marker: PhantomData,
    }
  }

  #[must_use]
  pub fn pool(&self) -> ResourceClient<'_, Pool> {
    self.resource()
  }

  #[must_use]
  pub fn pool_group(&self) -> ResourceClient<'_, PoolGroup> {
    self.resource()
  }

  #[must_use]
  pub fn virtual_service(&self) -> ResourceClient<'_, VirtualService> {
    self.resource()
  }

  #[must_use]
  pub fn health_monitor(&self) -> ResourceClient<'_, HealthMonitor> {
    self.resource()
  }

  #[must_use]
  pub fn vs_vip(&self) -> ResourceClient<'_, VsVip> {
    self.resource()
  }
}

/// CRUD operations for one resource type.
#[derive(Debug)]
pub struct ResourceClient<'a, T> {
  session: &'a Session,
  _marker: PhantomData<T>,
}

impl<T> ResourceClient<'_, T>
where
  T: ApiResource + Serialize + DeserializeOwned + Send + Unpin + 'static,
{
  /// Fetch one collection page and return its results.
  pub async fn get_all(&self, filter: &FilterParams) -> Result<Vec<T>, ClientError> {
    Ok(self.page(filter).await?.results)
  }

  /// Fetch one collection page with its count and continuation cursor.
  pub async fn page(&self, filter: &FilterParams) -> Result<Collection<T>, ClientError> {
    let descriptor = request::list::<T>(filter);
    let response = self.session.execute(&descriptor).await?;
    resolver::resolve_collection(&response)
  }

  /// Stream every matching object across all pages, lazily.
  #[must_use]
  pub fn stream(&self, filter: &FilterParams) -> Paginator<T> {
    Paginator::new(self.session.clone(), request::list::<T>(filter))
  }

  /// Fetch a single object by uuid.
  pub async fn get(&self, uuid: &str) -> Result<T, ClientError> {
    let descriptor = request::get::<T>(uuid, &FilterParams::new());
    let response = self.session.execute(&descriptor).await?;
    resolver::resolve_object(&response)
  }

  /// Fetch the single object with the given name. Errors when nothing
  /// matches, or when the name is ambiguous.
  pub async fn get_by_name(&self, name: &str) -> Result<T, ClientError> {
    let filter = FilterParams::new().name(name);
    let mut page = self.page(&filter).await?;

    match page.results.len() {
      0 => Err(ClientError::NotFoundByName {
        resource: T::NAME,
        name: name.to_string(),
      }),
      1 => Ok(page.results.remove(0)),
      _ => Err(ClientError::AmbiguousName {
        resource: T::NAME,
        name: name.to_string(),
      }),
    }
  }

  /// Create a new object and return it as stored by the controller.
  ///
  /// Creates are not retried on transient failure; the controller exposes
  /// no idempotency key, so a retry could duplicate the object.
  pub async fn create(&self, instance: &T) -> Result<T, ClientError> {
    let descriptor = request::create(instance)?;
    let response = self.session.execute(&descriptor).await?;
    resolver::resolve_object(&response)
  }

  /// Replace an existing object (PUT), addressed by its own uuid.
  pub async fn update(&self, instance: &T) -> Result<T, ClientError> {
    let descriptor = request::update(instance)?;
    let response = self.session.execute(&descriptor).await?;
    resolver::resolve_object(&response)
  }

  /// Apply a partial modification. `partial` carries only the fields the
  /// operation touches.
  pub async fn patch<P: Serialize>(&self, uuid: &str, op: PatchOp, partial: &P) -> Result<T, ClientError> {
    let descriptor = request::patch::<T, P>(uuid, op, partial)?;
    let response = self.session.execute(&descriptor).await?;
    resolver::resolve_object(&response)
  }

  /// Delete by uuid.
  pub async fn delete(&self, uuid: &str) -> Result<(), ClientError> {
    let descriptor = request::delete::<T>(uuid);
    let response = self.session.execute(&descriptor).await?;
    resolver::resolve_empty(&response)
  }

  /// Look an object up by name, then delete it.
  pub async fn delete_by_name(&self, name: &str) -> Result<(), ClientError> {
    let found = self.get_by_name(name).await?;
    let uuid = found.uuid().ok_or(BuildError::MissingUuid)?;
    self.delete(uuid).await
  }
}
