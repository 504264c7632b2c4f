//! Typed async client for the ALB controller REST API.
//!
//! The layering is deliberate: [`request`] builds transport-ready
//! descriptors (pure), [`codec`] converts between models and wire JSON
//! (pure), [`session`] executes descriptors and owns every connection,
//! retry, and timeout concern, and [`resolver`] turns raw responses into
//! typed values or structured errors. [`AlbClient`] composes the four into
//! per-resource CRUD calls.
//!
//! ```no_run
//! use alb_client::{AlbClient, Credentials, FilterParams, Session, SessionConfig};
//!
//! # async fn demo() -> Result<(), alb_client::ClientError> {
//! let session = Session::new(
//!   SessionConfig::builder()
//!     .controller("ctrl.example.com")
//!     .credentials(Credentials::Basic {
//!       username: "admin".to_string(),
//!       password: "secret".to_string(),
//!     })
//!     .build(),
//! )?;
//! let client = AlbClient::new(session);
//!
//! let pools = client.pool().get_all(&FilterParams::new().skip_default()).await?;
//! for pool in &pools {
//!   println!("{:?}", pool.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod codec;
pub mod error;
pub mod paginate;
pub mod request;
pub mod resolver;
pub mod session;

pub use api::{AlbClient, ResourceClient};
pub use error::{ApiError, ApiErrorKind, BuildError, ClientError, DecodeError, EncodeError, TransportError};
pub use paginate::Paginator;
pub use request::{FilterParams, PatchOp, RequestDescriptor};
pub use resolver::RawResponse;
pub use session::{Credentials, ExecuteOptions, Session, SessionConfig};
