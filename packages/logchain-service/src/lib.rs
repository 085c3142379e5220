pub mod resolver;
pub mod result;
pub mod shaper;

mod error;

use std::{future::Future, pin::Pin, sync::Arc};

pub use error::{Error, ErrorKind, Result};
use logchain_config::Config;
use logchain_domain::AnchorCriteria;
use logchain_providers::search;
pub use result::ChainResult;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Remote log search, one request per call.
pub trait SearchBackend
where
	Self: Send + Sync,
{
	fn search<'a>(
		&'a self,
		cfg: &'a Config,
		criteria: &'a AnchorCriteria,
	) -> BoxFuture<'a, logchain_providers::Result<String>>;
}

pub struct ChainService {
	pub cfg: Config,
	pub backend: Arc<dyn SearchBackend>,
}

struct HttpBackend;

impl SearchBackend for HttpBackend {
	fn search<'a>(
		&'a self,
		cfg: &'a Config,
		criteria: &'a AnchorCriteria,
	) -> BoxFuture<'a, logchain_providers::Result<String>> {
		Box::pin(search::search(&cfg.backend, &cfg.scopes, criteria))
	}
}

impl ChainService {
	pub fn new(cfg: Config) -> Self {
		Self { cfg, backend: Arc::new(HttpBackend) }
	}

	pub fn with_backend(cfg: Config, backend: Arc<dyn SearchBackend>) -> Self {
		Self { cfg, backend }
	}
}
