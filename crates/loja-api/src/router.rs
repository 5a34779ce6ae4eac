//! Method + path dispatch over the handler modules.

use crate::config::ApiConfig;
use crate::handlers;
use crate::response::ApiResponse;
use http::Method;
use loja_commerce::cart::CartService;
use loja_commerce::catalog::CatalogService;
use loja_commerce::purchase::PurchaseEngine;
use loja_commerce::repo::Store;
use loja_jobs::JobQueue;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// The REST surface, independent of any HTTP listener.
///
/// A transport feeds [`Api::dispatch`] the method, the request target (path
/// plus optional query string) and the parsed JSON body, and writes the
/// returned status and body back out. The handlers own no transport state, so
/// the full surface is exercisable from plain tests.
pub struct Api<S> {
    pub(crate) store: Arc<S>,
    pub(crate) catalog: Arc<CatalogService<S>>,
    pub(crate) cart: CartService<S>,
    pub(crate) engine: PurchaseEngine<S>,
    pub(crate) jobs: JobQueue,
    pub(crate) config: ApiConfig,
}

impl<S> Api<S>
where
    S: Store + 'static,
{
    /// Build the API over a store with the given configuration.
    pub fn new(store: Arc<S>, config: ApiConfig) -> Self {
        Self {
            catalog: Arc::new(CatalogService::new(Arc::clone(&store))),
            cart: CartService::new(Arc::clone(&store)),
            engine: PurchaseEngine::new(Arc::clone(&store)),
            jobs: JobQueue::new(),
            store,
            config,
        }
    }

    /// Build the API with default configuration.
    pub fn with_defaults(store: Arc<S>) -> Self {
        Self::new(store, ApiConfig::default())
    }

    /// Route one request to its handler.
    ///
    /// `target` is the request path with an optional query string. Unknown
    /// paths and unsupported methods both produce a 404; the body of a
    /// mutating request is `None` when the transport received none.
    pub fn dispatch(&self, method: &Method, target: &str, body: Option<&Value>) -> ApiResponse {
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path, query),
            None => (target, ""),
        };
        let path = path.strip_prefix(self.config.base_path.as_str()).unwrap_or(path);
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        debug!(method = %method, path, "dispatching request");

        match (method, segments.as_slice()) {
            (&Method::GET, ["clientes"]) => handlers::customers::list(self),
            (&Method::POST, ["clientes"]) => handlers::customers::create(self, body),
            (&Method::GET, ["clientes", id]) => handlers::customers::retrieve(self, id),
            (&Method::PUT, ["clientes", id]) => handlers::customers::update(self, id, body),
            (&Method::DELETE, ["clientes", id]) => handlers::customers::destroy(self, id),

            (&Method::POST, ["produtos", "aplicar_desconto"]) => {
                handlers::products::apply_discount(self, body)
            }
            (&Method::GET, ["produtos"]) => handlers::products::list(self),
            (&Method::POST, ["produtos"]) => handlers::products::create(self, body),
            (&Method::GET, ["produtos", id]) => handlers::products::retrieve(self, id),
            (&Method::PUT, ["produtos", id]) => handlers::products::update(self, id, body),
            (&Method::DELETE, ["produtos", id]) => handlers::products::destroy(self, id),

            (&Method::GET, ["itens_carrinho"]) => handlers::cart_lines::list(self, query),
            (&Method::POST, ["itens_carrinho"]) => handlers::cart_lines::create(self, body),
            (&Method::GET, ["itens_carrinho", id]) => handlers::cart_lines::retrieve(self, id),
            (&Method::PUT, ["itens_carrinho", id]) => handlers::cart_lines::update(self, id, body),
            (&Method::DELETE, ["itens_carrinho", id]) => handlers::cart_lines::destroy(self, id),

            (&Method::GET, ["compras"]) => handlers::purchases::list(self),
            (&Method::POST, ["compras"]) => handlers::purchases::create(self, body),
            (&Method::GET, ["compras", id]) => handlers::purchases::retrieve(self, id),

            _ => ApiResponse::not_found("Recurso não encontrado"),
        }
    }

    /// The job queue, for transports that expose job status.
    pub fn jobs(&self) -> &JobQueue {
        &self.jobs
    }

    /// Translate an error with this API's detail policy.
    pub(crate) fn fail(&self, err: &loja_commerce::CommerceError) -> ApiResponse {
        ApiResponse::from_commerce(err, self.config.expose_error_detail)
    }
}

/// Pull a parameter out of a raw query string.
pub(crate) fn query_param<'a>(query: &'a str, key: &str) -> Option<&'a str> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
}
