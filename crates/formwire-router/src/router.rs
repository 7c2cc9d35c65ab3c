//! Main router implementation.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tracing::debug;

use crate::error::{Result, RouterError};
use crate::path::PathPattern;
use crate::request::{Method, PathParams, Request};
use crate::response::Response;

/// A boxed future for async handlers.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A boxed async handler function.
pub type Handler = Arc<dyn Fn(Request) -> BoxFuture<'static, Response> + Send + Sync>;

/// A single route definition.
#[derive(Clone)]
pub struct Route {
    /// HTTP method.
    pub method: Method,
    /// Path pattern.
    pub pattern: PathPattern,
    /// Request handler.
    pub handler: Handler,
}

impl std::fmt::Debug for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("pattern", &self.pattern.pattern())
            .finish_non_exhaustive()
    }
}

impl Route {
    /// Creates a new route.
    ///
    /// # Panics
    ///
    /// Panics if `pattern` contains an invalid constraint regex.
    pub fn new<F, Fut>(method: Method, pattern: &str, handler: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        Self {
            method,
            pattern: PathPattern::new(pattern),
            handler: Arc::new(move |req| Box::pin(handler(req))),
        }
    }

    /// Creates a route from an already boxed handler.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidPattern`] if `pattern` contains an invalid
    /// constraint regex.
    pub fn with_handler(method: Method, pattern: &str, handler: Handler) -> Result<Self> {
        Ok(Self {
            method,
            pattern: PathPattern::parse(pattern)?,
            handler,
        })
    }
}

/// The main router for handling HTTP requests.
#[derive(Debug, Default)]
pub struct Router {
    /// Registered routes, matched in insertion order.
    routes: Vec<Route>,
}

impl Router {
    /// Creates a new empty router.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a GET route.
    #[must_use]
    pub fn get<F, Fut>(self, path: &str, handler: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.route(Method::Get, path, handler)
    }

    /// Adds a POST route.
    #[must_use]
    pub fn post<F, Fut>(self, path: &str, handler: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.route(Method::Post, path, handler)
    }

    /// Adds a route with any method.
    #[must_use]
    pub fn route<F, Fut>(mut self, method: Method, path: &str, handler: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.routes.push(Route::new(method, path, handler));
        self
    }

    /// Adds a prebuilt route.
    pub fn add_route(&mut self, route: Route) {
        debug!(method = %route.method, pattern = route.pattern.pattern(), "Registering route");
        self.routes.push(route);
    }

    /// Returns the registered routes.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Handles an incoming request.
    pub fn handle(&self, request: Request) -> BoxFuture<'_, Response> {
        Box::pin(async move {
            match self.find_route(&request) {
                Ok((route, params)) => {
                    let mut req = request;
                    req.params = params;
                    (route.handler)(req).await
                }
                Err(err) => {
                    debug!(error = %err, "Request did not dispatch");
                    match err {
                        RouterError::NotFound { .. } => Response::not_found(),
                        RouterError::MethodNotAllowed { .. } => Response::method_not_allowed(),
                        _ => Response::internal_server_error(),
                    }
                }
            }
        })
    }

    /// Finds a matching route for the request.
    fn find_route(&self, request: &Request) -> Result<(&Route, PathParams)> {
        let mut method_matched = false;

        for route in &self.routes {
            if let Some(params) = route.pattern.match_path(&request.path) {
                method_matched = true;
                if route.method == request.method {
                    return Ok((route, params));
                }
            }
        }

        if method_matched {
            Err(RouterError::MethodNotAllowed {
                method: request.method.to_string(),
                path: request.path.clone(),
            })
        } else {
            Err(RouterError::NotFound {
                method: request.method.to_string(),
                path: request.path.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn hello_handler(_req: Request) -> Response {
        Response::text("Hello, World!")
    }

    async fn user_handler(req: Request) -> Response {
        let id = req.params.get("id").unwrap_or("unknown");
        Response::text(format!("User: {id}"))
    }

    #[tokio::test]
    async fn test_basic_routing() {
        let router = Router::new()
            .get("/", hello_handler)
            .get("/users/:id", user_handler);

        let req = Request::get("/");
        let res = router.handle(req).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body_string(), Some("Hello, World!".to_string()));
    }

    #[tokio::test]
    async fn test_path_params() {
        let router = Router::new().get("/users/:id", user_handler);

        let req = Request::get("/users/123?tab=posts");
        let res = router.handle(req).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body_string(), Some("User: 123".to_string()));
    }

    #[tokio::test]
    async fn test_constrained_route() {
        let router = Router::new().get(r"/users/:id{\d+}", user_handler);

        assert_eq!(router.handle(Request::get("/users/42")).await.status, 200);
        assert_eq!(router.handle(Request::get("/users/bob")).await.status, 404);
    }

    #[tokio::test]
    async fn test_not_found() {
        let router = Router::new().get("/", hello_handler);

        let req = Request::get("/nonexistent");
        let res = router.handle(req).await;
        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn test_method_not_allowed() {
        let router = Router::new().get("/", hello_handler);

        let req = Request::post("/");
        let res = router.handle(req).await;
        assert_eq!(res.status, 405);
    }

    #[tokio::test]
    async fn test_add_route_with_handler() {
        let handler: Handler = Arc::new(|req| Box::pin(user_handler(req)));
        let mut router = Router::new();
        router.add_route(Route::with_handler(Method::Post, "/users/:id", handler).unwrap());

        assert_eq!(router.routes().len(), 1);
        let res = router.handle(Request::post("/users/7")).await;
        assert_eq!(res.body_string(), Some("User: 7".to_string()));
    }

    #[test]
    fn test_invalid_handler_pattern() {
        let handler: Handler = Arc::new(|req| Box::pin(hello_handler(req)));
        assert!(Route::with_handler(Method::Get, "/x/:id{[}", handler).is_err());
    }
}
