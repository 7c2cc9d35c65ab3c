//! The request pipeline a form installs on a router.

use std::sync::Arc;

use formwire_router::{BoxFuture, Handler, Method, Request, Response, Route, Router};
use tracing::{debug, warn};

use crate::error::{BoxError, SubmissionError};
use crate::schema::Schema;
use crate::value::ValidatedData;

/// Callback run with the validated record before the success handler.
pub type SideEffect =
    Arc<dyn Fn(Request, ValidatedData) -> BoxFuture<'static, Result<(), BoxError>> + Send + Sync>;

/// Callback producing the response for an accepted submission.
pub type SuccessHandler = Arc<dyn Fn(Request) -> BoxFuture<'static, Response> + Send + Sync>;

/// Callback producing the response for a rejected submission.
pub type ErrorHandler =
    Arc<dyn Fn(Request, SubmissionError) -> BoxFuture<'static, Response> + Send + Sync>;

/// Anything a form can register its submission handler with.
pub trait RouteTarget {
    /// Registers `handler` for `method` requests matching `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` is not a valid route pattern.
    fn register(
        &mut self,
        method: Method,
        path: &str,
        handler: Handler,
    ) -> formwire_router::Result<()>;
}

impl RouteTarget for Router {
    fn register(
        &mut self,
        method: Method,
        path: &str,
        handler: Handler,
    ) -> formwire_router::Result<()> {
        self.add_route(Route::with_handler(method, path, handler)?);
        Ok(())
    }
}

/// Per-request flow: extract, validate, side effect, respond.
pub(crate) struct Pipeline {
    pub(crate) method: Method,
    pub(crate) schema: Arc<Schema>,
    pub(crate) side_effect: Option<SideEffect>,
    pub(crate) on_success: SuccessHandler,
    pub(crate) on_error: ErrorHandler,
}

impl Pipeline {
    /// Handles one submission, producing exactly one response.
    pub(crate) async fn handle(&self, req: Request) -> Response {
        match self.process(&req).await {
            Ok(()) => (self.on_success)(req).await,
            Err(err) => (self.on_error)(req, err).await,
        }
    }

    async fn process(&self, req: &Request) -> Result<(), SubmissionError> {
        let raw = if self.method == Method::Get {
            req.query_data()
        } else {
            req.form_data().await?
        };

        let data = self.schema.validate(&raw).map_err(|errors| {
            debug!(path = %req.path, fields = %errors, "Submission rejected");
            SubmissionError::Validation(errors)
        })?;

        if let Some(side_effect) = &self.side_effect {
            side_effect(req.clone(), data).await.map_err(|err| {
                warn!(path = %req.path, error = %err, "Side effect failed");
                SubmissionError::SideEffect(err)
            })?;
        }

        Ok(())
    }

    /// Wraps the pipeline as a router handler.
    pub(crate) fn into_handler(self: Arc<Self>) -> Handler {
        Arc::new(move |req| {
            let pipeline = Arc::clone(&self);
            Box::pin(async move { pipeline.handle(req).await })
        })
    }
}
