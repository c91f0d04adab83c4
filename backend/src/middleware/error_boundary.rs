//! Middleware routing every failed request through the error pipeline.
//!
//! Handlers return structured errors; Actix renders them through
//! `ResponseError` and keeps the error on the response. This middleware
//! picks it up there (or from the service's `Err` path), classifies it as a
//! [`Failure`], and lets [`ErrorPipeline`] log it and build the single
//! response. Headers set by inner middleware, such as session cookies, are
//! carried over to the rebuilt response.
//!
//! The request is never cloned across dispatch: the router needs sole
//! ownership of it to record path parameters. On the `Err` path the
//! pipeline's response therefore travels outward inside an
//! [`InternalError`], which Actix renders verbatim.

use std::task::{Context, Poll};

use actix_web::body::{EitherBody, MessageBody};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{self, HeaderName};
use actix_web::error::InternalError;
use actix_web::{HttpMessage, HttpRequest, HttpResponse};
use futures_util::future::{LocalBoxFuture, Ready, ready};

use crate::domain::{Error, Failure, TRACE_ID_HEADER, UnclassifiedFailure};
use crate::inbound::http::pipeline::{ErrorPipeline, ResponseLatch};

/// Wraps an app so failures reach [`ErrorPipeline::handle`] exactly once.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use adoptme_backend::inbound::http::pipeline::ErrorPipeline;
/// use adoptme_backend::logging::{Logger, Mode};
/// use adoptme_backend::middleware::ErrorBoundary;
///
/// let pipeline = ErrorPipeline::new(Logger::builder(Mode::Production).build());
/// let app = App::new().wrap(ErrorBoundary::new(pipeline));
/// ```
#[derive(Clone, Debug)]
pub struct ErrorBoundary {
    pipeline: ErrorPipeline,
}

impl ErrorBoundary {
    /// Route failures through `pipeline`.
    #[must_use]
    pub const fn new(pipeline: ErrorPipeline) -> Self {
        Self { pipeline }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ErrorBoundary
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = ErrorBoundaryMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ErrorBoundaryMiddleware {
            service,
            pipeline: self.pipeline.clone(),
        }))
    }
}

/// Service wrapper produced by [`ErrorBoundary`].
pub struct ErrorBoundaryMiddleware<S> {
    service: S,
    pipeline: ErrorPipeline,
}

/// The response latch of the request being handled.
///
/// Code that starts writing a response on its own commits the latch so the
/// pipeline only logs any later failure.
#[must_use]
pub fn response_latch(req: &HttpRequest) -> Option<ResponseLatch> {
    req.extensions().get::<ResponseLatch>().cloned()
}

fn classify(error: &actix_web::Error) -> Failure {
    if let Some(structured) = error.as_error::<Error>() {
        return Failure::Structured(structured.clone());
    }
    if let Some(failure) = error.as_error::<Failure>() {
        return failure.clone();
    }
    Failure::Unclassified(UnclassifiedFailure::new(
        error.to_string(),
        format!("{error:?}"),
    ))
}

fn is_regenerated(name: &HeaderName) -> bool {
    *name == header::CONTENT_TYPE
        || *name == header::CONTENT_LENGTH
        || name.as_str() == TRACE_ID_HEADER
}

fn replace_response<B>(
    res: ServiceResponse<B>,
    mut replacement: HttpResponse,
) -> ServiceResponse<EitherBody<B>> {
    let (req, original) = res.into_parts();
    for (name, value) in original.headers() {
        if !is_regenerated(name) {
            replacement
                .headers_mut()
                .append(name.clone(), value.clone());
        }
    }
    ServiceResponse::new(req, replacement).map_into_right_body()
}

impl<S, B> Service<ServiceRequest> for ErrorBoundaryMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let latch = ResponseLatch::default();
        req.extensions_mut().insert(latch.clone());
        let pipeline = self.pipeline.clone();
        let fut = self.service.call(req);

        Box::pin(async move {
            match fut.await {
                Ok(res) => {
                    let Some(failure) = res.response().error().map(classify) else {
                        return Ok(res.map_into_left_body());
                    };
                    match pipeline.handle(&failure, &latch) {
                        Some(replacement) => Ok(replace_response(res, replacement)),
                        None => Ok(res.map_into_left_body()),
                    }
                }
                Err(error) => {
                    let failure = classify(&error);
                    match pipeline.handle(&failure, &latch) {
                        Some(response) => Err(InternalError::from_response(failure, response).into()),
                        None => Err(error),
                    }
                }
            }
        })
    }
}
