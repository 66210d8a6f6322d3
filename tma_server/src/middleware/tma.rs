//! Mini App authentication middleware for Actix Web.
//!
//! Every request passing through this middleware must carry valid Telegram Mini App init data, normally in the
//! `Authorization` header as `tma <init data>`. On success the extracted [`tma_auth::Identity`] is stored in the
//! request extensions, where the [`crate::auth::TmaUser`] extractor picks it up. Requests without init data, or with
//! init data that fails validation, are answered with `401 Unauthorized` and never reach the wrapped service.
//!
//! Validation is a short synchronous computation, so it runs directly in `call` instead of being scheduled.

use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
};

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error,
    HttpMessage,
    ResponseError,
};
use futures::future::LocalBoxFuture;
use log::{debug, trace};
use tma_auth::{TmaValidator, ValidationResult};

use crate::{
    auth::RequestAdapter,
    errors::{AuthError, ServerError},
};

pub struct TmaAuthMiddlewareFactory {
    validator: Arc<TmaValidator>,
}

impl TmaAuthMiddlewareFactory {
    pub fn new(validator: Arc<TmaValidator>) -> Self {
        TmaAuthMiddlewareFactory { validator }
    }
}

impl<S, B> Transform<S, ServiceRequest> for TmaAuthMiddlewareFactory
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Error = Error;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;
    type InitError = ();
    type Response = ServiceResponse<EitherBody<B>>;
    type Transform = TmaAuthMiddlewareService<S>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TmaAuthMiddlewareService { validator: Arc::clone(&self.validator), service: Rc::new(service) }))
    }
}

pub struct TmaAuthMiddlewareService<S> {
    validator: Arc<TmaValidator>,
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for TmaAuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;
    type Response = ServiceResponse<EitherBody<B>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        trace!("🔐️ Checking Mini App init data for {}", req.path());
        let result = self.validator.authenticate(&RequestAdapter::new(req.request()));
        let err = match result {
            ValidationResult::Success(identity) => {
                trace!("🔐️ Request authenticated for user {} ✅️", identity.id);
                req.extensions_mut().insert(identity);
                let service = Rc::clone(&self.service);
                return Box::pin(async move { service.call(req).await.map(ServiceResponse::map_into_left_body) });
            },
            ValidationResult::NotAttempted => ServerError::from(AuthError::NoCredentials),
            ValidationResult::Failure(reason) => ServerError::from(reason),
        };
        debug!("🔐️ Denying access to {}. {err}", req.path());
        let res = req.into_response(err.error_response()).map_into_right_body();
        Box::pin(async move { Ok(res) })
    }
}
