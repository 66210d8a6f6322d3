//! Restricts a route or scope to Telegram Premium users.
//!
//! Must sit inside [`super::TmaAuthMiddlewareFactory`], which provides the identity. Authenticated users without
//! Premium get a 403 Forbidden response.

use std::{
    future::{ready, Ready},
    rc::Rc,
};

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error,
    HttpMessage,
    ResponseError,
};
use futures::future::LocalBoxFuture;
use log::warn;
use tma_auth::Identity;

use crate::errors::ServerError;

pub struct PremiumMiddlewareFactory;

impl<S, B> Transform<S, ServiceRequest> for PremiumMiddlewareFactory
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Error = Error;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;
    type InitError = ();
    type Response = ServiceResponse<EitherBody<B>>;
    type Transform = PremiumMiddlewareService<S>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(PremiumMiddlewareService { service: Rc::new(service) }))
    }
}

pub struct PremiumMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for PremiumMiddlewareService<S>
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
        let is_premium = req.extensions().get::<Identity>().map(|identity| identity.is_premium);
        let err = match is_premium {
            Some(true) => {
                let service = Rc::clone(&self.service);
                return Box::pin(async move { service.call(req).await.map(ServiceResponse::map_into_left_body) });
            },
            Some(false) => {
                ServerError::InsufficientPermissions("This resource is only available to Premium users".into())
            },
            None => {
                warn!("No identity found in request extensions");
                ServerError::Unspecified("No identity found in request extensions".into())
            },
        };
        let res = req.into_response(err.error_response()).map_into_right_body();
        Box::pin(async move { Ok(res) })
    }
}
