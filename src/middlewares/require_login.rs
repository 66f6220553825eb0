use actix_web::{
    body::BoxBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http, web, HttpMessage, HttpResponse,
};
use futures::{future::LocalBoxFuture, FutureExt};
use log::{debug, info};
use serde_json::json;
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};

use crate::auth::{credentials, AuthenticatedUser, TokenService};

/// What happens to a request without valid credentials.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Unauthenticated {
    /// 302 to the login page, with the requested path as `next`
    RedirectToLogin(String),
    /// 401 with a JSON error body
    Reject,
}

/// Middleware responsible for handling authentication and user information extraction.
pub struct RequireLoginMiddleware<S> {
    service: Rc<S>,
    tokens: web::Data<TokenService>,
    policy: Unauthenticated,
}

impl<S> RequireLoginMiddleware<S> {
    fn deny(&self, req: ServiceRequest) -> ServiceResponse<BoxBody> {
        let response = match &self.policy {
            Unauthenticated::RedirectToLogin(login_url) => HttpResponse::Found()
                .insert_header((http::header::LOCATION, login_redirect(login_url, req.path())))
                .finish(),
            Unauthenticated::Reject => HttpResponse::Unauthorized()
                .json(json!({ "error": "Authentication credentials were not provided or are invalid" })),
        };
        req.into_response(response)
    }
}

/// `/accounts/login/?next=/1/checkout/`
pub fn login_redirect(login_url: &str, next: &str) -> String {
    format!("{}?next={}", login_url, next)
}

impl<S> Service<ServiceRequest> for RequireLoginMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>
        + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, actix_web::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let token = match credentials(req.request()) {
            Some(token) => token,
            None => {
                debug!("Anonymous request to {}", req.path());
                return Box::pin(ready(Ok(self.deny(req))));
            }
        };

        let user = match self.tokens.decode_token(&token) {
            Ok(user) => user,
            Err(error) => {
                info!("Rejected credentials for {}: {}", req.path(), error);
                return Box::pin(ready(Ok(self.deny(req))));
            }
        };

        let srv = Rc::clone(&self.service);

        async move {
            req.extensions_mut().insert::<AuthenticatedUser>(user);
            srv.call(req).await
        }
        .boxed_local()
    }
}

/// Middleware factory for requiring authentication.
pub struct RequireLogin {
    tokens: web::Data<TokenService>,
    policy: Unauthenticated,
}

impl RequireLogin {
    /// Pages: anonymous callers are sent to `login_url`.
    pub fn redirect(tokens: web::Data<TokenService>, login_url: impl Into<String>) -> Self {
        Self {
            tokens,
            policy: Unauthenticated::RedirectToLogin(login_url.into()),
        }
    }

    /// API: anonymous callers get a 401.
    pub fn reject(tokens: web::Data<TokenService>) -> Self {
        Self {
            tokens,
            policy: Unauthenticated::Reject,
        }
    }
}

impl<S> Transform<S, ServiceRequest> for RequireLogin
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>
        + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = actix_web::Error;
    type Transform = RequireLoginMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireLoginMiddleware {
            service: Rc::new(service),
            tokens: self.tokens.clone(),
            policy: self.policy.clone(),
        }))
    }
}
