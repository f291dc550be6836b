use std::cell::RefCell;
use std::future::{Ready, ready};
use std::rc::Rc;
use std::task::{Context, Poll};
use std::time::Instant;

use crate::application::auth_service::AuthService;
use crate::data::user_repository::SqliteUserRepository;
use crate::domain::error::DomainError;
use crate::presentation::utils::AuthenticatedUser;
use actix_service::{Service, Transform};
use actix_web::body::{EitherBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header::{self, HeaderName, HeaderValue};
use actix_web::middleware::Next;
use actix_web::{Error, HttpMessage, ResponseError, web};
use futures_util::future::LocalBoxFuture;
use tracing::{info, warn};
use uuid::Uuid;

static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");
static TIMING_HEADER: HeaderName = HeaderName::from_static("server-timing");

const MAX_REQUEST_ID_LEN: usize = 128;

#[derive(Clone)]
pub struct RequestId(pub String);

fn incoming_request_id(req: &ServiceRequest) -> Option<String> {
    let raw = req.headers().get(&REQUEST_ID_HEADER)?.to_str().ok()?;
    (!raw.is_empty() && raw.len() <= MAX_REQUEST_ID_LEN).then(|| raw.to_owned())
}

/// Tags every request with a `RequestId` (the caller's `x-request-id` or a
/// fresh v4 uuid), logs one line per response and answers with both the id
/// and a `server-timing` header. Mounted with `middleware::from_fn`.
pub async fn request_context(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let request_id = incoming_request_id(&req).unwrap_or_else(|| Uuid::new_v4().to_string());
    req.extensions_mut().insert(RequestId(request_id.clone()));

    let method = req.method().clone();
    let path = req.path().to_owned();
    let started = Instant::now();

    let mut res = next.call(req).await?;

    let elapsed_ms = started.elapsed().as_millis();
    let status = res.status().as_u16();
    if res.status().is_server_error() {
        warn!(request_id = %request_id, %method, %path, status, elapsed_ms, "request failed");
    } else {
        info!(request_id = %request_id, %method, %path, status, elapsed_ms, "request served");
    }

    let headers = res.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        headers.insert(REQUEST_ID_HEADER.clone(), value);
    }
    if let Ok(value) = HeaderValue::from_str(&format!("app;dur={elapsed_ms}")) {
        headers.insert(TIMING_HEADER.clone(), value);
    }

    Ok(res)
}

/// Guard for protected resources: resolves the `Authorization` header to a
/// user and stores it as `AuthenticatedUser`, or answers 401 before the
/// handler runs.
pub struct BasicAuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for BasicAuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = BasicAuthService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BasicAuthService {
            service: Rc::new(RefCell::new(service)),
        }))
    }
}

pub struct BasicAuthService<S> {
    service: Rc<RefCell<S>>,
}

impl<S, B> Service<ServiceRequest> for BasicAuthService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.borrow_mut().poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        let auth_service = req
            .app_data::<web::Data<AuthService<SqliteUserRepository>>>()
            .cloned();

        let auth_header = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        Box::pin(async move {
            let resolved = match auth_service {
                Some(auth_service) => auth_service.resolve(auth_header.as_deref()).await,
                None => Err(DomainError::Internal("AuthService missing".into())),
            };

            let user = match resolved {
                Ok(Some(user)) => user,
                Ok(None) => {
                    warn!(path = %req.path(), "rejecting anonymous request");
                    return Ok(reject(req, DomainError::Unauthorized));
                }
                Err(e) => return Ok(reject(req, e)),
            };

            req.extensions_mut().insert(AuthenticatedUser::from(user));
            let fut = {
                let svc = service.borrow_mut();
                svc.call(req)
            };
            let res = fut.await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// Short-circuits with the error's own response; the wrapped handler never runs.
fn reject<B>(req: ServiceRequest, err: DomainError) -> ServiceResponse<EitherBody<B>> {
    let (request, _payload) = req.into_parts();
    ServiceResponse::new(request, err.error_response()).map_into_right_body()
}
