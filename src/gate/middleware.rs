use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, HttpResponse};
use futures::future::LocalBoxFuture;

use crate::response::Response;

use super::{Decision, Gate};

/// Actix middleware that runs every request through a [`Gate`].
///
/// Allowed requests are handed to the wrapped service unchanged. Rejected
/// requests are answered with `403 Forbidden` and never reach it.
///
/// ```ignore
/// App::new()
///     .wrap(Authorization::new(gate))
///     .route("/", web::get().to(index))
/// ```
#[derive(Clone)]
pub struct Authorization {
    gate: Arc<Gate>,
}

impl Authorization {
    pub fn new(gate: Arc<Gate>) -> Self {
        Self { gate }
    }
}

impl<S, B> Transform<S, ServiceRequest> for Authorization
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthorizationMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthorizationMiddleware {
            service: Rc::new(service),
            gate: self.gate.clone(),
        }))
    }
}

pub struct AuthorizationMiddleware<S> {
    service: Rc<S>,
    gate: Arc<Gate>,
}

impl<S, B> Service<ServiceRequest> for AuthorizationMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let gate = self.gate.clone();

        Box::pin(async move {
            let decision = gate.intercept(req.request()).await;
            match decision {
                Decision::Continue => {
                    let resp = service.call(req).await?;
                    Ok(resp.map_into_left_body())
                }
                Decision::Reject => {
                    let resp = req.into_response(HttpResponse::from(Response::forbidden()));
                    Ok(resp.map_into_right_body())
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};
    use std::sync::atomic::{AtomicUsize, Ordering};

    use actix_web::http::StatusCode;
    use actix_web::test::{call_service, init_service, read_body_json, TestRequest};
    use actix_web::{web, App, HttpResponse};

    use crate::gate::skip::PathSkipper;
    use crate::gate::GateOptions;
    use crate::policy::{PolicyRule, RuleEngine};
    use crate::resolver::{TokenTableResolver, ANONYMOUS_ROLE};
    use crate::response::CommonResponse;

    use super::*;

    fn rule(role: &str, paths: &[&str], methods: &[&str]) -> PolicyRule {
        PolicyRule {
            role: role.to_string(),
            paths: paths.iter().map(|s| s.to_string()).collect::<HashSet<_>>(),
            methods: methods.iter().map(|s| s.to_string()).collect::<HashSet<_>>(),
        }
    }

    fn build_gate(skip_paths: &[String]) -> Arc<Gate> {
        let tokens = HashMap::from([("admin-token".to_string(), "admin".to_string())]);
        let resolver = TokenTableResolver::new(tokens, ANONYMOUS_ROLE);
        let engine = RuleEngine::new(vec![
            rule("admin", &["*"], &["*"]),
            rule(ANONYMOUS_ROLE, &["/login"], &["GET"]),
        ])
        .unwrap();
        Arc::new(Gate::with_options(GateOptions {
            skipper: Some(Arc::new(PathSkipper::new(skip_paths))),
            resolver: Arc::new(resolver),
            engine: Arc::new(engine),
        }))
    }

    #[actix_web::test]
    async fn test_authorization() {
        let hits = Arc::new(AtomicUsize::new(0));
        let handler_hits = hits.clone();
        let app = init_service(
            App::new()
                .wrap(Authorization::new(build_gate(&["/health".to_string()])))
                .app_data(web::Data::new(handler_hits))
                .default_service(web::to(|hits: web::Data<Arc<AtomicUsize>>| async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    HttpResponse::Ok().body("OK")
                })),
        )
        .await;

        let cases = [
            ("/", None, StatusCode::FORBIDDEN),
            ("/", Some("Bearer admin-token"), StatusCode::OK),
            ("/", Some("Bearer wrong-token"), StatusCode::FORBIDDEN),
            ("/", Some("admin-token"), StatusCode::FORBIDDEN),
            ("/login", None, StatusCode::OK),
            ("/health", None, StatusCode::OK),
            ("/health", Some("Bearer wrong-token"), StatusCode::OK),
        ];

        let mut expect_hits = 0;
        for (path, header, expect) in cases {
            let mut req = TestRequest::get().uri(path);
            if let Some(header) = header {
                req = req.insert_header(("Authorization", header));
            }
            let resp = call_service(&app, req.to_request()).await;
            assert_eq!(resp.status(), expect, "{path} {header:?}");
            if expect == StatusCode::OK {
                expect_hits += 1;
            }
        }

        // Rejected requests never reach the handler
        assert_eq!(hits.load(Ordering::SeqCst), expect_hits);
    }

    #[actix_web::test]
    async fn test_forbidden_body() {
        let app = init_service(
            App::new()
                .wrap(Authorization::new(build_gate(&[])))
                .route("/", web::post().to(HttpResponse::Ok)),
        )
        .await;

        let req = TestRequest::post().uri("/login").to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let body: CommonResponse = read_body_json(resp).await;
        assert_eq!(body.code, 403);
        assert_eq!(body.message.as_deref(), Some("Forbidden"));
    }

    #[actix_web::test]
    async fn test_unrouted_path() {
        let app = init_service(
            App::new()
                .wrap(Authorization::new(build_gate(&[])))
                .route("/", web::get().to(HttpResponse::Ok)),
        )
        .await;

        // Unknown paths are still authorized before routing answers 404
        let req = TestRequest::get().uri("/missing").to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let req = TestRequest::get()
            .uri("/missing")
            .insert_header(("Authorization", "Bearer admin-token"))
            .to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
