use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};
use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::response::{CommonResponse, Response};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthzResponse {
    /// Server time, unix seconds
    pub now: u64,
    pub version: String,
}

pub async fn ok() -> HttpResponse {
    Response::json(String::from("OK")).into()
}

pub async fn healthz() -> HttpResponse {
    let now = Local::now().timestamp() as u64;
    let resp = HealthzResponse {
        now,
        version: env!("CARGO_PKG_VERSION").to_string(),
    };
    Response::json(resp).into()
}

pub async fn default_handler(req: HttpRequest) -> HttpResponse {
    let path = req.uri().path().to_string();
    let method = req.method().as_str().to_string();
    let message = format!("No route to {method} {path}");
    let ret = CommonResponse {
        code: StatusCode::NOT_FOUND.into(),
        message: Some(message),
    };
    HttpResponse::NotFound().json(ret)
}
