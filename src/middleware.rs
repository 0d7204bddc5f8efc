//! HTTP middleware.

use std::time::Instant;

use actix_web::Error;
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::middleware::Next;

pub const PROCESS_TIME_HEADER: &str = "x-process-time";

/// Stamps every response with the wall-clock seconds spent handling it.
pub async fn response_time(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let start = Instant::now();
    let mut res = next.call(req).await?;

    let elapsed = format!("{:.6}", start.elapsed().as_secs_f64());
    if let Ok(value) = HeaderValue::from_str(&elapsed) {
        res.headers_mut()
            .insert(HeaderName::from_static(PROCESS_TIME_HEADER), value);
    }

    Ok(res)
}
