use actix_cors::Cors;
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::{Method, StatusCode};
use actix_web::middleware::Next;

/// Open CORS policy for browser clients of the order lookup page.
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .send_wildcard()
        .allowed_methods(["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(["X-Requested-With", "Content-Type", "Authorization"])
}

/// Answer successful preflights with 204 No Content. Must wrap `cors()`.
pub async fn preflight_no_content(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    let preflight = req.method() == Method::OPTIONS;
    let mut res = next.call(req).await?;
    if preflight && res.status().is_success() {
        *res.response_mut().status_mut() = StatusCode::NO_CONTENT;
    }
    Ok(res)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::header;
    use actix_web::middleware::from_fn;
    use actix_web::{test, web, App};

    use super::*;
    use crate::cache::OrderCache;
    use crate::configure_routes;
    use crate::domain::order::fixtures::sample_order;

    macro_rules! app {
        ($cache:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::from(Arc::clone(&$cache)))
                    .wrap(cors())
                    .wrap(from_fn(preflight_no_content))
                    .configure(configure_routes),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn preflight_is_answered_with_no_content() {
        let cache = Arc::new(OrderCache::default());
        let app = app!(cache);

        let req = test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/orders")
            .insert_header((header::ORIGIN, "http://localhost:3000"))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "DELETE"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert_eq!(
            resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
        assert!(cache.is_empty());
    }

    #[actix_web::test]
    async fn cross_origin_get_carries_allow_origin() {
        let cache = Arc::new(OrderCache::default());
        cache.put(sample_order("cors-order"));
        let app = app!(cache);

        let req = test::TestRequest::get()
            .uri("/order/cors-order")
            .insert_header((header::ORIGIN, "http://localhost:3000"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
    }

    #[actix_web::test]
    async fn requests_without_origin_are_untouched() {
        let cache = Arc::new(OrderCache::default());
        let app = app!(cache);

        let req = test::TestRequest::get().uri("/orders").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }
}
