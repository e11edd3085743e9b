//! API routes for crab-merchant

pub mod crud;
pub mod extract;
pub mod health;

use axum::routing::get;
use axum::{Router, middleware};
use http::{HeaderName, HeaderValue};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::auth::merchant_auth_middleware;
use crate::crud::Resource;
use crate::resources::{
    AutomationActions, DeliveryInfos, KitchenDevices, KitchenStations, MarketingAutomations,
    OnlineOrders, PaymentInfos, QrCodes, TipPoolMembers, TipPools,
};
use crate::state::AppState;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// The five CRUD routes of one resource under `/api/{path}`
pub fn resource_routes<R: Resource>(path: &str) -> Router<AppState> {
    Router::new()
        .route(
            &format!("/api/{path}"),
            get(crud::list::<R>).post(crud::create::<R>),
        )
        .route(
            &format!("/api/{path}/{{id}}"),
            get(crud::find_one::<R>)
                .put(crud::update::<R>)
                .delete(crud::remove::<R>),
        )
}

/// Resource API (JWT authenticated)
fn api_router(state: &AppState) -> Router<AppState> {
    Router::new()
        // Kitchen
        .merge(resource_routes::<KitchenStations>("kitchen-stations"))
        .merge(resource_routes::<KitchenDevices>("kitchen-devices"))
        // Marketing
        .merge(resource_routes::<MarketingAutomations>("marketing-automations"))
        .merge(resource_routes::<AutomationActions>("automation-actions"))
        // Online ordering
        .merge(resource_routes::<OnlineOrders>("online-orders"))
        .merge(resource_routes::<DeliveryInfos>("delivery-infos"))
        .merge(resource_routes::<PaymentInfos>("payment-infos"))
        .merge(resource_routes::<QrCodes>("qr-codes"))
        // Tip pools
        .merge(resource_routes::<TipPools>("tip-pools"))
        .merge(resource_routes::<TipPoolMembers>("tip-pool-members"))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            merchant_auth_middleware,
        ))
}

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health - public route
        .route("/health", get(health::health_check))
        .merge(api_router(&state))
        // CORS - Handle cross-origin requests
        .layer(CorsLayer::permissive())
        // Trace - Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        // Propagate request ID to response
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        // Request ID - outermost, so the id exists before anything else runs
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
        .with_state(state)
}
