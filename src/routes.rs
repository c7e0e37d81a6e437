//! 路由注册
//! 创建所有 API 路由并应用中间件

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;

use crate::{handlers, middleware::AppState};

/// 请求体大小上限（字节）
const MAX_BODY_BYTES: usize = 64 * 1024;

/// 创建应用路由
pub fn create_router(state: Arc<AppState>) -> Router {
    // 公开端点（健康检查）
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check));

    // 认证路由（无需令牌）
    let auth_routes = Router::new()
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login));

    // 需要认证的路由
    let authenticated_routes = Router::new()
        // 当前用户
        .route(
            "/api/auth/me",
            get(handlers::auth::get_current_user).put(handlers::auth::update_current_user),
        )
        .route("/api/auth/me/password", put(handlers::auth::change_password))
        // 猫
        .route(
            "/api/cats",
            get(handlers::cat::list_cats).post(handlers::cat::create_cat),
        )
        .route(
            "/api/cats/{id}",
            get(handlers::cat::get_cat)
                .put(handlers::cat::update_cat)
                .delete(handlers::cat::delete_cat),
        )
        // 体重记录
        .route(
            "/api/cats/{id}/weights",
            get(handlers::weight::list_weight_records).post(handlers::weight::create_weight_record),
        )
        .route(
            "/api/weights/{id}",
            delete(handlers::weight::delete_weight_record),
        )
        // 体重曲线
        .route("/api/cats/{id}/plot", get(handlers::cat::get_plot_data))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::auth::middleware::jwt_auth_middleware,
        ));

    // 组合所有路由
    Router::new()
        .merge(public_routes)
        .merge(auth_routes)
        .merge(authenticated_routes)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(axum::middleware::from_fn(crate::middleware::track_requests))
        .with_state(state)
}
