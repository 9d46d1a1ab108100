//! Post meta injection.
//!
//! Every step degrades: no slug, no post, or a page that is not plain
//! HTML all end in the origin response being returned as-is.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::{Html, IntoResponse, Response};

use crate::config::InjectionMode;
use crate::functions::passthrough;
use crate::http::origin::origin_target;
use crate::http::response::{is_rewritable_html, rewrite_headers};
use crate::http::server::EdgeRuntime;
use crate::meta;
use crate::observability::metrics;
use crate::posts::Post;
use crate::routing::{extract_slug, BoundFunction};

pub async fn seo_blog(
    runtime: &EdgeRuntime,
    function: &BoundFunction,
    request: Request<Body>,
    request_id: &str,
) -> Response {
    let uri = request.uri().clone();
    let Some(slug) = extract_slug(uri.path(), uri.query(), &function.slug_prefix) else {
        tracing::debug!(request_id = %request_id, path = %uri.path(), "No slug, passing through");
        return passthrough(runtime, request, request_id).await;
    };

    let is_get = request.method() == Method::GET;
    let post = runtime.posts.fetch_opt(&slug, request_id).await;

    if let (Some(post), InjectionMode::Generate, true) = (&post, function.mode, is_get) {
        return generated(runtime, post, &slug);
    }

    let target = origin_target(&uri, function.rewrite_to.as_deref());
    let identity = post.is_some() && is_get;
    let origin = match runtime.origin.forward(request, &target, request_id, identity).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Origin request failed");
            return (e.status(), "Origin request failed").into_response();
        }
    };

    let Some(post) = post else {
        return origin.map(Body::new);
    };
    if !is_get || !is_rewritable_html(origin.status(), origin.headers()) {
        tracing::debug!(
            request_id = %request_id,
            status = %origin.status(),
            "Origin response not rewritable, passing through"
        );
        return origin.map(Body::new);
    }

    let (mut parts, body) = origin.into_parts();
    let bytes = match axum::body::to_bytes(Body::new(body), runtime.max_body_size).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                limit = runtime.max_body_size,
                error = %e,
                "Failed to buffer origin page"
            );
            return (StatusCode::BAD_GATEWAY, "Origin page could not be read").into_response();
        }
    };

    let html = match String::from_utf8(bytes.to_vec()) {
        Ok(html) => html,
        Err(e) => {
            tracing::warn!(request_id = %request_id, "Origin page is not UTF-8, passing through");
            return Response::from_parts(parts, Body::from(e.into_bytes()));
        }
    };

    let page = meta::transform(&html, &post, &runtime.site, &slug, function.mode);
    metrics::record_meta_injected(function.mode.as_str());
    tracing::info!(
        request_id = %request_id,
        slug = %slug,
        mode = function.mode.as_str(),
        "Injected post meta"
    );

    rewrite_headers(&mut parts.headers, runtime.cache_control.as_ref());
    Response::from_parts(parts, Body::from(page))
}

fn generated(runtime: &EdgeRuntime, post: &Post, slug: &str) -> Response {
    let page = meta::transform("", post, &runtime.site, slug, InjectionMode::Generate);
    metrics::record_meta_injected(InjectionMode::Generate.as_str());

    let mut response = Html(page).into_response();
    if let Some(value) = &runtime.cache_control {
        response.headers_mut().insert(header::CACHE_CONTROL, value.clone());
    }
    response
}
