use anyhow::{Context, anyhow};
use serde_json::json;
use tracing::{debug, info};

use crate::app::render::Renderer;
use crate::app::user::{User, UserStore};
use crate::error::Result;
use crate::http::request::Request;
use crate::http::response::{Redirect, Rendered, Response};

const INDEX_PAGE: &str = "/index.html";
const LOGIN_PAGE: &str = "/user/login.html";
const LOGIN_FAILED_PAGE: &str = "/user/login_failed.html";
const USER_LIST_VIEW: &str = "user/list";

const LOGGED_IN_COOKIE: &str = "logined=true";

/// `POST /user/create`
pub fn create_user(store: &dyn UserStore, req: &Request) -> Result<Response> {
    let user_id = req
        .parameter("userId")
        .filter(|id| !id.is_empty())
        .ok_or_else(|| anyhow!("user creation without a userId"))?;

    let field = |key| req.parameter(key).unwrap_or_default().to_string();
    let user = User {
        user_id: user_id.to_string(),
        password: field("password"),
        name: field("name"),
        email: field("email"),
    };

    info!(user_id = %user.user_id, "user created");
    store.add_user(user);

    Ok(Response::redirect(INDEX_PAGE))
}

/// `POST /user/login`
///
/// An unknown user id counts as a failed login.
pub fn login(store: &dyn UserStore, req: &Request) -> Result<Response> {
    let user_id = req.parameter("userId").unwrap_or_default();
    let password = req.parameter("password").unwrap_or_default();

    let success = store
        .find_user_by_id(user_id)
        .is_some_and(|user| user.matches_password(password));

    req.set_login(success);
    debug!(user_id, success, session = ?req.session_id(), "login attempt");

    let response = if success {
        Redirect::new(INDEX_PAGE).header("Set-Cookie: logined=true; Path=/")
    } else {
        Redirect::new(LOGIN_FAILED_PAGE).header("Set-Cookie: logined=false; Path=/")
    };

    Ok(response.into())
}

/// `GET /user/list`
///
/// Only clients holding the login cookie see the list; everyone else is sent
/// to the login page.
pub fn list_users(
    store: &dyn UserStore,
    renderer: &dyn Renderer,
    req: &Request,
) -> Result<Response> {
    if !req.has_cookie(LOGGED_IN_COOKIE) {
        return Ok(Response::redirect(LOGIN_PAGE));
    }

    let model = json!({ "users": store.find_all() });
    let body = renderer
        .render(USER_LIST_VIEW, &model)
        .context("rendering user list")?;

    Ok(Rendered::html(body).into())
}
