//! Business logic behind the dynamic routes.
//!
//! Collaborators are passed in as trait objects so tests can substitute
//! their own store or renderer.

pub mod handlers;
pub mod render;
pub mod user;

pub use render::{Renderer, TemplateRenderer};
pub use user::{MemoryUserStore, User, UserStore};

use std::sync::Arc;

use crate::http::request::Method;
use crate::router::{Router, StaticFiles};

/// Builds the route table: user creation, login and listing, with every
/// other path served from `static_files`.
pub fn routes(
    static_files: StaticFiles,
    store: Arc<dyn UserStore>,
    renderer: Arc<dyn Renderer>,
) -> Router {
    let mut router = Router::new(static_files);

    let create_store = Arc::clone(&store);
    router.register(Method::POST, "/user/create", move |req| {
        handlers::create_user(create_store.as_ref(), req)
    });

    let login_store = Arc::clone(&store);
    router.register(Method::POST, "/user/login", move |req| {
        handlers::login(login_store.as_ref(), req)
    });

    router.register(Method::GET, "/user/list", move |req| {
        handlers::list_users(store.as_ref(), renderer.as_ref(), req)
    });

    router
}
