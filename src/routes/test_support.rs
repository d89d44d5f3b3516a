//! 路由测试用的应用构造

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::{App, Error, web};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::cache::object_cache::moka::MokaCacheWrapper;
use crate::models::AppStartTime;
use crate::models::users::entities::{User, UserRole};
use crate::storage::Storage;
use crate::storage::sea_orm_storage::fixtures;
use crate::utils::{json_error_handler, query_error_handler};

pub(crate) struct TestContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
}

impl TestContext {
    pub(crate) async fn new() -> Self {
        Self {
            storage: Arc::new(fixtures::storage().await),
            cache: Arc::new(MokaCacheWrapper::with_capacity(1_000, 60)),
        }
    }

    pub(crate) async fn user(&self, email: &str, role: UserRole) -> User {
        self.storage
            .create_user(fixtures::user_request(email, role))
            .await
            .expect("create user")
    }

    pub(crate) fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<impl MessageBody + use<>>,
            Error = Error,
            InitError = (),
        > + use<>,
    > {
        App::new()
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::Data::new(self.storage.clone()))
            .app_data(web::Data::new(self.cache.clone()))
            .app_data(web::Data::new(AppStartTime {
                start_datetime: chrono::Utc::now(),
            }))
            .configure(super::configure_api_routes)
    }
}

/// 为用户签发令牌并构造 Authorization 头
pub(crate) fn bearer(user: &User) -> (header::HeaderName, String) {
    let token = crate::services::auth::issue_token(user).expect("issue token");
    (header::AUTHORIZATION, format!("Bearer {token}"))
}
