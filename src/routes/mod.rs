pub mod assignments;

pub mod auth;

pub mod courses;

pub mod grades;

pub mod materials;

pub mod profile;

pub mod schedule;

pub mod system;

pub use assignments::configure_assignment_routes;
pub use auth::configure_auth_routes;
pub use courses::configure_course_routes;
pub use grades::configure_grade_routes;
pub use materials::configure_material_routes;
pub use profile::configure_profile_routes;
pub use schedule::configure_schedule_routes;
pub use system::configure_system_routes;

/// 注册全部 API 路由
pub fn configure_api_routes(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.configure(configure_auth_routes)
        .configure(configure_profile_routes)
        .configure(configure_course_routes)
        .configure(configure_assignment_routes)
        .configure(configure_grade_routes)
        .configure(configure_material_routes)
        .configure(configure_schedule_routes)
        .configure(configure_system_routes);
}

#[cfg(test)]
pub(crate) mod test_support;
