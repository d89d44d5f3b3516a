use serde::Serialize;

use super::entities::Material;
use crate::models::courses::entities::CourseBrief;
use crate::models::users::entities::UserBrief;

/// 资料详情，附带课程与教师
#[derive(Debug, Clone, Serialize)]
pub struct MaterialDetail {
    #[serde(flatten)]
    pub material: Material,
    pub course: Option<CourseBrief>,
    pub teacher: Option<UserBrief>,
}
