pub mod create;
pub mod delete;
pub mod download;
pub mod files;
pub mod get;
pub mod list;
pub mod update;
pub mod upload;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::Result;
use crate::models::materials::{
    entities::Material,
    requests::{CreateMaterialRequest, MaterialListQuery, UpdateMaterialRequest},
    responses::MaterialDetail,
};
use crate::services::{course_brief_map, user_brief_map};
use crate::storage::Storage;

pub struct MaterialService;

impl MaterialService {
    pub fn new_lazy() -> Self {
        Self
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>> {
        super::storage_from_request(request)
    }

    pub async fn list_materials(
        &self,
        request: &HttpRequest,
        query: MaterialListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_materials(self, request, query).await
    }

    pub async fn get_material(
        &self,
        request: &HttpRequest,
        material_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_material(self, request, material_id).await
    }

    // 以外部链接形式创建资料
    pub async fn create_material(
        &self,
        request: &HttpRequest,
        material_data: CreateMaterialRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_material(self, request, material_data).await
    }

    // 上传文件并创建资料
    pub async fn upload_material(
        &self,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        upload::upload_material(self, request, payload).await
    }

    pub async fn update_material(
        &self,
        request: &HttpRequest,
        material_id: i64,
        update_data: UpdateMaterialRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_material(self, request, material_id, update_data).await
    }

    // 替换资料文件
    pub async fn replace_file(
        &self,
        request: &HttpRequest,
        material_id: i64,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        upload::replace_material_file(self, request, material_id, payload).await
    }

    pub async fn delete_material(
        &self,
        request: &HttpRequest,
        material_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_material(self, request, material_id).await
    }

    pub async fn download(
        &self,
        request: &HttpRequest,
        material_id: i64,
    ) -> ActixResult<HttpResponse> {
        download::download_material(self, request, material_id).await
    }
}

/// 为资料附加课程与教师摘要
pub(crate) async fn material_details(
    storage: &dyn Storage,
    materials: Vec<Material>,
) -> Result<Vec<MaterialDetail>> {
    let courses = course_brief_map(storage, materials.iter().map(|m| m.course_id)).await?;
    let teachers = user_brief_map(storage, materials.iter().map(|m| m.teacher_id)).await?;

    Ok(materials
        .into_iter()
        .map(|material| MaterialDetail {
            course: courses.get(&material.course_id).cloned(),
            teacher: teachers.get(&material.teacher_id).cloned(),
            material,
        })
        .collect())
}

/// 单条资料详情
pub(crate) async fn material_detail(
    storage: &dyn Storage,
    material: Material,
) -> Result<MaterialDetail> {
    let course = storage.get_course_by_id(material.course_id).await?;
    let teacher = storage.get_user_by_id(material.teacher_id).await?;

    Ok(MaterialDetail {
        course: course.map(|c| c.brief()),
        teacher: teacher.map(|t| t.brief()),
        material,
    })
}
