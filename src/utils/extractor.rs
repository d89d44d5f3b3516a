//! 路径参数提取器
//!
//! 非法或非正数的 ID 直接以 400 拒绝，处理函数拿到的一定是合法 ID。

use actix_web::{FromRequest, HttpRequest, dev::Payload};
use std::future::{Ready, ready};

use crate::errors::PortalError;

macro_rules! define_safe_id {
    ($($name:ident => $param:literal),* $(,)?) => {
        $(
            #[derive(Debug, Clone, Copy, PartialEq, Eq)]
            pub struct $name(pub i64);

            impl FromRequest for $name {
                type Error = actix_web::Error;
                type Future = Ready<Result<Self, Self::Error>>;

                fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                    ready(parse_positive_id(req, $param).map($name).map_err(Into::into))
                }
            }
        )*
    };
}

define_safe_id! {
    SafeIDI64 => "id",
    SafeSubmissionIdI64 => "submission_id",
    SafeStudentIdI64 => "student_id",
}

fn parse_positive_id(req: &HttpRequest, param: &str) -> Result<i64, PortalError> {
    let raw = req
        .match_info()
        .get(param)
        .ok_or_else(|| PortalError::validation(format!("缺少路径参数: {param}")))?;

    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(PortalError::validation(format!("无效的路径参数 {param}: {raw}"))),
    }
}
