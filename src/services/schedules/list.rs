use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ScheduleService, schedule_details};
use crate::models::schedules::requests::{ScheduleFilter, ScheduleListQuery};
use crate::models::users::entities::{User, UserRole};
use crate::services::current_user;

/// 合并查询参数与角色限制：有分组的学生只看本组，教师只看自己的课
pub fn schedule_filter(actor: &User, query: ScheduleListQuery) -> ScheduleFilter {
    let mut filter = ScheduleFilter {
        day_of_week: query.day_of_week,
        group_name: query.group_name,
        course_id: query.course_id,
        teacher_id: None,
    };

    match actor.role {
        UserRole::Student => {
            if let Some(group) = &actor.group_name {
                filter.group_name = Some(group.clone());
            }
        }
        UserRole::Teacher => filter.teacher_id = Some(actor.id),
        UserRole::Admin => {}
    }

    filter
}

pub async fn list_schedules(
    service: &ScheduleService,
    request: &HttpRequest,
    query: ScheduleListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let actor = current_user(request)?;

    let schedules = storage.list_schedules(schedule_filter(&actor, query)).await?;
    let details = schedule_details(storage.as_ref(), schedules).await?;

    Ok(HttpResponse::Ok().json(details))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::access::tests::actor;

    fn query() -> ScheduleListQuery {
        ScheduleListQuery {
            day_of_week: Some(1),
            group_name: Some("G2".into()),
            course_id: None,
        }
    }

    #[test]
    fn test_student_with_group_sees_own_group() {
        let mut student = actor(1, UserRole::Student);
        student.group_name = Some("G1".into());

        let filter = schedule_filter(&student, query());
        assert_eq!(filter.group_name.as_deref(), Some("G1"));
        assert_eq!(filter.day_of_week, Some(1));
        assert_eq!(filter.teacher_id, None);
    }

    #[test]
    fn test_student_without_group_keeps_query() {
        let filter = schedule_filter(&actor(1, UserRole::Student), query());
        assert_eq!(filter.group_name.as_deref(), Some("G2"));
    }

    #[test]
    fn test_teacher_sees_own_classes() {
        let filter = schedule_filter(&actor(9, UserRole::Teacher), query());
        assert_eq!(filter.teacher_id, Some(9));

        let filter = schedule_filter(&actor(3, UserRole::Admin), ScheduleListQuery::default());
        assert_eq!(filter, ScheduleFilter::default());
    }
}
