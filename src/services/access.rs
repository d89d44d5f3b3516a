//! 访问控制规则
//!
//! 角色是封闭枚举，所有权限判断集中在这里，路由中间件只做粗粒度的角色过滤。

use crate::errors::{PortalError, Result};
use crate::models::grades::entities::Grade;
use crate::models::users::entities::{User, UserRole};

/// 只有学生可以提交作业
pub fn can_submit(actor: &User) -> bool {
    actor.role == UserRole::Student
}

/// 只有学生可以选课
pub fn can_enroll(actor: &User) -> bool {
    actor.role == UserRole::Student
}

/// 创建课程、作业、资料、课表以及评分
pub fn can_author(actor: &User) -> bool {
    matches!(actor.role, UserRole::Teacher | UserRole::Admin)
}

/// 修改或删除带有教师归属的记录
pub fn can_mutate_owned(actor: &User, owner_id: i64) -> bool {
    match actor.role {
        UserRole::Admin => true,
        UserRole::Teacher => owner_id == actor.id,
        UserRole::Student => false,
    }
}

/// 成绩列表的学生过滤条件，学生只能看到自己的成绩
pub fn grade_scope(actor: &User, requested_student: Option<i64>) -> Option<i64> {
    match actor.role {
        UserRole::Student => Some(actor.id),
        UserRole::Teacher | UserRole::Admin => requested_student,
    }
}

/// 解析成绩统计的目标学生
///
/// 学生访问 `/performance` 时忽略路径参数，访问他人的 `/performance/{id}` 返回 403；
/// 教师和管理员必须指定学生。
pub fn performance_target(actor: &User, path_student_id: Option<i64>) -> Result<i64> {
    match (actor.role, path_student_id) {
        (UserRole::Student, Some(id)) if id != actor.id => {
            Err(PortalError::authorization("只能查看自己的成绩统计"))
        }
        (UserRole::Student, _) => Ok(actor.id),
        (UserRole::Teacher | UserRole::Admin, Some(id)) => Ok(id),
        (UserRole::Teacher | UserRole::Admin, None) => {
            Err(PortalError::validation("需要指定学生 ID"))
        }
    }
}

/// 学生只能查看自己的成绩
pub fn can_view_grade(actor: &User, grade: &Grade) -> bool {
    match actor.role {
        UserRole::Student => grade.student_id == actor.id,
        UserRole::Teacher | UserRole::Admin => true,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn actor(id: i64, role: UserRole) -> User {
        User {
            id,
            email: format!("user{id}@example.com"),
            password_hash: String::new(),
            full_name: format!("User {id}"),
            role,
            group_name: None,
            avatar_url: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn grade_of(student_id: i64) -> Grade {
        Grade {
            id: 1,
            student_id,
            course_id: 1,
            submission_id: Some(1),
            score: 90.0,
            max_score: 100,
            feedback: None,
            graded_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_role_truth_table() {
        let student = actor(1, UserRole::Student);
        let teacher = actor(2, UserRole::Teacher);
        let admin = actor(3, UserRole::Admin);

        assert!(can_submit(&student) && !can_submit(&teacher) && !can_submit(&admin));
        assert!(can_enroll(&student) && !can_enroll(&teacher) && !can_enroll(&admin));
        assert!(!can_author(&student) && can_author(&teacher) && can_author(&admin));
    }

    #[test]
    fn test_can_mutate_owned() {
        let student = actor(1, UserRole::Student);
        let teacher = actor(2, UserRole::Teacher);
        let admin = actor(3, UserRole::Admin);

        assert!(can_mutate_owned(&teacher, 2));
        assert!(!can_mutate_owned(&teacher, 99));
        assert!(can_mutate_owned(&admin, 99));
        assert!(!can_mutate_owned(&student, 1));
    }

    #[test]
    fn test_grade_scope() {
        let student = actor(1, UserRole::Student);
        let teacher = actor(2, UserRole::Teacher);

        assert_eq!(grade_scope(&student, Some(7)), Some(1));
        assert_eq!(grade_scope(&student, None), Some(1));
        assert_eq!(grade_scope(&teacher, Some(7)), Some(7));
        assert_eq!(grade_scope(&teacher, None), None);
    }

    #[test]
    fn test_performance_target() {
        let student = actor(1, UserRole::Student);
        let teacher = actor(2, UserRole::Teacher);
        let admin = actor(3, UserRole::Admin);

        assert_eq!(performance_target(&student, None).unwrap(), 1);
        assert_eq!(performance_target(&student, Some(1)).unwrap(), 1);
        assert!(matches!(
            performance_target(&student, Some(5)),
            Err(PortalError::Authorization(_))
        ));
        assert_eq!(performance_target(&teacher, Some(5)).unwrap(), 5);
        assert_eq!(performance_target(&admin, Some(5)).unwrap(), 5);
        assert!(matches!(
            performance_target(&teacher, None),
            Err(PortalError::Validation(_))
        ));
    }

    #[test]
    fn test_can_view_grade() {
        let student = actor(1, UserRole::Student);
        let teacher = actor(2, UserRole::Teacher);

        assert!(can_view_grade(&student, &grade_of(1)));
        assert!(!can_view_grade(&student, &grade_of(4)));
        assert!(can_view_grade(&teacher, &grade_of(4)));
    }
}
