use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{SchoolService, ensure_school};
use crate::models::schools::{
    entities::{SchoolClass, Stream},
    requests::{CreateStudentRequest, StudentListQuery},
};
use crate::models::{ApiResponse, FieldError};
use crate::services::{storage_error_response, validation_response};
use crate::utils::validate::{push_error, validate_name};

/// 学生的班级必须属于本校，分流必须属于该班级
fn check_placement(
    school_id: i64,
    req: &CreateStudentRequest,
    class: Option<&SchoolClass>,
    stream: Option<&Stream>,
) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if let Some(class_id) = req.class_id {
        match class {
            Some(class) if class.school_id == school_id => {}
            _ => errors.push(FieldError::new(
                "class_id",
                format!("班级 {class_id} 不属于学校 {school_id}"),
            )),
        }
    }

    if let Some(stream_id) = req.stream_id {
        match (req.class_id, stream) {
            (None, _) => errors.push(FieldError::new("stream_id", "指定分流时必须同时指定班级")),
            (Some(class_id), Some(stream)) if stream.class_id == class_id => {}
            (Some(class_id), _) => errors.push(FieldError::new(
                "stream_id",
                format!("分流 {stream_id} 不属于班级 {class_id}"),
            )),
        }
    }

    errors
}

pub async fn create_student(
    service: &SchoolService,
    request: &HttpRequest,
    school_id: i64,
    req: CreateStudentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    if let Err(resp) = ensure_school(&storage, school_id).await {
        return Ok(resp);
    }

    let class = match req.class_id {
        Some(id) => match storage.get_school_class_by_id(id).await {
            Ok(class) => class,
            Err(e) => return Ok(storage_error_response(&e, "Failed to load class")),
        },
        None => None,
    };
    let stream = match req.stream_id {
        Some(id) => match storage.get_stream_by_id(id).await {
            Ok(stream) => stream,
            Err(e) => return Ok(storage_error_response(&e, "Failed to load stream")),
        },
        None => None,
    };

    let mut errors = Vec::new();
    push_error(&mut errors, "name", validate_name(&req.name, 128));
    push_error(
        &mut errors,
        "admission_number",
        validate_name(&req.admission_number, 32),
    );
    errors.extend(check_placement(school_id, &req, class.as_ref(), stream.as_ref()));
    if !errors.is_empty() {
        return Ok(validation_response(errors, "Student data is invalid"));
    }

    match storage.create_student(school_id, req).await {
        Ok(student) => {
            info!("Student {} enrolled in school {}", student.id, school_id);
            Ok(HttpResponse::Created().json(ApiResponse::success(student, "Student created successfully")))
        }
        Err(e) => Ok(storage_error_response(&e, "Student creation failed")),
    }
}

pub async fn list_students(
    service: &SchoolService,
    request: &HttpRequest,
    school_id: i64,
    query: StudentListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_students_with_pagination(school_id, query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Student list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(&e, "Failed to retrieve student list")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(id: i64, school_id: i64) -> SchoolClass {
        SchoolClass {
            id,
            school_id,
            name: format!("Form {id}"),
            created_at: chrono::DateTime::default(),
        }
    }

    fn stream(id: i64, class_id: i64) -> Stream {
        Stream {
            id,
            class_id,
            name: "East".to_string(),
            created_at: chrono::DateTime::default(),
        }
    }

    fn request(class_id: Option<i64>, stream_id: Option<i64>) -> CreateStudentRequest {
        CreateStudentRequest {
            admission_number: "ADM-001".to_string(),
            name: "Student".to_string(),
            class_id,
            stream_id,
        }
    }

    #[test]
    fn test_valid_placement() {
        let c = class(1, 10);
        let s = stream(5, 1);
        assert!(check_placement(10, &request(Some(1), Some(5)), Some(&c), Some(&s)).is_empty());
        assert!(check_placement(10, &request(None, None), None, None).is_empty());
    }

    #[test]
    fn test_foreign_class_and_stream_are_rejected() {
        let c = class(1, 99);
        let s = stream(5, 2);
        let errors = check_placement(10, &request(Some(1), Some(5)), Some(&c), Some(&s));
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["class_id", "stream_id"]);
    }

    #[test]
    fn test_stream_without_class_is_rejected() {
        let s = stream(5, 1);
        let errors = check_placement(10, &request(None, Some(5)), None, Some(&s));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "stream_id");
    }
}
