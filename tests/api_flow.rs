mod common;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use rust_examsystem::routes;
use rust_examsystem::utils::{json_error_handler, path_error_handler, query_error_handler};
use serde_json::{Value, json};

macro_rules! call {
    ($app:expr, $req:expr) => {{
        let resp = test::call_service(&$app, $req.to_request()).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }};
}

fn id_of(body: &Value) -> i64 {
    body["data"]["id"].as_i64().expect("response carries an id")
}

/// 从建校到学期汇总的完整 HTTP 流程
#[actix_web::test]
async fn test_exam_flow_over_http() {
    let storage = common::memory_storage().await;
    let app = test::init_service(
        App::new()
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::PathConfig::default().error_handler(path_error_handler))
            .app_data(web::Data::new(storage.clone()))
            .configure(routes::configure_schools_routes)
            .configure(routes::configure_grading_routes)
            .configure(routes::configure_summaries_routes)
            .configure(routes::configure_exam_series_routes)
            .configure(routes::configure_results_routes)
            .configure(routes::configure_exams_routes),
    )
    .await;

    // 学校基础数据
    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/schools")
            .set_json(json!({ "name": "Hillside Academy" }))
    );
    assert_eq!(status, StatusCode::CREATED);
    let school_id = id_of(&body);

    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/schools/{school_id}/classes"))
            .set_json(json!({ "name": "Form 3" }))
    );
    assert_eq!(status, StatusCode::CREATED);
    let class_id = id_of(&body);

    let mut student_ids = Vec::new();
    for (number, name) in [("H001", "Amina"), ("H002", "Brian")] {
        let (status, body) = call!(
            app,
            test::TestRequest::post()
                .uri(&format!("/api/v1/schools/{school_id}/students"))
                .set_json(json!({
                    "admission_number": number,
                    "name": name,
                    "class_id": class_id,
                }))
        );
        assert_eq!(status, StatusCode::CREATED);
        student_ids.push(id_of(&body));
    }

    let mut subject_ids = Vec::new();
    for (name, code) in [("Chemistry", "CHE"), ("History", "HIS")] {
        let (status, body) = call!(
            app,
            test::TestRequest::post()
                .uri(&format!("/api/v1/schools/{school_id}/subjects"))
                .set_json(json!({ "name": name, "code": code }))
        );
        assert_eq!(status, StatusCode::CREATED);
        subject_ids.push(id_of(&body));
    }
    let (chemistry, history) = (subject_ids[0], subject_ids[1]);

    // 重叠区间被拒绝
    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/grading-systems")
            .set_json(json!({
                "school_id": school_id,
                "name": "Broken",
                "grading_type": "letter",
                "bands": [
                    { "grade": "A", "min_score": 70, "max_score": 100, "points": 4 },
                    { "grade": "B", "min_score": 60, "max_score": 75, "points": 3 },
                ],
            }))
    );
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["data"].as_array().is_some_and(|e| !e.is_empty()));

    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/grading-systems")
            .set_json(json!({
                "school_id": school_id,
                "name": "Four point",
                "grading_type": "letter",
                "is_default": true,
                "bands": [
                    { "grade": "A", "min_score": 70, "max_score": 100, "points": 4 },
                    { "grade": "B", "min_score": 50, "max_score": 69.99, "points": 3 },
                    { "grade": "C", "min_score": 0, "max_score": 49.99, "points": 1 },
                ],
            }))
    );
    assert_eq!(status, StatusCode::CREATED);
    let grading_system_id = id_of(&body);

    let (status, body) = call!(
        app,
        test::TestRequest::get().uri(&format!(
            "/api/v1/grading-systems/{grading_system_id}/resolve?score=69.99"
        ))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["grade"], "B");

    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/exam-series")
            .set_json(json!({
                "school_id": school_id,
                "name": "Term 2",
                "academic_year": "2025",
                "term": 2,
                "start_date": "2025-05-05",
                "end_date": "2025-08-01",
            }))
    );
    assert_eq!(status, StatusCode::CREATED);
    let series_id = id_of(&body);

    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/exam-categories")
            .set_json(json!({ "school_id": school_id, "name": "End term", "weight": 60 }))
    );
    assert_eq!(status, StatusCode::CREATED);
    let category_id = id_of(&body);

    // 化学分两卷计分，历史直接计分
    let (status, body) = call!(
        app,
        test::TestRequest::post().uri("/api/v1/exams").set_json(json!({
            "exam_series_id": series_id,
            "exam_category_id": category_id,
            "grading_system_id": grading_system_id,
            "name": "End of term",
            "start_date": "2025-07-21",
            "end_date": "2025-07-25",
            "scope_type": "all_school",
            "subject_scope_type": "selected_classes",
            "subjects": [
                { "subject_id": chemistry, "has_papers": true, "paper_count": 2 },
                { "subject_id": history },
            ],
        }))
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["status"], "draft");
    let exam_id = id_of(&body);

    let (status, body) = call!(
        app,
        test::TestRequest::get().uri(&format!("/api/v1/exams/{exam_id}/validation"))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["is_valid"], false);

    let (status, _) = call!(
        app,
        test::TestRequest::post().uri(&format!("/api/v1/exams/{exam_id}/activate"))
    );
    assert_eq!(status, StatusCode::CONFLICT);

    let paper = |number: i32, weight: f64| {
        json!({
            "subject_id": chemistry,
            "paper_number": number,
            "total_marks": 100,
            "percentage_weight": weight,
        })
    };
    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/exams/{exam_id}/papers"))
            .set_json(paper(1, 60.0))
    );
    assert_eq!(status, StatusCode::CREATED);
    let first_paper = id_of(&body);

    let (status, _) = call!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/exams/{exam_id}/papers"))
            .set_json(paper(1, 40.0))
    );
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = call!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/exams/{exam_id}/papers"))
            .set_json(paper(2, 50.0))
    );
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = call!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/exams/{exam_id}/papers"))
            .set_json(paper(2, 40.0))
    );
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = call!(
        app,
        test::TestRequest::post().uri(&format!("/api/v1/exams/{exam_id}/activate"))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "active");

    // 分卷科目不能走批量导入
    let (status, _) = call!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/exams/{exam_id}/results"))
            .set_json(json!({
                "subject_id": chemistry,
                "results": [{ "student_id": student_ids[0], "score": 50 }],
            }))
    );
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // 超出满分的一行让整批被拒
    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/exams/{exam_id}/results"))
            .set_json(json!({
                "subject_id": history,
                "results": [
                    { "student_id": student_ids[0], "score": 88 },
                    { "student_id": student_ids[1], "score": 120 },
                ],
            }))
    );
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["data"][0]["field"], "results[1].score");

    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/exams/{exam_id}/results"))
            .set_json(json!({
                "subject_id": history,
                "entered_by": 7,
                "results": [
                    { "student_id": student_ids[0], "score": 88 },
                    { "student_id": student_ids[1], "is_absent": true },
                ],
            }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["imported"], 2);
    assert_eq!(body["data"]["absent"], 1);

    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/exam-papers/{first_paper}/results"))
            .set_json(json!({
                "results": [
                    { "student_id": student_ids[0], "marks": 50 },
                    { "student_id": student_ids[1], "marks": 100 },
                ],
            }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["results"][0]["student_id"], student_ids[1]);
    assert_eq!(body["data"]["results"][0]["total_score"], 60.0);

    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/exam-series/{series_id}/summaries/generate"))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["generated"], 2);

    // 学生一：历史 88 + 化学 30 = 118 / 200
    let (status, body) = call!(
        app,
        test::TestRequest::get().uri(&format!(
            "/api/v1/exam-series/{series_id}/summaries/{}",
            student_ids[0]
        ))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_points"], 118.0);
    assert_eq!(body["data"]["average_percentage"], 59.0);
    assert_eq!(body["data"]["average_grade"], "B");
    assert_eq!(body["data"]["overall_position"], 2);

    let (status, body) = call!(
        app,
        test::TestRequest::get().uri(&format!("/api/v1/exam-series/{series_id}/summaries"))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"][0]["student_id"], student_ids[1]);

    let (status, _) = call!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/exam-series/{series_id}/summaries/99999"))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = call!(
        app,
        test::TestRequest::get().uri(&format!("/api/v1/exam-series/{series_id}/exams"))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"][0]["id"], exam_id);
}
