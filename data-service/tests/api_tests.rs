use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
    routing::{delete, get, patch, post},
};
use chrono::Utc;
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

use data_service::{
    api::{
        handler::{coverage_config, employee, farmacy, membership, shift_template},
        state::DataServiceAppState,
    },
    domain::{
        coverage_config::MockCoverageConfigRepository, employee::MockEmployeeRepository,
        farmacy::MockFarmacyRepository, membership::MockMembershipRepository,
        shift_template::MockShiftTemplateRepository,
    },
    error::DataServiceError,
};
use shared::types::{CoverageConfig, CoverageConfigRow, Employee, EmployeeStatus, Farmacy};

#[derive(Default)]
struct Mocks {
    employee: MockEmployeeRepository,
    farmacy: MockFarmacyRepository,
    membership: MockMembershipRepository,
    shift_template: MockShiftTemplateRepository,
    coverage_config: MockCoverageConfigRepository,
}

fn build_test_app(mocks: Mocks) -> Router {
    let state = Arc::new(DataServiceAppState {
        employee_repo: Arc::new(mocks.employee),
        farmacy_repo: Arc::new(mocks.farmacy),
        membership_repo: Arc::new(mocks.membership),
        shift_template_repo: Arc::new(mocks.shift_template),
        coverage_config_repo: Arc::new(mocks.coverage_config),
    });

    Router::new()
        .route(
            "/api/v1/employees",
            get(employee::find_all).post(employee::create),
        )
        .route("/api/v1/employees/batch", post(employee::batch_create))
        .route(
            "/api/v1/employees/{id}",
            get(employee::find_by_id)
                .put(employee::update)
                .delete(employee::delete),
        )
        .route(
            "/api/v1/employees/{id}/deactivate",
            patch(employee::deactivate),
        )
        .route(
            "/api/v1/employees/{id}/farmacies",
            get(membership::get_employee_farmacies),
        )
        .route(
            "/api/v1/farmacies",
            get(farmacy::find_all).post(farmacy::create),
        )
        .route("/api/v1/farmacies/batch", post(farmacy::batch_create))
        .route(
            "/api/v1/farmacies/{id}",
            get(farmacy::find_by_id)
                .put(farmacy::update)
                .delete(farmacy::delete),
        )
        .route(
            "/api/v1/farmacies/{farmacy_id}/employees",
            get(membership::get_farmacy_employees).post(membership::add_member),
        )
        .route(
            "/api/v1/farmacies/{farmacy_id}/employees/{employee_id}",
            delete(membership::remove_member),
        )
        .route(
            "/api/v1/memberships/batch",
            post(membership::batch_add_members),
        )
        .route(
            "/api/v1/farmacies/{farmacy_id}/shift-templates",
            get(shift_template::find_by_farmacy).post(shift_template::create),
        )
        .route(
            "/api/v1/farmacies/{farmacy_id}/shift-templates/{id}",
            get(shift_template::find_by_id)
                .put(shift_template::update)
                .delete(shift_template::delete),
        )
        .route(
            "/api/v1/farmacies/{farmacy_id}/coverage-config",
            get(coverage_config::get).put(coverage_config::upsert),
        )
        .with_state(state)
}

fn make_employee(id: Uuid) -> Employee {
    let now = Utc::now();
    Employee {
        id,
        name: "Alice".to_string(),
        email: format!("alice-{id}@example.com"),
        status: EmployeeStatus::Active,
        max_daily_hours: 8,
        max_weekly_hours: 40,
        max_monthly_hours: 160,
        personal_holidays: Vec::new(),
        favorite_shifts: Vec::new(),
        preferred_days_off: Vec::new(),
        created_at: now,
        updated_at: now,
    }
}

fn make_farmacy(id: Uuid) -> Farmacy {
    let now = Utc::now();
    Farmacy {
        id,
        name: "Downtown Pharmacy".to_string(),
        created_at: now,
        updated_at: now,
    }
}

#[tokio::test]
async fn create_employee_returns_ok() {
    let employee_id = Uuid::new_v4();
    let employee = make_employee(employee_id);

    let mut mock_employee = MockEmployeeRepository::new();
    mock_employee
        .expect_create()
        .returning(move |_| Ok(employee.clone()));

    let app = build_test_app(Mocks {
        employee: mock_employee,
        ..Default::default()
    });

    let body = json!({
        "name": "Alice",
        "email": "alice@example.com",
        "max_daily_hours": 8,
        "max_weekly_hours": 40,
        "max_monthly_hours": 160
    });

    let res = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/employees")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);

    let body = res.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(json["success"].as_bool().unwrap());
    assert_eq!(json["data"]["name"], "Alice");
}

#[tokio::test]
async fn find_all_employees_returns_list() {
    let employees = vec![make_employee(Uuid::new_v4()), make_employee(Uuid::new_v4())];

    let mut mock_employee = MockEmployeeRepository::new();
    mock_employee
        .expect_find_all()
        .returning(move || Ok(employees.clone()));

    let app = build_test_app(Mocks {
        employee: mock_employee,
        ..Default::default()
    });

    let res = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/employees")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);

    let body = res.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn find_employee_not_found_returns_404() {
    let mut mock_employee = MockEmployeeRepository::new();
    mock_employee.expect_find_by_id().returning(|_| Ok(None));

    let app = build_test_app(Mocks {
        employee: mock_employee,
        ..Default::default()
    });

    let res = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/employees/{}", Uuid::new_v4()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_employee_not_found_returns_404() {
    let mut mock_employee = MockEmployeeRepository::new();
    mock_employee
        .expect_update()
        .returning(|_, _| Err(DataServiceError::NotFound("Employee not found".into())));

    let app = build_test_app(Mocks {
        employee: mock_employee,
        ..Default::default()
    });

    let body = json!({ "name": "Ghost" });
    let res = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/api/v1/employees/{}", Uuid::new_v4()))
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deactivate_employee_returns_ok() {
    let mut mock_employee = MockEmployeeRepository::new();
    mock_employee.expect_deactivate().returning(|_| Ok(()));

    let app = build_test_app(Mocks {
        employee: mock_employee,
        ..Default::default()
    });

    let res = app
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri(format!("/api/v1/employees/{}/deactivate", Uuid::new_v4()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn create_farmacy_returns_ok() {
    let farmacy_id = Uuid::new_v4();
    let farmacy = make_farmacy(farmacy_id);

    let mut mock_farmacy = MockFarmacyRepository::new();
    mock_farmacy
        .expect_create()
        .returning(move |_| Ok(farmacy.clone()));

    let app = build_test_app(Mocks {
        farmacy: mock_farmacy,
        ..Default::default()
    });

    let body = json!({ "name": "Downtown Pharmacy" });

    let res = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/farmacies")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);

    let body = res.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["data"]["name"], "Downtown Pharmacy");
}

#[tokio::test]
async fn find_farmacy_not_found_returns_404() {
    let mut mock_farmacy = MockFarmacyRepository::new();
    mock_farmacy.expect_find_by_id().returning(|_| Ok(None));

    let app = build_test_app(Mocks {
        farmacy: mock_farmacy,
        ..Default::default()
    });

    let res = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/farmacies/{}", Uuid::new_v4()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_farmacy_employees_returns_list() {
    let employees = vec![make_employee(Uuid::new_v4())];

    let mut mock_membership = MockMembershipRepository::new();
    mock_membership
        .expect_get_farmacy_employees()
        .returning(move |_| Ok(employees.clone()));

    let app = build_test_app(Mocks {
        membership: mock_membership,
        ..Default::default()
    });

    let farmacy_id = Uuid::new_v4();
    let res = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/farmacies/{farmacy_id}/employees"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);

    let body = res.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn add_member_returns_ok() {
    let mut mock_membership = MockMembershipRepository::new();
    mock_membership
        .expect_add_employee_to_farmacy()
        .returning(|_, _| Ok(()));

    let app = build_test_app(Mocks {
        membership: mock_membership,
        ..Default::default()
    });

    let farmacy_id = Uuid::new_v4();
    let body = json!({ "employee_id": Uuid::new_v4() });

    let res = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/v1/farmacies/{farmacy_id}/employees"))
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn remove_member_returns_ok() {
    let mut mock_membership = MockMembershipRepository::new();
    mock_membership
        .expect_remove_employee_from_farmacy()
        .returning(|_, _| Ok(()));

    let app = build_test_app(Mocks {
        membership: mock_membership,
        ..Default::default()
    });

    let farmacy_id = Uuid::new_v4();
    let employee_id = Uuid::new_v4();

    let res = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!(
                    "/api/v1/farmacies/{farmacy_id}/employees/{employee_id}"
                ))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn batch_add_members_returns_ok() {
    let mut mock_membership = MockMembershipRepository::new();
    mock_membership
        .expect_batch_add_members()
        .returning(|_| Ok(()));

    let app = build_test_app(Mocks {
        membership: mock_membership,
        ..Default::default()
    });

    let body = json!([
        { "employee_id": Uuid::new_v4(), "farmacy_id": Uuid::new_v4() },
        { "employee_id": Uuid::new_v4(), "farmacy_id": Uuid::new_v4() }
    ]);

    let res = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/memberships/batch")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn get_coverage_config_not_set_returns_404() {
    let mut mock_coverage = MockCoverageConfigRepository::new();
    mock_coverage.expect_get().returning(|_| Ok(None));

    let app = build_test_app(Mocks {
        coverage_config: mock_coverage,
        ..Default::default()
    });

    let res = app
        .oneshot(
            Request::builder()
                .uri(format!(
                    "/api/v1/farmacies/{}/coverage-config",
                    Uuid::new_v4()
                ))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn upsert_coverage_config_returns_ok() {
    let farmacy_id = Uuid::new_v4();
    let config = CoverageConfig::Default(2);

    let mut mock_coverage = MockCoverageConfigRepository::new();
    mock_coverage.expect_upsert().returning(move |id, cfg| {
        Ok(CoverageConfigRow {
            farmacy_id: id,
            config: sqlx::types::Json(cfg),
            updated_at: Utc::now(),
        })
    });

    let app = build_test_app(Mocks {
        coverage_config: mock_coverage,
        ..Default::default()
    });

    let body = json!({ "default": 2 });

    let res = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/api/v1/farmacies/{farmacy_id}/coverage-config"))
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);

    let _ = config;
}
