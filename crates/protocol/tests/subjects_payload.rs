//! Decoding of the payloads the subjects endpoint actually serves

use exam_portal_protocol::{subjects_url, Subject, SubjectsResponse, SUBJECTS_ENDPOINT};

#[test]
fn decodes_success_payload() {
    let body = r#"{
        "success": true,
        "subjects": [
            {"id": 1, "code": "BCA101", "name": "Digital Fundamentals"},
            {"id": 2, "code": "BCA102", "name": "C Programming"}
        ]
    }"#;

    let resp = SubjectsResponse::from_json(body).unwrap();
    assert!(resp.success);
    assert_eq!(resp.subjects.len(), 2);
    assert_eq!(
        resp.subjects[1],
        Subject {
            id: 2,
            code: "BCA102".into(),
            name: "C Programming".into(),
        }
    );
    assert!(resp.error.is_none());
}

#[test]
fn decodes_explicit_failure_payload() {
    let resp = SubjectsResponse::from_json(r#"{"success": false, "error": "boom"}"#).unwrap();
    assert!(!resp.success);
    assert_eq!(resp.error.as_deref(), Some("boom"));
}

#[test]
fn rejects_non_object_payload() {
    assert!(SubjectsResponse::from_json("<html>Server Error</html>").is_err());
    assert!(SubjectsResponse::from_json("[]").is_err());
    assert!(SubjectsResponse::from_json(r#"[true, []]"#).is_err());
    assert!(SubjectsResponse::from_json(r#""ok""#).is_err());
}

#[test]
fn rejects_subject_with_wrong_shape() {
    let body = r#"{"success": true, "subjects": [{"id": "x", "code": "A"}]}"#;
    assert!(SubjectsResponse::from_json(body).is_err());
}

#[test]
fn url_for_department_with_spaces() {
    assert_eq!(
        subjects_url(SUBJECTS_ENDPOINT, "Computer Science"),
        "/exams/admin/api/subjects-by-department/?department=Computer%20Science"
    );
}
