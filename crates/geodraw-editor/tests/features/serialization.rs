use geodraw_core::{GeoPoint, WebMercator};
use geodraw_editor::config::EditorConfig;
use geodraw_editor::error::EditorError;
use geodraw_editor::model::{Shape, ShapeKind};
use geodraw_editor::serialization::{DocumentSnapshot, ShapeSnapshot};
use geodraw_editor::session::{DrawingSession, DrawingState};

fn session_with_shapes() -> DrawingSession {
    let mut session = DrawingSession::new(&EditorConfig::default(), Box::new(WebMercator));
    session.start_drawing(ShapeKind::Polygon);
    session.pointer_click(GeoPoint::new(52.0, 13.0));
    session.pointer_click(GeoPoint::new(52.0, 13.1));
    session.pointer_click(GeoPoint::new(52.1, 13.05));
    assert!(session.complete_drawing());

    session.start_drawing(ShapeKind::Circle);
    session.pointer_click(GeoPoint::new(48.0, 11.0));
    session.pointer_click(GeoPoint::new(48.0, 11.01));
    assert!(matches!(session.state(), DrawingState::Idle));
    session
}

#[test]
fn test_document_round_trip() {
    let mut session = session_with_shapes();
    let document = session.snapshot("Field Plan");
    let json = document.to_json().unwrap();

    let parsed = DocumentSnapshot::from_json(&json).unwrap();
    assert_eq!(parsed.version, "1.0");
    assert_eq!(parsed.metadata.name, "Field Plan");
    assert_eq!(parsed.shapes.len(), 2);

    let mut restored = DrawingSession::new(&EditorConfig::default(), Box::new(WebMercator));
    restored.restore(&parsed).unwrap();
    assert_eq!(restored.shape_count(), 2);

    let original: Vec<(u64, String, Shape)> = session
        .shapes()
        .map(|record| (record.id, record.name.clone(), record.shape.clone()))
        .collect();
    let recovered: Vec<(u64, String, Shape)> = restored
        .shapes()
        .map(|record| (record.id, record.name.clone(), record.shape.clone()))
        .collect();
    assert_eq!(recovered, original);

    assert!(!restored.can_undo(), "restoring resets the undo log");

    // New shapes never collide with restored ids.
    restored.start_drawing(ShapeKind::Polyline);
    restored.pointer_click(GeoPoint::new(0.0, 0.0));
    restored.pointer_click(GeoPoint::new(0.0, 1.0));
    assert!(restored.complete_drawing());
    let new_id = restored.shapes().last().unwrap().id;
    assert_eq!(new_id, 3);
}

#[test]
fn test_snapshot_fields_follow_kind() {
    let session = session_with_shapes();
    let json = session.snapshot("Doc").to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let polygon = &value["shapes"][0];
    assert_eq!(polygon["type"], "polygon");
    assert!(polygon.get("path").is_some());
    assert!(polygon.get("center").is_none());
    assert!(polygon.get("radius").is_none());
    assert!(polygon.get("bounds").is_none());
    assert!(polygon.get("area").is_some());

    let circle = &value["shapes"][1];
    assert_eq!(circle["type"], "circle");
    assert!(circle.get("center").is_some());
    assert!(circle.get("radius").is_some());
    assert!(circle.get("path").is_none());
    assert!(circle.get("bounds").is_none());
}

#[test]
fn test_unknown_type_tag_fails() {
    let json = r#"{
        "version": "1.0",
        "metadata": {
            "name": "Bad",
            "created": "2024-01-01T00:00:00Z",
            "modified": "2024-01-01T00:00:00Z"
        },
        "shapes": [
            {
                "id": 1,
                "name": "Mystery 1",
                "type": "hexagon",
                "area": 0.0
            }
        ]
    }"#;

    let err = DocumentSnapshot::from_json(json).unwrap_err();
    assert!(matches!(err, EditorError::Serialization(_)));
}

#[test]
fn test_missing_circle_radius_fails_restore() {
    let json = r#"{
        "version": "1.0",
        "metadata": {
            "name": "Bad",
            "created": "2024-01-01T00:00:00Z",
            "modified": "2024-01-01T00:00:00Z"
        },
        "shapes": [
            {
                "id": 1,
                "name": "Circle 1",
                "type": "circle",
                "center": {"lat": 48.0, "lng": 11.0},
                "area": 100.0
            }
        ]
    }"#;

    let document = DocumentSnapshot::from_json(json).unwrap();
    let err = document.shapes[0].to_shape().unwrap_err();
    let EditorError::InvalidSnapshot { kind, reason } = err else {
        panic!("expected an invalid snapshot error");
    };
    assert_eq!(kind, ShapeKind::Circle);
    assert!(reason.contains("radius"));
}

#[test]
fn test_short_path_fails_restore() {
    let json = r#"{
        "version": "1.0",
        "metadata": {
            "name": "Bad",
            "created": "2024-01-01T00:00:00Z",
            "modified": "2024-01-01T00:00:00Z"
        },
        "shapes": [
            {
                "id": 1,
                "name": "Polygon 1",
                "type": "polygon",
                "path": [
                    {"lat": 0.0, "lng": 0.0},
                    {"lat": 0.0, "lng": 1.0}
                ],
                "area": 0.0
            }
        ]
    }"#;

    let document = DocumentSnapshot::from_json(json).unwrap();
    let err = document.shapes[0].to_shape().unwrap_err();
    assert!(matches!(
        err,
        EditorError::PathTooShort {
            kind: ShapeKind::Polygon,
            required: 3,
            actual: 2,
        }
    ));
}

#[test]
fn test_restore_rejects_bad_documents_atomically() {
    let mut session = session_with_shapes();
    let original_count = session.shape_count();
    let first_id = session.shapes().next().unwrap().id;
    assert!(session.select_shape(first_id));

    let mut document = DocumentSnapshot::new("Broken");
    document.shapes.push(ShapeSnapshot {
        id: 7,
        name: "Polygon 7".to_string(),
        kind: ShapeKind::Polygon,
        path: Some(vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 1.0),
            GeoPoint::new(1.0, 1.0),
        ]),
        center: None,
        radius_m: None,
        bounds: None,
        area_sq_m: 0.0,
    });
    document.shapes.push(ShapeSnapshot {
        id: 8,
        name: "Polygon 8".to_string(),
        kind: ShapeKind::Polygon,
        path: Some(vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0)]),
        center: None,
        radius_m: None,
        bounds: None,
        area_sq_m: 0.0,
    });

    assert!(session.restore(&document).is_err());
    assert_eq!(session.shape_count(), original_count, "nothing was replaced");
    assert!(session.shape(first_id).is_some());
    assert_eq!(session.selected_id(), Some(first_id), "selection untouched");
}

#[test]
fn test_from_json_refreshes_modified_timestamp() {
    let document = DocumentSnapshot::new("Doc");
    let json = document.to_json().unwrap();
    let parsed = DocumentSnapshot::from_json(&json).unwrap();

    assert_eq!(parsed.metadata.created, document.metadata.created);
    assert!(parsed.metadata.modified >= document.metadata.modified);
}
