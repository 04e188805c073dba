use geodraw_core::GeoPoint;
use geodraw_editor::commands::{
    ClearShapes, CreateShape, DeleteShape, EditCommand, EditPath, PathEditKind,
};
use geodraw_editor::error::EditorError;
use geodraw_editor::model::{Circle, Polygon, Shape, ShapeId, ShapeKind};
use geodraw_editor::registry::ShapeRegistry;
use geodraw_editor::serialization::ShapeSnapshot;

fn triangle() -> Vec<GeoPoint> {
    vec![
        GeoPoint::new(0.0, 0.0),
        GeoPoint::new(0.0, 10.0),
        GeoPoint::new(10.0, 10.0),
    ]
}

fn seeded_registry() -> (ShapeRegistry, ShapeId) {
    let mut registry = ShapeRegistry::new();
    let id = registry.insert(Shape::Polygon(Polygon::new(triangle())));
    (registry, id)
}

fn snapshot_of(registry: &ShapeRegistry, id: ShapeId) -> ShapeSnapshot {
    ShapeSnapshot::from_record(registry.get(id).unwrap())
}

#[test]
fn test_create_command_apply_and_revert() {
    let (registry, id) = seeded_registry();
    let command = EditCommand::CreateShape(CreateShape {
        snapshot: snapshot_of(&registry, id),
    });

    let mut target = ShapeRegistry::new();
    command.apply(&mut target).unwrap();
    assert!(target.contains(id));
    assert_eq!(target.get(id).unwrap().name, "Polygon 1");

    command.revert(&mut target).unwrap();
    assert!(target.is_empty());

    // Reverting a creation that is no longer present fails.
    let err = command.revert(&mut target).unwrap_err();
    assert!(matches!(err, EditorError::UnknownShape { id: 1 }));
}

#[test]
fn test_delete_command_apply_and_revert() {
    let (mut registry, id) = seeded_registry();
    let command = EditCommand::DeleteShape(DeleteShape {
        snapshot: snapshot_of(&registry, id),
    });

    command.apply(&mut registry).unwrap();
    assert!(!registry.contains(id));

    let err = command.apply(&mut registry).unwrap_err();
    assert!(matches!(err, EditorError::UnknownShape { .. }));

    command.revert(&mut registry).unwrap();
    let record = registry.get(id).unwrap();
    assert_eq!(record.name, "Polygon 1");
    assert_eq!(record.shape.path().unwrap(), triangle().as_slice());
}

#[test]
fn test_edit_path_command_apply_and_revert() {
    let (mut registry, id) = seeded_registry();
    let mut moved = triangle();
    moved[0] = GeoPoint::new(5.0, 5.0);

    let command = EditCommand::EditPath(EditPath {
        id,
        old_path: triangle(),
        new_path: moved.clone(),
        edit: PathEditKind::MoveVertex,
    });

    command.apply(&mut registry).unwrap();
    assert_eq!(registry.get(id).unwrap().shape.path().unwrap(), moved.as_slice());

    command.revert(&mut registry).unwrap();
    assert_eq!(
        registry.get(id).unwrap().shape.path().unwrap(),
        triangle().as_slice()
    );
}

#[test]
fn test_edit_path_requires_path_backed_shape() {
    let mut registry = ShapeRegistry::new();
    let id = registry.insert(Shape::Circle(Circle::new(GeoPoint::new(0.0, 0.0), 500.0)));

    let command = EditCommand::EditPath(EditPath {
        id,
        old_path: triangle(),
        new_path: triangle(),
        edit: PathEditKind::MoveVertex,
    });

    let err = command.apply(&mut registry).unwrap_err();
    assert!(matches!(
        err,
        EditorError::NotPathBacked {
            kind: ShapeKind::Circle,
            ..
        }
    ));
}

#[test]
fn test_edit_path_unknown_shape() {
    let mut registry = ShapeRegistry::new();
    let command = EditCommand::EditPath(EditPath {
        id: 42,
        old_path: triangle(),
        new_path: triangle(),
        edit: PathEditKind::MoveVertex,
    });

    let err = command.apply(&mut registry).unwrap_err();
    assert!(matches!(err, EditorError::UnknownShape { id: 42 }));
}

#[test]
fn test_clear_command_revert_preserves_order() {
    let mut registry = ShapeRegistry::new();
    let ids: Vec<ShapeId> = (0..3)
        .map(|_| registry.insert(Shape::Polygon(Polygon::new(triangle()))))
        .collect();
    let command = EditCommand::ClearShapes(ClearShapes {
        snapshots: registry.iter().map(ShapeSnapshot::from_record).collect(),
    });

    command.apply(&mut registry).unwrap();
    assert!(registry.is_empty());

    command.revert(&mut registry).unwrap();
    let restored: Vec<ShapeId> = registry.iter().map(|record| record.id).collect();
    assert_eq!(restored, ids);
}

#[test]
fn test_describe() {
    let (registry, id) = seeded_registry();
    let snapshot = snapshot_of(&registry, id);

    let create = EditCommand::CreateShape(CreateShape {
        snapshot: snapshot.clone(),
    });
    assert_eq!(create.describe(), "Create Polygon 1");

    let delete = EditCommand::DeleteShape(DeleteShape {
        snapshot: snapshot.clone(),
    });
    assert_eq!(delete.describe(), "Delete Polygon 1");

    let moved = EditCommand::EditPath(EditPath {
        id,
        old_path: triangle(),
        new_path: triangle(),
        edit: PathEditKind::MoveVertex,
    });
    assert_eq!(moved.describe(), "Move vertex in shape 1");

    let inserted = EditCommand::EditPath(EditPath {
        id,
        old_path: triangle(),
        new_path: triangle(),
        edit: PathEditKind::InsertVertex,
    });
    assert_eq!(inserted.describe(), "Insert vertex in shape 1");

    let clear = EditCommand::ClearShapes(ClearShapes {
        snapshots: vec![snapshot.clone(), snapshot],
    });
    assert_eq!(clear.describe(), "Clear 2 shapes");
}

#[test]
fn test_commands_serialize_as_values() {
    let mut moved = triangle();
    moved[0] = GeoPoint::new(1.0, 1.0);
    let command = EditCommand::EditPath(EditPath {
        id: 7,
        old_path: triangle(),
        new_path: moved,
        edit: PathEditKind::InsertVertex,
    });

    let json = serde_json::to_string(&command).unwrap();
    let parsed: EditCommand = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, command);
}
