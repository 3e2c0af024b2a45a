use floor_plan::editor::{HostCall, MemoryHost, PointerDown, TableTemplate};
use floor_plan::utils::permissions;
use floor_plan::utils::validation::{MAX_CAPACITY, MAX_LABEL_LEN, MAX_LABEL_PREFIX_LEN};
use floor_plan::{
    ApiResponse, Cell, CollisionMode, EditorConfig, EditorSurface, ErrorCategory, ErrorCode,
    MoveOutcome, Point, Session, TableEdit,
};
use shared::models::{DiningTable, DiningTableUpdate, EmployeeResponse, Role, StoreInfo, TableShape, Zone};

fn session(role_name: &str) -> Session {
    let mut session = Session::start(StoreInfo {
        id: 7,
        name: "Bistro".into(),
        ..Default::default()
    });
    session
        .sign_in(
            EmployeeResponse {
                id: 11,
                username: "ana".into(),
                display_name: "Ana".into(),
                role_id: 2,
                is_active: true,
            },
            Role {
                id: 2,
                name: role_name.into(),
                description: None,
                permissions: permissions::get_default_permissions(role_name),
                is_system: true,
                is_active: true,
            },
        )
        .unwrap();
    session
}

fn hall() -> Zone {
    Zone {
        id: 1,
        name: "Hall".into(),
        description: None,
        grid_width: 10,
        grid_height: 8,
    }
}

fn row(id: i64, x: i32, y: i32, capacity: i32) -> DiningTable {
    DiningTable {
        id,
        name: format!("T{id}"),
        zone_id: 1,
        capacity,
        shape: TableShape::Square,
        pos_x: x,
        pos_y: y,
        is_active: true,
    }
}

fn reopen(surface: &EditorSurface<MemoryHost>, config: &EditorConfig) -> EditorSurface<MemoryHost> {
    let rows = surface.host().rows();
    let host = MemoryHost::with_rows(rows.clone());
    EditorSurface::open(config, &session("manager"), &hall(), &rows, host).unwrap()
}

fn open_with(config: &EditorConfig, rows: Vec<DiningTable>) -> EditorSurface<MemoryHost> {
    let host = MemoryHost::with_rows(rows.clone());
    EditorSurface::open(config, &session("manager"), &hall(), &rows, host).unwrap()
}

fn open(rows: Vec<DiningTable>) -> EditorSurface<MemoryHost> {
    open_with(&EditorConfig::default(), rows)
}

/// Pixel point inside `cell` for the default 60px cells
fn inside(x: i32, y: i32) -> Point {
    Point::new(x as f64 * 60.0 + 30.0, y as f64 * 60.0 + 30.0)
}

#[test]
fn test_place_collide_and_clamped_move() {
    let mut surface = open(vec![]);
    surface.set_placement_mode(true).unwrap();

    // Round table for two at (2, 3)
    surface
        .set_template(TableTemplate {
            label_prefix: "T".into(),
            capacity: 2,
            shape: TableShape::Round,
        })
        .unwrap();
    let first = match surface.click_cell(Cell::new(2, 3)).unwrap() {
        PointerDown::Created(id) => id,
        other => panic!("expected a new table, got {other:?}"),
    };
    let view = surface.view();
    let table = view.table(first).unwrap();
    assert_eq!((table.width, table.height), (60.0, 60.0));

    // Square table for four at the same anchor is rejected
    surface
        .set_template(TableTemplate {
            label_prefix: "T".into(),
            capacity: 4,
            shape: TableShape::Square,
        })
        .unwrap();
    let err = surface.click_cell(Cell::new(2, 3)).unwrap_err();
    assert_eq!(err.code, ErrorCode::TableCellOccupied);
    assert_eq!(surface.tables().len(), 1);

    // Drag far past the right edge: clamps to x = 9
    surface.set_placement_mode(false).unwrap();
    assert_eq!(surface.pointer_down(inside(2, 3)).unwrap(), PointerDown::Table(first));
    let outcome = surface.pointer_move(inside(11, 3)).unwrap();
    assert_eq!(
        outcome,
        Some(MoveOutcome::Moved {
            from: Cell::new(2, 3),
            to: Cell::new(9, 3),
        })
    );
    let summary = surface.pointer_up().unwrap();
    assert!(summary.moved);

    assert_eq!(surface.table(first).unwrap().anchor, Cell::new(9, 3));
    let stored = surface.host().row(first).unwrap();
    assert_eq!((stored.pos_x, stored.pos_y), (9, 3));
}

#[test]
fn test_created_table_reaches_host_and_is_selected() {
    let mut surface = open(vec![]);
    surface.toggle_placement_mode().unwrap();

    let id = match surface.pointer_down(inside(4, 4)).unwrap() {
        PointerDown::Created(id) => id,
        other => panic!("expected a new table, got {other:?}"),
    };
    assert_eq!(surface.selected(), Some(id));

    let row = surface.host().row(id).unwrap();
    assert_eq!(row.name, "T1");
    assert_eq!(row.zone_id, 1);
    assert_eq!(row.capacity, 4);
    assert_eq!((row.pos_x, row.pos_y), (4, 4));

    let calls = surface.host().calls();
    assert!(matches!(calls[0], HostCall::Add(_)));
    assert_eq!(calls[1], HostCall::Select(Some(id)));
}

#[test]
fn test_click_outside_grid_in_placement_mode_is_out_of_bounds() {
    let mut surface = open(vec![]);
    surface.set_placement_mode(true).unwrap();

    let err = surface.click_cell(Cell::new(10, 0)).unwrap_err();
    assert_eq!(err.code, ErrorCode::TableOutOfBounds);
    assert!(surface.host().calls().is_empty());
}

#[test]
fn test_host_rejecting_add_leaves_layout_unchanged() {
    let mut surface = open(vec![]);
    surface.set_placement_mode(true).unwrap();
    surface.host_mut().fail_next(ErrorCode::NetworkError);

    let err = surface.click_cell(Cell::new(1, 1)).unwrap_err();
    assert_eq!(err.code, ErrorCode::NetworkError);
    assert!(surface.tables().is_empty());
    assert_eq!(surface.selected(), None);
}

#[test]
fn test_drag_onto_occupied_cell_keeps_position() {
    let mut surface = open(vec![row(1, 2, 3, 2), row(2, 4, 3, 2)]);

    surface.pointer_down(inside(2, 3)).unwrap();
    let outcome = surface.pointer_move(inside(4, 3)).unwrap();
    assert_eq!(
        outcome,
        Some(MoveOutcome::Blocked {
            at: Cell::new(4, 3),
            by: 2,
        })
    );
    let summary = surface.pointer_up().unwrap();
    assert!(!summary.moved);

    assert_eq!(surface.table(1).unwrap().anchor, Cell::new(2, 3));
    assert!(
        !surface
            .host()
            .calls()
            .iter()
            .any(|c| matches!(c, HostCall::Update(..)))
    );
}

#[test]
fn test_every_drag_step_is_committed() {
    let mut surface = open(vec![row(1, 0, 0, 2)]);
    surface.pointer_down(inside(0, 0)).unwrap();
    surface.host_mut().take_calls();

    for x in 1..=3 {
        surface.pointer_move(inside(x, 0)).unwrap();
    }
    // Same cell again: nothing to commit
    assert_eq!(
        surface.pointer_move(inside(3, 0)).unwrap(),
        Some(MoveOutcome::Unchanged)
    );
    surface.pointer_up();

    let calls = surface.host_mut().take_calls();
    assert_eq!(
        calls,
        vec![
            HostCall::Update(1, DiningTableUpdate::position(1, 0)),
            HostCall::Update(1, DiningTableUpdate::position(2, 0)),
            HostCall::Update(1, DiningTableUpdate::position(3, 0)),
        ]
    );
}

#[test]
fn test_host_rejecting_move_reverts() {
    let mut surface = open(vec![row(1, 2, 3, 2)]);
    surface.pointer_down(inside(2, 3)).unwrap();
    surface.host_mut().fail_next(ErrorCode::TimeoutError);

    let err = surface.pointer_move(inside(5, 3)).unwrap_err();
    assert_eq!(err.code, ErrorCode::TimeoutError);
    assert_eq!(surface.table(1).unwrap().anchor, Cell::new(2, 3));

    // Nothing stuck, so the gesture reports no move
    assert!(!surface.pointer_up().unwrap().moved);

    surface.pointer_down(inside(2, 3)).unwrap();
    surface.host_mut().fail_next(ErrorCode::TimeoutError);
    assert!(surface.pointer_move(inside(5, 3)).is_err());

    // The gesture goes on; the next step succeeds
    surface.pointer_move(inside(6, 3)).unwrap();
    assert_eq!(surface.table(1).unwrap().anchor, Cell::new(6, 3));
    assert!(surface.pointer_up().unwrap().moved);
    let stored = surface.host().row(1).unwrap();
    assert_eq!((stored.pos_x, stored.pos_y), (6, 3));
}

#[test]
fn test_update_fields_and_revert_on_host_error() {
    let mut surface = open(vec![row(1, 2, 3, 2)]);

    surface
        .update_fields(
            1,
            TableEdit {
                label: Some("  Window ".into()),
                capacity: Some(6),
                ..Default::default()
            },
        )
        .unwrap();
    let table = surface.table(1).unwrap();
    assert_eq!(table.label, "Window");
    assert_eq!(table.capacity, 6);
    assert_eq!(surface.host().row(1).unwrap().name, "Window");

    surface.host_mut().fail_next(ErrorCode::DatabaseError);
    let err = surface
        .update_fields(
            1,
            TableEdit {
                shape: Some(TableShape::Rectangle),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::DatabaseError);
    assert_eq!(surface.table(1).unwrap().shape, TableShape::Square);

    let err = surface
        .update_fields(
            1,
            TableEdit {
                capacity: Some(0),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationFailed);

    // Unknown ids are a no-op
    surface
        .update_fields(
            404,
            TableEdit {
                capacity: Some(2),
                ..Default::default()
            },
        )
        .unwrap();
}

#[test]
fn test_delete_clears_selection() {
    let mut surface = open(vec![row(1, 2, 3, 2), row(2, 5, 5, 2)]);
    surface.select(Some(1));
    surface.host_mut().take_calls();

    surface.delete(1).unwrap();
    assert!(surface.table(1).is_none());
    assert_eq!(surface.selected(), None);
    assert_eq!(
        surface.host().calls(),
        &[HostCall::Delete(1), HostCall::Select(None)]
    );
    assert!(surface.host().row(1).is_none());

    // Deleting again is a no-op
    surface.delete(1).unwrap();
    assert_eq!(surface.host().calls().len(), 2);
}

#[test]
fn test_host_rejecting_delete_restores_table_in_place() {
    let mut surface = open(vec![row(1, 0, 0, 2), row(2, 1, 0, 2), row(3, 2, 0, 2)]);
    surface.host_mut().fail_next(ErrorCode::NetworkError);

    assert!(surface.delete(2).is_err());
    let ids: Vec<i64> = surface.tables().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn test_read_only_session_can_view_and_select() {
    let rows = vec![row(1, 2, 3, 2)];
    let host = MemoryHost::with_rows(rows.clone());
    let mut surface =
        EditorSurface::open(&EditorConfig::default(), &session("user"), &hall(), &rows, host)
            .unwrap();

    assert!(!surface.view().editable);
    assert_eq!(surface.pointer_down(inside(2, 3)).unwrap(), PointerDown::Table(1));
    assert_eq!(surface.pointer_move(inside(6, 3)).unwrap(), None);
    assert_eq!(
        surface.update_fields(1, TableEdit { capacity: Some(4), ..Default::default() })
            .unwrap_err()
            .code,
        ErrorCode::PermissionDenied
    );
    assert_eq!(surface.table(1).unwrap().anchor, Cell::new(2, 3));
}

#[test]
fn test_footprint_collision_blocks_overlapping_tables() {
    let config = EditorConfig {
        collision: CollisionMode::Footprint,
        ..Default::default()
    };
    let mut surface = open_with(&config, vec![row(1, 2, 2, 4)]);
    surface.set_placement_mode(true).unwrap();

    // Default template is a 2x2 square; (3, 3) overlaps table 1
    let err = surface.click_cell(Cell::new(3, 3)).unwrap_err();
    assert_eq!(err.code, ErrorCode::TableCellOccupied);
    assert!(matches!(
        surface.click_cell(Cell::new(4, 4)).unwrap(),
        PointerDown::Created(_)
    ));

    let view = surface.view();
    assert!(!view.cell(3, 3).unwrap().placeable);
    assert_eq!(view.cell(3, 3).unwrap().covered_by, Some(1));
}

#[test]
fn test_anchor_collision_allows_overlapping_footprints() {
    let mut surface = open(vec![row(1, 2, 2, 4)]);
    surface.set_placement_mode(true).unwrap();

    assert!(matches!(
        surface.click_cell(Cell::new(3, 3)).unwrap(),
        PointerDown::Created(_)
    ));
    assert_eq!(surface.tables().len(), 2);
}

#[test]
fn test_rows_decoded_from_json() {
    let rows = floor_plan::records::parse_rows(serde_json::json!([
        { "id": 1, "name": "A1", "zone_id": 1, "capacity": 2, "pos_x": 1, "pos_y": 1 },
        { "id": 2, "name": "A2", "zone_id": 1, "capacity": 8, "shape": "rectangle", "pos_x": 3, "pos_y": 1 }
    ]))
    .unwrap();
    let surface = open(rows);

    let view = surface.view();
    let wide = view.table(2).unwrap();
    assert_eq!(wide.shape, TableShape::Rectangle);
    assert!(wide.width > wide.height);
}

#[test]
fn test_rejection_relayed_as_api_response() {
    let mut surface = open(vec![row(1, 2, 3, 2)]);
    surface.set_placement_mode(true).unwrap();

    let err = surface.click_cell(Cell::new(2, 3)).unwrap_err();
    assert_eq!(err.code.category(), ErrorCategory::Table);
    assert_eq!(err.http_status(), http::StatusCode::CONFLICT);

    let response: ApiResponse<i64> = err.into();
    assert!(!response.is_success());
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["code"], 7005);
    assert_eq!(json["details"]["occupant"], 1);
    assert!(json.get("data").is_none());
}

#[test]
fn test_created_tables_survive_reload() {
    let config = EditorConfig {
        default_capacity: MAX_CAPACITY,
        ..Default::default()
    };
    let mut surface = open_with(&config, vec![]);
    surface.set_placement_mode(true).unwrap();
    surface.click_cell(Cell::new(0, 0)).unwrap();

    let prefix = "p".repeat(MAX_LABEL_PREFIX_LEN);
    surface
        .set_template(TableTemplate {
            label_prefix: prefix.clone(),
            capacity: 2,
            shape: TableShape::Round,
        })
        .unwrap();
    let id = surface.create_at(Cell::new(5, 5)).unwrap();
    assert_eq!(surface.table(id).unwrap().label, format!("{prefix}2"));

    let reloaded = reopen(&surface, &config);
    assert_eq!(reloaded.tables().len(), 2);
    for table in surface.tables() {
        assert_eq!(reloaded.table(table.id), Some(table));
    }
}

#[test]
fn test_template_prefix_leaves_room_for_counter() {
    let mut surface = open(vec![]);
    let err = surface
        .set_template(TableTemplate {
            label_prefix: "p".repeat(MAX_LABEL_PREFIX_LEN + 1),
            capacity: 2,
            shape: TableShape::Round,
        })
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationFailed);
    assert_eq!(surface.template().label_prefix, "T");
}

#[test]
fn test_default_capacity_beyond_row_limit_rejected_at_open() {
    let config = EditorConfig {
        default_capacity: MAX_CAPACITY + 70,
        ..Default::default()
    };
    let result = EditorSurface::open(
        &config,
        &session("manager"),
        &hall(),
        &[],
        MemoryHost::new(),
    );
    assert_eq!(result.err().unwrap().code, ErrorCode::ConfigError);
}

#[test]
fn test_padded_label_edit_within_limit_is_stored_trimmed() {
    let mut surface = open(vec![row(1, 2, 3, 2)]);
    let label = "w".repeat(MAX_LABEL_LEN);

    surface
        .update_fields(
            1,
            TableEdit {
                label: Some(format!("  {label}  ")),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(surface.table(1).unwrap().label, label);
    assert_eq!(surface.host().row(1).unwrap().name, label);
    assert_eq!(reopen(&surface, &EditorConfig::default()).table(1).unwrap().label, label);
}

#[test]
fn test_placement_click_on_covered_cell_creates_table() {
    // 2x2 table at (2, 2) covers (3, 3) without anchoring there
    let mut surface = open(vec![row(1, 2, 2, 4)]);
    surface.set_placement_mode(true).unwrap();
    assert!(surface.view().cell(3, 3).unwrap().placeable);

    let id = match surface.pointer_down(inside(3, 3)).unwrap() {
        PointerDown::Created(id) => id,
        other => panic!("expected a new table, got {other:?}"),
    };
    assert_eq!(surface.table(id).unwrap().anchor, Cell::new(3, 3));

    // An anchor cell still selects the table standing on it
    assert_eq!(surface.pointer_down(inside(2, 2)).unwrap(), PointerDown::Table(1));
    assert_eq!(surface.selected(), Some(1));
    assert_eq!(surface.tables().len(), 2);
}
