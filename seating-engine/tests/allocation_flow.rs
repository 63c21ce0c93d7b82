//! End-to-end allocation flows against the in-memory store

use std::sync::Arc;

use anyhow::Result;
use uuid::Uuid;

use seating_engine::store::SeatingStore;
use seating_engine::{
    AllocationError, AllocationService, EngineConfig, MemoryStore, TableResize,
};
use shared::models::{
    Assignment, Guest, GroupingStrategy, Rsvp, RsvpStatus, Seat, Table, TableConfig, TableShape,
};
use shared::request::{ArrangeBySizeRequest, ArrangeWithConfigsRequest, GuestSelection};

fn make_guest(event_id: Uuid, name: &str, group: &str, demand: u32) -> Guest {
    Guest {
        id: Uuid::new_v4(),
        event_id,
        name: name.to_string(),
        side: Some("bride".to_string()),
        group_name: Some(group.to_string()),
        expected_guests: 1,
        rsvp: Some(Rsvp {
            status: RsvpStatus::Accepted,
            guest_count: Some(demand),
        }),
        created_at: 0,
    }
}

fn make_table(event_id: Uuid, name: &str, capacity: u32) -> Table {
    Table {
        id: Uuid::new_v4(),
        event_id,
        name: name.to_string(),
        capacity,
        shape: TableShape::Circle,
        seating_arrangement: "even".to_string(),
        width: 120.0,
        height: 120.0,
        position_x: 100.0,
        position_y: 100.0,
        seats: vec![],
        created_at: 0,
    }
}

fn make_assignment(event_id: Uuid, guest_id: Uuid, table_id: Uuid) -> Assignment {
    Assignment {
        id: Uuid::new_v4(),
        event_id,
        guest_id,
        table_id,
        created_at: 0,
    }
}

fn by_size_request(table_size: u32) -> ArrangeBySizeRequest {
    ArrangeBySizeRequest {
        table_size,
        table_shape: TableShape::Circle,
        seating_arrangement: "even".to_string(),
        table_width: 120.0,
        table_height: 120.0,
        strategy: GroupingStrategy::GroupOnly,
        selection: GuestSelection::default(),
    }
}

fn group_config(capacity: u32, count: u32, groups: &[&str]) -> TableConfig {
    TableConfig {
        shape: TableShape::Circle,
        capacity,
        count,
        width: 120.0,
        height: 120.0,
        group_assignments: groups.iter().map(|s| s.to_string()).collect(),
    }
}

fn service(store: Arc<MemoryStore>) -> AllocationService {
    AllocationService::new(store, EngineConfig::default())
}

#[tokio::test]
async fn test_arrange_by_size_creates_tables_and_assignments() -> Result<()> {
    let store = Arc::new(MemoryStore::new());
    let event_id = Uuid::new_v4();
    for i in 0..7 {
        store.insert_guest(make_guest(event_id, &format!("Guest {}", i), "family", 1));
    }
    let svc = service(store.clone());

    let summary = svc.arrange_by_size(event_id, &by_size_request(4)).await?;

    assert_eq!(summary.tables_created, 2);
    assert_eq!(summary.guests_seated, 7);
    assert_eq!(summary.remaining_unseated, 0);

    let tables = store.tables_for_event(event_id).await?;
    assert_eq!(tables.len(), 2);
    assert!(tables.iter().all(|t| t.seats.len() == 4));
    assert!(tables[0].name.starts_with("Table 1 - family"));

    let assignments = store.assignments_for_event(event_id).await?;
    assert_eq!(assignments.len(), 7);
    Ok(())
}

#[tokio::test]
async fn test_arrange_by_size_is_a_destructive_rebuild() -> Result<()> {
    let store = Arc::new(MemoryStore::new());
    let event_id = Uuid::new_v4();
    for i in 0..7 {
        store.insert_guest(make_guest(event_id, &format!("Guest {}", i), "family", 1));
    }
    let svc = service(store.clone());

    svc.arrange_by_size(event_id, &by_size_request(4)).await?;
    svc.arrange_by_size(event_id, &by_size_request(4)).await?;

    // Second run replaced the first layout instead of appending to it
    assert_eq!(store.tables_for_event(event_id).await?.len(), 2);
    assert_eq!(store.assignments_for_event(event_id).await?.len(), 7);
    Ok(())
}

#[tokio::test]
async fn test_empty_filter_fails_without_mutation() -> Result<()> {
    let store = Arc::new(MemoryStore::new());
    let event_id = Uuid::new_v4();
    for i in 0..4 {
        store.insert_guest(make_guest(event_id, &format!("Guest {}", i), "family", 1));
    }
    let svc = service(store.clone());
    svc.arrange_by_size(event_id, &by_size_request(4)).await?;

    let mut request = by_size_request(4);
    request.selection = GuestSelection {
        side: Some("nobody".to_string()),
        ..GuestSelection::default()
    };
    let result = svc.arrange_by_size(event_id, &request).await;

    assert!(matches!(result, Err(AllocationError::EmptySelection)));
    // Previous layout untouched
    assert_eq!(store.tables_for_event(event_id).await?.len(), 1);
    assert_eq!(store.assignments_for_event(event_id).await?.len(), 4);
    Ok(())
}

#[tokio::test]
async fn test_lone_oversized_party_overflows_with_warning_flag() -> Result<()> {
    let store = Arc::new(MemoryStore::new());
    let event_id = Uuid::new_v4();
    store.insert_guest(make_guest(event_id, "Big Party", "friends", 6));
    let svc = service(store.clone());

    let summary = svc.arrange_by_size(event_id, &by_size_request(4)).await?;
    assert_eq!(summary.tables_created, 1);
    assert_eq!(summary.guests_seated, 1);

    let occupancy = svc.occupancy(event_id).await?;
    assert_eq!(occupancy.len(), 1);
    assert_eq!(occupancy[0].used, 6);
    assert_eq!(occupancy[0].capacity, 4);
    assert!(occupancy[0].over_capacity);
    Ok(())
}

#[tokio::test]
async fn test_incremental_mode_excludes_seated_guests() -> Result<()> {
    let store = Arc::new(MemoryStore::new());
    let event_id = Uuid::new_v4();
    let guests: Vec<Guest> = (0..10)
        .map(|i| make_guest(event_id, &format!("Guest {}", i), "family", 1))
        .collect();
    for guest in &guests {
        store.insert_guest(guest.clone());
    }
    // Three guests already hold assignments at a pre-existing table
    let table = make_table(event_id, "Table 1", 4);
    store.insert_table(table.clone());
    for guest in guests.iter().take(3) {
        store.insert_assignment(make_assignment(event_id, guest.id, table.id));
    }
    let svc = service(store.clone());

    let request = ArrangeWithConfigsRequest {
        configs: vec![group_config(4, 2, &["family"])],
        clear_existing: false,
        mix_remaining: false,
        selection: GuestSelection::default(),
    };
    let summary = svc.arrange_with_configs(event_id, &request).await?;

    // Candidate pool was the 7 unseated guests, all placed
    assert_eq!(summary.guests_seated, 7);
    assert_eq!(summary.remaining_unseated, 0);
    assert_eq!(summary.tables_created, 2);

    // Numbering continues after the existing table
    let tables = store.tables_for_event(event_id).await?;
    assert!(tables.iter().any(|t| t.name.starts_with("Table 2")));
    assert!(tables.iter().any(|t| t.name.starts_with("Table 3")));
    assert_eq!(store.assignments_for_event(event_id).await?.len(), 10);
    Ok(())
}

#[tokio::test]
async fn test_all_guests_already_seated_fails_without_mutation() -> Result<()> {
    let store = Arc::new(MemoryStore::new());
    let event_id = Uuid::new_v4();
    let guest = make_guest(event_id, "Only Guest", "family", 1);
    store.insert_guest(guest.clone());
    let table = make_table(event_id, "Table 1", 4);
    store.insert_table(table.clone());
    store.insert_assignment(make_assignment(event_id, guest.id, table.id));
    let svc = service(store.clone());

    let request = ArrangeWithConfigsRequest {
        configs: vec![group_config(4, 1, &["family"])],
        clear_existing: false,
        mix_remaining: false,
        selection: GuestSelection::default(),
    };
    let result = svc.arrange_with_configs(event_id, &request).await;

    assert!(matches!(result, Err(AllocationError::AllGuestsSeated)));
    assert_eq!(store.tables_for_event(event_id).await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_mix_remaining_tops_up_existing_and_new_tables() -> Result<()> {
    let store = Arc::new(MemoryStore::new());
    let event_id = Uuid::new_v4();
    let seated = make_guest(event_id, "Seated", "family", 1);
    store.insert_guest(seated.clone());
    let table = make_table(event_id, "Table 1", 6);
    store.insert_table(table.clone());
    store.insert_assignment(make_assignment(event_id, seated.id, table.id));

    let newcomers: Vec<Guest> = (0..3)
        .map(|i| make_guest(event_id, &format!("New {}", i), "friends", 2))
        .collect();
    for guest in &newcomers {
        store.insert_guest(guest.clone());
    }
    let svc = service(store.clone());

    let request = ArrangeWithConfigsRequest {
        // One blank reserved table; mixing does the seating
        configs: vec![group_config(4, 1, &[])],
        clear_existing: false,
        mix_remaining: true,
        selection: GuestSelection::default(),
    };
    let summary = svc.arrange_with_configs(event_id, &request).await?;

    assert_eq!(summary.tables_created, 1);
    assert_eq!(summary.guests_seated, 3);
    assert_eq!(summary.remaining_unseated, 0);

    // Existing table took two parties of 2 on top of its occupant (5/6);
    // the third went to the new blank table
    let assignments = store.assignments_for_event(event_id).await?;
    let on_existing = assignments
        .iter()
        .filter(|a| a.table_id == table.id)
        .count();
    assert_eq!(on_existing, 3);
    assert_eq!(assignments.len(), 4);
    Ok(())
}

#[tokio::test]
async fn test_conservation_when_capacity_runs_short() -> Result<()> {
    let store = Arc::new(MemoryStore::new());
    let event_id = Uuid::new_v4();
    for i in 0..6 {
        store.insert_guest(make_guest(event_id, &format!("Guest {}", i), "family", 2));
    }
    let svc = service(store.clone());

    // One table of 4 for 12 seats of demand: most guests stay unseated
    let request = ArrangeWithConfigsRequest {
        configs: vec![group_config(4, 1, &["family"])],
        clear_existing: true,
        mix_remaining: false,
        selection: GuestSelection::default(),
    };
    let summary = svc.arrange_with_configs(event_id, &request).await?;

    assert_eq!(summary.guests_seated + summary.remaining_unseated, 6);
    assert_eq!(
        store.assignments_for_event(event_id).await?.len(),
        summary.guests_seated as usize
    );
    Ok(())
}

#[tokio::test]
async fn test_regenerate_seats_preserves_bindings() -> Result<()> {
    let store = Arc::new(MemoryStore::new());
    let event_id = Uuid::new_v4();
    let guest = make_guest(event_id, "Bound", "family", 1);
    store.insert_guest(guest.clone());

    let mut table = make_table(event_id, "Table 1", 4);
    table.seats = (1..=4)
        .map(|n| Seat {
            id: Uuid::new_v4(),
            table_id: table.id,
            seat_number: n,
            relative_x: 0.0,
            relative_y: 0.0,
            angle: 0.0,
            guest_id: (n == 2).then_some(guest.id),
        })
        .collect();
    store.insert_table(table.clone());
    let svc = service(store.clone());

    svc.regenerate_table_seats(
        event_id,
        table.id,
        TableResize {
            capacity: 6,
            shape: TableShape::Oval,
            seating_arrangement: "even".to_string(),
            width: 160.0,
            height: 100.0,
        },
    )
    .await?;

    let tables = store.tables_for_event(event_id).await?;
    let updated = tables.iter().find(|t| t.id == table.id).unwrap();
    assert_eq!(updated.capacity, 6);
    assert_eq!(updated.seats.len(), 6);
    let bound_seat = updated
        .seats
        .iter()
        .find(|s| s.guest_id == Some(guest.id))
        .unwrap();
    assert_eq!(bound_seat.seat_number, 2);
    Ok(())
}

#[tokio::test]
async fn test_caller_labels_flow_into_table_names() -> Result<()> {
    seating_engine::utils::setup_environment();

    struct HebrewLabels;
    impl seating_engine::LabelLookup for HebrewLabels {
        fn group_label(&self, raw: &str) -> String {
            match raw {
                "family" => "משפחה".to_string(),
                other => other.to_string(),
            }
        }
    }

    let store = Arc::new(MemoryStore::new());
    let event_id = Uuid::new_v4();
    store.insert_guest(make_guest(event_id, "Guest", "family", 1));
    let svc = AllocationService::new(store.clone(), EngineConfig::default())
        .with_labels(Arc::new(HebrewLabels));

    svc.arrange_by_size(event_id, &by_size_request(4)).await?;

    let tables = store.tables_for_event(event_id).await?;
    assert_eq!(tables[0].name, "Table 1 - משפחה");
    Ok(())
}

#[tokio::test]
async fn test_assign_and_unassign_guest() -> Result<()> {
    let store = Arc::new(MemoryStore::new());
    let event_id = Uuid::new_v4();
    let guest = make_guest(event_id, "Mover", "family", 1);
    store.insert_guest(guest.clone());
    let first = make_table(event_id, "Table 1", 4);
    let second = make_table(event_id, "Table 2", 4);
    store.insert_table(first.clone());
    store.insert_table(second.clone());
    let svc = service(store.clone());

    svc.assign_guest(event_id, guest.id, first.id).await?;
    svc.assign_guest(event_id, guest.id, second.id).await?;

    let assignments = store.assignments_for_event(event_id).await?;
    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0].table_id, second.id);

    assert!(svc.unassign_guest(event_id, guest.id).await?);
    assert!(!svc.unassign_guest(event_id, guest.id).await?);

    // Assigning a missing guest surfaces NotFound
    let missing = svc.assign_guest(event_id, Uuid::new_v4(), first.id).await;
    assert!(matches!(missing, Err(AllocationError::NotFound(_))));
    Ok(())
}
