use assert_matches::assert_matches;
use chrono::{DateTime, Duration, Timelike, Utc};
use uuid::Uuid;

use catalog_cell::store::AppointmentIndex;
use scheduling_cell::models::Appointment;
use scheduling_cell::store::{AppointmentStore, MemoryAppointmentStore, StoreError};

fn appointment(
    client_id: Uuid,
    employee_id: Uuid,
    at: DateTime<Utc>,
) -> Appointment {
    Appointment {
        id: Uuid::new_v4(),
        client_id,
        service_id: Uuid::new_v4(),
        employee_id,
        scheduled_at: at.with_nanosecond(0).unwrap(),
        created_at: Utc::now(),
    }
}

fn in_hours(h: i64) -> DateTime<Utc> {
    (Utc::now() + Duration::hours(h)).with_nanosecond(0).unwrap()
}

#[tokio::test]
async fn insert_enforces_slot_uniqueness() {
    let store = MemoryAppointmentStore::new();
    let employee = Uuid::new_v4();
    let at = in_hours(1);

    store
        .insert(appointment(Uuid::new_v4(), employee, at))
        .await
        .unwrap();

    let err = store
        .insert(appointment(Uuid::new_v4(), employee, at))
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::SlotTaken { employee_id, .. } if employee_id == employee);

    // A different employee at the same instant is a different slot.
    store
        .insert(appointment(Uuid::new_v4(), Uuid::new_v4(), at))
        .await
        .unwrap();
}

#[tokio::test]
async fn failed_insert_persists_nothing() {
    let store = MemoryAppointmentStore::new();
    let employee = Uuid::new_v4();
    let at = in_hours(1);

    store
        .insert(appointment(Uuid::new_v4(), employee, at))
        .await
        .unwrap();

    let loser = appointment(Uuid::new_v4(), employee, at);
    let loser_id = loser.id;
    let loser_client = loser.client_id;
    store.insert(loser).await.unwrap_err();

    assert!(store.find_by_id(loser_id).await.is_none());
    assert!(!store.references_client(loser_client).await);
}

#[tokio::test]
async fn delete_frees_the_slot() {
    let store = MemoryAppointmentStore::new();
    let employee = Uuid::new_v4();
    let at = in_hours(1);
    let booked = store
        .insert(appointment(Uuid::new_v4(), employee, at))
        .await
        .unwrap();

    assert!(!store.is_slot_free(employee, at).await);
    assert!(store.delete(booked.id).await);
    assert!(store.is_slot_free(employee, at).await);

    // Second delete reports the absence.
    assert!(!store.delete(booked.id).await);
}

#[tokio::test]
async fn client_queries_partition_on_now() {
    let store = MemoryAppointmentStore::new();
    let client = Uuid::new_v4();

    let past = store
        .insert(appointment(client, Uuid::new_v4(), in_hours(-3)))
        .await
        .unwrap();
    let future = store
        .insert(appointment(client, Uuid::new_v4(), in_hours(3)))
        .await
        .unwrap();
    // Noise from another client.
    store
        .insert(appointment(Uuid::new_v4(), Uuid::new_v4(), in_hours(3)))
        .await
        .unwrap();

    let upcoming = store.upcoming_for_client(client).await;
    assert_eq!(upcoming.iter().map(|a| a.id).collect::<Vec<_>>(), vec![future.id]);

    let history = store.history_for_client(client).await;
    assert_eq!(history.iter().map(|a| a.id).collect::<Vec<_>>(), vec![past.id]);

    let all = store.find_by_client(client).await;
    assert_eq!(all.len(), 2);
    // Descending: most recent first.
    assert_eq!(all[0].id, future.id);
    assert_eq!(all[1].id, past.id);
}

#[tokio::test]
async fn date_queries_are_chronological() {
    let store = MemoryAppointmentStore::new();
    let employee = Uuid::new_v4();

    let later = store
        .insert(appointment(Uuid::new_v4(), employee, in_hours(2)))
        .await
        .unwrap();
    let sooner = store
        .insert(appointment(Uuid::new_v4(), employee, in_hours(1)))
        .await
        .unwrap();

    let date = sooner.scheduled_at.date_naive();
    let on_date = store.find_on_date(date).await;
    let expected: Vec<Uuid> = [sooner, later]
        .iter()
        .filter(|a| a.scheduled_at.date_naive() == date)
        .map(|a| a.id)
        .collect();
    assert_eq!(on_date.iter().map(|a| a.id).collect::<Vec<_>>(), expected);

    let mine = store.find_by_employee(employee).await;
    assert_eq!(mine.len(), 2);
    assert!(mine[0].scheduled_at >= mine[1].scheduled_at);
}

#[tokio::test]
async fn reference_index_tracks_all_three_foreign_keys() {
    let store = MemoryAppointmentStore::new();
    let client = Uuid::new_v4();
    let employee = Uuid::new_v4();
    let booked = store
        .insert(appointment(client, employee, in_hours(1)))
        .await
        .unwrap();

    assert!(store.references_client(client).await);
    assert!(store.references_employee(employee).await);
    assert!(store.references_service(booked.service_id).await);
    assert!(!store.references_client(Uuid::new_v4()).await);

    store.delete(booked.id).await;
    assert!(!store.references_client(client).await);
    assert!(!store.references_employee(employee).await);
    assert!(!store.references_service(booked.service_id).await);
}
