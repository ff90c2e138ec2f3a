// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Session workflow tests: one login and one calendar lookup per batch.

use davcal_core::{
    CalendarOptions, CalendarRequest, Error, EventPatch, EventRequest, Orchestrator, Request,
    Response,
};

use crate::common::{Call, SpyTransport, test_config, test_input, ts};

#[tokio::test]
async fn session_logs_in_once() {
    // Arrange
    let spy = SpyTransport::new();
    spy.add_calendar("Work", "work");
    let orchestrator = Orchestrator::new(spy.clone(), test_config());
    let mut session = orchestrator.session();

    // Act
    let created = session
        .create_event("Work", test_input("Standup", 9))
        .await
        .unwrap();
    let uid = created.uid().to_string();
    session.get_event("Work", &uid).await.unwrap();
    let patch = EventPatch {
        title: Some("Daily standup".to_string()),
        ..Default::default()
    };
    session.update_event("Work", &uid, patch).await.unwrap();
    session.delete_event("Work", &uid).await.unwrap();

    // Assert
    assert_eq!(spy.count(|c| *c == Call::Login), 1);
    assert_eq!(spy.count(|c| *c == Call::FetchCollections), 1);
    assert_eq!(spy.object_count(), 0);
}

#[tokio::test]
async fn session_sees_calendars_it_creates() {
    // Arrange
    let spy = SpyTransport::new();
    let orchestrator = Orchestrator::new(spy.clone(), test_config());
    let mut session = orchestrator.session();

    // Act
    session
        .create_calendar("Trips", CalendarOptions::default())
        .await
        .unwrap();
    let record = session
        .create_event("Trips", test_input("Flight", 6))
        .await
        .unwrap();

    // Assert
    assert!(record.url.as_str().starts_with("/calendars/alice/trips/"));
    assert_eq!(spy.count(|c| *c == Call::FetchCollections), 1);
}

#[tokio::test]
async fn session_forgets_deleted_calendars() {
    // Arrange
    let spy = SpyTransport::new();
    spy.add_calendar("Old", "old");
    let orchestrator = Orchestrator::new(spy.clone(), test_config());
    let mut session = orchestrator.session();

    // Act
    session.delete_calendar("Old").await.unwrap();
    let result = session.create_event("Old", test_input("Ghost", 9)).await;

    // Assert
    assert!(matches!(result, Err(Error::NotFound { .. })));
    assert_eq!(spy.count(|c| *c == Call::FetchCollections), 1);
}

#[tokio::test]
async fn session_list_calendars_refreshes() {
    // Arrange
    let spy = SpyTransport::new();
    spy.add_calendar("Work", "work");
    let orchestrator = Orchestrator::new(spy.clone(), test_config());
    let mut session = orchestrator.session();
    session.list_calendars().await.unwrap();
    spy.add_calendar("Shared", "shared");

    // Act
    let calendars = session.list_calendars().await.unwrap();
    let record = session
        .create_event("Shared", test_input("Sync", 11))
        .await
        .unwrap();

    // Assert
    assert_eq!(calendars.len(), 2);
    assert!(record.url.as_str().starts_with("/calendars/alice/shared/"));
    assert_eq!(spy.count(|c| *c == Call::Login), 1);
    assert_eq!(spy.count(|c| *c == Call::FetchCollections), 2);
}

#[tokio::test]
async fn session_execute_dispatches_requests() {
    // Arrange
    let spy = SpyTransport::new();
    spy.add_calendar("Work", "work");
    let orchestrator = Orchestrator::new(spy.clone(), test_config());
    let mut session = orchestrator.session();
    let input = test_input("Review", 15);

    // Act
    let created = session
        .execute(Request::Event(EventRequest::Create {
            calendar: "Work".to_string(),
            input,
        }))
        .await
        .unwrap();
    let listed = session
        .execute(Request::Event(EventRequest::List {
            calendar: "Work".to_string(),
            start: ts("2025-06-02T00:00:00Z"),
            end: ts("2025-06-03T00:00:00Z"),
        }))
        .await
        .unwrap();
    let calendars = session
        .execute(Request::Calendar(CalendarRequest::List))
        .await
        .unwrap();

    // Assert
    let Response::Event(record) = created else {
        panic!("expected an event, got {created:?}");
    };
    assert_eq!(listed, Response::Events(vec![record]));
    assert!(matches!(calendars, Response::Calendars(list) if list.len() == 1));
    assert_eq!(spy.count(|c| *c == Call::Login), 1);
}
