// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Invalid input is rejected before anything reaches the server.

use davcal_core::{Attendee, CalendarOptions, Error, EventInput, EventPatch, Orchestrator};

use crate::common::{SpyTransport, test_config, test_input, ts};

fn setup() -> (SpyTransport, Orchestrator<SpyTransport>) {
    let spy = SpyTransport::new();
    spy.add_calendar("Work", "work");
    let orchestrator = Orchestrator::new(spy.clone(), test_config());
    (spy, orchestrator)
}

#[tokio::test]
async fn validation_end_before_start() {
    // Arrange
    let (spy, orchestrator) = setup();
    let input = EventInput::new(
        "Backwards",
        ts("2025-06-02T10:00:00Z"),
        ts("2025-06-02T09:00:00Z"),
    );

    // Act
    let result = orchestrator.create_event("Work", input).await;

    // Assert
    assert!(matches!(result, Err(Error::Validation(_))));
    assert!(spy.calls().is_empty());
}

#[tokio::test]
async fn validation_zero_length_event() {
    // Arrange
    let (spy, orchestrator) = setup();
    let at = ts("2025-06-02T10:00:00Z");

    // Act
    let result = orchestrator
        .create_event("Work", EventInput::new("Instant", at, at))
        .await;

    // Assert
    assert!(matches!(result, Err(Error::Validation(_))));
    assert!(spy.calls().is_empty());
}

#[tokio::test]
async fn validation_invalid_attendee_email() {
    // Arrange
    let (spy, orchestrator) = setup();
    let mut input = test_input("Party", 18);
    input.attendees = vec![Attendee::new("not-an-email")];

    // Act
    let result = orchestrator.create_event("Work", input).await;

    // Assert
    match result {
        Err(err @ Error::Validation(_)) => {
            assert!(err.to_string().contains("not-an-email"));
            assert_eq!(err.kind(), "validation");
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(spy.calls().is_empty());
}

#[tokio::test]
async fn validation_invalid_patch() {
    // Arrange
    let (spy, orchestrator) = setup();
    let patch = EventPatch {
        start: Some(ts("2025-06-02T12:00:00Z")),
        end: Some(ts("2025-06-02T11:00:00Z")),
        ..Default::default()
    };

    // Act
    let result = orchestrator.update_event("Work", "abc", patch).await;

    // Assert
    assert!(matches!(result, Err(Error::Validation(_))));
    assert!(spy.calls().is_empty());
}

#[tokio::test]
async fn validation_empty_names() {
    // Arrange
    let (spy, orchestrator) = setup();

    // Act
    let calendar = orchestrator
        .create_calendar("  ", CalendarOptions::default())
        .await;
    let event = orchestrator.get_event("Work", "").await;
    let range = orchestrator
        .list_events(
            "Work",
            ts("2025-06-03T00:00:00Z"),
            ts("2025-06-02T00:00:00Z"),
        )
        .await;

    // Assert
    assert!(matches!(calendar, Err(Error::Validation(_))));
    assert!(matches!(event, Err(Error::Validation(_))));
    assert!(matches!(range, Err(Error::Validation(_))));
    assert!(spy.calls().is_empty());
}

#[tokio::test]
async fn validation_rejected_login() {
    // Arrange
    let (spy, orchestrator) = setup();
    spy.reject_login();

    // Act
    let result = orchestrator.list_calendars().await;

    // Assert
    match result {
        Err(err @ Error::Transport(_)) => {
            assert_eq!(err.to_string(), "Server doesn't support CalDAV");
            assert_eq!(err.kind(), "transport");
        }
        other => panic!("expected transport error, got {other:?}"),
    }
}

#[tokio::test]
async fn validation_misconfigured_organizer() {
    // Arrange
    let spy = SpyTransport::new();
    spy.add_calendar("Work", "work");
    let mut config = test_config();
    config.organizer_email = Some("alice at example".to_string());
    let orchestrator = Orchestrator::new(spy.clone(), config);

    // Act
    let created = orchestrator
        .create_event("Work", test_input("Kickoff", 9))
        .await;
    let mut session = orchestrator.session();
    let updated = session
        .update_event(
            "Work",
            "some-uid",
            EventPatch {
                title: Some("Renamed".to_string()),
                ..Default::default()
            },
        )
        .await;

    // Assert
    assert!(matches!(created, Err(Error::Validation(_))));
    assert!(matches!(updated, Err(Error::Validation(_))));
    assert!(spy.calls().is_empty());
}
