// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Calendar management workflow tests.

use davcal_caldav::Href;
use davcal_core::{CalendarOptions, Error, NotFoundKind, Orchestrator};

use crate::common::{Call, SpyTransport, test_config, test_input, ts};

#[tokio::test]
async fn calendars_create_under_home() {
    // Arrange
    let spy = SpyTransport::new();
    let orchestrator = Orchestrator::new(spy.clone(), test_config());
    let options = CalendarOptions {
        color: Some("#ff8800".to_string()),
        timezone: Some("Europe/Berlin".to_string()),
        description: None,
    };

    // Act
    let calendar = orchestrator
        .create_calendar("Team Calendar", options)
        .await
        .unwrap();

    // Assert
    assert_eq!(calendar.display_name, "Team Calendar");
    assert_eq!(calendar.url.as_str(), "/calendars/alice/team-calendar/");
    assert_eq!(calendar.color.as_deref(), Some("#ff8800"));
    assert_eq!(calendar.timezone.as_deref(), Some("Europe/Berlin"));
    assert_eq!(
        spy.calls(),
        [
            Call::Login,
            Call::FetchCollections,
            Call::CreateCollection {
                href: "/calendars/alice/team-calendar/".into()
            },
        ]
    );
}

#[tokio::test]
async fn calendars_create_duplicate_is_conflict() {
    // Arrange
    let spy = SpyTransport::new();
    spy.add_calendar("Work", "work");
    let orchestrator = Orchestrator::new(spy.clone(), test_config());

    // Act
    let result = orchestrator
        .create_calendar("Work", CalendarOptions::default())
        .await;

    // Assert
    assert!(matches!(result, Err(Error::Conflict(_))));
    assert_eq!(
        spy.count(|c| matches!(c, Call::CreateCollection { .. })),
        0
    );
}

#[tokio::test]
async fn calendars_create_then_list() {
    // Arrange
    let spy = SpyTransport::new();
    spy.add_calendar("Work", "work");
    let orchestrator = Orchestrator::new(spy, test_config());
    orchestrator
        .create_calendar("Personal", CalendarOptions::default())
        .await
        .unwrap();

    // Act
    let calendars = orchestrator.list_calendars().await.unwrap();

    // Assert
    let names: Vec<_> = calendars.iter().map(|c| c.display_name.as_str()).collect();
    assert_eq!(names, ["Work", "Personal"]);
}

#[tokio::test]
async fn calendars_delete_removes_events() {
    // Arrange
    let spy = SpyTransport::new();
    spy.add_calendar("Work", "work");
    let orchestrator = Orchestrator::new(spy.clone(), test_config());
    orchestrator
        .create_event("Work", test_input("Standup", 9))
        .await
        .unwrap();

    // Act
    let deleted = orchestrator.delete_calendar("Work").await.unwrap();

    // Assert
    assert!(deleted.success);
    assert_eq!(deleted.uid, None);
    let work: Href = "/calendars/alice/work/".into();
    assert!(spy.calls().contains(&Call::DeleteCollection { href: work }));
    assert_eq!(spy.object_count(), 0);
    assert!(orchestrator.list_calendars().await.unwrap().is_empty());
}

#[tokio::test]
async fn calendars_delete_unknown() {
    // Arrange
    let spy = SpyTransport::new();
    let orchestrator = Orchestrator::new(spy.clone(), test_config());

    // Act
    let result = orchestrator.delete_calendar("Nope").await;

    // Assert
    match result {
        Err(Error::NotFound { kind, key }) => {
            assert_eq!(kind, NotFoundKind::Calendar);
            assert_eq!(key, "Nope");
        }
        other => panic!("expected not found, got {other:?}"),
    }
    assert_eq!(
        spy.count(|c| matches!(c, Call::DeleteCollection { .. })),
        0
    );
}

#[tokio::test]
async fn calendars_skip_task_lists() {
    // Arrange
    let spy = SpyTransport::new();
    spy.add_calendar("Work", "work");
    spy.add_task_list("Chores", "chores");
    let orchestrator = Orchestrator::new(spy.clone(), test_config());

    // Act
    let names: Vec<String> = orchestrator
        .list_calendars()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.display_name)
        .collect();
    let resolved = orchestrator
        .list_events(
            "Chores",
            ts("2025-06-01T00:00:00Z"),
            ts("2025-06-08T00:00:00Z"),
        )
        .await;

    // Assert
    assert_eq!(names, ["Work"]);
    assert!(matches!(
        resolved,
        Err(Error::NotFound {
            kind: NotFoundKind::Calendar,
            ..
        })
    ));
}
