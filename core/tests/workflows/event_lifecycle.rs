// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end event lifecycle workflow tests.
//!
//! These tests validate complete workflows from event creation through
//! modification and deletion, checking what reaches the server on the way.

use davcal_caldav::Href;
use davcal_core::{
    Attendee, CoreConfig, Error, EventPatch, NotFoundKind, Orchestrator, PartStat, Role,
};

use crate::common::{Call, SpyTransport, event_ics, test_config, test_input, ts};

fn setup() -> (SpyTransport, Orchestrator<SpyTransport>) {
    let spy = SpyTransport::new();
    spy.add_calendar("Work", "work");
    let orchestrator = Orchestrator::new(spy.clone(), test_config());
    (spy, orchestrator)
}

#[tokio::test]
async fn event_lifecycle_create_flow() {
    // Arrange
    let (spy, orchestrator) = setup();
    let mut input = test_input("Team Meeting", 9);
    input.description = Some("Weekly sync, agenda; notes\\links".to_string());
    input.location = Some("Room 4".to_string());

    // Act
    let record = orchestrator.create_event("Work", input).await.unwrap();

    // Assert - UID assigned in the configured namespace
    let uid = record.uid().to_string();
    assert!(!uid.is_empty());
    assert!(uid.ends_with("@davcal-test"));

    // Assert - stored as <uid>.ics in the calendar
    assert_eq!(
        record.url.as_str(),
        format!("/calendars/alice/work/{uid}.ics")
    );
    assert!(spy.calls().contains(&Call::CreateObject {
        collection: "/calendars/alice/work/".into(),
        filename: format!("{uid}.ics"),
    }));
    assert_eq!(record.etag, spy.object_etag(&record.url));

    // Assert - event content, organizer from the configured identity
    assert_eq!(record.event.title, "Team Meeting");
    assert_eq!(
        record.event.description.as_deref(),
        Some("Weekly sync, agenda; notes\\links")
    );
    let organizer = record.event.organizer.as_ref().unwrap();
    assert_eq!(organizer.email, "alice@example.com");
    assert_eq!(organizer.display_name.as_deref(), Some("Alice"));

    // Assert - the stored text is escaped
    let text = spy.object_text(&record.url).unwrap();
    assert!(text.contains("DESCRIPTION:Weekly sync\\, agenda\\; notes\\\\links\r\n"));
}

#[tokio::test]
async fn event_lifecycle_get_round_trips() {
    // Arrange
    let (_spy, orchestrator) = setup();
    let mut input = test_input("Planning", 14);
    input.attendees = vec![Attendee {
        email: "a@b.com".to_string(),
        display_name: Some("Alice".to_string()),
        role: Role::Chair,
        rsvp: true,
        status: PartStat::Accepted,
    }];
    let created = orchestrator.create_event("Work", input).await.unwrap();

    // Act
    let fetched = orchestrator
        .get_event("Work", created.uid())
        .await
        .unwrap();

    // Assert
    assert_eq!(fetched.event.uid, created.event.uid);
    assert_eq!(fetched.event.title, "Planning");
    assert_eq!(fetched.event.start, ts("2025-06-02T14:00:00Z"));
    assert_eq!(fetched.event.end, ts("2025-06-02T14:59:00Z"));
    assert_eq!(fetched.event.organizer, created.event.organizer);
    assert_eq!(fetched.event.attendees.len(), 1);
    let attendee = &fetched.event.attendees[0];
    assert_eq!(attendee.email, "a@b.com");
    assert_eq!(attendee.role, Role::Chair);
    assert!(attendee.rsvp);
    assert_eq!(attendee.status, PartStat::NeedsAction);
}

#[tokio::test]
async fn event_lifecycle_get_unknown_uid() {
    // Arrange
    let (_spy, orchestrator) = setup();

    // Act
    let result = orchestrator.get_event("Work", "nonexistent-uid").await;

    // Assert
    match result {
        Err(Error::NotFound { kind, key }) => {
            assert_eq!(kind, NotFoundKind::Event);
            assert_eq!(key, "nonexistent-uid");
        }
        other => panic!("expected not found, got {other:?}"),
    }
}

#[tokio::test]
async fn event_lifecycle_unknown_calendar() {
    // Arrange
    let (spy, orchestrator) = setup();

    // Act
    let result = orchestrator.create_event("Home", test_input("Dentist", 8)).await;

    // Assert
    assert!(matches!(
        result,
        Err(Error::NotFound {
            kind: NotFoundKind::Calendar,
            ..
        })
    ));
    assert_eq!(spy.object_count(), 0);
}

#[tokio::test]
async fn event_lifecycle_list_sorted_by_start() {
    // Arrange
    let (spy, orchestrator) = setup();
    let work: Href = "/calendars/alice/work/".into();
    spy.put_object(
        &work,
        "t2.ics",
        event_ics("t2", "Third", "2025-06-02T16:00:00Z", "2025-06-02T17:00:00Z"),
    );
    spy.put_object(
        &work,
        "t0.ics",
        event_ics("t0", "First", "2025-06-02T08:00:00Z", "2025-06-02T09:00:00Z"),
    );
    spy.put_object(
        &work,
        "t1.ics",
        event_ics("t1", "Second", "2025-06-02T12:00:00Z", "2025-06-02T13:00:00Z"),
    );

    // Act
    let events = orchestrator
        .list_events(
            "Work",
            ts("2025-06-02T00:00:00Z"),
            ts("2025-06-03T00:00:00Z"),
        )
        .await
        .unwrap();

    // Assert
    let uids: Vec<_> = events.iter().map(|e| e.uid()).collect();
    assert_eq!(uids, ["t0", "t1", "t2"]);
}

#[tokio::test]
async fn event_lifecycle_list_empty_range() {
    // Arrange
    let (_spy, orchestrator) = setup();
    orchestrator
        .create_event("Work", test_input("Standup", 9))
        .await
        .unwrap();

    // Act
    let events = orchestrator
        .list_events(
            "Work",
            ts("2030-01-01T00:00:00Z"),
            ts("2030-01-02T00:00:00Z"),
        )
        .await
        .unwrap();

    // Assert
    assert!(events.is_empty());
}

#[tokio::test]
async fn event_lifecycle_search_filters_text() {
    // Arrange
    let (_spy, orchestrator) = setup();
    orchestrator
        .create_event("Work", test_input("Team Meeting", 9))
        .await
        .unwrap();
    orchestrator
        .create_event("Work", test_input("Lunch", 12))
        .await
        .unwrap();
    let mut review = test_input("Review", 15);
    review.location = Some("Meeting room B".to_string());
    orchestrator.create_event("Work", review).await.unwrap();
    let (start, end) = (ts("2025-06-02T00:00:00Z"), ts("2025-06-03T00:00:00Z"));

    // Act
    let found = orchestrator
        .search_events("Work", "meeting", start, end)
        .await
        .unwrap();
    let none = orchestrator
        .search_events("Work", "holiday", start, end)
        .await
        .unwrap();

    // Assert
    let titles: Vec<_> = found.iter().map(|e| e.event.title.as_str()).collect();
    assert_eq!(titles, ["Team Meeting", "Review"]);
    assert!(none.is_empty());
}

#[tokio::test]
async fn event_lifecycle_update_merges_patch() {
    // Arrange
    let (spy, orchestrator) = setup();
    let mut input = test_input("Original Title", 10);
    input.description = Some("Keep me".to_string());
    input.location = Some("Drop me".to_string());
    input.status = Some("TENTATIVE".to_string());
    let created = orchestrator.create_event("Work", input).await.unwrap();
    let etag_before = spy.object_etag(&created.url);

    // Act
    let patch = EventPatch {
        title: Some("Updated Title".to_string()),
        location: Some(None),
        status: Some(Some("CONFIRMED".to_string())),
        ..Default::default()
    };
    let updated = orchestrator
        .update_event("Work", created.uid(), patch)
        .await
        .unwrap();

    // Assert - touched fields changed
    assert_eq!(updated.event.title, "Updated Title");
    assert_eq!(updated.event.location, None);
    assert_eq!(updated.event.status.as_deref(), Some("CONFIRMED"));

    // Assert - untouched fields kept
    assert_eq!(updated.event.uid, created.event.uid);
    assert_eq!(updated.event.description.as_deref(), Some("Keep me"));
    assert_eq!(updated.event.start, created.event.start);
    assert_eq!(updated.event.end, created.event.end);
    assert_eq!(updated.event.organizer, created.event.organizer);

    // Assert - conditional write with the stored etag, new etag returned
    assert!(spy.calls().contains(&Call::UpdateObject {
        object: created.url.clone(),
        etag: etag_before.clone(),
    }));
    assert_ne!(updated.etag, etag_before);
    assert_eq!(updated.etag, spy.object_etag(&created.url));
}

#[tokio::test]
async fn event_lifecycle_update_keeps_foreign_organizer() {
    // Arrange
    let (spy, orchestrator) = setup();
    let work: Href = "/calendars/alice/work/".into();
    spy.put_object(
        &work,
        "ext.ics",
        event_ics(
            "ext",
            "External",
            "2025-06-02T10:00:00Z",
            "2025-06-02T11:00:00Z",
        ),
    );

    // Act - stored event has no organizer, the identity fills in
    let updated = orchestrator
        .update_event(
            "Work",
            "ext",
            EventPatch {
                description: Some(Some("Added".to_string())),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    // Assert
    assert_eq!(updated.uid(), "ext");
    assert_eq!(
        updated.event.organizer.as_ref().map(|o| o.email.as_str()),
        Some("alice@example.com")
    );
}

#[tokio::test]
async fn event_lifecycle_update_concurrent_change_is_conflict() {
    // Arrange
    let (spy, orchestrator) = setup();
    let created = orchestrator
        .create_event("Work", test_input("Contended", 11))
        .await
        .unwrap();
    spy.interfere_next_write();

    // Act
    let result = orchestrator
        .update_event(
            "Work",
            created.uid(),
            EventPatch {
                title: Some("Mine".to_string()),
                ..Default::default()
            },
        )
        .await;

    // Assert
    assert!(matches!(result, Err(Error::Conflict(_))));
    let text = spy.object_text(&created.url).unwrap();
    assert!(text.contains("SUMMARY:Contended\r\n"));
}

#[tokio::test]
async fn event_lifecycle_update_without_precondition() {
    // Arrange
    let spy = SpyTransport::new();
    spy.add_calendar("Work", "work");
    let config = CoreConfig {
        etag_precondition: false,
        ..test_config()
    };
    let orchestrator = Orchestrator::new(spy.clone(), config);
    let created = orchestrator
        .create_event("Work", test_input("Loose", 11))
        .await
        .unwrap();
    spy.interfere_next_write();

    // Act
    let updated = orchestrator
        .update_event(
            "Work",
            created.uid(),
            EventPatch {
                title: Some("Last writer wins".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    // Assert
    assert_eq!(updated.event.title, "Last writer wins");
    assert!(spy.calls().contains(&Call::UpdateObject {
        object: created.url.clone(),
        etag: None,
    }));
}

#[tokio::test]
async fn event_lifecycle_update_rejects_inverted_merge() {
    // Arrange
    let (spy, orchestrator) = setup();
    let created = orchestrator
        .create_event("Work", test_input("Morning", 9))
        .await
        .unwrap();

    // Act - new end lies before the stored start
    let result = orchestrator
        .update_event(
            "Work",
            created.uid(),
            EventPatch {
                end: Some(ts("2025-06-02T08:00:00Z")),
                ..Default::default()
            },
        )
        .await;

    // Assert
    assert!(matches!(result, Err(Error::Validation(_))));
    assert_eq!(
        spy.count(|c| matches!(c, Call::UpdateObject { .. })),
        0
    );
}

#[tokio::test]
async fn event_lifecycle_update_event_with_duration() {
    // Arrange - another client stored the length instead of the end
    let (spy, orchestrator) = setup();
    let work: Href = "/calendars/alice/work/".into();
    let href = spy.put_object(
        &work,
        "standup.ics",
        "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nBEGIN:VEVENT\r\nUID:standup\r\nSUMMARY:Standup\r\nDTSTART:20250602T100000Z\r\nDURATION:PT1H\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n".to_string(),
    );

    // Act
    let fetched = orchestrator.get_event("Work", "standup").await.unwrap();
    let patch = EventPatch {
        title: Some("Daily Standup".to_string()),
        ..Default::default()
    };
    let updated = orchestrator
        .update_event("Work", "standup", patch)
        .await
        .unwrap();

    // Assert
    assert_eq!(fetched.event.end, ts("2025-06-02T11:00:00Z"));
    assert_eq!(updated.event.title, "Daily Standup");
    assert_eq!(updated.event.start, ts("2025-06-02T10:00:00Z"));
    assert_eq!(updated.event.end, ts("2025-06-02T11:00:00Z"));
    let text = spy.object_text(&href).unwrap();
    assert!(text.contains("DTEND:20250602T110000Z\r\n"));
    assert!(!text.contains("DURATION"));
}

#[tokio::test]
async fn event_lifecycle_update_stored_instant() {
    // Arrange - a DATE-TIME start without end or duration is an instant
    let (spy, orchestrator) = setup();
    let work: Href = "/calendars/alice/work/".into();
    spy.put_object(
        &work,
        "reminder.ics",
        "BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\nUID:reminder\r\nSUMMARY:Reminder\r\nDTSTART:20250602T080000Z\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n".to_string(),
    );

    // Act
    let renamed = orchestrator
        .update_event(
            "Work",
            "reminder",
            EventPatch {
                title: Some("Call back".to_string()),
                ..Default::default()
            },
        )
        .await;
    let moved = orchestrator
        .update_event(
            "Work",
            "reminder",
            EventPatch {
                start: Some(ts("2025-06-02T09:00:00Z")),
                ..Default::default()
            },
        )
        .await;

    // Assert - renaming keeps the instant, moving only the start is checked
    let renamed = renamed.unwrap();
    assert_eq!(renamed.event.title, "Call back");
    assert_eq!(renamed.event.start, renamed.event.end);
    assert!(matches!(moved, Err(Error::Validation(_))));
    assert_eq!(
        spy.count(|c| matches!(c, Call::UpdateObject { .. })),
        1
    );
}

#[tokio::test]
async fn event_lifecycle_delete_flow() {
    // Arrange
    let (spy, orchestrator) = setup();
    let created = orchestrator
        .create_event("Work", test_input("Short lived", 13))
        .await
        .unwrap();
    let uid = created.uid().to_string();

    // Act
    let deleted = orchestrator.delete_event("Work", &uid).await.unwrap();

    // Assert
    assert!(deleted.success);
    assert_eq!(deleted.uid.as_deref(), Some(uid.as_str()));
    assert_eq!(spy.object_count(), 0);
    assert!(spy.calls().contains(&Call::DeleteObject {
        object: created.url.clone(),
        etag: created.etag.clone(),
    }));

    // Assert - deleting again fails fast
    let again = orchestrator.delete_event("Work", &uid).await;
    assert!(matches!(again, Err(Error::NotFound { .. })));
}

#[tokio::test]
async fn event_lifecycle_ambiguous_uid() {
    // Arrange
    let (spy, orchestrator) = setup();
    let work: Href = "/calendars/alice/work/".into();
    let text = event_ics("dup", "Twice", "2025-06-02T10:00:00Z", "2025-06-02T11:00:00Z");
    spy.put_object(&work, "a.ics", text.clone());
    spy.put_object(&work, "b.ics", text);

    // Act
    let get = orchestrator.get_event("Work", "dup").await;
    let delete = orchestrator.delete_event("Work", "dup").await;

    // Assert
    assert!(matches!(get, Err(Error::Conflict(_))));
    assert!(matches!(delete, Err(Error::Conflict(_))));
    assert_eq!(spy.object_count(), 2);
}

#[tokio::test]
async fn event_lifecycle_undecodable_object() {
    // Arrange
    let (spy, orchestrator) = setup();
    let work: Href = "/calendars/alice/work/".into();
    spy.put_object(
        &work,
        "bad.ics",
        "BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\nUID:bad\r\nDTSTART:tomorrow\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n".to_string(),
    );

    // Act
    let result = orchestrator.get_event("Work", "bad").await;

    // Assert
    assert!(matches!(result, Err(Error::Decode(_))));
}
